//! `ArrivalQueue` — sparse per-tick arrival queue.
//!
//! Most ticks have no arrivals.  Keying arrivals by tick means each tick the
//! simulation drains only what is due — O(arrivals) work instead of scanning
//! the whole demand table.

use std::collections::BTreeMap;

use cb_core::Tick;

use crate::Arrival;

/// A priority-queue mapping simulation ticks → arrivals due at that tick.
#[derive(Default)]
pub struct ArrivalQueue {
    inner: BTreeMap<Tick, Vec<Arrival>>,
    /// Cached total arrival count for O(1) `len()`.
    total: usize,
}

impl ArrivalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue from a list of arrivals, keyed by `depart_tick`.
    pub fn from_arrivals(arrivals: impl IntoIterator<Item = Arrival>) -> Self {
        let mut queue = Self::new();
        for arrival in arrivals {
            queue.push(arrival.depart_tick, arrival);
        }
        queue
    }

    /// Schedule `arrival` for `tick` (which may differ from its
    /// `depart_tick` when an entry is deferred).
    pub fn push(&mut self, tick: Tick, arrival: Arrival) {
        self.inner.entry(tick).or_default().push(arrival);
        self.total += 1;
    }

    /// Remove and return every arrival scheduled at or before `tick`.
    ///
    /// Earlier leftovers come first, then same-tick arrivals in insertion
    /// order.  Returns an empty `Vec` when nothing is due.
    pub fn drain_due(&mut self, tick: Tick) -> Vec<Arrival> {
        let later = match tick.0.checked_add(1) {
            Some(next) => self.inner.split_off(&Tick(next)),
            None => BTreeMap::new(),
        };
        let due = std::mem::replace(&mut self.inner, later);
        let arrivals: Vec<Arrival> = due.into_values().flatten().collect();
        self.total -= arrivals.len();
        arrivals
    }

    /// The earliest tick with at least one queued arrival, or `None` if empty.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// Iterator over every queued arrival, in tick order.
    pub fn iter(&self) -> impl Iterator<Item = &Arrival> + '_ {
        self.inner.values().flatten()
    }

    /// Total number of queued arrivals across all future ticks.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
