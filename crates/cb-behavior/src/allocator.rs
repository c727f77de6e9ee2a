//! Zone assignment and nearest-free-zone search.

use cb_core::{VehicleId, ZoneId};
use cb_corridor::{Corridor, CorridorEdge};

use crate::SimulationAdapter;

/// Signed zone offsets tried, in order, when the target zone is occupied.
///
/// Nearest first; at each radius the zone behind is tried before the zone
/// ahead.
pub const PROBE_ORDER: [i32; 8] = [-1, 1, -2, 2, -3, 3, -4, 4];

/// Curb lane index, where occupancy is measured.
const CURB_LANE: u8 = 0;

/// Outcome of one [`SpotAllocator::allocate`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Allocation {
    /// On a collector edge, or no longer approaching.
    NotApplicable,
    /// Target is more than the lookahead ahead; nothing to plan yet.
    TooFar,
    /// Target is free.  May differ from the previous zone if the vehicle had
    /// passed it and the target was snapped forward.
    Confirmed(ZoneId),
    /// Target was occupied; moved to a free alternative.
    Reassigned { from: ZoneId, to: ZoneId },
    /// Target and every bounded alternative are occupied.  Retried next tick.
    Exhausted(ZoneId),
}

impl Allocation {
    /// The zone in effect after the call, if the allocator acted.
    pub fn zone(self) -> Option<ZoneId> {
        match self {
            Allocation::Confirmed(z) | Allocation::Exhausted(z) => Some(z),
            Allocation::Reassigned { to, .. } => Some(to),
            Allocation::NotApplicable | Allocation::TooFar => None,
        }
    }
}

/// Resolves which zone a vehicle is heading for.
#[derive(Copy, Clone, Debug)]
pub struct SpotAllocator {
    lookahead_zones: u32,
}

impl Default for SpotAllocator {
    fn default() -> Self {
        Self { lookahead_zones: 5 }
    }
}

impl SpotAllocator {
    pub fn new(lookahead_zones: u32) -> Self {
        Self { lookahead_zones }
    }

    #[inline]
    pub fn lookahead_zones(&self) -> u32 {
        self.lookahead_zones
    }

    /// First assignment on entry: the desired zone clamped into `[0, N-1]`.
    pub fn initial_zone(corridor: &Corridor, desired: ZoneId) -> ZoneId {
        corridor.clamp_zone(desired)
    }

    /// Number of vehicles other than `vehicle` in the curb lane of `zone`.
    pub fn occupancy<A: SimulationAdapter + ?Sized>(adapter: &A, vehicle: VehicleId, zone: ZoneId) -> usize {
        adapter
            .get_ids_on_edge(CorridorEdge::Parking(zone))
            .into_iter()
            .filter(|&other| other != vehicle && adapter.get_lane(other) == CURB_LANE)
            .count()
    }

    #[inline]
    pub fn is_occupied<A: SimulationAdapter + ?Sized>(adapter: &A, vehicle: VehicleId, zone: ZoneId) -> bool {
        Self::occupancy(adapter, vehicle, zone) > 0
    }

    /// Every alternative to `target` that may be probed from `current`, in
    /// probe order: within `[current, current + lookahead]` and `[1, N-1]`.
    pub fn candidates(&self, corridor: &Corridor, current: ZoneId, target: ZoneId) -> Vec<ZoneId> {
        let upper = u64::from(current.0) + u64::from(self.lookahead_zones);
        PROBE_ORDER
            .iter()
            .filter_map(|&offset| target.offset(offset))
            .filter(|z| z.0 >= current.0 && u64::from(z.0) <= upper)
            .filter(|z| z.0 >= 1 && z.0 <= corridor.last_zone().0)
            .collect()
    }

    /// Re-plan the target zone of `vehicle` and commit any change.
    pub fn allocate<A: SimulationAdapter + ?Sized>(&self, adapter: &mut A, vehicle: VehicleId) -> Allocation {
        if !adapter.get_state(vehicle).is_approaching() {
            return Allocation::NotApplicable;
        }
        let Some(current) = adapter.get_edge(vehicle).zone() else {
            return Allocation::NotApplicable;
        };
        let previous = adapter.get_zone(vehicle);

        if u64::from(previous.0) > u64::from(current.0) + u64::from(self.lookahead_zones) {
            return Allocation::TooFar;
        }

        // Passed the target: the earliest zone still reachable is this one.
        let target = previous.max(current);

        let view: &A = adapter;
        let outcome = if !Self::is_occupied(view, vehicle, target) {
            Allocation::Confirmed(target)
        } else {
            match self
                .candidates(view.corridor(), current, target)
                .into_iter()
                .find(|&z| !Self::is_occupied(view, vehicle, z))
            {
                Some(to) => Allocation::Reassigned { from: target, to },
                None => Allocation::Exhausted(target),
            }
        };

        if let Some(zone) = outcome.zone() {
            if zone != previous {
                log::debug!("{vehicle}: zone {} -> {} ({outcome:?})", previous.0, zone.0);
                adapter.set_zone(vehicle, zone);
            }
        }
        outcome
    }
}
