//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  The
//! mapping to simulated seconds is held in `SimClock`:
//!
//!   sim_time = tick * step_secs
//!
//! Using an integer tick as the canonical time unit keeps tick comparisons
//! exact; only durations (dwell time, kinematics) are carried as `f64`
//! seconds.
//!
//! The default step is 0.2 s, fine enough for the car-following law to stay
//! numerically stable at corridor speeds.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated seconds.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many simulated seconds one tick represents.  Default: 0.2.
    pub step_secs: f64,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    /// Create a clock at tick 0 with the given resolution.
    pub fn new(step_secs: f64) -> Self {
        Self {
            step_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.secs_at(self.current_tick)
    }

    /// Simulated seconds at an arbitrary tick.
    #[inline]
    pub fn secs_at(&self, tick: Tick) -> f64 {
        tick.0 as f64 * self.step_secs
    }

    /// How many ticks span `secs` seconds, rounded up.
    #[inline]
    pub fn ticks_for_secs(&self, secs: f64) -> u64 {
        if secs <= 0.0 {
            return 0;
        }
        (secs / self.step_secs).ceil() as u64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1} s)", self.current_tick, self.elapsed_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON scenario file by the application crate and
/// passed to the simulation runner.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Simulated seconds per tick.  Default: 0.2.
    pub step_secs: f64,

    /// Total ticks to simulate (the episode horizon).
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Write a roster snapshot every N ticks.  1 = every tick; 0 = never.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            step_secs:             0.2,
            total_ticks:           1_000,
            seed:                  10,
            output_interval_ticks: 1,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.step_secs)
    }

    /// Reject a step that would stall or blow up the integrator.
    pub fn validate(&self) -> crate::CoreResult<()> {
        if !self.step_secs.is_finite() || self.step_secs <= 0.0 {
            return Err(crate::CoreError::Config(format!(
                "step_secs must be finite and positive, got {}",
                self.step_secs
            )));
        }
        Ok(())
    }
}
