//! Per-vehicle car-following constants.

use crate::{CoreError, CoreResult};

/// Intelligent-driver constants for one vehicle.
///
/// The same constants drive both free-flow car following and the controlled
/// approach toward a virtual stationary leader at the stop point.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriverParams {
    /// Desired free-flow speed `v0`, m/s.
    pub v_desired: f64,
    /// Desired time headway `T`, s.
    pub t_headway: f64,
    /// Maximum acceleration `a`, m/s².
    pub a_max: f64,
    /// Comfortable deceleration `b`, m/s².
    pub b_comfort: f64,
    /// Acceleration exponent `δ`.
    pub delta: f64,
    /// Jam distance `s0`, m.
    pub s0: f64,
}

impl Default for DriverParams {
    fn default() -> Self {
        Self {
            v_desired: 30.0,
            t_headway: 1.0,
            a_max:     1.0,
            b_comfort: 1.5,
            delta:     4.0,
            s0:        2.0,
        }
    }
}

impl DriverParams {
    /// Fail fast on constants the car-following law cannot use.
    pub fn validate(&self) -> CoreResult<()> {
        let positive = [
            ("v_desired", self.v_desired),
            ("a_max", self.a_max),
            ("b_comfort", self.b_comfort),
            ("delta", self.delta),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoreError::Config(format!(
                    "driver parameter {name} must be finite and positive, got {value}"
                )));
            }
        }
        for (name, value) in [("t_headway", self.t_headway), ("s0", self.s0)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::Config(format!(
                    "driver parameter {name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}
