//! Intelligent Driver Model.
//!
//! Used directly for free-flow car following and, with a stationary virtual
//! leader at the stop point, for the controlled approach to a zone.

use cb_core::DriverParams;

/// Net gaps below this are floored before they reach a division.
pub const MIN_GAP: f64 = 0.01;

/// The vehicle ahead as seen by the follower.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leader {
    /// Bumper-to-bumper distance, m.
    pub gap:   f64,
    /// Leader speed, m/s.
    pub speed: f64,
}

/// Desired dynamic gap `s*` for speed `v` closing on a leader at `v_lead`.
#[inline]
pub fn desired_gap(params: &DriverParams, v: f64, v_lead: f64) -> f64 {
    let dynamic = v * params.t_headway
        + v * (v - v_lead) / (2.0 * (params.a_max * params.b_comfort).sqrt());
    params.s0 + dynamic.max(0.0)
}

/// Free-road term `a·(1 − (v/v0)^δ)`.
#[inline]
fn free_road(params: &DriverParams, v: f64) -> f64 {
    params.a_max * (1.0 - (v / params.v_desired).powf(params.delta))
}

/// Car-following acceleration with an optional leader.
///
/// Without a leader only the free-road term applies.
pub fn free_flow_accel(params: &DriverParams, v: f64, leader: Option<Leader>) -> f64 {
    match leader {
        None => free_road(params, v),
        Some(leader) => {
            let s = leader.gap.max(MIN_GAP);
            let interaction = desired_gap(params, v, leader.speed) / s;
            free_road(params, v) - params.a_max * interaction * interaction
        }
    }
}

/// Acceleration toward a stationary virtual leader `gap` metres ahead.
///
/// The caller is responsible for flooring `gap` above zero.
pub fn approach_accel(params: &DriverParams, v: f64, gap: f64) -> f64 {
    let interaction = desired_gap(params, v, 0.0) / gap;
    free_road(params, v) - params.a_max * interaction * interaction
}
