//! Pure kinematics on the corridor.

use cb_corridor::{Corridor, CorridorEdge};

/// Where a vehicle is: edge, lane and distance from the edge start.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    pub edge:     CorridorEdge,
    pub lane:     u8,
    pub position: f64,
}

/// Integrate one step of `dt` seconds.
///
/// Returns `(new_speed, distance_travelled)`.  Speed is clamped to
/// `[0, speed_limit]`; distance uses the trapezoid of old and new speed, so a
/// vehicle braking to a halt mid-step still covers part of the step.
#[inline]
pub fn integrate_speed(speed: f64, accel: f64, dt: f64, speed_limit: f64) -> (f64, f64) {
    let next = (speed + accel * dt).clamp(0.0, speed_limit);
    (next, 0.5 * (speed + next) * dt)
}

/// Move `distance` metres along the route from `from`.
///
/// Overshoot past an edge end carries onto the next edge.  Returns `None`
/// once the vehicle runs off the end of `outflow`.
pub fn advance_along(corridor: &Corridor, from: Placement, distance: f64) -> Option<Placement> {
    let mut at = Placement { position: from.position + distance, ..from };
    loop {
        let length = corridor.edge_length(at.edge);
        if at.position < length {
            return Some(at);
        }
        let next = corridor.next_edge(at.edge)?;
        at = Placement {
            edge:     next,
            lane:     corridor.entry_lane(at.edge, at.lane, next),
            position: at.position - length,
        };
    }
}
