//! `cb-mobility` — host-side vehicle kinematics.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`motion`]   | `Placement`, speed integration, advancing along the route       |
//! | [`leader`]   | `find_leader` — nearest vehicle ahead in the lane               |
//! | [`engine`]   | `KinematicsEngine` — applies one tick of commands to the roster |
//! | [`error`]    | `MobilityError`, `MobilityResult<T>`                            |
//!
//! # Movement model
//!
//! Every tick of `dt` seconds, after all controllers have written their
//! commands:
//!
//! 1. A lane-change request is honoured if the target lane exists on the
//!    current edge.
//! 2. `v' = clamp(v + a·dt, 0, speed_limit)`, `x' = x + (v + v')/2 · dt`.
//! 3. Distance past the end of an edge carries onto the next edge of the
//!    route, with the lane mapped by [`Corridor::entry_lane`][cb_corridor::Corridor::entry_lane].
//! 4. A vehicle that runs off the end of `outflow` is reported as exited;
//!    retiring it from the roster is the caller's job.

pub mod engine;
pub mod error;
pub mod leader;
pub mod motion;


pub use engine::KinematicsEngine;
pub use error::{MobilityError, MobilityResult};
pub use leader::find_leader;
pub use motion::{advance_along, integrate_speed, Placement};
