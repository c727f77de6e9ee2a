//! `cb-core` — foundational types for the curbside parking simulator.
//!
//! This crate is a dependency of every other `cb-*` crate.  It intentionally
//! has no `cb-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VehicleId`, `ZoneId`                                 |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`state`]       | `ParkingState` — the behavioral state tag             |
//! | [`lane`]        | `LaneChange` — signed lane-change request             |
//! | [`driver`]      | `DriverParams` — car-following constants              |
//! | [`rng`]         | `SimRng` — seeded global RNG                          |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod driver;
pub mod error;
pub mod ids;
pub mod lane;
pub mod rng;
pub mod state;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use driver::DriverParams;
pub use error::{CoreError, CoreResult};
pub use ids::{VehicleId, ZoneId};
pub use lane::LaneChange;
pub use rng::SimRng;
pub use state::ParkingState;
pub use time::{SimClock, SimConfig, Tick};

/// Speed (m/s) below which a vehicle counts as stationary.
pub const STOPPED_SPEED: f64 = 1e-3;

/// Physical length of every simulated vehicle, in metres.
pub const VEHICLE_LENGTH: f64 = 5.0;
