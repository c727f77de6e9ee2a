//! `cb-vehicle` — Structure-of-Arrays vehicle roster.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`store`]   | `VehicleStore` (SoA arrays), `Spawn`                      |
//! | [`builder`] | `VehicleStoreBuilder` (fluent construction)               |
//! | [`error`]   | `VehicleError`, `VehicleResult<T>`                        |
//!
//! The roster has a fixed number of slots.  A slot is *active* between
//! [`VehicleStore::spawn`] (entering the corridor) and
//! [`VehicleStore::retire`] (leaving the end of `outflow`); inactive slots
//! hold reset values and are invisible to occupancy and leader queries.

pub mod builder;
pub mod error;
pub mod store;


pub use builder::VehicleStoreBuilder;
pub use error::{VehicleError, VehicleResult};
pub use store::{Spawn, VehicleStore};
