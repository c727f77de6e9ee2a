//! `cb-demand` — who enters the corridor, when, and for how long they park.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`arrival`]    | `Arrival` — one vehicle's entry request                  |
//! | [`queue`]      | `ArrivalQueue` (`BTreeMap<Tick, Vec<Arrival>>`)          |
//! | [`loader`]     | `load_arrivals_csv`, `load_arrivals_reader`              |
//! | [`generator`]  | `DemandConfig`, `DemandGenerator` (seeded uniform demand)|
//! | [`error`]      | `DemandError`, `DemandResult<T>`                         |
//!
//! The simulation drains the queue once per tick and spawns every due
//! arrival onto `inflow`; an arrival that cannot enter yet is pushed back for
//! the following tick.

pub mod arrival;
pub mod error;
pub mod generator;
pub mod loader;
pub mod queue;


pub use arrival::Arrival;
pub use error::{DemandError, DemandResult};
pub use generator::{DemandConfig, DemandGenerator};
pub use loader::{load_arrivals_csv, load_arrivals_reader};
pub use queue::ArrivalQueue;
