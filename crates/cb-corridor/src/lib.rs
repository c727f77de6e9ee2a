//! `cb-corridor` — static geometry of the parking corridor.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`edge`]     | `CorridorEdge` (`inflow`, `parking_<i>`, `outflow`)          |
//! | [`corridor`] | `CorridorConfig`, `Corridor` (lengths, lanes, coordinates)   |
//! | [`error`]    | `CorridorError`, `CorridorResult<T>`                         |
//!
//! # Layout
//!
//! ```text
//!  inflow          parking_0  parking_1   …   parking_{N-1}     outflow
//! |──────────────|──────────|──────────|─────|──────────────|────────────|
//!  lanes-1 lanes   `lanes` lanes, lane 0 is the curb          lanes-1 lanes
//! ```
//!
//! The corridor is computed once from its config and never changes during a
//! run; every query is O(1) arithmetic.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod corridor;
pub mod edge;
pub mod error;

#[cfg(test)]
mod tests;

pub use corridor::{Corridor, CorridorConfig};
pub use edge::CorridorEdge;
pub use error::{CorridorError, CorridorResult};
