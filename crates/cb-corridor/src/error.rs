//! Corridor error type.

use thiserror::Error;

/// Errors produced by `cb-corridor`.
#[derive(Debug, Error)]
pub enum CorridorError {
    #[error("corridor configuration error: {0}")]
    Config(String),

    #[error("invalid edge name {0:?}: expected \"inflow\", \"outflow\", or \"parking_<n>\"")]
    EdgeName(String),
}

pub type CorridorResult<T> = Result<T, CorridorError>;
