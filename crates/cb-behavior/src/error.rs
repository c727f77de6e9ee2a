use cb_core::{CoreError, VehicleId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("behavior configuration error: {0}")]
    Config(String),

    #[error("non-finite acceleration {value} computed for {vehicle}")]
    NumericFault { vehicle: VehicleId, value: f64 },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
