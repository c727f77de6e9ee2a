use cb_core::VehicleId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VehicleError {
    #[error("vehicle {0} is already on the corridor")]
    AlreadyActive(VehicleId),

    #[error("vehicle {id} is outside the roster of {capacity} slots")]
    OutOfRange { id: VehicleId, capacity: usize },

    #[error("roster configuration error: {0}")]
    Config(String),
}

pub type VehicleResult<T> = Result<T, VehicleError>;
