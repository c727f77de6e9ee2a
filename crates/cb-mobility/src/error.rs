use cb_core::VehicleId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("time step must be finite and positive, got {0}")]
    InvalidStep(f64),

    #[error("{vehicle} is not active")]
    NotActive { vehicle: VehicleId },

    #[error("{vehicle} is on an edge outside the corridor")]
    OffCorridor { vehicle: VehicleId },
}

pub type MobilityResult<T> = Result<T, MobilityError>;
