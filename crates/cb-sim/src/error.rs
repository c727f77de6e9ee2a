use cb_behavior::BehaviorError;
use cb_core::{CoreError, VehicleId};
use cb_mobility::MobilityError;
use cb_vehicle::VehicleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("arrival for {vehicle} does not fit a roster of {capacity} slots")]
    VehicleOutOfRange { vehicle: VehicleId, capacity: usize },

    #[error("controller error: {0}")]
    Behavior(#[from] BehaviorError),

    #[error("mobility error: {0}")]
    Mobility(#[from] MobilityError),

    #[error("roster error: {0}")]
    Vehicle(#[from] VehicleError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
