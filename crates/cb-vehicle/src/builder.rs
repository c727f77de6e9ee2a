//! Fluent builder for constructing a `VehicleStore` in one step.
//!
//! # Usage
//!
//! ```rust
//! use cb_core::DriverParams;
//! use cb_vehicle::VehicleStoreBuilder;
//!
//! let store = VehicleStoreBuilder::new(16)
//!     .driver(DriverParams { v_desired: 12.0, ..DriverParams::default() })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(store.capacity(), 16);
//! assert_eq!(store.active_count(), 0);
//! ```

use cb_core::DriverParams;

use crate::{VehicleError, VehicleResult, VehicleStore};

/// Fluent builder for [`VehicleStore`].
///
/// All arrays are pre-allocated at construction time so spawning and
/// retiring vehicles later are simple indexed assignments, not pushes.
pub struct VehicleStoreBuilder {
    capacity: usize,
    driver:   DriverParams,
    drivers:  Option<Vec<DriverParams>>,
}

impl VehicleStoreBuilder {
    /// Create a builder for `capacity` vehicle slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            driver:  DriverParams::default(),
            drivers: None,
        }
    }

    /// Use the same car-following constants for every vehicle.
    pub fn driver(mut self, driver: DriverParams) -> Self {
        self.driver = driver;
        self
    }

    /// Per-vehicle car-following constants (must be length `capacity`).
    pub fn drivers(mut self, drivers: Vec<DriverParams>) -> Self {
        self.drivers = Some(drivers);
        self
    }

    /// Validate the driver constants and allocate the roster.
    pub fn build(self) -> VehicleResult<VehicleStore> {
        let drivers = match self.drivers {
            Some(d) => {
                if d.len() != self.capacity {
                    return Err(VehicleError::Config(format!(
                        "{} driver parameter sets for {} vehicle slots",
                        d.len(),
                        self.capacity
                    )));
                }
                d
            }
            None => vec![self.driver; self.capacity],
        };

        for params in &drivers {
            params
                .validate()
                .map_err(|e| VehicleError::Config(e.to_string()))?;
        }

        Ok(VehicleStore::new(self.capacity, drivers))
    }
}
