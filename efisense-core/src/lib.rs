//! Sensor conversions for the EFISense engine controller
//!
//! Turns raw ADC codes and crank timing into the physical quantities the fuel
//! loop works with: engine speed, throttle opening, intake and coolant
//! temperature, manifold pressure and air-fuel ratio.
//! Designed for the controller's microcontroller.
//!
//! Key constraints:
//! - `no_std`, no heap allocation
//! - Every conversion is closed-form and runs once per sampling tick
//! - Calibration is immutable after startup; latched state is owned by the caller
//!
//! ```no_run
//! use efisense_core::{Calibration, EngineSensors, sim::SimulatedAdc, time::FixedTime};
//!
//! let clock = FixedTime::new(0);
//! let mut sensors = EngineSensors::new(Calibration::default(), SimulatedAdc::new(), &clock)?;
//!
//! // Once per tick
//! let tps = sensors.throttle_position();
//! let coolant_k = sensors.coolant_temperature();
//! let afr = sensors.air_fuel_ratio();
//! if sensors.afr_ready() {
//!     // close the fuel loop on `afr`
//! }
//! # let _ = (tps, coolant_k, afr);
//! # Ok::<(), efisense_core::ConversionError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod buffer;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod filter;
pub mod sensors;
pub mod sim;
pub mod time;
pub mod traits;

// Public API
pub use config::Calibration;
pub use engine::EngineSensors;
pub use errors::{ConversionError, ConversionResult};
pub use traits::{AdcCode, AnalogInput, Pin, SmoothingFilter, TimeSource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
