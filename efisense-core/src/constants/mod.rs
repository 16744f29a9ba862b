//! Constants for EFISense Core
//!
//! Compile-time calibration data for the engine controller's sensors. The
//! [`Calibration`](crate::config::Calibration) defaults are assembled from the
//! values in this module, so a board revision only needs to touch one place.
//!
//! ## Organization
//!
//! Constants are grouped by domain:
//! - **Physics**: Unit conversions and physical reference points
//! - **ADC**: Converter resolution, reference voltage and pin assignment
//! - **Sensors**: Per-part calibration (thermistors, MAP, wide-band O2, throttle)
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Name constants with their unit as a suffix
//! 3. Reference the datasheet or bench measurement a value came from

/// Unit conversions and physical reference points.
pub mod physics;

/// ADC resolution, reference voltage and default pin map.
pub mod adc;

/// Per-sensor calibration values from datasheets and bench measurements.
pub mod sensors;

// Re-export commonly used constants for convenience
pub use physics::{
    ABSOLUTE_ZERO_CELSIUS, MICROS_PER_MINUTE, THERMISTOR_REFERENCE_KELVIN,
};

pub use adc::{
    ADC_FULL_SCALE_CODE, ADC_REFERENCE_VOLTS,
};

pub use sensors::{
    TPS_CLOSED_CODE, TPS_OPEN_CODE,
    O2_READY_MIN_VOLTS, AFR_SMOOTHING_WINDOW,
};
