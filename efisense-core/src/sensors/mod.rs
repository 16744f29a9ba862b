//! Sensor Conversion Formulas
//!
//! ## Overview
//!
//! One module per sensor. Every conversion is a closed-form function of raw
//! ADC codes (or pulse timing) plus the board [`Calibration`]. Nothing here
//! reads hardware; [`EngineSensors`] does that and delegates to these
//! functions.
//!
//! | Module          | Input                     | Output              | State            |
//! |-----------------|---------------------------|---------------------|------------------|
//! | [`rpm`]         | µs per N revolutions      | rev/min             | none             |
//! | [`throttle`]    | TPS code, timestamp       | open area `[0, 1]`  | [`ThrottleState`]|
//! | [`temperature`] | thermistor code, pin      | Kelvin              | none             |
//! | [`pressure`]    | MAP code                  | Pa                  | none             |
//! | [`afr`]         | O2 output code(s)         | g air / g fuel      | [`AfrState`]     |
//!
//! ## Numeric Edge Cases
//!
//! The formulas are deliberately permissive: degenerate codes propagate as
//! infinities, NaN or zero rather than errors, so calibration runs show the
//! raw behavior. The exceptions are the throttle position, which is clamped
//! to `[0, 1]`, and RPM, which reports a zero interval as
//! [`ConversionError::Domain`](crate::ConversionError::Domain).
//!
//! ## Usage Example
//!
//! ```rust
//! use efisense_core::config::Calibration;
//! use efisense_core::sensors::{pressure, rpm, throttle::{self, ThrottleState}};
//!
//! let calibration = Calibration::default();
//! let mut tps = ThrottleState::new();
//!
//! let engine_speed = rpm::rpm(20_000, 1)?;
//! let position = throttle::read_position(400, 1_000, &calibration.throttle, &mut tps);
//! let map_pa = pressure::pascals(620, &calibration.map);
//!
//! assert_eq!(engine_speed, 3000.0);
//! assert!((0.0..=1.0).contains(&position));
//! assert!(map_pa > 0.0);
//! # Ok::<(), efisense_core::ConversionError>(())
//! ```
//!
//! [`Calibration`]: crate::config::Calibration
//! [`EngineSensors`]: crate::engine::EngineSensors

pub mod afr;
pub mod pressure;
pub mod rpm;
pub mod temperature;
pub mod throttle;

pub use afr::AfrState;
pub use throttle::ThrottleState;
