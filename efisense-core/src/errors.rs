//! Error Types for Sensor Conversions
//!
//! ## Design Philosophy
//!
//! The conversion formulas are deliberately permissive. A saturated thermistor
//! divider or a floating MAP input produces an infinite or NaN result rather
//! than an error, because calibration work on the bench needs to see exactly
//! what the formula does with a bad code. Only two situations are surfaced as
//! errors:
//!
//! - `Domain`: an input for which the formula has no meaning at all and the
//!   arithmetic would otherwise divide by zero (RPM with no elapsed time).
//! - `InvalidCalibration`: a calibration table that can never produce a sensible
//!   reading, rejected once at startup instead of on every tick.
//!
//! Like the rest of the crate the error type is small, `Copy` and carries only
//! `&'static str` context so it can be returned from the sampling loop without
//! touching the heap.
//!
//! ## Handling Strategy
//!
//! ```rust
//! use efisense_core::{ConversionError, sensors::rpm};
//!
//! match rpm::rpm(0, 1) {
//!     Ok(value) => {
//!         // feed the control loop
//!         let _ = value;
//!     }
//!     Err(ConversionError::Domain { reason }) => {
//!         // no pulse captured yet - hold the last RPM
//!         let _ = reason;
//!     }
//!     Err(_) => {}
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Conversion errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConversionError {
    /// Input lies outside the domain of the conversion formula
    #[error("Domain error: {reason}")]
    Domain {
        /// Which precondition failed
        reason: &'static str,
    },

    /// Calibration table cannot produce meaningful readings
    #[error("Invalid calibration: {reason}")]
    InvalidCalibration {
        /// First structural problem found
        reason: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConversionError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Domain { reason } =>
                defmt::write!(fmt, "Domain: {}", reason),
            Self::InvalidCalibration { reason } =>
                defmt::write!(fmt, "Calibration: {}", reason),
        }
    }
}
