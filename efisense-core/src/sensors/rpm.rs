//! Engine speed from crank trigger timing

use crate::{
    constants::physics::MICROS_PER_MINUTE,
    errors::{ConversionError, ConversionResult},
};

/// Revolutions per minute from the time taken to complete `revolutions`
///
/// `rpm = 60 × 10⁶ × revolutions / elapsed_micros`
///
/// A zero interval means no trigger edge has been timed yet. Unlike the
/// throttle rate, which silently keeps its previous value, this is reported
/// as a [`ConversionError::Domain`] so the caller decides what RPM to hold.
pub fn rpm(elapsed_micros: u64, revolutions: u32) -> ConversionResult<f64> {
    if elapsed_micros == 0 {
        log_warn!("RPM requested with zero elapsed time ({} revolutions)", revolutions);
        return Err(ConversionError::Domain {
            reason: "elapsed time between trigger edges is zero",
        });
    }

    Ok(MICROS_PER_MINUTE * f64::from(revolutions) / elapsed_micros as f64)
}
