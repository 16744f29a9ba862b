//! Throttle position and fuel adjustment
//!
//! The throttle body's sensor is linear in plate angle, but the airflow the
//! engine sees tracks the open area, which grows like `1 − cos θ`. The
//! position reported here is that normalized open area: 0 with the plate
//! closed, 1 wide open.
//!
//! ```text
//! fraction = (code − closed) / (open − closed)
//! position = 1 − cos(fraction × π/2)             clamped to [0, 1]
//! ```
//!
//! Only the position is clamped. Outside the calibrated travel the cosine
//! keeps going: a code just below the closed stop reads a small opening, and
//! on a short calibration a code far past the open stop folds back towards 0.

use core::f64::consts::FRAC_PI_2;

use crate::{
    config::ThrottleCalibration,
    time::{positive_interval, Timestamp},
    traits::AdcCode,
};

/// Latched throttle readings, one per engine
///
/// Owned by the caller and threaded through [`read_position`] so tests can
/// start from any state without resetting globals.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThrottleState {
    /// Last computed position, `[0, 1]`
    pub position: f64,
    /// When `position` was sampled (µs)
    pub timestamp: Timestamp,
    /// Rate of change of position, per microsecond
    pub rate: f64,
}

impl ThrottleState {
    /// Closed throttle, never sampled
    pub const fn new() -> Self {
        Self {
            position: 0.0,
            timestamp: 0,
            rate: 0.0,
        }
    }
}

/// Normalized open area for a throttle ADC code
///
/// The curve is evaluated on the raw fraction and only the result is clamped,
/// so it is always in `[0, 1]`.
pub fn position_from_code(code: AdcCode, calibration: &ThrottleCalibration) -> f64 {
    let closed = f64::from(calibration.closed_code);
    let open = f64::from(calibration.open_code);
    let fraction = (f64::from(code) - closed) / (open - closed);

    if !(0.0..=1.0).contains(&fraction) {
        log_trace!("TPS code {} outside calibrated travel (fraction {})", code, fraction);
    }

    (1.0 - libm::cos(fraction * FRAC_PI_2)).clamp(0.0, 1.0)
}

/// Convert a throttle sample taken at `now` and update the latched state
///
/// The rate is recomputed only when time has moved forward since the last
/// sample. A repeated or earlier timestamp keeps the previous rate; it is not
/// an error. The timestamp and position are always latched.
pub fn read_position(
    code: AdcCode,
    now: Timestamp,
    calibration: &ThrottleCalibration,
    state: &mut ThrottleState,
) -> f64 {
    let position = position_from_code(code, calibration);

    match positive_interval(state.timestamp, now) {
        Some(elapsed) => state.rate = (position - state.position) / elapsed as f64,
        None => log_debug!(
            "TPS sampled at {}us, not after previous sample at {}us; rate held",
            now, state.timestamp
        ),
    }

    state.timestamp = now;
    state.position = position;
    position
}

/// Fuel multiplier for the current throttle opening: `1 + TPS²`
pub fn adjustment(state: &ThrottleState) -> f64 {
    // TODO: decide whether the throttle rate (state.rate) should feed into
    // this, e.g. as accelerator-pump enrichment on fast tip-in.
    adjustment_for(state.position)
}

/// `1 + position²` for an explicit position
pub fn adjustment_for(position: f64) -> f64 {
    1.0 + position * position
}
