//! Thermistor temperatures (intake air and coolant)
//!
//! Each NTC thermistor sits on the low side of a divider against a fixed
//! resistor. The ADC code gives the thermistor's resistance, and the Beta
//! equation turns resistance into temperature:
//!
//! ```text
//! R = R_divider / (full_scale / code − 1)
//! T = β / (ln R + β / T_ref − ln R_ref)
//! ```
//!
//! ## Known Limitations
//!
//! Nothing is clamped. A code of zero (shorted sensor) or full scale (open
//! circuit) drives the divider inversion to 0 Ω or ∞ Ω and the result
//! collapses to 0 K. Callers should range-check the Kelvin value before
//! trusting it.

use crate::{
    config::{AdcCalibration, Calibration, PinMap, ThermistorCalibration, ThermistorChannel},
    constants::physics::ABSOLUTE_ZERO_CELSIUS,
    traits::{AdcCode, Pin},
};

/// Calibration channel for a pin
///
/// Any pin other than the intake sensor's uses the coolant calibration. This
/// is the intended default, not an error path: an extra thermistor wired to a
/// spare input is assumed to be another coolant-style sensor.
pub fn channel_for_pin(pin: Pin, pins: &PinMap) -> ThermistorChannel {
    if pin == pins.intake_temp {
        ThermistorChannel::Intake
    } else if pin == pins.coolant_temp {
        ThermistorChannel::Coolant
    } else {
        log_debug!("No thermistor calibration for pin {:?}, using coolant", pin);
        ThermistorChannel::Coolant
    }
}

/// Thermistor resistance from the divider reading (Ω)
pub fn divider_resistance(counts: f64, full_scale: f64, divider_ohms: f64) -> f64 {
    divider_ohms / (full_scale / counts - 1.0)
}

/// Beta-model temperature for a thermistor resistance (K)
pub fn beta_kelvin(resistance_ohms: f64, calibration: &ThermistorCalibration) -> f64 {
    // TODO: swap ln() for a lookup table on targets without an FPU
    let offset = calibration.beta_kelvin / calibration.reference_kelvin
        - libm::log(calibration.reference_ohms);
    calibration.beta_kelvin / (libm::log(resistance_ohms) + offset)
}

/// Temperature for a (possibly fractional, e.g. averaged) ADC count (K)
pub fn kelvin_from_counts(
    counts: f64,
    thermistor: &ThermistorCalibration,
    adc: &AdcCalibration,
) -> f64 {
    let resistance = divider_resistance(counts, f64::from(adc.full_scale_code), thermistor.divider_ohms);
    beta_kelvin(resistance, thermistor)
}

/// Temperature for an ADC code on the given channel (K)
pub fn kelvin_from_code(code: AdcCode, channel: ThermistorChannel, calibration: &Calibration) -> f64 {
    kelvin_from_counts(f64::from(code), calibration.thermistor(channel), &calibration.adc)
}

/// Temperature for an ADC code read from `pin` (K), see [`channel_for_pin`]
pub fn kelvin_for_pin(code: AdcCode, pin: Pin, calibration: &Calibration) -> f64 {
    kelvin_from_code(code, channel_for_pin(pin, &calibration.pins), calibration)
}

/// Kelvin to degrees Celsius
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin + ABSOLUTE_ZERO_CELSIUS
}
