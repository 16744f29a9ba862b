//! Common fixtures for integration tests
//!
//! Provides:
//! - A bench rig wiring `EngineSensors` to a simulated ADC and fixed clock
//! - Inverse transfer functions so tests can dial in a physical value
//! - Float comparison helpers

#![allow(dead_code)]

use efisense_core::{
    config::{AdcCalibration, Calibration, ThermistorCalibration},
    engine::EngineSensors,
    sim::SimulatedAdc,
    time::FixedTime,
    AdcCode, Pin,
};

/// Engine sensors on a simulated bench
pub type BenchSensors<'a> = EngineSensors<SimulatedAdc, &'a FixedTime>;

/// Build sensors with default calibration sharing `clock`
pub fn bench(clock: &FixedTime) -> BenchSensors<'_> {
    bench_with(Calibration::default(), clock)
}

pub fn bench_with(calibration: Calibration, clock: &FixedTime) -> BenchSensors<'_> {
    EngineSensors::new(calibration, SimulatedAdc::new(), clock)
        .expect("bench calibration should be valid")
}

/// Program a pin on the bench ADC
pub fn set_code(sensors: &mut BenchSensors<'_>, pin: Pin, code: AdcCode) {
    sensors.input_mut().set(pin, code).expect("simulated ADC table full");
}

/// Fractional ADC count at which a thermistor divider reads `ohms`
pub fn thermistor_counts(ohms: f64, thermistor: &ThermistorCalibration, adc: &AdcCalibration) -> f64 {
    f64::from(adc.full_scale_code) * ohms / (ohms + thermistor.divider_ohms)
}

/// Nearest ADC code for a sensor-side voltage
pub fn code_for_volts(volts: f64, adc: &AdcCalibration) -> AdcCode {
    (volts / adc.volts_per_count()).round() as AdcCode
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}
