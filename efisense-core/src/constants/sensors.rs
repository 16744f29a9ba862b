//! Sensor Calibration Values
//!
//! Calibration data for the parts fitted to the engine. Values come from the
//! part datasheets unless noted as bench-measured.

// ===== THROTTLE POSITION SENSOR =====

/// ADC code with the throttle plate closed (0°).
///
/// Source: bench-measured on the fitted throttle body
pub const TPS_CLOSED_CODE: u16 = 60;

/// ADC code with the throttle plate fully open (90°).
///
/// Source: bench-measured on the fitted throttle body
pub const TPS_OPEN_CODE: u16 = 865;

// ===== THERMISTORS =====

/// Beta constant of the intake air thermistor (K), ±1 %.
pub const IAT_BETA_KELVIN: f64 = 3988.0;

/// Beta constant of the coolant thermistor (K), ±1.5 %.
pub const ECT_BETA_KELVIN: f64 = 3988.0;

/// Intake air thermistor resistance at 25 °C (Ω), ±1 %.
pub const IAT_REFERENCE_OHMS: f64 = 10_000.0;

/// Coolant thermistor resistance at 25 °C (Ω).
///
/// The part is a 4.7 kΩ nominal thermistor with a 4559..4841 Ω tolerance
/// band; the fitted sensor sits at the top of it.
///
/// Source: bench-measured
pub const ECT_REFERENCE_OHMS: f64 = 4_841.0;

/// Fixed resistor in the intake air divider (Ω).
pub const IAT_DIVIDER_OHMS: f64 = 9_300.0;

/// Fixed resistor in the coolant divider (Ω).
pub const ECT_DIVIDER_OHMS: f64 = 10_000.0;

// ===== MAP SENSOR (MPX4115A) =====

/// Output sensitivity as a fraction of supply per kPa.
///
/// Transfer function: `Vout = Vs × (0.009 × P − 0.095) ± error`
///
/// Source: NXP MPX4115A datasheet
pub const MAP_SENSITIVITY_PER_KPA: f64 = 0.009;

/// Zero-pressure intercept of the transfer function, as a fraction of supply.
///
/// Source: NXP MPX4115A datasheet
pub const MAP_ZERO_RATIO: f64 = 0.095;

/// Offset error of the fitted sensor (V).
///
/// Datasheet bound is ±0.0675 V (1.5 × 0.009 × Vs at 5 V).
///
/// Source: bench-measured
pub const MAP_OFFSET_ERROR_VOLTS: f64 = 0.045;

// ===== WIDE-BAND O2 CONTROLLER =====

/// Analog output 1 voltage at its lowest AFR (V).
pub const AO1_MIN_VOLTS: f64 = 0.0;

/// Analog output 1 voltage at its highest AFR (V).
pub const AO1_MAX_VOLTS: f64 = 5.0;

/// AFR reported by analog output 1 at 0 V (g air / g fuel).
///
/// Source: controller factory default
pub const AO1_MIN_AFR: f64 = 7.35;

/// AFR reported by analog output 1 at 5 V (g air / g fuel).
///
/// Source: controller factory default
pub const AO1_MAX_AFR: f64 = 22.39;

/// Analog output 2 voltage at its lowest AFR (V).
pub const AO2_MIN_VOLTS: f64 = 0.1;

/// Analog output 2 voltage at its highest AFR (V).
pub const AO2_MAX_VOLTS: f64 = 1.1;

/// AFR reported by analog output 2 at 0.1 V (g air / g fuel).
pub const AO2_MIN_AFR: f64 = 14.0;

/// AFR reported by analog output 2 at 1.1 V (g air / g fuel).
pub const AO2_MAX_AFR: f64 = 15.0;

/// Lowest O2 output voltage that indicates a working sensor (V).
///
/// The controller drives its outputs to 0 V while the sensor heats up or
/// reports a fault. Readings below this are not trustworthy.
pub const O2_READY_MIN_VOLTS: f64 = 0.05;

/// Number of O2 samples averaged before converting to AFR.
pub const AFR_SMOOTHING_WINDOW: usize = 8;
