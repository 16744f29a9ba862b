//! Physical Constants for EFISense
//!
//! Unit conversions and reference points shared by the conversion formulas.

// ===== TIME =====

/// Microseconds per second.
pub const MICROS_PER_SECOND: f64 = 1e6;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Microseconds per minute (µs/min).
///
/// Numerator of the RPM formula: revolutions per elapsed microsecond scaled
/// up to revolutions per minute.
pub const MICROS_PER_MINUTE: f64 = SECONDS_PER_MINUTE * MICROS_PER_SECOND;

// ===== TEMPERATURE =====

/// Absolute zero in Celsius (°C).
///
/// Offset between the Kelvin output of the thermistor model and the Celsius
/// values used on gauges and in logs.
///
/// Source: NIST Special Publication 330 (2019)
pub const ABSOLUTE_ZERO_CELSIUS: f64 = -273.15;

/// Reference temperature for thermistor resistance ratings (K).
///
/// NTC thermistors are specified by their resistance at 25 °C. The Beta
/// equation is anchored at this point.
///
/// Source: IEC 60539-1 rated zero-power resistance temperature
pub const THERMISTOR_REFERENCE_KELVIN: f64 = 298.15;

// ===== PRESSURE =====

/// Pascals per kilopascal.
pub const PASCALS_PER_KILOPASCAL: f64 = 1e3;
