//! ADC Characteristics and Pin Assignment
//!
//! The controller samples every sensor through a 10-bit successive
//! approximation ADC referenced to the 5 V sensor rail.

/// Highest code the ADC can return (10-bit converter).
pub const ADC_FULL_SCALE_CODE: u16 = 1023;

/// ADC reference voltage (V).
///
/// Shared with the sensor supply rail, so ratiometric sensors track supply
/// variation automatically.
pub const ADC_REFERENCE_VOLTS: f64 = 5.0;

/// Gain of the op-amp stage between the sensor connector and the ADC pin.
///
/// The current board buffers the analog inputs at unity gain.
pub const ADC_INPUT_GAIN: f64 = 1.0;

/// Supply rail for the 5 V sensors (V).
pub const SENSOR_SUPPLY_VOLTS: f64 = 5.0;

// ===== DEFAULT PIN MAP =====

/// Throttle position sensor input.
pub const TPS_PIN: u8 = 0;

/// Intake air temperature thermistor input.
pub const IAT_PIN: u8 = 1;

/// Engine coolant temperature thermistor input.
pub const ECT_PIN: u8 = 2;

/// Manifold absolute pressure sensor input.
pub const MAP_PIN: u8 = 3;

/// Wide-band O2 controller analog output 1.
pub const O2_WIDE_PIN: u8 = 4;

/// Wide-band O2 controller analog output 2 (narrow-band emulation).
pub const O2_NARROW_PIN: u8 = 5;
