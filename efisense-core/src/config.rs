//! Sensor calibration tables
//!
//! Everything the conversions need to know about the hardware lives in one
//! immutable [`Calibration`], built once at startup and passed by reference
//! into every conversion. The `Default` impls reproduce the fitted parts from
//! [`crate::constants`]; tuning tools can deserialize a replacement table
//! when the `serde` feature is enabled.
//!
//! ```rust
//! use efisense_core::config::{Calibration, NarrowBandMode};
//!
//! let mut calibration = Calibration::default();
//! calibration.afr.narrow_band = NarrowBandMode::Stoichiometric;
//! calibration.validate()?;
//! # Ok::<(), efisense_core::ConversionError>(())
//! ```

use crate::{
    constants::{adc, physics::PASCALS_PER_KILOPASCAL, physics::THERMISTOR_REFERENCE_KELVIN, sensors},
    errors::{ConversionError, ConversionResult},
    traits::{AdcCode, Pin},
};

/// Complete calibration for one engine controller board
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Calibration {
    /// ADC scaling
    pub adc: AdcCalibration,
    /// Sensor wiring
    pub pins: PinMap,
    /// Throttle travel end points
    pub throttle: ThrottleCalibration,
    /// Indexed by [`ThermistorChannel::index`]
    pub thermistors: [ThermistorCalibration; 2],
    /// Folded MAP transfer function
    pub map: MapCalibration,
    /// Wide-band O2 controller outputs
    pub afr: AfrCalibration,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            adc: AdcCalibration::default(),
            pins: PinMap::default(),
            throttle: ThrottleCalibration::default(),
            thermistors: [ThermistorCalibration::intake(), ThermistorCalibration::coolant()],
            map: MapCalibration::default(),
            afr: AfrCalibration::default(),
        }
    }
}

impl Calibration {
    /// Calibration for the given thermistor channel
    pub fn thermistor(&self, channel: ThermistorChannel) -> &ThermistorCalibration {
        &self.thermistors[channel.index()]
    }

    /// Reject tables that can never produce a meaningful reading
    ///
    /// Only structural problems are caught here (zero spans, non-positive
    /// physical constants). A table that is merely inaccurate passes.
    pub fn validate(&self) -> ConversionResult<()> {
        let result = self.check();
        if let Err(ConversionError::InvalidCalibration { reason }) = result {
            log_warn!("Calibration rejected: {}", reason);
        }
        result
    }

    fn check(&self) -> ConversionResult<()> {
        if self.adc.full_scale_code == 0 {
            return invalid("ADC full scale code must be non-zero");
        }
        positive(self.adc.reference_volts, "ADC reference voltage must be positive")?;
        positive(self.adc.input_gain, "ADC input gain must be positive")?;

        if self.throttle.open_code == self.throttle.closed_code {
            return invalid("throttle open and closed codes coincide");
        }

        for thermistor in &self.thermistors {
            positive(thermistor.beta_kelvin, "thermistor beta must be positive")?;
            positive(thermistor.reference_kelvin, "thermistor reference temperature must be positive")?;
            positive(thermistor.reference_ohms, "thermistor reference resistance must be positive")?;
            positive(thermistor.divider_ohms, "thermistor divider resistance must be positive")?;
        }

        if !self.map.slope_pa_per_count.is_finite() || !self.map.offset_pa.is_finite() {
            return invalid("MAP slope and offset must be finite");
        }

        self.afr.wide.check("wide-band AFR output has an empty voltage span")?;
        self.afr.narrow.check("narrow-band AFR output has an empty voltage span")?;
        if !(self.afr.ready_min_volts >= 0.0) {
            return invalid("O2 ready threshold must not be negative");
        }

        Ok(())
    }
}

fn invalid(reason: &'static str) -> ConversionResult<()> {
    Err(ConversionError::InvalidCalibration { reason })
}

fn positive(value: f64, reason: &'static str) -> ConversionResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        invalid(reason)
    }
}

// ===== ADC =====

/// Converter resolution and analog front end
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdcCalibration {
    /// Highest code the converter returns
    pub full_scale_code: AdcCode,
    /// Voltage at full scale (V)
    pub reference_volts: f64,
    /// Gain of the op-amp stage in front of the ADC
    pub input_gain: f64,
}

impl Default for AdcCalibration {
    fn default() -> Self {
        Self {
            full_scale_code: adc::ADC_FULL_SCALE_CODE,
            reference_volts: adc::ADC_REFERENCE_VOLTS,
            input_gain: adc::ADC_INPUT_GAIN,
        }
    }
}

impl AdcCalibration {
    /// Sensor-side volts represented by one ADC count
    pub fn volts_per_count(&self) -> f64 {
        self.reference_volts / f64::from(self.full_scale_code) / self.input_gain
    }

    /// Sensor-side voltage for an ADC code
    pub fn volts(&self, code: AdcCode) -> f64 {
        f64::from(code) * self.volts_per_count()
    }
}

// ===== PINS =====

/// Which analog input each sensor is wired to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinMap {
    /// Throttle position sensor
    pub throttle: Pin,
    /// Intake air thermistor (IAT)
    pub intake_temp: Pin,
    /// Coolant thermistor (ECT)
    pub coolant_temp: Pin,
    /// MAP sensor
    pub manifold_pressure: Pin,
    /// O2 controller output 1 (OIN1)
    pub o2_wide: Pin,
    /// O2 controller output 2 (OIN2)
    pub o2_narrow: Pin,
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            throttle: Pin(adc::TPS_PIN),
            intake_temp: Pin(adc::IAT_PIN),
            coolant_temp: Pin(adc::ECT_PIN),
            manifold_pressure: Pin(adc::MAP_PIN),
            o2_wide: Pin(adc::O2_WIDE_PIN),
            o2_narrow: Pin(adc::O2_NARROW_PIN),
        }
    }
}

// ===== THROTTLE =====

/// ADC codes at the two ends of throttle travel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThrottleCalibration {
    /// Code with the plate closed (0°)
    pub closed_code: AdcCode,
    /// Code with the plate fully open (90°)
    pub open_code: AdcCode,
}

impl Default for ThrottleCalibration {
    fn default() -> Self {
        Self {
            closed_code: sensors::TPS_CLOSED_CODE,
            open_code: sensors::TPS_OPEN_CODE,
        }
    }
}

// ===== THERMISTORS =====

/// The two thermistor inputs the controller knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThermistorChannel {
    /// Intake air temperature (IAT)
    Intake,
    /// Engine coolant temperature (ECT)
    Coolant,
}

impl ThermistorChannel {
    /// Position in [`Calibration::thermistors`]
    pub const fn index(self) -> usize {
        match self {
            Self::Intake => 0,
            Self::Coolant => 1,
        }
    }
}

/// NTC thermistor in a voltage divider, Beta model
///
/// The thermistor sits on the low side of the divider:
/// `code / full_scale = R / (R + R_divider)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThermistorCalibration {
    /// Material constant β (K)
    pub beta_kelvin: f64,
    /// Temperature at which `reference_ohms` is specified (K)
    pub reference_kelvin: f64,
    /// Resistance at `reference_kelvin` (Ω)
    pub reference_ohms: f64,
    /// Fixed resistor on the other side of the divider (Ω)
    pub divider_ohms: f64,
}

impl ThermistorCalibration {
    /// Intake air sensor, 10 kΩ part
    pub fn intake() -> Self {
        Self {
            beta_kelvin: sensors::IAT_BETA_KELVIN,
            reference_kelvin: THERMISTOR_REFERENCE_KELVIN,
            reference_ohms: sensors::IAT_REFERENCE_OHMS,
            divider_ohms: sensors::IAT_DIVIDER_OHMS,
        }
    }

    /// Coolant sensor, 4.7 kΩ part
    pub fn coolant() -> Self {
        Self {
            beta_kelvin: sensors::ECT_BETA_KELVIN,
            reference_kelvin: THERMISTOR_REFERENCE_KELVIN,
            reference_ohms: sensors::ECT_REFERENCE_OHMS,
            divider_ohms: sensors::ECT_DIVIDER_OHMS,
        }
    }
}

// ===== MAP =====

/// Linear pressure sensor transfer function
///
/// `Vout = Vs × (sensitivity × P_kPa − zero_ratio) + offset_error`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapSensor {
    /// Sensor supply (V)
    pub supply_volts: f64,
    /// Output per kPa as a fraction of supply
    pub sensitivity_per_kpa: f64,
    /// Zero-pressure intercept as a fraction of supply
    pub zero_ratio: f64,
    /// Offset error of the fitted part (V)
    pub offset_error_volts: f64,
}

impl MapSensor {
    /// NXP MPX4115A, 15..115 kPa
    pub fn mpx4115a() -> Self {
        Self {
            supply_volts: adc::SENSOR_SUPPLY_VOLTS,
            sensitivity_per_kpa: sensors::MAP_SENSITIVITY_PER_KPA,
            zero_ratio: sensors::MAP_ZERO_RATIO,
            offset_error_volts: sensors::MAP_OFFSET_ERROR_VOLTS,
        }
    }
}

/// MAP transfer function folded into `pressure = slope × code + offset`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapCalibration {
    /// Pa per ADC count
    pub slope_pa_per_count: f64,
    /// Pa at code zero
    pub offset_pa: f64,
}

impl MapCalibration {
    /// Fold a sensor transfer function and the ADC scaling into two constants
    pub fn derive(sensor: &MapSensor, adc: &AdcCalibration) -> Self {
        let volts_span = sensor.supply_volts * sensor.sensitivity_per_kpa;
        let pa_per_volt = PASCALS_PER_KILOPASCAL / volts_span;
        let offset_pa = PASCALS_PER_KILOPASCAL * sensor.offset_error_volts / volts_span
            + PASCALS_PER_KILOPASCAL * sensor.zero_ratio / sensor.sensitivity_per_kpa;

        Self {
            slope_pa_per_count: pa_per_volt * adc.volts_per_count(),
            offset_pa,
        }
    }
}

impl Default for MapCalibration {
    fn default() -> Self {
        Self::derive(&MapSensor::mpx4115a(), &AdcCalibration::default())
    }
}

// ===== AFR =====

/// One linear analog output of the wide-band O2 controller
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AfrBand {
    /// Bottom of the output's voltage span (V)
    pub min_volts: f64,
    /// Top of the output's voltage span (V)
    pub max_volts: f64,
    /// AFR reported at `min_volts`
    pub min_afr: f64,
    /// AFR reported at `max_volts`
    pub max_afr: f64,
}

impl AfrBand {
    /// Analog output 1 factory default: 0..5 V over 7.35..22.39
    pub fn wide() -> Self {
        Self {
            min_volts: sensors::AO1_MIN_VOLTS,
            max_volts: sensors::AO1_MAX_VOLTS,
            min_afr: sensors::AO1_MIN_AFR,
            max_afr: sensors::AO1_MAX_AFR,
        }
    }

    /// Analog output 2 factory default: 0.1..1.1 V over 14..15
    pub fn narrow() -> Self {
        Self {
            min_volts: sensors::AO2_MIN_VOLTS,
            max_volts: sensors::AO2_MAX_VOLTS,
            min_afr: sensors::AO2_MIN_AFR,
            max_afr: sensors::AO2_MAX_AFR,
        }
    }

    /// AFR per volt
    pub fn slope(&self) -> f64 {
        (self.max_afr - self.min_afr) / (self.max_volts - self.min_volts)
    }

    /// AFR for an output voltage, extrapolating outside the band
    pub fn afr_at(&self, volts: f64) -> f64 {
        (volts - self.min_volts) * self.slope() + self.min_afr
    }

    /// Whether an AFR lies within this output's range (inclusive)
    pub fn covers(&self, afr: f64) -> bool {
        afr >= self.min_afr && afr <= self.max_afr
    }

    fn check(&self, reason: &'static str) -> ConversionResult<()> {
        if self.max_volts > self.min_volts {
            Ok(())
        } else {
            invalid(reason)
        }
    }
}

/// Whether the narrow-band output refines readings near stoichiometric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NarrowBandMode {
    /// Wide-band output only
    #[default]
    Disabled,
    /// Switch to the narrow-band output when the wide-band AFR falls inside
    /// its range
    Stoichiometric,
}

/// Wide-band O2 controller outputs
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AfrCalibration {
    /// Output 1, the one the engine runs on
    pub wide: AfrBand,
    /// Output 2, high resolution around stoich
    pub narrow: AfrBand,
    /// Whether output 2 is consulted at all
    pub narrow_band: NarrowBandMode,
    /// Smoothed wide-band voltage below which the sensor is not ready (V)
    pub ready_min_volts: f64,
}

impl Default for AfrCalibration {
    fn default() -> Self {
        Self {
            wide: AfrBand::wide(),
            narrow: AfrBand::narrow(),
            narrow_band: NarrowBandMode::Disabled,
            ready_min_volts: sensors::O2_READY_MIN_VOLTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_calibration_is_valid() {
        assert!(Calibration::default().validate().is_ok());
    }

    #[test]
    fn volts_per_count_matches_reference() {
        let adc = AdcCalibration::default();
        assert!((adc.volts(1023) - 5.0).abs() < 1e-12);
        assert_eq!(adc.volts(0), 0.0);

        let buffered = AdcCalibration { input_gain: 2.0, ..adc };
        assert!((buffered.volts(1023) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn mpx4115a_constants() {
        let map = MapCalibration::default();

        // 1e3 / (5 × 0.009) Pa/V × 5/1023 V/count
        let slope = 1e3 / (5.0 * 0.009) * (5.0 / 1023.0);
        let offset = 1e3 * 0.045 / (5.0 * 0.009) + 1e3 * 0.095 / 0.009;
        assert!((map.slope_pa_per_count - slope).abs() < 1e-9);
        assert!((map.offset_pa - offset).abs() < 1e-6);
    }

    #[test]
    fn thermistor_lookup_by_channel() {
        let calibration = Calibration::default();
        assert_eq!(calibration.thermistor(ThermistorChannel::Intake).reference_ohms, 10_000.0);
        assert_eq!(calibration.thermistor(ThermistorChannel::Coolant).divider_ohms, 10_000.0);
        assert_eq!(calibration.thermistor(ThermistorChannel::Intake).divider_ohms, 9_300.0);
    }

    #[test]
    fn afr_bands_are_linear() {
        let wide = AfrBand::wide();
        assert!((wide.afr_at(0.0) - 7.35).abs() < 1e-12);
        assert!((wide.afr_at(5.0) - 22.39).abs() < 1e-12);
        assert!((wide.slope() - (22.39 - 7.35) / 5.0).abs() < 1e-12);

        let narrow = AfrBand::narrow();
        assert!((narrow.afr_at(0.1) - 14.0).abs() < 1e-12);
        assert!((narrow.afr_at(1.1) - 15.0).abs() < 1e-12);
        assert!(narrow.covers(14.7));
        assert!(!narrow.covers(15.2));
    }

    #[test]
    fn rejects_coincident_throttle_points() {
        let mut calibration = Calibration::default();
        calibration.throttle.open_code = calibration.throttle.closed_code;

        assert!(matches!(
            calibration.validate(),
            Err(ConversionError::InvalidCalibration { .. })
        ));
    }

    #[test]
    fn rejects_non_physical_thermistor() {
        let mut calibration = Calibration::default();
        calibration.thermistors[1].beta_kelvin = 0.0;
        assert!(calibration.validate().is_err());

        let mut calibration = Calibration::default();
        calibration.thermistors[0].reference_ohms = f64::NAN;
        assert!(calibration.validate().is_err());
    }

    #[test]
    fn rejects_zero_full_scale_and_empty_afr_span() {
        let mut calibration = Calibration::default();
        calibration.adc.full_scale_code = 0;
        assert!(calibration.validate().is_err());

        let mut calibration = Calibration::default();
        calibration.afr.narrow.max_volts = calibration.afr.narrow.min_volts;
        assert!(calibration.validate().is_err());
    }
}
