//! Manifold absolute pressure
//!
//! The MAP sensor is ratiometric and linear, so once
//! [`MapCalibration::derive`] has folded the transfer function and ADC
//! scaling together the conversion is a single multiply-add. Codes are not
//! range-checked; a disconnected sensor reads as whatever the offset gives.

use crate::{config::MapCalibration, traits::AdcCode};

/// Manifold pressure for an ADC code (Pa)
pub fn pascals(code: AdcCode, calibration: &MapCalibration) -> f64 {
    calibration.slope_pa_per_count * f64::from(code) + calibration.offset_pa
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affine_in_code() {
        let calibration = MapCalibration::default();
        let low = pascals(200, &calibration);
        let high = pascals(700, &calibration);
        let expected = calibration.slope_pa_per_count * 500.0;
        assert!((high - low - expected).abs() < 1e-6);
    }

    #[test]
    fn code_zero_is_offset() {
        let calibration = MapCalibration { slope_pa_per_count: 100.0, offset_pa: 10_000.0 };
        assert_eq!(pascals(0, &calibration), 10_000.0);
        assert_eq!(pascals(10, &calibration), 11_000.0);
    }

    #[test]
    fn atmospheric_reading_is_plausible() {
        // MPX4115A outputs ~4.1 V at 101.3 kPa on a 5 V supply
        let calibration = MapCalibration::default();
        let code = (4.1 / 5.0 * 1023.0) as AdcCode;
        let kpa = pascals(code, &calibration) / 1e3;
        assert!(kpa > 95.0 && kpa < 110.0, "{} kPa", kpa);
    }
}
