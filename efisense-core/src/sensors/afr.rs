//! Air-fuel ratio from the wide-band O2 controller
//!
//! The O2 controller exposes two linear analog outputs:
//!
//! - **Output 1** (wide band) spans 7.35..22.39 AFR over 0..5 V. This is the
//!   one the engine runs on. Samples are smoothed before conversion.
//! - **Output 2** (narrow band) spans 14..15 AFR over 0.1..1.1 V, ten times
//!   the resolution around stoichiometric. Its line is applied from 0 V,
//!   `AFR = V × slope + min_afr`, not from `min_volts`. It is only consulted when
//!   [`NarrowBandMode::Stoichiometric`] is configured, and the factory
//!   calibration leaves it disabled until the output is recalibrated on the
//!   bench.
//!
//! ## Sensor Not Ready
//!
//! While the O2 sensor is heating or faulted the controller holds its outputs
//! at 0 V, which converts to a very rich 7.35 AFR. The conversion does not
//! special-case this; fuel feedback should check
//! [`AfrState::sensor_ready`] before acting on the ratio.

use crate::{
    config::{AdcCalibration, AfrCalibration, NarrowBandMode},
    filter::MovingAverage,
    traits::{AdcCode, SmoothingFilter},
};

/// Latched AFR reading and the filter smoothing its input
#[derive(Debug, Clone)]
pub struct AfrState<F> {
    ratio: f64,
    filter: F,
}

impl<F: SmoothingFilter> AfrState<F> {
    /// Fresh state, ratio 0 until the first update
    pub fn new(filter: F) -> Self {
        Self { ratio: 0.0, filter }
    }

    /// Last computed AFR (g air / g fuel)
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Smoothed wide-band output voltage (V)
    pub fn smoothed_volts(&self) -> f64 {
        self.filter.smoothed_value()
    }

    /// Whether the wide-band output is above the controller's "not ready" level
    pub fn sensor_ready(&self, calibration: &AfrCalibration) -> bool {
        self.smoothed_volts() >= calibration.ready_min_volts
    }

    /// The smoothing filter
    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Mutable access to the filter, e.g. to reset it after a sensor fault
    pub fn filter_mut(&mut self) -> &mut F {
        &mut self.filter
    }
}

impl<const N: usize> Default for AfrState<MovingAverage<N>> {
    fn default() -> Self {
        Self::new(MovingAverage::new())
    }
}

/// Feed a wide-band sample through the filter and convert to AFR
///
/// `read_narrow` samples the narrow-band output. It is only called when the
/// narrow band is enabled and the wide-band AFR falls inside its range; the
/// narrow output is used unsmoothed.
pub fn update<F, R>(
    wide_code: AdcCode,
    read_narrow: R,
    adc: &AdcCalibration,
    calibration: &AfrCalibration,
    state: &mut AfrState<F>,
) -> f64
where
    F: SmoothingFilter,
    R: FnOnce() -> AdcCode,
{
    state.filter.add_sample(adc.volts(wide_code));
    let smoothed = state.filter.smoothed_value();
    let mut ratio = calibration.wide.afr_at(smoothed);

    if calibration.narrow_band == NarrowBandMode::Stoichiometric && calibration.narrow.covers(ratio) {
        let narrow_volts = adc.volts(read_narrow());
        log_trace!("AFR {} near stoich, using narrow band ({}V)", ratio, narrow_volts);
        ratio = narrow_volts * calibration.narrow.slope() + calibration.narrow.min_afr;
    }

    if smoothed < calibration.ready_min_volts {
        log_debug!("O2 output {}V below ready threshold, AFR {} untrusted", smoothed, ratio);
    }

    state.ratio = ratio;
    ratio
}
