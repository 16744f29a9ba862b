//! Engine sensor front end
//!
//! [`EngineSensors`] owns the board calibration, the analog input, the clock
//! and the latched throttle/AFR state, and exposes one method per reading the
//! control loop needs. Each method samples the hardware and hands the raw
//! code to the matching function in [`crate::sensors`].
//!
//! ## Threading
//!
//! Built for a single control loop polling synchronously once per tick.
//! Methods that sample hardware or latch state take `&mut self`, so sharing
//! one instance between threads or interrupt handlers requires the caller to
//! serialize access; concurrent invocation is not supported.
//!
//! ```rust
//! use efisense_core::{
//!     config::Calibration,
//!     engine::EngineSensors,
//!     sim::SimulatedAdc,
//!     time::FixedTime,
//! };
//!
//! let calibration = Calibration::default();
//! let adc = SimulatedAdc::new()
//!     .with(calibration.pins.throttle, 460)
//!     .with(calibration.pins.manifold_pressure, 620);
//! let clock = FixedTime::new(1_000);
//!
//! let mut sensors = EngineSensors::new(calibration, adc, &clock)?;
//! let tps = sensors.throttle_position();
//! let fuel_multiplier = sensors.throttle_adjustment();
//! let map_kpa = sensors.manifold_pressure() / 1e3;
//!
//! assert!(tps > 0.0 && tps < 1.0);
//! assert!(fuel_multiplier > 1.0);
//! assert!(map_kpa > 15.0);
//! # Ok::<(), efisense_core::ConversionError>(())
//! ```

use crate::{
    config::Calibration,
    constants::sensors::AFR_SMOOTHING_WINDOW,
    errors::ConversionResult,
    filter::MovingAverage,
    sensors::{afr, pressure, rpm, temperature, throttle, AfrState, ThrottleState},
    traits::{AnalogInput, Pin, SmoothingFilter, TimeSource},
};

/// Default AFR smoothing filter
pub type DefaultAfrFilter = MovingAverage<AFR_SMOOTHING_WINDOW>;

/// Calibrated access to every engine sensor
pub struct EngineSensors<A, C, F = DefaultAfrFilter> {
    calibration: Calibration,
    adc: A,
    clock: C,
    throttle: ThrottleState,
    afr: AfrState<F>,
}

impl<A: AnalogInput, C: TimeSource> EngineSensors<A, C> {
    /// Front end with the default moving-average AFR filter
    ///
    /// Fails if the calibration is structurally invalid.
    pub fn new(calibration: Calibration, adc: A, clock: C) -> ConversionResult<Self> {
        Self::with_filter(calibration, adc, clock, MovingAverage::new())
    }
}

impl<A, C, F> EngineSensors<A, C, F>
where
    A: AnalogInput,
    C: TimeSource,
    F: SmoothingFilter,
{
    /// Front end with a caller-supplied AFR smoothing filter
    pub fn with_filter(calibration: Calibration, adc: A, clock: C, filter: F) -> ConversionResult<Self> {
        calibration.validate()?;
        Ok(Self {
            calibration,
            adc,
            clock,
            throttle: ThrottleState::new(),
            afr: AfrState::new(filter),
        })
    }

    /// Calibration in use
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Engine speed from crank trigger timing
    pub fn rpm(&self, elapsed_micros: u64, revolutions: u32) -> ConversionResult<f64> {
        rpm::rpm(elapsed_micros, revolutions)
    }

    /// Sample the throttle, latching position, timestamp and rate
    pub fn throttle_position(&mut self) -> f64 {
        let now = self.clock.now();
        let code = self.adc.read(self.calibration.pins.throttle);
        throttle::read_position(code, now, &self.calibration.throttle, &mut self.throttle)
    }

    /// Fuel multiplier for the last sampled throttle position
    pub fn throttle_adjustment(&self) -> f64 {
        throttle::adjustment(&self.throttle)
    }

    /// Throttle readings latched by the last [`throttle_position`](Self::throttle_position)
    pub fn throttle_state(&self) -> &ThrottleState {
        &self.throttle
    }

    /// Thermistor temperature on `pin` (K)
    ///
    /// Pins other than the intake sensor's use the coolant calibration.
    pub fn temperature(&mut self, pin: Pin) -> f64 {
        let code = self.adc.read(pin);
        temperature::kelvin_for_pin(code, pin, &self.calibration)
    }

    /// Intake air temperature (K)
    pub fn intake_temperature(&mut self) -> f64 {
        self.temperature(self.calibration.pins.intake_temp)
    }

    /// Coolant temperature (K)
    pub fn coolant_temperature(&mut self) -> f64 {
        self.temperature(self.calibration.pins.coolant_temp)
    }

    /// Manifold absolute pressure (Pa)
    pub fn manifold_pressure(&mut self) -> f64 {
        let code = self.adc.read(self.calibration.pins.manifold_pressure);
        pressure::pascals(code, &self.calibration.map)
    }

    /// Sample the O2 controller and update the smoothed AFR
    ///
    /// Check [`AfrState::sensor_ready`] via [`afr_state`](Self::afr_state)
    /// before using the result for fuel feedback.
    pub fn air_fuel_ratio(&mut self) -> f64 {
        let pins = self.calibration.pins;
        let wide = self.adc.read(pins.o2_wide);
        let adc = &mut self.adc;

        afr::update(
            wide,
            || adc.read(pins.o2_narrow),
            &self.calibration.adc,
            &self.calibration.afr,
            &mut self.afr,
        )
    }

    /// Latched AFR and its filter
    pub fn afr_state(&self) -> &AfrState<F> {
        &self.afr
    }

    /// Whether the O2 sensor output is above its "not ready" level
    pub fn afr_ready(&self) -> bool {
        self.afr.sensor_ready(&self.calibration.afr)
    }

    /// The analog input
    pub fn input(&self) -> &A {
        &self.adc
    }

    /// Mutable access to the analog input
    pub fn input_mut(&mut self) -> &mut A {
        &mut self.adc
    }

    /// The time source
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Give back the hardware handles
    pub fn release(self) -> (A, C) {
        (self.adc, self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::NarrowBandMode, sim::SimulatedAdc, time::FixedTime, ConversionError};

    fn sensors() -> EngineSensors<SimulatedAdc, FixedTime> {
        EngineSensors::new(Calibration::default(), SimulatedAdc::new(), FixedTime::new(0)).unwrap()
    }

    #[test]
    fn rejects_invalid_calibration() {
        let mut calibration = Calibration::default();
        calibration.adc.input_gain = 0.0;

        let result = EngineSensors::new(calibration, SimulatedAdc::new(), FixedTime::new(0));
        assert!(matches!(result, Err(ConversionError::InvalidCalibration { .. })));
    }

    #[test]
    fn throttle_reads_configured_pin() {
        let mut sensors = sensors();
        let pin = sensors.calibration().pins.throttle;
        sensors.input_mut().set(pin, 865).unwrap();
        sensors.clock().set(500);

        let tps = sensors.throttle_position();
        assert!((tps - 1.0).abs() < 1e-12);
        assert_eq!(sensors.throttle_state().timestamp, 500);
        assert!((sensors.throttle_adjustment() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn narrow_band_reads_second_output() {
        let mut calibration = Calibration::default();
        calibration.afr.narrow_band = NarrowBandMode::Stoichiometric;
        let adc = SimulatedAdc::new()
            .with(calibration.pins.o2_wide, 511)
            .with(calibration.pins.o2_narrow, 123);

        let mut sensors = EngineSensors::with_filter(
            calibration,
            adc,
            FixedTime::new(0),
            MovingAverage::<1>::new(),
        )
        .unwrap();

        sensors.air_fuel_ratio();
        assert_eq!(sensors.input().reads(), 2);
        assert!(sensors.afr_ready());
    }

    #[test]
    fn narrow_band_disabled_reads_one_output() {
        let calibration = Calibration::default();
        let adc = SimulatedAdc::new().with(calibration.pins.o2_wide, 511);
        let mut sensors = EngineSensors::new(calibration, adc, FixedTime::new(0)).unwrap();

        sensors.air_fuel_ratio();
        let (adc, _) = sensors.release();
        assert_eq!(adc.reads(), 1);
    }
}
