//! Property tests for the conversion formulas
//!
//! Checks the invariants the fuel loop relies on across the whole input
//! space rather than at hand-picked points.

#![cfg(test)]

use proptest::prelude::*;

use efisense_core::{
    config::{Calibration, MapCalibration, ThrottleCalibration},
    filter::MovingAverage,
    sensors::{
        afr::{self, AfrState},
        pressure, rpm,
        temperature,
        throttle::{self, ThrottleState},
    },
    AdcCode, Pin,
};

fn throttle_calibration() -> impl Strategy<Value = ThrottleCalibration> {
    (0u16..1000, 1u16..1000).prop_map(|(closed, span)| ThrottleCalibration {
        closed_code: closed,
        open_code: closed.saturating_add(span),
    })
}

proptest! {
    #[test]
    fn rpm_decreases_with_elapsed_time(
        elapsed in 1u64..10_000_000,
        extra in 1u64..10_000_000,
        revolutions in 1u32..100,
    ) {
        let fast = rpm::rpm(elapsed, revolutions).unwrap();
        let slow = rpm::rpm(elapsed + extra, revolutions).unwrap();
        prop_assert!(slow < fast);
    }

    #[test]
    fn rpm_increases_with_revolutions(
        elapsed in 1u64..10_000_000,
        revolutions in 1u32..100,
    ) {
        let one = rpm::rpm(elapsed, revolutions).unwrap();
        let more = rpm::rpm(elapsed, revolutions + 1).unwrap();
        prop_assert!(more > one);
    }

    #[test]
    fn tps_always_in_unit_interval(code in any::<u16>(), calibration in throttle_calibration()) {
        let tps = throttle::position_from_code(code, &calibration);
        prop_assert!((0.0..=1.0).contains(&tps), "code {} gave {}", code, tps);
    }

    #[test]
    fn tps_below_closed_follows_cosine(closed in 1u16..1000, span in 2u16..1000, seed in any::<u16>()) {
        let calibration = ThrottleCalibration { closed_code: closed, open_code: closed + span };
        // Stay within one span of the closed stop
        let below = 1 + seed % closed.min(span - 1);
        let code = closed - below;

        let raw = -f64::from(below) / f64::from(span);
        let expected = 1.0 - libm::cos(raw * core::f64::consts::FRAC_PI_2);
        let tps = throttle::position_from_code(code, &calibration);
        prop_assert!(tps > 0.0, "code {} gave {}", code, tps);
        prop_assert!((tps - expected).abs() < 1e-12, "{} vs {}", tps, expected);
    }

    #[test]
    fn tps_rate_held_on_repeated_timestamp(
        first in 0u16..1024,
        second in 0u16..1024,
        now in 1u64..1_000_000,
    ) {
        let calibration = ThrottleCalibration::default();
        let mut state = ThrottleState::new();

        throttle::read_position(first, now, &calibration, &mut state);
        let rate = state.rate;
        throttle::read_position(second, now, &calibration, &mut state);

        prop_assert_eq!(state.rate, rate);
        prop_assert_eq!(state.timestamp, now);
    }

    #[test]
    fn adjustment_is_one_plus_square(position in 0.0f64..=1.0) {
        let state = ThrottleState { position, timestamp: 0, rate: 0.0 };
        prop_assert_eq!(throttle::adjustment(&state), 1.0 + position * position);
    }

    #[test]
    fn map_is_affine(c1 in any::<u16>(), c2 in any::<u16>()) {
        let calibration = MapCalibration::default();
        let delta = pressure::pascals(c2, &calibration) - pressure::pascals(c1, &calibration);
        let expected = calibration.slope_pa_per_count * (f64::from(c2) - f64::from(c1));
        prop_assert!((delta - expected).abs() < 1e-6, "{} vs {}", delta, expected);
    }

    #[test]
    fn unknown_pin_matches_coolant(code in 1u16..1023, pin in 6u8..=255) {
        let calibration = Calibration::default();
        let unknown = temperature::kelvin_for_pin(code, Pin(pin), &calibration);
        let coolant = temperature::kelvin_for_pin(code, calibration.pins.coolant_temp, &calibration);
        prop_assert_eq!(unknown, coolant);
    }

    #[test]
    fn temperature_falls_as_code_rises(code in 1u16..1021) {
        // Higher divider voltage means higher thermistor resistance: colder
        let calibration = Calibration::default();
        let pin = calibration.pins.intake_temp;
        let warmer = temperature::kelvin_for_pin(code, pin, &calibration);
        let colder = temperature::kelvin_for_pin(code + 1, pin, &calibration);
        prop_assert!(colder < warmer);
    }

    #[test]
    fn afr_converges_to_constant_voltage(code in 20u16..1024, warmup in prop::collection::vec(any::<u16>(), 0..8)) {
        let calibration = Calibration::default();
        let mut state = AfrState::<MovingAverage<8>>::default();
        let never: fn() -> AdcCode = || unreachable!("narrow band disabled");

        for noisy in warmup {
            afr::update(noisy.min(1023), never, &calibration.adc, &calibration.afr, &mut state);
        }
        let mut ratio = 0.0;
        for _ in 0..8 {
            ratio = afr::update(code, never, &calibration.adc, &calibration.afr, &mut state);
        }

        let volts = calibration.adc.volts(code);
        let expected = volts * calibration.afr.wide.slope() + calibration.afr.wide.min_afr;
        prop_assert!((ratio - expected).abs() < 1e-9, "{} vs {}", ratio, expected);
        prop_assert!(state.sensor_ready(&calibration.afr));
    }
}
