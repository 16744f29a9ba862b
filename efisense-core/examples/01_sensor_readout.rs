//! Sensor Readout on a Simulated Bench
//!
//! Wires `EngineSensors` to a simulated ADC and a manually advanced clock,
//! then walks the engine through a cold start and a throttle tip-in.
//!
//! ## What You'll Learn
//!
//! - Building the sensor front end from a calibration
//! - Reading every conversion once per tick
//! - Watching the AFR smoothing settle and the sensor-ready gate open
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_sensor_readout
//! ```

use efisense_core::{
    sensors::temperature::kelvin_to_celsius, sim::SimulatedAdc, time::FixedTime, Calibration,
    ConversionError, EngineSensors,
};

const TICK_MICROS: u64 = 10_000;

fn main() -> Result<(), ConversionError> {
    println!("EFISense Sensor Readout Example");
    println!("===============================\n");

    let calibration = Calibration::default();
    let pins = calibration.pins;

    // Cold engine: coolant and intake near 5 °C, throttle closed, O2 heating
    let adc = SimulatedAdc::new()
        .with(pins.throttle, calibration.throttle.closed_code)
        .with(pins.intake_temp, 500)
        .with(pins.coolant_temp, 330)
        .with(pins.manifold_pressure, 820)
        .with(pins.o2_wide, 0);

    let clock = FixedTime::new(0);
    let mut sensors = EngineSensors::new(calibration, adc, &clock)?;

    println!("Tick | TPS   | Adj   | IAT °C | ECT °C | MAP kPa | AFR   | O2");
    println!("-----+-------+-------+--------+--------+---------+-------+------");

    for tick in 0..24u32 {
        clock.advance(TICK_MICROS);

        // O2 sensor comes alive after a few ticks; driver tips in at tick 12
        if tick == 4 {
            sensors.input_mut().set(pins.o2_wide, 450).ok();
        }
        if tick == 12 {
            sensors.input_mut().set(pins.throttle, 600).ok();
            sensors.input_mut().set(pins.manifold_pressure, 900).ok();
        }

        let tps = sensors.throttle_position();
        let iat = kelvin_to_celsius(sensors.intake_temperature());
        let ect = kelvin_to_celsius(sensors.coolant_temperature());
        let map_kpa = sensors.manifold_pressure() / 1000.0;
        let afr = sensors.air_fuel_ratio();

        println!(
            "{:>4} | {:.3} | {:.3} | {:>6.1} | {:>6.1} | {:>7.1} | {:>5.2} | {}",
            tick,
            tps,
            sensors.throttle_adjustment(),
            iat,
            ect,
            map_kpa,
            afr,
            if sensors.afr_ready() { "ready" } else { "cold" }
        );
    }

    // Crank pulses: two revolutions over 20 ms
    println!("\nEngine speed: {:.0} RPM", sensors.rpm(20_000, 2)?);

    match sensors.rpm(0, 2) {
        Ok(rpm) => println!("Unexpected RPM {}", rpm),
        Err(e) => println!("Stalled timer rejected: {}", e),
    }

    let throttle = sensors.throttle_state();
    println!(
        "Throttle latched at {:.3} ({:.2e}/µs) at t={}µs",
        throttle.position, throttle.rate, throttle.timestamp
    );

    Ok(())
}
