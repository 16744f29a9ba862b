//! Simulated analog inputs
//!
//! Lets the conversions run against scripted ADC codes on the host, for unit
//! tests and software-in-loop runs. Pins without a programmed code read 0,
//! the same as a floating input pulled low.

use heapless::LinearMap;

use crate::traits::{AdcCode, AnalogInput, Pin};

/// Number of distinct pins a [`SimulatedAdc`] can hold
pub const MAX_SIMULATED_PINS: usize = 16;

/// Table-driven [`AnalogInput`]
#[derive(Debug, Clone, Default)]
pub struct SimulatedAdc {
    codes: LinearMap<Pin, AdcCode, MAX_SIMULATED_PINS>,
    reads: u32,
    rejected: u32,
}

impl SimulatedAdc {
    /// Empty table, every pin reads 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Program the code a pin returns
    ///
    /// Returns the code back as an error if the table is full.
    pub fn set(&mut self, pin: Pin, code: AdcCode) -> Result<(), AdcCode> {
        match self.codes.insert(pin, code) {
            Ok(_) => Ok(()),
            Err(_) => {
                self.rejected = self.rejected.wrapping_add(1);
                log_warn!("Simulated ADC full ({} pins), {:?} not programmed", MAX_SIMULATED_PINS, pin);
                Err(code)
            }
        }
    }

    /// Builder form of [`set`](Self::set)
    ///
    /// Pins beyond capacity trip a debug assertion. In release builds they are
    /// not programmed, keep reading 0 and are counted in
    /// [`rejected`](Self::rejected).
    pub fn with(mut self, pin: Pin, code: AdcCode) -> Self {
        let accepted = self.set(pin, code).is_ok();
        debug_assert!(accepted, "simulated ADC table full, {:?} dropped", pin);
        self
    }

    /// Code currently programmed for a pin
    pub fn get(&self, pin: Pin) -> AdcCode {
        self.codes.get(&pin).copied().unwrap_or(0)
    }

    /// Total reads served, across all pins
    pub fn reads(&self) -> u32 {
        self.reads
    }

    /// Writes refused because the table was full
    pub fn rejected(&self) -> u32 {
        self.rejected
    }
}

impl AnalogInput for SimulatedAdc {
    fn read(&mut self, pin: Pin) -> AdcCode {
        self.reads = self.reads.wrapping_add(1);
        self.get(pin)
    }
}
