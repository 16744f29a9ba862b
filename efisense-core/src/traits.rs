//! Hardware seams for the conversions
//!
//! The conversions never touch peripherals directly. The board support code
//! supplies these three capabilities and the crate stays testable on the host.
//! Keep them simple - the sampling loop doesn't need complex abstractions.

use crate::time::Timestamp;

/// Raw ADC output, in `[0, full_scale_code]`
pub type AdcCode = u16;

/// Analog input channel number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pin(pub u8);

#[cfg(feature = "defmt")]
impl defmt::Format for Pin {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "A{}", self.0)
    }
}

/// Synchronous analog input source
///
/// Implementations must not block and must always return an in-range code.
/// Reads take `&mut self` because most ADC peripherals need exclusive access
/// to start a conversion.
pub trait AnalogInput {
    /// Sample the given pin
    fn read(&mut self, pin: Pin) -> AdcCode;
}

/// Monotonic microsecond clock
///
/// `now()` must never go backwards. The throttle rate calculation tolerates a
/// clock that stalls (two reads with the same timestamp) but assumes it is
/// otherwise monotonic.
pub trait TimeSource {
    /// Current time in microseconds since an arbitrary epoch (usually boot)
    fn now(&self) -> Timestamp;
}

/// Filter that turns a noisy sample stream into a smoothed estimate
///
/// Both operations should be O(1) amortized; they are called once per
/// sampling tick.
pub trait SmoothingFilter {
    /// Push a new sample
    fn add_sample(&mut self, value: f64);

    /// Current smoothed estimate
    fn smoothed_value(&self) -> f64;
}

impl<A: AnalogInput + ?Sized> AnalogInput for &mut A {
    fn read(&mut self, pin: Pin) -> AdcCode {
        (**self).read(pin)
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
