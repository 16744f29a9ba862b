//! Smoothing filters for noisy analog sensors
//!
//! The wide-band O2 output is noisy enough that converting every raw sample
//! straight to AFR makes the fuel trim chatter. [`MovingAverage`] averages the
//! last `N` voltages; anything implementing [`SmoothingFilter`] can be swapped
//! in instead.

use crate::buffer::SampleWindow;

pub use crate::traits::SmoothingFilter;

/// Boxcar average over the most recent `N` samples
///
/// Keeps a running sum so both operations are O(1). The sum is rebuilt from
/// the window every `N` evictions to stop floating-point drift accumulating
/// over a long run.
#[derive(Debug, Clone)]
pub struct MovingAverage<const N: usize> {
    window: SampleWindow<N>,
    sum: f64,
    evictions: usize,
}

impl<const N: usize> MovingAverage<N> {
    /// Empty filter
    pub const fn new() -> Self {
        Self {
            window: SampleWindow::new(),
            sum: 0.0,
            evictions: 0,
        }
    }

    /// Number of samples currently averaged
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// No samples yet
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// True once the window holds `N` samples
    pub fn is_settled(&self) -> bool {
        self.window.is_full()
    }

    /// Forget all samples
    pub fn reset(&mut self) {
        self.window.clear();
        self.sum = 0.0;
        self.evictions = 0;
    }
}

impl<const N: usize> Default for MovingAverage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SmoothingFilter for MovingAverage<N> {
    fn add_sample(&mut self, value: f64) {
        match self.window.push(value) {
            Some(evicted) => {
                self.evictions += 1;
                if self.evictions >= N {
                    self.evictions = 0;
                    self.sum = self.window.iter().sum();
                } else {
                    self.sum += value - evicted;
                }
            }
            None => self.sum += value,
        }
    }

    fn smoothed_value(&self) -> f64 {
        match self.window.len() {
            0 => 0.0,
            len => self.sum / len as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_reads_zero() {
        let filter = MovingAverage::<4>::new();
        assert_eq!(filter.smoothed_value(), 0.0);
        assert!(filter.is_empty());
    }

    #[test]
    fn averages_partial_window() {
        let mut filter = MovingAverage::<4>::new();
        filter.add_sample(1.0);
        filter.add_sample(2.0);

        assert_eq!(filter.len(), 2);
        assert!(!filter.is_settled());
        assert!((filter.smoothed_value() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn old_samples_fall_out() {
        let mut filter = MovingAverage::<3>::new();
        for v in [10.0, 10.0, 10.0, 1.0, 2.0, 3.0] {
            filter.add_sample(v);
        }

        assert!(filter.is_settled());
        assert!((filter.smoothed_value() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn constant_input_converges() {
        let mut filter = MovingAverage::<8>::new();
        for _ in 0..1000 {
            filter.add_sample(2.5);
        }
        assert!((filter.smoothed_value() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn reset_forgets_history() {
        let mut filter = MovingAverage::<3>::new();
        filter.add_sample(4.0);
        filter.reset();
        filter.add_sample(1.0);
        assert_eq!(filter.smoothed_value(), 1.0);
    }
}
