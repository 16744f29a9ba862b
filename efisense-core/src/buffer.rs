//! Fixed-Size Sample Window
//!
//! ## Overview
//!
//! A ring buffer of `f64` samples sized at compile time through const
//! generics. The smoothing filters use it to hold the most recent `N` sensor
//! voltages without any heap allocation.
//!
//! ## Why Not Use `heapless::HistoryBuffer`?
//!
//! The moving average needs the value that a push overwrites so it can keep a
//! running sum in O(1). `push()` here hands the evicted sample back directly,
//! which keeps the filter free of a second lookup into the buffer.
//!
//! ```text
//! SampleWindow<4> after pushing 1..=6:
//! ┌─────┬─────┬─────┬─────┐
//! │  5  │  6  │  3  │  4  │  ← storage
//! └─────┴─────┴─────┴─────┘
//!             ↑
//!             └── write_pos = 2 (oldest sample, next to be evicted)
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use efisense_core::buffer::SampleWindow;
//!
//! let mut window: SampleWindow<3> = SampleWindow::new();
//! assert_eq!(window.push(1.0), None);
//! window.push(2.0);
//! window.push(3.0);
//!
//! // Window is full - the oldest sample is handed back
//! assert_eq!(window.push(4.0), Some(1.0));
//! assert_eq!(window.last(), Some(4.0));
//! ```

/// Fixed-size ring buffer of samples
///
/// ## Internal Invariants
///
/// - `write_pos < N`
/// - `len <= N`
/// - Once full, the oldest sample lives at `write_pos`
///
/// ## Thread Safety
///
/// Not thread-safe. The window belongs to a single sampling loop.
#[derive(Debug, Clone)]
pub struct SampleWindow<const N: usize> {
    data: [f64; N],

    /// Index where the next write will occur
    write_pos: usize,

    /// Number of valid samples, grows until N
    len: usize,
}

impl<const N: usize> SampleWindow<N> {
    /// Creates an empty window
    ///
    /// `const`, so windows can live in statics on targets without an allocator.
    pub const fn new() -> Self {
        Self {
            data: [0.0; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Adds a sample, returning the sample it overwrote once the window is full
    pub fn push(&mut self, sample: f64) -> Option<f64> {
        if N == 0 {
            return Some(sample);
        }

        let evicted = if self.len == N {
            Some(self.data[self.write_pos])
        } else {
            self.len += 1;
            None
        };

        self.data[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % N;
        evicted
    }

    /// Number of stored samples
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if window is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if window is full
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Most recent sample
    pub fn last(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }

        let idx = if self.write_pos == 0 { N - 1 } else { self.write_pos - 1 };
        Some(self.data[idx])
    }

    /// Iterate over samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        // Not full yet: data starts at 0. Full: oldest is at write_pos.
        let start = if self.len < N { 0 } else { self.write_pos };
        (0..self.len).map(move |i| self.data[(start + i) % N])
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        self.write_pos = 0;
        self.len = 0;
    }
}

impl<const N: usize> Default for SampleWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}
