//! Fixed-capacity rolling window over `f64` samples.
//!
//! Backed by a ring buffer allocated once at construction; pushing a sample
//! into a full window evicts the oldest one. Aggregates are only reported once
//! the window is full, which gives every rolling indicator its warm-up gap.

#[derive(Debug, Clone)]
pub struct RollingWindow {
    buf: Vec<f64>,
    next: usize,
    len: usize,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "rolling window capacity must be >= 1");
        Self {
            buf: vec![0.0; capacity],
            next: 0,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.buf.len()
    }

    /// Push a sample, overwriting the oldest one once the window is full.
    pub fn push(&mut self, value: f64) {
        self.buf[self.next] = value;
        self.next = (self.next + 1) % self.buf.len();
        if self.len < self.buf.len() {
            self.len += 1;
        }
    }

    /// Sum of the samples currently held.
    ///
    /// Summed from the buffer on each call, so a window of zeros sums to
    /// exactly 0.0 no matter what was evicted before.
    pub fn sum(&self) -> f64 {
        self.buf[..self.len].iter().sum()
    }

    /// Arithmetic mean, once the window is full.
    pub fn mean(&self) -> Option<f64> {
        self.is_full().then(|| self.sum() / self.len as f64)
    }

    /// Sample standard deviation (divides by n - 1), once the window is full.
    ///
    /// `None` for a single-slot window, where the sample deviation is undefined.
    pub fn sample_std_dev(&self) -> Option<f64> {
        let mean = self.mean()?;
        if self.len < 2 {
            return None;
        }
        let sum_sq: f64 = self.buf.iter().map(|v| (v - mean) * (v - mean)).sum();
        Some((sum_sq / (self.len - 1) as f64).sqrt())
    }
}
