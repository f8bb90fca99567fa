//! Fixed-capacity circular sample history for waveform display.

/// A rolling window of the most recent samples at one tap point.
///
/// Writes overwrite oldest-first once the window is full. The window has a
/// single owner; cross-thread delivery happens upstream in the SPSC ring,
/// so no synchronization is needed here.
#[derive(Debug)]
pub struct RollingWindow {
    samples: Vec<f32>,
    head: usize,
    filled: usize,
}

impl RollingWindow {
    /// Create a window holding the last `capacity` samples.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "rolling window needs a nonzero capacity");
        Self {
            samples: vec![0.0; capacity],
            head: 0,
            filled: 0,
        }
    }

    #[inline]
    pub fn push_sample(&mut self, sample: f32) {
        self.samples[self.head] = sample;
        self.head = (self.head + 1) % self.samples.len();
        if self.filled < self.samples.len() {
            self.filled += 1;
        }
    }

    pub fn push(&mut self, samples: &[f32]) {
        for &sample in samples {
            self.push_sample(sample);
        }
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Number of samples written so far, saturating at capacity.
    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Copy out the window in chronological order, oldest to newest.
    ///
    /// Returns only as many samples as have been written while the window
    /// is still filling up.
    pub fn snapshot(&self) -> Vec<f32> {
        let capacity = self.samples.len();
        let start = if self.filled < capacity {
            0
        } else {
            self.head
        };

        let mut out = Vec::with_capacity(self.filled);
        for i in 0..self.filled {
            out.push(self.samples[(start + i) % capacity]);
        }
        out
    }
}
