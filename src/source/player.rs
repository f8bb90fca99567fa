//! Looping block reader over a sample buffer.

use crate::source::SampleBuffer;

/// Reads a [`SampleBuffer`] forever, wrapping at the end with no gap.
///
/// The read position is plain state owned by the audio side; the buffer
/// itself is never mutated.
#[derive(Debug)]
pub struct LoopingSampler {
    buffer: SampleBuffer,
    position: usize,
}

impl LoopingSampler {
    pub fn new(buffer: SampleBuffer) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Fill `out` with the next block of the loop. When the read position
    /// reaches the end of the buffer it continues at frame 0 in the same
    /// block - no inserted silence, no partial block.
    #[inline]
    pub fn fill_block(&mut self, out: &mut [f32]) {
        let frames = self.buffer.frames();
        let len = frames.len();
        for sample in out.iter_mut() {
            *sample = frames[self.position];
            self.position += 1;
            if self.position == len {
                self.position = 0;
            }
        }
    }

    /// Seek back to the start of the loop.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }
}
