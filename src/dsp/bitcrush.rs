//! Bit Crushing
//!
//! A bit crusher degrades a signal in two independent ways:
//!
//! 1. **Bit-depth reduction** - re-quantizes each sample onto a coarse
//!    amplitude grid, as if the converter had fewer bits. Fewer bits means
//!    fewer levels, and the rounding error becomes audible as gritty
//!    quantization noise.
//!
//! 2. **Sample-rate reduction** - holds each captured sample for several
//!    output frames instead of capturing a fresh one every frame. The held
//!    "stairsteps" alias back into the audible band, giving the classic
//!    lo-fi ring.
//!
//! # Bit Depth
//!
//! For a depth of `b` bits, the amplitude grid has `2^(b-1)` steps per
//! polarity:
//!
//! ```text
//!     q = 2^(b-1)
//!     output = round(input * q) / q
//! ```
//!
//! Fractional depths are allowed - the grid spacing just interpolates
//! between the integer cases, which makes a ramped `bit_depth` sweep smooth
//! instead of stepping audibly at each integer.
//!
//! ```text
//!   24 bits = transparent
//!    8 bits = vintage sampler grit
//!    4 bits = heavy crunch
//!    1 bit  = square-ish rasp
//! ```
//!
//! # Rate Reduction
//!
//! The hold is driven by a phase accumulator rather than an integer divider
//! so any target rate works, not just integer fractions of the device rate:
//!
//! ```text
//!     if phase >= 1.0 { capture a new sample; phase -= 1.0 }
//!     phase += crush_rate / device_rate
//! ```
//!
//! A crush rate at or above the device rate captures every frame
//! (no reduction). A rate of zero never accumulates, so after the primed
//! first capture the output freezes on the held value.

/// Quantize one sample onto a `bit_depth`-bit amplitude grid.
///
/// `bit_depth` is clamped to at least 1.0. Fractional depths are valid.
#[inline]
pub fn quantize(sample: f32, bit_depth: f32) -> f32 {
    let q = 2.0_f32.powf(bit_depth.max(1.0) - 1.0);
    (sample * q).round() / q
}

/// Sample-and-hold state for rate reduction.
///
/// One instance per audio stream; the phase and held sample carry across
/// block boundaries.
#[derive(Debug, Default)]
pub struct Downsampler {
    phase: f32,
    held: f32,
}

impl Downsampler {
    pub fn new() -> Self {
        Self {
            // Start primed so the first frame captures immediately.
            phase: 1.0,
            held: 0.0,
        }
    }

    /// Advance one frame: capture `input` when the accumulator fires,
    /// otherwise keep returning the held sample.
    #[inline]
    pub fn next_sample(&mut self, input: f32, crush_rate: f32, device_rate: f32) -> f32 {
        if self.phase >= 1.0 {
            // Residual clamped so rates far above the device rate keep
            // firing every frame instead of accumulating without bound.
            self.phase = (self.phase - 1.0).min(1.0);
            self.held = input;
        }
        self.phase += crush_rate / device_rate;
        self.held
    }

    pub fn reset(&mut self) {
        self.phase = 1.0;
        self.held = 0.0;
    }
}

/// Crush an entire buffer in place with fixed parameters.
///
/// Convenience for offline use and benchmarks; the realtime node ticks its
/// ramps per sample instead.
pub fn crush_buffer(
    buffer: &mut [f32],
    bit_depth: f32,
    crush_rate: f32,
    device_rate: f32,
    state: &mut Downsampler,
) {
    for sample in buffer.iter_mut() {
        let held = state.next_sample(*sample, crush_rate, device_rate);
        *sample = quantize(held, bit_depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_one_bit_snaps_to_grid() {
        // 1 bit -> q = 1, grid is {-1, 0, 1}
        assert_eq!(quantize(0.7, 1.0), 1.0);
        assert_eq!(quantize(0.3, 1.0), 0.0);
        assert_eq!(quantize(-0.7, 1.0), -1.0);
    }

    #[test]
    fn quantize_high_depth_is_transparent() {
        let input = 0.123_456_79;
        let output = quantize(input, 24.0);
        assert!((output - input).abs() < 1e-6);
    }

    #[test]
    fn quantize_clamps_depth_below_one() {
        assert_eq!(quantize(0.7, 0.0), quantize(0.7, 1.0));
    }

    #[test]
    fn full_rate_passes_every_sample() {
        let mut state = Downsampler::new();
        let device_rate = 48_000.0;
        for i in 0..16 {
            let input = i as f32 / 16.0;
            let out = state.next_sample(input, device_rate, device_rate);
            assert_eq!(out, input);
        }
    }

    #[test]
    fn half_rate_holds_every_other_sample() {
        let mut state = Downsampler::new();
        let device_rate = 48_000.0;
        let inputs = [0.1, 0.2, 0.3, 0.4];
        let outputs: Vec<f32> = inputs
            .iter()
            .map(|&s| state.next_sample(s, device_rate / 2.0, device_rate))
            .collect();

        // First frame captures (primed), second holds, and so on.
        assert_eq!(outputs, vec![0.1, 0.1, 0.3, 0.3]);
    }

    #[test]
    fn zero_rate_freezes_on_held_value() {
        let mut state = Downsampler::new();
        // Primed: the first frame always captures.
        let first = state.next_sample(0.5, 0.0, 48_000.0);
        assert_eq!(first, 0.5);

        for _ in 0..100 {
            assert_eq!(state.next_sample(0.9, 0.0, 48_000.0), 0.5);
        }
    }

    #[test]
    fn crush_buffer_applies_both_stages() {
        let mut state = Downsampler::new();
        let mut buffer = [0.7, 0.3, -0.7, -0.3];
        crush_buffer(&mut buffer, 1.0, 48_000.0, 48_000.0, &mut state);
        assert_eq!(buffer, [1.0, 0.0, -1.0, 0.0]);
    }
}
