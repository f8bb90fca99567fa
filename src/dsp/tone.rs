//! Tone filter: first-order recursive low-pass.
//!
//! # The Half-Power Point
//!
//! The single control is the *half-power point* - the frequency at which
//! the filter has attenuated the signal's power by half (-3 dB). Below it
//! the signal passes essentially untouched; above it the response rolls
//! off at a gentle 6 dB per octave.
//!
//! ```text
//!      12 Hz     everything filtered, near silence
//!     200 Hz     muffled, "behind a wall"
//!    1000 Hz     warm, rounded (the classic default)
//!   20000 Hz     fully open, no audible filtering
//! ```
//!
//! # The Recursion
//!
//! One multiply and one add per sample:
//!
//! ```text
//!     y[n] = (1 - a) * x[n] + a * y[n-1]
//! ```
//!
//! The feedback coefficient `a` is derived from the half-power frequency:
//!
//! ```text
//!     b = 2 - cos(2π * hp / sample_rate)
//!     a = b - sqrt(b² - 1)
//! ```
//!
//! This is the textbook "tone" recursion: solving the one-pole transfer
//! function for -3 dB at `hp` yields exactly this coefficient. As `hp`
//! approaches the Nyquist rate, `a` approaches 0 and the filter becomes a
//! pass-through; as `hp` approaches 0, `a` approaches 1 and the output
//! freezes toward DC.

use std::f32::consts::TAU;

/// Feedback coefficient for a one-pole low-pass with its -3 dB point at
/// `half_power_hz`.
#[inline]
pub fn tone_coefficient(half_power_hz: f32, sample_rate: f32) -> f32 {
    let b = 2.0 - (TAU * half_power_hz / sample_rate).cos();
    b - (b * b - 1.0).sqrt()
}

/// One-pole low-pass filter state.
#[derive(Debug, Default)]
pub struct OnePole {
    z1: f32,
}

impl OnePole {
    pub fn new() -> Self {
        Self { z1: 0.0 }
    }

    /// Advance one sample with a precomputed coefficient.
    #[inline]
    pub fn next_sample(&mut self, input: f32, coefficient: f32) -> f32 {
        self.z1 = input * (1.0 - coefficient) + self.z1 * coefficient;
        self.z1
    }

    /// Filter a buffer in place with a fixed half-power point.
    pub fn render(&mut self, buffer: &mut [f32], half_power_hz: f32, sample_rate: f32) {
        let a = tone_coefficient(half_power_hz, sample_rate);
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, a);
        }
    }

    pub fn reset(&mut self) {
        self.z1 = 0.0;
    }
}
