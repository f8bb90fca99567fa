//! Built-in demo loop.
//!
//! One bar of 4/4 at 120 BPM (exactly two seconds): a synthesized kick on
//! every beat and a noise hat on the off-eighths. It exists so the demo
//! programs and the TUI can run without shipping an audio asset; pass a
//! WAV path to use real material instead.
//!
//! The voices are the usual subtractive recipes: the kick is a sine with a
//! fast downward pitch sweep and an exponential amplitude decay, the hat
//! is first-differenced noise (a crude high-pass) under a very short
//! decay.

use std::f32::consts::TAU;

use crate::source::SampleBuffer;

/// Synthesize the demo loop at the given sample rate.
pub fn demo_loop(sample_rate: u32) -> SampleBuffer {
    let sr = sample_rate as f32;
    let beat_secs = 0.5; // 120 BPM
    let total = (sr * beat_secs * 4.0) as usize;
    let mut frames = vec![0.0f32; total];

    for beat in 0..4 {
        let at = (beat as f32 * beat_secs * sr) as usize;
        add_kick(&mut frames, at, sr);
    }
    for eighth in 0..8 {
        if eighth % 2 == 1 {
            let at = (eighth as f32 * beat_secs * 0.5 * sr) as usize;
            add_hat(&mut frames, at, sr, eighth as u32);
        }
    }

    // Voices overlap; keep the sum in range.
    for sample in frames.iter_mut() {
        *sample = sample.clamp(-1.0, 1.0);
    }

    SampleBuffer::from_frames(frames, sample_rate)
}

fn add_kick(frames: &mut [f32], at: usize, sr: f32) {
    let len = (0.20 * sr) as usize;
    let mut phase = 0.0f32;
    for i in 0..len.min(frames.len().saturating_sub(at)) {
        let t = i as f32 / sr;
        // Pitch drops from ~150 Hz to the 50 Hz fundamental.
        let freq = 50.0 + 100.0 * (-t * 30.0).exp();
        phase += TAU * freq / sr;
        let env = (-t * 18.0).exp();
        frames[at + i] += phase.sin() * env * 0.9;
    }
}

fn add_hat(frames: &mut [f32], at: usize, sr: f32, seed: u32) {
    let len = (0.05 * sr) as usize;
    let mut state = seed.wrapping_mul(2_654_435_761) | 1;
    let mut previous = 0.0f32;
    for i in 0..len.min(frames.len().saturating_sub(at)) {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let noise = (state as f32 / u32::MAX as f32) * 2.0 - 1.0;

        let t = i as f32 / sr;
        let env = (-t * 80.0).exp();
        // First difference kills the low end, leaving the "tss".
        frames[at + i] += (noise - previous) * 0.5 * env * 0.35;
        previous = noise;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_is_exactly_two_seconds() {
        let buffer = demo_loop(48_000);
        assert_eq!(buffer.len(), 96_000);
        assert_eq!(buffer.duration_secs(), 2.0);
    }

    #[test]
    fn loop_is_audible_and_in_range() {
        let buffer = demo_loop(44_100);
        let peak = buffer
            .frames()
            .iter()
            .fold(0.0f32, |acc, &x| acc.max(x.abs()));
        assert!(peak > 0.25, "demo loop is nearly silent: peak {peak}");
        assert!(peak <= 1.0);
    }

    #[test]
    fn loop_is_deterministic() {
        let a = demo_loop(44_100);
        let b = demo_loop(44_100);
        assert_eq!(a.frames(), b.frames());
    }
}
