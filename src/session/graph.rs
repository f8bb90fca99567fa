//! The fixed preview graph: source -> effect -> dry/wet mixer, with
//! visualization taps at all three stages.

use crate::{
    graph::{DryWetMixer, EffectUnit},
    scope::{scope_channel, ScopeTap, ScopeView},
    source::{LoopingSampler, SampleBuffer},
    MAX_BLOCK_SIZE,
};

/// UI-side scope views for the three tap points.
pub struct SessionScopes {
    pub dry: ScopeView,
    pub wet: ScopeView,
    pub mix: ScopeView,
}

struct ChainTaps {
    dry: ScopeTap,
    wet: ScopeTap,
    mix: ScopeTap,
}

/// The audio-side graph root handed to the output backend.
///
/// `process_block` runs on the device callback: everything it touches is
/// pre-allocated here, and all parameter reads downstream are wait-free.
pub struct PreviewChain {
    sampler: LoopingSampler,
    effect: Box<dyn EffectUnit>,
    mixer: DryWetMixer,
    taps: ChainTaps,
    dry_buf: Vec<f32>,
    wet_buf: Vec<f32>,
}

impl PreviewChain {
    /// Wire the fixed three-stage pipeline and return it together with
    /// the UI-side scope views.
    pub fn new(
        buffer: SampleBuffer,
        effect: Box<dyn EffectUnit>,
        mixer: DryWetMixer,
        scope_capacity: usize,
    ) -> (Self, SessionScopes) {
        let (dry_tap, dry_view) = scope_channel(scope_capacity);
        let (wet_tap, wet_view) = scope_channel(scope_capacity);
        let (mix_tap, mix_view) = scope_channel(scope_capacity);

        let chain = Self {
            sampler: LoopingSampler::new(buffer),
            effect,
            mixer,
            taps: ChainTaps {
                dry: dry_tap,
                wet: wet_tap,
                mix: mix_tap,
            },
            dry_buf: vec![0.0; MAX_BLOCK_SIZE],
            wet_buf: vec![0.0; MAX_BLOCK_SIZE],
        };
        let scopes = SessionScopes {
            dry: dry_view,
            wet: wet_view,
            mix: mix_view,
        };
        (chain, scopes)
    }

    /// Render one block into `out`. Blocks longer than
    /// [`MAX_BLOCK_SIZE`] are the backend's responsibility to split.
    pub fn process_block(&mut self, out: &mut [f32]) {
        debug_assert!(out.len() <= MAX_BLOCK_SIZE);
        let frames = out.len().min(MAX_BLOCK_SIZE);
        let out = &mut out[..frames];

        let dry = &mut self.dry_buf[..frames];
        self.sampler.fill_block(dry);

        let wet = &mut self.wet_buf[..frames];
        wet.copy_from_slice(dry);
        self.effect.process_block(wet);

        self.taps.dry.capture(dry);
        self.taps.wet.capture(wet);

        // Lengths agree by construction; if the invariant ever breaks,
        // emit silence rather than panic on the audio thread.
        if self.mixer.render(dry, wet, out).is_err() {
            debug_assert!(false, "preview chain buffers disagree on length");
            out.fill(0.0);
        }

        self.taps.mix.capture(out);
    }

    /// Rewind playback and clear effect history. Called while the stream
    /// is stopped.
    pub fn reset(&mut self) {
        self.sampler.reset();
        self.effect.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ClipperNode;
    use crate::source::demo_loop;

    fn chain_with_clipper(balance: f32) -> (PreviewChain, SessionScopes, crate::graph::EffectControls)
    {
        let (effect, controls) = ClipperNode::boxed(48_000.0);
        let (chain, scopes) = PreviewChain::new(
            demo_loop(48_000),
            effect,
            DryWetMixer::new(balance),
            256,
        );
        (chain, scopes, controls)
    }

    #[test]
    fn fully_dry_output_is_the_source() {
        let (mut chain, _scopes, controls) = chain_with_clipper(0.0);
        controls.get("limit").expect("limit param").set(0.0, 0.0);

        let mut out = vec![0.0; 512];
        chain.process_block(&mut out);

        let expected: Vec<f32> = demo_loop(48_000).frames()[..512].to_vec();
        assert_eq!(out, expected);
    }

    #[test]
    fn fully_wet_output_is_the_effect() {
        let (mut chain, _scopes, controls) = chain_with_clipper(1.0);
        // Limit 0 silences the wet path entirely.
        controls.get("limit").expect("limit param").set(0.0, 0.0);

        let mut out = vec![0.0; 512];
        chain.process_block(&mut out);

        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn taps_see_all_three_stages() {
        let (mut chain, mut scopes, controls) = chain_with_clipper(0.5);
        controls.get("limit").expect("limit param").set(0.0, 0.0);

        let mut out = vec![0.0; 256];
        chain.process_block(&mut out);

        let dry = scopes.dry.snapshot();
        let wet = scopes.wet.snapshot();
        let mix = scopes.mix.snapshot();

        assert_eq!(dry.len(), 256);
        assert!(dry.iter().any(|&s| s != 0.0), "dry tap should carry the source");
        assert!(wet.iter().all(|&s| s == 0.0), "wet tap should be silenced");
        for i in 0..256 {
            assert_eq!(mix[i], dry[i] * 0.5);
        }
    }

    #[test]
    fn playback_loops_across_blocks() {
        let (effect, _controls) = ClipperNode::boxed(48_000.0);
        let buffer = SampleBuffer::from_frames((0..100).map(|i| i as f32 / 100.0).collect(), 48_000);
        let (mut chain, _scopes) =
            PreviewChain::new(buffer.clone(), effect, DryWetMixer::new(0.0), 64);

        let mut rendered = Vec::new();
        let mut out = vec![0.0; 64];
        for _ in 0..4 {
            chain.process_block(&mut out);
            rendered.extend_from_slice(&out);
        }

        // 256 rendered frames over a 100-frame loop.
        for (i, &sample) in rendered.iter().enumerate() {
            assert_eq!(sample, buffer.frames()[i % 100]);
        }
    }

    #[test]
    fn reset_rewinds_playback() {
        let (mut chain, _scopes, _controls) = chain_with_clipper(0.0);
        let mut out = vec![0.0; 300];
        chain.process_block(&mut out);
        let first = out[..300].to_vec();

        chain.reset();
        chain.process_block(&mut out);
        assert_eq!(out[..300], first[..]);
    }
}
