//! Benchmarks for the preview-chain DSP path.
//!
//! Run with: cargo bench
//!
//! These measure the per-block cost of each effect and of the full
//! source -> effect -> mixer chain, to confirm they sit comfortably
//! inside real-time deadlines.
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use fxlab::{
    dsp::{
        bitcrush::{crush_buffer, Downsampler},
        clip::clip_buffer,
        mix::mix,
        tone::OnePole,
    },
    graph::{BitCrusherNode, DryWetMixer, EffectUnit},
    session::PreviewChain,
    source::demo_loop,
};

/// Common buffer sizes used in audio applications.
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

const SAMPLE_RATE: f32 = 48_000.0;

fn test_signal(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| (i as f32 * 0.05).sin() * 0.8)
        .collect()
}

fn bench_bitcrush(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/bitcrush");
    for &size in BLOCK_SIZES {
        group.bench_function(format!("block_{size}"), |b| {
            let mut state = Downsampler::new();
            let mut buffer = test_signal(size);
            b.iter(|| {
                crush_buffer(black_box(&mut buffer), 4.0, 10_000.0, SAMPLE_RATE, &mut state);
            });
        });
    }
    group.finish();
}

fn bench_clip(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/clip");
    for &size in BLOCK_SIZES {
        group.bench_function(format!("block_{size}"), |b| {
            let mut buffer = test_signal(size);
            b.iter(|| {
                clip_buffer(black_box(&mut buffer), 0.5);
            });
        });
    }
    group.finish();
}

fn bench_tone(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/tone");
    for &size in BLOCK_SIZES {
        group.bench_function(format!("block_{size}"), |b| {
            let mut filter = OnePole::new();
            let mut buffer = test_signal(size);
            b.iter(|| {
                filter.render(black_box(&mut buffer), 1_000.0, SAMPLE_RATE);
            });
        });
    }
    group.finish();
}

fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");
    for &size in BLOCK_SIZES {
        group.bench_function(format!("block_{size}"), |b| {
            let dry = test_signal(size);
            let wet = test_signal(size);
            let mut out = vec![0.0f32; size];
            b.iter(|| {
                mix(black_box(&dry), black_box(&wet), 0.5, &mut out);
            });
        });
    }
    group.finish();
}

fn bench_preview_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/preview_chain");
    for &size in BLOCK_SIZES {
        group.bench_function(format!("bitcrusher_block_{size}"), |b| {
            let (effect, _controls): (Box<dyn EffectUnit>, _) =
                BitCrusherNode::boxed(SAMPLE_RATE);
            let (mut chain, _scopes) = PreviewChain::new(
                demo_loop(SAMPLE_RATE as u32),
                effect,
                DryWetMixer::new(0.5),
                1_024,
            );
            let mut out = vec![0.0f32; size];
            b.iter(|| {
                chain.process_block(black_box(&mut out));
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_bitcrush,
    bench_clip,
    bench_tone,
    bench_mix,
    bench_preview_chain,
);
criterion_main!(benches);
