//! Ramped parameter plumbing between the control thread and the audio
//! thread.
//!
//! A parameter is split across the two threads it lives on:
//!
//! - [`ParamHandle`] is the control side. The UI calls
//!   [`ParamHandle::set`] with a target value and a ramp duration; the
//!   handle clamps the target to the parameter's declared range and
//!   publishes a single atomic word.
//! - [`RampedParam`] is the audio side. Each frame it does one relaxed
//!   atomic load, and when the word has changed it starts a linear ramp
//!   from its current value toward the new target. No locks, no
//!   allocation, no waiting - the audio callback stays wait-free.
//!
//! The published word packs three fields so a target and its ramp length
//! can never tear apart:
//!
//! ```text
//!   63          32 31    24 23            0
//!   [ target bits ][ gen    ][ ramp frames  ]
//! ```
//!
//! The 8-bit generation tag distinguishes consecutive writes that would
//! otherwise pack to identical bits (set A, set B, set A again before the
//! audio thread ticks). Targets are clamped *before* publishing, so an
//! in-flight ramp always interpolates between two in-range values
//! (clamp-then-ramp).

mod ramp;

pub use ramp::RampedParam;

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

/// Largest ramp length representable in the packed word: 2^24 - 1 frames,
/// just under six minutes at 48 kHz.
pub const MAX_RAMP_FRAMES: u32 = (1 << 24) - 1;

/// Static description of one effect parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub units: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl ParamSpec {
    /// Clamp a requested value to the declared range. Out-of-range
    /// requests are normal UI input, not an error.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

#[inline]
fn pack(target: f32, generation: u8, frames: u32) -> u64 {
    ((target.to_bits() as u64) << 32)
        | ((generation as u64) << 24)
        | (frames.min(MAX_RAMP_FRAMES) as u64)
}

#[inline]
fn unpack(word: u64) -> (f32, u32) {
    let target = f32::from_bits((word >> 32) as u32);
    let frames = (word & MAX_RAMP_FRAMES as u64) as u32;
    (target, frames)
}

#[inline]
fn generation(word: u64) -> u8 {
    (word >> 24) as u8
}

/// Create a bound parameter: the control handle and the audio-side ramp
/// state sharing one atomic word. `sample_rate` converts ramp durations in
/// seconds to frames at `set` time.
pub fn bind(spec: ParamSpec, sample_rate: f32) -> (ParamHandle, RampedParam) {
    let shared = Arc::new(AtomicU64::new(pack(spec.default, 0, 0)));
    let handle = ParamHandle {
        spec,
        sample_rate,
        shared: Arc::clone(&shared),
    };
    let ramp = RampedParam::new(spec.default, shared);
    (handle, ramp)
}

/// Control-side handle for one parameter.
///
/// Writes are expected from a single control thread at a time; the UI
/// layer owns the handle and serializes its own slider events.
#[derive(Debug, Clone)]
pub struct ParamHandle {
    spec: ParamSpec,
    sample_rate: f32,
    shared: Arc<AtomicU64>,
}

impl ParamHandle {
    pub fn spec(&self) -> &ParamSpec {
        &self.spec
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    /// Publish a new target. The target is clamped to the declared range,
    /// the ramp duration (seconds, >= 0) is converted to frames, and the
    /// audio side picks the write up on its next tick. A duration of zero
    /// applies immediately.
    pub fn set(&self, target: f32, ramp_duration: f32) {
        let target = self.spec.clamp(target);
        let frames = (ramp_duration.max(0.0) * self.sample_rate).round() as u32;

        let previous = self.shared.load(Ordering::Relaxed);
        let next = pack(target, generation(previous).wrapping_add(1), frames);
        self.shared.store(next, Ordering::Relaxed);
    }

    /// The most recently published target (what a slider should display).
    pub fn target(&self) -> f32 {
        unpack(self.shared.load(Ordering::Relaxed)).0
    }
}

/// A plain atomic f32 cell for unramped control values (mixer balance).
///
/// Balance changes at control rate are not perceptually discontinuous, so
/// they skip the ramp machinery entirely.
#[derive(Debug)]
pub struct SharedF32 {
    bits: AtomicU32,
}

impl SharedF32 {
    pub fn new(value: f32) -> Self {
        Self {
            bits: AtomicU32::new(value.to_bits()),
        }
    }

    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set(&self, value: f32) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }
}
