//! Linear dry/wet blending.
//!
//! Every effect preview runs the same parallel topology: the untouched
//! (dry) signal and the processed (wet) signal are blended by a single
//! balance factor:
//!
//! ```text
//!     output[i] = dry[i] * (1 - balance) + wet[i] * balance
//!
//!     balance = 0.0  ->  fully dry
//!     balance = 0.5  ->  equal blend
//!     balance = 1.0  ->  fully wet
//! ```
//!
//! The weights always sum to 1.0, so two full-scale inputs cannot push the
//! output past full scale. The crossfade is linear, not equal-power: a
//! slight loudness dip at the midpoint is acceptable for an effect preview
//! and keeps the math exact, which the mixer contract requires.

/// Blend a single dry/wet sample pair.
#[inline]
pub fn blend_dry_wet(dry: f32, wet: f32, balance: f32) -> f32 {
    dry * (1.0 - balance) + wet * balance
}

/// Blend two equal-length buffers into `out`.
///
/// `balance` is clamped to [0, 1]. Lengths must already agree; the graph
/// layer turns a mismatch into a `StreamMismatchError` before reaching
/// this point.
#[inline]
pub fn mix(dry: &[f32], wet: &[f32], balance: f32, out: &mut [f32]) {
    debug_assert_eq!(dry.len(), wet.len());
    debug_assert_eq!(dry.len(), out.len());

    let balance = balance.clamp(0.0, 1.0);
    let dry_weight = 1.0 - balance;

    for ((&d, &w), o) in dry.iter().zip(wet.iter()).zip(out.iter_mut()) {
        *o = d * dry_weight + w * balance;
    }
}

/// Blend `wet` into `dry` in place.
#[inline]
pub fn mix_in_place(dry: &mut [f32], wet: &[f32], balance: f32) {
    debug_assert_eq!(dry.len(), wet.len());

    let balance = balance.clamp(0.0, 1.0);
    let dry_weight = 1.0 - balance;

    for (d, &w) in dry.iter_mut().zip(wet.iter()) {
        *d = *d * dry_weight + w * balance;
    }
}
