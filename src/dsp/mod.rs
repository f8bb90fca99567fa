//! Low-level DSP primitives used by the effect nodes.
//!
//! These functions are allocation-free and realtime-safe, so they can run
//! directly inside the output device callback. They stay focused on the
//! signal math; parameter ramping and graph wiring live one layer up.

/// Bit-depth quantization and sample-rate reduction.
pub mod bitcrush;
/// Hard amplitude clipping.
pub mod clip;
/// Linear dry/wet blending.
pub mod mix;
/// First-order recursive low-pass keyed by its half-power point.
pub mod tone;
