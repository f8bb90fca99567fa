//! Effect nodes for the preview pipeline.
//!
//! Nodes wrap the low-level DSP primitives with the plumbing a live
//! session needs: per-sample parameter ramps fed from the control thread,
//! a uniform in-place block-processing trait, and named parameter handles
//! for UI binding. The session wires exactly one node between the sample
//! source and the dry/wet mixer.

/// Bit-depth and sample-rate reduction node.
pub mod bitcrusher;
/// Hard clipper node.
pub mod clipper;
/// Linear dry/wet mixer with a shared balance cell.
pub mod mix;
/// Core trait and control surface shared by all effect nodes.
pub mod node;
/// First-order tone (low-pass) node.
pub mod tone_filter;

pub use bitcrusher::BitCrusherNode;
pub use clipper::ClipperNode;
pub use mix::{DryWetMixer, StreamMismatchError};
pub use node::{EffectControls, EffectUnit};
pub use tone_filter::ToneFilterNode;
