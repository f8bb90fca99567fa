pub mod dsp;
pub mod graph; // Effect nodes and the dry/wet mixer
pub mod param; // Ramped parameter plumbing (control -> audio thread)
pub mod scope; // Rolling-window visualization taps
#[cfg(feature = "rtrb")]
pub mod session; // Preview session conductor
pub mod source; // Sample buffers and looping playback

pub const MAX_BLOCK_SIZE: usize = 2048;
