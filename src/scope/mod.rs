//! Rolling-window visualization taps.
//!
//! A tap copies samples out of the audio graph without affecting the
//! signal path. The audio side pushes into a pre-allocated SPSC ring and
//! drops samples when the UI falls behind; the UI side drains the ring
//! into a fixed-capacity rolling window and renders chronological
//! snapshots at whatever rate it likes.

/// SPSC tap pair connecting the audio callback to a scope view.
#[cfg(feature = "rtrb")]
pub mod tap;
/// Fixed-capacity circular sample history.
pub mod window;

#[cfg(feature = "rtrb")]
pub use tap::{scope_channel, ScopeTap, ScopeView};
pub use window::RollingWindow;
