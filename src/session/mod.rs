//! Effect preview session: the conductor that owns the audio graph.
//!
//! A [`Session`] wires the fixed pipeline - looping sample source ->
//! effect -> dry/wet mixer -> output device - and exposes the control
//! surface the UI binds to: `start`/`stop`, ramped parameter writes, the
//! mixer balance, and pull-based scope views for the three tap points.
//!
//! # Threading
//!
//! The session itself lives on the control thread. Parameter and balance
//! writes go through atomics and never block the device callback; the
//! graph root crosses into the callback behind a mutex the control side
//! only touches while the stream is stopped.

pub mod backend;
mod graph;

pub use backend::{CpalBackend, OutputBackend, OutputStream};
pub use graph::{PreviewChain, SessionScopes};

use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::{
    graph::{DryWetMixer, EffectControls, EffectUnit},
    param::SharedF32,
    source::{AssetLoadError, SampleBuffer},
};

/// Samples of history each scope view keeps.
pub const DEFAULT_SCOPE_CAPACITY: usize = 1024;

/// Dry/wet balance a fresh session starts with.
pub const DEFAULT_BALANCE: f32 = 0.5;

/// Whether the session's audio graph is live.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Stopped,
    Running,
}

#[derive(Debug, Error)]
pub enum SessionError {
    /// `start()` while the graph is already live. State is unchanged.
    #[error("session is already running")]
    AlreadyRunning,

    /// The output device failed to start. The session stays Stopped and
    /// the caller may retry.
    #[error("output device failed to start: {0}")]
    DeviceStart(String),

    /// `set_parameter` named a parameter the held effect does not expose.
    #[error("no parameter named `{0}` on this effect")]
    UnknownParameter(String),

    /// The sample asset could not be loaded at session construction.
    #[error(transparent)]
    Asset(#[from] AssetLoadError),
}

/// A factory producing the effect node and its control surface at the
/// device's sample rate. The concrete nodes' `boxed` constructors fit
/// directly: `Session::new(buffer, BitCrusherNode::boxed)`.
pub type EffectFactory = fn(f32) -> (Box<dyn EffectUnit>, EffectControls);

/// The conductor. See the module docs for the big picture.
pub struct Session {
    state: SessionState,
    sample_rate: f32,
    chain: Arc<Mutex<PreviewChain>>,
    controls: EffectControls,
    balance: Arc<SharedF32>,
    scopes: SessionScopes,
    backend: Box<dyn OutputBackend>,
    stream: Option<Box<dyn OutputStream>>,
}

impl Session {
    /// Build a session on the system's default output device.
    pub fn new<F>(buffer: SampleBuffer, effect: F) -> Result<Self, SessionError>
    where
        F: FnOnce(f32) -> (Box<dyn EffectUnit>, EffectControls),
    {
        let backend = CpalBackend::open_default()?;
        Self::with_backend(buffer, effect, Box::new(backend))
    }

    /// Load a WAV asset and build a session on the default device.
    pub fn from_wav<F>(path: impl AsRef<std::path::Path>, effect: F) -> Result<Self, SessionError>
    where
        F: FnOnce(f32) -> (Box<dyn EffectUnit>, EffectControls),
    {
        Self::new(SampleBuffer::load(path)?, effect)
    }

    /// Build a session on an explicit backend. This is the seam tests use
    /// to drive the graph without a real device.
    pub fn with_backend<F>(
        buffer: SampleBuffer,
        effect: F,
        backend: Box<dyn OutputBackend>,
    ) -> Result<Self, SessionError>
    where
        F: FnOnce(f32) -> (Box<dyn EffectUnit>, EffectControls),
    {
        let sample_rate = backend.sample_rate();
        if buffer.sample_rate() as f32 != sample_rate {
            // No resampling: playback proceeds at the device rate, which
            // shifts pitch by the rate ratio.
            log::warn!(
                "asset rate {} Hz != device rate {} Hz; playback will be pitch-shifted",
                buffer.sample_rate(),
                sample_rate
            );
        }

        let (effect, controls) = effect(sample_rate);
        let mixer = DryWetMixer::new(DEFAULT_BALANCE);
        let balance = mixer.balance_cell();
        let (chain, scopes) =
            PreviewChain::new(buffer, effect, mixer, DEFAULT_SCOPE_CAPACITY);

        Ok(Self {
            state: SessionState::Stopped,
            sample_rate,
            chain: Arc::new(Mutex::new(chain)),
            controls,
            balance,
            scopes,
            backend,
            stream: None,
        })
    }

    /// Start the audio graph: rewind playback, open the device stream,
    /// transition to Running.
    ///
    /// Returns [`SessionError::AlreadyRunning`] if the graph is already
    /// live, and [`SessionError::DeviceStart`] (leaving the session
    /// Stopped) if the device refuses.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Running {
            return Err(SessionError::AlreadyRunning);
        }

        {
            // No stream is live, so the control side may take the lock.
            let mut chain = self
                .chain
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            chain.reset();
        }

        let stream = self.backend.start(Arc::clone(&self.chain)).map_err(|err| {
            log::warn!("session start failed: {err}");
            err
        })?;

        self.stream = Some(stream);
        self.state = SessionState::Running;
        log::debug!("session running at {} Hz", self.sample_rate);
        Ok(())
    }

    /// Stop the audio graph. Idempotent: stopping a stopped session does
    /// nothing. Dropping the stream handle releases the device and its
    /// callback before this returns.
    pub fn stop(&mut self) {
        if self.state == SessionState::Stopped {
            return;
        }
        self.stream = None;
        self.state = SessionState::Stopped;
        log::debug!("session stopped");
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Ramp the named parameter to `target` over `ramp_duration` seconds.
    /// The target is clamped to the parameter's declared range before the
    /// ramp starts; a duration of zero applies immediately.
    pub fn set_parameter(
        &self,
        name: &str,
        target: f32,
        ramp_duration: f32,
    ) -> Result<(), SessionError> {
        let handle = self
            .controls
            .get(name)
            .ok_or_else(|| SessionError::UnknownParameter(name.to_string()))?;
        handle.set(target, ramp_duration);
        Ok(())
    }

    /// Set the dry/wet balance, clamped to [0, 1]. Applied immediately -
    /// balance steps at control rate need no ramp.
    pub fn set_balance(&self, value: f32) {
        self.balance.set(value.clamp(0.0, 1.0));
    }

    pub fn balance(&self) -> f32 {
        self.balance.get()
    }

    /// The held effect's control surface (label + parameter handles, in
    /// slider order).
    pub fn controls(&self) -> &EffectControls {
        &self.controls
    }

    /// The three scope views: dry, wet, mix. Mutable because a snapshot
    /// drains the tap's ring into the view's window.
    pub fn scopes(&mut self) -> &mut SessionScopes {
        &mut self.scopes
    }
}
