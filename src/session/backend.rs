//! Output device abstraction.
//!
//! The session only needs two things from a device: its sample rate
//! before the graph is built, and a start call that takes the graph root
//! and returns a handle whose drop tears the stream down. [`CpalBackend`]
//! is the production implementation; tests inject a manual backend and
//! pump blocks by hand.

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::{
    session::{PreviewChain, SessionError},
    MAX_BLOCK_SIZE,
};

/// A running output stream. Dropping the handle stops the device and
/// releases its callback; the backends used here do that synchronously.
pub trait OutputStream {}

/// An output device that can drive a preview chain.
pub trait OutputBackend {
    /// The device's output sample rate; the session builds its nodes at
    /// this rate.
    fn sample_rate(&self) -> f32;

    /// Begin periodic callbacks that pull blocks from `chain`.
    ///
    /// The chain is shared behind a mutex, but the contract keeps it
    /// uncontended: the control side only locks while no stream is live,
    /// so the callback's `try_lock` never waits.
    fn start(
        &mut self,
        chain: Arc<Mutex<PreviewChain>>,
    ) -> Result<Box<dyn OutputStream>, SessionError>;
}

/// The system's default output device, via cpal.
pub struct CpalBackend {
    device: cpal::Device,
    config: cpal::SupportedStreamConfig,
}

impl CpalBackend {
    pub fn open_default() -> Result<Self, SessionError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or_else(|| {
            SessionError::DeviceStart("no default output device available".into())
        })?;
        let config = device.default_output_config().map_err(|err| {
            SessionError::DeviceStart(format!("failed to fetch default output config: {err}"))
        })?;
        Ok(Self { device, config })
    }
}

impl OutputBackend for CpalBackend {
    fn sample_rate(&self) -> f32 {
        self.config.sample_rate().0 as f32
    }

    fn start(
        &mut self,
        chain: Arc<Mutex<PreviewChain>>,
    ) -> Result<Box<dyn OutputStream>, SessionError> {
        let channels = self.config.channels() as usize;

        // Buffer reused by the audio callback
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = self
            .device
            .build_output_stream(
                &self.config.clone().into(),
                move |data: &mut [f32], _| {
                    let Ok(mut chain) = chain.try_lock() else {
                        // Contended only if the control side broke the
                        // stopped-stream locking contract; emit silence.
                        data.fill(0.0);
                        return;
                    };

                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;
                    while frames_written < total_frames {
                        let frames_remaining = total_frames - frames_written;
                        let frames_to_render = frames_remaining.min(MAX_BLOCK_SIZE);

                        let block = &mut render_buf[..frames_to_render];
                        chain.process_block(block);

                        // Duplicate mono to all channels and write to device
                        let out_off = frames_written * channels;
                        for (i, &s) in block.iter().enumerate() {
                            for ch in 0..channels {
                                data[out_off + i * channels + ch] = s;
                            }
                        }

                        frames_written += frames_to_render;
                    }
                },
                move |err| log::error!("output stream error: {err}"),
                None,
            )
            .map_err(|err| {
                SessionError::DeviceStart(format!("failed to build output stream: {err}"))
            })?;

        stream
            .play()
            .map_err(|err| SessionError::DeviceStart(format!("failed to start output stream: {err}")))?;

        Ok(Box::new(CpalStream { _stream: stream }))
    }
}

struct CpalStream {
    _stream: cpal::Stream,
}

impl OutputStream for CpalStream {}
