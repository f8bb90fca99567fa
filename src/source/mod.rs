//! Sample buffers and looping playback.
//!
//! A preview session plays one fixed audio asset on repeat while the user
//! pokes at effect parameters. The asset is decoded once at session
//! creation into an immutable mono [`SampleBuffer`]; the
//! [`LoopingSampler`] then reads it forever, wrapping seamlessly at the
//! end.

/// Built-in synthesized drum loop for asset-free demos.
pub mod demo;
/// Looping block reader over a sample buffer.
pub mod player;

pub use demo::demo_loop;
pub use player::LoopingSampler;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

/// Loading or decoding the sample asset failed. Fatal at session
/// construction - there is nothing to preview without a source.
#[derive(Debug, Error)]
pub enum AssetLoadError {
    #[error("failed to read sample asset `{path}`: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
    #[error("sample asset `{path}` contains no audio frames")]
    Empty { path: PathBuf },
}

/// An immutable mono PCM buffer at a known sample rate.
///
/// The frames live behind `Arc<[f32]>`: cloning a buffer is cheap and the
/// audio thread shares it read-only across loop iterations.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    frames: Arc<[f32]>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Decode a WAV file, downmixing multi-channel material to mono by
    /// averaging.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetLoadError> {
        let path = path.as_ref();
        let decode_err = |source| AssetLoadError::Decode {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = hound::WavReader::open(path).map_err(decode_err)?;
        let spec = reader.spec();
        let channels = spec.channels as usize;

        let raw: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(decode_err)?,
            hound::SampleFormat::Int => {
                let scale = 1.0 / (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 * scale))
                    .collect::<Result<_, _>>()
                    .map_err(decode_err)?
            }
        };

        if channels == 0 || raw.len() < channels {
            return Err(AssetLoadError::Empty {
                path: path.to_path_buf(),
            });
        }

        let frames: Vec<f32> = if channels == 1 {
            raw
        } else {
            raw.chunks_exact(channels)
                .map(|frame| frame.iter().sum::<f32>() / channels as f32)
                .collect()
        };

        log::debug!(
            "loaded `{}`: {} frames at {} Hz ({} channel(s) in source)",
            path.display(),
            frames.len(),
            spec.sample_rate,
            channels
        );

        Ok(Self {
            frames: frames.into(),
            sample_rate: spec.sample_rate,
        })
    }

    /// Wrap raw mono frames. Used by tests and by the demo-loop
    /// synthesizer.
    ///
    /// # Panics
    ///
    /// Panics if `frames` is empty - a zero-length loop cannot play.
    pub fn from_frames(frames: Vec<f32>, sample_rate: u32) -> Self {
        assert!(!frames.is_empty(), "sample buffer needs at least one frame");
        Self {
            frames: frames.into(),
            sample_rate,
        }
    }

    #[inline]
    pub fn frames(&self) -> &[f32] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration_secs(&self) -> f32 {
        self.frames.len() as f32 / self.sample_rate as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_a_decode_error() {
        let result = SampleBuffer::load("/nonexistent/beat.wav");
        assert!(matches!(result, Err(AssetLoadError::Decode { .. })));
    }

    #[test]
    fn from_frames_keeps_data_and_rate() {
        let buffer = SampleBuffer::from_frames(vec![0.1, -0.1, 0.2], 44_100);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.sample_rate(), 44_100);
        assert_eq!(buffer.frames(), &[0.1, -0.1, 0.2]);
    }

    #[test]
    #[should_panic(expected = "at least one frame")]
    fn empty_frames_panic() {
        SampleBuffer::from_frames(Vec::new(), 44_100);
    }

    #[test]
    fn duration_follows_the_sample_rate() {
        let buffer = SampleBuffer::from_frames(vec![0.0; 88_200], 44_100);
        assert_eq!(buffer.duration_secs(), 2.0);
    }
}
