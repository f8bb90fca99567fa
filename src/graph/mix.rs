use std::sync::Arc;

use thiserror::Error;

use crate::{dsp, param::SharedF32};

/// The dry and wet streams disagree about block length. The preview chain
/// allocates both scratch buffers from one block size, so hitting this
/// means a configuration bug, not bad user input.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("dry/wet stream mismatch: dry {dry} frames, wet {wet} frames, out {out} frames")]
pub struct StreamMismatchError {
    pub dry: usize,
    pub wet: usize,
    pub out: usize,
}

/// Linear dry/wet mixer.
///
/// `output[i] = dry[i] * (1 - balance) + wet[i] * balance`
///
/// The balance lives in an atomic cell shared with the control side:
/// the session writes it (clamped, unramped - control-rate coefficient
/// steps are not perceptually discontinuous), the audio callback reads it
/// once per block.
pub struct DryWetMixer {
    balance: Arc<SharedF32>,
}

impl DryWetMixer {
    pub fn new(balance: f32) -> Self {
        Self {
            balance: Arc::new(SharedF32::new(balance.clamp(0.0, 1.0))),
        }
    }

    /// The shared cell, for the control side. Writers clamp to [0, 1].
    pub fn balance_cell(&self) -> Arc<SharedF32> {
        Arc::clone(&self.balance)
    }

    pub fn balance(&self) -> f32 {
        self.balance.get()
    }

    /// Blend one block. All three buffers must agree on length.
    pub fn render(
        &self,
        dry: &[f32],
        wet: &[f32],
        out: &mut [f32],
    ) -> Result<(), StreamMismatchError> {
        if dry.len() != wet.len() || dry.len() != out.len() {
            return Err(StreamMismatchError {
                dry: dry.len(),
                wet: wet.len(),
                out: out.len(),
            });
        }

        dsp::mix::mix(dry, wet, self.balance.get(), out);
        Ok(())
    }
}
