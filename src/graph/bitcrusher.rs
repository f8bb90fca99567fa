use crate::{
    dsp::bitcrush::{quantize, Downsampler},
    graph::node::{EffectControls, EffectUnit},
    param::{bind, ParamSpec, RampedParam},
};

/// Bit crusher: amplitude quantization plus sample-rate reduction.
///
/// Two ramped parameters, matching the classic effect:
///
/// - `bit_depth` (1..24 bits, default 8) - resolution of the amplitude
///   grid. Fractional values are valid, which keeps ramped sweeps smooth.
/// - `sample_rate` (0..20 kHz, default 10 kHz) - the effect's internal
///   capture rate. Below the device rate, samples are held and the
///   stairstepping aliases audibly.
pub struct BitCrusherNode {
    bit_depth: RampedParam,
    crush_rate: RampedParam,
    downsampler: Downsampler,
    device_rate: f32,
}

impl BitCrusherNode {
    pub const BIT_DEPTH: ParamSpec = ParamSpec {
        name: "bit_depth",
        units: "bits",
        min: 1.0,
        max: 24.0,
        default: 8.0,
    };

    pub const SAMPLE_RATE: ParamSpec = ParamSpec {
        name: "sample_rate",
        units: "Hz",
        min: 0.0,
        max: 20_000.0,
        default: 10_000.0,
    };

    pub fn new(device_rate: f32) -> (Self, EffectControls) {
        let (depth_handle, bit_depth) = bind(Self::BIT_DEPTH, device_rate);
        let (rate_handle, crush_rate) = bind(Self::SAMPLE_RATE, device_rate);

        let node = Self {
            bit_depth,
            crush_rate,
            downsampler: Downsampler::new(),
            device_rate,
        };
        let controls = EffectControls::new("Bit Crusher", vec![depth_handle, rate_handle]);
        (node, controls)
    }

    pub fn boxed(device_rate: f32) -> (Box<dyn EffectUnit>, EffectControls) {
        let (node, controls) = Self::new(device_rate);
        (Box::new(node), controls)
    }
}

impl EffectUnit for BitCrusherNode {
    fn process_block(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            let depth = self.bit_depth.tick();
            let rate = self.crush_rate.tick();
            let held = self
                .downsampler
                .next_sample(*sample, rate, self.device_rate);
            *sample = quantize(held, depth);
        }
    }

    fn reset(&mut self) {
        self.downsampler.reset();
    }
}
