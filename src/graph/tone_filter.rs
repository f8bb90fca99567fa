use crate::{
    dsp::tone::{tone_coefficient, OnePole},
    graph::node::{EffectControls, EffectUnit},
    param::{bind, ParamSpec, RampedParam},
};

/// First-order tone filter with a ramped `half_power_point` parameter
/// (12 Hz .. 20 kHz, default 1 kHz).
///
/// The feedback coefficient costs a `cos` and a `sqrt`, so it is only
/// recomputed on frames where the ramp actually moved; a settled
/// parameter costs one comparison per frame.
pub struct ToneFilterNode {
    half_power: RampedParam,
    filter: OnePole,
    cached_hz: f32,
    coefficient: f32,
    device_rate: f32,
}

impl ToneFilterNode {
    pub const HALF_POWER_POINT: ParamSpec = ParamSpec {
        name: "half_power_point",
        units: "Hz",
        min: 12.0,
        max: 20_000.0,
        default: 1_000.0,
    };

    pub fn new(device_rate: f32) -> (Self, EffectControls) {
        let (hp_handle, half_power) = bind(Self::HALF_POWER_POINT, device_rate);

        let default_hz = Self::HALF_POWER_POINT.default;
        let node = Self {
            half_power,
            filter: OnePole::new(),
            cached_hz: default_hz,
            coefficient: tone_coefficient(default_hz, device_rate),
            device_rate,
        };
        let controls = EffectControls::new("Tone Filter", vec![hp_handle]);
        (node, controls)
    }

    pub fn boxed(device_rate: f32) -> (Box<dyn EffectUnit>, EffectControls) {
        let (node, controls) = Self::new(device_rate);
        (Box::new(node), controls)
    }
}

impl EffectUnit for ToneFilterNode {
    fn process_block(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            let hz = self.half_power.tick();
            if hz != self.cached_hz {
                self.cached_hz = hz;
                self.coefficient = tone_coefficient(hz, self.device_rate);
            }
            *sample = self.filter.next_sample(*sample, self.coefficient);
        }
    }

    fn reset(&mut self) {
        self.filter.reset();
    }
}
