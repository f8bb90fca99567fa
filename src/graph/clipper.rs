use crate::{
    dsp::clip::clip,
    graph::node::{EffectControls, EffectUnit},
    param::{bind, ParamSpec, RampedParam},
};

/// Hard clipper with a single ramped `limit` parameter (0..1, default 1).
///
/// At the default limit the effect is transparent for in-range material;
/// pulling the limit down flattens progressively more of the waveform.
pub struct ClipperNode {
    limit: RampedParam,
}

impl ClipperNode {
    pub const LIMIT: ParamSpec = ParamSpec {
        name: "limit",
        units: "",
        min: 0.0,
        max: 1.0,
        default: 1.0,
    };

    pub fn new(device_rate: f32) -> (Self, EffectControls) {
        let (limit_handle, limit) = bind(Self::LIMIT, device_rate);
        let node = Self { limit };
        let controls = EffectControls::new("Clipper", vec![limit_handle]);
        (node, controls)
    }

    pub fn boxed(device_rate: f32) -> (Box<dyn EffectUnit>, EffectControls) {
        let (node, controls) = Self::new(device_rate);
        (Box::new(node), controls)
    }
}

impl EffectUnit for ClipperNode {
    fn process_block(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = clip(*sample, self.limit.tick());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limit_passes_in_range_audio() {
        let (mut node, _controls) = ClipperNode::new(48_000.0);
        let mut buffer = vec![0.5, -0.5, 0.99, -0.99];
        let clean = buffer.clone();

        node.process_block(&mut buffer);

        assert_eq!(buffer, clean);
    }

    #[test]
    fn lowered_limit_flattens_peaks() {
        let (mut node, controls) = ClipperNode::new(48_000.0);
        controls.get("limit").expect("limit param").set(0.25, 0.0);

        let mut buffer = vec![0.9, -0.9, 0.1];
        node.process_block(&mut buffer);

        assert_eq!(buffer, vec![0.25, -0.25, 0.1]);
    }

    #[test]
    fn ramped_limit_tightens_gradually() {
        let (mut node, controls) = ClipperNode::new(48_000.0);
        controls.get("limit").expect("limit param").set(0.0, 0.01);

        // A constant full-scale input traces the limit itself as it ramps
        // down, so the output must decrease monotonically to zero.
        let mut buffer = vec![1.0; 480];
        node.process_block(&mut buffer);

        for pair in buffer.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
        assert_eq!(buffer[479], 0.0);
    }
}
