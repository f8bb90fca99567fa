use crate::param::ParamHandle;

/// An opaque in-place audio processor with ramp-capable named parameters.
///
/// This is the capability the session conducts: it does not know or care
/// what the effect computes, only that it transforms blocks in place and
/// that its parameters were bound through [`crate::param::bind`] so the
/// control thread can reach them.
///
/// `process_block` runs on the realtime audio thread: implementations must
/// not block, allocate, or take locks.
pub trait EffectUnit: Send {
    fn process_block(&mut self, buffer: &mut [f32]);

    /// Clear processing history (filter memory, hold state).
    ///
    /// Default implementation does nothing (stateless effects).
    fn reset(&mut self) {
        // Default: do nothing
    }
}

/// Allow boxed effect units to be used as effect units (for dynamic dispatch)
impl EffectUnit for Box<dyn EffectUnit> {
    fn process_block(&mut self, buffer: &mut [f32]) {
        (**self).process_block(buffer)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// The control surface of one effect: its display label and the ordered
/// parameter handles the UI binds sliders to.
#[derive(Debug, Clone)]
pub struct EffectControls {
    label: &'static str,
    params: Vec<ParamHandle>,
}

impl EffectControls {
    pub fn new(label: &'static str, params: Vec<ParamHandle>) -> Self {
        Self { label, params }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Look a parameter up by its declared name.
    pub fn get(&self, name: &str) -> Option<&ParamHandle> {
        self.params.iter().find(|p| p.name() == name)
    }

    /// All parameters, in declaration order (the order sliders appear in).
    pub fn params(&self) -> &[ParamHandle] {
        &self.params
    }
}
