//! Audio-side linear parameter ramp.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// The audio thread's view of one parameter.
///
/// `tick()` runs once per frame inside the device callback: a relaxed load
/// to poll for a new target, then one add to advance the ramp. The landing
/// frame assigns the target exactly, so a ramp always finishes on the
/// clamped value with no floating-point drift.
#[derive(Debug)]
pub struct RampedParam {
    shared: Arc<AtomicU64>,
    seen: u64,
    current: f32,
    target: f32,
    step: f32,
    frames_left: u32,
}

impl RampedParam {
    pub(crate) fn new(initial: f32, shared: Arc<AtomicU64>) -> Self {
        let seen = shared.load(Ordering::Relaxed);
        Self {
            shared,
            seen,
            current: initial,
            target: initial,
            step: 0.0,
            frames_left: 0,
        }
    }

    /// Advance one frame and return the effective value.
    #[inline]
    pub fn tick(&mut self) -> f32 {
        let word = self.shared.load(Ordering::Relaxed);
        if word != self.seen {
            self.seen = word;
            self.retarget(word);
        }

        if self.frames_left > 0 {
            self.frames_left -= 1;
            if self.frames_left == 0 {
                self.current = self.target;
            } else {
                self.current += self.step;
            }
        }
        self.current
    }

    /// The effective value right now, without advancing time.
    #[inline]
    pub fn value(&self) -> f32 {
        self.current
    }

    fn retarget(&mut self, word: u64) {
        let (target, frames) = super::unpack(word);
        self.target = target;
        if frames == 0 {
            self.current = target;
            self.frames_left = 0;
        } else {
            self.step = (target - self.current) / frames as f32;
            self.frames_left = frames;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::param::{bind, ParamSpec};

    const SPEC: ParamSpec = ParamSpec {
        name: "bit_depth",
        units: "bits",
        min: 1.0,
        max: 24.0,
        default: 8.0,
    };

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn zero_duration_applies_immediately() {
        let (handle, mut ramp) = bind(SPEC, SAMPLE_RATE);
        handle.set(4.0, 0.0);
        assert_eq!(ramp.tick(), 4.0);
    }

    #[test]
    fn value_before_first_tick_is_the_old_value() {
        let (handle, mut ramp) = bind(SPEC, SAMPLE_RATE);
        handle.set(4.0, 0.02);

        // t = 0: the update is published but no time has passed.
        assert_eq!(ramp.value(), 8.0);

        // One frame in, the ramp has barely moved.
        let first = ramp.tick();
        assert!(first < 8.0 && first > 4.0);
    }

    #[test]
    fn ramp_lands_exactly_on_target() {
        let (handle, mut ramp) = bind(SPEC, SAMPLE_RATE);
        let duration = 0.02;
        handle.set(4.0, duration);

        let frames = (duration * SAMPLE_RATE) as usize;
        let mut last = ramp.value();
        for _ in 0..frames {
            last = ramp.tick();
        }
        assert_eq!(last, 4.0);

        // And stays there.
        assert_eq!(ramp.tick(), 4.0);
    }

    #[test]
    fn ramp_is_monotonic() {
        let (handle, mut ramp) = bind(SPEC, SAMPLE_RATE);
        handle.set(20.0, 0.01);

        let mut previous = ramp.value();
        for _ in 0..480 {
            let value = ramp.tick();
            assert!(value >= previous, "ramp went backwards: {previous} -> {value}");
            previous = value;
        }
        assert_eq!(previous, 20.0);

        handle.set(2.0, 0.01);
        for _ in 0..480 {
            let value = ramp.tick();
            assert!(value <= previous, "ramp went backwards: {previous} -> {value}");
            previous = value;
        }
        assert_eq!(previous, 2.0);
    }

    #[test]
    fn out_of_range_target_lands_on_the_boundary() {
        let (handle, mut ramp) = bind(SPEC, SAMPLE_RATE);
        handle.set(50.0, 0.02);

        for _ in 0..(0.02 * SAMPLE_RATE) as usize + 1 {
            ramp.tick();
        }
        assert_eq!(ramp.value(), 24.0);
    }

    #[test]
    fn retarget_mid_ramp_starts_from_the_current_value() {
        let (handle, mut ramp) = bind(SPEC, SAMPLE_RATE);
        handle.set(24.0, 0.1);

        for _ in 0..100 {
            ramp.tick();
        }
        let mid = ramp.value();
        assert!(mid > 8.0 && mid < 24.0);

        // Reverse direction; the new ramp must depart from `mid`, not from
        // the old target.
        handle.set(1.0, 0.1);
        let after = ramp.tick();
        assert!((after - mid).abs() < 0.01);
        assert!(after < mid);
    }
}
