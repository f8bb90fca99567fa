//! SPSC tap pair: audio-side producer, UI-side consumer.

use rtrb::{Consumer, Producer, PushError, RingBuffer};

use crate::scope::window::RollingWindow;

/// Create a connected tap pair.
///
/// `window_capacity` sets the rolling history length the view keeps. The
/// ring between the two sides is sized to several windows so a slow UI
/// frame does not immediately drop audio.
pub fn scope_channel(window_capacity: usize) -> (ScopeTap, ScopeView) {
    let (tx, rx) = RingBuffer::new(window_capacity * 4);
    (
        ScopeTap { tx },
        ScopeView {
            rx,
            window: RollingWindow::new(window_capacity),
        },
    )
}

/// Audio-side half of a tap. Lives inside the preview chain and is fed
/// from the device callback.
pub struct ScopeTap {
    tx: Producer<f32>,
}

impl ScopeTap {
    /// Copy a rendered block into the ring, non-blocking. If the UI has
    /// fallen behind and the ring is full, the remainder of the block is
    /// dropped - visualization loss, never an audio stall.
    #[inline]
    pub fn capture(&mut self, block: &[f32]) {
        for &sample in block {
            if let Err(PushError::Full(_)) = self.tx.push(sample) {
                break;
            }
        }
    }
}

/// UI-side half of a tap.
pub struct ScopeView {
    rx: Consumer<f32>,
    window: RollingWindow,
}

impl ScopeView {
    /// Pull everything the audio side has produced into the rolling
    /// window. Cheap enough to call once per rendered frame.
    pub fn drain(&mut self) {
        while let Ok(sample) = self.rx.pop() {
            self.window.push_sample(sample);
        }
    }

    /// Drain pending samples and copy out the window, oldest to newest.
    pub fn snapshot(&mut self) -> Vec<f32> {
        self.drain();
        self.window.snapshot()
    }

    pub fn window(&self) -> &RollingWindow {
        &self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_flow_from_tap_to_view() {
        let (mut tap, mut view) = scope_channel(8);
        tap.capture(&[0.1, 0.2, 0.3]);

        assert_eq!(view.snapshot(), vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn view_keeps_only_the_window_capacity() {
        let (mut tap, mut view) = scope_channel(4);
        let samples: Vec<f32> = (0..12).map(|i| i as f32).collect();

        // Capture in small blocks with interleaved drains, like the real
        // callback/render cadence.
        for chunk in samples.chunks(3) {
            tap.capture(chunk);
            view.drain();
        }

        assert_eq!(view.snapshot(), vec![8.0, 9.0, 10.0, 11.0]);
    }

    #[test]
    fn overflow_drops_samples_instead_of_blocking() {
        let (mut tap, mut view) = scope_channel(2);

        // Ring capacity is 8; push far more without draining.
        let burst: Vec<f32> = (0..100).map(|i| i as f32).collect();
        tap.capture(&burst);

        // The earliest samples survived, the rest were dropped.
        let snapshot = view.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.iter().all(|&s| s < 8.0));
    }

    #[test]
    fn works_across_threads() {
        let (mut tap, mut view) = scope_channel(64);

        let producer = std::thread::spawn(move || {
            for i in 0..64 {
                tap.capture(&[i as f32]);
            }
        });
        producer.join().expect("producer thread panicked");

        let snapshot = view.snapshot();
        assert_eq!(snapshot.len(), 64);
        assert_eq!(snapshot[0], 0.0);
        assert_eq!(snapshot[63], 63.0);
    }
}
