//! Tone Filter preview
//!
//! Loops a sample through the one-pole tone filter at 50% dry/wet and
//! sweeps the half-power point from wide open down to muffled, with a
//! slow ramp so the sweep itself is audible.
//!
//! Run with: cargo run --example tone_filter [-- path/to/sample.wav]

use std::{thread, time::Duration};

use fxlab::{
    graph::ToneFilterNode,
    session::{CpalBackend, OutputBackend, Session},
    source::{demo_loop, SampleBuffer},
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let backend = CpalBackend::open_default()?;
    let sample_rate = backend.sample_rate() as u32;

    let buffer = match std::env::args().nth(1) {
        Some(path) => SampleBuffer::load(path)?,
        None => demo_loop(sample_rate),
    };

    let mut session = Session::with_backend(buffer, ToneFilterNode::boxed, Box::new(backend))?;
    session.set_balance(0.5);
    session.start()?;

    println!("=== Tone Filter ===");
    println!("Sample rate: {} Hz, balance 0.5", sample_rate);

    for half_power in [8_000.0, 2_000.0, 500.0, 120.0] {
        // A longer ramp here makes the filter sweep itself part of the
        // preview, like riding the slider.
        session.set_parameter("half_power_point", half_power, 0.4)?;
        thread::sleep(Duration::from_millis(1800));

        let wet = session.scopes().wet.snapshot();
        let rms = (wet.iter().map(|&x| x * x).sum::<f32>() / wet.len().max(1) as f32).sqrt();
        println!("half_power_point {half_power:>7.0} Hz | wet rms {rms:.3}");
    }

    session.stop();
    Ok(())
}
