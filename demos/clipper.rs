//! Clipper preview
//!
//! Loops a sample through the hard clipper at 50% dry/wet and steps the
//! limit down from transparent to heavily squared-off.
//!
//! Run with: cargo run --example clipper [-- path/to/sample.wav]

use std::{thread, time::Duration};

use fxlab::{
    graph::ClipperNode,
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

    let mut session = Session::with_backend(buffer, ClipperNode::boxed, Box::new(backend))?;
    session.set_balance(0.5);
    session.start()?;

    println!("=== Clipper ===");
    println!("Sample rate: {} Hz, balance 0.5", sample_rate);

    for limit in [1.0, 0.6, 0.3, 0.1] {
        session.set_parameter("limit", limit, 0.02)?;
        thread::sleep(Duration::from_millis(1500));

        let wet = session.scopes().wet.snapshot();
        let peak = wet.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        println!("limit {limit:>4.2} | wet peak {peak:.3}");
    }

    session.stop();
    Ok(())
}
