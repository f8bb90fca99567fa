//! Bit Crusher preview
//!
//! Loops a sample through the bit crusher at 50% dry/wet and sweeps the
//! bit depth downward, then pulls the crush rate in. Pass a WAV path to
//! preview your own material instead of the built-in loop.
//!
//! Run with: cargo run --example bitcrusher [-- path/to/sample.wav]

use std::{thread, time::Duration};

use fxlab::{
    graph::BitCrusherNode,
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

    let mut session = Session::with_backend(buffer, BitCrusherNode::boxed, Box::new(backend))?;
    session.set_balance(0.5);
    session.start()?;

    println!("=== Bit Crusher ===");
    println!("Sample rate: {} Hz, balance 0.5", sample_rate);

    for depth in [12.0, 8.0, 4.0, 2.0] {
        session.set_parameter("bit_depth", depth, 0.02)?;
        thread::sleep(Duration::from_millis(1500));
        report(&mut session, &format!("bit_depth -> {depth}"));
    }

    println!("pulling the crush rate down to 2 kHz over half a second...");
    session.set_parameter("sample_rate", 2_000.0, 0.5)?;
    thread::sleep(Duration::from_millis(2500));
    report(&mut session, "sample_rate -> 2000");

    session.stop();
    Ok(())
}

fn report(session: &mut Session, label: &str) {
    let mix = session.scopes().mix.snapshot();
    let peak = mix.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
    println!("{label:<24} | mix peak {peak:.3}");
}
