//! fxlab - live effect preview screens in the terminal
//!
//! Run with: cargo run [-- path/to/sample.wav]
//!
//! Keys: 1/2/3 select effect, up/down select control, left/right adjust,
//! space start/stop, q quit.

mod app;
mod ui;

use std::path::PathBuf;

use app::App;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let asset = std::env::args().nth(1).map(PathBuf::from);

    let terminal = ratatui::init();
    let res = App::new(asset).and_then(|mut app| app.run(terminal));
    ratatui::restore();
    res
}
