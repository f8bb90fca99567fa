//! Screen layout and rendering.

pub mod controls;
pub mod spectrum;
pub mod waveform;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Color,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use fxlab::session::SessionState;

use crate::app::App;

/// Render one frame: three stacked scopes on the left (dry, wet, mix -
/// the wet plot blue, the mix plot magenta, as on the classic screens),
/// controls, spectrum, and status on the right.
pub fn render(frame: &mut Frame, app: &App, dry: &[f32], wet: &[f32], mix: &[f32]) {
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(frame.area());

    let scope_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(main_chunks[0]);

    waveform::render_scope(frame, scope_chunks[0], " Dry ", Color::Cyan, dry);
    waveform::render_scope(frame, scope_chunks[1], " Wet ", Color::Blue, wet);
    waveform::render_scope(frame, scope_chunks[2], " Mix ", Color::Magenta, mix);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(40),
            Constraint::Percentage(20),
        ])
        .split(main_chunks[1]);

    controls::render_controls(frame, right_chunks[0], app);
    spectrum::render_spectrum(frame, right_chunks[1], app.spectrum_data());
    render_status(frame, right_chunks[2], app);
}

fn render_status(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let state = match app.session.state() {
        SessionState::Running => "playing",
        SessionState::Stopped => "stopped",
    };

    let mut lines: Vec<ratatui::text::Line> = vec![
        format!("{} - {}", app.screen.title(), state).into(),
        format!("Sample rate: {:.0} Hz", app.session.sample_rate()).into(),
        "1/2/3 effect | space start/stop | q quit".into(),
    ];
    if let Some(status) = &app.status {
        lines.push(status.clone().into());
    }

    let info =
        Paragraph::new(lines).block(Block::default().title(" Session ").borders(Borders::ALL));
    frame.render_widget(info, area);
}
