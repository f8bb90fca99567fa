//! Parameter slider rows.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

const SLIDER_WIDTH: usize = 20;

/// Render one row per effect parameter plus the balance row, with the
/// selected row highlighted.
pub fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let params = app.session.controls().params();
    let mut lines: Vec<Line> = Vec::with_capacity(params.len() + 1);

    for (i, handle) in params.iter().enumerate() {
        let spec = handle.spec();
        lines.push(control_line(
            spec.name,
            handle.target(),
            spec.min,
            spec.max,
            spec.units,
            i == app.selected,
        ));
    }

    lines.push(control_line(
        "balance",
        app.session.balance(),
        0.0,
        1.0,
        "",
        app.selected == params.len(),
    ));

    let block = Block::default()
        .title(format!(" {} ", app.session.controls().label()))
        .borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn control_line(
    name: &str,
    value: f32,
    min: f32,
    max: f32,
    units: &str,
    selected: bool,
) -> Line<'static> {
    let span = max - min;
    let fraction = if span > 0.0 {
        ((value - min) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (fraction * SLIDER_WIDTH as f32).round() as usize;

    let bar: String = std::iter::repeat('█')
        .take(filled)
        .chain(std::iter::repeat('░').take(SLIDER_WIDTH - filled))
        .collect();

    let style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let marker = if selected { "> " } else { "  " };
    let label = if units.is_empty() {
        format!("{marker}{name:<18} {value:>9.2} ")
    } else {
        format!("{marker}{name:<18} {value:>9.2} {units:<4} ")
    };

    Line::from(vec![Span::styled(label, style), Span::styled(bar, style)])
}
