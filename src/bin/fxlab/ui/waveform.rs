//! Rolling waveform widget, one per tap point.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Render one tap's rolling window as a filled line chart.
pub fn render_scope(frame: &mut Frame, area: Rect, title: &str, color: Color, samples: &[f32]) {
    let block = Block::default().title(title).borders(Borders::ALL);

    if samples.is_empty() {
        frame.render_widget(block, area);
        return;
    }

    // Downsample to roughly the chart width; Braille gives 2 dots/cell.
    let target_w = (area.width.max(1) as usize) * 2;
    let step = samples.len().div_ceil(target_w).max(1);
    let data: Vec<(f64, f64)> = samples
        .iter()
        .step_by(step)
        .enumerate()
        .map(|(i, &sample)| ((i * step) as f64, sample as f64))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, samples.len() as f64])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
