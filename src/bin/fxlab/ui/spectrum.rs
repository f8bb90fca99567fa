//! Spectrum panel fed by the mix tap.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// FFT of the mix window, reduced to log-spaced display bins.
pub struct SpectrumAnalyzer {
    window: Vec<f32>,
    bins: Vec<(f64, usize)>, // (display frequency, fft bin index)
    fft: std::sync::Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(window_len: usize, sample_rate: f32, num_bins: usize) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(window_len);

        // Hann window
        let window: Vec<f32> = (0..window_len)
            .map(|i| {
                let denom = (window_len - 1).max(1) as f32;
                0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos())
            })
            .collect();

        // Log-spaced bins from 20 Hz to Nyquist (capped at 20 kHz)
        let max_freq = (sample_rate as f64 / 2.0).min(20_000.0);
        let min_freq = 20.0f64;
        let ratio = max_freq / min_freq;
        let half = (window_len / 2).max(1);
        let bins: Vec<(f64, usize)> = (0..num_bins)
            .map(|i| {
                let t = i as f64 / (num_bins - 1).max(1) as f64;
                let freq = min_freq * ratio.powf(t);
                let index =
                    ((freq * window_len as f64 / sample_rate as f64).round() as usize).min(half - 1);
                (freq, index)
            })
            .collect();

        let spectrum = bins.iter().map(|&(freq, _)| (freq, -120.0)).collect();

        Self {
            window,
            bins,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); window_len],
            spectrum,
        }
    }

    /// Recompute from a full mix window; partial windows (session just
    /// started) are skipped and the previous spectrum stays up.
    pub fn maybe_update(&mut self, samples: &[f32]) {
        if samples.len() != self.window.len() {
            return;
        }

        for (slot, (&sample, &w)) in self
            .scratch
            .iter_mut()
            .zip(samples.iter().zip(self.window.iter()))
        {
            slot.re = sample * w;
            slot.im = 0.0;
        }
        self.fft.process(&mut self.scratch);

        for (slot, &(freq, index)) in self.spectrum.iter_mut().zip(self.bins.iter()) {
            let bin = self.scratch[index];
            let power = (bin.re * bin.re + bin.im * bin.im).max(1e-12);
            *slot = (freq, 10.0 * (power as f64).log10());
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, data: &[(f64, f64)]) {
    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(data);

    let max_freq = data.iter().map(|(f, _)| *f).fold(0.0, f64::max).max(1.0);

    let chart = Chart::new(vec![dataset])
        .block(Block::default().title(" Spectrum ").borders(Borders::ALL))
        .x_axis(Axis::default().bounds([0.0, max_freq]))
        .y_axis(
            Axis::default()
                .bounds([-100.0, 10.0])
                .labels(["-100", "-60", "-20", "0"]),
        );

    frame.render_widget(chart, area);
}
