//! Spectrum widget
//!
//! Hann-windowed FFT of the latest output, plotted against log frequency so
//! the sweeping allpass notches move evenly across the chart.

use std::{f32::consts::PI, sync::Arc};

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// Points plotted between 20 Hz and Nyquist
const DISPLAY_POINTS: usize = 96;

/// How much of the previous frame survives into the next (visual decay)
const DECAY: f64 = 0.6;

const FLOOR_DB: f64 = -100.0;

pub struct Spectrum {
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    bins: Vec<usize>,
    /// (log10 frequency, magnitude dB)
    points: Vec<(f64, f64)>,
}

impl Spectrum {
    pub fn new(len: usize, sample_rate: f32) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(len);

        let window = (0..len)
            .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / (len - 1) as f32).cos()))
            .collect();

        let nyquist = (sample_rate / 2.0) as f64;
        let (lo, hi) = (20.0f64.log10(), nyquist.log10());
        let mut bins = Vec::with_capacity(DISPLAY_POINTS);
        let mut points = Vec::with_capacity(DISPLAY_POINTS);
        for i in 0..DISPLAY_POINTS {
            let log_freq = lo + (hi - lo) * i as f64 / (DISPLAY_POINTS - 1) as f64;
            let bin = (10f64.powf(log_freq) * len as f64 / sample_rate as f64).round() as usize;
            bins.push(bin.clamp(1, len / 2));
            points.push((log_freq, FLOOR_DB));
        }

        Self {
            window,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); len],
            bins,
            points,
        }
    }

    /// Analyse `samples`; ignored unless it matches the FFT length
    pub fn update(&mut self, samples: &[f32]) {
        if samples.len() != self.window.len() {
            return;
        }

        for ((bin, &sample), &w) in self.scratch.iter_mut().zip(samples).zip(&self.window) {
            *bin = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        let scale = 2.0 / self.window.len() as f32;
        for (point, &bin) in self.points.iter_mut().zip(&self.bins) {
            let magnitude = (self.scratch[bin].norm() * scale).max(1e-6);
            let db = (20.0 * magnitude.log10()) as f64;
            point.1 = (DECAY * point.1 + (1.0 - DECAY) * db).max(FLOOR_DB);
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    fn frequency_bounds(&self) -> [f64; 2] {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => [first.0, last.0],
            _ => [0.0, 1.0],
        }
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &Spectrum) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum.points());

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds(spectrum.frequency_bounds())
                .labels(vec!["20", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 0.0])
                .labels(vec!["-100", "-50", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
