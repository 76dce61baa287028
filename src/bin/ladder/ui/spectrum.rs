//! Log-frequency spectrum of the filter output, with the current cutoff
//! marked.

use std::{f32::consts::TAU, sync::Arc};

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

const POINTS: usize = 64;
const FLOOR_DB: f64 = -90.0;
const LOW_HZ: f64 = 20.0;

pub struct Spectrum {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    /// (log10 Hz, FFT bin) for each plotted point.
    bands: Vec<(f64, usize)>,
    /// (log10 Hz, dB) ready for the chart.
    points: Vec<(f64, f64)>,
    high_hz: f64,
}

impl Spectrum {
    pub fn new(size: usize, sample_rate: f32) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(size);
        let span = (size.max(2) - 1) as f32;
        let window = (0..size)
            .map(|i| 0.5 - 0.5 * (TAU * i as f32 / span).cos())
            .collect();

        let nyquist = f64::from(sample_rate) / 2.0;
        let high_hz = nyquist.min(20_000.0).max(LOW_HZ * 2.0);
        let last_bin = (size / 2).saturating_sub(1);
        let bands: Vec<(f64, usize)> = (0..POINTS)
            .map(|i| {
                let t = i as f64 / (POINTS - 1) as f64;
                let hz = LOW_HZ * (high_hz / LOW_HZ).powf(t);
                let bin = (hz * size as f64 / f64::from(sample_rate)).round() as usize;
                (hz.log10(), bin.min(last_bin))
            })
            .collect();
        let points = bands.iter().map(|&(x, _)| (x, FLOOR_DB)).collect();

        Self {
            fft,
            window,
            scratch: vec![Complex::default(); size],
            bands,
            points,
            high_hz,
        }
    }

    /// Recompute from the newest `size` samples. Shorter input is ignored.
    pub fn update(&mut self, samples: &[f32]) {
        let size = self.window.len();
        if samples.len() < size {
            return;
        }
        let recent = &samples[samples.len() - size..];

        for ((slot, &x), &w) in self.scratch.iter_mut().zip(recent).zip(&self.window) {
            *slot = Complex::new(x * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        let scale = 2.0 / size as f32;
        for (point, &(_, bin)) in self.points.iter_mut().zip(&self.bands) {
            let magnitude = self.scratch[bin].norm() * scale;
            point.1 = (20.0 * f64::from(magnitude.max(1e-6)).log10()).max(FLOOR_DB);
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, cutoff_hz: f32) {
        let marker_x = f64::from(cutoff_hz).clamp(LOW_HZ, self.high_hz).log10();
        let marker = [(marker_x, FLOOR_DB), (marker_x, 0.0)];

        let datasets = vec![
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Green))
                .data(&self.points),
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Yellow))
                .data(&marker),
        ];

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .title(format!(" Spectrum  cutoff {cutoff_hz:.0} Hz "))
                    .borders(Borders::ALL),
            )
            .x_axis(
                Axis::default()
                    .bounds([LOW_HZ.log10(), self.high_hz.log10()])
                    .labels(vec!["20", "200", "2k", "20k"])
                    .style(Style::default().fg(Color::DarkGray)),
            )
            .y_axis(
                Axis::default()
                    .bounds([FLOOR_DB, 0.0])
                    .labels(vec!["-90", "-45", "0 dB"])
                    .style(Style::default().fg(Color::DarkGray)),
            );

        frame.render_widget(chart, area);
    }
}
