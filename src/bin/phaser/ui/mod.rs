//! TUI for the phaser demo
//!
//! Shows the output waveform and spectrum, and turns key presses into
//! parameter changes for the audio thread.

mod scope;
mod spectrum;

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    DefaultTerminal, Frame,
};
use rtrb::Consumer;

use tapline::{
    control::{ParamChange, ParamSender},
    dsp::allpass_gain,
};

use super::engine::{EngineSettings, MAX_SWEEP_SAMPLES};
use scope::render_scope;
use spectrum::{render_spectrum, Spectrum};

/// Samples shown by the scope and analysed by the spectrum
pub const SCOPE_LEN: usize = 2048;

const RATE_STEP: f32 = 1.25;
const CUTOFF_STEP: f32 = 1.25;
const GAIN_STEP: f32 = 0.05;
const SWEEP_STEP: f32 = 1.0;

/// Values the UI last sent, for display and for computing the next step
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub lfo_hz: f32,
    pub gain: f32,
    pub cutoff_hz: f32,
    pub sweep: (f32, f32),
    pub sample_rate: f32,
}

impl Settings {
    pub fn from_engine(engine: &EngineSettings, sample_rate: f32) -> Self {
        Self {
            lfo_hz: engine.lfo_hz,
            gain: allpass_gain(engine.allpass_hz, sample_rate),
            cutoff_hz: engine.lowpass_hz,
            sweep: engine.sweep,
            sample_rate,
        }
    }
}

pub struct UiApp {
    audio_rx: Consumer<f32>,
    param_tx: ParamSender,
    settings: Settings,
    samples: Vec<f32>,
    spectrum: Spectrum,
    dropped: usize,
    should_quit: bool,
}

impl UiApp {
    pub fn new(audio_rx: Consumer<f32>, param_tx: ParamSender, settings: Settings) -> Self {
        Self {
            audio_rx,
            param_tx,
            spectrum: Spectrum::new(SCOPE_LEN, settings.sample_rate),
            settings,
            samples: vec![0.0; SCOPE_LEN],
            dropped: 0,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Keep the last SCOPE_LEN samples the audio thread produced
    fn poll_audio(&mut self) {
        let before = self.samples.len();
        while let Ok(sample) = self.audio_rx.pop() {
            self.samples.push(sample);
        }
        if self.samples.len() == before {
            return;
        }

        let excess = self.samples.len().saturating_sub(SCOPE_LEN);
        self.samples.drain(..excess);
        self.spectrum.update(&self.samples);
    }

    fn handle_key(&mut self, key: KeyCode) {
        let s = &mut self.settings;
        let change = match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Up => {
                s.lfo_hz = (s.lfo_hz * RATE_STEP).min(20.0);
                Some(ParamChange::ModulationFrequency { hz: s.lfo_hz })
            }
            KeyCode::Down => {
                s.lfo_hz = (s.lfo_hz / RATE_STEP).max(0.01);
                Some(ParamChange::ModulationFrequency { hz: s.lfo_hz })
            }
            KeyCode::Char('0') => {
                s.lfo_hz = 0.0;
                Some(ParamChange::ModulationFrequency { hz: 0.0 })
            }
            KeyCode::Right => {
                s.gain = (s.gain + GAIN_STEP).min(0.95);
                Some(ParamChange::Gain { gain: s.gain })
            }
            KeyCode::Left => {
                s.gain = (s.gain - GAIN_STEP).max(-0.95);
                Some(ParamChange::Gain { gain: s.gain })
            }
            KeyCode::Char(']') => {
                s.cutoff_hz = (s.cutoff_hz * CUTOFF_STEP).min(s.sample_rate * 0.45);
                Some(ParamChange::Cutoff { hz: s.cutoff_hz })
            }
            KeyCode::Char('[') => {
                s.cutoff_hz = (s.cutoff_hz / CUTOFF_STEP).max(100.0);
                Some(ParamChange::Cutoff { hz: s.cutoff_hz })
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let limit = (MAX_SWEEP_SAMPLES - 1) as f32;
                s.sweep.1 = (s.sweep.1 + SWEEP_STEP).min(limit);
                Some(ParamChange::ModulationRange {
                    lo: s.sweep.0,
                    hi: s.sweep.1,
                })
            }
            KeyCode::Char('-') => {
                s.sweep.1 = (s.sweep.1 - SWEEP_STEP).max(s.sweep.0);
                Some(ParamChange::ModulationRange {
                    lo: s.sweep.0,
                    hi: s.sweep.1,
                })
            }
            _ => None,
        };

        if let Some(change) = change {
            if !self.param_tx.send(change) {
                self.dropped += 1;
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Settings
                Constraint::Min(8),    // Scope
                Constraint::Min(8),    // Spectrum
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let s = &self.settings;
        let mut status = format!(
            " LFO {:.2} Hz   sweep {:.0}..{:.0} samples   allpass gain {:+.2}   lowpass {:.0} Hz",
            s.lfo_hz, s.sweep.0, s.sweep.1, s.gain, s.cutoff_hz
        );
        if self.dropped > 0 {
            status.push_str(&format!("   ({} changes dropped)", self.dropped));
        }
        let settings = Paragraph::new(status)
            .block(Block::default().title(" Phaser ").borders(Borders::ALL));
        frame.render_widget(settings, chunks[0]);

        render_scope(frame, chunks[1], &self.samples);
        render_spectrum(frame, chunks[2], &self.spectrum);

        let help = Paragraph::new(
            " [Q] Quit  [↑/↓] LFO rate  [0] Stop LFO  [←/→] Gain  [[/]] Lowpass  [-/+] Sweep depth",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
