//! Phaser - application builder and runner

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    SampleFormat,
};
use rtrb::RingBuffer;

use tapline::control::param_queue;

use super::engine::{Engine, EngineSettings};
use super::ui::{Settings, UiApp, SCOPE_LEN};

/// Room for a few UI frames of audio for the scope and spectrum
const AUDIO_QUEUE_SIZE: usize = SCOPE_LEN * 8;

/// Pending parameter changes between UI and audio thread
const PARAM_QUEUE_SIZE: usize = 64;

pub struct Phaser {
    settings: EngineSettings,
}

impl Phaser {
    pub fn new() -> Self {
        Self {
            settings: EngineSettings::default(),
        }
    }

    /// Pitch of the sawtooth drone in Hz
    pub fn drone_frequency(mut self, hz: f32) -> Self {
        self.settings.drone_hz = hz;
        self
    }

    /// Audio samples between LFO updates
    pub fn update_rate(mut self, samples: usize) -> Self {
        self.settings.update_rate = samples;
        self
    }

    /// Allpass delay sweep, in samples
    pub fn sweep(mut self, lo: f32, hi: f32) -> Self {
        self.settings.sweep = (lo, hi);
        self
    }

    /// Open the default output device and run until the user quits
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        if config.sample_format() != SampleFormat::F32 {
            return Err(eyre!(
                "output device uses {:?} samples, only f32 is supported",
                config.sample_format()
            ));
        }

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        let (param_tx, param_rx) = param_queue(PARAM_QUEUE_SIZE);
        let (audio_tx, audio_rx) = RingBuffer::<f32>::new(AUDIO_QUEUE_SIZE);

        let mut engine = Engine::new(self.settings, sample_rate, channels, param_rx, audio_tx);
        let initial = Settings::from_engine(&self.settings, sample_rate);

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| engine.render(data),
                |err| log::error!("audio stream error: {err}"),
                None,
            )
            .wrap_err("failed to build output stream")?;

        stream.play().wrap_err("failed to start output stream")?;

        let mut terminal = ratatui::init();
        let result = UiApp::new(audio_rx, param_tx, initial).run(&mut terminal);
        ratatui::restore();

        result
    }
}

impl Default for Phaser {
    fn default() -> Self {
        Self::new()
    }
}
