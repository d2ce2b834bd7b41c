//! Audio-thread side of the demo: drone source, processor chain and
//! parameter handling.

use rtrb::{Consumer, Producer};

use tapline::{
    control::{ParamChange, ParamReceiver},
    dsp::allpass_gain,
    AudioBuffer, Chain, Lfo, OnePoleFilter, ProcessSpec, Processor, ProcessorExt,
    SubBlockModulator, VariableDelayAllpass, MAX_BLOCK_SIZE,
};

/// Longest allpass delay the sweep may reach
pub const MAX_SWEEP_SAMPLES: usize = 64;

/// Extra taps read alongside the swept one and mixed into the wet signal
const EXTRA_TAPS: usize = 2;

const HIGHPASS_HZ: f32 = 80.0;
const DRONE_LEVEL: f32 = 0.2;

#[derive(Debug, Clone, Copy)]
pub struct EngineSettings {
    pub drone_hz: f32,
    pub update_rate: usize,
    pub sweep: (f32, f32),
    pub lfo_hz: f32,
    pub lowpass_hz: f32,
    /// Allpass corner frequency; converted to a gain once the rate is known
    pub allpass_hz: f32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            drone_hz: 110.0,
            update_rate: 64,
            sweep: (2.0, 24.0),
            lfo_hz: 0.3,
            lowpass_hz: 6_000.0,
            allpass_hz: 2_000.0,
        }
    }
}

type Sweep = SubBlockModulator<Lfo, VariableDelayAllpass>;
type PhaserChain = Chain<Chain<OnePoleFilter, Sweep>, OnePoleFilter>;

/// Naive sawtooth, bright enough for the notches to be audible
struct Drone {
    phase: f32,
    increment: f32,
}

impl Drone {
    fn new(frequency: f32, sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            increment: frequency / sample_rate,
        }
    }

    fn render(&mut self, out: &mut [f32]) {
        for sample in out {
            *sample = (2.0 * self.phase - 1.0) * DRONE_LEVEL;
            self.phase += self.increment;
            if self.phase >= 1.0 {
                self.phase -= 1.0;
            }
        }
    }
}

pub struct Engine {
    drone: Drone,
    chain: PhaserChain,
    dry: AudioBuffer,
    wet: AudioBuffer,
    channels: usize,
    sample_rate: f32,
    param_rx: Consumer<ParamChange>,
    audio_tx: Producer<f32>,
}

impl Engine {
    pub fn new(
        settings: EngineSettings,
        sample_rate: f32,
        channels: usize,
        param_rx: Consumer<ParamChange>,
        audio_tx: Producer<f32>,
    ) -> Self {
        let allpass = VariableDelayAllpass::new(MAX_SWEEP_SAMPLES, 1 + EXTRA_TAPS);
        let mut sweep = SubBlockModulator::new(Lfo::sine(), settings.update_rate)
            .set_processor_to_modulate(allpass);
        sweep.set_modulation_range(settings.sweep.0, settings.sweep.1);
        sweep.set_modulation_frequency(settings.lfo_hz);
        sweep.set_modulation_target(|allpass: &mut VariableDelayAllpass, delay| {
            allpass.set_delay_in_samples(delay, 0, false);
            // Extra taps trail the swept one at half and a quarter of its delay
            allpass.set_delay_in_samples(delay * 0.5, 1, false);
            allpass.set_delay_in_samples(delay * 0.25, 2, false);
        });

        let mut chain = OnePoleFilter::highpass()
            .then(sweep)
            .then(OnePoleFilter::lowpass());
        chain.prepare(&ProcessSpec::new(sample_rate, MAX_BLOCK_SIZE, channels));

        chain.first_mut().first_mut().set_cutoff_frequency(HIGHPASS_HZ, true);
        chain
            .first_mut()
            .second_mut()
            .processor_mut()
            .set_gain(allpass_gain(settings.allpass_hz, sample_rate), true);
        chain.second_mut().set_cutoff_frequency(settings.lowpass_hz, true);

        Self {
            drone: Drone::new(settings.drone_hz, sample_rate),
            chain,
            dry: AudioBuffer::new(channels, MAX_BLOCK_SIZE),
            wet: AudioBuffer::new(channels, MAX_BLOCK_SIZE),
            channels,
            sample_rate,
            param_rx,
            audio_tx,
        }
    }

    /// Fill an interleaved output buffer
    pub fn render(&mut self, data: &mut [f32]) {
        self.apply_param_changes();

        let total_frames = data.len() / self.channels;
        let mut frames_written = 0;

        while frames_written < total_frames {
            let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
            self.render_block(frames);

            let out_off = frames_written * self.channels;
            for i in 0..frames {
                for ch in 0..self.channels {
                    data[out_off + i * self.channels + ch] = self.dry.sample(ch, i);
                }
                // Scope is best effort; drop samples when the UI lags
                let _ = self.audio_tx.push(self.dry.sample(0, i));
            }

            frames_written += frames;
        }
    }

    /// Render `frames` samples into `dry`, mixed with the phased signal
    fn render_block(&mut self, frames: usize) {
        self.drone.render(&mut self.dry.channel_mut(0)[..frames]);
        for ch in 0..self.channels {
            self.wet.channel_mut(ch)[..frames].copy_from_slice(&self.dry.channel(0)[..frames]);
        }

        {
            let mut full = self.wet.as_block();
            let mut block = full.sub_block(0, frames);
            self.chain.process(&mut block);
        }

        let allpass = self.chain.first().second().processor();
        for i in 0..frames {
            let dry = self.dry.sample(0, i);
            for ch in 0..self.channels {
                let taps: f32 = (1..=EXTRA_TAPS).map(|tap| allpass.tap_output(ch, tap)[i]).sum();
                let wet = self.wet.sample(ch, i) + 0.25 * taps;
                self.dry.set_sample(ch, i, 0.5 * (dry + wet));
            }
        }
    }

    fn apply_param_changes(&mut self) {
        let sample_rate = self.sample_rate;
        let chain = &mut self.chain;

        self.param_rx.drain(|change| match change {
            ParamChange::Cutoff { hz } => {
                if hz > 0.0 && hz < sample_rate * 0.5 {
                    chain.second_mut().set_cutoff_frequency(hz, false);
                }
            }
            ParamChange::Gain { gain } => {
                chain
                    .first_mut()
                    .second_mut()
                    .processor_mut()
                    .set_gain(gain.clamp(-0.99, 0.99), false);
            }
            ParamChange::ModulationFrequency { hz } => {
                chain.first_mut().second_mut().set_modulation_frequency(hz.max(0.0));
            }
            ParamChange::ModulationRange { lo, hi } => {
                let limit = (MAX_SWEEP_SAMPLES - 1) as f32;
                chain
                    .first_mut()
                    .second_mut()
                    .set_modulation_range(lo.clamp(0.0, limit), hi.clamp(0.0, limit));
            }
            ParamChange::DelayInSamples { tap, samples } => {
                let allpass = chain.first_mut().second_mut().processor_mut();
                if tap < allpass.num_taps()
                    && (0.0..allpass.maximum_delay_in_samples() as f32).contains(&samples)
                {
                    allpass.set_delay_in_samples(samples, tap, false);
                }
            }
        });
    }
}
