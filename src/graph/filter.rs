use crate::{
    buffer::AudioBlock,
    dsp::{
        filter::{FilterType, OnePoleCoefficients},
        smoothing::SmoothedParameter,
    },
    graph::node::{ProcessSpec, Processor},
    DEFAULT_RAMP_SECONDS,
};

/*
One-Pole Filter Node
====================

Gentle 6 dB/octave low-pass and high-pass filters. Typical uses are taming
the top end of a feedback path, removing DC or rumble before a modulated
delay, or as tone controls in a phaser/chorus chain.

  let mut tone = OnePoleFilter::lowpass();
  tone.prepare(&ProcessSpec::new(48_000.0, 512, 2));
  tone.set_cutoff_frequency(4_000.0, true);

Cutoff Changes
--------------

The recursion is only click-free if its coefficients move smoothly. Rather
than smoothing the cutoff and recomputing exp() per sample, each coefficient
(b0, b1, a1) ramps linearly from its old to its new value and is fetched
fresh for every sample:

  set_cutoff_frequency(fc, false)   ramp over the configured time
  set_cutoff_frequency(fc, true)    snap immediately (initialisation)

Every channel owns its own set of ramps and state registers, so channels
never influence each other.

See `dsp/filter.rs` for the coefficient formulas.
*/

#[derive(Debug, Clone)]
struct ChannelState {
    b0: SmoothedParameter,
    b1: SmoothedParameter,
    a1: SmoothedParameter,
    z_pole: f32,
    z_zero: f32,
}

impl ChannelState {
    fn new(ramp_seconds: f32) -> Self {
        let passthrough = OnePoleCoefficients::PASSTHROUGH;
        Self {
            b0: SmoothedParameter::new(passthrough.b0).with_ramp_seconds(ramp_seconds),
            b1: SmoothedParameter::new(passthrough.b1).with_ramp_seconds(ramp_seconds),
            a1: SmoothedParameter::new(passthrough.a1).with_ramp_seconds(ramp_seconds),
            z_pole: 0.0,
            z_zero: 0.0,
        }
    }

    fn set_coefficients(&mut self, coefficients: OnePoleCoefficients, immediate: bool) {
        self.b0.set_target(coefficients.b0, immediate);
        self.b1.set_target(coefficients.b1, immediate);
        self.a1.set_target(coefficients.a1, immediate);
    }

    fn set_ramp_seconds(&mut self, ramp_seconds: f32) {
        self.b0.set_ramp_seconds(ramp_seconds);
        self.b1.set_ramp_seconds(ramp_seconds);
        self.a1.set_ramp_seconds(ramp_seconds);
    }

    fn reset(&mut self) {
        self.b0.reset();
        self.b1.reset();
        self.a1.reset();
        self.z_pole = 0.0;
        self.z_zero = 0.0;
    }
}

pub struct OnePoleFilter {
    filter_type: FilterType,
    channels: Vec<ChannelState>,
    sample_rate: f32,
    cutoff_hz: Option<f32>,
    ramp_seconds: f32,
}

impl OnePoleFilter {
    pub fn new(filter_type: FilterType) -> Self {
        Self {
            filter_type,
            channels: Vec::new(),
            sample_rate: 0.0,
            cutoff_hz: None,
            ramp_seconds: DEFAULT_RAMP_SECONDS,
        }
    }

    pub fn lowpass() -> Self {
        Self::new(FilterType::LowPass)
    }

    pub fn highpass() -> Self {
        Self::new(FilterType::HighPass)
    }

    /// Length of the coefficient ramp used by non-forced cutoff changes.
    pub fn with_ramp_seconds(mut self, ramp_seconds: f32) -> Self {
        self.ramp_seconds = ramp_seconds;
        for channel in &mut self.channels {
            channel.set_ramp_seconds(ramp_seconds);
        }
        self
    }

    /// Move the cutoff to `cutoff_hz`, ramping the coefficients unless
    /// `force` is set.
    ///
    /// # Panics
    /// If called before `prepare`, since there is no sample rate yet.
    pub fn set_cutoff_frequency(&mut self, cutoff_hz: f32, force: bool) {
        assert!(
            self.sample_rate > 0.0,
            "set_cutoff_frequency called before prepare"
        );

        let coefficients =
            OnePoleCoefficients::for_type(self.filter_type, cutoff_hz, self.sample_rate);
        for channel in &mut self.channels {
            channel.set_coefficients(coefficients, force);
        }
        self.cutoff_hz = Some(cutoff_hz);
    }

    /// Last requested cutoff, if any.
    pub fn cutoff_frequency(&self) -> Option<f32> {
        self.cutoff_hz
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    /// Coefficients `channel` will use for its next sample, before the ramp
    /// advances.
    pub fn coefficients(&self, channel: usize) -> OnePoleCoefficients {
        let state = &self.channels[channel];
        OnePoleCoefficients {
            b0: state.b0.current(),
            b1: state.b1.current(),
            a1: state.a1.current(),
        }
    }

    fn target_coefficients(&self) -> OnePoleCoefficients {
        match self.cutoff_hz {
            Some(cutoff_hz) => {
                OnePoleCoefficients::for_type(self.filter_type, cutoff_hz, self.sample_rate)
            }
            None => OnePoleCoefficients::PASSTHROUGH,
        }
    }
}

impl Processor for OnePoleFilter {
    fn prepare(&mut self, spec: &ProcessSpec) {
        self.sample_rate = spec.sample_rate;

        let ramp_seconds = self.ramp_seconds;
        self.channels
            .resize_with(spec.num_channels, || ChannelState::new(ramp_seconds));

        let coefficients = self.target_coefficients();
        for channel in &mut self.channels {
            channel.b0.prepare(spec.sample_rate);
            channel.b1.prepare(spec.sample_rate);
            channel.a1.prepare(spec.sample_rate);
            channel.set_coefficients(coefficients, true);
        }

        log::debug!(
            "one-pole {:?} prepared: {} Hz, {} channels, cutoff {:?}",
            self.filter_type,
            spec.sample_rate,
            spec.num_channels,
            self.cutoff_hz
        );

        self.reset();
    }

    fn reset(&mut self) {
        for channel in &mut self.channels {
            channel.reset();
        }
    }

    fn process(&mut self, block: &mut AudioBlock<'_>) {
        assert!(
            block.num_channels() <= self.channels.len(),
            "block has {} channels, filter prepared for {}",
            block.num_channels(),
            self.channels.len()
        );

        for ch in 0..block.num_channels() {
            let state = &mut self.channels[ch];
            let samples = block.channel_mut(ch);

            match self.filter_type {
                FilterType::LowPass => {
                    for sample in samples.iter_mut() {
                        let b0 = state.b0.advance();
                        let a1 = state.a1.advance();
                        state.z_pole = *sample * b0 + state.z_pole * a1;
                        *sample = state.z_pole;
                    }
                }
                FilterType::HighPass => {
                    for sample in samples.iter_mut() {
                        let b0 = state.b0.advance();
                        let b1 = state.b1.advance();
                        let a1 = state.a1.advance();
                        let input = *sample;
                        state.z_pole = input * b0 + state.z_zero * b1 + state.z_pole * a1;
                        state.z_zero = input;
                        *sample = state.z_pole;
                    }
                }
            }
        }
    }
}
