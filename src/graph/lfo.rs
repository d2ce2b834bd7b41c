use std::f32::consts::{PI, TAU};

use crate::dsp::lfo::{Waveform, Wavetable, DEFAULT_TABLE_SIZE};

/*
LFO (Low Frequency Oscillator)
==============================

The oscillator a `SubBlockModulator` ticks once per update. It runs at its
own, much lower, sample rate (the audio rate divided by the update rate), so
`prepare` receives that reduced rate rather than the audio rate.

  let mut lfo = Lfo::new(Waveform::Sine);
  lfo.prepare(48_000.0 / 64.0);
  lfo.set_frequency(0.5);             // one sweep every two seconds
  let value = lfo.process_sample(0.0);

Output is the waveform in [-1, 1] added to the input sample, so passing 0.0
yields the bare waveform.

Available Waveforms
-------------------

  Sine     smooth sweep (most common)
  Saw      slow rise, instant reset
  Square   hard jumps between the extremes
  Random   repeatable pseudo-random table

See `dsp/lfo.rs` for the tables themselves.
*/

/// Anything a modulator can tick for new parameter values.
pub trait ModulationSource: Send {
    /// `sample_rate` is the rate `process_sample` will be called at.
    fn prepare(&mut self, sample_rate: f32);

    fn reset(&mut self);

    fn set_frequency(&mut self, frequency_hz: f32);

    fn frequency(&self) -> f32;

    /// Rebuild the waveform table. Allocates; never call from `process`.
    fn set_waveform(&mut self, waveform: Waveform, table_size: usize);

    /// Advance one step, returning the waveform value plus `input`.
    fn process_sample(&mut self, input: f32) -> f32;
}

pub struct Lfo {
    table: Wavetable,
    waveform: Waveform,
    phase: f32,
    increment: f32,
    frequency: f32,
    sample_rate: f32,
}

impl Lfo {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            table: Wavetable::new(waveform, DEFAULT_TABLE_SIZE),
            waveform,
            phase: 0.0,
            increment: 0.0,
            frequency: 0.0,
            sample_rate: 0.0,
        }
    }

    pub fn sine() -> Self {
        Self::new(Waveform::Sine)
    }

    pub fn saw() -> Self {
        Self::new(Waveform::Saw)
    }

    pub fn square() -> Self {
        Self::new(Waveform::Square)
    }

    pub fn random() -> Self {
        Self::new(Waveform::Random)
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn table_size(&self) -> usize {
        self.table.len()
    }

    fn update_increment(&mut self) {
        self.increment = if self.sample_rate > 0.0 {
            TAU * self.frequency / self.sample_rate
        } else {
            0.0
        };
    }
}

impl Default for Lfo {
    fn default() -> Self {
        Self::sine()
    }
}

impl ModulationSource for Lfo {
    fn prepare(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_increment();
        self.reset();
    }

    fn reset(&mut self) {
        self.phase = 0.0;
    }

    fn set_frequency(&mut self, frequency_hz: f32) {
        self.frequency = frequency_hz;
        self.update_increment();
    }

    fn frequency(&self) -> f32 {
        self.frequency
    }

    fn set_waveform(&mut self, waveform: Waveform, table_size: usize) {
        self.table = Wavetable::new(waveform, table_size);
        self.waveform = waveform;
    }

    #[inline]
    fn process_sample(&mut self, input: f32) -> f32 {
        let value = self.table.lookup(self.phase - PI);

        self.phase += self.increment;
        if self.phase >= TAU {
            self.phase = self.phase.rem_euclid(TAU);
        }

        input + value
    }
}

impl ModulationSource for Box<dyn ModulationSource> {
    fn prepare(&mut self, sample_rate: f32) {
        (**self).prepare(sample_rate)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn set_frequency(&mut self, frequency_hz: f32) {
        (**self).set_frequency(frequency_hz)
    }

    fn frequency(&self) -> f32 {
        (**self).frequency()
    }

    fn set_waveform(&mut self, waveform: Waveform, table_size: usize) {
        (**self).set_waveform(waveform, table_size)
    }

    fn process_sample(&mut self, input: f32) -> f32 {
        (**self).process_sample(input)
    }
}
