use crate::{
    buffer::AudioBlock,
    dsp::{lfo::Waveform, modulate::ModulationRange},
    graph::{
        lfo::ModulationSource,
        node::{ProcessSpec, Processor},
        through::Bypass,
    },
};

/*
Sub-Block Modulator
===================

Drives a parameter of another processor from a slow oscillator, updating it
every `update_rate` audio samples instead of every sample.

  let mut phaser = SubBlockModulator::new(Lfo::sine(), 64)
      .set_processor_to_modulate(VariableDelayAllpass::new(32, 1));
  phaser.set_modulation_range(2.0, 20.0);
  phaser.set_modulation_frequency(0.3);
  phaser.set_modulation_target(|allpass, delay| {
      allpass.set_delay_in_samples(delay, 0, false);
  });

Scheduling
----------

Updates land on a fixed grid of audio samples that does not care where host
blocks begin or end. Each block is cut into sub-blocks at the update points:

  update_rate = 100, blocks of 256

  block 1:  |── 100 ──|── 100 ──|─ 56 ─|
                      ▲         ▲
  block 2:  |─ 44 ─|── 100 ──|── 100 ──|12|
                   ▲         ▲         ▲

  ▲ = oscillator ticks, target callback runs with the new value

Each sub-block is run through the processor before the tick that ends it,
so a new value always applies from the next sample onwards.

The oscillator only advances on ticks, so it is prepared at
sample_rate / update_rate. Its output in [-1, 1] is mapped onto
[lo, hi] (see `dsp/modulate.rs`). A frequency of zero parks the target at 0.
*/

/// Callback applying a new modulation value to the processor.
pub type ModulationTarget<P> = Box<dyn FnMut(&mut P, f32) + Send>;

pub struct SubBlockModulator<O, P = Bypass>
where
    O: ModulationSource,
    P: Processor,
{
    oscillator: O,
    processor: P,
    target: Option<ModulationTarget<P>>,
    range: ModulationRange,
    update_rate: usize,
    samples_until_update: usize,
}

impl<O> SubBlockModulator<O, Bypass>
where
    O: ModulationSource,
{
    /// # Panics
    /// If `update_rate` is zero.
    pub fn new(oscillator: O, update_rate: usize) -> Self {
        Self::with_processor(oscillator, Bypass, update_rate)
    }
}

impl<O, P> SubBlockModulator<O, P>
where
    O: ModulationSource,
    P: Processor,
{
    /// # Panics
    /// If `update_rate` is zero.
    pub fn with_processor(oscillator: O, processor: P, update_rate: usize) -> Self {
        assert!(update_rate > 0, "update rate must be at least one sample");

        Self {
            oscillator,
            processor,
            target: None,
            range: ModulationRange::default(),
            update_rate,
            samples_until_update: update_rate,
        }
    }

    /// Swap in a different processor. Any target callback is dropped since
    /// it was written against the old processor type.
    ///
    /// The new processor is prepared on the next `prepare`.
    pub fn set_processor_to_modulate<Q: Processor>(self, processor: Q) -> SubBlockModulator<O, Q> {
        SubBlockModulator {
            oscillator: self.oscillator,
            processor,
            target: None,
            range: self.range,
            update_rate: self.update_rate,
            samples_until_update: self.samples_until_update,
        }
    }

    pub fn set_modulation_target<F>(&mut self, target: F)
    where
        F: FnMut(&mut P, f32) + Send + 'static,
    {
        self.target = Some(Box::new(target));
    }

    pub fn clear_modulation_target(&mut self) {
        self.target = None;
    }

    /// Rebuild the oscillator's table. Allocates.
    pub fn set_modulation_waveform(&mut self, waveform: Waveform, table_size: usize) {
        self.oscillator.set_waveform(waveform, table_size);
    }

    pub fn set_modulation_frequency(&mut self, frequency_hz: f32) {
        self.oscillator.set_frequency(frequency_hz);
    }

    pub fn set_modulation_range(&mut self, lo: f32, hi: f32) {
        self.range = ModulationRange::new(lo, hi);
    }

    pub fn modulation_range(&self) -> ModulationRange {
        self.range
    }

    pub fn update_rate(&self) -> usize {
        self.update_rate
    }

    pub fn processor(&self) -> &P {
        &self.processor
    }

    pub fn processor_mut(&mut self) -> &mut P {
        &mut self.processor
    }

    pub fn oscillator(&self) -> &O {
        &self.oscillator
    }

    pub fn into_processor(self) -> P {
        self.processor
    }

    fn tick(&mut self) {
        let value = if self.oscillator.frequency() != 0.0 {
            self.range.map(self.oscillator.process_sample(0.0))
        } else {
            0.0
        };

        if let Some(target) = self.target.as_mut() {
            target(&mut self.processor, value);
        }
    }
}

impl<O, P> Processor for SubBlockModulator<O, P>
where
    O: ModulationSource,
    P: Processor,
{
    fn prepare(&mut self, spec: &ProcessSpec) {
        let modulation_rate = spec.sample_rate / self.update_rate as f32;
        self.oscillator.prepare(modulation_rate);
        self.processor.prepare(spec);

        log::debug!(
            "sub-block modulator prepared: {} Hz audio, {} Hz modulation, update every {} samples",
            spec.sample_rate,
            modulation_rate,
            self.update_rate
        );

        self.reset();
    }

    fn reset(&mut self) {
        self.oscillator.reset();
        self.processor.reset();
        self.samples_until_update = self.update_rate;
    }

    fn process(&mut self, block: &mut AudioBlock<'_>) {
        let num_samples = block.num_samples();
        let mut pos = 0;

        while pos < num_samples {
            let len = (num_samples - pos).min(self.samples_until_update);
            self.processor.process(&mut block.sub_block(pos, len));

            pos += len;
            self.samples_until_update -= len;

            if self.samples_until_update == 0 {
                self.samples_until_update = self.update_rate;
                self.tick();
            }
        }
    }
}
