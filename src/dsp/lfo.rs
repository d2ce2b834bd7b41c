//! Low frequency oscillator waveforms.

use std::f32::consts::PI;

use rand::{rngs::StdRng, Rng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Control-Rate Oscillators
========================

An LFO here is a lookup table holding one period of a waveform, read with a
phase accumulator. The table spans x in [-π, π]; the oscillator walks phase
through [0, 2π) and reads the table at (phase - π). Between table points the
value is linearly interpolated, so a coarse table (256 points by default) is
enough for sub-audio rates.

Shapes
------

  Sine     sin(x)                       smooth sweeps
  Saw      x / π                        rises from -1 to +1 once per period
  Square   -1 for x < 0, +1 otherwise   hard switching
  Random   a fixed table of uniform     stepped-looking but repeatable
           values in [-1, 1]            "random" motion

Building the table allocates, so it only happens when the waveform is chosen,
never while samples are being produced.

Rates
-----

The modulator driving an LFO usually ticks it far below the audio rate. With
an update every 64 samples at 48 kHz the oscillator itself runs at 750 Hz,
which is still plenty for a 0.1 - 10 Hz sweep:

    oscillator_rate = sample_rate / update_rate
    increment       = 2π · frequency / oscillator_rate
*/

pub const DEFAULT_TABLE_SIZE: usize = 256;

/// Seed used for the `Random` table so repeated runs produce the same motion.
const RANDOM_TABLE_SEED: u64 = 0x5EED_7A95;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Saw,
    Square,
    Random,
}

/// One period of a waveform sampled on [-π, π].
#[derive(Debug, Clone)]
pub struct Wavetable {
    points: Vec<f32>,
}

impl Wavetable {
    pub fn new(waveform: Waveform, size: usize) -> Self {
        assert!(size >= 2, "a wavetable needs at least two points, got {size}");

        let step = 2.0 * PI / (size - 1) as f32;
        let points = match waveform {
            Waveform::Sine => (0..size).map(|i| (-PI + i as f32 * step).sin()).collect(),
            Waveform::Saw => (0..size).map(|i| (-PI + i as f32 * step) / PI).collect(),
            Waveform::Square => (0..size)
                .map(|i| if -PI + i as f32 * step < 0.0 { -1.0 } else { 1.0 })
                .collect(),
            Waveform::Random => {
                let mut rng = StdRng::seed_from_u64(RANDOM_TABLE_SEED);
                (0..size).map(|_| rng.gen_range(-1.0..=1.0)).collect()
            }
        };

        Self { points }
    }

    /// Interpolated value at `x`, expected in [-π, π].
    #[inline]
    pub fn lookup(&self, x: f32) -> f32 {
        let last = self.points.len() - 1;
        let position = ((x + PI) / (2.0 * PI) * last as f32).clamp(0.0, last as f32);
        let index = (position as usize).min(last - 1);
        let frac = position - index as f32;

        let a = self.points[index];
        a + frac * (self.points[index + 1] - a)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
