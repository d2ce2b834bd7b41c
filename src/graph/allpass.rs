use crate::{
    buffer::AudioBlock,
    dsp::{delay::FractionalDelayLine, smoothing::SmoothedParameter},
    graph::{
        node::{ProcessSpec, Processor},
        tap::TapBank,
    },
    DEFAULT_RAMP_SECONDS,
};

/*
Delay-Based Allpass
===================

An allpass passes every frequency at the same level and only shifts phase.
Chain a few, sweep their delay or gain with an LFO and mix with the dry
signal, and the moving notches give the classic phaser sound.

Topology (first order, D samples of delay, gain g):

            ┌──────────────── ×g ───────────────┐
            │                                   ▼
  x ──▶ (+) ──▶ v ──▶ [ z^-D ] ──▶ d ──────────(+) ──▶ out
         ▲                         │
         └──────── ×(-g) ──────────┘

  d   = v[n - D]
  v   = x - g·d
  out = d + g·v

  H(z) = (g + z^-D) / (1 + g·z^-D)        |H| = 1 everywhere

With D = 1 and g from `allpass_gain(fc, fs)` the phase passes -90° exactly
at fc. Larger D gives a comb of phase wraps, D of them up to Nyquist.

Because the delay line is read before the new v is written, a delay of 1
means the previous v. Below 1 the read blends the v being written with the
previous one, so that v is solved from the loop equation instead:

  d = (1 - f)·v + f·v[n-1]    ⇒    v = (x - g·f·v[n-1]) / (1 + g·(1 - f))

A delay of exactly 0 therefore passes x through unchanged.

Extra taps read the same line at other delays without moving its cursor;
their values (not part of the output) are kept per block in `tap_output`.
*/

pub struct VariableDelayAllpass {
    line: FractionalDelayLine,
    taps: TapBank,
    gain: Vec<SmoothedParameter>,
    requested_gain: f32,
    ramp_seconds: f32,
}

impl VariableDelayAllpass {
    /// # Panics
    /// If `maximum_delay` or `num_taps` is zero.
    pub fn new(maximum_delay: usize, num_taps: usize) -> Self {
        Self {
            // One extra sample of history so v[n-1] stays readable at any delay.
            line: FractionalDelayLine::new(maximum_delay + 1),
            taps: TapBank::new(num_taps, maximum_delay, DEFAULT_RAMP_SECONDS),
            gain: Vec::new(),
            requested_gain: 0.0,
            ramp_seconds: DEFAULT_RAMP_SECONDS,
        }
    }

    /// Ramp length for both gain and delay changes.
    pub fn with_ramp_seconds(mut self, ramp_seconds: f32) -> Self {
        self.ramp_seconds = ramp_seconds;
        self.taps.set_ramp_seconds(ramp_seconds);
        for gain in &mut self.gain {
            gain.set_ramp_seconds(ramp_seconds);
        }
        self
    }

    /// Set the allpass coefficient. Values are expected within (-1, 1).
    pub fn set_gain(&mut self, gain: f32, force: bool) {
        self.requested_gain = gain;
        for channel_gain in &mut self.gain {
            channel_gain.set_target(gain, force);
        }
    }

    /// Last requested gain.
    pub fn gain(&self) -> f32 {
        self.requested_gain
    }

    /// # Panics
    /// If `tap_index >= num_taps()` or `delay` is outside
    /// `[0, maximum_delay_in_samples())`.
    pub fn set_delay_in_samples(&mut self, delay: f32, tap_index: usize, force: bool) {
        self.taps.set_delay(delay, tap_index, force);
    }

    /// Values tap `tap` read on `channel` during the last block. Tap 0 holds
    /// the delayed feedback signal `d`.
    pub fn tap_output(&self, channel: usize, tap: usize) -> &[f32] {
        self.taps.output(channel, tap)
    }

    pub fn delay_in_samples(&self, channel: usize, tap: usize) -> f32 {
        self.taps.delay(channel, tap)
    }

    pub fn maximum_delay_in_samples(&self) -> usize {
        self.taps.maximum_delay()
    }

    pub fn num_taps(&self) -> usize {
        self.taps.num_taps()
    }
}

impl Processor for VariableDelayAllpass {
    fn prepare(&mut self, spec: &ProcessSpec) {
        self.line.prepare(spec.num_channels);
        self.taps.prepare(spec);

        let ramp_seconds = self.ramp_seconds;
        self.gain.resize_with(spec.num_channels, || {
            SmoothedParameter::new(0.0).with_ramp_seconds(ramp_seconds)
        });
        for gain in &mut self.gain {
            gain.prepare(spec.sample_rate);
            gain.set_target(self.requested_gain, true);
        }

        log::debug!(
            "allpass prepared: {} Hz, {} channels, block {}, {} taps, max delay {}, gain {}",
            spec.sample_rate,
            spec.num_channels,
            spec.maximum_block_size,
            self.taps.num_taps(),
            self.taps.maximum_delay(),
            self.requested_gain
        );

        self.reset();
    }

    fn reset(&mut self) {
        self.line.reset();
        self.taps.reset();
        for gain in &mut self.gain {
            gain.reset();
        }
    }

    fn process(&mut self, block: &mut AudioBlock<'_>) {
        self.taps.check_block(block.num_channels(), block.num_samples());

        let num_taps = self.taps.num_taps();
        for ch in 0..block.num_channels() {
            for (i, sample) in block.channel_mut(ch).iter_mut().enumerate() {
                let x = *sample;
                let g = self.gain[ch].advance();
                let previous = self.line.pop(ch, 1.0, false);

                let delay = self.taps.next_delay(ch, 0);
                let (delayed, v) = if delay >= 1.0 {
                    let delayed = self.line.pop(ch, delay, false);
                    (delayed, x - delayed * g)
                } else {
                    let v = (x - g * delay * previous) / (1.0 + g * (1.0 - delay));
                    (v + delay * (previous - v), v)
                };

                for tap in 1..num_taps {
                    let tap_delay = self.taps.next_delay(ch, tap);
                    let value = if tap_delay >= 1.0 {
                        self.line.pop(ch, tap_delay, false)
                    } else {
                        v + tap_delay * (previous - v)
                    };
                    self.taps.record(ch, tap, i, value);
                }

                self.line.advance(ch);
                self.line.push(ch, v);

                self.taps.record(ch, 0, i, delayed);
                *sample = delayed + v * g;
            }
        }
    }
}
