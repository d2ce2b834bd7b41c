use crate::{
    buffer::AudioBlock,
    dsp::delay::FractionalDelayLine,
    graph::{
        node::{ProcessSpec, Processor},
        tap::TapBank,
    },
    DEFAULT_RAMP_SECONDS,
};

/*
Variable Delay Line
===================

A delay line with several read heads ("taps"), each at its own smoothly
adjustable, possibly fractional, distance into the past.

  let mut delay = VariableDelayLine::new(480, 3);
  delay.prepare(&ProcessSpec::new(48_000.0, 256, 2));
  delay.set_delay_in_samples(240.0, 0, true);   // main output
  delay.set_delay_in_samples(120.5, 1, true);   // extra taps, read via
  delay.set_delay_in_samples(60.0, 2, true);    // tap_output()

Per sample and channel:

  1. push the input
  2. read taps 1..N without moving the read cursor
  3. read tap 0 and move the cursor
  4. tap 0 becomes the output sample

Because the push happens first, a delay of 0 returns the input unchanged.
Every tap's value for each sample of the block is kept until the next block,
so a caller can mix or pan the extra taps however it likes.
*/

pub struct VariableDelayLine {
    line: FractionalDelayLine,
    taps: TapBank,
}

impl VariableDelayLine {
    /// # Panics
    /// If `maximum_delay` or `num_taps` is zero.
    pub fn new(maximum_delay: usize, num_taps: usize) -> Self {
        Self {
            line: FractionalDelayLine::new(maximum_delay),
            taps: TapBank::new(num_taps, maximum_delay, DEFAULT_RAMP_SECONDS),
        }
    }

    pub fn with_ramp_seconds(mut self, ramp_seconds: f32) -> Self {
        self.taps.set_ramp_seconds(ramp_seconds);
        self
    }

    /// Move tap `tap_index` to `delay` samples, ramping unless `force`.
    ///
    /// # Panics
    /// If `tap_index >= num_taps()` or `delay` is outside
    /// `[0, maximum_delay_in_samples())`.
    pub fn set_delay_in_samples(&mut self, delay: f32, tap_index: usize, force: bool) {
        self.taps.set_delay(delay, tap_index, force);
    }

    /// Values tap `tap` produced on `channel` during the last block.
    ///
    /// The slice is `maximum_block_size` long; only the first
    /// `num_samples` of the last block are meaningful.
    pub fn tap_output(&self, channel: usize, tap: usize) -> &[f32] {
        self.taps.output(channel, tap)
    }

    /// Current (possibly mid-ramp) delay of a tap.
    pub fn delay_in_samples(&self, channel: usize, tap: usize) -> f32 {
        self.taps.delay(channel, tap)
    }

    pub fn maximum_delay_in_samples(&self) -> usize {
        self.line.maximum_delay_in_samples()
    }

    pub fn num_taps(&self) -> usize {
        self.taps.num_taps()
    }
}

impl Processor for VariableDelayLine {
    fn prepare(&mut self, spec: &ProcessSpec) {
        self.line.prepare(spec.num_channels);
        self.taps.prepare(spec);

        log::debug!(
            "variable delay prepared: {} Hz, {} channels, block {}, {} taps, max delay {}",
            spec.sample_rate,
            spec.num_channels,
            spec.maximum_block_size,
            self.taps.num_taps(),
            self.line.maximum_delay_in_samples()
        );

        self.reset();
    }

    fn reset(&mut self) {
        self.line.reset();
        self.taps.reset();
    }

    fn process(&mut self, block: &mut AudioBlock<'_>) {
        self.taps.check_block(block.num_channels(), block.num_samples());

        let num_taps = self.taps.num_taps();
        for ch in 0..block.num_channels() {
            for (i, sample) in block.channel_mut(ch).iter_mut().enumerate() {
                self.line.push(ch, *sample);

                for tap in 1..num_taps {
                    let delay = self.taps.next_delay(ch, tap);
                    let value = self.line.pop(ch, delay, false);
                    self.taps.record(ch, tap, i, value);
                }

                let delay = self.taps.next_delay(ch, 0);
                let value = self.line.pop(ch, delay, true);
                self.taps.record(ch, 0, i, value);
                *sample = value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::AudioBuffer;

    fn impulse(num_channels: usize, len: usize) -> AudioBuffer {
        let mut buffer = AudioBuffer::new(num_channels, len);
        for ch in 0..num_channels {
            buffer.set_sample(ch, 0, 1.0);
        }
        buffer
    }

    fn prepared(maximum_delay: usize, num_taps: usize, block: usize) -> VariableDelayLine {
        let mut delay = VariableDelayLine::new(maximum_delay, num_taps);
        delay.prepare(&ProcessSpec::new(48_000.0, block, 2));
        delay
    }

    #[test]
    fn test_maximum_delay_in_samples() {
        for expected in [10, 25, 102] {
            let delay = VariableDelayLine::new(expected, 1);
            assert_eq!(delay.maximum_delay_in_samples(), expected);
        }
    }

    #[test]
    fn test_delay_zero_is_identity() {
        let mut delay = prepared(8, 1, 16);
        let mut buffer = AudioBuffer::new(2, 16);
        for (i, s) in buffer.channel_mut(0).iter_mut().enumerate() {
            *s = i as f32;
        }
        let expected = buffer.channel(0).to_vec();

        delay.process(&mut buffer.as_block());
        assert_eq!(buffer.channel(0), expected.as_slice());
    }

    #[test]
    fn test_integer_delay_moves_impulse() {
        let mut delay = prepared(10, 1, 16);
        delay.set_delay_in_samples(4.0, 0, true);

        let mut buffer = impulse(2, 16);
        delay.process(&mut buffer.as_block());

        for ch in 0..2 {
            for (i, &s) in buffer.channel(ch).iter().enumerate() {
                assert_eq!(s, if i == 4 { 1.0 } else { 0.0 }, "ch {ch} index {i}");
            }
        }
    }

    #[test]
    fn test_history_carries_across_blocks() {
        let mut delay = prepared(10, 1, 4);
        delay.set_delay_in_samples(6.0, 0, true);

        let mut first = impulse(2, 4);
        delay.process(&mut first.as_block());
        assert!(first.channel(0).iter().all(|&s| s == 0.0));

        let mut second = AudioBuffer::new(2, 4);
        delay.process(&mut second.as_block());
        assert_eq!(second.channel(0), &[0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_extra_taps_record_their_own_delay() {
        let mut delay = prepared(10, 3, 16);
        delay.set_delay_in_samples(5.0, 0, true);
        delay.set_delay_in_samples(3.0, 1, true);
        delay.set_delay_in_samples(1.0, 2, true);

        let mut buffer = impulse(2, 16);
        delay.process(&mut buffer.as_block());

        assert_eq!(delay.tap_output(0, 0)[5], 1.0);
        assert_eq!(delay.tap_output(1, 1)[3], 1.0);
        assert_eq!(delay.tap_output(0, 2)[1], 1.0);
        assert_eq!(buffer.channel(0)[5], 1.0);
    }

    #[test]
    fn test_ramped_delay_does_not_jump() {
        let mut delay = VariableDelayLine::new(64, 1).with_ramp_seconds(0.001);
        delay.prepare(&ProcessSpec::new(48_000.0, 64, 1));
        delay.set_delay_in_samples(0.0, 0, true);
        delay.set_delay_in_samples(24.0, 0, false);

        let mut buffer = AudioBuffer::new(1, 1);
        delay.process(&mut buffer.as_block());
        let after_one = delay.delay_in_samples(0, 0);
        assert!(after_one > 0.0 && after_one < 1.0, "delay {after_one}");

        let mut rest = AudioBuffer::new(1, 47);
        delay.process(&mut rest.as_block());
        assert_eq!(delay.delay_in_samples(0, 0), 24.0);
    }

    #[test]
    fn test_reset_clears_history_and_tap_outputs() {
        let mut delay = prepared(10, 2, 8);
        delay.set_delay_in_samples(6.0, 0, true);
        delay.set_delay_in_samples(2.0, 1, true);

        let mut buffer = impulse(2, 4);
        delay.process(&mut buffer.as_block());
        delay.reset();

        assert!(delay.tap_output(0, 1).iter().all(|&s| s == 0.0));

        let mut silent = AudioBuffer::new(2, 8);
        delay.process(&mut silent.as_block());
        assert!(silent.channel(0).iter().all(|&s| s == 0.0));
        assert_eq!(delay.delay_in_samples(0, 0), 6.0);
    }

    #[test]
    #[should_panic(expected = "exceeds prepared maximum")]
    fn test_block_longer_than_prepared_panics() {
        let mut delay = prepared(10, 1, 4);
        let mut buffer = AudioBuffer::new(2, 5);
        delay.process(&mut buffer.as_block());
    }
}
