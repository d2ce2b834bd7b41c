//! Per-channel, per-tap bookkeeping shared by the delay-based processors.

use crate::{dsp::smoothing::SmoothedParameter, graph::node::ProcessSpec};

/// One read position into a delay line for one channel.
///
/// `output` holds the value the tap produced for every sample of the most
/// recent block.
#[derive(Debug, Clone)]
pub struct Tap {
    delay: SmoothedParameter,
    output: Vec<f32>,
}

impl Tap {
    fn new(ramp_seconds: f32) -> Self {
        Self {
            delay: SmoothedParameter::new(0.0).with_ramp_seconds(ramp_seconds),
            output: Vec::new(),
        }
    }
}

/// `taps[channel][tap]`, plus the bounds every delay request is checked
/// against.
#[derive(Debug, Clone)]
pub struct TapBank {
    taps: Vec<Vec<Tap>>,
    num_taps: usize,
    maximum_delay: usize,
    ramp_seconds: f32,
    maximum_block_size: usize,
    requested: Vec<f32>,
}

impl TapBank {
    pub fn new(num_taps: usize, maximum_delay: usize, ramp_seconds: f32) -> Self {
        assert!(num_taps > 0, "a delay needs at least one tap");

        Self {
            taps: Vec::new(),
            num_taps,
            maximum_delay,
            ramp_seconds,
            maximum_block_size: 0,
            requested: vec![0.0; num_taps],
        }
    }

    pub fn set_ramp_seconds(&mut self, ramp_seconds: f32) {
        self.ramp_seconds = ramp_seconds;
        for tap in self.taps.iter_mut().flatten() {
            tap.delay.set_ramp_seconds(ramp_seconds);
        }
    }

    pub fn prepare(&mut self, spec: &ProcessSpec) {
        let ramp_seconds = self.ramp_seconds;
        let num_taps = self.num_taps;

        self.taps.resize_with(spec.num_channels, Vec::new);
        for channel in &mut self.taps {
            channel.resize_with(num_taps, || Tap::new(ramp_seconds));
            for (tap, &delay) in channel.iter_mut().zip(&self.requested) {
                tap.delay.prepare(spec.sample_rate);
                tap.delay.set_target(delay, true);
                tap.output.resize(spec.maximum_block_size, 0.0);
            }
        }
        self.maximum_block_size = spec.maximum_block_size;
    }

    pub fn reset(&mut self) {
        for tap in self.taps.iter_mut().flatten() {
            tap.delay.reset();
            tap.output.fill(0.0);
        }
    }

    /// # Panics
    /// If `tap_index` is not a valid tap or `delay` lies outside
    /// `[0, maximum_delay)`.
    pub fn set_delay(&mut self, delay: f32, tap_index: usize, force: bool) {
        assert!(
            tap_index < self.num_taps,
            "tap {tap_index} out of range ({} taps)",
            self.num_taps
        );
        assert!(
            delay >= 0.0 && delay < self.maximum_delay as f32,
            "delay {delay} outside [0, {})",
            self.maximum_delay
        );

        self.requested[tap_index] = delay;
        for channel in &mut self.taps {
            channel[tap_index].delay.set_target(delay, force);
        }
    }

    /// Check a block against the prepared layout.
    pub fn check_block(&self, num_channels: usize, num_samples: usize) {
        assert!(
            num_channels <= self.taps.len(),
            "block has {num_channels} channels, prepared for {}",
            self.taps.len()
        );
        assert!(
            num_samples <= self.maximum_block_size,
            "block of {num_samples} samples exceeds prepared maximum of {}",
            self.maximum_block_size
        );
    }

    /// Advance the delay ramp of one tap and return the delay for this sample.
    #[inline]
    pub fn next_delay(&mut self, channel: usize, tap: usize) -> f32 {
        self.taps[channel][tap].delay.advance()
    }

    #[inline]
    pub fn record(&mut self, channel: usize, tap: usize, index: usize, value: f32) {
        self.taps[channel][tap].output[index] = value;
    }

    pub fn output(&self, channel: usize, tap: usize) -> &[f32] {
        &self.taps[channel][tap].output
    }

    pub fn delay(&self, channel: usize, tap: usize) -> f32 {
        self.taps[channel][tap].delay.current()
    }

    pub fn num_taps(&self) -> usize {
        self.num_taps
    }

    pub fn maximum_delay(&self) -> usize {
        self.maximum_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prepared(num_taps: usize) -> TapBank {
        let mut bank = TapBank::new(num_taps, 10, 0.0);
        bank.prepare(&ProcessSpec::new(48_000.0, 32, 2));
        bank
    }

    #[test]
    fn test_prepare_sizes_outputs() {
        let bank = prepared(3);
        assert_eq!(bank.output(1, 2).len(), 32);
        assert_eq!(bank.num_taps(), 3);
    }

    #[test]
    fn test_set_delay_applies_to_all_channels() {
        let mut bank = prepared(2);
        bank.set_delay(4.0, 1, true);
        assert_eq!(bank.delay(0, 1), 4.0);
        assert_eq!(bank.delay(1, 1), 4.0);
        assert_eq!(bank.delay(0, 0), 0.0);
    }

    #[test]
    fn test_requested_delay_survives_prepare() {
        let mut bank = prepared(1);
        bank.set_delay(7.0, 0, true);
        bank.prepare(&ProcessSpec::new(44_100.0, 64, 3));
        assert_eq!(bank.delay(2, 0), 7.0);
    }

    #[test]
    #[should_panic(expected = "tap 2 out of range")]
    fn test_tap_index_out_of_range_panics() {
        let mut bank = prepared(2);
        bank.set_delay(1.0, 2, false);
    }

    #[test]
    #[should_panic(expected = "outside [0, 10)")]
    fn test_delay_at_maximum_panics() {
        let mut bank = prepared(2);
        bank.set_delay(10.0, 0, false);
    }

    #[test]
    #[should_panic(expected = "exceeds prepared maximum")]
    fn test_oversized_block_panics() {
        let bank = prepared(1);
        bank.check_block(2, 33);
    }
}
