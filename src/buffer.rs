//! Planar multi-channel sample storage and mutable block views over it.
//!
//! Samples are stored channel-major: channel `c` occupies
//! `data[c * stride .. (c + 1) * stride]`. An [`AudioBlock`] views a range of
//! samples across all channels, and can be narrowed to a sub-block without
//! allocating, which is what the sub-block modulator relies on.

use std::ops::Range;

#[derive(Debug, Clone, Default)]
pub struct AudioBuffer {
    data: Vec<f32>,
    num_channels: usize,
    num_samples: usize,
}

impl AudioBuffer {
    pub fn new(num_channels: usize, num_samples: usize) -> Self {
        Self {
            data: vec![0.0; num_channels * num_samples],
            num_channels,
            num_samples,
        }
    }

    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    pub fn channel(&self, channel: usize) -> &[f32] {
        &self.data[self.channel_range(channel)]
    }

    pub fn channel_mut(&mut self, channel: usize) -> &mut [f32] {
        let range = self.channel_range(channel);
        &mut self.data[range]
    }

    pub fn sample(&self, channel: usize, index: usize) -> f32 {
        self.channel(channel)[index]
    }

    pub fn set_sample(&mut self, channel: usize, index: usize, value: f32) {
        self.channel_mut(channel)[index] = value;
    }

    /// View the whole buffer as a block.
    pub fn as_block(&mut self) -> AudioBlock<'_> {
        AudioBlock {
            data: &mut self.data,
            stride: self.num_samples,
            num_channels: self.num_channels,
            start: 0,
            len: self.num_samples,
        }
    }

    fn channel_range(&self, channel: usize) -> Range<usize> {
        assert!(
            channel < self.num_channels,
            "channel {channel} out of range ({} channels)",
            self.num_channels
        );
        let start = channel * self.num_samples;
        start..start + self.num_samples
    }
}

/// Mutable view over `num_channels` channels of `len` samples each.
pub struct AudioBlock<'a> {
    data: &'a mut [f32],
    stride: usize,
    num_channels: usize,
    start: usize,
    len: usize,
}

impl<'a> AudioBlock<'a> {
    /// Wrap channel-major planar storage.
    ///
    /// `data.len()` must be a multiple of `num_channels`; each channel gets
    /// `data.len() / num_channels` samples.
    pub fn from_planar(data: &'a mut [f32], num_channels: usize) -> Self {
        assert!(num_channels > 0, "a block needs at least one channel");
        assert!(
            data.len() % num_channels == 0,
            "{} samples do not split evenly into {num_channels} channels",
            data.len()
        );

        let stride = data.len() / num_channels;
        Self {
            data,
            stride,
            num_channels,
            start: 0,
            len: stride,
        }
    }

    /// Wrap a single channel.
    pub fn from_mono(data: &'a mut [f32]) -> Self {
        Self::from_planar(data, 1)
    }

    #[inline]
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    #[inline]
    pub fn num_samples(&self) -> usize {
        self.len
    }

    pub fn channel(&self, channel: usize) -> &[f32] {
        let range = self.channel_range(channel);
        &self.data[range]
    }

    pub fn channel_mut(&mut self, channel: usize) -> &mut [f32] {
        let range = self.channel_range(channel);
        &mut self.data[range]
    }

    /// Narrow to `len` samples starting at `start`, relative to this block.
    pub fn sub_block(&mut self, start: usize, len: usize) -> AudioBlock<'_> {
        assert!(
            start + len <= self.len,
            "sub-block {start}..{} exceeds block of {} samples",
            start + len,
            self.len
        );

        AudioBlock {
            data: &mut *self.data,
            stride: self.stride,
            num_channels: self.num_channels,
            start: self.start + start,
            len,
        }
    }

    fn channel_range(&self, channel: usize) -> Range<usize> {
        assert!(
            channel < self.num_channels,
            "channel {channel} out of range ({} channels)",
            self.num_channels
        );
        let begin = channel * self.stride + self.start;
        begin..begin + self.len
    }
}
