use crate::buffer::AudioBlock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything a processor needs to size itself before audio starts
///
/// - sample_rate: Audio sample rate (e.g., 48000.0)
/// - maximum_block_size: Longest block `process` will ever see
/// - num_channels: Channel count of every block
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    pub sample_rate: f32,
    pub maximum_block_size: usize,
    pub num_channels: usize,
}

impl ProcessSpec {
    pub fn new(sample_rate: f32, maximum_block_size: usize, num_channels: usize) -> Self {
        Self {
            sample_rate,
            maximum_block_size,
            num_channels,
        }
    }
}

impl Default for ProcessSpec {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            maximum_block_size: crate::MAX_BLOCK_SIZE,
            num_channels: 2,
        }
    }
}

/// Core trait for block processors
///
/// `prepare` may allocate; `reset` and `process` must not.
pub trait Processor: Send {
    /// Size internal storage for `spec` and reset.
    fn prepare(&mut self, spec: &ProcessSpec);

    /// Zero recursive state and settle parameter ramps, keeping allocations.
    fn reset(&mut self);

    /// Process one block in place.
    fn process(&mut self, block: &mut AudioBlock<'_>);
}

/// Allow boxed processors to be used as processors (for dynamic dispatch)
impl Processor for Box<dyn Processor> {
    fn prepare(&mut self, spec: &ProcessSpec) {
        (**self).prepare(spec)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn process(&mut self, block: &mut AudioBlock<'_>) {
        (**self).process(block)
    }
}
