//! Benchmarks for the processors and their primitives.

mod allpass;
mod delay;
mod filter;
mod modulator;

pub use allpass::bench_allpass;
pub use delay::bench_delay;
pub use filter::bench_filter;
pub use modulator::bench_modulator;

use tapline::AudioBuffer;

/// Stereo test signal (sine-ish) of `size` samples per channel.
pub fn test_signal(size: usize) -> AudioBuffer {
    let mut buffer = AudioBuffer::new(crate::NUM_CHANNELS, size);
    for ch in 0..crate::NUM_CHANNELS {
        for (i, sample) in buffer.channel_mut(ch).iter_mut().enumerate() {
            *sample = (i as f32 * 0.1 + ch as f32).sin();
        }
    }
    buffer
}
