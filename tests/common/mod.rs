#![allow(dead_code)]

use rustfft::{num_complex::Complex, FftPlanner};
use tapline::{AudioBuffer, ProcessSpec, Processor};

pub const SAMPLE_RATE: f32 = 48_000.0;

/// Prepare `processor` for one channel of `len` samples, let `configure`
/// set it up, then feed it a unit impulse.
pub fn impulse_response<P, F>(processor: &mut P, len: usize, configure: F) -> Vec<f32>
where
    P: Processor,
    F: FnOnce(&mut P),
{
    impulse_response_at(processor, SAMPLE_RATE, len, configure)
}

/// `impulse_response` at an arbitrary sample rate.
pub fn impulse_response_at<P, F>(
    processor: &mut P,
    sample_rate: f32,
    len: usize,
    configure: F,
) -> Vec<f32>
where
    P: Processor,
    F: FnOnce(&mut P),
{
    processor.prepare(&ProcessSpec::new(sample_rate, len, 1));
    configure(processor);

    let mut buffer = AudioBuffer::new(1, len);
    buffer.set_sample(0, 0, 1.0);
    processor.process(&mut buffer.as_block());
    buffer.channel(0).to_vec()
}

/// Forward FFT of `signal`, computed in f64.
pub fn spectrum(signal: &[f32]) -> Vec<Complex<f64>> {
    let mut bins: Vec<Complex<f64>> = signal
        .iter()
        .map(|&s| Complex::new(s as f64, 0.0))
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(bins.len());
    fft.process(&mut bins);
    bins
}

pub fn magnitude_db(bin: Complex<f64>) -> f64 {
    20.0 * bin.norm().log10()
}

/// Centre frequency of FFT bin `index` for a transform of `len` points.
pub fn bin_frequency(index: usize, len: usize) -> f32 {
    bin_frequency_at(index, len, SAMPLE_RATE)
}

pub fn bin_frequency_at(index: usize, len: usize, sample_rate: f32) -> f32 {
    index as f32 * sample_rate / len as f32
}

/// Unit impulse at sample 0, zeros elsewhere.
pub fn impulse(num_channels: usize, len: usize) -> AudioBuffer {
    let mut buffer = AudioBuffer::new(num_channels, len);
    for ch in 0..num_channels {
        buffer.set_sample(ch, 0, 1.0);
    }
    buffer
}
