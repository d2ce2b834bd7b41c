//! Benchmarks for the one-pole filters.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tapline::{OnePoleFilter, ProcessSpec, Processor};

use super::test_signal;
use crate::{BLOCK_SIZES, NUM_CHANNELS};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let spec = ProcessSpec::new(48_000.0, size, NUM_CHANNELS);

        let mut filter = OnePoleFilter::lowpass();
        filter.prepare(&spec);
        filter.set_cutoff_frequency(1_000.0, true);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.clone_from(&input);
                filter.process(black_box(&mut buffer.as_block()));
            })
        });

        let mut filter = OnePoleFilter::highpass();
        filter.prepare(&spec);
        filter.set_cutoff_frequency(1_000.0, true);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("highpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.clone_from(&input);
                filter.process(black_box(&mut buffer.as_block()));
            })
        });

        // Cutoff retargeted every block, so coefficients are always ramping
        let mut filter = OnePoleFilter::highpass();
        filter.prepare(&spec);
        let mut buffer = input.clone();
        let mut toggle = false;
        group.bench_with_input(BenchmarkId::new("highpass_ramping", size), &size, |b, _| {
            b.iter(|| {
                toggle = !toggle;
                filter.set_cutoff_frequency(if toggle { 200.0 } else { 2_000.0 }, false);
                buffer.clone_from(&input);
                filter.process(black_box(&mut buffer.as_block()));
            })
        });
    }

    group.finish();
}
