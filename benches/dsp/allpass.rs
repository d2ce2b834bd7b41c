//! Benchmarks for the delay-based allpass.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tapline::{dsp::allpass_gain, ProcessSpec, Processor, VariableDelayAllpass};

use super::test_signal;
use crate::{BLOCK_SIZES, NUM_CHANNELS};

pub fn bench_allpass(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/allpass");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let spec = ProcessSpec::new(48_000.0, size, NUM_CHANNELS);

        for num_taps in [1, 4] {
            let mut allpass = VariableDelayAllpass::new(64, num_taps);
            allpass.prepare(&spec);
            allpass.set_gain(allpass_gain(1_000.0, 48_000.0), true);
            for tap in 0..num_taps {
                allpass.set_delay_in_samples(8.0 + tap as f32 * 7.5, tap, true);
            }

            let mut buffer = input.clone();
            group.bench_with_input(
                BenchmarkId::new(format!("{num_taps}_taps"), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        buffer.clone_from(&input);
                        allpass.process(black_box(&mut buffer.as_block()));
                    })
                },
            );
        }
    }

    group.finish();
}
