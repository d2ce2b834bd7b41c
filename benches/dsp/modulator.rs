//! Benchmarks for the sub-block modulator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tapline::{Lfo, ProcessSpec, Processor, SubBlockModulator, VariableDelayAllpass};

use super::test_signal;
use crate::{BLOCK_SIZES, NUM_CHANNELS};

pub fn bench_modulator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/modulator");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let spec = ProcessSpec::new(48_000.0, size, NUM_CHANNELS);

        for update_rate in [16, 64] {
            let mut modulator = SubBlockModulator::new(Lfo::sine(), update_rate)
                .set_processor_to_modulate(VariableDelayAllpass::new(64, 1));
            modulator.set_modulation_range(2.0, 30.0);
            modulator.set_modulation_frequency(0.5);
            modulator.set_modulation_target(|allpass: &mut VariableDelayAllpass, delay| {
                allpass.set_delay_in_samples(delay, 0, false);
            });
            modulator.prepare(&spec);
            modulator.processor_mut().set_gain(-0.5, true);

            let mut buffer = input.clone();
            group.bench_with_input(
                BenchmarkId::new(format!("allpass_every_{update_rate}"), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        buffer.clone_from(&input);
                        modulator.process(black_box(&mut buffer.as_block()));
                    })
                },
            );
        }
    }

    group.finish();
}
