//! Benchmarks for delay line operations.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tapline::{dsp::FractionalDelayLine, ProcessSpec, Processor, VariableDelayLine};

use super::test_signal;
use crate::{BLOCK_SIZES, NUM_CHANNELS};

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    // Test with different delay times (in samples)
    let delay_times: &[usize] = &[
        480,   // 10ms at 48kHz
        4800,  // 100ms at 48kHz
        48000, // 1 second at 48kHz
    ];

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let spec = ProcessSpec::new(48_000.0, size, NUM_CHANNELS);

        for &delay_samples in delay_times {
            let delay_ms = delay_samples as f32 / 48.0;

            let mut delay = VariableDelayLine::new(delay_samples + 1, 1);
            delay.prepare(&spec);
            delay.set_delay_in_samples(delay_samples as f32, 0, true);
            let mut buffer = input.clone();
            group.bench_with_input(
                BenchmarkId::new(format!("process_{}ms", delay_ms as u32), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        buffer.clone_from(&input);
                        delay.process(black_box(&mut buffer.as_block()));
                    })
                },
            );
        }

        // Four taps, all fractional
        let mut delay = VariableDelayLine::new(960, 4);
        delay.prepare(&spec);
        for (tap, samples) in [480.5, 240.25, 120.75, 60.1].into_iter().enumerate() {
            delay.set_delay_in_samples(samples, tap, true);
        }
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("process_4_taps", size), &size, |b, _| {
            b.iter(|| {
                buffer.clone_from(&input);
                delay.process(black_box(&mut buffer.as_block()));
            })
        });

        // Raw push/pop with a modulated fractional delay (chorus-like)
        let mut line = FractionalDelayLine::new(960);
        line.prepare(1);
        let mono = input.channel(0).to_vec();
        group.bench_with_input(BenchmarkId::new("push_pop_interpolated", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for (i, &sample) in mono.iter().enumerate() {
                    line.push(0, sample);
                    let delay_time = 480.0 + (i as f32 * 0.1).sin() * 48.0;
                    sum += line.pop(0, black_box(delay_time), true);
                }
                sum
            })
        });
    }

    group.finish();
}
