mod common;

use common::SAMPLE_RATE;
use tapline::{
    dsp::Waveform, AudioBuffer, Lfo, ModulationSource, ProcessSpec, Processor, ProcessorExt,
    SubBlockModulator, VariableDelayAllpass, VariableDelayLine,
};

#[test]
fn modulated_delay_stays_within_range() {
    let mut modulator = SubBlockModulator::new(Lfo::sine(), 32)
        .set_processor_to_modulate(VariableDelayLine::new(64, 1).with_ramp_seconds(0.0));
    modulator.set_modulation_range(4.0, 20.0);
    modulator.set_modulation_frequency(5.0);
    modulator.set_modulation_target(|delay: &mut VariableDelayLine, samples| {
        delay.set_delay_in_samples(samples, 0, false);
    });
    modulator.prepare(&ProcessSpec::new(SAMPLE_RATE, 256, 2));

    let mut seen = Vec::new();
    for _ in 0..40 {
        let mut buffer = AudioBuffer::new(2, 256);
        modulator.process(&mut buffer.as_block());
        seen.push(modulator.processor().delay_in_samples(0, 0));
    }

    assert!(seen.iter().all(|&d| (4.0..=20.0).contains(&d)), "{seen:?}");
    let lowest = seen.iter().cloned().fold(f32::MAX, f32::min);
    let highest = seen.iter().cloned().fold(f32::MIN, f32::max);
    assert!(highest - lowest > 8.0, "sweep too narrow: {lowest}..{highest}");
}

#[test]
fn stopped_modulator_parks_target_at_zero() {
    let mut modulator = SubBlockModulator::new(Lfo::sine(), 16)
        .set_processor_to_modulate(VariableDelayAllpass::new(32, 1));
    modulator.set_modulation_range(5.0, 10.0);
    modulator.set_modulation_frequency(0.0);
    modulator.set_modulation_target(|allpass: &mut VariableDelayAllpass, gain| {
        allpass.set_gain(gain, true);
    });
    modulator.prepare(&ProcessSpec::new(SAMPLE_RATE, 64, 1));
    modulator.processor_mut().set_gain(0.7, true);

    let mut buffer = AudioBuffer::new(1, 64);
    modulator.process(&mut buffer.as_block());
    assert_eq!(modulator.processor().gain(), 0.0);
}

#[test]
fn stopped_sweep_leaves_allpass_transparent() {
    let mut modulator = SubBlockModulator::new(Lfo::sine(), 16)
        .set_processor_to_modulate(VariableDelayAllpass::new(64, 1).with_ramp_seconds(0.0));
    modulator.set_modulation_range(2.0, 24.0);
    modulator.set_modulation_frequency(0.0);
    modulator.set_modulation_target(|allpass: &mut VariableDelayAllpass, delay| {
        allpass.set_delay_in_samples(delay, 0, true);
    });
    modulator.prepare(&ProcessSpec::new(SAMPLE_RATE, 128, 1));
    modulator.processor_mut().set_gain(-0.5, true);

    let mut buffer = AudioBuffer::new(1, 128);
    buffer.set_sample(0, 0, 1.0);
    modulator.process(&mut buffer.as_block());

    // Delay 0 is the identity at any gain, so nothing comes back around the line.
    assert_eq!(modulator.processor().delay_in_samples(0, 0), 0.0);
    assert!((buffer.channel(0)[0] - 1.0).abs() < 1e-6);
    assert!(buffer.channel(0)[1..].iter().all(|s| s.abs() < 1e-6));
}

#[test]
fn waveform_change_reaches_oscillator() {
    let mut modulator = SubBlockModulator::new(Lfo::sine(), 64);
    modulator.set_modulation_waveform(Waveform::Square, 128);
    modulator.set_modulation_frequency(2.0);

    assert_eq!(modulator.oscillator().waveform(), Waveform::Square);
    assert_eq!(modulator.oscillator().table_size(), 128);
    assert_eq!(modulator.oscillator().frequency(), 2.0);
}

#[test]
fn modulator_runs_inside_a_chain() {
    let mut modulator = SubBlockModulator::new(Lfo::saw(), 8)
        .set_processor_to_modulate(VariableDelayLine::new(16, 1));
    modulator.set_modulation_range(1.0, 3.0);
    modulator.set_modulation_frequency(100.0);
    modulator.set_modulation_target(|delay: &mut VariableDelayLine, samples| {
        delay.set_delay_in_samples(samples, 0, true);
    });

    let mut chain = modulator.then(tapline::Bypass);
    chain.prepare(&ProcessSpec::new(SAMPLE_RATE, 128, 1));

    let mut buffer = AudioBuffer::new(1, 128);
    buffer.channel_mut(0).fill(1.0);
    chain.process(&mut buffer.as_block());

    // A constant input through any delay is still constant once the line fills.
    assert!(buffer.channel(0)[64..].iter().all(|&s| (s - 1.0).abs() < 1e-6));
}
