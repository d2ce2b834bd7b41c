//! Block processors built on the primitives in `dsp`.
//!
//! Every type here implements [`Processor`]: `prepare` once with a
//! [`ProcessSpec`], then `process` one block at a time on the audio thread.
//! Control setters ramp through `SmoothedParameter`s so they can be called
//! between blocks without clicks. `through` adds `.then()` for serial
//! chains.

/// First-order delay-based allpass with auxiliary taps.
pub mod allpass;
/// Multi-tap fractional delay line.
pub mod delay;
/// One-pole low-pass and high-pass filters.
pub mod filter;
/// Table-lookup LFO and the oscillator interface modulators consume.
pub mod lfo;
/// Drive a processor's parameters from an oscillator at a reduced rate.
pub mod modulate;
/// Core trait shared by all processors.
pub mod node;
/// Per-channel tap state for the delay processors.
pub mod tap;
/// Serial chaining of two processors and the no-op `Bypass`.
pub mod through;

pub use allpass::VariableDelayAllpass;
pub use delay::VariableDelayLine;
pub use filter::OnePoleFilter;
pub use lfo::{Lfo, ModulationSource};
pub use modulate::{ModulationTarget, SubBlockModulator};
pub use node::{ProcessSpec, Processor};
pub use through::{Bypass, Chain, ProcessorExt};
