//! Low-level DSP primitives used by the block processors in `graph`.
//!
//! Nothing in here allocates after construction or `prepare`, so every type
//! is safe to embed inside a processor running on the audio thread. The
//! modules stay focused on the per-sample math; lifecycle and channel
//! bookkeeping live one level up.

/// Multi-channel ring buffer with linearly interpolated reads.
pub mod delay;
/// One-pole coefficient design and the allpass gain relation.
pub mod filter;
/// Wavetables for control-rate oscillators.
pub mod lfo;
/// Mapping bipolar modulation onto parameter ranges.
pub mod modulate;
/// Linear parameter ramps.
pub mod smoothing;

pub use delay::FractionalDelayLine;
pub use filter::{allpass_gain, FilterType, OnePoleCoefficients};
pub use lfo::{Waveform, Wavetable};
pub use modulate::ModulationRange;
pub use smoothing::SmoothedParameter;
