pub mod buffer; // Planar sample storage and block views
#[cfg(feature = "rtrb")]
pub mod control; // Lock-free parameter changes for the audio thread
pub mod dsp;
pub mod graph; // Block processors

pub use buffer::{AudioBlock, AudioBuffer};
pub use graph::{
    Bypass, Chain, Lfo, ModulationSource, OnePoleFilter, ProcessSpec, Processor, ProcessorExt,
    SubBlockModulator, VariableDelayAllpass, VariableDelayLine,
};

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Ramp length used by every smoothed control unless configured otherwise.
pub const DEFAULT_RAMP_SECONDS: f32 = 0.05;
