//! Mapping modulator output onto parameter ranges.

/*
Range Mapping
=============

An LFO produces a bipolar signal in [-1, +1]. The parameter it drives lives in
its own units: a delay length in samples, an allpass gain, a cutoff in Hz.
Instead of a base value plus depth, the modulator is given the two ends of the
sweep directly:

    mapped = lo + (value + 1) / 2 · (hi - lo)

    value   mapped
    -1.0    lo
     0.0    (lo + hi) / 2
    +1.0    hi

`lo` may be greater than `hi`; the sweep then simply runs the other way.

A modulator whose oscillator frequency is zero outputs exactly 0 rather than
a mapped value, so a stopped modulator parks its target at a known value
instead of wherever the oscillator happened to stop.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inclusive target range for a bipolar modulation signal.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModulationRange {
    pub lo: f32,
    pub hi: f32,
}

impl ModulationRange {
    pub fn new(lo: f32, hi: f32) -> Self {
        Self { lo, hi }
    }

    #[inline]
    pub fn map(&self, bipolar: f32) -> f32 {
        map_range(bipolar, -1.0, 1.0, self.lo, self.hi)
    }
}

impl Default for ModulationRange {
    fn default() -> Self {
        Self { lo: 0.0, hi: 0.0 }
    }
}

/// Linearly remap `value` from `[src_lo, src_hi]` to `[dst_lo, dst_hi]`.
#[inline]
pub fn map_range(value: f32, src_lo: f32, src_hi: f32, dst_lo: f32, dst_hi: f32) -> f32 {
    dst_lo + (dst_hi - dst_lo) * (value - src_lo) / (src_hi - src_lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_range_endpoints() {
        assert_eq!(map_range(-1.0, -1.0, 1.0, 10.0, 20.0), 10.0);
        assert_eq!(map_range(1.0, -1.0, 1.0, 10.0, 20.0), 20.0);
        assert_eq!(map_range(0.0, -1.0, 1.0, 10.0, 20.0), 15.0);
    }

    #[test]
    fn test_inverted_range() {
        let range = ModulationRange::new(5.0, 1.0);
        assert_eq!(range.map(-1.0), 5.0);
        assert_eq!(range.map(1.0), 1.0);
        assert_eq!(range.map(0.0), 3.0);
    }

    #[test]
    fn test_default_range_maps_to_zero() {
        let range = ModulationRange::default();
        assert_eq!(range.map(0.7), 0.0);
    }
}
