use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
| type      | coefficients                         | passes       | rejects      |
| --------- | ------------------------------------ | ------------ | ------------ |
| low-pass  | b0 = 1 - a, a1 = a                   | below cutoff | above cutoff |
| high-pass | b0 = (1 + a) / 2, b1 = -b0, a1 = a   | above cutoff | below cutoff |

with a = exp(-2π · fc / fs)

  low-pass:   y[n] = b0·x[n]             + a1·y[n-1]
  high-pass:  y[n] = b0·x[n] + b1·x[n-1] + a1·y[n-1]

Both are 6 dB/octave. The low-pass has unity gain at DC, the high-pass has
unity gain at Nyquist and a zero at DC.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    HighPass,
}

/// Realized coefficients of a one-pole section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OnePoleCoefficients {
    pub b0: f32,
    pub b1: f32,
    pub a1: f32,
}

impl OnePoleCoefficients {
    /// Unity gain, no recursion.
    pub const PASSTHROUGH: Self = Self {
        b0: 1.0,
        b1: 0.0,
        a1: 0.0,
    };

    pub fn lowpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        let alpha = pole(cutoff_hz, sample_rate);
        Self {
            b0: (1.0 - alpha) as f32,
            b1: 0.0,
            a1: alpha as f32,
        }
    }

    pub fn highpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        let alpha = pole(cutoff_hz, sample_rate);
        let b0 = ((1.0 + alpha) / 2.0) as f32;
        Self {
            b0,
            b1: -b0,
            a1: alpha as f32,
        }
    }

    pub fn for_type(filter_type: FilterType, cutoff_hz: f32, sample_rate: f32) -> Self {
        match filter_type {
            FilterType::LowPass => Self::lowpass(cutoff_hz, sample_rate),
            FilterType::HighPass => Self::highpass(cutoff_hz, sample_rate),
        }
    }
}

#[inline]
fn pole(cutoff_hz: f32, sample_rate: f32) -> f64 {
    (-2.0 * PI * cutoff_hz as f64 / sample_rate as f64).exp()
}

/// Gain of a first-order allpass whose phase passes -90° at `cutoff_hz`.
///
/// Bilinear-transform relation (Zölzer, DAFX):
/// `g = (tan(π·fc/fs) - 1) / (tan(π·fc/fs) + 1)`
pub fn allpass_gain(cutoff_hz: f32, sample_rate: f32) -> f32 {
    let t = (PI * cutoff_hz as f64 / sample_rate as f64).tan();
    ((t - 1.0) / (t + 1.0)) as f32
}
