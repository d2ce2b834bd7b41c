use crate::DEFAULT_RAMP_SECONDS;

/*
Parameter Smoothing
===================

Changing a coefficient or a delay length of a running recursive filter in one
jump produces a discontinuity in its output: an audible click. Every control
that can be changed while audio is running is therefore routed through a
SmoothedParameter, which walks from its current value to the new target in a
straight line over a fixed time.

Vocabulary
----------

  current     The value handed to the DSP code for the sample being processed.

  target      The value the ramp is heading towards.

  ramp        The linear path current → target. Its length is configured in
              seconds and converted to samples in `prepare`.

  step        How much `current` moves per sample while ramping:
                  step = (target - current) / ramp_samples

The Shape
---------

    value
   target ┤            ┌────────────────
          │          ╱
          │        ╱
          │      ╱
  current ┤────╱
          └────┬───────┬────────────────→ samples
           set_target  +ramp_samples

On the final step `current` is assigned `target` directly instead of adding
`step` once more, so the ramp lands on the target exactly regardless of
floating point error accumulated along the way.

One instance per channel (and per tap) keeps automation from coupling
channels: each instance is advanced exactly once per processed sample of its
own channel.
*/

#[derive(Debug, Clone)]
pub struct SmoothedParameter {
    current: f32,
    target: f32,
    step: f32,
    remaining: usize,
    ramp_seconds: f32,
    ramp_samples: usize,
    sample_rate: f32,
}

impl SmoothedParameter {
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            step: 0.0,
            remaining: 0,
            ramp_seconds: DEFAULT_RAMP_SECONDS,
            ramp_samples: 0,
            sample_rate: 0.0,
        }
    }

    pub fn with_ramp_seconds(mut self, ramp_seconds: f32) -> Self {
        self.set_ramp_seconds(ramp_seconds);
        self
    }

    /// Change the ramp duration. Takes effect for the next ramp; an
    /// in-flight ramp is restarted from the current value.
    pub fn set_ramp_seconds(&mut self, ramp_seconds: f32) {
        assert!(
            ramp_seconds >= 0.0,
            "ramp time must be non-negative, got {ramp_seconds}"
        );
        self.ramp_seconds = ramp_seconds;
        self.recompute_ramp();
    }

    /// Convert the ramp duration to samples for `sample_rate`.
    ///
    /// The current value is kept. A ramp that was in flight restarts from the
    /// current value with the new length so it still lands on its target.
    pub fn prepare(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recompute_ramp();
    }

    fn recompute_ramp(&mut self) {
        self.ramp_samples = (self.ramp_seconds * self.sample_rate).round().max(0.0) as usize;

        if self.remaining > 0 {
            let target = self.target;
            self.remaining = 0;
            // Force a fresh ramp towards the pending target.
            self.target = self.current;
            self.set_target(target, false);
        }
    }

    /// Start ramping towards `value`, or jump straight to it when
    /// `immediate` is set.
    pub fn set_target(&mut self, value: f32, immediate: bool) {
        if immediate || self.ramp_samples == 0 {
            self.current = value;
            self.target = value;
            self.step = 0.0;
            self.remaining = 0;
            return;
        }

        if value == self.target {
            return;
        }

        self.target = value;
        self.remaining = self.ramp_samples;
        self.step = (self.target - self.current) / self.remaining as f32;
    }

    /// Move one sample along the ramp and return the value for that sample.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        if self.remaining == 0 {
            return self.target;
        }

        self.remaining -= 1;

        if self.remaining == 0 {
            self.current = self.target;
        } else {
            self.current += self.step;
        }

        self.current
    }

    /// Advance `num_samples` steps at once.
    pub fn skip(&mut self, num_samples: usize) -> f32 {
        if num_samples >= self.remaining {
            self.current = self.target;
            self.remaining = 0;
            return self.target;
        }

        self.current += self.step * num_samples as f32;
        self.remaining -= num_samples;
        self.current
    }

    /// End any ramp in progress, settling on the target.
    pub fn reset(&mut self) {
        self.current = self.target;
        self.step = 0.0;
        self.remaining = 0;
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn is_smoothing(&self) -> bool {
        self.remaining > 0
    }

    pub fn ramp_samples(&self) -> usize {
        self.ramp_samples
    }
}

impl Default for SmoothedParameter {
    fn default() -> Self {
        Self::new(0.0)
    }
}
