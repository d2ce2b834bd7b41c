/*
Fractional Delay Line
=====================

A ring buffer per channel that stores the most recent samples and reads them
back at an arbitrary, possibly non-integer, distance into the past.

Vocabulary
----------

  capacity    Slots per channel: max_delay + 2. The two extra slots are guard
              samples for the interpolation lookback at the longest delay.

  write       Cursor where the next pushed sample lands.

  read        Cursor the delay is measured from. It moves in lockstep with the
              write cursor whenever a pop advances it.

  frac        The fractional part of the delay, used to blend the two stored
              samples that bracket the requested position.


Layout
------

Both cursors walk the buffer downwards, so older samples sit at higher
indices relative to the read cursor:

    index:   read   read+1   read+2   ...   read+k
    sample:  x[n]   x[n-1]   x[n-2]   ...   x[n-k]

A pop at delay d = k + frac reads

    y = (1 - frac) * buf[read + k] + frac * buf[read + k + 1]

computed as buf[read + k] + frac * (buf[read + k + 1] - buf[read + k]).


Push/Pop Order
--------------

The meaning of "delay 0" depends on whether the sample is pushed before or
after the pop for the same time step:

  push → pop   delay d returns the sample pushed d steps ago, counting the
               one just pushed as 0 (plain delay line, taps).

  pop → push   delay d returns the sample pushed d steps ago, counting the
               previous push as 1 (feedback structures such as the allpass).
               Delays below 1 would reach into the slot about to be
               written, so the caller has to resolve them itself.

Auxiliary taps pop with `advance_cursor = false`, so any number of them can
read around the same position before the primary pop moves the cursor.
`advance` moves the cursor on its own, for callers that only peek.
*/

/// Guard samples reserved beyond the maximum delay.
const GUARD_SAMPLES: usize = 2;

#[derive(Debug, Clone)]
pub struct FractionalDelayLine {
    maximum_delay: usize,
    capacity: usize,
    buffers: Vec<Vec<f32>>,
    write_pos: Vec<usize>,
    read_pos: Vec<usize>,
}

impl FractionalDelayLine {
    pub fn new(maximum_delay: usize) -> Self {
        assert!(maximum_delay > 0, "delay line needs a maximum delay above zero");

        Self {
            maximum_delay,
            capacity: maximum_delay + GUARD_SAMPLES,
            buffers: Vec::new(),
            write_pos: Vec::new(),
            read_pos: Vec::new(),
        }
    }

    /// Allocate storage for `num_channels` and clear it.
    pub fn prepare(&mut self, num_channels: usize) {
        self.buffers.resize_with(num_channels, Vec::new);
        for buffer in &mut self.buffers {
            buffer.resize(self.capacity, 0.0);
        }
        self.write_pos.resize(num_channels, 0);
        self.read_pos.resize(num_channels, 0);

        self.reset();
    }

    pub fn reset(&mut self) {
        for buffer in &mut self.buffers {
            buffer.fill(0.0);
        }
        self.write_pos.fill(0);
        self.read_pos.fill(0);
    }

    pub fn push(&mut self, channel: usize, sample: f32) {
        let pos = self.write_pos[channel];
        self.buffers[channel][pos] = sample;
        self.write_pos[channel] = (pos + self.capacity - 1) % self.capacity;
    }

    /// Read `delay` samples into the past.
    ///
    /// # Panics
    /// If `delay` is negative or not below the maximum delay.
    #[inline]
    pub fn pop(&mut self, channel: usize, delay: f32, advance_cursor: bool) -> f32 {
        assert!(
            delay >= 0.0 && delay < self.maximum_delay as f32,
            "delay {delay} outside [0, {})",
            self.maximum_delay
        );

        let delay_int = delay.floor();
        let frac = delay - delay_int;

        let read = self.read_pos[channel];
        let index1 = (read + delay_int as usize) % self.capacity;
        let buffer = &self.buffers[channel];

        let value = if frac == 0.0 {
            buffer[index1]
        } else {
            let index2 = (index1 + 1) % self.capacity;
            let value1 = buffer[index1];
            value1 + frac * (buffer[index2] - value1)
        };

        if advance_cursor {
            self.advance(channel);
        }

        value
    }

    /// Move the read cursor one step, as a pop with `advance_cursor` does.
    #[inline]
    pub fn advance(&mut self, channel: usize) {
        let read = self.read_pos[channel];
        self.read_pos[channel] = (read + self.capacity - 1) % self.capacity;
    }

    /// Largest delay length this line was built for. Valid delays are
    /// strictly below it.
    pub fn maximum_delay_in_samples(&self) -> usize {
        self.maximum_delay
    }

    pub fn num_channels(&self) -> usize {
        self.buffers.len()
    }
}
