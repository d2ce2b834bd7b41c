//! Parameter changes from a control thread to the audio thread.
//!
//! The processors in this crate are not synchronized; their setters must run
//! on the same thread as `process`. A control thread (UI, MIDI, automation)
//! therefore sends [`ParamChange`]s through a wait-free `rtrb` ring buffer and
//! the audio callback drains them at the top of each block.

use rtrb::{Consumer, Producer, RingBuffer};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ParamChange {
    Cutoff { hz: f32 },
    DelayInSamples { tap: usize, samples: f32 },
    Gain { gain: f32 },
    ModulationFrequency { hz: f32 },
    ModulationRange { lo: f32, hi: f32 },
}

pub trait ParamReceiver {
    fn pop(&mut self) -> Option<ParamChange>;

    /// Hand every queued change to `apply`, oldest first.
    fn drain<F: FnMut(ParamChange)>(&mut self, mut apply: F) {
        while let Some(change) = self.pop() {
            apply(change);
        }
    }
}

impl ParamReceiver for Consumer<ParamChange> {
    fn pop(&mut self) -> Option<ParamChange> {
        Consumer::pop(self).ok()
    }
}

/// Control-thread end of the queue.
pub struct ParamSender {
    tx: Producer<ParamChange>,
}

impl ParamSender {
    /// Queue a change. Returns `false` (and drops the change) if the queue
    /// is full.
    pub fn send(&mut self, change: ParamChange) -> bool {
        self.tx.push(change).is_ok()
    }

    pub fn slots(&self) -> usize {
        self.tx.slots()
    }
}

/// Create a queue holding up to `capacity` pending changes.
pub fn param_queue(capacity: usize) -> (ParamSender, Consumer<ParamChange>) {
    let (tx, rx) = RingBuffer::<ParamChange>::new(capacity);
    (ParamSender { tx }, rx)
}
