use crate::{
    buffer::AudioBlock,
    graph::node::{ProcessSpec, Processor},
};

/*
Serial Signal Chain
===================

`Chain` runs two processors in series on the same block, in place:

  block ──→ [first] ──→ [second] ──→ block

Build longer chains with `.then()`:

  let mut phaser = OnePoleFilter::highpass()
      .then(VariableDelayAllpass::new(64, 1))
      .then(OnePoleFilter::lowpass());

  phaser.prepare(&spec);        // prepares every stage
  phaser.process(&mut block);   // highpass → allpass → lowpass

Individual stages stay reachable through `first()` / `second()` (and their
`_mut` versions) for setting cutoffs, delays and gains.

`Bypass` does nothing. It is the default processor of a `SubBlockModulator`
and a handy placeholder while wiring a chain.
*/

/// Leaves the block untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bypass;

impl Processor for Bypass {
    fn prepare(&mut self, _spec: &ProcessSpec) {}

    fn reset(&mut self) {}

    fn process(&mut self, _block: &mut AudioBlock<'_>) {}
}

pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Chain<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn first_mut(&mut self) -> &mut A {
        &mut self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }

    pub fn second_mut(&mut self) -> &mut B {
        &mut self.second
    }
}

impl<A: Processor, B: Processor> Processor for Chain<A, B> {
    fn prepare(&mut self, spec: &ProcessSpec) {
        self.first.prepare(spec);
        self.second.prepare(spec);
    }

    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
    }

    fn process(&mut self, block: &mut AudioBlock<'_>) {
        self.first.process(block);
        self.second.process(block);
    }
}

pub trait ProcessorExt: Processor + Sized {
    fn then<B: Processor>(self, next: B) -> Chain<Self, B> {
        Chain::new(self, next)
    }
}

impl<T: Processor> ProcessorExt for T {}
