//! phaser - live demo of the tapline processors
//!
//! A sawtooth drone runs through highpass → LFO-swept allpass → lowpass, with
//! an oscilloscope and spectrum of the result in the terminal.
//!
//! Run with: cargo run --bin phaser

mod app;
mod engine;
mod ui;

use app::Phaser;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    Phaser::new()
        .drone_frequency(110.0)
        .update_rate(64)
        .sweep(2.0, 24.0)
        .run()
}
