//! `morselight` sends text as Morse code on a [blink(1)](https://blink1.thingm.com/) USB light.
//!
//! # Structure
//!
//! * [morse] translates text to Morse symbols
//! * [color] resolves color specifications and computes the color shift between pulses
//! * [timing] holds the Morse timing, including compensation for the device call latency
//! * [emitter] builds the timed schedule of a message and plays it on a [device]
//!
//! # License
//!
//! This source code is released under the [MIT-License](https://opensource.org/licenses/MIT)

#[macro_use]
extern crate tracing;

pub mod color;
pub mod device;
pub mod emitter;
pub mod models;
pub mod morse;
pub mod serde;
pub mod timing;
