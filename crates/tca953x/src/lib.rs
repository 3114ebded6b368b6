//! Driver for the TCA953x family of I²C I/O expanders.
//!
//! Currently supports the TI TCA9537, a 4-bit expander with four 8-bit
//! registers (input port, output port, polarity inversion, configuration).
//!
//! # Architecture Layers
//!
//! ```text
//! Application
//!         ↓
//! Device facade (Tca9537 - pin-level semantics)
//!         ↓
//! Register map (registers - pure encode/decode)
//!         ↓
//! Transaction bus (bus - scoped register access over embedded-hal I2c)
//! ```
//!
//! Every public operation of [`Tca9537`] runs inside exactly one scoped bus
//! transaction, so a read-modify-write of the output port cannot interleave
//! with another user of a shared bus.
//!
//! # Features
//!
//! - `std`: emulated I²C bus ([`mocks`]), [`bus::MutexBus`] and
//!   `std::error::Error` impls
//! - `defmt`: defmt logging and `defmt::Format` derives (firmware builds)
//! - `tracing`: tracing logging (desktop builds)
//!
//! # Example
//!
//! ```no_run
//! use embedded_hal::i2c::I2c;
//! use tca953x::{bus::ExclusiveBus, Direction, Tca9537};
//!
//! fn blink<I: I2c>(i2c: I) -> Result<(), tca953x::Error<I::Error>> {
//!     let mut expander = Tca9537::new(ExclusiveBus::new(i2c));
//!     expander.set_pin_directions([Direction::Output; 4])?;
//!     expander.set_pin_state(0, true)?;
//!     Ok(())
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)] // hex addresses and register names in doc comments
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// Must come first so the logging macros are visible in every module below.
#[macro_use]
mod fmt;

pub mod bus;
pub mod error;
pub mod pin;
pub mod registers;
pub mod tca9537;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

pub use bus::{RegisterAccess, TransactionalBus};
pub use error::Error;
pub use pin::{Direction, Pin, Polarity};
pub use registers::{Register, DEFAULTS};
pub use tca9537::{Tca9537, DEVICE_ADDRESS};
