//! TCA9537 register map and bit encoding.
//!
//! Reference: TI TCA9537 datasheet (SCPS273), Section 8.6.3 (Register Descriptions).
//! <https://www.ti.com/lit/ds/symlink/tca9537.pdf>
//!
//! # Layout
//!
//! All four registers are 8 bits wide. Bit `n` (0–3) belongs to pin `n`;
//! bits 4–7 are unused.
//!
//! ## Input Port (0x00, read-only)
//! Reflects the incoming logic level of every pin, whether the pin is
//! configured as input or output.
//!
//! ## Output Port (0x01)
//! Outgoing levels of pins configured as outputs. Bits for input pins are
//! stored but have no electrical effect. Reads return the flip-flop value,
//! not the actual pin level.
//!
//! ## Policy
//! Whole-register encoders ([`encode_directions`], [`encode_polarities`])
//! always clear bits 4–7. Single-pin updates ([`with_bit`]) go through a
//! read-modify-write and keep every other bit as read.

use crate::pin::{Direction, Pin, Polarity, PIN_COUNT};

// ---------------------------------------------------------------------------
// Register addresses
// ---------------------------------------------------------------------------

/// Input Port register address.
pub const REG_INPUT_PORT: u8 = 0x00;
/// Output Port register address.
pub const REG_OUTPUT_PORT: u8 = 0x01;
/// Polarity Inversion register address.
pub const REG_POLARITY_INVERSION: u8 = 0x02;
/// Configuration register address.
pub const REG_CONFIGURATION: u8 = 0x03;

/// Bits 0–3 carry pin data.
pub const PIN_BITS_MASK: u8 = 0b0000_1111;

/// The four TCA9537 registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Live pin levels (read-only on hardware).
    InputPort = REG_INPUT_PORT,
    /// Commanded output levels.
    OutputPort = REG_OUTPUT_PORT,
    /// Per-pin polarity inversion.
    PolarityInversion = REG_POLARITY_INVERSION,
    /// Per-pin direction (1 = input).
    Configuration = REG_CONFIGURATION,
}

impl Register {
    /// All registers in address order, which is also the reset order.
    pub const ALL: [Register; 4] = [
        Register::InputPort,
        Register::OutputPort,
        Register::PolarityInversion,
        Register::Configuration,
    ];

    /// Register address on the wire.
    #[must_use]
    pub const fn address(self) -> u8 {
        self as u8
    }

    /// Power-on reset value (datasheet 8.6.3).
    #[must_use]
    pub const fn default_value(self) -> u8 {
        match self {
            Self::InputPort => 0b1111_0000,
            Self::OutputPort => 0b1111_1111,
            Self::PolarityInversion => 0b0000_0000,
            Self::Configuration => 0b1111_1111,
        }
    }

    /// `false` for the Input Port, which the silicon does not let you write.
    #[must_use]
    pub const fn is_writable(self) -> bool {
        !matches!(self, Self::InputPort)
    }

    /// Datasheet register name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::InputPort => "input port",
            Self::OutputPort => "output port",
            Self::PolarityInversion => "polarity inversion",
            Self::Configuration => "configuration",
        }
    }
}

/// Reset table, in the order the registers are written by a device reset.
pub const DEFAULTS: [(Register, u8); 4] = [
    (Register::InputPort, Register::InputPort.default_value()),
    (Register::OutputPort, Register::OutputPort.default_value()),
    (
        Register::PolarityInversion,
        Register::PolarityInversion.default_value(),
    ),
    (Register::Configuration, Register::Configuration.default_value()),
];

// ---------------------------------------------------------------------------
// Single-bit helpers
// ---------------------------------------------------------------------------

/// Set the pin's bit.
#[inline]
#[must_use]
pub const fn set_bit(byte: u8, pin: Pin) -> u8 {
    byte | pin.mask()
}

/// Clear the pin's bit.
#[inline]
#[must_use]
pub const fn clear_bit(byte: u8, pin: Pin) -> u8 {
    byte & !pin.mask()
}

/// `true` if the pin's bit is set.
#[inline]
#[must_use]
pub const fn test_bit(byte: u8, pin: Pin) -> bool {
    byte & pin.mask() != 0
}

/// Set or clear the pin's bit, leaving all other bits untouched.
#[inline]
#[must_use]
pub const fn with_bit(byte: u8, pin: Pin, active: bool) -> u8 {
    if active {
        set_bit(byte, pin)
    } else {
        clear_bit(byte, pin)
    }
}

// ---------------------------------------------------------------------------
// Whole-register encoding
// ---------------------------------------------------------------------------

/// Decode the configuration register. A set bit means input.
#[must_use]
pub fn decode_directions(config: u8) -> [Direction; PIN_COUNT] {
    Pin::ALL.map(|pin| {
        if test_bit(config, pin) {
            Direction::Input
        } else {
            Direction::Output
        }
    })
}

/// Encode pin directions into a configuration register value.
///
/// Bits 4–7 are always 0.
#[must_use]
pub fn encode_directions(directions: [Direction; PIN_COUNT]) -> u8 {
    Pin::ALL
        .into_iter()
        .zip(directions)
        .filter(|&(_, direction)| direction == Direction::Input)
        .fold(0, |byte, (pin, _)| set_bit(byte, pin))
}

/// Decode the polarity inversion register. A set bit means inverted.
#[must_use]
pub fn decode_polarities(polarity: u8) -> [Polarity; PIN_COUNT] {
    Pin::ALL.map(|pin| {
        if test_bit(polarity, pin) {
            Polarity::Inverted
        } else {
            Polarity::Matching
        }
    })
}

/// Encode pin polarities into a polarity inversion register value.
///
/// Bits 4–7 are always 0.
#[must_use]
pub fn encode_polarities(polarities: [Polarity; PIN_COUNT]) -> u8 {
    Pin::ALL
        .into_iter()
        .zip(polarities)
        .filter(|&(_, polarity)| polarity == Polarity::Inverted)
        .fold(0, |byte, (pin, _)| set_bit(byte, pin))
}
