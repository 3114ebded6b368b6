//! Pin-level domain types.
//!
//! - `Pin`: validated pin index (0–3); bit `n` of every register is pin `n`
//! - `Direction`: configuration register bit (0 = output, 1 = input)
//! - `Polarity`: polarity inversion register bit (0 = matching, 1 = inverted)

// ── Pin ──────────────────────────────────────────────────────────────────────

/// Number of I/O pins on the TCA9537.
pub const PIN_COUNT: usize = 4;

/// Error returned when a pin index is outside 0–3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidPin(pub u8);

impl core::fmt::Display for InvalidPin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "pin number {} exceeds allowed range (0 ≤ x ≤ 3)", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidPin {}

/// A pin index on the expander, guaranteed to be in 0–3.
///
/// Construct with [`Pin::new`]; the four valid pins are also available as
/// [`Pin::ALL`] in bit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Pin(u8);

impl Pin {
    /// P0–P3 in bit order.
    pub const ALL: [Pin; PIN_COUNT] = [Pin(0), Pin(1), Pin(2), Pin(3)];

    /// Validate a raw pin index.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPin`] if `index > 3`.
    pub const fn new(index: u8) -> Result<Self, InvalidPin> {
        if index < 4 {
            Ok(Self(index))
        } else {
            Err(InvalidPin(index))
        }
    }

    /// Return the raw index (0–3).
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Single-bit register mask for this pin, e.g. `0b0000_0100` for P2.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)] // index < 4, shift cannot overflow
    pub const fn mask(self) -> u8 {
        1 << self.0
    }
}

// ── Direction ────────────────────────────────────────────────────────────────

/// Electrical role of a pin, as stored in the configuration register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Pin drives the level held in the output port register (bit = 0).
    Output,
    /// Pin is high-impedance; its level is read from the input port (bit = 1).
    Input,
}

impl Direction {
    /// Short label for display output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Output => "output",
            Self::Input => "input",
        }
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Polarity ─────────────────────────────────────────────────────────────────

/// Relation between logical value and pin level.
///
/// - matching: value 1 → pin high
/// - inverted: value 0 → pin high
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Logical value equals pin level (bit = 0, power-on default).
    #[default]
    Matching,
    /// Logical value is the inverse of the pin level (bit = 1).
    Inverted,
}

impl Polarity {
    /// Short label for display output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Matching => "matching",
            Self::Inverted => "inverted",
        }
    }
}

impl core::fmt::Display for Polarity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
