//! Driver error type.

use crate::pin::InvalidPin;

/// Errors returned by [`Tca9537`](crate::Tca9537) operations.
///
/// `E` is the transport's own error type, passed through unchanged.
/// A refused write to an input pin is not an error; see
/// [`Tca9537::set_pin_state`](crate::Tca9537::set_pin_state).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Pin index outside 0–3. Raised before any bus access.
    InvalidPin(u8),
    /// The bus transport failed. No retry and no rollback was attempted.
    Bus(E),
}

impl<E> From<InvalidPin> for Error<E> {
    fn from(err: InvalidPin) -> Self {
        Self::InvalidPin(err.0)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    #[allow(clippy::use_debug)] // transport errors are only guaranteed to be Debug
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidPin(pin) => core::fmt::Display::fmt(&InvalidPin(*pin), f),
            Self::Bus(err) => write!(f, "I2C transport error: {err:?}"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for Error<E> {}
