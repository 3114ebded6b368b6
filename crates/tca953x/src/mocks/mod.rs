//! Emulated I²C bus for host tests and the demonstrator.
//!
//! [`EmulatedI2c`] holds a register file per device address and implements
//! `embedded_hal::i2c::I2c`, so it plugs into any adapter in [`crate::bus`].
//! Every register is writable, including registers that are read-only on
//! real silicon, which lets tests stage input levels.

use std::collections::BTreeMap;

use embedded_hal::i2c::{self, ErrorKind, NoAcknowledgeSource, Operation};

use crate::registers::Register;
use crate::tca9537::DEVICE_ADDRESS;

/// Failures reported by [`EmulatedI2c`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmulatedI2cError {
    /// Nothing answers at this address.
    NoDevice(u8),
    /// The device has no register at this address.
    UnknownRegister {
        /// Device address.
        address: u8,
        /// Register address.
        register: u8,
    },
    /// A read was issued before any register was selected.
    NoRegisterSelected(u8),
}

impl core::fmt::Display for EmulatedI2cError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoDevice(address) => write!(f, "no device at address {address:#04x}"),
            Self::UnknownRegister { address, register } => write!(
                f,
                "device {address:#04x} has no register {register:#04x}"
            ),
            Self::NoRegisterSelected(address) => {
                write!(f, "read from device {address:#04x} without a register address")
            }
        }
    }
}

impl std::error::Error for EmulatedI2cError {}

impl i2c::Error for EmulatedI2cError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::NoDevice(_) => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
            Self::UnknownRegister { .. } => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data),
            Self::NoRegisterSelected(_) => ErrorKind::Other,
        }
    }
}

/// In-memory I²C bus with register-addressed devices.
#[derive(Debug, Clone, Default)]
pub struct EmulatedI2c {
    devices: BTreeMap<u8, BTreeMap<u8, u8>>,
    transactions: usize,
}

impl EmulatedI2c {
    /// An empty bus: every address NACKs.
    pub fn new() -> Self {
        Self::default()
    }

    /// A bus with one TCA9537 at [`DEVICE_ADDRESS`] holding its reset values.
    pub fn with_tca9537() -> Self {
        Self::new().with_device(
            DEVICE_ADDRESS,
            Register::ALL.map(|register| (register.address(), register.default_value())),
        )
    }

    /// Builder form of [`add_device`](Self::add_device).
    #[must_use]
    pub fn with_device(
        mut self,
        address: u8,
        registers: impl IntoIterator<Item = (u8, u8)>,
    ) -> Self {
        self.add_device(address, registers);
        self
    }

    /// Attach a device at `address` with the given `(register, value)` file,
    /// replacing any device already there.
    pub fn add_device(&mut self, address: u8, registers: impl IntoIterator<Item = (u8, u8)>) {
        self.devices.insert(address, registers.into_iter().collect());
    }

    /// Current value of a register, or `None` if device or register is absent.
    pub fn register(&self, address: u8, register: u8) -> Option<u8> {
        self.devices.get(&address)?.get(&register).copied()
    }

    /// Overwrite an existing register behind the driver's back.
    ///
    /// # Errors
    ///
    /// Fails like a bus write would if the device or register is absent.
    pub fn set_register(
        &mut self,
        address: u8,
        register: u8,
        value: u8,
    ) -> Result<(), EmulatedI2cError> {
        let slot = self
            .devices
            .get_mut(&address)
            .ok_or(EmulatedI2cError::NoDevice(address))?
            .get_mut(&register)
            .ok_or(EmulatedI2cError::UnknownRegister { address, register })?;
        *slot = value;
        Ok(())
    }

    /// Number of I²C transactions issued so far, failed ones included.
    pub fn transaction_count(&self) -> usize {
        self.transactions
    }
}

impl i2c::ErrorType for EmulatedI2c {
    type Error = EmulatedI2cError;
}

impl i2c::I2c for EmulatedI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.transactions = self.transactions.saturating_add(1);
        let registers = self
            .devices
            .get_mut(&address)
            .ok_or(EmulatedI2cError::NoDevice(address))?;

        // Register pointer; the first byte of every write selects it and
        // subsequent bytes land at consecutive registers.
        let mut pointer: Option<u8> = None;
        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => {
                    let Some((&first, data)) = bytes.split_first() else {
                        continue;
                    };
                    let mut register = first;
                    for &value in data {
                        let slot = registers
                            .get_mut(&register)
                            .ok_or(EmulatedI2cError::UnknownRegister { address, register })?;
                        *slot = value;
                        register = register.wrapping_add(1);
                    }
                    pointer = Some(first);
                }
                Operation::Read(buffer) => {
                    let mut register =
                        pointer.ok_or(EmulatedI2cError::NoRegisterSelected(address))?;
                    for byte in buffer.iter_mut() {
                        *byte = *registers
                            .get(&register)
                            .ok_or(EmulatedI2cError::UnknownRegister { address, register })?;
                        register = register.wrapping_add(1);
                    }
                }
            }
        }
        Ok(())
    }
}
