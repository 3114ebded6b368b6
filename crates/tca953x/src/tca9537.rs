//! TCA9537 4-bit I²C I/O expander.
//!
//! Reference: TI TCA9537 datasheet (SCPS273)
//!
//! The driver holds no register state of its own. Every getter issues a
//! fresh bus read and every operation runs in exactly one bus transaction.

use crate::bus::TransactionalBus;
use crate::error::Error;
use crate::pin::{Direction, Pin, Polarity, PIN_COUNT};
use crate::registers::{
    decode_directions, decode_polarities, encode_directions, encode_polarities, test_bit,
    with_bit, Register, DEFAULTS,
};

/// 7-bit I²C device address (fixed in silicon).
pub const DEVICE_ADDRESS: u8 = 0x49;

/// TCA9537 driver.
///
/// `B` is any [`TransactionalBus`]; see [`crate::bus`] for adapters over
/// `embedded_hal::i2c::I2c`. The bus lifecycle stays with the caller:
/// [`Tca9537::release`] hands it back.
pub struct Tca9537<B> {
    bus: B,
}

impl<B: TransactionalBus> Tca9537<B> {
    /// Create a driver for the expander at [`DEVICE_ADDRESS`] on `bus`.
    ///
    /// No bus traffic is generated. Hardware (and emulated devices) keep
    /// their register contents between uses; call
    /// [`reset_device_registers`](Self::reset_device_registers) for a known
    /// starting point.
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// The device address this driver talks to.
    pub const fn address(&self) -> u8 {
        DEVICE_ADDRESS
    }

    /// Give the bus back.
    pub fn release(self) -> B {
        self.bus
    }

    /// Write the power-on default of all four registers.
    ///
    /// Registers are written in address order in one transaction. The
    /// input port write is ignored by real hardware; emulated buses that
    /// model the register as writable restore it too.
    pub fn reset_device_registers(&mut self) -> Result<(), Error<B::Error>> {
        debug!("tca9537: restoring register defaults");
        self.bus
            .transaction(DEVICE_ADDRESS, |regs| {
                for (register, value) in DEFAULTS {
                    if !register.is_writable() {
                        trace!(
                            "tca9537: {} is read-only on silicon, write kept for emulated buses",
                            register.name()
                        );
                    }
                    regs.write_register(register.address(), value)?;
                }
                Ok(())
            })
            .map_err(Error::Bus)
    }

    /// Read the direction of every pin from the configuration register.
    pub fn get_pin_directions(&mut self) -> Result<[Direction; PIN_COUNT], Error<B::Error>> {
        self.read(Register::Configuration).map(decode_directions)
    }

    /// Overwrite the configuration register.
    ///
    /// Output port and polarity inversion registers are left as they are.
    pub fn set_pin_directions(
        &mut self,
        directions: [Direction; PIN_COUNT],
    ) -> Result<(), Error<B::Error>> {
        self.write(Register::Configuration, encode_directions(directions))
    }

    /// Read the polarity of every pin from the polarity inversion register.
    pub fn get_pin_polarities(&mut self) -> Result<[Polarity; PIN_COUNT], Error<B::Error>> {
        self.read(Register::PolarityInversion)
            .map(decode_polarities)
    }

    /// Overwrite the polarity inversion register.
    pub fn set_pin_polarities(
        &mut self,
        polarities: [Polarity; PIN_COUNT],
    ) -> Result<(), Error<B::Error>> {
        self.write(Register::PolarityInversion, encode_polarities(polarities))
    }

    /// Read the logical state of `pin`.
    ///
    /// For an input pin this is the live level from the input port. For an
    /// output pin it is the commanded level from the output port, which is
    /// not necessarily the level on the physical pin.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPin`] if `pin > 3`, before any bus access.
    pub fn get_pin_state(&mut self, pin: u8) -> Result<bool, Error<B::Error>> {
        let pin = Pin::new(pin)?;
        self.bus
            .transaction(DEVICE_ADDRESS, |regs| {
                let config = regs.read_register(Register::Configuration.address())?;
                let source = if test_bit(config, pin) {
                    Register::InputPort
                } else {
                    Register::OutputPort
                };
                let levels = regs.read_register(source.address())?;
                Ok(test_bit(levels, pin))
            })
            .map_err(Error::Bus)
    }

    /// Drive output `pin` active or inactive.
    ///
    /// Only the pin's bit in the output port changes; the other bits are
    /// written back as read. Returns `Ok(false)` without writing anything if
    /// the pin is configured as an input.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPin`] if `pin > 3`, before any bus access.
    /// [`Error::Bus`] if any access fails; an earlier successful write is not
    /// rolled back.
    pub fn set_pin_state(&mut self, pin: u8, active: bool) -> Result<bool, Error<B::Error>> {
        let pin = Pin::new(pin)?;
        self.bus
            .transaction(DEVICE_ADDRESS, |regs| {
                let config = regs.read_register(Register::Configuration.address())?;
                if test_bit(config, pin) {
                    debug!("tca9537: refusing to drive input pin {}", pin.index());
                    return Ok(false);
                }
                let current = regs.read_register(Register::OutputPort.address())?;
                let updated = with_bit(current, pin, active);
                regs.write_register(Register::OutputPort.address(), updated)?;
                Ok(true)
            })
            .map_err(Error::Bus)
    }

    fn read(&mut self, register: Register) -> Result<u8, Error<B::Error>> {
        self.bus
            .transaction(DEVICE_ADDRESS, |regs| regs.read_register(register.address()))
            .map_err(Error::Bus)
    }

    fn write(&mut self, register: Register, value: u8) -> Result<(), Error<B::Error>> {
        self.bus
            .transaction(DEVICE_ADDRESS, |regs| {
                regs.write_register(register.address(), value)
            })
            .map_err(Error::Bus)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::bus::ExclusiveBus;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
    use Direction::{Input as I, Output as O};

    fn read(register: u8, value: u8) -> I2cTransaction {
        I2cTransaction::write_read(DEVICE_ADDRESS, vec![register], vec![value])
    }

    fn write(register: u8, value: u8) -> I2cTransaction {
        I2cTransaction::write(DEVICE_ADDRESS, vec![register, value])
    }

    fn driver(expectations: &[I2cTransaction]) -> (Tca9537<ExclusiveBus<I2cMock>>, I2cMock) {
        let i2c = I2cMock::new(expectations);
        (Tca9537::new(ExclusiveBus::new(i2c.clone())), i2c)
    }

    #[test]
    fn device_address_is_0x49() {
        assert_eq!(DEVICE_ADDRESS, 0x49);
        let (dev, mut i2c) = driver(&[]);
        assert_eq!(dev.address(), 0x49);
        i2c.done();
    }

    #[test]
    fn reset_writes_defaults_in_address_order() {
        let (mut dev, mut i2c) = driver(&[
            write(0x00, 0b1111_0000),
            write(0x01, 0b1111_1111),
            write(0x02, 0b0000_0000),
            write(0x03, 0b1111_1111),
        ]);
        dev.reset_device_registers().unwrap();
        i2c.done();
    }

    #[test]
    fn failed_reset_write_stops_before_remaining_registers() {
        let (mut dev, mut i2c) = driver(&[
            write(0x00, 0b1111_0000),
            write(0x01, 0b1111_1111).with_error(ErrorKind::ArbitrationLoss),
        ]);
        assert_eq!(
            dev.reset_device_registers(),
            Err(Error::Bus(ErrorKind::ArbitrationLoss))
        );
        i2c.done();
    }

    #[test]
    fn get_pin_directions_reads_configuration_only() {
        let (mut dev, mut i2c) = driver(&[read(0x03, 0b0000_0110)]);
        assert_eq!(dev.get_pin_directions().unwrap(), [O, I, I, O]);
        i2c.done();
    }

    #[test]
    fn set_pin_directions_overwrites_configuration_only() {
        let (mut dev, mut i2c) = driver(&[write(0x03, 0b0000_0010)]);
        dev.set_pin_directions([O, I, O, O]).unwrap();
        i2c.done();
    }

    #[test]
    fn set_pin_polarities_overwrites_polarity_only() {
        use Polarity::{Inverted, Matching};
        let (mut dev, mut i2c) = driver(&[write(0x02, 0b0000_0010)]);
        dev.set_pin_polarities([Matching, Inverted, Matching, Matching])
            .unwrap();
        i2c.done();
    }

    #[test]
    fn get_input_pin_state_reads_input_port() {
        let (mut dev, mut i2c) = driver(&[read(0x03, 0b0000_0100), read(0x00, 0b0000_0100)]);
        assert!(dev.get_pin_state(2).unwrap());
        i2c.done();
    }

    #[test]
    fn get_output_pin_state_reads_output_port() {
        let (mut dev, mut i2c) = driver(&[read(0x03, 0b0000_0000), read(0x01, 0b0000_1011)]);
        assert!(!dev.get_pin_state(2).unwrap());
        i2c.done();
    }

    #[test]
    fn set_input_pin_state_is_refused_without_write() {
        let (mut dev, mut i2c) = driver(&[read(0x03, 0b0000_0001)]);
        assert!(!dev.set_pin_state(0, true).unwrap());
        i2c.done();
    }

    #[test]
    fn set_output_pin_state_is_read_modify_write() {
        let (mut dev, mut i2c) = driver(&[
            read(0x03, 0b1111_1101),
            read(0x01, 0b1111_0000),
            write(0x01, 0b1111_0010),
        ]);
        assert!(dev.set_pin_state(1, true).unwrap());
        i2c.done();
    }

    #[test]
    fn invalid_pin_fails_before_bus_access() {
        let (mut dev, mut i2c) = driver(&[]);
        assert!(matches!(dev.get_pin_state(4), Err(Error::InvalidPin(4))));
        assert!(matches!(dev.set_pin_state(4, true), Err(Error::InvalidPin(4))));
        // done() panics if any transaction had been issued
        i2c.done();
    }

    #[test]
    fn failed_output_write_propagates_without_retry() {
        let (mut dev, mut i2c) = driver(&[
            read(0x03, 0b0000_0000),
            read(0x01, 0b0000_0000),
            write(0x01, 0b0000_1000).with_error(ErrorKind::Bus),
        ]);
        let result = dev.set_pin_state(3, true);
        assert_eq!(result, Err(Error::Bus(ErrorKind::Bus)));
        i2c.done();
    }

    #[test]
    fn failed_configuration_read_stops_the_sequence() {
        let (mut dev, mut i2c) = driver(&[
            read(0x03, 0).with_error(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))
        ]);
        assert!(matches!(dev.get_pin_state(0), Err(Error::Bus(_))));
        i2c.done();
    }

    #[test]
    fn release_returns_the_bus() {
        let (dev, mut i2c) = driver(&[]);
        let _bus: ExclusiveBus<I2cMock> = dev.release();
        i2c.done();
    }
}
