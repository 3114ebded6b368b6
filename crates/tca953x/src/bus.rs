//! Transactional register access over an I²C bus.
//!
//! The driver never talks to `embedded_hal::i2c::I2c` directly. It opens a
//! scoped transaction with [`TransactionalBus::transaction`] and performs all
//! register reads and writes of one logical operation through the
//! [`RegisterAccess`] handle passed to the closure. The bus is held for the
//! whole closure and released when it returns, on the error path as well.
//!
//! Adapters, mirroring the sharing strategies of `embedded-hal-bus`:
//!
//! | adapter | sharing | lock |
//! |---|---|---|
//! | [`ExclusiveBus`] | none (owns the bus) | `&mut` borrow |
//! | [`RefCellBus`] | single thread | `RefCell::borrow_mut` |
//! | [`CriticalSectionBus`] | threads and interrupts | `critical_section::with` |
//! | [`MutexBus`] (`std`) | threads | `std::sync::Mutex` |
//!
//! # Single-byte register access
//!
//! Each register read is a separate `write_read` that sends exactly one
//! address byte and reads back exactly one data byte. Each write is a single
//! `write` of `[register, value]`.

use core::cell::RefCell;

use embedded_hal::i2c::I2c;

/// Register-level access inside an open transaction.
pub trait RegisterAccess {
    /// Transport error type.
    type Error;

    /// Read one 8-bit register.
    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error>;

    /// Write one 8-bit register.
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error>;
}

/// A bus that can run a sequence of register accesses as one unit.
pub trait TransactionalBus {
    /// Transport error type.
    type Error;

    /// Acquire the bus for `address`, run `f`, release the bus.
    ///
    /// No other user of the same bus can interleave accesses while `f` runs.
    /// Errors from `f` are returned unchanged after the bus is released.
    fn transaction<R, F>(&mut self, address: u8, f: F) -> Result<R, Self::Error>
    where
        F: FnOnce(&mut dyn RegisterAccess<Error = Self::Error>) -> Result<R, Self::Error>;
}

impl<T: TransactionalBus + ?Sized> TransactionalBus for &mut T {
    type Error = T::Error;

    fn transaction<R, F>(&mut self, address: u8, f: F) -> Result<R, Self::Error>
    where
        F: FnOnce(&mut dyn RegisterAccess<Error = Self::Error>) -> Result<R, Self::Error>,
    {
        (**self).transaction(address, f)
    }
}

// ---------------------------------------------------------------------------
// Register access over embedded-hal I2c
// ---------------------------------------------------------------------------

/// [`RegisterAccess`] for one device on an `embedded_hal::i2c::I2c` bus.
pub struct I2cRegisters<'a, I> {
    i2c: &'a mut I,
    address: u8,
}

impl<'a, I: I2c> I2cRegisters<'a, I> {
    /// Address the device at `address` on `i2c`.
    pub fn new(i2c: &'a mut I, address: u8) -> Self {
        Self { i2c, address }
    }
}

impl<I: I2c> RegisterAccess for I2cRegisters<'_, I> {
    type Error = I::Error;

    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8];
        self.i2c.write_read(self.address, &[register], &mut buf)?;
        let [value] = buf;
        trace!("tca953x: read  reg {} = {}", register, value);
        Ok(value)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        trace!("tca953x: write reg {} = {}", register, value);
        self.i2c.write(self.address, &[register, value])
    }
}

fn run<I, R, F>(i2c: &mut I, address: u8, f: F) -> Result<R, I::Error>
where
    I: I2c,
    F: FnOnce(&mut dyn RegisterAccess<Error = I::Error>) -> Result<R, I::Error>,
{
    trace!("tca953x: transaction open, addr {}", address);
    let regs: &mut dyn RegisterAccess<Error = I::Error> = &mut I2cRegisters::new(i2c, address);
    let result = f(regs);
    trace!(
        "tca953x: transaction closed, addr {}, ok {}",
        address,
        result.is_ok()
    );
    result
}

// ---------------------------------------------------------------------------
// Adapters
// ---------------------------------------------------------------------------

/// Sole owner of an I²C bus.
pub struct ExclusiveBus<I> {
    i2c: I,
}

impl<I> ExclusiveBus<I> {
    /// Take ownership of `i2c`.
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Give the underlying bus back.
    pub fn into_inner(self) -> I {
        self.i2c
    }
}

impl<I: I2c> TransactionalBus for ExclusiveBus<I> {
    type Error = I::Error;

    fn transaction<R, F>(&mut self, address: u8, f: F) -> Result<R, Self::Error>
    where
        F: FnOnce(&mut dyn RegisterAccess<Error = Self::Error>) -> Result<R, Self::Error>,
    {
        run(&mut self.i2c, address, f)
    }
}

/// Bus shared between devices on one thread.
///
/// The `RefCell` is borrowed for the duration of a transaction. Opening a
/// second transaction on the same bus from inside the first one panics.
pub struct RefCellBus<'a, I> {
    bus: &'a RefCell<I>,
}

impl<'a, I> RefCellBus<'a, I> {
    /// Share `bus`.
    pub fn new(bus: &'a RefCell<I>) -> Self {
        Self { bus }
    }
}

impl<I: I2c> TransactionalBus for RefCellBus<'_, I> {
    type Error = I::Error;

    fn transaction<R, F>(&mut self, address: u8, f: F) -> Result<R, Self::Error>
    where
        F: FnOnce(&mut dyn RegisterAccess<Error = Self::Error>) -> Result<R, Self::Error>,
    {
        let mut i2c = self.bus.borrow_mut();
        run(&mut *i2c, address, f)
    }
}

/// Bus shared between threads and interrupt handlers.
///
/// The whole transaction runs inside one critical section, so keep the
/// closure short.
pub struct CriticalSectionBus<'a, I> {
    bus: &'a critical_section::Mutex<RefCell<I>>,
}

impl<'a, I> CriticalSectionBus<'a, I> {
    /// Share `bus`.
    pub fn new(bus: &'a critical_section::Mutex<RefCell<I>>) -> Self {
        Self { bus }
    }
}

impl<I: I2c> TransactionalBus for CriticalSectionBus<'_, I> {
    type Error = I::Error;

    fn transaction<R, F>(&mut self, address: u8, f: F) -> Result<R, Self::Error>
    where
        F: FnOnce(&mut dyn RegisterAccess<Error = Self::Error>) -> Result<R, Self::Error>,
    {
        critical_section::with(|cs| {
            let mut i2c = self.bus.borrow_ref_mut(cs);
            run(&mut *i2c, address, f)
        })
    }
}

/// Bus shared between threads with a `std::sync::Mutex`.
///
/// A poisoned mutex is recovered: the bus itself carries no invariant that
/// a panicking holder could have broken.
#[cfg(feature = "std")]
pub struct MutexBus<'a, I> {
    bus: &'a std::sync::Mutex<I>,
}

#[cfg(feature = "std")]
impl<'a, I> MutexBus<'a, I> {
    /// Share `bus`.
    pub fn new(bus: &'a std::sync::Mutex<I>) -> Self {
        Self { bus }
    }
}

#[cfg(feature = "std")]
impl<I: I2c> TransactionalBus for MutexBus<'_, I> {
    type Error = I::Error;

    fn transaction<R, F>(&mut self, address: u8, f: F) -> Result<R, Self::Error>
    where
        F: FnOnce(&mut dyn RegisterAccess<Error = Self::Error>) -> Result<R, Self::Error>,
    {
        let mut i2c = self
            .bus
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        run(&mut *i2c, address, f)
    }
}
