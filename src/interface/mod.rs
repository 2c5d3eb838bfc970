//! Bus interface abstraction for the ADXL362 driver.

pub mod spi;

/// Command byte placed in the high half of an addressed register read.
pub const CMD_READ_REGISTER: u8 = 0x0B;
/// Command byte placed in the high half of an addressed register write.
pub const CMD_WRITE_REGISTER: u8 = 0x0A;
/// Command byte that streams FIFO contents without a register address.
pub const CMD_READ_FIFO: u8 = 0x0D;

/// Builds the 16-bit address of a register read transaction.
pub const fn read_address(register: u8) -> u16 {
    ((CMD_READ_REGISTER as u16) << 8) | register as u16
}

/// Builds the 16-bit address of a register write transaction.
pub const fn write_address(register: u8) -> u16 {
    ((CMD_WRITE_REGISTER as u16) << 8) | register as u16
}

/// Abstraction over the low-level bus access required by the driver.
pub trait Adxl362Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Acquires the bus. Called once by [`init`](crate::Adxl362::init).
    fn open(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }

    /// Releases the bus. Called by [`deinit`](crate::Adxl362::deinit) and on init failure.
    fn close(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }

    /// Issues a single command byte and reads the response, without an address byte.
    fn read(&mut self, command: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error>;

    /// Reads consecutive registers starting at the 16-bit command/address word.
    fn read_addressed(&mut self, address: u16, buf: &mut [u8]) -> core::result::Result<(), Self::Error>;

    /// Writes consecutive registers starting at the 16-bit command/address word.
    fn write_addressed(&mut self, address: u16, data: &[u8]) -> core::result::Result<(), Self::Error>;
}
