//! SPI interface implementation built on top of `embedded-hal` `SpiDevice`.

use embedded_hal::spi::{Operation, SpiDevice};

use super::Adxl362Interface;

/// SPI-based interface implementation for the ADXL362 driver.
///
/// Chip-select framing is delegated to the [`SpiDevice`], so `open`/`close`
/// keep their no-op defaults.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Creates a new interface from the provided SPI device abstraction.
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Provides mutable access to the wrapped SPI device.
    pub fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Consumes the interface and returns the owned SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> Adxl362Interface for SpiInterface<SPI>
where
    SPI: SpiDevice,
{
    type Error = SPI::Error;

    fn read(&mut self, command: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if buf.is_empty() {
            return Ok(());
        }

        let command = [command];
        let mut operations = [Operation::Write(&command), Operation::Read(buf)];
        self.spi.transaction(&mut operations)
    }

    fn read_addressed(&mut self, address: u16, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if buf.is_empty() {
            return Ok(());
        }

        let header = address.to_be_bytes();
        let mut operations = [Operation::Write(&header), Operation::Read(buf)];
        self.spi.transaction(&mut operations)
    }

    fn write_addressed(&mut self, address: u16, data: &[u8]) -> core::result::Result<(), Self::Error> {
        if data.is_empty() {
            return Ok(());
        }

        let header = address.to_be_bytes();
        let mut operations = [Operation::Write(&header), Operation::Write(data)];
        self.spi.transaction(&mut operations)
    }
}
