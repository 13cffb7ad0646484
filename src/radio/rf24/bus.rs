use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

use super::{commands, registers, Nrf24Error, RF24};
use crate::{clock::Monotonic, StatusFlags};

/// The most data bytes a single transaction carries (after the command byte).
pub(super) const MAX_BLOCK: usize = 32;

impl<SPI, DO, DELAY, CLOCK> RF24<SPI, DO, DELAY, CLOCK>
where
    SPI: SpiBus,
    DO: OutputPin,
    DELAY: DelayNs,
    CLOCK: Monotonic,
{
    /// Exchange the first `len` bytes of the internal buffer within one CSN frame.
    ///
    /// CSN is released even when the bus fails. The bus error is reported afterward.
    pub(super) fn spi_transfer(&mut self, len: u8) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._csn_pin.set_low().map_err(Nrf24Error::Gpo)?;
        let result = self
            ._spi
            .transfer_in_place(&mut self._buf[..len as usize])
            .and_then(|_| self._spi.flush());
        self._csn_pin.set_high().map_err(Nrf24Error::Gpo)?;
        result.map_err(Nrf24Error::Spi)?;
        self._status = StatusFlags::from_bits(self._buf[0]);
        Ok(())
    }

    /// This is also used to write SPI commands that consist of 1 byte:
    /// ```ignore
    /// self.spi_read(0, commands::NOP)?;
    /// // STATUS register is now stored in self._status
    /// ```
    ///
    /// The `len` data bytes are clocked out as `NOP`s.
    pub(super) fn spi_read(
        &mut self,
        len: u8,
        command: u8,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._buf[0] = command;
        self._buf[1..(len as usize + 1)].fill(commands::NOP);
        self.spi_transfer(len + 1)
    }

    pub(super) fn spi_write_byte(
        &mut self,
        command: u8,
        byte: u8,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._buf[0] = command | commands::W_REGISTER;
        self._buf[1] = byte;
        self.spi_transfer(2)
    }

    pub(super) fn spi_write_buf(
        &mut self,
        command: u8,
        buf: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._buf[0] = command | commands::W_REGISTER;
        let buf_len = buf.len();
        self._buf[1..(buf_len + 1)].copy_from_slice(&buf[..buf_len]);
        self.spi_transfer(buf_len as u8 + 1)
    }

    pub(super) fn ce_high(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._ce_pin.set_high().map_err(Nrf24Error::Gpo)?;
        self._ce_high = true;
        Ok(())
    }

    pub(super) fn ce_low(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        self._ce_high = false;
        Ok(())
    }

    pub(super) fn csn_high(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._csn_pin.set_high().map_err(Nrf24Error::Gpo)
    }

    /// Read a single register.
    ///
    /// Only the lower 5 bits of `address` are used.
    pub fn read_register(&mut self, address: u8) -> Result<u8, Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_read(1, address & registers::ADDRESS_MASK)?;
        Ok(self._buf[1])
    }

    /// Write a single register.
    ///
    /// Only the lower 5 bits of `address` are used.
    pub fn write_register(
        &mut self,
        address: u8,
        value: u8,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_write_byte(address & registers::ADDRESS_MASK, value)
    }

    /// Read a multi-byte register (like an address) into `buf`.
    ///
    /// At most 32 bytes are read. An empty `buf` still frames the command byte.
    pub fn read_register_block(
        &mut self,
        address: u8,
        buf: &mut [u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let len = buf.len().min(MAX_BLOCK);
        self.spi_read(len as u8, address & registers::ADDRESS_MASK)?;
        buf[..len].copy_from_slice(&self._buf[1..(len + 1)]);
        Ok(())
    }

    /// Write a multi-byte register (like an address) from `buf`.
    ///
    /// At most 32 bytes are written.
    /// Returns the STATUS byte that the radio clocked out during the command byte.
    pub fn write_register_block(
        &mut self,
        address: u8,
        buf: &[u8],
    ) -> Result<StatusFlags, Nrf24Error<SPI::Error, DO::Error>> {
        let len = buf.len().min(MAX_BLOCK);
        self.spi_write_buf(address & registers::ADDRESS_MASK, &buf[..len])?;
        Ok(self._status)
    }
}
