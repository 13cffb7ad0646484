use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

use crate::{
    clock::Monotonic,
    radio::{prelude::EsbPipe, Nrf24Error, RF24},
};

use super::registers;

impl<SPI, DO, DELAY, CLOCK> EsbPipe for RF24<SPI, DO, DELAY, CLOCK>
where
    SPI: SpiBus,
    DO: OutputPin,
    DELAY: DelayNs,
    CLOCK: Monotonic,
{
    type PipeErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn set_address(&mut self, address: &[u8; 5]) -> Result<(), Self::PipeErrorType> {
        self.spi_write_buf(registers::TX_ADDR, address)?;
        // auto-ACK packets are received on pipe 0
        self.spi_write_buf(registers::RX_ADDR_P0, address)
    }

    fn get_address(&mut self, address: &mut [u8; 5]) -> Result<(), Self::PipeErrorType> {
        self.spi_read(5, registers::TX_ADDR)?;
        address.copy_from_slice(&self._buf[1..6]);
        Ok(())
    }

    fn get_rx_address(&mut self, address: &mut [u8; 5]) -> Result<(), Self::PipeErrorType> {
        self.spi_read(5, registers::RX_ADDR_P0)?;
        address.copy_from_slice(&self._buf[1..6]);
        Ok(())
    }
}
