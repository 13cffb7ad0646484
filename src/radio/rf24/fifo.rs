use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

use crate::radio::{prelude::EsbFifo, Nrf24Error, RF24};
use crate::{clock::Monotonic, FifoState};

use super::{commands, registers};

/// FIFO_STATUS keeps the RX FIFO in the low nibble and the TX FIFO in the high nibble.
/// Bit 0 of a nibble is EMPTY, bit 1 is FULL.
const fn fifo_state(nibble: u8) -> FifoState {
    match nibble & 3 {
        1 => FifoState::Empty,
        2 => FifoState::Full,
        _ => FifoState::Occupied,
    }
}

impl<SPI, DO, DELAY, CLOCK> EsbFifo for RF24<SPI, DO, DELAY, CLOCK>
where
    SPI: SpiBus,
    DO: OutputPin,
    DELAY: DelayNs,
    CLOCK: Monotonic,
{
    type FifoErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.spi_read(0, commands::FLUSH_RX)
    }

    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.spi_read(0, commands::FLUSH_TX)
    }

    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType> {
        let fifo_status = self.read_register(registers::FIFO_STATUS)?;
        let nibble = if about_tx { fifo_status >> 4 } else { fifo_status };
        Ok(fifo_state(nibble))
    }
}
