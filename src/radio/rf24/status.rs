use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

use crate::{
    clock::Monotonic,
    radio::{prelude::EsbStatus, Nrf24Error, RF24},
    types::StatusFlags,
};

use super::{commands, registers};

impl<SPI, DO, DELAY, CLOCK> EsbStatus for RF24<SPI, DO, DELAY, CLOCK>
where
    SPI: SpiBus,
    DO: OutputPin,
    DELAY: DelayNs,
    CLOCK: Monotonic,
{
    type StatusErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType> {
        self.spi_write_byte(registers::STATUS, flags.into_bits() & StatusFlags::IRQ_MASK)
    }

    fn update(&mut self) -> Result<(), Self::StatusErrorType> {
        self.spi_read(0, commands::NOP)
    }

    fn get_status(&mut self) -> Result<StatusFlags, Self::StatusErrorType> {
        self.update()?;
        Ok(self._status)
    }

    fn get_status_flags(&self, flags: &mut StatusFlags) {
        *flags = self._status;
    }
}
