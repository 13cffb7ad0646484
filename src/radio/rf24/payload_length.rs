use super::registers;
use crate::{
    clock::Monotonic,
    radio::{prelude::EsbPayloadLength, Nrf24Error, RF24},
    Clamped,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

impl<SPI, DO, DELAY, CLOCK> EsbPayloadLength for RF24<SPI, DO, DELAY, CLOCK>
where
    SPI: SpiBus,
    DO: OutputPin,
    DELAY: DelayNs,
    CLOCK: Monotonic,
{
    type PayloadLengthErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn set_payload_size(&mut self, size: u8) -> Result<Clamped, Self::PayloadLengthErrorType> {
        let result = Clamped::new(size, size.clamp(1, 32));
        if result.was_clamped() {
            warn!(
                "payload size {=u8} clamped to {=u8}",
                result.requested,
                result.applied
            );
        }
        self.spi_write_byte(registers::RX_PW_P0, result.applied)?;
        self._payload_length = result.applied;
        Ok(result)
    }

    fn get_payload_size(&mut self) -> Result<u8, Self::PayloadLengthErrorType> {
        self.spi_read(1, registers::RX_PW_P0)?;
        Ok(self._buf[1] & 0x3F)
    }
}
