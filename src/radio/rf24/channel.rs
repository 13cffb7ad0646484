use super::registers;
use crate::{
    clock::Monotonic,
    radio::{prelude::EsbChannel, Nrf24Error, RF24},
    Clamped,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

impl<SPI, DO, DELAY, CLOCK> EsbChannel for RF24<SPI, DO, DELAY, CLOCK>
where
    SPI: SpiBus,
    DO: OutputPin,
    DELAY: DelayNs,
    CLOCK: Monotonic,
{
    type ChannelErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// The nRF24L01 support 126 channels. The specified `channel` is
    /// clamped to the range [0, 125].
    fn set_channel(&mut self, channel: u8) -> Result<Clamped, Self::ChannelErrorType> {
        let result = Clamped::new(channel, channel.min(125));
        if result.was_clamped() {
            warn!("channel {=u8} clamped to {=u8}", result.requested, result.applied);
        }
        self.spi_write_byte(registers::RF_CH, result.applied)?;
        Ok(result)
    }

    /// See also [`RF24::set_channel()`].
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType> {
        self.spi_read(1, registers::RF_CH)?;
        Ok(self._buf[1])
    }
}
