use super::{registers, Nrf24Error, RF24};
use crate::{
    clock::Monotonic,
    radio::{
        prelude::{EsbChannel, EsbFifo, EsbInit, EsbPayloadLength, EsbPipe, EsbPower, EsbStatus},
        RadioConfig,
    },
    Mode, StatusFlags,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

impl<SPI, DO, DELAY, CLOCK> EsbInit for RF24<SPI, DO, DELAY, CLOCK>
where
    SPI: SpiBus,
    DO: OutputPin,
    DELAY: DelayNs,
    CLOCK: Monotonic,
{
    type ConfigErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// Initialize the radio's hardware using the [`SpiBus`] and [`OutputPin`]s given
    /// to [`RF24::new()`].
    fn init(&mut self) -> Result<(), Self::ConfigErrorType> {
        // idle level before the first transaction
        self.csn_high()?;

        // The radio needs up to 100 ms after power-on-reset before it accepts commands.
        self._delay_impl.delay_ms(100);

        self.with_config(&RadioConfig::default())
    }

    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType> {
        // stop any RX or TX activity before the registers change
        self.ce_low()?;

        // Set CONFIG register:
        //      Set all IRQ events on IRQ pin
        //      Set CRC length
        //      Power down
        //      Enable PTX
        let config_reg = config.config_reg.with_power(false).as_tx();
        self.spi_write_byte(registers::CONFIG, config_reg.into_bits())?;
        self._mode = Mode::PowerDown;
        self.spi_read(1, registers::CONFIG)?;
        if self._buf[1] != config_reg.into_bits() {
            warn!(
                "CONFIG readback {=u8:#X} != {=u8:#X}",
                self._buf[1],
                config_reg.into_bits()
            );
            return Err(Nrf24Error::BinaryCorruption);
        }

        self.spi_write_byte(registers::EN_AA, config.auto_ack())?;
        self.spi_write_byte(registers::EN_RXADDR, config.rx_pipes())?;
        // 5 byte addresses
        self.spi_write_byte(registers::SETUP_AW, 3)?;
        self.spi_write_byte(registers::SETUP_RETR, config.auto_retries.into_bits())?;
        self.set_channel(config.channel())?;
        self.spi_write_byte(registers::RF_SETUP, config.setup_rf.into_bits())?;
        self.set_payload_size(config.payload_size())?;
        if let Some(address) = config.address() {
            self.set_address(&address)?;
        }

        // Flush buffers
        self.flush_rx()?;
        self.flush_tx()?;
        self.clear_status_flags(StatusFlags::new())?;

        // Do not write CE high so radio will remain in standby-I mode.
        self.power_up(None)?;
        debug!("radio configured on channel {=u8}", config.channel());
        Ok(())
    }
}
