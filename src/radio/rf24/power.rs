use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

use crate::{
    clock::Monotonic,
    radio::{prelude::EsbPower, Nrf24Error, RF24},
    Mode,
};

use super::{registers, Config};

impl<SPI, DO, DELAY, CLOCK> EsbPower for RF24<SPI, DO, DELAY, CLOCK>
where
    SPI: SpiBus,
    DO: OutputPin,
    DELAY: DelayNs,
    CLOCK: Monotonic,
{
    type PowerErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// In power standby mode (when not receiving nor transmitting), a non-PA/LNA radio
    /// will consume about 26uA (.026mA).
    /// In full power down mode (a sleep state), the radio will consume approximately
    /// 900nA (.0009mA).
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType> {
        self.ce_low()?; // Guarantee CE is low on powerDown
        self.spi_read(1, registers::CONFIG)?;
        let config = Config::from_bits(self._buf[1]).with_power(false);
        self.spi_write_byte(registers::CONFIG, config.into_bits())?;
        self._mode = Mode::PowerDown;
        debug!("radio powered down");
        Ok(())
    }

    fn power_up(&mut self, delay: Option<u32>) -> Result<(), Self::PowerErrorType> {
        self.spi_read(1, registers::CONFIG)?;
        let config = Config::from_bits(self._buf[1]).with_power(true);
        self.spi_write_byte(registers::CONFIG, config.into_bits())?;

        // For nRF24L01+ to go from power down mode to TX or RX mode it must first pass through stand-by mode.
        // There must be a delay of Tpd2standby (see Table 16.) after the nRF24L01+ leaves power down mode before
        // the CE is set high. Tpd2standby can be up to 5ms per the 1.0 datasheet
        match delay {
            Some(d) => {
                if d > 0 {
                    self._delay_impl.delay_us(d);
                }
            }
            None => self._delay_impl.delay_us(5000),
        }
        self._mode = Mode::from_lines(true, config.is_rx(), self._ce_high);
        debug!("radio powered up in {}", self._mode);
        Ok(())
    }

    /// Is the radio powered up?
    fn is_powered(&self) -> bool {
        self._mode.is_powered()
    }
}
