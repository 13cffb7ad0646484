use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};
pub(crate) mod bit_fields;
use bit_fields::Config;
mod bus;
mod channel;
mod constants;
mod details;
mod fifo;
mod init;
mod payload_length;
mod pipe;
mod power;
mod radio;
mod status;
pub use constants::{commands, mnemonics, registers};

use crate::{clock::Monotonic, Mode, StatusFlags};

/// An collection of error types to describe hardware malfunctions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nrf24Error<SPI, DO> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// Represents a DigitalOutput error.
    Gpo(DO),
    /// Represents a corruption of binary data (as it was transferred over the SPI bus' MISO)
    BinaryCorruption,
    /// An error used to prevent radio usage while it is powered down.
    ///
    /// This occurs when a transmission or reception is requested
    /// before [`RF24::init()`] or after [`RF24::power_down()`].
    PoweredDown,
}

/// This struct implements the [`Esb*` traits](mod@crate::radio::prelude)
/// for the nRF24L01 transceiver.
///
/// The driver owns the SPI bus and both control lines exclusively.
/// To share the radio between tasks, wrap it in a mutex of your choice.
///
/// Additionally, there are some functions implemented that are specific to the nRF24L01.
pub struct RF24<SPI, DO, DELAY, CLOCK> {
    /// The longest time (in milliseconds) that [`RF24::transmit()`] waits for
    /// an ACK or a max-retries event. Defaults to 100.
    pub tx_timeout_ms: u32,
    /// The delay (in microseconds) between status polls while waiting
    /// for a transmission to end. Defaults to 1000.
    pub poll_interval_us: u32,
    /// The delay (in microseconds) applied after every mode change.
    /// Defaults to 1000.
    ///
    /// <div class="warning">
    ///
    /// The radio needs 130 microseconds to settle in RX or TX mode.
    ///
    /// </div>
    pub settle_us: u32,
    _spi: SPI,
    _ce_pin: DO,
    _csn_pin: DO,
    _delay_impl: DELAY,
    _clock: CLOCK,
    _buf: [u8; 33],
    _status: StatusFlags,
    _mode: Mode,
    _ce_high: bool,
    _payload_length: u8,
}

impl<SPI, DO, DELAY, CLOCK> RF24<SPI, DO, DELAY, CLOCK>
where
    SPI: SpiBus,
    DO: OutputPin,
    DELAY: DelayNs,
    CLOCK: Monotonic,
{
    /// Instantiate an [`RF24`] object for use on the specified
    /// `spi` bus with the given `ce_pin` and `csn_pin`.
    ///
    /// The bus and pins must already be configured by the platform HAL.
    /// The driver asserts CSN itself, so `spi` is a raw [`SpiBus`]
    /// (not a [`SpiDevice`](trait@embedded_hal::spi::SpiDevice)).
    ///
    /// The `clock` is only used to bound the wait for a transmission to end.
    /// Nothing happens on the bus until [`RF24::init()`] is called.
    pub fn new(
        ce_pin: DO,
        csn_pin: DO,
        spi: SPI,
        delay_impl: DELAY,
        clock: CLOCK,
    ) -> RF24<SPI, DO, DELAY, CLOCK> {
        RF24 {
            tx_timeout_ms: 100,
            poll_interval_us: 1000,
            settle_us: 1000,
            _spi: spi,
            _ce_pin: ce_pin,
            _csn_pin: csn_pin,
            _delay_impl: delay_impl,
            _clock: clock,
            _status: StatusFlags::from_bits(0),
            _buf: [0u8; 33],
            _mode: Mode::PowerDown,
            _ce_high: false,
            _payload_length: 32,
        }
    }

    /// Release the bus and pins.
    pub fn free(self) -> (SPI, DO, DO, DELAY, CLOCK) {
        (
            self._spi,
            self._ce_pin,
            self._csn_pin,
            self._delay_impl,
            self._clock,
        )
    }

    /// Received Power Detector.
    ///
    /// Returns `true` if a signal above -64 dBm was present on the
    /// current channel during the last RX period.
    pub fn rpd(&mut self) -> Result<bool, Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::RPD)?;
        Ok(self._buf[1] & 1 == 1)
    }
}
