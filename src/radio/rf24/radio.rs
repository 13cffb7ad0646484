use super::{commands, mnemonics, registers, Config, Nrf24Error, RF24};
use crate::{
    clock::Monotonic,
    radio::prelude::{EsbFifo, EsbRadio, EsbStatus},
    Clamped, Mode, StatusFlags, TxOutcome, TxReport,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

/// The minimum CE pulse is 10 microseconds.
const CE_PULSE_US: u32 = 15;

impl<SPI, DO, DELAY, CLOCK> RF24<SPI, DO, DELAY, CLOCK>
where
    SPI: SpiBus,
    DO: OutputPin,
    DELAY: DelayNs,
    CLOCK: Monotonic,
{
    fn ensure_powered(&self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        if self._mode.is_powered() {
            Ok(())
        } else {
            Err(Nrf24Error::PoweredDown)
        }
    }

    /// Pulse CE to send the top of the TX FIFO.
    fn pulse_ce(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.ce_high()?;
        self._mode = Mode::ActiveTx;
        self._delay_impl.delay_us(CE_PULSE_US);
        self.ce_low()?;
        self._mode = Mode::StandbyTx;
        Ok(())
    }

    /// Poll the STATUS byte until the transmission ends or `tx_timeout_ms` elapses.
    ///
    /// The observed event flag is cleared. After max retries the TX FIFO is flushed,
    /// but a timeout leaves the payload in the TX FIFO.
    fn wait_for_ack(&mut self) -> Result<TxOutcome, Nrf24Error<SPI::Error, DO::Error>> {
        let start = self._clock.now_ms();
        while self._clock.now_ms().wrapping_sub(start) < self.tx_timeout_ms {
            self.update()?;
            if self._status.tx_ds() {
                self.clear_status_flags(StatusFlags::default().with_tx_ds(true))?;
                trace!("payload acknowledged");
                return Ok(TxOutcome::Acknowledged);
            }
            if self._status.tx_df() {
                self.clear_status_flags(StatusFlags::default().with_tx_df(true))?;
                self.flush_tx()?;
                debug!("max retries reached, TX FIFO flushed");
                return Ok(TxOutcome::MaxRetries);
            }
            self._delay_impl.delay_us(self.poll_interval_us);
        }
        warn!("transmission timed out after {=u32} ms", self.tx_timeout_ms);
        Ok(TxOutcome::Timeout)
    }
}

impl<SPI, DO, DELAY, CLOCK> EsbRadio for RF24<SPI, DO, DELAY, CLOCK>
where
    SPI: SpiBus,
    DO: OutputPin,
    DELAY: DelayNs,
    CLOCK: Monotonic,
{
    type RadioErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// The CE pin is driven low after the PRIM_RX bit is cleared,
    /// then [`RF24::settle_us`] is waited.
    ///
    /// While powered down, only the role and CE level are prepared.
    /// [`Mode::StandbyTx`] is entered by the next [`RF24::power_up()`].
    fn set_tx_mode(&mut self) -> Result<(), Self::RadioErrorType> {
        self.spi_read(1, registers::CONFIG)?;
        let config = Config::from_bits(self._buf[1]).as_tx();
        self.spi_write_byte(registers::CONFIG, config.into_bits())?;
        self.ce_low()?;
        self._delay_impl.delay_us(self.settle_us);
        self._mode = Mode::from_lines(self._mode.is_powered(), false, false);
        Ok(())
    }

    /// The CE pin is driven high after the PRIM_RX bit is set,
    /// then [`RF24::settle_us`] is waited.
    ///
    /// This is repeated on every call (even when already listening).
    /// While powered down, listening starts with the next [`RF24::power_up()`].
    fn set_rx_mode(&mut self) -> Result<(), Self::RadioErrorType> {
        self.spi_read(1, registers::CONFIG)?;
        let config = Config::from_bits(self._buf[1]).as_rx();
        self.spi_write_byte(registers::CONFIG, config.into_bits())?;
        self.ce_high()?;
        self._delay_impl.delay_us(self.settle_us);
        self._mode = Mode::from_lines(self._mode.is_powered(), true, true);
        Ok(())
    }

    fn mode(&self) -> Mode {
        self._mode
    }

    /// See [`EsbRadio::transmit_report()`] for implementation-agnostic detail.
    ///
    /// This function enters TX mode and flushes the TX FIFO upon entry.
    /// The radio is left in [`Mode::StandbyTx`].
    fn transmit_report(&mut self, buf: &[u8]) -> Result<TxReport, Self::RadioErrorType> {
        self.ensure_powered()?;
        self.set_tx_mode()?;
        // this function only handles 1 payload at a time
        self.flush_tx()?;

        let payload_len = self._payload_length as usize;
        let length = Clamped::new(buf.len(), buf.len().min(payload_len));
        if length.was_clamped() {
            warn!(
                "payload truncated from {=usize} to {=usize} bytes",
                length.requested,
                length.applied
            );
        }
        // to avoid resizing the given buf, we'll have to use self._buf directly
        self._buf[0] = commands::W_TX_PAYLOAD;
        self._buf[1..(length.applied + 1)].copy_from_slice(&buf[..length.applied]);
        // pad buf with zeros
        self._buf[(length.applied + 1)..(payload_len + 1)].fill(0);
        self.spi_transfer(payload_len as u8 + 1)?;

        self.pulse_ce()?;
        let outcome = self.wait_for_ack()?;
        Ok(TxReport { outcome, length })
    }

    fn resend(&mut self) -> Result<TxOutcome, Self::RadioErrorType> {
        self.ensure_powered()?;
        self.set_tx_mode()?;
        self.clear_status_flags(StatusFlags::from_bits(
            mnemonics::MASK_MAX_RT | mnemonics::MASK_TX_DS,
        ))?;
        // assert the REUSE_TX_PL flag
        self.spi_read(0, commands::REUSE_TX_PL)?;
        self.pulse_ce()?;
        self.wait_for_ack()
    }

    /// See [`EsbRadio::receive()`] for implementation-agnostic detail.
    ///
    /// The payload is always read with the static payload size.
    /// `len` is set to the number of bytes copied into `buf`, which is the static
    /// payload size unless `buf` is shorter (the excess is discarded).
    fn receive(&mut self, buf: &mut [u8], len: &mut u8) -> Result<bool, Self::RadioErrorType> {
        self.ensure_powered()?;
        self.set_rx_mode()?;
        self.update()?;
        if !self._status.rx_dr() {
            return Ok(false);
        }
        let payload_len = self._payload_length;
        self.spi_read(payload_len, commands::R_RX_PAYLOAD)?;
        let copied = buf.len().min(payload_len as usize);
        if copied < payload_len as usize {
            warn!(
                "RX buffer holds {=usize} of {=u8} payload bytes",
                copied,
                payload_len
            );
        }
        buf[..copied].copy_from_slice(&self._buf[1..(copied + 1)]);
        *len = copied as u8;
        self.clear_status_flags(StatusFlags::default().with_rx_dr(true))?;
        Ok(true)
    }

    fn get_last_arc(&mut self) -> Result<u8, Self::RadioErrorType> {
        self.spi_read(1, registers::OBSERVE_TX)?;
        Ok(self._buf[1] & 0xF)
    }
}
