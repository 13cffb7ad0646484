//! This module defines the generic traits that may
//! need to imported to use radio implementations.
//!
//! Since rustc only compiles objects that are used,
//! it is convenient to import these traits with the `*` syntax.
//!
//! ```ignore
//! use nrf24l01::radio::prelude::*;
//! ```

use crate::types::{Clamped, FifoState, Mode, StatusFlags, TxOutcome, TxReport};

use super::RadioConfig;

/// A trait to represent the 5-byte address shared by the
/// TX address and the RX pipe 0 address.
pub trait EsbPipe {
    type PipeErrorType;

    /// Set the address used for transmitting and for receiving on pipe 0.
    ///
    /// The same 5 bytes are written to both registers so that auto-ACK
    /// packets (which arrive on pipe 0) can be received after a transmission.
    ///
    /// The bytes are sent LSByte first, exactly as given.
    fn set_address(&mut self, address: &[u8; 5]) -> Result<(), Self::PipeErrorType>;

    /// Read back the TX address.
    fn get_address(&mut self, address: &mut [u8; 5]) -> Result<(), Self::PipeErrorType>;

    /// Read back the RX address of pipe 0.
    fn get_rx_address(&mut self, address: &mut [u8; 5]) -> Result<(), Self::PipeErrorType>;
}

/// A trait to represent manipulation of a channel (aka frequency)
/// for an ESB capable transceiver.
pub trait EsbChannel {
    type ChannelErrorType;

    /// Set the radio's currently selected channel.
    ///
    /// These channels translate to the RF frequency as an offset of MHz from 2400 MHz.
    /// The default channel is 76 (2400 + 76 = 2.476 GHz).
    ///
    /// Values above 125 are clamped, never rejected. The returned [`Clamped`]
    /// tells what was actually written.
    fn set_channel(&mut self, channel: u8) -> Result<Clamped, Self::ChannelErrorType>;

    /// Get the radio's currently selected channel.
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType>;
}

/// A trait to represent manipulation of [`StatusFlags`]
/// for an ESB capable transceiver.
pub trait EsbStatus {
    type StatusErrorType;

    /// Get the [`StatusFlags`] state that was cached from the latest SPI transaction.
    fn get_status_flags(&self, flags: &mut StatusFlags);

    /// Query the STATUS byte with a `NOP` command and return it.
    fn get_status(&mut self) -> Result<StatusFlags, Self::StatusErrorType>;

    /// Clear the radio's sticky event flags.
    ///
    /// Set any member of [`StatusFlags`] to `true` to clear the corresponding
    /// event. Setting any member to `false` leaves that flag untouched.
    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType>;

    /// Refresh the internal cache of status byte
    /// (which is also saved from every SPI transaction).
    ///
    /// Use [`EsbStatus::get_status_flags()`] to get the updated status flags.
    fn update(&mut self) -> Result<(), Self::StatusErrorType>;
}

/// A trait to represent manipulation of RX and TX FIFOs
/// for an ESB capable transceiver.
pub trait EsbFifo {
    type FifoErrorType;

    /// Flush the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Flush the radio's TX FIFO.
    ///
    /// This function is automatically called by [`EsbRadio::transmit()`]
    /// before loading a new payload.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Get the state of the specified FIFO.
    ///
    /// - Pass `true` to `about_tx` parameter to get the state of the TX FIFO.
    /// - Pass `false` to `about_tx` parameter to get the state of the RX FIFO.
    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType>;
}

/// A trait to represent manipulation of the static payload size.
pub trait EsbPayloadLength {
    type PayloadLengthErrorType;

    /// Set the radio's static payload size.
    ///
    /// The size is clamped to the range [1, 32] and written to pipe 0's
    /// width register. Every transmitted payload is padded to this size and
    /// every received payload is read with this size.
    fn set_payload_size(&mut self, size: u8) -> Result<Clamped, Self::PayloadLengthErrorType>;

    /// Read back the static payload size configured for pipe 0.
    fn get_payload_size(&mut self) -> Result<u8, Self::PayloadLengthErrorType>;
}

/// A trait to represent manipulation of the power state.
pub trait EsbPower {
    type PowerErrorType;

    /// Power down the radio.
    ///
    /// The CE pin is driven low first. The radio's registers are retained.
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Power up the radio and wait for it to reach standby.
    ///
    /// - `delay`: The number of microseconds to wait after writing the
    ///   `PWR_UP` bit. `None` waits 5 milliseconds, the worst case given by
    ///   the datasheet. `Some(0)` doesn't wait at all.
    fn power_up(&mut self, delay: Option<u32>) -> Result<(), Self::PowerErrorType>;

    /// Is the radio powered up?
    fn is_powered(&self) -> bool;
}

/// A trait to represent the primary operations of an ESB capable transceiver.
pub trait EsbRadio {
    type RadioErrorType;

    /// Configure the radio for TX and enter standby (CE low).
    ///
    /// Allowed in any state. A powered down radio stays in [`Mode::PowerDown`].
    fn set_tx_mode(&mut self) -> Result<(), Self::RadioErrorType>;

    /// Configure the radio for RX and start listening (CE high).
    ///
    /// Allowed in any state. A powered down radio stays in [`Mode::PowerDown`].
    fn set_rx_mode(&mut self) -> Result<(), Self::RadioErrorType>;

    /// The operating [`Mode`] as tracked by the driver.
    fn mode(&self) -> Mode;

    /// Is the radio configured for the RX role?
    fn is_rx(&self) -> bool {
        matches!(self.mode(), Mode::StandbyRx | Mode::ActiveRx)
    }

    /// Send a payload and block until it is acknowledged, the auto-retry
    /// count is exhausted or the transmit timeout elapses.
    ///
    /// Returns `true` only if the payload was acknowledged.
    /// See [`EsbRadio::transmit_report()`] for the details of a failure.
    fn transmit(&mut self, buf: &[u8]) -> Result<bool, Self::RadioErrorType> {
        Ok(self.transmit_report(buf)?.outcome.is_success())
    }

    /// Same as [`EsbRadio::transmit()`], but describes how the transmission ended.
    ///
    /// `buf` is truncated to the static payload size. Shorter payloads are padded with zeros.
    fn transmit_report(&mut self, buf: &[u8]) -> Result<TxReport, Self::RadioErrorType>;

    /// Send the payload that was last loaded into the TX FIFO again.
    ///
    /// This is only useful after a [`TxOutcome::Timeout`], because the TX FIFO is
    /// flushed after [`TxOutcome::MaxRetries`].
    fn resend(&mut self) -> Result<TxOutcome, Self::RadioErrorType>;

    /// Check for a received payload without blocking.
    ///
    /// If one is waiting, it is copied into `buf` and its length is stored in `len`.
    /// Otherwise `false` is returned and neither `buf` nor `len` is touched.
    fn receive(&mut self, buf: &mut [u8], len: &mut u8) -> Result<bool, Self::RadioErrorType>;

    /// Get the number of retransmissions made for the last payload sent.
    fn get_last_arc(&mut self) -> Result<u8, Self::RadioErrorType>;
}

/// A trait to represent the radio's initialization.
pub trait EsbInit {
    type ConfigErrorType;

    /// Wait for the radio to boot, then apply [`RadioConfig::default()`].
    fn init(&mut self) -> Result<(), Self::ConfigErrorType>;

    /// Reconfigure the radio using the given `config` object.
    ///
    /// Both FIFOs are flushed, the event flags are cleared and the radio is
    /// left powered up with the CE pin low.
    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType>;
}

/// A trait to represent debug output for a transceiver.
pub trait EsbDetails {
    type DetailsErrorType;

    /// Print details about radio's current configuration.
    ///
    /// This function uses [`std::println!`] when the `std` feature is enabled
    /// and [`defmt::println!`] when the `defmt` feature is enabled (on bare metal).
    /// Without either feature it does nothing.
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType>;
}
