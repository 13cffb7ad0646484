use crate::radio::rf24::bit_fields::{Config, SetupRetry, SetupRf};
use crate::{CrcLength, DataRate, PaLevel};

/// An object to configure the radio.
///
/// This struct follows a builder pattern. Since all fields are private, users should
/// start with the [`RadioConfig::default`] constructor, then mutate the object accordingly.
/// ```ignore
/// let config = RadioConfig::default()
///     .with_channel(42)
///     .with_payload_size(6)
///     .with_address(b"1Node");
/// radio.with_config(&config)?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RadioConfig {
    pub(crate) config_reg: Config,
    pub(crate) auto_retries: SetupRetry,
    pub(crate) setup_rf: SetupRf,
    channel: u8,
    payload_size: u8,
    auto_ack: u8,
    rx_pipes: u8,
    address: Option<[u8; 5]>,
}

impl Default for RadioConfig {
    /// Instantiate a [`RadioConfig`] object with library defaults.
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`RadioConfig::channel()`] | `76` |
    /// | [`RadioConfig::payload_size()`] | `32` |
    /// | [`RadioConfig::address()`] | `None` (the chip's reset value is kept) |
    /// | [`RadioConfig::auto_ack()`] | `0x3F` (enabled for pipes 0 - 5) |
    /// | [`RadioConfig::rx_pipes()`] | `0x03` (pipes 0 and 1) |
    /// | [`RadioConfig::auto_retry_delay()`] | `0` (250 microseconds) |
    /// | [`RadioConfig::auto_retry_count()`] | `3` |
    /// | [`RadioConfig::data_rate()`] | [`DataRate::Mbps2`] |
    /// | [`RadioConfig::pa_level()`] | [`PaLevel::Max`] |
    /// | [`RadioConfig::lna_enable()`] | `false` |
    /// | [`RadioConfig::crc_length()`] | [`CrcLength::Bit8`] |
    fn default() -> Self {
        Self {
            /*
               - all events enabled for IRQ pin
               - 8 bit CRC
               - powered down
               - TX role
            */
            config_reg: Config::default(),
            /*
               - 250 us delay between attempts
               - 3 max attempts
            */
            auto_retries: SetupRetry::default(),
            /*
                - 2 Mbps data rate
                - Max PA level
                - LNA gain bit clear
            */
            setup_rf: SetupRf::default(),
            channel: 76,
            payload_size: 32,
            auto_ack: 0x3F,
            rx_pipes: 0x03,
            address: None,
        }
    }
}

impl RadioConfig {
    /// Returns the value set by [`RadioConfig::with_crc_length()`].
    pub const fn crc_length(&self) -> CrcLength {
        self.config_reg.crc_length()
    }

    /// The Cyclical Redundancy Checksum (CRC) length.
    ///
    /// The chip forces CRC on when auto-ACK is enabled on any pipe.
    pub fn with_crc_length(self, length: CrcLength) -> Self {
        let new_config = self.config_reg.with_crc_length(length);
        Self {
            config_reg: new_config,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_data_rate()`].
    pub const fn data_rate(&self) -> DataRate {
        self.setup_rf.data_rate()
    }

    /// The Data Rate (over the air).
    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        let new_config = self.setup_rf.with_data_rate(data_rate);
        Self {
            setup_rf: new_config,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_pa_level()`].
    pub const fn pa_level(&self) -> PaLevel {
        self.setup_rf.pa_level()
    }

    /// The Power Amplitude (PA) level.
    pub fn with_pa_level(self, level: PaLevel) -> Self {
        let new_config = self.setup_rf.with_pa_level(level);
        Self {
            setup_rf: new_config,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_lna_enable()`].
    pub const fn lna_enable(&self) -> bool {
        self.setup_rf.lna_enable()
    }

    /// Set the LNA gain bit (bit 0 of RF_SETUP).
    ///
    /// This value may not be respected depending on the radio module used.
    pub fn with_lna_enable(self, enable: bool) -> Self {
        let new_config = self.setup_rf.with_lna_enable(enable);
        Self {
            setup_rf: new_config,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_channel()`].
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// Set the channel (over the air frequency).
    ///
    /// The `channel` is clamped to the range [0, 125].
    pub fn with_channel(self, channel: u8) -> Self {
        Self {
            channel: channel.min(125),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_payload_size()`].
    pub const fn payload_size(&self) -> u8 {
        self.payload_size
    }

    /// Set the static payload size.
    ///
    /// The `size` is clamped to the range [1, 32].
    pub fn with_payload_size(self, size: u8) -> Self {
        Self {
            payload_size: size.clamp(1, 32),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_address()`].
    pub const fn address(&self) -> Option<[u8; 5]> {
        self.address
    }

    /// Set the address used for TX and for RX on pipe 0.
    pub fn with_address(self, address: &[u8; 5]) -> Self {
        Self {
            address: Some(*address),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_auto_ack()`].
    pub const fn auto_ack(&self) -> u8 {
        self.auto_ack
    }

    /// Enable or disable auto-ACK per pipe.
    ///
    /// Each bit in `enable` represents a pipe number (see EN_AA register).
    pub fn with_auto_ack(self, enable: u8) -> Self {
        Self {
            auto_ack: enable & 0x3F,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_rx_pipes()`].
    pub const fn rx_pipes(&self) -> u8 {
        self.rx_pipes
    }

    /// Select which RX pipes are enabled.
    ///
    /// Each bit in `enable` represents a pipe number (see EN_RXADDR register).
    /// Only pipe 0 is used for payloads, but pipe 0 must stay enabled to
    /// receive auto-ACK packets.
    pub fn with_rx_pipes(self, enable: u8) -> Self {
        Self {
            rx_pipes: enable & 0x3F,
            ..self
        }
    }

    /// Returns the `delay` value set by [`RadioConfig::with_auto_retries()`].
    pub const fn auto_retry_delay(&self) -> u8 {
        self.auto_retries.ard()
    }

    /// Returns the `count` value set by [`RadioConfig::with_auto_retries()`].
    pub const fn auto_retry_count(&self) -> u8 {
        self.auto_retries.arc()
    }

    /// Set the automatic retry feature's `delay` and `count` parameters.
    ///
    /// - `delay` is in steps of 250 microseconds (`0` means 250 us). It is clamped to [0, 15].
    /// - `count` is the number of retransmissions. It is clamped to [0, 15].
    pub fn with_auto_retries(self, delay: u8, count: u8) -> Self {
        let new_config = self
            .auto_retries
            .with_ard(delay.min(15))
            .with_arc(count.min(15));
        Self {
            auto_retries: new_config,
            ..self
        }
    }
}
