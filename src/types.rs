//! This module defines types used by various traits.

use core::{
    fmt::{Display, Formatter, Result},
    write,
};

use bitfield_struct::bitfield;

/// Power Amplifier level. The units dBm (decibel-milliwatts or dB<sub>mW</sub>)
/// represents a logarithmic signal loss.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaLevel {
    /// -18 dBm
    Min,
    /// -12 dBm
    Low,
    /// -6 dBm
    High,
    /// 0 dBm
    Max,
}

impl PaLevel {
    pub(crate) const MASK: u8 = 6;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            PaLevel::Min => 0,
            PaLevel::Low => 2,
            PaLevel::High => 4,
            PaLevel::Max => 6,
        }
    }
    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0 => PaLevel::Min,
            2 => PaLevel::Low,
            4 => PaLevel::High,
            _ => PaLevel::Max,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PaLevel {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PaLevel::Min => defmt::write!(fmt, "Min"),
            PaLevel::Low => defmt::write!(fmt, "Low"),
            PaLevel::High => defmt::write!(fmt, "High"),
            PaLevel::Max => defmt::write!(fmt, "Max"),
        }
    }
}

impl Display for PaLevel {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            PaLevel::Min => write!(f, "Min"),
            PaLevel::Low => write!(f, "Low"),
            PaLevel::High => write!(f, "High"),
            PaLevel::Max => write!(f, "Max"),
        }
    }
}

/// How fast data moves through the air. Units are in bits per second (bps).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DataRate {
    /// represents 1 Mbps
    Mbps1,
    /// represents 2 Mbps
    Mbps2,
    /// represents 250 Kbps
    Kbps250,
}

impl DataRate {
    pub(crate) const MASK: u8 = 0x28;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            DataRate::Mbps1 => 0,
            DataRate::Mbps2 => 0x8,
            DataRate::Kbps250 => 0x20,
        }
    }
    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0x8 => DataRate::Mbps2,
            0x20 => DataRate::Kbps250,
            _ => DataRate::Mbps1,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DataRate {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DataRate::Mbps1 => defmt::write!(fmt, "1 Mbps"),
            DataRate::Mbps2 => defmt::write!(fmt, "2 Mbps"),
            DataRate::Kbps250 => defmt::write!(fmt, "250 Kbps"),
        }
    }
}

impl Display for DataRate {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            DataRate::Mbps1 => write!(f, "1 Mbps"),
            DataRate::Mbps2 => write!(f, "2 Mbps"),
            DataRate::Kbps250 => write!(f, "250 Kbps"),
        }
    }
}

/// The length of a CRC checksum that is used (if any).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CrcLength {
    /// represents no CRC checksum is used
    Disabled,
    /// represents CRC 8 bit checksum is used
    Bit8,
    /// represents CRC 16 bit checksum is used
    Bit16,
}

impl CrcLength {
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            CrcLength::Disabled => 0,
            CrcLength::Bit8 => 8,
            CrcLength::Bit16 => 12,
        }
    }
    pub(crate) const fn from_bits(value: u8) -> Self {
        match value {
            0 | 4 => CrcLength::Disabled,
            8 => CrcLength::Bit8,
            _ => CrcLength::Bit16,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CrcLength {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            CrcLength::Disabled => defmt::write!(fmt, "disabled"),
            CrcLength::Bit8 => defmt::write!(fmt, "8 bit"),
            CrcLength::Bit16 => defmt::write!(fmt, "16 bit"),
        }
    }
}

impl Display for CrcLength {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            CrcLength::Disabled => write!(f, "disabled"),
            CrcLength::Bit8 => write!(f, "8 bit"),
            CrcLength::Bit16 => write!(f, "16 bit"),
        }
    }
}

/// The possible states of a FIFO.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FifoState {
    /// Represent the state of a FIFO when it is full.
    Full,
    /// Represent the state of a FIFO when it is empty.
    Empty,
    /// Represent the state of a FIFO when it is not full but not empty either.
    Occupied,
}

#[cfg(feature = "defmt")]
impl defmt::Format for FifoState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FifoState::Empty => defmt::write!(fmt, "Empty"),
            FifoState::Full => defmt::write!(fmt, "Full"),
            FifoState::Occupied => defmt::write!(fmt, "Occupied"),
        }
    }
}

impl Display for FifoState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            FifoState::Empty => write!(f, "Empty"),
            FifoState::Full => write!(f, "Full"),
            FifoState::Occupied => write!(f, "Occupied"),
        }
    }
}

/// The operating state of the radio as tracked by the driver.
///
/// The state is derived from the CONFIG register's `PWR_UP` and `PRIM_RX` bits
/// and the level last driven on the CE pin.
///
/// | state | `PWR_UP` | `PRIM_RX` | CE |
/// |-------|:--------:|:---------:|:--:|
/// | [`Mode::PowerDown`] | 0 | - | - |
/// | [`Mode::StandbyTx`] | 1 | 0 | low |
/// | [`Mode::StandbyRx`] | 1 | 1 | low |
/// | [`Mode::ActiveTx`] | 1 | 0 | high |
/// | [`Mode::ActiveRx`] | 1 | 1 | high |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Registers are retained, but nothing can be sent or received.
    PowerDown,
    /// Standby-I with the TX role configured.
    StandbyTx,
    /// Standby-I with the RX role configured.
    StandbyRx,
    /// Sending the TX FIFO content (only during a CE pulse).
    ActiveTx,
    /// Listening for packets.
    ActiveRx,
}

impl Mode {
    pub(crate) const fn from_lines(powered: bool, is_rx: bool, ce_high: bool) -> Self {
        match (powered, is_rx, ce_high) {
            (false, _, _) => Mode::PowerDown,
            (true, false, false) => Mode::StandbyTx,
            (true, true, false) => Mode::StandbyRx,
            (true, false, true) => Mode::ActiveTx,
            (true, true, true) => Mode::ActiveRx,
        }
    }

    /// Is the CE pin driven high in this state?
    pub const fn ce_high(&self) -> bool {
        matches!(self, Mode::ActiveTx | Mode::ActiveRx)
    }

    /// Is the radio powered up in this state?
    pub const fn is_powered(&self) -> bool {
        !matches!(self, Mode::PowerDown)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Mode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Mode::PowerDown => defmt::write!(fmt, "PowerDown"),
            Mode::StandbyTx => defmt::write!(fmt, "StandbyTx"),
            Mode::StandbyRx => defmt::write!(fmt, "StandbyRx"),
            Mode::ActiveTx => defmt::write!(fmt, "ActiveTx"),
            Mode::ActiveRx => defmt::write!(fmt, "ActiveRx"),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Mode::PowerDown => write!(f, "PowerDown"),
            Mode::StandbyTx => write!(f, "StandbyTx"),
            Mode::StandbyRx => write!(f, "StandbyRx"),
            Mode::ActiveTx => write!(f, "ActiveTx"),
            Mode::ActiveRx => write!(f, "ActiveRx"),
        }
    }
}

/// A value that was forced into its valid range before it reached the radio.
///
/// Out-of-range input is never rejected. This records what was asked for
/// and what was actually used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Clamped<T = u8> {
    /// The value given by the caller.
    pub requested: T,
    /// The value written to the radio.
    pub applied: T,
}

impl<T: PartialEq + Copy> Clamped<T> {
    pub(crate) fn new(requested: T, applied: T) -> Self {
        Self { requested, applied }
    }

    /// Did the requested value differ from the applied one?
    pub fn was_clamped(&self) -> bool {
        self.requested != self.applied
    }
}

/// How a transmission ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxOutcome {
    /// The receiver acknowledged the payload.
    Acknowledged,
    /// The auto-retry count was exhausted without an acknowledgement.
    /// The TX FIFO was flushed.
    MaxRetries,
    /// Neither event was observed before the transmit timeout elapsed.
    /// The TX FIFO is left untouched.
    Timeout,
}

impl TxOutcome {
    pub const fn is_success(&self) -> bool {
        matches!(self, TxOutcome::Acknowledged)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TxOutcome {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TxOutcome::Acknowledged => defmt::write!(fmt, "acknowledged"),
            TxOutcome::MaxRetries => defmt::write!(fmt, "max retries reached"),
            TxOutcome::Timeout => defmt::write!(fmt, "timed out"),
        }
    }
}

impl Display for TxOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            TxOutcome::Acknowledged => write!(f, "acknowledged"),
            TxOutcome::MaxRetries => write!(f, "max retries reached"),
            TxOutcome::Timeout => write!(f, "timed out"),
        }
    }
}

/// The result of a transmission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxReport {
    pub outcome: TxOutcome,
    /// The number of caller bytes given and the number loaded into the TX FIFO.
    ///
    /// The remainder of the static payload size is zero padding.
    pub length: Clamped<usize>,
}

/// A struct used to describe the different interrupt events.
///
/// To instantiate an object with flags that have different values:
/// ```ignore
/// let flags = StatusFlags::default() // all flags are false
///     .with_rx_dr(true); // assert only `rx_dr` flags
/// ```
/// Use [`StatusFlags::default`] to instantiate all flags set to false.
/// Use [`StatusFlags::new`] to instantiate all flags set to true.
#[bitfield(u8, new = false, order = Msb)]
pub struct StatusFlags {
    #[bits(1)]
    _padding: u8,

    /// A flag to describe if RX Data Ready to read.
    #[bits(1, access = RO)]
    pub rx_dr: bool,

    /// A flag to describe if TX Data Sent.
    #[bits(1, access = RO)]
    pub tx_ds: bool,

    /// A flag to describe if TX Data Failed (max retransmits reached).
    #[bits(1, access = RO)]
    pub tx_df: bool,

    #[bits(3, access = RO)]
    pub(crate) rx_pipe: u8,

    #[bits(1, access = RO)]
    pub tx_full: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusFlags {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusFlags rx_dr: {}, tx_ds: {}, tx_df: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.tx_df()
        )
    }
}

impl StatusFlags {
    /// A mask to isolate only the sticky event flags of the STATUS register.
    pub(crate) const IRQ_MASK: u8 = 0x70;

    /// A convenience constructor similar to [`StatusFlags::default`] except
    /// all fields are set to `true`.
    pub fn new() -> Self {
        Self::from_bits(Self::IRQ_MASK)
    }

    fn with_flag(self, offset: usize, flag: bool) -> Self {
        let cleared = self.into_bits() & !(1 << offset);
        Self::from_bits(cleared | ((flag as u8) << offset))
    }

    /// A flag to describe if RX Data Ready to read.
    pub fn with_rx_dr(self, flag: bool) -> Self {
        self.with_flag(Self::RX_DR_OFFSET, flag)
    }

    /// A flag to describe if TX Data Sent.
    pub fn with_tx_ds(self, flag: bool) -> Self {
        self.with_flag(Self::TX_DS_OFFSET, flag)
    }

    /// A flag to describe if TX Data Failed.
    pub fn with_tx_df(self, flag: bool) -> Self {
        self.with_flag(Self::TX_DF_OFFSET, flag)
    }

    /// Is the RX FIFO empty? Only pipe 0 is used for payloads, so a pipe
    /// number of `0b111` is the hardware's way of saying so.
    pub fn rx_empty(&self) -> bool {
        self.rx_pipe() == 7
    }
}

impl Display for StatusFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "StatusFlags rx_dr: {}, tx_ds: {}, tx_df: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.tx_df()
        )
    }
}
