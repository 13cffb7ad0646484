use bitfield_struct::bitfield;

use crate::{CrcLength, DataRate, PaLevel};

/// A view of the CONFIG register.
#[bitfield(u8, order = Msb)]
pub(crate) struct Config {
    /// Reserved bit and the 3 IRQ masks. All IRQ events stay enabled.
    #[bits(4)]
    _irq_masks: u8,

    #[bits(2, access = None, default = 2)]
    pub crc_length: u8,

    pub power: bool,

    pub is_rx: bool,
}

impl Config {
    pub(crate) const CRC_MASK: u8 = 0b1100;

    pub const fn crc_length(&self) -> CrcLength {
        CrcLength::from_bits(self.into_bits() & Self::CRC_MASK)
    }

    pub fn with_crc_length(self, length: CrcLength) -> Self {
        let new_val = self.into_bits() & !Self::CRC_MASK | length.into_bits();
        Self::from_bits(new_val)
    }

    pub fn as_rx(self) -> Self {
        Self::from_bits(self.into_bits() | 1)
    }

    pub fn as_tx(self) -> Self {
        Self::from_bits(self.into_bits() & !1)
    }
}

#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRetry {
    /// The auto-retry feature's `delay`.
    #[bits(4, default = 0)]
    pub ard: u8,

    /// The auto-retry feature's `count`.
    #[bits(4, default = 3)]
    pub arc: u8,
}

/// A view of the RF_SETUP register.
#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRf {
    /// CONT_WAVE and a reserved bit.
    #[bits(2)]
    _padding: u8,

    /// RF_DR_LOW, PLL_LOCK, RF_DR_HIGH and RF_PWR.
    #[bits(5, access = None, default = 7)]
    rf: u8,

    #[bits(1, default = false)]
    pub lna_enable: bool,
}

impl SetupRf {
    const PA_MASK: u8 = PaLevel::MASK;
    const DATA_RATE_MASK: u8 = DataRate::MASK;

    pub const fn data_rate(&self) -> DataRate {
        DataRate::from_bits(self.into_bits() & Self::DATA_RATE_MASK)
    }

    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        let new_val = self.into_bits() & !Self::DATA_RATE_MASK | data_rate.into_bits();
        Self::from_bits(new_val)
    }

    pub const fn pa_level(&self) -> PaLevel {
        PaLevel::from_bits(self.into_bits() & Self::PA_MASK)
    }

    pub fn with_pa_level(self, level: PaLevel) -> Self {
        let new_val = self.into_bits() & !Self::PA_MASK | level.into_bits();
        Self::from_bits(new_val)
    }
}
