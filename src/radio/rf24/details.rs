use super::{Nrf24Error, RF24};
use crate::{clock::Monotonic, radio::prelude::EsbDetails};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

#[cfg(any(feature = "defmt", feature = "std"))]
use super::{
    bit_fields::{Config, SetupRetry},
    registers,
};
#[cfg(any(feature = "defmt", feature = "std"))]
use crate::{
    radio::prelude::{EsbChannel, EsbPayloadLength, EsbPipe, EsbRadio},
    DataRate, PaLevel,
};

#[cfg(feature = "std")]
extern crate std;

impl<SPI, DO, DELAY, CLOCK> EsbDetails for RF24<SPI, DO, DELAY, CLOCK>
where
    SPI: SpiBus,
    DO: OutputPin,
    DELAY: DelayNs,
    CLOCK: Monotonic,
{
    type DetailsErrorType = Nrf24Error<SPI::Error, DO::Error>;

    #[cfg(all(feature = "defmt", any(target_os = "none", not(feature = "std"))))]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        let channel = self.get_channel()?;
        defmt::println!("channel        {=u8} ({=u16} MHz)", channel, 2400 + channel as u16);

        let rf_setup = self.read_register(registers::RF_SETUP)?;
        defmt::println!("data rate      {}", DataRate::from_bits(rf_setup));
        defmt::println!("PA level       {}", PaLevel::from_bits(rf_setup));
        defmt::println!("LNA gain       {=bool}", rf_setup & 1 == 1);

        let config = Config::from_bits(self.read_register(registers::CONFIG)?);
        defmt::println!("CRC            {}", config.crc_length());
        defmt::println!("payload size   {=u8} bytes", self.get_payload_size()?);

        let retries = SetupRetry::from_bits(self.read_register(registers::SETUP_RETR)?);
        defmt::println!(
            "auto retries   {=u8} every {=u16} us",
            retries.arc(),
            250 * (retries.ard() as u16 + 1)
        );
        defmt::println!("auto ACK pipes 0b{=u8:08b}", self.read_register(registers::EN_AA)?);
        defmt::println!("RX pipes       0b{=u8:08b}", self.read_register(registers::EN_RXADDR)?);

        defmt::println!("RX role        {=bool}", config.is_rx());
        defmt::println!("powered        {=bool}", config.power());
        defmt::println!("tracked mode   {}", self.mode());

        let mut address = [0u8; 5];
        self.get_address(&mut address)?;
        defmt::println!("TX address     {=[u8; 5]:02X}", address);
        self.get_rx_address(&mut address)?;
        defmt::println!("pipe 0 address {=[u8; 5]:02X}", address);
        Ok(())
    }

    #[cfg(not(any(feature = "defmt", feature = "std")))]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        Ok(())
    }

    #[cfg(all(feature = "std", not(all(feature = "defmt", target_os = "none"))))]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        let channel = self.get_channel()?;
        std::println!("channel        {channel} ({} MHz)", 2400 + channel as u16);

        let rf_setup = self.read_register(registers::RF_SETUP)?;
        std::println!("data rate      {}", DataRate::from_bits(rf_setup));
        std::println!("PA level       {}", PaLevel::from_bits(rf_setup));
        std::println!("LNA gain       {}", rf_setup & 1 == 1);

        let config = Config::from_bits(self.read_register(registers::CONFIG)?);
        std::println!("CRC            {}", config.crc_length());
        std::println!("payload size   {} bytes", self.get_payload_size()?);

        let retries = SetupRetry::from_bits(self.read_register(registers::SETUP_RETR)?);
        std::println!(
            "auto retries   {} every {} us",
            retries.arc(),
            250 * (retries.ard() as u16 + 1)
        );
        std::println!("auto ACK pipes {:#010b}", self.read_register(registers::EN_AA)?);
        std::println!("RX pipes       {:#010b}", self.read_register(registers::EN_RXADDR)?);

        std::println!("role           {}", if config.is_rx() { "RX" } else { "TX" });
        std::println!("powered        {}", config.power());
        std::println!("tracked mode   {}", self.mode());

        let mut address = [0u8; 5];
        self.get_address(&mut address)?;
        std::println!("TX address     {:02X?}", address);
        self.get_rx_address(&mut address)?;
        std::println!("pipe 0 address {:02X?}", address);
        Ok(())
    }
}
