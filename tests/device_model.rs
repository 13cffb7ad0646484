//! Drives the public API against a register-level model of the nRF24L01.
//!
//! Every `Chip` keeps its own register file, a 3-level TX and RX FIFO, and the
//! sticky STATUS flags. Chips share one `Air`, so a CE pulse on a transmitting
//! chip delivers its payload to a listening chip on the same channel and address.

use core::convert::Infallible;
use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use embedded_hal::{
    digital::{ErrorType as PinErrorType, OutputPin},
    spi::{ErrorType as SpiErrorType, SpiBus},
};
use embedded_hal_mock::eh1::delay::NoopDelay;
use nrf24l01::{
    radio::{commands, mnemonics, prelude::*, registers, Nrf24Error, RadioConfig, RF24},
    FifoState, Mode, TxOutcome,
};

const FIFO_DEPTH: usize = 3;
const ADDRESS: [u8; 5] = *b"1Node";

struct Chip {
    regs: [u8; 0x20],
    tx_addr: [u8; 5],
    rx_addr_p0: [u8; 5],
    tx_fifo: VecDeque<Vec<u8>>,
    rx_fifo: VecDeque<Vec<u8>>,
    last_tx: Option<Vec<u8>>,
    flags: u8,
    reuse_tx: bool,
    ce: bool,
    csn: bool,
    /// Never finish a transmission (no ACK, no MAX_RT).
    mute: bool,
    /// MISO is not connected, every byte reads back `0xFF`.
    stuck_miso: bool,
    frames: usize,
}

impl Chip {
    fn new() -> Self {
        let mut regs = [0u8; 0x20];
        regs[registers::CONFIG as usize] = 0x08;
        regs[registers::EN_AA as usize] = 0x3F;
        regs[registers::EN_RXADDR as usize] = 0x03;
        regs[registers::SETUP_AW as usize] = 0x03;
        regs[registers::SETUP_RETR as usize] = 0x03;
        regs[registers::RF_CH as usize] = 0x02;
        regs[registers::RF_SETUP as usize] = 0x0F;
        Self {
            regs,
            tx_addr: [0xE7; 5],
            rx_addr_p0: [0xE7; 5],
            tx_fifo: VecDeque::new(),
            rx_fifo: VecDeque::new(),
            last_tx: None,
            flags: 0,
            reuse_tx: false,
            ce: false,
            csn: true,
            mute: false,
            stuck_miso: false,
            frames: 0,
        }
    }

    fn config(&self) -> u8 {
        self.regs[registers::CONFIG as usize]
    }

    fn powered(&self) -> bool {
        self.config() & 2 == 2
    }

    fn is_rx(&self) -> bool {
        self.config() & 1 == 1
    }

    fn status(&self) -> u8 {
        let rx_pipe = if self.rx_fifo.is_empty() { 7 } else { 0 };
        self.flags | (rx_pipe << 1) | (self.tx_fifo.len() == FIFO_DEPTH) as u8
    }

    fn fifo_status(&self) -> u8 {
        (self.rx_fifo.is_empty() as u8)
            | ((self.rx_fifo.len() == FIFO_DEPTH) as u8) << 1
            | (self.tx_fifo.is_empty() as u8) << 4
            | ((self.tx_fifo.len() == FIFO_DEPTH) as u8) << 5
            | (self.reuse_tx as u8) << 6
    }

    fn payload_width(&self) -> usize {
        (self.regs[registers::RX_PW_P0 as usize] & 0x3F) as usize
    }

    fn listening_on(&self, channel: u8, address: &[u8; 5]) -> bool {
        self.powered()
            && self.is_rx()
            && self.ce
            && self.regs[registers::RF_CH as usize] == channel
            && self.regs[registers::EN_RXADDR as usize] & 1 == 1
            && &self.rx_addr_p0 == address
            && self.rx_fifo.len() < FIFO_DEPTH
    }

    fn read_reg(&self, address: u8, data: &mut [u8]) {
        match address {
            registers::TX_ADDR => {
                let n = data.len().min(5);
                data[..n].copy_from_slice(&self.tx_addr[..n]);
            }
            registers::RX_ADDR_P0 => {
                let n = data.len().min(5);
                data[..n].copy_from_slice(&self.rx_addr_p0[..n]);
            }
            _ => {
                if let Some(first) = data.first_mut() {
                    *first = match address {
                        registers::STATUS => self.status(),
                        registers::FIFO_STATUS => self.fifo_status(),
                        _ => self.regs[address as usize],
                    };
                }
            }
        }
    }

    fn write_reg(&mut self, address: u8, data: &[u8]) {
        let Some(&value) = data.first() else {
            return;
        };
        match address {
            registers::STATUS => self.flags &= !(value & 0x70),
            registers::TX_ADDR => {
                let n = data.len().min(5);
                self.tx_addr[..n].copy_from_slice(&data[..n]);
            }
            registers::RX_ADDR_P0 => {
                let n = data.len().min(5);
                self.rx_addr_p0[..n].copy_from_slice(&data[..n]);
            }
            registers::OBSERVE_TX | registers::RPD | registers::FIFO_STATUS => {}
            _ => self.regs[address as usize] = value,
        }
    }

    fn exchange(&mut self, buf: &mut [u8]) {
        assert!(!self.csn, "SPI data exchanged while CSN is high");
        self.frames += 1;
        let status = self.status();
        let Some((command, data)) = buf.split_first_mut() else {
            return;
        };
        match *command {
            c if c < commands::W_REGISTER => self.read_reg(c & registers::ADDRESS_MASK, data),
            c if c < 0x40 => self.write_reg(c & registers::ADDRESS_MASK, data),
            commands::R_RX_PAYLOAD => match self.rx_fifo.pop_front() {
                Some(payload) => {
                    let n = data.len().min(payload.len());
                    data[..n].copy_from_slice(&payload[..n]);
                }
                None => data.fill(0),
            },
            commands::W_TX_PAYLOAD => {
                if self.tx_fifo.len() < FIFO_DEPTH {
                    self.tx_fifo.push_back(data.to_vec());
                }
                self.reuse_tx = false;
            }
            commands::FLUSH_TX => {
                self.tx_fifo.clear();
                self.reuse_tx = false;
            }
            commands::FLUSH_RX => self.rx_fifo.clear(),
            commands::REUSE_TX_PL => self.reuse_tx = true,
            commands::NOP => {}
            other => panic!("unexpected command {other:#04X}"),
        }
        *command = status;
        if self.stuck_miso {
            buf.fill(0xFF);
        }
    }
}

#[derive(Default)]
struct Air {
    chips: Vec<Chip>,
}

impl Air {
    /// A CE rising edge on `sender` sends the top of its TX FIFO.
    fn fire(&mut self, sender: usize) {
        let tx = &self.chips[sender];
        if !tx.powered() || tx.is_rx() || tx.mute {
            return;
        }
        let Some(payload) = tx
            .tx_fifo
            .front()
            .or(tx.last_tx.as_ref().filter(|_| tx.reuse_tx))
            .cloned()
        else {
            return;
        };
        let channel = tx.regs[registers::RF_CH as usize];
        let address = tx.tx_addr;
        let peer = (0..self.chips.len())
            .find(|&id| id != sender && self.chips[id].listening_on(channel, &address));

        match peer {
            Some(id) => {
                let rx = &mut self.chips[id];
                let mut received = payload;
                received.resize(rx.payload_width(), 0);
                rx.rx_fifo.push_back(received);
                rx.flags |= mnemonics::MASK_RX_DR;

                let tx = &mut self.chips[sender];
                if !tx.reuse_tx {
                    tx.last_tx = tx.tx_fifo.pop_front();
                }
                tx.flags |= mnemonics::MASK_TX_DS;
                let observe = &mut tx.regs[registers::OBSERVE_TX as usize];
                *observe &= 0xF0;
            }
            None => {
                let tx = &mut self.chips[sender];
                let retries = tx.regs[registers::SETUP_RETR as usize] & 0xF;
                let lost = (tx.regs[registers::OBSERVE_TX as usize] >> 4).saturating_add(1) & 0xF;
                tx.regs[registers::OBSERVE_TX as usize] = (lost << 4) | retries;
                tx.flags |= mnemonics::MASK_MAX_RT;
            }
        }
    }
}

type Shared = Rc<RefCell<Air>>;

struct SimBus {
    air: Shared,
    id: usize,
}

impl SpiErrorType for SimBus {
    type Error = Infallible;
}

impl SpiBus for SimBus {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        words.fill(0);
        self.transfer_in_place(words)
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        let mut copy = words.to_vec();
        self.transfer_in_place(&mut copy)
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        let mut copy = write.to_vec();
        copy.resize(read.len().max(write.len()), 0);
        self.transfer_in_place(&mut copy)?;
        let n = read.len();
        read.copy_from_slice(&copy[..n]);
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.air.borrow_mut().chips[self.id].exchange(words);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Line {
    Ce,
    Csn,
}

struct SimPin {
    air: Shared,
    id: usize,
    line: Line,
}

impl PinErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut air = self.air.borrow_mut();
        let chip = &mut air.chips[self.id];
        match self.line {
            Line::Ce => chip.ce = false,
            Line::Csn => chip.csn = false,
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut air = self.air.borrow_mut();
        let chip = &mut air.chips[self.id];
        match self.line {
            Line::Ce => {
                let rising = !chip.ce;
                chip.ce = true;
                if rising {
                    air.fire(self.id);
                }
            }
            Line::Csn => chip.csn = true,
        }
        Ok(())
    }
}

type SimRadio = RF24<SimBus, SimPin, NoopDelay, Box<dyn FnMut() -> u32>>;

/// Each clock reading advances 1 ms.
fn ticking_clock() -> Box<dyn FnMut() -> u32> {
    let mut now = 0u32;
    Box::new(move || {
        now = now.wrapping_add(1);
        now
    })
}

fn attach(air: &Shared, chip: Chip) -> SimRadio {
    let id = {
        let mut air = air.borrow_mut();
        air.chips.push(chip);
        air.chips.len() - 1
    };
    let pin = |line| SimPin {
        air: air.clone(),
        id,
        line,
    };
    RF24::new(
        pin(Line::Ce),
        pin(Line::Csn),
        SimBus {
            air: air.clone(),
            id,
        },
        NoopDelay,
        ticking_clock(),
    )
}

fn configured(air: &Shared, chip: Chip, config: &RadioConfig) -> SimRadio {
    let mut radio = attach(air, chip);
    radio.init().unwrap();
    radio.with_config(config).unwrap();
    radio
}

/// A transmitter (chip 0) and a receiver (chip 1) sharing the same address and channel.
fn pair(config: &RadioConfig) -> (Shared, SimRadio, SimRadio) {
    let air = Shared::default();
    let config = config.with_address(&ADDRESS);
    let tx = configured(&air, Chip::new(), &config);
    let rx = configured(&air, Chip::new(), &config);
    (air, tx, rx)
}

#[test]
fn init_applies_defaults() {
    let air = Shared::default();
    let mut radio = attach(&air, Chip::new());
    assert_eq!(radio.mode(), Mode::PowerDown);
    radio.init().unwrap();
    assert_eq!(radio.mode(), Mode::StandbyTx);
    assert!(radio.is_powered());

    assert_eq!(radio.read_register(registers::CONFIG).unwrap(), 0x0A);
    assert_eq!(radio.read_register(registers::EN_AA).unwrap(), 0x3F);
    assert_eq!(radio.read_register(registers::EN_RXADDR).unwrap(), 0x03);
    assert_eq!(radio.read_register(registers::SETUP_AW).unwrap(), 0x03);
    assert_eq!(radio.read_register(registers::SETUP_RETR).unwrap(), 0x03);
    assert_eq!(radio.get_channel().unwrap(), 76);
    assert_eq!(radio.read_register(registers::RF_SETUP).unwrap(), 0x0E);
    assert_eq!(radio.get_payload_size().unwrap(), 32);
    assert_eq!(radio.get_fifo_state(true).unwrap(), FifoState::Empty);
    assert_eq!(radio.get_fifo_state(false).unwrap(), FifoState::Empty);

    let air = air.borrow();
    assert!(!air.chips[0].ce);
    assert!(air.chips[0].csn);
}

#[test]
fn init_detects_missing_radio() {
    let air = Shared::default();
    let mut chip = Chip::new();
    chip.stuck_miso = true;
    let mut radio = attach(&air, chip);
    assert_eq!(radio.init(), Err(Nrf24Error::BinaryCorruption));
    assert_eq!(radio.mode(), Mode::PowerDown);
    assert!(air.borrow().chips[0].csn);
}

#[test]
fn unpowered_radio_is_rejected() {
    let air = Shared::default();
    let mut radio = attach(&air, Chip::new());
    let (mut buf, mut len) = ([0u8; 32], 0u8);
    assert_eq!(radio.transmit(b"early"), Err(Nrf24Error::PoweredDown));
    assert_eq!(radio.receive(&mut buf, &mut len), Err(Nrf24Error::PoweredDown));
    assert_eq!(air.borrow().chips[0].frames, 0);

    radio.init().unwrap();
    radio.power_down().unwrap();
    assert_eq!(radio.resend(), Err(Nrf24Error::PoweredDown));
    assert_eq!(radio.transmit(b"late"), Err(Nrf24Error::PoweredDown));
    radio.power_up(Some(0)).unwrap();
    radio.set_rx_mode().unwrap();
    assert_eq!(radio.mode(), Mode::ActiveRx);
}

#[test]
fn mode_switch_from_power_down() {
    let air = Shared::default();
    let mut radio = configured(&air, Chip::new(), &RadioConfig::default());
    radio.set_rx_mode().unwrap();
    radio.power_down().unwrap();

    radio.set_tx_mode().unwrap();
    assert_eq!(radio.mode(), Mode::PowerDown);
    {
        let air = air.borrow();
        assert!(!air.chips[0].is_rx());
        assert!(!air.chips[0].ce);
    }

    radio.set_rx_mode().unwrap();
    assert_eq!(radio.mode(), Mode::PowerDown);
    assert!(air.borrow().chips[0].is_rx());
    assert!(air.borrow().chips[0].ce);

    // the prepared role and CE level take effect once powered
    radio.power_up(Some(0)).unwrap();
    assert_eq!(radio.mode(), Mode::ActiveRx);
    radio.set_tx_mode().unwrap();
    radio.power_down().unwrap();
    radio.power_up(None).unwrap();
    assert_eq!(radio.mode(), Mode::StandbyTx);
}

#[test]
fn with_config_stops_listening() {
    let (air, mut tx, _rx) = pair(&RadioConfig::default());
    tx.set_rx_mode().unwrap();
    assert!(air.borrow().chips[0].ce);

    tx.with_config(&RadioConfig::default()).unwrap();
    assert_eq!(tx.mode(), Mode::StandbyTx);
    let air = air.borrow();
    assert!(!air.chips[0].ce);
    assert!(!air.chips[0].is_rx());
}

#[test]
fn payload_size_readback() {
    let air = Shared::default();
    let mut radio = configured(&air, Chip::new(), &RadioConfig::default());
    for size in 1..=32u8 {
        let clamped = radio.set_payload_size(size).unwrap();
        assert!(!clamped.was_clamped());
        assert_eq!(radio.read_register(registers::RX_PW_P0).unwrap(), size);
    }
    for size in [33u8, 64, 255] {
        let clamped = radio.set_payload_size(size).unwrap();
        assert!(clamped.was_clamped());
        assert_eq!(clamped.applied, 32);
        assert_eq!(radio.get_payload_size().unwrap(), 32);
    }
}

#[test]
fn channel_readback() {
    let air = Shared::default();
    let mut radio = configured(&air, Chip::new(), &RadioConfig::default());
    for channel in 0..=u8::MAX {
        let clamped = radio.set_channel(channel).unwrap();
        assert_eq!(clamped.applied, channel.min(125));
        assert_eq!(radio.get_channel().unwrap(), channel.min(125));
    }
}

#[test]
fn address_lands_in_both_registers() {
    let air = Shared::default();
    let mut radio = configured(&air, Chip::new(), &RadioConfig::default());
    let address = [0x11u8, 0x22, 0x33, 0x44, 0x55];
    radio.set_address(&address).unwrap();

    let (mut tx_addr, mut rx_addr) = ([0u8; 5], [0u8; 5]);
    radio.get_address(&mut tx_addr).unwrap();
    radio.get_rx_address(&mut rx_addr).unwrap();
    assert_eq!(tx_addr, address);
    assert_eq!(rx_addr, address);

    let mut block = [0u8; 5];
    radio
        .read_register_block(registers::RX_ADDR_P0, &mut block)
        .unwrap();
    assert_eq!(block, address);
}

#[test]
fn round_trip_pads_with_zeros() {
    let (air, mut tx, mut rx) = pair(&RadioConfig::default());
    rx.set_rx_mode().unwrap();
    assert_eq!(rx.mode(), Mode::ActiveRx);

    let message = *b"hello!";
    assert!(tx.transmit(&message).unwrap());
    assert_eq!(tx.mode(), Mode::StandbyTx);
    // the driver cleared TX_DS after observing it
    assert!(!tx.get_status().unwrap().tx_ds());
    assert_eq!(tx.get_last_arc().unwrap(), 0);

    let (mut buf, mut len) = ([0xAAu8; 32], 0u8);
    assert!(rx.receive(&mut buf, &mut len).unwrap());
    assert_eq!(len, 32);
    assert_eq!(&buf[..6], &message);
    assert!(buf[6..].iter().all(|&b| b == 0));
    assert!(!rx.get_status().unwrap().rx_dr());

    // nothing new arrived
    let mut again = [0x55u8; 32];
    assert!(!rx.receive(&mut again, &mut len).unwrap());
    assert_eq!(again, [0x55u8; 32]);
    assert!(air.borrow().chips[1].rx_fifo.is_empty());
}

#[test]
fn oversized_payload_is_truncated() {
    let config = RadioConfig::default().with_payload_size(8);
    let (_air, mut tx, mut rx) = pair(&config);
    rx.set_rx_mode().unwrap();

    let report = tx.transmit_report(b"0123456789AB").unwrap();
    assert_eq!(report.outcome, TxOutcome::Acknowledged);
    assert_eq!(report.length.requested, 12);
    assert_eq!(report.length.applied, 8);

    let (mut buf, mut len) = ([0u8; 32], 0u8);
    assert!(rx.receive(&mut buf, &mut len).unwrap());
    assert_eq!(len, 8);
    assert_eq!(&buf[..8], b"01234567");
    assert!(buf[8..].iter().all(|&b| b == 0));
}

#[test]
fn short_receive_buffer() {
    let (_air, mut tx, mut rx) = pair(&RadioConfig::default());
    rx.set_rx_mode().unwrap();
    assert!(tx.transmit(b"abcdefgh").unwrap());

    let (mut buf, mut len) = ([0u8; 4], 0u8);
    assert!(rx.receive(&mut buf, &mut len).unwrap());
    assert_eq!(len, 4);
    assert_eq!(&buf, b"abcd");
    // the rest of the payload is discarded with it
    assert!(!rx.receive(&mut buf, &mut len).unwrap());
}

#[test]
fn receive_without_data_keeps_buffer() {
    let (_air, _tx, mut rx) = pair(&RadioConfig::default());
    let (mut buf, mut len) = ([0xAAu8; 32], 7u8);
    assert!(!rx.receive(&mut buf, &mut len).unwrap());
    assert_eq!(buf, [0xAAu8; 32]);
    assert_eq!(len, 7);
    assert_eq!(rx.mode(), Mode::ActiveRx);
}

#[test]
fn max_retries_empties_tx_fifo() {
    let (air, mut tx, mut rx) = pair(&RadioConfig::default());
    // nobody listens yet
    let report = tx.transmit_report(b"lost").unwrap();
    assert_eq!(report.outcome, TxOutcome::MaxRetries);
    assert_eq!(tx.get_fifo_state(true).unwrap(), FifoState::Empty);
    assert!(!tx.get_status().unwrap().tx_df());
    assert_eq!(tx.get_last_arc().unwrap(), 3);

    rx.set_rx_mode().unwrap();
    assert!(tx.transmit(b"found").unwrap());
    let (mut buf, mut len) = ([0u8; 32], 0u8);
    assert!(rx.receive(&mut buf, &mut len).unwrap());
    assert_eq!(&buf[..5], b"found");
    assert!(air.borrow().chips[1].rx_fifo.is_empty());
}

#[test]
fn timeout_keeps_payload_queued() {
    let air = Shared::default();
    let mut chip = Chip::new();
    chip.mute = true;
    let mut tx = configured(&air, chip, &RadioConfig::default());

    let report = tx.transmit_report(b"stuck").unwrap();
    assert_eq!(report.outcome, TxOutcome::Timeout);
    assert!(!report.outcome.is_success());
    assert_eq!(tx.get_fifo_state(true).unwrap(), FifoState::Occupied);
    assert_eq!(air.borrow().chips[0].tx_fifo.len(), 1);

    // the next transmit starts from an empty TX FIFO
    tx.tx_timeout_ms = 5;
    assert!(!tx.transmit(b"again").unwrap());
    assert_eq!(air.borrow().chips[0].tx_fifo.len(), 1);
    assert_eq!(air.borrow().chips[0].tx_fifo[0][..5], *b"again");
}

#[test]
fn resend_reuses_last_payload() {
    let (_air, mut tx, mut rx) = pair(&RadioConfig::default().with_payload_size(4));
    rx.set_rx_mode().unwrap();
    let (mut buf, mut len) = ([0u8; 4], 0u8);

    assert!(tx.transmit(b"ping").unwrap());
    assert!(rx.receive(&mut buf, &mut len).unwrap());

    assert_eq!(tx.resend().unwrap(), TxOutcome::Acknowledged);
    buf.fill(0);
    assert!(rx.receive(&mut buf, &mut len).unwrap());
    assert_eq!(&buf, b"ping");
}

#[test]
fn mode_changes_track_lines() {
    let (air, mut tx, _rx) = pair(&RadioConfig::default());
    tx.set_rx_mode().unwrap();
    assert!(air.borrow().chips[0].ce);
    assert!(air.borrow().chips[0].is_rx());

    tx.set_tx_mode().unwrap();
    assert_eq!(tx.mode(), Mode::StandbyTx);
    let air = air.borrow();
    assert!(!air.chips[0].ce);
    assert!(!air.chips[0].is_rx());
    assert!(air.chips[0].csn);
}

#[test]
fn channel_mismatch_is_not_heard() {
    let air = Shared::default();
    let config = RadioConfig::default().with_address(&ADDRESS);
    let mut tx = configured(&air, Chip::new(), &config.with_channel(10));
    let mut rx = configured(&air, Chip::new(), &config.with_channel(11));
    rx.set_rx_mode().unwrap();
    assert!(!tx.transmit(b"hello?").unwrap());
    let (mut buf, mut len) = ([0u8; 32], 0u8);
    assert!(!rx.receive(&mut buf, &mut len).unwrap());
}

#[test]
fn free_releases_the_bus() {
    let air = Shared::default();
    let radio = attach(&air, Chip::new());
    let (_spi, mut ce, mut csn, _delay, _clock) = radio.free();
    ce.set_high().unwrap();
    csn.set_low().unwrap();
    let air = air.borrow();
    assert!(air.chips[0].ce);
    assert!(!air.chips[0].csn);
}
