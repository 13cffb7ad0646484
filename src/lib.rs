#![doc = include_str!("../README.md")]
//!
//! ## Basic API
//!
//! - [`RF24::new()`](fn@crate::radio::RF24::new)
//! - [`RF24::init()`](radio/struct.RF24.html#method.init)
//! - [`RF24::set_tx_mode()`](radio/struct.RF24.html#method.set_tx_mode)
//! - [`RF24::set_rx_mode()`](radio/struct.RF24.html#method.set_rx_mode)
//! - [`RF24::transmit()`](radio/struct.RF24.html#method.transmit)
//! - [`RF24::receive()`](radio/struct.RF24.html#method.receive)
//! - [`RF24::set_channel()`](radio/struct.RF24.html#method.set_channel)
//! - [`RF24::set_payload_size()`](radio/struct.RF24.html#method.set_payload_size)
//! - [`RF24::set_address()`](radio/struct.RF24.html#method.set_address)
//! - [`RF24::get_status()`](radio/struct.RF24.html#method.get_status)
//! - [`RF24::power_up()`](radio/struct.RF24.html#method.power_up)
//! - [`RF24::power_down()`](radio/struct.RF24.html#method.power_down)
//!
//! ## Advanced API
//!
//! - [`RF24::transmit_report()`](radio/struct.RF24.html#method.transmit_report)
//! - [`RF24::resend()`](radio/struct.RF24.html#method.resend)
//! - [`RF24::mode()`](radio/struct.RF24.html#method.mode)
//! - [`RF24::flush_tx()`](radio/struct.RF24.html#method.flush_tx)
//! - [`RF24::flush_rx()`](radio/struct.RF24.html#method.flush_rx)
//! - [`RF24::get_fifo_state()`](radio/struct.RF24.html#method.get_fifo_state)
//! - [`RF24::clear_status_flags()`](radio/struct.RF24.html#method.clear_status_flags)
//! - [`RF24::update()`](radio/struct.RF24.html#method.update)
//! - [`RF24::get_last_arc()`](radio/struct.RF24.html#method.get_last_arc)
//! - [`RF24::rpd()`](fn@crate::radio::RF24::rpd)
//! - [`RF24::read_register()`](fn@crate::radio::RF24::read_register)
//! - [`RF24::write_register()`](fn@crate::radio::RF24::write_register)
//! - [`RF24::read_register_block()`](fn@crate::radio::RF24::read_register_block)
//! - [`RF24::write_register_block()`](fn@crate::radio::RF24::write_register_block)
//!
//! ## Configuration API
//!
//! - [`RF24::with_config()`](radio/struct.RF24.html#method.with_config)
//! - [`RF24::tx_timeout_ms`](value@crate::radio::RF24::tx_timeout_ms)
//! - [`RF24::poll_interval_us`](value@crate::radio::RF24::poll_interval_us)
//! - [`RF24::settle_us`](value@crate::radio::RF24::settle_us)
//!
#![no_std]

#[macro_use]
mod fmt;

mod clock;
#[cfg(feature = "std")]
pub use clock::StdClock;
pub use clock::Monotonic;
mod types;
pub use types::{
    Clamped, CrcLength, DataRate, FifoState, Mode, PaLevel, StatusFlags, TxOutcome, TxReport,
};
pub mod radio;
