//! Async driver for the LS7366R 32-bit quadrature counter.
//!
//! The LS7366R is driven over SPI (mode 0) with a dedicated active-low
//! chip-select line. Each transaction is one instruction byte followed by up
//! to four payload bytes, most-significant byte first. The counter, output
//! and data registers are transferred using a 1–4 byte width configured in
//! MDR1; narrower transfers are sign-extended back to `i32`.
//!
//! # Architecture
//!
//! - **`registers`** — Op-codes, register model and [`DataWidth`], including
//!   the sign-extension rule.
//! - **`config`** — Typed builders/decoders for MDR0, MDR1 and STR.
//! - **`driver`** (crate-private) — Select-bounded frame exchange over an
//!   `embedded-hal-async` [`SpiBus`](embedded_hal_async::spi::SpiBus).
//! - **[`EncoderChannel`]** (public) — One counter: its chip-select pin and
//!   cached data width, with one method per chip operation.
//!
//! # Quick start
//!
//! ```ignore
//! use ls7366r_driver::{CountMode, EncoderChannel, Mdr0Config, Mdr1Config};
//!
//! // `spi` is any `embedded-hal-async` SpiBus, `cs` any OutputPin.
//! let mut counter = EncoderChannel::new(cs);
//! counter
//!     .configure(&mut spi, Mdr0Config::default().with_count_mode(CountMode::X4), Mdr1Config::default())
//!     .await?;
//!
//! let count = counter.read_counter(&mut spi).await?;
//! ```
//!
//! Several channels may share one bus. The bus is borrowed for each call, so
//! only one chip select is ever asserted at a time.
//!
//! # Features
//!
//! - **`defmt`** — [`defmt::Format`] on public types and transaction-level
//!   trace logging.

#![no_std]

pub use channel::{ChannelResult, EncoderChannel};
pub use config::{
    CountMode, FilterDivision, IndexMode, IndexSync, Mdr0Config, Mdr1Config, RunMode, Status,
};
pub use error::Error;
pub use registers::{DataWidth, OpCode, Register};

mod channel;
pub mod config;
mod driver;
mod error;
#[cfg(test)]
mod mock;
pub mod registers;
