//! Counter monitor demo
//!
//! Demonstrates basic usage of the ls7366r-driver crate on the Raspberry Pi
//! Pico 2. Configures one LS7366R for X4 quadrature counting with a 2-byte
//! data width, then polls the counter and status register every 100 ms and
//! logs them via defmt.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes                        |
//! |-----------|------------|------------------------------|
//! | SPI0 SCK  | GP18       |                              |
//! | SPI0 MOSI | GP19       |                              |
//! | SPI0 MISO | GP16       |                              |
//! | LS7366 SS | GP17       | Active-low, idles high       |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::spi::{self, Spi};
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use ls7366r_driver::{CountMode, DataWidth, EncoderChannel, Mdr0Config, Mdr1Config};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // --- SPI0 bus, mode 0 ---
    let mut config = spi::Config::default();
    config.frequency = 1_000_000;
    let mut bus = Spi::new(
        p.SPI0,
        p.PIN_18, // SCK
        p.PIN_19, // MOSI
        p.PIN_16, // MISO
        p.DMA_CH0,
        p.DMA_CH1,
        config,
    );

    // --- Counter chip select (GP17, active-low) ---
    let cs = Output::new(p.PIN_17, Level::High);
    let mut counter = EncoderChannel::new(cs);

    let mdr0 = Mdr0Config::default().with_count_mode(CountMode::X4);
    let mdr1 = Mdr1Config::default().with_data_width(DataWidth::Two);

    if let Err(e) = counter.configure(&mut bus, mdr0, mdr1).await {
        error!("Configuration failed: {}", e);
    }
    if let Err(e) = counter.clear_counter(&mut bus).await {
        error!("Clearing counter failed: {}", e);
    }
    if let Err(e) = counter.clear_status_register(&mut bus).await {
        error!("Clearing status failed: {}", e);
    }

    info!("Counter monitor started ({} byte counter)", counter.data_width().bytes());

    let mut last = 0i32;
    loop {
        match counter.read_counter(&mut bus).await {
            Ok(count) if count != last => {
                info!("Count: {} (delta {})", count, count.wrapping_sub(last));
                last = count;
            }
            Ok(_) => {}
            Err(e) => error!("Counter read failed: {}", e),
        }

        match counter.read_status(&mut bus).await {
            Ok(status) if status.carry || status.borrow => {
                warn!("Counter wrapped: {}", status);
                if let Err(e) = counter.clear_status_register(&mut bus).await {
                    error!("Clearing status failed: {}", e);
                }
            }
            Ok(_) => {}
            Err(e) => error!("Status read failed: {}", e),
        }

        Timer::after(Duration::from_millis(100)).await;
    }
}
