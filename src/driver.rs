//! Low-level SPI framing.
//!
//! One LS7366R transaction is: drive SS low, clock out the instruction byte
//! and 0–4 payload bytes (full duplex), drive SS high. This module owns that
//! sequence and the guarantee that SS is released again.
//!
//! This module is crate-private; consumers use [`EncoderChannel`] in
//! `channel.rs`.
//!
//! [`EncoderChannel`]: crate::EncoderChannel

use embedded_hal::digital::OutputPin;
use embedded_hal_async::spi::SpiBus;

use crate::error::Error;

/// Chip select held low for the lifetime of the guard.
///
/// Dropping the guard releases SS without reporting errors. This covers early
/// returns and futures that are dropped mid-transfer. [`release`] is the
/// normal path and reports a failing pin.
///
/// [`release`]: Selected::release
struct Selected<'a, CS: OutputPin> {
    chip_select: &'a mut CS,
    armed: bool,
}

impl<'a, CS: OutputPin> Selected<'a, CS> {
    fn assert(chip_select: &'a mut CS) -> Result<Self, CS::Error> {
        chip_select.set_low()?;
        Ok(Self {
            chip_select,
            armed: true,
        })
    }

    fn release(mut self) -> Result<(), CS::Error> {
        self.armed = false;
        self.chip_select.set_high()
    }
}

impl<CS: OutputPin> Drop for Selected<'_, CS> {
    fn drop(&mut self) {
        if self.armed {
            let _ = self.chip_select.set_high();
        }
    }
}

/// Run one select-bounded transaction, exchanging `frame` in place.
///
/// `frame[0]` is the instruction byte. On return the remaining bytes hold
/// what the chip shifted out during the payload phase.
///
/// SS is released even when the transfer fails. A transfer error takes
/// precedence over a release error.
pub(crate) async fn transact<SPI, CS>(
    bus: &mut SPI,
    chip_select: &mut CS,
    frame: &mut [u8],
) -> Result<(), Error<SPI::Error, CS::Error>>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    let selected = Selected::assert(chip_select).map_err(Error::ChipSelect)?;

    let exchanged = exchange(bus, frame).await;
    let released = selected.release();

    exchanged.map_err(Error::Spi)?;
    released.map_err(Error::ChipSelect)
}

async fn exchange<SPI: SpiBus>(bus: &mut SPI, frame: &mut [u8]) -> Result<(), SPI::Error> {
    bus.transfer_in_place(frame).await?;

    // SS must not rise before the last bit has left the shifter.
    bus.flush().await
}
