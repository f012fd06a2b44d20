//! High-level interface to one LS7366R.
//!
//! [`EncoderChannel`] owns the chip-select line of one counter and the data
//! width that counter is configured for. The SPI bus is borrowed per call, so
//! several channels can share a bus and the borrow checker serialises them.

use embedded_hal::digital::{self, OutputPin};
use embedded_hal_async::spi::{self, SpiBus};

use crate::config::{Mdr0Config, Mdr1Config, Status};
use crate::driver;
use crate::error::Error;
use crate::registers::{DataWidth, OpCode, MAX_FRAME_LEN};

/// Result of a channel operation over bus `SPI` with select pin `CS`.
pub type ChannelResult<T, SPI, CS> = Result<
    T,
    Error<<SPI as spi::ErrorType>::Error, <CS as digital::ErrorType>::Error>,
>;

/// One LS7366R counter behind its own chip-select line.
///
/// The chip does not report its data width on every transfer, so the channel
/// caches it. The cache starts at the power-on default of 4 bytes and only
/// changes through [`write_mode_register_1`](Self::write_mode_register_1).
/// Writing MDR1 any other way leaves CNTR, OTR and DTR transfers with the
/// wrong length.
///
/// Every method is a single transaction: SS is asserted, the instruction and
/// its payload are exchanged, and SS is released before the method returns,
/// whether it succeeds or not.
///
/// # Example
///
/// ```no_run
/// use ls7366r_driver::{CountMode, DataWidth, EncoderChannel, Mdr0Config, Mdr1Config};
///
/// # use ls7366r_driver::ChannelResult;
/// # async fn example<SPI, CS>(spi: &mut SPI, cs: CS) -> ChannelResult<(), SPI, CS>
/// # where
/// #     SPI: embedded_hal_async::spi::SpiBus,
/// #     CS: embedded_hal::digital::OutputPin,
/// # {
/// let mut counter = EncoderChannel::new(cs);
/// counter
///     .configure(
///         spi,
///         Mdr0Config::default().with_count_mode(CountMode::X4),
///         Mdr1Config::default().with_data_width(DataWidth::Two),
///     )
///     .await?;
///
/// let count: i32 = counter.read_counter(spi).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct EncoderChannel<CS> {
    chip_select: CS,
    data_width: DataWidth,
}

impl<CS> EncoderChannel<CS>
where
    CS: OutputPin,
{
    /// Bind a channel to its chip-select pin.
    ///
    /// Neither the pin nor the bus is touched. The pin should already be
    /// driven high (idle).
    pub fn new(chip_select: CS) -> Self {
        Self {
            chip_select,
            data_width: DataWidth::default(),
        }
    }

    /// Release the chip-select pin.
    pub fn free(self) -> CS {
        self.chip_select
    }

    /// Width used for CNTR, OTR and DTR transfers.
    pub fn data_width(&self) -> DataWidth {
        self.data_width
    }

    // -----------------------------------------------------------------------
    // Transfer
    // -----------------------------------------------------------------------

    /// Send `op` followed by its payload and return the payload the chip
    /// shifted back, assembled most-significant byte first.
    ///
    /// The payload length comes from the op-code and the cached width. For
    /// writes, the low bytes of `value` are sent MSB first and higher bytes
    /// are dropped. For reads and commands `value` should be 0.
    async fn transfer<SPI: SpiBus>(
        &mut self,
        bus: &mut SPI,
        op: OpCode,
        value: u32,
    ) -> ChannelResult<u32, SPI, CS> {
        let len = op.payload_len(self.data_width);

        let mut frame = [0u8; MAX_FRAME_LEN];
        frame[0] = op.into();
        frame[1..=len].copy_from_slice(&value.to_be_bytes()[4 - len..]);

        #[cfg(feature = "defmt")]
        defmt::trace!("LS7366R {} with {} byte payload", op, len);

        driver::transact(bus, &mut self.chip_select, &mut frame[..=len]).await?;

        let mut received = [0u8; 4];
        received[4 - len..].copy_from_slice(&frame[1..=len]);
        Ok(u32::from_be_bytes(received))
    }

    async fn command<SPI: SpiBus>(
        &mut self,
        bus: &mut SPI,
        op: OpCode,
    ) -> ChannelResult<(), SPI, CS> {
        self.transfer(bus, op, 0).await.map(|_| ())
    }

    async fn read_byte<SPI: SpiBus>(
        &mut self,
        bus: &mut SPI,
        op: OpCode,
    ) -> ChannelResult<u8, SPI, CS> {
        self.transfer(bus, op, 0).await.map(|raw| raw as u8)
    }

    async fn read_wide<SPI: SpiBus>(
        &mut self,
        bus: &mut SPI,
        op: OpCode,
    ) -> ChannelResult<i32, SPI, CS> {
        let raw = self.transfer(bus, op, 0).await?;
        Ok(self.data_width.sign_extend(raw))
    }

    // -----------------------------------------------------------------------
    // Clear operations
    // -----------------------------------------------------------------------

    /// Master reset.
    ///
    /// The chip has one reset instruction for the mode registers and it
    /// clears all of them. This method and
    /// [`clear_mode_register_1`](Self::clear_mode_register_1) send the same
    /// byte.
    ///
    /// The reset leaves the chip at 4-byte width but the cached width is not
    /// touched; write MDR1 again after a reset.
    pub async fn clear_mode_register_0<SPI: SpiBus>(
        &mut self,
        bus: &mut SPI,
    ) -> ChannelResult<(), SPI, CS> {
        self.command(bus, OpCode::MasterReset).await
    }

    /// Master reset; identical on the wire to
    /// [`clear_mode_register_0`](Self::clear_mode_register_0).
    pub async fn clear_mode_register_1<SPI: SpiBus>(
        &mut self,
        bus: &mut SPI,
    ) -> ChannelResult<(), SPI, CS> {
        self.command(bus, OpCode::MasterReset).await
    }

    /// Clear CNTR to zero.
    pub async fn clear_counter<SPI: SpiBus>(
        &mut self,
        bus: &mut SPI,
    ) -> ChannelResult<(), SPI, CS> {
        self.command(bus, OpCode::ClearCounter).await
    }

    pub async fn clear_status_register<SPI: SpiBus>(
        &mut self,
        bus: &mut SPI,
    ) -> ChannelResult<(), SPI, CS> {
        self.command(bus, OpCode::ClearStatus).await
    }

    // -----------------------------------------------------------------------
    // Read operations
    // -----------------------------------------------------------------------

    pub async fn read_mode_register_0<SPI: SpiBus>(
        &mut self,
        bus: &mut SPI,
    ) -> ChannelResult<u8, SPI, CS> {
        self.read_byte(bus, OpCode::ReadMdr0).await
    }

    pub async fn read_mode_register_1<SPI: SpiBus>(
        &mut self,
        bus: &mut SPI,
    ) -> ChannelResult<u8, SPI, CS> {
        self.read_byte(bus, OpCode::ReadMdr1).await
    }

    /// Read the live counter.
    ///
    /// Only the configured number of low-order bytes is transferred. The
    /// result is sign-extended from that width, so with a 1-byte width the
    /// counter reads as `-128..=127`.
    pub async fn read_counter<SPI: SpiBus>(
        &mut self,
        bus: &mut SPI,
    ) -> ChannelResult<i32, SPI, CS> {
        self.read_wide(bus, OpCode::ReadCounter).await
    }

    /// Read OTR, the counter snapshot taken by [`load_otr`](Self::load_otr)
    /// or an index event. Sign-extended like
    /// [`read_counter`](Self::read_counter).
    pub async fn read_otr<SPI: SpiBus>(&mut self, bus: &mut SPI) -> ChannelResult<i32, SPI, CS> {
        self.read_wide(bus, OpCode::ReadOutput).await
    }

    /// Read the raw STR byte. See [`Status`] for the bit layout.
    pub async fn read_status_register<SPI: SpiBus>(
        &mut self,
        bus: &mut SPI,
    ) -> ChannelResult<u8, SPI, CS> {
        self.read_byte(bus, OpCode::ReadStatus).await
    }

    /// Read STR and decode it.
    pub async fn read_status<SPI: SpiBus>(
        &mut self,
        bus: &mut SPI,
    ) -> ChannelResult<Status, SPI, CS> {
        self.read_status_register(bus).await.map(Status::from_register)
    }

    // -----------------------------------------------------------------------
    // Write operations
    // -----------------------------------------------------------------------

    pub async fn write_mode_register_0<SPI: SpiBus>(
        &mut self,
        bus: &mut SPI,
        value: u8,
    ) -> ChannelResult<(), SPI, CS> {
        self.transfer(bus, OpCode::WriteMdr0, u32::from(value)).await.map(|_| ())
    }

    /// Write MDR1 and adopt its data-width field (bits 0–1) for every later
    /// CNTR, OTR and DTR transfer.
    ///
    /// The cached width only changes if the transaction succeeds.
    pub async fn write_mode_register_1<SPI: SpiBus>(
        &mut self,
        bus: &mut SPI,
        value: u8,
    ) -> ChannelResult<(), SPI, CS> {
        self.transfer(bus, OpCode::WriteMdr1, u32::from(value)).await?;

        let width = DataWidth::from_mdr1(value);
        if width != self.data_width {
            #[cfg(feature = "defmt")]
            defmt::debug!("LS7366R data width {} -> {}", self.data_width, width);
            self.data_width = width;
        }
        Ok(())
    }

    /// Write DTR with the low bytes of `value`, MSB first.
    ///
    /// Bytes beyond the configured width are dropped without error. After
    /// [`load_counter`](Self::load_counter), reading the counter returns
    /// `value` truncated and sign-extended from that width.
    pub async fn write_data_register<SPI: SpiBus>(
        &mut self,
        bus: &mut SPI,
        value: i32,
    ) -> ChannelResult<(), SPI, CS> {
        self.transfer(bus, OpCode::WriteData, value as u32).await.map(|_| ())
    }

    /// Write both mode registers, MDR0 first.
    pub async fn configure<SPI: SpiBus>(
        &mut self,
        bus: &mut SPI,
        mdr0: Mdr0Config,
        mdr1: Mdr1Config,
    ) -> ChannelResult<(), SPI, CS> {
        self.write_mode_register_0(bus, mdr0.to_register()).await?;
        self.write_mode_register_1(bus, mdr1.to_register()).await
    }

    // -----------------------------------------------------------------------
    // Load operations
    // -----------------------------------------------------------------------

    /// Transfer DTR into CNTR.
    pub async fn load_counter<SPI: SpiBus>(&mut self, bus: &mut SPI) -> ChannelResult<(), SPI, CS> {
        self.command(bus, OpCode::LoadCounter).await
    }

    /// Latch CNTR into OTR.
    pub async fn load_otr<SPI: SpiBus>(&mut self, bus: &mut SPI) -> ChannelResult<(), SPI, CS> {
        self.command(bus, OpCode::LoadOutput).await
    }
}
