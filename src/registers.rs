//! LS7366R instruction set and register model.
//!
//! Every transaction starts with a single instruction byte. The op-code values
//! below are fixed by the chip and are transmitted verbatim.
//!
//! The CNTR, OTR and DTR registers are transferred using the data width
//! configured in MDR1 (1–4 bytes). MDR0, MDR1 and STR are always one byte.

// ---------------------------------------------------------------------------
// Op-codes
// ---------------------------------------------------------------------------

/// Instruction byte sent at the start of every transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OpCode {
    /// Master reset. Clears MDR0, MDR1 and every other register the chip
    /// allows to be cleared; the chip has no per-MDR clear.
    MasterReset = 0x10,
    /// Clear CNTR to zero.
    ClearCounter = 0x01,
    /// Clear STR.
    ClearStatus = 0x08,
    ReadMdr0 = 0x48,
    ReadMdr1 = 0x50,
    ReadCounter = 0x60,
    ReadOutput = 0x68,
    ReadStatus = 0x70,
    WriteMdr0 = 0x88,
    WriteMdr1 = 0x90,
    WriteData = 0x98,
    /// Transfer DTR into CNTR.
    LoadCounter = 0xE0,
    /// Latch CNTR into OTR.
    LoadOutput = 0xE8,
}

impl OpCode {
    /// Register addressed by this instruction.
    ///
    /// `MasterReset` reports MDR0; it resets both mode registers at once.
    pub const fn register(self) -> Register {
        match self {
            OpCode::MasterReset | OpCode::ReadMdr0 | OpCode::WriteMdr0 => Register::Mdr0,
            OpCode::ReadMdr1 | OpCode::WriteMdr1 => Register::Mdr1,
            OpCode::ClearCounter | OpCode::ReadCounter | OpCode::LoadCounter => Register::Cntr,
            OpCode::ReadOutput | OpCode::LoadOutput => Register::Otr,
            OpCode::ClearStatus | OpCode::ReadStatus => Register::Str,
            OpCode::WriteData => Register::Dtr,
        }
    }

    /// Whether the instruction is followed by a data phase at all.
    ///
    /// Clear and load instructions are a bare instruction byte.
    pub const fn has_payload(self) -> bool {
        matches!(
            self,
            OpCode::ReadMdr0
                | OpCode::ReadMdr1
                | OpCode::ReadCounter
                | OpCode::ReadOutput
                | OpCode::ReadStatus
                | OpCode::WriteMdr0
                | OpCode::WriteMdr1
                | OpCode::WriteData
        )
    }

    /// Number of data bytes following the instruction byte.
    pub const fn payload_len(self, width: DataWidth) -> usize {
        if self.has_payload() {
            self.register().transfer_len(width)
        } else {
            0
        }
    }
}

impl From<OpCode> for u8 {
    fn from(op: OpCode) -> Self {
        op as u8
    }
}

// ---------------------------------------------------------------------------
// Registers
// ---------------------------------------------------------------------------

/// Internal registers of the LS7366R.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Mode register 0: count, run, index and filter modes.
    Mdr0,
    /// Mode register 1: data width, counter enable and flag routing.
    Mdr1,
    /// Data register, staging value for `LoadCounter`.
    Dtr,
    /// Live counter.
    Cntr,
    /// Output register, latched copy of CNTR.
    Otr,
    /// Status register.
    Str,
}

impl Register {
    /// Whether transfers of this register follow the MDR1 data width.
    pub const fn uses_data_width(self) -> bool {
        matches!(self, Register::Dtr | Register::Cntr | Register::Otr)
    }

    /// Bytes moved when this register is read or written.
    pub const fn transfer_len(self, width: DataWidth) -> usize {
        if self.uses_data_width() {
            width.bytes()
        } else {
            1
        }
    }
}

// ---------------------------------------------------------------------------
// Data width
// ---------------------------------------------------------------------------

/// Mask of the data-width field in MDR1.
pub const MDR1_WIDTH_MASK: u8 = 0x03;

/// Longest frame on the wire: instruction byte plus a 4-byte payload.
pub const MAX_FRAME_LEN: usize = 5;

/// Number of bytes used for CNTR, OTR and DTR transfers.
///
/// Encoded in MDR1 bits 0–1: `00` = 4 bytes, `01` = 3, `10` = 2, `11` = 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataWidth {
    One,
    Two,
    Three,
    /// Power-on default.
    #[default]
    Four,
}

impl DataWidth {
    /// Decode the width field from an MDR1 byte. Other bits are ignored.
    pub const fn from_mdr1(mdr1: u8) -> Self {
        match mdr1 & MDR1_WIDTH_MASK {
            0b00 => DataWidth::Four,
            0b01 => DataWidth::Three,
            0b10 => DataWidth::Two,
            _ => DataWidth::One,
        }
    }

    /// MDR1 bit pattern for this width.
    pub const fn to_mdr1(self) -> u8 {
        match self {
            DataWidth::Four => 0b00,
            DataWidth::Three => 0b01,
            DataWidth::Two => 0b10,
            DataWidth::One => 0b11,
        }
    }

    pub const fn bytes(self) -> usize {
        match self {
            DataWidth::One => 1,
            DataWidth::Two => 2,
            DataWidth::Three => 3,
            DataWidth::Four => 4,
        }
    }

    pub const fn bits(self) -> u32 {
        self.bytes() as u32 * 8
    }

    /// Interpret the low `bits()` of `raw` as two's complement and widen to
    /// 32 bits.
    ///
    /// Bits of `raw` above the field are ignored. At `Four` the pattern is
    /// reinterpreted unchanged.
    pub const fn sign_extend(self, raw: u32) -> i32 {
        let shift = 32 - self.bits();
        ((raw << shift) as i32) >> shift
    }

    /// Drop the bits of `value` that do not fit in this width.
    pub const fn truncate(self, value: u32) -> u32 {
        let shift = 32 - self.bits();
        (value << shift) >> shift
    }
}
