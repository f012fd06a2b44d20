//! Typed views of the MDR0, MDR1 and STR registers.
//!
//! The driver itself moves raw bytes; these types only build and decode them.
//! Every field value maps to a variant, so decoding never fails.

use crate::registers::DataWidth;

// ---------------------------------------------------------------------------
// MDR0
// ---------------------------------------------------------------------------

/// Quadrature count mode, MDR0 bits 0–1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountMode {
    /// A = clock, B = direction.
    #[default]
    NonQuadrature = 0x00,
    /// One count per quadrature cycle.
    X1 = 0x01,
    /// Two counts per quadrature cycle.
    X2 = 0x02,
    /// Four counts per quadrature cycle.
    X4 = 0x03,
}

impl CountMode {
    fn from_register(reg: u8) -> Self {
        match reg & 0x03 {
            0x01 => CountMode::X1,
            0x02 => CountMode::X2,
            0x03 => CountMode::X4,
            _ => CountMode::NonQuadrature,
        }
    }
}

/// Counter cycle behaviour, MDR0 bits 2–3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunMode {
    #[default]
    FreeRunning = 0x00,
    /// Counter stops on carry or borrow until reloaded or reset.
    SingleCycle = 0x04,
    /// Counter is confined to `0..=DTR`.
    RangeLimit = 0x08,
    /// Counter wraps at DTR.
    ModuloN = 0x0C,
}

impl RunMode {
    fn from_register(reg: u8) -> Self {
        match reg & 0x0C {
            0x04 => RunMode::SingleCycle,
            0x08 => RunMode::RangeLimit,
            0x0C => RunMode::ModuloN,
            _ => RunMode::FreeRunning,
        }
    }
}

/// Action taken on the index input, MDR0 bits 4–5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndexMode {
    #[default]
    Disabled = 0x00,
    /// Index transfers DTR into CNTR.
    LoadCounter = 0x10,
    /// Index clears CNTR.
    ResetCounter = 0x20,
    /// Index latches CNTR into OTR.
    LoadOutput = 0x30,
}

impl IndexMode {
    fn from_register(reg: u8) -> Self {
        match reg & 0x30 {
            0x10 => IndexMode::LoadCounter,
            0x20 => IndexMode::ResetCounter,
            0x30 => IndexMode::LoadOutput,
            _ => IndexMode::Disabled,
        }
    }
}

/// Index synchronisation, MDR0 bit 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndexSync {
    #[default]
    Asynchronous = 0x00,
    Synchronous = 0x40,
}

/// Input filter clock division factor, MDR0 bit 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilterDivision {
    #[default]
    One = 0x00,
    Two = 0x80,
}

/// Contents of mode register 0.
///
/// `Default` is the chip's power-on state, `0x00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mdr0Config {
    pub count_mode: CountMode,
    pub run_mode: RunMode,
    pub index_mode: IndexMode,
    pub index_sync: IndexSync,
    pub filter_division: FilterDivision,
}

impl Mdr0Config {
    pub fn with_count_mode(mut self, count_mode: CountMode) -> Self {
        self.count_mode = count_mode;
        self
    }

    pub fn with_run_mode(mut self, run_mode: RunMode) -> Self {
        self.run_mode = run_mode;
        self
    }

    pub fn with_index(mut self, index_mode: IndexMode, index_sync: IndexSync) -> Self {
        self.index_mode = index_mode;
        self.index_sync = index_sync;
        self
    }

    pub fn with_filter_division(mut self, filter_division: FilterDivision) -> Self {
        self.filter_division = filter_division;
        self
    }

    pub fn to_register(&self) -> u8 {
        self.count_mode as u8
            | self.run_mode as u8
            | self.index_mode as u8
            | self.index_sync as u8
            | self.filter_division as u8
    }

    pub fn from_register(reg: u8) -> Self {
        Self {
            count_mode: CountMode::from_register(reg),
            run_mode: RunMode::from_register(reg),
            index_mode: IndexMode::from_register(reg),
            index_sync: if reg & 0x40 != 0 {
                IndexSync::Synchronous
            } else {
                IndexSync::Asynchronous
            },
            filter_division: if reg & 0x80 != 0 {
                FilterDivision::Two
            } else {
                FilterDivision::One
            },
        }
    }
}

// ---------------------------------------------------------------------------
// MDR1
// ---------------------------------------------------------------------------

/// Counting disabled when set.
pub const MDR1_DISABLE_COUNTING: u8 = 0x04;
/// Route index to FLAG.
pub const MDR1_FLAG_ON_INDEX: u8 = 0x10;
/// Route compare (CNTR == DTR) to FLAG.
pub const MDR1_FLAG_ON_COMPARE: u8 = 0x20;
/// Route borrow (underflow) to FLAG.
pub const MDR1_FLAG_ON_BORROW: u8 = 0x40;
/// Route carry (overflow) to FLAG.
pub const MDR1_FLAG_ON_CARRY: u8 = 0x80;

/// Contents of mode register 1.
///
/// `Default` is the chip's power-on state: 4-byte transfers, counting enabled
/// and no flag outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mdr1Config {
    pub data_width: DataWidth,
    pub counting_enabled: bool,
    pub flag_on_index: bool,
    pub flag_on_compare: bool,
    pub flag_on_borrow: bool,
    pub flag_on_carry: bool,
}

impl Default for Mdr1Config {
    fn default() -> Self {
        Self {
            data_width: DataWidth::Four,
            counting_enabled: true,
            flag_on_index: false,
            flag_on_compare: false,
            flag_on_borrow: false,
            flag_on_carry: false,
        }
    }
}

impl Mdr1Config {
    pub fn with_data_width(mut self, data_width: DataWidth) -> Self {
        self.data_width = data_width;
        self
    }

    pub fn with_counting_enabled(mut self, enabled: bool) -> Self {
        self.counting_enabled = enabled;
        self
    }

    pub fn to_register(&self) -> u8 {
        let mut reg = self.data_width.to_mdr1();
        if !self.counting_enabled {
            reg |= MDR1_DISABLE_COUNTING;
        }
        if self.flag_on_index {
            reg |= MDR1_FLAG_ON_INDEX;
        }
        if self.flag_on_compare {
            reg |= MDR1_FLAG_ON_COMPARE;
        }
        if self.flag_on_borrow {
            reg |= MDR1_FLAG_ON_BORROW;
        }
        if self.flag_on_carry {
            reg |= MDR1_FLAG_ON_CARRY;
        }
        reg
    }

    /// Decode an MDR1 byte. Bit 3 is unused by the chip and is dropped.
    pub fn from_register(reg: u8) -> Self {
        Self {
            data_width: DataWidth::from_mdr1(reg),
            counting_enabled: reg & MDR1_DISABLE_COUNTING == 0,
            flag_on_index: reg & MDR1_FLAG_ON_INDEX != 0,
            flag_on_compare: reg & MDR1_FLAG_ON_COMPARE != 0,
            flag_on_borrow: reg & MDR1_FLAG_ON_BORROW != 0,
            flag_on_carry: reg & MDR1_FLAG_ON_CARRY != 0,
        }
    }
}

// ---------------------------------------------------------------------------
// STR
// ---------------------------------------------------------------------------

/// Decoded status register.
///
/// | Bit | Flag | Meaning                                |
/// |-----|------|----------------------------------------|
/// | 7   | CY   | Carry (counter overflow) latch         |
/// | 6   | BW   | Borrow (counter underflow) latch       |
/// | 5   | CMP  | CNTR == DTR latch                      |
/// | 4   | IDX  | Index latch                            |
/// | 3   | CEN  | Counting enabled                       |
/// | 2   | PLS  | Power loss latch, set on power-up      |
/// | 1   | U/D  | Count direction, set when counting up  |
/// | 0   | S    | Sign of CNTR, set when negative        |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    pub carry: bool,
    pub borrow: bool,
    pub compare: bool,
    pub index: bool,
    pub counting_enabled: bool,
    pub power_loss: bool,
    pub counting_up: bool,
    pub negative: bool,
}

impl Status {
    pub fn from_register(reg: u8) -> Self {
        Self {
            carry: reg & 0x80 != 0,
            borrow: reg & 0x40 != 0,
            compare: reg & 0x20 != 0,
            index: reg & 0x10 != 0,
            counting_enabled: reg & 0x08 != 0,
            power_loss: reg & 0x04 != 0,
            counting_up: reg & 0x02 != 0,
            negative: reg & 0x01 != 0,
        }
    }
}
