//! Error types for the counter driver.

use core::fmt;

/// Errors that can occur when talking to the counter.
///
/// Both variants carry the collaborator's own error unchanged. The driver does
/// not retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<SpiE, PinE> {
    /// Underlying SPI bus error.
    Spi(SpiE),

    /// Chip-select pin could not be driven.
    ChipSelect(PinE),
}

impl<SpiE: fmt::Debug, PinE: fmt::Debug> fmt::Display for Error<SpiE, PinE> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Spi(e) => write!(f, "SPI error: {:?}", e),
            Error::ChipSelect(e) => write!(f, "Chip-select error: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<SpiE: defmt::Format, PinE: defmt::Format> defmt::Format for Error<SpiE, PinE> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Spi(e) => defmt::write!(f, "SPI error: {}", e),
            Error::ChipSelect(e) => defmt::write!(f, "Chip-select error: {}", e),
        }
    }
}
