//! Test doubles for the SPI bus and chip-select pin.

extern crate std;

use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal::digital;
use embedded_hal::spi::{self, ErrorKind};
use embedded_hal_async::spi::SpiBus;

/// Byte the mock shifts out during the instruction phase. The driver must
/// never interpret it.
pub const MOCK_FILL_BYTE: u8 = 0xEE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl spi::Error for MockError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl digital::Error for MockError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

/// Records every frame clocked out and answers from a scripted MISO queue.
#[derive(Debug, Default)]
pub struct MockBus {
    /// Frames as the driver sent them, one per transaction.
    pub frames: Vec<Vec<u8>>,
    pub flushes: usize,
    pub fail_transfers: bool,
    /// Never complete a transfer.
    pub stall: bool,
    miso: VecDeque<u8>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes returned during payload phases. Unscripted bytes read as 0.
    pub fn respond(&mut self, bytes: &[u8]) {
        self.miso.extend(bytes.iter().copied());
    }

    /// Payload bytes (everything after the instruction) of each frame.
    pub fn payload_lens(&self) -> Vec<usize> {
        self.frames.iter().map(|frame| frame.len() - 1).collect()
    }

    pub fn opcodes(&self) -> Vec<u8> {
        self.frames.iter().map(|frame| frame[0]).collect()
    }
}

impl spi::ErrorType for MockBus {
    type Error = MockError;
}

impl SpiBus<u8> for MockBus {
    async fn read(&mut self, words: &mut [u8]) -> Result<(), MockError> {
        for word in words.iter_mut() {
            *word = self.miso.pop_front().unwrap_or(0);
        }
        Ok(())
    }

    async fn write(&mut self, words: &[u8]) -> Result<(), MockError> {
        self.frames.push(words.to_vec());
        Ok(())
    }

    async fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), MockError> {
        let mut words = write.to_vec();
        self.transfer_in_place(&mut words).await?;
        let len = read.len().min(words.len());
        read[..len].copy_from_slice(&words[..len]);
        Ok(())
    }

    async fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), MockError> {
        if self.stall {
            core::future::pending::<()>().await;
        }
        if self.fail_transfers {
            return Err(MockError);
        }

        self.frames.push(words.to_vec());
        if let Some((first, rest)) = words.split_first_mut() {
            *first = MOCK_FILL_BYTE;
            for word in rest {
                *word = self.miso.pop_front().unwrap_or(0);
            }
        }
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), MockError> {
        self.flushes += 1;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinEvent {
    Low,
    High,
}

/// Output pin that logs every level change, including failed attempts.
#[derive(Debug, Default)]
pub struct MockPin {
    pub events: Vec<PinEvent>,
    pub fail_low: bool,
    pub fail_high: bool,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of assert/release pairs, or `None` if they are unbalanced or
    /// out of order.
    pub fn selections(&self) -> Option<usize> {
        let mut pairs = self.events.chunks(2);
        let balanced = pairs.all(|pair| pair == [PinEvent::Low, PinEvent::High]);
        (balanced && self.events.len() % 2 == 0).then_some(self.events.len() / 2)
    }
}

impl digital::ErrorType for MockPin {
    type Error = MockError;
}

impl digital::OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), MockError> {
        self.events.push(PinEvent::Low);
        if self.fail_low {
            return Err(MockError);
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), MockError> {
        self.events.push(PinEvent::High);
        if self.fail_high {
            return Err(MockError);
        }
        Ok(())
    }
}
