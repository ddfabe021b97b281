//! Byte-oriented bus transport
//!
//! The RA8875 4-wire SPI protocol opens every exchange with one command byte
//! that selects the cycle type, followed by the payload:
//!
//! | Command byte | Cycle         |
//! |--------------|---------------|
//! | 0x00         | Data write    |
//! | 0x40         | Data read     |
//! | 0x80         | Command write |
//! | 0xC0         | Status read   |
//!
//! Chip select must stay asserted from the command byte to the last payload
//! byte, so both operations below are a single transaction.

use embedded_hal::spi::{Operation, SpiDevice};

/// Synchronous serial bus used by the register layer
pub trait Transport {
    type Error: core::fmt::Debug;

    /// Send `command` followed by `payload` in one chip-select window
    fn write(&mut self, command: u8, payload: &[u8]) -> Result<(), Self::Error>;

    /// Send `command` followed by `buf`, replacing `buf` with the bytes
    /// clocked in during the payload phase
    fn transfer(&mut self, command: u8, buf: &mut [u8]) -> Result<(), Self::Error>;
}

/// [`Transport`] over an `embedded-hal` SPI device
///
/// The device owns chip select; bus clock and pin setup belong to whoever
/// builds it.
pub struct SpiTransport<D> {
    spi: D,
}

impl<D: SpiDevice> SpiTransport<D> {
    pub const fn new(spi: D) -> Self {
        Self { spi }
    }

    /// Release the SPI device
    pub fn release(self) -> D {
        self.spi
    }
}

impl<D: SpiDevice> Transport for SpiTransport<D> {
    type Error = D::Error;

    fn write(&mut self, command: u8, payload: &[u8]) -> Result<(), Self::Error> {
        let command = [command];
        self.spi
            .transaction(&mut [Operation::Write(&command), Operation::Write(payload)])
    }

    fn transfer(&mut self, command: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        let command = [command];
        self.spi.transaction(&mut [
            Operation::Write(&command),
            Operation::TransferInPlace(buf),
        ])
    }
}
