//! Driver errors
//!
//! Three classes of failure reach the caller:
//!
//! - transport failures (`Transport`, `InterruptPin`, `Timeout`): the bus or
//!   the interrupt line stopped responding, the operation is aborted
//! - `DeviceNotReady`: the controller never identified itself during init
//! - `Misuse`: a caller passed a size or position the protocol cannot
//!   express; nothing was sent to the controller

use core::fmt;

use embedded_hal::digital::ErrorKind as PinErrorKind;

/// Result type for driver operations over a transport with error `E`
pub type DisplayResult<T, E> = core::result::Result<T, Error<E>>;

/// Caller errors detected before any bus traffic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Misuse {
    /// Data block exceeds the controller FIFO
    BlockTooLarge { len: usize },
    /// Width or height of a BTE region is zero
    EmptyRegion,
    /// Raster payload length differs from width * height
    PayloadMismatch { expected: usize, actual: usize },
    /// Formatted text does not fit the fixed buffer
    TextTooLong,
    /// Value field index out of range for the current screen
    NoSuchField { index: usize },
    /// Glyph at (x, y) would extend past the 16-bit coordinate range
    OutOfRange { x: u16, y: u16 },
}

impl fmt::Display for Misuse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Misuse::BlockTooLarge { len } => {
                write!(f, "data block of {} bytes exceeds the 512 byte FIFO", len)
            }
            Misuse::EmptyRegion => write!(f, "BTE region has zero width or height"),
            Misuse::PayloadMismatch { expected, actual } => {
                write!(f, "raster payload is {} bytes, region needs {}", actual, expected)
            }
            Misuse::TextTooLong => write!(f, "formatted text exceeds buffer"),
            Misuse::NoSuchField { index } => write!(f, "no value field {}", index),
            Misuse::OutOfRange { x, y } => {
                write!(f, "glyph at ({}, {}) exceeds the coordinate range", x, y)
            }
        }
    }
}

/// Errors returned by the driver, generic over the transport error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// Bus exchange failed
    Transport(E),
    /// Interrupt line could not be read
    InterruptPin(PinErrorKind),
    /// BTE wait exhausted its poll budget without seeing `mask`
    Timeout { mask: u8 },
    /// Identification register never read back 0x75
    DeviceNotReady { id: u8 },
    /// Caller error, see [`Misuse`]
    Misuse(Misuse),
}

impl<E> Error<E> {
    /// True for failures of the bus or interrupt line
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::InterruptPin(_) | Error::Timeout { .. }
        )
    }
}

impl<E> From<Misuse> for Error<E> {
    fn from(misuse: Misuse) -> Self {
        Error::Misuse(misuse)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "bus transfer failed: {:?}", e),
            Error::InterruptPin(kind) => write!(f, "interrupt line read failed: {:?}", kind),
            Error::Timeout { mask } => {
                write!(f, "timed out waiting for BTE interrupt {:#04x}", mask)
            }
            Error::DeviceNotReady { id } => {
                write!(f, "RA8875 not ready: id register reads {:#04x}", id)
            }
            Error::Misuse(misuse) => write!(f, "protocol misuse: {}", misuse),
        }
    }
}
