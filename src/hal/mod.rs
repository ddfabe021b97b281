//! Hardware abstraction for the display bus
//!
//! Provides:
//! - the `Transport` trait the register layer is built on
//! - an adapter from `embedded_hal::spi::SpiDevice`

pub mod transport;

pub use transport::{SpiTransport, Transport};
