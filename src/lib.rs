//! RA8875 Dashboard Display Driver
//!
//! Driver for the RAiO RA8875 TFT controller on a 4-wire SPI bus, plus the
//! fixed instrument-panel screens of the vehicle dashboard built on top of it.
//!
//! # Architecture
//!
//! ```text
//! Application loop (buttons, telemetry)
//!     │
//!     ▼
//! ┌──────────────────┐
//! │    Dashboard     │  screen state machine, pre-rendered layer
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │     Display      │  mode/font/layer state, glyph cache, text
//! └────────┬─────────┘
//!          ▼
//! ┌────────┴─────────┐
//! │ draw  │   bte    │  rectangles, pixel blit / move, fill, raster write
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │     Ra8875       │  register transactions, init, panel timing
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │    Transport     │  SpiDevice + active-low interrupt line
//! └──────────────────┘
//! ```
//!
//! All blocking waits on the Block Transfer Engine are bounded by the poll
//! budget in [`DriverConfig`], so a dead interrupt line surfaces as
//! [`Error::Timeout`] instead of hanging the caller.

#![cfg_attr(not(test), no_std)]
#![allow(clippy::new_without_default)]
#![allow(clippy::too_many_arguments)]

pub mod config;
pub mod display;
pub mod error;
pub mod hal;
pub mod screens;

#[cfg(test)]
mod testing;

// Re-export main types
pub use config::{BusConfig, BusPins, DriverConfig, PanelTiming};
pub use display::{Color, Display, Font, Layer, Mode, Ra8875, SurfaceState};
pub use error::{DisplayResult, Error, Misuse};
pub use hal::{SpiTransport, Transport};
pub use screens::{Dashboard, Screen};
