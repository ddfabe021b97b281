//! Driver configuration
//!
//! Everything the driver needs at start-up is passed in one explicit record.
//! Bus and pin numbers are descriptive: the platform uses them to build the
//! `SpiDevice` and interrupt `InputPin` handed to [`crate::Ra8875::new`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bus pin roles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusPins {
    pub mosi: u8,
    pub miso: u8,
    pub sclk: u8,
    /// Controller reset line
    pub reset: u8,
}

/// SPI bus identity and wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusConfig {
    /// SPI host peripheral index
    pub host: u8,
    /// Clock rate in Hz
    pub speed_hz: u32,
    pub pins: BusPins,
    pub chip_select: u8,
    /// Active-low BTE interrupt input
    pub interrupt: u8,
}

impl BusConfig {
    /// Dashboard wiring. 200 kHz works, 2.8 MHz is unstable on this harness.
    pub const DASHBOARD: Self = Self {
        host: 3,
        speed_hz: 115_200,
        pins: BusPins {
            mosi: 13,
            miso: 12,
            sclk: 11,
            reset: 4,
        },
        chip_select: 6,
        interrupt: 4,
    };
}

/// Panel timing, in pixels and lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelTiming {
    pub hsync_nondisp: u8,
    pub hsync_start: u8,
    pub hsync_pw: u8,
    pub hsync_finetune: u8,
    pub vsync_nondisp: u16,
    pub vsync_start: u16,
    pub vsync_pw: u8,
    pub width: u16,
    pub height: u16,
    pub voffset: u16,
}

impl PanelTiming {
    /// 800×480 TFT
    pub const PANEL_800X480: Self = Self {
        hsync_nondisp: 26,
        hsync_start: 32,
        hsync_pw: 96,
        hsync_finetune: 0,
        vsync_nondisp: 32,
        vsync_start: 23,
        vsync_pw: 2,
        width: 800,
        height: 480,
        voffset: 0,
    };
}

/// Complete driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriverConfig {
    pub bus: BusConfig,
    pub panel: PanelTiming,
    /// PWM1 backlight duty, 0xFF is brightest
    pub brightness: u8,
    /// Upper bound on interrupt-line polls and status reads per BTE wait
    pub irq_poll_budget: u32,
    /// Identification attempts before giving up
    pub init_retries: u8,
    pub init_retry_delay_ms: u32,
}

impl DriverConfig {
    /// Dashboard defaults: 800×480 panel at 80% brightness
    pub const DASHBOARD: Self = Self {
        bus: BusConfig::DASHBOARD,
        panel: PanelTiming::PANEL_800X480,
        brightness: 0xCC,
        irq_poll_budget: 1_000_000,
        init_retries: 50,
        init_retry_delay_ms: 100,
    };
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::DASHBOARD
    }
}
