//! RA8875 Controller Driver
//!
//! Register-level access to the RAiO RA8875 over the 4-wire SPI protocol,
//! plus bring-up (identification, PLL, panel timing) and the small helpers
//! that program cursors, layers and colours.
//!
//! # Transactions
//!
//! Every call here is exactly one bus exchange. Register accesses fold the
//! command-write and data cycles into one 3-byte frame behind a command-write
//! selector, which the controller treats as one register access:
//!
//! ```text
//! write_register(reg, v):  0x80 | reg  0x00  v
//! read_register(reg):      0x80 | reg  0x40  <reply>
//! ```

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use super::bte::InterruptStatus;
use super::color::Color;
use super::registers::{self as reg, cycle};
use crate::config::{DriverConfig, PanelTiming};
use crate::error::{DisplayResult, Error, Misuse};
use crate::hal::Transport;

/// Largest data block the controller FIFO accepts in one exchange
pub const MAX_BLOCK_LEN: usize = 512;

/// PLL input multiplier
const PLL_MULTIPLIER: u8 = 23;

/// One atomic bus exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction<'a> {
    /// Select a register for the following data cycles
    Command(u8),
    /// Write one byte to the selected register
    Data(u8),
    /// Stream bytes to the selected register (at most [`MAX_BLOCK_LEN`])
    DataBlock(&'a [u8]),
    /// Read one byte from the selected register
    DataRead,
    /// Select `reg` and write `value` in one exchange
    RegisterWrite { reg: u8, value: u8 },
    /// Select `reg` and read it back in one exchange
    RegisterRead { reg: u8 },
}

/// Payload bytes of a transaction, after the cycle selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame<'a> {
    Short { bytes: [u8; 3], len: usize },
    Block(&'a [u8]),
}

impl Frame<'_> {
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Frame::Short { bytes, len } => &bytes[..*len],
            Frame::Block(block) => block,
        }
    }
}

impl<'a> Transaction<'a> {
    /// Cycle selector sent ahead of the payload
    pub const fn cycle(&self) -> u8 {
        match self {
            Transaction::Command(_)
            | Transaction::RegisterWrite { .. }
            | Transaction::RegisterRead { .. } => cycle::CMD_WRITE,
            Transaction::Data(_) | Transaction::DataBlock(_) => cycle::DATA_WRITE,
            Transaction::DataRead => cycle::DATA_READ,
        }
    }

    /// Whether the last payload byte is replaced by a reply
    pub const fn expects_reply(&self) -> bool {
        matches!(self, Transaction::DataRead | Transaction::RegisterRead { .. })
    }

    pub fn frame(&self) -> Frame<'a> {
        match *self {
            Transaction::Command(reg) => Frame::Short { bytes: [reg, 0, 0], len: 1 },
            Transaction::Data(value) => Frame::Short { bytes: [value, 0, 0], len: 1 },
            Transaction::DataBlock(block) => Frame::Block(block),
            Transaction::DataRead => Frame::Short { bytes: [0; 3], len: 1 },
            Transaction::RegisterWrite { reg, value } => Frame::Short {
                bytes: [reg, cycle::DATA_WRITE, value],
                len: 3,
            },
            Transaction::RegisterRead { reg } => Frame::Short {
                bytes: [reg, cycle::DATA_READ, 0],
                len: 3,
            },
        }
    }
}

/// One of the two frame-memory planes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    L0 = 0,
    L1 = 1,
}

impl Layer {
    pub const fn bit(self) -> u8 {
        self as u8
    }

    /// The other plane
    pub const fn other(self) -> Self {
        match self {
            Layer::L0 => Layer::L1,
            Layer::L1 => Layer::L0,
        }
    }
}

/// How the two layers are combined on the panel (LTPR0 bits 2:0)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerMode {
    OnlyL0 = 0,
    OnlyL1 = 1,
    Lighten = 2,
    Transparent = 3,
    Or = 4,
    And = 5,
    FloatingWindow = 6,
}

/// Layer transparency register 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerDisplay {
    /// Scroll function mode, 2 bits
    pub scroll_mode: u8,
    pub floating_window: bool,
    pub mode: LayerMode,
}

impl LayerDisplay {
    pub const fn encode(&self) -> u8 {
        (self.mode as u8) | ((self.floating_window as u8) << 5) | ((self.scroll_mode & 0b11) << 6)
    }
}

/// RA8875 driver state
pub struct Ra8875<T, IRQ> {
    bus: T,
    pub(super) irq: IRQ,
    config: DriverConfig,
    /// Colour currently programmed into FGCR0..2, if known
    foreground: Option<Color>,
}

impl<T: Transport, IRQ> Ra8875<T, IRQ> {
    /// Create a driver over an already configured bus and interrupt input
    pub const fn new(bus: T, irq: IRQ, config: DriverConfig) -> Self {
        Self {
            bus,
            irq,
            config,
            foreground: None,
        }
    }

    /// Release the bus and interrupt pin
    pub fn release(self) -> (T, IRQ) {
        (self.bus, self.irq)
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn bus_mut(&mut self) -> &mut T {
        &mut self.bus
    }

    /// Perform one transaction, returning the reply byte if it has one
    pub fn execute(&mut self, transaction: Transaction<'_>) -> DisplayResult<Option<u8>, T::Error> {
        if let Transaction::DataBlock(block) = transaction {
            if block.len() > MAX_BLOCK_LEN {
                return Err(Misuse::BlockTooLarge { len: block.len() }.into());
            }
        }

        let cycle = transaction.cycle();
        match transaction.frame() {
            Frame::Block(block) => {
                self.bus.write(cycle, block).map_err(Error::Transport)?;
                Ok(None)
            }
            Frame::Short { mut bytes, len } => {
                let frame = &mut bytes[..len];
                if transaction.expects_reply() {
                    self.bus.transfer(cycle, frame).map_err(Error::Transport)?;
                    Ok(Some(frame[len - 1]))
                } else {
                    self.bus.write(cycle, frame).map_err(Error::Transport)?;
                    Ok(None)
                }
            }
        }
    }

    // ========================================================================
    // REGISTER ACCESS
    // ========================================================================

    pub fn write_command(&mut self, reg: u8) -> DisplayResult<(), T::Error> {
        self.execute(Transaction::Command(reg)).map(drop)
    }

    pub fn write_data(&mut self, value: u8) -> DisplayResult<(), T::Error> {
        self.execute(Transaction::Data(value)).map(drop)
    }

    /// Write up to [`MAX_BLOCK_LEN`] bytes; larger blocks are rejected unsent
    pub fn write_data_block(&mut self, data: &[u8]) -> DisplayResult<(), T::Error> {
        self.execute(Transaction::DataBlock(data)).map(drop)
    }

    pub fn read_data(&mut self) -> DisplayResult<u8, T::Error> {
        Ok(self.execute(Transaction::DataRead)?.unwrap_or_default())
    }

    pub fn write_register(&mut self, reg: u8, value: u8) -> DisplayResult<(), T::Error> {
        self.execute(Transaction::RegisterWrite { reg, value }).map(drop)
    }

    pub fn read_register(&mut self, reg: u8) -> DisplayResult<u8, T::Error> {
        Ok(self.execute(Transaction::RegisterRead { reg })?.unwrap_or_default())
    }

    /// Write a 16-bit value to `reg` (low byte) and `reg + 1` (high byte)
    pub fn write_register_pair(&mut self, reg: u8, value: u16) -> DisplayResult<(), T::Error> {
        let [lo, hi] = value.to_le_bytes();
        self.write_register(reg, lo)?;
        self.write_register(reg + 1, hi)
    }

    // ========================================================================
    // BRING-UP
    // ========================================================================

    /// Wait for the controller to identify itself, then enable BTE interrupts
    ///
    /// The controller can take a while to come out of reset, so a wrong ID
    /// is retried `init_retries` times. Bus failures are not retried.
    /// The cached foreground is dropped; a reset controller holds its
    /// power-on colour.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<(), T::Error> {
        self.foreground = None;
        let attempts = self.config.init_retries.max(1);
        let mut id = 0;
        for attempt in 1..=attempts {
            id = self.read_register(reg::ID)?;
            if id == reg::ID_VALUE {
                break;
            }
            warn!(
                "RA8875: id register reads {:#04x} (attempt {}/{}), check the SPI wiring",
                id, attempt, attempts
            );
            if attempt < attempts {
                delay.delay_ms(self.config.init_retry_delay_ms);
            }
        }
        if id != reg::ID_VALUE {
            return Err(Error::DeviceNotReady { id });
        }

        let enabled = InterruptStatus::BTE_READY.union(InterruptStatus::BTE_COMPLETE);
        self.write_register(reg::INTC1, enabled.bits())?;
        self.write_register(reg::INTC2, 0xFF)?;
        info!("RA8875: controller ready");
        Ok(())
    }

    /// Program power, clocks, colour depth, both layers and panel timing
    pub fn configure(&mut self, panel: &PanelTiming) -> DisplayResult<(), T::Error> {
        self.write_register(reg::PWRR, reg::PWRR_NORMAL | reg::PWRR_DISPON)?;
        self.write_register(reg::GPIOX, 1)?;
        self.write_register(reg::P1CR, reg::P1CR_ENABLE | (reg::PWM_CLK_DIV1024 & 0x0F))?;

        self.write_register(reg::PLLC1, reg::PLLC1_PLLDIV1 | PLL_MULTIPLIER)?;
        self.write_register(reg::PLLC2, reg::PLLC2_DIV1)?;

        self.write_register(reg::SYSR, reg::SYSR_8BPP)?;
        self.write_register(reg::PCSR, reg::PCSR_PDATL | reg::PCSR_2CLK)?;
        self.write_register(reg::DPCR, reg::DPCR_TWO_LAYERS)?;

        // Horizontal: width = (HDWR + 1) * 8, non-display = HNDR * 8 + HNDFTR + 2
        self.write_register(reg::HDWR, ((panel.width / 8).saturating_sub(1)) as u8)?;
        self.write_register(reg::HNDFTR, reg::HNDFTR_DE_HIGH | panel.hsync_finetune)?;
        let hndr = panel
            .hsync_nondisp
            .saturating_sub(panel.hsync_finetune)
            .saturating_sub(2)
            / 8;
        self.write_register(reg::HNDR, hndr)?;
        self.write_register(reg::HSTR, (panel.hsync_start / 8).saturating_sub(1))?;
        self.write_register(reg::HPWR, reg::HPWR_LOW | (panel.hsync_pw / 8).saturating_sub(1))?;

        // Vertical: each field is programmed as value - 1
        let last_line = (panel.height + panel.voffset).saturating_sub(1);
        self.write_register_pair(reg::VDHR0, last_line)?;
        self.write_register_pair(reg::VNDR0, panel.vsync_nondisp.saturating_sub(1))?;
        self.write_register_pair(reg::VSTR0, panel.vsync_start.saturating_sub(1))?;
        self.write_register(reg::VPWR, reg::VPWR_LOW | panel.vsync_pw.saturating_sub(1))?;

        // Active window covers the whole panel
        self.write_register_pair(reg::HSAW0, 0)?;
        self.write_register_pair(reg::HEAW0, panel.width.saturating_sub(1))?;
        self.write_register_pair(reg::VSAW0, panel.voffset)?;
        self.write_register_pair(reg::VEAW0, last_line)?;

        info!("RA8875: configured {}x{} panel", panel.width, panel.height);
        Ok(())
    }

    /// Start clearing the active layer to black
    pub fn clear(&mut self) -> DisplayResult<(), T::Error> {
        self.write_register(reg::MCLR, reg::MCLR_START | reg::MCLR_FULL)
    }

    pub fn set_backlight(&mut self, brightness: u8) -> DisplayResult<(), T::Error> {
        self.write_register(reg::P1DCR, brightness)
    }

    // ========================================================================
    // CURSORS, LAYERS, COLOUR
    // ========================================================================

    /// Graphic write cursor used by memory writes
    pub fn set_write_cursor(&mut self, x: u16, y: u16) -> DisplayResult<(), T::Error> {
        self.write_register_pair(reg::CURH0, x)?;
        self.write_register_pair(reg::CURV0, y)
    }

    pub fn set_read_cursor(&mut self, x: u16, y: u16) -> DisplayResult<(), T::Error> {
        self.write_register_pair(reg::RCURH0, x)?;
        self.write_register_pair(reg::RCURV0, y)
    }

    /// Cursor used by the built-in text engine
    pub fn set_text_cursor(&mut self, x: u16, y: u16) -> DisplayResult<(), T::Error> {
        self.write_register_pair(reg::F_CURXL, x)?;
        self.write_register_pair(reg::F_CURYL, y)
    }

    /// Select the layer memory writes land in. Also disables the graphic cursor.
    pub fn set_writing_layer(&mut self, layer: Layer) -> DisplayResult<(), T::Error> {
        self.write_register(reg::MWCR1, layer.bit())
    }

    pub fn set_layer_display(&mut self, display: LayerDisplay) -> DisplayResult<(), T::Error> {
        self.write_register(reg::LTPR0, display.encode())
    }

    /// Program the foreground colour, skipping the writes if it is already set
    pub fn set_foreground(&mut self, color: Color) -> DisplayResult<(), T::Error> {
        if self.foreground == Some(color) {
            return Ok(());
        }
        self.foreground = None;
        let (r, g, b) = color.fields();
        self.write_register(reg::FGCR0, r)?;
        self.write_register(reg::FGCR1, g)?;
        self.write_register(reg::FGCR2, b)?;
        self.foreground = Some(color);
        Ok(())
    }

    pub fn foreground(&self) -> Option<Color> {
        self.foreground
    }
}
