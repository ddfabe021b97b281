//! Display Surface
//!
//! [`Display`] owns the controller and everything the dashboard needs to
//! know about it between calls: which layer is being written, whether the
//! controller is in graphic or text mode, which font is active and where the
//! text cursor was last placed. Mode registers are only written when the
//! tracked state says they have to change.
//!
//! Two fonts are available:
//!
//! - [`Font::Native`]: the controller's built-in text engine, 3x enlarged
//!   with a transparent background. Fast, used for values.
//! - [`Font::Software`]: 8x16 bitmaps from the glyph cache, drawn as scaled
//!   filled rectangles in graphic mode. Used for labels.

pub mod bte;
pub mod color;
pub mod draw;
pub mod glyph;
pub mod ra8875;
pub mod registers;

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use heapless::String;
use log::{debug, info};

pub use bte::{BteOp, InterruptStatus, LayerPoint, Rop, Size};
pub use color::Color;
pub use glyph::{AdvanceTable, FontData, Glyph, GlyphCache, GlyphTable, COMIC_SANS_ADVANCE};
pub use ra8875::{Layer, LayerDisplay, LayerMode, Ra8875, Transaction};

use crate::error::{DisplayResult, Misuse};
use crate::hal::Transport;
use glyph::{GLYPH_HEIGHT, GLYPH_SCALE, GLYPH_WIDTH};
use registers as reg;

/// Room for any i32 or a two-decimal value up to 12 integer digits
const NUMBER_CAPACITY: usize = 16;

/// Controller write mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Graphic,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    /// Controller text engine
    Native,
    /// Cached bitmaps drawn as rectangles
    Software,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

/// What the driver believes the controller is set up for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceState {
    /// Last text position written
    pub cursor: Point,
    pub layer: Layer,
    pub mode: Mode,
    pub font: Font,
    pub foreground: Color,
}

impl SurfaceState {
    const fn new() -> Self {
        Self {
            cursor: Point { x: 0, y: 0 },
            layer: Layer::L0,
            mode: Mode::Graphic,
            font: Font::Native,
            foreground: Color::WHITE,
        }
    }
}

/// Stateful drawing surface over an RA8875
pub struct Display<T, IRQ> {
    lcd: Ra8875<T, IRQ>,
    state: SurfaceState,
    glyphs: GlyphCache,
    advance: AdvanceTable,
}

impl<T: Transport, IRQ: InputPin> Display<T, IRQ> {
    /// Wrap a controller and build the glyph cache. No bus traffic.
    pub fn new<F: FontData + ?Sized>(lcd: Ra8875<T, IRQ>, font: &F, advance: AdvanceTable) -> Self {
        let glyphs = GlyphCache::build(font);
        debug!("Display: {} glyphs cached", glyphs.len());
        Self {
            lcd,
            state: SurfaceState::new(),
            glyphs,
            advance,
        }
    }

    /// Bring the controller up and put it in the state [`SurfaceState`] assumes
    pub fn start<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<(), T::Error> {
        let config = *self.lcd.config();
        self.lcd.init(delay)?;
        self.lcd.configure(&config.panel)?;
        self.lcd.clear()?;
        self.lcd.set_backlight(config.brightness)?;
        self.lcd.set_foreground(Color::WHITE)?;

        self.lcd.write_register(reg::MWCR0, reg::MWCR0_GRAPHIC)?;
        self.lcd.set_writing_layer(Layer::L0)?;
        self.lcd.set_layer_display(LayerDisplay {
            scroll_mode: 0,
            floating_window: false,
            mode: LayerMode::OnlyL0,
        })?;
        self.lcd.set_text_cursor(0, 0)?;
        self.state = SurfaceState::new();
        info!("Display: started, backlight {:#04x}", config.brightness);
        Ok(())
    }

    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    /// Full panel as a BTE region
    pub fn panel_size(&self) -> Size {
        let panel = &self.lcd.config().panel;
        Size::new(panel.width, panel.height)
    }

    pub fn glyphs(&self) -> &GlyphCache {
        &self.glyphs
    }

    /// Direct controller access for operations the surface does not wrap
    pub fn controller(&mut self) -> &mut Ra8875<T, IRQ> {
        &mut self.lcd
    }

    pub fn release(self) -> Ra8875<T, IRQ> {
        self.lcd
    }

    /// Clear the active layer, home the text cursor, foreground white
    pub fn reset(&mut self) -> DisplayResult<(), T::Error> {
        self.lcd.clear()?;
        self.lcd.set_text_cursor(0, 0)?;
        self.state.cursor = Point::default();
        self.set_foreground(Color::WHITE)
    }

    /// Direct memory writes and text to `layer`
    pub fn set_layer(&mut self, layer: Layer) -> DisplayResult<(), T::Error> {
        self.lcd.set_writing_layer(layer)?;
        self.state.layer = layer;
        Ok(())
    }

    // ========================================================================
    // MODE AND FONT
    // ========================================================================

    pub fn enable_draw_mode(&mut self) -> DisplayResult<(), T::Error> {
        if self.state.mode != Mode::Graphic {
            self.lcd.write_register(reg::MWCR0, reg::MWCR0_GRAPHIC)?;
            self.state.mode = Mode::Graphic;
        }
        Ok(())
    }

    pub fn enable_text_mode_and_font(&mut self, font: Font) -> DisplayResult<(), T::Error> {
        match font {
            Font::Native => {
                if self.state.mode != Mode::Text {
                    self.lcd.write_register(reg::MWCR0, reg::MWCR0_TEXT)?;
                    self.state.mode = Mode::Text;
                }
                self.set_foreground(Color::WHITE)?;
                self.lcd.write_register(reg::FNCR1, reg::FNCR1_TRIPLE_TRANSPARENT)?;
                // MWCR1 also selects the write layer
                self.lcd.write_register(reg::MWCR1, self.state.layer.bit())?;
                self.lcd.write_register(reg::FNCR0, 0x00)?;
            }
            // Drawn as rectangles
            Font::Software => self.enable_draw_mode()?,
        }
        self.state.font = font;
        Ok(())
    }

    // ========================================================================
    // TEXT
    // ========================================================================

    /// Write `text` with the active font, top-left at (x, y)
    pub fn write_text_at(&mut self, x: u16, y: u16, text: &str) -> DisplayResult<(), T::Error> {
        match self.state.font {
            Font::Native => {
                self.lcd.set_text_cursor(x, y)?;
                self.state.cursor = Point { x, y };
                self.lcd.write_command(reg::MRWC)?;
                for byte in text.bytes() {
                    self.lcd.write_data(byte)?;
                }
            }
            Font::Software => {
                self.set_foreground(Color::WHITE)?;
                let mut cursor_x = x;
                for ch in text.bytes() {
                    // Bytes without a glyph are skipped and take no space
                    if self.blit_glyph(cursor_x, y, ch)? {
                        cursor_x = cursor_x.saturating_add(self.advance.advance(ch));
                    }
                }
                self.state.cursor = Point { x: cursor_x, y };
            }
        }
        Ok(())
    }

    /// Write an integer (`"42"`) or a two-decimal value (`"3.14"`)
    ///
    /// Integers are truncated toward zero.
    pub fn write_number_at(
        &mut self,
        x: u16,
        y: u16,
        is_integer: bool,
        value: f32,
    ) -> DisplayResult<(), T::Error> {
        let text = format_number(is_integer, value)?;
        self.write_text_at(x, y, &text)
    }

    /// Draw the cached glyph for `ch`, returning false if there is none
    fn blit_glyph(&mut self, x: u16, y: u16, ch: u8) -> DisplayResult<bool, T::Error> {
        let Some(glyph) = self.glyphs.get(ch) else {
            return Ok(false);
        };
        let fits_x = x.checked_add(GLYPH_WIDTH as u16 * GLYPH_SCALE - 1).is_some();
        let fits_y = y.checked_add(GLYPH_HEIGHT as u16 * GLYPH_SCALE - 1).is_some();
        if !(fits_x && fits_y) {
            return Err(Misuse::OutOfRange { x, y }.into());
        }
        for (row, pixels) in (0u16..).zip(glyph.rows()) {
            let y1 = y + row * GLYPH_SCALE;
            for span in glyph::spans(pixels) {
                let x1 = x + span.start as u16 * GLYPH_SCALE;
                let x2 = x + (span.end as u16 + 1) * GLYPH_SCALE - 1;
                self.lcd
                    .draw_rect_fast(x1, y1, x2, y1 + GLYPH_SCALE - 1, true)?;
            }
        }
        Ok(true)
    }

    // ========================================================================
    // SHAPES
    // ========================================================================

    pub fn draw_rect(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        color: Color,
        filled: bool,
    ) -> DisplayResult<(), T::Error> {
        self.lcd.draw_rect(x1, y1, x2, y2, color, filled)?;
        self.state.foreground = color;
        Ok(())
    }

    /// BTE solid fill on the current write layer
    pub fn fill_rect(&mut self, x: u16, y: u16, size: Size, color: Color) -> DisplayResult<(), T::Error> {
        let dst = LayerPoint::new(x, y, self.state.layer);
        self.lcd.bte_fill(dst, size, color)?;
        self.state.foreground = color;
        Ok(())
    }

    /// Copy the region at the origin of `from` onto `to`
    pub fn copy_layer(&mut self, from: Layer, to: Layer, size: Size) -> DisplayResult<(), T::Error> {
        self.lcd.bte_move(
            LayerPoint::new(0, 0, from),
            LayerPoint::new(0, 0, to),
            size,
            Rop::SRC,
            false,
        )
    }

    fn set_foreground(&mut self, color: Color) -> DisplayResult<(), T::Error> {
        self.lcd.set_foreground(color)?;
        self.state.foreground = color;
        Ok(())
    }
}

fn format_number(is_integer: bool, value: f32) -> Result<String<NUMBER_CAPACITY>, Misuse> {
    let mut text = String::new();
    let written = if is_integer {
        write!(text, "{}", value as i32)
    } else {
        write!(text, "{:.2}", value)
    };
    written.map_err(|_| Misuse::TextTooLong)?;
    Ok(text)
}
