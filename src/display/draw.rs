//! Geometric drawing engine and direct memory writes
//!
//! Rectangles use the controller's own drawing engine (DCR), not the BTE, so
//! they complete without an interrupt handshake.

use super::color::Color;
use super::ra8875::{Ra8875, MAX_BLOCK_LEN};
use super::registers as reg;
use crate::error::DisplayResult;
use crate::hal::Transport;

impl<T: Transport, IRQ> Ra8875<T, IRQ> {
    /// Draw a rectangle between two inclusive corners
    pub fn draw_rect(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        color: Color,
        filled: bool,
    ) -> DisplayResult<(), T::Error> {
        self.set_foreground(color)?;
        self.draw_rect_fast(x1, y1, x2, y2, filled)
    }

    /// Draw with whatever foreground is already programmed
    pub fn draw_rect_fast(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        filled: bool,
    ) -> DisplayResult<(), T::Error> {
        self.write_register_pair(reg::DLHSR0, x1)?;
        self.write_register_pair(reg::DLVSR0, y1)?;
        self.write_register_pair(reg::DLHER0, x2)?;
        self.write_register_pair(reg::DLVER0, y2)?;
        let dcr = if filled {
            reg::DCR_RECT_FILLED
        } else {
            reg::DCR_RECT_OUTLINE
        };
        self.write_register(reg::DCR, dcr)
    }

    /// Write raw pixels at the cursor, wrapping at the active window edge
    pub fn draw_pixels(&mut self, x: u16, y: u16, pixels: &[u8]) -> DisplayResult<(), T::Error> {
        self.set_write_cursor(x, y)?;
        self.write_command(reg::MRWC)?;
        for chunk in pixels.chunks(MAX_BLOCK_LEN) {
            self.write_data_block(chunk)?;
        }
        Ok(())
    }
}
