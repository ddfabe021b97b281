//! Block Transfer Engine
//!
//! The BTE fills, copies and uploads rectangles without per-pixel bus
//! traffic. Every operation is programmed the same way: destination (and
//! source) corner with its layer, region size, opcode with raster op, then a
//! start bit. Completion is signalled on the active-low interrupt line and
//! latched in INTC2, which must be written back to acknowledge.
//!
//! ```text
//! RasterWrite:  program ─ start ─ wait READY ─┬─ MRWC + ≤512 bytes ─ wait READY ─┐
//!                                             └──────────── repeat ──────────────┘
//! Move / Fill:  program ─ start ─ wait COMPLETE
//! ```

use embedded_hal::digital::{Error as _, InputPin};
use log::{trace, warn};

use super::color::Color;
use super::ra8875::{Layer, Ra8875, MAX_BLOCK_LEN};
use super::registers as reg;
use crate::error::{DisplayResult, Error, Misuse};
use crate::hal::Transport;

/// Corner of a BTE region on one layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerPoint {
    pub x: u16,
    pub y: u16,
    pub layer: Layer,
}

impl LayerPoint {
    pub const fn new(x: u16, y: u16, layer: Layer) -> Self {
        Self { x, y, layer }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Pixel count, one byte per pixel at 8bpp
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// 4-bit raster operation applied between source and destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rop(u8);

impl Rop {
    pub const BLACK: Self = Self(0b0000);
    /// Destination = source
    pub const SRC: Self = Self(0b1100);
    pub const WHITE: Self = Self(0b1111);

    /// Raster op from the low nibble of `bits`
    pub const fn new(bits: u8) -> Self {
        Self(bits & 0x0F)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// INTC2 interrupt flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptStatus(u8);

impl InterruptStatus {
    /// Engine ready for the next data block
    pub const BTE_READY: Self = Self(1 << 0);
    /// Operation finished
    pub const BTE_COMPLETE: Self = Self(1 << 1);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

/// One BTE operation with everything needed to program it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BteOp<'a> {
    /// Upload `data` row by row into the destination region
    RasterWrite {
        dst: LayerPoint,
        size: Size,
        rop: Rop,
        data: &'a [u8],
    },
    /// Copy a region, optionally with negative (bottom-right first) direction
    Move {
        src: LayerPoint,
        dst: LayerPoint,
        size: Size,
        rop: Rop,
        negative: bool,
    },
    /// Solid fill with a colour
    Fill {
        dst: LayerPoint,
        size: Size,
        color: Color,
    },
}

impl BteOp<'_> {
    /// BECR1 value: operation code in the low nibble, raster op in the high
    pub const fn opcode(&self) -> u8 {
        match self {
            BteOp::RasterWrite { rop, .. } => rop.0 << 4,
            BteOp::Move { rop, negative, .. } => (if *negative { 0x03 } else { 0x02 }) | (rop.0 << 4),
            BteOp::Fill { .. } => 0x0C,
        }
    }

    pub const fn size(&self) -> Size {
        match self {
            BteOp::RasterWrite { size, .. } | BteOp::Move { size, .. } | BteOp::Fill { size, .. } => {
                *size
            }
        }
    }

    /// Reject regions the engine cannot express before touching the bus
    pub fn validate(&self) -> Result<(), Misuse> {
        let size = self.size();
        if size.is_empty() {
            return Err(Misuse::EmptyRegion);
        }
        if let BteOp::RasterWrite { data, .. } = self {
            if data.len() != size.area() {
                return Err(Misuse::PayloadMismatch {
                    expected: size.area(),
                    actual: data.len(),
                });
            }
        }
        Ok(())
    }
}

impl<T: Transport, IRQ: InputPin> Ra8875<T, IRQ> {
    /// Program, start and wait for one BTE operation
    pub fn run_bte(&mut self, op: BteOp<'_>) -> DisplayResult<(), T::Error> {
        op.validate()?;
        trace!("BTE: {:?} opcode {:#04x}", op.size(), op.opcode());

        match op {
            BteOp::RasterWrite { dst, size, data, .. } => {
                self.set_bte_corner(reg::HDBE0, dst)?;
                self.set_bte_size(size)?;
                self.write_register(reg::BECR1, op.opcode())?;
                self.write_register(reg::BECR0, reg::BECR0_START)?;
                self.wait_for_interrupt(InterruptStatus::BTE_READY)?;

                for chunk in data.chunks(MAX_BLOCK_LEN) {
                    self.write_command(reg::MRWC)?;
                    self.write_data_block(chunk)?;
                    self.wait_for_interrupt(InterruptStatus::BTE_READY)?;
                }
                Ok(())
            }
            BteOp::Move { src, dst, size, .. } => {
                self.set_bte_corner(reg::HSBE0, src)?;
                self.set_bte_corner(reg::HDBE0, dst)?;
                self.set_bte_size(size)?;
                self.write_register(reg::BECR1, op.opcode())?;
                self.write_register(reg::BECR0, reg::BECR0_START)?;
                self.wait_for_interrupt(InterruptStatus::BTE_COMPLETE)
            }
            BteOp::Fill { dst, size, color } => {
                self.set_bte_corner(reg::HDBE0, dst)?;
                self.set_bte_size(size)?;
                self.write_register(reg::BECR1, op.opcode())?;
                self.set_foreground(color)?;
                self.write_register(reg::BECR0, reg::BECR0_START)?;
                self.wait_for_interrupt(InterruptStatus::BTE_COMPLETE)
            }
        }
    }

    /// Stream `data` into a region, `width * height` bytes row-major
    pub fn bte_write(
        &mut self,
        dst: LayerPoint,
        size: Size,
        rop: Rop,
        data: &[u8],
    ) -> DisplayResult<(), T::Error> {
        self.run_bte(BteOp::RasterWrite { dst, size, rop, data })
    }

    /// Copy a region, possibly across layers
    pub fn bte_move(
        &mut self,
        src: LayerPoint,
        dst: LayerPoint,
        size: Size,
        rop: Rop,
        negative: bool,
    ) -> DisplayResult<(), T::Error> {
        self.run_bte(BteOp::Move { src, dst, size, rop, negative })
    }

    pub fn bte_fill(&mut self, dst: LayerPoint, size: Size, color: Color) -> DisplayResult<(), T::Error> {
        self.run_bte(BteOp::Fill { dst, size, color })
    }

    /// Block until INTC2 reports a flag in `mask`, acknowledging every read
    ///
    /// Each interrupt-line poll costs one unit of `irq_poll_budget`.
    pub fn wait_for_interrupt(&mut self, mask: InterruptStatus) -> DisplayResult<(), T::Error> {
        let mut budget = self.config().irq_poll_budget;
        loop {
            loop {
                if budget == 0 {
                    warn!("BTE: no interrupt {:#04x} within poll budget", mask.bits());
                    return Err(Error::Timeout { mask: mask.bits() });
                }
                budget -= 1;
                if self.irq.is_low().map_err(|e| Error::InterruptPin(e.kind()))? {
                    break;
                }
            }

            let status = InterruptStatus::from_bits(self.read_register(reg::INTC2)?);
            self.write_register(reg::INTC2, status.bits())?;
            if status.intersects(mask) {
                return Ok(());
            }
        }
    }

    /// Write a corner to the four registers starting at `base`
    fn set_bte_corner(&mut self, base: u8, point: LayerPoint) -> DisplayResult<(), T::Error> {
        let [x_lo, x_hi] = point.x.to_le_bytes();
        let [y_lo, y_hi] = point.y.to_le_bytes();
        self.write_register(base, x_lo)?;
        self.write_register(base + 1, x_hi)?;
        self.write_register(base + 2, y_lo)?;
        self.write_register(base + 3, y_hi | (point.layer.bit() << 7))
    }

    fn set_bte_size(&mut self, size: Size) -> DisplayResult<(), T::Error> {
        self.write_register_pair(reg::BEWR0, size.width)?;
        self.write_register_pair(reg::BEWR0 + 2, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{controller, controller_with_irq, MockIrq};
    use embedded_hal::digital::ErrorKind as PinErrorKind;

    #[test]
    fn test_opcodes() {
        let dst = LayerPoint::new(0, 0, Layer::L0);
        let size = Size::new(1, 1);
        let mv = |negative| BteOp::Move { src: dst, dst, size, rop: Rop::SRC, negative };
        assert_eq!(mv(false).opcode(), 0xC2);
        assert_eq!(mv(true).opcode(), 0xC3);
        assert_eq!(BteOp::Fill { dst, size, color: Color::RED }.opcode(), 0x0C);
        assert_eq!(
            BteOp::RasterWrite { dst, size, rop: Rop::SRC, data: &[0] }.opcode(),
            0xC0
        );
    }

    #[test]
    fn test_rop_keeps_low_nibble() {
        assert_eq!(Rop::new(0xFC), Rop::SRC);
        assert_eq!(Rop::new(0x3F).bits(), 0x0F);

        let dst = LayerPoint::new(0, 0, Layer::L0);
        let op = BteOp::Move {
            src: dst,
            dst,
            size: Size::new(1, 1),
            rop: Rop::new(0xF5),
            negative: false,
        };
        assert_eq!(op.opcode(), 0x52);
    }

    #[test]
    fn test_raster_write_chunks() {
        let mut lcd = controller();
        let data = [0x5Au8; 30 * 40];
        lcd.bte_write(LayerPoint::new(10, 20, Layer::L1), Size::new(30, 40), Rop::SRC, &data)
            .unwrap();

        let (bus, _) = lcd.release();
        let blocks = bus.data_blocks();
        assert_eq!(blocks.iter().map(Vec::len).collect::<Vec<_>>(), vec![512, 512, 176]);
        assert_eq!(blocks.iter().map(Vec::len).sum::<usize>(), 30 * 40);
        assert_eq!(bus.commands(), vec![reg::MRWC; 3]);
        // Initial wait plus one per chunk
        assert_eq!(bus.count_reads(reg::INTC2), 4);
    }

    #[test]
    fn test_raster_write_exact_block() {
        let mut lcd = controller();
        let data = [1u8; 512];
        lcd.bte_write(LayerPoint::new(0, 0, Layer::L0), Size::new(256, 2), Rop::SRC, &data)
            .unwrap();

        let (bus, _) = lcd.release();
        assert_eq!(bus.data_blocks().len(), 1);
    }

    #[test]
    fn test_corner_carries_layer_bit() {
        let mut lcd = controller();
        lcd.bte_fill(LayerPoint::new(0x0123, 0x01DF, Layer::L1), Size::new(4, 4), Color::GREEN)
            .unwrap();

        let (bus, _) = lcd.release();
        let writes = bus.register_writes();
        assert_eq!(
            &writes[..4],
            &[(0x58, 0x23), (0x59, 0x01), (0x5A, 0xDF), (0x5B, 0x81)]
        );
        assert!(writes.contains(&(reg::BECR1, 0x0C)));
        assert!(writes.contains(&(reg::FGCR1, 0b100)));
        assert!(writes.contains(&(reg::BECR0, 0x80)));
    }

    #[test]
    fn test_move_programs_source_and_destination() {
        let mut lcd = controller();
        lcd.bte_move(
            LayerPoint::new(0, 0, Layer::L1),
            LayerPoint::new(0, 0, Layer::L0),
            Size::new(800, 480),
            Rop::SRC,
            false,
        )
        .unwrap();

        let (bus, _) = lcd.release();
        let writes = bus.register_writes();
        assert!(writes.contains(&(0x57, 0x80)));
        assert!(writes.contains(&(0x5B, 0x00)));
        assert!(writes.contains(&(0x5C, 0x20)));
        assert!(writes.contains(&(0x5D, 0x03)));
        assert!(writes.contains(&(0x5E, 0xE0)));
        assert!(writes.contains(&(0x5F, 0x01)));
        assert!(writes.contains(&(reg::BECR1, 0xC2)));
        assert!(bus.data_blocks().is_empty());
    }

    #[test]
    fn test_empty_region_sends_nothing() {
        let mut lcd = controller();
        let dst = LayerPoint::new(0, 0, Layer::L0);
        assert_eq!(
            lcd.bte_fill(dst, Size::new(0, 10), Color::RED),
            Err(Error::Misuse(Misuse::EmptyRegion))
        );
        assert_eq!(
            lcd.bte_write(dst, Size::new(4, 4), Rop::SRC, &[0; 15]),
            Err(Error::Misuse(Misuse::PayloadMismatch { expected: 16, actual: 15 }))
        );

        let (bus, _) = lcd.release();
        assert!(bus.frames.is_empty());
    }

    #[test]
    fn test_wait_spins_until_bit_seen() {
        let mut lcd = controller();
        lcd.bus_mut().script(reg::INTC2, &[0b10, 0b00, 0b01]);
        lcd.wait_for_interrupt(InterruptStatus::BTE_READY).unwrap();

        let (bus, _) = lcd.release();
        // Every read is acknowledged with the value seen
        assert_eq!(
            bus.register_writes(),
            vec![(reg::INTC2, 0b10), (reg::INTC2, 0b00), (reg::INTC2, 0b01)]
        );
    }

    #[test]
    fn test_stuck_interrupt_times_out() {
        let mut lcd = controller_with_irq(MockIrq::stuck());
        let budget = lcd.config().irq_poll_budget;

        assert_eq!(
            lcd.bte_fill(LayerPoint::new(0, 0, Layer::L0), Size::new(8, 8), Color::RED),
            Err(Error::Timeout { mask: 0b10 })
        );
        let (bus, irq) = lcd.release();
        assert_eq!(irq.polls, budget as usize);
        assert_eq!(bus.count_reads(reg::INTC2), 0);
    }

    #[test]
    fn test_unreadable_interrupt_line() {
        let mut lcd = controller_with_irq(MockIrq::broken());

        let result = lcd.wait_for_interrupt(InterruptStatus::BTE_COMPLETE);
        assert_eq!(result, Err(Error::InterruptPin(PinErrorKind::Other)));
        assert!(result.is_err_and(|e| e.is_transport()));

        let (bus, irq) = lcd.release();
        assert_eq!(irq.polls, 1);
        assert!(bus.frames.is_empty());
    }

    #[test]
    fn test_status_without_bit_consumes_budget() {
        let mut lcd = controller();
        lcd.bus_mut().registers[reg::INTC2 as usize] = 0;

        assert_eq!(
            lcd.wait_for_interrupt(InterruptStatus::BTE_COMPLETE),
            Err(Error::Timeout { mask: 0b10 })
        );
    }
}
