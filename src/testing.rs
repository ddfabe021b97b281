//! Test doubles: a recording RA8875 bus, a scriptable interrupt line and a
//! delay that only counts.

use std::collections::{HashMap, VecDeque};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin};

use crate::config::DriverConfig;
use crate::display::registers::{self as reg, cycle};
use crate::display::{Display, GlyphTable, Ra8875, COMIC_SANS_ADVANCE};
use crate::hal::Transport;

/// Poll budget for tests, small enough that timeouts are fast
pub const TEST_POLL_BUDGET: u32 = 100;

#[rustfmt::skip]
const GLYPH_T: [u8; 16] = [
    0x00, 0x00, 0xFF, 0x18, 0x18, 0x18, 0x18, 0x18,
    0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x00, 0x00,
];

#[rustfmt::skip]
const GLYPH_V: [u8; 16] = [
    0x00, 0x00, 0x81, 0x81, 0x81, 0x42, 0x42, 0x42,
    0x24, 0x24, 0x24, 0x18, 0x18, 0x18, 0x00, 0x00,
];

/// Three glyphs: 'T', 'V' and a blank space
pub const TEST_FONT: GlyphTable<'static> =
    GlyphTable::new(&[(b'T', GLYPH_T), (b'V', GLYPH_V), (b' ', [0; 16])]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// One recorded exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub cycle: u8,
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn new(cycle: u8, payload: &[u8]) -> Self {
        Self {
            cycle,
            payload: payload.to_vec(),
        }
    }

    fn register_write(&self) -> Option<(u8, u8)> {
        match (self.cycle, self.payload.as_slice()) {
            (cycle::CMD_WRITE, &[reg, cycle::DATA_WRITE, value]) => Some((reg, value)),
            _ => None,
        }
    }
}

/// RA8875 bus model that records every exchange
///
/// Register reads answer from `registers` unless a value was scripted for
/// that register. The identification register reads 0x75 and INTC2 reports
/// both BTE flags, so every BTE wait succeeds on the first status read.
pub struct MockBus {
    pub frames: Vec<Frame>,
    pub registers: [u8; 256],
    /// Fail the exchange with this index (counting from zero)
    pub fail_at: Option<usize>,
    scripted: HashMap<u8, VecDeque<u8>>,
    selected: u8,
    exchanges: usize,
}

impl MockBus {
    pub fn new() -> Self {
        let mut registers = [0u8; 256];
        registers[reg::ID as usize] = reg::ID_VALUE;
        registers[reg::INTC2 as usize] = 0b11;
        Self {
            frames: Vec::new(),
            registers,
            fail_at: None,
            scripted: HashMap::new(),
            selected: 0,
            exchanges: 0,
        }
    }

    /// Fail the `n`th exchange from now, counting from zero
    pub fn fail_after(&mut self, n: usize) {
        self.fail_at = Some(self.exchanges + n);
    }

    /// Queue replies for reads of `reg`, consumed before `registers`
    pub fn script(&mut self, reg: u8, replies: &[u8]) {
        self.scripted.entry(reg).or_default().extend(replies);
    }

    pub fn register_writes(&self) -> Vec<(u8, u8)> {
        self.frames.iter().filter_map(Frame::register_write).collect()
    }

    pub fn count_register_writes(&self, reg: u8) -> usize {
        self.register_writes().iter().filter(|(r, _)| *r == reg).count()
    }

    pub fn count_reads(&self, reg: u8) -> usize {
        self.frames
            .iter()
            .filter(|f| f.cycle == cycle::CMD_WRITE && f.payload == [reg, cycle::DATA_READ, 0])
            .count()
    }

    /// Bare register selections
    pub fn commands(&self) -> Vec<u8> {
        self.frames
            .iter()
            .filter(|f| f.cycle == cycle::CMD_WRITE && f.payload.len() == 1)
            .map(|f| f.payload[0])
            .collect()
    }

    /// Payloads of every data write
    pub fn data_blocks(&self) -> Vec<Vec<u8>> {
        self.frames
            .iter()
            .filter(|f| f.cycle == cycle::DATA_WRITE)
            .map(|f| f.payload.clone())
            .collect()
    }

    /// Single-byte data writes as text
    pub fn text_written(&self) -> String {
        self.frames
            .iter()
            .filter(|f| f.cycle == cycle::DATA_WRITE && f.payload.len() == 1)
            .map(|f| f.payload[0] as char)
            .collect()
    }

    fn exchange(&mut self) -> Result<(), MockError> {
        let index = self.exchanges;
        self.exchanges += 1;
        if self.fail_at == Some(index) {
            return Err(MockError);
        }
        Ok(())
    }

    fn next_read(&mut self, reg: u8) -> u8 {
        self.scripted
            .get_mut(&reg)
            .and_then(VecDeque::pop_front)
            .unwrap_or(self.registers[reg as usize])
    }
}

impl Transport for MockBus {
    type Error = MockError;

    fn write(&mut self, command: u8, payload: &[u8]) -> Result<(), MockError> {
        self.exchange()?;
        if command == cycle::CMD_WRITE {
            if let Some(&reg) = payload.first() {
                self.selected = reg;
            }
        }
        self.frames.push(Frame::new(command, payload));
        Ok(())
    }

    fn transfer(&mut self, command: u8, buf: &mut [u8]) -> Result<(), MockError> {
        self.exchange()?;
        self.frames.push(Frame::new(command, buf));
        match command {
            cycle::CMD_WRITE if buf.len() == 3 => {
                self.selected = buf[0];
                buf[2] = self.next_read(buf[0]);
            }
            cycle::DATA_READ => {
                let value = self.next_read(self.selected);
                if let Some(last) = buf.last_mut() {
                    *last = value;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Active-low interrupt line that is always asserted, never asserted, or
/// cannot be read at all
pub struct MockIrq {
    asserted: bool,
    broken: bool,
    pub polls: usize,
}

impl MockIrq {
    pub fn asserted() -> Self {
        Self { asserted: true, broken: false, polls: 0 }
    }

    pub fn stuck() -> Self {
        Self { asserted: false, broken: false, polls: 0 }
    }

    /// Every read fails with `ErrorKind::Other`
    pub fn broken() -> Self {
        Self { asserted: false, broken: true, polls: 0 }
    }

    fn level(&mut self, low: bool) -> Result<bool, ErrorKind> {
        self.polls += 1;
        if self.broken {
            return Err(ErrorKind::Other);
        }
        Ok(low == self.asserted)
    }
}

impl ErrorType for MockIrq {
    type Error = ErrorKind;
}

impl InputPin for MockIrq {
    fn is_high(&mut self) -> Result<bool, ErrorKind> {
        self.level(false)
    }

    fn is_low(&mut self) -> Result<bool, ErrorKind> {
        self.level(true)
    }
}

#[derive(Debug, Default)]
pub struct MockDelay {
    pub total_ms: u32,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += ms;
    }
}

pub fn test_config() -> DriverConfig {
    DriverConfig {
        irq_poll_budget: TEST_POLL_BUDGET,
        ..DriverConfig::DASHBOARD
    }
}

pub fn controller() -> Ra8875<MockBus, MockIrq> {
    controller_with_irq(MockIrq::asserted())
}

pub fn controller_with_irq(irq: MockIrq) -> Ra8875<MockBus, MockIrq> {
    Ra8875::new(MockBus::new(), irq, test_config())
}

/// Display over a fresh bus, not started
pub fn display() -> Display<MockBus, MockIrq> {
    Display::new(controller(), &TEST_FONT, COMIC_SANS_ADVANCE)
}

/// Display after the full start-up sequence; frames are kept
pub fn started_display() -> Display<MockBus, MockIrq> {
    let mut dsp = display();
    let mut delay = MockDelay::default();
    if let Err(e) = dsp.start(&mut delay) {
        panic!("start failed: {:?}", e);
    }
    dsp
}
