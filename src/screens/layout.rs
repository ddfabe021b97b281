//! Screen descriptors
//!
//! Every screen is plain data: filled background rectangles, white border
//! bars, software-font labels and native-font value fields. The panel is a
//! 4x4 grid of 120 px rows; labels sit near the top of a cell and values
//! below them.

use crate::display::Color;
use ValueKind::{Decimal, Integer, Text};

pub const ROW_0: u16 = 0;
pub const ROW_1: u16 = 120;
pub const ROW_2: u16 = 240;
pub const ROW_3: u16 = 360;

const LABELS_Y_OFFSET: u16 = 11;
const VALUES_Y_OFFSET: u16 = 55;

/// Height of a value field: one line of the 3x enlarged native font
pub const FIELD_HEIGHT: u16 = 48;

const PANEL_RIGHT: u16 = 800;
const PANEL_BOTTOM: u16 = 480;

/// Filled rectangle between inclusive corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x1: u16,
    pub y1: u16,
    pub x2: u16,
    pub y2: u16,
    pub color: Color,
}

impl Rect {
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub x: u16,
    pub y: u16,
    pub text: &'static str,
}

/// How a value field is formatted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    /// Two decimals
    Decimal,
    /// Fixed placeholder text until a value arrives
    Text(&'static str),
}

/// Native-font value cell; `width` reaches to the next border
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueField {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub kind: ValueKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub backgrounds: &'static [Rect],
    pub borders: &'static [Rect],
    pub labels: &'static [Label],
    pub values: &'static [ValueField],
}

impl ScreenLayout {
    /// Colour under a point: the last background containing it, else black
    pub fn background_at(&self, x: u16, y: u16) -> Color {
        self.backgrounds
            .iter()
            .rev()
            .find(|r| r.contains(x, y))
            .map_or(Color::BLACK, |r| r.color)
    }
}

const fn fill(x1: u16, y1: u16, x2: u16, y2: u16, color: Color) -> Rect {
    Rect { x1, y1, x2, y2, color }
}

/// Two pixel thick horizontal border across the panel
const fn hbar(y: u16) -> Rect {
    fill(0, y, PANEL_RIGHT, y + 1, Color::WHITE)
}

/// Two pixel thick vertical border
const fn vbar(x: u16, y1: u16, y2: u16) -> Rect {
    fill(x, y1, x + 1, y2, Color::WHITE)
}

const fn label(x: u16, row: u16, text: &'static str) -> Label {
    Label {
        x,
        y: row + LABELS_Y_OFFSET,
        text,
    }
}

const fn value(x: u16, row: u16, right: u16, kind: ValueKind) -> ValueField {
    ValueField {
        x,
        y: row + VALUES_Y_OFFSET,
        width: right - x,
        kind,
    }
}

// ============================================================================
// MAIN
// ============================================================================

const MAIN_BORDERS: &[Rect] = &[
    hbar(ROW_1),
    hbar(ROW_2),
    hbar(ROW_3),
    vbar(200, 0, PANEL_BOTTOM),
    vbar(400, ROW_1, ROW_2),
    vbar(600, 0, PANEL_BOTTOM),
    vbar(700, ROW_3, PANEL_BOTTOM),
];

/// Main screen with lap timing
pub const MAIN_LAPS: ScreenLayout = ScreenLayout {
    backgrounds: &[
        fill(600, 45, 800, 120, Color::RED),
        fill(200, 165, 400, 240, Color::GREEN),
        fill(200, 285, 600, 360, Color::RED),
    ],
    borders: MAIN_BORDERS,
    labels: &[
        label(20, ROW_0, "LV Voltage"),
        label(340, ROW_0, "Last Lap"),
        label(610, ROW_0, "Pack Voltage"),
        label(10, ROW_1, "Max Motor T"),
        label(270, ROW_1, "Diff"),
        label(470, ROW_1, "Pred"),
        label(650, ROW_1, "Rotor T"),
        label(20, ROW_2, "Max IGBT T"),
        label(350, ROW_2, "Pack %"),
        label(630, ROW_2, "Max Cell T"),
        label(30, ROW_3, "Inv Fault"),
        label(310, ROW_3, "Endurance %"),
        label(640, ROW_3, "TV"),
        label(740, ROW_3, "TC"),
    ],
    values: &[
        value(50, ROW_0, 200, Decimal),
        value(350, ROW_0, 600, Decimal),
        value(690, ROW_0, 800, Integer),
        value(80, ROW_1, 200, Integer),
        value(250, ROW_1, 400, Decimal),
        value(490, ROW_1, 600, Integer),
        value(690, ROW_1, 800, Integer),
        value(80, ROW_2, 200, Integer),
        value(390, ROW_2, 600, Integer),
        value(690, ROW_2, 800, Integer),
        value(45, ROW_3, 200, Text("None")),
        value(390, ROW_3, 600, Integer),
        value(640, ROW_3, 700, Integer),
        value(740, ROW_3, 800, Integer),
    ],
};

/// Main screen without lap timing: the middle column of the top rows is blank
pub const MAIN_NO_LAPS: ScreenLayout = ScreenLayout {
    backgrounds: &[
        fill(600, 45, 800, 120, Color::RED),
        fill(200, 285, 600, 360, Color::RED),
    ],
    borders: &[
        hbar(ROW_1),
        hbar(ROW_2),
        hbar(ROW_3),
        vbar(200, 0, PANEL_BOTTOM),
        vbar(600, 0, PANEL_BOTTOM),
        vbar(700, ROW_3, PANEL_BOTTOM),
    ],
    labels: &[
        label(20, ROW_0, "LV Voltage"),
        label(610, ROW_0, "Pack Voltage"),
        label(10, ROW_1, "Max Motor T"),
        label(650, ROW_1, "Rotor T"),
        label(20, ROW_2, "Max IGBT T"),
        label(350, ROW_2, "Pack %"),
        label(630, ROW_2, "Max Cell T"),
        label(30, ROW_3, "Inv Fault"),
        label(310, ROW_3, "Endurance %"),
        label(640, ROW_3, "TV"),
        label(740, ROW_3, "TC"),
    ],
    values: &[
        value(50, ROW_0, 200, Decimal),
        value(690, ROW_0, 800, Integer),
        value(80, ROW_1, 200, Integer),
        value(690, ROW_1, 800, Integer),
        value(80, ROW_2, 200, Integer),
        value(390, ROW_2, 600, Integer),
        value(690, ROW_2, 800, Integer),
        value(45, ROW_3, 200, Text("None")),
        value(390, ROW_3, 600, Integer),
        value(640, ROW_3, 700, Integer),
        value(740, ROW_3, 800, Integer),
    ],
};

// ============================================================================
// DEBUG
// ============================================================================

/// Debug screen, shared by the fully re-rendered and the pre-rendered variant
pub const DEBUG: ScreenLayout = ScreenLayout {
    backgrounds: &[
        fill(0, 45, 800, 120, Color::RED),
        fill(0, 165, 200, 240, Color::RED),
        fill(600, 165, 800, 240, Color::RED),
        fill(0, 405, 200, 480, Color::RED),
    ],
    borders: &[
        hbar(ROW_1),
        hbar(ROW_2),
        hbar(ROW_3),
        vbar(200, ROW_1, PANEL_BOTTOM),
        vbar(400, 0, PANEL_BOTTOM),
        vbar(600, ROW_1, PANEL_BOTTOM),
    ],
    labels: &[
        label(130, ROW_0, "GPS Lat"),
        label(550, ROW_0, "GPS Long"),
        label(0, ROW_1, "F Brake Press"),
        label(220, ROW_1, "Max IGBT T"),
        label(410, ROW_1, "F Brake Bias"),
        label(660, ROW_1, "Rotor T"),
        label(30, ROW_2, "APPS Arb"),
        label(220, ROW_2, "Steer Angle"),
        label(415, ROW_2, "Max Motor T"),
        label(660, ROW_2, "Speed"),
        label(30, ROW_3, "Min Cell V"),
        label(220, ROW_3, "Peak Cell T"),
        label(440, ROW_3, "Inv Fault"),
        label(630, ROW_3, "LV Voltage"),
    ],
    values: &[
        value(180, ROW_0, 400, Integer),
        value(580, ROW_0, 800, Integer),
        value(90, ROW_1, 200, Integer),
        value(290, ROW_1, 400, Integer),
        value(490, ROW_1, 600, Integer),
        value(690, ROW_1, 800, Integer),
        value(90, ROW_2, 200, Integer),
        value(290, ROW_2, 400, Integer),
        value(490, ROW_2, 600, Integer),
        value(690, ROW_2, 800, Integer),
        value(50, ROW_3, 200, Decimal),
        value(290, ROW_3, 400, Integer),
        value(440, ROW_3, 600, Text("None")),
        value(650, ROW_3, 800, Decimal),
    ],
};

// ============================================================================
// WARNING
// ============================================================================

/// Full-panel fault warning
pub const WARN: ScreenLayout = ScreenLayout {
    backgrounds: &[fill(0, 0, PANEL_RIGHT, PANEL_BOTTOM, Color::RED)],
    borders: &[hbar(ROW_2)],
    labels: &[label(330, ROW_1, "Warning"), label(320, ROW_2, "Inv Fault")],
    values: &[value(300, ROW_2, 600, Text("None"))],
};
