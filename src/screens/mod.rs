//! Dashboard Screens
//!
//! A small state machine over fixed instrument-panel layouts. Switching to a
//! screen clears the visible layer and redraws the whole layout, except for
//! [`Screen::DebugStatic`]: its backgrounds, borders and labels are drawn
//! once into hidden layer 1, and every later entry copies that layer onto the
//! visible one with a single BTE move before redrawing the value fields.
//!
//! ```text
//! mode button:     MainLaps, MainNoLaps ──► DebugRtd
//!                  DebugRtd, DebugStatic, Warn ──► MainLaps
//! submode button:  MainLaps ◄──► MainNoLaps
//!                  DebugRtd ◄──► DebugStatic
//! ```

pub mod layout;

use embedded_hal::digital::InputPin;
use log::debug;

use crate::display::{Display, Font, Layer, Size};
use crate::error::{DisplayResult, Misuse};
use crate::hal::Transport;
use layout::{ScreenLayout, ValueField, ValueKind, FIELD_HEIGHT};

/// Named dashboard screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    MainNoLaps,
    MainLaps,
    /// Debug values, fully re-rendered on entry
    DebugRtd,
    /// Debug values over a pre-rendered layer
    DebugStatic,
    /// Fault warning
    Warn,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::MainNoLaps,
        Screen::MainLaps,
        Screen::DebugRtd,
        Screen::DebugStatic,
        Screen::Warn,
    ];

    pub const fn layout(self) -> &'static ScreenLayout {
        match self {
            Screen::MainNoLaps => &layout::MAIN_NO_LAPS,
            Screen::MainLaps => &layout::MAIN_LAPS,
            Screen::DebugRtd | Screen::DebugStatic => &layout::DEBUG,
            Screen::Warn => &layout::WARN,
        }
    }

    /// Entered by copying the hidden layer instead of redrawing
    pub const fn is_prerendered(self) -> bool {
        matches!(self, Screen::DebugStatic)
    }

    /// Mode button: main and debug screens alternate, a warning returns to main
    pub const fn next_mode(self) -> Self {
        match self {
            Screen::MainNoLaps | Screen::MainLaps => Screen::DebugRtd,
            Screen::DebugRtd | Screen::DebugStatic | Screen::Warn => Screen::MainLaps,
        }
    }

    /// Submode button: laps on/off on main, live/static on debug
    pub const fn next_submode(self) -> Self {
        match self {
            Screen::MainNoLaps => Screen::MainLaps,
            Screen::MainLaps => Screen::MainNoLaps,
            Screen::DebugRtd => Screen::DebugStatic,
            Screen::DebugStatic => Screen::DebugRtd,
            Screen::Warn => Screen::Warn,
        }
    }
}

/// Screen state on top of a started [`Display`]
pub struct Dashboard<T, IRQ> {
    display: Display<T, IRQ>,
    /// Set only after a screen rendered completely
    current: Option<Screen>,
    /// Layer 1 holds the static debug layout
    prerendered: bool,
}

impl<T: Transport, IRQ: InputPin> Dashboard<T, IRQ> {
    pub fn new(display: Display<T, IRQ>) -> Self {
        Self {
            display,
            current: None,
            prerendered: false,
        }
    }

    pub fn current(&self) -> Option<Screen> {
        self.current
    }

    pub fn display(&mut self) -> &mut Display<T, IRQ> {
        &mut self.display
    }

    pub fn release(self) -> Display<T, IRQ> {
        self.display
    }

    /// Show `next`; does nothing if it is already showing
    ///
    /// On failure no screen is considered current, so the next switch
    /// redraws even if it names the same screen.
    pub fn switch_screen(&mut self, next: Screen) -> DisplayResult<(), T::Error> {
        if self.current == Some(next) {
            return Ok(());
        }
        self.current = None;

        let layout = next.layout();
        if next.is_prerendered() {
            if !self.prerendered {
                self.prerender()?;
            }
            self.select_layer(Layer::L0)?;
            let panel = self.display.panel_size();
            self.display.copy_layer(Layer::L1, Layer::L0, panel)?;
            self.draw_values(layout)?;
        } else {
            self.select_layer(Layer::L0)?;
            self.display.reset()?;
            self.draw_static(layout)?;
            self.draw_values(layout)?;
        }

        self.current = Some(next);
        debug!("Dashboard: showing {:?}", next);
        Ok(())
    }

    /// Draw the static debug layout into hidden layer 1
    pub fn prerender(&mut self) -> DisplayResult<(), T::Error> {
        self.prerendered = false;
        self.select_layer(Layer::L1)?;
        self.display.reset()?;
        self.draw_static(&layout::DEBUG)?;
        self.select_layer(Layer::L0)?;
        self.prerendered = true;
        debug!("Dashboard: debug layout pre-rendered to layer 1");
        Ok(())
    }

    /// Redraw value field `index` of the current screen with `value`
    ///
    /// Text fields take the value as an integer code.
    pub fn set_value(&mut self, index: usize, value: f32) -> DisplayResult<(), T::Error> {
        let (layout, field) = self.field(index)?;
        self.clear_field(layout, &field)?;
        let is_integer = !matches!(field.kind, ValueKind::Decimal);
        self.display.write_number_at(field.x, field.y, is_integer, value)
    }

    /// Redraw value field `index` of the current screen with `text`
    pub fn set_text(&mut self, index: usize, text: &str) -> DisplayResult<(), T::Error> {
        let (layout, field) = self.field(index)?;
        self.clear_field(layout, &field)?;
        self.display.write_text_at(field.x, field.y, text)
    }

    fn field(&self, index: usize) -> Result<(&'static ScreenLayout, ValueField), Misuse> {
        let layout = self.current.map(Screen::layout);
        layout
            .and_then(|l| l.values.get(index).map(|field| (l, *field)))
            .ok_or(Misuse::NoSuchField { index })
    }

    fn clear_field(&mut self, layout: &ScreenLayout, field: &ValueField) -> DisplayResult<(), T::Error> {
        let background = layout.background_at(field.x, field.y);
        self.select_layer(Layer::L0)?;
        self.display
            .fill_rect(field.x, field.y, Size::new(field.width, FIELD_HEIGHT), background)?;
        self.display.enable_text_mode_and_font(Font::Native)
    }

    fn select_layer(&mut self, layer: Layer) -> DisplayResult<(), T::Error> {
        if self.display.state().layer != layer {
            self.display.set_layer(layer)?;
        }
        Ok(())
    }

    /// Backgrounds, borders and labels
    fn draw_static(&mut self, layout: &ScreenLayout) -> DisplayResult<(), T::Error> {
        self.display.enable_draw_mode()?;
        for rect in layout.backgrounds.iter().chain(layout.borders) {
            self.display
                .draw_rect(rect.x1, rect.y1, rect.x2, rect.y2, rect.color, true)?;
        }

        self.display.enable_text_mode_and_font(Font::Software)?;
        for label in layout.labels {
            self.display.write_text_at(label.x, label.y, label.text)?;
        }
        Ok(())
    }

    /// Placeholder values in the native font
    fn draw_values(&mut self, layout: &ScreenLayout) -> DisplayResult<(), T::Error> {
        self.display.enable_text_mode_and_font(Font::Native)?;
        for field in layout.values {
            match field.kind {
                ValueKind::Integer => self.display.write_number_at(field.x, field.y, true, 0.0)?,
                ValueKind::Decimal => self.display.write_number_at(field.x, field.y, false, 0.0)?,
                ValueKind::Text(text) => self.display.write_text_at(field.x, field.y, text)?,
            }
        }
        Ok(())
    }
}
