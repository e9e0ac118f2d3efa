//! A calculator session with switchable modes.
//!
//! The two calculators never share state: the session keeps one of each
//! and routes key presses to whichever is active.

use crate::calculator::Keypad;
use crate::calculator::basic::BasicCalculator;
use crate::calculator::evaluation::AngleUnit;
use crate::calculator::keys::Key;
use crate::calculator::scientific::ScientificCalculator;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Which calculator receives input.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Basic,
    Scientific,
}

#[derive(Clone, Debug)]
pub struct Session {
    mode: Mode,
    basic: BasicCalculator,
    scientific: ScientificCalculator,
}

impl Session {
    pub fn new(mode: Mode, angle_unit: AngleUnit) -> Self {
        Self {
            mode,
            basic: BasicCalculator::new(),
            scientific: ScientificCalculator::new(angle_unit),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch modes. The newly active calculator starts out cleared.
    pub fn set_mode(&mut self, mode: Mode) {
        info!(?mode, "switching calculator mode");
        self.mode = mode;
        self.active().reset();
    }

    pub fn scientific(&self) -> &ScientificCalculator {
        &self.scientific
    }

    fn active(&mut self) -> &mut dyn Keypad {
        match self.mode {
            Mode::Basic => &mut self.basic,
            Mode::Scientific => &mut self.scientific,
        }
    }
}

impl Keypad for Session {
    fn handle_input(&mut self, label: &str) -> String {
        if let Key::Mode(mode) = Key::parse(label) {
            self.set_mode(mode);
            return String::new();
        }
        self.active().handle_input(label)
    }

    fn reset(&mut self) {
        self.active().reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_to_active_mode() {
        let mut session = Session::new(Mode::Basic, AngleUnit::Radians);
        for label in ["2", "+", "3", "*", "4"] {
            session.handle_input(label);
        }
        assert_eq!(session.handle_input("="), "20");

        session.handle_input("Scientific");
        assert_eq!(session.mode(), Mode::Scientific);
        for label in ["2", "+", "3", "*", "4"] {
            session.handle_input(label);
        }
        assert_eq!(session.handle_input("="), "14");
    }

    #[test]
    fn test_mode_switch_clears_state() {
        let mut session = Session::new(Mode::Scientific, AngleUnit::Radians);
        session.handle_input("9");
        assert_eq!(session.handle_input("Normal"), "");
        assert_eq!(session.handle_input("Scientific"), "");
        assert_eq!(session.scientific().expression(), "");
        assert_eq!(session.handle_input("="), "");
    }

    #[test]
    fn test_reset_clears_active_calculator() {
        let mut session = Session::new(Mode::Basic, AngleUnit::Radians);
        for label in ["5", "+", "5", "="] {
            session.handle_input(label);
        }
        session.reset();
        assert_eq!(session.handle_input("="), "");
    }
}
