//! dyncalc - keypad-driven basic and scientific calculators.
//!
//! # Example
//!
//! ```rust
//! use dyncalc::calculator::{AngleUnit, Keypad, Mode, Session};
//!
//! let mut session = Session::new(Mode::Scientific, AngleUnit::Radians);
//! for key in ["2", "+", "3", "*", "4"] {
//!     session.handle_input(key);
//! }
//! assert_eq!(session.handle_input("="), "14");
//! ```

pub mod calculator;
pub mod config;
pub mod error;
pub mod logging;

pub use error::{CalcError, Result};
