//! Calculator engine.
//!
//! This module provides:
//! - A four-function calculator with left-to-right chaining
//! - A scientific calculator that accumulates an expression and
//!   evaluates it with a tokenizer, parser and tree evaluator
//! - A session that switches between the two
//! - Copying results to the clipboard

mod basic;
mod clipboard;
mod evaluation;
mod keys;
mod lexer;
mod parser;
mod scientific;
mod session;

pub use basic::BasicCalculator;
pub use clipboard::copy_to_clipboard;
pub use evaluation::{AngleUnit, CalcResult, evaluate, evaluate_expression, format_number};
pub use keys::{Constant, Function, Key, Operator};
pub use parser::{Expr, parse};
pub use scientific::ScientificCalculator;
pub use session::{Mode, Session};

/// A calculator driven by button labels.
pub trait Keypad {
    /// Consume one button label and return the text to display.
    ///
    /// Never fails: any error resets the calculator and displays `"Error"`.
    fn handle_input(&mut self, label: &str) -> String;

    /// Clear all entry state.
    fn reset(&mut self);
}
