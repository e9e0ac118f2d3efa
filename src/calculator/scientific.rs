//! Scientific calculator built on an expression buffer.
//!
//! Key presses only ever edit the buffer text; nothing is computed until
//! `=`, when the whole buffer goes through the tokenizer, parser and
//! evaluator. Postfix keys (`x^2`, `x^3`, `1/x`, `!`) wrap the current
//! buffer instead of evaluating it on the spot.

use crate::calculator::Keypad;
use crate::calculator::evaluation::{AngleUnit, CalcResult, evaluate_expression, format_number};
use crate::calculator::keys::Key;
use crate::error::{CalcError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    /// An unsigned decimal literal that can take a suffix without parentheses.
    static ref PLAIN_NUMBER: Regex = Regex::new(r"^([0-9]+\.?[0-9]*|\.[0-9]+)$").unwrap();
}

#[derive(Clone, Debug, Default)]
pub struct ScientificCalculator {
    expression: String,
    display: String,
    angle_unit: AngleUnit,
}

impl ScientificCalculator {
    pub fn new(angle_unit: AngleUnit) -> Self {
        Self {
            angle_unit,
            ..Self::default()
        }
    }

    /// The accumulated expression text.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn angle_unit(&self) -> AngleUnit {
        self.angle_unit
    }

    fn press(&mut self, key: Key) -> Result<()> {
        match key {
            Key::Digits(digits) => self.expression.push_str(&digits),
            Key::Operator(op) => self.expression.push_str(op.symbol()),
            Key::Function(function) => {
                self.expression.push_str(function.name());
                self.expression.push('(');
            }
            Key::Constant(constant) => self.expression.push_str(&format_number(constant.value())),
            Key::Square => self.wrap_buffer("", "^2")?,
            Key::Cube => self.wrap_buffer("", "^3")?,
            // `5 !` shows `5!`; the factorial itself is computed on `=`.
            Key::Factorial => self.wrap_buffer("", "!")?,
            Key::Reciprocal => self.wrap_buffer("1/", "")?,
            Key::TenPower => self.expression.push_str("10^"),
            Key::OpenParen => self.expression.push('('),
            Key::CloseParen => self.expression.push(')'),
            Key::Equals => return self.equals(),
            Key::Clear => self.expression.clear(),
            Key::ClearEntry => {
                if self.expression.ends_with(|c: char| c.is_ascii_digit()) {
                    self.expression.pop();
                }
            }
            Key::Angle(unit) => {
                self.angle_unit = unit;
                self.display = format!("Mode set to {}", unit.label());
                debug!(?unit, "angle unit changed");
                return Ok(());
            }
            Key::Mode(mode) => return Err(CalcError::unsupported(format!("{:?}", mode))),
            Key::Unknown(label) => return Err(CalcError::unsupported(label)),
        }

        self.display = self.expression.clone();
        Ok(())
    }

    /// Apply a key to the whole buffer as a single operand.
    fn wrap_buffer(&mut self, prefix: &str, suffix: &str) -> Result<()> {
        if self.expression.trim().is_empty() {
            return Err(CalcError::parse("no operand for postfix key"));
        }

        self.expression = if PLAIN_NUMBER.is_match(&self.expression) {
            format!("{}{}{}", prefix, self.expression, suffix)
        } else {
            format!("{}({}){}", prefix, self.expression, suffix)
        };
        Ok(())
    }

    fn equals(&mut self) -> Result<()> {
        if self.expression.trim().is_empty() {
            self.display.clear();
            return Ok(());
        }

        match evaluate_expression(&self.expression, self.angle_unit) {
            CalcResult::Success {
                expression,
                display_result,
                ..
            } => {
                debug!(%expression, result = %display_result, "evaluated");
                self.expression = display_result.clone();
                self.display = display_result;
                Ok(())
            }
            CalcResult::Error { error, .. } => Err(error),
        }
    }
}

impl Keypad for ScientificCalculator {
    fn handle_input(&mut self, label: &str) -> String {
        if let Err(error) = self.press(Key::parse(label)) {
            debug!(label, %error, "scientific input failed");
            self.expression.clear();
            self.display = "Error".to_string();
        }
        self.display.clone()
    }

    /// Clear the buffer. The angle unit is a setting and survives.
    fn reset(&mut self) {
        self.expression.clear();
        self.display.clear();
    }
}
