//! Four-function calculator with left-to-right chaining.
//!
//! Tracks a first operand, a pending operator and the text typed since
//! the last operator. There is no precedence: `5 + 3 * 2 =` is `16`.

use crate::calculator::Keypad;
use crate::calculator::evaluation::format_number;
use crate::calculator::keys::{Key, Operator};
use crate::error::{CalcError, Result};
use tracing::debug;

#[derive(Clone, Debug, Default)]
pub struct BasicCalculator {
    first_operand: Option<f64>,
    pending_operator: Option<Operator>,
    current_operand: String,
    display: String,
}

impl BasicCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    fn press(&mut self, key: Key) -> Result<()> {
        match key {
            Key::Digits(digits) => self.input_digits(&digits),
            Key::Operator(Operator::Pow) => return Err(CalcError::unsupported("^")),
            Key::Operator(op) => self.input_operator(op)?,
            Key::Equals => self.equals()?,
            Key::Clear => self.clear(),
            Key::ClearEntry => {
                self.current_operand.clear();
                self.display.clear();
            }
            Key::Unknown(label) => return Err(CalcError::unsupported(label)),
            other => return Err(CalcError::unsupported(format!("{:?}", other))),
        }
        Ok(())
    }

    fn input_digits(&mut self, digits: &str) {
        // A finished result with nothing pending is replaced, not extended.
        if self.first_operand.is_some() && self.pending_operator.is_none() {
            self.first_operand = None;
            self.current_operand.clear();
        }
        self.current_operand.push_str(digits);
        self.display = self.current_operand.clone();
    }

    fn input_operator(&mut self, op: Operator) -> Result<()> {
        match self.first_operand {
            None => {
                if self.current_operand.is_empty() {
                    return Ok(());
                }
                self.first_operand = Some(parse_operand(&self.current_operand)?);
            }
            Some(_) if self.pending_operator.is_some() => self.calculate()?,
            Some(_) => {}
        }

        self.pending_operator = Some(op);
        self.current_operand.clear();
        if let Some(first) = self.first_operand {
            self.display = format_number(first);
        }
        debug!(?op, first = ?self.first_operand, "operator pending");
        Ok(())
    }

    fn calculate(&mut self) -> Result<()> {
        let (Some(first), Some(op)) = (self.first_operand, self.pending_operator) else {
            return Ok(());
        };
        if self.current_operand.is_empty() {
            return Ok(());
        }

        let second = parse_operand(&self.current_operand)?;
        let result = op.apply(first, second)?;
        debug!(first, ?op, second, result, "calculated");

        self.first_operand = Some(result);
        self.current_operand = format_number(result);
        self.display = self.current_operand.clone();
        Ok(())
    }

    fn equals(&mut self) -> Result<()> {
        self.calculate()?;
        self.pending_operator = None;
        Ok(())
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Keypad for BasicCalculator {
    fn handle_input(&mut self, label: &str) -> String {
        if let Err(error) = self.press(Key::parse(label)) {
            debug!(label, %error, "basic input failed");
            self.clear();
            self.display = "Error".to_string();
        }
        self.display.clone()
    }

    fn reset(&mut self) {
        self.clear();
    }
}

fn parse_operand(text: &str) -> Result<f64> {
    text.parse::<f64>()
        .map_err(|_| CalcError::parse(format!("invalid operand '{}'", text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(calc: &mut BasicCalculator, labels: &[&str]) -> String {
        let mut display = String::new();
        for label in labels {
            display = calc.handle_input(label);
        }
        display
    }

    #[test]
    fn test_two_operand_arithmetic() {
        let cases: &[(&[&str], &str)] = &[
            (&["1", "2", "+", "3", "0", "="], "42"),
            (&["9", "-", "1", "2", "="], "-3"),
            (&["2", ".", "5", "*", "4", "="], "10"),
            (&["7", "/", "2", "="], "3.5"),
            (&["7", "%", "4", "="], "3"),
        ];
        for (labels, expected) in cases {
            let mut calc = BasicCalculator::new();
            assert_eq!(run(&mut calc, labels), *expected, "{:?}", labels);
        }
    }

    #[test]
    fn test_chaining_is_left_to_right() {
        let mut calc = BasicCalculator::new();
        assert_eq!(run(&mut calc, &["5", "+", "3", "+"]), "8");
        assert_eq!(run(&mut calc, &["2", "="]), "10");

        let mut calc = BasicCalculator::new();
        assert_eq!(run(&mut calc, &["5", "+", "3", "*", "2", "="]), "16");
    }

    #[test]
    fn test_division_by_zero_resets() {
        let mut calc = BasicCalculator::new();
        assert_eq!(run(&mut calc, &["5", "/", "0", "="]), "Error");
        assert_eq!(run(&mut calc, &["4"]), "4");
        assert_eq!(run(&mut calc, &["+", "1", "="]), "5");
    }

    #[test]
    fn test_digit_after_equals_starts_fresh() {
        let mut calc = BasicCalculator::new();
        assert_eq!(run(&mut calc, &["2", "+", "2", "="]), "4");
        assert_eq!(run(&mut calc, &["7"]), "7");
        assert_eq!(run(&mut calc, &["*", "3", "="]), "21");
    }

    #[test]
    fn test_operator_after_equals_chains_result() {
        let mut calc = BasicCalculator::new();
        assert_eq!(run(&mut calc, &["2", "+", "2", "=", "*", "5", "="]), "20");
    }

    #[test]
    fn test_repeated_operator_replaces_pending() {
        let mut calc = BasicCalculator::new();
        assert_eq!(run(&mut calc, &["6", "+", "-", "2", "="]), "4");
    }

    #[test]
    fn test_operator_without_operand_is_ignored() {
        let mut calc = BasicCalculator::new();
        assert_eq!(run(&mut calc, &["+"]), "");
        assert_eq!(run(&mut calc, &["3", "*", "3", "="]), "9");
    }

    #[test]
    fn test_equals_without_operator_is_noop() {
        let mut calc = BasicCalculator::new();
        assert_eq!(run(&mut calc, &["5", "="]), "5");
    }

    #[test]
    fn test_malformed_operand_is_error() {
        let mut calc = BasicCalculator::new();
        assert_eq!(run(&mut calc, &["1", ".", "2", ".", "3", "+"]), "Error");
        assert_eq!(run(&mut calc, &["2", "+", "2", "="]), "4");
    }

    #[test]
    fn test_unsupported_key_is_error() {
        let mut calc = BasicCalculator::new();
        assert_eq!(run(&mut calc, &["2", "sin"]), "Error");
        assert_eq!(run(&mut calc, &["2", "^"]), "Error");
    }

    #[test]
    fn test_clear_and_clear_entry() {
        let mut calc = BasicCalculator::new();
        assert_eq!(run(&mut calc, &["8", "+", "9", "CE"]), "");
        assert_eq!(run(&mut calc, &["1", "="]), "9");

        assert_eq!(run(&mut calc, &["4", "+", "C"]), "");
        calc.reset();
        assert_eq!(run(&mut calc, &["="]), "");
    }
}
