//! Expression evaluation.
//!
//! Walks the tree built by the parser using `f64` arithmetic and
//! formats results for display.

use crate::calculator::keys::Function;
use crate::calculator::parser::{Expr, parse};
use crate::error::{CalcError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Largest n for which n! fits in an `f64`.
const MAX_FACTORIAL: f64 = 170.0;

/// Unit used for trigonometric arguments and inverse-trig results.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

impl AngleUnit {
    /// Short label shown when the unit is switched.
    pub fn label(self) -> &'static str {
        match self {
            Self::Radians => "RAD",
            Self::Degrees => "DEG",
        }
    }

    fn input_radians(self, angle: f64) -> f64 {
        match self {
            Self::Radians => angle,
            Self::Degrees => angle.to_radians(),
        }
    }

    fn output_angle(self, angle: f64) -> f64 {
        match self {
            Self::Radians => angle,
            Self::Degrees => angle.to_degrees(),
        }
    }
}

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug)]
pub enum CalcResult {
    /// Successful calculation with a finite numeric result.
    Success {
        /// The original expression.
        expression: String,
        /// Formatted for display and for feeding back into the buffer.
        display_result: String,
    },
    /// Expression could not be parsed or evaluated.
    Error {
        /// The original expression.
        expression: String,
        /// What went wrong.
        error: CalcError,
    },
}

impl CalcResult {
    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the display string. Every failure shows as `"Error"`.
    pub fn display(&self) -> &str {
        match self {
            Self::Success { display_result, .. } => display_result,
            Self::Error { .. } => "Error",
        }
    }

    /// Get the underlying error, if any.
    pub fn error(&self) -> Option<&CalcError> {
        match self {
            Self::Success { .. } => None,
            Self::Error { error, .. } => Some(error),
        }
    }
}

/// Evaluate a mathematical expression.
pub fn evaluate_expression(input: &str, unit: AngleUnit) -> CalcResult {
    let expression = input.trim().to_string();

    match evaluate(&expression, unit) {
        Ok(value) => CalcResult::Success {
            expression,
            display_result: format_number(value),
        },
        Err(error) => {
            debug!(%expression, %error, "evaluation failed");
            CalcResult::Error { expression, error }
        }
    }
}

/// Parse and evaluate an expression to a finite number.
pub fn evaluate(input: &str, unit: AngleUnit) -> Result<f64> {
    let tree = parse(input)?;
    eval_tree(&tree, unit)
}

/// Evaluate an already parsed expression tree.
fn eval_tree(expr: &Expr, unit: AngleUnit) -> Result<f64> {
    let value = match expr {
        Expr::Number(value) => *value,
        Expr::Constant(constant) => constant.value(),
        Expr::Negate(inner) => -eval_tree(inner, unit)?,
        Expr::Factorial(inner) => factorial(eval_tree(inner, unit)?)?,
        Expr::Call(function, argument) => {
            apply_function(*function, eval_tree(argument, unit)?, unit)?
        }
        Expr::Binary(op, lhs, rhs) => op.apply(eval_tree(lhs, unit)?, eval_tree(rhs, unit)?)?,
    };

    ensure_finite(value)
}

fn ensure_finite(value: f64) -> Result<f64> {
    if value.is_nan() {
        Err(CalcError::domain("not a number"))
    } else if value.is_infinite() {
        Err(CalcError::domain("result is infinite"))
    } else {
        Ok(value)
    }
}

/// n! for a non-negative integral `n`.
fn factorial(n: f64) -> Result<f64> {
    if n < 0.0 {
        return Err(CalcError::domain(format!("factorial of negative value {}", n)));
    }
    if n.fract() != 0.0 {
        return Err(CalcError::domain(format!("factorial of non-integer {}", n)));
    }
    if n > MAX_FACTORIAL {
        return Err(CalcError::domain(format!("{}! overflows", n)));
    }

    let mut result = 1.0;
    let mut i = 2.0;
    while i <= n {
        result *= i;
        i += 1.0;
    }
    Ok(result)
}

fn apply_function(function: Function, x: f64, unit: AngleUnit) -> Result<f64> {
    let value = match function {
        Function::Sin => unit.input_radians(x).sin(),
        Function::Cos => unit.input_radians(x).cos(),
        Function::Tan => unit.input_radians(x).tan(),
        Function::Asin | Function::Acos => {
            if !(-1.0..=1.0).contains(&x) {
                return Err(CalcError::domain(format!(
                    "{}({}) is outside [-1, 1]",
                    function.name(),
                    x
                )));
            }
            let angle = if function == Function::Asin {
                x.asin()
            } else {
                x.acos()
            };
            unit.output_angle(angle)
        }
        Function::Atan => unit.output_angle(x.atan()),
        Function::Sqrt => {
            if x < 0.0 {
                return Err(CalcError::domain(format!("sqrt of negative value {}", x)));
            }
            x.sqrt()
        }
        Function::Log | Function::Ln => {
            if x <= 0.0 {
                return Err(CalcError::domain(format!(
                    "{} of non-positive value {}",
                    function.name(),
                    x
                )));
            }
            if function == Function::Log {
                x.log10()
            } else {
                x.ln()
            }
        }
        Function::Exp => x.exp(),
    };

    ensure_finite(value)
}

/// Format a number the way it is shown and re-entered.
pub fn format_number(value: f64) -> String {
    // Avoid showing "-0"
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str) -> Result<f64> {
        evaluate(input, AngleUnit::Radians)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_basic_evaluation() {
        let result = evaluate_expression("2 + 2", AngleUnit::Radians);
        assert!(result.is_success());
        assert_eq!(result.display(), "4");
        assert_eq!(result.expression(), "2 + 2");
    }

    #[test]
    fn test_precedence_and_parentheses() {
        assert_eq!(eval("2 + 3 * 4"), Ok(14.0));
        assert_eq!(eval("(2 + 3) * 4"), Ok(20.0));
        assert_eq!(eval("2 ^ 3 ^ 2"), Ok(512.0));
        assert_eq!(eval("-2 ^ 2"), Ok(-4.0));
        assert_eq!(eval("2 ^ -1"), Ok(0.5));
        assert_eq!(eval("7 mod 4 + 1"), Ok(4.0));
    }

    #[test]
    fn test_functions() {
        assert_eq!(eval("sqrt(16)"), Ok(4.0));
        assert_eq!(eval("log(1000)"), Ok(3.0));
        assert_eq!(eval("ln(1)"), Ok(0.0));
        assert_eq!(eval("exp(0)"), Ok(1.0));
        assert_eq!(eval("sin(0)"), Ok(0.0));
        assert_close(eval("cos(pi)").unwrap(), -1.0);
        assert_close(eval("sin(sqrt(pi^2)/2)").unwrap(), 1.0);
        assert_close(eval("atan(1) * 4").unwrap(), std::f64::consts::PI);
    }

    #[test]
    fn test_degrees() {
        assert_close(evaluate("sin(90)", AngleUnit::Degrees).unwrap(), 1.0);
        assert_close(evaluate("cos(60)", AngleUnit::Degrees).unwrap(), 0.5);
        assert_close(evaluate("asin(1)", AngleUnit::Degrees).unwrap(), 90.0);
    }

    #[test]
    fn test_factorial() {
        assert_eq!(eval("5!"), Ok(120.0));
        assert_eq!(eval("0!"), Ok(1.0));
        assert_eq!(eval("3!!"), Ok(720.0));
        assert_eq!(eval("2 * 3! + 1"), Ok(13.0));
        assert!(matches!(eval("(-1)!"), Err(CalcError::Domain(_))));
        assert!(matches!(eval("2.5!"), Err(CalcError::Domain(_))));
        assert!(matches!(eval("171!"), Err(CalcError::Domain(_))));
    }

    #[test]
    fn test_domain_errors() {
        assert!(matches!(eval("1 / 0"), Err(CalcError::Domain(_))));
        assert!(matches!(eval("1 / (2 - 2)"), Err(CalcError::Domain(_))));
        assert!(matches!(eval("sqrt(-4)"), Err(CalcError::Domain(_))));
        assert!(matches!(eval("log(0)"), Err(CalcError::Domain(_))));
        assert!(matches!(eval("ln(-1)"), Err(CalcError::Domain(_))));
        assert!(matches!(eval("asin(2)"), Err(CalcError::Domain(_))));
        assert!(matches!(eval("(-8)^(1/3)"), Err(CalcError::Domain(_))));
        assert!(matches!(eval("exp(1000)"), Err(CalcError::Domain(_))));
    }

    #[test]
    fn test_error_result_displays_error() {
        let result = evaluate_expression("2 +* 2", AngleUnit::Radians);
        assert!(!result.is_success());
        assert_eq!(result.display(), "Error");
        assert!(matches!(result.error(), Some(CalcError::Parse(_))));
    }

    #[test]
    fn test_deeply_nested_input_is_an_error() {
        let n = 100_000;
        let input = format!("{}1{}", "(".repeat(n), ")".repeat(n));
        let result = evaluate_expression(&input, AngleUnit::Radians);
        assert_eq!(result.display(), "Error");

        let chain = format!("1{}", "+1".repeat(n));
        assert_eq!(evaluate_expression(&chain, AngleUnit::Radians).display(), "Error");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(14.0), "14");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-3.25), "-3.25");
    }
}
