//! Key classification for calculator input.
//!
//! Turns the raw label of a pressed button (or a word typed at the
//! terminal) into a [`Key`] the calculators can match on.

use crate::calculator::evaluation::AngleUnit;
use crate::calculator::session::Mode;
use lazy_static::lazy_static;
use regex::Regex;
use std::f64::consts::{E, PI};

lazy_static! {
    /// Digit runs with at most one decimal point, or a lone point.
    /// Allows: "7", "42", ".", "3.", ".5", "3.25".
    static ref DIGITS_KEY: Regex = Regex::new(r"^([0-9]+\.?[0-9]*|\.[0-9]*)$").unwrap();
}

/// A binary operator key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl Operator {
    /// The text appended to an expression buffer for this operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
        }
    }

    /// Apply the operator to two finite operands.
    pub fn apply(self, lhs: f64, rhs: f64) -> crate::Result<f64> {
        use crate::CalcError;

        let value = match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => {
                if rhs == 0.0 {
                    return Err(CalcError::domain("division by zero"));
                }
                lhs / rhs
            }
            Self::Mod => {
                if rhs == 0.0 {
                    return Err(CalcError::domain("modulo by zero"));
                }
                // Floored modulo: the result takes the sign of the divisor.
                lhs - rhs * (lhs / rhs).floor()
            }
            Self::Pow => {
                if lhs == 0.0 && rhs < 0.0 {
                    return Err(CalcError::domain("zero raised to a negative power"));
                }
                lhs.powf(rhs)
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalcError::domain(format!(
                "{} {} {} is not a finite number",
                lhs,
                self.symbol(),
                rhs
            )))
        }
    }
}

/// A one-argument function key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Log,
    Ln,
    Exp,
}

impl Function {
    pub const ALL: [Function; 10] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Sqrt,
        Self::Log,
        Self::Ln,
        Self::Exp,
    ];

    /// The name written into an expression buffer.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sqrt => "sqrt",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Exp => "exp",
        }
    }

    /// Look up a function by its expression name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// A named constant key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Self::Pi => PI,
            Self::E => E,
        }
    }

    /// Look up a constant by the identifier accepted in expressions.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" | "π" => Some(Self::Pi),
            "e" => Some(Self::E),
            _ => None,
        }
    }
}

/// A classified key press.
#[derive(Clone, Debug, PartialEq)]
pub enum Key {
    /// Digits and/or a decimal point, appended verbatim.
    Digits(String),
    Operator(Operator),
    /// A function key; appends the name and an opening parenthesis.
    Function(Function),
    Constant(Constant),
    /// `x^2`
    Square,
    /// `x^3`
    Cube,
    /// `1/x`
    Reciprocal,
    /// `!`, applied to the whole entry. `5 !` evaluates to `120` once `=`
    /// is pressed.
    Factorial,
    /// `10^x`
    TenPower,
    OpenParen,
    CloseParen,
    Equals,
    /// `C`
    Clear,
    /// `CE`
    ClearEntry,
    /// `rad` / `deg`
    Angle(AngleUnit),
    /// `Normal` / `Scientific`
    Mode(Mode),
    Unknown(String),
}

impl Key {
    /// Classify a button label.
    ///
    /// Surrounding whitespace is ignored and word labels are matched
    /// case-insensitively.
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();

        if DIGITS_KEY.is_match(trimmed) {
            return Self::Digits(trimmed.to_string());
        }

        let lower = trimmed.to_lowercase();
        match lower.as_str() {
            "+" => Self::Operator(Operator::Add),
            "-" => Self::Operator(Operator::Sub),
            "*" => Self::Operator(Operator::Mul),
            "/" => Self::Operator(Operator::Div),
            "%" | "mod" => Self::Operator(Operator::Mod),
            "^" => Self::Operator(Operator::Pow),
            "e^x" => Self::Function(Function::Exp),
            "x^2" => Self::Square,
            "x^3" => Self::Cube,
            "1/x" => Self::Reciprocal,
            "!" => Self::Factorial,
            "10^x" => Self::TenPower,
            "(" => Self::OpenParen,
            ")" => Self::CloseParen,
            "=" => Self::Equals,
            "c" => Self::Clear,
            "ce" => Self::ClearEntry,
            "rad" => Self::Angle(AngleUnit::Radians),
            "deg" => Self::Angle(AngleUnit::Degrees),
            "normal" | "basic" => Self::Mode(Mode::Basic),
            "scientific" => Self::Mode(Mode::Scientific),
            other => {
                if let Some(function) = Function::from_name(other) {
                    Self::Function(function)
                } else if let Some(constant) = Constant::from_name(other) {
                    Self::Constant(constant)
                } else {
                    Self::Unknown(trimmed.to_string())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_labels() {
        assert_eq!(Key::parse("7"), Key::Digits("7".to_string()));
        assert_eq!(Key::parse("."), Key::Digits(".".to_string()));
        assert_eq!(Key::parse(" 12.5 "), Key::Digits("12.5".to_string()));
        assert_eq!(Key::parse("1.2.3"), Key::Unknown("1.2.3".to_string()));
        assert_eq!(
            Key::parse("\u{0663}"),
            Key::Unknown("\u{0663}".to_string())
        );
    }

    #[test]
    fn test_operator_labels() {
        assert_eq!(Key::parse("+"), Key::Operator(Operator::Add));
        assert_eq!(Key::parse("%"), Key::Operator(Operator::Mod));
        assert_eq!(Key::parse("mod"), Key::Operator(Operator::Mod));
        assert_eq!(Key::parse("^"), Key::Operator(Operator::Pow));
    }

    #[test]
    fn test_function_and_constant_labels() {
        assert_eq!(Key::parse("sin"), Key::Function(Function::Sin));
        assert_eq!(Key::parse("e^x"), Key::Function(Function::Exp));
        assert_eq!(Key::parse("exp"), Key::Function(Function::Exp));
        assert_eq!(Key::parse("pi"), Key::Constant(Constant::Pi));
        assert_eq!(Key::parse("e"), Key::Constant(Constant::E));
    }

    #[test]
    fn test_control_labels() {
        assert_eq!(Key::parse("C"), Key::Clear);
        assert_eq!(Key::parse("CE"), Key::ClearEntry);
        assert_eq!(Key::parse("x^2"), Key::Square);
        assert_eq!(Key::parse("1/x"), Key::Reciprocal);
        assert_eq!(Key::parse("Scientific"), Key::Mode(Mode::Scientific));
        assert_eq!(Key::parse("deg"), Key::Angle(AngleUnit::Degrees));
    }

    #[test]
    fn test_unknown_labels() {
        assert_eq!(Key::parse("foo"), Key::Unknown("foo".to_string()));
        assert_eq!(Key::parse(""), Key::Unknown(String::new()));
    }

    #[test]
    fn test_operator_domain_errors() {
        assert!(Operator::Div.apply(5.0, 0.0).is_err());
        assert!(Operator::Mod.apply(5.0, 0.0).is_err());
        assert!(Operator::Pow.apply(0.0, -1.0).is_err());
        assert_eq!(Operator::Mod.apply(-7.0, 3.0), Ok(2.0));
        assert_eq!(Operator::Mod.apply(7.0, -3.0), Ok(-2.0));
    }
}
