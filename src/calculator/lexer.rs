//! Tokenizer for expression text.

use crate::calculator::keys::{Constant, Function, Operator};
use crate::error::{CalcError, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Constant(Constant),
    Function(Function),
    Operator(Operator),
    Factorial,
    LParen,
    RParen,
}

/// Split an expression into tokens.
///
/// Identifiers are read whole before being looked up, so `exp` is never
/// mistaken for the constant `e` followed by garbage.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            // Exponent part, as produced when formatting very small or large results.
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    while j < chars.len() && chars[j].is_ascii_digit() {
                        j += 1;
                    }
                    i = j;
                }
            }
            let text: String = chars[start..i].iter().collect();
            let value: f64 = text
                .parse()
                .map_err(|_| CalcError::parse(format!("invalid number '{}'", text)))?;
            tokens.push(Token::Number(value));
            continue;
        }

        if c.is_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            tokens.push(lookup_word(&word)?);
            continue;
        }

        let token = match c {
            '+' => Token::Operator(Operator::Add),
            '-' => Token::Operator(Operator::Sub),
            '*' => Token::Operator(Operator::Mul),
            '/' => Token::Operator(Operator::Div),
            '%' => Token::Operator(Operator::Mod),
            '^' => Token::Operator(Operator::Pow),
            '!' => Token::Factorial,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => return Err(CalcError::unsupported(other.to_string())),
        };
        tokens.push(token);
        i += 1;
    }

    Ok(tokens)
}

fn lookup_word(word: &str) -> Result<Token> {
    let lower = word.to_lowercase();

    if lower == "mod" {
        return Ok(Token::Operator(Operator::Mod));
    }
    if let Some(function) = Function::from_name(&lower) {
        return Ok(Token::Function(function));
    }
    if let Some(constant) = Constant::from_name(&lower) {
        return Ok(Token::Constant(constant));
    }

    Err(CalcError::unsupported(word))
}
