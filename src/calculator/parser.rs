//! Recursive-descent parser producing an expression tree.
//!
//! Precedence, lowest first:
//! - `+` `-`
//! - `*` `/` `%` `mod`
//! - unary `-` `+`
//! - `^` (right associative, binds tighter than a leading minus)
//! - postfix `!`
//! - numbers, constants, `name(expr)`, `(expr)`

use crate::calculator::keys::{Constant, Function, Operator};
use crate::calculator::lexer::{Token, tokenize};
use crate::error::{CalcError, Result};

/// Deepest allowed nesting of parentheses, calls and prefix signs.
const MAX_DEPTH: usize = 256;

/// Longest accepted token stream. Left-associative chains and repeated
/// `!` grow the tree one level per operator, so this bounds tree depth.
const MAX_TOKENS: usize = 4096;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Constant(Constant),
    Negate(Box<Expr>),
    Factorial(Box<Expr>),
    Call(Function, Box<Expr>),
    Binary(Operator, Box<Expr>, Box<Expr>),
}

/// Tokenize and parse a whole expression.
pub fn parse(input: &str) -> Result<Expr> {
    let tokens = tokenize(input)?;
    Parser::new(tokens).parse()
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parse the full token stream; trailing tokens are an error.
    pub fn parse(mut self) -> Result<Expr> {
        if self.tokens.is_empty() {
            return Err(CalcError::parse("empty expression"));
        }
        if self.tokens.len() > MAX_TOKENS {
            return Err(CalcError::parse("expression too long"));
        }

        let expr = self.expression()?;
        match self.peek() {
            None => Ok(expr),
            Some(token) => Err(CalcError::parse(format!("unexpected {:?}", token))),
        }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        match self.next() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(CalcError::parse(format!(
                "expected {:?}, found {:?}",
                expected, token
            ))),
            None => Err(CalcError::parse(format!(
                "expected {:?} at end of input",
                expected
            ))),
        }
    }

    fn expression(&mut self) -> Result<Expr> {
        let mut lhs = self.term()?;
        while let Some(Token::Operator(op @ (Operator::Add | Operator::Sub))) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr> {
        let mut lhs = self.unary()?;
        while let Some(Token::Operator(op @ (Operator::Mul | Operator::Div | Operator::Mod))) =
            self.peek()
        {
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    /// Every nested parse passes through here: `(`, call arguments,
    /// exponents and prefix signs.
    fn unary(&mut self) -> Result<Expr> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalcError::parse("expression nested too deeply"));
        }
        let expr = self.signed();
        self.depth -= 1;
        expr
    }

    fn signed(&mut self) -> Result<Expr> {
        match self.peek() {
            Some(Token::Operator(Operator::Sub)) => {
                self.pos += 1;
                Ok(Expr::Negate(Box::new(self.unary()?)))
            }
            Some(Token::Operator(Operator::Add)) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr> {
        let base = self.postfix()?;
        if let Some(Token::Operator(Operator::Pow)) = self.peek() {
            self.pos += 1;
            // The exponent may carry its own sign: 2^-1
            let exponent = self.unary()?;
            return Ok(Expr::Binary(
                Operator::Pow,
                Box::new(base),
                Box::new(exponent),
            ));
        }
        Ok(base)
    }

    fn postfix(&mut self) -> Result<Expr> {
        let mut expr = self.primary()?;
        while let Some(Token::Factorial) = self.peek() {
            self.pos += 1;
            expr = Expr::Factorial(Box::new(expr));
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr> {
        match self.next() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::Constant(constant)) => Ok(Expr::Constant(constant)),
            Some(Token::Function(function)) => {
                self.expect(Token::LParen)?;
                let argument = self.expression()?;
                self.expect(Token::RParen)?;
                Ok(Expr::Call(function, Box::new(argument)))
            }
            Some(Token::LParen) => {
                let inner = self.expression()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some(token) => Err(CalcError::parse(format!("unexpected {:?}", token))),
            None => Err(CalcError::parse("unexpected end of input")),
        }
    }
}
