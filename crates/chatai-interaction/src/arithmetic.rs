//! Restricted arithmetic evaluation.
//!
//! Only numbers, `+ - * /` and parentheses are understood. Anything else is a
//! [`CalcError`]; no general-purpose evaluator is ever involved.
//!
//! Grammar:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := '-' factor | number | '(' expr ')'
//! ```

use crate::intent::arithmetic_pattern;
use thiserror::Error;

/// Deepest allowed nesting of parentheses and unary minus.
pub const MAX_DEPTH: usize = 64;

/// Why an arithmetic expression could not be evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("no arithmetic expression found")]
    Empty,
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unexpected token at position {0}")]
    UnexpectedToken(usize),
    #[error("expression ended unexpectedly")]
    UnexpectedEnd,
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("result is out of range")]
    Overflow,
    #[error("expression nests deeper than 64 levels")]
    TooDeep,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

fn is_expression_byte(b: u8) -> bool {
    b.is_ascii_digit() || b.is_ascii_whitespace() || b"+-*/().".contains(&b)
}

/// Finds the arithmetic expression embedded in `input`.
///
/// Starts from the first `digits operator digits` match and widens it over
/// neighbouring expression characters, so `what is (2+3)*4?` yields `(2+3)*4`.
/// Unmatched outer parentheses are dropped.
pub fn extract_expression(input: &str) -> Option<&str> {
    let found = arithmetic_pattern().find(input)?;
    let bytes = input.as_bytes();

    let mut start = found.start();
    while start > 0 && is_expression_byte(bytes[start - 1]) {
        start -= 1;
    }
    let mut end = found.end();
    while end < bytes.len() && is_expression_byte(bytes[end]) {
        end += 1;
    }

    // Only ASCII bytes were skipped, so both ends sit on char boundaries.
    Some(tidy(&input[start..end]))
}

/// Drops sentence punctuation and unmatched outer parentheses picked up while
/// widening the match.
fn tidy(mut expr: &str) -> &str {
    loop {
        expr = expr.trim();
        let bytes = expr.as_bytes();
        let open = expr.matches('(').count();
        let close = expr.matches(')').count();

        let stray_leading_dot =
            bytes.first() == Some(&b'.') && !bytes.get(1).is_some_and(u8::is_ascii_digit);
        let stray_trailing_dot = bytes.len() > 1
            && bytes[bytes.len() - 1] == b'.'
            && !bytes[bytes.len() - 2].is_ascii_digit();

        expr = if stray_leading_dot || (open > close && expr.starts_with('(')) {
            &expr[1..]
        } else if stray_trailing_dot || (close > open && expr.ends_with(')')) {
            &expr[..expr.len() - 1]
        } else {
            return expr;
        };
    }
}

fn tokenize(expr: &str) -> Result<Vec<Token>, CalcError> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            c if c.is_ascii_digit() || c == '.' => {
                let mut end = i + c.len_utf8();
                while let Some(&(j, next)) = chars.peek() {
                    if !(next.is_ascii_digit() || next == '.') {
                        break;
                    }
                    end = j + next.len_utf8();
                    chars.next();
                }
                let literal = &expr[i..end];
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| CalcError::InvalidNumber(literal.to_string()))?;
                Token::Number(value)
            }
            other => return Err(CalcError::UnexpectedChar(other)),
        };
        tokens.push(token);
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
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

    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == Token::Plus { value + rhs } else { value - rhs };
            finite(value)?;
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.factor()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            value = if op == Token::Star {
                value * rhs
            } else {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                value / rhs
            };
            finite(value)?;
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, CalcError> {
        match self.next() {
            Some(Token::Number(value)) => finite(value),
            Some(Token::Minus) => {
                let value = self.nested(Self::factor)?;
                Ok(-value)
            }
            Some(Token::LParen) => {
                let value = self.nested(Self::expr)?;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    Some(_) => Err(CalcError::UnexpectedToken(self.pos - 1)),
                    None => Err(CalcError::UnexpectedEnd),
                }
            }
            Some(_) => Err(CalcError::UnexpectedToken(self.pos - 1)),
            None => Err(CalcError::UnexpectedEnd),
        }
    }

    fn nested(&mut self, rule: fn(&mut Self) -> Result<f64, CalcError>) -> Result<f64, CalcError> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::TooDeep);
        }
        self.depth += 1;
        let value = rule(self);
        self.depth -= 1;
        value
    }
}

fn finite(value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::Overflow)
    }
}

/// Evaluates a bare arithmetic expression such as `(2+3)*4`.
pub fn evaluate(expr: &str) -> Result<f64, CalcError> {
    let tokens = tokenize(expr)?;
    if tokens.is_empty() {
        return Err(CalcError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(CalcError::UnexpectedToken(parser.pos));
    }
    Ok(value)
}

/// Renders whole results without a decimal point.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Extracts the expression embedded in `input`, evaluates it and formats the
/// result.
///
/// Widening can pull surrounding prose into the expression (`2+2 - thanks`,
/// `step 3 2+2`). When the widened expression does not evaluate, the bare
/// `digits operator digits` match is tried before giving up.
pub fn calculate(input: &str) -> Result<String, CalcError> {
    let found = arithmetic_pattern().find(input).ok_or(CalcError::Empty)?;
    let widened = extract_expression(input).ok_or(CalcError::Empty)?;

    match evaluate(widened) {
        Ok(value) => Ok(format_number(value)),
        Err(_) if widened != found.as_str() => evaluate(found.as_str()).map(format_number),
        Err(err) => Err(err),
    }
}
