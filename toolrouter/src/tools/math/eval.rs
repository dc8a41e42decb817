//! Tokenizer and recursive-descent evaluator for sanitized arithmetic.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr   := term (("+" | "-") term)*
//! term   := factor (("*" | "/" | "//" | "%") factor)*
//! factor := ("+" | "-") factor | power
//! power  := atom ("**" factor)?
//! atom   := NUMBER | "(" expr ")"
//! ```
//!
//! Integers stay integers under `+ - * // % **` (non-negative exponent); `/` always yields a
//! float. `%` and `//` follow floor semantics, so the remainder takes the divisor's sign.
//!
//! Every nesting level (a parenthesis, a unary sign or an exponent) passes through `factor`,
//! which caps the depth at [`MAX_DEPTH`].

use std::fmt;

use thiserror::Error;

/// Deepest `factor` nesting accepted before evaluation gives up.
pub(crate) const MAX_DEPTH: usize = 200;

#[derive(Debug, Error, PartialEq)]
pub(crate) enum EvalError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("integer overflow")]
    Overflow,
    #[error("invalid syntax: {0}")]
    Syntax(String),
    #[error("math domain error: {0}")]
    Domain(&'static str),
    #[error("expression nested too deeply (limit {max})", max = MAX_DEPTH)]
    TooDeep,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Number::Int(i) => i == 0,
            Number::Float(f) => f == 0.0,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(x) => f.write_str(&format_float(*x)),
        }
    }
}

/// Shortest round-trip repr: positional for exponents in `-4..16`, otherwise `1.5e+16` style.
/// Integral values keep a trailing `.0`.
fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let sci = format!("{:e}", x);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return x.to_string();
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return x.to_string();
    };
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };

    if !(-4..16).contains(&exp) {
        let exp_sign = if exp < 0 { '-' } else { '+' };
        return format!("{}{}e{}{:02}", sign, mantissa, exp_sign, exp.abs());
    }

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let body = if exp >= 0 {
        let point = exp as usize + 1;
        if digits.len() <= point {
            format!("{}{}.0", digits, "0".repeat(point - digits.len()))
        } else {
            format!("{}.{}", &digits[..point], &digits[point..])
        }
    } else {
        format!("0.{}{}", "0".repeat((-exp - 1) as usize), digits)
    };
    format!("{}{}", sign, body)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(Number),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    Percent,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Num(n) => write!(f, "{}", n),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::DoubleStar => f.write_str("**"),
            Token::Slash => f.write_str("/"),
            Token::DoubleSlash => f.write_str("//"),
            Token::Percent => f.write_str("%"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

fn number_literal(text: &str) -> Result<Number, EvalError> {
    let dots = text.matches('.').count();
    if dots > 1 || text == "." {
        return Err(EvalError::Syntax(format!("malformed number '{}'", text)));
    }
    if dots == 1 {
        return text
            .parse::<f64>()
            .map(Number::Float)
            .map_err(|_| EvalError::Syntax(format!("malformed number '{}'", text)));
    }
    if text.len() > 1 && text.starts_with('0') && text.bytes().any(|b| b != b'0') {
        return Err(EvalError::Syntax(format!(
            "leading zeros in integer literal '{}'",
            text
        )));
    }
    text.parse::<i64>()
        .map(Number::Int)
        .map_err(|_| EvalError::Overflow)
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        let token = match c {
            ' ' => {
                i += 1;
                continue;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                tokens.push(Token::Num(number_literal(&literal)?));
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' if next == Some('*') => {
                i += 1;
                Token::DoubleStar
            }
            '*' => Token::Star,
            '/' if next == Some('/') => {
                i += 1;
                Token::DoubleSlash
            }
            '/' => Token::Slash,
            '%' => Token::Percent,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => {
                return Err(EvalError::Syntax(format!("unexpected character '{}'", other)));
            }
        };
        tokens.push(token);
        i += 1;
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

    fn bump(&mut self) -> Option<Token> {
        let t = self.peek();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn expr(&mut self) -> Result<Number, EvalError> {
        let mut acc = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            acc = binary(op, acc, rhs)?;
        }
        Ok(acc)
    }

    fn term(&mut self) -> Result<Number, EvalError> {
        let mut acc = self.factor()?;
        while let Some(op @ (Token::Star | Token::Slash | Token::DoubleSlash | Token::Percent)) =
            self.peek()
        {
            self.pos += 1;
            let rhs = self.factor()?;
            acc = binary(op, acc, rhs)?;
        }
        Ok(acc)
    }

    fn factor(&mut self) -> Result<Number, EvalError> {
        if self.depth >= MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }
        self.depth += 1;
        let value = self.signed();
        self.depth -= 1;
        value
    }

    fn signed(&mut self) -> Result<Number, EvalError> {
        match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                self.factor()
            }
            Some(Token::Minus) => {
                self.pos += 1;
                match self.factor()? {
                    Number::Int(i) => i.checked_neg().map(Number::Int).ok_or(EvalError::Overflow),
                    Number::Float(f) => Ok(Number::Float(-f)),
                }
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Number, EvalError> {
        let base = self.atom()?;
        if self.peek() == Some(Token::DoubleStar) {
            self.pos += 1;
            let exponent = self.factor()?;
            return pow(base, exponent);
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Number, EvalError> {
        match self.bump() {
            Some(Token::Num(n)) => Ok(n),
            Some(Token::LParen) => {
                let inner = self.expr()?;
                match self.bump() {
                    Some(Token::RParen) => Ok(inner),
                    Some(t) => Err(EvalError::Syntax(format!("expected ')' but found '{}'", t))),
                    None => Err(EvalError::Syntax("'(' was never closed".to_string())),
                }
            }
            Some(t) => Err(EvalError::Syntax(format!("unexpected '{}'", t))),
            None => Err(EvalError::Syntax("unexpected end of expression".to_string())),
        }
    }
}

fn floor_div_int(a: i64, b: i64) -> Result<i64, EvalError> {
    let q = a.checked_div(b).ok_or(EvalError::Overflow)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

fn mod_int(a: i64, b: i64) -> Result<i64, EvalError> {
    let r = a.checked_rem(b).ok_or(EvalError::Overflow)?;
    if r != 0 && ((r < 0) != (b < 0)) {
        Ok(r + b)
    } else {
        Ok(r)
    }
}

fn mod_float(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r == 0.0 {
        0.0_f64.copysign(b)
    } else if (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}

fn binary(op: Token, lhs: Number, rhs: Number) -> Result<Number, EvalError> {
    use Number::{Float, Int};

    match op {
        Token::Slash => {
            if rhs.is_zero() {
                return Err(EvalError::DivisionByZero);
            }
            return Ok(Float(lhs.as_f64() / rhs.as_f64()));
        }
        Token::DoubleSlash if rhs.is_zero() => return Err(EvalError::DivisionByZero),
        Token::Percent if rhs.is_zero() => return Err(EvalError::ModuloByZero),
        _ => {}
    }

    match (lhs, rhs) {
        (Int(a), Int(b)) => {
            let v = match op {
                Token::Plus => a.checked_add(b).ok_or(EvalError::Overflow)?,
                Token::Minus => a.checked_sub(b).ok_or(EvalError::Overflow)?,
                Token::Star => a.checked_mul(b).ok_or(EvalError::Overflow)?,
                Token::DoubleSlash => floor_div_int(a, b)?,
                Token::Percent => mod_int(a, b)?,
                other => return Err(EvalError::Syntax(format!("unexpected '{}'", other))),
            };
            Ok(Int(v))
        }
        _ => {
            let (a, b) = (lhs.as_f64(), rhs.as_f64());
            let v = match op {
                Token::Plus => a + b,
                Token::Minus => a - b,
                Token::Star => a * b,
                Token::DoubleSlash => (a / b).floor(),
                Token::Percent => mod_float(a, b),
                other => return Err(EvalError::Syntax(format!("unexpected '{}'", other))),
            };
            Ok(Float(v))
        }
    }
}

fn pow(base: Number, exponent: Number) -> Result<Number, EvalError> {
    if let (Number::Int(b), Number::Int(e)) = (base, exponent) {
        if e >= 0 {
            match b {
                0 => return Ok(Number::Int(if e == 0 { 1 } else { 0 })),
                1 => return Ok(Number::Int(1)),
                -1 => return Ok(Number::Int(if e % 2 == 0 { 1 } else { -1 })),
                _ => {}
            }
            let e = u32::try_from(e).map_err(|_| EvalError::Overflow)?;
            return b.checked_pow(e).map(Number::Int).ok_or(EvalError::Overflow);
        }
    }
    let (b, e) = (base.as_f64(), exponent.as_f64());
    if b == 0.0 && e < 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    if b < 0.0 && e.fract() != 0.0 {
        return Err(EvalError::Domain(
            "negative number cannot be raised to a fractional power",
        ));
    }
    let v = b.powf(e);
    if v.is_infinite() {
        return Err(EvalError::Overflow);
    }
    Ok(Number::Float(v))
}

/// Evaluates an already sanitized expression.
pub(crate) fn evaluate(input: &str) -> Result<Number, EvalError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::Syntax("empty expression".to_string()));
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if let Some(t) = parser.peek() {
        return Err(EvalError::Syntax(format!("unexpected '{}'", t)));
    }
    Ok(value)
}
