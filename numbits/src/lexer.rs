//! Turns script text into a stream of tokens.
//!
//! At each position, blanks and comments are skipped, then literals are
//! tried (hexadecimal, binary, decimal), then the word table. Literals are
//! always as wide as possible: `u64` for non-negative integers, `i64` for
//! negative integers, `f64` for anything with a fraction or exponent.

use super::*;
use core::iter::FusedIterator;
use log::trace;
use regex::{Captures, Regex};
use static_init::dynamic;


#[dynamic]
static HEX_LITERAL: Regex =
    Regex::new(r"(?i)^([+-]?)0x([0-9a-f]+)(?:\.([0-9a-f]+))?(?:p([+-]?\d+))?")
        .expect("hex literal pattern");

#[dynamic]
static BIN_LITERAL: Regex = Regex::new(r"(?i)^([+-]?)0b([01]+)(?:\.([01]+))?(?:p([+-]?\d+))?")
    .expect("binary literal pattern");

#[dynamic]
static DEC_LITERAL: Regex = Regex::new(r"(?i)^[+-]?(\d+(\.\d*)?|\.\d+)(e[+-]?\d+)?")
    .expect("decimal literal pattern");

/// Lazy token iterator over one chunk of script text.
///
/// Yields `Err` at most once, for the first position where nothing matches;
/// after that the iterator is exhausted.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    rest: &'a str,
    failed: bool,
}

impl<'a> Tokens<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            rest: text,
            failed: false,
        }
    }

    /// Text not consumed yet.
    pub fn remainder(&self) -> &'a str {
        self.rest
    }

    fn skip_blanks_and_comments(&mut self) {
        loop {
            self.rest = self.rest.trim_start();
            if self.rest.starts_with('#') || self.rest.starts_with("//") {
                self.rest = match self.rest.find('\n') {
                    Some(eol) => &self.rest[eol + 1..],
                    None => "",
                };
            } else {
                return;
            }
        }
    }

    fn lex_one(&mut self) -> Result<Token> {
        let rest = self.rest;

        for (re, bits_per_digit) in [(&*HEX_LITERAL, 4), (&*BIN_LITERAL, 1)] {
            if let Some(caps) = re.captures(rest) {
                let text = &rest[..caps[0].len()];
                self.rest = &rest[text.len()..];
                return parse_radix(text, &caps, bits_per_digit).map(Token::Value);
            }
        }

        if let Some(m) = DEC_LITERAL.find(rest) {
            let text = m.as_str();
            self.rest = &rest[text.len()..];
            return parse_decimal(text).map(Token::Value);
        }

        if let Some((name, token)) = match_word(rest) {
            self.rest = &rest[name.len()..];
            return Ok(token);
        }

        Err(Fault::syntax(rest))
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Result<Token>> {
        if self.failed {
            return None;
        }
        self.skip_blanks_and_comments();
        if self.rest.is_empty() {
            return None;
        }
        let result = self.lex_one();
        match &result {
            Ok(token) => trace!("token {:?}", token),
            Err(_) => self.failed = true,
        }
        Some(result)
    }
}

impl<'a> FusedIterator for Tokens<'a> {}

/// Tokenizes a whole chunk, stopping at the first fault.
pub fn tokenize(text: &str) -> Result<Vec<Token>> {
    Tokens::new(text).collect()
}

/// Parses a hexadecimal or binary literal matched by one of the radix
/// patterns.
///
/// Without a fraction or exponent the literal is an integer: `i64` if it has
/// a `-` sign, `u64` otherwise. With either one it is an `f64` computed
/// as `mantissa * 2^(p - bits_per_digit * fraction_digits)`, where the
/// mantissa is all the digits read as one integer. This is exact whenever
/// the mantissa fits in 53 bits.
fn parse_radix(text: &str, caps: &Captures<'_>, bits_per_digit: i64) -> Result<Num> {
    let radix = 1u32 << bits_per_digit;
    let negative = &caps[1] == "-";
    let whole = &caps[2];
    let frac = caps.get(3).map_or("", |m| m.as_str());
    let exp = caps.get(4).map(|m| m.as_str());

    if caps.get(3).is_none() && exp.is_none() {
        return if negative {
            i64::from_str_radix(&format!("-{}", whole), radix).map(Num::I64)
        } else {
            u64::from_str_radix(whole, radix).map(Num::U64)
        }
        .map_err(|e| Fault::invalid_literal(text, e));
    }

    let digits = format!("{}{}", whole, frac);
    let mantissa =
        u64::from_str_radix(&digits, radix).map_err(|e| Fault::invalid_literal(text, e))?;
    let p: i64 = match exp {
        Some(exp) => exp.parse().map_err(|e| Fault::invalid_literal(text, e))?,
        None => 0,
    };
    let scale = p.saturating_sub(bits_per_digit * frac.len() as i64);
    let magnitude = scale_by_power_of_two(mantissa as f64, scale);
    if magnitude.is_infinite() {
        return Err(Fault::invalid_literal(text, OUT_OF_RANGE));
    }
    Ok(Num::F64(if negative { -magnitude } else { magnitude }))
}

/// Float literals too large for `f64` are rejected rather than read as
/// infinity.
const OUT_OF_RANGE: &str = "value out of range";

fn parse_decimal(text: &str) -> Result<Num> {
    if text.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
        let v = text.parse::<f64>().map_err(|e| Fault::invalid_literal(text, e))?;
        if v.is_infinite() {
            return Err(Fault::invalid_literal(text, OUT_OF_RANGE));
        }
        Ok(Num::F64(v))
    } else if text.starts_with('-') {
        text.parse::<i64>().map(Num::I64).map_err(|e| Fault::invalid_literal(text, e))
    } else {
        text.parse::<u64>().map(Num::U64).map_err(|e| Fault::invalid_literal(text, e))
    }
}
