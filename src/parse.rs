//! L3 input: decimal and base-N parsing (spec §4.10, §6).

use thiserror::Error;

use crate::consts::MAX_LBASE;
use crate::error::NumError;
use crate::number::Number;
use crate::signal::Signal;

/// A malformed input string. Distinct from [`NumError`]: this is a
/// syntax problem detected before any arithmetic runs, not one of the
/// engine's math errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseNumError {
    /// A character wasn't a valid digit (or `.`/`-`/`+`) for the given base.
    #[error("invalid digit {0:?}")]
    InvalidChar(char),
    /// The input had no digits at all where at least one was required.
    #[error("empty input")]
    Empty,
    /// Parsing was aborted by a cooperatively polled signal.
    #[error("operation aborted by signal")]
    Aborted,
}

impl From<NumError> for ParseNumError {
    fn from(e: NumError) -> Self {
        match e {
            NumError::Signal => ParseNumError::Aborted,
            other => unreachable!("parse: unexpected arithmetic error {other:?}"),
        }
    }
}

/// Digit value of `c` in `base`, clamped to `base - 1` if it's out of
/// range (spec §6 `parse`'s clamping rule) rather than rejected.
fn digit_value(c: char, base: u32) -> Result<u32, ParseNumError> {
    let v = if c.is_ascii_digit() {
        c as u32 - '0' as u32
    } else if c.is_ascii_uppercase() {
        c as u32 - 'A' as u32 + 10
    } else {
        return Err(ParseNumError::InvalidChar(c));
    };
    Ok(if v >= base { base - 1 } else { v })
}

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else {
        (false, text.strip_prefix('+').unwrap_or(text))
    }
}

/// Base-10 parse (spec §4.10 `parseDecimal`): split on `.`, derive
/// `scale` from the fractional digit count, and place every character
/// directly into the packed significant-digit representation.
fn parse_decimal(text: &str) -> Result<Number, ParseNumError> {
    let (neg, body) = split_sign(text);
    if body.is_empty() {
        return Ok(Number::zero());
    }
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));

    // Matches the original engine's decimal-literal clamp
    // (`if (isupper(c)) c = '9';`): an out-of-range uppercase digit
    // saturates to 9 rather than being rejected outright.
    let decimal_digit = |c: char| -> Result<u8, ParseNumError> {
        if c.is_ascii_digit() {
            Ok(c as u8 - b'0')
        } else if c.is_ascii_uppercase() {
            Ok(9)
        } else {
            Err(ParseNumError::InvalidChar(c))
        }
    };

    let scale = frac_part.len();
    let mut digits = Vec::with_capacity(int_part.len() + frac_part.len());
    for c in frac_part.chars().rev() {
        digits.push(decimal_digit(c)?);
    }
    for c in int_part.chars().rev() {
        digits.push(decimal_digit(c)?);
    }

    let mut n = Number::from_significant_digits(digits, scale, neg);
    if n.is_zero() {
        n = Number::zero_with_scale(scale);
    }
    Ok(n)
}

/// Non-decimal parse (spec §4.10 `parseBase`): accumulate the integer
/// part by `n = n*base + digit`, and the fractional part the same way
/// alongside a `base^digits` multiplier, then divide the fractional
/// accumulator by that multiplier at double precision and truncate.
fn parse_base(text: &str, base: u32, signal: &Signal) -> Result<Number, ParseNumError> {
    let (neg, body) = split_sign(text);
    if body.is_empty() {
        return Ok(Number::zero());
    }
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));

    let base_num = Number::from_u64(base as u64);
    let mut n = Number::zero();
    for c in int_part.chars() {
        let v = digit_value(c, base)?;
        n = crate::arith::mul(&n, &base_num, 0, signal)?;
        n = crate::arith::add(&n, &Number::from_u64(v as u64), signal)?;
    }

    if !frac_part.is_empty() {
        let digs = frac_part.len();
        let mut result = Number::zero();
        let mut mult = Number::one();
        for c in frac_part.chars() {
            let v = digit_value(c, base)?;
            result = crate::arith::mul(&result, &base_num, 0, signal)?;
            result = crate::arith::add(&result, &Number::from_u64(v as u64), signal)?;
            mult = crate::arith::mul(&mult, &base_num, 0, signal)?;
        }
        let mut frac = crate::arith::div(&result, &mult, digs * 2, signal)?;
        if frac.scale() > digs {
            frac.truncate(frac.scale() - digs);
        }
        n = crate::arith::add(&n, &frac, signal)?;
        if !n.is_zero() && n.scale() < digs {
            n.extend(digs - n.scale());
        }
    }

    if neg && !n.is_zero() {
        n.neg = true;
    }
    Ok(n)
}

/// Parse `text` in `base` (spec §6 `parse`). `letter` means `text` is a
/// single letter-digit constant (`A`..`Z`, valued `10`..`35`, ignoring
/// `base`) rather than a full number literal.
pub fn parse_radix(text: &str, base: u32, letter: bool, signal: &Signal) -> Result<Number, ParseNumError> {
    if letter {
        let c = text.chars().next().ok_or(ParseNumError::Empty)?;
        let v = digit_value(c, MAX_LBASE)?;
        return Ok(Number::from_u64(v as u64));
    }
    if base == 10 {
        parse_decimal(text)
    } else {
        parse_base(text, base, signal)
    }
}

impl std::str::FromStr for Number {
    type Err = ParseNumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_radix(s, 10, false, &Signal::new())
    }
}
