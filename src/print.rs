//! L3 output: decimal, base-N, and scientific/engineering printing
//! (spec §4.10, §6).
//!
//! [`std::fmt::Display`] covers the common base-10 case; [`write_radix`]
//! is the explicit entry point for every other base plus the
//! line-wrapping/trailing-newline behavior `bc`'s terminal writer adds
//! on top (spec §4.10 `printNum`/`printDecimal`/`printExponent`).

use std::fmt;

use crate::consts::LINE_LEN;
use crate::error::NumError;
use crate::number::Number;
use crate::signal::Signal;

/// Wraps a [`fmt::Write`] sink, inserting a `\`-newline continuation
/// every [`LINE_LEN`] characters, mirroring `bc_num_printNewline`.
///
/// Writes to the sink are assumed infallible (the sink is always a
/// `String` or a `Formatter`, neither of which fails in practice) so
/// every operation that only emits characters can stay a plain method
/// rather than threading `fmt::Result` through every call site; the
/// fallible part of printing is the cooperative abort signal, which
/// callers check separately.
struct Wrapped<'w, W: fmt::Write> {
    out: &'w mut W,
    nchars: usize,
}

impl<'w, W: fmt::Write> Wrapped<'w, W> {
    fn putc(&mut self, c: char) {
        if c != '\n' && self.nchars >= LINE_LEN - 1 {
            self.out.write_str("\\\n").expect("formatter write failed");
            self.nchars = 0;
        }
        self.out.write_char(c).expect("formatter write failed");
        if c == '\n' {
            self.nchars = 0;
        } else {
            self.nchars += 1;
        }
    }

    fn puts(&mut self, s: &str) {
        for c in s.chars() {
            self.putc(c);
        }
    }
}

fn write_decimal<W: fmt::Write>(n: &Number, w: &mut Wrapped<W>) {
    if n.is_zero() {
        w.putc('0');
        return;
    }
    if n.is_negative() {
        w.putc('-');
    }

    let digits = n.significant_digits();
    let scale = n.scale();
    let total = digits.len();

    let mut emitted = false;
    for i in (scale..total).rev() {
        let d = digits[i];
        if !emitted && d == 0 && i != scale {
            continue;
        }
        emitted = true;
        w.putc((b'0' + d) as char);
    }
    if !emitted {
        w.putc('0');
    }

    if scale > 0 {
        w.putc('.');
        for i in (0..scale).rev() {
            w.putc((b'0' + digits[i]) as char);
        }
    }
}

impl fmt::Display for Number {
    /// Base-10 print, unwrapped (spec §4.10 `printDecimal`). For the
    /// line-wrapped, newline-flagged, or non-decimal-base form, use
    /// [`write_radix`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut w = Wrapped { out: f, nchars: 0 };
        write_decimal(self, &mut w);
        Ok(())
    }
}

fn digit_char(d: u32) -> char {
    if d < 10 { (b'0' + d as u8) as char } else { (b'A' + (d - 10) as u8) as char }
}

/// Base-N positional digits of a nonnegative integer limb array, least
/// significant digit first (spec §4.10 `printNum`'s integer stack).
fn int_digits_base(int_limbs: &[u32], base: u32, signal: &Signal) -> Result<Vec<u32>, NumError> {
    if int_limbs.is_empty() {
        return Ok(vec![0]);
    }
    let mut cur = int_limbs.to_vec();
    let mut out = Vec::new();
    while !cur.is_empty() {
        signal.check()?;
        let (q, r) = crate::limbs::div_scalar(&cur, base, signal)?;
        out.push(r);
        cur = q;
        while cur.last() == Some(&0) {
            cur.pop();
        }
    }
    Ok(out)
}

/// Base-N digits of the fractional part, repeatedly multiplying by
/// `base` and peeling off the integer part each step, until enough
/// digits have been produced to round-trip the original decimal scale
/// (spec §4.10 `printNum`'s fractional loop).
fn frac_digits_base(frac0: &Number, base: u32, signal: &Signal) -> Result<Vec<u32>, NumError> {
    let needed = frac0.scale() + 1;
    let base_num = Number::from_u64(base as u64);
    let mut frac = frac0.clone();
    let mut out = Vec::with_capacity(needed);

    while out.len() < needed && !frac.is_zero() {
        signal.check()?;
        frac = crate::arith::mul(&frac, &base_num, frac.scale(), signal)?;
        let digit = frac.to_u64()?;
        out.push(digit as u32);
        if digit != 0 {
            frac = crate::arith::sub(&frac, &Number::from_u64(digit), signal)?;
        }
    }
    out.resize(needed, 0);
    Ok(out)
}

fn write_positional<W: fmt::Write>(
    n: &Number,
    base: u32,
    signal: &Signal,
    w: &mut Wrapped<W>,
) -> Result<(), NumError> {
    if n.is_negative() {
        w.putc('-');
    }
    let width = if base <= 16 { 1 } else { crate::consts::log10(base - 1) };

    let int_digs = int_digits_base(&n.digits[n.rdx..], base, signal)?;
    for &d in int_digs.iter().rev() {
        if width == 1 {
            w.putc(digit_char(d));
        } else {
            w.putc(' ');
            w.puts(&format!("{d:0width$}"));
        }
    }

    if n.scale() > 0 {
        let int_part = crate::arith::places(n, 0, signal)?;
        let mut frac = crate::arith::sub(n, &int_part, signal)?;
        frac.neg = false;
        let frac_digs = frac_digits_base(&frac, base, signal)?;
        for &d in &frac_digs {
            if width == 1 {
                w.putc(digit_char(d));
            } else {
                w.putc(' ');
                w.puts(&format!("{d:0width$}"));
            }
        }
    }
    Ok(())
}

fn write_exponent<W: fmt::Write>(
    n: &Number,
    engineering: bool,
    signal: &Signal,
    w: &mut Wrapped<W>,
) -> Result<(), NumError> {
    if n.is_zero() {
        w.puts("0e0");
        return Ok(());
    }
    signal.check()?;

    let sig = n.significant_digits();
    let total = sig.len();
    let msd = (0..total).rev().find(|&i| sig[i] != 0).expect("nonzero Number has a nonzero digit");
    let scale = n.scale() as i64;
    let exp0 = msd as i64 - scale;
    let mut exp = exp0;
    if engineering {
        exp -= exp.rem_euclid(3);
    }

    if n.is_negative() {
        w.putc('-');
    }
    let int_digit_count = (exp0 - exp + 1).max(1) as usize;
    for k in 0..int_digit_count {
        let idx = msd as i64 - k as i64;
        let d = if idx >= 0 { sig[idx as usize] } else { 0 };
        w.putc((b'0' + d) as char);
    }
    w.putc('.');
    let mut idx = msd as i64 - int_digit_count as i64;
    let mut any = false;
    while idx >= 0 {
        w.putc((b'0' + sig[idx as usize]) as char);
        idx -= 1;
        any = true;
    }
    if !any {
        w.putc('0');
    }
    w.putc('e');
    if exp < 0 {
        w.putc('-');
    }
    w.puts(&exp.unsigned_abs().to_string());
    Ok(())
}

/// Print `n` in `base` (spec §6 `print`): `0` selects scientific
/// notation, `1` engineering, `2..=MAX_OBASE` positional. Wraps output
/// at [`LINE_LEN`] and appends a trailing newline when `newline` is set.
pub fn write_radix<W: fmt::Write>(
    n: &Number,
    base: u32,
    newline: bool,
    signal: &Signal,
    w: &mut W,
) -> Result<(), NumError> {
    let mut wrapped = Wrapped { out: w, nchars: 0 };
    if n.is_zero() {
        wrapped.putc('0');
    } else if base == 10 {
        write_decimal(n, &mut wrapped);
    } else if base == 0 {
        write_exponent(n, false, signal, &mut wrapped)?;
    } else if base == 1 {
        write_exponent(n, true, signal, &mut wrapped)?;
    } else {
        write_positional(n, base, signal, &mut wrapped)?;
    }
    if newline {
        wrapped.putc('\n');
    }
    Ok(())
}
