//! L1: digit-array primitives (spec §4.2).
//!
//! These operate on raw limb slices, little-endian (index 0 is the least
//! significant limb), at a caller-supplied radix position. None of them
//! know about sign, scale, or `rdx` — that bookkeeping lives one layer up
//! in [`crate::number`] and [`crate::arith`].

use std::cmp::Ordering;

use crate::consts::BASE_POW;
use crate::error::NumError;
use crate::signal::Signal;

/// `a[0..len] += b[0..len]`, with carry propagated beyond `len` into the
/// rest of `a`. Returns `true` if a carry escaped past `a.len()`
/// (the caller must have reserved a limb for this, or append one).
pub fn add_arrays(a: &mut [u32], b: &[u32], len: usize, signal: &Signal) -> Result<bool, NumError> {
    let mut carry: u64 = 0;
    for i in 0..len {
        signal.check()?;
        let sum = a[i] as u64 + b[i] as u64 + carry;
        a[i] = (sum % BASE_POW as u64) as u32;
        carry = sum / BASE_POW as u64;
    }
    let mut i = len;
    while carry > 0 {
        signal.check()?;
        if i >= a.len() {
            return Ok(true);
        }
        let sum = a[i] as u64 + carry;
        a[i] = (sum % BASE_POW as u64) as u32;
        carry = sum / BASE_POW as u64;
        i += 1;
    }
    Ok(false)
}

/// `a[0..len] -= b[0..len]`, in place. Caller guarantees `a >= b` at this
/// radix; the borrow chain never needs to extend past `len`.
pub fn sub_arrays(a: &mut [u32], b: &[u32], len: usize, signal: &Signal) -> Result<(), NumError> {
    let mut borrow: i64 = 0;
    for i in 0..len {
        signal.check()?;
        let mut diff = a[i] as i64 - b[i] as i64 - borrow;
        if diff < 0 {
            diff += BASE_POW as i64;
            borrow = 1;
        } else {
            borrow = 0;
        }
        a[i] = diff as u32;
    }
    debug_assert_eq!(borrow, 0, "sub_arrays: a was smaller than b at this radix");
    Ok(())
}

/// `c = a * d`, `d` a scalar limb in `[0, BASE_POW]`. `c` is cleared and
/// resized to hold the full product (possibly one limb longer than `a`).
pub fn mul_scalar(a: &[u32], d: u32, signal: &Signal) -> Result<Vec<u32>, NumError> {
    let mut out = Vec::with_capacity(a.len() + 1);
    let mut carry: u64 = 0;
    for &limb in a {
        signal.check()?;
        let prod = limb as u64 * d as u64 + carry;
        out.push((prod % BASE_POW as u64) as u32);
        carry = prod / BASE_POW as u64;
    }
    while carry > 0 {
        out.push((carry % BASE_POW as u64) as u32);
        carry /= BASE_POW as u64;
    }
    Ok(out)
}

/// `c = floor(a / d)`, returns `(c, a mod d)`. `d` a nonzero scalar.
pub fn div_scalar(a: &[u32], d: u32, signal: &Signal) -> Result<(Vec<u32>, u32), NumError> {
    debug_assert!(d != 0);
    let mut out = vec![0u32; a.len()];
    let mut rem: u64 = 0;
    for i in (0..a.len()).rev() {
        signal.check()?;
        let cur = rem * BASE_POW as u64 + a[i] as u64;
        out[i] = (cur / d as u64) as u32;
        rem = cur % d as u64;
    }
    Ok((out, rem as u32))
}

/// Lexicographic compare of `a[0..len]` vs `b[0..len]` from the most
/// significant limb down.
pub fn compare(a: &[u32], b: &[u32], len: usize, signal: &Signal) -> Result<Ordering, NumError> {
    for i in (0..len).rev() {
        signal.check()?;
        match a[i].cmp(&b[i]) {
            Ordering::Equal => continue,
            other => return Ok(other),
        }
    }
    Ok(Ordering::Equal)
}
