//! L2: arithmetic operations (spec §4.3-§4.10).
//!
//! Everything here takes operands by shared reference and returns a fresh
//! [`Number`] — see [`crate::dispatch`] for why that retires the C
//! engine's aliasing-safe `binary()` wrapper entirely.

use std::cmp::Ordering;

use crate::consts::{BASE_DIGS, BASE_POW, KARATSUBA_LEN};
use crate::dispatch;
use crate::error::NumError;
use crate::number::{rdx_of_scale, Number};
use crate::signal::Signal;

/// Pad both operands' digit arrays to a common `rdx` (zero limbs
/// prepended at the low end align the radix points) and a common
/// length.
fn align(a: &Number, b: &Number) -> (Vec<u32>, Vec<u32>, usize) {
    let rdx = a.rdx.max(b.rdx);
    let mut ad = vec![0u32; rdx - a.rdx];
    ad.extend_from_slice(&a.digits);
    let mut bd = vec![0u32; rdx - b.rdx];
    bd.extend_from_slice(&b.digits);
    let len = ad.len().max(bd.len());
    ad.resize(len, 0);
    bd.resize(len, 0);
    (ad, bd, rdx)
}

fn add_mag(a: &Number, b: &Number, signal: &Signal) -> Result<Number, NumError> {
    let (mut ad, mut bd, rdx) = align(a, b);
    ad.push(0);
    bd.push(0);
    let len = ad.len();
    let overflow = crate::limbs::add_arrays(&mut ad, &bd, len - 1, signal)?;
    debug_assert!(!overflow, "add_mag: reserved headroom limb was not enough");
    let mut n = Number { digits: ad, rdx, scale: a.scale.max(b.scale), neg: false };
    n.clean();
    Ok(n)
}

/// Addition, honoring sign (spec §4.3 `bc_num_a`/`bc_num_add`).
pub fn add(a: &Number, b: &Number, signal: &Signal) -> Result<Number, NumError> {
    if a.is_zero() {
        return Ok(b.clone());
    }
    if b.is_zero() {
        return Ok(a.clone());
    }
    let result = if a.neg == b.neg {
        let mut n = add_mag(a, b, signal)?;
        if !n.is_zero() {
            n.neg = a.neg;
        }
        n
    } else {
        let (ad, bd, rdx) = align(a, b);
        let ord = crate::limbs::compare(&ad, &bd, ad.len(), signal)?;
        let scale = a.scale.max(b.scale);
        match ord {
            // Matches the C engine's own quirk here: the zero result's
            // scale is the max of the operands' *rdx* (fractional limb
            // count), not their scale (fractional digit count).
            Ordering::Equal => Number::zero_with_scale(a.rdx.max(b.rdx)),
            Ordering::Greater => {
                let mut diff = ad;
                let len = diff.len();
                crate::limbs::sub_arrays(&mut diff, &bd, len, signal)?;
                let mut n = Number { digits: diff, rdx, scale, neg: a.neg };
                n.clean();
                n
            }
            Ordering::Less => {
                let mut diff = bd;
                let len = diff.len();
                crate::limbs::sub_arrays(&mut diff, &ad, len, signal)?;
                let mut n = Number { digits: diff, rdx, scale, neg: b.neg };
                n.clean();
                n
            }
        }
    };
    debug_assert!(result.digits.len() <= dispatch::add_req(a, b));
    result.check_invariants();
    Ok(result)
}

/// Subtraction as addition of the negated operand (spec §4.3 `bc_num_s`).
pub fn sub(a: &Number, b: &Number, signal: &Signal) -> Result<Number, NumError> {
    let mut negated = b.clone();
    if !negated.is_zero() {
        negated.neg = !negated.neg;
    }
    add(a, &negated, signal)
}

fn trim(v: &mut Vec<u32>) {
    while v.last() == Some(&0) {
        v.pop();
    }
}

fn pad(v: &[u32], len: usize) -> Vec<u32> {
    let mut out = v.to_vec();
    out.resize(len, 0);
    out
}

fn add_vecs(a: &[u32], b: &[u32]) -> Vec<u32> {
    let len = a.len().max(b.len());
    let mut out = vec![0u32; len + 1];
    let mut carry = 0u64;
    for (i, slot) in out.iter_mut().take(len).enumerate() {
        let av = *a.get(i).unwrap_or(&0) as u64;
        let bv = *b.get(i).unwrap_or(&0) as u64;
        let s = av + bv + carry;
        *slot = (s % BASE_POW as u64) as u32;
        carry = s / BASE_POW as u64;
    }
    out[len] = carry as u32;
    trim(&mut out);
    out
}

/// `a - b`, assuming `a >= b` as plain magnitude limb arrays.
fn sub_vecs(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut out = a.to_vec();
    let mut borrow = 0i64;
    for (i, slot) in out.iter_mut().enumerate() {
        let av = *slot as i64;
        let bv = *b.get(i).unwrap_or(&0) as i64;
        let mut d = av - bv - borrow;
        if d < 0 {
            d += BASE_POW as i64;
            borrow = 1;
        } else {
            borrow = 0;
        }
        *slot = d as u32;
    }
    debug_assert_eq!(borrow, 0, "sub_vecs: a was smaller than b");
    trim(&mut out);
    out
}

fn add_into(out: &mut Vec<u32>, src: &[u32], offset: usize) {
    let mut carry = 0u64;
    for (i, &v) in src.iter().enumerate() {
        let idx = offset + i;
        if idx >= out.len() {
            out.resize(idx + 1, 0);
        }
        let s = out[idx] as u64 + v as u64 + carry;
        out[idx] = (s % BASE_POW as u64) as u32;
        carry = s / BASE_POW as u64;
    }
    let mut idx = offset + src.len();
    while carry > 0 {
        if idx >= out.len() {
            out.resize(idx + 1, 0);
        }
        let s = out[idx] as u64 + carry;
        out[idx] = (s % BASE_POW as u64) as u32;
        carry = s / BASE_POW as u64;
        idx += 1;
    }
}

fn split(a: &[u32], at: usize) -> (Vec<u32>, Vec<u32>) {
    if at >= a.len() {
        (a.to_vec(), Vec::new())
    } else {
        (a[..at].to_vec(), a[at..].to_vec())
    }
}

/// Schoolbook convolution, `O(n*m)` (spec §4.4 `bc_num_m_simp`).
fn mul_simple(a: &[u32], b: &[u32], signal: &Signal) -> Result<Vec<u32>, NumError> {
    if a.is_empty() || b.is_empty() {
        return Ok(Vec::new());
    }
    let mut out = vec![0u64; a.len() + b.len()];
    for (i, &ai) in a.iter().enumerate() {
        signal.check()?;
        if ai == 0 {
            continue;
        }
        let mut carry = 0u64;
        for (j, &bj) in b.iter().enumerate() {
            let idx = i + j;
            let prod = ai as u64 * bj as u64 + out[idx] + carry;
            out[idx] = prod % BASE_POW as u64;
            carry = prod / BASE_POW as u64;
        }
        let mut k = i + b.len();
        while carry > 0 {
            let s = out[k] + carry;
            out[k] = s % BASE_POW as u64;
            carry = s / BASE_POW as u64;
            k += 1;
        }
    }
    let mut out: Vec<u32> = out.into_iter().map(|v| v as u32).collect();
    trim(&mut out);
    Ok(out)
}

/// Karatsuba multiply above [`KARATSUBA_LEN`] limbs, falling back to
/// [`mul_simple`] below it (spec §4.4 `bc_num_k`).
fn mul_karatsuba(a: &[u32], b: &[u32], signal: &Signal) -> Result<Vec<u32>, NumError> {
    signal.check()?;
    let n = a.len().max(b.len());
    if n < KARATSUBA_LEN {
        return mul_simple(a, b, signal);
    }

    let half = n / 2;
    let (a_lo, a_hi) = split(a, half);
    let (b_lo, b_hi) = split(b, half);

    let z0 = mul_karatsuba(&a_lo, &b_lo, signal)?;
    let z2 = mul_karatsuba(&a_hi, &b_hi, signal)?;
    let a_sum = add_vecs(&a_lo, &a_hi);
    let b_sum = add_vecs(&b_lo, &b_hi);
    let z1_full = mul_karatsuba(&a_sum, &b_sum, signal)?;
    let z1 = sub_vecs(&sub_vecs(&z1_full, &z0), &z2);

    let mut out = Vec::new();
    add_into(&mut out, &z0, 0);
    add_into(&mut out, &z1, half);
    add_into(&mut out, &z2, 2 * half);
    trim(&mut out);
    Ok(out)
}

/// Multiplication, truncated to `scale` fractional digits (never below
/// `max(a.scale, b.scale)`, never above the exact product scale), per
/// spec §4.4 `bc_num_m`.
pub fn mul(a: &Number, b: &Number, scale: usize, signal: &Signal) -> Result<Number, NumError> {
    if a.is_zero() || b.is_zero() {
        return Ok(Number::zero_with_scale(scale));
    }
    let exact_scale = a.scale + b.scale;
    let prod = mul_karatsuba(&a.digits, &b.digits, signal)?;
    debug_assert!(prod.len() <= dispatch::mul_req(a, b, scale));

    // a.rdx + b.rdx over-counts fractional limbs whenever each operand's
    // own zero padding (rdx*BASE_DIGS - scale) sums to BASE_DIGS or more:
    // the product then carries a spurious all-zero low limb that needs
    // dropping to land back on the canonical rdx for exact_scale.
    let mut rdx = a.rdx + b.rdx;
    let mut digits = prod;
    let canonical_rdx = rdx_of_scale(exact_scale);
    while rdx > canonical_rdx {
        debug_assert_eq!(digits.first().copied().unwrap_or(0), 0);
        if !digits.is_empty() {
            digits.remove(0);
        }
        rdx -= 1;
    }

    let mut n = Number { digits, rdx, scale: exact_scale, neg: false };
    n.ensure_len(dispatch::mul_req(a, b, scale));
    n.clean();
    let target = scale.max(a.scale).max(b.scale).min(exact_scale);
    n.retire_mul(target, a.neg, b.neg);
    n.check_invariants();
    Ok(n)
}

/// Long division of two raw magnitude limb arrays, digit-at-a-time with
/// a binary-searched quotient digit (spec §4.5 `bc_num_d_long`'s
/// estimate-then-correct structure, without replicating its specific
/// two-limb estimator).
fn div_mag(a: &[u32], b: &[u32], signal: &Signal) -> Result<(Vec<u32>, Vec<u32>), NumError> {
    debug_assert!(!b.is_empty());
    let mut quotient = vec![0u32; a.len()];
    let mut rem: Vec<u32> = Vec::new();
    for i in (0..a.len()).rev() {
        signal.check()?;
        rem.insert(0, a[i]);
        trim(&mut rem);

        let mut lo: u64 = 0;
        let mut hi: u64 = BASE_POW as u64 - 1;
        while lo < hi {
            let mid = lo + (hi - lo).div_ceil(2);
            let trial = crate::limbs::mul_scalar(b, mid as u32, signal)?;
            let len = trial.len().max(rem.len());
            let ord = crate::limbs::compare(&pad(&trial, len), &pad(&rem, len), len, signal)?;
            if ord != Ordering::Greater {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        quotient[i] = lo as u32;
        if lo > 0 {
            let trial = crate::limbs::mul_scalar(b, lo as u32, signal)?;
            let len = trial.len().max(rem.len());
            rem = sub_vecs(&pad(&rem, len), &trial);
        }
    }
    trim(&mut quotient);
    Ok((quotient, rem))
}

/// Division and remainder, sharing the long-division core (spec §4.5
/// `bc_num_d`/`bc_num_divmod`).
fn div_core(a: &Number, b: &Number, scale: usize, signal: &Signal) -> Result<(Number, Vec<u32>), NumError> {
    if b.is_zero() {
        return Err(NumError::DivideByZero);
    }
    if a.is_zero() {
        return Ok((Number::zero_with_scale(scale), Vec::new()));
    }
    let mut a2 = a.clone();
    let target = scale + b.scale;
    if target > a2.scale {
        a2.extend(target - a2.scale);
    } else if target < a2.scale {
        a2.truncate(a2.scale - target);
    }
    if a2.is_zero() {
        return Ok((Number::zero_with_scale(scale), Vec::new()));
    }
    let (q, r) = div_mag(&a2.digits, &b.digits, signal)?;

    // `q` is the integer quotient of two raw limb arrays, i.e. it carries
    // exactly `9 * (a2.rdx - b.rdx)` fractional decimal digits of
    // precision — an exact multiple of BASE_DIGS, since it falls out of
    // limb-for-limb division with no digit-level rounding. That is in
    // general a different digit count than `scale` (rdx_of_scale rounds
    // up to a whole limb, and that rounding doesn't distribute over the
    // subtraction), so land on an intermediate Number at its true,
    // exactly-known scale first and let truncate/extend carry it the
    // rest of the way to the requested `scale`.
    let raw_rdx = a2.rdx - b.rdx;
    let raw_scale = raw_rdx * BASE_DIGS;
    let mut n = Number { digits: q, rdx: raw_rdx, scale: raw_scale, neg: a.neg != b.neg };
    n.clean();
    if scale < n.scale {
        n.truncate(n.scale - scale);
    } else if scale > n.scale {
        n.extend(scale - n.scale);
    }
    n.clean();
    n.check_invariants();
    Ok((n, r))
}

/// `a / b`, truncated to `scale` fractional digits.
pub fn div(a: &Number, b: &Number, scale: usize, signal: &Signal) -> Result<Number, NumError> {
    Ok(div_core(a, b, scale, signal)?.0)
}

/// `a / b` and `a - (a/b)*b` together (spec §4.6 `bc_num_divmod`).
pub fn divmod(a: &Number, b: &Number, scale: usize, signal: &Signal) -> Result<(Number, Number), NumError> {
    if b.is_zero() {
        return Err(NumError::DivideByZero);
    }
    let rscale = a.scale.max(b.scale + scale);
    let quotient = div(a, b, scale, signal)?;
    let prod = mul(&quotient, b, rscale, signal)?;
    let remv = sub(a, &prod, signal)?;
    Ok((quotient, remv))
}

/// `a mod b` (spec §4.6 `bc_num_r`). The remainder's sign matches `a`'s.
pub fn rem(a: &Number, b: &Number, scale: usize, signal: &Signal) -> Result<Number, NumError> {
    Ok(divmod(a, b, scale, signal)?.1)
}

/// Integer power by square-and-multiply, doubling the working scale at
/// every squaring step and deferring truncation to the end (spec §4.7
/// `bc_num_p`). Negative exponents invert the positive-exponent result.
pub fn pow(a: &Number, b: &Number, scale: usize, signal: &Signal) -> Result<Number, NumError> {
    if b.scale != 0 {
        return Err(NumError::NonInteger);
    }
    let neg_exp = b.is_negative();
    let mut exp = b.to_u64().map_err(|_| NumError::Overflow)?;

    if exp == 0 {
        return Ok(Number::one());
    }
    if a.is_zero() {
        return if neg_exp { Err(NumError::DivideByZero) } else { Ok(Number::zero_with_scale(scale)) };
    }

    let reps = exp;
    let mut base = a.clone();
    let mut result = Number::one();
    while exp > 0 {
        signal.check()?;
        if exp & 1 == 1 {
            let target = result.scale + base.scale;
            result = mul(&result, &base, target, signal)?;
        }
        exp >>= 1;
        if exp > 0 {
            let target = base.scale * 2;
            base = mul(&base, &base, target, signal)?;
        }
    }
    debug_assert!(result.len() <= dispatch::pow_req(a, reps));

    if scale < result.scale {
        result.truncate(result.scale - scale);
    } else if scale > result.scale {
        result.extend(scale - result.scale);
    }
    result.clean();

    if neg_exp {
        result = div(&Number::one(), &result, scale, signal)?;
    }
    result.check_invariants();
    Ok(result)
}

fn mul_pow10(digit: u32, zeros: usize) -> Number {
    let n = Number::from_u64(digit as u64);
    if zeros == 0 {
        return n;
    }
    let mut digits = n.significant_digits();
    let mut prefixed = vec![0u8; zeros];
    prefixed.append(&mut digits);
    Number::from_significant_digits(prefixed, 0, false)
}

/// Newton's method square root (spec §4.8 `bc_num_sqrt`): seed a guess
/// from the integer digit count, iterate `x = (x + a/x) / 2` at double
/// the requested scale, and break once consecutive iterations stop
/// making forward progress (observed as the comparison direction
/// flipping more than twice — limited precision makes the true fixed
/// point unreachable once that happens).
pub fn sqrt(a: &Number, scale: usize, signal: &Signal) -> Result<Number, NumError> {
    if a.is_negative() {
        return Err(NumError::Negative);
    }
    if a.is_zero() {
        return Ok(Number::zero_with_scale(scale));
    }

    let p = a.int_digits().max(1);
    let half_p = p / 2;
    let mut x = if p % 2 == 1 { mul_pow10(2, half_p) } else { mul_pow10(6, half_p.saturating_sub(1)) };

    let resscale = 2 * (scale + BASE_DIGS);
    let half = Number::half();
    let mut prev_ord: Option<Ordering> = None;
    let mut times = 0u32;

    loop {
        signal.check()?;
        let quotient = div(a, &x, resscale, signal)?;
        let sum = add(&x, &quotient, signal)?;
        let next = mul(&sum, &half, resscale, signal)?;

        let ord = dispatch::cmp(&next, &x, signal)?;
        x = next;
        if ord == Ordering::Equal {
            break;
        }
        if let Some(prev) = prev_ord
            && prev != ord
        {
            times += 1;
        }
        prev_ord = Some(ord);
        if times > 2 {
            break;
        }
    }

    if scale < x.scale {
        x.truncate(x.scale - scale);
    } else if scale > x.scale {
        x.extend(scale - x.scale);
    }
    x.clean();
    x.check_invariants();
    Ok(x)
}

/// Modular exponentiation (spec §4.9 `bc_num_modexp`): square-and-multiply
/// over the exponent's bits, reducing mod `c` after every multiply so
/// intermediate values stay bounded by `c`.
pub fn modexp(a: &Number, b: &Number, c: &Number, signal: &Signal) -> Result<Number, NumError> {
    if c.is_zero() {
        return Err(NumError::DivideByZero);
    }
    if b.is_negative() {
        return Err(NumError::Negative);
    }
    if a.scale() != 0 || b.scale() != 0 || c.scale() != 0 {
        return Err(NumError::NonInteger);
    }

    let mut base = rem(a, c, 0, signal)?;
    let mut exp = b.clone();
    let mut result = rem(&Number::one(), c, 0, signal)?;
    let two = Number::from_u64(2);

    while !exp.is_zero() {
        signal.check()?;
        let (next_exp, bit) = divmod(&exp, &two, 0, signal)?;
        if !bit.is_zero() {
            let prod = mul(&result, &base, 0, signal)?;
            result = rem(&prod, c, 0, signal)?;
        }
        exp = next_exp;
        let squared = mul(&base, &base, 0, signal)?;
        base = rem(&squared, c, 0, signal)?;
    }
    result.check_invariants();
    Ok(result)
}

/// Change the number of fractional decimal digits carried, without
/// moving the radix point (the `places` extra-math operator).
pub fn places(a: &Number, places_count: u64, signal: &Signal) -> Result<Number, NumError> {
    signal.check()?;
    let target = places_count as usize;
    let mut c = a.clone();
    if target < c.scale {
        c.truncate(c.scale - target);
    } else if target > c.scale {
        c.extend(target - c.scale);
    }
    c.check_invariants();
    Ok(c)
}

/// Move the radix point right by `places` decimal digits (multiply by
/// `10^places`), decreasing scale (the `<<` extra-math operator).
pub fn lshift(a: &Number, places_count: u64, signal: &Signal) -> Result<Number, NumError> {
    shift_decimal(a, places_count as i128, signal)
}

/// Move the radix point left by `places` decimal digits (divide by
/// `10^places`), increasing scale (the `>>` extra-math operator).
pub fn rshift(a: &Number, places_count: u64, signal: &Signal) -> Result<Number, NumError> {
    shift_decimal(a, -(places_count as i128), signal)
}

fn shift_decimal(a: &Number, places: i128, signal: &Signal) -> Result<Number, NumError> {
    signal.check()?;
    if places == 0 {
        return Ok(a.clone());
    }
    if a.is_zero() {
        let new_scale =
            if places > 0 { a.scale.saturating_sub(places as usize) } else { a.scale + (-places) as usize };
        return Ok(Number::zero_with_scale(new_scale));
    }

    let scale = a.scale() as i128;
    let new_scale = (scale - places).max(0) as usize;
    let mut digits = a.significant_digits();

    if places > scale {
        let extra = (places - scale) as usize;
        let mut prefix = vec![0u8; extra];
        prefix.append(&mut digits);
        digits = prefix;
    }
    if digits.len() < new_scale {
        digits.resize(new_scale, 0);
    }

    let n = Number::from_significant_digits(digits, new_scale, a.is_negative());
    n.check_invariants();
    Ok(n)
}
