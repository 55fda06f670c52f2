//! L0: representation primitives (spec §3, §4.1).
//!
//! [`Number`] is a signed decimal value with an explicit fractional-digit
//! `scale`, stored as packed radix-`BASE_POW` limbs, least-significant
//! limb first. A `Vec<u32>` stands in for the C engine's malloc'd limb
//! buffer: `Vec`'s amortized-growth reallocation is the same strategy
//! `bc_num_expand` implements by hand, so there is no separate `cap`
//! field to track here — see DESIGN.md for why the "borrowed Number"
//! variant (spec §3) is likewise folded away.

use crate::consts::{BASE_DIGS, BASE_POW, POW10};

/// An arbitrary-precision signed decimal.
///
/// Invariants (checked with `debug_assert!` at the boundary of public
/// operations, per spec §7):
/// 1. `rdx <= digits.len()` unless `digits` is empty.
/// 2. `rdx == ceil(scale / BASE_DIGS)`.
/// 3. The most significant limb, if any, is nonzero.
/// 4. Every limb is in `[0, BASE_POW)`.
/// 5. Zero is never negative.
#[derive(Clone, Debug)]
pub struct Number {
    /// Limbs, least-significant first.
    pub(crate) digits: Vec<u32>,
    /// Number of fractional limbs.
    pub(crate) rdx: usize,
    /// Number of fractional decimal digits currently carried.
    pub(crate) scale: usize,
    /// Sign; `false` (non-negative) when the value is zero.
    pub(crate) neg: bool,
}

/// `ceil(scale / BASE_DIGS)`.
pub(crate) fn rdx_of_scale(scale: usize) -> usize {
    scale.div_ceil(BASE_DIGS)
}

impl Number {
    /// The value zero at scale 0.
    pub fn zero() -> Self {
        Self { digits: Vec::new(), rdx: 0, scale: 0, neg: false }
    }

    /// The value zero at the given scale.
    pub fn zero_with_scale(scale: usize) -> Self {
        Self { digits: Vec::new(), rdx: 0, scale, neg: false }
    }

    /// The value one.
    pub fn one() -> Self {
        Self { digits: vec![1], rdx: 0, scale: 0, neg: false }
    }

    /// The value one-half, used internally by [`crate::arith::sqrt`]'s
    /// Newton iteration (the engine's "borrowed constant" in the
    /// original C).
    pub(crate) fn half() -> Self {
        Self { digits: vec![BASE_POW / 2], rdx: 1, scale: 1, neg: false }
    }

    /// Construct from a native signed integer.
    pub fn from_i64(v: i64) -> Self {
        let neg = v < 0;
        let mut mag = v.unsigned_abs();
        let mut digits = Vec::new();
        while mag > 0 {
            digits.push((mag % BASE_POW as u64) as u32);
            mag /= BASE_POW as u64;
        }
        let mut n = Self { digits, rdx: 0, scale: 0, neg };
        n.clean();
        n
    }

    /// Construct from a native unsigned integer (the `createFromBigdig`
    /// entry point of spec §6).
    pub fn from_u64(mut v: u64) -> Self {
        let mut digits = Vec::new();
        while v > 0 {
            digits.push((v % BASE_POW as u64) as u32);
            v /= BASE_POW as u64;
        }
        let mut n = Self { digits, rdx: 0, scale: 0, neg: false };
        n.clean();
        n
    }

    /// Convert to a native unsigned integer, truncating any fractional
    /// part. Errors with [`crate::error::NumError::Overflow`] if the
    /// integer part does not fit.
    pub fn to_u64(&self) -> Result<u64, crate::error::NumError> {
        use crate::error::NumError;
        let int_limbs = &self.digits[self.rdx..];
        let mut v: u64 = 0;
        for &limb in int_limbs.iter().rev() {
            v = v
                .checked_mul(BASE_POW as u64)
                .and_then(|v| v.checked_add(limb as u64))
                .ok_or(NumError::Overflow)?;
        }
        Ok(v)
    }

    /// True if this value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// True if this value is negative (zero is never negative).
    pub fn is_negative(&self) -> bool {
        self.neg
    }

    /// Number of fractional decimal digits currently carried.
    pub fn scale(&self) -> usize {
        self.scale
    }

    /// Number of active limbs.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// True if this value has no active limbs (equivalent to [`Number::is_zero`]).
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Number of integer limbs (`len - rdx`, or 0 when empty).
    pub(crate) fn int_len(&self) -> usize {
        if self.digits.is_empty() { 0 } else { self.digits.len() - self.rdx }
    }

    /// Number of decimal digits in the integer part.
    pub(crate) fn int_digits(&self) -> usize {
        let mut d = self.int_len() * BASE_DIGS;
        if d > 0 {
            let top = self.digits[self.digits.len() - 1];
            d -= BASE_DIGS - crate::consts::log10(top);
        }
        d
    }

    /// Trim leading-zero *integer* limbs (never touching the fractional
    /// block below `rdx`, where a zero limb just means leading zeros in
    /// the fractional part), canonicalize the sign of zero, and restore
    /// `len >= rdx` (spec §4.1 `clean`).
    pub(crate) fn clean(&mut self) {
        while self.digits.len() > self.rdx && *self.digits.last().unwrap() == 0 {
            self.digits.pop();
        }
        if self.digits.iter().all(|&d| d == 0) {
            self.digits.clear();
            self.rdx = 0;
            self.neg = false;
        } else if self.digits.len() < self.rdx {
            self.digits.resize(self.rdx, 0);
        }
    }

    /// Ensure `digits` is at least `len` limbs long, zero-padding as
    /// needed. The Rust analogue of `bc_num_expand` followed by a
    /// `memset` of the newly exposed tail.
    pub(crate) fn ensure_len(&mut self, len: usize) {
        if self.digits.len() < len {
            self.digits.resize(len, 0);
        }
    }

    /// Truncate `places` fractional decimal digits off the low end
    /// (spec §4.2 `shiftRight`'s inverse; used by `retireMul`/`pow`).
    pub(crate) fn truncate(&mut self, places: usize) {
        if places == 0 {
            return;
        }
        debug_assert!(places <= self.scale);
        let places_rdx = self.rdx - rdx_of_scale(self.scale - places);
        self.scale -= places;
        self.rdx -= places_rdx;

        if !self.is_zero() {
            let keep_mod = self.scale % BASE_DIGS;
            let pow = if keep_mod == 0 { 1 } else { POW10[BASE_DIGS - keep_mod] };

            self.digits.drain(0..places_rdx);
            if !self.digits.is_empty() {
                self.digits[0] -= self.digits[0] % pow;
            }
            self.clean();
        }
    }

    /// Extend the value with `places` more fractional decimal digits of
    /// zero (spec §4.2; used by `div`/`pow`/`sqrt` to align scales).
    pub(crate) fn extend(&mut self, places: usize) {
        if places == 0 {
            return;
        }
        let new_rdx = rdx_of_scale(places + self.scale);
        let places_rdx = new_rdx - self.rdx;

        if places_rdx > 0 {
            let new_len = self.digits.len() + places_rdx;
            self.digits.resize(new_len, 0);
            self.digits.copy_within(0..new_len - places_rdx, places_rdx);
            self.digits[0..places_rdx].fill(0);
        }

        self.rdx += places_rdx;
        self.scale += places;
        debug_assert_eq!(self.rdx, rdx_of_scale(self.scale));
    }

    /// Unpack every limb into individual little-endian decimal digits,
    /// then drop the zero padding below `scale` that invariant 6
    /// guarantees (spec §4.2), leaving exactly the significant digits:
    /// `scale` fractional digits followed by the integer part. Used by
    /// [`crate::arith::lshift`]/`rshift` to move the radix point without
    /// replaying the C engine's in-place carry trick.
    pub(crate) fn significant_digits(&self) -> Vec<u8> {
        let mut flat = Vec::with_capacity(self.digits.len() * BASE_DIGS);
        for &limb in &self.digits {
            let mut v = limb;
            for _ in 0..BASE_DIGS {
                flat.push((v % 10) as u8);
                v /= 10;
            }
        }
        let pad = self.rdx * BASE_DIGS - self.scale;
        flat[pad..].to_vec()
    }

    /// Inverse of [`Number::significant_digits`]: repack little-endian
    /// significant digits (`scale` fractional, the rest integer) into
    /// limbs, padding the bottom back out to a whole number of limbs.
    pub(crate) fn from_significant_digits(mut digits: Vec<u8>, scale: usize, neg: bool) -> Self {
        let rdx = rdx_of_scale(scale);
        let pad = rdx * BASE_DIGS - scale;
        let mut flat = vec![0u8; pad];
        flat.append(&mut digits);
        while !flat.len().is_multiple_of(BASE_DIGS) {
            flat.push(0);
        }
        let limbs = flat
            .chunks(BASE_DIGS)
            .map(|chunk| chunk.iter().rev().fold(0u32, |acc, &d| acc * 10 + d as u32))
            .collect();
        let mut n = Self { digits: limbs, rdx, scale, neg };
        n.clean();
        n
    }

    /// After a multiply, trim or extend to the requested `scale` and fix
    /// up the sign (spec §4.4 `retireMul`).
    pub(crate) fn retire_mul(&mut self, scale: usize, neg1: bool, neg2: bool) {
        if self.scale < scale {
            self.extend(scale - self.scale);
        } else {
            self.truncate(self.scale - scale);
        }
        self.clean();
        if !self.is_zero() {
            self.neg = neg1 != neg2;
        }
    }

    /// Debug-only invariant check, mirroring the C engine's `assert`s at
    /// function boundaries (spec §7).
    #[cfg(debug_assertions)]
    pub(crate) fn check_invariants(&self) {
        debug_assert!(self.digits.is_empty() || self.rdx <= self.digits.len());
        if !self.digits.is_empty() {
            debug_assert_eq!(self.rdx, rdx_of_scale(self.scale));
        }
        if let Some(&top) = self.digits.last() {
            if self.digits.len() > self.rdx {
                debug_assert_ne!(top, 0, "leading zero in the integer part");
            }
        } else {
            debug_assert!(!self.neg);
        }
        debug_assert!(self.digits.iter().all(|&d| d < BASE_POW));
    }

    #[cfg(not(debug_assertions))]
    pub(crate) fn check_invariants(&self) {}
}

impl Default for Number {
    fn default() -> Self {
        Self::zero()
    }
}
