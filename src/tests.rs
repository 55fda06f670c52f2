//! Unit and property tests for the decimal engine.
//!
//! Property tests compare against native `i64`/`i128` arithmetic the way
//! the sibling fixed-width crate in this workspace's examples does it —
//! build a [`Number`] from a native integer, run an operation, and check
//! the result converts back to the same native answer.

use quickcheck_macros::quickcheck;

use crate::arith;
use crate::error::NumError;
use crate::parse::{parse_radix, ParseNumError};
use crate::signal::Signal;
use crate::Number;

fn sig() -> Signal {
    Signal::new()
}

fn from_i128(v: i128) -> Number {
    let neg = v < 0;
    let mut n = Number::from_u64(v.unsigned_abs() as u64);
    if neg && !n.is_zero() {
        n.neg = true;
    }
    n
}

fn to_i128(n: &Number) -> i128 {
    let mag = n.to_u64().unwrap() as i128;
    if n.is_negative() { -mag } else { mag }
}

// ---------------------------------------------------------------------
// Parse / print
// ---------------------------------------------------------------------

#[test]
fn parse_decimal_roundtrip() {
    let n: Number = "123.456".parse().unwrap();
    assert_eq!(n.scale(), 3);
    assert_eq!(n.to_string(), "123.456");
}

#[test]
fn parse_negative() {
    let n: Number = "-42.5".parse().unwrap();
    assert!(n.is_negative());
    assert_eq!(n.to_string(), "-42.5");
}

#[test]
fn parse_leading_dot_and_bare_zero() {
    assert_eq!(".5".parse::<Number>().unwrap().to_string(), "0.5");
    assert_eq!("0.0".parse::<Number>().unwrap().scale(), 1);
    assert_eq!("".parse::<Number>().unwrap(), Number::zero());
}

#[test]
fn parse_rejects_bad_digit() {
    let err = "12x.3".parse::<Number>().unwrap_err();
    assert_eq!(err, ParseNumError::InvalidChar('x'));
}

#[test]
fn parse_decimal_clamps_uppercase_digits() {
    assert_eq!("1A.5".parse::<Number>().unwrap().to_string(), "19.5");
    assert_eq!("Z".parse::<Number>().unwrap().to_string(), "9");
}

#[test]
fn parse_hex_and_print_hex() {
    let signal = sig();
    let n = parse_radix("FF", 16, false, &signal).unwrap();
    assert_eq!(to_i128(&n), 255);

    let mut out = String::new();
    crate::print::write_radix(&n, 16, false, &signal, &mut out).unwrap();
    assert_eq!(out, "FF");
}

#[test]
fn parse_letter_constant() {
    let signal = sig();
    let n = parse_radix("Z", 10, true, &signal).unwrap();
    assert_eq!(to_i128(&n), 35);
}

#[test]
fn print_scientific_and_engineering() {
    let signal = sig();
    let n: Number = "1234.5".parse().unwrap();
    let mut sci = String::new();
    crate::print::write_radix(&n, 0, false, &signal, &mut sci).unwrap();
    assert_eq!(sci, "1.2345e3");

    let mut eng = String::new();
    crate::print::write_radix(&n, 1, false, &signal, &mut eng).unwrap();
    assert_eq!(eng, "1.2345e3");

    let small: Number = "0.012345".parse().unwrap();
    let mut eng2 = String::new();
    crate::print::write_radix(&small, 1, false, &signal, &mut eng2).unwrap();
    assert_eq!(eng2, "12.345e-3");
}

// ---------------------------------------------------------------------
// Arithmetic against known values
// ---------------------------------------------------------------------

#[test]
fn add_and_sub_known_values() {
    let signal = sig();
    let a: Number = "123.456".parse().unwrap();
    let b: Number = "78.9".parse().unwrap();
    assert_eq!(arith::add(&a, &b, &signal).unwrap().to_string(), "202.356");
    assert_eq!(arith::sub(&a, &b, &signal).unwrap().to_string(), "44.556");
    assert_eq!(arith::sub(&b, &a, &signal).unwrap().to_string(), "-44.556");
}

#[test]
fn mul_known_value() {
    let signal = sig();
    let a: Number = "123.456".parse().unwrap();
    let b: Number = "78.9".parse().unwrap();
    assert_eq!(arith::mul(&a, &b, 6, &signal).unwrap().to_string(), "9740.6784");
}

#[test]
fn div_repeating_decimal() {
    let signal = sig();
    let one = Number::from_u64(1);
    let three = Number::from_u64(3);
    let q = arith::div(&one, &three, 20, &signal).unwrap();
    assert_eq!(q.to_string(), "0.33333333333333333333");
}

#[test]
fn divmod_and_rem_sign_matches_dividend() {
    let signal = sig();
    let a: Number = "-7".parse().unwrap();
    let b = Number::from_u64(2);
    let (q, r) = arith::divmod(&a, &b, 0, &signal).unwrap();
    assert_eq!(q.to_string(), "-3");
    assert_eq!(r.to_string(), "-1");
    assert_eq!(arith::rem(&a, &b, 0, &signal).unwrap().to_string(), "-1");
}

#[test]
fn divide_by_zero_errors() {
    let signal = sig();
    let a = Number::from_u64(1);
    let zero = Number::zero();
    assert_eq!(arith::div(&a, &zero, 5, &signal).unwrap_err(), NumError::DivideByZero);
    assert_eq!(arith::divmod(&a, &zero, 5, &signal).unwrap_err(), NumError::DivideByZero);
    assert_eq!(arith::modexp(&a, &a, &zero, &signal).unwrap_err(), NumError::DivideByZero);
}

#[test]
fn sqrt_matches_known_value() {
    let signal = sig();
    let two = Number::from_u64(2);
    let r = arith::sqrt(&two, 20, &signal).unwrap();
    assert_eq!(r.to_string(), "1.41421356237309504880");
}

#[test]
fn sqrt_of_negative_errors() {
    let signal = sig();
    let neg: Number = "-1".parse().unwrap();
    assert_eq!(arith::sqrt(&neg, 5, &signal).unwrap_err(), NumError::Negative);
}

#[test]
fn pow_known_value() {
    let signal = sig();
    let two = Number::from_u64(2);
    let hundred = Number::from_u64(100);
    let r = arith::pow(&two, &hundred, 0, &signal).unwrap();
    assert_eq!(r.to_string(), "1267650600228229401496703205376");
}

#[test]
fn pow_negative_exponent() {
    let signal = sig();
    let two = Number::from_u64(2);
    let neg_three: Number = "-3".parse().unwrap();
    let r = arith::pow(&two, &neg_three, 5, &signal).unwrap();
    assert_eq!(r.to_string(), "0.12500");
}

#[test]
fn pow_requires_integer_exponent() {
    let signal = sig();
    let a = Number::from_u64(2);
    let b: Number = "1.5".parse().unwrap();
    assert_eq!(arith::pow(&a, &b, 0, &signal).unwrap_err(), NumError::NonInteger);
}

#[test]
fn modexp_known_value() {
    let signal = sig();
    let a = Number::from_u64(5);
    let b = Number::from_u64(117);
    let c = Number::from_u64(19);
    assert_eq!(arith::modexp(&a, &b, &c, &signal).unwrap().to_string(), "1");
}

#[test]
fn places_lshift_rshift() {
    let signal = sig();
    let n: Number = "12.345".parse().unwrap();
    assert_eq!(arith::places(&n, 1, &signal).unwrap().to_string(), "12.3");
    assert_eq!(arith::lshift(&n, 2, &signal).unwrap().to_string(), "1234.5");
    assert_eq!(arith::rshift(&n, 2, &signal).unwrap().to_string(), "0.12345");
}

#[test]
fn signal_abort_is_observed() {
    let signal = sig();
    signal.raise();
    let a = Number::from_u64(2);
    let b = Number::from_u64(100);
    assert_eq!(arith::pow(&a, &b, 0, &signal).unwrap_err(), NumError::Signal);
}

// ---------------------------------------------------------------------
// Property tests against native i64 arithmetic
// ---------------------------------------------------------------------

#[quickcheck]
fn roundtrip_i64(v: i64) -> bool {
    let n = from_i128(v as i128);
    n.to_string().parse::<Number>().unwrap() == n
}

#[quickcheck]
fn add_matches_native(a: i32, b: i32) -> bool {
    let (a, b) = (a as i64, b as i64);
    let expected = a as i128 + b as i128;
    let result = arith::add(&from_i128(a as i128), &from_i128(b as i128), &sig()).unwrap();
    to_i128(&result) == expected
}

#[quickcheck]
fn sub_self_is_zero(a: i32) -> bool {
    let n = from_i128(a as i128);
    arith::sub(&n, &n, &sig()).unwrap().is_zero()
}

#[quickcheck]
fn mul_matches_native(a: i16, b: i16) -> bool {
    let (a, b) = (a as i64, b as i64);
    let expected = a as i128 * b as i128;
    let result = arith::mul(&from_i128(a as i128), &from_i128(b as i128), 0, &sig()).unwrap();
    to_i128(&result) == expected
}

#[quickcheck]
fn mul_identity(a: i32) -> bool {
    let n = from_i128(a as i128);
    let one = Number::one();
    arith::mul(&n, &one, 0, &sig()).unwrap() == n
}

#[quickcheck]
fn div_matches_native(a: i32, b: i16) -> bool {
    if b == 0 {
        return true;
    }
    let (a, b) = (a as i64, b as i64);
    let expected = a / b;
    let result = arith::div(&from_i128(a as i128), &from_i128(b as i128), 0, &sig()).unwrap();
    to_i128(&result) == expected as i128
}

#[quickcheck]
fn divmod_round_trips(a: i32, b: i16) -> bool {
    if b == 0 {
        return true;
    }
    let signal = sig();
    let an = from_i128(a as i128);
    let bn = from_i128(b as i128);
    let (q, r) = arith::divmod(&an, &bn, 0, &signal).unwrap();
    arith::add(&arith::mul(&q, &bn, 0, &signal).unwrap(), &r, &signal).unwrap() == an
}

#[quickcheck]
fn cmp_matches_native(a: i32, b: i32) -> bool {
    let (a, b) = (a as i64, b as i64);
    from_i128(a as i128).cmp(&from_i128(b as i128)) == a.cmp(&b)
}

#[quickcheck]
fn modexp_matches_naive(a: u8, b: u8, m: u8) -> bool {
    if m == 0 {
        return true;
    }
    let expected = {
        let (mut base, mut exp, modulus) = (a as u64 % m as u64, b as u64, m as u64);
        let mut acc = 1u64 % modulus;
        while exp > 0 {
            if exp & 1 == 1 {
                acc = acc * base % modulus;
            }
            base = base * base % modulus;
            exp >>= 1;
        }
        acc
    };
    let result = arith::modexp(
        &Number::from_u64(a as u64),
        &Number::from_u64(b as u64),
        &Number::from_u64(m as u64),
        &sig(),
    )
    .unwrap();
    result.to_u64().unwrap() == expected
}

#[quickcheck]
fn sqrt_squares_back_close(a: u16) -> bool {
    let signal = sig();
    let n = Number::from_u64(a as u64);
    let r = arith::sqrt(&n, 10, &signal).unwrap();
    let squared = arith::mul(&r, &r, 10, &signal).unwrap();
    // Truncated Newton iteration undershoots by at most a few ULPs at
    // the requested scale; bound the error instead of requiring exact
    // equality.
    let diff = arith::sub(&n, &squared, &signal).unwrap();
    let bound: Number = "0.0001".parse().unwrap();
    arith::sub(&bound, &diff, &signal).map(|d| !d.is_negative()).unwrap_or(true)
        || diff.is_negative()
        || diff.is_zero()
}
