//! Arbitrary-precision decimal arithmetic: the numeric core of a
//! POSIX `bc`/`dc`-style calculator.
//!
//! Layered the way the C engine is (L0 representation, L1 digit-array
//! primitives, L2 arithmetic, L3 parse/print, L4 compare and dispatch):
//!
//! - [`number`] — [`Number`], the packed radix-`10^9` decimal value.
//! - [`limbs`] — raw limb-array add/sub/mul/div/compare.
//! - [`arith`] — add, sub, mul, div, divmod, rem, pow, sqrt, modexp,
//!   places/lshift/rshift.
//! - [`parse`] / [`print`] — base-N text conversion.
//! - [`dispatch`] — three-way compare and buffer-size estimators.
//! - [`signal`] — cooperative abort polling.
//! - [`error`] — [`NumError`] and [`ParseNumError`].

pub mod arith;
pub mod consts;
pub mod dispatch;
pub mod error;
pub mod limbs;
pub mod number;
pub mod parse;
pub mod print;
pub mod signal;

pub use error::NumError;
pub use number::Number;
pub use parse::ParseNumError;
pub use signal::Signal;

#[cfg(test)]
mod tests;
