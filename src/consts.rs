//! Compile-time configuration constants for the decimal engine.
//!
//! Mirrors the `#define`s at the top of `bc`'s `num.c`: a single limb
//! holds [`BASE_DIGS`] decimal digits, and [`BASE_POW`] is the limb radix.

/// Decimal digits packed into a single limb.
pub const BASE_DIGS: usize = 9;

/// Limb radix, `10^BASE_DIGS`. Every limb satisfies `0 <= limb < BASE_POW`.
pub const BASE_POW: u32 = 1_000_000_000;

/// Minimum limb capacity a freshly constructed [`crate::Number`] reserves.
pub const MIN_CAP: usize = 4;

/// Operand length (in limbs) above which `mul` switches from schoolbook
/// to Karatsuba.
pub const KARATSUBA_LEN: usize = 32;

/// Default maximum input base in POSIX mode (letters disabled beyond hex).
pub const MAX_IBASE: u32 = 16;

/// Maximum input base when extended digits (`A`..`Z`) are enabled.
pub const MAX_IBASE_EXTENDED: u32 = 36;

/// Maximum output (print) base.
pub const MAX_OBASE: u32 = u32::MAX;

/// Maximum base for a single-letter digit constant (`A`..`Z` => 10..35).
pub const MAX_LBASE: u32 = 36;

/// Output line wrap width used by the positional printer.
pub const LINE_LEN: usize = 70;

/// Powers of ten up to `BASE_DIGS`, used by shift/truncate/extend and the
/// long-division quotient-digit corrector.
pub const POW10: [u32; BASE_DIGS + 1] = [
    1, 10, 100, 1_000, 10_000, 100_000, 1_000_000, 10_000_000, 100_000_000, 1_000_000_000,
];

/// Number of decimal digits in `i`, i.e. `floor(log10(i)) + 1` for `i > 0`.
pub fn log10(i: u32) -> usize {
    POW10.iter().rposition(|&p| p <= i).unwrap_or(0) + 1
}
