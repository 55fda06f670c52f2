//! L4: comparison and request-size estimation (spec §4.11).
//!
//! The C engine's `binary()` wrapper exists to let every arithmetic entry
//! point reuse the same [`crate::number::Number`] for an input and the
//! output, snapshotting the aliased operand before re-initializing the
//! destination. In this crate every operation takes its operands by
//! shared reference and returns a freshly built `Number` — aliasing is
//! structurally impossible, which is exactly the "take by value, return
//! by value" resolution spec §9 calls out for languages with ownership.
//! What's left of L4 here is `cmp` (spec §4.11, §6) and the per-op
//! request-size estimators, used to pre-size buffers before the L2
//! routines fill them in.

use std::cmp::Ordering;

use crate::error::NumError;
use crate::number::Number;
use crate::signal::Signal;

/// Three-way compare, honoring sign and aligning fractional radixes the
/// way `bc_num_cmp` does. Returns [`NumError::Signal`] if `signal` is
/// raised mid-scan — the direct analogue of the C comparator's reserved
/// `BC_NUM_CMP_SIGNAL` sentinel.
pub fn cmp(a: &Number, b: &Number, signal: &Signal) -> Result<Ordering, NumError> {
    if a.is_zero() && b.is_zero() {
        return Ok(Ordering::Equal);
    }
    if a.is_zero() {
        return Ok(if b.neg { Ordering::Greater } else { Ordering::Less });
    }
    if b.is_zero() {
        return Ok(if a.neg { Ordering::Less } else { Ordering::Greater });
    }
    if a.neg != b.neg {
        return Ok(if a.neg { Ordering::Less } else { Ordering::Greater });
    }
    let neg = a.neg;

    let a_int = a.int_len();
    let b_int = b.int_len();
    if a_int != b_int {
        let ord = a_int.cmp(&b_int);
        return Ok(if neg { ord.reverse() } else { ord });
    }

    let a_max = a.rdx > b.rdx;
    let (full_max, min_num, diff) = if a_max {
        (&a.digits[..], &b.digits[..], a.rdx - b.rdx)
    } else {
        (&b.digits[..], &a.digits[..], b.rdx - a.rdx)
    };
    let overlap = full_max.len() - diff;
    let max_num = &full_max[diff..];
    debug_assert_eq!(overlap, min_num.len());

    let ord = crate::limbs::compare(max_num, min_num, overlap, signal)?;
    if ord != Ordering::Equal {
        let flip = a_max == neg;
        return Ok(if flip { ord.reverse() } else { ord });
    }

    for &limb in &full_max[..diff] {
        signal.check()?;
        if limb != 0 {
            let flip = a_max == neg;
            return Ok(if flip { Ordering::Less } else { Ordering::Greater });
        }
    }

    Ok(Ordering::Equal)
}

/// Upper bound on the limb count `add`/`sub` can produce.
pub(crate) fn add_req(a: &Number, b: &Number) -> usize {
    let rdx = a.rdx.max(b.rdx);
    let int = a.int_len().max(b.int_len());
    rdx + int + 1
}

/// Upper bound on the limb count `mul` can produce.
pub(crate) fn mul_req(a: &Number, b: &Number, scale: usize) -> usize {
    let rdx = a.rdx + b.rdx;
    let max = crate::number::rdx_of_scale(scale).max(rdx) + 1;
    a.int_len() + b.int_len() + max
}

/// Upper bound on the limb count `pow` can produce before truncation.
pub(crate) fn pow_req(a: &Number, reps: u64) -> usize {
    (a.len() as u64 * reps.max(1) + 1) as usize
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        cmp(self, other, &Signal::new()) == Ok(Ordering::Equal)
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    /// Infallible ordering that never observes an abort signal. For a
    /// cancellable compare on a long-running call, use [`cmp`] directly.
    fn cmp(&self, other: &Self) -> Ordering {
        cmp(self, other, &Signal::new()).expect("Signal::new() is never raised")
    }
}
