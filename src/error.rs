//! The engine's error sum type (spec §7): a finite set of math errors plus
//! cooperative-abort signaling.

use thiserror::Error;

/// Every fallible entry point in this crate returns one of these.
///
/// Math errors are detected at operation entry (or at the specific
/// primitive that encounters them) and propagate with no partial result
/// written. [`NumError::Signal`] means the operation observed an abort
/// request (see [`crate::signal::Signal`]) and unwound early; the
/// caller should treat any output it was given as unspecified.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NumError {
    /// Division, remainder, or modulus by zero.
    #[error("divide by zero")]
    DivideByZero,

    /// `sqrt` or `modexp` was asked to operate on a negative number.
    #[error("negative number")]
    Negative,

    /// An operation (e.g. `pow`'s exponent, `modexp`'s inputs, `places`'
    /// count) requires an integer but was given a number with a nonzero
    /// scale.
    #[error("non-integer number")]
    NonInteger,

    /// A `Number` could not be converted into a native unsigned integer
    /// because its magnitude exceeds the target type's range.
    #[error("overflow converting to a native integer")]
    Overflow,

    /// The operation was aborted by a cooperatively polled signal.
    #[error("operation aborted by signal")]
    Signal,
}
