//! Cooperative abort signaling (spec §5).
//!
//! The C engine polls a process-global `BC_SIG` flag at every inner loop
//! head. A shared, cloneable handle backed by an `AtomicBool` is the
//! direct Rust analogue: callers that want to cancel a running operation
//! from another thread (or a signal handler via `signal_hook`) raise it,
//! and every inner loop in [`crate::arith`], [`crate::parse`], and
//! [`crate::print`] checks it between limb-sized units of work.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::NumError;

/// A cooperatively polled abort flag, shared by clone.
///
/// Cloning a `Signal` shares the same underlying flag (`Arc`), so raising
/// it from one clone is observed by every other clone and by the engine
/// call that was given one. A fresh [`Signal::new`] starts cleared.
#[derive(Debug, Clone, Default)]
pub struct Signal(Arc<AtomicBool>);

impl Signal {
    /// A new, unraised signal.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Request that any operation polling this signal abort.
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Clear a previously raised signal so it can be reused.
    pub fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    /// True if [`Signal::raise`] was called and not yet cleared.
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Poll the flag, converting a raised signal into [`NumError::Signal`].
    ///
    /// Called at every inner-loop head named in spec §5: digit-array
    /// add/sub/mul/div, the compare scan, Karatsuba recursion entry, the
    /// long-division loops, the Newton iteration, square-and-multiply,
    /// and the parse/print character loops.
    pub(crate) fn check(&self) -> Result<(), NumError> {
        if self.is_raised() {
            tracing::warn!("operation aborted: signal observed");
            Err(NumError::Signal)
        } else {
            Ok(())
        }
    }
}
