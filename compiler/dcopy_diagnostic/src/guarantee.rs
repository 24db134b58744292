//! Proof that an error was emitted.

use std::fmt;

/// Type-level proof that at least one error diagnostic was emitted.
///
/// Only obtainable from [`DiagnosticQueue::emit_error`](crate::DiagnosticQueue::emit_error).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    pub(crate) fn new_unchecked() -> Self {
        ErrorGuaranteed(())
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error(s) emitted")
    }
}

impl std::error::Error for ErrorGuaranteed {}
