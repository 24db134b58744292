//! Diagnostics for the synthesis engine.
//!
//! Every fault the engine reports carries:
//! - An error code for searchability
//! - A message (what went wrong)
//! - A primary span (which declaration)
//! - Notes (why it matters)
//!
//! # Error Guarantees
//!
//! `ErrorGuaranteed` is type-level proof that at least one error was
//! emitted into a `DiagnosticQueue`:
//!
//! ```text
//! let guarantee = queue.emit_error(diagnostic);
//! fn check(&self) -> Result<(), ErrorGuaranteed> { ... }
//! ```

mod diagnostic;
pub mod emitter;
mod error_code;
mod guarantee;
pub mod queue;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
