//! Synthesis faults.
//!
//! Ineligible classes are not errors; they are skipped by the driver.
//! Everything here aborts synthesis for one class and is reported as a
//! diagnostic; other classes continue.

use dcopy_diagnostic::{Diagnostic, ErrorCode};
use dcopy_ir::{AttachError, ClassId, Span};

/// A fault detected while synthesizing for one class.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SynthError {
    /// A constructor parameter names no field of the class.
    #[error("constructor parameter `{param}` of `{class}` does not map to any field")]
    UnmappedParameter {
        class: String,
        param: String,
        span: Span,
        class_span: Span,
    },

    /// Two constructor parameters name the same field.
    #[error("constructor of `{class}` maps field `{param}` more than once")]
    DuplicateParameter {
        class: String,
        param: String,
        span: Span,
        class_span: Span,
    },

    /// Synthesis was requested for a class without a canonical constructor.
    #[error("`{class}` has no canonical constructor")]
    NoConstructor { class: String, class_span: Span },

    /// The classifier reported a capability without a function to call.
    #[error("class {} is classified {capability} but names no copy function", .class.raw())]
    InconsistentCapabilities {
        class: ClassId,
        capability: &'static str,
    },

    /// The model refused a generated function.
    #[error("could not attach `{function}` to `{class}`: {source}")]
    AttachRejected {
        class: String,
        function: String,
        source: AttachError,
    },
}

impl SynthError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SynthError::UnmappedParameter { .. } => ErrorCode::E1001,
            SynthError::DuplicateParameter { .. } => ErrorCode::E1002,
            SynthError::InconsistentCapabilities { .. } | SynthError::AttachRejected { .. } => {
                ErrorCode::E9001
            }
            SynthError::NoConstructor { .. } => ErrorCode::E9002,
        }
    }

    /// Convert into a diagnostic reported against the class.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            SynthError::UnmappedParameter {
                class,
                span,
                class_span,
                ..
            } => diag
                .with_label(*span, "parameter declared here")
                .with_secondary_label(*class_span, format!("in class `{class}`"))
                .with_note("every canonical constructor parameter must name a field of the same name"),
            SynthError::DuplicateParameter {
                class,
                span,
                class_span,
                ..
            } => diag
                .with_label(*span, "second parameter for this field")
                .with_secondary_label(*class_span, format!("in class `{class}`"))
                .with_note("each field may be initialized by at most one constructor parameter"),
            SynthError::NoConstructor { class_span, .. } => diag
                .with_label(*class_span, "class declared here")
                .with_note("this is an engine bug: ineligible classes should have been skipped"),
            SynthError::InconsistentCapabilities { .. } | SynthError::AttachRejected { .. } => {
                diag.with_note("this is an engine bug, not a problem in the input")
            }
        }
    }
}
