//! Runtime faults.

use dcopy_synth::SynthError;

/// Error raised while executing generated functions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("`{member}` called on null")]
    NullReceiver { member: String },

    #[error("expected an object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("class {0} is not part of the model")]
    UnknownClass(u32),

    #[error("`{class}` has no field `{field}`")]
    NoSuchField { class: String, field: String },

    #[error("`{class}` has no function `{method}`")]
    NoSuchMethod { class: String, method: String },

    /// Host-authored deep copies have no body the interpreter can run.
    #[error("`{class}.{method}` is host-authored and cannot be executed")]
    HostFunction { class: String, method: String },

    #[error("`{function}` has no parameter `{param}`")]
    UnknownParameter { function: String, param: String },

    #[error("`{function}` requires an argument for `{param}`")]
    MissingArgument { function: String, param: String },

    #[error("`{helper}` is not a registered container helper")]
    UnknownHelper { helper: String },

    #[error("`{helper}` expects a {expected}, found {found}")]
    ContainerMismatch {
        helper: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("malformed body in `{function}`")]
    MalformedBody { function: String },

    #[error(transparent)]
    Synth(#[from] SynthError),
}
