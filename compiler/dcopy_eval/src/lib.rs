//! Interpreter for synthesized deep-copy functions.
//!
//! Executes the functions a synthesis pass attached to a class graph against
//! runtime [`Value`]s, so copy semantics (fresh instances, shared immutable
//! data, overrides) can be observed directly.

mod errors;
mod interpreter;
mod value;

pub use errors::EvalError;
pub use interpreter::Interpreter;
pub use value::{Heap, Object, Value};

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;
