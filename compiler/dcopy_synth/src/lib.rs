//! Deep-copy function synthesis.
//!
//! Given a compilation unit's resolved class graph, generates per-class
//! deep-copy functions:
//! - **Path A** (`deep_copy_with`): copy-with-overrides for aggregates
//!   carrying the opt-in marker
//! - **Path B** (`deep_copy`): parameterless deep copy for aggregates that
//!   declare the copy capability
//!
//! # Pipeline
//!
//! ```text
//! Driver ──▶ Synthesizer ──▶ Resolver ──▶ Classifier ──▶ ClassModel
//!               │                             │
//!               └──▶ access_expression        └──▶ ContainerRegistry
//! ```
//!
//! Classification depends only on each class's declared shape and the
//! feature gate, never on what has been attached so far, so the order in
//! which classes are processed does not change the result.

mod access;
mod classify;
mod config;
mod driver;
mod error;
mod registry;
mod resolve;
mod stack;
mod synthesize;

#[cfg(test)]
mod test_helpers;

pub use access::{access_expression, AccessPath};
pub use classify::{ClassCapabilities, Classifier};
pub use config::{FeatureGate, ReservedNames, SynthConfig, DEFAULT_VAR, DISABLED_UNITS_VAR};
pub use driver::{ClassOutcome, Driver, OutcomeStatus, PassReport, SkipReason};
pub use error::SynthError;
pub use registry::ContainerRegistry;
pub use resolve::Resolver;
pub use stack::ensure_sufficient_stack;
pub use synthesize::{emit_copy, Synthesizer};
