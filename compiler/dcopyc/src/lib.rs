//! dcopyc - runs deep-copy synthesis over compilation units.
//!
//! A [`Session`] owns the interner, configuration and container registry
//! shared by every unit of one compilation. Each call to
//! [`Session::run_unit`] performs one synthesis pass over a unit's class
//! graph and returns the pass report together with the diagnostics it
//! produced.
//!
//! # Tracing
//!
//! Call [`init_tracing`] once at startup. Output is enabled by `RUST_LOG`
//! (e.g. `RUST_LOG=dcopy_synth=debug`); setting `DCOPY_LOG_TREE` switches
//! to an indented span tree.

mod session;

use std::sync::Once;

pub use dcopy_diagnostic::{Diagnostic, ErrorCode, ErrorGuaranteed};
pub use dcopy_eval::{EvalError, Interpreter, Value};
pub use dcopy_synth::{OutcomeStatus, PassReport, SkipReason, SynthConfig};
pub use session::{Session, UnitResult};

/// Environment variable selecting the hierarchical span layer.
pub const TREE_VAR: &str = "DCOPY_LOG_TREE";

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let tree = std::env::var_os(TREE_VAR).is_some();
        let hierarchical = tree.then(|| {
            tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true)
        });
        let flat = (!tree).then(|| fmt::layer().with_target(true).with_level(true));

        // Another subscriber may already be installed (e.g. by a host).
        let _ = tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(hierarchical)
            .with(flat)
            .try_init();
    });
}
