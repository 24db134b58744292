//! Diagnostic queue for collecting, deduplicating, and sorting diagnostics.
//!
//! One queue collects everything a synthesis pass reports. Faults are
//! isolated per class, so the queue may hold errors for many classes; every
//! one of them is kept.

use rustc_hash::FxHashSet;

use crate::{Diagnostic, ErrorGuaranteed};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Drop diagnostics identical in code, message, labels and notes.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig { deduplicate: true }
    }
}

impl DiagnosticConfig {
    /// Keep every diagnostic, duplicates included (for testing).
    pub fn keep_duplicates() -> Self {
        DiagnosticConfig { deduplicate: false }
    }
}

/// Queue of diagnostics for one pass.
#[derive(Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    seen: FxHashSet<Diagnostic>,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            seen: FxHashSet::default(),
            config,
        }
    }

    /// Add an error diagnostic and return proof that an error was emitted.
    ///
    /// The proof holds even if the diagnostic itself was deduplicated: an
    /// identical error is already in the queue.
    pub fn emit_error(&mut self, diagnostic: Diagnostic) -> ErrorGuaranteed {
        if !self.config.deduplicate || self.seen.insert(diagnostic.clone()) {
            self.diagnostics.push(diagnostic);
        }
        ErrorGuaranteed::new_unchecked()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take all diagnostics, sorted by primary span start. Spanless
    /// diagnostics sort last; ties keep insertion order.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut out = std::mem::take(&mut self.diagnostics);
        self.seen.clear();
        out.sort_by_key(|d| d.primary_span().map_or(u32::MAX, |s| s.start));
        out
    }
}
