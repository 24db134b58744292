//! Per-unit synthesis pass.
//!
//! The driver is the only component that writes to the class graph. A pass
//! first plans and synthesizes every function against the read-only model,
//! then attaches them in class order. Faults are isolated per class: a
//! failing class is reported and the pass moves on.

use std::fmt;

use dcopy_diagnostic::{DiagnosticQueue, ErrorCode, ErrorGuaranteed};
use dcopy_ir::{
    Capabilities, ClassDescriptor, ClassId, ClassModel, ClassSink, CopyKind, GeneratedFunction,
    StringInterner,
};

use crate::{
    Classifier, ContainerRegistry, FeatureGate, Resolver, SynthConfig, SynthError, Synthesizer,
};

/// Why a path was not synthesized for a class.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The unit's feature flag is off.
    Disabled,
    /// No canonical constructor.
    NoConstructor,
    /// The reserved function already exists, by hand or from an earlier pass.
    AlreadyDefined,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::Disabled => "disabled",
            SkipReason::NoConstructor => "no constructor",
            SkipReason::AlreadyDefined => "already defined",
        }
    }
}

/// Result of one path for one class.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OutcomeStatus {
    Synthesized,
    Skipped(SkipReason),
    /// Reported with this code; nothing was attached.
    Failed(ErrorCode),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassOutcome {
    pub class: ClassId,
    pub path: CopyKind,
    pub status: OutcomeStatus,
}

/// Summary of one driver pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassReport {
    outcomes: Vec<ClassOutcome>,
    errors: Option<ErrorGuaranteed>,
}

impl PassReport {
    /// Outcomes in class order, Path A before Path B within a class.
    pub fn outcomes(&self) -> &[ClassOutcome] {
        &self.outcomes
    }

    pub fn outcome(&self, class: ClassId, path: CopyKind) -> Option<OutcomeStatus> {
        self.outcomes
            .iter()
            .find(|o| o.class == class && o.path == path)
            .map(|o| o.status)
    }

    pub fn synthesized_count(&self) -> usize {
        self.count(|s| matches!(s, OutcomeStatus::Synthesized))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|s| matches!(s, OutcomeStatus::Skipped(_)))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|s| matches!(s, OutcomeStatus::Failed(_)))
    }

    /// `Err` if any class failed; the failure was reported to the queue.
    pub fn check(&self) -> Result<(), ErrorGuaranteed> {
        match self.errors {
            Some(guar) => Err(guar),
            None => Ok(()),
        }
    }

    fn count(&self, pred: impl Fn(OutcomeStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o.status)).count()
    }

    fn record(&mut self, class: ClassId, path: CopyKind, status: OutcomeStatus) -> usize {
        self.outcomes.push(ClassOutcome {
            class,
            path,
            status,
        });
        self.outcomes.len() - 1
    }

    fn fail(&mut self, queue: &mut DiagnosticQueue, err: &SynthError) -> OutcomeStatus {
        self.errors = Some(queue.emit_error(err.to_diagnostic()));
        OutcomeStatus::Failed(err.code())
    }
}

impl fmt::Display for PassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} synthesized, {} skipped, {} failed",
            self.synthesized_count(),
            self.skipped_count(),
            self.failed_count()
        )
    }
}

/// Runs synthesis over one compilation unit's class graph.
pub struct Driver<'a> {
    config: &'a SynthConfig,
    registry: &'a ContainerRegistry,
    interner: &'a StringInterner,
}

impl<'a> Driver<'a> {
    pub fn new(
        config: &'a SynthConfig,
        registry: &'a ContainerRegistry,
        interner: &'a StringInterner,
    ) -> Self {
        Driver {
            config,
            registry,
            interner,
        }
    }

    /// Run one pass. Running again over the same graph is a no-op: every
    /// path then reports [`SkipReason::AlreadyDefined`].
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run<M>(&self, model: &mut M, queue: &mut DiagnosticQueue) -> PassReport
    where
        M: ClassModel + ClassSink,
    {
        let mut report = PassReport::default();
        let pending = self.plan(&*model, &mut report, queue);

        for (slot, function) in pending {
            let (class, name) = (function.owner, function.name);
            if let Err(source) = model.attach(function) {
                let err = SynthError::AttachRejected {
                    class: self.class_name(&*model, class),
                    function: self.interner.lookup(name).to_owned(),
                    source,
                };
                tracing::debug!(%err, "attach rejected");
                let status = report.fail(queue, &err);
                report.outcomes[slot].status = status;
            }
        }

        tracing::debug!(%report, "pass finished");
        report
    }

    /// Synthesize against the read-only graph. Returns the functions to
    /// attach, each with the index of its outcome in `report`.
    fn plan<M: ClassModel + ?Sized>(
        &self,
        model: &M,
        report: &mut PassReport,
        queue: &mut DiagnosticQueue,
    ) -> Vec<(usize, GeneratedFunction)> {
        let names = self.config.names;
        let classifier = Classifier::new(model, self.config, names, self.registry);
        let mut synth = Synthesizer::new(Resolver::new(classifier), names, self.interner);
        let mut pending = Vec::new();

        for id in model.class_ids() {
            let Some(class) = model.class(id) else {
                continue;
            };
            let paths = candidate_paths(class);
            if paths.is_empty() {
                continue;
            }
            let _span = tracing::debug_span!("class", name = self.interner.lookup(class.name))
                .entered();

            if !self.config.is_enabled(class.unit) {
                tracing::debug!("unit disabled, skipping");
                for &path in &paths {
                    report.record(id, path, OutcomeStatus::Skipped(SkipReason::Disabled));
                }
                continue;
            }
            // A function that already exists is never replaced, and its
            // class is not validated on its behalf.
            let defined: Vec<CopyKind> = paths
                .iter()
                .copied()
                .filter(|&path| model.defines_function(id, names.for_kind(path)))
                .collect();

            // Shared by every remaining path: a malformed constructor is
            // reported once for the class.
            let blocked = if defined.len() == paths.len() {
                None
            } else if class.constructor.is_none() {
                tracing::debug!("no canonical constructor, skipping");
                Some(OutcomeStatus::Skipped(SkipReason::NoConstructor))
            } else if let Err(err) = synth.mapped_fields(class) {
                tracing::debug!(%err, "malformed constructor");
                Some(report.fail(queue, &err))
            } else {
                None
            };

            for &path in &paths {
                if defined.contains(&path) {
                    tracing::debug!(path = path.as_str(), "already defined, skipping");
                    report.record(id, path, OutcomeStatus::Skipped(SkipReason::AlreadyDefined));
                    continue;
                }
                if let Some(status) = blocked {
                    report.record(id, path, status);
                    continue;
                }
                match synth.synthesize(class, path) {
                    Ok(function) => {
                        let slot = report.record(id, path, OutcomeStatus::Synthesized);
                        pending.push((slot, function));
                    }
                    Err(err) => {
                        tracing::debug!(%err, path = path.as_str(), "synthesis failed");
                        let status = report.fail(queue, &err);
                        report.record(id, path, status);
                    }
                }
            }
        }
        pending
    }

    fn class_name<M: ClassModel + ?Sized>(&self, model: &M, id: ClassId) -> String {
        model
            .class(id)
            .map_or_else(|| format!("#{}", id.raw()), |c| self.interner.lookup(c.name).to_owned())
    }
}

/// Paths a class asks for: Path A through the opt-in marker, Path B through
/// the declared capability.
fn candidate_paths(class: &ClassDescriptor) -> Vec<CopyKind> {
    let mut paths = Vec::with_capacity(2);
    if class.opt_in {
        paths.push(CopyKind::WithOverrides);
    }
    if class.declared.contains(Capabilities::SELF_COPYABLE) {
        paths.push(CopyKind::Direct);
    }
    paths
}
