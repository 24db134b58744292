//! Compilation session.

use dcopy_diagnostic::{emitter, Diagnostic, DiagnosticConfig, DiagnosticQueue, ErrorGuaranteed};
use dcopy_eval::Interpreter;
use dcopy_ir::{ClassId, ClassModel, ClassSink, GeneratedFunction, Renderer, StringInterner};
use dcopy_synth::{ContainerRegistry, Driver, PassReport, SynthConfig};

/// State shared by every unit of one compilation.
pub struct Session {
    interner: StringInterner,
    config: SynthConfig,
    registry: ContainerRegistry,
    diagnostics: DiagnosticConfig,
}

impl Session {
    /// Synthesis enabled for every unit, standard container helpers.
    pub fn new() -> Self {
        let interner = StringInterner::new();
        let config = SynthConfig::new(&interner);
        Self::with_config(interner, config)
    }

    /// Like [`Session::new`], with the feature flags read from the
    /// environment.
    pub fn from_env() -> Self {
        let interner = StringInterner::new();
        let config = SynthConfig::from_env(&interner);
        Self::with_config(interner, config)
    }

    pub fn with_config(interner: StringInterner, config: SynthConfig) -> Self {
        let registry = ContainerRegistry::with_defaults(&interner);
        Session {
            interner,
            config,
            registry,
            diagnostics: DiagnosticConfig::default(),
        }
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SynthConfig {
        &mut self.config
    }

    pub fn registry_mut(&mut self) -> &mut ContainerRegistry {
        &mut self.registry
    }

    pub fn set_diagnostic_config(&mut self, config: DiagnosticConfig) {
        self.diagnostics = config;
    }

    /// Run one synthesis pass over a unit's class graph.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run_unit<M: ClassModel + ClassSink>(&self, model: &mut M) -> UnitResult {
        let mut queue = DiagnosticQueue::with_config(self.diagnostics.clone());
        let report =
            Driver::new(&self.config, &self.registry, &self.interner).run(model, &mut queue);
        let diagnostics = queue.flush();
        if !diagnostics.is_empty() {
            tracing::debug!(count = diagnostics.len(), "unit produced diagnostics");
        }
        UnitResult {
            report,
            diagnostics,
        }
    }

    /// Interpreter over a unit's class graph, typically after `run_unit`.
    pub fn interpreter<'s, M: ClassModel + ?Sized>(
        &'s self,
        model: &'s M,
    ) -> Interpreter<'s, M> {
        Interpreter::new(model, &self.config, &self.registry, &self.interner)
    }

    pub fn render<M: ClassModel + ?Sized>(
        &self,
        model: &M,
        function: &GeneratedFunction,
    ) -> String {
        Renderer::new(model, &self.interner).function(function)
    }

    /// Render every function a pass attached to `class`, Path A first.
    pub fn render_attached<M: ClassModel + ?Sized>(
        &self,
        model: &M,
        class: ClassId,
    ) -> Vec<String> {
        let names = self.config.names;
        [names.with_overrides, names.direct]
            .into_iter()
            .filter_map(|name| model.generated(class, name))
            .map(|function| self.render(model, function))
            .collect()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one unit's pass.
#[derive(Clone, Debug)]
pub struct UnitResult {
    pub report: PassReport,
    /// Sorted by source position.
    pub diagnostics: Vec<Diagnostic>,
}

impl UnitResult {
    /// `Err` if any class failed.
    pub fn check(&self) -> Result<(), ErrorGuaranteed> {
        self.report.check()
    }

    /// Diagnostics as plain text.
    pub fn render_diagnostics(&self) -> String {
        emitter::render_to_string(&self.diagnostics)
    }
}
