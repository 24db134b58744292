//! Synthesis configuration and the per-unit feature flag.

use dcopy_ir::{CopyKind, Name, StringInterner};
use rustc_hash::FxHashSet;

/// Environment variable listing units with synthesis disabled
/// (comma separated).
pub const DISABLED_UNITS_VAR: &str = "DCOPY_DISABLED_UNITS";

/// Environment variable for the default state of units not listed
/// anywhere (`on` or `off`).
pub const DEFAULT_VAR: &str = "DCOPY_DEFAULT";

/// Reserved names the generated functions are attached under.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReservedNames {
    /// Copy-with-overrides (opted-in aggregates).
    pub with_overrides: Name,
    /// Parameterless deep copy (classes declaring the copy capability).
    pub direct: Name,
}

impl ReservedNames {
    pub fn new(interner: &StringInterner) -> Self {
        ReservedNames {
            with_overrides: interner.intern("deep_copy_with"),
            direct: interner.intern("deep_copy"),
        }
    }

    /// The name a function of `kind` is attached under.
    pub fn for_kind(self, kind: CopyKind) -> Name {
        match kind {
            CopyKind::WithOverrides => self.with_overrides,
            CopyKind::Direct => self.direct,
        }
    }
}

/// Per-compilation-unit enablement lookup.
pub trait FeatureGate {
    fn is_enabled(&self, unit: Name) -> bool;
}

impl<F: Fn(Name) -> bool> FeatureGate for F {
    fn is_enabled(&self, unit: Name) -> bool {
        self(unit)
    }
}

/// Engine configuration.
#[derive(Clone, Debug)]
pub struct SynthConfig {
    pub names: ReservedNames,
    /// State of units not mentioned in either set.
    pub enabled_by_default: bool,
    pub enabled_units: FxHashSet<Name>,
    pub disabled_units: FxHashSet<Name>,
}

impl SynthConfig {
    /// Synthesis enabled everywhere, default reserved names.
    pub fn new(interner: &StringInterner) -> Self {
        SynthConfig {
            names: ReservedNames::new(interner),
            enabled_by_default: true,
            enabled_units: FxHashSet::default(),
            disabled_units: FxHashSet::default(),
        }
    }

    /// Read `DCOPY_DEFAULT` and `DCOPY_DISABLED_UNITS`.
    pub fn from_env(interner: &StringInterner) -> Self {
        let default = std::env::var(DEFAULT_VAR).ok();
        let disabled = std::env::var(DISABLED_UNITS_VAR).ok();
        Self::from_vars(interner, default.as_deref(), disabled.as_deref())
    }

    /// Build from raw variable values. Unrecognized default values leave
    /// synthesis enabled.
    pub fn from_vars(
        interner: &StringInterner,
        default: Option<&str>,
        disabled_units: Option<&str>,
    ) -> Self {
        let mut config = Self::new(interner);
        if let Some(value) = default {
            match value.trim().to_ascii_lowercase().as_str() {
                "off" | "0" | "false" => config.enabled_by_default = false,
                "on" | "1" | "true" => config.enabled_by_default = true,
                other => tracing::warn!(value = other, var = DEFAULT_VAR, "ignoring unrecognized value"),
            }
        }
        for unit in disabled_units
            .into_iter()
            .flat_map(|list| list.split(','))
            .map(str::trim)
            .filter(|unit| !unit.is_empty())
        {
            config.disabled_units.insert(interner.intern(unit));
        }
        config
    }

    #[must_use]
    pub fn disable_unit(mut self, unit: Name) -> Self {
        self.enabled_units.remove(&unit);
        self.disabled_units.insert(unit);
        self
    }

    #[must_use]
    pub fn enable_unit(mut self, unit: Name) -> Self {
        self.disabled_units.remove(&unit);
        self.enabled_units.insert(unit);
        self
    }
}

impl FeatureGate for SynthConfig {
    fn is_enabled(&self, unit: Name) -> bool {
        if self.disabled_units.contains(&unit) {
            return false;
        }
        self.enabled_by_default || self.enabled_units.contains(&unit)
    }
}
