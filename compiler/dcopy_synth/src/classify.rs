//! Capability classification.
//!
//! Capabilities are derived from a type's own declared shape only, never
//! from whether synthesis already ran for some other class, so classes can
//! be processed in any order. Results are memoized per class for the
//! duration of one pass.

use dcopy_ir::{
    Capabilities, ClassDescriptor, ClassId, ClassModel, FunctionKind, Name, TypeRef,
};
use rustc_hash::FxHashMap;

use crate::{ContainerRegistry, FeatureGate, ReservedNames};

/// Capabilities of one class together with the functions that realize them.
///
/// Invariant: `SELF_COPYABLE` is set iff `deep_copy` is `Some`, and
/// `SHALLOW_COPYABLE` iff `shallow_copy` is `Some`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ClassCapabilities {
    pub caps: Capabilities,
    /// Target of a recursive copy call.
    pub deep_copy: Option<Name>,
    /// Target of a shallow copy call.
    pub shallow_copy: Option<Name>,
}

/// Classifies type references against one class graph.
pub struct Classifier<'a, M: ClassModel + ?Sized> {
    model: &'a M,
    gate: &'a dyn FeatureGate,
    names: ReservedNames,
    registry: &'a ContainerRegistry,
    memo: FxHashMap<ClassId, ClassCapabilities>,
}

impl<'a, M: ClassModel + ?Sized> Classifier<'a, M> {
    pub fn new(
        model: &'a M,
        gate: &'a dyn FeatureGate,
        names: ReservedNames,
        registry: &'a ContainerRegistry,
    ) -> Self {
        Classifier {
            model,
            gate,
            names,
            registry,
            memo: FxHashMap::default(),
        }
    }

    pub fn model(&self) -> &'a M {
        self.model
    }

    pub fn registry(&self) -> &'a ContainerRegistry {
        self.registry
    }

    /// Capability set of a type reference. Nullability is looked through.
    pub fn classify(&mut self, ty: &TypeRef) -> Capabilities {
        match ty.non_null() {
            TypeRef::Class { id, .. } => self.class_capabilities(*id).caps,
            TypeRef::Container { shape, .. } => {
                if self.registry.helper(*shape).is_some() {
                    Capabilities::CONTAINER_COPYABLE
                } else {
                    Capabilities::empty()
                }
            }
            TypeRef::Primitive(_)
            | TypeRef::Text
            | TypeRef::Param(_)
            | TypeRef::Top
            | TypeRef::Nullable(_) => Capabilities::empty(),
        }
    }

    /// Capabilities of a class, memoized by id. Classes outside the graph
    /// have none.
    pub fn class_capabilities(&mut self, id: ClassId) -> ClassCapabilities {
        if let Some(info) = self.memo.get(&id) {
            return *info;
        }
        let info = match self.model.class(id) {
            Some(class) => self.compute(class),
            None => {
                tracing::trace!(class = id.raw(), "class outside unit, no capabilities");
                ClassCapabilities::default()
            }
        };
        self.memo.insert(id, info);
        info
    }

    fn compute(&self, class: &ClassDescriptor) -> ClassCapabilities {
        let aggregate = class.has_field_mapped_constructor();
        let enabled = self.gate.is_enabled(class.unit);

        let will_synthesize = aggregate && enabled;
        let has_with_overrides =
            self.reserved_copy(class, self.names.with_overrides, will_synthesize && class.opt_in);
        let has_direct = self.reserved_copy(
            class,
            self.names.direct,
            will_synthesize && class.declared.contains(Capabilities::SELF_COPYABLE),
        );

        let deep_copy = if has_with_overrides {
            Some(self.names.with_overrides)
        } else if let Some(f) = class.function_of_kind(FunctionKind::DeepCopyWithOverrides) {
            Some(f.name)
        } else if has_direct {
            Some(self.names.direct)
        } else {
            class.function_of_kind(FunctionKind::DeepCopy).map(|f| f.name)
        };

        let shallow_copy = if aggregate {
            class
                .function_of_kind(FunctionKind::ShallowCopy)
                .map(|f| f.name)
        } else {
            None
        };

        let mut caps = Capabilities::empty();
        caps.set(Capabilities::AGGREGATE, aggregate);
        caps.set(Capabilities::SELF_COPYABLE, deep_copy.is_some());
        caps.set(Capabilities::SHALLOW_COPYABLE, shallow_copy.is_some());

        tracing::trace!(class = class.id.raw(), ?caps, "classified");
        ClassCapabilities {
            caps,
            deep_copy,
            shallow_copy,
        }
    }

    /// Whether the reserved function `name` is a deep copy of `class`.
    ///
    /// A host function under a reserved name blocks synthesis, so it counts
    /// only when declared as a deep copy. Otherwise the function exists if an
    /// earlier pass attached it or this pass will synthesize it.
    fn reserved_copy(&self, class: &ClassDescriptor, name: Name, synthesized: bool) -> bool {
        match class.function(name) {
            Some(decl) => matches!(
                decl.kind,
                FunctionKind::DeepCopy | FunctionKind::DeepCopyWithOverrides
            ),
            None => synthesized || self.model.generated(class.id, name).is_some(),
        }
    }

    /// Number of memoized classes.
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Test code uses expect for clarity")]
mod tests;
