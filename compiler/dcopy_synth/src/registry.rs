//! Container-helper registry.
//!
//! A fixed table from container shape to the element-wise copy helper.
//! Recognizing a new container means adding a row here; the resolver does
//! not special-case shapes.

use dcopy_ir::{ContainerShape, Name, StringInterner};
use rustc_hash::FxHashMap;

/// Registry of element-wise copy helpers.
#[derive(Clone, Debug, Default)]
pub struct ContainerRegistry {
    helpers: FxHashMap<ContainerShape, Name>,
}

impl ContainerRegistry {
    /// An empty registry: every container copies by identity.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard helpers for all four shapes.
    pub fn with_defaults(interner: &StringInterner) -> Self {
        let mut registry = Self::empty();
        for &shape in ContainerShape::ALL {
            let helper = match shape {
                ContainerShape::List => "deep_copy_list",
                ContainerShape::Set => "deep_copy_set",
                ContainerShape::Map => "deep_copy_map",
                ContainerShape::Array => "deep_copy_array",
            };
            registry.register(shape, interner.intern(helper));
        }
        registry
    }

    /// Register (or replace) the helper for a shape.
    pub fn register(&mut self, shape: ContainerShape, helper: Name) -> Option<Name> {
        self.helpers.insert(shape, helper)
    }

    pub fn helper(&self, shape: ContainerShape) -> Option<Name> {
        self.helpers.get(&shape).copied()
    }

    /// The shape a helper name was registered for.
    pub fn shape_of(&self, helper: Name) -> Option<ContainerShape> {
        self.helpers
            .iter()
            .find(|(_, name)| **name == helper)
            .map(|(shape, _)| *shape)
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }
}
