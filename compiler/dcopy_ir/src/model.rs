//! The host-facing class model interface.
//!
//! The engine depends only on [`ClassModel`] (reads) and [`ClassSink`]
//! (attaching generated functions). [`ClassTable`] is an in-memory
//! implementation that host adapters and tests can populate directly.

use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashMap;

use crate::{ClassDescriptor, ClassId, GeneratedFunction, Name};

/// Read-only view of one compilation unit's resolved class graph.
pub trait ClassModel {
    /// Look up a class by id. `None` for classes outside this graph.
    fn class(&self, id: ClassId) -> Option<&ClassDescriptor>;

    /// All class ids, in a deterministic order.
    fn class_ids(&self) -> Vec<ClassId>;

    /// A function previously attached to `class` under `name`.
    fn generated(&self, class: ClassId, name: Name) -> Option<&GeneratedFunction>;

    /// Whether `class` defines `name`, either by hand or through an earlier
    /// synthesis pass.
    fn defines_function(&self, class: ClassId, name: Name) -> bool {
        self.generated(class, name).is_some()
            || self
                .class(class)
                .is_some_and(|c| c.function(name).is_some())
    }
}

/// Write side of the model: the driver attaches generated functions here.
pub trait ClassSink {
    fn attach(&mut self, function: GeneratedFunction) -> Result<(), AttachError>;
}

/// Error attaching a generated function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttachError {
    /// The owning class is not part of this graph.
    UnknownClass(ClassId),
    /// The class already defines a function with that name.
    AlreadyDefined { class: ClassId, name: Name },
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachError::UnknownClass(id) => write!(f, "class {} is not in this unit", id.raw()),
            AttachError::AlreadyDefined { class, name } => write!(
                f,
                "class {} already defines function {}",
                class.raw(),
                name.raw()
            ),
        }
    }
}

impl std::error::Error for AttachError {}

/// In-memory class graph.
///
/// `BTreeMap` keeps iteration deterministic; attached functions are keyed
/// by `(class, name)`.
#[derive(Clone, Debug, Default)]
pub struct ClassTable {
    classes: BTreeMap<ClassId, ClassDescriptor>,
    attached: FxHashMap<(ClassId, Name), GeneratedFunction>,
    next_id: u32,
}

impl ClassTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a fresh class id. Lets self-referential classes name
    /// themselves before they are inserted.
    pub fn reserve(&mut self) -> ClassId {
        let id = ClassId::from_raw(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert (or replace) a class under its own id.
    pub fn insert(&mut self, class: ClassDescriptor) {
        self.next_id = self.next_id.max(class.id.raw() + 1);
        self.classes.insert(class.id, class);
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// All functions attached to `class`.
    pub fn attached_to(&self, class: ClassId) -> Vec<&GeneratedFunction> {
        let mut fns: Vec<_> = self
            .attached
            .iter()
            .filter(|((owner, _), _)| *owner == class)
            .map(|(_, f)| f)
            .collect();
        fns.sort_by_key(|f| f.name);
        fns
    }

    /// Total number of attached functions.
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }
}

impl ClassModel for ClassTable {
    fn class(&self, id: ClassId) -> Option<&ClassDescriptor> {
        self.classes.get(&id)
    }

    fn class_ids(&self) -> Vec<ClassId> {
        self.classes.keys().copied().collect()
    }

    fn generated(&self, class: ClassId, name: Name) -> Option<&GeneratedFunction> {
        self.attached.get(&(class, name))
    }
}

impl ClassSink for ClassTable {
    fn attach(&mut self, function: GeneratedFunction) -> Result<(), AttachError> {
        let class = function.owner;
        if !self.classes.contains_key(&class) {
            return Err(AttachError::UnknownClass(class));
        }
        if self.defines_function(class, function.name) {
            return Err(AttachError::AlreadyDefined {
                class,
                name: function.name,
            });
        }
        self.attached.insert((class, function.name), function);
        Ok(())
    }
}
