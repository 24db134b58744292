//! Type references as seen by the synthesis engine.
//!
//! The host resolves every declared type before synthesis runs; a
//! `TypeRef` is that resolved shape, reduced to what copy-strategy
//! resolution cares about.

use crate::{ClassId, Name};

/// Built-in scalar types. Always copied by identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Int,
    Long,
    Float,
    Double,
    Bool,
    Char,
    Byte,
}

impl Primitive {
    /// Display name used when rendering generated functions.
    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::Int => "Int",
            Primitive::Long => "Long",
            Primitive::Float => "Float",
            Primitive::Double => "Double",
            Primitive::Bool => "Bool",
            Primitive::Char => "Char",
            Primitive::Byte => "Byte",
        }
    }
}

/// Recognized container shapes.
///
/// Whether a shape is actually copied element-wise depends on the helper
/// registry, not on this enum.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContainerShape {
    /// Ordered sequence: `List<T>`.
    List,
    /// Unordered collection: `Set<T>`.
    Set,
    /// Key-value mapping: `Map<K, V>`.
    Map,
    /// Fixed-size sequence: `Array<T>`.
    Array,
}

impl ContainerShape {
    /// All shapes, in registry order.
    pub const ALL: &'static [ContainerShape] = &[
        ContainerShape::List,
        ContainerShape::Set,
        ContainerShape::Map,
        ContainerShape::Array,
    ];

    /// Number of type arguments the shape takes.
    pub fn arity(self) -> usize {
        match self {
            ContainerShape::Map => 2,
            ContainerShape::List | ContainerShape::Set | ContainerShape::Array => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContainerShape::List => "List",
            ContainerShape::Set => "Set",
            ContainerShape::Map => "Map",
            ContainerShape::Array => "Array",
        }
    }
}

/// A resolved type reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Built-in scalar.
    Primitive(Primitive),
    /// Immutable text.
    Text,
    /// A user class, possibly generic.
    Class { id: ClassId, args: Vec<TypeRef> },
    /// A standard container.
    Container {
        shape: ContainerShape,
        args: Vec<TypeRef>,
    },
    /// A class-level type parameter (`T`).
    Param(Name),
    /// `T?`: the inner type or null.
    Nullable(Box<TypeRef>),
    /// The universal top type (`Any`). Type parameters erase to this.
    Top,
}

impl TypeRef {
    /// Shorthand for a non-generic class reference.
    pub fn class(id: ClassId) -> Self {
        TypeRef::Class {
            id,
            args: Vec::new(),
        }
    }

    /// Shorthand for a container reference.
    pub fn container(shape: ContainerShape, args: Vec<TypeRef>) -> Self {
        TypeRef::Container { shape, args }
    }

    /// Shorthand for `List<elem>`.
    pub fn list(elem: TypeRef) -> Self {
        Self::container(ContainerShape::List, vec![elem])
    }

    /// Wrap in `Nullable`, leaving already-nullable types alone.
    #[must_use]
    pub fn nullable(self) -> Self {
        match self {
            TypeRef::Nullable(_) => self,
            other => TypeRef::Nullable(Box::new(other)),
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeRef::Nullable(_))
    }

    /// The type with any nullable wrappers removed.
    pub fn non_null(&self) -> &TypeRef {
        let mut ty = self;
        while let TypeRef::Nullable(inner) = ty {
            ty = inner;
        }
        ty
    }

    /// The class this reference names, looking through nullability.
    pub fn class_id(&self) -> Option<ClassId> {
        match self.non_null() {
            TypeRef::Class { id, .. } => Some(*id),
            _ => None,
        }
    }
}
