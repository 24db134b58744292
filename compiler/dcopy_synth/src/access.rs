//! Field access selection.

use dcopy_ir::{ExprArena, ExprId, ExprKind, FieldDescriptor, Modality, Storage};

/// How a field is read.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccessPath {
    /// Read the backing slot directly.
    Storage,
    /// Call the field's accessor.
    Accessor,
}

impl AccessPath {
    /// Direct reads only for final fields with backing storage; anything a
    /// subclass could override goes through the accessor.
    pub fn for_field(field: &FieldDescriptor) -> Self {
        match (field.storage, field.modality) {
            (Storage::Backed, Modality::Final) => AccessPath::Storage,
            _ => AccessPath::Accessor,
        }
    }
}

/// Allocate an expression reading `field` from `receiver`.
pub fn access_expression(arena: &mut ExprArena, field: &FieldDescriptor, receiver: ExprId) -> ExprId {
    let kind = match AccessPath::for_field(field) {
        AccessPath::Storage => ExprKind::FieldRead {
            receiver,
            field: field.name,
        },
        AccessPath::Accessor => ExprKind::GetterCall {
            receiver,
            field: field.name,
        },
    };
    arena.alloc(kind)
}
