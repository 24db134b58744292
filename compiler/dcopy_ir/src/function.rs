//! Functions produced by the synthesis engine.

use crate::{ClassId, ExprArena, ExprId, Name, TypeRef};

/// Which synthesis path produced a function.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CopyKind {
    /// Copy-with-overrides for opted-in aggregates. One defaulted parameter
    /// per constructor slot.
    WithOverrides,
    /// Parameterless deep copy for classes declaring the copy capability.
    Direct,
}

impl CopyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CopyKind::WithOverrides => "copy-with-overrides",
            CopyKind::Direct => "direct",
        }
    }
}

/// A parameter of a generated function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedParam {
    pub name: Name,
    pub ty: TypeRef,
    /// Evaluated against the receiver when the caller omits the argument.
    pub default: Option<ExprId>,
}

/// A synthesized member function, attached to its owning class.
///
/// The body is a single expression (a constructor call); there are no
/// statements and no locals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFunction {
    pub name: Name,
    pub owner: ClassId,
    pub kind: CopyKind,
    pub params: Vec<GeneratedParam>,
    pub arena: ExprArena,
    pub body: ExprId,
}

impl GeneratedFunction {
    /// Position of the parameter with the given name.
    pub fn param_index(&self, name: Name) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }
}
