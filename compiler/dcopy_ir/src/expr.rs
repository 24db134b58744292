//! Expression arena for generated function bodies.
//!
//! Bodies are flat: every sub-expression lives in the owning function's
//! `ExprArena` and is referenced by `ExprId`.

use std::fmt;

use smallvec::SmallVec;

use crate::{ClassId, ContainerShape, ElementCopy, Name, TypeRef};

/// Index of an expression in an [`ExprArena`].
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// Expression node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExprKind {
    /// The receiver instance.
    SelfRef,
    /// The value of the function's `index`-th parameter.
    Param { index: u32 },
    /// Direct read of the field's backing storage.
    FieldRead { receiver: ExprId, field: Name },
    /// Read through the field's accessor.
    GetterCall { receiver: ExprId, field: Name },
    /// Parameterless member call; `null_safe` short-circuits on null.
    MethodCall {
        receiver: ExprId,
        method: Name,
        null_safe: bool,
    },
    /// Container helper call with per-slot element plans.
    HelperCall {
        helper: Name,
        shape: ContainerShape,
        receiver: ExprId,
        elements: SmallVec<[ElementCopy; 2]>,
        null_safe: bool,
    },
    /// Canonical constructor invocation.
    Construct {
        class: ClassId,
        type_args: Vec<TypeRef>,
        args: Vec<ExprId>,
    },
}

/// Arena of expressions owned by one generated function.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExprArena {
    exprs: Vec<ExprKind>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an expression and return its id.
    ///
    /// # Panics
    /// Panics if the arena exceeds `u32::MAX` expressions.
    pub fn alloc(&mut self, kind: ExprKind) -> ExprId {
        let id = u32::try_from(self.exprs.len())
            .unwrap_or_else(|_| panic!("expression arena overflow"));
        self.exprs.push(kind);
        ExprId(id)
    }

    /// Get the expression for an id allocated by this arena.
    pub fn get(&self, id: ExprId) -> Option<&ExprKind> {
        self.exprs.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}
