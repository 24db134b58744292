//! Read-only class shapes supplied by the host.

use crate::{Capabilities, Name, Span, TypeRef};

/// Identity of a class within one compilation unit's class graph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

impl ClassId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        ClassId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// How a field's value is stored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Storage {
    /// The field has a backing slot that can be read directly.
    #[default]
    Backed,
    /// Only an accessor exists (computed or delegated property).
    AccessorOnly,
}

/// Whether a member can be overridden.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Modality {
    #[default]
    Final,
    Open,
}

/// Visibility of a field or class.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Private,
}

/// One declared field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    pub name: Name,
    pub ty: TypeRef,
    pub storage: Storage,
    pub modality: Modality,
    pub visibility: Visibility,
    pub span: Span,
}

impl FieldDescriptor {
    /// A final, publicly visible field with backing storage.
    pub fn new(name: Name, ty: TypeRef) -> Self {
        FieldDescriptor {
            name,
            ty,
            storage: Storage::Backed,
            modality: Modality::Final,
            visibility: Visibility::Public,
            span: Span::DUMMY,
        }
    }

    #[must_use]
    pub fn with_storage(mut self, storage: Storage) -> Self {
        self.storage = storage;
        self
    }

    #[must_use]
    pub fn with_modality(mut self, modality: Modality) -> Self {
        self.modality = modality;
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

/// A canonical constructor parameter. Names the field it initializes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConstructorParam {
    pub name: Name,
    pub ty: TypeRef,
    pub span: Span,
}

/// The canonical (primary) constructor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CanonicalConstructor {
    pub params: Vec<ConstructorParam>,
}

/// What a host-declared member function does, as far as copying goes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    /// Non-recursive copy-with-defaults (a data class `copy`).
    ShallowCopy,
    /// A hand-written deep copy with per-field overrides.
    DeepCopyWithOverrides,
    /// A hand-written parameterless deep copy.
    DeepCopy,
    /// Anything else.
    Other,
}

/// A member function declared by the host (not generated by this engine).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionDecl {
    pub name: Name,
    pub kind: FunctionKind,
}

/// Shape of one class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDescriptor {
    pub id: ClassId,
    pub name: Name,
    /// Compilation unit (module) the class belongs to.
    pub unit: Name,
    pub span: Span,
    /// Declared fields, in declaration order.
    pub fields: Vec<FieldDescriptor>,
    pub constructor: Option<CanonicalConstructor>,
    /// Capabilities the class declares itself (e.g. implementing the
    /// deep-copy interface). Structural capabilities are computed, not read
    /// from here.
    pub declared: Capabilities,
    /// Carries the opt-in marker for copy-with-overrides synthesis.
    pub opt_in: bool,
    /// Unbound type parameters.
    pub type_params: Vec<Name>,
    /// Host-declared member functions.
    pub functions: Vec<FunctionDecl>,
}

impl ClassDescriptor {
    /// An empty class with no constructor.
    pub fn new(id: ClassId, name: Name, unit: Name) -> Self {
        ClassDescriptor {
            id,
            name,
            unit,
            span: Span::DUMMY,
            fields: Vec::new(),
            constructor: None,
            declared: Capabilities::empty(),
            opt_in: false,
            type_params: Vec::new(),
            functions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare a canonical constructor with one parameter per field, in
    /// field order.
    #[must_use]
    pub fn with_field_constructor(mut self) -> Self {
        let params = self
            .fields
            .iter()
            .map(|f| ConstructorParam {
                name: f.name,
                ty: f.ty.clone(),
                span: f.span,
            })
            .collect();
        self.constructor = Some(CanonicalConstructor { params });
        self
    }

    #[must_use]
    pub fn with_constructor(mut self, params: Vec<ConstructorParam>) -> Self {
        self.constructor = Some(CanonicalConstructor { params });
        self
    }

    #[must_use]
    pub fn with_declared(mut self, caps: Capabilities) -> Self {
        self.declared |= caps;
        self
    }

    #[must_use]
    pub fn with_opt_in(mut self) -> Self {
        self.opt_in = true;
        self
    }

    #[must_use]
    pub fn with_type_param(mut self, param: Name) -> Self {
        self.type_params.push(param);
        self
    }

    #[must_use]
    pub fn with_function(mut self, name: Name, kind: FunctionKind) -> Self {
        self.functions.push(FunctionDecl { name, kind });
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Look up a field by name.
    pub fn field(&self, name: Name) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up a host-declared function by name.
    pub fn function(&self, name: Name) -> Option<&FunctionDecl> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// First host-declared function of the given kind.
    pub fn function_of_kind(&self, kind: FunctionKind) -> Option<&FunctionDecl> {
        self.functions.iter().find(|f| f.kind == kind)
    }

    /// Whether the canonical constructor maps every parameter to a distinct
    /// field of the same name.
    pub fn has_field_mapped_constructor(&self) -> bool {
        let Some(ctor) = &self.constructor else {
            return false;
        };
        ctor.params.iter().enumerate().all(|(i, p)| {
            self.field(p.name).is_some() && ctor.params[..i].iter().all(|q| q.name != p.name)
        })
    }
}
