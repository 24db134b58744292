//! dcopy IR - class model and generated-function representation.
//!
//! This crate contains the data the deep-copy synthesis engine consumes and
//! produces:
//! - Interned names and spans
//! - The host-supplied class model (`ClassDescriptor`, `FieldDescriptor`,
//!   `TypeRef`) behind the [`ClassModel`] interface
//! - Copy [`Capabilities`] and [`Strategy`]
//! - Generated functions: a flat [`ExprArena`] plus a single body expression
//!
//! # Design Philosophy
//!
//! - **Host-agnostic**: the engine only sees [`ClassModel`]; adapters over a
//!   real toolchain implement it. [`ClassTable`] is the in-memory adapter.
//! - **Intern names**: strings become `Name(u32)` for O(1) comparison.
//! - **Flat bodies**: no `Box<Expr>`, sub-expressions are `ExprId` indices.

mod capability;
mod class;
mod expr;
mod function;
mod interner;
mod model;
mod name;
pub mod render;
mod span;
mod strategy;
mod ty;

pub use capability::Capabilities;
pub use class::{
    CanonicalConstructor, ClassDescriptor, ClassId, ConstructorParam, FieldDescriptor,
    FunctionDecl, FunctionKind, Modality, Storage, Visibility,
};
pub use expr::{ExprArena, ExprId, ExprKind};
pub use function::{CopyKind, GeneratedFunction, GeneratedParam};
pub use interner::{InternError, StringInterner};
pub use model::{AttachError, ClassModel, ClassSink, ClassTable};
pub use name::Name;
pub use render::Renderer;
pub use span::Span;
pub use strategy::{ElementCopy, Strategy};
pub use ty::{ContainerShape, Primitive, TypeRef};
