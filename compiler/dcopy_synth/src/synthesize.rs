//! Function synthesis for both copy paths.
//!
//! Each generated body is a single constructor call; there is no
//! intermediate state. Path A mirrors the canonical constructor with one
//! defaulted parameter per slot, Path B takes no parameters and reads
//! every slot from the receiver.

use dcopy_ir::{
    ClassDescriptor, ClassModel, CopyKind, ExprArena, ExprId, ExprKind, FieldDescriptor,
    GeneratedFunction, GeneratedParam, StringInterner, Strategy, TypeRef,
};

use crate::{access_expression, ReservedNames, Resolver, SynthError};

/// Builds generated functions for classes of one graph.
pub struct Synthesizer<'a, M: ClassModel + ?Sized> {
    resolver: Resolver<'a, M>,
    names: ReservedNames,
    interner: &'a StringInterner,
}

impl<'a, M: ClassModel + ?Sized> Synthesizer<'a, M> {
    pub fn new(resolver: Resolver<'a, M>, names: ReservedNames, interner: &'a StringInterner) -> Self {
        Synthesizer {
            resolver,
            names,
            interner,
        }
    }

    pub fn resolver(&mut self) -> &mut Resolver<'a, M> {
        &mut self.resolver
    }

    /// Synthesize the function for `kind`.
    pub fn synthesize(
        &mut self,
        class: &ClassDescriptor,
        kind: CopyKind,
    ) -> Result<GeneratedFunction, SynthError> {
        match kind {
            CopyKind::WithOverrides => self.with_overrides(class),
            CopyKind::Direct => self.direct(class),
        }
    }

    /// Path A: `fn deep_copy_with(self, p0 = self.f0, ...) = C(copy(p0), ...)`.
    ///
    /// Defaults read the current field value unmodified; every slot is then
    /// copied in the body, so caller-supplied values are copied too.
    #[tracing::instrument(level = "debug", skip_all, fields(class = self.interner.lookup(class.name)))]
    pub fn with_overrides(
        &mut self,
        class: &ClassDescriptor,
    ) -> Result<GeneratedFunction, SynthError> {
        let slots = self.mapped_fields(class)?;
        let mut arena = ExprArena::new();
        let receiver = arena.alloc(ExprKind::SelfRef);

        let mut params = Vec::with_capacity(slots.len());
        let mut args = Vec::with_capacity(slots.len());
        for (index, field) in (0u32..).zip(&slots) {
            let default = access_expression(&mut arena, field, receiver);
            params.push(GeneratedParam {
                name: field.name,
                ty: field.ty.clone(),
                default: Some(default),
            });
            let value = arena.alloc(ExprKind::Param { index });
            args.push(self.copy_of(&mut arena, &field.ty, value)?);
        }

        let body = arena.alloc(construct(class, args));
        Ok(GeneratedFunction {
            name: self.names.with_overrides,
            owner: class.id,
            kind: CopyKind::WithOverrides,
            params,
            arena,
            body,
        })
    }

    /// Path B: `fn deep_copy(self) = C(copy(self.f0), ...)`.
    #[tracing::instrument(level = "debug", skip_all, fields(class = self.interner.lookup(class.name)))]
    pub fn direct(&mut self, class: &ClassDescriptor) -> Result<GeneratedFunction, SynthError> {
        let slots = self.mapped_fields(class)?;
        let mut arena = ExprArena::new();
        let receiver = arena.alloc(ExprKind::SelfRef);

        let mut args = Vec::with_capacity(slots.len());
        for field in &slots {
            let read = access_expression(&mut arena, field, receiver);
            args.push(self.copy_of(&mut arena, &field.ty, read)?);
        }

        let body = arena.alloc(construct(class, args));
        Ok(GeneratedFunction {
            name: self.names.direct,
            owner: class.id,
            kind: CopyKind::Direct,
            params: Vec::new(),
            arena,
            body,
        })
    }

    /// The field behind each constructor parameter, in parameter order.
    ///
    /// Fails on the first parameter without a field of the same name, or
    /// naming a field an earlier parameter already took.
    pub fn mapped_fields<'c>(
        &self,
        class: &'c ClassDescriptor,
    ) -> Result<Vec<&'c FieldDescriptor>, SynthError> {
        let class_name = || self.interner.lookup(class.name).to_owned();
        let Some(ctor) = &class.constructor else {
            return Err(SynthError::NoConstructor {
                class: class_name(),
                class_span: class.span,
            });
        };

        let mut slots: Vec<&FieldDescriptor> = Vec::with_capacity(ctor.params.len());
        for param in &ctor.params {
            let Some(field) = class.field(param.name) else {
                return Err(SynthError::UnmappedParameter {
                    class: class_name(),
                    param: self.interner.lookup(param.name).to_owned(),
                    span: param.span,
                    class_span: class.span,
                });
            };
            if slots.iter().any(|f| f.name == field.name) {
                return Err(SynthError::DuplicateParameter {
                    class: class_name(),
                    param: self.interner.lookup(param.name).to_owned(),
                    span: param.span,
                    class_span: class.span,
                });
            }
            slots.push(field);
        }
        Ok(slots)
    }

    /// Resolve `ty` and emit the copy of `operand`.
    fn copy_of(
        &mut self,
        arena: &mut ExprArena,
        ty: &TypeRef,
        operand: ExprId,
    ) -> Result<ExprId, SynthError> {
        let strategy = self.resolver.resolve(ty)?;
        tracing::debug!(strategy = strategy.tag(), "resolved slot");
        Ok(emit_copy(arena, strategy, operand, ty.is_nullable()))
    }
}

/// Emit the expression applying `strategy` to `operand`. Identity returns
/// the operand itself.
pub fn emit_copy(
    arena: &mut ExprArena,
    strategy: Strategy,
    operand: ExprId,
    null_safe: bool,
) -> ExprId {
    match strategy {
        Strategy::Identity => operand,
        Strategy::RecursiveCopyCall { function } | Strategy::ShallowCopyCall { function } => arena
            .alloc(ExprKind::MethodCall {
                receiver: operand,
                method: function,
                null_safe,
            }),
        Strategy::ContainerCopyCall {
            helper,
            shape,
            elements,
        } => arena.alloc(ExprKind::HelperCall {
            helper,
            shape,
            receiver: operand,
            elements,
            null_safe,
        }),
    }
}

/// Constructor call with every class type parameter erased to the top type.
fn construct(class: &ClassDescriptor, args: Vec<ExprId>) -> ExprKind {
    ExprKind::Construct {
        class: class.id,
        type_args: vec![TypeRef::Top; class.type_params.len()],
        args,
    }
}
