//! Copy strategy resolution.
//!
//! `resolve` checks capabilities in strict priority order and is total:
//! every type reference yields exactly one [`Strategy`].
//!
//! 1. SelfCopyable → recursive copy call
//! 2. Aggregate with a shallow copy function → shallow copy call
//! 3. Registered container → helper call, elements resolved recursively
//! 4. Anything else → identity
//!
//! Class type parameters are not resolved against their bounds. A field of
//! type `T` copies by identity; a container of `T` marks the element slot
//! [`ElementCopy::Erased`] and leaves the copy to the helper's runtime
//! dispatch.

use dcopy_ir::{Capabilities, ClassId, ClassModel, ElementCopy, Strategy, TypeRef};
use smallvec::SmallVec;

use crate::{ensure_sufficient_stack, Classifier, SynthError};

/// Resolves type references to copy strategies.
pub struct Resolver<'a, M: ClassModel + ?Sized> {
    classifier: Classifier<'a, M>,
}

impl<'a, M: ClassModel + ?Sized> Resolver<'a, M> {
    pub fn new(classifier: Classifier<'a, M>) -> Self {
        Resolver { classifier }
    }

    pub fn classifier(&mut self) -> &mut Classifier<'a, M> {
        &mut self.classifier
    }

    /// Resolve the strategy for copying a value of type `ty`.
    ///
    /// Errors only on an internal inconsistency between a class's
    /// capability set and its copy targets.
    pub fn resolve(&mut self, ty: &TypeRef) -> Result<Strategy, SynthError> {
        ensure_sufficient_stack(|| match ty.non_null() {
            TypeRef::Class { id, .. } => self.resolve_class(*id),
            TypeRef::Container { shape, args } => {
                let Some(helper) = self.classifier.registry().helper(*shape) else {
                    return Ok(Strategy::Identity);
                };
                if args.len() != shape.arity() {
                    tracing::debug!(
                        ?shape,
                        args = args.len(),
                        "container with unexpected arity, copying by identity"
                    );
                    return Ok(Strategy::Identity);
                }
                let elements = args
                    .iter()
                    .map(|arg| self.resolve_element(arg))
                    .collect::<Result<SmallVec<_>, _>>()?;
                Ok(Strategy::ContainerCopyCall {
                    helper,
                    shape: *shape,
                    elements,
                })
            }
            TypeRef::Primitive(_)
            | TypeRef::Text
            | TypeRef::Param(_)
            | TypeRef::Top
            | TypeRef::Nullable(_) => Ok(Strategy::Identity),
        })
    }

    fn resolve_class(&mut self, id: ClassId) -> Result<Strategy, SynthError> {
        let info = self.classifier.class_capabilities(id);
        if info.caps.contains(Capabilities::SELF_COPYABLE) {
            let function = info
                .deep_copy
                .ok_or(SynthError::InconsistentCapabilities {
                    class: id,
                    capability: "SelfCopyable",
                })?;
            return Ok(Strategy::RecursiveCopyCall { function });
        }
        if info
            .caps
            .contains(Capabilities::AGGREGATE | Capabilities::SHALLOW_COPYABLE)
        {
            let function = info
                .shallow_copy
                .ok_or(SynthError::InconsistentCapabilities {
                    class: id,
                    capability: "ShallowCopyable",
                })?;
            return Ok(Strategy::ShallowCopyCall { function });
        }
        Ok(Strategy::Identity)
    }

    fn resolve_element(&mut self, ty: &TypeRef) -> Result<ElementCopy, SynthError> {
        match ty.non_null() {
            TypeRef::Param(_) | TypeRef::Top => Ok(ElementCopy::Erased),
            _ => self.resolve(ty).map(ElementCopy::resolved),
        }
    }
}
