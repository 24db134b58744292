//! Copy strategies.
//!
//! Defined here rather than in `dcopy_synth` because both the synthesizer
//! (which emits them) and the evaluator (which executes container helpers)
//! need them.

use smallvec::SmallVec;

use crate::{ContainerShape, Name};

/// The resolved action for copying one value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Call the engine's deep-copy function on the value.
    RecursiveCopyCall { function: Name },
    /// Call the type's own non-recursive copy function.
    ShallowCopyCall { function: Name },
    /// Call the registered element-wise helper for a container.
    ContainerCopyCall {
        helper: Name,
        shape: ContainerShape,
        /// One plan per type argument (key and value for maps).
        elements: SmallVec<[ElementCopy; 2]>,
    },
    /// Pass the value through unchanged.
    Identity,
}

impl Strategy {
    pub fn is_identity(&self) -> bool {
        matches!(self, Strategy::Identity)
    }

    /// Short tag for logging.
    pub fn tag(&self) -> &'static str {
        match self {
            Strategy::RecursiveCopyCall { .. } => "recursive",
            Strategy::ShallowCopyCall { .. } => "shallow",
            Strategy::ContainerCopyCall { .. } => "container",
            Strategy::Identity => "identity",
        }
    }
}

/// How a container helper copies one element slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementCopy {
    /// The element's static type resolved to this strategy. Boxed: a
    /// container strategy holds its element plans inline.
    Static(Box<Strategy>),
    /// The element type is a class type parameter. No static resolution is
    /// attempted; the helper dispatches on each element's runtime class.
    Erased,
}

impl ElementCopy {
    /// Plan for an element whose static type resolved to `strategy`.
    pub fn resolved(strategy: Strategy) -> Self {
        ElementCopy::Static(Box::new(strategy))
    }

    /// The static strategy, if the element type was resolved.
    pub fn strategy(&self) -> Option<&Strategy> {
        match self {
            ElementCopy::Static(strategy) => Some(strategy),
            ElementCopy::Erased => None,
        }
    }
}
