//! Copy capabilities.
//!
//! A type may hold any subset of the four capabilities. They form an
//! orthogonal set rather than a hierarchy; the resolver picks a strategy by
//! checking them in priority order.

use bitflags::bitflags;

bitflags! {
    /// Set of copy capabilities held by a type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Capabilities: u8 {
        /// Has a canonical constructor whose parameters map 1:1 to fields.
        const AGGREGATE = 1 << 0;
        /// Carries (or will carry this pass) the engine's deep-copy function.
        const SELF_COPYABLE = 1 << 1;
        /// Aggregate with an ordinary, non-recursive copy-with-defaults function.
        const SHALLOW_COPYABLE = 1 << 2;
        /// A container shape with a registered element-wise copy helper.
        const CONTAINER_COPYABLE = 1 << 3;
    }
}

impl Capabilities {
    /// Whether any capability yields a non-identity copy.
    #[inline]
    pub fn is_copyable(self) -> bool {
        self.intersects(
            Capabilities::SELF_COPYABLE
                | Capabilities::SHALLOW_COPYABLE
                | Capabilities::CONTAINER_COPYABLE,
        )
    }
}
