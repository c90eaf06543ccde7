//! Chain membership capability.
//!
//! A type joins chains by embedding a [`Links`] pair and implementing
//! [`ChainNode`]: an identifier accessor for search plus access to the
//! embedded links. Composition replaces the classic intrusive-base-class
//! arrangement; there is no separate node wrapper and no dynamic dispatch.

use crate::Handle;

/// Embedded adjacency pair: handles of the previous and next chain members.
///
/// Both slots sentinel (`Default`) means the node is unlinked, which is
/// indistinguishable from being a one-element chain — by design, since a lone
/// node is a valid entry point for every chain operation.
///
/// The link/unlink routines in [`ChainOps`](crate::ChainOps) are the only
/// writers of these slots. Code that pokes them directly forfeits the
/// symmetry invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Links<H: Handle> {
    pub(crate) prev: H,
    pub(crate) next: H,
}

impl<H: Handle> Links<H> {
    /// Creates an unlinked pair.
    #[inline]
    pub const fn new() -> Self {
        Self {
            prev: H::NONE,
            next: H::NONE,
        }
    }

    /// Handle of the previous chain member, `H::NONE` at the chain head.
    #[inline]
    pub fn prev(&self) -> H {
        self.prev
    }

    /// Handle of the next chain member, `H::NONE` at the chain tail.
    #[inline]
    pub fn next(&self) -> H {
        self.next
    }

    /// Returns `true` if either slot points at a neighbor.
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.prev.is_some() || self.next.is_some()
    }
}

impl<H: Handle> Default for Links<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for types that participate in identifier-searchable chains.
///
/// Implementors embed a [`Links`] field and expose it through the two
/// accessors; `id` supplies the string compared during
/// [`find_in_chain`](crate::ChainOps::find_in_chain). Identifier uniqueness
/// within a chain is a caller obligation — duplicates are tolerated and
/// search returns the first match in enumeration order.
///
/// # Example
///
/// ```
/// use idchain::{ChainNode, Links};
///
/// struct Station {
///     name: String,
///     links: Links<u32>,
/// }
///
/// impl ChainNode<u32> for Station {
///     fn id(&self) -> &str {
///         &self.name
///     }
///
///     fn links(&self) -> &Links<u32> {
///         &self.links
///     }
///
///     fn links_mut(&mut self) -> &mut Links<u32> {
///         &mut self.links
///     }
/// }
/// ```
pub trait ChainNode<H: Handle> {
    /// Identifier used for equality-based chain search.
    fn id(&self) -> &str;

    /// Shared access to the embedded adjacency pair.
    fn links(&self) -> &Links<H>;

    /// Mutable access to the embedded adjacency pair.
    ///
    /// Reserved for the chain routines; see the [`Links`] invariant note.
    fn links_mut(&mut self) -> &mut Links<H>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unlinked() {
        let links: Links<u32> = Links::default();
        assert!(links.prev().is_none());
        assert!(links.next().is_none());
        assert!(!links.is_linked());
    }

    #[test]
    fn one_sided_link_counts_as_linked() {
        let mut links: Links<u32> = Links::new();
        links.next = 3;
        assert!(links.is_linked());

        let mut links: Links<u32> = Links::new();
        links.prev = 3;
        assert!(links.is_linked());
    }
}
