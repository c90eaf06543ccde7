//! ChainPool - chain operations over owned storage.
//!
//! Convenience wrapper for callers who keep one entity kind in one arena and
//! don't share the storage with anything else. It drops the explicit storage
//! argument from every call; semantics are identical to using
//! [`ChainOps`](crate::ChainOps) on an [`Arena`](crate::Arena) directly.

use crate::{Arena, ChainError, ChainIter, ChainNode, ChainOps, Full, Handle, Storage};

/// An arena of chain nodes with the chain operations built in.
///
/// # Example
///
/// ```
/// use idchain::{ChainNode, ChainPool, Links};
///
/// # #[derive(Debug)]
/// struct Station {
///     name: String,
///     links: Links<u32>,
/// }
///
/// impl Station {
///     fn new(name: &str) -> Self {
///         Self { name: name.into(), links: Links::new() }
///     }
/// }
///
/// impl ChainNode<u32> for Station {
///     fn id(&self) -> &str { &self.name }
///     fn links(&self) -> &Links<u32> { &self.links }
///     fn links_mut(&mut self) -> &mut Links<u32> { &mut self.links }
/// }
///
/// let mut pool: ChainPool<Station> = ChainPool::with_capacity(16);
///
/// let hub = pool.insert(Station::new("hub")).unwrap();
/// let relay = pool.find_or_link_after(hub, "relay", || Station::new("relay")).unwrap();
///
/// assert_eq!(pool.chain_len(hub), 2);
/// assert_eq!(pool.find_in_chain(hub, "relay"), Some(relay));
/// ```
pub struct ChainPool<T, H: Handle = u32>
where
    T: ChainNode<H>,
{
    arena: Arena<T, H>,
}

impl<T, H> ChainPool<T, H>
where
    T: ChainNode<H>,
    H: Handle,
{
    /// Creates a pool with room for `capacity` nodes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or does not fit below the handle type's
    /// sentinel value.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
        }
    }

    /// Number of nodes in the pool (across all chains).
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the pool holds no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns the fixed capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Inserts a node without linking it anywhere: a one-element chain.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if the pool is at capacity.
    #[inline]
    pub fn insert(&mut self, value: T) -> Result<H, Full<T>> {
        self.arena.try_insert(value)
    }

    /// Returns a reference to the node at `key`, if live.
    #[inline]
    pub fn get(&self, key: H) -> Option<&T> {
        self.arena.get(key)
    }

    /// Returns a mutable reference to the node at `key`, if live.
    #[inline]
    pub fn get_mut(&mut self, key: H) -> Option<&mut T> {
        self.arena.get_mut(key)
    }

    /// See [`ChainOps::link_after`].
    #[inline]
    pub fn link_after(&mut self, at: H, new: H) -> Result<(), ChainError> {
        self.arena.link_after(at, new)
    }

    /// See [`ChainOps::unlink`].
    #[inline]
    pub fn unlink(&mut self, key: H) -> bool {
        self.arena.unlink(key)
    }

    /// See [`ChainOps::retire`].
    #[inline]
    pub fn retire(&mut self, key: H) -> Option<T> {
        self.arena.retire(key)
    }

    /// See [`ChainOps::chain`].
    #[inline]
    pub fn chain(&self, start: H) -> ChainIter<'_, Arena<T, H>, T, H> {
        self.arena.chain(start)
    }

    /// See [`ChainOps::find_in_chain`].
    #[inline]
    pub fn find_in_chain(&self, start: H, identifier: &str) -> Option<H> {
        self.arena.find_in_chain(start, identifier)
    }

    /// See [`ChainOps::chain_len`].
    #[inline]
    pub fn chain_len(&self, start: H) -> usize {
        self.arena.chain_len(start)
    }

    /// See [`ChainOps::is_linked`].
    #[inline]
    pub fn is_linked(&self, key: H) -> bool {
        self.arena.is_linked(key)
    }

    /// See [`ChainOps::find_or_link_after`].
    #[inline]
    pub fn find_or_link_after(
        &mut self,
        at: H,
        identifier: &str,
        make: impl FnOnce() -> T,
    ) -> Result<H, Full<T>> {
        self.arena.find_or_link_after(at, identifier, make)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Links;

    #[derive(Debug)]
    struct Node {
        name: String,
        links: Links<u32>,
    }

    impl Node {
        fn new(name: &str) -> Self {
            Self {
                name: name.into(),
                links: Links::new(),
            }
        }
    }

    impl ChainNode<u32> for Node {
        fn id(&self) -> &str {
            &self.name
        }

        fn links(&self) -> &Links<u32> {
            &self.links
        }

        fn links_mut(&mut self) -> &mut Links<u32> {
            &mut self.links
        }
    }

    #[test]
    fn pool_round_trip() {
        let mut pool: ChainPool<Node> = ChainPool::with_capacity(8);
        assert!(pool.is_empty());

        let a = pool.insert(Node::new("a")).unwrap();
        let b = pool.insert(Node::new("b")).unwrap();
        pool.link_after(a, b).unwrap();

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.chain(a).collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(pool.find_in_chain(b, "a"), Some(a));

        assert!(pool.unlink(b));
        assert_eq!(pool.chain_len(a), 1);
        assert!(pool.get(b).is_some());

        assert!(pool.retire(b).is_some());
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn pool_find_or_link() {
        let mut pool: ChainPool<Node> = ChainPool::with_capacity(4);
        let head = pool.insert(Node::new("head")).unwrap();

        let n = pool
            .find_or_link_after(head, "n", || Node::new("n"))
            .unwrap();
        let again = pool
            .find_or_link_after(head, "n", || Node::new("n"))
            .unwrap();

        assert_eq!(n, again);
        assert_eq!(pool.len(), 2);
    }
}
