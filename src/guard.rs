//! Scoped chain membership.
//!
//! The spec-level obligation "every node must unlink itself before it is
//! discarded" is easy to forget on early-return paths. [`LinkedGuard`] turns
//! it into a structural guarantee: the guard *is* the membership, and its
//! drop retires the node — rebridging neighbors, then freeing the slot — on
//! every exit path, including panics unwinding through the scope.

use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use crate::{ChainNode, ChainOps, Full, Handle, Storage};

/// A chain member that lives exactly as long as this guard.
///
/// Created by [`link_after`](LinkedGuard::link_after), which inserts the
/// value into storage and splices it in behind the anchor. While the guard is
/// alive it holds the storage mutably, so nothing else can rearrange the
/// chain underneath it. On drop the node is unlinked and removed.
///
/// Call [`keep`](LinkedGuard::keep) to commit the node permanently instead.
///
/// # Example
///
/// ```
/// use idchain::{Arena, ChainNode, ChainOps, Links, LinkedGuard, Storage};
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
/// let mut stations: Arena<Station> = Arena::with_capacity(8);
/// let hub = stations.try_insert(Station::new("hub")).unwrap();
///
/// {
///     let probe = LinkedGuard::link_after(&mut stations, hub, Station::new("probe")).unwrap();
///     assert_eq!(probe.id(), "probe");
/// } // probe retired here
///
/// assert_eq!(stations.chain_len(hub), 1);
/// ```
pub struct LinkedGuard<'a, S, T, H>
where
    S: Storage<T, Handle = H>,
    T: ChainNode<H>,
    H: Handle,
{
    storage: &'a mut S,
    key: H,
    _marker: PhantomData<T>,
}

impl<'a, S, T, H> LinkedGuard<'a, S, T, H>
where
    S: Storage<T, Handle = H>,
    T: ChainNode<H>,
    H: Handle,
{
    /// Inserts `value` into storage and links it immediately after `at`,
    /// returning the guard that owns the membership.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if storage has no free slot.
    ///
    /// # Panics
    ///
    /// Panics if `at` is not live in this storage, or if `value` already
    /// carries links.
    pub fn link_after(storage: &'a mut S, at: H, value: T) -> Result<Self, Full<T>> {
        let key = storage.try_insert(value)?;
        storage
            .link_after(at, key)
            .expect("freshly constructed node must be unlinked");
        Ok(Self {
            storage,
            key,
            _marker: PhantomData,
        })
    }

    /// Handle of the guarded node.
    #[inline]
    pub fn key(&self) -> H {
        self.key
    }

    /// Commits the node permanently, skipping the drop-time retire.
    ///
    /// The returned handle stays linked; from here on the caller owns the
    /// unlink-before-discard obligation again.
    pub fn keep(self) -> H {
        let key = self.key;
        std::mem::forget(self);
        key
    }
}

impl<S, T, H> Deref for LinkedGuard<'_, S, T, H>
where
    S: Storage<T, Handle = H>,
    T: ChainNode<H>,
    H: Handle,
{
    type Target = T;

    fn deref(&self) -> &T {
        self.storage.get(self.key).expect("guarded node is live")
    }
}

impl<S, T, H> DerefMut for LinkedGuard<'_, S, T, H>
where
    S: Storage<T, Handle = H>,
    T: ChainNode<H>,
    H: Handle,
{
    fn deref_mut(&mut self) -> &mut T {
        self.storage.get_mut(self.key).expect("guarded node is live")
    }
}

impl<S, T, H> Drop for LinkedGuard<'_, S, T, H>
where
    S: Storage<T, Handle = H>,
    T: ChainNode<H>,
    H: Handle,
{
    fn drop(&mut self) {
        self.storage.retire(self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Arena, Links};

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
    fn drop_retires_the_node() {
        let mut arena: Arena<Node> = Arena::with_capacity(8);
        let a = arena.try_insert(Node::new("a")).unwrap();
        let b = arena.try_insert(Node::new("b")).unwrap();
        arena.link_after(a, b).unwrap();

        {
            let guard = LinkedGuard::link_after(&mut arena, a, Node::new("tmp")).unwrap();
            assert_eq!(guard.id(), "tmp");
        }

        // Chain is [a, b] again and the slot was freed.
        assert_eq!(arena.chain(a).collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn guard_unlinks_on_early_return() {
        fn inspect(arena: &mut Arena<Node>, head: u32, bail: bool) -> usize {
            let guard = LinkedGuard::link_after(arena, head, Node::new("probe")).unwrap();
            if bail {
                return 0; // guard retires here too
            }
            let key = guard.key();
            guard.storage.chain_len(key)
        }

        let mut arena: Arena<Node> = Arena::with_capacity(8);
        let head = arena.try_insert(Node::new("head")).unwrap();

        assert_eq!(inspect(&mut arena, head, true), 0);
        assert_eq!(arena.chain_len(head), 1);

        assert_eq!(inspect(&mut arena, head, false), 2);
        assert_eq!(arena.chain_len(head), 1);
    }

    #[test]
    fn keep_commits_the_node() {
        let mut arena: Arena<Node> = Arena::with_capacity(8);
        let head = arena.try_insert(Node::new("head")).unwrap();

        let key = {
            let guard = LinkedGuard::link_after(&mut arena, head, Node::new("kept")).unwrap();
            guard.keep()
        };

        assert!(arena.is_linked(key));
        assert_eq!(arena.chain_len(head), 2);
        assert_eq!(arena.find_in_chain(head, "kept"), Some(key));
    }

    #[test]
    fn deref_mut_reaches_the_node() {
        let mut arena: Arena<Node> = Arena::with_capacity(8);
        let head = arena.try_insert(Node::new("head")).unwrap();

        let mut guard = LinkedGuard::link_after(&mut arena, head, Node::new("x")).unwrap();
        guard.name.push('!');
        assert_eq!(guard.id(), "x!");
    }
}
