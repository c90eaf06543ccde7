//! Chain operations over any storage backend.
//!
//! A chain has no container object. It is nothing more than the set of nodes
//! mutually reachable through their embedded [`Links`](crate::Links), and any
//! member is an equally valid entry point. The operations here are therefore
//! an extension trait on storage, anchored at a node handle, rather than
//! methods of a list struct: there is no head, no tail, and no length field
//! to keep in sync.
//!
//! # Enumeration order
//!
//! [`chain`](ChainOps::chain) yields the anchor first, then the forward run
//! to the end, then the backward run to the start. Search and counting only
//! need completeness, but the order is part of the contract: with duplicate
//! identifiers, it decides which node a search returns.
//!
//! # Example
//!
//! ```
//! use idchain::{Arena, ChainNode, ChainOps, Links, Storage};
//!
//! # #[derive(Debug)]
//! struct Station {
//!     name: String,
//!     links: Links<u32>,
//! }
//!
//! impl Station {
//!     fn new(name: &str) -> Self {
//!         Self { name: name.into(), links: Links::new() }
//!     }
//! }
//!
//! impl ChainNode<u32> for Station {
//!     fn id(&self) -> &str { &self.name }
//!     fn links(&self) -> &Links<u32> { &self.links }
//!     fn links_mut(&mut self) -> &mut Links<u32> { &mut self.links }
//! }
//!
//! let mut stations: Arena<Station> = Arena::with_capacity(8);
//! let hub = stations.try_insert(Station::new("hub")).unwrap();
//! let relay = stations.try_insert(Station::new("relay")).unwrap();
//!
//! stations.link_after(hub, relay).unwrap();
//!
//! assert_eq!(stations.chain_len(hub), 2);
//! assert_eq!(stations.find_in_chain(relay, "hub"), Some(hub));
//! assert_eq!(stations.find_in_chain(hub, "uplink"), None);
//! ```
//!
//! # Single-threaded contract
//!
//! Link symmetry is only guaranteed when all mutation of a chain happens from
//! one logical thread of control. The borrow checker enforces the mechanical
//! part (mutation takes `&mut` storage, live iterators hold `&` storage);
//! sharing one storage across threads is simply out of scope.

use std::marker::PhantomData;

use thiserror::Error;

use crate::{ChainNode, Full, Handle, Storage};

/// Chain mutation rejected without touching any link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChainError {
    /// The node to splice in already belongs to a chain.
    ///
    /// Linking it anyway would orphan its old neighbors' references. Unlink
    /// it first if a move is intended.
    #[error("node is already linked into a chain")]
    AlreadyLinked,
    /// Anchor and new node are the same handle.
    #[error("cannot link a node after itself")]
    SelfLink,
}

/// Chain operations, available on any storage whose values are chain nodes.
///
/// Blanket-implemented; bring the trait into scope and call the methods
/// directly on the storage. All methods anchored at a handle panic if that
/// handle is not live in this storage — a dead anchor is a caller bug, unlike
/// a missing identifier, which is an expected [`None`].
pub trait ChainOps<T, H>: Storage<T, Handle = H> + Sized
where
    T: ChainNode<H>,
    H: Handle,
{
    /// Splices `new` into the chain immediately after `at`.
    ///
    /// O(1); touches only `at`, `new`, and `at`'s former successor. Inserting
    /// after the tail degenerates correctly (no right neighbor to rebridge).
    ///
    /// # Errors
    ///
    /// [`ChainError::AlreadyLinked`] if `new` still carries links, and
    /// [`ChainError::SelfLink`] if `at == new`. Neither case modifies
    /// anything.
    ///
    /// # Panics
    ///
    /// Panics if `at` or `new` is not live in this storage.
    fn link_after(&mut self, at: H, new: H) -> Result<(), ChainError> {
        if at == new {
            return Err(ChainError::SelfLink);
        }
        if self.get(new).expect("invalid handle").links().is_linked() {
            return Err(ChainError::AlreadyLinked);
        }
        let right = self.get(at).expect("invalid handle").links().next();

        {
            let links = self.get_mut(new).expect("invalid handle").links_mut();
            links.prev = at;
            links.next = right;
        }
        self.get_mut(at).expect("invalid handle").links_mut().next = new;
        if right.is_some() {
            self.get_mut(right).expect("chain invariant").links_mut().prev = new;
        }
        Ok(())
    }

    /// Removes `key` from its chain, rebridging its neighbors to each other
    /// and clearing its own links. The node stays in storage.
    ///
    /// Idempotent: unlinking an already-unlinked node is a no-op. Returns
    /// `true` if the node had been linked.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not live in this storage.
    fn unlink(&mut self, key: H) -> bool {
        let links = *self.get(key).expect("invalid handle").links();
        if !links.is_linked() {
            return false;
        }

        if links.prev.is_some() {
            self.get_mut(links.prev)
                .expect("chain invariant")
                .links_mut()
                .next = links.next;
        }
        if links.next.is_some() {
            self.get_mut(links.next)
                .expect("chain invariant")
                .links_mut()
                .prev = links.prev;
        }

        let own = self.get_mut(key).expect("invalid handle").links_mut();
        own.prev = H::NONE;
        own.next = H::NONE;
        true
    }

    /// Unlinks `key` and removes it from storage in one step.
    ///
    /// This is the safe disposal path: neighbors are rebridged before the
    /// slot is freed, so no chain is ever left pointing at a dead handle.
    /// Returns `None` if `key` is not live.
    fn retire(&mut self, key: H) -> Option<T> {
        self.get(key)?;
        self.unlink(key);
        self.remove(key)
    }

    /// Enumerates the chain containing `start`: the anchor itself, then the
    /// forward run, then the backward run.
    ///
    /// Lazy and fresh per call; every step reads the live links. Safe on an
    /// unlinked node (yields just `start`). Yields handles — resolve them
    /// through [`Storage::get`] as needed.
    ///
    /// # Panics
    ///
    /// Panics if `start` is not live in this storage.
    fn chain(&self, start: H) -> ChainIter<'_, Self, T, H> {
        ChainIter::new(self, start)
    }

    /// Linear first-match search of the chain containing `start`.
    ///
    /// Compares each member's [`id`](ChainNode::id) against `identifier` by
    /// exact string equality, in [`chain`](ChainOps::chain) order. A missing
    /// identifier is an expected outcome, not a fault.
    ///
    /// # Panics
    ///
    /// Panics if `start` is not live in this storage.
    fn find_in_chain(&self, start: H, identifier: &str) -> Option<H> {
        self.chain(start)
            .find(|&key| self.get(key).expect("chain invariant").id() == identifier)
    }

    /// Number of nodes in the chain containing `start` (at least 1).
    ///
    /// # Panics
    ///
    /// Panics if `start` is not live in this storage.
    fn chain_len(&self, start: H) -> usize {
        self.chain(start).count()
    }

    /// Returns `true` if `key` currently carries a link.
    ///
    /// `false` means the node is a one-element chain of its own.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not live in this storage.
    fn is_linked(&self, key: H) -> bool {
        self.get(key).expect("invalid handle").links().is_linked()
    }

    /// Find-or-create: returns the existing member with `identifier`, or
    /// builds one with `make` and splices it in after `at`.
    ///
    /// Uniqueness is not enforced by the chain itself; this composition is
    /// how callers opt into it.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if a new node was needed and storage had no
    /// free slot.
    ///
    /// # Panics
    ///
    /// Panics if `at` is not live, or if `make` returns a node that already
    /// carries links.
    fn find_or_link_after(
        &mut self,
        at: H,
        identifier: &str,
        make: impl FnOnce() -> T,
    ) -> Result<H, Full<T>> {
        if let Some(found) = self.find_in_chain(at, identifier) {
            return Ok(found);
        }
        let key = self.try_insert(make())?;
        self.link_after(at, key)
            .expect("freshly constructed node must be unlinked");
        Ok(key)
    }
}

impl<S, T, H> ChainOps<T, H> for S
where
    S: Storage<T, Handle = H>,
    T: ChainNode<H>,
    H: Handle,
{
}

/// Iterator over the handles of one chain.
///
/// Produced by [`ChainOps::chain`]; see there for the order contract.
pub struct ChainIter<'a, S, T, H: Handle> {
    storage: &'a S,
    start: H,
    fwd: H,
    bwd: H,
    yielded_start: bool,
    _marker: PhantomData<T>,
}

impl<'a, S, T, H> ChainIter<'a, S, T, H>
where
    S: Storage<T, Handle = H>,
    T: ChainNode<H>,
    H: Handle,
{
    fn new(storage: &'a S, start: H) -> Self {
        let links = *storage.get(start).expect("invalid handle").links();
        Self {
            storage,
            start,
            fwd: links.next(),
            bwd: links.prev(),
            yielded_start: false,
            _marker: PhantomData,
        }
    }
}

impl<S, T, H> Iterator for ChainIter<'_, S, T, H>
where
    S: Storage<T, Handle = H>,
    T: ChainNode<H>,
    H: Handle,
{
    type Item = H;

    fn next(&mut self) -> Option<H> {
        if !self.yielded_start {
            self.yielded_start = true;
            return Some(self.start);
        }

        if self.fwd.is_some() {
            let current = self.fwd;
            self.fwd = self
                .storage
                .get(current)
                .expect("chain invariant")
                .links()
                .next();
            return Some(current);
        }

        if self.bwd.is_some() {
            let current = self.bwd;
            self.bwd = self
                .storage
                .get(current)
                .expect("chain invariant")
                .links()
                .prev();
            return Some(current);
        }

        None
    }
}
