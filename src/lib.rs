//! Identifier-searchable intrusive chains over external storage.
//!
//! A *chain* is a doubly-linked run of nodes with no container object: its
//! identity is implicit in the set of mutually linked nodes, and any member
//! is an equally valid entry point. Entity types join chains by embedding a
//! [`Links`] pair and implementing [`ChainNode`]; the operations — splice
//! after a node, unlink, enumerate, search by identifier — come from the
//! [`ChainOps`] extension trait on the storage that owns the nodes.
//!
//! # Design
//!
//! Nodes never point at each other directly. They live in a storage backend
//! with stable handles, and adjacency is a pair of handles with a sentinel
//! for "no neighbor":
//!
//! ```text
//! Storage (Arena / slab)  - owns the nodes, hands out stable handles
//! Links<H>                - embedded prev/next handle pair per node
//! ChainOps                - splice / unlink / enumerate / search
//! ```
//!
//! Link and unlink are pure handle rewrites touching at most three nodes, so
//! both are O(1). Search is linear and unindexed by design. The chain owns no
//! memory; discarding a node without unlinking it leaves stale handles in its
//! neighbors, which is why disposal goes through [`ChainOps::retire`] or the
//! scoped [`LinkedGuard`].
//!
//! # Quick start
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
//! let mut stations: Arena<Station> = Arena::with_capacity(16);
//!
//! let hub = stations.try_insert(Station::new("hub")).unwrap();
//! let relay = stations.try_insert(Station::new("relay")).unwrap();
//! stations.link_after(hub, relay).unwrap();
//!
//! // Any member is an entry point; enumeration is self, forward, backward.
//! assert_eq!(stations.chain(relay).collect::<Vec<_>>(), vec![relay, hub]);
//!
//! // Search is first-match by exact identifier equality.
//! assert_eq!(stations.find_in_chain(hub, "relay"), Some(relay));
//!
//! // Unlink rebridges the neighbors; the node becomes a chain of one.
//! stations.unlink(relay);
//! assert_eq!(stations.chain_len(hub), 1);
//! ```
//!
//! # Critical invariant: same storage instance
//!
//! All operations on one chain must go through the storage that issued its
//! handles. Handles are meaningless in any other storage; that discipline is
//! the caller's (same as with the `slab` crate).
//!
//! # Single-threaded by design
//!
//! Chains are not thread-safe and have no interior mutability. The link
//! symmetry invariant (`a.next == b` iff `b.prev == a`) holds only when all
//! mutation happens from one logical thread of control; the `&mut` receiver
//! on every mutating operation makes interleaving a mutation with a live
//! traversal a compile error rather than a runtime hazard.
//!
//! # Feature flags
//!
//! - `slab` - [`Storage`] impl for `slab::Slab` (growable backing store)

#![warn(missing_docs)]

pub mod chain;
pub mod guard;
pub mod handle;
pub mod node;
pub mod owned;
pub mod storage;

pub use chain::{ChainError, ChainIter, ChainOps};
pub use guard::LinkedGuard;
pub use handle::Handle;
pub use node::{ChainNode, Links};
pub use owned::ChainPool;
pub use storage::{Arena, Full, Storage};
