//! Storage trait and the default arena backend.
//!
//! Chains never own their nodes. Nodes live in a storage backend that hands
//! out stable handles, and every chain operation is a handle rewrite against
//! that backend. [`Arena`] is the bundled backend: bounded capacity, free-list
//! slot reuse, O(1) insert/remove/get. The `slab` feature adds an impl for
//! `slab::Slab` when a growable store is preferred.

use std::fmt;
use std::marker::PhantomData;

use crate::Handle;

/// Slot store with stable handles.
///
/// # Requirements
///
/// - **Stable handles**: a handle stays valid until its slot is removed.
/// - **O(1)** insert, remove, and get.
/// - **Slot reuse**: removed slots may be handed out again by later inserts.
///
/// All operations on one chain must go through the same storage instance;
/// handles from one store are meaningless in another. That discipline is the
/// caller's (same as with the `slab` crate).
pub trait Storage<T> {
    /// Handle type issued by this storage.
    type Handle: Handle;

    /// Inserts a value, returning its stable handle.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if the storage has no free slot. Growable
    /// backends never return this.
    fn try_insert(&mut self, value: T) -> Result<Self::Handle, Full<T>>;

    /// Removes and returns the value at `handle`, if the slot is live.
    fn remove(&mut self, handle: Self::Handle) -> Option<T>;

    /// Returns a reference to the value at `handle`, if the slot is live.
    fn get(&self, handle: Self::Handle) -> Option<&T>;

    /// Returns a mutable reference to the value at `handle`, if the slot is live.
    fn get_mut(&mut self, handle: Self::Handle) -> Option<&mut T>;

    /// Returns the number of live slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slot is live.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Error returned when bounded storage has no free slot.
///
/// Carries the rejected value so the caller can recover it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(
    /// The value that could not be inserted.
    pub T,
);

impl<T> Full<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for Full<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "storage is full")
    }
}

impl<T: fmt::Debug> std::error::Error for Full<T> {}

// =============================================================================
// Arena - bounded free-list slot store
// =============================================================================

enum Slot<T> {
    Occupied(T),
    Vacant { next_free: usize },
}

/// Bounded slot store with free-list reuse.
///
/// Backed by a single `Vec` that grows lazily up to the fixed capacity and is
/// never reallocated past it. Removed slots go on a free list and are reused
/// in LIFO order.
///
/// # Example
///
/// ```
/// use idchain::{Arena, Storage};
///
/// let mut arena: Arena<u64> = Arena::with_capacity(4);
/// let h = arena.try_insert(42).unwrap();
///
/// assert_eq!(arena.get(h), Some(&42));
/// assert_eq!(arena.remove(h), Some(42));
/// assert_eq!(arena.get(h), None);
/// ```
pub struct Arena<T, H: Handle = u32> {
    slots: Vec<Slot<T>>,
    /// Head of the vacant-slot list, `usize::MAX` when empty.
    free_head: usize,
    len: usize,
    capacity: usize,
    _marker: PhantomData<H>,
}

const FREE_NONE: usize = usize::MAX;

impl<T, H: Handle> Arena<T, H> {
    /// Creates an arena with room for `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or does not fit below the handle type's
    /// sentinel value.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        assert!(
            capacity < H::NONE.as_usize(),
            "capacity exceeds handle range"
        );

        Self {
            slots: Vec::with_capacity(capacity),
            free_head: FREE_NONE,
            len: 0,
            capacity,
            _marker: PhantomData,
        }
    }

    /// Returns the fixed capacity.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }
}

impl<T, H: Handle> Storage<T> for Arena<T, H> {
    type Handle = H;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<H, Full<T>> {
        if self.free_head != FREE_NONE {
            let idx = self.free_head;
            match self.slots[idx] {
                Slot::Vacant { next_free } => self.free_head = next_free,
                Slot::Occupied(_) => unreachable!("free list points at occupied slot"),
            }
            self.slots[idx] = Slot::Occupied(value);
            self.len += 1;
            return Ok(H::from_usize(idx));
        }

        if self.slots.len() == self.capacity {
            return Err(Full(value));
        }

        let idx = self.slots.len();
        self.slots.push(Slot::Occupied(value));
        self.len += 1;
        Ok(H::from_usize(idx))
    }

    #[inline]
    fn remove(&mut self, handle: H) -> Option<T> {
        let idx = handle.as_usize();
        if handle.is_none() || idx >= self.slots.len() {
            return None;
        }
        if matches!(self.slots[idx], Slot::Vacant { .. }) {
            return None;
        }

        let slot = std::mem::replace(
            &mut self.slots[idx],
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = idx;
        self.len -= 1;

        match slot {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => unreachable!(),
        }
    }

    #[inline]
    fn get(&self, handle: H) -> Option<&T> {
        if handle.is_none() {
            return None;
        }
        match self.slots.get(handle.as_usize()) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    #[inline]
    fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        if handle.is_none() {
            return None;
        }
        match self.slots.get_mut(handle.as_usize()) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }
}

// =============================================================================
// slab::Slab backend (feature = "slab")
// =============================================================================

/// Growable storage backend.
///
/// `slab::Slab` reallocates on growth, so inserts are infallible; `try_insert`
/// always returns `Ok`.
#[cfg(feature = "slab")]
impl<T> Storage<T> for slab::Slab<T> {
    type Handle = usize;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<usize, Full<T>> {
        Ok(self.insert(value))
    }

    #[inline]
    fn remove(&mut self, handle: usize) -> Option<T> {
        self.try_remove(handle)
    }

    #[inline]
    fn get(&self, handle: usize) -> Option<&T> {
        slab::Slab::get(self, handle)
    }

    #[inline]
    fn get_mut(&mut self, handle: usize) -> Option<&mut T> {
        slab::Slab::get_mut(self, handle)
    }

    #[inline]
    fn len(&self) -> usize {
        slab::Slab::len(self)
    }
}
