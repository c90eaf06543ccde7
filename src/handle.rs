//! Sentinel-based handle trait for node adjacency slots.
//!
//! Adjacency slots in chain nodes hold a [`Handle`] rather than an
//! `Option<Handle>`. A reserved sentinel value (`NONE`, typically the integer
//! maximum) stands in for "no neighbor", keeping node layouts compact.

/// A copyable storage handle with a reserved "none" value.
///
/// Handles index into a [`Storage`](crate::Storage) backend and remain valid
/// until the slot they name is removed. The sentinel never names a live slot.
///
/// # Example
///
/// ```
/// use idchain::Handle;
///
/// let h: u32 = 7;
/// assert!(h.is_some());
/// assert!(u32::NONE.is_none());
/// ```
pub trait Handle: Copy + Eq {
    /// Sentinel value meaning "no handle".
    ///
    /// For the integer impls this is the type's `MAX`, which also caps the
    /// usable capacity of any storage keyed by that handle type.
    const NONE: Self;

    /// Returns `true` if this is the sentinel.
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` if this is not the sentinel.
    #[inline]
    fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Returns the handle as a `usize`, for indexing into slot arrays.
    fn as_usize(self) -> usize;

    /// Builds a handle from a slot position.
    fn from_usize(val: usize) -> Self;
}

macro_rules! impl_handle_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Handle for $ty {
                const NONE: Self = <$ty>::MAX;

                #[inline]
                fn as_usize(self) -> usize {
                    self as usize
                }

                #[inline]
                fn from_usize(val: usize) -> Self {
                    val as Self
                }
            }
        )*
    };
}

impl_handle_for_unsigned!(u16, u32, u64, usize);
