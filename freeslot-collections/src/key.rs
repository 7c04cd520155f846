//! Key trait for slot indices.
//!
//! The [`Key`] trait abstracts over the integer types used to address slots.
//! It provides a sentinel value (`NONE`) and conversion to/from `usize`, so a
//! link field costs exactly one integer instead of an `Option<usize>`.

use core::fmt::Debug;
use core::hash::Hash;

/// Trait for key/index types used to address slots.
///
/// Provides a sentinel value (`NONE`) and conversion to/from `usize`.
/// Implemented for the unsigned integer types and can be implemented for
/// custom key types (e.g., strongly-typed order IDs).
///
/// The sentinel doubles as the exclusive upper bound on slot indices: a
/// container keyed by `u16` can hold at most `u16::MAX` slots.
///
/// # Example
///
/// ```
/// use freeslot_collections::Key;
///
/// // u32 is a Key with NONE = u32::MAX
/// let key: u32 = 42;
/// assert!(!key.is_none());
/// assert!(u32::NONE.is_none());
/// ```
///
/// # Custom Key Types
///
/// ```
/// use freeslot_collections::{IndexList, Key};
///
/// #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// struct OrderId(u64);
///
/// impl Key for OrderId {
///     const NONE: Self = OrderId(u64::MAX);
///
///     fn from_usize(val: usize) -> Self {
///         OrderId(val as u64)
///     }
///
///     fn as_usize(&self) -> usize {
///         self.0 as usize
///     }
/// }
///
/// let mut orders = IndexList::<&str, OrderId>::new();
/// let id = orders.push_back("buy 100");
/// assert_eq!(orders.get(id), Ok(&"buy 100"));
/// ```
pub trait Key: Copy + Eq + Hash + Debug {
    /// Sentinel value representing "no key" / "null".
    ///
    /// Used internally to represent empty links and the end of the free chain.
    /// For integer types, this is `MAX` (e.g., `u32::MAX`).
    const NONE: Self;

    /// Creates a key from a `usize` value.
    fn from_usize(val: usize) -> Self;

    /// Returns the key as a `usize`.
    fn as_usize(&self) -> usize;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Returns `true` if this is NOT the sentinel value.
    #[inline]
    fn is_some(&self) -> bool {
        !self.is_none()
    }
}

macro_rules! impl_key_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Key for $ty {
                const NONE: Self = <$ty>::MAX;

                #[inline]
                fn from_usize(val: usize) -> Self {
                    val as Self
                }

                #[inline]
                fn as_usize(&self) -> usize {
                    *self as usize
                }
            }
        )*
    };
}

impl_key_for_unsigned!(u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_key_sentinel {
        ($($ty:ty => $name:ident),*) => {
            $(
                #[test]
                fn $name() {
                    assert!(<$ty>::NONE.is_none());
                    assert!(!<$ty>::NONE.is_some());
                    assert!((0 as $ty).is_some());
                    assert!((<$ty>::MAX - 1).is_some());
                }
            )*
        };
    }

    test_key_sentinel!(
        u16 => u16_sentinel,
        u32 => u32_sentinel,
        u64 => u64_sentinel,
        usize => usize_sentinel
    );

    #[test]
    fn from_usize_roundtrip() {
        for i in [0usize, 1, 100, 1000, u16::MAX as usize - 1] {
            assert_eq!(u32::from_usize(i).as_usize(), i);
            assert_eq!(u16::from_usize(i).as_usize(), i);
        }
    }
}
