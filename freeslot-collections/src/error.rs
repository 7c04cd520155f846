//! Error types.
//!
//! Expected misses (empty container, missing key, end of list) are reported
//! through `Option`. The types here cover caller bugs: stale handles,
//! out-of-range indices, mutation under an active cursor, duplicates where
//! duplicates are not allowed. Every operation that returns one of these
//! errors leaves its container untouched.

/// Error returned by list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ListError {
    /// The handle or index does not name a live node of this list.
    ///
    /// Raised for handles from another list, stale generations, removed
    /// nodes and out-of-range indices.
    #[error("invalid node: handle does not refer to a live node of this list")]
    InvalidNode,
    /// The list changed structurally since the cursor captured its version.
    #[error("list was modified during iteration")]
    Invalidated,
}

/// Error returned by deque operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum DequeError {
    /// A logical index (or range end) lies past the end of the deque.
    #[error("index {index} out of range for deque of length {len}")]
    OutOfRange {
        /// The offending index or range end.
        index: usize,
        /// Length of the deque at the time of the call.
        len: usize,
    },
    /// A `start + count` range runs past the end of the deque.
    #[error("range of {count} starting at {start} out of bounds for deque of length {len}")]
    RangeOutOfBounds {
        /// First index of the range.
        start: usize,
        /// Number of elements in the range.
        count: usize,
        /// Length of the deque at the time of the call.
        len: usize,
    },
    /// `set_capacity` asked for less room than the deque currently uses.
    #[error("capacity {requested} cannot hold {len} elements")]
    CapacityTooSmall {
        /// The requested capacity.
        requested: usize,
        /// Length of the deque at the time of the call.
        len: usize,
    },
    /// The deque changed structurally since the cursor captured its version.
    #[error("deque was modified during iteration")]
    Invalidated,
}

/// Error returned by [`BiMap::insert`](crate::BiMap::insert).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum BiMapError {
    /// The left value is already mapped. Nothing was inserted.
    #[error("left value is already present in the map")]
    DuplicateLeft,
    /// The right value is already mapped. The forward insert was rolled back.
    #[error("right value is already present in the map")]
    DuplicateRight,
}

/// Error returned by the container builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum BuildError {
    /// Capacity is zero.
    #[error("capacity cannot be zero")]
    ZeroCapacity,
    /// Capacity does not fit the key type's index space.
    #[error("capacity {capacity} exceeds key type maximum {max}")]
    CapacityOverflow {
        /// The requested capacity.
        capacity: usize,
        /// Largest capacity the key type can address.
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            DequeError::OutOfRange { index: 5, len: 3 }.to_string(),
            "index 5 out of range for deque of length 3"
        );
        assert_eq!(
            DequeError::RangeOutOfBounds { start: 4, count: 2, len: 5 }.to_string(),
            "range of 2 starting at 4 out of bounds for deque of length 5"
        );
        assert_eq!(
            ListError::Invalidated.to_string(),
            "list was modified during iteration"
        );
        assert_eq!(BuildError::ZeroCapacity.to_string(), "capacity cannot be zero");
    }

    #[test]
    fn errors_are_std_errors() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<ListError>();
        assert_error::<DequeError>();
        assert_error::<BiMapError>();
        assert_error::<BuildError>();
    }
}
