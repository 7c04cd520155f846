//! Free-list backed collections with stable slot handles.
//!
//! Every structure in this crate keeps its elements in one contiguous,
//! growable backing array and addresses them by index. Removing an element
//! frees its slot onto an intrusive free chain; the next insert reuses it.
//! After warm-up, insert/remove churn performs no allocation at all.
//!
//! # Design Philosophy
//!
//! Traditional node-based collections allocate per element:
//!
//! ```text
//! LinkedList<T>  - one heap node per element, pointer chasing
//! Vec<T>         - indices shift on removal from the middle
//! ```
//!
//! This crate keeps nodes in a slot arena instead:
//!
//! ```text
//! SlotArena      - owns the values, recycles freed slots LIFO
//! List / Deque   - links between slots, no per-node allocation
//! ```
//!
//! Benefits:
//! - **Stable handles**: removing from the middle never moves other nodes
//! - **O(1) list operations**: insert before/after, remove, move-to-front
//! - **Stale-handle detection**: generation-checked handles reject reuse
//! - **Cache-friendly**: every node lives in a single array
//!
//! # Quick Start
//!
//! ```
//! use freeslot_collections::SlotList;
//!
//! let mut queue: SlotList<u64> = SlotList::with_capacity(1000);
//!
//! // Insert returns a stable handle for O(1) access later
//! let handle = queue.push_back(42);
//!
//! // O(1) removal from anywhere
//! assert_eq!(queue.remove(handle), Ok(42));
//!
//! // The handle is now stale, even after its slot is reused
//! queue.push_back(7);
//! assert!(!queue.contains(handle));
//! ```
//!
//! # Handle Flavours
//!
//! [`List`] is generic over a [`RefKind`] that decides what an insert
//! returns and how a lookup validates it:
//!
//! | Alias | Handle | Size | Stale handle |
//! |-------|--------|------|--------------|
//! | [`SlotList<T>`] | [`SlotRef<T>`] | 16 bytes | always rejected |
//! | [`IndexList<T, K>`] | `K` (any [`Key`]) | `size_of::<K>()` | may alias a reused slot |
//!
//! Use [`IndexList`] when handles never outlive their nodes, for example when
//! the owner removes them in the same code path that created them, and the
//! smaller slots matter.
//!
//! # Fail-Fast Cursors
//!
//! Borrowing iterators ([`List::iter`], [`Deque::iter`]) need no checks: the
//! borrow checker forbids mutation while they live. [`Cursor`] and
//! [`DequeCursor`] hold no borrow and detect structural mutation instead:
//!
//! ```
//! use freeslot_collections::{ListError, SlotList};
//!
//! let mut list: SlotList<u32> = (0..4).collect();
//! let mut cursor = list.cursor();
//!
//! let (first, _) = cursor.advance(&list).unwrap().unwrap();
//! list.remove(first).unwrap();
//! assert_eq!(cursor.advance(&list).err(), Some(ListError::Invalidated));
//! ```
//!
//! # Data Structures
//!
//! | Structure | Use Case | Key Operations |
//! |-----------|----------|----------------|
//! | [`List`] | FIFO queues, LRU caches, order books | O(1) insert/remove anywhere |
//! | [`Deque`] | Sliding windows, indexed queues | O(1) ends, O(min(i, n - i)) middle |
//! | [`EntryMap`] | Lookup once, access by index | O(1) by entry index |
//! | [`BiMap`] | Symbol tables, id translation | O(1) both directions |
//!
//! # Feature Flags
//!
//! - `rand` - Enable `Deque::shuffle`

#![warn(missing_docs)]

mod arena;

pub mod bimap;
pub mod cursor;
pub mod deque;
pub mod error;
pub mod key;
pub mod list;
pub mod map;

pub use bimap::{BiMap, Evicted};
pub use cursor::Cursor;
pub use deque::{Deque, DequeBuilder, DequeCursor};
pub use error::{BiMapError, BuildError, DequeError, ListError};
pub use key::Key;
pub use list::{
    Checked, IndexList, List, ListBuilder, ListId, Raw, RefKind, SlotList, SlotRef,
    DEFAULT_CAPACITY,
};
pub use map::{EntryMap, Occupied};
