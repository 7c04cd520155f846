//! Doubly-linked list over a slot arena.
//!
//! Nodes live in one growable array of slots owned by the list. Removed
//! slots go onto an intrusive free chain and are reused by later inserts, so
//! steady-state churn performs no allocation. Nodes are addressed by a
//! handle whose flavour is chosen by the list's [`RefKind`]:
//!
//! | Alias | Handle | Stale handle |
//! |-------|--------|--------------|
//! | [`SlotList<T>`] | [`SlotRef<T>`] (owner + index + generation) | always rejected |
//! | [`IndexList<T, K>`] | bare `K` index | may alias a reused slot |
//!
//! Both aliases share every algorithm below; only handle creation and
//! validation differ.
//!
//! # Example
//!
//! ```
//! use freeslot_collections::{ListError, SlotList};
//!
//! let mut list: SlotList<u64> = SlotList::new();
//!
//! // Insert values - returns handle for O(1) access/removal later
//! let a = list.push_back(1);
//! let b = list.push_back(2);
//! let c = list.push_back(3);
//!
//! assert_eq!(list.len(), 3);
//! assert_eq!(list.get(b), Ok(&2));
//!
//! // Remove from middle - O(1)
//! assert_eq!(list.remove(b), Ok(2));
//! assert_eq!(list.get(b), Err(ListError::InvalidNode));
//!
//! // The freed slot is reused, but the old handle stays dead
//! let d = list.push_back(4);
//! assert_eq!(list.get(b), Err(ListError::InvalidNode));
//! assert_eq!(list.get(d), Ok(&4));
//!
//! assert_eq!(list.next(a), Ok(Some(c)));
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4]);
//! ```
//!
//! # Raw indices
//!
//! ```
//! use freeslot_collections::IndexList;
//!
//! let mut list: IndexList<&str> = IndexList::new();
//!
//! let a = list.push_back("a");
//! list.remove(a).unwrap();
//!
//! // Slot `a` is reused. The index cannot tell the difference.
//! let b = list.push_back("b");
//! assert_eq!(a, b);
//! assert!(list.contains(a));
//! ```

use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem;
use core::ops;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::arena::{Slot, SlotArena, Stamp};
use crate::cursor::Cursor;
use crate::{BuildError, Key, ListError};

/// Capacity used by [`List::new`] and [`ListBuilder`] when none is given.
pub const DEFAULT_CAPACITY: usize = 4;

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a list instance.
///
/// Stamped into every [`SlotRef`] so a handle from one list is rejected by
/// every other list. A list takes a fresh identity on [`List::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(u64);

impl ListId {
    fn next() -> Self {
        Self(NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

mod sealed {
    pub trait Sealed {}
}

/// How a list hands out and validates node references.
///
/// Sealed: implemented by [`Checked`] and [`Raw`] only.
pub trait RefKind: sealed::Sealed + Sized {
    /// Index type used for slot links.
    type Key: Key;

    /// Per-slot stamp: a generation for [`Checked`], nothing for [`Raw`].
    type Stamp: Stamp;

    /// The reference returned by inserts and accepted by lookups.
    type Handle<T>: Copy + Eq + Hash + fmt::Debug;

    #[doc(hidden)]
    fn handle<T>(owner: ListId, index: Self::Key, stamp: Self::Stamp) -> Self::Handle<T>;

    #[doc(hidden)]
    fn index<T>(handle: &Self::Handle<T>) -> Self::Key;

    #[doc(hidden)]
    fn accepts<T>(
        owner: ListId,
        handle: &Self::Handle<T>,
        slot: &Slot<T, Self::Key, Self::Stamp>,
        is_head: bool,
    ) -> bool;
}

/// Generation-checked references ([`SlotRef`]).
///
/// A handle is valid iff it was issued by this list instance and the slot's
/// generation still matches. Removal, [`List::replace`] and
/// [`List::swap_values`] retire the old generation.
#[derive(Debug)]
pub enum Checked {}

/// Bare index references.
///
/// No generation is stored. Validity is probed with the heuristic "the index
/// is in range and names the head or a slot with a predecessor". A slot that
/// was freed and re-taken passes the probe, so an index kept across a
/// remove may silently refer to a newer node.
#[derive(Debug)]
pub struct Raw<K = u32>(PhantomData<K>);

impl sealed::Sealed for Checked {}
impl<K: Key> sealed::Sealed for Raw<K> {}

impl RefKind for Checked {
    type Key = u32;
    type Stamp = u32;
    type Handle<T> = SlotRef<T>;

    #[inline]
    fn handle<T>(owner: ListId, index: u32, stamp: u32) -> SlotRef<T> {
        SlotRef {
            owner,
            index,
            generation: stamp,
            _marker: PhantomData,
        }
    }

    #[inline]
    fn index<T>(handle: &SlotRef<T>) -> u32 {
        handle.index
    }

    #[inline]
    fn accepts<T>(owner: ListId, handle: &SlotRef<T>, slot: &Slot<T, u32, u32>, _: bool) -> bool {
        handle.owner == owner && slot.is_occupied() && slot.stamp == handle.generation
    }
}

impl<K: Key> RefKind for Raw<K> {
    type Key = K;
    type Stamp = ();
    type Handle<T> = K;

    #[inline]
    fn handle<T>(_: ListId, index: K, _: ()) -> K {
        index
    }

    #[inline]
    fn index<T>(handle: &K) -> K {
        *handle
    }

    #[inline]
    fn accepts<T>(_: ListId, _: &K, slot: &Slot<T, K, ()>, is_head: bool) -> bool {
        is_head || slot.prev.is_some()
    }
}

/// Generation-stamped handle to a node of a [`SlotList`].
///
/// Plain `Copy` value: it never owns the node and never needs releasing.
/// It silently goes stale when the node is removed, replaced or swapped;
/// a stale handle is rejected with [`ListError::InvalidNode`].
pub struct SlotRef<T> {
    owner: ListId,
    index: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SlotRef<T> {
    /// Slot index inside the owning list.
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Generation captured when the handle was issued.
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl<T> Clone for SlotRef<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SlotRef<T> {}

impl<T> PartialEq for SlotRef<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for SlotRef<T> {}

impl<T> Hash for SlotRef<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for SlotRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotRef")
            .field("owner", &self.owner.0)
            .field("index", &self.index)
            .field("generation", &self.generation)
            .finish()
    }
}

/// List with generation-checked [`SlotRef`] handles.
pub type SlotList<T> = List<T, Checked>;

/// List with bare `K` indices.
pub type IndexList<T, K = u32> = List<T, Raw<K>>;

/// A doubly-linked list whose nodes live in an owned slot arena.
///
/// Tracks head, tail, length and a structure version. The version bumps on
/// every topology change (insert, remove, move, clear, stamp-bumping swap
/// or replace) and is what [`Cursor`] checks to detect mutation.
///
/// # Type Parameters
///
/// - `T`: Element type
/// - `R`: Reference kind, [`Checked`] (default) or [`Raw<K>`]
pub struct List<T, R: RefKind = Checked> {
    arena: SlotArena<T, R::Key, R::Stamp>,
    head: R::Key,
    tail: R::Key,
    len: usize,
    version: u32,
    id: ListId,
}

impl<T, R: RefKind> Default for List<T, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R: RefKind> List<T, R> {
    const NONE: R::Key = <R::Key as Key>::NONE;

    /// Creates an empty list with [`DEFAULT_CAPACITY`] slots.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty list with room for `capacity` nodes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or exceeds the key type's maximum.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        Self::from_arena(SlotArena::with_capacity(capacity))
    }

    fn from_arena(arena: SlotArena<T, R::Key, R::Stamp>) -> Self {
        Self {
            arena,
            head: Self::NONE,
            tail: Self::NONE,
            len: 0,
            version: 0,
            id: ListId::next(),
        }
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots the list can hold before growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Returns the number of freed slots waiting for reuse.
    #[inline]
    pub fn free_len(&self) -> usize {
        self.arena.free_len()
    }

    /// Returns the structure version.
    ///
    /// Changes on every topology change; unchanged by value writes.
    #[inline]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Reserves room for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        self.arena.reserve(additional);
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    #[inline]
    pub(crate) fn id(&self) -> ListId {
        self.id
    }

    #[inline]
    pub(crate) fn head_key(&self) -> R::Key {
        self.head
    }

    #[inline]
    pub(crate) fn node(&self, index: R::Key) -> &Slot<T, R::Key, R::Stamp> {
        &self.arena.slots()[index.as_usize()]
    }

    #[inline]
    fn node_mut(&mut self, index: R::Key) -> &mut Slot<T, R::Key, R::Stamp> {
        &mut self.arena.slots_mut()[index.as_usize()]
    }

    #[inline]
    pub(crate) fn handle_at(&self, index: R::Key) -> R::Handle<T> {
        R::handle(self.id, index, self.node(index).stamp)
    }

    #[inline]
    fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Maps a handle to a live slot index, rejecting stale or foreign handles.
    fn resolve(&self, handle: &R::Handle<T>) -> Result<R::Key, ListError> {
        let index = R::index(handle);
        match self.arena.slot(index) {
            Some(slot)
                if slot.is_occupied() && R::accepts(self.id, handle, slot, index == self.head) =>
            {
                Ok(index)
            }
            _ => Err(ListError::InvalidNode),
        }
    }

    // ========================================================================
    // Validity and navigation
    // ========================================================================

    /// Returns `true` if `handle` refers to a live node of this list.
    ///
    /// Exact for [`SlotList`]. For [`IndexList`] this is the range plus
    /// has-predecessor heuristic and reports `true` for a reused index.
    #[inline]
    pub fn contains(&self, handle: R::Handle<T>) -> bool {
        self.resolve(&handle).is_ok()
    }

    /// Returns the handle of the first node, or `None` if empty.
    #[inline]
    pub fn first(&self) -> Option<R::Handle<T>> {
        if self.head.is_none() {
            None
        } else {
            Some(self.handle_at(self.head))
        }
    }

    /// Returns the handle of the last node, or `None` if empty.
    #[inline]
    pub fn last(&self) -> Option<R::Handle<T>> {
        if self.tail.is_none() {
            None
        } else {
            Some(self.handle_at(self.tail))
        }
    }

    /// Returns the handle of the node after `handle`, or `None` at the tail.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidNode`] if `handle` is not live.
    #[inline]
    pub fn next(&self, handle: R::Handle<T>) -> Result<Option<R::Handle<T>>, ListError> {
        let next = self.node(self.resolve(&handle)?).next;
        Ok(if next.is_none() { None } else { Some(self.handle_at(next)) })
    }

    /// Returns the handle of the node before `handle`, or `None` at the head.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidNode`] if `handle` is not live.
    #[inline]
    pub fn prev(&self, handle: R::Handle<T>) -> Result<Option<R::Handle<T>>, ListError> {
        let prev = self.node(self.resolve(&handle)?).prev;
        Ok(if prev.is_none() { None } else { Some(self.handle_at(prev)) })
    }

    // ========================================================================
    // Insert operations
    // ========================================================================

    /// Pushes a value to the back of the list and returns its handle.
    #[inline]
    pub fn push_back(&mut self, value: T) -> R::Handle<T> {
        let index = self.arena.take(value);
        self.link_back(index);
        self.bump_version();
        self.handle_at(index)
    }

    /// Pushes a value to the front of the list and returns its handle.
    #[inline]
    pub fn push_front(&mut self, value: T) -> R::Handle<T> {
        let index = self.arena.take(value);
        self.link_front(index);
        self.bump_version();
        self.handle_at(index)
    }

    /// Inserts a value after an existing node.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidNode`] if `after` is not live; the value is dropped
    /// and the list is unchanged.
    #[inline]
    pub fn insert_after(
        &mut self,
        after: R::Handle<T>,
        value: T,
    ) -> Result<R::Handle<T>, ListError> {
        let after = self.resolve(&after)?;
        let index = self.arena.take(value);
        self.link_after(after, index);
        self.bump_version();
        Ok(self.handle_at(index))
    }

    /// Inserts a value before an existing node.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidNode`] if `before` is not live; the value is dropped
    /// and the list is unchanged.
    #[inline]
    pub fn insert_before(
        &mut self,
        before: R::Handle<T>,
        value: T,
    ) -> Result<R::Handle<T>, ListError> {
        let before = self.resolve(&before)?;
        let index = self.arena.take(value);
        self.link_before(before, index);
        self.bump_version();
        Ok(self.handle_at(index))
    }

    // ========================================================================
    // Remove operations (unlink + free)
    // ========================================================================

    /// Removes a node and returns its value.
    ///
    /// The slot goes onto the free chain; for [`SlotList`] its generation is
    /// bumped so `handle` (and every copy of it) is now stale.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidNode`] if `handle` is not live.
    #[inline]
    pub fn remove(&mut self, handle: R::Handle<T>) -> Result<T, ListError> {
        let index = self.resolve(&handle)?;
        self.remove_at(index).ok_or(ListError::InvalidNode)
    }

    /// Removes and returns the front element.
    ///
    /// Returns `None` if the list is empty.
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        if self.head.is_none() {
            return None;
        }
        self.remove_at(self.head)
    }

    /// Removes and returns the back element.
    ///
    /// Returns `None` if the list is empty.
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.tail.is_none() {
            return None;
        }
        self.remove_at(self.tail)
    }

    fn remove_at(&mut self, index: R::Key) -> Option<T> {
        self.unlink(index);
        self.bump_version();
        self.arena.give(index)
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns a reference to the value behind `handle`.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidNode`] if `handle` is not live.
    #[inline]
    pub fn get(&self, handle: R::Handle<T>) -> Result<&T, ListError> {
        let index = self.resolve(&handle)?;
        self.node(index).value.as_ref().ok_or(ListError::InvalidNode)
    }

    /// Returns a mutable reference to the value behind `handle`.
    ///
    /// Writing through it is not a structural change.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidNode`] if `handle` is not live.
    #[inline]
    pub fn get_mut(&mut self, handle: R::Handle<T>) -> Result<&mut T, ListError> {
        let index = self.resolve(&handle)?;
        self.node_mut(index)
            .value
            .as_mut()
            .ok_or(ListError::InvalidNode)
    }

    /// Overwrites the value behind `handle` and returns the old one.
    ///
    /// Handles stay valid and the structure version is unchanged, so
    /// in-flight cursors keep working.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidNode`] if `handle` is not live.
    #[inline]
    pub fn set(&mut self, handle: R::Handle<T>, value: T) -> Result<T, ListError> {
        Ok(mem::replace(self.get_mut(handle)?, value))
    }

    /// Overwrites the value behind `handle` and gives the node a new identity.
    ///
    /// Returns the node's fresh handle and the old value. For [`SlotList`]
    /// every handle issued before the call is stale afterwards. The node
    /// keeps its position.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidNode`] if `handle` is not live.
    pub fn replace(
        &mut self,
        handle: R::Handle<T>,
        value: T,
    ) -> Result<(R::Handle<T>, T), ListError> {
        let index = self.resolve(&handle)?;
        let slot = self
            .node_mut(index)
            .value
            .as_mut()
            .ok_or(ListError::InvalidNode)?;
        let old = mem::replace(slot, value);
        let stamp = self.arena.restamp(index);
        self.bump_version();
        Ok((R::handle(self.id, index, stamp), old))
    }

    /// Returns a reference to the front element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.head.is_none() {
            None
        } else {
            self.node(self.head).value.as_ref()
        }
    }

    /// Returns a mutable reference to the front element.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.head.is_none() {
            None
        } else {
            let head = self.head;
            self.node_mut(head).value.as_mut()
        }
    }

    /// Returns a reference to the back element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.tail.is_none() {
            None
        } else {
            self.node(self.tail).value.as_ref()
        }
    }

    /// Returns a mutable reference to the back element.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.tail.is_none() {
            None
        } else {
            let tail = self.tail;
            self.node_mut(tail).value.as_mut()
        }
    }

    // ========================================================================
    // Swapping and repositioning
    // ========================================================================

    /// Exchanges the values of two nodes and retires both identities.
    ///
    /// Bumps both slot stamps and the structure version, then returns fresh
    /// handles `(a', b')` where `a'` sits at `a`'s position (now holding
    /// `b`'s old value). For [`SlotList`] the pre-swap handles are stale.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidNode`] if either handle is not live.
    pub fn swap_values(
        &mut self,
        a: R::Handle<T>,
        b: R::Handle<T>,
    ) -> Result<(R::Handle<T>, R::Handle<T>), ListError> {
        let a = self.resolve(&a)?;
        let b = self.resolve(&b)?;
        self.arena.swap_values(a, b);
        let stamp_a = self.arena.restamp(a);
        let stamp_b = if a == b {
            stamp_a
        } else {
            self.arena.restamp(b)
        };
        self.bump_version();
        Ok((R::handle(self.id, a, stamp_a), R::handle(self.id, b, stamp_b)))
    }

    /// Exchanges the values of two nodes transparently.
    ///
    /// No stamp or version changes: existing handles stay valid and now read
    /// the swapped values, and in-flight cursors keep working.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidNode`] if either handle is not live.
    pub fn swap_values_silent(
        &mut self,
        a: R::Handle<T>,
        b: R::Handle<T>,
    ) -> Result<(), ListError> {
        let a = self.resolve(&a)?;
        let b = self.resolve(&b)?;
        self.arena.swap_values(a, b);
        Ok(())
    }

    /// Moves a node to the back of the list. Useful for LRU caches.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidNode`] if `handle` is not live.
    pub fn move_to_back(&mut self, handle: R::Handle<T>) -> Result<(), ListError> {
        let index = self.resolve(&handle)?;
        // Already at back
        if self.tail != index {
            self.unlink(index);
            self.link_back(index);
            self.bump_version();
        }
        Ok(())
    }

    /// Moves a node to the front of the list.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidNode`] if `handle` is not live.
    pub fn move_to_front(&mut self, handle: R::Handle<T>) -> Result<(), ListError> {
        let index = self.resolve(&handle)?;
        // Already at front
        if self.head != index {
            self.unlink(index);
            self.link_front(index);
            self.bump_version();
        }
        Ok(())
    }

    // ========================================================================
    // Bulk operations
    // ========================================================================

    /// Removes all elements, resetting the bookkeeping in O(1).
    ///
    /// The allocation is kept. Slot indices restart at zero, and the list
    /// takes a new identity so every previously issued [`SlotRef`] is
    /// rejected.
    pub fn clear(&mut self) {
        tracing::debug!(len = self.len, capacity = self.capacity(), "clearing list");
        self.arena.truncate();
        self.head = Self::NONE;
        self.tail = Self::NONE;
        self.len = 0;
        self.id = ListId::next();
        self.bump_version();
    }

    /// Removes all elements by walking the live chain.
    ///
    /// O(len) rather than O(capacity): only occupied slots are touched, and
    /// each goes onto the free chain with its stamp bumped. Indices already
    /// taken stay taken, so later inserts reuse them.
    pub fn clear_chain(&mut self) {
        tracing::debug!(len = self.len, capacity = self.capacity(), "clearing list chain");
        let mut index = self.head;
        while index.is_some() {
            let next = self.node(index).next;
            self.arena.give(index);
            index = next;
        }
        self.head = Self::NONE;
        self.tail = Self::NONE;
        self.len = 0;
        self.bump_version();
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns an iterator over references to elements, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, R> {
        Iter {
            slots: self.arena.slots(),
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Returns an iterator over mutable references to elements, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T, R> {
        IterMut {
            slots: self.arena.slots_mut().as_mut_ptr(),
            front: self.head,
            back: self.tail,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Returns an iterator over node handles, front to back.
    ///
    /// Collect handles first when you plan to modify the list.
    #[inline]
    pub fn handles(&self) -> Handles<'_, T, R> {
        Handles {
            owner: self.id,
            slots: self.arena.slots(),
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Removes elements front to back, yielding them.
    ///
    /// The list is empty once the iterator is dropped, even if it was not
    /// consumed.
    #[inline]
    pub fn drain(&mut self) -> Drain<'_, T, R> {
        Drain { list: self }
    }

    /// Returns a detached cursor that fails fast on structural mutation.
    ///
    /// See [`Cursor`].
    #[inline]
    pub fn cursor(&self) -> Cursor<T, R> {
        Cursor::new(self.id, self.version)
    }

    // ========================================================================
    // Linking (splice at most two neighbours)
    // ========================================================================

    fn link_back(&mut self, index: R::Key) {
        let tail = self.tail;
        let node = self.node_mut(index);
        node.prev = tail;
        node.next = Self::NONE;

        if tail.is_some() {
            self.node_mut(tail).next = index;
        } else {
            self.head = index;
        }

        self.tail = index;
        self.len += 1;
    }

    fn link_front(&mut self, index: R::Key) {
        let head = self.head;
        let node = self.node_mut(index);
        node.next = head;
        node.prev = Self::NONE;

        if head.is_some() {
            self.node_mut(head).prev = index;
        } else {
            self.tail = index;
        }

        self.head = index;
        self.len += 1;
    }

    fn link_after(&mut self, after: R::Key, index: R::Key) {
        let next = self.node(after).next;
        let node = self.node_mut(index);
        node.prev = after;
        node.next = next;

        self.node_mut(after).next = index;

        if next.is_some() {
            self.node_mut(next).prev = index;
        } else {
            self.tail = index;
        }

        self.len += 1;
    }

    fn link_before(&mut self, before: R::Key, index: R::Key) {
        let prev = self.node(before).prev;
        let node = self.node_mut(index);
        node.next = before;
        node.prev = prev;

        self.node_mut(before).prev = index;

        if prev.is_some() {
            self.node_mut(prev).next = index;
        } else {
            self.head = index;
        }

        self.len += 1;
    }

    fn unlink(&mut self, index: R::Key) {
        let node = self.node(index);
        let prev = node.prev;
        let next = node.next;

        if prev.is_some() {
            self.node_mut(prev).next = next;
        } else {
            self.head = next;
        }

        if next.is_some() {
            self.node_mut(next).prev = prev;
        } else {
            self.tail = prev;
        }

        let node = self.node_mut(index);
        node.prev = Self::NONE;
        node.next = Self::NONE;

        self.len -= 1;
    }

    /// Walks both chains and panics if any structural invariant is broken.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let slots = self.arena.slots();

        let mut seen = 0;
        let mut prev = Self::NONE;
        let mut index = self.head;
        while index.is_some() {
            let slot = &slots[index.as_usize()];
            assert!(slot.is_occupied(), "live chain reaches a free slot");
            assert!(slot.prev == prev, "broken back link");
            prev = index;
            index = slot.next;
            seen += 1;
            assert!(seen <= self.len, "live chain longer than len");
        }
        assert_eq!(seen, self.len);
        assert!(prev == self.tail, "chain does not end at tail");

        let mut free = 0;
        let mut index = self.arena.free_head();
        while index.is_some() {
            let slot = &slots[index.as_usize()];
            assert!(!slot.is_occupied(), "free chain reaches a live slot");
            assert!(slot.prev.is_none());
            index = slot.next;
            free += 1;
        }
        assert_eq!(free, self.arena.free_len());
        assert_eq!(self.len, self.arena.taken() - free);
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`List`].
///
/// ```
/// use freeslot_collections::{BuildError, IndexList, ListBuilder, SlotList};
///
/// let list: SlotList<u64> = ListBuilder::default().capacity(1024).build().unwrap();
/// assert_eq!(list.capacity(), 1024);
///
/// let err = ListBuilder::default().capacity(0).build::<u64, _>().map(|_: SlotList<u64>| ());
/// assert_eq!(err, Err(BuildError::ZeroCapacity));
///
/// let err = ListBuilder::default()
///     .capacity(70_000)
///     .build()
///     .map(|_: IndexList<u8, u16>| ());
/// assert!(matches!(err, Err(BuildError::CapacityOverflow { .. })));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ListBuilder {
    capacity: Option<usize>,
}

impl ListBuilder {
    /// Pre-allocate room for this many nodes. Default: [`DEFAULT_CAPACITY`].
    pub fn capacity(mut self, slots: usize) -> Self {
        self.capacity = Some(slots);
        self
    }

    /// Builds the list.
    ///
    /// # Errors
    ///
    /// [`BuildError::ZeroCapacity`] for a zero capacity,
    /// [`BuildError::CapacityOverflow`] if the key type cannot address it.
    pub fn build<T, R: RefKind>(self) -> Result<List<T, R>, BuildError> {
        let capacity = self.capacity.unwrap_or(DEFAULT_CAPACITY);
        if capacity == 0 {
            return Err(BuildError::ZeroCapacity);
        }
        let max = <R::Key as Key>::NONE.as_usize();
        if capacity > max {
            return Err(BuildError::CapacityOverflow { capacity, max });
        }
        Ok(List::from_arena(SlotArena::with_capacity(capacity)))
    }
}

// =============================================================================
// Trait impls
// =============================================================================

impl<T, R: RefKind> ops::Index<R::Handle<T>> for List<T, R> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `handle` is not live.
    fn index(&self, handle: R::Handle<T>) -> &T {
        match self.get(handle) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T, R: RefKind> ops::IndexMut<R::Handle<T>> for List<T, R> {
    /// # Panics
    ///
    /// Panics if `handle` is not live.
    fn index_mut(&mut self, handle: R::Handle<T>) -> &mut T {
        match self.get_mut(handle) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: fmt::Debug, R: RefKind> fmt::Debug for List<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// The clone is a new list instance: it has its own identity, so
/// [`SlotRef`]s of the source list are rejected by it. Raw indices carry over.
impl<T: Clone, R: RefKind> Clone for List<T, R> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            head: self.head,
            tail: self.tail,
            len: self.len,
            version: 0,
            id: ListId::next(),
        }
    }
}

impl<T: PartialEq, R: RefKind> PartialEq for List<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, R: RefKind> Eq for List<T, R> {}

impl<T, R: RefKind> Extend<T> for List<T, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T, R: RefKind> FromIterator<T> for List<T, R> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T, R: RefKind> IntoIterator for List<T, R> {
    type Item = T;
    type IntoIter = IntoIter<T, R>;

    fn into_iter(self) -> IntoIter<T, R> {
        IntoIter { list: self }
    }
}

impl<'a, T, R: RefKind> IntoIterator for &'a List<T, R> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, R>;

    fn into_iter(self) -> Iter<'a, T, R> {
        self.iter()
    }
}

impl<'a, T, R: RefKind> IntoIterator for &'a mut List<T, R> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, R>;

    fn into_iter(self) -> IterMut<'a, T, R> {
        self.iter_mut()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over references to list elements.
pub struct Iter<'a, T, R: RefKind> {
    slots: &'a [Slot<T, R::Key, R::Stamp>],
    front: R::Key,
    back: R::Key,
    remaining: usize,
}

impl<T, R: RefKind> Clone for Iter<'_, T, R> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T, R: RefKind> Iterator for Iter<'a, T, R> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let slot = &self.slots[self.front.as_usize()];
        self.remaining -= 1;
        self.front = slot.next;
        slot.value.as_ref()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, R: RefKind> DoubleEndedIterator for Iter<'a, T, R> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let slot = &self.slots[self.back.as_usize()];
        self.remaining -= 1;
        self.back = slot.prev;
        slot.value.as_ref()
    }
}

impl<T, R: RefKind> ExactSizeIterator for Iter<'_, T, R> {}
impl<T, R: RefKind> FusedIterator for Iter<'_, T, R> {}

/// Iterator over mutable references to list elements.
pub struct IterMut<'a, T, R: RefKind> {
    slots: *mut Slot<T, R::Key, R::Stamp>,
    front: R::Key,
    back: R::Key,
    remaining: usize,
    _marker: PhantomData<&'a mut [Slot<T, R::Key, R::Stamp>]>,
}

impl<'a, T, R: RefKind> Iterator for IterMut<'a, T, R> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        // Safety: `front` is a live slot of the exclusively borrowed arena.
        // `remaining` stops the walk after `len` nodes, so each slot is
        // yielded once and the returned borrows never alias.
        let slot = unsafe { &mut *self.slots.add(self.front.as_usize()) };
        self.remaining -= 1;
        self.front = slot.next;
        slot.value.as_mut()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, R: RefKind> DoubleEndedIterator for IterMut<'a, T, R> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        // Safety: see `next`
        let slot = unsafe { &mut *self.slots.add(self.back.as_usize()) };
        self.remaining -= 1;
        self.back = slot.prev;
        slot.value.as_mut()
    }
}

impl<T, R: RefKind> ExactSizeIterator for IterMut<'_, T, R> {}
impl<T, R: RefKind> FusedIterator for IterMut<'_, T, R> {}

/// Iterator over node handles.
pub struct Handles<'a, T, R: RefKind> {
    owner: ListId,
    slots: &'a [Slot<T, R::Key, R::Stamp>],
    front: R::Key,
    back: R::Key,
    remaining: usize,
}

impl<T, R: RefKind> Iterator for Handles<'_, T, R> {
    type Item = R::Handle<T>;

    #[inline]
    fn next(&mut self) -> Option<R::Handle<T>> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.front;
        let slot = &self.slots[index.as_usize()];
        self.remaining -= 1;
        self.front = slot.next;
        Some(R::handle(self.owner, index, slot.stamp))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, R: RefKind> DoubleEndedIterator for Handles<'_, T, R> {
    #[inline]
    fn next_back(&mut self) -> Option<R::Handle<T>> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.back;
        let slot = &self.slots[index.as_usize()];
        self.remaining -= 1;
        self.back = slot.prev;
        Some(R::handle(self.owner, index, slot.stamp))
    }
}

impl<T, R: RefKind> ExactSizeIterator for Handles<'_, T, R> {}
impl<T, R: RefKind> FusedIterator for Handles<'_, T, R> {}

/// Iterator that removes and returns elements from a list.
pub struct Drain<'a, T, R: RefKind> {
    list: &'a mut List<T, R>,
}

impl<T, R: RefKind> Iterator for Drain<'_, T, R> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T, R: RefKind> DoubleEndedIterator for Drain<'_, T, R> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T, R: RefKind> ExactSizeIterator for Drain<'_, T, R> {}

impl<T, R: RefKind> Drop for Drain<'_, T, R> {
    fn drop(&mut self) {
        // Exhaust remaining elements to ensure cleanup
        for _ in self.by_ref() {}
    }
}

/// Owning iterator over list elements.
pub struct IntoIter<T, R: RefKind> {
    list: List<T, R>,
}

impl<T, R: RefKind> Iterator for IntoIter<T, R> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T, R: RefKind> DoubleEndedIterator for IntoIter<T, R> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T, R: RefKind> ExactSizeIterator for IntoIter<T, R> {}
impl<T, R: RefKind> FusedIterator for IntoIter<T, R> {}


#[cfg(test)]
mod bench_latency {
    use super::*;
    use hdrhistogram::Histogram;

    #[inline]
    fn rdtscp() -> u64 {
        #[cfg(target_arch = "x86_64")]
        unsafe {
            core::arch::x86_64::__rdtscp(&mut 0)
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            std::time::Instant::now().elapsed().as_nanos() as u64
        }
    }

    fn print_histogram(name: &str, hist: &Histogram<u64>) {
        println!(
            "{:24} p50: {:4} cycles | p99: {:4} cycles | p999: {:5} cycles | min: {:4} | max: {:5}",
            name,
            hist.value_at_quantile(0.50),
            hist.value_at_quantile(0.99),
            hist.value_at_quantile(0.999),
            hist.min(),
            hist.max(),
        );
    }

    const WARMUP: usize = 10_000;
    const ITERATIONS: usize = 100_000;

    #[test]
    #[ignore]
    fn bench_slot_list_push_back() {
        let mut list: SlotList<u64> = SlotList::with_capacity(ITERATIONS + WARMUP);
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..WARMUP {
            list.push_back(i as u64);
            list.pop_back();
        }

        for i in 0..ITERATIONS {
            let start = rdtscp();
            let _ = list.push_back(i as u64);
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
            list.pop_back();
        }

        print_histogram("SlotList::push_back", &hist);
    }

    #[test]
    #[ignore]
    fn bench_slot_list_remove_middle() {
        let mut list: SlotList<u64> = SlotList::with_capacity(1024);
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..512 {
            list.push_back(i);
        }

        for i in 0..ITERATIONS {
            let handle = list.push_back(i as u64);
            list.push_back(i as u64);
            let start = rdtscp();
            let _ = list.remove(handle);
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
            list.pop_back();
        }

        print_histogram("SlotList::remove", &hist);
    }

    #[test]
    #[ignore]
    fn bench_index_list_get() {
        let mut list: IndexList<u64> = IndexList::with_capacity(1024);
        let keys: Vec<_> = (0..1024).map(|i| list.push_back(i)).collect();
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..ITERATIONS {
            let key = keys[i % keys.len()];
            let start = rdtscp();
            let _ = std::hint::black_box(list.get(key));
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
        }

        print_histogram("IndexList::get", &hist);
    }
}
