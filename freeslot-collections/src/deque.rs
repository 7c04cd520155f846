//! Indexed double-ended queue over a circular buffer.
//!
//! Logical index `i` lives at physical slot `(offset + i) % capacity`. Pushes
//! and pops at either end are O(1). Inserting or removing in the middle
//! shifts whichever side of the gap is shorter, so it moves at most half the
//! elements. When the live run crosses the physical end of the buffer the
//! deque is *split*; [`Deque::make_contiguous`] undoes that.
//!
//! # Example
//!
//! ```
//! use freeslot_collections::Deque;
//!
//! let mut deque: Deque<u32> = Deque::with_capacity(4);
//! deque.push_back(2);
//! deque.push_back(3);
//! deque.push_front(1);
//! assert!(deque.is_split());
//!
//! deque.insert(1, 10).unwrap();
//! assert_eq!(deque.to_vec(), vec![1, 10, 2, 3]);
//!
//! deque.remove_range(1, 2).unwrap();
//! assert_eq!(deque.to_vec(), vec![1, 3]);
//! assert_eq!(deque[1], 3);
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;
use core::ops::{self, Bound, Range, RangeBounds};
use core::slice;
use std::sync::atomic::{self, AtomicU64};

use crate::list::DEFAULT_CAPACITY;
use crate::{BuildError, DequeError};

static NEXT_DEQUE_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_DEQUE_ID.fetch_add(1, atomic::Ordering::Relaxed)
}

/// A growable ring buffer with O(1) access by logical index.
pub struct Deque<T> {
    buf: Box<[Option<T>]>,
    offset: usize,
    len: usize,
    version: u32,
    id: u64,
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deque<T> {
    /// Creates an empty deque with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty deque with room for `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        Self {
            buf: alloc(capacity),
            offset: 0,
            len: 0,
            version: 0,
            id: next_id(),
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the structure version. Indexed writes leave it unchanged.
    #[inline]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Returns `true` if the live run wraps past the end of the buffer.
    #[inline]
    pub fn is_split(&self) -> bool {
        self.offset + self.len > self.buf.len()
    }

    #[inline]
    fn phys(&self, index: usize) -> usize {
        let p = self.offset + index;
        if p >= self.buf.len() {
            p - self.buf.len()
        } else {
            p
        }
    }

    #[inline]
    fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Physical ranges holding the live run: head part, then wrapped part.
    fn ranges(&self) -> (Range<usize>, Range<usize>) {
        let cap = self.buf.len();
        if self.offset + self.len <= cap {
            (self.offset..self.offset + self.len, 0..0)
        } else {
            (self.offset..cap, 0..self.offset + self.len - cap)
        }
    }

    /// Moves the live run into a fresh buffer of `capacity` slots at offset 0.
    fn relocate(&mut self, capacity: usize) {
        let mut buf = alloc(capacity);
        for (i, slot) in buf.iter_mut().take(self.len).enumerate() {
            let p = self.phys(i);
            *slot = self.buf[p].take();
        }
        self.buf = buf;
        self.offset = 0;
    }

    fn grow_if_full(&mut self) {
        if self.len == self.buf.len() {
            let new_capacity = self.buf.len().saturating_mul(2).max(1);
            tracing::trace!(
                old_capacity = self.buf.len(),
                new_capacity,
                "growing deque"
            );
            self.relocate(new_capacity);
        }
    }

    // ========================================================================
    // Ends
    // ========================================================================

    /// Appends an element, growing the buffer if full.
    pub fn push_back(&mut self, value: T) {
        self.grow_if_full();
        let p = self.phys(self.len);
        self.buf[p] = Some(value);
        self.len += 1;
        self.bump_version();
    }

    /// Prepends an element, growing the buffer if full.
    pub fn push_front(&mut self, value: T) {
        self.grow_if_full();
        self.offset = if self.offset == 0 {
            self.buf.len() - 1
        } else {
            self.offset - 1
        };
        self.buf[self.offset] = Some(value);
        self.len += 1;
        self.bump_version();
    }

    /// Removes and returns the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = self.buf[self.offset].take();
        self.offset = self.phys(1);
        self.len -= 1;
        self.bump_version();
        value
    }

    /// Removes and returns the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let p = self.phys(self.len - 1);
        let value = self.buf[p].take();
        self.len -= 1;
        self.bump_version();
        value
    }

    /// Returns the first element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns the first element mutably.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Returns the last element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Returns the last element mutably.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.len.checked_sub(1).and_then(|i| self.get_mut(i))
    }

    // ========================================================================
    // Indexed access
    // ========================================================================

    /// Returns the element at logical `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            self.buf[self.phys(index)].as_ref()
        } else {
            None
        }
    }

    /// Returns the element at logical `index` mutably, or `None` if out of range.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            let p = self.phys(index);
            self.buf[p].as_mut()
        } else {
            None
        }
    }

    /// Overwrites the element at `index` and returns the old one.
    ///
    /// # Errors
    ///
    /// [`DequeError::OutOfRange`] if `index >= len`.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, DequeError> {
        let len = self.len;
        let slot = self
            .get_mut(index)
            .ok_or(DequeError::OutOfRange { index, len })?;
        Ok(mem::replace(slot, value))
    }

    // ========================================================================
    // Middle insert / remove
    // ========================================================================

    /// Inserts `value` so it ends up at logical `index`.
    ///
    /// Elements on the shorter side of `index` shift by one.
    ///
    /// # Errors
    ///
    /// [`DequeError::OutOfRange`] if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), DequeError> {
        if index > self.len {
            return Err(DequeError::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.grow_if_full();

        if index < self.len - index {
            // open a slot before the head and walk it right to `index`
            self.offset = if self.offset == 0 {
                self.buf.len() - 1
            } else {
                self.offset - 1
            };
            for j in 0..index {
                let (a, b) = (self.phys(j), self.phys(j + 1));
                self.buf.swap(a, b);
            }
        } else {
            // walk the free slot past the tail left to `index`
            for j in (index..self.len).rev() {
                let (a, b) = (self.phys(j + 1), self.phys(j));
                self.buf.swap(a, b);
            }
        }

        let p = self.phys(index);
        self.buf[p] = Some(value);
        self.len += 1;
        self.bump_version();
        Ok(())
    }

    /// Removes and returns the element at `index`, or `None` if out of range.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        let p = self.phys(index);
        let value = self.buf[p].take();
        self.close_gap(index, 1);
        value
    }

    /// Removes `count` elements starting at logical `index`.
    ///
    /// # Errors
    ///
    /// [`DequeError::RangeOutOfBounds`] if `index + count > len`; nothing is
    /// removed.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Result<(), DequeError> {
        let end = index.saturating_add(count);
        if end > self.len {
            return Err(DequeError::RangeOutOfBounds {
                start: index,
                count,
                len: self.len,
            });
        }
        if count == 0 {
            return Ok(());
        }
        for i in index..end {
            let p = self.phys(i);
            self.buf[p] = None;
        }
        self.close_gap(index, count);
        Ok(())
    }

    /// Closes the run of `count` empty slots at logical `index`.
    fn close_gap(&mut self, index: usize, count: usize) {
        let after = self.len - index - count;
        if index < after {
            // move the head run right
            for j in (0..index).rev() {
                let (a, b) = (self.phys(j), self.phys(j + count));
                self.buf.swap(a, b);
            }
            self.offset = self.phys(count);
        } else {
            // move the tail run left
            for j in index + count..self.len {
                let (a, b) = (self.phys(j - count), self.phys(j));
                self.buf.swap(a, b);
            }
        }
        self.len -= count;
        if self.len == 0 {
            self.offset = 0;
        }
        self.bump_version();
    }

    /// Removes every element, keeping the buffer.
    pub fn clear(&mut self) {
        tracing::debug!(len = self.len, capacity = self.buf.len(), "clearing deque");
        let (head, tail) = self.ranges();
        for slot in &mut self.buf[head] {
            *slot = None;
        }
        for slot in &mut self.buf[tail] {
            *slot = None;
        }
        self.offset = 0;
        self.len = 0;
        self.bump_version();
    }

    // ========================================================================
    // Capacity
    // ========================================================================

    /// Resizes the buffer to exactly `capacity` slots.
    ///
    /// The live run is copied to the start of the new buffer.
    ///
    /// # Errors
    ///
    /// [`DequeError::CapacityTooSmall`] if `capacity` is 0 or below `len`.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<(), DequeError> {
        if capacity == 0 || capacity < self.len {
            return Err(DequeError::CapacityTooSmall {
                requested: capacity,
                len: self.len,
            });
        }
        if capacity != self.buf.len() {
            tracing::debug!(
                old_capacity = self.buf.len(),
                new_capacity = capacity,
                "resizing deque"
            );
            self.relocate(capacity);
            self.bump_version();
        }
        Ok(())
    }

    /// Reserves room for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        let required = self.len.saturating_add(additional);
        if required > self.buf.len() {
            let new_capacity = required.max(self.buf.len().saturating_mul(2));
            tracing::trace!(
                old_capacity = self.buf.len(),
                new_capacity,
                "growing deque"
            );
            self.relocate(new_capacity);
            self.bump_version();
        }
    }

    /// Rotates the buffer so the live run starts at physical slot 0.
    pub fn make_contiguous(&mut self) {
        if self.offset != 0 {
            self.buf.rotate_left(self.offset);
            self.offset = 0;
            self.bump_version();
        }
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Returns the index of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|item| item == value)
    }

    /// Returns the index of the first element matching `pred`.
    pub fn position<F>(&self, pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().position(pred)
    }

    /// Returns `true` if any element equals `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|item| item == value)
    }

    /// Binary searches a sorted `range` for the first element equal to `value`.
    ///
    /// Returns `Ok(index)` of the first match, or `Err(index)` where `value`
    /// could be inserted to keep the range sorted.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds.
    pub fn binary_search_first<B>(&self, range: B, value: &T) -> Result<usize, usize>
    where
        T: Ord,
        B: RangeBounds<usize>,
    {
        self.binary_search_first_by(range, |item| item.cmp(value))
    }

    /// Binary searches a sorted `range` for the last element equal to `value`.
    ///
    /// Same return convention as [`binary_search_first`](Self::binary_search_first).
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds.
    pub fn binary_search_last<B>(&self, range: B, value: &T) -> Result<usize, usize>
    where
        T: Ord,
        B: RangeBounds<usize>,
    {
        self.binary_search_last_by(range, |item| item.cmp(value))
    }

    /// [`binary_search_first`](Self::binary_search_first) with a comparator.
    ///
    /// `f` returns how an element orders relative to the target.
    pub fn binary_search_first_by<B, F>(&self, range: B, mut f: F) -> Result<usize, usize>
    where
        B: RangeBounds<usize>,
        F: FnMut(&T) -> Ordering,
    {
        let Range { start, end } = self.resolve_range(range);
        let mut lo = start;
        let mut hi = end;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if f(&self[mid]) == Ordering::Less {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        if lo < end && f(&self[lo]) == Ordering::Equal {
            Ok(lo)
        } else {
            Err(lo)
        }
    }

    /// [`binary_search_last`](Self::binary_search_last) with a comparator.
    pub fn binary_search_last_by<B, F>(&self, range: B, mut f: F) -> Result<usize, usize>
    where
        B: RangeBounds<usize>,
        F: FnMut(&T) -> Ordering,
    {
        let Range { start, end } = self.resolve_range(range);
        let mut lo = start;
        let mut hi = end;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if f(&self[mid]) == Ordering::Greater {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        if lo > start && f(&self[lo - 1]) == Ordering::Equal {
            Ok(lo - 1)
        } else {
            Err(lo)
        }
    }

    fn resolve_range<B: RangeBounds<usize>>(&self, range: B) -> Range<usize> {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e + 1,
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.len,
        };
        assert!(
            start <= end && end <= self.len,
            "range {start}..{end} out of bounds for deque of length {}",
            self.len
        );
        start..end
    }

    // ========================================================================
    // Bulk
    // ========================================================================

    /// Copies the elements, front to back, into a `Vec`.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Moves the elements, front to back, into a `Vec`.
    pub fn into_vec(self) -> Vec<T> {
        self.into_iter().collect()
    }

    /// Sorts the elements in place. Not stable.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(T::cmp);
    }

    /// Sorts the elements in place with a comparator. Not stable.
    ///
    /// Relinearises the buffer first if it is split or offset.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.make_contiguous();
        self.buf[..self.len].sort_unstable_by(|a, b| match (a, b) {
            (Some(a), Some(b)) => compare(a, b),
            (a, b) => a.is_some().cmp(&b.is_some()),
        });
    }

    /// Shuffles the elements in place.
    #[cfg(feature = "rand")]
    pub fn shuffle<G: rand::Rng + ?Sized>(&mut self, rng: &mut G) {
        use rand::seq::SliceRandom;

        self.make_contiguous();
        self.buf[..self.len].shuffle(rng);
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns a front-to-back iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        let (head, tail) = self.ranges();
        Iter {
            head: self.buf[head].iter(),
            tail: self.buf[tail].iter(),
        }
    }

    /// Returns a front-to-back iterator of mutable references.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (head, tail) = self.ranges();
        // the wrapped part always lies below the head part
        let (low, high) = self.buf.split_at_mut(head.start);
        IterMut {
            head: high[..head.len()].iter_mut(),
            tail: low[tail].iter_mut(),
        }
    }

    /// Returns a detached cursor that fails fast on structural mutation.
    pub fn cursor(&self) -> DequeCursor {
        DequeCursor {
            owner: self.id,
            version: self.version,
            split: self.is_split(),
            position: 0,
            faulted: false,
        }
    }
}

fn alloc<T>(capacity: usize) -> Box<[Option<T>]> {
    (0..capacity).map(|_| None).collect()
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`Deque`].
///
/// ```
/// use freeslot_collections::{BuildError, Deque, DequeBuilder};
///
/// let deque: Deque<u8> = DequeBuilder::default().capacity(64).build().unwrap();
/// assert_eq!(deque.capacity(), 64);
///
/// let err = DequeBuilder::default().capacity(0).build::<u8>();
/// assert_eq!(err.err(), Some(BuildError::ZeroCapacity));
/// ```
#[derive(Clone, Debug, Default)]
pub struct DequeBuilder {
    capacity: Option<usize>,
}

impl DequeBuilder {
    /// Pre-allocate room for this many elements. Default: [`DEFAULT_CAPACITY`].
    pub fn capacity(mut self, slots: usize) -> Self {
        self.capacity = Some(slots);
        self
    }

    /// Builds the deque.
    ///
    /// # Errors
    ///
    /// [`BuildError::ZeroCapacity`] for a zero capacity.
    pub fn build<T>(self) -> Result<Deque<T>, BuildError> {
        match self.capacity.unwrap_or(DEFAULT_CAPACITY) {
            0 => Err(BuildError::ZeroCapacity),
            capacity => Ok(Deque::with_capacity(capacity)),
        }
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// Detached, version-checked cursor over a [`Deque`].
///
/// Snapshots the deque's identity, version and split state at creation. Any
/// structural change afterwards, or passing a different deque, makes
/// [`advance`](Self::advance) fail with [`DequeError::Invalidated`]; indexed
/// writes do not. Once a check fails the cursor is faulted for good.
#[derive(Debug, Clone)]
pub struct DequeCursor {
    owner: u64,
    version: u32,
    split: bool,
    position: usize,
    faulted: bool,
}

impl DequeCursor {
    /// Returns the next element, front to back.
    ///
    /// # Errors
    ///
    /// [`DequeError::Invalidated`] if `deque` is not the deque this cursor was
    /// created from, or if it changed structurally since then.
    pub fn advance<'a, T>(&mut self, deque: &'a Deque<T>) -> Result<Option<&'a T>, DequeError> {
        self.check(deque)?;
        let item = deque.get(self.position);
        if item.is_some() {
            self.position += 1;
        }
        Ok(item)
    }

    /// Rewinds to the front.
    ///
    /// # Errors
    ///
    /// [`DequeError::Invalidated`] if the deque changed since the cursor was
    /// created; the cursor stays faulted.
    pub fn reset<T>(&mut self, deque: &Deque<T>) -> Result<(), DequeError> {
        self.check(deque)?;
        self.position = 0;
        Ok(())
    }

    /// Logical index of the next element to be returned.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns `true` if a check has failed.
    #[inline]
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    fn check<T>(&mut self, deque: &Deque<T>) -> Result<(), DequeError> {
        if self.faulted
            || deque.id != self.owner
            || deque.version != self.version
            || deque.is_split() != self.split
        {
            self.faulted = true;
            return Err(DequeError::Invalidated);
        }
        Ok(())
    }
}

// =============================================================================
// Trait impls
// =============================================================================

impl<T> ops::Index<usize> for Deque<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!("{}", DequeError::OutOfRange { index, len: self.len }),
        }
    }
}

impl<T> ops::IndexMut<usize> for Deque<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("{}", DequeError::OutOfRange { index, len }),
        }
    }
}

/// The clone is a new deque instance: cursors of the source deque are
/// rejected by it.
impl<T: Clone> Clone for Deque<T> {
    fn clone(&self) -> Self {
        Self {
            buf: self.buf.clone(),
            offset: self.offset,
            len: self.len,
            version: self.version,
            id: next_id(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<T> IntoIterator for Deque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { deque: self }
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Deque<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over references to deque elements.
pub struct Iter<'a, T> {
    head: slice::Iter<'a, Option<T>>,
    tail: slice::Iter<'a, Option<T>>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            tail: self.tail.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.head
            .next()
            .or_else(|| self.tail.next())
            .and_then(Option::as_ref)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.head.len() + self.tail.len();
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        self.tail
            .next_back()
            .or_else(|| self.head.next_back())
            .and_then(Option::as_ref)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Iterator over mutable references to deque elements.
pub struct IterMut<'a, T> {
    head: slice::IterMut<'a, Option<T>>,
    tail: slice::IterMut<'a, Option<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        self.head
            .next()
            .or_else(|| self.tail.next())
            .and_then(Option::as_mut)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.head.len() + self.tail.len();
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        self.tail
            .next_back()
            .or_else(|| self.head.next_back())
            .and_then(Option::as_mut)
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over deque elements.
pub struct IntoIter<T> {
    deque: Deque<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.deque.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len, Some(self.deque.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.deque.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}
