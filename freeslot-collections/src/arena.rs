//! Slot arena: a growable array of slots with an intrusive free chain.
//!
//! Every slot is either live (holds a value plus list links) or free. Free
//! slots reuse their `next` field as the free-chain link, so recycling costs
//! no second allocation. Indices are stable for a slot's whole lifetime;
//! growth only ever appends.

use crate::Key;

/// Per-slot occupancy stamp.
///
/// `u32` is a generation counter bumped every time the slot's occupant
/// changes identity. `()` stores nothing, for containers that trust their
/// callers' indices.
pub trait Stamp: Copy + Eq + Default + core::fmt::Debug {
    /// Returns the stamp for the slot's next occupant.
    fn bump(self) -> Self;
}

impl Stamp for u32 {
    #[inline]
    fn bump(self) -> Self {
        self.wrapping_add(1)
    }
}

impl Stamp for () {
    #[inline]
    fn bump(self) -> Self {}
}

/// One cell of the arena.
///
/// `value` is `None` while the slot is free. A free slot always has
/// `prev == NONE`; its `next` is the following free slot.
#[derive(Debug, Clone)]
pub struct Slot<T, K, S> {
    pub(crate) value: Option<T>,
    pub(crate) next: K,
    pub(crate) prev: K,
    pub(crate) stamp: S,
}

impl<T, K, S> Slot<T, K, S> {
    /// Returns `true` if the slot currently holds a value.
    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.value.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct SlotArena<T, K: Key, S: Stamp> {
    slots: Vec<Slot<T, K, S>>,
    free_head: K,
    free_len: usize,
    capacity: usize,
}

impl<T, K: Key, S: Stamp> SlotArena<T, K, S> {
    /// Creates an arena with room for `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds the key type's index space.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(
            capacity <= K::NONE.as_usize(),
            "capacity exceeds key type maximum"
        );
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: K::NONE,
            free_len: 0,
            capacity,
        }
    }

    /// Slots the arena can hold before it has to grow.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots ever handed out (live + free).
    #[inline]
    #[cfg(test)]
    pub fn taken(&self) -> usize {
        self.slots.len()
    }

    /// Slots currently on the free chain.
    #[inline]
    pub fn free_len(&self) -> usize {
        self.free_len
    }

    /// Head of the free chain, or `NONE`.
    #[inline]
    #[cfg(test)]
    pub fn free_head(&self) -> K {
        self.free_head
    }

    #[inline]
    pub fn slot(&self, index: K) -> Option<&Slot<T, K, S>> {
        self.slots.get(index.as_usize())
    }

    #[inline]
    #[cfg(test)]
    pub fn slot_mut(&mut self, index: K) -> Option<&mut Slot<T, K, S>> {
        self.slots.get_mut(index.as_usize())
    }

    #[inline]
    pub fn slots(&self) -> &[Slot<T, K, S>] {
        &self.slots
    }

    #[inline]
    pub fn slots_mut(&mut self) -> &mut [Slot<T, K, S>] {
        &mut self.slots
    }

    /// Stores `value` in a slot and returns its index.
    ///
    /// Pops the free chain when possible, otherwise appends a virgin slot,
    /// doubling the capacity first if the arena is full. The returned slot
    /// is unlinked (`next == prev == NONE`).
    pub fn take(&mut self, value: T) -> K {
        if self.free_head.is_some() {
            let index = self.free_head;
            let slot = &mut self.slots[index.as_usize()];
            self.free_head = slot.next;
            slot.next = K::NONE;
            slot.prev = K::NONE;
            slot.value = Some(value);
            self.free_len -= 1;
            return index;
        }

        if self.slots.len() == self.capacity {
            self.grow(self.capacity + 1);
        }

        let index = K::from_usize(self.slots.len());
        self.slots.push(Slot {
            value: Some(value),
            next: K::NONE,
            prev: K::NONE,
            stamp: S::default(),
        });
        index
    }

    /// Releases the slot at `index` and returns its value.
    ///
    /// The slot is pushed onto the free chain and its stamp is bumped.
    /// Returns `None` (and changes nothing) if the slot is out of range or
    /// already free. The caller must have unlinked the slot first.
    pub fn give(&mut self, index: K) -> Option<T> {
        let free_head = self.free_head;
        let slot = self.slots.get_mut(index.as_usize())?;
        let value = slot.value.take()?;
        slot.prev = K::NONE;
        slot.next = free_head;
        slot.stamp = slot.stamp.bump();
        self.free_head = index;
        self.free_len += 1;
        Some(value)
    }

    /// Bumps the stamp of an occupied slot and returns the new stamp.
    #[inline]
    pub fn restamp(&mut self, index: K) -> S {
        let slot = &mut self.slots[index.as_usize()];
        slot.stamp = slot.stamp.bump();
        slot.stamp
    }

    /// Exchanges the values held by two slots, leaving links untouched.
    pub fn swap_values(&mut self, a: K, b: K) {
        let (a, b) = (a.as_usize(), b.as_usize());
        if a == b {
            return;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (left, right) = self.slots.split_at_mut(hi);
        core::mem::swap(&mut left[lo].value, &mut right[0].value);
    }

    /// Ensures room for at least `additional` more live values.
    pub fn reserve(&mut self, additional: usize) {
        let live = self.slots.len() - self.free_len;
        let required = live.saturating_add(additional);
        // free slots are reused before the arena appends
        if required > self.capacity {
            self.grow(required);
        }
    }

    /// Drops every slot, keeping the allocation.
    ///
    /// Indices restart at zero and stamps restart at their default, so any
    /// owner that hands out stamped handles must change its identity too.
    pub fn truncate(&mut self) {
        self.slots.clear();
        self.free_head = K::NONE;
        self.free_len = 0;
    }

    fn grow(&mut self, min_capacity: usize) {
        let limit = K::NONE.as_usize();
        let new_capacity = self
            .capacity
            .saturating_mul(2)
            .max(min_capacity)
            .max(1)
            .min(limit);
        assert!(
            new_capacity >= min_capacity,
            "slot index space exhausted for key type"
        );

        tracing::trace!(
            old_capacity = self.capacity,
            new_capacity,
            "growing slot arena"
        );

        self.slots.reserve_exact(new_capacity - self.slots.len());
        self.capacity = new_capacity;
    }
}
