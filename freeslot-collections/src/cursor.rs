//! Fail-fast list cursor.
//!
//! A [`Cursor`] walks a [`List`] front to back without borrowing it between
//! steps, so the list may be mutated while a walk is in progress. Each step
//! compares the list's identity and structure version with the values
//! captured when the cursor was created and refuses to continue once they
//! differ.
//!
//! ```
//! use freeslot_collections::{ListError, SlotList};
//!
//! let mut list: SlotList<u32> = (1..=3).collect();
//! let mut cursor = list.cursor();
//!
//! let (first, value) = cursor.advance(&list).unwrap().unwrap();
//! assert_eq!(*value, 1);
//!
//! // value writes are fine
//! list.set(first, 10).unwrap();
//! assert_eq!(cursor.advance(&list).unwrap().map(|(_, v)| *v), Some(2));
//!
//! // structural changes are not
//! list.remove(first).unwrap();
//! assert_eq!(cursor.advance(&list).err(), Some(ListError::Invalidated));
//! ```

use core::fmt;
use core::marker::PhantomData;

use crate::{Key, ListError};
use crate::list::{Checked, List, ListId, RefKind};

enum State<K, S> {
    NotStarted,
    At(K, S),
    Exhausted,
    Faulted,
}

/// Detached, version-checked cursor over a [`List`].
///
/// Created by [`List::cursor`]. Holds no borrow: pass the list to every
/// call. Once a check fails the cursor is faulted for good.
pub struct Cursor<T, R: RefKind = Checked> {
    owner: ListId,
    version: u32,
    state: State<R::Key, R::Stamp>,
    _marker: PhantomData<fn() -> T>,
}

impl<T, R: RefKind> Cursor<T, R> {
    pub(crate) fn new(owner: ListId, version: u32) -> Self {
        Self {
            owner,
            version,
            state: State::NotStarted,
            _marker: PhantomData,
        }
    }

    fn check(&mut self, list: &List<T, R>) -> Result<(), ListError> {
        if matches!(self.state, State::Faulted)
            || list.id() != self.owner
            || list.version() != self.version
        {
            self.state = State::Faulted;
            return Err(ListError::Invalidated);
        }
        Ok(())
    }

    /// Moves to the next node and returns its handle and value.
    ///
    /// Returns `Ok(None)` once the walk is past the tail.
    ///
    /// # Errors
    ///
    /// [`ListError::Invalidated`] if `list` is not the list this cursor was
    /// created from, or if it changed structurally since then.
    pub fn advance<'a>(
        &mut self,
        list: &'a List<T, R>,
    ) -> Result<Option<(R::Handle<T>, &'a T)>, ListError> {
        self.check(list)?;

        let index = match self.state {
            State::NotStarted => list.head_key(),
            State::At(index, _) => list.node(index).next,
            State::Exhausted | State::Faulted => return Ok(None),
        };

        if index.is_none() {
            self.state = State::Exhausted;
            return Ok(None);
        }

        let slot = list.node(index);
        let value = slot.value.as_ref().ok_or(ListError::InvalidNode)?;
        self.state = State::At(index, slot.stamp);
        Ok(Some((R::handle(self.owner, index, slot.stamp), value)))
    }

    /// Handle of the node the cursor is positioned on.
    pub fn current(&self) -> Option<R::Handle<T>> {
        match self.state {
            State::At(index, stamp) => Some(R::handle(self.owner, index, stamp)),
            _ => None,
        }
    }

    /// Rewinds to before the first node.
    ///
    /// # Errors
    ///
    /// [`ListError::Invalidated`] if the list changed since the cursor was
    /// created; the cursor stays faulted.
    pub fn reset(&mut self, list: &List<T, R>) -> Result<(), ListError> {
        self.check(list)?;
        self.state = State::NotStarted;
        Ok(())
    }

    /// Returns `true` once the walk has passed the tail.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, State::Exhausted)
    }

    /// Returns `true` if a check has failed.
    #[inline]
    pub fn is_faulted(&self) -> bool {
        matches!(self.state, State::Faulted)
    }
}

impl<T, R: RefKind> fmt::Debug for Cursor<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            State::NotStarted => "not started",
            State::At(..) => "positioned",
            State::Exhausted => "exhausted",
            State::Faulted => "faulted",
        };
        f.debug_struct("Cursor")
            .field("version", &self.version)
            .field("state", &state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{IndexList, ListError, SlotList};

    #[test]
    fn walks_front_to_back() {
        let list: SlotList<u32> = (1..=4).collect();
        let mut cursor = list.cursor();
        let mut seen = Vec::new();

        while let Some((handle, value)) = cursor.advance(&list).unwrap() {
            assert_eq!(list.get(handle), Ok(value));
            assert_eq!(cursor.current(), Some(handle));
            seen.push(*value);
        }

        assert_eq!(seen, vec![1, 2, 3, 4]);
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.advance(&list), Ok(None));
    }

    #[test]
    fn empty_list() {
        let list: IndexList<u32> = IndexList::new();
        let mut cursor = list.cursor();
        assert_eq!(cursor.advance(&list), Ok(None));
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn remove_during_walk_fails_fast() {
        let mut list: SlotList<u32> = (1..=4).collect();
        let mut cursor = list.cursor();

        let (handle, _) = cursor.advance(&list).unwrap().unwrap();
        list.remove(handle).unwrap();

        assert_eq!(cursor.advance(&list), Err(ListError::Invalidated));
        assert!(cursor.is_faulted());
        // stays faulted
        assert_eq!(cursor.advance(&list), Err(ListError::Invalidated));
    }

    #[test]
    fn push_during_walk_fails_fast() {
        let mut list: IndexList<u32> = (1..=2).collect();
        let mut cursor = list.cursor();
        cursor.advance(&list).unwrap();
        list.push_back(3);
        assert_eq!(cursor.advance(&list), Err(ListError::Invalidated));
    }

    #[test]
    fn value_writes_do_not_invalidate() {
        let mut list: SlotList<u32> = (1..=3).collect();
        let mut cursor = list.cursor();

        let mut total = 0;
        while let Some((handle, value)) = cursor.advance(&list).unwrap() {
            total += *value;
            list.set(handle, 0).unwrap();
        }
        assert_eq!(total, 6);

        let a = list.first().unwrap();
        let b = list.last().unwrap();
        let mut cursor = list.cursor();
        list.swap_values_silent(a, b).unwrap();
        assert!(cursor.advance(&list).is_ok());

        list.swap_values(a, b).unwrap();
        assert_eq!(cursor.advance(&list), Err(ListError::Invalidated));
    }

    #[test]
    fn foreign_list_is_rejected() {
        let list: SlotList<u32> = (1..=3).collect();
        let other = list.clone();
        let mut cursor = list.cursor();
        assert_eq!(cursor.advance(&other), Err(ListError::Invalidated));
    }

    #[test]
    fn clear_invalidates() {
        let mut list: SlotList<u32> = (1..=3).collect();
        let mut cursor = list.cursor();
        list.clear();
        assert_eq!(cursor.reset(&list), Err(ListError::Invalidated));
        assert!(cursor.is_faulted());
    }

    #[test]
    fn reset_rewinds() {
        let list: SlotList<u32> = (1..=2).collect();
        let mut cursor = list.cursor();
        while cursor.advance(&list).unwrap().is_some() {}

        cursor.reset(&list).unwrap();
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.advance(&list).unwrap().map(|(_, v)| *v), Some(1));
    }
}
