//! One-to-one map, searchable from either side.
//!
//! [`BiMap`] keeps a forward [`EntryMap<L, R>`] and a backward
//! [`EntryMap<R, L>`] in lockstep. Every mutating operation either updates
//! both sides or neither: when the backward insert rejects a duplicate, the
//! forward insert is rolled back before the error is returned.
//!
//! ```
//! use freeslot_collections::{BiMap, BiMapError};
//!
//! let mut symbols: BiMap<u32, &str> = BiMap::new();
//! symbols.insert(1, "AAPL").unwrap();
//! symbols.insert(2, "MSFT").unwrap();
//!
//! assert_eq!(symbols.get_by_left(&1), Some(&"AAPL"));
//! assert_eq!(symbols.get_by_right(&"MSFT"), Some(&2));
//!
//! assert_eq!(symbols.insert(3, "AAPL"), Err(BiMapError::DuplicateRight));
//! assert!(!symbols.contains_left(&3));
//! ```

use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};

use hashbrown::DefaultHashBuilder;

use crate::map::{self, EntryMap};
use crate::BiMapError;

/// Pairs removed by [`BiMap::insert_or_replace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evicted<L, R> {
    /// The pair that previously held the inserted left value.
    pub by_left: Option<(L, R)>,
    /// The pair that previously held the inserted right value.
    pub by_right: Option<(L, R)>,
}

impl<L, R> Evicted<L, R> {
    /// Returns `true` if nothing was evicted.
    pub fn is_empty(&self) -> bool {
        self.by_left.is_none() && self.by_right.is_none()
    }
}

/// Bidirectional one-to-one map.
#[derive(Clone)]
pub struct BiMap<L, R, S = DefaultHashBuilder> {
    forward: EntryMap<L, R, S>,
    backward: EntryMap<R, L, S>,
}

impl<L, R, S: Default> Default for BiMap<L, R, S> {
    fn default() -> Self {
        Self {
            forward: EntryMap::default(),
            backward: EntryMap::default(),
        }
    }
}

impl<L, R> BiMap<L, R> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map with room for `capacity` pairs.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<L, R, S> BiMap<L, R, S> {
    /// Creates an empty map with room for `capacity` pairs, using `hasher`
    /// for both sides.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self
    where
        S: Clone,
    {
        Self {
            forward: EntryMap::with_capacity_and_hasher(capacity, hasher.clone()),
            backward: EntryMap::with_capacity_and_hasher(capacity, hasher),
        }
    }

    /// Returns the number of pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns `true` if the map holds no pairs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// The left-to-right side.
    #[inline]
    pub fn forward(&self) -> &EntryMap<L, R, S> {
        &self.forward
    }

    /// The right-to-left side.
    #[inline]
    pub fn backward(&self) -> &EntryMap<R, L, S> {
        &self.backward
    }

    /// Removes every pair.
    pub fn clear(&mut self) {
        self.forward.clear();
        self.backward.clear();
    }

    /// Iterates `(left, right)` pairs.
    pub fn iter(&self) -> Iter<'_, L, R> {
        Iter {
            inner: self.forward.iter(),
        }
    }
}

impl<L, R, S> BiMap<L, R, S>
where
    L: Hash + Eq + Clone,
    R: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Inserts a new pair.
    ///
    /// # Errors
    ///
    /// - [`BiMapError::DuplicateLeft`] if `left` is already mapped. Nothing
    ///   changes.
    /// - [`BiMapError::DuplicateRight`] if `right` is already mapped. The
    ///   forward insert is undone, so nothing changes.
    pub fn insert(&mut self, left: L, right: R) -> Result<(), BiMapError> {
        let entry = self
            .forward
            .try_insert(left.clone(), right.clone())
            .map_err(|_| BiMapError::DuplicateLeft)?;

        if self.backward.try_insert(right, left).is_err() {
            tracing::debug!(entry, "rolling back forward insert on duplicate right");
            self.forward.remove_by_entry(entry);
            return Err(BiMapError::DuplicateRight);
        }
        Ok(())
    }

    /// Inserts a pair, evicting whatever pairs held either value before.
    pub fn insert_or_replace(&mut self, left: L, right: R) -> Evicted<L, R> {
        let by_left = self.remove_by_left(&left);
        let by_right = self.remove_by_right(&right);
        self.forward.insert(left.clone(), right.clone());
        self.backward.insert(right, left);
        Evicted { by_left, by_right }
    }

    /// Returns the right value paired with `left`.
    pub fn get_by_left<Q>(&self, left: &Q) -> Option<&R>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.forward.get(left)
    }

    /// Returns the left value paired with `right`.
    pub fn get_by_right<Q>(&self, right: &Q) -> Option<&L>
    where
        R: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.backward.get(right)
    }

    /// Returns `true` if `left` is mapped.
    pub fn contains_left<Q>(&self, left: &Q) -> bool
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.forward.contains_key(left)
    }

    /// Returns `true` if `right` is mapped.
    pub fn contains_right<Q>(&self, right: &Q) -> bool
    where
        R: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.backward.contains_key(right)
    }

    /// Removes the pair holding `left`.
    pub fn remove_by_left<Q>(&mut self, left: &Q) -> Option<(L, R)>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (left, right) = self.forward.remove_entry(left)?;
        self.backward.remove(&right);
        Some((left, right))
    }

    /// Removes the pair holding `right`.
    pub fn remove_by_right<Q>(&mut self, right: &Q) -> Option<(L, R)>
    where
        R: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (right, left) = self.backward.remove_entry(right)?;
        self.forward.remove(&left);
        Some((left, right))
    }
}

impl<L: fmt::Debug, R: fmt::Debug, S> fmt::Debug for BiMap<L, R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over `(left, right)` pairs of a [`BiMap`].
pub struct Iter<'a, L, R> {
    inner: map::Iter<'a, L, R>,
}

impl<'a, L, R> Iterator for Iter<'a, L, R> {
    type Item = (&'a L, &'a R);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, left, right)| (left, right))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<L, R> ExactSizeIterator for Iter<'_, L, R> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_consistent<L, R>(map: &BiMap<L, R>)
    where
        L: Hash + Eq + Clone + fmt::Debug,
        R: Hash + Eq + Clone + fmt::Debug,
    {
        assert_eq!(map.forward().len(), map.backward().len());
        for (left, right) in map.iter() {
            assert_eq!(map.get_by_right(right), Some(left));
        }
    }

    #[test]
    fn insert_and_lookup_both_ways() {
        let mut map: BiMap<u32, String> = BiMap::new();
        map.insert(1, "one".to_string()).unwrap();
        map.insert(2, "two".to_string()).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get_by_left(&1).map(String::as_str), Some("one"));
        assert_eq!(map.get_by_right("two"), Some(&2));
        assert!(map.contains_left(&2));
        assert!(map.contains_right("one"));
        assert!(!map.contains_right("three"));
        assert_consistent(&map);
    }

    #[test]
    fn duplicate_left_changes_nothing() {
        let mut map: BiMap<u32, u32> = BiMap::new();
        map.insert(1, 10).unwrap();

        assert_eq!(map.insert(1, 20), Err(BiMapError::DuplicateLeft));
        assert_eq!(map.len(), 1);
        assert!(!map.contains_right(&20));
        assert_consistent(&map);
    }

    #[test]
    fn duplicate_right_rolls_back_forward() {
        let mut map: BiMap<u32, u32> = BiMap::new();
        map.insert(1, 10).unwrap();

        assert_eq!(map.insert(2, 10), Err(BiMapError::DuplicateRight));
        assert_eq!(map.len(), 1);
        assert!(!map.contains_left(&2));
        assert_eq!(map.get_by_right(&10), Some(&1));
        assert_consistent(&map);

        // the rolled-back left value is free to use
        map.insert(2, 20).unwrap();
        assert_consistent(&map);
    }

    #[test]
    fn remove_either_side() {
        let mut map: BiMap<&str, u32> = BiMap::new();
        map.insert("a", 1).unwrap();
        map.insert("b", 2).unwrap();

        assert_eq!(map.remove_by_left("a"), Some(("a", 1)));
        assert!(!map.contains_right(&1));
        assert_eq!(map.remove_by_right(&2), Some(("b", 2)));
        assert!(!map.contains_left("b"));
        assert!(map.is_empty());
        assert_eq!(map.remove_by_left("a"), None);
    }

    #[test]
    fn insert_or_replace_evicts_both_sides() {
        let mut map: BiMap<u32, char> = BiMap::new();
        map.insert(1, 'a').unwrap();
        map.insert(2, 'b').unwrap();

        let evicted = map.insert_or_replace(1, 'b');
        assert_eq!(evicted.by_left, Some((1, 'a')));
        assert_eq!(evicted.by_right, Some((2, 'b')));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get_by_left(&1), Some(&'b'));
        assert!(!map.contains_right(&'a'));
        assert!(!map.contains_left(&2));
        assert_consistent(&map);
    }

    #[test]
    fn insert_or_replace_same_pair() {
        let mut map: BiMap<u32, char> = BiMap::new();
        map.insert(1, 'a').unwrap();

        let evicted = map.insert_or_replace(1, 'a');
        assert_eq!(evicted.by_left, Some((1, 'a')));
        assert_eq!(evicted.by_right, None);
        assert_eq!(map.len(), 1);

        assert!(map.insert_or_replace(2, 'z').is_empty());
        assert_consistent(&map);
    }

    #[test]
    fn clear_empties_both_sides() {
        let mut map: BiMap<u32, u32> = BiMap::with_capacity(8);
        for i in 0..8 {
            map.insert(i, i + 100).unwrap();
        }
        map.clear();
        assert!(map.is_empty());
        assert!(map.backward().is_empty());
        map.insert(1, 100).unwrap();
        assert_consistent(&map);
    }

    #[test]
    fn debug_shows_pairs() {
        let mut map: BiMap<u32, &str> = BiMap::new();
        map.insert(1, "x").unwrap();
        assert_eq!(format!("{map:?}"), r#"{1: "x"}"#);
    }
}
