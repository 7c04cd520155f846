//! Hash map with stable entry indices.
//!
//! [`EntryMap`] stores its entries in a [`Slab`] and keeps a
//! [`HashTable`] of slab indices for lookup. An entry's index is stable for
//! as long as the entry lives, so callers can resolve a key once with
//! [`find_entry`](EntryMap::find_entry) and then read or overwrite the value
//! by index without hashing again. Freed indices are recycled by later
//! inserts, the same way the list recycles slots.
//!
//! ```
//! use freeslot_collections::EntryMap;
//!
//! let mut prices: EntryMap<String, u64> = EntryMap::new();
//! let entry = prices.try_insert("AAPL".to_string(), 190).unwrap();
//!
//! assert_eq!(prices.find_entry("AAPL"), Some(entry));
//! assert_eq!(prices.replace_value_by_entry(entry, 191), 190);
//! assert_eq!(prices.value_by_entry(entry), Some(&191));
//!
//! // duplicate keys are handed back
//! let rejected = prices.try_insert("AAPL".to_string(), 0).unwrap_err();
//! assert_eq!(rejected.into_inner(), ("AAPL".to_string(), 0));
//! ```

use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::mem;

use hashbrown::hash_table::Entry;
use hashbrown::{DefaultHashBuilder, HashTable};
use slab::Slab;

#[derive(Clone)]
struct Bucket<K, V> {
    hash: u64,
    key: K,
    value: V,
}

/// Error returned by [`EntryMap::try_insert`] when the key is already present.
///
/// Hands the rejected pair back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupied<K, V> {
    /// The key that was not inserted.
    pub key: K,
    /// The value that was not inserted.
    pub value: V,
}

impl<K, V> Occupied<K, V> {
    /// Returns the pair that could not be inserted.
    pub fn into_inner(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> fmt::Display for Occupied<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key is already present in the map")
    }
}

impl<K: fmt::Debug, V: fmt::Debug> std::error::Error for Occupied<K, V> {}

/// Hash map whose entries are addressed by stable `usize` indices.
#[derive(Clone)]
pub struct EntryMap<K, V, S = DefaultHashBuilder> {
    table: HashTable<usize>,
    entries: Slab<Bucket<K, V>>,
    hasher: S,
}

impl<K, V, S: Default> Default for EntryMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V> EntryMap<K, V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V, S> EntryMap<K, V, S> {
    /// Creates an empty map using `hasher`.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(0, hasher)
    }

    /// Creates an empty map with room for `capacity` entries, using `hasher`.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            entries: Slab::with_capacity(capacity),
            hasher,
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the map's hasher.
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Returns the value stored at entry `index`.
    #[inline]
    pub fn value_by_entry(&self, index: usize) -> Option<&V> {
        self.entries.get(index).map(|bucket| &bucket.value)
    }

    /// Returns the value stored at entry `index` mutably.
    #[inline]
    pub fn value_by_entry_mut(&mut self, index: usize) -> Option<&mut V> {
        self.entries.get_mut(index).map(|bucket| &mut bucket.value)
    }

    /// Returns the key and value stored at entry `index`.
    #[inline]
    pub fn entry_at(&self, index: usize) -> Option<(&K, &V)> {
        self.entries
            .get(index)
            .map(|bucket| (&bucket.key, &bucket.value))
    }

    /// Overwrites the value at entry `index` and returns the old one.
    ///
    /// The key and the index are unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not name a live entry.
    pub fn replace_value_by_entry(&mut self, index: usize, value: V) -> V {
        match self.entries.get_mut(index) {
            Some(bucket) => mem::replace(&mut bucket.value, value),
            None => panic!("entry {index} is vacant"),
        }
    }

    /// Removes every entry. Allocations are kept.
    pub fn clear(&mut self) {
        tracing::debug!(len = self.entries.len(), "clearing entry map");
        self.table.clear();
        self.entries.clear();
    }

    /// Iterates `(entry index, key, value)` in entry-index order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

impl<K, V, S> EntryMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn find<Q>(&self, hash: u64, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.table
            .find(hash, |&i| <K as Borrow<Q>>::borrow(&self.entries[i].key) == key)
            .copied()
    }

    /// Returns the entry index for `key`, if present.
    pub fn find_entry<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.entries.is_empty() {
            return None;
        }
        self.find(self.hasher.hash_one(key), key)
    }

    /// Returns the value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_entry(key).and_then(|i| self.value_by_entry(i))
    }

    /// Returns the value for `key` mutably.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_entry(key).and_then(|i| self.value_by_entry_mut(i))
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_entry(key).is_some()
    }

    /// Inserts a new entry and returns its index.
    ///
    /// # Errors
    ///
    /// [`Occupied`] with the rejected pair if `key` is already present; the
    /// map is unchanged.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<usize, Occupied<K, V>> {
        let hash = self.hasher.hash_one(&key);
        let entries = &mut self.entries;
        match self.table.entry(
            hash,
            |&i| entries[i].key == key,
            |&i| entries[i].hash,
        ) {
            Entry::Occupied(_) => Err(Occupied { key, value }),
            Entry::Vacant(vacant) => {
                let index = entries.insert(Bucket { hash, key, value });
                vacant.insert(index);
                Ok(index)
            }
        }
    }

    /// Inserts or overwrites. Returns the previous value for `key`, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.try_insert(key, value) {
            Ok(_) => None,
            Err(Occupied { key, value }) => {
                let index = self.find_entry(&key)?;
                Some(self.replace_value_by_entry(index, value))
            }
        }
    }

    /// Removes `key` and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` and returns the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.entries.is_empty() {
            return None;
        }
        let hash = self.hasher.hash_one(key);
        let entries = &self.entries;
        let index = match self
            .table
            .find_entry(hash, |&i| <K as Borrow<Q>>::borrow(&entries[i].key) == key)
        {
            Ok(occupied) => occupied.remove().0,
            Err(_) => return None,
        };
        let bucket = self.entries.remove(index);
        Some((bucket.key, bucket.value))
    }

    /// Removes the entry at `index` and returns its key and value.
    pub fn remove_by_entry(&mut self, index: usize) -> Option<(K, V)> {
        let hash = self.entries.get(index)?.hash;
        if let Ok(occupied) = self.table.find_entry(hash, |&i| i == index) {
            occupied.remove();
        }
        let bucket = self.entries.remove(index);
        Some((bucket.key, bucket.value))
    }

    /// Reserves room for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        let entries = &self.entries;
        self.table.reserve(additional, |&i| entries[i].hash);
        self.entries.reserve(additional);
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for EntryMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(_, b)| (&b.key, &b.value)))
            .finish()
    }
}

impl<K, V, S> Extend<(K, V)> for EntryMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for EntryMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

/// Iterator over `(entry index, key, value)`.
pub struct Iter<'a, K, V> {
    inner: slab::Iter<'a, Bucket<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (usize, &'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(i, bucket)| (i, &bucket.key, &bucket.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
