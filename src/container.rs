//! Hash-array leaves of the trie.
//!
//! A container stores key suffixes for every byte value in `start..=end` of
//! its parent node. A *pure* container (`start == end`) sits in exactly one
//! slot, so the slot byte is implied and stripped from its suffixes. A *hybrid*
//! container is shared by every slot of its range and keeps the discriminating
//! byte as the first byte of each suffix, which also means it never holds the
//! empty suffix.

use rustc_hash::FxHashMap;

use crate::radix;
use crate::Value;

#[derive(Clone, Debug)]
pub(crate) struct Container {
    pairs: FxHashMap<Box<[u8]>, Value>,
    hybrid: bool,
    start: u8,
    end: u8,
}

impl Container {
    /// Creates an empty container covering `start..=end`.
    ///
    /// The container is hybrid iff the range spans more than one byte value.
    pub(crate) fn with_range(start: u8, end: u8, capacity: usize) -> Self {
        debug_assert!(start <= end);
        Self {
            pairs: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            hybrid: start != end,
            start,
            end,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    pub(crate) fn is_hybrid(&self) -> bool {
        self.hybrid
    }

    #[inline]
    pub(crate) fn range(&self) -> (u8, u8) {
        (self.start, self.end)
    }

    /// The part of `key` this container stores, given that descent consumed
    /// `consumed` bytes (the last of which selected this container's slot).
    #[inline]
    pub(crate) fn suffix_of<'k>(&self, key: &'k [u8], consumed: usize) -> &'k [u8] {
        debug_assert!(consumed > 0);
        if self.hybrid {
            &key[consumed - 1..]
        } else {
            &key[consumed..]
        }
    }

    /// Inserts `suffix` unless it is already present. Returns `true` if stored.
    pub(crate) fn insert(&mut self, suffix: &[u8], value: Value) -> bool {
        debug_assert!(!self.hybrid || self.covers(suffix));
        if self.pairs.contains_key(suffix) {
            return false;
        }
        self.pairs.insert(suffix.into(), value);
        true
    }

    /// Moves an entry of a bursting hybrid container into this one.
    ///
    /// `key` still carries its discriminating byte; it is dropped when this
    /// container is pure.
    pub(crate) fn adopt(&mut self, key: Box<[u8]>, value: Value) {
        debug_assert!(self.covers(&key));
        if self.hybrid {
            self.pairs.insert(key, value);
        } else {
            self.pairs.insert(Box::from(&key[1..]), value);
        }
    }

    #[inline]
    pub(crate) fn get(&self, suffix: &[u8]) -> Option<Value> {
        self.pairs.get(suffix).copied()
    }

    /// Removes the empty-suffix entry, if any.
    pub(crate) fn take_empty(&mut self) -> Option<Value> {
        self.pairs.remove(&b""[..])
    }

    /// Turns a pure container into a hybrid one spanning the whole byte space
    /// of a freshly created parent.
    pub(crate) fn make_hybrid(&mut self) {
        debug_assert!(!self.pairs.contains_key(&b""[..]));
        self.hybrid = true;
        self.start = 0;
        self.end = u8::MAX;
    }

    /// Number of stored suffixes per leading byte.
    pub(crate) fn occurrences(&self) -> [usize; 256] {
        let mut occurrences = [0usize; 256];
        for key in self.pairs.keys() {
            if let Some(&head) = key.first() {
                occurrences[head as usize] += 1;
            }
        }
        occurrences
    }

    /// Empties the container, handing its entries to the caller.
    pub(crate) fn take_pairs(&mut self) -> FxHashMap<Box<[u8]>, Value> {
        std::mem::take(&mut self.pairs)
    }

    /// Entries in ascending suffix order.
    pub(crate) fn sorted_entries(&self) -> Vec<(&[u8], Value)> {
        let mut entries: Vec<(&[u8], Value)> =
            self.pairs.iter().map(|(k, &v)| (&**k, v)).collect();
        radix::sort_by_bytes(&mut entries, |&(key, _)| key);
        entries
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&[u8], Value)> + '_ {
        self.pairs.iter().map(|(k, &v)| (&**k, v))
    }

    /// Approximate heap footprint.
    pub(crate) fn heap_bytes(&self) -> usize {
        let slot = std::mem::size_of::<(Box<[u8]>, Value)>() + 1;
        let keys: usize = self.pairs.keys().map(|k| k.len()).sum();
        self.pairs.capacity() * slot + keys
    }

    fn covers(&self, key: &[u8]) -> bool {
        key.first()
            .is_some_and(|&head| (self.start..=self.end).contains(&head))
    }
}
