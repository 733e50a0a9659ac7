//! # hat-trie
//!
//! A sorted, cache-friendly index from byte-string keys to `u32` identifiers,
//! built as a hybrid burst trie (HAT-trie).
//!
//! Based on "HAT-trie: A Cache-conscious Trie-based Data Structure for
//! Strings" (Askitis & Sinha, ACSC 2007).
//!
//! The trie combines 256-way internal nodes with hash-array leaves
//! ("containers"). A container collects key suffixes until it reaches the
//! burst threshold, then splits: a container owned by one slot is pushed below
//! a new internal node, and a container shared by a range of slots is bisected
//! by leading byte. Traversal walks nodes and containers with an explicit
//! stack and radix-sorts each container on the way, yielding keys in ascending
//! byte order.
//!
//! The index never deletes, never allocates identifiers and keeps the first
//! value written for a key.
//!
//! ## Example
//!
//! ```rust
//! use hat_trie::HatTrie;
//!
//! let mut trie = HatTrie::new();
//! trie.insert(b"cqq", 2);
//! trie.insert(b"c", 5);
//! trie.insert(b"ca", 4);
//! trie.insert(b"c", 99); // first write wins
//!
//! let mut pairs = Vec::new();
//! trie.for_each(|key, id| pairs.push((key.to_vec(), id)));
//! assert_eq!(
//!     pairs,
//!     vec![(b"c".to_vec(), 5), (b"ca".to_vec(), 4), (b"cqq".to_vec(), 2)]
//! );
//! ```

#![forbid(unsafe_code)]

mod burst;
mod container;
mod iter;
mod node;
mod radix;

pub use iter::Iter;

use container::Container;
use node::{Child, ContainerId, InternalNode, NodeId};

/// Identifier stored for each key.
pub type Value = u32;

// =============================================================================
// Configuration
// =============================================================================

/// Default number of entries at which a container bursts.
pub const DEFAULT_BURST_THRESHOLD: usize = 1 << 14;

/// Default capacity of freshly created containers.
pub const DEFAULT_CONTAINER_CAPACITY: usize = 64;

/// Tuning knobs for a [`HatTrie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrieConfig {
    /// A container holding this many entries is split immediately.
    /// Values below 1 are treated as 1.
    pub burst_threshold: usize,
    /// Capacity hint for containers created by the index.
    pub initial_container_capacity: usize,
}

impl TrieConfig {
    /// Sets the burst threshold.
    pub fn with_burst_threshold(mut self, burst_threshold: usize) -> Self {
        self.burst_threshold = burst_threshold;
        self
    }

    /// Sets the capacity hint for new containers.
    pub fn with_container_capacity(mut self, capacity: usize) -> Self {
        self.initial_container_capacity = capacity;
        self
    }
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self {
            burst_threshold: DEFAULT_BURST_THRESHOLD,
            initial_container_capacity: DEFAULT_CONTAINER_CAPACITY,
        }
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Structural statistics, computed by walking the arenas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrieStats {
    /// Number of internal nodes, including the root.
    pub internal_nodes: usize,
    /// Containers reachable from exactly one slot.
    pub pure_containers: usize,
    /// Containers shared by a range of slots.
    pub hybrid_containers: usize,
    /// Entries stored in containers.
    pub container_entries: usize,
    /// Keys stored as terminal values of internal nodes.
    pub terminal_values: usize,
    /// Number of bursts performed so far.
    pub bursts: usize,
    /// Length of the longest key ever inserted.
    pub longest_key_len: usize,
    /// Approximate heap bytes held by nodes and containers.
    pub heap_bytes: usize,
}

// =============================================================================
// Trie
// =============================================================================

/// Where descent from the root stopped.
struct Descent {
    child: Child,
    /// Node whose slot holds `child` (the root for the root itself).
    parent: NodeId,
    /// Key bytes consumed, including the slot byte that selected `child`.
    consumed: usize,
}

/// A hybrid burst trie mapping byte strings to [`Value`]s.
///
/// Mutation takes `&mut self` and traversal borrows `&self`, so a traversal
/// can never observe a burst in progress.
#[derive(Clone)]
pub struct HatTrie {
    /// Node arena; `nodes[0]` is the root.
    nodes: Vec<InternalNode>,
    /// Container arena. Every container is referenced from some slot.
    containers: Vec<Container>,
    config: TrieConfig,
    len: usize,
    longest_key_len: usize,
    bursts: usize,
}

impl HatTrie {
    /// Creates an empty trie with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    /// Creates an empty trie.
    ///
    /// The root starts out with a single hybrid container spanning every
    /// byte value.
    pub fn with_config(mut config: TrieConfig) -> Self {
        config.burst_threshold = config.burst_threshold.max(1);
        let root_container = ContainerId::from_index(0);
        Self {
            nodes: vec![InternalNode::new(Child::Container(root_container))],
            containers: vec![Container::with_range(
                0,
                u8::MAX,
                config.initial_container_capacity,
            )],
            config,
            len: 0,
            longest_key_len: 0,
            bursts: 0,
        }
    }

    /// Number of distinct keys stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length of the longest key ever inserted.
    #[inline]
    pub fn longest_key_len(&self) -> usize {
        self.longest_key_len
    }

    #[inline]
    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    /// Inserts `key` with `value` unless the key is already present.
    ///
    /// The first value written for a key is kept; later inserts of the same
    /// key are silently ignored. The empty key is stored on the root.
    pub fn insert(&mut self, key: &[u8], value: Value) {
        self.longest_key_len = self.longest_key_len.max(key.len());

        let Descent {
            child,
            parent,
            consumed,
        } = self.find_nearest(key);

        match child {
            Child::Node(node) => {
                debug_assert_eq!(consumed, key.len());
                if self.nodes[node.index()].set_terminal(value) {
                    self.len += 1;
                }
            }
            Child::Container(cid) => {
                let container = &mut self.containers[cid.index()];
                let suffix = container.suffix_of(key, consumed);
                if !container.insert(suffix, value) {
                    return;
                }
                self.len += 1;

                let (mut parent, mut cid) = (parent, cid);
                while self.containers[cid.index()].len() >= self.config.burst_threshold {
                    (parent, cid) = self.burst(parent, cid);
                }
            }
        }
    }

    /// Returns the value stored for `key`.
    pub fn get(&self, key: &[u8]) -> Option<Value> {
        let Descent {
            child, consumed, ..
        } = self.find_nearest(key);

        match child {
            Child::Node(node) => self.nodes[node.index()].terminal(),
            Child::Container(cid) => {
                let container = &self.containers[cid.index()];
                container.get(container.suffix_of(key, consumed))
            }
        }
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Calls `visit` once per stored pair in ascending key order.
    ///
    /// The key slice is only valid for the duration of the call.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&[u8], Value),
    {
        let mut iter = self.iter();
        while let Some((key, value)) = iter.next_entry() {
            visit(key, value);
        }
    }

    /// Iterates over all pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    pub fn stats(&self) -> TrieStats {
        let mut stats = TrieStats {
            internal_nodes: self.nodes.len(),
            bursts: self.bursts,
            longest_key_len: self.longest_key_len,
            ..TrieStats::default()
        };

        for node in &self.nodes {
            stats.terminal_values += usize::from(node.terminal().is_some());
            stats.heap_bytes += std::mem::size_of::<[Child; node::FANOUT]>();
        }
        for container in &self.containers {
            if container.is_hybrid() {
                stats.hybrid_containers += 1;
            } else {
                stats.pure_containers += 1;
            }
            stats.container_entries += container.len();
            stats.heap_bytes += container.heap_bytes();
        }
        stats
    }

    /// Walks from the root consuming one key byte per internal node until a
    /// container is reached or the key runs out.
    fn find_nearest(&self, key: &[u8]) -> Descent {
        let mut node = NodeId::ROOT;
        let mut parent = NodeId::ROOT;
        let mut consumed = 0;

        while let Some(&byte) = key.get(consumed) {
            consumed += 1;
            match self.nodes[node.index()].child(byte) {
                Child::Node(next) => {
                    parent = node;
                    node = next;
                }
                Child::Container(cid) => {
                    return Descent {
                        child: Child::Container(cid),
                        parent: node,
                        consumed,
                    };
                }
            }
        }

        Descent {
            child: Child::Node(node),
            parent,
            consumed,
        }
    }
}

impl Default for HatTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HatTrie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a HatTrie {
    type Item = (Vec<u8>, Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: AsRef<[u8]>> Extend<(K, Value)> for HatTrie {
    fn extend<I: IntoIterator<Item = (K, Value)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key.as_ref(), value);
        }
    }
}

impl<K: AsRef<[u8]>> FromIterator<(K, Value)> for HatTrie {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut trie = HatTrie::new();
        trie.extend(iter);
        trie
    }
}


#[cfg(test)]
mod proptests;
