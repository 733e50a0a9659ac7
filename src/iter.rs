//! Sorted traversal.
//!
//! An explicit-stack depth-first walk. Node frames are visited twice: once
//! on the way down (push the node's byte onto the prefix, emit its terminal
//! value, stack its children) and once on the way back up (pop the byte).
//! Container frames emit their entries in radix-sorted order.

use std::iter::FusedIterator;

use smallvec::SmallVec;

use crate::node::{Child, ContainerId, NodeId, FANOUT};
use crate::{HatTrie, Value};

#[derive(Clone, Copy, Debug)]
enum Frame {
    Node {
        id: NodeId,
        /// Byte of the parent slot holding this node; `None` for the root.
        byte: Option<u8>,
        visited: bool,
    },
    Container {
        id: ContainerId,
        /// Slot byte of a pure container; hybrid suffixes carry it themselves.
        byte: Option<u8>,
    },
}

/// Entries of the container currently being emitted.
struct Pending<'a> {
    entries: std::vec::IntoIter<(&'a [u8], Value)>,
    /// Length of the key prefix shared by every entry.
    base_len: usize,
}

/// Iterator over a [`HatTrie`] in ascending key order.
///
/// Created by [`HatTrie::iter`]. Besides the [`Iterator`] impl, which yields
/// owned keys, [`Iter::next_entry`] lends the key from an internal buffer
/// without allocating.
pub struct Iter<'a> {
    trie: &'a HatTrie,
    stack: Vec<Frame>,
    prefix: SmallVec<[u8; 64]>,
    key: Vec<u8>,
    pending: Option<Pending<'a>>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(trie: &'a HatTrie) -> Self {
        let capacity = trie.longest_key_len();
        Self {
            trie,
            stack: vec![Frame::Node {
                id: NodeId::ROOT,
                byte: None,
                visited: false,
            }],
            prefix: SmallVec::with_capacity(capacity),
            key: Vec::with_capacity(capacity),
            pending: None,
        }
    }

    /// Advances to the next pair, borrowing the key from the iterator.
    pub fn next_entry(&mut self) -> Option<(&[u8], Value)> {
        loop {
            if let Some(pending) = self.pending.as_mut() {
                if let Some((suffix, value)) = pending.entries.next() {
                    let base_len = pending.base_len;
                    self.key.truncate(base_len);
                    self.key.extend_from_slice(suffix);
                    return Some((self.key.as_slice(), value));
                }
                self.pending = None;
            }

            match self.stack.pop()? {
                Frame::Node {
                    id,
                    byte,
                    visited: false,
                } => {
                    if let Some(b) = byte {
                        self.prefix.push(b);
                    }
                    self.stack.push(Frame::Node {
                        id,
                        byte,
                        visited: true,
                    });
                    self.push_children(id);

                    if let Some(value) = self.trie.nodes[id.index()].terminal() {
                        self.key.clear();
                        self.key.extend_from_slice(&self.prefix);
                        return Some((self.key.as_slice(), value));
                    }
                }
                Frame::Node {
                    byte, visited: true, ..
                } => {
                    if byte.is_some() {
                        self.prefix.pop();
                    }
                }
                Frame::Container { id, byte } => {
                    let trie = self.trie;
                    let container = &trie.containers[id.index()];
                    self.key.clear();
                    self.key.extend_from_slice(&self.prefix);
                    if let Some(b) = byte {
                        self.key.push(b);
                    }
                    self.pending = Some(Pending {
                        entries: container.sorted_entries().into_iter(),
                        base_len: self.key.len(),
                    });
                }
            }
        }
    }

    /// Stacks the children of `id` so the lowest slot is popped first.
    ///
    /// A child occupying a run of slots is stacked once; runs are contiguous,
    /// so comparing with the slot above is enough.
    fn push_children(&mut self, id: NodeId) {
        let trie = self.trie;
        let node = &trie.nodes[id.index()];
        let mut above: Option<Child> = None;
        for slot in (0..FANOUT).rev() {
            let byte = slot as u8;
            let child = node.child(byte);
            if above == Some(child) {
                continue;
            }
            above = Some(child);
            let frame = match child {
                Child::Node(id) => Frame::Node {
                    id,
                    byte: Some(byte),
                    visited: false,
                },
                Child::Container(id) => {
                    let hybrid = trie.containers[id.index()].is_hybrid();
                    Frame::Container {
                        id,
                        byte: (!hybrid).then_some(byte),
                    }
                }
            };
            self.stack.push(frame);
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = (Vec<u8>, Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().map(|(key, value)| (key.to_vec(), value))
    }
}

impl FusedIterator for Iter<'_> {}
