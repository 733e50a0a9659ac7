//! Container bursting.
//!
//! A container that reaches the burst threshold is split in one of two ways:
//!
//! 1. A *pure* container is pushed one level down: a new internal node takes
//!    its slot, and the container becomes a hybrid spanning all 256 slots of
//!    that node. No entries move; the former suffixes already start with the
//!    byte that now discriminates between the new node's slots.
//! 2. A *hybrid* container is bisected at a byte boundary chosen by a greedy
//!    balance search, and its entries are redistributed into the two halves.
//!
//! Either way the caller re-checks the returned container, so one insert can
//! cascade through several bursts.

use tracing::{debug, trace};

use crate::container::Container;
use crate::node::{Child, ContainerId, InternalNode, NodeId};
use crate::HatTrie;

impl HatTrie {
    /// Bursts `container`, a child of `parent`.
    ///
    /// Returns the `(parent, container)` pair that may still be at or above the
    /// threshold and needs another look.
    pub(crate) fn burst(&mut self, parent: NodeId, container: ContainerId) -> (NodeId, ContainerId) {
        self.bursts += 1;
        if self.containers[container.index()].is_hybrid() {
            self.burst_hybrid(parent, container)
        } else {
            self.burst_pure(parent, container)
        }
    }

    fn burst_pure(&mut self, parent: NodeId, cid: ContainerId) -> (NodeId, ContainerId) {
        let node_id = NodeId::from_index(self.nodes.len());
        let mut node = InternalNode::new(Child::Container(cid));

        let container = &mut self.containers[cid.index()];
        let (slot, _) = container.range();
        // The empty suffix is the key ending at the new node itself.
        if let Some(value) = container.take_empty() {
            node.set_terminal(value);
        }
        container.make_hybrid();

        trace!(
            parent = parent.index(),
            node = node_id.index(),
            slot,
            entries = container.len(),
            "pushed pure container below a new node"
        );

        self.nodes.push(node);
        self.nodes[parent.index()].set_child(slot, Child::Node(node_id));
        (node_id, cid)
    }

    fn burst_hybrid(&mut self, parent: NodeId, cid: ContainerId) -> (NodeId, ContainerId) {
        let capacity_hint = self.config.initial_container_capacity;
        let old = &mut self.containers[cid.index()];
        let (start, end) = old.range();
        let total = old.len();
        let occurrences = old.occurrences();
        let split = split_point(&occurrences, start, end, total);

        let left_len: usize = occurrences[start as usize..=split as usize].iter().sum();
        let right_len = total - left_len;

        let mut left = Container::with_range(start, split, left_len.max(capacity_hint));
        let mut right = Container::with_range(split + 1, end, right_len.max(capacity_hint));
        for (key, value) in old.take_pairs() {
            if key[0] <= split {
                left.adopt(key, value);
            } else {
                right.adopt(key, value);
            }
        }

        debug!(
            parent = parent.index(),
            start,
            end,
            split,
            left = left_len,
            right = right_len,
            "split hybrid container"
        );

        // The left half reuses the discarded container's arena slot, so the
        // parent's slots `start..=split` already point at it.
        self.containers[cid.index()] = left;
        let right_id = ContainerId::from_index(self.containers.len());
        self.containers.push(right);
        self.nodes[parent.index()].fill_range(split + 1, end, Child::Container(right_id));

        if left_len >= right_len {
            (parent, cid)
        } else {
            (parent, right_id)
        }
    }
}

/// Chooses the last byte of the left half when bisecting `start..=end`.
///
/// Starting with `start` alone on the left, the boundary moves right one byte
/// value at a time while doing so strictly reduces `|left - right|` and leaves
/// the right half non-empty. A byte value with no entries does not change the
/// balance and is absorbed into the left half as long as the right half still
/// holds entries. The result is always `< end` so both halves have a range.
pub(crate) fn split_point(occurrences: &[usize; 256], start: u8, end: u8, total: usize) -> u8 {
    debug_assert!(start < end);
    let mut split = start;
    let mut left = occurrences[start as usize];
    let mut right = total - left;

    for byte in start as usize + 1..=end as usize {
        if right == 0 {
            break;
        }
        let count = occurrences[byte];
        if count == 0 {
            split = byte as u8;
            continue;
        }
        let next_left = left + count;
        let next_right = right - count;
        if next_right == 0 || next_left.abs_diff(next_right) >= left.abs_diff(right) {
            break;
        }
        split = byte as u8;
        left = next_left;
        right = next_right;
    }

    debug_assert!(split < end);
    split
}
