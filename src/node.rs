//! Arena handles and the 256-way internal node.
//!
//! Nodes and containers live in two arenas owned by [`HatTrie`](crate::HatTrie)
//! and are addressed by 32-bit indices. A hybrid container spanning several
//! slots is simply the same [`ContainerId`] copied into each slot of its range,
//! so aliasing is explicit and always contiguous.

use crate::Value;

/// Number of child slots in an internal node, one per byte value.
pub(crate) const FANOUT: usize = 256;

/// Index of an [`InternalNode`] in the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    /// The root node is always the first node allocated.
    pub(crate) const ROOT: NodeId = NodeId(0);

    #[inline]
    pub(crate) fn from_index(idx: usize) -> Self {
        debug_assert!(idx < u32::MAX as usize, "node arena overflow");
        Self(idx as u32)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a [`Container`](crate::container::Container) in the container arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct ContainerId(u32);

impl ContainerId {
    #[inline]
    pub(crate) fn from_index(idx: usize) -> Self {
        debug_assert!(idx < u32::MAX as usize, "container arena overflow");
        Self(idx as u32)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a slot of an internal node points at.
///
/// There is no empty variant: every internal node is created with all slots
/// populated, and bursts only ever replace a slot range with new occupants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Child {
    Node(NodeId),
    Container(ContainerId),
}

/// A 256-way fan-out node addressed directly by byte value.
#[derive(Clone)]
pub(crate) struct InternalNode {
    children: Box<[Child; FANOUT]>,
    /// Value of the key whose path ends exactly at this node.
    terminal: Option<Value>,
}

impl InternalNode {
    /// Creates a node whose every slot points at `fill`.
    pub(crate) fn new(fill: Child) -> Self {
        Self {
            children: Box::new([fill; FANOUT]),
            terminal: None,
        }
    }

    #[inline]
    pub(crate) fn child(&self, byte: u8) -> Child {
        self.children[byte as usize]
    }

    #[inline]
    pub(crate) fn set_child(&mut self, byte: u8, child: Child) {
        self.children[byte as usize] = child;
    }

    /// Installs `child` into every slot of `start..=end`.
    pub(crate) fn fill_range(&mut self, start: u8, end: u8, child: Child) {
        debug_assert!(start <= end);
        self.children[start as usize..=end as usize].fill(child);
    }

    #[inline]
    pub(crate) fn terminal(&self) -> Option<Value> {
        self.terminal
    }

    /// Sets the terminal value unless one is already present.
    ///
    /// Returns `true` if the value was stored.
    pub(crate) fn set_terminal(&mut self, value: Value) -> bool {
        if self.terminal.is_some() {
            return false;
        }
        self.terminal = Some(value);
        true
    }

    /// Maximal runs of identical slots as `(start, end, child)`, ascending.
    pub(crate) fn runs(&self) -> impl Iterator<Item = (u8, u8, Child)> + '_ {
        let mut start = 0usize;
        std::iter::from_fn(move || {
            if start >= FANOUT {
                return None;
            }
            let child = self.children[start];
            let mut end = start;
            while end + 1 < FANOUT && self.children[end + 1] == child {
                end += 1;
            }
            let run = (start as u8, end as u8, child);
            start = end + 1;
            Some(run)
        })
    }
}
