//! Huffman tree construction
//!
//! Leaves are seeded into a min-priority queue keyed on frequency and the two
//! lightest nodes are merged until a single root remains.

use crate::codec::frequency::FrequencyTable;
use log::debug;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Leaf {
        symbol: char,
        frequency: u64,
    },
    Internal {
        frequency: u64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    pub fn leaf(symbol: char, frequency: u64) -> Self {
        TreeNode::Leaf { symbol, frequency }
    }

    pub fn frequency(&self) -> u64 {
        match self {
            TreeNode::Leaf { frequency, .. } => *frequency,
            TreeNode::Internal { frequency, .. } => *frequency,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Merge the two lightest queue entries. `first` is the lighter one and
    /// always lands on the right.
    fn merge(first: TreeNode, second: TreeNode) -> Self {
        TreeNode::Internal {
            frequency: first.frequency() + second.frequency(),
            left: Box::new(second),
            right: Box::new(first),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Length of the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Priority queue entry. Ordered by frequency, ties broken by insertion
/// sequence, and reversed so that `BinaryHeap` pops the minimum.
#[derive(Debug)]
struct QueuedNode {
    frequency: u64,
    seq: u64,
    node: TreeNode,
}

impl PartialEq for QueuedNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedNode {}

impl PartialOrd for QueuedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .frequency
            .cmp(&self.frequency)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Default)]
struct NodeQueue {
    heap: BinaryHeap<QueuedNode>,
    next_seq: u64,
}

impl NodeQueue {
    fn push(&mut self, node: TreeNode) {
        let entry = QueuedNode {
            frequency: node.frequency(),
            seq: self.next_seq,
            node,
        };
        self.next_seq += 1;
        self.heap.push(entry);
    }

    fn pop(&mut self) -> Option<TreeNode> {
        self.heap.pop().map(|entry| entry.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Build the Huffman tree for a frequency table.
///
/// Returns `None` for an empty table. A single-symbol table yields a lone leaf.
pub fn build(freq: &FrequencyTable) -> Option<TreeNode> {
    let mut queue = NodeQueue::default();
    for (symbol, count) in freq.iter() {
        queue.push(TreeNode::leaf(symbol, count));
    }

    while queue.len() > 1 {
        let (Some(first), Some(second)) = (queue.pop(), queue.pop()) else {
            break;
        };
        queue.push(TreeNode::merge(first, second));
    }

    let root = queue.pop()?;
    debug!(
        "built huffman tree: {} leaves, depth {}, weight {}",
        root.leaf_count(),
        root.depth(),
        root.frequency()
    );
    Some(root)
}
