//! Memory-resource capability and node allocation accounting.
//!
//! The tree never owns allocation policy. It borrows a [`MemoryResource`]
//! and reports a fixed per-node footprint through it when nodes are created
//! and destroyed, so callers can attribute memory to each tree instance.
//! Node key/child storage is pre-allocated at construction and never
//! regrows (see [`crate::types::Node`]), which is what keeps the footprint
//! exact.

use std::cell::Cell;
use std::mem;

use crate::types::{BPTreeSet, Node};

/// Byte-accounting capability injected into every tree.
///
/// Implementations must tolerate interleaved acquire/release sequences
/// from multiple trees sharing one resource. The tree guarantees that by
/// the time it becomes empty (via `clear`, removal of the last element, or
/// `Drop`) it has released every byte it acquired.
pub trait MemoryResource {
    /// Record `bytes` of storage handed to a caller.
    fn acquire(&self, bytes: usize);
    /// Record `bytes` of storage returned by a caller.
    fn release(&self, bytes: usize);
    /// Currently outstanding bytes.
    fn used(&self) -> usize;
}

/// Plain counter resource, the default implementation for tests, examples,
/// and callers that only need attribution.
#[derive(Debug, Default)]
pub struct TrackingResource {
    used: Cell<usize>,
}

impl TrackingResource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently outstanding bytes, callable without the trait in scope.
    pub fn used(&self) -> usize {
        self.used.get()
    }
}

impl MemoryResource for TrackingResource {
    fn acquire(&self, bytes: usize) {
        self.used.set(self.used.get() + bytes);
    }

    fn release(&self, bytes: usize) {
        assert!(self.used.get() >= bytes, "releasing more than acquired");
        self.used.set(self.used.get() - bytes);
    }

    fn used(&self) -> usize {
        self.used.get()
    }
}

// ============================================================================
// TREE-SIDE ALLOCATION HELPERS
// ============================================================================

impl<'r, K, P> BPTreeSet<'r, K, P> {
    /// Bytes accounted for one leaf node: the node struct plus its
    /// pre-allocated key storage.
    pub(crate) fn leaf_footprint(&self) -> usize {
        mem::size_of::<Node<K>>() + (self.capacity + 1) * mem::size_of::<K>()
    }

    /// Bytes accounted for one internal node: a leaf footprint plus the
    /// pre-allocated child slots.
    pub(crate) fn branch_footprint(&self) -> usize {
        self.leaf_footprint() + (self.capacity + 2) * mem::size_of::<Box<Node<K>>>()
    }

    fn node_footprint(&self, node: &Node<K>) -> usize {
        if node.leaf {
            self.leaf_footprint()
        } else {
            self.branch_footprint()
        }
    }

    /// Allocate an empty leaf, charging the resource.
    pub(crate) fn new_leaf(&mut self) -> Box<Node<K>> {
        self.resource.acquire(self.leaf_footprint());
        self.node_count += 1;
        Box::new(Node::new_leaf(self.capacity))
    }

    /// Allocate an empty internal node, charging the resource.
    pub(crate) fn new_branch(&mut self) -> Box<Node<K>> {
        self.resource.acquire(self.branch_footprint());
        self.node_count += 1;
        Box::new(Node::new_branch(self.capacity))
    }

    /// Release a single node. The node must no longer own children; whole
    /// subtrees go through [`Self::free_subtree`].
    pub(crate) fn free_node(&mut self, node: Box<Node<K>>) {
        debug_assert!(node.children.is_empty(), "freeing a node that still owns children");
        self.resource.release(self.node_footprint(&node));
        self.node_count -= 1;
    }

    /// Recursively release a subtree, children first.
    pub(crate) fn free_subtree(&mut self, mut node: Box<Node<K>>) {
        let children = mem::take(&mut node.children);
        for child in children {
            self.free_subtree(child);
        }
        self.free_node(node);
    }
}
