//! Construction and initialization for the tree and its nodes.
//!
//! Capacity validation lives here: every node holds at most `capacity`
//! keys and, except for the root, at least `capacity / 2`. Node storage is
//! pre-allocated once so steady-state operations never reallocate and the
//! per-node byte footprint stays fixed.

use std::marker::PhantomData;

use crate::error::{BPTreeError, TreeResult};
use crate::memory::MemoryResource;
use crate::types::{BPTreeSet, KeyPolicy, Node, MIN_CAPACITY};

/// Default maximum number of keys per node.
pub const DEFAULT_CAPACITY: usize = 16;

impl<'r, K: Ord> BPTreeSet<'r, K> {
    /// Create a tree with the default capacity and natural key ordering.
    ///
    /// The resource is borrowed, not owned, and must outlive the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bptree_set::{BPTreeSet, TrackingResource};
    ///
    /// let resource = TrackingResource::new();
    /// let tree: BPTreeSet<u64> = BPTreeSet::new(&resource);
    /// assert!(tree.is_empty());
    /// ```
    pub fn new(resource: &'r dyn MemoryResource) -> Self {
        Self::with_policy(resource)
    }

    /// Create a tree with a specific node capacity and natural ordering.
    ///
    /// Returns an error if `capacity` is below the supported minimum.
    pub fn with_capacity(capacity: usize, resource: &'r dyn MemoryResource) -> TreeResult<Self> {
        Self::with_capacity_and_policy(capacity, resource)
    }
}

impl<'r, K, P: KeyPolicy<K>> BPTreeSet<'r, K, P> {
    /// Create a tree with the default capacity and an explicit comparison
    /// policy. See [`KeyPolicy`] for the composite-key use case.
    pub fn with_policy(resource: &'r dyn MemoryResource) -> Self {
        Self::with_capacity_and_policy(DEFAULT_CAPACITY, resource)
            .expect("default capacity is always valid")
    }

    /// Create a tree with a specific capacity and comparison policy.
    pub fn with_capacity_and_policy(
        capacity: usize,
        resource: &'r dyn MemoryResource,
    ) -> TreeResult<Self> {
        if capacity < MIN_CAPACITY {
            return Err(BPTreeError::invalid_capacity(capacity, MIN_CAPACITY));
        }

        Ok(Self {
            capacity,
            root: None,
            size: 0,
            height: 0,
            node_count: 0,
            resource,
            _policy: PhantomData,
        })
    }
}

impl<K> Node<K> {
    /// Create an empty leaf. Key storage is reserved up front for one key
    /// beyond capacity so the insert-then-split sequence never reallocates.
    pub(crate) fn new_leaf(capacity: usize) -> Self {
        Self {
            leaf: true,
            subtree_count: 0,
            keys: Vec::with_capacity(capacity + 1),
            children: Vec::new(),
        }
    }

    /// Create an empty internal node, with child storage reserved for the
    /// transient extra child that precedes a split.
    pub(crate) fn new_branch(capacity: usize) -> Self {
        Self {
            leaf: false,
            subtree_count: 0,
            keys: Vec::with_capacity(capacity + 1),
            children: Vec::with_capacity(capacity + 2),
        }
    }
}
