//! Order-statistics B+ tree set.
//!
//! A balanced multi-way search tree over unique keys supporting rank
//! queries and rank-window iteration in O(log n), intended as a denser
//! replacement for skip-list-based sorted sets. Node storage is accounted
//! through an injected [`MemoryResource`], so memory usage is
//! deterministic and attributable: an emptied tree has released every
//! byte it acquired.
//!
//! ```
//! use bptree_set::{BPTreeSet, TrackingResource};
//!
//! let resource = TrackingResource::new();
//! let mut tree = BPTreeSet::new(&resource);
//!
//! for i in 0..1000u64 {
//!     tree.insert(i * 2);
//! }
//!
//! assert_eq!(tree.rank(&500), 250);
//! assert_eq!(tree.get_by_rank(250), Some(&500));
//!
//! let mut window = Vec::new();
//! tree.iterate_range(10, 12, |k| window.push(*k));
//! assert_eq!(window, [20, 22, 24]);
//!
//! tree.clear();
//! assert_eq!(resource.used(), 0);
//! ```

use std::fmt;

mod construction;
mod delete_operations;
mod error;
mod insert_operations;
mod iteration;
mod memory;
mod node;
mod order_statistics;
mod types;
mod validation;

#[cfg(test)]
mod proptests;

pub use construction::DEFAULT_CAPACITY;
pub use error::{BPTreeError, TreeResult};
pub use iteration::Iter;
pub use memory::{MemoryResource, TrackingResource};
pub use types::{BPTreeSet, KeyPolicy, NaturalOrder};

impl<'r, K, P: KeyPolicy<K>> BPTreeSet<'r, K, P> {
    /// Check whether `key` is present.
    pub fn contains(&self, key: &K) -> bool {
        let mut node = self.root.as_deref();
        while let Some(current) = node {
            let (index, found) = current.locate::<P>(key);
            if found {
                return true;
            }
            if current.leaf {
                return false;
            }
            node = Some(&current.children[index]);
        }
        false
    }
}

impl<'r, K, P> BPTreeSet<'r, K, P> {
    /// Number of elements in the set.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the set holds no elements.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of levels: 0 when empty, 1 for a lone root leaf.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Maximum number of keys per node.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Minimum occupancy for non-root nodes.
    pub(crate) fn min_keys(&self) -> usize {
        self.capacity / 2
    }

    /// Remove every element, releasing all node memory back to the
    /// resource.
    pub fn clear(&mut self) {
        if let Some(root) = self.root.take() {
            self.free_subtree(root);
        }
        self.size = 0;
        self.height = 0;
        debug_assert_eq!(self.node_count, 0);
    }
}

impl<'r, K, P> Drop for BPTreeSet<'r, K, P> {
    fn drop(&mut self) {
        // Return every acquired byte; the resource outlives the tree.
        self.clear();
    }
}

impl<'r, K, P> fmt::Debug for BPTreeSet<'r, K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BPTreeSet")
            .field("size", &self.size)
            .field("height", &self.height)
            .field("node_count", &self.node_count)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
