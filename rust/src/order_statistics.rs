//! Order-statistics queries: rank, element-at-rank, and the sorted-order
//! extremes.
//!
//! These are what make the tree a skip-list replacement for sorted-set
//! workloads: RANK and RANGE-by-index style queries resolve in O(log n)
//! against the cached subtree counts instead of O(n) scans.

use crate::types::{BPTreeSet, KeyPolicy, Node};

impl<'r, K, P: KeyPolicy<K>> BPTreeSet<'r, K, P> {
    /// Number of elements strictly less than `key`.
    ///
    /// Defined whether or not `key` is present: for a present key this is
    /// its zero-based ordinal position, for an absent key the position it
    /// would occupy.
    ///
    /// # Examples
    ///
    /// ```
    /// use bptree_set::{BPTreeSet, TrackingResource};
    ///
    /// let resource = TrackingResource::new();
    /// let mut tree = BPTreeSet::new(&resource);
    /// for i in [10u64, 20, 30] {
    ///     tree.insert(i);
    /// }
    ///
    /// assert_eq!(tree.rank(&10), 0);
    /// assert_eq!(tree.rank(&30), 2);
    /// assert_eq!(tree.rank(&25), 2); // absent, would sit before 30
    /// ```
    pub fn rank(&self, key: &K) -> usize {
        let mut rank = 0;
        let mut node = match self.root.as_deref() {
            Some(node) => node,
            None => return 0,
        };

        loop {
            let (index, found) = node.locate::<P>(key);
            if node.leaf {
                return rank + index;
            }
            // Everything in the skipped children, plus the separators
            // between them, is smaller than `key`.
            for child in &node.children[..index] {
                rank += 1 + child.tree_count();
            }
            if found {
                // The matching separator is not counted, but its entire
                // left subtree is.
                return rank + node.children[index].tree_count();
            }
            node = &node.children[index];
        }
    }
}

impl<'r, K, P> BPTreeSet<'r, K, P> {
    /// The element at zero-based rank `rank` in sorted order, or `None`
    /// when `rank >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bptree_set::{BPTreeSet, TrackingResource};
    ///
    /// let resource = TrackingResource::new();
    /// let mut tree = BPTreeSet::new(&resource);
    /// for i in [10u64, 20, 30] {
    ///     tree.insert(i);
    /// }
    ///
    /// assert_eq!(tree.get_by_rank(1), Some(&20));
    /// assert_eq!(tree.get_by_rank(3), None);
    /// ```
    pub fn get_by_rank(&self, rank: usize) -> Option<&K> {
        if rank >= self.size {
            return None;
        }
        let mut node = self.root.as_deref()?;
        let mut remaining = rank;

        'descend: loop {
            if node.leaf {
                return node.keys.get(remaining);
            }
            for (i, child) in node.children.iter().enumerate() {
                if remaining < child.tree_count() {
                    node = child;
                    continue 'descend;
                }
                remaining -= child.tree_count();
                if let Some(separator) = node.keys.get(i) {
                    if remaining == 0 {
                        return Some(separator);
                    }
                    remaining -= 1;
                }
            }
            debug_assert!(false, "in-bounds rank not resolved within the subtree");
            return None;
        }
    }

    /// The smallest element, or `None` when empty.
    pub fn first(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while !node.leaf {
            node = &node.children[0];
        }
        node.keys.first()
    }

    /// The greatest element, or `None` when empty.
    pub fn last(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while !node.leaf {
            node = last_child(node);
        }
        node.keys.last()
    }
}

fn last_child<K>(node: &Node<K>) -> &Node<K> {
    node.children.last().expect("internal node has children")
}
