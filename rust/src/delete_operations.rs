//! DELETE operations.
//!
//! Deletion descends recursively. A key found in an internal node is
//! refilled with its in-order predecessor, which is *extracted* from the
//! left subtree rather than cloned. Underflowing children are repaired on
//! the way back up: borrow from a sibling that can spare a key, otherwise
//! merge with one and pull the separator down. The subtree count of every
//! node on the path is decremented exactly once per successful delete,
//! regardless of which repairs run.

use crate::types::{BPTreeSet, KeyPolicy, Node};

impl<'r, K, P: KeyPolicy<K>> BPTreeSet<'r, K, P> {
    /// Remove a key.
    ///
    /// Returns `true` if the key was present and removed, `false` (with no
    /// mutation) otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use bptree_set::{BPTreeSet, TrackingResource};
    ///
    /// let resource = TrackingResource::new();
    /// let mut tree = BPTreeSet::new(&resource);
    ///
    /// tree.insert(1);
    /// assert!(tree.remove(&1));
    /// assert!(!tree.remove(&1));
    /// assert_eq!(resource.used(), 0);
    /// ```
    pub fn remove(&mut self, key: &K) -> bool {
        let mut root = match self.root.take() {
            Some(root) => root,
            None => return false,
        };

        let removed = self.remove_recursive(&mut root, key);
        if removed {
            self.size -= 1;
        }

        if root.leaf {
            if root.keys.is_empty() {
                // Last element gone; the tree returns to the empty state
                // with every byte released.
                self.free_node(root);
                self.height = 0;
                debug_assert_eq!(self.node_count, 0);
                return removed;
            }
        } else if root.keys.is_empty() {
            // A merge cascaded to the top: the root's sole child takes over.
            let child = root.children.pop().expect("separator-less root keeps one child");
            self.free_node(root);
            self.height -= 1;
            self.root = Some(child);
            return removed;
        }

        self.root = Some(root);
        removed
    }

    fn remove_recursive(&mut self, node: &mut Node<K>, key: &K) -> bool {
        let (index, found) = node.locate::<P>(key);

        if node.leaf {
            if !found {
                return false;
            }
            node.keys.remove(index);
            node.subtree_count -= 1;
            return true;
        }

        if found {
            // The key is a separator. Pull its in-order predecessor out of
            // the left subtree and move it into the slot, so structural
            // keys keep bounding their children.
            let predecessor = self.take_greatest(&mut node.children[index]);
            node.keys[index] = predecessor;
            node.subtree_count -= 1;
            self.rebalance_child(node, index);
            return true;
        }

        if !self.remove_recursive(&mut node.children[index], key) {
            return false;
        }
        node.subtree_count -= 1;
        self.rebalance_child(node, index);
        true
    }

    /// Remove and return the greatest key of `node`'s subtree, repairing
    /// underflow on the way back out.
    fn take_greatest(&mut self, node: &mut Node<K>) -> K {
        node.subtree_count -= 1;
        if node.leaf {
            return node.keys.pop().expect("extraction from an empty leaf");
        }
        let last = node.children.len() - 1;
        let greatest = self.take_greatest(&mut node.children[last]);
        self.rebalance_child(node, last);
        greatest
    }

    /// Repair `parent.children[index]` if it underflowed: borrow from the
    /// left sibling, then the right sibling, and merge only when neither
    /// can donate.
    fn rebalance_child(&mut self, parent: &mut Node<K>, index: usize) {
        let min_keys = self.min_keys();
        if !parent.children[index].is_underfull(min_keys) {
            return;
        }

        if index > 0 && parent.children[index - 1].can_donate(min_keys) {
            let (left, rest) = parent.children.split_at_mut(index);
            left[index - 1].shift_into_right(&mut parent.keys[index - 1], &mut rest[0]);
            return;
        }

        if index + 1 < parent.children.len() && parent.children[index + 1].can_donate(min_keys) {
            let (left, rest) = parent.children.split_at_mut(index + 1);
            left[index].shift_from_right(&mut parent.keys[index], &mut rest[0]);
            return;
        }

        let left_index = if index > 0 { index - 1 } else { index };
        self.merge_children(parent, left_index);
    }

    /// Fuse `parent.children[index]` with the sibling to its right,
    /// pulling the separator between them down. The parent's own subtree
    /// count is unaffected: the separator moves down, not out.
    fn merge_children(&mut self, parent: &mut Node<K>, index: usize) {
        let separator = parent.keys.remove(index);
        let mut right = parent.children.remove(index + 1);
        parent.children[index].merge_from(separator, &mut right);
        self.free_node(right);
    }
}
