//! INSERT operations.
//!
//! Insertion descends recursively and propagates splits back up through
//! [`InsertOutcome`]: the child reports the promoted separator and its new
//! right sibling, and the parent applies them and checks its own overflow.
//! Every node on the path of a successful insert has its subtree count
//! incremented exactly once.

use crate::types::{BPTreeSet, InsertOutcome, KeyPolicy, Node};

impl<'r, K, P: KeyPolicy<K>> BPTreeSet<'r, K, P> {
    /// Insert a key.
    ///
    /// Returns `true` if the key was newly added. Returns `false` without
    /// mutating anything if an equal key (under the tree's policy) is
    /// already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use bptree_set::{BPTreeSet, TrackingResource};
    ///
    /// let resource = TrackingResource::new();
    /// let mut tree = BPTreeSet::new(&resource);
    ///
    /// assert!(tree.insert(42));
    /// assert!(!tree.insert(42));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        let mut root = match self.root.take() {
            Some(root) => root,
            None => {
                let mut leaf = self.new_leaf();
                leaf.keys.push(key);
                leaf.subtree_count = 1;
                self.root = Some(leaf);
                self.size = 1;
                self.height = 1;
                return true;
            }
        };

        // The root is detached during the recursion so node borrows never
        // alias the tree's allocation state.
        let outcome = self.insert_recursive(&mut root, key);
        match outcome {
            InsertOutcome::Duplicate => {
                self.root = Some(root);
                false
            }
            InsertOutcome::Inserted => {
                self.size += 1;
                self.root = Some(root);
                true
            }
            InsertOutcome::Split { separator, right } => {
                let mut new_root = self.new_branch();
                new_root.subtree_count = 1 + root.tree_count() + right.tree_count();
                new_root.keys.push(separator);
                new_root.children.push(root);
                new_root.children.push(right);
                self.root = Some(new_root);
                self.height += 1;
                self.size += 1;
                true
            }
        }
    }

    fn insert_recursive(&mut self, node: &mut Node<K>, key: K) -> InsertOutcome<K> {
        let (index, found) = node.locate::<P>(&key);
        if found {
            return InsertOutcome::Duplicate;
        }

        if node.leaf {
            node.keys.insert(index, key);
            node.subtree_count += 1;
            return self.split_if_overflowing(node);
        }

        match self.insert_recursive(&mut node.children[index], key) {
            InsertOutcome::Duplicate => InsertOutcome::Duplicate,
            InsertOutcome::Inserted => {
                node.subtree_count += 1;
                InsertOutcome::Inserted
            }
            InsertOutcome::Split { separator, right } => {
                node.keys.insert(index, separator);
                node.children.insert(index + 1, right);
                node.subtree_count += 1;
                self.split_if_overflowing(node)
            }
        }
    }

    /// Split `node` if it now holds more than `capacity` keys. The sibling
    /// is allocated before the node is touched, so an allocation failure
    /// cannot leave a half-split tree behind.
    fn split_if_overflowing(&mut self, node: &mut Node<K>) -> InsertOutcome<K> {
        if node.keys.len() <= self.capacity {
            return InsertOutcome::Inserted;
        }

        let mut right = if node.leaf {
            self.new_leaf()
        } else {
            self.new_branch()
        };
        let separator = node.split_into(&mut right);
        InsertOutcome::Split { separator, right }
    }
}
