//! Node-level primitives.
//!
//! These are the building blocks the tree composes into its insert and
//! delete algorithms: key location, split halves, sibling rotation, and
//! merging, each keeping the cached subtree counts consistent. Occupancy
//! limits are a tree concern, so the relevant thresholds come in as
//! arguments; the node itself stores no capacity.

use crate::types::{KeyPolicy, Node};

impl<K> Node<K> {
    // ============================================================================
    // SEARCH
    // ============================================================================

    /// Binary search for `key`. Returns `(index, true)` on an exact match,
    /// otherwise `(insertion_point, false)`; for internal nodes the
    /// insertion point doubles as the child index to descend into.
    #[inline]
    pub(crate) fn locate<P: KeyPolicy<K>>(&self, key: &K) -> (usize, bool) {
        match self.keys.binary_search_by(|probe| P::compare(probe, key)) {
            Ok(index) => (index, true),
            Err(index) => (index, false),
        }
    }

    // ============================================================================
    // AGGREGATE COUNT
    // ============================================================================

    /// O(1) cached element count of this node's subtree.
    #[inline]
    pub(crate) fn tree_count(&self) -> usize {
        self.subtree_count
    }

    /// Recompute the cached count from this node's direct contents. O(t) in
    /// the node arity; used after a split redistributes keys and children.
    pub(crate) fn recount(&mut self) {
        self.subtree_count =
            self.keys.len() + self.children.iter().map(|c| c.subtree_count).sum::<usize>();
    }

    /// Full recursive recomputation, ignoring every cached count. This is
    /// the validation oracle; production paths never call it.
    pub(crate) fn debug_tree_count(&self) -> usize {
        self.keys.len()
            + self
                .children
                .iter()
                .map(|c| c.debug_tree_count())
                .sum::<usize>()
    }

    // ============================================================================
    // OCCUPANCY
    // ============================================================================

    /// True if this node has fallen below the minimum occupancy.
    #[inline]
    pub(crate) fn is_underfull(&self, min_keys: usize) -> bool {
        self.keys.len() < min_keys
    }

    /// True if this node can give a key to a sibling without underflowing.
    #[inline]
    pub(crate) fn can_donate(&self, min_keys: usize) -> bool {
        self.keys.len() > min_keys
    }

    // ============================================================================
    // SPLIT
    // ============================================================================

    /// Split an overflowing node at its median, moving the upper half into
    /// `right` (a freshly allocated empty sibling of the same kind) and
    /// returning the median as the separator to promote. The median ends up
    /// in neither half. Both counts are recomputed from the new contents.
    pub(crate) fn split_into(&mut self, right: &mut Node<K>) -> K {
        debug_assert_eq!(self.leaf, right.leaf);
        debug_assert!(right.keys.is_empty() && right.children.is_empty());

        let mid = self.keys.len() / 2;
        right.keys.extend(self.keys.drain(mid + 1..));
        if !self.leaf {
            right.children.extend(self.children.drain(mid + 1..));
        }
        let separator = self.keys.pop().expect("split of a node with no median");

        self.recount();
        right.recount();
        separator
    }

    // ============================================================================
    // BORROWING AND MERGING
    // ============================================================================

    /// Rotate one key rightwards: the parent separator drops into `right`
    /// and this node's greatest key replaces it. Internal nodes move their
    /// last child along with the key.
    pub(crate) fn shift_into_right(&mut self, separator: &mut K, right: &mut Node<K>) {
        let dropped = std::mem::replace(
            separator,
            self.keys.pop().expect("donor sibling has no keys"),
        );
        right.keys.insert(0, dropped);

        let mut moved = 1;
        if !self.leaf {
            let child = self.children.pop().expect("internal donor has no children");
            moved += child.subtree_count;
            right.children.insert(0, child);
        }
        self.subtree_count -= moved;
        right.subtree_count += moved;
    }

    /// Rotate one key leftwards: the parent separator drops into this node
    /// and `right`'s least key replaces it.
    pub(crate) fn shift_from_right(&mut self, separator: &mut K, right: &mut Node<K>) {
        let dropped = std::mem::replace(separator, right.keys.remove(0));
        self.keys.push(dropped);

        let mut moved = 1;
        if !self.leaf {
            let child = right.children.remove(0);
            moved += child.subtree_count;
            self.children.push(child);
        }
        right.subtree_count -= moved;
        self.subtree_count += moved;
    }

    /// Absorb the parent separator and the entire contents of `right`,
    /// leaving `right` empty and ready to be freed. The combined key count
    /// never exceeds the configured capacity because merging only happens
    /// when neither side can donate.
    pub(crate) fn merge_from(&mut self, separator: K, right: &mut Node<K>) {
        debug_assert_eq!(self.leaf, right.leaf);

        self.keys.push(separator);
        self.keys.append(&mut right.keys);
        self.children.append(&mut right.children);
        self.subtree_count += 1 + right.subtree_count;
        right.subtree_count = 0;
    }
}
