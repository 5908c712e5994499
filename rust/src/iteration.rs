//! Iteration: the full in-order iterator and the rank-window visitors.
//!
//! Keys live at every level of this tree (the median moves up on splits),
//! so there is no leaf linked list to chain along. The iterator instead
//! keeps an explicit descent stack of `(node, position)` pairs, and the
//! rank-window walks carry a skip count downwards so a window of `k`
//! elements costs O(log n + k).

use crate::types::{BPTreeSet, Node};

/// In-order iterator over all keys, smallest first.
pub struct Iter<'a, K> {
    /// Descent stack; `usize` is the next in-order position within the node.
    stack: Vec<(&'a Node<K>, usize)>,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        if let Some(node) = root {
            iter.push_leftmost(node);
        }
        iter
    }

    fn push_leftmost(&mut self, mut node: &'a Node<K>) {
        loop {
            self.stack.push((node, 0));
            if node.leaf {
                return;
            }
            node = &node.children[0];
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        loop {
            let &(node, position) = self.stack.last()?;

            if node.leaf {
                if position < node.keys.len() {
                    self.stack.last_mut().expect("stack top exists").1 = position + 1;
                    return Some(&node.keys[position]);
                }
                self.stack.pop();
                continue;
            }

            if position >= node.keys.len() {
                self.stack.pop();
                continue;
            }

            // Emit the separator, then queue the subtree to its right.
            self.stack.last_mut().expect("stack top exists").1 = position + 1;
            self.push_leftmost(&node.children[position + 1]);
            return Some(&node.keys[position]);
        }
    }
}

impl<'r, K, P> BPTreeSet<'r, K, P> {
    /// Iterate all elements in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bptree_set::{BPTreeSet, TrackingResource};
    ///
    /// let resource = TrackingResource::new();
    /// let mut tree = BPTreeSet::new(&resource);
    /// for i in [3u64, 1, 2] {
    ///     tree.insert(i);
    /// }
    ///
    /// let keys: Vec<u64> = tree.iter().copied().collect();
    /// assert_eq!(keys, [1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.root.as_deref())
    }

    /// Visit the elements at ranks `low..=high` in ascending order.
    ///
    /// Both bounds are zero-based ranks, not keys. The window must be
    /// well-formed: `low <= high < len()`. Violating the precondition is a
    /// caller bug and panics rather than being silently clamped.
    ///
    /// # Examples
    ///
    /// ```
    /// use bptree_set::{BPTreeSet, TrackingResource};
    ///
    /// let resource = TrackingResource::new();
    /// let mut tree = BPTreeSet::new(&resource);
    /// for i in 0..10u64 {
    ///     tree.insert(i * 2);
    /// }
    ///
    /// let mut seen = Vec::new();
    /// tree.iterate_range(3, 5, |k| seen.push(*k));
    /// assert_eq!(seen, [6, 8, 10]);
    /// ```
    pub fn iterate_range<F>(&self, low: usize, high: usize, mut visit: F)
    where
        F: FnMut(&K),
    {
        self.check_window(low, high);
        let root = self.root.as_deref().expect("window checked against a non-empty tree");
        let mut remaining = high - low + 1;
        visit_ascending(root, low, &mut remaining, &mut visit);
        debug_assert_eq!(remaining, 0);
    }

    /// Visit the elements at ranks `low..=high` in descending order: the
    /// element at `high` first, down to the element at `low`.
    ///
    /// Same precondition as [`Self::iterate_range`].
    pub fn iterate_range_reverse<F>(&self, low: usize, high: usize, mut visit: F)
    where
        F: FnMut(&K),
    {
        self.check_window(low, high);
        let root = self.root.as_deref().expect("window checked against a non-empty tree");
        let mut remaining = high - low + 1;
        let skip = self.size - 1 - high;
        visit_descending(root, skip, &mut remaining, &mut visit);
        debug_assert_eq!(remaining, 0);
    }

    fn check_window(&self, low: usize, high: usize) {
        assert!(low <= high, "rank window is inverted: {} > {}", low, high);
        assert!(
            high < self.size,
            "rank window end {} out of bounds for {} elements",
            high,
            self.size
        );
    }
}

/// In-order walk of `node`'s subtree skipping the first `skip` elements,
/// visiting until `remaining` hits zero.
fn visit_ascending<K>(
    node: &Node<K>,
    mut skip: usize,
    remaining: &mut usize,
    visit: &mut impl FnMut(&K),
) {
    if node.leaf {
        for key in &node.keys[skip..] {
            if *remaining == 0 {
                return;
            }
            visit(key);
            *remaining -= 1;
        }
        return;
    }

    for (i, child) in node.children.iter().enumerate() {
        if *remaining == 0 {
            return;
        }
        if skip < child.tree_count() {
            visit_ascending(child, skip, remaining, visit);
            skip = 0;
        } else {
            skip -= child.tree_count();
        }
        if let Some(separator) = node.keys.get(i) {
            if skip == 0 {
                if *remaining == 0 {
                    return;
                }
                visit(separator);
                *remaining -= 1;
            } else {
                skip -= 1;
            }
        }
    }
}

/// Reverse in-order walk skipping the `skip` greatest elements.
fn visit_descending<K>(
    node: &Node<K>,
    mut skip: usize,
    remaining: &mut usize,
    visit: &mut impl FnMut(&K),
) {
    if node.leaf {
        debug_assert!(skip <= node.keys.len());
        let end = node.keys.len() - skip;
        for key in node.keys[..end].iter().rev() {
            if *remaining == 0 {
                return;
            }
            visit(key);
            *remaining -= 1;
        }
        return;
    }

    for i in (0..node.children.len()).rev() {
        if *remaining == 0 {
            return;
        }
        let child = &node.children[i];
        if skip < child.tree_count() {
            visit_descending(child, skip, remaining, visit);
            skip = 0;
        } else {
            skip -= child.tree_count();
        }
        if i > 0 {
            if skip == 0 {
                if *remaining == 0 {
                    return;
                }
                visit(&node.keys[i - 1]);
                *remaining -= 1;
            } else {
                skip -= 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::memory::TrackingResource;
    use crate::BPTreeSet;

    #[test]
    fn iter_yields_all_keys_in_order() {
        let resource = TrackingResource::new();
        let mut tree = BPTreeSet::with_capacity(4, &resource).unwrap();

        for i in (0..200u64).rev() {
            tree.insert(i);
        }
        let keys: Vec<u64> = tree.iter().copied().collect();
        let expected: Vec<u64> = (0..200).collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn window_of_one_hits_exactly_one_element() {
        let resource = TrackingResource::new();
        let mut tree = BPTreeSet::with_capacity(4, &resource).unwrap();
        for i in 0..50u64 {
            tree.insert(i);
        }

        let mut seen = Vec::new();
        tree.iterate_range(17, 17, |k| seen.push(*k));
        assert_eq!(seen, [17]);

        seen.clear();
        tree.iterate_range_reverse(17, 17, |k| seen.push(*k));
        assert_eq!(seen, [17]);
    }

    #[test]
    fn full_window_matches_iter_front_and_back() {
        let resource = TrackingResource::new();
        let mut tree = BPTreeSet::with_capacity(4, &resource).unwrap();
        for i in 0..321u64 {
            tree.insert(i * 7);
        }

        let mut forward = Vec::new();
        tree.iterate_range(0, 320, |k| forward.push(*k));
        assert_eq!(forward, tree.iter().copied().collect::<Vec<_>>());

        let mut backward = Vec::new();
        tree.iterate_range_reverse(0, 320, |k| backward.push(*k));
        backward.reverse();
        assert_eq!(backward, forward);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn window_past_the_end_panics() {
        let resource = TrackingResource::new();
        let mut tree = BPTreeSet::with_capacity(4, &resource).unwrap();
        for i in 0..10u64 {
            tree.insert(i);
        }
        tree.iterate_range(0, 10, |_| {});
    }

    #[test]
    #[should_panic(expected = "inverted")]
    fn inverted_window_panics() {
        let resource = TrackingResource::new();
        let mut tree = BPTreeSet::with_capacity(4, &resource).unwrap();
        for i in 0..10u64 {
            tree.insert(i);
        }
        tree.iterate_range(5, 3, |_| {});
    }
}
