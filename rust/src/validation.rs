//! Validation and debugging utilities.
//!
//! The recursive checker is the reference oracle for the randomized test
//! suites: it re-derives every structural invariant (ordering, bound
//! containment, uniform depth, occupancy, aggregate counts, bookkeeping
//! consistency) independently of the incremental maintenance done by the
//! mutation paths. Nothing here runs on production paths.

use crate::error::{BPTreeError, TreeResult};
use crate::types::{BPTreeSet, KeyPolicy, Node};

impl<'r, K, P: KeyPolicy<K>> BPTreeSet<'r, K, P> {
    /// Check all tree invariants. Returns `true` when they hold.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check all tree invariants, reporting the first violation as a
    /// [`BPTreeError::DataIntegrityError`].
    pub fn check_invariants_detailed(&self) -> TreeResult<()> {
        let root = match self.root.as_deref() {
            None => {
                if self.size != 0 || self.height != 0 || self.node_count != 0 {
                    return Err(BPTreeError::data_integrity(
                        "empty tree",
                        &format!(
                            "residual bookkeeping: size={} height={} nodes={}",
                            self.size, self.height, self.node_count
                        ),
                    ));
                }
                return Ok(());
            }
            Some(root) => root,
        };

        if root.tree_count() != self.size {
            return Err(BPTreeError::data_integrity(
                "root",
                &format!(
                    "subtree count {} disagrees with size {}",
                    root.tree_count(),
                    self.size
                ),
            ));
        }
        if root.debug_tree_count() != self.size {
            return Err(BPTreeError::data_integrity(
                "root",
                &format!(
                    "recomputed element count {} disagrees with size {}",
                    root.debug_tree_count(),
                    self.size
                ),
            ));
        }

        let depth = self.check_node(root, None, true, 1)?;
        if depth != self.height {
            return Err(BPTreeError::data_integrity(
                "root",
                &format!("leaf depth {} disagrees with height {}", depth, self.height),
            ));
        }

        let counted = count_nodes(root);
        if counted != self.node_count {
            return Err(BPTreeError::data_integrity(
                "root",
                &format!("{} nodes reachable but node_count says {}", counted, self.node_count),
            ));
        }

        Ok(())
    }

    /// Recursively check one node against its inherited upper bound.
    /// Returns the leaf depth of the subtree.
    fn check_node(
        &self,
        node: &Node<K>,
        upper: Option<&K>,
        is_root: bool,
        depth: usize,
    ) -> TreeResult<usize> {
        let fail = |details: String| Err(BPTreeError::data_integrity("node", &details));

        if node.keys.is_empty() {
            return fail(format!("node at depth {} holds no keys", depth));
        }
        if node.keys.len() > self.capacity {
            return fail(format!(
                "node at depth {} holds {} keys, over capacity {}",
                depth,
                node.keys.len(),
                self.capacity
            ));
        }
        if !is_root && node.is_underfull(self.min_keys()) {
            return fail(format!(
                "non-root node at depth {} holds {} keys, under minimum {}",
                depth,
                node.keys.len(),
                self.min_keys()
            ));
        }

        for i in 1..node.keys.len() {
            if P::compare(&node.keys[i - 1], &node.keys[i]) != std::cmp::Ordering::Less {
                return fail(format!("keys out of order at depth {} position {}", depth, i));
            }
        }
        if let Some(upper) = upper {
            let last = node.keys.last().expect("checked non-empty");
            if P::compare(last, upper) != std::cmp::Ordering::Less {
                return fail(format!(
                    "greatest key at depth {} reaches its inherited upper bound",
                    depth
                ));
            }
        }

        if node.leaf {
            if !node.children.is_empty() {
                return fail(format!("leaf at depth {} owns children", depth));
            }
            return Ok(depth);
        }

        if node.children.len() != node.keys.len() + 1 {
            return fail(format!(
                "internal node at depth {} has {} keys but {} children",
                depth,
                node.keys.len(),
                node.children.len()
            ));
        }
        if node.children.iter().any(|c| c.leaf != node.children[0].leaf) {
            return fail(format!("mixed child leaf-ness at depth {}", depth));
        }

        let derived: usize =
            node.keys.len() + node.children.iter().map(|c| c.tree_count()).sum::<usize>();
        if derived != node.tree_count() {
            return fail(format!(
                "subtree count at depth {} caches {} but children sum to {}",
                depth,
                node.tree_count(),
                derived
            ));
        }

        let mut leaf_depth = None;
        for (i, child) in node.children.iter().enumerate() {
            let child_upper = node.keys.get(i).or(upper);
            let child_depth = self.check_node(child, child_upper, false, depth + 1)?;
            if *leaf_depth.get_or_insert(child_depth) != child_depth {
                return fail(format!("uneven leaf depth below depth {}", depth));
            }
        }
        Ok(leaf_depth.expect("internal node has at least one child"))
    }
}

impl<'r, K, P> BPTreeSet<'r, K, P> {
    /// Depth of every leaf, left to right (debugging aid; all entries are
    /// equal on a valid tree).
    pub fn leaf_depths(&self) -> Vec<usize> {
        let mut depths = Vec::new();
        if let Some(root) = self.root.as_deref() {
            collect_leaf_depths(root, 1, &mut depths);
        }
        depths
    }
}

fn count_nodes<K>(node: &Node<K>) -> usize {
    1 + node.children.iter().map(|c| count_nodes(c)).sum::<usize>()
}

fn collect_leaf_depths<K>(node: &Node<K>, depth: usize, depths: &mut Vec<usize>) {
    if node.leaf {
        depths.push(depth);
        return;
    }
    for child in &node.children {
        collect_leaf_depths(child, depth + 1, depths);
    }
}
