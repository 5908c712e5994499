//! Core types for the order-statistics B+ tree set.
//!
//! This module contains the fundamental data structures, the key/policy
//! contract, and the constants used throughout the tree implementation.

use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::memory::MemoryResource;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Minimum number of keys a node may be configured to hold.
pub(crate) const MIN_CAPACITY: usize = 4;

// ============================================================================
// KEY / POLICY CONTRACT
// ============================================================================

/// Comparison strategy for tree keys.
///
/// The policy is a type-level parameter, so the comparison is resolved at
/// compile time and the hot search path pays no dispatch cost. Supplying a
/// custom policy allows composite keys (e.g. a numeric score with a
/// tie-breaking member string) without the key type implementing `Ord`.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use bptree_set::{BPTreeSet, KeyPolicy, TrackingResource};
///
/// struct ScoredMember {
///     score: f64,
///     member: String,
/// }
///
/// struct ScorePolicy;
///
/// impl KeyPolicy<ScoredMember> for ScorePolicy {
///     fn compare(a: &ScoredMember, b: &ScoredMember) -> Ordering {
///         a.score
///             .partial_cmp(&b.score)
///             .unwrap_or(Ordering::Equal)
///             .then_with(|| a.member.cmp(&b.member))
///     }
/// }
///
/// let resource = TrackingResource::new();
/// let mut tree: BPTreeSet<ScoredMember, ScorePolicy> = BPTreeSet::with_policy(&resource);
/// assert!(tree.insert(ScoredMember { score: 1.5, member: "a".into() }));
/// ```
pub trait KeyPolicy<K> {
    /// Three-way comparison between two keys.
    fn compare(a: &K, b: &K) -> Ordering;
}

/// Default policy: the key's natural ordering.
pub struct NaturalOrder;

impl<K: Ord> KeyPolicy<K> for NaturalOrder {
    #[inline]
    fn compare(a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Order-statistics B+ tree set.
///
/// A balanced multi-way search tree over unique keys that, in addition to
/// the usual sorted-set operations, answers rank queries ("how many
/// elements are smaller than `k`?", "which element sits at ordinal `r`?")
/// and iterates contiguous *rank* windows, all in O(log n). Every node
/// caches the element count of its subtree, and that aggregate is kept
/// consistent through every split, merge, and borrow.
///
/// Node storage is accounted through a borrowed [`MemoryResource`]: once
/// the tree is empty again, every acquired byte has been released.
///
/// Unlike a textbook B+ tree, the median key moves up on a split and is
/// duplicated in neither half, so each key lives in exactly one node.
///
/// # Examples
///
/// ```
/// use bptree_set::{BPTreeSet, TrackingResource};
///
/// let resource = TrackingResource::new();
/// let mut tree = BPTreeSet::new(&resource);
///
/// for i in 0..100u64 {
///     assert!(tree.insert(i * 2));
/// }
///
/// assert_eq!(tree.len(), 100);
/// assert_eq!(tree.rank(&40), 20);
/// assert_eq!(tree.get_by_rank(20), Some(&40));
///
/// tree.clear();
/// assert_eq!(resource.used(), 0);
/// ```
pub struct BPTreeSet<'r, K, P = NaturalOrder> {
    /// Maximum number of keys per node.
    pub(crate) capacity: usize,
    /// The root node, or `None` when the tree is empty.
    pub(crate) root: Option<Box<Node<K>>>,
    /// Total number of elements; equals the root's subtree count.
    pub(crate) size: usize,
    /// Number of levels; 0 when empty, 1 for a lone root leaf.
    pub(crate) height: usize,
    /// Number of live nodes, for diagnostics and accounting checks.
    pub(crate) node_count: usize,
    /// Borrowed byte-accounting capability; must outlive the tree.
    pub(crate) resource: &'r dyn MemoryResource,
    pub(crate) _policy: PhantomData<P>,
}

/// A tree node. Leaves hold only keys; internal nodes additionally own one
/// child per key gap and cache the element count of their entire subtree.
pub(crate) struct Node<K> {
    /// Fixed at construction; all siblings share the same leaf-ness.
    pub(crate) leaf: bool,
    /// Number of keys in this node's subtree:
    /// `keys.len() + sum(children subtree counts)`.
    pub(crate) subtree_count: usize,
    /// Strictly increasing keys. Pre-allocated to `capacity + 1` slots so
    /// one transient overflow before a split never reallocates.
    pub(crate) keys: Vec<K>,
    /// Exclusively owned children; empty for leaves, `keys.len() + 1`
    /// otherwise. Pre-allocated to `capacity + 2` slots.
    pub(crate) children: Vec<Box<Node<K>>>,
}

// ============================================================================
// RESULT TYPES
// ============================================================================

/// Outcome of a recursive insertion step, propagated bottom-up so the
/// parent can apply the split and adjust its own subtree count.
pub(crate) enum InsertOutcome<K> {
    /// An equal key already exists; nothing was mutated.
    Duplicate,
    /// The key was added and the child absorbed it without overflowing.
    Inserted,
    /// The child split: the separator moves up and `right` becomes the new
    /// sibling immediately after the child that split.
    Split { separator: K, right: Box<Node<K>> },
}
