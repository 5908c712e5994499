//! Randomized mixed-operation runs checked against `std::collections::BTreeSet`.
//!
//! The standard set is the behavioral model; the recursive invariant
//! checker is the structural oracle. Seeds are fixed so failures replay.

use std::collections::BTreeSet;

use bptree_set::{BPTreeSet, TrackingResource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn ten_thousand_mixed_operations_match_btreeset() {
    let mut rng = StdRng::seed_from_u64(42);
    let resource = TrackingResource::new();
    let mut tree = BPTreeSet::with_capacity(4, &resource).unwrap();
    let mut model: BTreeSet<u64> = BTreeSet::new();

    // The structural checker runs after every single mutation, so even a
    // violation that a later operation would repair shows up here.
    for _ in 0..10_000 {
        let key = rng.gen_range(0..1500u64);
        if rng.gen_bool(0.6) {
            assert_eq!(tree.insert(key), model.insert(key), "insert {}", key);
        } else {
            assert_eq!(tree.remove(&key), model.remove(&key), "remove {}", key);
        }
        assert_eq!(tree.len(), model.len());
        assert_eq!(tree.contains(&key), model.contains(&key));
        assert!(tree.check_invariants(), "{:?}", tree.check_invariants_detailed());
    }

    let got: Vec<u64> = tree.iter().copied().collect();
    let expected: Vec<u64> = model.iter().copied().collect();
    assert_eq!(got, expected);

    for (r, key) in model.iter().enumerate() {
        assert_eq!(tree.rank(key), r);
        assert_eq!(tree.get_by_rank(r), Some(key));
    }

    for key in expected {
        assert!(tree.remove(&key));
    }
    assert!(tree.is_empty());
    assert_eq!(resource.used(), 0);
}

#[test]
fn churn_holds_up_across_node_capacities() {
    for capacity in [4usize, 5, 8, 16, 33] {
        let mut rng = StdRng::seed_from_u64(capacity as u64);
        let resource = TrackingResource::new();
        let mut tree = BPTreeSet::with_capacity(capacity, &resource).unwrap();
        let mut model: BTreeSet<u32> = BTreeSet::new();

        for _ in 0..3000 {
            let key = rng.gen_range(0..400u32);
            if rng.gen_bool(0.5) {
                assert_eq!(tree.insert(key), model.insert(key));
            } else {
                assert_eq!(tree.remove(&key), model.remove(&key));
            }
        }

        assert!(
            tree.check_invariants(),
            "capacity {}: {:?}",
            capacity,
            tree.check_invariants_detailed()
        );
        let got: Vec<u32> = tree.iter().copied().collect();
        let expected: Vec<u32> = model.iter().copied().collect();
        assert_eq!(got, expected);

        tree.clear();
        assert_eq!(resource.used(), 0);
    }
}
