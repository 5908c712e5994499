use crate::{BPTreeSet, TrackingResource};

use proptest::prelude::*;
use std::collections::BTreeSet;

#[derive(Clone, Debug)]
enum Op {
    Insert(u64),
    Remove(u64),
    Contains(u64),
    Rank(u64),
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    // A small key domain forces duplicate inserts, misses, and plenty of
    // underflow repair.
    let key = 0u64..512;
    let op = prop_oneof![
        50 => key.clone().prop_map(Op::Insert),
        30 => key.clone().prop_map(Op::Remove),
        10 => key.clone().prop_map(Op::Contains),
        10 => key.prop_map(Op::Rank),
    ];
    prop::collection::vec(op, 0..=2000)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_with_btreeset(ops in ops_strategy(), capacity in 4usize..=32) {
        let resource = TrackingResource::new();
        let mut tree = BPTreeSet::with_capacity(capacity, &resource).unwrap();
        let mut model: BTreeSet<u64> = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(k) => prop_assert_eq!(tree.insert(k), model.insert(k)),
                Op::Remove(k) => prop_assert_eq!(tree.remove(&k), model.remove(&k)),
                Op::Contains(k) => prop_assert_eq!(tree.contains(&k), model.contains(&k)),
                Op::Rank(k) => prop_assert_eq!(tree.rank(&k), model.range(..k).count()),
            }
            prop_assert_eq!(tree.len(), model.len());
        }

        prop_assert!(tree.check_invariants(), "{:?}", tree.check_invariants_detailed());

        let got: Vec<u64> = tree.iter().copied().collect();
        let expected: Vec<u64> = model.iter().copied().collect();
        prop_assert_eq!(got, expected);

        tree.clear();
        prop_assert_eq!(resource.used(), 0);
    }

    #[test]
    fn prop_rank_windows_match_sorted_order(
        keys in prop::collection::btree_set(0u64..10_000, 1..400),
    ) {
        let resource = TrackingResource::new();
        let mut tree = BPTreeSet::with_capacity(8, &resource).unwrap();
        for &k in &keys {
            tree.insert(k);
        }
        let sorted: Vec<u64> = keys.iter().copied().collect();

        let high = sorted.len() - 1;
        let low = high / 3;

        let mut forward = Vec::new();
        tree.iterate_range(low, high, |k| forward.push(*k));
        prop_assert_eq!(&forward[..], &sorted[low..=high]);

        let mut backward = Vec::new();
        tree.iterate_range_reverse(low, high, |k| backward.push(*k));
        backward.reverse();
        prop_assert_eq!(&forward, &backward);
    }
}
