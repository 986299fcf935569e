// RbTree property tests.
//
// Property 1: state-machine equivalence against a sorted multiset.
//  - Model: BTreeMap<key, count>; every value is derived from its key, so
//    which duplicate a delete removes does not matter to the model.
//  - Operations: insert, delete (present or absent), delete-min, get.
//  - Invariants after every op: verify() passes (colors, black height,
//    ordering, parent links, len); in-order keys equal the model expanded;
//    height <= 2*log2(n+1); a failed delete changes nothing.
//
// Property 2: any insertion order of distinct keys yields the same
//  in-order walk and a valid tree.
use proptest::prelude::*;
use rbchain::RbTree;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
    Insert(i32),
    Delete(i32),
    DeleteMin,
    Get(i32),
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        4 => (0i32..64).prop_map(Op::Insert),
        3 => (0i32..72).prop_map(Op::Delete),
        1 => Just(Op::DeleteMin),
        1 => (0i32..72).prop_map(Op::Get),
    ];
    proptest::collection::vec(op, 1..200)
}

fn value_for(k: i32) -> String {
    format!("v{}", k)
}

fn expand(model: &BTreeMap<i32, usize>) -> Vec<i32> {
    model
        .iter()
        .flat_map(|(&k, &n)| std::iter::repeat(k).take(n))
        .collect()
}

fn remove_one(model: &mut BTreeMap<i32, usize>, k: i32) -> bool {
    match model.get_mut(&k) {
        Some(n) if *n > 1 => {
            *n -= 1;
            true
        }
        Some(_) => {
            model.remove(&k);
            true
        }
        None => false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(ops in arb_ops()) {
        let mut sut = RbTree::new();
        let mut model: BTreeMap<i32, usize> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k) => {
                    let h = sut.insert(k, &value_for(k)).unwrap();
                    prop_assert_eq!(h.key(&sut), Some(k));
                    *model.entry(k).or_insert(0) += 1;
                }
                Op::Delete(k) => {
                    let before: Vec<i32> = sut.keys().collect();
                    let root = sut.root();
                    let deleted = sut.delete(k);
                    prop_assert_eq!(deleted, remove_one(&mut model, k));
                    if !deleted {
                        let after: Vec<i32> = sut.keys().collect();
                        prop_assert_eq!(before, after);
                        prop_assert_eq!(sut.root(), root);
                    }
                }
                Op::DeleteMin => {
                    let min = sut.min(sut.root());
                    match min.key(&sut) {
                        Some(k) => {
                            prop_assert_eq!(model.keys().next().copied(), Some(k));
                            prop_assert!(sut.delete(k));
                            remove_one(&mut model, k);
                        }
                        None => prop_assert!(model.is_empty()),
                    }
                }
                Op::Get(k) => {
                    let h = sut.get(k);
                    prop_assert_eq!(!h.is_nil(&sut), model.contains_key(&k));
                    if let Some(v) = h.value(&sut) {
                        prop_assert_eq!(v, value_for(k));
                    }
                }
            }

            prop_assert!(sut.verify().is_ok(), "{:?}", sut.verify());
            let keys: Vec<i32> = sut.keys().collect();
            prop_assert_eq!(keys, expand(&model));
            prop_assert_eq!(sut.len(), model.values().sum::<usize>());

            let n = sut.len() as f64;
            let h = f64::from(sut.height(sut.root()));
            prop_assert!(h <= 2.0 * (n + 1.0).log2(), "height {} for {} nodes", h, n);
        }
    }

    #[test]
    fn prop_insert_order_independent(keys in proptest::collection::btree_set(-500i32..500, 0..120)) {
        let sorted: Vec<i32> = keys.iter().copied().collect();
        let mut shuffled = sorted.clone();
        // Deterministic interleave: odds ascending, then evens descending.
        shuffled.sort_by_key(|k| (k.rem_euclid(2) == 0, if k.rem_euclid(2) == 0 { -k } else { *k }));

        let mut tree = RbTree::new();
        for &k in &shuffled {
            tree.insert(k, &value_for(k)).unwrap();
        }
        prop_assert!(tree.verify().is_ok());
        prop_assert_eq!(tree.keys().collect::<Vec<_>>(), sorted.clone());
        for (k, v) in tree.iter() {
            prop_assert_eq!(v, value_for(k));
        }
        if let Some(&first) = sorted.first() {
            prop_assert_eq!(tree.min(tree.root()).key(&tree), Some(first));
            prop_assert_eq!(tree.max(tree.root()).key(&tree), sorted.last().copied());
        }
    }
}
