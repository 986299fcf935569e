#![cfg(test)]

// Property tests for LinkedList kept inside the crate, next to the other
// unit tests, so shrinking output points at crate-internal types.

use crate::linked_list::{Handle, LinkedList};
use proptest::prelude::*;
use std::collections::VecDeque;

#[derive(Clone, Debug)]
enum Op {
    Prepend(usize, u8),
    Append(usize, u8),
    RemoveFirst,
    RemoveLast,
    Remove(usize),
    Find(usize),
}

// Small key pool so duplicate keys are common.
const POOL: [&str; 4] = ["a", "b", "c", "d"];

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let idx = 0..POOL.len();
    let op = prop_oneof![
        (idx.clone(), any::<u8>()).prop_map(|(i, v)| Op::Prepend(i, v)),
        (idx.clone(), any::<u8>()).prop_map(|(i, v)| Op::Append(i, v)),
        Just(Op::RemoveFirst),
        Just(Op::RemoveLast),
        idx.clone().prop_map(Op::Remove),
        idx.prop_map(Op::Find),
    ];
    proptest::collection::vec(op, 1..80)
}

fn walk_back(list: &LinkedList) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut cursor: Option<Handle> = list.last();
    while let Some(h) = cursor {
        out.push((
            h.key(list).unwrap().to_string(),
            h.value(list).unwrap().to_string(),
        ));
        cursor = h.prev(list);
    }
    out.reverse();
    out
}

// Property: LinkedList behaves like a VecDeque of pairs where remove/find
// act on the first matching key.
// Invariants checked after every op:
// - forward iteration equals the model; backward links mirror it;
// - len/is_empty parity; first/last agree with the model's ends;
// - removed handles no longer resolve.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_matches_deque(ops in arb_ops()) {
        let mut sut = LinkedList::new();
        let mut model: VecDeque<(String, String)> = VecDeque::new();
        let mut stale: Vec<Handle> = Vec::new();

        for op in ops {
            match op {
                Op::Prepend(i, v) => {
                    let pair = (POOL[i].to_string(), v.to_string());
                    sut.prepend(pair.0.clone(), pair.1.clone()).unwrap();
                    model.push_front(pair);
                }
                Op::Append(i, v) => {
                    let pair = (POOL[i].to_string(), v.to_string());
                    sut.append(pair.0.clone(), pair.1.clone()).unwrap();
                    model.push_back(pair);
                }
                Op::RemoveFirst => {
                    if let Some(h) = sut.first() { stale.push(h); }
                    prop_assert_eq!(sut.remove_first(), model.pop_front());
                }
                Op::RemoveLast => {
                    if let Some(h) = sut.last() { stale.push(h); }
                    prop_assert_eq!(sut.remove_last(), model.pop_back());
                }
                Op::Remove(i) => {
                    let key = POOL[i];
                    if let Some(hit) = sut.find(key) { stale.push(hit.handle); }
                    let expected = model
                        .iter()
                        .position(|(k, _)| k == key)
                        .and_then(|pos| model.remove(pos));
                    prop_assert_eq!(sut.remove(key), expected);
                }
                Op::Find(i) => {
                    let key = POOL[i];
                    let hit = sut.find(key);
                    let pos = model.iter().position(|(k, _)| k == key);
                    prop_assert_eq!(hit.map(|h| h.position), pos);
                    if let (Some(hit), Some(pos)) = (hit, pos) {
                        prop_assert_eq!(hit.handle.value(&sut), Some(model[pos].1.as_str()));
                    }
                }
            }

            let forward: Vec<(String, String)> = sut
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            let expected: Vec<(String, String)> = model.iter().cloned().collect();
            prop_assert_eq!(&forward, &expected);
            prop_assert_eq!(walk_back(&sut), expected);
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert_eq!(
                sut.first().and_then(|h| h.key(&sut)),
                model.front().map(|(k, _)| k.as_str())
            );
            prop_assert_eq!(
                sut.last().and_then(|h| h.key(&sut)),
                model.back().map(|(k, _)| k.as_str())
            );
            for h in &stale {
                prop_assert!(h.key(&sut).is_none());
            }
        }
    }
}
