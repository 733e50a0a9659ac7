use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

fn validate_trie(t: &HatTrie) {
    let mut container_refs = vec![0usize; t.containers.len()];
    let mut node_refs = vec![0usize; t.nodes.len()];
    let mut stored = 0usize;

    for node in &t.nodes {
        stored += usize::from(node.terminal().is_some());

        let mut next_start = 0usize;
        for (start, end, child) in node.runs() {
            assert_eq!(start as usize, next_start, "runs must tile the slots");
            next_start = end as usize + 1;

            match child {
                Child::Node(id) => {
                    assert_eq!(start, end, "an internal node owns a single slot");
                    assert_ne!(id, NodeId::ROOT, "the root is never a child");
                    node_refs[id.index()] += 1;
                }
                Child::Container(id) => {
                    container_refs[id.index()] += 1;
                    let c = &t.containers[id.index()];
                    assert_eq!(c.range(), (start, end), "container range must match its run");
                    assert_eq!(c.is_hybrid(), start != end, "hybrid iff shared by several slots");
                    assert!(
                        c.len() < t.config.burst_threshold,
                        "container left at or above the burst threshold"
                    );
                    if c.is_hybrid() {
                        for (key, _) in c.iter() {
                            let head = *key.first().expect("hybrid suffixes are never empty");
                            assert!((start..=end).contains(&head), "suffix outside container range");
                        }
                    }
                    stored += c.len();
                }
            }
        }
        assert_eq!(next_start, node::FANOUT);
    }

    assert!(
        container_refs.iter().all(|&n| n == 1),
        "every container is referenced by exactly one run"
    );
    assert_eq!(node_refs[0], 0);
    assert!(
        node_refs[1..].iter().all(|&n| n == 1),
        "every non-root node has exactly one parent slot"
    );
    assert_eq!(stored, t.len(), "stored entries must match HatTrie::len");
}

#[derive(Clone, Debug)]
enum Op {
    Insert(Vec<u8>, Value),
    Get(Vec<u8>),
}

fn key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // A narrow alphabet forces shared prefixes and deep bursts; 0x00 and 0xFF
    // sit on the edges of every slot range.
    let byte = prop_oneof![Just(0u8), Just(1u8), Just(b'a'), Just(b'b'), Just(0xFFu8)];
    prop::collection::vec(byte, 0..=6)
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        70 => (key.clone(), any::<Value>()).prop_map(|(k, v)| Op::Insert(k, v)),
        30 => key.prop_map(Op::Get),
    ];
    prop::collection::vec(op, 0..=600)
}

fn any_keys() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..=24), 0..=400)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in ops_strategy(), threshold in 1usize..=8) {
        let mut t = HatTrie::with_config(TrieConfig::default().with_burst_threshold(threshold));
        let mut m: BTreeMap<Vec<u8>, Value> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    t.insert(&key, value);
                    m.entry(key).or_insert(value);
                }
                Op::Get(key) => {
                    prop_assert_eq!(t.get(&key), m.get(key.as_slice()).copied());
                }
            }
            prop_assert_eq!(t.len(), m.len());
        }

        validate_trie(&t);
        let got: Vec<(Vec<u8>, Value)> = t.iter().collect();
        let expected: Vec<(Vec<u8>, Value)> = m.into_iter().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_sorted_arbitrary_bytes(keys in any_keys(), threshold in 1usize..=64) {
        let mut t = HatTrie::with_config(TrieConfig::default().with_burst_threshold(threshold));
        let mut m: BTreeMap<Vec<u8>, Value> = BTreeMap::new();
        for (i, key) in keys.into_iter().enumerate() {
            t.insert(&key, i as Value);
            m.entry(key).or_insert(i as Value);
        }

        validate_trie(&t);
        let mut got = Vec::new();
        t.for_each(|k, v| got.push((k.to_vec(), v)));
        let expected: Vec<(Vec<u8>, Value)> = m.into_iter().collect();
        prop_assert_eq!(got, expected);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys: Vec<Vec<u8>> = vec![
        b"".to_vec(),
        b"a".to_vec(),
        b"b".to_vec(),
        b"aa".to_vec(),
        b"ab".to_vec(),
        b"ba".to_vec(),
        b"a\0".to_vec(),
    ];

    for threshold in [1, 2, 3] {
        for_each_permutation(&keys, |perm| {
            let mut t = HatTrie::with_config(TrieConfig::default().with_burst_threshold(threshold));
            let mut m: BTreeMap<Vec<u8>, Value> = BTreeMap::new();

            for (i, k) in perm.into_iter().enumerate() {
                t.insert(&k, i as Value);
                m.entry(k).or_insert(i as Value);
            }

            validate_trie(&t);
            let got: Vec<(Vec<u8>, Value)> = t.iter().collect();
            let expected: Vec<(Vec<u8>, Value)> = m.into_iter().collect();
            assert_eq!(got, expected);
        });
    }
}

#[test]
fn exhaustive_duplicate_inserts_keep_first() {
    let keys: Vec<&[u8]> = vec![b"x", b"xy", b"x", b"", b"xy", b""];

    for_each_permutation(&keys, |perm| {
        let mut t = HatTrie::with_config(TrieConfig::default().with_burst_threshold(2));
        let mut first: BTreeMap<Vec<u8>, Value> = BTreeMap::new();
        for (i, k) in perm.into_iter().enumerate() {
            t.insert(k, i as Value);
            first.entry(k.to_vec()).or_insert(i as Value);
        }
        validate_trie(&t);
        assert_eq!(t.len(), 3);
        for (k, v) in &first {
            assert_eq!(t.get(k), Some(*v));
        }
    });
}
