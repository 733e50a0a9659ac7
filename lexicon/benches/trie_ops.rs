//! Insert, lookup and sorted traversal of the burst trie compared to std
//! collections, plus lexicon export.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hat_trie::{HatTrie, TrieConfig};
use lexicon::Lexicon;
use std::collections::{BTreeMap, HashMap};

fn generate_keys(n: usize) -> Vec<String> {
    // Scrambled order so inserts do not arrive sorted.
    (0..n)
        .map(|i| format!("word:{:08}", (i as u64 * 2_654_435_761) % n as u64))
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in [1_000, 10_000, 100_000].iter() {
        let keys = generate_keys(*size);

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), size, |b, _| {
            b.iter(|| {
                let mut map: BTreeMap<&[u8], u32> = BTreeMap::new();
                for (i, key) in keys.iter().enumerate() {
                    map.entry(key.as_bytes()).or_insert(i as u32);
                }
                black_box(map)
            });
        });

        group.bench_with_input(BenchmarkId::new("HashMap", size), size, |b, _| {
            b.iter(|| {
                let mut map: HashMap<&[u8], u32> = HashMap::new();
                for (i, key) in keys.iter().enumerate() {
                    map.entry(key.as_bytes()).or_insert(i as u32);
                }
                black_box(map)
            });
        });

        group.bench_with_input(BenchmarkId::new("HatTrie", size), size, |b, _| {
            b.iter(|| {
                let mut trie = HatTrie::new();
                for (i, key) in keys.iter().enumerate() {
                    trie.insert(key.as_bytes(), i as u32);
                }
                black_box(trie)
            });
        });

        group.bench_with_input(BenchmarkId::new("HatTrie/t1024", size), size, |b, _| {
            b.iter(|| {
                let mut trie =
                    HatTrie::with_config(TrieConfig::default().with_burst_threshold(1024));
                for (i, key) in keys.iter().enumerate() {
                    trie.insert(key.as_bytes(), i as u32);
                }
                black_box(trie)
            });
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    for size in [1_000, 10_000, 100_000].iter() {
        let keys = generate_keys(*size);

        let btree: BTreeMap<&[u8], u32> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.as_bytes(), i as u32))
            .collect();
        let trie: HatTrie = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.as_bytes(), i as u32))
            .collect();

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), size, |b, _| {
            b.iter(|| {
                for key in &keys {
                    black_box(btree.get(key.as_bytes()));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("HatTrie", size), size, |b, _| {
            b.iter(|| {
                for key in &keys {
                    black_box(trie.get(key.as_bytes()));
                }
            });
        });
    }

    group.finish();
}

fn bench_sorted_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorted_traversal");

    for size in [1_000, 10_000, 100_000].iter() {
        let keys = generate_keys(*size);

        let btree: BTreeMap<&[u8], u32> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.as_bytes(), i as u32))
            .collect();
        let trie: HatTrie = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.as_bytes(), i as u32))
            .collect();

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), size, |b, _| {
            b.iter(|| {
                let mut sum = 0u64;
                for (k, v) in &btree {
                    sum += k.len() as u64 + u64::from(*v);
                }
                black_box(sum)
            });
        });

        group.bench_with_input(BenchmarkId::new("HatTrie", size), size, |b, _| {
            b.iter(|| {
                let mut sum = 0u64;
                trie.for_each(|k, v| sum += k.len() as u64 + u64::from(v));
                black_box(sum)
            });
        });
    }

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    let keys = generate_keys(100_000);
    let mut lex = Lexicon::new();
    lex.extend(&keys);

    group.bench_function("fst", |b| {
        b.iter(|| black_box(lex.to_fst().map(|m| m.len())));
    });

    group.bench_function("disk", |b| {
        let dir = tempfile::tempdir().expect("tempdir");
        b.iter(|| black_box(lex.write_to(dir.path()).expect("write lexicon")));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_lookup,
    bench_sorted_traversal,
    bench_export
);
criterion_main!(benches);
