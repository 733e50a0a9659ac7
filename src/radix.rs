//! MSD byte-radix sort for container enumeration.
//!
//! Containers hold at most a burst threshold's worth of suffixes, so a
//! linear-time bucket pass per byte position beats a comparison sort on the
//! sizes we actually see. Buckets are processed from an explicit work stack;
//! small buckets fall back to insertion sort.

use std::cmp::Ordering;

/// Buckets at or below this size are finished with insertion sort.
const INSERTION_SORT_THRESHOLD: usize = 32;

/// One bucket for "key ended" plus one per byte value.
const BUCKETS: usize = 257;

/// Sorts `items` by the byte string returned from `key`, ascending
/// lexicographically (a proper prefix sorts before its extensions).
pub(crate) fn sort_by_bytes<T, F>(items: &mut [T], key: F)
where
    T: Copy,
    F: Fn(&T) -> &[u8],
{
    if items.len() < 2 {
        return;
    }

    let mut scratch: Vec<T> = Vec::with_capacity(items.len());
    let mut work: Vec<(usize, usize, usize)> = vec![(0, items.len(), 0)];

    while let Some((lo, hi, depth)) = work.pop() {
        let bucket = &mut items[lo..hi];
        if bucket.len() <= INSERTION_SORT_THRESHOLD {
            insertion_sort(bucket, depth, &key);
            continue;
        }

        let mut counts = [0usize; BUCKETS];
        for item in bucket.iter() {
            counts[bucket_of(key(item), depth)] += 1;
        }

        let mut offsets = [0usize; BUCKETS];
        let mut total = 0;
        for (offset, &count) in offsets.iter_mut().zip(counts.iter()) {
            *offset = total;
            total += count;
        }

        scratch.clear();
        scratch.extend_from_slice(bucket);
        let mut next = offsets;
        for item in &scratch {
            let b = bucket_of(key(item), depth);
            bucket[next[b]] = *item;
            next[b] += 1;
        }

        // Bucket 0 holds keys that end at `depth`; they are all equal.
        for b in 1..BUCKETS {
            if counts[b] > 1 {
                let start = lo + offsets[b];
                work.push((start, start + counts[b], depth + 1));
            }
        }
    }
}

#[inline]
fn bucket_of(key: &[u8], depth: usize) -> usize {
    key.get(depth).map_or(0, |&b| b as usize + 1)
}

fn insertion_sort<T, F>(items: &mut [T], depth: usize, key: &F)
where
    T: Copy,
    F: Fn(&T) -> &[u8],
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare_from(key(&items[j - 1]), key(&items[j]), depth) == Ordering::Greater
        {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Compares two keys known to share their first `depth` bytes.
#[inline]
fn compare_from(a: &[u8], b: &[u8], depth: usize) -> Ordering {
    a.get(depth..).unwrap_or(&[]).cmp(b.get(depth..).unwrap_or(&[]))
}
