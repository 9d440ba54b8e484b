use std::hash::Hash;
use std::collections::BTreeSet;

use rand::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
// Looking to measure set implementation, not hasher performance so using a faster hasher
use fnv::FnvHashSet as HashSet;

use linked_bst::BSTSet;

trait Set<T>: Default {
    fn insert(&mut self, value: T) -> bool;

    fn contains(&self, value: &T) -> bool;

    fn remove(&mut self, value: &T) -> bool;
}

macro_rules! impl_set {
    ($name:ident, $bound:ident $(+ $other_bound:ident)*) => {
        impl<T> Set<T> for $name<T>
            where T: $bound $(+ $other_bound)*,
        {
            fn insert(&mut self, value: T) -> bool {
                $name::insert(self, value)
            }

            fn contains(&self, value: &T) -> bool {
                $name::contains(self, value)
            }

            fn remove(&mut self, value: &T) -> bool {
                $name::remove(self, value)
            }
        }
    };
}

impl_set!(HashSet, Hash + Eq);
impl_set!(BTreeSet, Ord);
impl_set!(BSTSet, Ord);

/// Deterministically generates `count` unique keys in a uniformly random order
///
/// Keys are spread out and shuffled so the unbalanced tree ends up with a realistic height rather
/// than degenerating into a list.
fn generate_keys(count: usize) -> Vec<i64> {
    let n = count as i64;
    let mut keys: Vec<_> = (0..n).map(|i| (i - n/2) * 10).collect();

    // Use seed to make this deterministic
    let mut rng = StdRng::seed_from_u64(45930923092);
    keys.shuffle(&mut rng);

    keys
}

fn build<S: Set<i64>>(keys: &[i64]) -> S {
    let mut set = S::default();
    for &key in keys {
        black_box(set.insert(key));
    }
    set
}

const SIZES: &[usize] = &[50, 100, 500, 1000, 2000];

macro_rules! bench_each_set {
    ($group:expr, $size:expr, |$set_ty:ident| $body:expr) => {{
        {
            type $set_ty = HashSet<i64>;
            $group.bench_with_input(BenchmarkId::new("HashSet", $size), $size, $body);
        }
        {
            type $set_ty = BTreeSet<i64>;
            $group.bench_with_input(BenchmarkId::new("BTreeSet", $size), $size, $body);
        }
        {
            type $set_ty = BSTSet<i64>;
            $group.bench_with_input(BenchmarkId::new("BSTSet", $size), $size, $body);
        }
    }};
}

pub fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("set insert");
    for size in SIZES {
        let keys = generate_keys(*size);
        bench_each_set!(group, size, |S| |b, _| {
            b.iter(|| build::<S>(&keys))
        });
    }
    group.finish();
}

pub fn bench_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("set contains");
    for size in SIZES {
        let keys = generate_keys(*size);
        bench_each_set!(group, size, |S| |b, _| {
            let set = build::<S>(&keys);
            // Look keys up in the opposite order to how they were inserted
            b.iter(|| keys.iter().rev().all(|key| black_box(set.contains(key))))
        });
    }
    group.finish();
}

pub fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("set remove");
    for size in SIZES {
        let keys = generate_keys(*size);
        bench_each_set!(group, size, |S| |b, _| {
            b.iter_batched_ref(
                || build::<S>(&keys),
                |set| {
                    for key in keys.iter().rev() {
                        black_box(set.remove(key));
                    }
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

/// Compares the ways of searching and walking a `BSTSet`
pub fn bench_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("bst navigation");
    for size in SIZES {
        let keys = generate_keys(*size);
        let set: BSTSet<i64> = build(&keys);

        group.bench_with_input(BenchmarkId::new("search", size), size, |b, _| {
            b.iter(|| keys.iter().all(|key| black_box(set.search(key)).is_some()))
        });
        group.bench_with_input(BenchmarkId::new("search_recursive", size), size, |b, _| {
            b.iter(|| keys.iter().all(|key| black_box(set.search_recursive(key)).is_some()))
        });
        group.bench_with_input(BenchmarkId::new("iter_inorder", size), size, |b, _| {
            b.iter(|| set.iter_inorder().map(|key| black_box(*key)).sum::<i64>())
        });
        group.bench_with_input(BenchmarkId::new("walk_inorder", size), size, |b, _| {
            b.iter(|| {
                let mut sum = 0;
                set.walk_inorder(|node| sum += black_box(*node.key()));
                sum
            })
        });
        group.bench_with_input(BenchmarkId::new("successor chain", size), size, |b, _| {
            b.iter(|| {
                let mut count = 0;
                let mut current = set.first();
                while let Some(node) = current {
                    count += 1;
                    current = black_box(node.successor());
                }
                count
            })
        });
        group.bench_with_input(BenchmarkId::new("validate", size), size, |b, _| {
            b.iter(|| black_box(set.validate()).is_ok())
        });
    }
    group.finish();
}

criterion_group!(benches,
    bench_insert,
    bench_contains,
    bench_remove,
    bench_navigation,
);

criterion_main!(benches);
