//! Criterion benchmarks for `OverlapIndex` and `CoalescedIntervalSet`.

// criterion_group! generates undocumented public functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use interlap::{CoalescedIntervalSet, OverlapIndex};

/// linear multiplier for work done by benchmarks
const REPEAT: i64 = 10_000;

fn records() -> Vec<(i64, i64, i64)> {
	(0..REPEAT)
		.map(|i| {
			let start = (i * 7_919) % (REPEAT * 20);
			(start, start + 5 + i % 40, i)
		})
		.collect()
}

fn build_index() -> OverlapIndex<i64, i64> {
	OverlapIndex::from_records(records())
}

fn bench_update(c: &mut Criterion) {
	c.bench_function("update one batch", |b| {
		b.iter(|| {
			let mut index: OverlapIndex<i64, i64> = OverlapIndex::new();
			index.update(black_box(records()));
			index
		})
	});
}

fn bench_add(c: &mut Criterion) {
	c.bench_function("add one at a time", |b| {
		b.iter(|| {
			let mut index: OverlapIndex<i64, i64> = OverlapIndex::new();
			for record in records().into_iter().take(1_000) {
				index.add(black_box(record));
			}
			index
		})
	});
}

fn bench_find(c: &mut Criterion) {
	let index = build_index();
	c.bench_function("find", |b| {
		b.iter(|| {
			(0..1_000_i64)
				.map(|i| index.find(black_box((i * 200, i * 200 + 50))).count())
				.sum::<usize>()
		})
	});
}

fn bench_contains(c: &mut Criterion) {
	let index = build_index();
	c.bench_function("contains", |b| {
		b.iter(|| {
			(0..1_000_i64)
				.filter(|i| index.contains(black_box((i * 200, i * 200 + 2))))
				.count()
		})
	});
}

fn bench_closest(c: &mut Criterion) {
	let index = build_index();
	c.bench_function("closest", |b| {
		b.iter(|| {
			(0..1_000_i64)
				.map(|i| index.closest(black_box((i * 200, i * 200 + 1))).count())
				.sum::<usize>()
		})
	});
}

fn bench_split(c: &mut Criterion) {
	let set = CoalescedIntervalSet::from_intervals(
		(0..REPEAT).map(|i| (i * 10, i * 10 + 8)),
	);
	let others: Vec<(i64, i64)> =
		(0..REPEAT / 3).map(|i| (i * 30 + 4, i * 30 + 13)).collect();
	c.bench_function("split", |b| {
		b.iter(|| set.split(black_box(others.iter().copied())).len())
	});
}

criterion_group!(
	overlap_index,
	bench_update,
	bench_add,
	bench_find,
	bench_contains,
	bench_closest
);
criterion_group!(coalesced_set, bench_split);
criterion_main!(overlap_index, coalesced_set);
