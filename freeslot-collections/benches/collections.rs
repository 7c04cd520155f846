//! Benchmarks for the slot list, deque and entry map.
//!
//! Run with: cargo bench
//!
//! Each structure is compared against its closest std counterpart. All
//! containers are pre-allocated so the hot loops measure steady-state churn.

use std::collections::{HashMap, LinkedList, VecDeque};

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use freeslot_collections::{Deque, EntryMap, IndexList, SlotList};

const CAPACITY: usize = 10_000;

// ============================================================================
// List: push/pop at the ends
// ============================================================================

fn bench_list_ends(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_ends");
    group.throughput(Throughput::Elements(CAPACITY as u64));

    let mut slot_list: SlotList<u64> = SlotList::with_capacity(CAPACITY);
    group.bench_function("slot_list", |b| {
        b.iter(|| {
            for i in 0..CAPACITY as u64 {
                black_box(slot_list.push_back(i));
            }
            while let Some(v) = slot_list.pop_front() {
                black_box(v);
            }
        });
    });

    let mut index_list: IndexList<u64> = IndexList::with_capacity(CAPACITY);
    group.bench_function("index_list", |b| {
        b.iter(|| {
            for i in 0..CAPACITY as u64 {
                black_box(index_list.push_back(i));
            }
            while let Some(v) = index_list.pop_front() {
                black_box(v);
            }
        });
    });

    let mut linked: LinkedList<u64> = LinkedList::new();
    group.bench_function("std_linked_list", |b| {
        b.iter(|| {
            for i in 0..CAPACITY as u64 {
                linked.push_back(black_box(i));
            }
            while let Some(v) = linked.pop_front() {
                black_box(v);
            }
        });
    });

    group.finish();
}

// ============================================================================
// List: remove from the middle by handle
// ============================================================================

fn bench_list_remove_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_remove_middle");

    for size in [100usize, 1_000, CAPACITY] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("slot_list", size), &size, |b, &size| {
            let mut list: SlotList<u64> = SlotList::with_capacity(size + 1);
            let handles: Vec<_> = (0..size as u64).map(|i| list.push_back(i)).collect();
            let mut middle = handles[size / 2];
            b.iter(|| {
                let value = list.remove(middle).unwrap_or_default();
                let next = list.first().unwrap_or(middle);
                middle = list.insert_after(next, black_box(value)).unwrap_or(middle);
            });
        });

        group.bench_with_input(BenchmarkId::new("std_vec", size), &size, |b, &size| {
            let mut vec: Vec<u64> = (0..size as u64).collect();
            b.iter(|| {
                let value = vec.remove(size / 2);
                vec.insert(1, black_box(value));
            });
        });
    }

    group.finish();
}

// ============================================================================
// Deque: ring buffer ends and middle inserts
// ============================================================================

fn bench_deque(c: &mut Criterion) {
    let mut group = c.benchmark_group("deque");
    group.throughput(Throughput::Elements(CAPACITY as u64));

    let mut deque: Deque<u64> = Deque::with_capacity(CAPACITY);
    group.bench_function("deque/ends", |b| {
        b.iter(|| {
            for i in 0..CAPACITY as u64 {
                deque.push_back(black_box(i));
            }
            while let Some(v) = deque.pop_front() {
                black_box(v);
            }
        });
    });

    let mut std_deque: VecDeque<u64> = VecDeque::with_capacity(CAPACITY);
    group.bench_function("std_vec_deque/ends", |b| {
        b.iter(|| {
            for i in 0..CAPACITY as u64 {
                std_deque.push_back(black_box(i));
            }
            while let Some(v) = std_deque.pop_front() {
                black_box(v);
            }
        });
    });

    group.finish();

    let mut group = c.benchmark_group("deque_middle");
    group.bench_function("deque/insert_remove", |b| {
        let mut deque: Deque<u64> = (0..1_000).collect();
        b.iter(|| {
            deque.insert(black_box(100), 7).unwrap_or_default();
            black_box(deque.remove(100));
        });
    });

    group.bench_function("std_vec_deque/insert_remove", |b| {
        let mut deque: VecDeque<u64> = (0..1_000).collect();
        b.iter(|| {
            deque.insert(black_box(100), 7);
            black_box(deque.remove(100));
        });
    });

    group.bench_function("deque/binary_search", |b| {
        let deque: Deque<u64> = (0..CAPACITY as u64).map(|i| i * 2).collect();
        let mut target = 0u64;
        b.iter(|| {
            target = (target + 7919) % (CAPACITY as u64 * 2);
            black_box(deque.binary_search_first(.., &target))
        });
    });

    group.finish();
}

// ============================================================================
// EntryMap: lookup by key vs by entry index
// ============================================================================

fn bench_entry_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("entry_map");

    let map: EntryMap<u64, u64> = (0..CAPACITY as u64).map(|i| (i, i)).collect();
    let std_map: HashMap<u64, u64> = (0..CAPACITY as u64).map(|i| (i, i)).collect();
    let entries: Vec<usize> = (0..CAPACITY as u64)
        .filter_map(|i| map.find_entry(&i))
        .collect();

    group.bench_function("entry_map/get", |b| {
        let mut i = 0u64;
        b.iter(|| {
            i = (i + 1) % CAPACITY as u64;
            black_box(map.get(&i))
        });
    });

    group.bench_function("entry_map/value_by_entry", |b| {
        let mut i = 0usize;
        b.iter(|| {
            i = (i + 1) % entries.len();
            black_box(map.value_by_entry(entries[i]))
        });
    });

    group.bench_function("std_hash_map/get", |b| {
        let mut i = 0u64;
        b.iter(|| {
            i = (i + 1) % CAPACITY as u64;
            black_box(std_map.get(&i))
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_list_ends,
    bench_list_remove_middle,
    bench_deque,
    bench_entry_map
);
criterion_main!(benches);
