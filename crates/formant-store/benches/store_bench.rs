//! Benchmarks for store write and notification fan-out costs.
//!
//! Run with: cargo bench -p formant-store -- store

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::cell::Cell;
use std::hint::black_box;
use std::rc::Rc;

use formant_store::Store;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct FormLike {
    values: Vec<String>,
    attempts: u64,
    submitting: bool,
}

fn bench_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("store/set");

    group.bench_function("no_subscribers", |b| {
        let store = Store::new(|| 0u64);
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            store.set(black_box(i));
        });
    });

    group.bench_function("equal_value_noop", |b| {
        let store = Store::new(|| 7u64);
        b.iter(|| store.set(black_box(7)));
    });

    group.finish();
}

fn bench_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("store/fanout");

    for subscribers in [1u64, 16, 256] {
        group.throughput(Throughput::Elements(subscribers));
        group.bench_with_input(
            BenchmarkId::new("plain", subscribers),
            &subscribers,
            |b, &count| {
                let store: Store<FormLike> = Store::default();
                let hits = Rc::new(Cell::new(0u64));
                let subs: Vec<_> = (0..count)
                    .map(|_| {
                        let hits = Rc::clone(&hits);
                        store.subscribe(move |_| hits.set(hits.get() + 1))
                    })
                    .collect();
                let mut i = 0u64;
                b.iter(|| {
                    i += 1;
                    store.update(|s| FormLike {
                        attempts: i,
                        ..s.clone()
                    });
                });
                drop(subs);
            },
        );

        // Watchers selecting an unchanged slice: the equality gate should
        // keep this close to the plain notification cost.
        group.bench_with_input(
            BenchmarkId::new("watch_unrelated", subscribers),
            &subscribers,
            |b, &count| {
                let store: Store<FormLike> = Store::default();
                let hits = Rc::new(Cell::new(0u64));
                let subs: Vec<_> = (0..count)
                    .map(|_| {
                        let hits = Rc::clone(&hits);
                        store.watch(|s| s.submitting, move |_| hits.set(hits.get() + 1))
                    })
                    .collect();
                let mut i = 0u64;
                b.iter(|| {
                    i += 1;
                    store.update(|s| FormLike {
                        attempts: i,
                        ..s.clone()
                    });
                });
                drop(subs);
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_set, bench_fanout);
criterion_main!(benches);
