//! # Tangle Core Benchmarks
//!
//! | Path | Workload |
//! |------|----------|
//! | Solidifier | Chain delivered newest first, one drain at the end |
//! | Solidifier | Chain delivered oldest first |
//! | Full pipeline | Random DAG in shuffled order |
//! | Eligibility | Pending transaction messages released by one confirmation each |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use shared_types::InclusionState;
use std::time::Duration;
use tg_tests::fixtures::{chain, genesis_spend, random_dag, tangle, transaction_message, T0};

// ============================================================================
// tg-02: Solidification propagation
// ============================================================================

fn bench_chain_solidification(c: &mut Criterion) {
    let mut group = c.benchmark_group("tg-02-chain");
    group.measurement_time(Duration::from_secs(10));

    for size in [100, 1_000, 5_000] {
        let messages = chain(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("reverse", size), &messages, |b, msgs| {
            b.iter(|| {
                let (tangle, _) = tangle();
                for msg in msgs.iter().rev() {
                    tangle.store_message(msg.clone()).ok();
                }
                black_box(tangle.stats())
            })
        });

        group.bench_with_input(BenchmarkId::new("in_order", size), &messages, |b, msgs| {
            b.iter(|| {
                let (tangle, _) = tangle();
                for msg in msgs {
                    tangle.store_message(msg.clone()).ok();
                }
                black_box(tangle.stats())
            })
        });
    }

    group.finish();
}

fn bench_random_dag(c: &mut Criterion) {
    let mut group = c.benchmark_group("tg-02-random-dag");

    for size in [500, 2_000] {
        let mut arrivals = random_dag(size as u64, size, 3);
        arrivals.shuffle(&mut StdRng::seed_from_u64(7));
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("shuffled", size), &arrivals, |b, msgs| {
            b.iter(|| {
                let (tangle, _) = tangle();
                for msg in msgs {
                    tangle.store_message(msg.clone()).ok();
                }
                black_box(tangle.stats())
            })
        });
    }

    group.finish();
}

// ============================================================================
// tg-03: Eligibility release on inclusion state change
// ============================================================================

fn bench_confirmation_release(c: &mut Criterion) {
    let mut group = c.benchmark_group("tg-03-confirmation");

    for size in [100u16, 1_000] {
        let transactions: Vec<_> = (0..size).map(|i| genesis_spend(i, T0)).collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(
            BenchmarkId::new("pending_then_confirmed", size),
            &transactions,
            |b, txs| {
                b.iter(|| {
                    let (tangle, utxo) = tangle();
                    for tx in txs {
                        utxo.store_transaction(tx);
                        tangle
                            .store_message(transaction_message(tx, vec![], T0))
                            .ok();
                    }
                    for tx in txs {
                        utxo.set_inclusion_state(tx.id(), InclusionState::Confirmed);
                    }
                    black_box(tangle.stats())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_chain_solidification,
    bench_random_dag,
    bench_confirmation_release,
);

criterion_main!(benches);
