//! # Parallel Delivery
//!
//! Store calls and ledger notifications racing on worker threads.

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        data_message, genesis_spend, random_dag, tangle, transaction_message, EventRecorder, T0,
    };
    use shared_types::InclusionState;
    use std::sync::Arc;
    use tokio::task::spawn_blocking;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn duplicate_deliveries_fire_once() {
        let (tangle, _) = tangle();
        let recorder = EventRecorder::attach(&tangle);
        let msg = data_message(vec![], T0, 7);

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let tangle = Arc::clone(&tangle);
                let msg = msg.clone();
                spawn_blocking(move || tangle.store_message(msg).unwrap())
            })
            .collect();

        let mut first_stores = 0;
        for task in tasks {
            if task.await.unwrap() {
                first_stores += 1;
            }
        }

        assert_eq!(first_stores, 1);
        assert_eq!(recorder.solid_count(&msg.id()), 1);
        assert_eq!(recorder.eligible_count(&msg.id()), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn parallel_random_dag_converges() {
        let dag = random_dag(42, 400, 3);
        let (tangle, _) = tangle();
        let recorder = EventRecorder::attach(&tangle);

        // Each worker gets an interleaved slice, newest first, plus a copy of
        // every tenth message to force duplicate races.
        let workers = 8;
        let tasks: Vec<_> = (0..workers)
            .map(|w| {
                let tangle = Arc::clone(&tangle);
                let mut batch: Vec<_> = dag.iter().skip(w).step_by(workers).cloned().collect();
                batch.reverse();
                batch.extend(dag.iter().step_by(10).cloned());
                spawn_blocking(move || {
                    for msg in batch {
                        tangle.store_message(msg).unwrap();
                    }
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        for msg in &dag {
            assert!(tangle.metadata(&msg.id()).unwrap().is_eligible());
        }
        assert_eq!(recorder.solid.lock().len(), dag.len());
        assert!(recorder.at_most_once());
        assert_eq!(tangle.stats().pending_solidifications, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn confirmation_racing_with_arrival_is_not_lost() {
        for round in 0..50u16 {
            let (tangle, utxo) = tangle();
            let recorder = EventRecorder::attach(&tangle);
            let tx = genesis_spend(round, T0);
            utxo.store_transaction(&tx);
            let msg = transaction_message(&tx, vec![], T0);
            let id = msg.id();

            let store = {
                let tangle = Arc::clone(&tangle);
                spawn_blocking(move || tangle.store_message(msg).unwrap())
            };
            let confirm = {
                let utxo = Arc::clone(&utxo);
                let tx_id = tx.id();
                spawn_blocking(move || utxo.set_inclusion_state(tx_id, InclusionState::Confirmed))
            };
            store.await.unwrap();
            confirm.await.unwrap();

            assert!(tangle.metadata(&id).unwrap().is_eligible(), "round {round}");
            assert_eq!(recorder.eligible_count(&id), 1);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn shutdown_drains_in_flight_stores() {
        let (tangle, _) = tangle();
        let dag = random_dag(7, 200, 2);

        let producer = {
            let tangle = Arc::clone(&tangle);
            spawn_blocking(move || {
                dag.into_iter()
                    .map(|msg| tangle.store_message(msg).is_ok())
                    .filter(|accepted| *accepted)
                    .count()
            })
        };
        let stopper = {
            let tangle = Arc::clone(&tangle);
            spawn_blocking(move || tangle.shutdown())
        };

        let accepted = producer.await.unwrap();
        stopper.await.unwrap();

        // Every accepted store completed before shutdown returned.
        assert_eq!(tangle.stats().messages, accepted);
        assert!(tangle.is_shutting_down());
    }
}
