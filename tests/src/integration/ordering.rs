//! # Arrival Order Convergence
//!
//! Any delivery order of a DAG, including duplicates, ends with every
//! message solid and eligible and every event fired exactly once.

#[cfg(test)]
mod tests {
    use crate::fixtures::{chain, random_dag, tangle, EventRecorder};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use shared_types::Message;

    fn deliver(messages: &[Message], order_seed: u64, duplicates: usize) -> Vec<Message> {
        let mut arrivals: Vec<Message> = messages.to_vec();
        arrivals.extend(messages.iter().take(duplicates).cloned());
        arrivals.shuffle(&mut StdRng::seed_from_u64(order_seed));
        arrivals
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn any_arrival_order_converges(
            dag_seed in any::<u64>(),
            order_seed in any::<u64>(),
            size in 1usize..40,
            max_parents in 1usize..4,
            duplicates in 0usize..10,
        ) {
            let dag = random_dag(dag_seed, size, max_parents);
            let (tangle, _) = tangle();
            let recorder = EventRecorder::attach(&tangle);

            for msg in deliver(&dag, order_seed, duplicates) {
                tangle.store_message(msg).unwrap();
            }

            for msg in &dag {
                let meta = tangle.metadata(&msg.id()).unwrap();
                prop_assert!(meta.is_solid());
                prop_assert!(meta.is_eligible());
                prop_assert_eq!(recorder.solid_count(&msg.id()), 1);
                prop_assert_eq!(recorder.eligible_count(&msg.id()), 1);
            }
            prop_assert_eq!(tangle.stats().pending_solidifications, 0);
            prop_assert_eq!(tangle.stats().missing_messages, 0);
        }

        #[test]
        fn missing_ancestor_blocks_descendants(
            dag_seed in any::<u64>(),
            size in 2usize..30,
        ) {
            let dag = random_dag(dag_seed, size, 2);
            let (tangle, _) = tangle();

            // Everything except the root: nothing can become solid.
            for msg in dag.iter().skip(1) {
                tangle.store_message(msg.clone()).unwrap();
            }
            for msg in dag.iter().skip(1) {
                let meta = tangle.metadata(&msg.id()).unwrap();
                prop_assert!(!meta.is_solid());
                prop_assert!(!meta.is_eligible());
            }
            prop_assert_eq!(tangle.solidifier().missing_messages(), vec![dag[0].id()]);

            tangle.store_message(dag[0].clone()).unwrap();
            for msg in &dag {
                prop_assert!(tangle.metadata(&msg.id()).unwrap().is_eligible());
            }
        }
    }

    #[test]
    fn reversed_long_chain_converges() {
        let messages = chain(5_000);
        let (tangle, _) = tangle();
        let recorder = EventRecorder::attach(&tangle);

        for msg in messages.iter().rev() {
            tangle.store_message(msg.clone()).unwrap();
        }

        assert_eq!(recorder.solid.lock().len(), messages.len());
        assert!(recorder.at_most_once());
        assert_eq!(tangle.stats().pending_solidifications, 0);
    }
}
