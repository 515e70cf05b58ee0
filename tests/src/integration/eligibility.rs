//! # Ledger-Driven Eligibility Flows
//!
//! Rejection, dependency scope, ledger outages, parent validity and
//! shutdown as seen through the full pipeline.

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        data_message, genesis_spend, spend, tangle, tangle_with, transaction_message, EventRecorder,
        T0,
    };
    use shared_types::{InclusionState, Message, OutputId};
    use std::sync::Arc;
    use std::time::Duration;
    use tangle_runtime::{spawn_pending_recheck, TangleConfig, TangleError};
    use tg_02_solidifier::SolidifierConfig;
    use tg_03_eligibility::{DependencyScope, EligibilityConfig};

    fn inputs_scope() -> TangleConfig {
        TangleConfig::default()
            .with_eligibility(EligibilityConfig::new(DependencyScope::PayloadAndInputs))
    }

    #[test]
    fn rejected_transaction_message_is_eligible() {
        let (tangle, utxo) = tangle();
        let recorder = EventRecorder::attach(&tangle);
        let tx = genesis_spend(0, T0);
        utxo.store_transaction(&tx);
        let msg = transaction_message(&tx, vec![], T0);
        tangle.store_message(msg.clone()).unwrap();

        utxo.set_inclusion_state(tx.id(), InclusionState::Rejected);

        assert!(tangle.metadata(&msg.id()).unwrap().is_eligible());
        assert_eq!(recorder.eligible_count(&msg.id()), 1);
    }

    #[test]
    fn inputs_scope_waits_for_every_input() {
        let (tangle, utxo) = tangle_with(inputs_scope());
        let funding_a = genesis_spend(0, T0);
        let funding_b = genesis_spend(1, T0);
        let tx = spend(
            vec![
                OutputId::new(funding_a.id(), 0),
                OutputId::new(funding_b.id(), 0),
            ],
            T0 + 1,
        );
        for t in [&funding_a, &funding_b, &tx] {
            utxo.store_transaction(t);
        }

        let msg = transaction_message(&tx, vec![], T0 + 1);
        tangle.store_message(msg.clone()).unwrap();
        assert_eq!(tangle.stats().pending_dependencies, 3);

        utxo.set_inclusion_state(funding_a.id(), InclusionState::Confirmed);
        utxo.set_inclusion_state(tx.id(), InclusionState::Confirmed);
        assert!(!tangle.metadata(&msg.id()).unwrap().is_eligible());

        utxo.set_inclusion_state(funding_b.id(), InclusionState::Confirmed);
        assert!(tangle.metadata(&msg.id()).unwrap().is_eligible());
        assert_eq!(tangle.stats().pending_dependencies, 0);
    }

    #[test]
    fn payload_scope_ignores_inputs() {
        let (tangle, utxo) = tangle();
        let funding = genesis_spend(0, T0);
        let tx = spend(vec![OutputId::new(funding.id(), 0)], T0 + 1);
        utxo.store_transaction(&funding);
        utxo.set_inclusion_state(tx.id(), InclusionState::Confirmed);

        let msg = transaction_message(&tx, vec![], T0 + 1);
        tangle.store_message(msg.clone()).unwrap();

        assert!(tangle.metadata(&msg.id()).unwrap().is_eligible());
    }

    #[test]
    fn ledger_outage_is_retried_on_next_notification() {
        let (tangle, utxo) = tangle();
        let tx = genesis_spend(0, T0);
        utxo.store_transaction(&tx);
        utxo.set_unavailable(true);

        let msg = transaction_message(&tx, vec![], T0);
        tangle.store_message(msg.clone()).unwrap();
        assert!(tangle.check_eligibility(&msg.id()).is_ok());
        assert!(!tangle.metadata(&msg.id()).unwrap().is_eligible());

        utxo.set_unavailable(false);
        utxo.set_inclusion_state(tx.id(), InclusionState::Confirmed);
        assert!(tangle.metadata(&msg.id()).unwrap().is_eligible());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn settled_transaction_recovers_after_outage() {
        let config = TangleConfig::default().with_recheck_interval(Duration::from_millis(20));
        let (tangle, utxo) = tangle_with(config);
        let tx = genesis_spend(5, T0);
        utxo.set_inclusion_state(tx.id(), InclusionState::Confirmed);
        utxo.set_unavailable(true);

        let msg = transaction_message(&tx, vec![], T0);
        tangle.store_message(msg.clone()).unwrap();
        utxo.set_unavailable(false);

        // Unrelated traffic does not revisit the parked message.
        for tag in 0..5 {
            tangle.store_message(data_message(vec![], T0, 100 + tag)).unwrap();
        }
        assert!(!tangle.metadata(&msg.id()).unwrap().is_eligible());
        assert_eq!(tangle.stats().pending_dependencies, 1);

        let recheck = spawn_pending_recheck(Arc::clone(&tangle));
        let mut eligible = false;
        for _ in 0..100 {
            tokio::time::sleep(Duration::from_millis(20)).await;
            if tangle.metadata(&msg.id()).unwrap().is_eligible() {
                eligible = true;
                break;
            }
        }
        recheck.abort();

        assert!(eligible, "message still parked after ledger recovery");
        assert_eq!(tangle.stats().pending_dependencies, 0);
    }

    #[tokio::test]
    async fn recheck_task_stops_on_shutdown() {
        let config = TangleConfig::default().with_recheck_interval(Duration::from_millis(10));
        let (tangle, _) = tangle_with(config);
        let recheck = spawn_pending_recheck(Arc::clone(&tangle));

        tangle.shutdown();
        tokio::time::timeout(Duration::from_secs(2), recheck)
            .await
            .unwrap()
            .unwrap();
    }

    #[test]
    fn non_ledger_messages_ignore_ledger_state() {
        let (tangle, utxo) = tangle();
        let recorder = EventRecorder::attach(&tangle);
        for index in 0..3 {
            utxo.store_transaction(&genesis_spend(index, T0));
        }
        utxo.set_unavailable(true);

        let data = data_message(vec![], T0, 9);
        let empty = Message::new(vec![], vec![], T0, None);
        let child = data_message(vec![data.id(), empty.id()], T0 + 1, 10);
        for msg in [&data, &empty, &child] {
            tangle.store_message((*msg).clone()).unwrap();
        }

        for msg in [&data, &empty, &child] {
            assert!(tangle.metadata(&msg.id()).unwrap().is_eligible());
            assert_eq!(recorder.eligible_count(&msg.id()), 1);
            tangle.check_eligibility(&msg.id()).unwrap();
        }
        assert_eq!(recorder.eligible.lock().len(), 3);
        assert!(recorder.at_most_once());
        assert_eq!(tangle.stats().pending_dependencies, 0);
    }

    #[test]
    fn unbooked_transaction_waits_for_booking() {
        let (tangle, utxo) = tangle();
        let tx = genesis_spend(3, T0);
        let msg = transaction_message(&tx, vec![], T0);

        tangle.store_message(msg.clone()).unwrap();
        assert!(!tangle.metadata(&msg.id()).unwrap().is_eligible());

        utxo.set_inclusion_state(tx.id(), InclusionState::Confirmed);
        assert!(tangle.metadata(&msg.id()).unwrap().is_eligible());
    }

    #[test]
    fn old_parent_makes_message_invalid() {
        let config = TangleConfig::default().with_solidifier(SolidifierConfig::new(60_000));
        let (tangle, _) = tangle_with(config);
        let recorder = EventRecorder::attach(&tangle);

        let parent = data_message(vec![], T0, 1);
        let stale = data_message(vec![parent.id()], T0 + 60_001, 2);
        let fresh = data_message(vec![parent.id()], T0 + 60_000, 3);
        let on_stale = data_message(vec![stale.id(), fresh.id()], T0 + 60_002, 4);

        for msg in [&on_stale, &stale, &fresh, &parent] {
            tangle.store_message((*msg).clone()).unwrap();
        }

        assert_eq!(recorder.invalid_count(&stale.id()), 1);
        assert_eq!(recorder.invalid_count(&on_stale.id()), 1);
        assert_eq!(recorder.solid_count(&stale.id()), 0);
        assert_eq!(recorder.solid_count(&fresh.id()), 1);
        assert!(!tangle.metadata(&on_stale.id()).unwrap().is_eligible());
        assert!(recorder.at_most_once());
    }

    #[test]
    fn store_after_shutdown_is_rejected() {
        let (tangle, _) = tangle();
        tangle.store_message(data_message(vec![], T0, 1)).unwrap();
        tangle.shutdown();

        assert!(matches!(
            tangle.store_message(data_message(vec![], T0, 2)),
            Err(TangleError::ShuttingDown)
        ));
        assert_eq!(tangle.stats().messages, 1);
    }
}
