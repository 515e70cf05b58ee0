//! # Reference Scenarios
//!
//! A. Confirmed genesis spend becomes eligible on explicit check
//! B. Data message becomes eligible immediately
//! C. Pending transaction becomes eligible on confirmation, without re-call
//! D. Unknown message id is reported as not found

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        data_message, genesis_spend, tangle, transaction_message, EventRecorder, T0,
    };
    use shared_types::{InclusionState, MessageId};
    use tangle_runtime::TangleError;
    use tg_03_eligibility::EligibilityError;

    #[test]
    fn scenario_a_confirmed_genesis_spend() {
        let (tangle, utxo) = tangle();
        let t1 = genesis_spend(0, T0);
        utxo.store_transaction(&t1);

        let m1 = transaction_message(&t1, vec![MessageId::EMPTY], T0);
        tangle.store_message(m1.clone()).unwrap();
        utxo.set_inclusion_state(t1.id(), InclusionState::Confirmed);

        assert!(tangle.check_eligibility(&m1.id()).is_ok());
        assert!(tangle.metadata(&m1.id()).unwrap().is_eligible());
        assert_eq!(tangle.storage().attachments(&t1.id()), vec![m1.id()]);
    }

    #[test]
    fn scenario_b_data_message_always_eligible() {
        let (tangle, _) = tangle();
        let recorder = EventRecorder::attach(&tangle);
        let m = data_message(vec![], T0, 1);

        tangle.store_message(m.clone()).unwrap();
        assert!(tangle.check_eligibility(&m.id()).is_ok());

        let meta = tangle.metadata(&m.id()).unwrap();
        assert!(meta.is_solid());
        assert!(meta.is_eligible());
        assert_eq!(meta.eligibility_time(), Some(T0));
        assert_eq!(recorder.eligible_count(&m.id()), 1);
    }

    #[test]
    fn scenario_c_pending_then_confirmed() {
        let (tangle, utxo) = tangle();
        let recorder = EventRecorder::attach(&tangle);
        let t2 = genesis_spend(1, T0);
        utxo.store_transaction(&t2);

        let m2 = transaction_message(&t2, vec![], T0);
        tangle.store_message(m2.clone()).unwrap();

        assert!(tangle.check_eligibility(&m2.id()).is_ok());
        assert!(!tangle.metadata(&m2.id()).unwrap().is_eligible());

        utxo.set_inclusion_state(t2.id(), InclusionState::Confirmed);

        assert!(tangle.metadata(&m2.id()).unwrap().is_eligible());
        assert_eq!(recorder.eligible_count(&m2.id()), 1);
        assert_eq!(tangle.stats().pending_dependencies, 0);
    }

    #[test]
    fn scenario_d_unknown_message() {
        let (tangle, _) = tangle();
        let unknown = MessageId::new([0xDD; 32]);

        let err = tangle.check_eligibility(&unknown).unwrap_err();
        assert!(matches!(
            err,
            TangleError::Eligibility(EligibilityError::MessageNotFound { message_id })
                if message_id == unknown
        ));
    }

    #[test]
    fn eligibility_never_precedes_solidity() {
        let (tangle, utxo) = tangle();
        let recorder = EventRecorder::attach(&tangle);
        let parent = data_message(vec![], T0, 1);
        let tx = genesis_spend(2, T0);
        utxo.set_inclusion_state(tx.id(), InclusionState::Confirmed);
        let child = transaction_message(&tx, vec![parent.id()], T0 + 10);

        tangle.store_message(child.clone()).unwrap();
        tangle.check_eligibility(&child.id()).unwrap();
        let meta = tangle.metadata(&child.id()).unwrap();
        assert!(!meta.is_solid());
        assert!(!meta.is_eligible());
        assert_eq!(recorder.missing_count(&parent.id()), 1);

        tangle.store_message(parent).unwrap();
        let meta = tangle.metadata(&child.id()).unwrap();
        assert!(meta.is_solid());
        assert!(meta.is_eligible());
    }
}
