//! Background maintenance tasks.

use crate::tangle::Tangle;
use std::sync::Arc;
use tg_03_eligibility::UtxoDag;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Periodically re-check messages parked on a ledger dependency.
///
/// Runs every `TangleConfig::recheck_interval` until the tangle shuts down
/// or the handle is aborted. Each pass runs on the blocking pool.
pub fn spawn_pending_recheck<U: UtxoDag + 'static>(tangle: Arc<Tangle<U>>) -> JoinHandle<()> {
    let period = tangle.config().recheck_interval;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately.
        interval.tick().await;

        loop {
            interval.tick().await;
            if tangle.is_shutting_down() {
                break;
            }
            let runner = Arc::clone(&tangle);
            match tokio::task::spawn_blocking(move || runner.recheck_pending()).await {
                Ok(0) => {}
                Ok(released) => {
                    info!(released, "[tg-03] Pending messages released by re-check");
                }
                Err(err) => warn!(error = %err, "Pending re-check pass failed"),
            }
        }
        debug!("Pending re-check stopped");
    })
}
