//! # Tangle Node
//!
//! Runs the solidification and eligibility core against an in-memory ledger
//! until interrupted. Message intake from the network is wired by the
//! gossip layer, which is not part of this binary.

use std::sync::Arc;

use anyhow::{Context, Result};
use tangle_runtime::{init_logging, spawn_pending_recheck, Tangle, TangleConfig};
use tg_03_eligibility::InMemoryUtxoDag;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = TangleConfig::from_env().context("Failed to load configuration")?;
    init_logging(&config.log).context("Failed to initialize logging")?;

    info!("===========================================");
    info!("  Tangle Node Core v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let ledger = Arc::new(InMemoryUtxoDag::new());
    let tangle = Arc::new(Tangle::new(config, ledger).context("Failed to start Tangle core")?);

    let missing = tangle.message_missing().attach(|id| {
        warn!(message_id = %id, "Missing message, request from peers");
    });
    let recheck = spawn_pending_recheck(Arc::clone(&tangle));

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    info!("Shutdown signal received");
    tangle.message_missing().detach(missing);
    recheck.abort();

    let runtime = Arc::clone(&tangle);
    tokio::task::spawn_blocking(move || runtime.shutdown())
        .await
        .context("Shutdown task panicked")?;

    let stats = tangle.stats();
    info!(
        messages = stats.messages,
        missing = stats.missing_messages,
        "Goodbye"
    );
    Ok(())
}
