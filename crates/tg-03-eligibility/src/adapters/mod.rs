//! # Adapters Layer
//!
//! Implements outbound port traits.

mod utxo_dag;

pub use utxo_dag::InMemoryUtxoDag;
