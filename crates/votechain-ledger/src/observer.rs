use crate::record::Record;

/// Hook invoked after every successful append.
///
/// Observers run after the ledger lock is released and must not call back
/// into the ledger's write path.
pub trait AppendObserver: Send + Sync {
    fn on_append(&self, record: &Record, chain_len: usize);
}

/// Logs each appended record through `tracing`.
pub struct TracingObserver;

impl AppendObserver for TracingObserver {
    fn on_append(&self, record: &Record, chain_len: usize) {
        tracing::info!(
            index = record.index(),
            timestamp = record.timestamp().as_millis(),
            voter = %record.voter(),
            candidate = %record.candidate(),
            previous_hash = %record.to_view().previous_hash,
            hash = %record.hash(),
            chain_len,
            "vote appended to chain"
        );
    }
}
