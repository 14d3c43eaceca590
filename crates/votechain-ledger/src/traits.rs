use crate::error::LedgerError;
use crate::outcome::VoteReceipt;
use crate::record::Record;

/// Write boundary for vote ledger append operations.
pub trait LedgerWriter: Send + Sync {
    /// Record one vote. Fails with `DuplicateVoter` if the voter's
    /// fingerprint is already on the chain; a failed append changes nothing.
    fn append_vote(&self, raw_voter_id: &str, candidate: &str) -> Result<VoteReceipt, LedgerError>;
}

/// Read boundary for vote ledger queries.
pub trait LedgerReader: Send + Sync {
    fn has_voted(&self, raw_voter_id: &str) -> Result<bool, LedgerError>;

    /// Ordered snapshot of every record, genesis first.
    fn list_all(&self) -> Result<Vec<Record>, LedgerError>;

    fn tail(&self) -> Result<Record, LedgerError>;

    fn record_count(&self) -> Result<usize, LedgerError>;
}
