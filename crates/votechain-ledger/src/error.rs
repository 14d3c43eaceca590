use votechain_crypto::CanonicalError;

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("voter has already cast a vote")]
    DuplicateVoter,

    #[error("invalid input: {field} must not be empty")]
    InvalidInput { field: &'static str },

    /// Genesis seeds every ledger, so this indicates a construction bug.
    #[error("ledger chain is empty: genesis record missing")]
    EmptyChain,

    #[error("ledger lock poisoned")]
    LockPoisoned,

    #[error("malformed record at index {index}: {reason}")]
    MalformedRecord { index: u64, reason: String },

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<CanonicalError> for LedgerError {
    fn from(err: CanonicalError) -> Self {
        LedgerError::Serialization(err.to_string())
    }
}
