use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::record::Record;

/// Message returned for an accepted vote.
pub const VOTE_RECORDED: &str = "Vote recorded successfully on blockchain";
/// Message returned when the voter is already on the chain.
pub const ALREADY_VOTED: &str = "Error: Voter has already cast a vote.";

/// A successfully appended vote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteReceipt {
    pub record: Record,
    pub position: u64,
}

/// Flat `(ok, message, position)` result handed to callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub ok: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u64>,
}

impl From<Result<VoteReceipt, LedgerError>> for VoteOutcome {
    fn from(result: Result<VoteReceipt, LedgerError>) -> Self {
        match result {
            Ok(receipt) => Self {
                ok: true,
                message: VOTE_RECORDED.to_string(),
                position: Some(receipt.position),
            },
            Err(LedgerError::DuplicateVoter) => Self {
                ok: false,
                message: ALREADY_VOTED.to_string(),
                position: None,
            },
            Err(other) => Self {
                ok: false,
                message: format!("Error: {other}"),
                position: None,
            },
        }
    }
}
