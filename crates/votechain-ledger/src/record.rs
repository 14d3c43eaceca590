use serde_json::{json, Value};
use votechain_crypto::{CanonicalError, ChainLink, Sha256Hasher};
use votechain_types::{CandidateId, Digest, Timestamp, VoterFingerprint};

use crate::error::LedgerError;
use crate::export::RecordView;

/// Rendering of the genesis record's missing predecessor.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// One cast vote, or the genesis marker.
///
/// The integrity hash is computed once in [`Record::new`] over every other
/// field. Fields are crate-private so only the ledger can build records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub(crate) index: u64,
    pub(crate) timestamp: Timestamp,
    pub(crate) voter: VoterFingerprint,
    pub(crate) candidate: CandidateId,
    pub(crate) previous_hash: Option<Digest>,
    pub(crate) hash: Digest,
}

impl Record {
    pub fn new(
        index: u64,
        timestamp: Timestamp,
        voter: VoterFingerprint,
        candidate: CandidateId,
        previous_hash: Option<Digest>,
    ) -> Result<Self, LedgerError> {
        let mut record = Self {
            index,
            timestamp,
            voter,
            candidate,
            previous_hash,
            hash: Digest::from_hash([0; 32]),
        };
        record.hash = record.recompute_hash()?;
        Ok(record)
    }

    /// The first record of every chain.
    pub fn genesis(timestamp: Timestamp) -> Result<Self, LedgerError> {
        Self::new(
            0,
            timestamp,
            VoterFingerprint::Genesis,
            CandidateId::genesis(),
            None,
        )
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn voter(&self) -> &VoterFingerprint {
        &self.voter
    }

    pub fn candidate(&self) -> &CandidateId {
        &self.candidate
    }

    pub fn previous_hash(&self) -> Option<Digest> {
        self.previous_hash
    }

    pub fn hash(&self) -> Digest {
        self.hash
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.previous_hash.is_none() && self.voter.is_genesis()
    }

    /// Hash input: every field except the integrity hash, keys sorted at
    /// hashing time.
    pub fn canonical_value(&self) -> Value {
        json!({
            "index": self.index,
            "timestamp": self.timestamp.as_millis(),
            "voter_id": self.voter.as_canonical(),
            "candidate": self.candidate.as_str(),
            "previous_hash": self.previous_hash_text(),
        })
    }

    /// Recompute the integrity hash from the current field values.
    pub fn recompute_hash(&self) -> Result<Digest, CanonicalError> {
        Sha256Hasher::hash_canonical(&self.canonical_value())
    }

    /// External record-dict representation.
    pub fn to_view(&self) -> RecordView {
        RecordView {
            index: self.index,
            timestamp: self.timestamp.as_millis(),
            voter_id: self.voter.as_canonical(),
            candidate: self.candidate.as_str().to_string(),
            previous_hash: self.previous_hash_text(),
            hash: self.hash.to_hex(),
        }
    }

    /// Rebuild a record from its external representation.
    ///
    /// The stored hash is kept as-is rather than recomputed, so validation
    /// of an imported chain sees exactly what was exported.
    pub fn from_view(view: &RecordView) -> Result<Self, LedgerError> {
        let malformed = |reason: String| LedgerError::MalformedRecord {
            index: view.index,
            reason,
        };

        let voter = VoterFingerprint::parse(&view.voter_id)
            .map_err(|e| malformed(format!("voter_id: {e}")))?;
        let candidate =
            CandidateId::new(view.candidate.clone()).map_err(|e| malformed(e.to_string()))?;
        let previous_hash = match view.previous_hash.as_str() {
            GENESIS_PREVIOUS_HASH => None,
            hex => Some(
                Digest::from_hex(hex).map_err(|e| malformed(format!("previous_hash: {e}")))?,
            ),
        };
        let hash =
            Digest::from_hex(&view.hash).map_err(|e| malformed(format!("hash: {e}")))?;

        Ok(Self {
            index: view.index,
            timestamp: Timestamp::from_millis(view.timestamp),
            voter,
            candidate,
            previous_hash,
            hash,
        })
    }

    fn previous_hash_text(&self) -> String {
        self.previous_hash
            .map(|h| h.to_hex())
            .unwrap_or_else(|| GENESIS_PREVIOUS_HASH.to_string())
    }
}

impl ChainLink for Record {
    fn link_hash(&self) -> Digest {
        self.hash
    }

    fn previous_hash(&self) -> Option<Digest> {
        self.previous_hash
    }

    fn recompute_hash(&self) -> Result<Digest, CanonicalError> {
        Record::recompute_hash(self)
    }
}
