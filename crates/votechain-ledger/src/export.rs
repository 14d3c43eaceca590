use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::record::Record;

/// External record-dict: what callers see of a [`Record`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordView {
    pub index: u64,
    pub timestamp: u64,
    /// Voter fingerprint (hex) or `"GENESIS"`; never the raw identifier.
    pub voter_id: String,
    pub candidate: String,
    /// Predecessor hash (hex) or `"0"` for genesis.
    pub previous_hash: String,
    pub hash: String,
}

/// Read-only document describing the whole chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainExport {
    pub length: usize,
    pub chain: Vec<RecordView>,
}

impl ChainExport {
    pub fn from_records(records: &[Record]) -> Self {
        Self {
            length: records.len(),
            chain: records.iter().map(Record::to_view).collect(),
        }
    }

    /// Rebuild records for offline validation.
    ///
    /// A `length` that disagrees with the number of entries is reported as
    /// malformed rather than silently trusted.
    pub fn to_records(&self) -> Result<Vec<Record>, LedgerError> {
        if self.length != self.chain.len() {
            return Err(LedgerError::MalformedRecord {
                index: self.chain.len() as u64,
                reason: format!(
                    "document declares length {} but holds {} records",
                    self.length,
                    self.chain.len()
                ),
            });
        }
        self.chain.iter().map(Record::from_view).collect()
    }
}
