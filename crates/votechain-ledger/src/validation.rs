use std::collections::HashSet;

use serde::Serialize;
use votechain_crypto::HashChainVerifier;

use crate::error::LedgerError;
use crate::record::Record;
use crate::traits::LedgerReader;

/// Result of chain validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub record_count: u64,
    pub hash_chain_valid: bool,
    pub sequence_dense: bool,
    pub voters_unique: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific integrity violation detected during validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub index: u64,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MissingGenesis,
    SequenceGap,
    HashChainBreak,
    HashMismatch,
    DuplicateVoter,
}

/// Chain integrity validator.
pub struct StreamValidator;

impl StreamValidator {
    /// Validate the chain held by a reader.
    pub fn validate<R: LedgerReader>(reader: &R) -> Result<ValidationReport, LedgerError> {
        let records = reader.list_all()?;
        Ok(Self::validate_records(&records))
    }

    /// Validate an ordered slice of records, genesis first.
    pub fn validate_records(records: &[Record]) -> ValidationReport {
        let mut violations = Vec::new();
        let mut hash_chain_valid = true;
        let mut sequence_dense = true;
        let mut voters_unique = true;
        let mut seen_voters = HashSet::new();

        match records.first() {
            None => violations.push(Violation {
                index: 0,
                kind: ViolationKind::MissingGenesis,
                description: "chain has no records".into(),
            }),
            Some(first) if !first.is_genesis() => violations.push(Violation {
                index: first.index(),
                kind: ViolationKind::MissingGenesis,
                description: "first record is not a genesis record".into(),
            }),
            Some(_) => {}
        }

        for (position, record) in records.iter().enumerate() {
            let expected = position as u64;
            if record.index() != expected {
                sequence_dense = false;
                violations.push(Violation {
                    index: record.index(),
                    kind: ViolationKind::SequenceGap,
                    description: format!("expected index {expected}, found {}", record.index()),
                });
            }

            if position > 0 {
                if let Err(err) =
                    HashChainVerifier::check_link(position, &records[position - 1], record)
                {
                    hash_chain_valid = false;
                    violations.push(Violation {
                        index: record.index(),
                        kind: ViolationKind::HashChainBreak,
                        description: err.to_string(),
                    });
                }

                if let Err(err) = HashChainVerifier::check_hash(position, record) {
                    hash_chain_valid = false;
                    violations.push(Violation {
                        index: record.index(),
                        kind: ViolationKind::HashMismatch,
                        description: err.to_string(),
                    });
                }
            }

            if let Some(digest) = record.voter().digest() {
                if !seen_voters.insert(*digest) {
                    voters_unique = false;
                    violations.push(Violation {
                        index: record.index(),
                        kind: ViolationKind::DuplicateVoter,
                        description: format!("voter {} appears more than once", digest.short_hex()),
                    });
                }
            }
        }

        ValidationReport {
            record_count: records.len() as u64,
            hash_chain_valid,
            sequence_dense,
            voters_unique,
            violations,
        }
    }
}
