//! Append-only vote ledger for VoteChain.
//!
//! This crate is the heart of VoteChain. It provides:
//! - [`Record`], an immutable hash-linked vote record
//! - `LedgerWriter` / `LedgerReader` trait boundaries
//! - [`InMemoryLedger`], the process-lifetime ledger with a fingerprint index
//! - Chain validation (hash links, recomputed hashes, sequence, voter uniqueness)
//! - Append observers and the exported chain document

pub mod error;
pub mod export;
pub mod memory;
pub mod observer;
pub mod outcome;
pub mod record;
pub mod traits;
pub mod validation;

pub use error::LedgerError;
pub use export::{ChainExport, RecordView};
pub use memory::InMemoryLedger;
pub use observer::{AppendObserver, TracingObserver};
pub use outcome::{VoteOutcome, VoteReceipt};
pub use record::Record;
pub use traits::{LedgerReader, LedgerWriter};
pub use validation::{StreamValidator, ValidationReport, Violation, ViolationKind};
