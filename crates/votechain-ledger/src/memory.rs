use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use votechain_crypto::{HashChainVerifier, Sha256Hasher};
use votechain_types::{CandidateId, Digest, Timestamp, VoterFingerprint};

use crate::error::LedgerError;
use crate::export::ChainExport;
use crate::observer::AppendObserver;
use crate::outcome::{VoteOutcome, VoteReceipt};
use crate::record::Record;
use crate::traits::{LedgerReader, LedgerWriter};
use crate::validation::{StreamValidator, ValidationReport};

/// Process-lifetime vote ledger.
///
/// All chain state sits behind one `RwLock`. Appends hold the write lock
/// across the duplicate check and the push, so the pair is atomic; queries
/// take the read lock and only ever see whole appends.
pub struct InMemoryLedger {
    inner: RwLock<LedgerState>,
    observers: Vec<Arc<dyn AppendObserver>>,
}

struct LedgerState {
    records: Vec<Record>,
    /// Fingerprints already on the chain. `records` stays authoritative.
    voters: HashSet<Digest>,
}

impl InMemoryLedger {
    /// Create a ledger seeded with its genesis record.
    pub fn new() -> Result<Self, LedgerError> {
        let genesis = Record::genesis(Timestamp::now())?;
        tracing::info!(hash = %genesis.hash(), "ledger initialized with genesis record");
        Ok(Self {
            inner: RwLock::new(LedgerState {
                records: vec![genesis],
                voters: HashSet::new(),
            }),
            observers: Vec::new(),
        })
    }

    /// Register an observer notified after each successful append.
    pub fn with_observer(mut self, observer: Arc<dyn AppendObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Append a vote and flatten the result for callers.
    pub fn cast_vote(&self, raw_voter_id: &str, candidate: &str) -> VoteOutcome {
        VoteOutcome::from(self.append_vote(raw_voter_id, candidate))
    }

    /// Full validation report for the current chain.
    pub fn validate(&self) -> Result<ValidationReport, LedgerError> {
        let state = self.read_state()?;
        Ok(StreamValidator::validate_records(&state.records))
    }

    /// Returns `true` only if every hash link and every stored hash checks out.
    ///
    /// Stops at the first failure. Use [`validate`](Self::validate) for the
    /// full report, which also checks genesis shape, index density and
    /// voter uniqueness.
    pub fn is_valid(&self) -> bool {
        match self.read_state() {
            Ok(state) => HashChainVerifier::verify_links(&state.records).is_ok(),
            Err(_) => false,
        }
    }

    /// Snapshot of the chain as an external document.
    pub fn export(&self) -> Result<ChainExport, LedgerError> {
        let state = self.read_state()?;
        Ok(ChainExport::from_records(&state.records))
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, LedgerState>, LedgerError> {
        self.inner.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, LedgerState>, LedgerError> {
        self.inner.write().map_err(|_| LedgerError::LockPoisoned)
    }
}

fn require_voter_id(raw_voter_id: &str) -> Result<Digest, LedgerError> {
    if raw_voter_id.is_empty() {
        return Err(LedgerError::InvalidInput { field: "voter_id" });
    }
    Ok(Sha256Hasher::fingerprint(raw_voter_id))
}

impl LedgerWriter for InMemoryLedger {
    fn append_vote(&self, raw_voter_id: &str, candidate: &str) -> Result<VoteReceipt, LedgerError> {
        let fingerprint = require_voter_id(raw_voter_id)?;
        let candidate = CandidateId::new(candidate)
            .map_err(|_| LedgerError::InvalidInput { field: "candidate" })?;

        let (record, chain_len) = {
            let mut state = self.write_state()?;

            if state.voters.contains(&fingerprint) {
                tracing::warn!(voter = %fingerprint.short_hex(), "rejected duplicate vote");
                return Err(LedgerError::DuplicateVoter);
            }

            let tail = state.records.last().ok_or(LedgerError::EmptyChain)?;
            let record = Record::new(
                tail.index() + 1,
                Timestamp::now_after(tail.timestamp()),
                VoterFingerprint::Voter(fingerprint),
                candidate,
                Some(tail.hash()),
            )?;

            state.records.push(record.clone());
            state.voters.insert(fingerprint);
            (record, state.records.len())
        };

        tracing::debug!(index = record.index(), hash = %record.hash(), "vote recorded");
        for observer in &self.observers {
            observer.on_append(&record, chain_len);
        }

        Ok(VoteReceipt {
            position: record.index(),
            record,
        })
    }
}

impl LedgerReader for InMemoryLedger {
    fn has_voted(&self, raw_voter_id: &str) -> Result<bool, LedgerError> {
        let fingerprint = require_voter_id(raw_voter_id)?;
        Ok(self.read_state()?.voters.contains(&fingerprint))
    }

    fn list_all(&self) -> Result<Vec<Record>, LedgerError> {
        Ok(self.read_state()?.records.clone())
    }

    fn tail(&self) -> Result<Record, LedgerError> {
        self.read_state()?
            .records
            .last()
            .cloned()
            .ok_or(LedgerError::EmptyChain)
    }

    fn record_count(&self) -> Result<usize, LedgerError> {
        Ok(self.read_state()?.records.len())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use proptest::prelude::*;

    use super::*;
    use crate::outcome::{ALREADY_VOTED, VOTE_RECORDED};

    #[derive(Default)]
    struct RecordingObserver {
        seen: Mutex<Vec<(u64, usize)>>,
    }

    impl AppendObserver for RecordingObserver {
        fn on_append(&self, record: &Record, chain_len: usize) {
            self.seen.lock().unwrap().push((record.index(), chain_len));
        }
    }

    #[test]
    fn fresh_ledger_holds_only_genesis() {
        let ledger = InMemoryLedger::new().unwrap();
        let records = ledger.list_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].index(), 0);
        assert_eq!(records[0].to_view().previous_hash, "0");
        assert!(ledger.is_valid());
        assert_eq!(ledger.tail().unwrap(), records[0]);
    }

    #[test]
    fn concrete_voting_scenario() {
        let ledger = InMemoryLedger::new().unwrap();

        let first = ledger.cast_vote("V1", "Alice");
        assert!(first.ok);
        assert_eq!(first.message, VOTE_RECORDED);
        assert_eq!(first.position, Some(1));

        let repeat = ledger.cast_vote("V1", "Bob");
        assert!(!repeat.ok);
        assert_eq!(repeat.message, ALREADY_VOTED);
        assert_eq!(ledger.record_count().unwrap(), 2);

        let second = ledger.cast_vote("V2", "Bob");
        assert!(second.ok);
        assert_eq!(second.position, Some(2));
        assert_eq!(ledger.record_count().unwrap(), 3);
        assert!(ledger.is_valid());
    }

    #[test]
    fn duplicate_vote_leaves_chain_untouched() {
        let ledger = InMemoryLedger::new().unwrap();
        ledger.append_vote("voter-A", "c1").unwrap();
        let before = ledger.list_all().unwrap();

        let err = ledger.append_vote("voter-A", "c2").unwrap_err();
        assert_eq!(err, LedgerError::DuplicateVoter);
        assert_eq!(ledger.list_all().unwrap(), before);
    }

    #[test]
    fn appended_records_link_to_predecessor() {
        let ledger = InMemoryLedger::new().unwrap();
        for i in 0..5 {
            ledger.append_vote(&format!("voter-{i}"), "c1").unwrap();
        }
        let records = ledger.list_all().unwrap();
        for pair in records.windows(2) {
            assert_eq!(pair[1].previous_hash(), Some(pair[0].hash()));
            assert_eq!(pair[1].index(), pair[0].index() + 1);
            assert!(pair[1].timestamp() >= pair[0].timestamp());
        }
    }

    #[test]
    fn receipt_position_matches_index() {
        let ledger = InMemoryLedger::new().unwrap();
        let receipt = ledger.append_vote("V1", "Alice").unwrap();
        assert_eq!(receipt.position, receipt.record.index());
        assert_eq!(ledger.tail().unwrap(), receipt.record);
    }

    #[test]
    fn stored_fingerprint_is_digest_of_identifier() {
        let ledger = InMemoryLedger::new().unwrap();
        let receipt = ledger.append_vote("voter-A", "c1").unwrap();
        assert_eq!(
            receipt.record.voter(),
            &VoterFingerprint::Voter(Sha256Hasher::fingerprint("voter-A"))
        );
        assert!(!receipt.record.to_view().voter_id.contains("voter-A"));
    }

    #[test]
    fn has_voted_agrees_with_append() {
        let ledger = InMemoryLedger::new().unwrap();
        assert!(!ledger.has_voted("voter-A").unwrap());
        ledger.append_vote("voter-A", "c1").unwrap();
        assert!(ledger.has_voted("voter-A").unwrap());
        assert!(!ledger.has_voted("voter-B").unwrap());
    }

    #[test]
    fn genesis_sentinel_never_matches_a_voter() {
        let ledger = InMemoryLedger::new().unwrap();
        assert!(!ledger.has_voted("GENESIS").unwrap());
        assert!(ledger.append_vote("GENESIS", "c1").is_ok());
    }

    #[test]
    fn empty_input_is_rejected_without_mutation() {
        let ledger = InMemoryLedger::new().unwrap();
        assert_eq!(
            ledger.append_vote("", "c1").unwrap_err(),
            LedgerError::InvalidInput { field: "voter_id" }
        );
        assert_eq!(
            ledger.append_vote("V1", "").unwrap_err(),
            LedgerError::InvalidInput { field: "candidate" }
        );
        assert_eq!(
            ledger.has_voted("").unwrap_err(),
            LedgerError::InvalidInput { field: "voter_id" }
        );
        assert_eq!(ledger.record_count().unwrap(), 1);
        assert!(!ledger.has_voted("V1").unwrap());
    }

    #[test]
    fn whitespace_identifiers_are_ordinary_voters() {
        let ledger = InMemoryLedger::new().unwrap();
        let receipt = ledger.append_vote(" ", "c1").unwrap();
        assert_eq!(
            receipt.record.voter(),
            &VoterFingerprint::Voter(Sha256Hasher::fingerprint(" "))
        );
        assert!(ledger.has_voted(" ").unwrap());
        assert!(!ledger.has_voted("  ").unwrap());
        assert_eq!(
            ledger.append_vote(" ", "c2").unwrap_err(),
            LedgerError::DuplicateVoter
        );
    }

    #[test]
    fn is_valid_checks_links_and_hashes_only() {
        let ledger = InMemoryLedger::new().unwrap();
        ledger.append_vote("V1", "Alice").unwrap();
        ledger.append_vote("V2", "Bob").unwrap();

        // Rewrite V2's record as a second V1 vote, rehashing so every link holds.
        {
            let mut guard = ledger.inner.write().unwrap();
            let first_voter = guard.records[1].voter;
            guard.records[2].voter = first_voter;
            let rehashed = guard.records[2].recompute_hash().unwrap();
            guard.records[2].hash = rehashed;
        }
        assert!(ledger.is_valid());
        assert!(!ledger.validate().unwrap().is_valid());
    }

    #[test]
    fn tampering_is_detected() {
        let ledger = InMemoryLedger::new().unwrap();
        ledger.append_vote("V1", "Alice").unwrap();
        ledger.append_vote("V2", "Bob").unwrap();
        assert!(ledger.is_valid());

        {
            let mut guard = ledger.inner.write().unwrap();
            guard.records[1].candidate = CandidateId::new("Mallory").unwrap();
        }
        assert!(!ledger.is_valid());

        {
            let mut guard = ledger.inner.write().unwrap();
            let rehashed = guard.records[1].recompute_hash().unwrap();
            guard.records[1].hash = rehashed;
        }
        assert!(!ledger.is_valid());
    }

    #[test]
    fn tampered_timestamp_is_detected() {
        let ledger = InMemoryLedger::new().unwrap();
        ledger.append_vote("V1", "Alice").unwrap();
        {
            let mut guard = ledger.inner.write().unwrap();
            guard.records[1].timestamp = Timestamp::from_millis(0);
        }
        assert!(!ledger.is_valid());
    }

    #[test]
    fn validation_is_idempotent() {
        let ledger = InMemoryLedger::new().unwrap();
        ledger.append_vote("V1", "Alice").unwrap();
        let first = ledger.validate().unwrap();
        for _ in 0..3 {
            assert_eq!(ledger.validate().unwrap(), first);
            assert!(ledger.is_valid());
        }
    }

    #[test]
    fn observers_run_after_successful_appends_only() {
        let observer = Arc::new(RecordingObserver::default());
        let ledger = InMemoryLedger::new().unwrap().with_observer(observer.clone());

        ledger.append_vote("V1", "Alice").unwrap();
        let _ = ledger.append_vote("V1", "Bob");
        ledger.append_vote("V2", "Bob").unwrap();

        assert_eq!(*observer.seen.lock().unwrap(), vec![(1, 2), (2, 3)]);
    }

    #[test]
    fn observer_may_read_the_ledger() {
        struct Reader(Mutex<Option<Arc<InMemoryLedger>>>);
        impl AppendObserver for Reader {
            fn on_append(&self, _record: &Record, chain_len: usize) {
                if let Some(ledger) = self.0.lock().unwrap().as_ref() {
                    assert_eq!(ledger.record_count().unwrap(), chain_len);
                }
            }
        }

        let reader = Arc::new(Reader(Mutex::new(None)));
        let ledger = Arc::new(InMemoryLedger::new().unwrap().with_observer(reader.clone()));
        *reader.0.lock().unwrap() = Some(ledger.clone());
        ledger.append_vote("V1", "Alice").unwrap();
        *reader.0.lock().unwrap() = None;
    }

    #[test]
    fn concurrent_votes_for_one_voter_record_once() {
        let ledger = InMemoryLedger::new().unwrap();
        let accepted = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|i| {
                    let ledger = &ledger;
                    scope.spawn(move || ledger.append_vote("same-voter", &format!("c{i}")).is_ok())
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|ok| *ok)
                .count()
        });

        assert_eq!(accepted, 1);
        assert_eq!(ledger.record_count().unwrap(), 2);
        assert!(ledger.is_valid());
    }

    #[test]
    fn concurrent_distinct_voters_all_land() {
        let ledger = InMemoryLedger::new().unwrap();
        std::thread::scope(|scope| {
            for i in 0..32 {
                let ledger = &ledger;
                scope.spawn(move || ledger.append_vote(&format!("voter-{i}"), "c1").unwrap());
            }
        });
        assert_eq!(ledger.record_count().unwrap(), 33);
        assert!(ledger.is_valid());
    }

    proptest! {
        #[test]
        fn any_sequence_of_votes_keeps_chain_valid(
            voters in proptest::collection::vec("[a-d]{1,2}", 1..20)
        ) {
            let ledger = InMemoryLedger::new().unwrap();
            let mut distinct = HashSet::new();
            for voter in &voters {
                let result = ledger.append_vote(voter, "c1");
                prop_assert_eq!(result.is_ok(), distinct.insert(voter.clone()));
            }
            prop_assert_eq!(ledger.record_count().unwrap(), distinct.len() + 1);
            prop_assert!(ledger.is_valid());
        }
    }
}
