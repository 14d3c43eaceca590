use std::sync::Arc;

use votechain_ledger::InMemoryLedger;

use crate::config::Candidate;

/// Shared handle passed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<InMemoryLedger>,
    pub candidates: Arc<Vec<Candidate>>,
}

impl AppState {
    pub fn new(ledger: Arc<InMemoryLedger>, candidates: Vec<Candidate>) -> Self {
        Self {
            ledger,
            candidates: Arc::new(candidates),
        }
    }

    pub fn is_candidate(&self, id: &str) -> bool {
        self.candidates.iter().any(|c| c.id == id)
    }
}
