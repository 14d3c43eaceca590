//! HTTP server for VoteChain.
//!
//! Exposes the vote ledger as JSON endpoints: voter eligibility, vote
//! submission, the candidate list, and chain inspection.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::{Candidate, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::VoteServer;
pub use state::AppState;
