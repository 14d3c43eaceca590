//! Foundation types for VoteChain.
//!
//! Every other VoteChain crate depends on `votechain-types`.
//!
//! # Key Types
//!
//! - [`Digest`]: 32-byte SHA-256 value, rendered as lowercase hex
//! - [`VoterFingerprint`]: one-way digest of a voter identifier, or the genesis sentinel
//! - [`CandidateId`]: opaque, non-empty candidate identifier
//! - [`Timestamp`]: wall-clock milliseconds since the UNIX epoch

pub mod candidate;
pub mod digest;
pub mod error;
pub mod fingerprint;
pub mod temporal;

pub use candidate::CandidateId;
pub use digest::Digest;
pub use error::TypeError;
pub use fingerprint::VoterFingerprint;
pub use temporal::Timestamp;
