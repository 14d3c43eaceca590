//! Cryptographic primitives for VoteChain.
//!
//! Provides SHA-256 voter fingerprints, canonical JSON hashing of record
//! fields, and hash chain link verification.
//!
//! All crypto operations wrap established libraries; there is no custom cryptography.

pub mod chain;
pub mod hasher;

pub use chain::{ChainError, ChainLink, HashChainVerifier};
pub use hasher::{canonical_json, CanonicalError, Sha256Hasher};
