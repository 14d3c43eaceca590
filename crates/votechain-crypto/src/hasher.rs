use serde::Serialize;
use sha2::{Digest as _, Sha256};
use votechain_types::Digest;

/// SHA-256 hashing for fingerprints and record integrity hashes.
///
/// No domain tag and no salt: a voter fingerprint is exactly
/// `SHA-256(identifier bytes)`, and a record hash is exactly
/// `SHA-256(canonical JSON bytes)`.
pub struct Sha256Hasher;

impl Sha256Hasher {
    /// Hash raw bytes.
    pub fn hash(data: &[u8]) -> Digest {
        let hash = Sha256::digest(data);
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        Digest::from_hash(bytes)
    }

    /// One-way fingerprint of a raw voter identifier.
    pub fn fingerprint(raw_voter_id: &str) -> Digest {
        Self::hash(raw_voter_id.as_bytes())
    }

    /// Hash the canonical serialization of a value.
    pub fn hash_canonical<T: Serialize>(value: &T) -> Result<Digest, CanonicalError> {
        Ok(Self::hash(canonical_json(value)?.as_bytes()))
    }
}

/// RFC 8785 (JCS) serialization: object keys sorted at every level,
/// compact separators.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, CanonicalError> {
    Ok(serde_jcs::to_string(value)?)
}

/// Failure to produce the canonical form of a value.
#[derive(Debug, thiserror::Error)]
pub enum CanonicalError {
    #[error("canonical serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
