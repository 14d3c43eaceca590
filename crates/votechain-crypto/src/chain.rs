use votechain_types::Digest;

use crate::hasher::CanonicalError;

/// Trait for values that participate in a hash chain.
pub trait ChainLink {
    /// The stored integrity hash.
    fn link_hash(&self) -> Digest;
    /// The stored hash of the predecessor (None for genesis).
    fn previous_hash(&self) -> Option<Digest>;
    /// Hash recomputed from the value's current contents.
    fn recompute_hash(&self) -> Result<Digest, CanonicalError>;
}

/// Hash chain integrity verifier.
///
/// For every adjacent pair `(i - 1, i)` with `i >= 1`, the successor must
/// point at its predecessor's stored hash, and its own stored hash must match
/// a fresh recomputation. The first link is never checked against a
/// predecessor.
pub struct HashChainVerifier;

impl HashChainVerifier {
    /// Verify a chain of links, returning the first failure.
    pub fn verify_links(links: &[impl ChainLink]) -> Result<(), ChainError> {
        for index in 1..links.len() {
            Self::check_link(index, &links[index - 1], &links[index])?;
            Self::check_hash(index, &links[index])?;
        }
        Ok(())
    }

    /// Check that `current` points at `previous`.
    pub fn check_link(
        index: usize,
        previous: &impl ChainLink,
        current: &impl ChainLink,
    ) -> Result<(), ChainError> {
        match current.previous_hash() {
            Some(prev) if prev == previous.link_hash() => Ok(()),
            Some(_) => Err(ChainError::BrokenLink { index }),
            None => Err(ChainError::MissingPrevHash { index }),
        }
    }

    /// Check that the stored hash of `current` matches its contents.
    pub fn check_hash(index: usize, current: &impl ChainLink) -> Result<(), ChainError> {
        let recomputed = current
            .recompute_hash()
            .map_err(|e| ChainError::Unhashable {
                index,
                reason: e.to_string(),
            })?;
        if recomputed == current.link_hash() {
            Ok(())
        } else {
            Err(ChainError::HashMismatch { index })
        }
    }
}

/// Errors from chain verification.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("broken link at index {index}: previous hash does not match")]
    BrokenLink { index: usize },

    #[error("missing previous hash at index {index} (should reference previous record)")]
    MissingPrevHash { index: usize },

    #[error("hash mismatch at index {index}: computed hash differs from stored")]
    HashMismatch { index: usize },

    #[error("cannot hash link at index {index}: {reason}")]
    Unhashable { index: usize, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::Sha256Hasher;

    struct TestLink {
        hash: Digest,
        prev: Option<Digest>,
        payload: Vec<u8>,
    }

    impl TestLink {
        fn compute(payload: &[u8], prev: Option<Digest>) -> Digest {
            let mut data = prev.map(|p| p.as_bytes().to_vec()).unwrap_or_default();
            data.extend_from_slice(payload);
            Sha256Hasher::hash(&data)
        }
    }

    impl ChainLink for TestLink {
        fn link_hash(&self) -> Digest {
            self.hash
        }
        fn previous_hash(&self) -> Option<Digest> {
            self.prev
        }
        fn recompute_hash(&self) -> Result<Digest, CanonicalError> {
            Ok(Self::compute(&self.payload, self.prev))
        }
    }

    fn build_chain(count: usize) -> Vec<TestLink> {
        let mut chain = Vec::new();
        let mut prev = None;
        for i in 0..count {
            let payload = format!("record-{i}").into_bytes();
            let hash = TestLink::compute(&payload, prev);
            chain.push(TestLink {
                hash,
                prev,
                payload,
            });
            prev = Some(hash);
        }
        chain
    }

    #[test]
    fn empty_and_single_chains_are_valid() {
        assert!(HashChainVerifier::verify_links(&build_chain(0)).is_ok());
        assert!(HashChainVerifier::verify_links(&build_chain(1)).is_ok());
    }

    #[test]
    fn multi_link_chain() {
        assert!(HashChainVerifier::verify_links(&build_chain(10)).is_ok());
    }

    #[test]
    fn first_link_is_not_checked() {
        let mut chain = build_chain(2);
        chain[0].payload = b"anything".to_vec();
        assert!(HashChainVerifier::verify_links(&chain).is_ok());
    }

    #[test]
    fn broken_link_detected() {
        let mut chain = build_chain(3);
        chain[2].prev = Some(Digest::from_hash([99; 32]));
        let err = HashChainVerifier::verify_links(&chain).unwrap_err();
        assert_eq!(err, ChainError::BrokenLink { index: 2 });
    }

    #[test]
    fn missing_prev_hash_detected() {
        let mut chain = build_chain(3);
        chain[1].prev = None;
        let err = HashChainVerifier::verify_links(&chain).unwrap_err();
        assert_eq!(err, ChainError::MissingPrevHash { index: 1 });
    }

    #[test]
    fn tampered_payload_detected() {
        let mut chain = build_chain(3);
        chain[1].payload = b"tampered".to_vec();
        let err = HashChainVerifier::verify_links(&chain).unwrap_err();
        assert_eq!(err, ChainError::HashMismatch { index: 1 });
    }

    #[test]
    fn rehashed_middle_link_breaks_successor() {
        let mut chain = build_chain(3);
        chain[1].payload = b"tampered".to_vec();
        chain[1].hash = chain[1].recompute_hash().unwrap();
        let err = HashChainVerifier::verify_links(&chain).unwrap_err();
        assert_eq!(err, ChainError::BrokenLink { index: 2 });
    }

    #[test]
    fn unhashable_link_is_reported() {
        struct Opaque;
        impl ChainLink for Opaque {
            fn link_hash(&self) -> Digest {
                Digest::from_hash([0; 32])
            }
            fn previous_hash(&self) -> Option<Digest> {
                None
            }
            fn recompute_hash(&self) -> Result<Digest, CanonicalError> {
                let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
                Err(CanonicalError::from(err))
            }
        }

        let err = HashChainVerifier::check_hash(4, &Opaque).unwrap_err();
        assert!(matches!(err, ChainError::Unhashable { index: 4, .. }));
    }
}
