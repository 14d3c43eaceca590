use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::digest::Digest;
use crate::error::TypeError;

/// Identity slot of a ledger record.
///
/// Real voters are only ever represented by a one-way digest of the
/// identifier they submitted. The genesis record carries a reserved
/// sentinel instead. The sentinel is its own variant, so it can never
/// compare equal to a voter digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoterFingerprint {
    /// Reserved marker used only by the genesis record.
    Genesis,
    /// Digest of a voter identifier.
    Voter(Digest),
}

impl VoterFingerprint {
    /// Rendering of the genesis sentinel.
    pub const GENESIS_SENTINEL: &'static str = "GENESIS";

    /// Returns `true` for the genesis sentinel.
    pub fn is_genesis(&self) -> bool {
        matches!(self, Self::Genesis)
    }

    /// The voter digest, if this is not the genesis sentinel.
    pub fn digest(&self) -> Option<&Digest> {
        match self {
            Self::Genesis => None,
            Self::Voter(d) => Some(d),
        }
    }

    /// Canonical string form: `"GENESIS"` or 64 hex characters.
    pub fn as_canonical(&self) -> String {
        match self {
            Self::Genesis => Self::GENESIS_SENTINEL.to_string(),
            Self::Voter(d) => d.to_hex(),
        }
    }

    /// Parse the canonical string form.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if s == Self::GENESIS_SENTINEL {
            return Ok(Self::Genesis);
        }
        Digest::from_hex(s).map(Self::Voter)
    }
}

impl From<Digest> for VoterFingerprint {
    fn from(digest: Digest) -> Self {
        Self::Voter(digest)
    }
}

impl fmt::Debug for VoterFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Genesis => write!(f, "VoterFingerprint(GENESIS)"),
            Self::Voter(d) => write!(f, "VoterFingerprint({})", d.short_hex()),
        }
    }
}

impl fmt::Display for VoterFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_canonical())
    }
}

impl Serialize for VoterFingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_canonical())
    }
}

impl<'de> Deserialize<'de> for VoterFingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
