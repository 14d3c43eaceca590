use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// A selectable option shown to voters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub party: String,
    /// Display color used by front ends.
    pub color: String,
}

impl Candidate {
    fn new(id: &str, name: &str, party: &str, color: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            party: party.into(),
            color: color.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Log every appended record through the tracing observer.
    pub log_appends: bool,
    pub candidates: Vec<Candidate>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            log_appends: true,
            candidates: vec![
                Candidate::new("c1", "Alice Johnson", "Tech Innovation Party", "#3498db"),
                Candidate::new("c2", "Bob Smith", "Green Earth Alliance", "#27ae60"),
                Candidate::new("c3", "Charlie Davis", "Future Vision Party", "#9b59b6"),
            ],
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document; absent keys keep their defaults.
    pub fn from_toml_str(source: &str) -> ServerResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| ServerError::Config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn candidate(&self, id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    fn check(&self) -> ServerResult<()> {
        if self.candidates.is_empty() {
            return Err(ServerError::Config("at least one candidate is required".into()));
        }
        for (i, candidate) in self.candidates.iter().enumerate() {
            if candidate.id.trim().is_empty() {
                return Err(ServerError::Config(format!("candidate #{i} has an empty id")));
            }
            if self.candidates[..i].iter().any(|c| c.id == candidate.id) {
                return Err(ServerError::Config(format!(
                    "duplicate candidate id: {}",
                    candidate.id
                )));
            }
        }
        Ok(())
    }
}
