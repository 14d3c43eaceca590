use std::sync::Arc;

use tokio::net::TcpListener;
use votechain_ledger::{InMemoryLedger, TracingObserver};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// VoteChain server and composition root.
///
/// Owns the single ledger instance for the process and hands a shared
/// handle to the router.
pub struct VoteServer {
    config: ServerConfig,
    ledger: Arc<InMemoryLedger>,
}

impl VoteServer {
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let mut ledger = InMemoryLedger::new()?;
        if config.log_appends {
            ledger = ledger.with_observer(Arc::new(TracingObserver));
        }
        Ok(Self {
            config,
            ledger: Arc::new(ledger),
        })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Arc<InMemoryLedger> {
        &self.ledger
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(AppState::new(
            self.ledger.clone(),
            self.config.candidates.clone(),
        ))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("VoteChain server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
