use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use votechain_ledger::{
    ChainExport, LedgerError, LedgerReader, LedgerWriter, ValidationReport, VoteOutcome,
};

use crate::config::Candidate;
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

/// Missing fields deserialize as empty and are rejected by the ledger.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub voter_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub eligible: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct VoteRequest {
    pub voter_id: String,
    pub candidate: String,
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> ServerResult<Json<serde_json::Value>> {
    Ok(Json(json!({
        "name": "votechain-server",
        "version": env!("CARGO_PKG_VERSION"),
        "chain_length": state.ledger.record_count()?,
    })))
}

pub async fn candidates_handler(State(state): State<AppState>) -> Json<Vec<Candidate>> {
    Json(state.candidates.as_ref().clone())
}

/// Reports whether the voter may still cast a ballot.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ServerResult<Json<LoginResponse>> {
    let voted = state.ledger.has_voted(&request.voter_id)?;
    Ok(Json(LoginResponse { eligible: !voted }))
}

pub async fn submit_vote_handler(
    State(state): State<AppState>,
    Json(request): Json<VoteRequest>,
) -> ServerResult<(StatusCode, Json<VoteOutcome>)> {
    if !request.candidate.is_empty() && !state.is_candidate(&request.candidate) {
        return Err(ServerError::UnknownCandidate(request.candidate));
    }

    match state.ledger.append_vote(&request.voter_id, &request.candidate) {
        Ok(receipt) => Ok((StatusCode::CREATED, Json(VoteOutcome::from(Ok(receipt))))),
        Err(LedgerError::DuplicateVoter) => Ok((
            StatusCode::CONFLICT,
            Json(VoteOutcome::from(Err(LedgerError::DuplicateVoter))),
        )),
        Err(other) => Err(other.into()),
    }
}

pub async fn chain_handler(State(state): State<AppState>) -> ServerResult<Json<ChainExport>> {
    Ok(Json(state.ledger.export()?))
}

pub async fn validity_handler(
    State(state): State<AppState>,
) -> ServerResult<Json<ValidityResponse>> {
    let report = state.ledger.validate()?;
    Ok(Json(ValidityResponse::from(report)))
}

#[derive(Clone, Debug, Serialize)]
pub struct ValidityResponse {
    pub valid: bool,
    pub length: u64,
    pub violations: Vec<votechain_ledger::Violation>,
}

impl From<ValidationReport> for ValidityResponse {
    fn from(report: ValidationReport) -> Self {
        Self {
            valid: report.is_valid(),
            length: report.record_count,
            violations: report.violations,
        }
    }
}
