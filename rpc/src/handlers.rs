//! Request handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use phishnet_classifier::PhishingAnalysis;
use phishnet_types::{ContentHash, PhishingReport};

use crate::server::ApiState;
use crate::RpcError;

// ── Checkpoint ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct LastHashResponse {
    pub last_hash: String,
}

#[derive(Deserialize)]
pub struct SetLastHashRequest {
    pub hash: Option<String>,
}

#[derive(Serialize)]
pub struct SetLastHashResponse {
    pub message: String,
    pub last_hash: String,
}

pub async fn get_last_hash(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<LastHashResponse>, RpcError> {
    let last_hash = state.checkpoint.last_hash()?;
    Ok(Json(LastHashResponse { last_hash }))
}

pub async fn set_last_hash(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<SetLastHashRequest>,
) -> Result<Json<SetLastHashResponse>, RpcError> {
    let hash = match request.hash {
        Some(hash) if !hash.is_empty() => hash,
        _ => return Err(RpcError::InvalidRequest("No hash provided".into())),
    };
    state.checkpoint.set_last_hash(&hash)?;
    Ok(Json(SetLastHashResponse {
        message: "Hash updated.".into(),
        last_hash: hash,
    }))
}

// ── Report submission ────────────────────────────────────────────────────

/// The domain can arrive pre-hashed (`domain_hash`) or raw (`domain`);
/// a raw domain is canonicalized and hashed server-side. `domain_hash`
/// wins when both are present.
#[derive(Deserialize)]
pub struct SubmitReportRequest {
    pub report_hash: Option<String>,
    pub domain_hash: Option<String>,
    pub domain: Option<String>,
}

#[derive(Serialize)]
pub struct SubmitReportResponse {
    pub tx_hash: String,
}

pub async fn submit_report(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<SubmitReportRequest>,
) -> Result<Json<SubmitReportResponse>, RpcError> {
    let report_hex = match request.report_hash {
        Some(r) if !r.is_empty() => r,
        _ => return Err(RpcError::InvalidRequest("Missing required fields".into())),
    };
    let report_hash = ContentHash::from_hex(&report_hex)
        .map_err(|e| RpcError::InvalidRequest(e.to_string()))?;

    let domain_hash = match (request.domain_hash, request.domain) {
        (Some(hex), _) if !hex.is_empty() => {
            ContentHash::from_hex(&hex).map_err(|e| RpcError::InvalidRequest(e.to_string()))?
        }
        (_, Some(domain)) if !domain.is_empty() => phishnet_utils::domain_hash(&domain),
        _ => return Err(RpcError::InvalidRequest("Missing required fields".into())),
    };

    let tx_hash = state
        .ledger
        .submit_report_hash(&report_hash, &domain_hash)
        .await?;
    Ok(Json(SubmitReportResponse { tx_hash }))
}

// ── Mirror reads ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ReportView {
    pub incident_hash: String,
    pub reporter_address: String,
    pub domain: String,
    pub description: String,
    pub detected_at: u64,
    pub verified: bool,
}

impl From<PhishingReport> for ReportView {
    fn from(r: PhishingReport) -> Self {
        Self {
            incident_hash: r.incident_hash.to_hex(),
            reporter_address: r.reporter_address,
            domain: r.domain,
            description: r.description,
            detected_at: r.detected_at,
            verified: r.verified,
        }
    }
}

pub async fn list_reports(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ReportView>>, RpcError> {
    let reports = state.reports.iter_reports()?;
    Ok(Json(reports.into_iter().map(Into::into).collect()))
}

pub async fn get_report(
    State(state): State<Arc<ApiState>>,
    Path(hash): Path<String>,
) -> Result<Json<ReportView>, RpcError> {
    let hash =
        ContentHash::from_hex(&hash).map_err(|e| RpcError::InvalidRequest(e.to_string()))?;
    let report = state.reports.get_report(&hash)?;
    Ok(Json(report.into()))
}

#[derive(Serialize)]
pub struct DomainReputationView {
    pub domain: String,
    pub reputation_score: f64,
    pub last_updated: u64,
}

pub async fn list_domain_reputations(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<DomainReputationView>>, RpcError> {
    let domains = state.reputations.iter_domains()?;
    Ok(Json(
        domains
            .into_iter()
            .map(|d| DomainReputationView {
                domain: d.domain,
                reputation_score: d.reputation_score,
                last_updated: d.last_updated,
            })
            .collect(),
    ))
}

pub async fn get_domain_reputation(
    State(state): State<Arc<ApiState>>,
    Path(domain): Path<String>,
) -> Result<Json<DomainReputationView>, RpcError> {
    let found = state
        .reputations
        .get_domain(&domain)?
        .ok_or_else(|| RpcError::NotFound(format!("domain {domain}")))?;
    Ok(Json(DomainReputationView {
        domain: found.domain,
        reputation_score: found.reputation_score,
        last_updated: found.last_updated,
    }))
}

#[derive(Serialize)]
pub struct TokenBalanceView {
    pub user_address: String,
    pub tokens: u64,
}

pub async fn get_token_balance(
    State(state): State<Arc<ApiState>>,
    Path(address): Path<String>,
) -> Result<Json<TokenBalanceView>, RpcError> {
    let record = state
        .tokens
        .get_tokens(&address)?
        .ok_or_else(|| RpcError::NotFound(format!("account {address}")))?;
    Ok(Json(TokenBalanceView {
        user_address: record.user_address,
        tokens: record.tokens,
    }))
}

// ── Analysis ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub urls: Vec<String>,
}

pub async fn analyze(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<PhishingAnalysis> {
    // The gateway absorbs classifier failures, so this cannot error.
    let verdict = state
        .classifier
        .analyze(&request.text, &request.images, &request.urls)
        .await;
    Json(verdict)
}
