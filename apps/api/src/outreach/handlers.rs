//! Axum route handlers for the Outreach API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::outreach::render::CompanyInfo;
use crate::outreach::resolver::Resolution;
use crate::outreach::service::{lookup_company_info, resolve_company};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyLookupRequest {
    pub company_name: String,
    /// Echoed back so callers can discard results of superseded submissions.
    pub request_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfoResponse {
    pub request_id: Uuid,
    #[serde(flatten)]
    pub info: CompanyInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub request_id: Uuid,
    #[serde(flatten)]
    pub resolution: Resolution,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/company-info
///
/// Looks up the company's HR contact and returns the email, LinkedIn URL and
/// a cold-outreach template addressed to that contact.
pub async fn handle_company_info(
    State(state): State<AppState>,
    Json(request): Json<CompanyLookupRequest>,
) -> Result<Json<CompanyInfoResponse>, AppError> {
    let request_id = request.request_id.unwrap_or_else(Uuid::new_v4);
    info!("company-info request {request_id}");

    let info = lookup_company_info(state.resolver.as_ref(), &request.company_name).await?;

    Ok(Json(CompanyInfoResponse { request_id, info }))
}

/// POST /api/v1/contacts/resolve
///
/// Returns the raw resolution without rendering. `not_found` is a 200 here.
pub async fn handle_resolve(
    State(state): State<AppState>,
    Json(request): Json<CompanyLookupRequest>,
) -> Result<Json<ResolveResponse>, AppError> {
    let request_id = request.request_id.unwrap_or_else(Uuid::new_v4);
    info!("resolve request {request_id}");

    let (_, resolution) = resolve_company(state.resolver.as_ref(), &request.company_name).await?;

    Ok(Json(ResolveResponse {
        request_id,
        resolution,
    }))
}
