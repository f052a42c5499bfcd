//! Partner and partner limit handlers.

use axum::Json;
use axum::extract::{Path, State};

use promocode_core::types::{PartnerId, PartnerLimitId};

use crate::dto::request::SetPartnerPromoCodeLimitBody;
use crate::dto::response::{ApiResponse, PartnerLimitResponse, PartnerResponse};
use crate::error::ApiError;
use crate::extractors::parse_id;
use crate::state::AppState;

/// GET /api/partners
pub async fn list_partners(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PartnerResponse>>>, ApiError> {
    let partners = state.partner_service.list_partners().await?;
    Ok(Json(ApiResponse::ok(
        partners.iter().map(PartnerResponse::from).collect(),
    )))
}

/// GET /api/partners/{id}
pub async fn get_partner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PartnerResponse>>, ApiError> {
    let partner_id: PartnerId = parse_id(&id)?;
    let partner = state.partner_service.get_partner(partner_id).await?;
    Ok(Json(ApiResponse::ok(PartnerResponse::from(&partner))))
}

/// GET /api/partners/{id}/limits/{limit_id}
pub async fn get_partner_limit(
    State(state): State<AppState>,
    Path((id, limit_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<PartnerLimitResponse>>, ApiError> {
    let partner_id: PartnerId = parse_id(&id)?;
    let limit_id: PartnerLimitId = parse_id(&limit_id)?;
    let limit = state
        .partner_service
        .get_limit(partner_id, limit_id)
        .await?;
    Ok(Json(ApiResponse::ok(PartnerLimitResponse::from(&limit))))
}

/// POST /api/partners/{id}/limits
pub async fn set_partner_limit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<SetPartnerPromoCodeLimitBody>,
) -> Result<Json<ApiResponse<PartnerResponse>>, ApiError> {
    let partner_id: PartnerId = parse_id(&id)?;
    let partner = state
        .partner_limit_service
        .set_limit(partner_id, body.into())
        .await?;
    Ok(Json(ApiResponse::ok(PartnerResponse::from(&partner))))
}

/// POST /api/partners/{id}/limits/cancel
pub async fn cancel_partner_limit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PartnerResponse>>, ApiError> {
    let partner_id: PartnerId = parse_id(&id)?;
    let partner = state.partner_limit_service.cancel_limit(partner_id).await?;
    Ok(Json(ApiResponse::ok(PartnerResponse::from(&partner))))
}
