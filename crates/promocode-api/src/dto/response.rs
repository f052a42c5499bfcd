//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use promocode_core::types::{PartnerId, PartnerLimitId};
use promocode_entity::partner::{Partner, PartnerPromoCodeLimit};

/// Human-readable timestamp format used for limit dates.
pub const DATE_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Partner with its limit history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerResponse {
    pub id: PartnerId,
    pub name: String,
    pub is_active: bool,
    pub number_issued_promo_codes: i32,
    pub partner_limits: Vec<PartnerLimitResponse>,
}

/// A single limit record. Dates are rendered as text; `cancel_date` is an
/// empty string while the limit is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerLimitResponse {
    pub id: PartnerLimitId,
    pub partner_id: PartnerId,
    pub limit: i32,
    pub create_date: String,
    pub end_date: String,
    pub cancel_date: String,
}

fn format_date(date: DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

impl From<&PartnerPromoCodeLimit> for PartnerLimitResponse {
    fn from(limit: &PartnerPromoCodeLimit) -> Self {
        Self {
            id: limit.id,
            partner_id: limit.partner_id,
            limit: limit.limit,
            create_date: format_date(limit.create_date),
            end_date: format_date(limit.end_date),
            cancel_date: limit.cancel_date.map(format_date).unwrap_or_default(),
        }
    }
}

impl From<&Partner> for PartnerResponse {
    fn from(partner: &Partner) -> Self {
        Self {
            id: partner.id,
            name: partner.name.clone(),
            is_active: partner.is_active,
            number_issued_promo_codes: partner.number_issued_promo_codes,
            partner_limits: partner.limits.iter().map(Into::into).collect(),
        }
    }
}
