//! Request DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use promocode_service::SetPartnerLimitRequest;

/// Body of `POST /api/partners/{id}/limits`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPartnerPromoCodeLimitBody {
    /// Maximum number of promo codes.
    pub limit: i32,
    /// Expiry of the new limit (RFC 3339).
    pub end_date: DateTime<Utc>,
}

impl From<SetPartnerPromoCodeLimitBody> for SetPartnerLimitRequest {
    fn from(body: SetPartnerPromoCodeLimitBody) -> Self {
        Self {
            limit: body.limit,
            end_date: body.end_date,
        }
    }
}
