//! Partner promo-code limit entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use promocode_core::types::{PartnerId, PartnerLimitId};

/// A time-bounded cap on how many promo codes a partner may issue.
///
/// Limit records are never deleted. A limit is superseded by stamping
/// `cancel_date`, which keeps the partner's limit history intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PartnerPromoCodeLimit {
    /// Unique limit identifier.
    pub id: PartnerLimitId,
    /// The partner this limit belongs to.
    pub partner_id: PartnerId,
    /// Maximum number of promo codes issuable under this limit.
    #[sqlx(rename = "limit_value")]
    pub limit: i32,
    /// When the limit became active.
    pub create_date: DateTime<Utc>,
    /// When the limit expires.
    pub end_date: DateTime<Utc>,
    /// When the limit was superseded, if it was.
    pub cancel_date: Option<DateTime<Utc>>,
}

impl PartnerPromoCodeLimit {
    /// Create a fresh, active limit with a newly generated ID.
    pub fn new(
        partner_id: PartnerId,
        limit: i32,
        create_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: PartnerLimitId::new(),
            partner_id,
            limit,
            create_date,
            end_date,
            cancel_date: None,
        }
    }

    /// A limit is active until it has been cancelled.
    pub fn is_active(&self) -> bool {
        self.cancel_date.is_none()
    }

    /// Mark the limit cancelled at `now`. Already-cancelled limits keep
    /// their original cancellation time.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_active() {
            self.cancel_date = Some(now);
            true
        } else {
            false
        }
    }
}
