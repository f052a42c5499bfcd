//! Partner aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use promocode_core::types::{PartnerId, PartnerLimitId};

use super::limit::PartnerPromoCodeLimit;

/// An organization authorized to issue promo codes.
///
/// `limits` is kept in insertion order, most recent last. After any
/// mutation through [`Partner::apply_new_limit`] at most one limit is
/// active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Partner {
    /// Unique partner identifier.
    pub id: PartnerId,
    /// Display name.
    pub name: String,
    /// Inactive partners may not receive new limits.
    pub is_active: bool,
    /// Promo codes issued under the current limit.
    pub number_issued_promo_codes: i32,
    /// Limit history, oldest first.
    #[sqlx(skip)]
    #[serde(default)]
    pub limits: Vec<PartnerPromoCodeLimit>,
}

impl Partner {
    /// Create an active partner with no limits and a zero counter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PartnerId::new(),
            name: name.into(),
            is_active: true,
            number_issued_promo_codes: 0,
            limits: Vec::new(),
        }
    }

    /// All limits without a cancellation timestamp.
    pub fn active_limits(&self) -> impl Iterator<Item = &PartnerPromoCodeLimit> {
        self.limits.iter().filter(|l| l.is_active())
    }

    /// The currently active limit, if any. Returns the most recent one if
    /// earlier writes left several active.
    pub fn active_limit(&self) -> Option<&PartnerPromoCodeLimit> {
        self.limits.iter().rev().find(|l| l.is_active())
    }

    /// Find a limit by its ID.
    pub fn limit(&self, id: PartnerLimitId) -> Option<&PartnerPromoCodeLimit> {
        self.limits.iter().find(|l| l.id == id)
    }

    /// Cancel every active limit at `now`. Returns how many were cancelled.
    pub fn cancel_active_limits(&mut self, now: DateTime<Utc>) -> usize {
        self.limits
            .iter_mut()
            .map(|l| l.cancel(now))
            .filter(|cancelled| *cancelled)
            .count()
    }

    /// Retire all active limits, append a new active one, and reset the
    /// issued-codes counter. Returns the new limit's ID.
    ///
    /// Cancellation happens before the append so the new limit is never
    /// itself cancelled.
    pub fn apply_new_limit(
        &mut self,
        limit: i32,
        end_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> PartnerLimitId {
        self.cancel_active_limits(now);

        let new_limit = PartnerPromoCodeLimit::new(self.id, limit, now, end_date);
        let id = new_limit.id;
        self.limits.push(new_limit);
        self.number_issued_promo_codes = 0;

        id
    }
}
