//! Partner promo-code limit management.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use promocode_core::error::{AppError, ErrorKind};
use promocode_core::types::PartnerId;
use promocode_database::PartnerStore;
use promocode_entity::partner::Partner;

const PARTNER_NOT_FOUND: &str = "partner not found";
const PARTNER_NOT_ACTIVE: &str = "partner is not active";
const LIMIT_NOT_POSITIVE: &str = "limit must be greater than 0";
const UPDATE_FAILED: &str = "failed to update partner";

/// Request to give a partner a new promo-code limit.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetPartnerLimitRequest {
    /// Maximum number of promo codes for the new period.
    #[validate(range(min = 1, message = "limit must be greater than 0"))]
    pub limit: i32,
    /// When the new limit expires.
    pub end_date: DateTime<Utc>,
}

/// Applies and cancels partner promo-code limits.
///
/// Every operation follows the same pipeline: load the partner into a
/// local value, validate, mutate the local value, persist it. Nothing is
/// returned to the caller unless the store accepted the write.
#[derive(Clone)]
pub struct PartnerLimitService {
    store: Arc<dyn PartnerStore>,
}

impl std::fmt::Debug for PartnerLimitService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartnerLimitService").finish_non_exhaustive()
    }
}

impl PartnerLimitService {
    /// Creates a new limit service.
    pub fn new(store: Arc<dyn PartnerStore>) -> Self {
        Self { store }
    }

    /// Sets a new promo-code limit for a partner.
    ///
    /// Cancels every currently active limit, appends the new one, and
    /// resets the partner's issued-codes counter to zero.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the partner does not exist.
    /// - `InvalidState` if the partner is inactive.
    /// - `InvalidArgument` if `req.limit` is not positive.
    /// - `Persistence` if the store rejected the write.
    pub async fn set_limit(
        &self,
        partner_id: PartnerId,
        req: SetPartnerLimitRequest,
    ) -> Result<Partner, AppError> {
        let mut partner = self.load_active_partner(partner_id).await?;

        req.validate()
            .map_err(|_| AppError::invalid_argument(LIMIT_NOT_POSITIVE))?;

        let now = Utc::now();
        let superseded = partner.active_limits().count();
        let limit_id = partner.apply_new_limit(req.limit, req.end_date, now);

        self.persist(&partner).await?;

        info!(
            partner_id = %partner_id,
            limit_id = %limit_id,
            limit = req.limit,
            end_date = %req.end_date,
            superseded,
            "Partner promo-code limit set"
        );

        Ok(partner)
    }

    /// Cancels the partner's active limit without setting a new one.
    ///
    /// The issued-codes counter is left untouched. When no limit is active
    /// the partner is returned as loaded and nothing is written.
    pub async fn cancel_limit(&self, partner_id: PartnerId) -> Result<Partner, AppError> {
        let mut partner = self.load_active_partner(partner_id).await?;

        let cancelled = partner.cancel_active_limits(Utc::now());
        if cancelled == 0 {
            return Ok(partner);
        }

        self.persist(&partner).await?;

        info!(partner_id = %partner_id, cancelled, "Partner promo-code limit cancelled");
        Ok(partner)
    }

    async fn load_active_partner(&self, partner_id: PartnerId) -> Result<Partner, AppError> {
        let partner = self
            .store
            .find_by_id(partner_id)
            .await?
            .ok_or_else(|| AppError::not_found(PARTNER_NOT_FOUND))?;

        if !partner.is_active {
            return Err(AppError::invalid_state(PARTNER_NOT_ACTIVE));
        }

        Ok(partner)
    }

    async fn persist(&self, partner: &Partner) -> Result<(), AppError> {
        self.store.update(partner).await.map_err(|e| {
            warn!(partner_id = %partner.id, error = %e, "Partner update failed");
            AppError::with_source(ErrorKind::Persistence, UPDATE_FAILED, e)
        })
    }
}
