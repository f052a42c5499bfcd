//! Partner read operations.

use std::sync::Arc;

use promocode_core::error::AppError;
use promocode_core::types::{PartnerId, PartnerLimitId};
use promocode_database::PartnerStore;
use promocode_entity::partner::{Partner, PartnerPromoCodeLimit};

/// Lists partners and looks up individual partners and their limits.
#[derive(Clone)]
pub struct PartnerService {
    store: Arc<dyn PartnerStore>,
}

impl std::fmt::Debug for PartnerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartnerService").finish_non_exhaustive()
    }
}

impl PartnerService {
    /// Creates a new partner service.
    pub fn new(store: Arc<dyn PartnerStore>) -> Self {
        Self { store }
    }

    /// Lists all partners with their limit history.
    pub async fn list_partners(&self) -> Result<Vec<Partner>, AppError> {
        self.store.find_all().await
    }

    /// Gets a partner by ID.
    pub async fn get_partner(&self, partner_id: PartnerId) -> Result<Partner, AppError> {
        self.store
            .find_by_id(partner_id)
            .await?
            .ok_or_else(|| AppError::not_found("partner not found"))
    }

    /// Gets one limit record belonging to the given partner.
    pub async fn get_limit(
        &self,
        partner_id: PartnerId,
        limit_id: PartnerLimitId,
    ) -> Result<PartnerPromoCodeLimit, AppError> {
        let partner = self.get_partner(partner_id).await?;

        partner
            .limit(limit_id)
            .cloned()
            .ok_or_else(|| AppError::not_found("limit not found"))
    }
}
