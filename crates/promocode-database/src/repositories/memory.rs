//! In-memory partner store using `dashmap`.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use promocode_core::error::AppError;
use promocode_core::result::AppResult;
use promocode_core::types::PartnerId;
use promocode_entity::partner::Partner;

use crate::store::PartnerStore;

/// Partner store kept entirely in process memory.
///
/// Aggregates are cloned on the way in and out, so callers never share
/// state with the store. Each `update` replaces the whole entry under the
/// map's shard lock after checking it against the stored aggregate, so a
/// writer holding an outdated copy cannot drop committed limits.
#[derive(Debug, Clone, Default)]
pub struct MemoryPartnerRepository {
    partners: Arc<DashMap<PartnerId, Partner>>,
}

impl MemoryPartnerRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a partner.
    pub fn insert(&self, partner: Partner) {
        self.partners.insert(partner.id, partner);
    }

    /// Whether the store holds no partners.
    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }
}

#[async_trait]
impl PartnerStore for MemoryPartnerRepository {
    async fn find_by_id(&self, id: PartnerId) -> AppResult<Option<Partner>> {
        Ok(self.partners.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_all(&self) -> AppResult<Vec<Partner>> {
        let mut partners: Vec<Partner> = self
            .partners
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        partners.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(partners)
    }

    async fn update(&self, partner: &Partner) -> AppResult<()> {
        match self.partners.get_mut(&partner.id) {
            Some(mut entry) => {
                check_update(entry.value(), partner)?;
                *entry = partner.clone();
                Ok(())
            }
            None => Err(AppError::persistence(format!(
                "Partner {} no longer exists",
                partner.id
            ))),
        }
    }
}

/// Rejects writes that the PostgreSQL schema would refuse: limits removed
/// from the aggregate, limits owned by another partner, or more than one
/// active limit.
fn check_update(stored: &Partner, incoming: &Partner) -> AppResult<()> {
    let incoming_ids: HashSet<_> = incoming.limits.iter().map(|l| l.id).collect();
    if let Some(missing) = stored.limits.iter().find(|l| !incoming_ids.contains(&l.id)) {
        return Err(AppError::persistence(format!(
            "Partner {} update would drop limit {}",
            incoming.id, missing.id
        )));
    }

    if let Some(foreign) = incoming.limits.iter().find(|l| l.partner_id != incoming.id) {
        return Err(AppError::persistence(format!(
            "Limit {} belongs to partner {}",
            foreign.id, foreign.partner_id
        )));
    }

    if incoming.active_limits().count() > 1 {
        return Err(AppError::persistence(format!(
            "Partner {} would have more than one active limit",
            incoming.id
        )));
    }

    Ok(())
}
