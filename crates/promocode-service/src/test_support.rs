//! Builders and store doubles shared by the service tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use promocode_core::error::AppError;
use promocode_core::result::AppResult;
use promocode_core::types::PartnerId;
use promocode_database::PartnerStore;
use promocode_database::repositories::MemoryPartnerRepository;
use promocode_entity::partner::{Partner, PartnerPromoCodeLimit};

/// Fluent builder for partner aggregates.
pub struct PartnerBuilder {
    partner: Partner,
}

impl PartnerBuilder {
    pub fn new() -> Self {
        Self {
            partner: Partner::new("Cats & Dogs"),
        }
    }

    pub fn id(mut self, id: PartnerId) -> Self {
        self.partner.id = id;
        for limit in &mut self.partner.limits {
            limit.partner_id = id;
        }
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.partner.is_active = is_active;
        self
    }

    pub fn issued(mut self, count: i32) -> Self {
        self.partner.number_issued_promo_codes = count;
        self
    }

    /// Append an active limit created yesterday and expiring tomorrow.
    pub fn with_active_limit(mut self, limit: i32) -> Self {
        let now = Utc::now();
        self.partner.limits.push(PartnerPromoCodeLimit::new(
            self.partner.id,
            limit,
            now - Duration::days(1),
            now + Duration::days(1),
        ));
        self
    }

    /// Append a limit cancelled two days ago.
    pub fn with_cancelled_limit(mut self, limit: i32) -> Self {
        let now = Utc::now();
        let mut record = PartnerPromoCodeLimit::new(
            self.partner.id,
            limit,
            now - Duration::days(10),
            now + Duration::days(10),
        );
        record.cancel_date = Some(now - Duration::days(2));
        self.partner.limits.push(record);
        self
    }

    pub fn build(self) -> Partner {
        self.partner
    }
}

/// Store double whose reads succeed and whose writes always fail.
#[derive(Debug, Default)]
pub struct FailingPartnerStore {
    pub inner: MemoryPartnerRepository,
    pub update_calls: AtomicUsize,
}

impl FailingPartnerStore {
    pub fn with(partner: Partner) -> Arc<Self> {
        let store = Self::default();
        store.inner.insert(partner);
        Arc::new(store)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PartnerStore for FailingPartnerStore {
    async fn find_by_id(&self, id: PartnerId) -> AppResult<Option<Partner>> {
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self) -> AppResult<Vec<Partner>> {
        self.inner.find_all().await
    }

    async fn update(&self, _partner: &Partner) -> AppResult<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::persistence("connection reset by peer"))
    }
}

/// Memory store pre-loaded with the given partners.
pub fn memory_store(partners: impl IntoIterator<Item = Partner>) -> Arc<MemoryPartnerRepository> {
    let store = MemoryPartnerRepository::new();
    for partner in partners {
        store.insert(partner);
    }
    Arc::new(store)
}
