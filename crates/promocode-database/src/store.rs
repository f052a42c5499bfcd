//! Persistence contract for partner aggregates.

use async_trait::async_trait;

use promocode_core::result::AppResult;
use promocode_core::types::PartnerId;
use promocode_entity::partner::Partner;

/// Loads and saves whole [`Partner`] aggregates, limits included.
///
/// Implementations must replace the partner's counter and limit
/// collection atomically in [`PartnerStore::update`] and must serialize
/// concurrent writes to the same partner so that no commit leaves more
/// than one active limit behind.
#[async_trait]
pub trait PartnerStore: Send + Sync + 'static {
    /// Find a partner by ID. No side effects.
    async fn find_by_id(&self, id: PartnerId) -> AppResult<Option<Partner>>;

    /// List all partners.
    async fn find_all(&self) -> AppResult<Vec<Partner>>;

    /// Persist the full aggregate. Fails with `ErrorKind::Persistence`
    /// when the write could not be committed.
    async fn update(&self, partner: &Partner) -> AppResult<()>;
}
