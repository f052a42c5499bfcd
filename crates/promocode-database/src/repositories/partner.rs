//! PostgreSQL partner repository.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use promocode_core::error::{AppError, ErrorKind};
use promocode_core::result::AppResult;
use promocode_core::types::PartnerId;
use promocode_entity::partner::{Partner, PartnerPromoCodeLimit};

use crate::store::PartnerStore;

/// Partner store backed by the `partners` and `partner_promo_code_limits`
/// tables.
#[derive(Debug, Clone)]
pub struct PartnerRepository {
    pool: PgPool,
}

impl PartnerRepository {
    /// Create a new partner repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn find_limits(&self, partner_id: PartnerId) -> AppResult<Vec<PartnerPromoCodeLimit>> {
        sqlx::query_as::<_, PartnerPromoCodeLimit>(
            "SELECT * FROM partner_promo_code_limits WHERE partner_id = $1 \
             ORDER BY create_date ASC, id ASC",
        )
        .bind(partner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Persistence, "Failed to load partner limits", e)
        })
    }
}

#[async_trait]
impl PartnerStore for PartnerRepository {
    async fn find_by_id(&self, id: PartnerId) -> AppResult<Option<Partner>> {
        let partner = sqlx::query_as::<_, Partner>("SELECT * FROM partners WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to find partner", e))?;

        let Some(mut partner) = partner else {
            return Ok(None);
        };
        partner.limits = self.find_limits(id).await?;

        Ok(Some(partner))
    }

    async fn find_all(&self) -> AppResult<Vec<Partner>> {
        let mut partners = sqlx::query_as::<_, Partner>("SELECT * FROM partners ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to list partners", e))?;

        let limits = sqlx::query_as::<_, PartnerPromoCodeLimit>(
            "SELECT * FROM partner_promo_code_limits ORDER BY create_date ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Persistence, "Failed to list partner limits", e)
        })?;

        let mut by_partner: HashMap<PartnerId, Vec<PartnerPromoCodeLimit>> = HashMap::new();
        for limit in limits {
            by_partner.entry(limit.partner_id).or_default().push(limit);
        }
        for partner in &mut partners {
            partner.limits = by_partner.remove(&partner.id).unwrap_or_default();
        }

        Ok(partners)
    }

    async fn update(&self, partner: &Partner) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Persistence, "Failed to begin transaction", e)
        })?;

        let locked: Option<PartnerId> =
            sqlx::query_scalar("SELECT id FROM partners WHERE id = $1 FOR UPDATE")
                .bind(partner.id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Persistence, "Failed to lock partner", e)
                })?;
        if locked.is_none() {
            return Err(AppError::persistence(format!(
                "Partner {} no longer exists",
                partner.id
            )));
        }

        sqlx::query(
            "UPDATE partners SET name = $2, is_active = $3, number_issued_promo_codes = $4 \
             WHERE id = $1",
        )
        .bind(partner.id)
        .bind(&partner.name)
        .bind(partner.is_active)
        .bind(partner.number_issued_promo_codes)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to update partner", e))?;

        // Collection order puts cancellations ahead of the new active limit,
        // which keeps the partial unique index satisfied statement by statement.
        for limit in &partner.limits {
            let written = sqlx::query(
                "INSERT INTO partner_promo_code_limits \
                 (id, partner_id, limit_value, create_date, end_date, cancel_date) \
                 VALUES ($1, $2, $3, $4, $5, $6) \
                 ON CONFLICT (id) DO UPDATE \
                 SET cancel_date = COALESCE(partner_promo_code_limits.cancel_date, EXCLUDED.cancel_date) \
                 WHERE partner_promo_code_limits.partner_id = EXCLUDED.partner_id",
            )
            .bind(limit.id)
            .bind(partner.id)
            .bind(limit.limit)
            .bind(limit.create_date)
            .bind(limit.end_date)
            .bind(limit.cancel_date)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Persistence, "Failed to save partner limit", e)
            })?;

            if written.rows_affected() == 0 {
                return Err(AppError::persistence(format!(
                    "Limit {} belongs to another partner",
                    limit.id
                )));
            }
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Persistence, "Failed to commit partner update", e)
        })?;

        debug!(partner_id = %partner.id, limits = partner.limits.len(), "Partner persisted");
        Ok(())
    }
}
