//! # promocode-entity
//!
//! Domain entity models for PromoCode Factory. Every struct in this crate
//! represents a database table row or a domain aggregate. Database rows
//! derive `sqlx::FromRow`; collections owned by an aggregate are skipped
//! by the row mapping and attached by the repository.

pub mod partner;
