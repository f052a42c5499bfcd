//! # promocode-database
//!
//! PostgreSQL connection management, the migration runner, and the
//! [`PartnerStore`] persistence contract with its implementations.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::PartnerStore;
