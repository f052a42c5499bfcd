//! # promocode-api
//!
//! HTTP API layer for PromoCode Factory built on Axum.
//!
//! Provides the partner endpoints, request logging middleware, DTOs, and
//! the mapping from [`promocode_core::AppError`] to HTTP responses.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
