//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use promocode_core::config::AppConfig;
use promocode_database::PartnerStore;
use promocode_service::{PartnerLimitService, PartnerService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Partner read service
    pub partner_service: Arc<PartnerService>,
    /// Partner limit service
    pub partner_limit_service: Arc<PartnerLimitService>,
}

impl AppState {
    /// Wire the services on top of a partner store.
    pub fn new(config: AppConfig, store: Arc<dyn PartnerStore>) -> Self {
        Self {
            config: Arc::new(config),
            partner_service: Arc::new(PartnerService::new(Arc::clone(&store))),
            partner_limit_service: Arc::new(PartnerLimitService::new(store)),
        }
    }
}
