//! Partner services.

pub mod limit;
pub mod service;

pub use limit::{PartnerLimitService, SetPartnerLimitRequest};
pub use service::PartnerService;
