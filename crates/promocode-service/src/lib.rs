//! # promocode-service
//!
//! Business logic services for PromoCode Factory. Each service receives
//! its store at construction time through an `Arc` and implements one
//! application-level use case per method.

pub mod partner;

#[cfg(test)]
pub(crate) mod test_support;

pub use partner::{PartnerLimitService, PartnerService, SetPartnerLimitRequest};
