//! Partner domain entities.

pub mod limit;
pub mod model;

pub use limit::PartnerPromoCodeLimit;
pub use model::Partner;
