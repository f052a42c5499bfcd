//! Partner store implementations.

pub mod memory;
pub mod partner;

pub use memory::MemoryPartnerRepository;
pub use partner::PartnerRepository;
