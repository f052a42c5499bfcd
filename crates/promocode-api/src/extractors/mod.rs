//! Request extraction helpers.

pub mod path;

pub use path::parse_id;
