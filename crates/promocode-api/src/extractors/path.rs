//! Typed path parameter helpers.

use std::str::FromStr;

use promocode_core::error::AppError;

/// Parses a typed identifier from a path segment.
pub fn parse_id<T: FromStr>(s: &str) -> Result<T, AppError> {
    s.parse()
        .map_err(|_| AppError::invalid_argument(format!("Invalid identifier: {s}")))
}
