//! HTTP handlers for customers and reservations.

pub mod customer;
pub mod reservation;
pub use customer::*;
pub use reservation::*;

use crate::error::AppError;

/// Parse the `:id` path segment.
pub(crate) fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {}", id_str)))
}

/// Blank form fields are stored as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
