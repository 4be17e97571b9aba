//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by the
//! CRUD handlers. Schema-shape validation (types, closed enums) happens at
//! serde level; these helpers cover the range rules on top of it.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: category, menu, product, staff, customer, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, remarks
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, product number, shift times, etc.
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a money/amount field (price, tax, tip, salary, advance fee): ≥ 0.
pub fn validate_non_negative(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(())
}

/// Validate an integer count field (quantity, capacity, max_persons): ≥ min.
pub fn validate_min_int(value: i64, min: i64, field: &str) -> Result<(), AppError> {
    if value < min {
        return Err(AppError::validation(format!(
            "{field} must be at least {min}"
        )));
    }
    Ok(())
}
