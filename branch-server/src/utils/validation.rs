//! Request payload validation helpers

use super::{AppError, AppResult};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_NOTE_LEN: usize = 500;

/// Validate a required text field is non-empty and within length
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if trimmed.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} exceeds {max_len} characters"
        )));
    }
    Ok(())
}

/// Validate an optional text field's length
pub fn validate_optional_text(value: &Option<String>, field: &str, max_len: usize) -> AppResult<()> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} exceeds {max_len} characters"
        )));
    }
    Ok(())
}

/// Validate a count (party size, seat capacity) is strictly positive
pub fn validate_positive(value: i32, field: &str) -> AppResult<()> {
    if value <= 0 {
        return Err(AppError::validation(format!(
            "{field} must be positive, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Mesa 1", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(101), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_positive() {
        assert!(validate_positive(4, "people").is_ok());
        assert!(validate_positive(0, "people").is_err());
        assert!(validate_positive(-2, "people").is_err());
    }
}
