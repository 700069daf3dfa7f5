//! Medication field rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Allowed medication name characters: letters, digits, underscore, hyphen.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"));

/// Allowed medication code characters: uppercase letters, digits, underscore.
static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9_]+$").expect("valid regex"));

/// Validate a medication name against the allowed pattern.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.is_empty() || !NAME_RE.is_match(name) {
        return Err(CoreError::InvalidInput(format!(
            "medication name '{name}' must match [A-Za-z0-9_-]+"
        )));
    }
    Ok(())
}

/// Validate a medication code against the allowed pattern.
pub fn validate_code(code: &str) -> Result<(), CoreError> {
    if code.is_empty() || !CODE_RE.is_match(code) {
        return Err(CoreError::InvalidInput(format!(
            "medication code '{code}' must match [A-Z0-9_]+"
        )));
    }
    Ok(())
}

/// Validate a medication weight. Zero and negative weights are rejected.
pub fn validate_weight(weight: f64) -> Result<(), CoreError> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "medication weight must be a positive number of grams, got {weight}"
        )));
    }
    Ok(())
}
