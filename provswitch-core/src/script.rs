//! Usage-script pre-validation.
//!
//! The checks here run before a script descriptor is persisted. They are
//! deliberately heuristic, a fast pre-check that catches blank or obviously
//! incomplete scripts; the executor independently validates the request
//! shape and the extractor's output at query time.

use crate::error::CoreError;
use crate::models::UsageScript;

/// Minimum allowed script timeout in seconds.
pub const TIMEOUT_MIN_SECS: u64 = 2;

/// Maximum allowed script timeout in seconds.
pub const TIMEOUT_MAX_SECS: u64 = 30;

/// Default script timeout in seconds.
pub const TIMEOUT_DEFAULT_SECS: u64 = 10;

/// Returns the timeout the executor should enforce, clamped into bounds.
pub fn effective_timeout(script: &UsageScript) -> u64 {
    script
        .timeout
        .unwrap_or(TIMEOUT_DEFAULT_SECS)
        .clamp(TIMEOUT_MIN_SECS, TIMEOUT_MAX_SECS)
}

/// Validates a usage script before persistence.
///
/// A disabled script is always acceptable. An enabled script must carry
/// non-blank code containing the literal token `return` (the extractor has
/// to return something), and any declared timeout must be within bounds.
///
/// # Errors
///
/// Returns `CoreError::InvalidScript` describing the first violation.
pub fn validate_usage_script(script: &UsageScript) -> Result<(), CoreError> {
    if !script.enabled {
        return Ok(());
    }

    if script.code.trim().is_empty() {
        return Err(CoreError::InvalidScript(
            "script code must not be empty when enabled".to_string(),
        ));
    }

    if !script.code.contains("return") {
        return Err(CoreError::InvalidScript(
            "extractor must contain a return statement".to_string(),
        ));
    }

    if let Some(timeout) = script.timeout {
        if !(TIMEOUT_MIN_SECS..=TIMEOUT_MAX_SECS).contains(&timeout) {
            return Err(CoreError::InvalidScript(format!(
                "timeout {timeout}s out of range [{TIMEOUT_MIN_SECS}, {TIMEOUT_MAX_SECS}]"
            )));
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
