//! Request descriptor extracted from a usage script.
//!
//! Key Types:
//! - [`UsageRequest`]: the HTTP request config a script's `request` member
//!   evaluates to
//! - [`substitute_placeholders`]: credential injection into script source

use serde::Deserialize;
use std::collections::HashMap;

/// Placeholder in script source replaced with the provider's API key.
pub const API_KEY_PLACEHOLDER: &str = "{{apiKey}}";

/// Placeholder in script source replaced with the provider's base URL.
pub const BASE_URL_PLACEHOLDER: &str = "{{baseUrl}}";

/// HTTP request configuration produced by a script's `request` member.
#[derive(Debug, Clone, Deserialize)]
pub struct UsageRequest {
    /// Absolute request URL.
    pub url: String,
    /// HTTP method; defaults to GET when absent.
    #[serde(default = "default_method")]
    pub method: String,
    /// Request headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Optional request body, sent verbatim.
    #[serde(default)]
    pub body: Option<String>,
}

fn default_method() -> String {
    "GET".to_string()
}

/// Replaces credential placeholders in script source.
///
/// Substitution is plain text replacement over the whole source, so the
/// placeholders work anywhere, including inside the extractor body. A
/// missing base URL substitutes the empty string.
pub fn substitute_placeholders(code: &str, api_key: &str, base_url: Option<&str>) -> String {
    code.replace(API_KEY_PLACEHOLDER, api_key)
        .replace(BASE_URL_PLACEHOLDER, base_url.unwrap_or(""))
}

// ============================================================================
// Tests
// ============================================================================
