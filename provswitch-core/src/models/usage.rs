//! Usage-query types.
//!
//! This module contains types for the per-provider usage-query protocol:
//! - [`UsageScript`] - The user-authored script descriptor
//! - [`UsageResult`] - The outcome of one query
//! - [`UsageData`] - One normalized plan entry
//! - [`UsageTier`] - Render tier derived from a plan entry

use serde::{Deserialize, Serialize};

// ============================================================================
// Usage Script
// ============================================================================

/// Per-provider usage-query script descriptor.
///
/// `code` is a textual object-literal with two members: `request` (method,
/// url, headers, optional body, with `{{apiKey}}`/`{{baseUrl}}` placeholders)
/// and `extractor` (a function mapping the raw JSON response to plan fields).
/// The executor substitutes the placeholders and runs both under its own
/// sandbox; this crate only validates the descriptor locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageScript {
    /// Whether automatic usage queries are enabled for the provider.
    pub enabled: bool,
    /// Script language; always "javascript".
    pub language: String,
    /// The descriptor source text.
    pub code: String,
    /// Request timeout in seconds (2-30, default 10).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl UsageScript {
    /// Creates an enabled script with the given code and default timeout.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            enabled: true,
            language: "javascript".to_string(),
            code: code.into(),
            timeout: None,
        }
    }
}

// ============================================================================
// Usage Result & Plan Entries
// ============================================================================

/// Outcome of one usage query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageResult {
    /// Whether the query succeeded end to end.
    pub success: bool,
    /// Plan entries; a successful query may return several.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<UsageData>>,
    /// Error message when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UsageResult {
    /// Creates a successful result.
    pub fn ok(data: Vec<UsageData>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Creates a failed result.
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// One normalized usage/quota plan entry. All fields are optional; absent
/// fields render nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageData {
    /// Plan display name.
    #[serde(rename = "planName", skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
    /// Free-form extra line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
    /// Whether the plan is still valid; absent means valid.
    #[serde(rename = "isValid", skip_serializing_if = "Option::is_none")]
    pub is_valid: Option<bool>,
    /// Message shown when the plan is invalid.
    #[serde(rename = "invalidMessage", skip_serializing_if = "Option::is_none")]
    pub invalid_message: Option<String>,
    /// Total quota; -1 means unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    /// Amount used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used: Option<f64>,
    /// Amount remaining.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<f64>,
    /// Unit of measurement (e.g. "USD", "credits").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

// ============================================================================
// Render Tiers
// ============================================================================

/// The marker rendered for an unbounded total (`total == -1`).
pub const UNBOUNDED_MARKER: &str = "∞";

/// Sentinel total value meaning "no limit".
pub const UNBOUNDED_TOTAL: f64 = -1.0;

/// Render tier for one plan entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageTier {
    /// The plan is expired or invalid; alert styling, overrides other tiers.
    Expired,
    /// Remaining quota is below 10% of the total; warning styling.
    Warning,
    /// Normal/positive styling.
    Normal,
}

impl UsageData {
    /// Returns the render tier for this entry.
    ///
    /// A plan is expired iff `is_valid` is explicitly false (absent or true
    /// both mean valid). Otherwise, it warns when `remaining` drops below
    /// 10% of the total (falling back to `remaining` itself when no total
    /// is reported).
    pub fn tier(&self) -> UsageTier {
        if self.is_valid == Some(false) {
            return UsageTier::Expired;
        }
        if let Some(remaining) = self.remaining {
            let base = self.total.unwrap_or(remaining);
            if remaining < 0.1 * base {
                return UsageTier::Warning;
            }
        }
        UsageTier::Normal
    }

    /// Formats the total for display; -1 renders as the unbounded marker.
    pub fn display_total(&self) -> Option<String> {
        self.total.map(format_quota)
    }

    /// Formats the remaining amount for display.
    pub fn display_remaining(&self) -> Option<String> {
        self.remaining.map(format_quota)
    }
}

/// Formats a quota amount; the -1 sentinel becomes the unbounded marker.
pub fn format_quota(value: f64) -> String {
    #[allow(clippy::float_cmp)]
    if value == UNBOUNDED_TOTAL {
        return UNBOUNDED_MARKER.to_string();
    }
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

// ============================================================================
// Tests
// ============================================================================
