//! Provider-related types.
//!
//! This module contains types for the per-target provider collections:
//! - [`AppKind`] - Tag identifying the external integration target
//! - [`Provider`] - One switchable credential/config set
//! - [`ProviderMeta`] - Metadata kept only in the local store
//! - [`ProviderManager`] - The owning collection with the "current" marker

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::CoreError;
use crate::models::usage::UsageScript;

// ============================================================================
// App Kind
// ============================================================================

/// Supported external integration targets.
///
/// Every setting, provider, and usage query is tagged with the target it
/// applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppKind {
    /// Claude Code
    Claude,
    /// OpenAI Codex
    Codex,
}

impl AppKind {
    /// Returns the display name for this target.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Claude => "Claude",
            Self::Codex => "Codex",
        }
    }

    /// Returns the lowercase name used in store keys and CLI arguments.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Codex => "codex",
        }
    }

    /// Returns all supported targets.
    pub fn all() -> &'static [AppKind] {
        &[Self::Claude, Self::Codex]
    }
}

impl std::fmt::Display for AppKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Provider
// ============================================================================

/// One switchable credential/config set for an external target.
///
/// `settings_config` is the opaque target-specific config blob; its schema
/// depends on which [`AppKind`] collection owns the provider. The "current"
/// flag lives on the owning [`ProviderManager`], never on the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    /// Unique, stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Target-specific configuration blob.
    #[serde(rename = "settingsConfig")]
    pub settings_config: Value,
    /// Optional website URL for the provider's console.
    #[serde(rename = "websiteUrl", skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    /// Optional category label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Creation timestamp (Unix millis).
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    /// Display position assigned by a reorder; contiguous and 0-based once
    /// any reorder has happened.
    #[serde(rename = "sortIndex", skip_serializing_if = "Option::is_none")]
    pub sort_index: Option<usize>,
    /// Metadata kept only in the local store, never written to live configs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ProviderMeta>,
    /// Whether this provider participates in proxy-mode failover.
    #[serde(rename = "proxyEnabled", skip_serializing_if = "Option::is_none")]
    pub proxy_enabled: Option<bool>,
}

impl Provider {
    /// Creates a provider with an existing id.
    pub fn with_id(id: String, name: String, settings_config: Value) -> Self {
        Self {
            id,
            name,
            settings_config,
            website_url: None,
            category: None,
            created_at: Some(chrono::Utc::now().timestamp_millis()),
            sort_index: None,
            meta: None,
            proxy_enabled: None,
        }
    }

    /// Returns the usage script descriptor, if one is configured.
    pub fn usage_script(&self) -> Option<&UsageScript> {
        self.meta.as_ref().and_then(|m| m.usage_script.as_ref())
    }

    /// Extracts the API key and base URL from the target-specific config.
    ///
    /// The schema depends on the target:
    /// - Claude: `env.ANTHROPIC_AUTH_TOKEN` / `env.ANTHROPIC_BASE_URL`
    /// - Codex: `auth.OPENAI_API_KEY` plus `base_url = "..."` inside the
    ///   `config` TOML text
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidConfig` if the expected keys are missing.
    pub fn credentials(&self, app: AppKind) -> Result<(String, String), CoreError> {
        match app {
            AppKind::Claude => {
                let env = self
                    .settings_config
                    .get("env")
                    .and_then(Value::as_object)
                    .ok_or_else(|| CoreError::InvalidConfig("missing env section".into()))?;

                let api_key = env
                    .get("ANTHROPIC_AUTH_TOKEN")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        CoreError::InvalidConfig("missing ANTHROPIC_AUTH_TOKEN".into())
                    })?;
                let base_url = env
                    .get("ANTHROPIC_BASE_URL")
                    .and_then(Value::as_str)
                    .ok_or_else(|| CoreError::InvalidConfig("missing ANTHROPIC_BASE_URL".into()))?;

                Ok((api_key.to_string(), base_url.to_string()))
            }
            AppKind::Codex => {
                let auth = self
                    .settings_config
                    .get("auth")
                    .and_then(Value::as_object)
                    .ok_or_else(|| CoreError::InvalidConfig("missing auth section".into()))?;

                let api_key = auth
                    .get("OPENAI_API_KEY")
                    .and_then(Value::as_str)
                    .ok_or_else(|| CoreError::InvalidConfig("missing OPENAI_API_KEY".into()))?;

                let config_toml = self
                    .settings_config
                    .get("config")
                    .and_then(Value::as_str)
                    .unwrap_or("");
                let base_url = parse_toml_base_url(config_toml).ok_or_else(|| {
                    CoreError::InvalidConfig("missing base_url in config.toml".into())
                })?;

                Ok((api_key.to_string(), base_url))
            }
        }
    }
}

/// Pulls `base_url = "..."` out of a Codex config.toml text.
fn parse_toml_base_url(config: &str) -> Option<String> {
    for line in config.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("base_url") {
            let rest = rest.trim_start();
            let rest = rest.strip_prefix('=')?.trim();
            let unquoted = rest
                .strip_prefix('"')
                .and_then(|r| r.split('"').next())
                .or_else(|| rest.strip_prefix('\'').and_then(|r| r.split('\'').next()))?;
            if !unquoted.is_empty() {
                return Some(unquoted.to_string());
            }
        }
    }
    None
}

// ============================================================================
// Provider Meta
// ============================================================================

/// A user-defined API endpoint recorded for quick switching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomEndpoint {
    /// Endpoint base URL.
    pub url: String,
    /// When the endpoint was added (Unix millis).
    #[serde(rename = "addedAt", skip_serializing_if = "Option::is_none")]
    pub added_at: Option<i64>,
}

/// Provider metadata, stored only in the local config store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderMeta {
    /// Custom endpoints, deduplicated by URL.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub custom_endpoints: HashMap<String, CustomEndpoint>,
    /// Usage query script descriptor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_script: Option<UsageScript>,
}

// ============================================================================
// Provider Manager
// ============================================================================

/// The owning collection of providers for one target.
///
/// Exactly one provider is marked "current"; this crate only ever reads the
/// marker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderManager {
    /// Providers keyed by id.
    pub providers: HashMap<String, Provider>,
    /// Id of the currently active provider (empty = none selected yet).
    pub current: String,
}

impl ProviderManager {
    /// Looks up a provider by id.
    pub fn get(&self, id: &str) -> Option<&Provider> {
        self.providers.get(id)
    }

    /// Returns true if the given provider is the current one.
    pub fn is_current(&self, id: &str) -> bool {
        !self.current.is_empty() && self.current == id
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_claude_credentials() {
        let provider = Provider::with_id(
            "a".into(),
            "A".into(),
            json!({"env": {"ANTHROPIC_AUTH_TOKEN": "sk-test", "ANTHROPIC_BASE_URL": "https://api.example.com"}}),
        );
        let (key, url) = provider.credentials(AppKind::Claude).unwrap();
        assert_eq!(key, "sk-test");
        assert_eq!(url, "https://api.example.com");
    }

    #[test]
    fn test_claude_credentials_missing_token() {
        let provider = Provider::with_id("a".into(), "A".into(), json!({"env": {}}));
        assert!(provider.credentials(AppKind::Claude).is_err());
    }

    #[test]
    fn test_codex_credentials_from_toml() {
        let provider = Provider::with_id(
            "b".into(),
            "B".into(),
            json!({
                "auth": {"OPENAI_API_KEY": "sk-codex"},
                "config": "model = \"o3\"\nbase_url = \"https://codex.example.com/v1\"\n"
            }),
        );
        let (key, url) = provider.credentials(AppKind::Codex).unwrap();
        assert_eq!(key, "sk-codex");
        assert_eq!(url, "https://codex.example.com/v1");
    }

    #[test]
    fn test_codex_credentials_missing_base_url() {
        let provider = Provider::with_id(
            "b".into(),
            "B".into(),
            json!({"auth": {"OPENAI_API_KEY": "sk"}, "config": "model = \"o3\""}),
        );
        assert!(provider.credentials(AppKind::Codex).is_err());
    }

    #[test]
    fn test_provider_serde_wire_format() {
        let provider = Provider {
            id: "p1".into(),
            name: "Test".into(),
            settings_config: json!({}),
            website_url: Some("https://example.com".into()),
            category: None,
            created_at: Some(1_700_000_000_000),
            sort_index: Some(2),
            meta: None,
            proxy_enabled: None,
        };

        let value = serde_json::to_value(&provider).unwrap();
        assert_eq!(value["websiteUrl"], "https://example.com");
        assert_eq!(value["createdAt"], 1_700_000_000_000_i64);
        assert_eq!(value["sortIndex"], 2);
        assert!(value.get("category").is_none());
    }

    #[test]
    fn test_manager_current_marker() {
        let mut manager = ProviderManager::default();
        manager.providers.insert(
            "p1".into(),
            Provider::with_id("p1".into(), "One".into(), json!({})),
        );
        assert!(!manager.is_current("p1"));
        manager.current = "p1".into();
        assert!(manager.is_current("p1"));
    }
}
