//! Global application settings.
//!
//! Settings are loaded once per editing session from a partially-populated
//! [`SettingsPatch`]; every optional field is back-filled through an
//! explicit, named default-resolution function (primary field, then a legacy
//! alias where one exists, then a hardcoded default). The resolution order
//! is documented on each function and nowhere else.

use serde::{Deserialize, Serialize};

// ============================================================================
// Enums
// ============================================================================

/// Global switch between writing target config directly and routing through
/// the local proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OperationMode {
    /// Write the active provider's config into the target's live files.
    #[default]
    Write,
    /// Route requests through the local failover proxy.
    Proxy,
}

impl std::fmt::Display for OperationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationMode::Write => write!(f, "write"),
            OperationMode::Proxy => write!(f, "proxy"),
        }
    }
}

/// Display language. Chinese is the primary supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Simplified Chinese.
    #[default]
    Zh,
    /// English.
    En,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Zh => write!(f, "zh"),
            Language::En => write!(f, "en"),
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Global preferences, fully resolved.
///
/// The application-level config-directory override is *not* part of this
/// record; it lives in its own store because other subsystems resolve paths
/// against it at process start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Show the tray icon.
    pub show_in_tray: bool,
    /// Minimize to tray instead of quitting when the window closes.
    pub minimize_to_tray_on_close: bool,
    /// Apply the Claude plugin integration artifact on save.
    pub enable_claude_plugin_integration: bool,
    /// Override for the Claude config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claude_config_dir: Option<String>,
    /// Override for the Codex config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codex_config_dir: Option<String>,
    /// Display language.
    pub language: Language,
    /// Write vs proxy operation mode.
    pub operation_mode: OperationMode,
    /// Per-provider retry count used by the proxy.
    pub proxy_retry_count: u32,
}

impl Default for Settings {
    fn default() -> Self {
        SettingsPatch::default().resolve()
    }
}

// ============================================================================
// Settings Patch & Default Resolution
// ============================================================================

/// Partially-populated settings as read from disk or received over the
/// store boundary. Legacy aliases are accepted here and nowhere else.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    /// See [`Settings::show_in_tray`].
    pub show_in_tray: Option<bool>,
    /// See [`Settings::minimize_to_tray_on_close`].
    pub minimize_to_tray_on_close: Option<bool>,
    /// Legacy alias for `minimize_to_tray_on_close`.
    pub minimize_to_tray: Option<bool>,
    /// See [`Settings::enable_claude_plugin_integration`].
    pub enable_claude_plugin_integration: Option<bool>,
    /// See [`Settings::claude_config_dir`].
    pub claude_config_dir: Option<String>,
    /// See [`Settings::codex_config_dir`].
    pub codex_config_dir: Option<String>,
    /// See [`Settings::language`].
    pub language: Option<Language>,
    /// Legacy alias for `language`.
    pub lang: Option<Language>,
    /// See [`Settings::operation_mode`].
    pub operation_mode: Option<OperationMode>,
    /// See [`Settings::proxy_retry_count`].
    pub proxy_retry_count: Option<u32>,
}

impl SettingsPatch {
    /// Resolves the patch into complete settings, field by field.
    pub fn resolve(self) -> Settings {
        Settings {
            show_in_tray: resolve_show_in_tray(&self),
            minimize_to_tray_on_close: resolve_minimize_to_tray(&self),
            enable_claude_plugin_integration: resolve_plugin_integration(&self),
            language: resolve_language(&self),
            operation_mode: resolve_operation_mode(&self),
            proxy_retry_count: resolve_proxy_retry_count(&self),
            claude_config_dir: normalize_dir(self.claude_config_dir),
            codex_config_dir: normalize_dir(self.codex_config_dir),
        }
    }
}

impl From<Settings> for SettingsPatch {
    /// Builds a complete patch from resolved settings (legacy aliases unset).
    fn from(s: Settings) -> Self {
        Self {
            show_in_tray: Some(s.show_in_tray),
            minimize_to_tray_on_close: Some(s.minimize_to_tray_on_close),
            minimize_to_tray: None,
            enable_claude_plugin_integration: Some(s.enable_claude_plugin_integration),
            claude_config_dir: s.claude_config_dir,
            codex_config_dir: s.codex_config_dir,
            language: Some(s.language),
            lang: None,
            operation_mode: Some(s.operation_mode),
            proxy_retry_count: Some(s.proxy_retry_count),
        }
    }
}

/// Resolution: `showInTray`, else true.
fn resolve_show_in_tray(p: &SettingsPatch) -> bool {
    p.show_in_tray.unwrap_or(true)
}

/// Resolution: `minimizeToTrayOnClose`, else legacy `minimizeToTray`,
/// else true.
fn resolve_minimize_to_tray(p: &SettingsPatch) -> bool {
    p.minimize_to_tray_on_close
        .or(p.minimize_to_tray)
        .unwrap_or(true)
}

/// Resolution: `enableClaudePluginIntegration`, else false.
fn resolve_plugin_integration(p: &SettingsPatch) -> bool {
    p.enable_claude_plugin_integration.unwrap_or(false)
}

/// Resolution: `language`, else legacy `lang`, else Chinese.
fn resolve_language(p: &SettingsPatch) -> Language {
    p.language.or(p.lang).unwrap_or_default()
}

/// Resolution: `operationMode`, else write mode.
fn resolve_operation_mode(p: &SettingsPatch) -> OperationMode {
    p.operation_mode.unwrap_or_default()
}

/// Resolution: `proxyRetryCount`, else 3.
fn resolve_proxy_retry_count(p: &SettingsPatch) -> u32 {
    p.proxy_retry_count.unwrap_or(3)
}

/// Trims a directory override; blank values collapse to None.
pub fn normalize_dir(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch_resolves_to_defaults() {
        let settings = SettingsPatch::default().resolve();
        assert!(settings.show_in_tray);
        assert!(settings.minimize_to_tray_on_close);
        assert!(!settings.enable_claude_plugin_integration);
        assert_eq!(settings.language, Language::Zh);
        assert_eq!(settings.operation_mode, OperationMode::Write);
        assert_eq!(settings.proxy_retry_count, 3);
    }

    #[test]
    fn test_primary_field_wins_over_legacy_alias() {
        let patch = SettingsPatch {
            minimize_to_tray_on_close: Some(false),
            minimize_to_tray: Some(true),
            language: Some(Language::En),
            lang: Some(Language::Zh),
            ..SettingsPatch::default()
        };
        let settings = patch.resolve();
        assert!(!settings.minimize_to_tray_on_close);
        assert_eq!(settings.language, Language::En);
    }

    #[test]
    fn test_legacy_alias_used_when_primary_absent() {
        let patch = SettingsPatch {
            minimize_to_tray: Some(false),
            lang: Some(Language::En),
            ..SettingsPatch::default()
        };
        let settings = patch.resolve();
        assert!(!settings.minimize_to_tray_on_close);
        assert_eq!(settings.language, Language::En);
    }

    #[test]
    fn test_dir_overrides_normalized() {
        let patch = SettingsPatch {
            claude_config_dir: Some("  /opt/claude  ".into()),
            codex_config_dir: Some("   ".into()),
            ..SettingsPatch::default()
        };
        let settings = patch.resolve();
        assert_eq!(settings.claude_config_dir.as_deref(), Some("/opt/claude"));
        assert_eq!(settings.codex_config_dir, None);
    }

    #[test]
    fn test_patch_accepts_legacy_wire_names() {
        let json = r#"{"minimizeToTray": false, "lang": "en", "operationMode": "proxy"}"#;
        let patch: SettingsPatch = serde_json::from_str(json).unwrap();
        let settings = patch.resolve();
        assert!(!settings.minimize_to_tray_on_close);
        assert_eq!(settings.language, Language::En);
        assert_eq!(settings.operation_mode, OperationMode::Proxy);
    }

    #[test]
    fn test_settings_round_trip() {
        let mut settings = Settings::default();
        settings.operation_mode = OperationMode::Proxy;
        settings.claude_config_dir = Some("/tmp/claude".into());

        let json = serde_json::to_string(&settings).unwrap();
        let patch: SettingsPatch = serde_json::from_str(&json).unwrap();
        assert_eq!(patch.resolve(), settings);
    }
}
