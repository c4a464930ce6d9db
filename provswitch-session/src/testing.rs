//! Recording host mock shared by the session tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use provswitch_core::{
    AppKind, Language, OperationMode, Provider, Settings, SettingsPatch, SortEntry, UsageResult,
};
use provswitch_store::{default_dir, ConfigDirKind};

use crate::host::{Host, HostError};

/// In-memory host that records every call and can be told to fail.
pub struct RecordingHost {
    calls: Mutex<Vec<String>>,
    settings: Mutex<SettingsPatch>,
    saved_settings: Mutex<Option<Settings>>,
    dir_override: Mutex<Option<String>>,
    select_response: Mutex<Option<String>>,
    claude_snippet: Mutex<Option<String>>,
    codex_snippet: Mutex<Option<String>>,
    last_mode_change: Mutex<Option<(OperationMode, Option<String>, Option<String>)>>,
    last_sort_batch: Mutex<Option<(AppKind, Vec<SortEntry>)>>,
    languages: Mutex<Vec<Language>>,
    usage_result: Mutex<UsageResult>,
    usage_calls: AtomicUsize,
    usage_gate: Mutex<Option<Arc<Notify>>>,
    fail_save_settings: AtomicBool,
    fail_set_override: AtomicBool,
    fail_sort: AtomicBool,
    fail_notify: AtomicBool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            settings: Mutex::new(SettingsPatch::default()),
            saved_settings: Mutex::new(None),
            dir_override: Mutex::new(None),
            select_response: Mutex::new(None),
            claude_snippet: Mutex::new(None),
            codex_snippet: Mutex::new(None),
            last_mode_change: Mutex::new(None),
            last_sort_batch: Mutex::new(None),
            languages: Mutex::new(Vec::new()),
            usage_result: Mutex::new(UsageResult::ok(vec![])),
            usage_calls: AtomicUsize::new(0),
            usage_gate: Mutex::new(None),
            fail_save_settings: AtomicBool::new(false),
            fail_set_override: AtomicBool::new(false),
            fail_sort: AtomicBool::new(false),
            fail_notify: AtomicBool::new(false),
        }
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn saved_settings(&self) -> Option<Settings> {
        self.saved_settings.lock().unwrap().clone()
    }

    pub fn dir_override(&self) -> Option<String> {
        self.dir_override.lock().unwrap().clone()
    }

    pub fn set_select_response(&self, response: Option<String>) {
        *self.select_response.lock().unwrap() = response;
    }

    pub fn set_snippets(&self, claude: Option<String>, codex: Option<String>) {
        *self.claude_snippet.lock().unwrap() = claude;
        *self.codex_snippet.lock().unwrap() = codex;
    }

    pub fn last_mode_change(&self) -> Option<(OperationMode, Option<String>, Option<String>)> {
        self.last_mode_change.lock().unwrap().clone()
    }

    pub fn last_sort_batch(&self) -> Option<(AppKind, Vec<SortEntry>)> {
        self.last_sort_batch.lock().unwrap().clone()
    }

    pub fn languages(&self) -> Vec<Language> {
        self.languages.lock().unwrap().clone()
    }

    pub fn set_usage_result(&self, result: UsageResult) {
        *self.usage_result.lock().unwrap() = result;
    }

    pub fn usage_calls(&self) -> usize {
        self.usage_calls.load(Ordering::SeqCst)
    }

    /// Makes every usage query park until the returned handle is notified.
    pub fn gate_usage(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.usage_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn fail_save_settings(&self) {
        self.fail_save_settings.store(true, Ordering::SeqCst);
    }

    pub fn fail_set_override(&self) {
        self.fail_set_override.store(true, Ordering::SeqCst);
    }

    pub fn fail_sort(&self) {
        self.fail_sort.store(true, Ordering::SeqCst);
    }

    pub fn fail_notify(&self) {
        self.fail_notify.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Host for RecordingHost {
    async fn get_settings(&self) -> Result<SettingsPatch, HostError> {
        self.record("get_settings");
        Ok(self.settings.lock().unwrap().clone())
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), HostError> {
        if self.fail_save_settings.load(Ordering::SeqCst) {
            return Err(HostError::Persistence("settings store down".into()));
        }
        self.record("save_settings");
        *self.saved_settings.lock().unwrap() = Some(settings.clone());
        Ok(())
    }

    async fn get_dir_override(&self) -> Result<Option<String>, HostError> {
        self.record("get_dir_override");
        Ok(self.dir_override.lock().unwrap().clone())
    }

    async fn set_dir_override(&self, value: Option<&str>) -> Result<(), HostError> {
        if self.fail_set_override.load(Ordering::SeqCst) {
            return Err(HostError::Persistence("override store down".into()));
        }
        self.record("set_dir_override");
        *self.dir_override.lock().unwrap() = value.map(ToString::to_string);
        Ok(())
    }

    async fn resolved_config_dir(&self, kind: ConfigDirKind) -> Result<String, HostError> {
        let dir = match (kind, self.dir_override.lock().unwrap().clone()) {
            (ConfigDirKind::App, Some(value)) => value,
            _ => default_dir(kind).display().to_string(),
        };
        Ok(dir)
    }

    async fn select_directory(&self, _seed: &str) -> Result<Option<String>, HostError> {
        self.record("select_directory");
        Ok(self.select_response.lock().unwrap().clone())
    }

    async fn apply_integration_artifact(&self, _enabled: bool) -> Result<(), HostError> {
        self.record("apply_integration_artifact");
        Ok(())
    }

    async fn notify_mode_change(
        &self,
        mode: OperationMode,
        claude_snippet: Option<String>,
        codex_snippet: Option<String>,
    ) -> Result<(), HostError> {
        if self.fail_notify.load(Ordering::SeqCst) {
            return Err(HostError::Persistence("proxy unreachable".into()));
        }
        self.record("notify_mode_change");
        *self.last_mode_change.lock().unwrap() = Some((mode, claude_snippet, codex_snippet));
        Ok(())
    }

    async fn persist_sort_order(
        &self,
        app: AppKind,
        entries: &[SortEntry],
    ) -> Result<(), HostError> {
        if self.fail_sort.load(Ordering::SeqCst) {
            return Err(HostError::Persistence("config store down".into()));
        }
        self.record("persist_sort_order");
        *self.last_sort_batch.lock().unwrap() = Some((app, entries.to_vec()));
        Ok(())
    }

    async fn refresh_external_menu(&self) -> Result<(), HostError> {
        self.record("refresh_external_menu");
        Ok(())
    }

    async fn query_usage(&self, _provider_id: &str, _app: AppKind) -> UsageResult {
        self.usage_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.usage_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.usage_result.lock().unwrap().clone()
    }

    async fn persist_provider(&self, _app: AppKind, _provider: &Provider) -> Result<(), HostError> {
        self.record("persist_provider");
        Ok(())
    }

    async fn restart_process(&self) -> Result<(), HostError> {
        self.record("restart_process");
        Err(HostError::Restart("restart unsupported in tests".into()))
    }

    async fn set_active_language(&self, language: Language) -> Result<(), HostError> {
        self.languages.lock().unwrap().push(language);
        Ok(())
    }

    async fn common_config_snippet(&self, app: AppKind) -> Option<String> {
        match app {
            AppKind::Claude => self.claude_snippet.lock().unwrap().clone(),
            AppKind::Codex => self.codex_snippet.lock().unwrap().clone(),
        }
    }
}
