//! Settings synchronization state machine.
//!
//! One editing session moves through `Editing -> Saving -> {RestartRequired
//! | Closed}`. All edits land in a local draft; a baseline snapshot taken at
//! load time drives change detection. Save runs its persistence and
//! side-effect steps strictly in order: the two persistence steps halt the
//! transition on failure (draft preserved for retry), everything after them
//! is best-effort and only logged.

use tracing::{info, warn};

use provswitch_core::{normalize_dir, AppKind, Language, Settings};
use provswitch_store::ConfigDirKind;

use crate::dirs::{DirOverrides, DirSlot};
use crate::host::{Host, HostError};

// ============================================================================
// States & Outcomes
// ============================================================================

/// Where a settings session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Draft open for edits.
    Editing,
    /// Save steps in progress.
    Saving,
    /// Saved; the app-level directory override changed and needs a restart.
    RestartRequired,
    /// Session finished, nothing further pending.
    Closed,
}

/// Result of one save attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Saved, no restart needed.
    Closed,
    /// Saved, app-level directory override changed.
    RestartRequired,
    /// A persistence step failed; the draft is preserved for retry.
    Failed,
}

// ============================================================================
// Session
// ============================================================================

/// One settings editing session against a host.
pub struct SettingsSession<H: Host> {
    host: H,
    baseline: Settings,
    baseline_override: Option<String>,
    draft: Settings,
    dirs: DirOverrides,
    state: SessionState,
}

impl<H: Host> SettingsSession<H> {
    /// Loads baselines from the host and opens the session for editing.
    ///
    /// # Errors
    ///
    /// Returns `HostError` when the settings or override baselines cannot
    /// be read; without them there is nothing to edit against.
    pub async fn load(host: H) -> Result<Self, HostError> {
        let settings = host.get_settings().await?.resolve();
        let dirs = DirOverrides::load(&host, &settings).await?;
        let baseline_override = dirs.app.override_value().map(str::to_string);
        Ok(Self {
            host,
            baseline: settings.clone(),
            baseline_override,
            draft: settings,
            dirs,
            state: SessionState::Editing,
        })
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Read access to the draft.
    pub fn draft(&self) -> &Settings {
        &self.draft
    }

    /// Mutable access to the draft for plain field edits.
    pub fn draft_mut(&mut self) -> &mut Settings {
        &mut self.draft
    }

    /// The directory slots edited by this session.
    pub fn dirs(&self) -> &DirOverrides {
        &self.dirs
    }

    /// Mutable access to the directory slots.
    pub fn dirs_mut(&mut self) -> &mut DirOverrides {
        &mut self.dirs
    }

    fn slot_mut(dirs: &mut DirOverrides, kind: ConfigDirKind) -> &mut DirSlot {
        match kind {
            ConfigDirKind::App => &mut dirs.app,
            ConfigDirKind::Target(AppKind::Claude) => &mut dirs.claude,
            ConfigDirKind::Target(AppKind::Codex) => &mut dirs.codex,
        }
    }

    /// Opens the picker for one directory slot.
    ///
    /// Returns whether the slot changed; a picker failure is logged and
    /// treated as a cancel.
    pub async fn browse_dir(&mut self, kind: ConfigDirKind) -> bool {
        let slot = Self::slot_mut(&mut self.dirs, kind);
        match slot.browse(&self.host).await {
            Ok(changed) => changed,
            Err(e) => {
                warn!(kind = kind.label(), error = %e, "Directory picker failed");
                false
            }
        }
    }

    /// Resets one directory slot to its default; persistence waits for Save.
    pub fn reset_dir(&mut self, kind: ConfigDirKind) {
        Self::slot_mut(&mut self.dirs, kind).reset();
    }

    /// Changes the draft language and applies it immediately as a live
    /// preview. The preview is unsaved; Cancel reverts it.
    pub async fn set_language(&mut self, language: Language) {
        self.draft.language = language;
        if let Err(e) = self.host.set_active_language(language).await {
            warn!(error = %e, "Language preview failed");
        }
    }

    /// Closes the session without persisting, reverting any live preview.
    pub async fn cancel(&mut self) {
        if self.draft.language != self.baseline.language {
            if let Err(e) = self.host.set_active_language(self.baseline.language).await {
                warn!(error = %e, "Language revert failed");
            }
        }
        self.state = SessionState::Closed;
    }

    /// Runs the save sequence.
    ///
    /// Steps, strictly in order: change detection, settings persistence,
    /// override persistence, integration artifact, mode-change notification,
    /// baseline update plus menu refresh, transition. The two persistence
    /// steps halt the sequence on failure and keep the draft; the later
    /// side effects are best-effort.
    pub async fn save(&mut self) -> SaveOutcome {
        self.state = SessionState::Saving;

        // Fold the directory slots into the draft before comparison.
        self.draft.claude_config_dir =
            normalize_dir(self.dirs.claude.override_value().map(str::to_string));
        self.draft.codex_config_dir =
            normalize_dir(self.dirs.codex.override_value().map(str::to_string));
        let draft_override = normalize_dir(self.dirs.app.override_value().map(str::to_string));

        // Step 1: change detection against the baselines.
        let mode_changed = self.draft.operation_mode != self.baseline.operation_mode;
        let app_dir_changed =
            draft_override != normalize_dir(self.baseline_override.clone());

        // Step 2: persist the settings record (app override excluded).
        if let Err(e) = self.host.save_settings(&self.draft).await {
            warn!(error = %e, "Settings save failed, keeping draft");
            self.state = SessionState::Editing;
            return SaveOutcome::Failed;
        }

        // Step 3: persist the app-level override to its own store.
        if let Err(e) = self.host.set_dir_override(draft_override.as_deref()).await {
            warn!(error = %e, "Directory override save failed, keeping draft");
            self.state = SessionState::Editing;
            return SaveOutcome::Failed;
        }

        // Step 4: integration artifact, every save, regardless of change.
        if let Err(e) = self
            .host
            .apply_integration_artifact(self.draft.enable_claude_plugin_integration)
            .await
        {
            warn!(error = %e, "Integration artifact update failed");
        }

        // Step 5: mode-change notification with cached snippets.
        if mode_changed {
            let claude = self.host.common_config_snippet(AppKind::Claude).await;
            let codex = self.host.common_config_snippet(AppKind::Codex).await;
            if let Err(e) = self
                .host
                .notify_mode_change(self.draft.operation_mode, claude, codex)
                .await
            {
                warn!(error = %e, "Mode change notification failed");
            }
        }

        // Step 6: baselines move to the saved values.
        self.baseline = self.draft.clone();
        self.baseline_override = draft_override;
        if mode_changed {
            if let Err(e) = self.host.refresh_external_menu().await {
                warn!(error = %e, "Menu refresh failed");
            }
        }

        // Step 7: transition.
        if app_dir_changed {
            info!("App config dir changed, restart required");
            self.state = SessionState::RestartRequired;
            SaveOutcome::RestartRequired
        } else {
            self.state = SessionState::Closed;
            SaveOutcome::Closed
        }
    }

    /// Restarts the process after a directory change.
    ///
    /// On a host that cannot restart, the failure is logged and the session
    /// closes anyway; the override takes effect on next launch.
    pub async fn restart_now(&mut self) {
        if let Err(e) = self.host.restart_process().await {
            warn!(error = %e, "Restart failed, closing without restart");
        }
        self.state = SessionState::Closed;
    }

    /// Defers the restart; the override takes effect on next launch.
    pub fn restart_later(&mut self) {
        self.state = SessionState::Closed;
    }
}

// ============================================================================
// Tests
// ============================================================================
