//! Per-instance usage-query monitor.
//!
//! One monitor belongs to one display instance (one provider card for one
//! target); the dedup key and in-flight guard are instance state, never
//! process-wide. Two different providers may query concurrently, but a
//! given instance never overlaps its own queries.

use std::sync::Mutex as StdMutex;

use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;

use provswitch_core::{AppKind, Provider, UsageData, UsageResult};

use crate::host::Host;

/// Dedup key for automatic triggers.
type UsageKey = (String, AppKind, bool);

/// What the instance currently renders.
#[derive(Debug, Clone, PartialEq)]
pub enum UsageView {
    /// Nothing to show (disabled, cleared, or zero plans).
    Hidden,
    /// Query failed; rendered with a retry affordance.
    Error(String),
    /// Plan entries, tiered via [`UsageData::tier`].
    Plans(Vec<UsageData>),
}

/// Usage-query state for one display instance.
pub struct UsageMonitor {
    app: AppKind,
    last_key: StdMutex<Option<UsageKey>>,
    view: StdMutex<UsageView>,
    in_flight: AsyncMutex<()>,
}

impl UsageMonitor {
    /// Creates a monitor for one target.
    pub fn new(app: AppKind) -> Self {
        Self {
            app,
            last_key: StdMutex::new(None),
            view: StdMutex::new(UsageView::Hidden),
            in_flight: AsyncMutex::new(()),
        }
    }

    /// The current render state.
    pub fn view(&self) -> UsageView {
        self.view.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }

    /// Automatic trigger, called whenever the displayed provider changes.
    ///
    /// Fires only when the `(providerId, target, enabled)` key differs from
    /// the last automatic firing. A provider without an enabled script
    /// clears the remembered key and the displayed result. Skipped without
    /// key update while a query is already in flight, so the trigger
    /// re-evaluates next time.
    pub async fn evaluate<H: Host>(&self, host: &H, provider: &Provider) {
        let enabled = provider.usage_script().is_some_and(|s| s.enabled);
        if !enabled {
            self.set_key(None);
            self.set_view(UsageView::Hidden);
            return;
        }

        let key = (provider.id.clone(), self.app, true);
        if self.key() == Some(key.clone()) {
            return;
        }

        let Ok(_guard) = self.in_flight.try_lock() else {
            return;
        };
        self.set_key(Some(key));
        debug!(provider = %provider.id, app = %self.app, "Automatic usage query");
        let result = host.query_usage(&provider.id, self.app).await;
        self.apply(result);
    }

    /// Manual refresh, always fires regardless of the dedup key.
    ///
    /// Serialized per instance: returns false, without queueing, when a
    /// query is already in flight.
    pub async fn refresh<H: Host>(&self, host: &H, provider_id: &str) -> bool {
        let Ok(_guard) = self.in_flight.try_lock() else {
            debug!(provider = provider_id, "Refresh dropped, query in flight");
            return false;
        };
        let result = host.query_usage(provider_id, self.app).await;
        self.apply(result);
        true
    }

    fn apply(&self, result: UsageResult) {
        let view = if result.success {
            match result.data {
                Some(plans) if !plans.is_empty() => UsageView::Plans(plans),
                _ => UsageView::Hidden,
            }
        } else {
            UsageView::Error(
                result
                    .error
                    .unwrap_or_else(|| "usage query failed".to_string()),
            )
        };
        self.set_view(view);
    }

    fn key(&self) -> Option<UsageKey> {
        self.last_key.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }

    fn set_key(&self, key: Option<UsageKey>) {
        *self.last_key.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = key;
    }

    fn set_view(&self, view: UsageView) {
        *self.view.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = view;
    }
}

// ============================================================================
// Tests
// ============================================================================
