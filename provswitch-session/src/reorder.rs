//! Drag reorder orchestration.
//!
//! Holds the displayed provider sequence for one target, plans a drag as a
//! full batch of `(id, sortIndex)` assignments, applies it locally, and
//! persists the batch in one host call. A persistence failure reverts the
//! visual order to the pre-drag sequence so the display never drifts ahead
//! of the store.

use tracing::warn;

use provswitch_core::{plan_reorder, sort_providers, AppKind, Language, Provider};

use crate::host::Host;

/// Displayed provider sequence for one target, with drag support.
pub struct ReorderController {
    app: AppKind,
    providers: Vec<Provider>,
}

impl ReorderController {
    /// Builds the controller, sorting the collection into display order.
    pub fn new(app: AppKind, mut providers: Vec<Provider>, language: Language) -> Self {
        sort_providers(&mut providers, language);
        Self { app, providers }
    }

    /// The target this controller displays.
    pub fn app(&self) -> AppKind {
        self.app
    }

    /// The current display sequence.
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// Moves the provider at `from` to `to` and persists the whole batch.
    ///
    /// Returns whether the order changed. A no-op drag (same position or
    /// out of bounds) returns false without touching the host; a
    /// persistence failure logs, reverts the display order, and also
    /// returns false.
    pub async fn move_provider<H: Host>(&mut self, host: &H, from: usize, to: usize) -> bool {
        let Some(plan) = plan_reorder(&self.providers, from, to) else {
            return false;
        };

        let snapshot = self.providers.clone();
        let moved = self.providers.remove(from);
        self.providers.insert(to, moved);
        for (position, provider) in self.providers.iter_mut().enumerate() {
            provider.sort_index = Some(position);
        }

        if let Err(e) = host.persist_sort_order(self.app, &plan).await {
            warn!(app = %self.app, error = %e, "Sort order save failed, reverting");
            self.providers = snapshot;
            return false;
        }
        true
    }
}

// ============================================================================
// Tests
// ============================================================================
