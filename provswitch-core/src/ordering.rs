//! Provider ordering engine.
//!
//! Defines the total order over a provider collection and plans drag
//! reorders. Comparison runs in three tiers, each consulted only when the
//! previous tiers are inconclusive:
//!
//! 1. `sort_index` ascending when both sides define it; a defined index
//!    outranks an undefined one.
//! 2. `created_at` ascending when both sides are non-zero; a non-zero
//!    timestamp outranks a zero/absent one.
//! 3. Locale-aware name comparison.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{Language, Provider};

// ============================================================================
// Comparison
// ============================================================================

/// Compares two providers under the three-tier total order.
pub fn compare_providers(a: &Provider, b: &Provider, language: Language) -> Ordering {
    // Tier 1: explicit sort index.
    match (a.sort_index, b.sort_index) {
        (Some(x), Some(y)) => {
            if x != y {
                return x.cmp(&y);
            }
        }
        (Some(_), None) => return Ordering::Less,
        (None, Some(_)) => return Ordering::Greater,
        (None, None) => {}
    }

    // Tier 2: creation time. Zero and absent are treated alike.
    let ts_a = a.created_at.unwrap_or(0);
    let ts_b = b.created_at.unwrap_or(0);
    match (ts_a != 0, ts_b != 0) {
        (true, true) => {
            if ts_a != ts_b {
                return ts_a.cmp(&ts_b);
            }
        }
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }

    // Tier 3: locale-aware name comparison.
    compare_names(&a.name, &b.name, language)
}

/// Locale-aware name comparison.
///
/// Chinese (the primary locale) compares by code point, which keeps CJK
/// names grouped; other locales compare case-insensitively with a
/// case-sensitive tie-break so the order stays total.
fn compare_names(a: &str, b: &str, language: Language) -> Ordering {
    match language {
        Language::Zh => a.cmp(b),
        Language::En => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b)),
    }
}

/// Sorts a provider slice in place under the total order.
pub fn sort_providers(providers: &mut [Provider], language: Language) {
    providers.sort_by(|a, b| compare_providers(a, b, language));
}

// ============================================================================
// Reorder Planning
// ============================================================================

/// One `(id, sort_index)` assignment produced by a reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortEntry {
    /// Provider id.
    pub id: String,
    /// New display position.
    #[serde(rename = "sortIndex")]
    pub sort_index: usize,
}

/// Plans a drag reorder over the currently displayed sequence.
///
/// Removes the element at `from`, inserts it at `to` (all others keep their
/// relative order), then assigns a fresh 0-based contiguous index to every
/// provider equal to its new position. The very first reorder therefore
/// normalizes any prior mix of defined and undefined indices.
///
/// Returns `None` when `from == to` or either index is out of bounds; the
/// caller persists the whole batch in one call.
pub fn plan_reorder(displayed: &[Provider], from: usize, to: usize) -> Option<Vec<SortEntry>> {
    if from == to || from >= displayed.len() || to >= displayed.len() {
        return None;
    }

    let mut ids: Vec<&str> = displayed.iter().map(|p| p.id.as_str()).collect();
    let moved = ids.remove(from);
    ids.insert(to, moved);

    Some(
        ids.into_iter()
            .enumerate()
            .map(|(position, id)| SortEntry {
                id: id.to_string(),
                sort_index: position,
            })
            .collect(),
    )
}

// ============================================================================
// Tests
// ============================================================================
