//! Selection auto-correction after the visible set changes.

use crate::model::attraction::{Attraction, AttractionId};

/// Returns the selection that should be active for `visible`.
///
/// Keeps `current` while it is still visible, otherwise falls back to the
/// first visible attraction, or `None` when nothing is visible.
pub fn reconcile_selection(
    current: Option<&AttractionId>,
    visible: &[&Attraction],
) -> Option<AttractionId> {
    if let Some(current) = current {
        if visible.iter().any(|attraction| &attraction.id == current) {
            return Some(current.clone());
        }
    }
    visible.first().map(|attraction| attraction.id.clone())
}
