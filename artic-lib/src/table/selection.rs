//! Selected rows and their count.

use crate::model::Artwork;

/// Holds the rows the table widget last reported as selected.
///
/// The selection is replaced wholesale on every report; there is no merging
/// with what was selected before.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionTracker {
    selected: Vec<Artwork>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection with `selected`.
    pub fn on_selection_change(&mut self, selected: Vec<Artwork>) {
        self.selected = selected;
    }

    /// The selected rows, in the order the widget reported them.
    pub fn selected(&self) -> &[Artwork] {
        &self.selected
    }

    /// Number of selected rows.
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_selected(&self, artwork: &Artwork) -> bool {
        self.selected.contains(artwork)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clear all selections.
    pub fn clear(&mut self) {
        self.selected.clear();
    }
}
