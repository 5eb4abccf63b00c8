use std::collections::HashSet;

/// Set of selected node or edge identities.
#[derive(Debug, Default, Clone)]
pub struct SelectionManager {
    selected: HashSet<String>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a click on an item based on interaction modifiers
    ///
    /// With `additive` (shift held) the item is toggled; otherwise it becomes
    /// the only selected item.
    pub fn handle_interaction(&mut self, id: &str, additive: bool) {
        if additive {
            if !self.selected.remove(id) {
                self.selected.insert(id.to_string());
            }
        } else {
            if self.selected.len() == 1 && self.selected.contains(id) {
                return;
            }
            self.selected.clear();
            self.selected.insert(id.to_string());
        }
    }

    /// Clear the current selection
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Replace the current selection with a new set of identities
    ///
    /// Useful for box selection sync
    pub fn replace_selection<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected.clear();
        self.selected.extend(ids.into_iter().map(Into::into));
    }

    /// Drop an identity, e.g. after the item was deleted
    pub fn remove(&mut self, id: &str) -> bool {
        self.selected.remove(id)
    }

    /// Check if an identity is selected
    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Get an iterator over the selected identities
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.selected.iter().map(String::as_str)
    }

    /// Get the number of selected items
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if selection is empty
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
