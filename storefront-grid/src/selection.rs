//! Selection tracking by row id.

use std::collections::HashSet;
use std::hash::Hash;

/// Selection mode for the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// No selection allowed.
    #[default]
    None,
    /// Single row selection (radio-button style).
    Single,
    /// Multiple rows can be selected (checkbox style).
    Multi,
}

/// Tracks selected rows by their keys, independent of filtering and paging.
///
/// Keys are reported in insertion order.
#[derive(Debug, Clone)]
pub struct Selection<K: Clone + Eq + Hash> {
    pub mode: SelectionMode,
    order: Vec<K>,
    members: HashSet<K>,
}

impl<K: Clone + Eq + Hash> Default for Selection<K> {
    fn default() -> Self {
        Self::new(SelectionMode::None)
    }
}

impl<K: Clone + Eq + Hash> Selection<K> {
    /// Create an empty selection with the given mode.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            order: Vec::new(),
            members: HashSet::new(),
        }
    }

    /// Create multi-selection mode.
    pub fn multi() -> Self {
        Self::new(SelectionMode::Multi)
    }

    /// Toggle selection for a key. Returns true if selection changed.
    pub fn toggle(&mut self, key: K) -> bool {
        match self.mode {
            SelectionMode::None => false,
            SelectionMode::Single => {
                let was_selected = self.members.contains(&key);
                self.clear();
                if !was_selected {
                    self.insert(key);
                }
                true
            }
            SelectionMode::Multi => {
                if self.members.contains(&key) {
                    self.remove(&key);
                } else {
                    self.insert(key);
                }
                true
            }
        }
    }

    fn insert(&mut self, key: K) {
        self.members.insert(key.clone());
        self.order.push(key);
    }

    fn remove(&mut self, key: &K) {
        self.members.remove(key);
        self.order.retain(|k| k != key);
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &K) -> bool {
        self.members.contains(key)
    }

    /// Clear all selections.
    pub fn clear(&mut self) {
        self.members.clear();
        self.order.clear();
    }

    /// Keep only keys for which `keep` returns true. Returns the number dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) -> usize {
        let before = self.order.len();
        self.order.retain(|k| keep(k));
        self.members = self.order.iter().cloned().collect();
        before - self.order.len()
    }

    /// Snapshot of the selected keys in insertion order.
    pub fn snapshot(&self) -> Vec<K> {
        self.order.clone()
    }

    /// Number of selected keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_toggle_restores() {
        let mut selection = Selection::multi();
        selection.toggle(1);
        let before = selection.snapshot();
        selection.toggle(2);
        selection.toggle(2);
        assert_eq!(selection.snapshot(), before);
    }

    #[test]
    fn test_insertion_order() {
        let mut selection = Selection::multi();
        selection.toggle(3);
        selection.toggle(1);
        selection.toggle(2);
        selection.toggle(1);
        assert_eq!(selection.snapshot(), vec![3, 2]);
    }

    #[test]
    fn test_none_mode_ignores_toggle() {
        let mut selection = Selection::new(SelectionMode::None);
        assert!(!selection.toggle(1));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_single_mode_replaces() {
        let mut selection = Selection::new(SelectionMode::Single);
        selection.toggle(1);
        selection.toggle(2);
        assert_eq!(selection.snapshot(), vec![2]);
        selection.toggle(2);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_retain() {
        let mut selection = Selection::multi();
        for k in [1, 2, 3, 4] {
            selection.toggle(k);
        }
        assert_eq!(selection.retain(|k| k % 2 == 0), 2);
        assert_eq!(selection.snapshot(), vec![2, 4]);
        assert!(!selection.is_selected(&1));
    }
}
