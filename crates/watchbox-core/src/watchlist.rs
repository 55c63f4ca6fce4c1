use serde::Serialize;
use tracing::debug;
use watchbox_models::SearchResultItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// `first_entry` is set when the list went from empty to non-empty
    Added { first_entry: bool },
    Removed,
}

/// In-session watchlist: unique by id, insertion order kept for display
#[derive(Debug, Clone, Default, Serialize)]
pub struct Watchlist {
    entries: Vec<SearchResultItem>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn entries(&self) -> &[SearchResultItem] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn toggle(&mut self, item: SearchResultItem) -> ToggleOutcome {
        if self.remove(&item.id) {
            return ToggleOutcome::Removed;
        }
        let first_entry = self.entries.is_empty();
        debug!(operation = "watchlist", id = %item.id, "Added to watchlist");
        self.entries.push(item);
        ToggleOutcome::Added { first_entry }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        if removed {
            debug!(operation = "watchlist", id = %id, "Removed from watchlist");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchbox_models::MediaKind;

    fn item(id: &str) -> SearchResultItem {
        SearchResultItem::new(id, format!("Movie {}", id), "2020", MediaKind::Movie)
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut list = Watchlist::new();
        assert_eq!(list.toggle(item("tt1")), ToggleOutcome::Added { first_entry: true });
        assert!(list.contains("tt1"));
        assert_eq!(list.toggle(item("tt1")), ToggleOutcome::Removed);
        assert!(!list.contains("tt1"));
        assert!(list.is_empty());
    }

    #[test]
    fn test_first_entry_only_on_empty_transition() {
        let mut list = Watchlist::new();
        assert_eq!(list.toggle(item("tt1")), ToggleOutcome::Added { first_entry: true });
        assert_eq!(list.toggle(item("tt2")), ToggleOutcome::Added { first_entry: false });
        list.toggle(item("tt1"));
        list.toggle(item("tt2"));
        assert_eq!(list.toggle(item("tt3")), ToggleOutcome::Added { first_entry: true });
    }

    #[test]
    fn test_no_duplicates_and_order_kept() {
        let mut list = Watchlist::new();
        list.toggle(item("tt1"));
        list.toggle(item("tt2"));
        list.toggle(item("tt3"));
        list.toggle(item("tt2"));
        list.toggle(item("tt2"));

        let ids: Vec<&str> = list.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["tt1", "tt3", "tt2"]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut list = Watchlist::new();
        list.toggle(item("tt1"));
        assert!(!list.remove("tt9"));
        assert_eq!(list.len(), 1);
    }
}
