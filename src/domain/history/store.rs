//! Bounded, deduplicated, most-recent-first history

use std::sync::Arc;

use super::entry::Entry;

/// Default number of entries kept
pub const DEFAULT_CAPACITY: usize = 20;

/// What `insert_or_promote` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// Index the entry was moved from, `None` if it was new
    pub promoted_from: Option<usize>,
    /// Entry dropped from the back to stay within capacity
    pub evicted: Option<Entry>,
}

/// History store entity.
///
/// Invariants:
///   - no two entries are equal (by `Entry` identity)
///   - ordered by recency, index 0 is the most recent
///   - `len() <= capacity()`
///
/// Snapshots share the backing vector; a mutation after a snapshot copies it
/// once, so readers never observe a half-applied change.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: Arc<Vec<Entry>>,
    capacity: usize,
}

impl HistoryStore {
    /// Create an empty store. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Vec::new()),
            capacity: capacity.max(1),
        }
    }

    /// Build a store from previously persisted entries, most recent first.
    ///
    /// Later duplicates are dropped and the sequence is cut to capacity.
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>, capacity: usize) -> Self {
        let mut store = Self::new(capacity);
        let mut kept: Vec<Entry> = Vec::new();
        for entry in entries {
            if kept.len() == store.capacity {
                break;
            }
            if !kept.contains(&entry) {
                kept.push(entry);
            }
        }
        store.entries = Arc::new(kept);
        store
    }

    /// Move `entry` to the front, inserting it if absent.
    ///
    /// This is the single ordering rule for both newly copied content and
    /// restores. The stored value is replaced by `entry`, so a file reference
    /// picks up the newest locator.
    pub fn insert_or_promote(&mut self, entry: Entry) -> Insertion {
        let entries = Arc::make_mut(&mut self.entries);

        let promoted_from = entries.iter().position(|e| *e == entry);
        if let Some(index) = promoted_from {
            entries.remove(index);
        }
        entries.insert(0, entry);

        let evicted = if entries.len() > self.capacity {
            entries.pop()
        } else {
            None
        };

        Insertion {
            promoted_from,
            evicted,
        }
    }

    /// Remove every entry. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries = Arc::new(Vec::new());
        removed
    }

    /// Shared, immutable view of the current ordering
    pub fn snapshot(&self) -> Arc<Vec<Entry>> {
        Arc::clone(&self.entries)
    }

    /// Borrow the entries, most recent first
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entry at `index` (0 = most recent)
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Current position of an entry equal to `entry`
    pub fn position(&self, entry: &Entry) -> Option<usize> {
        self.entries.iter().position(|e| e == entry)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::history::{FileReference, Locator};

    fn texts(store: &HistoryStore) -> Vec<String> {
        store.entries().iter().map(|e| e.label()).collect()
    }

    fn copy_all(store: &mut HistoryStore, values: &[&str]) {
        for v in values {
            store.insert_or_promote(Entry::text(*v));
        }
    }

    #[test]
    fn new_store_is_empty() {
        let store = HistoryStore::default();
        assert!(store.is_empty());
        assert_eq!(store.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn zero_capacity_is_raised() {
        assert_eq!(HistoryStore::new(0).capacity(), 1);
    }

    #[test]
    fn most_recent_first() {
        let mut store = HistoryStore::new(10);
        copy_all(&mut store, &["A", "B", "C"]);
        assert_eq!(texts(&store), ["C", "B", "A"]);
    }

    #[test]
    fn recopy_promotes_without_duplicate() {
        let mut store = HistoryStore::new(10);
        copy_all(&mut store, &["A", "B"]);
        let insertion = store.insert_or_promote(Entry::text("A"));

        assert_eq!(insertion.promoted_from, Some(1));
        assert_eq!(texts(&store), ["A", "B"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn recopy_of_front_keeps_order() {
        let mut store = HistoryStore::new(2);
        copy_all(&mut store, &["A", "B", "B", "B"]);
        assert_eq!(texts(&store), ["B", "A"]);

        // Capacity accounting is unaffected by repeated front copies
        let insertion = store.insert_or_promote(Entry::text("C"));
        assert_eq!(insertion.evicted, Some(Entry::text("A")));
        assert_eq!(texts(&store), ["C", "B"]);
    }

    #[test]
    fn evicts_least_recent() {
        let mut store = HistoryStore::new(2);
        store.insert_or_promote(Entry::text("A"));
        store.insert_or_promote(Entry::text("B"));
        let insertion = store.insert_or_promote(Entry::text("C"));

        assert_eq!(insertion.evicted, Some(Entry::text("A")));
        assert_eq!(texts(&store), ["C", "B"]);
    }

    #[test]
    fn promote_from_middle_keeps_relative_order() {
        let mut store = HistoryStore::new(10);
        copy_all(&mut store, &["E", "D", "C", "B", "A"]);
        assert_eq!(texts(&store), ["A", "B", "C", "D", "E"]);

        let insertion = store.insert_or_promote(Entry::text("C"));
        assert_eq!(insertion.promoted_from, Some(2));
        assert!(insertion.evicted.is_none());
        assert_eq!(texts(&store), ["C", "A", "B", "D", "E"]);
    }

    #[test]
    fn promotion_at_capacity_evicts_nothing() {
        let mut store = HistoryStore::new(3);
        copy_all(&mut store, &["A", "B", "C"]);
        let insertion = store.insert_or_promote(Entry::text("A"));
        assert!(insertion.evicted.is_none());
        assert_eq!(texts(&store), ["A", "C", "B"]);
    }

    #[test]
    fn file_promotion_takes_new_locator() {
        let mut store = HistoryStore::new(5);
        store.insert_or_promote(Entry::File(FileReference::unlocated("/tmp/f")));
        store.insert_or_promote(Entry::text("x"));
        store.insert_or_promote(Entry::File(FileReference::new("/tmp/f", Locator::new("L"))));

        assert_eq!(store.len(), 2);
        let front = store.get(0).and_then(Entry::as_file).unwrap();
        assert_eq!(front.locator(), Some(&Locator::new("L")));
    }

    #[test]
    fn clear_empties() {
        let mut store = HistoryStore::new(5);
        copy_all(&mut store, &["A", "B"]);
        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn snapshot_is_stable_across_mutation() {
        let mut store = HistoryStore::new(5);
        copy_all(&mut store, &["A"]);
        let before = store.snapshot();
        store.insert_or_promote(Entry::text("B"));

        assert_eq!(before.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn from_entries_dedups_and_truncates() {
        let loaded = vec![
            Entry::text("A"),
            Entry::text("B"),
            Entry::text("A"),
            Entry::text("C"),
            Entry::text("D"),
        ];
        let store = HistoryStore::from_entries(loaded, 3);
        assert_eq!(texts(&store), ["A", "B", "C"]);
    }

    #[test]
    fn invariants_hold_for_long_sequences() {
        let mut store = HistoryStore::new(4);
        let values = ["a", "b", "a", "c", "d", "e", "b", "b", "f", "a", "g", "c"];
        for v in values {
            store.insert_or_promote(Entry::text(v));
            assert!(store.len() <= store.capacity());
            let entries = store.entries();
            for (i, e) in entries.iter().enumerate() {
                assert!(!entries[i + 1..].contains(e));
            }
            assert_eq!(store.get(0), Some(&Entry::text(v)));
        }
    }
}
