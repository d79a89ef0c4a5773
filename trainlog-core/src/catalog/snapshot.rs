use std::sync::Arc;

use crate::catalog::filter::filter_by_name;
use crate::model::CatalogEntry;

/// Immutable result of one catalog fetch, shared cheaply between the form and
/// its suggestion list.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    entries: Arc<[CatalogEntry]>,
}

impl CatalogSnapshot {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn search(&self, query: &str) -> Vec<CatalogEntry> {
        filter_by_name(query, &self.entries)
    }
}

impl Default for CatalogSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn search_delegates_to_filter() {
        let snapshot = CatalogSnapshot::new(vec!["Squat".into(), "Lunge".into()]);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.search("LUN"), vec![CatalogEntry::new("Lunge")]);
        assert_eq!(snapshot.search("").len(), 2);
    }

    #[test]
    fn clones_share_entries() {
        let snapshot = CatalogSnapshot::new(vec!["Squat".into()]);
        let clone = snapshot.clone();
        assert!(std::ptr::eq(
            snapshot.entries().as_ptr(),
            clone.entries().as_ptr()
        ));
        assert!(CatalogSnapshot::default().is_empty());
    }
}
