use crate::model::CatalogEntry;

/// Keeps every candidate whose name contains `query`, ignoring case.
/// Input order and duplicates are preserved; an empty query keeps everything.
pub fn filter_by_name(query: &str, candidates: &[CatalogEntry]) -> Vec<CatalogEntry> {
    let needle = query.to_lowercase();
    candidates
        .iter()
        .filter(|candidate| candidate.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
