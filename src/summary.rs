//! Totals, counts and the empty-selection warning.

use crate::types::{CitationTotals, Collection, Filters, Record};
use std::collections::BTreeMap;

/// Summed citations of the records; zero for an empty slice.
pub fn total_citations(records: &[Record]) -> CitationTotals {
    records
        .iter()
        .fold(CitationTotals::default(), |acc, r| CitationTotals {
            with_self: acc.with_self + u64::from(r.citation_count),
            without_self: acc.without_self
                + u64::from(r.citation_count_without_self_citations),
        })
}

/// Number of records carrying each collection tag.
///
/// A record with several tags is counted once under each of them.
pub fn document_type_counts(records: &[Record]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for tag in records.iter().flat_map(|r| &r.document_type) {
        *counts.entry(tag.clone()).or_insert(0) += 1;
    }
    counts
}

/// Number of records per year.
pub fn documents_per_year(records: &[Record]) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for r in records {
        *counts.entry(r.publication_or_earliest_date).or_insert(0) += 1;
    }
    counts
}

/// Describe which filters left the selection empty.
///
/// Returns `None` when there are records to report on.
pub fn empty_result_warning(records: &[Record], filters: &Filters) -> Option<String> {
    if !records.is_empty() {
        return None;
    }

    let mut parts = Vec::new();
    let single_author = filters.max_authors == Some(1);

    if filters.window.is_some() {
        parts.push("in the selected period".to_string());
    }
    if let Some(n) = filters.max_authors.filter(|&n| n > 1) {
        parts.push(format!("with at most {} authors", n));
    }
    if filters.collection != Collection::All {
        parts.push(format!("in the {} collection", filters.collection));
    }

    let prefix = if single_author { "single-author " } else { "" };
    if parts.is_empty() {
        Some(format!("No {}research work.", prefix))
    } else {
        Some(format!("No {}research work {}.", prefix, parts.join(", ")))
    }
}
