//! The selection and metrics pipeline for one profile.

use crate::error::Result;
use crate::histogram::{breakdown, Breakdown};
use crate::selection::{
    select_by_collection, select_by_max_authors, select_by_year_interval, select_citeable,
    select_published, year_range,
};
use crate::summary::{
    document_type_counts, documents_per_year, empty_result_warning, total_citations,
};
use crate::types::{CitationIndices, CitationTotals, Filters, Record, YearRange};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Outcome of analysing a profile.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Analysis {
    /// The filters left nothing to report on.
    Empty { warning: String },
    /// Metrics for the selected records.
    Report(Box<Report>),
}

/// Everything computed for a non-empty selection.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub filters: Filters,
    /// Selected records in display order.
    pub records: Vec<Record>,
    pub years: YearRange,
    pub published_count: usize,
    pub citeable_count: usize,
    pub totals: CitationTotals,
    pub citeable_totals: CitationTotals,
    pub published_totals: CitationTotals,
    /// Indices of the published records; `None` when none are published.
    pub indices: Option<CitationIndices>,
    pub breakdown: Option<Breakdown>,
    pub document_types: BTreeMap<String, usize>,
    pub per_year: BTreeMap<i32, usize>,
}

/// Apply the filters to a profile and compute its metrics.
///
/// `current_year` anchors the latest-years window.
pub fn analyze(records: &[Record], filters: &Filters, current_year: i32) -> Result<Analysis> {
    let mut selected = select_by_collection(records, filters.collection);
    if let Some(window) = filters.window {
        selected = select_by_year_interval(&selected, window.interval(current_year)?)?;
    }
    if let Some(n) = filters.max_authors {
        selected = select_by_max_authors(&selected, n)?;
    }
    debug!(
        loaded = records.len(),
        selected = selected.len(),
        "Applied filters"
    );

    if let Some(warning) = empty_result_warning(&selected, filters) {
        return Ok(Analysis::Empty { warning });
    }

    let years = year_range(&selected)?;
    if filters.chronological {
        selected.reverse();
    }

    let published = select_published(&selected);
    let citeable = select_citeable(&selected);
    debug!(
        published = published.len(),
        citeable = citeable.len(),
        first_year = years.first,
        last_year = years.last,
        "Derived subsets"
    );

    let indices = CitationIndices::from_records(&published, years.span)?;
    let breakdown = breakdown(
        &citations(&citeable),
        &citations_noself(&citeable),
        &citations(&published),
        &citations_noself(&published),
    );

    Ok(Analysis::Report(Box::new(Report {
        filters: filters.clone(),
        years,
        published_count: published.len(),
        citeable_count: citeable.len(),
        totals: total_citations(&selected),
        citeable_totals: total_citations(&citeable),
        published_totals: total_citations(&published),
        indices,
        breakdown,
        document_types: document_type_counts(&selected),
        per_year: documents_per_year(&selected),
        records: selected,
    })))
}

fn citations(records: &[Record]) -> Vec<u32> {
    records.iter().map(|r| r.citation_count).collect()
}

fn citations_noself(records: &[Record]) -> Vec<u32> {
    records
        .iter()
        .map(|r| r.citation_count_without_self_citations)
        .collect()
}
