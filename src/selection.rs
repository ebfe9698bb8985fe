//! Record selection.
//!
//! Filters are pure: each returns a new vector holding the matching records in
//! their original order, so they compose by intersection.

use crate::error::{MetricsError, Result};
use crate::types::{Collection, Record, YearRange};
use std::ops::Range;

/// Keep records tagged with the collection. `Collection::All` keeps everything.
pub fn select_by_collection(records: &[Record], collection: Collection) -> Vec<Record> {
    match collection {
        Collection::All => records.to_vec(),
        c => records
            .iter()
            .filter(|r| r.has_tag(c.as_tag()))
            .cloned()
            .collect(),
    }
}

/// Keep records whose year lies in the half-open interval `years`.
pub fn select_by_year_interval(records: &[Record], years: Range<i32>) -> Result<Vec<Record>> {
    if years.start > years.end {
        return Err(MetricsError::InvalidSelection(format!(
            "year interval starts after it ends ({}..{})",
            years.start, years.end
        )));
    }
    Ok(records
        .iter()
        .filter(|r| years.contains(&r.publication_or_earliest_date))
        .cloned()
        .collect())
}

/// Keep records with at most `max_authors` authors.
pub fn select_by_max_authors(records: &[Record], max_authors: u32) -> Result<Vec<Record>> {
    if max_authors == 0 {
        return Err(MetricsError::InvalidSelection(
            "the author ceiling must be at least 1".to_string(),
        ));
    }
    Ok(records
        .iter()
        .filter(|r| r.author_count <= max_authors)
        .cloned()
        .collect())
}

/// Keep refereed records.
pub fn select_published(records: &[Record]) -> Vec<Record> {
    records.iter().filter(|r| r.refereed).cloned().collect()
}

/// Keep citeable records.
pub fn select_citeable(records: &[Record]) -> Vec<Record> {
    records.iter().filter(|r| r.citeable).cloned().collect()
}

/// First and last year covered by the records, and the number of years between
/// them inclusive.
pub fn year_range(records: &[Record]) -> Result<YearRange> {
    let mut years = records.iter().map(|r| r.publication_or_earliest_date);
    let first_seen = years
        .next()
        .ok_or_else(|| MetricsError::EmptyInput("no records to take a year range of".to_string()))?;
    let (first, last) = years.fold((first_seen, first_seen), |(lo, hi), y| {
        (lo.min(y), hi.max(y))
    });
    Ok(YearRange {
        first,
        last,
        span: (last - first) as u32 + 1,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(year: i32, cits: u32, authors: u32, tags: &[&str]) -> Record {
        Record {
            control_number: None,
            title: format!("Paper from {}", year),
            citation_count: cits,
            citation_count_without_self_citations: cits.saturating_sub(1),
            author_count: authors,
            age_of_publication: (2026 - year + 1) as u32,
            document_type: tags.iter().map(|t| t.to_string()).collect(),
            publication_or_earliest_date: year,
            citeable: true,
            refereed: true,
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record(2023, 4, 2, &["article"]),
            record(2021, 12, 1, &["article", "review"]),
            record(2020, 30, 150, &["conferencepaper"]),
            record(2018, 0, 3, &["thesis"]),
        ]
    }

    fn years(records: &[Record]) -> Vec<i32> {
        records.iter().map(|r| r.publication_or_earliest_date).collect()
    }

    #[test]
    fn test_select_by_collection_all_is_noop() {
        let records = sample();
        assert_eq!(select_by_collection(&records, Collection::All), records);
    }

    #[test]
    fn test_select_by_collection_tag() {
        let records = sample();
        let articles = select_by_collection(&records, Collection::Article);
        assert_eq!(years(&articles), vec![2023, 2021]);
        let reviews = select_by_collection(&records, Collection::Review);
        assert_eq!(years(&reviews), vec![2021]);
        assert!(select_by_collection(&records, Collection::Book).is_empty());
    }

    #[test]
    fn test_select_by_year_interval_is_half_open() {
        let records = sample();
        let selected = select_by_year_interval(&records, 2020..2023).unwrap();
        assert_eq!(years(&selected), vec![2021, 2020]);
    }

    #[test]
    fn test_select_by_year_interval_empty_interval() {
        let records = sample();
        assert!(select_by_year_interval(&records, 2021..2021).unwrap().is_empty());
    }

    #[test]
    fn test_select_by_year_interval_reversed_bounds() {
        let records = sample();
        #[allow(clippy::reversed_empty_ranges)]
        let err = select_by_year_interval(&records, 2023..2020).unwrap_err();
        assert!(matches!(err, MetricsError::InvalidSelection(_)));
    }

    #[test]
    fn test_select_by_max_authors() {
        let records = sample();
        let selected = select_by_max_authors(&records, 2).unwrap();
        assert_eq!(years(&selected), vec![2023, 2021]);
        let single = select_by_max_authors(&records, 1).unwrap();
        assert_eq!(years(&single), vec![2021]);
    }

    #[test]
    fn test_select_by_max_authors_zero_rejected() {
        assert!(matches!(
            select_by_max_authors(&sample(), 0),
            Err(MetricsError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_select_published_and_citeable() {
        let mut records = sample();
        records[0].refereed = false;
        records[3].citeable = false;
        assert_eq!(years(&select_published(&records)), vec![2021, 2020, 2018]);
        assert_eq!(years(&select_citeable(&records)), vec![2023, 2021, 2020]);
    }

    #[test]
    fn test_filters_compose() {
        let records = sample();
        let selected = select_by_collection(&records, Collection::Article);
        let selected = select_by_year_interval(&selected, 2022..2027).unwrap();
        assert_eq!(years(&selected), vec![2023]);
    }

    #[test]
    fn test_year_range() {
        let range = year_range(&sample()).unwrap();
        assert_eq!(range.first, 2018);
        assert_eq!(range.last, 2023);
        assert_eq!(range.span, 6);
    }

    #[test]
    fn test_year_range_single_year() {
        let range = year_range(&[record(2020, 1, 1, &["article"])]).unwrap();
        assert_eq!(range.span, 1);
    }

    #[test]
    fn test_year_range_empty() {
        assert!(matches!(year_range(&[]), Err(MetricsError::EmptyInput(_))));
    }
}
