//! Public types shared by the loader, the filters and the metrics engine.
//!
//! Records are plain data: once a profile is loaded nothing in the crate
//! mutates them, the pipeline only selects and reads.

use crate::error::{MetricsError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A publication from an INSPIRE literature profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// INSPIRE record id.
    pub control_number: Option<u64>,
    /// First title of the record.
    pub title: String,
    /// Number of citations.
    pub citation_count: u32,
    /// Number of citations excluding self cites.
    pub citation_count_without_self_citations: u32,
    /// Number of authors (at least one for well-formed records).
    pub author_count: u32,
    /// Years since publication, counting the publication year as one.
    pub age_of_publication: u32,
    /// Collection tags (article, review, conferencepaper, ...).
    pub document_type: Vec<String>,
    /// Publication year, or the earliest known date if later.
    pub publication_or_earliest_date: i32,
    /// Whether INSPIRE marks the record as citeable.
    pub citeable: bool,
    /// Whether the record is published in a refereed venue.
    pub refereed: bool,
}

impl Record {
    /// Whether the record carries the given collection tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.document_type.iter().any(|t| t == tag)
    }
}

/// Collections a profile can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    All,
    Article,
    Book,
    BookChapter,
    ConferencePaper,
    Introductory,
    Lectures,
    Note,
    Proceedings,
    Published,
    Report,
    Review,
    Thesis,
}

impl Collection {
    /// Every collection, in the order they are listed to users.
    pub const VARIANTS: [Collection; 13] = [
        Self::All,
        Self::Article,
        Self::Book,
        Self::BookChapter,
        Self::ConferencePaper,
        Self::Introductory,
        Self::Lectures,
        Self::Note,
        Self::Proceedings,
        Self::Published,
        Self::Report,
        Self::Review,
        Self::Thesis,
    ];

    /// Tag as stored in a record's `document_type`.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Article => "article",
            Self::Book => "book",
            Self::BookChapter => "bookchapter",
            Self::ConferencePaper => "conferencepaper",
            Self::Introductory => "introductory",
            Self::Lectures => "lectures",
            Self::Note => "note",
            Self::Proceedings => "proceedings",
            Self::Published => "published",
            Self::Report => "report",
            Self::Review => "review",
            Self::Thesis => "thesis",
        }
    }

    /// Noun used when reporting counts for this collection.
    pub fn title(&self) -> &'static str {
        match self {
            Self::All => "research works",
            other => other.as_tag(),
        }
    }
}

impl std::str::FromStr for Collection {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_lowercase();
        Self::VARIANTS
            .into_iter()
            .find(|c| c.as_tag() == lower)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::VARIANTS.iter().map(|c| c.as_tag()).collect();
                MetricsError::InvalidSelection(format!(
                    "unknown collection '{}'; select one among: {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Time window applied to record years. The two forms are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearWindow {
    /// Records from a single year.
    Single(i32),
    /// Records from the latest N years, the current year included.
    Latest(u32),
}

impl YearWindow {
    /// Half-open year interval covered by this window.
    pub fn interval(&self, current_year: i32) -> Result<Range<i32>> {
        match *self {
            Self::Single(year) => Ok(year..year + 1),
            Self::Latest(0) => Err(MetricsError::InvalidSelection(
                "the latest-years window must cover at least one year".to_string(),
            )),
            Self::Latest(n) => {
                let n = i32::try_from(n).map_err(|_| {
                    MetricsError::InvalidSelection(format!("latest-years window {} is too wide", n))
                })?;
                Ok(current_year - n + 1..current_year + 1)
            }
        }
    }
}

/// Filter configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub collection: Collection,
    pub window: Option<YearWindow>,
    /// Keep only records with at most this many authors.
    pub max_authors: Option<u32>,
    /// List records oldest first instead of most recent first.
    pub chronological: bool,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            collection: Collection::Article,
            window: None,
            max_authors: None,
            chronological: false,
        }
    }
}

/// First and last active year of a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub first: i32,
    pub last: i32,
    /// `last - first + 1`.
    pub span: u32,
}

/// A value computed with and without self citations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndexPair<T> {
    pub with_self: T,
    pub without_self: T,
}

impl<T> IndexPair<T> {
    pub fn new(with_self: T, without_self: T) -> Self {
        Self {
            with_self,
            without_self,
        }
    }
}

/// Author-level citation indices for one record subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationIndices {
    #[serde(rename = "h-index")]
    pub h_index: IndexPair<u32>,
    #[serde(rename = "h-frac")]
    pub h_frac: IndexPair<f64>,
    #[serde(rename = "i10-index")]
    pub i10_index: IndexPair<u32>,
    #[serde(rename = "m-index")]
    pub m_index: IndexPair<f64>,
    #[serde(rename = "g-index")]
    pub g_index: IndexPair<u32>,
    #[serde(rename = "o-index")]
    pub o_index: IndexPair<f64>,
    #[serde(rename = "L-index")]
    pub l_index: IndexPair<f64>,
}

/// Summed citation counts of a record subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CitationTotals {
    pub with_self: u64,
    pub without_self: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_from_str() {
        assert_eq!("article".parse::<Collection>().unwrap(), Collection::Article);
        assert_eq!(
            "BookChapter".parse::<Collection>().unwrap(),
            Collection::BookChapter
        );
        assert_eq!(
            "conferencepaper".parse::<Collection>().unwrap(),
            Collection::ConferencePaper
        );
    }

    #[test]
    fn test_collection_unknown_tag() {
        let err = "preprint".parse::<Collection>().unwrap_err();
        assert!(matches!(err, MetricsError::InvalidSelection(_)));
        assert!(err.to_string().contains("thesis"));
    }

    #[test]
    fn test_collection_title() {
        assert_eq!(Collection::All.title(), "research works");
        assert_eq!(Collection::Review.title(), "review");
    }

    #[test]
    fn test_year_window_single() {
        assert_eq!(YearWindow::Single(2020).interval(2026).unwrap(), 2020..2021);
    }

    #[test]
    fn test_year_window_latest() {
        let range = YearWindow::Latest(5).interval(2026).unwrap();
        assert_eq!(range, 2022..2027);
        assert!(!range.contains(&2021));
        assert!(range.contains(&2026));
    }

    #[test]
    fn test_year_window_latest_zero_rejected() {
        assert!(matches!(
            YearWindow::Latest(0).interval(2026),
            Err(MetricsError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_indices_serialize_with_index_names() {
        let indices = CitationIndices {
            h_index: IndexPair::new(3, 2),
            h_frac: IndexPair::new(2.0, 1.5),
            i10_index: IndexPair::new(2, 1),
            m_index: IndexPair::new(0.5, 0.25),
            g_index: IndexPair::new(5, 4),
            o_index: IndexPair::new(7.0, 6.0),
            l_index: IndexPair::new(1.2, 1.0),
        };
        let json = serde_json::to_value(&indices).unwrap();
        assert_eq!(json["h-index"]["with_self"], 3);
        assert_eq!(json["L-index"]["without_self"], 1.0);
    }
}
