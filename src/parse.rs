//! INSPIRE literature response parsing.
//!
//! Shapes raw literature hits into [`Record`]s: collection tags are normalized,
//! the record year is resolved from the earliest date and the publication info,
//! and the age of the publication is derived from the current year.

use crate::error::{MetricsError, Result};
use crate::types::Record;
use serde::Deserialize;
use tracing::warn;

/// Fields requested from the literature endpoint.
pub const LITERATURE_FIELDS: &str = "control_number,titles,citation_count,citation_count_without_self_citations,author_count,earliest_date,publication_info,document_type,publication_type,citeable,refereed";

/// Literature search response wrapper.
#[derive(Debug, Deserialize)]
pub(crate) struct LiteratureResponse {
    pub hits: LiteratureHits,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LiteratureHits {
    #[serde(default)]
    pub hits: Vec<LiteratureHit>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LiteratureHit {
    pub metadata: LiteratureMetadata,
}

/// Custom deserializer for a year given either as a string or an integer.
fn deserialize_year_option<'de, D>(deserializer: D) -> std::result::Result<Option<i32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct YearVisitor;

    impl<'de> Visitor<'de> for YearVisitor {
        type Value = Option<i32>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a year as string or integer, or null")
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(year_prefix(v))
        }

        fn visit_i64<E>(self, v: i64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            i32::try_from(v).map(Some).map_err(E::custom)
        }

        fn visit_u64<E>(self, v: u64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            i32::try_from(v).map(Some).map_err(E::custom)
        }
    }

    deserializer.deserialize_option(YearVisitor)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PublicationInfo {
    #[serde(deserialize_with = "deserialize_year_option", default)]
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Title {
    pub title: String,
}

/// Metadata of a single literature hit. Presence markers are kept as options
/// because INSPIRE omits the key rather than sending `false`.
#[derive(Debug, Deserialize)]
pub(crate) struct LiteratureMetadata {
    pub control_number: Option<u64>,
    #[serde(default)]
    pub titles: Vec<Title>,
    pub citation_count: Option<u32>,
    pub citation_count_without_self_citations: Option<u32>,
    pub author_count: Option<u32>,
    pub earliest_date: Option<String>,
    #[serde(default)]
    pub publication_info: Vec<PublicationInfo>,
    #[serde(default)]
    pub document_type: Vec<String>,
    #[serde(default)]
    pub publication_type: Vec<String>,
    pub citeable: Option<serde_json::Value>,
    pub refereed: Option<serde_json::Value>,
}

/// A parsed page of literature results.
#[derive(Debug, Clone)]
pub struct LiteraturePage {
    pub records: Vec<Record>,
    /// Total number of hits for the query, across all pages.
    pub total: u64,
}

/// Parse a literature search JSON response.
pub fn parse_literature_response(json: &str, current_year: i32) -> Result<LiteraturePage> {
    let response: LiteratureResponse = serde_json::from_str(json)
        .map_err(|e| MetricsError::Parse(format!("Invalid INSPIRE JSON: {}", e)))?;

    let records = response
        .hits
        .hits
        .into_iter()
        .map(|hit| metadata_to_record(hit.metadata, current_year))
        .collect::<Result<Vec<_>>>()?;

    Ok(LiteraturePage {
        records,
        total: response.hits.total,
    })
}

/// Convert literature metadata to a [`Record`].
fn metadata_to_record(meta: LiteratureMetadata, current_year: i32) -> Result<Record> {
    let id = meta
        .control_number
        .map(|n| n.to_string())
        .unwrap_or_else(|| "without control number".to_string());

    let author_count = meta.author_count.ok_or_else(|| {
        MetricsError::MalformedRecord(format!("record {} has no author_count", id))
    })?;
    let earliest_year = meta
        .earliest_date
        .as_deref()
        .and_then(year_prefix)
        .ok_or_else(|| {
            MetricsError::MalformedRecord(format!("record {} has no usable earliest_date", id))
        })?;

    let year = record_year(earliest_year, &meta.publication_info);
    // Age 0 is kept; the metrics engine rejects it if the record is used.
    let age = u32::try_from(current_year - year + 1).unwrap_or(0);
    if age == 0 {
        warn!(record = %id, year, current_year, "Record dated after the current year");
    }

    let document_type = meta
        .document_type
        .into_iter()
        .chain(meta.publication_type)
        .map(|tag| normalize_tag(&tag))
        .collect();

    Ok(Record {
        control_number: meta.control_number,
        title: meta
            .titles
            .into_iter()
            .next()
            .map(|t| t.title)
            .unwrap_or_default(),
        citation_count: meta.citation_count.unwrap_or(0),
        citation_count_without_self_citations: meta
            .citation_count_without_self_citations
            .unwrap_or(0),
        author_count,
        age_of_publication: age,
        document_type,
        publication_or_earliest_date: year,
        citeable: meta.citeable.is_some(),
        refereed: meta.refereed.is_some(),
    })
}

/// The publication year when present, otherwise the earliest date, whichever
/// is later.
fn record_year(earliest_year: i32, publication_info: &[PublicationInfo]) -> i32 {
    publication_info
        .first()
        .and_then(|info| info.year)
        .map_or(earliest_year, |published| published.max(earliest_year))
}

/// Collapse multi-word INSPIRE tags into the single-word collection names.
pub fn normalize_tag(tag: &str) -> String {
    match tag {
        "conference paper" => "conferencepaper".to_string(),
        "book chapter" => "bookchapter".to_string(),
        other => other.to_string(),
    }
}

/// Year of a date string such as "2019", "2019-05" or "2019-05-12".
fn year_prefix(date: &str) -> Option<i32> {
    date.get(..4).and_then(|y| y.parse().ok())
}
