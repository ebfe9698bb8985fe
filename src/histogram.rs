//! Breakdown of records by citation band.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower edges of the citation bands after the first.
pub const BIN_EDGES: [u32; 6] = [1, 10, 50, 100, 250, 500];

/// Number of citation bands.
pub const BANDS: usize = BIN_EDGES.len() + 1;

/// Band labels, lowest first.
pub const BAND_LABELS: [&str; BANDS] = [
    "unknown (0)",
    "less known (1–9)",
    "known (10–49)",
    "well-known (50–99)",
    "very well-known (100–249)",
    "famous (250–499)",
    "renowned (500+)",
];

/// Count of records per citation band.
pub type Histogram = [u32; BANDS];

/// Index of the band holding `citations`.
pub fn band(citations: u32) -> usize {
    BIN_EDGES.partition_point(|&edge| edge <= citations)
}

/// Count citation values per band.
pub fn histogram(citations: &[u32]) -> Histogram {
    let mut counts = [0; BANDS];
    for &c in citations {
        counts[band(c)] += 1;
    }
    counts
}

/// Per-band record counts for the citeable and (optionally) published subsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub citeable: Histogram,
    pub citeable_noself: Histogram,
    /// Present only when the published subset is non-empty.
    pub published: Option<(Histogram, Histogram)>,
}

/// Tabulate citation bands for the citeable and published subsets.
///
/// Returns `None` when there is at most one citeable record; a breakdown of a
/// single paper says nothing.
pub fn breakdown(
    citeable: &[u32],
    citeable_noself: &[u32],
    published: &[u32],
    published_noself: &[u32],
) -> Option<Breakdown> {
    if citeable.len() <= 1 {
        return None;
    }
    let published = if published.is_empty() {
        None
    } else {
        Some((histogram(published), histogram(published_noself)))
    };
    Some(Breakdown {
        citeable: histogram(citeable),
        citeable_noself: histogram(citeable_noself),
        published,
    })
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--Breakdown of papers by citations--")?;
        write!(f, "\n{:<26} {:^9}", "", "Citeable")?;
        if self.published.is_some() {
            write!(f, " {:^9}", "Published")?;
        }
        for (i, label) in BAND_LABELS.iter().enumerate() {
            write!(
                f,
                "\n{:<26} {:>4}|{:<4}",
                label, self.citeable[i], self.citeable_noself[i]
            )?;
            if let Some((with_self, without_self)) = &self.published {
                write!(f, " {:>4}|{:<4}", with_self[i], without_self[i])?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(band(0), 0);
        assert_eq!(band(1), 1);
        assert_eq!(band(9), 1);
        assert_eq!(band(10), 2);
        assert_eq!(band(49), 2);
        assert_eq!(band(50), 3);
        assert_eq!(band(249), 4);
        assert_eq!(band(250), 5);
        assert_eq!(band(499), 5);
        assert_eq!(band(500), 6);
        assert_eq!(band(u32::MAX), 6);
    }

    #[test]
    fn test_histogram() {
        let counts = [0, 0, 3, 12, 75, 99, 100, 260, 1200];
        assert_eq!(histogram(&counts), [2, 1, 1, 2, 1, 1, 1]);
    }

    #[test]
    fn test_histogram_sums_to_len() {
        let inputs: [&[u32]; 4] = [&[], &[0], &[5, 5, 5], &[1, 10, 50, 100, 250, 500, 7, 42]];
        for counts in inputs {
            let total: u32 = histogram(counts).iter().sum();
            assert_eq!(total as usize, counts.len());
        }
    }

    #[test]
    fn test_breakdown_needs_two_citeable() {
        assert!(breakdown(&[], &[], &[], &[]).is_none());
        assert!(breakdown(&[12], &[10], &[12], &[10]).is_none());
        assert!(breakdown(&[12, 3], &[10, 3], &[], &[]).is_some());
    }

    #[test]
    fn test_breakdown_without_published() {
        let b = breakdown(&[12, 3], &[10, 0], &[], &[]).unwrap();
        assert!(b.published.is_none());
        let text = b.to_string();
        assert!(text.starts_with("--Breakdown of papers by citations--"));
        assert!(!text.contains("Published"));
        assert_eq!(text.lines().count(), 2 + BANDS);
    }

    #[test]
    fn test_breakdown_with_published() {
        let b = breakdown(&[12, 3, 0], &[10, 0, 0], &[12], &[9]).unwrap();
        let (published, published_noself) = b.published.clone().unwrap();
        assert_eq!(published, [0, 0, 1, 0, 0, 0, 0]);
        assert_eq!(published_noself, [0, 1, 0, 0, 0, 0, 0]);

        let text = b.to_string();
        let known = text.lines().find(|l| l.starts_with("known")).unwrap();
        assert!(known.contains("   1|1   "));
        assert!(known.ends_with("   1|0   "));
        assert!(text.contains("Published"));
    }
}
