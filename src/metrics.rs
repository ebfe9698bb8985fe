//! Author-level citation indices.
//!
//! Every index is computed twice, once on the raw citation counts and once on
//! the counts excluding self cites, from parallel per-record arrays.
//!
//! See <https://en.wikipedia.org/wiki/Author-level_metrics>.

use crate::error::{MetricsError, Result};
use crate::types::{CitationIndices, IndexPair, Record};

/// Threshold for the i10-index.
const I10_THRESHOLD: u32 = 10;

impl CitationIndices {
    /// Compute indices for a record subset.
    ///
    /// Returns `Ok(None)` for an empty subset: there are no metrics to report.
    pub fn from_records(records: &[Record], active_years: u32) -> Result<Option<Self>> {
        let cits: Vec<u32> = records.iter().map(|r| r.citation_count).collect();
        let cits_noself: Vec<u32> = records
            .iter()
            .map(|r| r.citation_count_without_self_citations)
            .collect();
        let authors: Vec<u32> = records.iter().map(|r| r.author_count).collect();
        let ages: Vec<u32> = records.iter().map(|r| r.age_of_publication).collect();
        compute_metrics(&cits, &cits_noself, &authors, &ages, active_years)
    }
}

/// Compute the full set of indices from parallel per-record arrays.
///
/// `active_years` is the m-index denominator and must be positive. Author
/// counts and publication ages are divisors of h-frac and L-index and must be
/// positive as well.
pub fn compute_metrics(
    cits: &[u32],
    cits_noself: &[u32],
    author_counts: &[u32],
    ages: &[u32],
    active_years: u32,
) -> Result<Option<CitationIndices>> {
    let n = cits.len();
    if cits_noself.len() != n || author_counts.len() != n || ages.len() != n {
        return Err(MetricsError::MalformedRecord(format!(
            "per-record arrays differ in length ({}, {}, {}, {})",
            n,
            cits_noself.len(),
            author_counts.len(),
            ages.len()
        )));
    }
    if n == 0 {
        return Ok(None);
    }
    if active_years == 0 {
        return Err(MetricsError::DivisionByZero(
            "m-index needs at least one active year".to_string(),
        ));
    }
    if let Some(i) = author_counts.iter().position(|&a| a == 0) {
        return Err(MetricsError::MalformedRecord(format!(
            "record {} has no authors",
            i
        )));
    }
    if let Some(i) = ages.iter().position(|&a| a == 0) {
        return Err(MetricsError::MalformedRecord(format!(
            "record {} has a publication age of zero",
            i
        )));
    }

    let h_index = IndexPair::new(h_index(cits), h_index(cits_noself));
    let max_cits = IndexPair::new(max_count(cits), max_count(cits_noself));
    let years = f64::from(active_years);

    Ok(Some(CitationIndices {
        h_index,
        h_frac: IndexPair::new(
            h_frac(cits, author_counts),
            h_frac(cits_noself, author_counts),
        ),
        i10_index: IndexPair::new(i10_index(cits), i10_index(cits_noself)),
        m_index: IndexPair::new(
            f64::from(h_index.with_self) / years,
            f64::from(h_index.without_self) / years,
        ),
        g_index: IndexPair::new(g_index(cits), g_index(cits_noself)),
        o_index: IndexPair::new(
            o_index(h_index.with_self, max_cits.with_self),
            o_index(h_index.without_self, max_cits.without_self),
        ),
        l_index: IndexPair::new(
            l_index(cits, author_counts, ages),
            l_index(cits_noself, author_counts, ages),
        ),
    }))
}

fn sorted_desc(values: &[u32]) -> Vec<u32> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted
}

fn max_count(values: &[u32]) -> u32 {
    values.iter().copied().max().unwrap_or(0)
}

/// Largest h such that h records have at least h citations each.
pub fn h_index(cits: &[u32]) -> u32 {
    sorted_desc(cits)
        .into_iter()
        .zip(1u32..)
        .map(|(c, rank)| c.min(rank))
        .max()
        .unwrap_or(0)
}

/// h-index over citation counts divided by the number of authors.
pub fn h_frac(cits: &[u32], author_counts: &[u32]) -> f64 {
    let mut normalized: Vec<f64> = cits
        .iter()
        .zip(author_counts)
        .map(|(&c, &a)| f64::from(c) / f64::from(a))
        .collect();
    normalized.sort_unstable_by(|a, b| b.total_cmp(a));
    normalized
        .into_iter()
        .zip(1u32..)
        .map(|(c, rank)| c.min(f64::from(rank)))
        .fold(0.0, f64::max)
}

/// Number of records with at least ten citations.
pub fn i10_index(cits: &[u32]) -> u32 {
    cits.iter().filter(|&&c| c >= I10_THRESHOLD).count() as u32
}

/// g-index: the running citation total of the top records is capped at the
/// squared rank, and g is the truncated square root of the largest capped value.
pub fn g_index(cits: &[u32]) -> u32 {
    let mut cumsum = 0u64;
    let g2 = sorted_desc(cits)
        .into_iter()
        .zip(1u64..)
        .map(|(c, rank)| {
            cumsum += u64::from(c);
            cumsum.min(rank * rank)
        })
        .max()
        .unwrap_or(0);
    isqrt(g2) as u32
}

/// Geometric mean of the h-index and the most cited record.
pub fn o_index(h_index: u32, max_cits: u32) -> f64 {
    (f64::from(h_index) * f64::from(max_cits)).sqrt()
}

/// Natural log of one plus the citations per author per year of age.
pub fn l_index(cits: &[u32], author_counts: &[u32], ages: &[u32]) -> f64 {
    let sum: f64 = cits
        .iter()
        .zip(author_counts)
        .zip(ages)
        .map(|((&c, &a), &age)| f64::from(c) / (f64::from(a) * f64::from(age)))
        .sum();
    sum.ln_1p()
}

// Floor of the square root, corrected for float rounding on large inputs.
fn isqrt(v: u64) -> u64 {
    let mut r = (v as f64).sqrt() as u64;
    while r.checked_mul(r).map_or(true, |sq| sq > v) {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).map_or(false, |sq| sq <= v) {
        r += 1;
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ones(n: usize) -> Vec<u32> {
        vec![1; n]
    }

    #[test]
    fn test_h_index_example() {
        assert_eq!(h_index(&[20, 10, 5, 3, 1]), 3);
        assert_eq!(h_index(&[1, 3, 20, 5, 10]), 3);
    }

    #[test]
    fn test_h_index_bounds() {
        let cases: [&[u32]; 5] = [&[0], &[100], &[1, 1, 1, 1], &[50, 40, 30], &[0, 0, 7]];
        for cits in cases {
            let h = h_index(cits);
            assert!(h as usize <= cits.len());
            assert!(h <= *cits.iter().max().unwrap());
        }
    }

    #[test]
    fn test_i10_index() {
        assert_eq!(i10_index(&[20, 10, 5, 3, 1]), 2);
        assert_eq!(i10_index(&[1, 10, 3, 20, 5]), 2);
        assert_eq!(i10_index(&[9, 9]), 0);
    }

    #[test]
    fn test_g_index_single_record_saturates() {
        assert_eq!(g_index(&[100]), 1);
    }

    #[test]
    fn test_g_index_values() {
        // cumsum 20, 30, 35, 38, 39 capped at 1, 4, 9, 16, 25 -> 25
        assert_eq!(g_index(&[20, 10, 5, 3, 1]), 5);
        // cumsum 3, 4, 4 capped at 1, 4, 4 -> 4
        assert_eq!(g_index(&[3, 1, 0]), 2);
        assert_eq!(g_index(&[0, 0, 0]), 0);
    }

    #[test]
    fn test_g_index_monotone() {
        let base = vec![12, 7, 4, 4, 2, 1, 0];
        let g0 = g_index(&base);
        for i in 0..base.len() {
            for bump in [1, 5, 50] {
                let mut raised = base.clone();
                raised[i] += bump;
                assert!(g_index(&raised) >= g0);
            }
        }
    }

    #[test]
    fn test_h_frac_example() {
        assert_eq!(h_frac(&[5, 5], &[1, 2]), 2.0);
    }

    #[test]
    fn test_h_frac_single_author_matches_h_index() {
        let cits = [20, 10, 5, 3, 1];
        assert_eq!(h_frac(&cits, &ones(5)), f64::from(h_index(&cits)));
    }

    #[test]
    fn test_o_index() {
        assert_eq!(o_index(4, 100), 20.0);
        assert_eq!(o_index(0, 0), 0.0);
    }

    #[test]
    fn test_l_index() {
        // 10 / (2 * 5) + 4 / (1 * 4) = 2
        let l = l_index(&[10, 4], &[2, 1], &[5, 4]);
        assert!((l - 3.0f64.ln()).abs() < 1e-12);
        assert_eq!(l_index(&[0, 0], &[1, 1], &[1, 1]), 0.0);
    }

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(24), 4);
        assert_eq!(isqrt(25), 5);
        assert_eq!(isqrt(u64::from(u32::MAX) * u64::from(u32::MAX)), u64::from(u32::MAX));
    }

    #[test]
    fn test_compute_metrics_empty() {
        assert!(compute_metrics(&[], &[], &[], &[], 3).unwrap().is_none());
        assert!(compute_metrics(&[], &[], &[], &[], 0).unwrap().is_none());
    }

    #[test]
    fn test_compute_metrics_zero_span() {
        let err = compute_metrics(&[3], &[2], &[1], &[1], 0).unwrap_err();
        assert!(matches!(err, MetricsError::DivisionByZero(_)));
    }

    #[test]
    fn test_compute_metrics_zero_authors() {
        let err = compute_metrics(&[3, 4], &[2, 4], &[1, 0], &[1, 1], 2).unwrap_err();
        assert!(matches!(err, MetricsError::MalformedRecord(_)));
    }

    #[test]
    fn test_compute_metrics_zero_age() {
        let err = compute_metrics(&[3], &[2], &[1], &[0], 2).unwrap_err();
        assert!(matches!(err, MetricsError::MalformedRecord(_)));
    }

    #[test]
    fn test_compute_metrics_length_mismatch() {
        let err = compute_metrics(&[3, 1], &[2], &[1, 1], &[1, 1], 2).unwrap_err();
        assert!(matches!(err, MetricsError::MalformedRecord(_)));
    }

    #[test]
    fn test_compute_metrics_full() {
        let cits = [20, 10, 5, 3, 1];
        let noself = [15, 9, 5, 2, 0];
        let indices = compute_metrics(&cits, &noself, &ones(5), &ones(5), 4)
            .unwrap()
            .unwrap();

        assert_eq!(indices.h_index, IndexPair::new(3, 3));
        assert_eq!(indices.i10_index, IndexPair::new(2, 1));
        assert_eq!(indices.g_index, IndexPair::new(5, 5));
        assert_eq!(indices.m_index, IndexPair::new(0.75, 0.75));
        assert_eq!(indices.h_frac, IndexPair::new(3.0, 3.0));
        assert!((indices.o_index.with_self - 60.0f64.sqrt()).abs() < 1e-12);
        assert!((indices.o_index.without_self - 45.0f64.sqrt()).abs() < 1e-12);
        assert!((indices.l_index.with_self - 40.0f64.ln()).abs() < 1e-12);
        assert!((indices.l_index.without_self - 32.0f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_compute_metrics_single_record() {
        let indices = compute_metrics(&[100], &[90], &[1], &[2], 1)
            .unwrap()
            .unwrap();
        assert_eq!(indices.h_index.with_self, 1);
        assert_eq!(indices.g_index.with_self, 1);
        assert_eq!(indices.o_index.with_self, 10.0);
    }
}
