//! # inspire-metrics
//!
//! Author-level citation metrics for INSPIRE-HEP profiles.
//!
//! Provides:
//! - **Library**: record selection, the metrics engine (h, h-frac, g, i10, m,
//!   o and L indices), citation breakdowns, and an async profile loader
//! - **CLI**: `citations` binary for terminal use
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn example() -> inspire_metrics::error::Result<()> {
//! use inspire_metrics::{analyze, Analysis, Filters, InspireClient};
//!
//! let client = InspireClient::from_env()?;
//! let records = client.fetch_profile("E.Franzin.1").await?;
//!
//! match analyze(&records, &Filters::default(), 2026)? {
//!     Analysis::Report(report) => {
//!         if let Some(indices) = &report.indices {
//!             println!("h-index: {}", indices.h_index.with_self);
//!         }
//!     }
//!     Analysis::Empty { warning } => println!("{}", warning),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics from plain arrays
//!
//! ```
//! use inspire_metrics::metrics::compute_metrics;
//!
//! let cits = [20, 10, 5, 3, 1];
//! let indices = compute_metrics(&cits, &cits, &[1; 5], &[1; 5], 5)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(indices.h_index.with_self, 3);
//! assert_eq!(indices.i10_index.with_self, 2);
//! ```

pub mod analysis;
pub mod client;
pub mod error;
pub mod histogram;
pub mod literature;
pub mod metrics;
pub mod parse;
pub mod profile;
pub mod rate_limit;
pub mod selection;
pub mod summary;
pub mod types;

// Re-export key types at the crate root.
pub use analysis::{analyze, Analysis, Report};
pub use client::InspireClient;
pub use error::MetricsError;
pub use histogram::Breakdown;
pub use profile::ProfileCache;
pub use types::*;
