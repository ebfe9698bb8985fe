//! The INSPIRE-HEP REST API client.

use crate::error::{MetricsError, Result};
use crate::rate_limit::RateLimiter;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Public INSPIRE API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://inspirehep.net/api";

/// Hits per literature page. Larger pages make INSPIRE time out on big profiles.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Attempts per request when the server keeps answering HTTP 429.
const MAX_ATTEMPTS: u32 = 3;

/// Wait applied after an HTTP 429 that carries no `retry-after` header.
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(5);

/// Async client for the INSPIRE literature API.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> inspire_metrics::error::Result<()> {
/// let client = inspire_metrics::InspireClient::from_env()?;
/// let records = client.fetch_profile("E.Franzin.1").await?;
/// println!("{} records", records.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct InspireClient {
    pub(crate) http: Client,
    pub(crate) base_url: String,
    pub(crate) page_size: u32,
    pub(crate) rate_limiter: RateLimiter,
}

impl InspireClient {
    /// Create a client for the public INSPIRE API.
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent(concat!("inspire-metrics/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MetricsError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            rate_limiter: RateLimiter::new(1.0),
        })
    }

    /// Create a client, taking the base URL from `INSPIRE_API_URL` when set.
    pub fn from_env() -> Result<Self> {
        let client = Self::new()?;
        match std::env::var("INSPIRE_API_URL") {
            Ok(url) if !url.is_empty() => {
                Url::parse(&url)
                    .map_err(|e| MetricsError::Config(format!("INSPIRE_API_URL: {}", e)))?;
                Ok(client.with_base_url(url))
            }
            _ => Ok(client),
        }
    }

    /// Override the base URL (useful for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the rate limit (requests per second).
    pub fn with_rate_limit(mut self, per_second: f64) -> Self {
        self.rate_limiter = RateLimiter::new(per_second);
        self
    }

    /// Override the number of hits per page.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Build the URL of an API path with encoded query parameters.
    pub(crate) fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        Url::parse_with_params(&format!("{}{}", self.base_url, path), params)
            .map_err(|e| MetricsError::Config(format!("Invalid API URL: {}", e)))
    }

    /// Make a GET request, waiting out HTTP 429 responses a few times.
    pub(crate) async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<String> {
        let url = self.url(path, params)?;
        let mut attempt = 1;
        loop {
            self.rate_limiter.acquire().await;
            debug!(url = %url, attempt, "GET");

            let response = self
                .http
                .get(url.clone())
                .header("Accept", "application/json")
                .send()
                .await?;
            self.rate_limiter
                .update_from_headers(response.headers())
                .await;

            match handle_response(response).await {
                Err(MetricsError::RateLimited { retry_after }) if attempt < MAX_ATTEMPTS => {
                    let wait = retry_after.unwrap_or(DEFAULT_RETRY_AFTER);
                    warn!(attempt, wait_secs = wait.as_secs(), "Rate limited, waiting");
                    self.rate_limiter.back_off(wait).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}

/// Handle the HTTP response, mapping status codes to errors.
async fn handle_response(response: reqwest::Response) -> Result<String> {
    let status = response.status().as_u16();

    match status {
        200..=299 => Ok(response.text().await?),
        404 => Err(MetricsError::NotFound(response.url().to_string())),
        429 => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs);
            Err(MetricsError::RateLimited { retry_after })
        }
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(MetricsError::Api {
                status,
                message: body,
            })
        }
    }
}
