//! Request pacing for the INSPIRE REST API.
//!
//! INSPIRE allows a small burst of requests per client and answers HTTP 429
//! beyond it. Profile downloads are sequential, so a fixed minimum spacing
//! plus the server's own quota headers is enough.

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};
use tracing::debug;

/// Enforces a minimum interval between requests and honours server back-off.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    inner: Arc<Mutex<Pacing>>,
}

#[derive(Debug)]
struct Pacing {
    min_interval: Duration,
    last_request: Option<Instant>,
    /// No request may be sent before this instant.
    blocked_until: Option<Instant>,
}

impl RateLimiter {
    /// Allow at most `per_second` requests per second.
    pub fn new(per_second: f64) -> Self {
        let min_interval = if per_second > 0.0 {
            Duration::from_secs_f64(1.0 / per_second)
        } else {
            Duration::ZERO
        };
        Self {
            inner: Arc::new(Mutex::new(Pacing {
                min_interval,
                last_request: None,
                blocked_until: None,
            })),
        }
    }

    /// Wait until a request is allowed, then mark it as sent.
    pub async fn acquire(&self) {
        let mut pacing = self.inner.lock().await;

        let mut ready_at = pacing.last_request.map(|last| last + pacing.min_interval);
        if let Some(blocked) = pacing.blocked_until {
            ready_at = Some(ready_at.map_or(blocked, |r| r.max(blocked)));
        }

        if let Some(ready) = ready_at {
            if ready > Instant::now() {
                tokio::time::sleep_until(ready).await;
            }
        }

        pacing.blocked_until = None;
        pacing.last_request = Some(Instant::now());
    }

    /// Hold off further requests for `wait`.
    pub async fn back_off(&self, wait: Duration) {
        let mut pacing = self.inner.lock().await;
        let until = Instant::now() + wait;
        debug!(wait_ms = wait.as_millis() as u64, "Backing off");
        pacing.blocked_until = Some(pacing.blocked_until.map_or(until, |b| b.max(until)));
    }

    /// Read the quota headers of a response; an exhausted quota blocks requests
    /// until the reported reset time.
    pub async fn update_from_headers(&self, headers: &reqwest::header::HeaderMap) {
        let remaining = header_u64(headers, "x-ratelimit-remaining");
        let reset = header_u64(headers, "x-ratelimit-reset");

        if let (Some(0), Some(reset)) = (remaining, reset) {
            let now_unix = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs();
            if reset > now_unix {
                self.back_off(Duration::from_secs(reset - now_unix)).await;
            }
        }
    }
}

fn header_u64(headers: &reqwest::header::HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
}
