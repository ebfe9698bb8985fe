//! Literature search endpoint: paginated download of an author's profile.

use crate::client::InspireClient;
use crate::error::Result;
use crate::parse::{parse_literature_response, LiteraturePage, LITERATURE_FIELDS};
use crate::types::Record;
use chrono::Datelike;
use std::future::Future;
use tracing::{debug, info};

impl InspireClient {
    /// Fetch one page of an author's literature, most recent first.
    ///
    /// `bai` is the INSPIRE author identifier (e.g. `E.Franzin.1`). Pages are
    /// numbered from 1.
    pub async fn literature_page(
        &self,
        bai: &str,
        page: u32,
        current_year: i32,
    ) -> Result<LiteraturePage> {
        let query = format!("a {}", bai);
        let size = self.page_size.to_string();
        let page_str = page.to_string();
        let params = [
            ("q", query.as_str()),
            ("sort", "mostrecent"),
            ("size", size.as_str()),
            ("page", page_str.as_str()),
            ("fields", LITERATURE_FIELDS),
        ];

        let body = self.get("/literature", &params).await?;
        parse_literature_response(&body, current_year)
    }

    /// Download every record of an author's profile.
    pub async fn fetch_profile(&self, bai: &str) -> Result<Vec<Record>> {
        self.fetch_profile_with_progress(bai, |_, _| {}).await
    }

    /// Download every record of an author's profile, calling `on_page` with
    /// the number of pages fetched so far and the expected page count.
    pub async fn fetch_profile_with_progress<F>(
        &self,
        bai: &str,
        on_page: F,
    ) -> Result<Vec<Record>>
    where
        F: FnMut(u32, u32),
    {
        let current_year = chrono::Local::now().year();
        info!(bai, "Downloading profile");
        let client = self;
        let records = paginate(
            move |page| client.literature_page(bai, page, current_year),
            self.page_size,
            on_page,
        )
        .await?;
        info!(bai, records = records.len(), "Profile downloaded");
        Ok(records)
    }
}

/// Fetch pages until the reported total is covered or a page comes back empty.
async fn paginate<P, Fut, F>(mut fetch: P, page_size: u32, mut on_page: F) -> Result<Vec<Record>>
where
    P: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<LiteraturePage>>,
    F: FnMut(u32, u32),
{
    let first = fetch(1).await?;
    let pages = page_count(first.total, page_size).max(1);
    debug!(total = first.total, pages, "Fetched first page");
    on_page(1, pages);

    let mut records = first.records;
    for page in 2..=pages {
        let next = fetch(page).await?;
        debug!(page, hits = next.records.len(), "Fetched page");
        if next.records.is_empty() {
            on_page(pages, pages);
            break;
        }
        records.extend(next.records);
        on_page(page, pages);
    }

    Ok(records)
}

/// Number of pages needed for `total` hits.
fn page_count(total: u64, page_size: u32) -> u32 {
    let size = u64::from(page_size.max(1));
    u32::try_from((total + size - 1) / size).unwrap_or(u32::MAX)
}
