// src/services/scrapers/mod.rs

//! Resort status page scrapers.
//!
//! Each site gets a [`SiteAdapter`] that turns flattened page text into a
//! [`ScrapedStatus`]. Fetching, text extraction and failure handling are
//! shared; the adapters only hold the per-site text heuristics.

mod lotte_arai;
mod madarao;

use chrono::{DateTime, Utc};
use futures::future::join_all;

use crate::error::{AppError, Result};
use crate::models::{ResortStatus, ScrapedSnapshot, ScrapedStatus};
use crate::utils::http::fetch_text;
use crate::utils::text::page_text;

pub use lotte_arai::LotteArai;
pub use madarao::Madarao;

/// Per-site extraction of operational facts from page text.
pub trait SiteAdapter: Send + Sync {
    /// Catalog id the record is stored under.
    fn resort_id(&self) -> &'static str;

    /// Pages to fetch, in order. Their text is concatenated.
    fn urls(&self) -> &'static [&'static str];

    /// Best-effort record from page text. Never fails; unknown fields stay unset.
    fn produce(&self, page_text: &str) -> ScrapedStatus;
}

/// All known site adapters.
pub fn adapters() -> Vec<Box<dyn SiteAdapter>> {
    vec![Box::new(Madarao), Box::new(LotteArai)]
}

/// Status from a lift count against the resort's total.
pub(crate) fn status_from_lifts(open: Option<u32>, total: u32) -> ResortStatus {
    match open {
        None => ResortStatus::Unknown,
        Some(0) => ResortStatus::Closed,
        Some(n) if n < total => ResortStatus::Partial,
        Some(_) => ResortStatus::Open,
    }
}

async fn fetch_site_text(client: &reqwest::Client, adapter: &dyn SiteAdapter) -> Result<String> {
    let mut parts = Vec::with_capacity(adapter.urls().len());
    for url in adapter.urls() {
        log::debug!("Fetching {}", url);
        let html = fetch_text(client, url).await?;
        parts.push(page_text(&html)?);
    }
    Ok(parts.join("\n"))
}

/// Fetch and parse one site. A fetch failure yields an UNKNOWN record with
/// the error set.
pub async fn scrape_site(
    client: &reqwest::Client,
    adapter: &dyn SiteAdapter,
    now: DateTime<Utc>,
) -> ScrapedStatus {
    match fetch_site_text(client, adapter).await {
        Ok(text) => {
            let mut status = adapter.produce(&text);
            status.scraped_at = Some(now);
            log::info!("Scraped {}: {}", adapter.resort_id(), status.status);
            status
        }
        Err(e) => {
            let err = AppError::scrape(adapter.resort_id(), e);
            log::warn!("{}", err);
            ScrapedStatus::failed(err.to_string(), now)
        }
    }
}

/// Scrape every site concurrently.
pub async fn scrape_all(
    client: &reqwest::Client,
    adapters: &[Box<dyn SiteAdapter>],
    now: DateTime<Utc>,
) -> ScrapedSnapshot {
    let tasks = adapters.iter().map(|adapter| async move {
        let status = scrape_site(client, adapter.as_ref(), now).await;
        (adapter.resort_id().to_string(), status)
    });
    ScrapedSnapshot {
        scraped_at: Some(now),
        resorts: join_all(tasks).await.into_iter().collect(),
    }
}
