//! Query service: fetch, extract, and record a saved query
//!
//! This is the one place where the fetcher/extractor pipeline meets the URL
//! store. Fetch and extraction failures never escape as errors; they become
//! degraded fragments. The URL is recorded whatever the fetch produced.

use crate::config::FetcherConfig;
use crate::query::extractor::{extract_result_rows, ExtractError};
use crate::query::fetcher::Fetcher;
use crate::query::fragment::{ExtractedFragment, QueryOutcome};
use crate::store::{Slot, Store, StoreResult};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of a query plus the target set's slots after recording it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryReport {
    pub outcome: QueryOutcome,
    pub urls: Vec<Slot>,
}

/// Orchestrates Fetcher → Extractor → Store
pub struct QueryService {
    fetcher: Fetcher,
    store: Arc<Store>,
    max_jitter_ms: u64,
}

impl QueryService {
    /// Creates a service around an existing fetcher and store
    ///
    /// `max_jitter_ms` bounds the random delay before each fetch; zero disables it.
    pub fn new(fetcher: Fetcher, store: Arc<Store>, max_jitter_ms: u64) -> Self {
        Self {
            fetcher,
            store,
            max_jitter_ms,
        }
    }

    /// Builds the fetcher from configuration and wires it to `store`
    pub fn from_config(config: &FetcherConfig, store: Arc<Store>) -> Result<Self, reqwest::Error> {
        Ok(Self::new(Fetcher::new(config)?, store, config.max_jitter_ms))
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Fetches `url` and extracts its result rows, degrading on any failure
    pub async fn fetch_fragment(&self, url: &str) -> QueryOutcome {
        let delay = jitter(self.max_jitter_ms);
        if !delay.is_zero() {
            tracing::debug!("Sleeping {}ms before fetching {}", delay.as_millis(), url);
            tokio::time::sleep(delay).await;
        }

        let body = match self.fetcher.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Query fetch failed: {}", e);
                return QueryOutcome::Degraded(ExtractedFragment::fetch_failed(&e));
            }
        };

        match extract_result_rows(&body) {
            Ok(html) => QueryOutcome::Ok(ExtractedFragment::new(html)),
            Err(ExtractError::NotFound) => {
                tracing::info!("No result rows in response from {}", url);
                QueryOutcome::Degraded(ExtractedFragment::no_results(url))
            }
            Err(e) => {
                tracing::error!("Extraction failed for {}: {}", url, e);
                QueryOutcome::Degraded(ExtractedFragment::no_results(url))
            }
        }
    }

    /// Runs the query for `url` and records it at (`set_index`, `column_index`)
    ///
    /// # Returns
    ///
    /// * `Ok(QueryReport)` - Fragment (possibly degraded) and the set's slots
    /// * `Err(StoreError)` - The URL could not be recorded (bad index or
    ///   persistence failure)
    pub async fn run_query(
        &self,
        set_index: usize,
        column_index: usize,
        url: &str,
    ) -> StoreResult<QueryReport> {
        let outcome = self.fetch_fragment(url).await;
        let urls = self.store.set_url_at(set_index, column_index, url)?;

        tracing::info!(
            "Query for set {} column {} finished (degraded: {})",
            set_index,
            column_index,
            outcome.is_degraded()
        );

        Ok(QueryReport { outcome, urls })
    }
}

/// Random delay in `[0, max_ms)` milliseconds
fn jitter(max_ms: u64) -> Duration {
    if max_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::thread_rng().gen_range(0..max_ms))
}
