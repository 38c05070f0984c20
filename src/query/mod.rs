//! Query module for live result fetching and extraction
//!
//! This module contains the query pipeline, including:
//! - Bounded-time HTTP fetching (with an offline mode)
//! - Result-row container extraction from untrusted HTML
//! - In-band error fragments shaped like real results
//! - The service that records every query into the URL store

mod extractor;
mod fetcher;
mod fragment;
mod service;

pub use extractor::{extract_result_rows, last_match_container, ExtractError, RESULT_ROW_SELECTOR};
pub use fetcher::{build_http_client, synthetic_document, FetchError, Fetcher};
pub use fragment::{escape_html, ExtractedFragment, QueryOutcome};
pub use service::{QueryReport, QueryService};
