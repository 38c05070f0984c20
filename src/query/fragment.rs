//! Extracted fragments and in-band error rows
//!
//! A fragment is always a `<ul>` of `<li class="result-row">` items, including
//! when a query failed: failures are rendered as a single explanatory row so
//! callers never need a separate error-rendering path.

use crate::query::fetcher::FetchError;
use serde::Serialize;

/// Serialized HTML subtree returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtractedFragment {
    html: String,
}

impl ExtractedFragment {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// Row explaining that the upstream fetch failed
    pub fn fetch_failed(error: &FetchError) -> Self {
        Self::notice("fetch", &format!("ERROR: {}", error))
    }

    /// Row explaining that the page held no result rows
    pub fn no_results(url: &str) -> Self {
        Self::notice("no-results", &format!("No result rows found : {}", url))
    }

    fn notice(kind: &str, message: &str) -> Self {
        Self::new(format!(
            r#"<ul><li class="result-row" data-error="{}"> {} </li></ul>"#,
            kind,
            escape_html(message)
        ))
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }
}

/// Result of running one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Rows extracted from the live page
    Ok(ExtractedFragment),

    /// Fetch or extraction failed; the fragment carries a notice row
    Degraded(ExtractedFragment),
}

impl QueryOutcome {
    pub fn fragment(&self) -> &ExtractedFragment {
        match self {
            Self::Ok(fragment) | Self::Degraded(fragment) => fragment,
        }
    }

    pub fn into_fragment(self) -> ExtractedFragment {
        match self {
            Self::Ok(fragment) | Self::Degraded(fragment) => fragment,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

/// Escapes text for use inside element content or a quoted attribute
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
