//! Result-region extraction
//!
//! Finds the container of the listing rows (`<li class="result-row">`) in an
//! arbitrary page and serializes just that subtree. Parsing goes through
//! html5ever's error-recovering tree builder, so unclosed or unknown tags
//! still produce a usable tree.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Matches list items whose class attribute is exactly `result-row`
pub const RESULT_ROW_SELECTOR: &str = r#"li[class="result-row"]"#;

/// Errors that can occur while extracting result rows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("Missing result rows in the document")]
    NotFound,

    #[error("Invalid result-row selector: {0}")]
    InvalidSelector(String),
}

/// Returns the serialized HTML of the element that contains the result rows
///
/// When the page holds several separate blocks of rows, only the container
/// chosen by [`last_match_container`] is returned.
///
/// # Example
///
/// ```
/// use column_scout::query::extract_result_rows;
///
/// let page = r#"<html><body><ul><li class="result-row">X</li></ul></body></html>"#;
/// assert_eq!(
///     extract_result_rows(page).unwrap(),
///     r#"<ul><li class="result-row">X</li></ul>"#
/// );
/// ```
pub fn extract_result_rows(raw_html: &str) -> Result<String, ExtractError> {
    let document = Html::parse_document(raw_html);
    let selector = Selector::parse(RESULT_ROW_SELECTOR)
        .map_err(|_| ExtractError::InvalidSelector(RESULT_ROW_SELECTOR.to_string()))?;

    let container =
        last_match_container(document.select(&selector)).ok_or(ExtractError::NotFound)?;
    Ok(container.html())
}

/// Tie-break rule: the parent of the last matching row in document order wins
///
/// Rows are visited in pre-order; earlier blocks are not merged in.
pub fn last_match_container<'a>(
    rows: impl Iterator<Item = ElementRef<'a>>,
) -> Option<ElementRef<'a>> {
    rows.filter_map(|row| row.parent().and_then(ElementRef::wrap)).last()
}
