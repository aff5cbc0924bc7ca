use scraper::{Html, Selector};

use super::RawChallenge;
use crate::error::DayError;

pub const DESCRIPTION_SELECTOR: &str = "#challenge-description";
/// Code editor container; each `.view-line` child is one source line.
pub const CODE_SELECTOR: &str = ".view-lines";

/// Read the description and starter code from client-rendered markup.
pub fn extract(html: &str) -> Result<RawChallenge, DayError> {
    let document = Html::parse_document(html);

    let description_html = inner_html(&document, DESCRIPTION_SELECTOR)
        .ok_or(DayError::ExtractionNotFound("description container"))?;
    let function_text =
        inner_html(&document, CODE_SELECTOR).ok_or(DayError::ExtractionNotFound("code container"))?;

    Ok(RawChallenge {
        description_html,
        function_text,
    })
}

/// Inner markup of the first match; an empty container counts as missing.
fn inner_html(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    let element = document.select(&selector).next()?;
    let inner = element.inner_html();
    if inner.trim().is_empty() {
        None
    } else {
        Some(inner.trim().to_string())
    }
}
