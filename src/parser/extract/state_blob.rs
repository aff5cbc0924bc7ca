use scraper::{Html, Selector};
use serde_json::Value;
use tracing::warn;

use super::{RawChallenge, STATE_BLOB_MARKER};
use crate::error::DayError;
use crate::language::Language;

const DESCRIPTION_POINTER: &str = "/props/pageProps/description";
const DEFAULT_CODE_POINTER: &str = "/props/pageProps/defaultCode";

/// Read the description and starter code from the embedded page-state JSON.
pub fn extract(html: &str, language: Language) -> Result<RawChallenge, DayError> {
    let blob = script_text(html).ok_or(DayError::ExtractionNotFound("page state script"))?;

    // Malformed JSON is handled like a missing field.
    let state: Value = serde_json::from_str(&blob).map_err(|e| {
        warn!("page state is not valid JSON: {}", e);
        DayError::ExtractionNotFound("page state")
    })?;

    let description_html = non_empty_str(&state, DESCRIPTION_POINTER)
        .ok_or(DayError::ExtractionNotFound("pageProps.description"))?;
    let function_text = non_empty_str(
        &state,
        &format!("{}/{}", DEFAULT_CODE_POINTER, language.state_key()),
    )
    .ok_or(DayError::ExtractionNotFound("pageProps.defaultCode"))?;

    Ok(RawChallenge {
        description_html,
        function_text,
    })
}

fn script_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(&format!("script#{}", STATE_BLOB_MARKER)).ok()?;
    let script = document.select(&selector).next()?;
    Some(script.text().collect())
}

fn non_empty_str(state: &Value, pointer: &str) -> Option<String> {
    state
        .pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}
