pub mod dom;
pub mod state_blob;

use tracing::{debug, warn};

use super::normalize::{self, FunctionData};
use crate::day::Day;
use crate::error::DayError;
use crate::language::Language;

/// Id of the embedded page-state script block.
pub const STATE_BLOB_MARKER: &str = "__NEXT_DATA__";

/// Shape of the raw page content handed to the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource<'a> {
    Dom(&'a str),
    StateBlob(&'a str),
}

impl<'a> ExtractionSource<'a> {
    pub fn detect(raw: &'a str) -> Self {
        if raw.contains(STATE_BLOB_MARKER) {
            ExtractionSource::StateBlob(raw)
        } else {
            ExtractionSource::Dom(raw)
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ExtractionSource::Dom(_) => "dom",
            ExtractionSource::StateBlob(_) => "state-blob",
        }
    }
}

/// The two raw strings both source shapes resolve to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChallenge {
    pub description_html: String,
    pub function_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeRecord {
    pub day: Day,
    pub year: String,
    pub description_html: String,
    pub function_data: FunctionData,
}

pub fn extract_raw(source: ExtractionSource<'_>, language: Language) -> Result<RawChallenge, DayError> {
    match source {
        ExtractionSource::Dom(html) => dom::extract(html),
        ExtractionSource::StateBlob(html) => state_blob::extract(html, language),
    }
}

/// Extract and normalize one day's challenge from raw page content.
pub fn extract(raw: &str, day: Day, year: &str, language: Language) -> Result<ChallengeRecord, DayError> {
    let source = ExtractionSource::detect(raw);
    let found = extract_raw(source, language).inspect_err(|e| {
        warn!(day = day.number(), source = source.kind(), "{}", e);
    })?;

    let function_data = normalize::normalize(&found.function_text).inspect_err(|e| {
        warn!(day = day.number(), "could not parse starter code: {}", e);
    })?;

    debug!(
        day = day.number(),
        source = source.kind(),
        function = %function_data.function_name,
        "challenge extracted"
    );

    Ok(ChallengeRecord {
        day,
        year: year.to_string(),
        description_html: found.description_html,
        function_data,
    })
}

// ── Tests ──
