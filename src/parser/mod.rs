pub mod extract;
pub mod markdown;
pub mod normalize;

use crate::day::Day;
use crate::error::DayError;
use crate::language::Language;
use extract::ChallengeRecord;

/// A challenge record plus its rendered Markdown prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedChallenge {
    pub record: ChallengeRecord,
    pub markdown: String,
}

/// Two passes: raw page → record → Markdown prompt.
pub fn process_page(raw: &str, day: Day, year: &str, language: Language) -> Result<ParsedChallenge, DayError> {
    let record = extract::extract(raw, day, year, language)?;
    let markdown = markdown::to_markdown(&record.description_html, day);
    Ok(ParsedChallenge { record, markdown })
}
