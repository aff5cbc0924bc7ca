use std::path::PathBuf;

use tracing::info;

use crate::day::Day;
use crate::error::DayError;
use crate::parser;
use crate::scaffold::templates::TemplateSelection;
use crate::scaffold::Scaffolder;

/// What one `generate` run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayReport {
    pub day: Day,
    pub function_name: String,
    pub day_dir: PathBuf,
    pub written: Vec<PathBuf>,
}

/// Raw page → record → Markdown → files, for a single day.
pub fn generate_day(
    raw: &str,
    day: Day,
    year: &str,
    selection: &TemplateSelection,
    scaffolder: &Scaffolder,
) -> Result<DayReport, DayError> {
    let parsed = parser::process_page(raw, day, year, scaffolder.language())?;
    let function = &parsed.record.function_data;

    let record_year = &parsed.record.year;
    let written = scaffolder.scaffold(record_year, day, &parsed.markdown, function, selection)?;

    info!(day = day.number(), function = %function.function_name, "day generated");
    Ok(DayReport {
        day,
        function_name: function.function_name.clone(),
        day_dir: scaffolder.day_dir(record_year, day),
        written,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::language::Language;
    use crate::scaffold::templates::TemplateLibrary;

    fn scaffolder(base: &std::path::Path) -> Scaffolder {
        Scaffolder::new(base, TemplateLibrary::bundled(), Language::TypeScript, true)
    }

    #[test]
    fn hello_sum_end_to_end() {
        let tmp = tempfile::tempdir().unwrap();
        let raw = r#"<div id="challenge-description"><p>Hello</p></div>
<div class="view-lines">function sum(a, b) { return a + b; }</div>"#;
        let report = generate_day(
            raw,
            Day::new(1).unwrap(),
            "2024",
            &TemplateSelection::default(),
            &scaffolder(tmp.path()),
        )
        .unwrap();

        assert_eq!(report.function_name, "sum");
        assert_eq!(report.day_dir, tmp.path().join("adventjs-2024/01"));
        assert_eq!(report.written.len(), 3);

        let md = fs::read_to_string(report.day_dir.join("01.md")).unwrap();
        assert!(md.starts_with("# Day 1\n\nHello"));
        assert_eq!(
            fs::read_to_string(report.day_dir.join("01.ts")).unwrap(),
            "export { sum };\n\nfunction sum(a, b) { return a + b; }\n"
        );
    }

    #[test]
    fn state_blob_page_in_javascript() {
        let tmp = tempfile::tempdir().unwrap();
        let raw = fs::read_to_string("tests/fixtures/state_blob_page.html").unwrap();
        let s = Scaffolder::new(tmp.path(), TemplateLibrary::bundled(), Language::JavaScript, false);
        let report = generate_day(&raw, Day::new(4).unwrap(), "2024", &TemplateSelection::default(), &s).unwrap();

        assert_eq!(report.written.len(), 2);
        let js = fs::read_to_string(report.day_dir.join("04.js")).unwrap();
        assert!(js.starts_with("export { createXmasTree };\n\nfunction createXmasTree(ornament, height) {"));
        assert_eq!(js.matches("export").count(), 1);
        assert!(!report.day_dir.join("04.spec.js").exists());
    }

    #[test]
    fn failed_extraction_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let raw = fs::read_to_string("tests/fixtures/missing_description.html").unwrap();
        let err = generate_day(
            &raw,
            Day::new(5).unwrap(),
            "2024",
            &TemplateSelection::default(),
            &scaffolder(tmp.path()),
        )
        .unwrap_err();

        assert!(matches!(err, DayError::ExtractionNotFound(_)));
        assert!(!tmp.path().join("adventjs-2024").exists());
    }
}
