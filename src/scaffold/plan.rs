use std::path::PathBuf;

use super::templates::{replace_year_placeholder, TemplateContent, TemplateLibrary, TemplateSelection};
use crate::day::Day;
use crate::error::DayError;
use crate::language::Language;
use crate::parser::normalize::FunctionData;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCopy {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Everything one call writes, computed before touching the project tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldPlan {
    pub root: PathBuf,
    pub dirs: Vec<PathBuf>,
    pub files: Vec<PlannedFile>,
    pub copies: Vec<PlannedCopy>,
}

impl ScaffoldPlan {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ScaffoldPlan {
            root: root.into(),
            dirs: Vec::new(),
            files: Vec::new(),
            copies: Vec::new(),
        }
    }

    pub fn with_templates(
        mut self,
        library: &TemplateLibrary,
        selection: &TemplateSelection,
        year: &str,
    ) -> Result<Self, DayError> {
        for &key in selection.keys() {
            let file = library.load(key)?;
            let target = self.root.join(file.key.file_name());
            match file.content {
                TemplateContent::Directory(from) => self.copies.push(PlannedCopy { from, to: target }),
                TemplateContent::Text(text) => {
                    let contents = if key.substitutes_year() {
                        replace_year_placeholder(&text, year)
                    } else {
                        text
                    };
                    self.files.push(PlannedFile {
                        path: target,
                        contents,
                    });
                }
            }
        }
        Ok(self)
    }

    pub fn with_day(
        mut self,
        day: Day,
        markdown: &str,
        function: &FunctionData,
        language: Language,
        with_tests: bool,
    ) -> Self {
        let stem = day.padded();
        let dir = self.root.join(&stem);
        let ext = language.extension();

        self.files.push(PlannedFile {
            path: dir.join(format!("{}.md", stem)),
            contents: markdown.to_string(),
        });
        self.files.push(PlannedFile {
            path: dir.join(format!("{}.{}", stem, ext)),
            contents: solution_source(function),
        });
        if with_tests {
            self.files.push(PlannedFile {
                path: dir.join(format!("{}.spec.{}", stem, ext)),
                contents: test_source(&stem, function),
            });
        }
        self.dirs.push(dir);
        self
    }
}

pub fn solution_source(function: &FunctionData) -> String {
    format!(
        "export {{ {} }};\n\n{}\n",
        function.function_name, function.function_code
    )
}

pub fn test_source(stem: &str, function: &FunctionData) -> String {
    let name = &function.function_name;
    format!(
        "import {{ {name} }} from './{stem}';\n\
         \n\
         describe('{name}', () => {{\n\
         \x20 it.todo('returns the expected result');\n\
         }});\n"
    )
}
