pub mod plan;
pub mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::CliConfig;
use crate::day::Day;
use crate::error::{DayError, FsContext};
use crate::language::Language;
use crate::parser::normalize::FunctionData;
use plan::ScaffoldPlan;
use templates::{copy_dir, TemplateLibrary, TemplateSelection};

pub const ROOT_FOLDER_PREFIX: &str = "adventjs-";

pub fn root_folder_name(year: &str) -> String {
    format!("{}{}", ROOT_FOLDER_PREFIX, year)
}

/// First `adventjs-*` directory directly under `base`, by name.
pub fn find_project_root(base: &Path) -> Option<PathBuf> {
    let mut found: Vec<PathBuf> = fs::read_dir(base)
        .ok()?
        .filter_map(Result::ok)
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter(|e| e.file_name().to_string_lossy().starts_with(ROOT_FOLDER_PREFIX))
        .map(|e| e.path())
        .collect();
    found.sort();
    found.into_iter().next()
}

/// Writes project roots and day folders under a base directory.
#[derive(Debug, Clone)]
pub struct Scaffolder {
    base_dir: PathBuf,
    templates: TemplateLibrary,
    language: Language,
    with_tests: bool,
}

impl Scaffolder {
    pub fn new(base_dir: impl Into<PathBuf>, templates: TemplateLibrary, language: Language, with_tests: bool) -> Self {
        Scaffolder {
            base_dir: base_dir.into(),
            templates,
            language,
            with_tests,
        }
    }

    pub fn from_config(base_dir: impl Into<PathBuf>, config: &CliConfig) -> Self {
        let templates = match &config.templates_dir {
            Some(dir) => TemplateLibrary::new(dir),
            None => TemplateLibrary::bundled(),
        };
        Scaffolder::new(base_dir, templates, config.language, config.tests)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn root_dir(&self, year: &str) -> PathBuf {
        self.base_dir.join(root_folder_name(year))
    }

    pub fn day_dir(&self, year: &str, day: Day) -> PathBuf {
        self.root_dir(year).join(day.padded())
    }

    pub fn plan(
        &self,
        year: &str,
        day: Day,
        markdown: &str,
        function: &FunctionData,
        selection: &TemplateSelection,
    ) -> Result<ScaffoldPlan, DayError> {
        Ok(ScaffoldPlan::new(self.root_dir(year))
            .with_templates(&self.templates, selection, year)?
            .with_day(day, markdown, function, self.language, self.with_tests))
    }

    /// Write one day's folder (and any selected templates), overwriting earlier output.
    pub fn scaffold(
        &self,
        year: &str,
        day: Day,
        markdown: &str,
        function: &FunctionData,
        selection: &TemplateSelection,
    ) -> Result<Vec<PathBuf>, DayError> {
        let plan = self.plan(year, day, markdown, function, selection)?;
        self.apply(&plan)
    }

    /// Create the project root and copy the selected templates into it.
    pub fn init_project(&self, year: &str, selection: &TemplateSelection) -> Result<Vec<PathBuf>, DayError> {
        let plan = ScaffoldPlan::new(self.root_dir(year)).with_templates(&self.templates, selection, year)?;
        self.apply(&plan)
    }

    pub fn apply(&self, plan: &ScaffoldPlan) -> Result<Vec<PathBuf>, DayError> {
        fs::create_dir_all(&plan.root).at(&plan.root)?;
        for dir in &plan.dirs {
            fs::create_dir_all(dir).at(dir)?;
        }

        let mut written = Vec::with_capacity(plan.files.len());
        for file in &plan.files {
            fs::write(&file.path, &file.contents).at(&file.path)?;
            debug!("wrote {}", file.path.display());
            written.push(file.path.clone());
        }
        for copy in &plan.copies {
            written.extend(copy_dir(&copy.from, &copy.to)?);
        }

        info!(root = %plan.root.display(), files = written.len(), "scaffold written");
        Ok(written)
    }
}
