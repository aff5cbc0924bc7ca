use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::CliConfig;
use crate::error::{DayError, FsContext};

pub const YEAR_PLACEHOLDER: &str = "{{year}}";

/// Logical names of the files in the template library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateKey {
    Gitignore,
    Eslint,
    Prettier,
    PrettierIgnore,
    Jest,
    Tsconfig,
    Vscode,
    Github,
    Readme,
    PackageJson,
}

impl TemplateKey {
    pub const ALL: [TemplateKey; 10] = [
        TemplateKey::Gitignore,
        TemplateKey::Eslint,
        TemplateKey::Prettier,
        TemplateKey::PrettierIgnore,
        TemplateKey::Jest,
        TemplateKey::Tsconfig,
        TemplateKey::Vscode,
        TemplateKey::Github,
        TemplateKey::Readme,
        TemplateKey::PackageJson,
    ];

    /// Name inside the template library.
    pub fn source_name(self) -> &'static str {
        match self {
            // Stored without the dot so it does not act as an ignore file for this repo.
            TemplateKey::Gitignore => "gitignore",
            other => other.file_name(),
        }
    }

    /// Name inside the generated project root.
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateKey::Gitignore => ".gitignore",
            TemplateKey::Eslint => "eslint.config.mjs",
            TemplateKey::Prettier => ".prettierrc",
            TemplateKey::PrettierIgnore => ".prettierignore",
            TemplateKey::Jest => "jest.config.js",
            TemplateKey::Tsconfig => "tsconfig.json",
            TemplateKey::Vscode => ".vscode",
            TemplateKey::Github => ".github",
            TemplateKey::Readme => "README.md",
            TemplateKey::PackageJson => "package.json",
        }
    }

    /// Only these text templates get `{{year}}` replaced.
    pub fn substitutes_year(self) -> bool {
        matches!(self, TemplateKey::Readme | TemplateKey::PackageJson)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateContent {
    Text(String),
    Directory(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub key: TemplateKey,
    pub content: TemplateContent,
}

/// Read-only directory of project templates.
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    root: PathBuf,
}

impl TemplateLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        TemplateLibrary { root: root.into() }
    }

    /// The `templates/` directory shipped next to the crate manifest.
    pub fn bundled() -> Self {
        TemplateLibrary::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("templates"))
    }

    pub fn load(&self, key: TemplateKey) -> Result<TemplateFile, DayError> {
        let path = self.root.join(key.source_name());
        let meta = fs::metadata(&path).at(&path)?;
        let content = if meta.is_dir() {
            TemplateContent::Directory(path)
        } else {
            TemplateContent::Text(fs::read_to_string(&path).at(&path)?)
        };
        Ok(TemplateFile { key, content })
    }
}

/// Which templates a project gets, derived from the saved configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSelection(Vec<TemplateKey>);

impl TemplateSelection {
    pub fn new(mut keys: Vec<TemplateKey>) -> Self {
        keys.sort();
        keys.dedup();
        TemplateSelection(keys)
    }

    pub fn from_config(config: &CliConfig) -> Self {
        let mut keys = vec![
            TemplateKey::Gitignore,
            TemplateKey::Readme,
            TemplateKey::PackageJson,
            TemplateKey::Tsconfig,
        ];
        if config.tests {
            keys.push(TemplateKey::Jest);
        }
        if config.config_files {
            keys.extend([
                TemplateKey::Eslint,
                TemplateKey::Prettier,
                TemplateKey::PrettierIgnore,
                TemplateKey::Vscode,
                TemplateKey::Github,
            ]);
        }
        TemplateSelection::new(keys)
    }

    pub fn keys(&self) -> &[TemplateKey] {
        &self.0
    }
}

pub fn replace_year_placeholder(content: &str, year: &str) -> String {
    content.replace(YEAR_PLACEHOLDER, year)
}

/// Copy a directory tree byte for byte; returns the files written.
pub fn copy_dir(from: &Path, to: &Path) -> Result<Vec<PathBuf>, DayError> {
    let mut written = Vec::new();
    for entry in WalkDir::new(from).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| from.to_path_buf());
            DayError::fs(path, e.into())
        })?;
        let Ok(rel) = entry.path().strip_prefix(from) else {
            continue;
        };
        let target = to.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).at(&target)?;
        } else {
            fs::copy(entry.path(), &target).at(&target)?;
            written.push(target);
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    fn config(tests: bool, config_files: bool) -> CliConfig {
        CliConfig {
            year: "2024".into(),
            tests,
            config_files,
            dependencies: false,
            language: Language::TypeScript,
            templates_dir: None,
            base_url: None,
        }
    }

    #[test]
    fn bundled_library_has_every_template() {
        let library = TemplateLibrary::bundled();
        for key in TemplateKey::ALL {
            let file = library.load(key).unwrap();
            assert_eq!(file.key, key);
            assert_eq!(
                matches!(file.content, TemplateContent::Directory(_)),
                matches!(key, TemplateKey::Vscode | TemplateKey::Github),
                "{:?}",
                key
            );
        }
    }

    #[test]
    fn substituted_templates_carry_the_placeholder() {
        let library = TemplateLibrary::bundled();
        for key in TemplateKey::ALL.into_iter().filter(|k| k.substitutes_year()) {
            match library.load(key).unwrap().content {
                TemplateContent::Text(text) => assert!(text.contains(YEAR_PLACEHOLDER), "{:?}", key),
                TemplateContent::Directory(_) => panic!("{:?} should be a file", key),
            }
        }
    }

    #[test]
    fn placeholder_replaced_everywhere() {
        let out = replace_year_placeholder("adventjs-{{year}} / {{year}} / {{ year }}", "2025");
        assert_eq!(out, "adventjs-2025 / 2025 / {{ year }}");
    }

    #[test]
    fn selection_follows_config() {
        let all = TemplateSelection::from_config(&config(true, true));
        assert_eq!(all.keys().len(), TemplateKey::ALL.len());

        let bare = TemplateSelection::from_config(&config(false, false));
        assert_eq!(
            bare.keys(),
            &[
                TemplateKey::Gitignore,
                TemplateKey::Tsconfig,
                TemplateKey::Readme,
                TemplateKey::PackageJson
            ]
        );
    }

    #[test]
    fn missing_template_is_fs_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TemplateLibrary::new(dir.path()).load(TemplateKey::Readme).unwrap_err();
        assert!(matches!(err, DayError::FileSystem { ref path, .. } if path.ends_with("README.md")));
    }

    #[test]
    fn copy_dir_is_recursive() {
        let src = tempfile::tempdir().unwrap();
        fs::create_dir_all(src.path().join("workflows")).unwrap();
        fs::write(src.path().join("workflows/ci.yml"), "year: {{year}}").unwrap();
        fs::write(src.path().join("top.txt"), [0u8, 159, 146, 150]).unwrap();

        let dst = tempfile::tempdir().unwrap();
        let target = dst.path().join(".github");
        let written = copy_dir(src.path(), &target).unwrap();

        assert_eq!(written.len(), 2);
        // Directory templates are never substituted.
        assert_eq!(fs::read_to_string(target.join("workflows/ci.yml")).unwrap(), "year: {{year}}");
        assert_eq!(fs::read(target.join("top.txt")).unwrap(), vec![0u8, 159, 146, 150]);
    }
}
