use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::language::Language;

pub const CONFIG_FILE: &str = "adventjs-cli.json";
pub const ENV_PREFIX: &str = "ADVENTJS";

const TEST_DEV_DEPENDENCIES: &[&str] = &["@types/jest", "jest", "ts-jest"];
const FORMAT_DEV_DEPENDENCIES: &[&str] = &["prettier"];
const LINT_DEV_DEPENDENCIES: &[&str] = &[
    "eslint",
    "@typescript-eslint/parser",
    "@typescript-eslint/eslint-plugin",
    "eslint-config-prettier",
    "eslint-plugin-prettier",
];
const TYPESCRIPT_DEV_DEPENDENCIES: &[&str] = &["typescript", "ts-node"];

/// Settings written by `init` and read back by every later command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    pub year: String,
    #[serde(default = "enabled")]
    pub tests: bool,
    #[serde(default = "enabled")]
    pub config_files: bool,
    #[serde(default)]
    pub dependencies: bool,
    #[serde(default)]
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn enabled() -> bool {
    true
}

impl CliConfig {
    pub fn new(year: impl Into<String>) -> Self {
        CliConfig {
            year: year.into(),
            tests: true,
            config_files: true,
            dependencies: false,
            language: Language::default(),
            templates_dir: None,
            base_url: None,
        }
    }
}

pub fn path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

/// Read `adventjs-cli.json` from `dir`, with `ADVENTJS_*` environment overrides.
/// Returns `None` when the file has not been written yet.
pub fn load(dir: &Path) -> Result<Option<CliConfig>> {
    let file = path(dir);
    if !file.is_file() {
        warn!("{} not found in {}", CONFIG_FILE, dir.display());
        return Ok(None);
    }

    let settings = Config::builder()
        .add_source(File::from(file.as_path()).format(FileFormat::Json))
        .add_source(Environment::with_prefix(ENV_PREFIX))
        .build()
        .with_context(|| format!("reading {}", file.display()))?;
    let cfg: CliConfig = settings
        .try_deserialize()
        .with_context(|| format!("invalid configuration in {}", file.display()))?;

    debug!(?cfg, "configuration loaded");
    Ok(Some(cfg))
}

pub fn save(dir: &Path, cfg: &CliConfig) -> Result<PathBuf> {
    let file = path(dir);
    let json = serde_json::to_string_pretty(cfg)?;
    fs::write(&file, json + "\n").with_context(|| format!("writing {}", file.display()))?;
    Ok(file)
}

/// Dev dependencies the generated project needs for the chosen options.
pub fn dev_dependencies(cfg: &CliConfig) -> Vec<&'static str> {
    let mut deps = Vec::new();
    if cfg.tests {
        deps.extend_from_slice(TEST_DEV_DEPENDENCIES);
    }
    if cfg.config_files {
        deps.extend_from_slice(FORMAT_DEV_DEPENDENCIES);
        deps.extend_from_slice(LINT_DEV_DEPENDENCIES);
    }
    if cfg.language == Language::TypeScript {
        deps.extend_from_slice(TYPESCRIPT_DEV_DEPENDENCIES);
    }
    deps
}

pub fn install_command(cfg: &CliConfig) -> String {
    let mut cmd = String::from("npm install --save-dev");
    for dep in dev_dependencies(cfg) {
        cmd.push(' ');
        cmd.push_str(dep);
    }
    cmd
}
