mod config;
mod day;
mod error;
mod fetch;
mod language;
mod parser;
mod pipeline;
mod scaffold;

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use config::CliConfig;
use day::Day;
use fetch::PageFetcher;
use language::Language;
use scaffold::templates::TemplateSelection;
use scaffold::Scaffolder;

#[derive(Parser)]
#[command(name = "adventjs-cli", about = "Spin up AdventJS challenge folders from the challenge pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write adventjs-cli.json and create the project folder
    Init {
        /// Challenge year (default: this year in December, last year otherwise)
        #[arg(short, long)]
        year: Option<String>,
        /// Skip test stubs and the jest config
        #[arg(long)]
        no_tests: bool,
        /// Skip lint, format, editor and CI config files
        #[arg(long)]
        no_config_files: bool,
        /// Print the npm command for the dev dependencies
        #[arg(short, long)]
        dependencies: bool,
        /// Output language
        #[arg(short, long, value_enum, default_value_t = Language::TypeScript)]
        language: Language,
    },
    /// Generate the folder for one challenge day
    #[command(name = "g", alias = "generate")]
    Generate {
        /// Day number, 1 to 25
        day: Day,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("Failed to read the working directory")?;

    let result = match cli.command {
        Commands::Init {
            year,
            no_tests,
            no_config_files,
            dependencies,
            language,
        } => {
            let mut cfg = CliConfig::new(year.unwrap_or_else(current_season));
            cfg.tests = !no_tests;
            cfg.config_files = !no_config_files;
            cfg.dependencies = dependencies;
            cfg.language = language;
            init(&cwd, &cfg)
        }
        Commands::Generate { day } => generate(&cwd, day).await,
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn init(cwd: &Path, cfg: &CliConfig) -> anyhow::Result<()> {
    let file = config::save(cwd, cfg)?;
    println!("Configuration saved to {}", file.display());
    println!("{}", serde_json::to_string_pretty(cfg)?);

    let scaffolder = Scaffolder::from_config(cwd, cfg);
    let selection = TemplateSelection::from_config(cfg);
    let written = scaffolder.init_project(&cfg.year, &selection)?;
    println!(
        "Created {} with {} template files",
        scaffolder.root_dir(&cfg.year).display(),
        written.len()
    );

    if cfg.dependencies {
        println!("Install the dev dependencies with:\n  {}", config::install_command(cfg));
    }
    Ok(())
}

async fn generate(cwd: &Path, day: Day) -> anyhow::Result<()> {
    let Some(cfg) = config::load(cwd)? else {
        bail!(
            "Configuration file {} not found. Please run \"adventjs-cli init\" first.",
            config::CONFIG_FILE
        );
    };

    let scaffolder = Scaffolder::from_config(cwd, &cfg);
    // Templates go in only when the project root is created by this run.
    let selection = if scaffolder.root_dir(&cfg.year).is_dir() {
        TemplateSelection::default()
    } else {
        if let Some(other) = scaffold::find_project_root(cwd) {
            warn!("{} exists but the configured year is {}", other.display(), cfg.year);
        }
        TemplateSelection::from_config(&cfg)
    };

    let fetcher = PageFetcher::new(cfg.base_url.as_deref())?;
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]")?);
    pb.set_message(format!("Fetching day {} of {}", day, cfg.year));
    pb.enable_steady_tick(Duration::from_millis(100));
    let fetched = fetcher.fetch_raw_content(day, &cfg.year).await;
    pb.finish_and_clear();

    let raw = fetched.with_context(|| format!("Day {} could not be fetched", day))?;
    let report = pipeline::generate_day(&raw, day, &cfg.year, &selection, &scaffolder)
        .with_context(|| format!("Day {} was not generated", day))?;

    println!(
        "Day {} ready in {} ({} files, function {})",
        report.day,
        report.day_dir.display(),
        report.written.len(),
        report.function_name
    );
    Ok(())
}

fn current_season() -> String {
    season_for(chrono::Local::now().date_naive()).to_string()
}

/// Challenges run through December, so earlier months point at last year's set.
fn season_for(date: NaiveDate) -> i32 {
    if date.month() == 12 {
        date.year()
    } else {
        date.year() - 1
    }
}
