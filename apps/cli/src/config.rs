use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use simplelog::{ColorChoice, Config as LogConfig, LevelFilter, TermLogger, TerminalMode, WriteLogger};

pub const ENV_CATALOG: &str = "QUIZ_CATALOG";
pub const ENV_SUBMISSIONS: &str = "QUIZ_SUBMISSIONS";
pub const ENV_LOG_FILE: &str = "QUIZ_LOG_FILE";

const DEFAULT_SUBMISSIONS: &str = "submissions.jsonl";

/// Settings resolved from defaults, then environment, then flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub json: bool,
    pub verbose: bool,
    pub catalog: Option<PathBuf>,
    pub submissions: PathBuf,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            json: false,
            verbose: false,
            catalog: env_path(ENV_CATALOG),
            submissions: env_path(ENV_SUBMISSIONS)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SUBMISSIONS)),
            log_file: env_path(ENV_LOG_FILE),
        }
    }
}

impl Config {
    pub fn with_flags(
        mut self,
        json: bool,
        verbose: bool,
        catalog: Option<PathBuf>,
        submissions: Option<PathBuf>,
        log_file: Option<PathBuf>,
    ) -> Self {
        self.json = json;
        self.verbose = verbose;
        if catalog.is_some() {
            self.catalog = catalog;
        }
        if let Some(path) = submissions {
            self.submissions = path;
        }
        if log_file.is_some() {
            self.log_file = log_file;
        }
        self
    }

    fn level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    /// File logging when a log file is configured, stderr only with
    /// `--verbose`; otherwise stdout and stderr carry nothing but output.
    pub fn init_logging(&self) -> Result<()> {
        if let Some(path) = &self.log_file {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            WriteLogger::init(self.level(), LogConfig::default(), file)
                .context("logger already initialised")?;
        } else if self.verbose {
            TermLogger::init(
                self.level(),
                LogConfig::default(),
                TerminalMode::Stderr,
                ColorChoice::Never,
            )
            .context("logger already initialised")?;
        }
        Ok(())
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}
