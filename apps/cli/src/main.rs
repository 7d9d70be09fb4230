use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{debug, error};
use quiz_catalog::{CatalogError, QuizCatalog};
use quiz_engine::{AgeBracket, EngineError, QuizEngine};
use serde_json::{Value, json};

mod commands;
mod config;

use commands::{Output, ScoreArgs};
use config::Config;

const CLI_VERSION: &str = "1.0";

const EXIT_OK: i32 = 0;
const EXIT_INVALID_INPUT: i32 = 2;
const EXIT_CATALOG: i32 = 3;
const EXIT_IO: i32 = 4;

#[derive(Debug, Parser)]
#[command(name = "quiz", version, about = "Festival coffee quiz scoring")]
struct Cli {
    /// Wrap output in a JSON envelope.
    #[arg(long, global = true)]
    json: bool,

    #[arg(long, short, global = true)]
    verbose: bool,

    /// Catalog file; the bundled catalog is used when unset.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[arg(long, global = true)]
    submissions: Option<PathBuf>,

    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the questions in catalog order.
    Questions,
    /// List trait and flavor profiles.
    Profiles,
    /// Score a comma-separated answer list, e.g. `--answers 4,2,5,3`.
    Score {
        #[arg(long, allow_hyphen_values = true)]
        answers: String,
        #[arg(long, default_value = "undisclosed")]
        age: AgeBracket,
        #[arg(long, default_value_t = 1)]
        top: usize,
        /// Append an analytics row to the submissions file.
        #[arg(long)]
        record: bool,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Questions => "questions",
            Command::Profiles => "profiles",
            Command::Score { .. } => "score",
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    code: i32,
    command: String,
    kind: String,
    message: String,
}

impl CliError {
    pub fn invalid(cmd: &str, message: impl Into<String>) -> Self {
        Self {
            code: EXIT_INVALID_INPUT,
            command: cmd.to_string(),
            kind: "InvalidInput".to_string(),
            message: message.into(),
        }
    }

    pub fn catalog(cmd: &str, err: CatalogError) -> Self {
        let (code, kind) = match err {
            CatalogError::Io(_) => (EXIT_IO, "IoError"),
            _ => (EXIT_CATALOG, "CatalogError"),
        };
        Self {
            code,
            command: cmd.to_string(),
            kind: kind.to_string(),
            message: err.to_string(),
        }
    }

    pub fn engine(cmd: &str, err: EngineError) -> Self {
        match err {
            EngineError::Catalog(inner) => Self::catalog(cmd, inner),
            other => Self {
                code: EXIT_CATALOG,
                command: cmd.to_string(),
                kind: "EngineError".to_string(),
                message: other.to_string(),
            },
        }
    }

    fn setup(cmd: &str, err: anyhow::Error) -> Self {
        Self {
            code: EXIT_IO,
            command: cmd.to_string(),
            kind: "IoError".to_string(),
            message: format!("{err:#}"),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let config = Config::default().with_flags(
        cli.json,
        cli.verbose,
        cli.catalog.clone(),
        cli.submissions.clone(),
        cli.log_file.clone(),
    );
    let name = cli.command.name();

    let result = config
        .init_logging()
        .map_err(|e| CliError::setup(name, e))
        .and_then(|()| run(&config, cli.command));

    match result {
        Ok(output) => {
            print_success(config.json, name, output);
            std::process::exit(EXIT_OK);
        }
        Err(err) => {
            error!("{} failed: {}", err.command, err.message);
            print_error(config.json, err);
        }
    }
}

fn run(config: &Config, command: Command) -> Result<Output, CliError> {
    let name = command.name();
    let engine = load_engine(config).map_err(|e| CliError::catalog(name, e))?;
    debug!("running {name}");

    match command {
        Command::Questions => Ok(commands::questions(&engine)),
        Command::Profiles => Ok(commands::profiles(&engine)),
        Command::Score {
            answers,
            age,
            top,
            record,
        } => commands::score(
            &engine,
            &ScoreArgs {
                answers,
                age,
                top,
                record,
            },
            config,
        ),
    }
}

fn load_engine(config: &Config) -> Result<QuizEngine, CatalogError> {
    let catalog = match &config.catalog {
        Some(path) => QuizCatalog::load(path)?,
        None => QuizCatalog::builtin()?,
    };
    Ok(QuizEngine::new(catalog))
}

fn print_success(json_mode: bool, command: &str, output: Output) {
    if json_mode {
        let response = json!({
            "status": "ok",
            "version": CLI_VERSION,
            "command": command,
            "data": output.data,
            "error": null
        });
        println!("{}", render(&response));
    } else {
        println!("{}", output.text);
    }
}

fn print_error(json_mode: bool, err: CliError) {
    if json_mode {
        let response = json!({
            "status": "error",
            "version": CLI_VERSION,
            "command": err.command,
            "data": null,
            "error": {
                "code": err.code,
                "type": err.kind,
                "message": err.message
            }
        });
        eprintln!("{}", render(&response));
    } else {
        eprintln!("Error: {}", err.message);
    }
    std::process::exit(err.code);
}

fn render(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::{Cli, Command};

    #[test]
    fn score_flags_parse() {
        let cli = Cli::try_parse_from([
            "quiz", "--json", "score", "--answers", "3,3,3", "--age", "20s", "--top", "3",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Score { answers, top, .. } => {
                assert_eq!(answers, "3,3,3");
                assert_eq!(top, 3);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_age_is_rejected() {
        let parsed = Cli::try_parse_from(["quiz", "score", "--answers", "3", "--age", "toddler"]);
        assert!(parsed.is_err());
    }
}
