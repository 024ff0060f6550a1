// dtrecon - reconcile declared datatypes between container workbooks and a
// selections workbook

mod exit_codes;
mod logging;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};

use dtrecon_io::IoError;
use dtrecon_recon::{ReconConfig, ReconError};
use exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};
use logging::{init_logging, LogConfig};
use run::{cmd_run, RunOptions};

#[derive(Parser)]
#[command(name = "dtrecon")]
#[command(about = "Flag selections whose input and output fields declare different datatypes")]
#[command(long_version = long_version())]
#[command(version)]
#[command(after_help = "\
Every *.xlsx file directly inside FOLDER is read as a container definition
(columns Name, Container, Datatype; one or more sheets). Selections.xlsx
(columns In_Name, In_Container, Out_Name, Out_Container) is read from the
directory holding the dtrecon executable unless --selections is given.

Writes Updated_Selections.csv and Datatype_Mismatches.csv to the current
directory (or --output-dir).

Examples:
  dtrecon ./sheets
  dtrecon ./sheets --selections ./Selections.xlsx --output-dir ./out
  dtrecon ./sheets --config dtrecon.toml --json")]
struct Cli {
    /// Folder containing the container .xlsx files
    folder: PathBuf,

    /// Selections workbook (default: Selections.xlsx beside the executable)
    #[arg(long, value_name = "PATH")]
    selections: Option<PathBuf>,

    /// Directory for the output CSV files (default: current directory)
    #[arg(long, short = 'o', value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// TOML config file (column names, sentinel, output file names)
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the run summary as JSON to stdout
    #[arg(long)]
    json: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    quiet: bool,
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            "\nengine:  dtrecon-recon ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            "\nengine:  dtrecon-recon ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
        )
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help / --version also arrive here
            return if err.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::from(EXIT_SUCCESS)
            };
        }
    };

    init_logging(&LogConfig::from_flags(cli.verbose, cli.quiet));

    match cmd_main(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                tracing::error!("Error: {}", message);
            }
            if let Some(hint) = hint {
                tracing::error!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn cmd_main(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => ReconConfig::from_path(path).map_err(CliError::from)?,
        None => ReconConfig::default(),
    };

    let summary = cmd_run(RunOptions {
        folder: cli.folder,
        selections: cli.selections,
        output_dir: cli.output_dir,
        config,
    })?;

    tracing::info!(
        files = summary.input_files.len(),
        lookup_entries = summary.lookup_entries,
        selections = summary.selections,
        mismatches = summary.mismatches,
        "Reconciliation complete"
    );

    if cli.json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| CliError::new(format!("JSON serialization error: {e}")))?;
        println!("{json}");
    }

    Ok(())
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    /// Every failure shares exit code 1; only message and hint differ.
    pub fn new(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<IoError> for CliError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::NoWorkbooks(_) => {
                CliError::new(err.to_string()).with_hint("container files must end in .xlsx")
            }
            _ => {
                // Append the source chain
                let mut message = err.to_string();
                let mut source = std::error::Error::source(&err);
                while let Some(inner) = source {
                    let text = inner.to_string();
                    if !message.contains(&text) {
                        message.push_str(": ");
                        message.push_str(&text);
                    }
                    source = std::error::Error::source(inner);
                }
                CliError::new(message)
            }
        }
    }
}

impl From<ReconError> for CliError {
    fn from(err: ReconError) -> Self {
        CliError::new(err.to_string())
    }
}
