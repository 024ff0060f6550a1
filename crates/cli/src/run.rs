//! `dtrecon <FOLDER>`: load containers and selections, reconcile, write CSVs.

use std::path::{Path, PathBuf};

use serde::Serialize;

use dtrecon_io::{file_label, list_workbooks, IoError};
use dtrecon_recon::config::SELECTIONS_FILE_NAME;
use dtrecon_recon::{ContainerTable, ReconConfig, ReconInput, SELECTION_FIELDNAMES};

use crate::CliError;

pub struct RunOptions {
    pub folder: PathBuf,
    pub selections: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub config: ReconConfig,
}

/// What a run did, for the log and for `--json`.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub engine_version: String,
    pub run_at: String,
    pub input_files: Vec<String>,
    pub selections_file: String,
    pub lookup_entries: usize,
    pub selections: usize,
    pub mismatches: usize,
    pub unresolved_inputs: usize,
    pub unresolved_outputs: usize,
    pub updated_path: String,
    pub mismatches_path: String,
}

pub fn cmd_run(opts: RunOptions) -> Result<RunSummary, CliError> {
    let RunOptions {
        folder,
        selections,
        output_dir,
        mut config,
    } = opts;

    // Flags beat config file
    if selections.is_some() {
        config.selections.path = selections;
    }
    if output_dir.is_some() {
        config.output.dir = output_dir;
    }

    // Configuration errors surface before any workbook is read
    let workbooks = list_workbooks(&folder).map_err(CliError::from)?;
    let selections_path = resolve_selections_path(&config)?;
    if !selections_path.is_file() {
        return Err(CliError::from(IoError::WorkbookNotFound(selections_path))
            .with_hint("pass --selections or place Selections.xlsx next to the executable"));
    }

    let mut containers = Vec::with_capacity(workbooks.len());
    for path in &workbooks {
        let rows = dtrecon_io::xlsx::load_rows(path).map_err(CliError::from)?;
        containers.push(ContainerTable {
            file: file_label(path),
            rows,
        });
    }
    let input_files: Vec<String> = containers.iter().map(|c| c.file.clone()).collect();

    let selections = dtrecon_io::xlsx::load_rows(&selections_path).map_err(CliError::from)?;

    let result = dtrecon_recon::run(&config, ReconInput { containers, selections });
    let recon = &result.reconciliation;

    // Updated selections first; a failure on the second file leaves the first
    let updated_path = config.output.updated_path();
    let mismatches_path = config.output.mismatches_path();
    dtrecon_io::csv::write_rows(&updated_path, &SELECTION_FIELDNAMES, &recon.rows)
        .map_err(CliError::from)?;
    dtrecon_io::csv::write_rows(&mismatches_path, &SELECTION_FIELDNAMES, &recon.mismatches)
        .map_err(CliError::from)?;

    Ok(RunSummary {
        engine_version: result.meta.engine_version.clone(),
        run_at: result.meta.run_at.clone(),
        input_files,
        selections_file: selections_path.display().to_string(),
        lookup_entries: result.meta.lookup_entries,
        selections: recon.summary.selections,
        mismatches: recon.summary.mismatches,
        unresolved_inputs: recon.summary.unresolved_inputs,
        unresolved_outputs: recon.summary.unresolved_outputs,
        updated_path: updated_path.display().to_string(),
        mismatches_path: mismatches_path.display().to_string(),
    })
}

/// Configured path, else `Selections.xlsx` beside the running executable.
fn resolve_selections_path(config: &ReconConfig) -> Result<PathBuf, CliError> {
    if let Some(path) = &config.selections.path {
        return Ok(path.clone());
    }

    let exe = std::env::current_exe()
        .map_err(|e| CliError::new(format!("cannot locate executable: {e}")))?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(SELECTIONS_FILE_NAME))
}
