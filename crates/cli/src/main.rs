//! # tabulator-cli
//!
//! Command-line interface for converting worksheets to JSON records.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tabulator::{Rejection, Selection, SelectionConfig, Workbook, WorksheetSource};
use tracing_subscriber::EnvFilter;

/// tabulator - spreadsheet worksheets to JSON records
#[derive(Parser, Debug)]
#[command(name = "tabulator")]
#[command(author, version, about = "Convert spreadsheet worksheets to JSON records", long_about = None)]
struct Cli {
    /// CSV/TSV file, directory of CSV files, or spreadsheet file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Worksheet to read (default: first worksheet)
    #[arg(short, long)]
    sheet: Option<String>,

    /// Row holding the column names, after rejections
    #[arg(long)]
    header: Option<usize>,

    /// First data row, after rejections (default: header + 1)
    #[arg(long)]
    skip: Option<usize>,

    /// Reject a row or range: 3, -1, 2..5, -2..=-1 (repeatable, applied in order)
    #[arg(short, long, value_name = "ENTRY", allow_hyphen_values = true)]
    reject: Vec<Rejection>,

    /// Reject rows having a cell equal to this text (repeatable)
    #[arg(long, value_name = "TEXT")]
    reject_matching: Vec<String>,

    /// Keep only these fields
    #[arg(long, value_name = "FIELD", value_delimiter = ',')]
    only: Vec<String>,

    /// Drop these fields
    #[arg(long, value_name = "FIELD", value_delimiter = ',')]
    except: Vec<String>,

    /// JSON selection config (header, skip, reject)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List worksheet names and exit
    #[arg(long)]
    list_sheets: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let workbook = Workbook::open(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    if cli.list_sheets {
        for name in workbook.worksheet_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let sheet = match &cli.sheet {
        Some(name) => name.clone(),
        None => workbook
            .first_worksheet()
            .map(str::to_string)
            .with_context(|| format!("{} has no worksheets", cli.input.display()))?,
    };

    let selection = build_selection(&cli)?;
    tracing::debug!("reading worksheet {:?} with {:?}", sheet, selection);

    let mut table = workbook.table(&sheet, &selection)?;
    if !cli.only.is_empty() {
        table = table.only(&cli.only);
    }
    if !cli.except.is_empty() {
        table = table.except(&cli.except);
    }

    match &cli.output {
        Some(path) => table.persist(path)?,
        None => println!("{}", table.serialize()),
    }

    Ok(())
}

/// Merge the config file (if any) with command-line flags; flags win.
///
/// Any `--reject` or `--reject-matching` flag replaces the config's whole
/// reject list.
fn build_selection(cli: &Cli) -> Result<Selection> {
    let mut selection = match &cli.config {
        Some(path) => SelectionConfig::from_file(path)
            .and_then(|config| config.to_selection())
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Selection::new(),
    };

    if let Some(header) = cli.header {
        selection.header = header;
    }
    if let Some(skip) = cli.skip {
        selection.skip = Some(skip);
    }
    if !cli.reject.is_empty() || !cli.reject_matching.is_empty() {
        selection.reject = cli.reject.clone();
        selection
            .reject
            .extend(cli.reject_matching.iter().map(Rejection::matching_cell));
    }

    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_rejections_parse() {
        let cli = Cli::try_parse_from([
            "tabulator",
            "data.csv",
            "--reject",
            "-1",
            "--reject",
            "-2..=-1",
            "--only",
            "a,b",
        ])
        .unwrap();

        assert_eq!(cli.reject.len(), 2);
        assert!(matches!(cli.reject[0], Rejection::Index(-1)));
        assert_eq!(cli.only, vec!["a", "b"]);
    }

    #[test]
    fn flags_build_selection_without_config() {
        let cli = Cli::try_parse_from([
            "tabulator",
            "data.csv",
            "--header",
            "2",
            "--reject",
            "0",
            "--reject-matching",
            "TOTAL",
        ])
        .unwrap();

        let selection = build_selection(&cli).unwrap();
        assert_eq!(selection.header, 2);
        assert_eq!(selection.data_start(), 3);
        assert_eq!(selection.reject.len(), 2);
    }

    fn write_config(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("selection.json");
        std::fs::write(&path, r#"{"header": 1, "skip": 4, "reject": [0, "-2..=-1"]}"#).unwrap();
        path
    }

    #[test]
    fn config_values_apply_without_flags() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(&dir);
        let cli = Cli::try_parse_from([
            "tabulator",
            "data.csv",
            "--config",
            config.to_str().unwrap(),
        ])
        .unwrap();

        let selection = build_selection(&cli).unwrap();
        assert_eq!(selection.header, 1);
        assert_eq!(selection.data_start(), 4);
        assert_eq!(selection.reject.len(), 2);
        assert!(matches!(selection.reject[0], Rejection::Index(0)));
    }

    #[test]
    fn flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(&dir);
        let cli = Cli::try_parse_from([
            "tabulator",
            "data.csv",
            "--config",
            config.to_str().unwrap(),
            "--header",
            "0",
            "--reject",
            "-1",
            "--reject-matching",
            "TOTAL",
        ])
        .unwrap();

        let selection = build_selection(&cli).unwrap();
        assert_eq!(selection.header, 0);
        // skip was not given on the command line, so the config value stays
        assert_eq!(selection.data_start(), 4);
        assert_eq!(selection.reject.len(), 2);
        assert!(matches!(selection.reject[0], Rejection::Index(-1)));
        assert!(matches!(selection.reject[1], Rejection::Predicate(_)));
    }

    #[test]
    fn bad_rejection_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["tabulator", "data.csv", "--reject", "x..y"]).is_err());
    }
}
