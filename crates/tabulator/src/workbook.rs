//! Worksheet sources
//!
//! Anything that can hand out a raw grid per named worksheet can feed a
//! [`Table`]. [`Workbook`] is the in-memory implementation, loadable from
//! CSV files, directories of CSV files, or spreadsheet files.

use crate::error::{Result, TabulatorError};
use crate::select::{Grid, Selection};
use crate::table::Table;
use calamine::{open_workbook_auto, Data, Reader};
use indexmap::IndexMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A supplier of raw worksheet grids.
pub trait WorksheetSource {
    /// Worksheet names in source order
    fn worksheet_names(&self) -> Vec<String>;

    /// Raw rows of a worksheet
    fn grid(&self, worksheet: &str) -> Result<Grid>;

    /// Build a table from a worksheet
    fn table(&self, worksheet: &str, selection: &Selection) -> Result<Table> {
        let grid = self.grid(worksheet)?;
        Ok(Table::from_grid(grid, selection))
    }
}

/// Named worksheets held in memory (preserves insertion order)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    worksheets: IndexMap<String, Grid>,
}

impl Workbook {
    /// Create an empty workbook
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a workbook from `(name, grid)` pairs
    pub fn from_grids<I, S>(worksheets: I) -> Self
    where
        I: IntoIterator<Item = (S, Grid)>,
        S: Into<String>,
    {
        Workbook {
            worksheets: worksheets
                .into_iter()
                .map(|(name, grid)| (name.into(), grid))
                .collect(),
        }
    }

    /// Add or replace a worksheet, returning the grid it replaced
    pub fn insert_worksheet(&mut self, name: impl Into<String>, grid: Grid) -> Option<Grid> {
        self.worksheets.insert(name.into(), grid)
    }

    #[must_use]
    pub fn worksheet_count(&self) -> usize {
        self.worksheets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Name of the first worksheet, if any
    #[must_use]
    pub fn first_worksheet(&self) -> Option<&str> {
        self.worksheets.keys().next().map(String::as_str)
    }

    /// Open a path, picking the loader from its shape.
    ///
    /// Directories load as CSV directories, `.csv`/`.tsv` files as a single
    /// CSV worksheet, anything else as a spreadsheet file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            return Self::from_csv_dir(path);
        }
        match delimiter_for(path) {
            Some(_) => Self::from_csv(path),
            None => Self::from_spreadsheet(path),
        }
    }

    // ===== CSV =====

    /// Load a CSV (or TSV) file as one worksheet named after the file stem
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = open_source(path)?;
        let delimiter = delimiter_for(path).unwrap_or(b',');

        let mut workbook = Workbook::new();
        workbook.insert_worksheet(worksheet_name(path), read_csv_grid(BufReader::new(file), delimiter)?);
        Ok(workbook)
    }

    /// Load CSV text from a reader as one worksheet
    pub fn from_csv_reader<R: Read>(name: &str, reader: R, delimiter: u8) -> Result<Self> {
        let mut workbook = Workbook::new();
        workbook.insert_worksheet(name, read_csv_grid(reader, delimiter)?);
        Ok(workbook)
    }

    /// Load every `.csv` / `.tsv` file in a directory, one worksheet per file.
    ///
    /// Worksheets are ordered by file name.
    pub fn from_csv_dir<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let dir = std::fs::read_dir(path).map_err(|e| {
            TabulatorError::SourceUnavailable(format!("{}: {e}", path.display()))
        })?;

        let mut files = Vec::new();
        for entry in dir {
            let file_path = entry?.path();
            if file_path.is_file() && delimiter_for(&file_path).is_some() {
                files.push(file_path);
            }
        }
        files.sort();

        let mut workbook = Workbook::new();
        for file_path in files {
            let delimiter = delimiter_for(&file_path).unwrap_or(b',');
            let file = open_source(&file_path)?;
            let grid = read_csv_grid(BufReader::new(file), delimiter)?;
            workbook.insert_worksheet(worksheet_name(&file_path), grid);
        }

        tracing::info!(
            "loaded {} worksheet(s) from {}",
            workbook.worksheet_count(),
            path.display()
        );
        Ok(workbook)
    }

    // ===== Spreadsheet files =====

    /// Load every worksheet of an xlsx / xlsm / xlsb / xls / ods file.
    ///
    /// Cells are rendered to text; rows and columns before the first used
    /// cell are kept as empty cells so row positions match the sheet.
    pub fn from_spreadsheet<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let unavailable =
            |e: calamine::Error| TabulatorError::SourceUnavailable(format!("{}: {e}", path.display()));

        let mut spreadsheet = open_workbook_auto(path).map_err(unavailable)?;
        let mut workbook = Workbook::new();

        for name in spreadsheet.sheet_names() {
            let range = spreadsheet.worksheet_range(&name).map_err(unavailable)?;
            let (first_row, first_col) = range.start().unwrap_or((0, 0));
            let leading_cells = first_col as usize;

            let mut grid: Grid = vec![Vec::new(); first_row as usize];
            for row in range.rows() {
                let mut cells = vec![String::new(); leading_cells];
                cells.extend(row.iter().map(cell_text));
                grid.push(cells);
            }

            tracing::debug!("worksheet {:?}: {} row(s)", name, grid.len());
            workbook.insert_worksheet(name, grid);
        }

        tracing::info!(
            "loaded {} worksheet(s) from {}",
            workbook.worksheet_count(),
            path.display()
        );
        Ok(workbook)
    }
}

impl WorksheetSource for Workbook {
    fn worksheet_names(&self) -> Vec<String> {
        self.worksheets.keys().cloned().collect()
    }

    fn grid(&self, worksheet: &str) -> Result<Grid> {
        self.worksheets
            .get(worksheet)
            .cloned()
            .ok_or_else(|| TabulatorError::WorksheetNotFound {
                name: worksheet.to_string(),
            })
    }
}

fn delimiter_for(path: &Path) -> Option<u8> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "csv" => Some(b','),
        "tsv" => Some(b'\t'),
        _ => None,
    }
}

fn open_source(path: &Path) -> Result<File> {
    File::open(path)
        .map_err(|e| TabulatorError::SourceUnavailable(format!("{}: {e}", path.display())))
}

fn worksheet_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Sheet1")
        .to_string()
}

fn read_csv_grid<R: Read>(reader: R, delimiter: u8) -> Result<Grid> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut grid = Grid::new();
    for result in csv_reader.records() {
        let record = result?;
        grid.push(record.iter().map(str::to_string).collect());
    }
    Ok(grid)
}

/// Render a spreadsheet cell as text
fn cell_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => number_text(*f),
        Data::Bool(b) => b.to_string(),
        // Excel serial date, days since 1899-12-30
        Data::DateTime(dt) => number_text(dt.as_f64()),
        Data::Error(e) => format!("#ERROR: {e:?}"),
    }
}

fn number_text(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}
