//! Spreadsheet grids to JSON records
//!
//! Turns a worksheet's raw rows into records keyed by normalized column
//! names, with chainable, non-mutating operations and deterministic JSON
//! output.
//!
//! # Examples
//!
//! ## Building a table
//!
//! ```
//! use tabulator::{Selection, Table};
//!
//! let grid = vec![
//!     vec!["First Title".to_string(), "Second Title".to_string()],
//!     vec!["first content".to_string(), "second content".to_string()],
//! ];
//!
//! let table = Table::from_grid(grid, &Selection::default());
//! assert_eq!(table.field_names(), vec!["first_title", "second_title"]);
//! ```
//!
//! ## Selecting rows
//!
//! ```
//! use tabulator::{Rejection, Selection, Table};
//!
//! let grid: Vec<Vec<String>> = [
//!     vec!["Quarterly report"],
//!     vec!["Region", "Sales"],
//!     vec!["North", "10"],
//!     vec!["South", "20"],
//!     vec!["TOTAL", "30"],
//! ]
//! .into_iter()
//! .map(|row| row.into_iter().map(String::from).collect())
//! .collect();
//!
//! let selection = Selection::new()
//!     .with_header(1)
//!     .with_reject(Rejection::matching_cell("TOTAL"));
//!
//! let table = Table::from_grid(grid, &selection);
//! assert_eq!(table.len(), 2);
//! ```
//!
//! ## Chaining operations
//!
//! ```
//! use tabulator::{FieldValue, Selection, Table};
//!
//! let grid = vec![
//!     vec!["name".to_string(), "age".to_string(), "city".to_string()],
//!     vec!["Alice".to_string(), "30".to_string(), "NYC".to_string()],
//!     vec!["Bob".to_string(), "25".to_string(), "LA".to_string()],
//! ];
//!
//! let adults = Table::from_grid(grid, &Selection::default())
//!     .only(&["name", "age"])
//!     .apply("age", |age, _| {
//!         age.as_str()
//!             .and_then(|s| s.parse::<i64>().ok())
//!             .map_or(FieldValue::Null, FieldValue::Int)
//!     })
//!     .reject(|record| record["age"].as_int().is_some_and(|age| age < 28));
//!
//! assert_eq!(adults.len(), 1);
//! assert_eq!(adults.records()[0]["name"], "Alice");
//! ```
//!
//! ## Reading worksheets
//!
//! ```no_run
//! use tabulator::{Selection, Workbook, WorksheetSource};
//!
//! let workbook = Workbook::open("catalog.xlsx").unwrap();
//! let table = workbook.table("Tracks", &Selection::default()).unwrap();
//! table.persist("tracks.json").unwrap();
//! ```

mod config;
mod error;
mod header;
mod json;
mod select;
mod table;
mod value;
mod workbook;

/// Re-export selection config types.
pub use config::{RejectEntry, RejectList, SelectionConfig};
/// Re-export error types.
pub use error::{Result, TabulatorError};
/// Re-export header normalization.
pub use header::{AsciiFolding, HeaderNormalizer, Transliterate};
/// Re-export row selection.
pub use select::{select, Grid, Rejection, RowPredicate, SelectedRows, Selection};
/// Re-export table type.
pub use table::Table;
/// Re-export value types.
pub use value::{CustomValue, FieldValue, Record};
/// Re-export worksheet sources.
pub use workbook::{Workbook, WorksheetSource};
