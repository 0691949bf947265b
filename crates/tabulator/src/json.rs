//! JSON output for Table
//!
//! Records are written as a pretty-printed array of objects: two-space
//! indentation, `": "` between key and value, one member per line, keys in
//! record order.

use crate::error::{Result, TabulatorError};
use crate::table::Table;
use serde::{Serialize, Serializer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl Table {
    /// Write the records to a writer as JSON
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Render the records as JSON text.
    ///
    /// Identical tables always render to identical bytes.
    ///
    /// # Example
    /// ```
    /// use tabulator::{Selection, Table};
    ///
    /// let grid = vec![
    ///     vec!["first title".to_string(), "second title".to_string()],
    ///     vec!["first content".to_string(), "second content".to_string()],
    /// ];
    /// let table = Table::from_grid(grid, &Selection::default());
    ///
    /// assert_eq!(
    ///     table.serialize(),
    ///     "[\n  {\n    \"first_title\": \"first content\",\n    \"second_title\": \"second content\"\n  }\n]"
    /// );
    /// ```
    #[must_use]
    pub fn serialize(&self) -> String {
        // Records hold only string keys and serializable values
        serde_json::to_string_pretty(self).expect("records always serialize to JSON")
    }

    /// Write [`Table::serialize`] output to a file, replacing its contents
    ///
    /// # Errors
    ///
    /// Returns [`TabulatorError::Persist`] if the file cannot be created or
    /// written.
    pub fn persist<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let persist_error = |source: std::io::Error| TabulatorError::Persist {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(persist_error)?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(self.serialize().as_bytes())
            .map_err(persist_error)?;
        writer.flush().map_err(persist_error)?;

        tracing::info!("wrote {} record(s) to {}", self.len(), path.display());
        Ok(())
    }
}
