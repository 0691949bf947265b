//! Selection config files
//!
//! A JSON description of a [`Selection`]:
//!
//! ```json
//! { "header": 1, "reject": [0, "-2..=-1", { "matching_cell": "TOTAL" }] }
//! ```
//!
//! `reject` may also be a single entry.

use crate::error::{Result, TabulatorError};
use crate::select::{Rejection, Selection};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One reject entry as written in a config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RejectEntry {
    Index(isize),
    /// Index or range text, parsed like [`Rejection`]'s `FromStr`
    Text(String),
    MatchingCell { matching_cell: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RejectList {
    Many(Vec<RejectEntry>),
    One(RejectEntry),
}

impl Default for RejectList {
    fn default() -> Self {
        RejectList::Many(Vec::new())
    }
}

impl RejectList {
    fn entries(&self) -> &[RejectEntry] {
        match self {
            RejectList::Many(entries) => entries,
            RejectList::One(entry) => std::slice::from_ref(entry),
        }
    }
}

/// Deserialized form of a [`Selection`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionConfig {
    #[serde(default)]
    pub header: Option<usize>,
    #[serde(default)]
    pub skip: Option<usize>,
    #[serde(default)]
    pub reject: RejectList,
}

impl SelectionConfig {
    /// Parse a config from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| TabulatorError::InvalidConfig(format!("invalid JSON: {e}")))
    }

    /// Load a config from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            TabulatorError::InvalidConfig(format!("{}: {e}", path.as_ref().display()))
        })
    }

    /// Turn the config into a [`Selection`].
    ///
    /// # Errors
    ///
    /// Returns [`TabulatorError::InvalidConfig`] for reject text that is not
    /// an index or range.
    pub fn to_selection(&self) -> Result<Selection> {
        let mut selection = Selection::new().with_header(self.header.unwrap_or(0));
        selection.skip = self.skip;

        for entry in self.reject.entries() {
            let rejection = match entry {
                RejectEntry::Index(index) => Rejection::Index(*index),
                RejectEntry::Text(text) => text.parse()?,
                RejectEntry::MatchingCell { matching_cell } => {
                    Rejection::matching_cell(matching_cell.clone())
                }
            };
            selection.reject.push(rejection);
        }

        Ok(selection)
    }
}
