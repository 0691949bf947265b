use crate::header::{HeaderNormalizer, Transliterate};
use crate::select::{select, Grid, Selection, SelectedRows};
use crate::value::{FieldValue, Record};
use indexmap::IndexSet;

/// An immutable sequence of records.
///
/// Every operation returns a new table holding its own copies of the
/// records; the table it was called on is never modified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap already-built records
    #[must_use]
    pub fn from_records(records: Vec<Record>) -> Self {
        Table { records }
    }

    /// Build a table from a raw grid.
    ///
    /// # Example
    /// ```
    /// use tabulator::{Selection, Table};
    ///
    /// let grid = vec![
    ///     vec!["Name".to_string(), "Home Town".to_string()],
    ///     vec!["Ada".to_string(), "London".to_string()],
    /// ];
    /// let table = Table::from_grid(grid, &Selection::default());
    ///
    /// assert_eq!(table.len(), 1);
    /// assert_eq!(table.field_names(), vec!["name", "home_town"]);
    /// ```
    #[must_use]
    pub fn from_grid(grid: Grid, selection: &Selection) -> Self {
        Self::from_grid_with(grid, selection, &HeaderNormalizer::new())
    }

    /// Build a table from a raw grid with a custom header normalizer
    pub fn from_grid_with<T: Transliterate>(
        grid: Grid,
        selection: &Selection,
        normalizer: &HeaderNormalizer<T>,
    ) -> Self {
        let SelectedRows { header, rows } = select(grid, selection);
        Self::build(&header, rows, normalizer)
    }

    /// Zip normalized header fields with each data row.
    ///
    /// Short rows leave their trailing fields out of the record; extra cells
    /// past the header are dropped.
    pub(crate) fn build<T: Transliterate>(
        header: &[String],
        rows: Grid,
        normalizer: &HeaderNormalizer<T>,
    ) -> Self {
        let fields = normalizer.normalize_row(header);

        let records: Vec<Record> = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                if row.len() > fields.len() {
                    tracing::debug!(
                        "data row {} has {} cell(s) past the header, dropping them",
                        i,
                        row.len() - fields.len()
                    );
                }
                fields
                    .iter()
                    .cloned()
                    .zip(row.into_iter().map(FieldValue::String))
                    .collect()
            })
            .collect();

        tracing::debug!("built {} record(s) with fields {:?}", records.len(), fields);
        Table { records }
    }

    // ===== Chainable operations =====

    /// Keep only the listed fields.
    ///
    /// Fields stay in record order, not argument order. Records lacking a
    /// listed field simply omit it.
    #[must_use]
    pub fn only<S: AsRef<str>>(&self, fields: &[S]) -> Table {
        self.filter_fields(|key| fields.iter().any(|f| f.as_ref() == key))
    }

    /// Drop the listed fields, keeping everything else in order
    #[must_use]
    pub fn except<S: AsRef<str>>(&self, fields: &[S]) -> Table {
        self.filter_fields(|key| !fields.iter().any(|f| f.as_ref() == key))
    }

    fn filter_fields<F>(&self, keep: F) -> Table
    where
        F: Fn(&str) -> bool,
    {
        let records = self
            .records
            .iter()
            .map(|record| {
                record
                    .iter()
                    .filter(|(key, _)| keep(key))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect()
            })
            .collect();
        Table { records }
    }

    /// Set `field` in every record to `transform(current, record)`.
    ///
    /// `current` is an owned copy of the field's value (`Null` when the
    /// record lacks the field) and `record` is the record before the update,
    /// so new fields can be derived from existing ones. A field that did not
    /// exist is appended after the record's other fields.
    ///
    /// # Example
    /// ```
    /// use tabulator::{FieldValue, Selection, Table};
    ///
    /// let grid = vec![
    ///     vec!["first title".to_string()],
    ///     vec!["abc".to_string()],
    /// ];
    /// let table = Table::from_grid(grid, &Selection::default())
    ///     .apply("reversed", |_, record| {
    ///         let text = record["first_title"].as_str().unwrap_or_default();
    ///         FieldValue::from(text.chars().rev().collect::<String>())
    ///     });
    ///
    /// assert_eq!(table.records()[0]["reversed"], "cba");
    /// ```
    #[must_use]
    pub fn apply<F>(&self, field: &str, mut transform: F) -> Table
    where
        F: FnMut(FieldValue, &Record) -> FieldValue,
    {
        let records = self
            .records
            .iter()
            .map(|record| {
                let current = record.get(field).cloned().unwrap_or_default();
                let value = transform(current, record);
                let mut next = record.clone();
                next.insert(field.to_string(), value);
                next
            })
            .collect();
        Table { records }
    }

    /// Drop every record for which `predicate` returns true
    #[must_use]
    pub fn reject<F>(&self, predicate: F) -> Table
    where
        F: Fn(&Record) -> bool,
    {
        let records = self
            .records
            .iter()
            .filter(|record| !predicate(record))
            .cloned()
            .collect();
        Table { records }
    }

    // ===== Access =====

    /// Copy of the records, independent of this table
    #[must_use]
    pub fn records(&self) -> Vec<Record> {
        self.records.clone()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every field name present in any record, in first-seen order
    #[must_use]
    pub fn field_names(&self) -> Vec<String> {
        let names: IndexSet<&String> = self.records.iter().flat_map(Record::keys).collect();
        names.into_iter().cloned().collect()
    }
}

impl From<Vec<Record>> for Table {
    fn from(records: Vec<Record>) -> Self {
        Table::from_records(records)
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
