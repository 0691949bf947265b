//! Row selection
//!
//! Picks the header row and the data rows out of a raw grid. Rejections run
//! first, in order, each against the grid left by the previous one; then the
//! header is read at `header` and data rows are taken from `skip` onward.

use crate::error::TabulatorError;
use std::fmt;
use std::ops::{Range, RangeInclusive};
use std::str::FromStr;
use std::sync::Arc;

/// Raw worksheet content: rows of cell text.
pub type Grid = Vec<Vec<String>>;

/// Predicate over a raw row's cells.
pub type RowPredicate = Arc<dyn Fn(&[String]) -> bool + Send + Sync>;

/// One entry of a selection's reject list.
///
/// Negative positions count from the end of the grid as it stands when the
/// entry is applied.
#[derive(Clone)]
pub enum Rejection {
    Index(isize),
    Range {
        start: isize,
        end: isize,
        inclusive: bool,
    },
    Predicate(RowPredicate),
}

impl Rejection {
    /// Reject every row for which `predicate` returns true.
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&[String]) -> bool + Send + Sync + 'static,
    {
        Rejection::Predicate(Arc::new(predicate))
    }

    /// Reject every row that has a cell exactly equal to `token`.
    pub fn matching_cell(token: impl Into<String>) -> Self {
        let token = token.into();
        Self::predicate(move |row| row.iter().any(|cell| *cell == token))
    }

    /// Remove the addressed rows from `grid`, returning how many were removed.
    pub fn apply(&self, grid: &mut Grid) -> usize {
        let before = grid.len();
        match self {
            Rejection::Predicate(predicate) => grid.retain(|row| !predicate(row)),
            Rejection::Index(index) => {
                if let Some(i) = resolve_index(*index, grid.len()) {
                    grid.remove(i);
                }
            }
            Rejection::Range {
                start,
                end,
                inclusive,
            } => {
                if let Some(range) = resolve_range(*start, *end, *inclusive, grid.len()) {
                    grid.drain(range);
                }
            }
        }
        before - grid.len()
    }
}

fn signed_len(len: usize) -> isize {
    isize::try_from(len).unwrap_or(isize::MAX)
}

fn resolve_index(index: isize, len: usize) -> Option<usize> {
    let len = signed_len(len);
    let index = if index < 0 { index + len } else { index };
    if (0..len).contains(&index) {
        usize::try_from(index).ok()
    } else {
        None
    }
}

fn resolve_range(start: isize, end: isize, inclusive: bool, len: usize) -> Option<Range<usize>> {
    let len = signed_len(len);
    let start = if start < 0 { start + len } else { start };
    if !(0..=len).contains(&start) {
        return None;
    }

    let mut end = if end < 0 { end + len } else { end };
    if inclusive {
        end = end.saturating_add(1);
    }
    let end = end.min(len);
    if end <= start {
        return None;
    }

    Some(usize::try_from(start).ok()?..usize::try_from(end).ok()?)
}

impl fmt::Debug for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Index(index) => f.debug_tuple("Index").field(index).finish(),
            Rejection::Range {
                start,
                end,
                inclusive,
            } => f
                .debug_struct("Range")
                .field("start", start)
                .field("end", end)
                .field("inclusive", inclusive)
                .finish(),
            Rejection::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<isize> for Rejection {
    fn from(index: isize) -> Self {
        Rejection::Index(index)
    }
}

impl From<i32> for Rejection {
    fn from(index: i32) -> Self {
        Rejection::Index(index as isize)
    }
}

impl From<RangeInclusive<isize>> for Rejection {
    fn from(range: RangeInclusive<isize>) -> Self {
        Rejection::Range {
            start: *range.start(),
            end: *range.end(),
            inclusive: true,
        }
    }
}

impl From<Range<isize>> for Rejection {
    fn from(range: Range<isize>) -> Self {
        Rejection::Range {
            start: range.start,
            end: range.end,
            inclusive: false,
        }
    }
}

/// Parses `"3"`, `"-1"`, `"2..5"` (exclusive) and `"-2..=-1"` (inclusive).
impl FromStr for Rejection {
    type Err = TabulatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |part: &str| {
            part.trim().parse::<isize>().map_err(|_| {
                TabulatorError::InvalidConfig(format!("invalid row position '{part}' in '{s}'"))
            })
        };

        if let Some((start, end)) = s.split_once("..=") {
            Ok(Rejection::Range {
                start: parse(start)?,
                end: parse(end)?,
                inclusive: true,
            })
        } else if let Some((start, end)) = s.split_once("..") {
            Ok(Rejection::Range {
                start: parse(start)?,
                end: parse(end)?,
                inclusive: false,
            })
        } else {
            Ok(Rejection::Index(parse(s)?))
        }
    }
}

/// Construction-time row selection.
///
/// # Example
/// ```
/// use tabulator::{Rejection, Selection};
///
/// let selection = Selection::new()
///     .with_header(1)
///     .with_reject(-1)
///     .with_reject(Rejection::matching_cell("TOTAL"));
/// assert_eq!(selection.data_start(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Position of the header row after rejections
    pub header: usize,
    /// First data row after rejections, `header + 1` when unset
    pub skip: Option<usize>,
    pub reject: Vec<Rejection>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_header(mut self, header: usize) -> Self {
        self.header = header;
        self
    }

    #[must_use]
    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = Some(skip);
        self
    }

    #[must_use]
    pub fn with_reject(mut self, rejection: impl Into<Rejection>) -> Self {
        self.reject.push(rejection.into());
        self
    }

    #[must_use]
    pub fn with_rejects<I, R>(mut self, rejections: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Rejection>,
    {
        self.reject.extend(rejections.into_iter().map(Into::into));
        self
    }

    /// Index of the first data row
    #[must_use]
    pub fn data_start(&self) -> usize {
        self.skip.unwrap_or(self.header.saturating_add(1))
    }
}

/// Header row and data rows picked out of a grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectedRows {
    pub header: Vec<String>,
    pub rows: Grid,
}

/// Apply `selection` to `grid`.
///
/// Out-of-range header or skip positions give an empty header or no data
/// rows rather than an error.
pub fn select(mut grid: Grid, selection: &Selection) -> SelectedRows {
    for rejection in &selection.reject {
        let removed = rejection.apply(&mut grid);
        tracing::debug!("rejection {:?} removed {} row(s)", rejection, removed);
    }

    let header = grid.get(selection.header).cloned().unwrap_or_default();
    let start = selection.data_start();
    let rows = if start <= grid.len() {
        grid.split_off(start)
    } else {
        Grid::new()
    };

    tracing::debug!(
        "selected header at row {} and {} data row(s) from row {}",
        selection.header,
        rows.len(),
        start
    );

    SelectedRows { header, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Grid {
        rows.iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect()
    }

    fn seven_rows() -> Grid {
        grid(&[
            &["title", "other title"],
            &["data", "other data"],
            &["nothing", "related", "with", "table"],
            &["more", "data"],
            &["nothing", "here"],
            &["nothing", "again"],
            &["nothing", "at all"],
        ])
    }

    #[test]
    fn defaults_take_first_row_as_header() {
        let selected = select(grid(&[&["a", "b"], &["1", "2"], &["3", "4"]]), &Selection::new());
        assert_eq!(selected.header, vec!["a", "b"]);
        assert_eq!(selected.rows.len(), 2);
    }

    #[test]
    fn header_moves_default_skip() {
        let selected = select(
            grid(&[&["report"], &["a", "b"], &["1", "2"]]),
            &Selection::new().with_header(1),
        );
        assert_eq!(selected.header, vec!["a", "b"]);
        assert_eq!(selected.rows, grid(&[&["1", "2"]]));
    }

    #[test]
    fn explicit_skip_leaves_gap_rows_out() {
        let selected = select(
            grid(&[&["a"], &["units"], &["blank"], &["1"], &["2"]]),
            &Selection::new().with_skip(3),
        );
        assert_eq!(selected.rows, grid(&[&["1"], &["2"]]));
    }

    #[test]
    fn out_of_range_positions_are_empty() {
        let selected = select(grid(&[&["a"], &["1"]]), &Selection::new().with_header(5));
        assert!(selected.header.is_empty());
        assert!(selected.rows.is_empty());

        let selected = select(grid(&[&["a"], &["1"]]), &Selection::new().with_skip(9));
        assert_eq!(selected.header, vec!["a"]);
        assert!(selected.rows.is_empty());
    }

    #[test]
    fn single_index_rejection() {
        let selected = select(
            grid(&[
                &["title", "other title"],
                &["data", "other data"],
                &["nothing", "related", "with", "table"],
            ]),
            &Selection::new().with_reject(2),
        );
        assert_eq!(selected.rows.len(), 1);
    }

    #[test]
    fn rejections_resolve_against_shrinking_grid() {
        let selection = Selection::new()
            .with_reject(2)
            .with_reject(-1)
            .with_reject(-2..=-1);
        let selected = select(seven_rows(), &selection);
        assert_eq!(selected.rows, grid(&[&["data", "other data"], &["more", "data"]]));
    }

    #[test]
    fn predicate_rejection() {
        let selection =
            Selection::new().with_reject(Rejection::predicate(|row| row.iter().any(|c| c == "nothing")));
        let selected = select(seven_rows(), &selection);
        assert_eq!(selected.header, vec!["title", "other title"]);
        assert_eq!(selected.rows.len(), 2);
    }

    #[test]
    fn predicates_and_indices_interleave() {
        let selection = Selection::new()
            .with_reject(Rejection::matching_cell("nothing"))
            .with_reject(-1);
        let selected = select(seven_rows(), &selection);
        assert_eq!(selected.rows, grid(&[&["data", "other data"]]));
    }

    #[test]
    fn exclusive_range_stops_before_end() {
        let mut rows = seven_rows();
        let removed = Rejection::from(1..3).apply(&mut rows);
        assert_eq!(removed, 2);
        assert_eq!(rows[1], vec!["more", "data"]);
    }

    #[test]
    fn unreachable_positions_remove_nothing() {
        let mut rows = seven_rows();
        assert_eq!(Rejection::from(7).apply(&mut rows), 0);
        assert_eq!(Rejection::from(-8).apply(&mut rows), 0);
        assert_eq!(Rejection::from(8..=9).apply(&mut rows), 0);
        assert_eq!(Rejection::from(4..2).apply(&mut rows), 0);
        assert_eq!(rows.len(), 7);
    }

    #[test]
    fn range_end_is_clamped() {
        let mut rows = seven_rows();
        assert_eq!(Rejection::from(5..=100).apply(&mut rows), 2);
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn empty_reject_list_is_noop() {
        let selection = Selection::new().with_rejects(Vec::<Rejection>::new());
        assert_eq!(select(seven_rows(), &selection).rows.len(), 6);
    }

    #[test]
    fn parses_textual_entries() {
        assert!(matches!("3".parse::<Rejection>(), Ok(Rejection::Index(3))));
        assert!(matches!(" -1 ".parse::<Rejection>(), Ok(Rejection::Index(-1))));
        assert!(matches!(
            "-2..=-1".parse::<Rejection>(),
            Ok(Rejection::Range {
                start: -2,
                end: -1,
                inclusive: true
            })
        ));
        assert!(matches!(
            "1..4".parse::<Rejection>(),
            Ok(Rejection::Range {
                start: 1,
                end: 4,
                inclusive: false
            })
        ));
        assert!(matches!(
            "two".parse::<Rejection>(),
            Err(TabulatorError::InvalidConfig(_))
        ));
    }
}
