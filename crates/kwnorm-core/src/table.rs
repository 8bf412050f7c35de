//! In-memory table: a header row plus data rows of typed cells
//!
//! Sources decode into a [`Table`], the annotator reads one column of it,
//! and sinks write it back out with the derived columns appended.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::annotate::Annotation;
use crate::{Error, Result};

/// Header of the derived canonical-key column
pub const NORMALIZED_COLUMN: &str = "Normalized_Keyword";

/// Header of the derived duplicate-group column
pub const DUPLICATE_GROUP_COLUMN: &str = "Duplicate_Group";

static EMPTY: Cell = Cell::Empty;

/// One table value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Any other value, kept verbatim in display form (dates, error cells,
    /// fields of numeric CSV columns)
    Other(String),
}

impl Cell {
    /// The cell's text if it holds a keyword candidate.
    ///
    /// Only [`Cell::Text`] qualifies; numbers, dates and blanks do not.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) | Cell::Other(s) => f.write_str(s),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(x) => write!(f, "{}", x),
            Cell::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Header row plus data rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Build a rectangular table.
    ///
    /// Rows wider than the header get `Unnamed: i` header placeholders so no
    /// field is lost; short rows are padded with [`Cell::Empty`].
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let mut table = Self { headers, rows };
        table.square();
        table
    }

    fn square(&mut self) {
        let width = self
            .rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(self.headers.len());
        for index in self.headers.len()..width {
            self.headers.push(unnamed(index));
        }
        for row in &mut self.rows {
            row.resize(width, Cell::Empty);
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column named `name` (exact, case-sensitive match)
    ///
    /// # Errors
    /// `ColumnNotFound` listing every header when `name` is absent.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::ColumnNotFound {
                column: name.to_string(),
                available: self.headers.clone(),
            })
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, index: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or(&EMPTY))
    }

    /// Keyword candidates of one column; `None` for non-text cells
    pub fn keywords(&self, index: usize) -> Vec<Option<&str>> {
        self.column(index).map(Cell::as_text).collect()
    }

    /// Append the canonical-key and duplicate-group columns.
    ///
    /// Existing cells are left untouched; each row gains two text cells at
    /// the end. The table is squared first, so the new cells line up with
    /// the new headers even if rows were edited after construction.
    ///
    /// # Panics
    /// If `annotations` does not have one entry per row.
    pub fn append_annotations(&mut self, annotations: &[Annotation]) {
        assert_eq!(
            annotations.len(),
            self.rows.len(),
            "one annotation per row required"
        );
        self.square();
        self.headers.push(NORMALIZED_COLUMN.to_string());
        self.headers.push(DUPLICATE_GROUP_COLUMN.to_string());
        for (row, annotation) in self.rows.iter_mut().zip(annotations) {
            row.push(Cell::Text(annotation.normalized.clone()));
            row.push(Cell::Text(annotation.duplicate_group.clone()));
        }
    }
}

/// Placeholder for a blank or missing header cell
pub(crate) fn unnamed(index: usize) -> String {
    format!("Unnamed: {}", index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["Keyword".into(), "Volume".into()],
            vec![
                vec!["Autos".into(), Cell::Int(90)],
                vec![Cell::Int(7)],
                vec![Cell::Empty, Cell::Float(1.5)],
            ],
        )
    }

    #[test]
    fn test_new_pads_short_rows() {
        let table = sample();
        assert_eq!(table.rows[1], vec![Cell::Int(7), Cell::Empty]);
    }

    #[test]
    fn test_new_widens_header_for_long_rows() {
        let table = Table::new(
            vec!["Keyword".into()],
            vec![vec!["autos".into(), Cell::Int(10), "note".into()], vec!["auto".into()]],
        );
        assert_eq!(table.headers, vec!["Keyword", "Unnamed: 1", "Unnamed: 2"]);
        assert_eq!(table.rows[0][2], Cell::Text("note".into()));
        assert_eq!(table.rows[1], vec!["auto".into(), Cell::Empty, Cell::Empty]);
    }

    #[test]
    fn test_append_annotations_keeps_extra_fields() {
        let mut table = Table::new(vec!["Keyword".into()], vec![vec!["autos".into()]]);
        table.rows[0].push("late".into());
        table.append_annotations(&[Annotation {
            normalized: "auto".into(),
            duplicate_group: String::new(),
        }]);
        assert_eq!(
            table.headers,
            vec!["Keyword", "Unnamed: 1", NORMALIZED_COLUMN, DUPLICATE_GROUP_COLUMN]
        );
        assert_eq!(table.rows[0][1], Cell::Text("late".into()));
        assert_eq!(table.rows[0][2], Cell::Text("auto".into()));
    }

    #[test]
    fn test_column_index() {
        let table = sample();
        assert_eq!(table.column_index("Volume").unwrap(), 1);
        let err = table.column_index("keyword").unwrap_err();
        assert!(matches!(err, Error::ColumnNotFound { .. }));
        assert_eq!(err.available(), ["Keyword".to_string(), "Volume".to_string()]);
    }

    #[test]
    fn test_keywords_only_text_cells() {
        let table = sample();
        assert_eq!(table.keywords(0), vec![Some("Autos"), None, None]);
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Empty.to_string(), "");
        assert_eq!(Cell::Int(42).to_string(), "42");
        assert_eq!(Cell::Float(1.5).to_string(), "1.5");
        assert_eq!(Cell::Bool(true).to_string(), "true");
        assert_eq!(Cell::Other("2024-01-01".into()).to_string(), "2024-01-01");
    }

    #[test]
    fn test_append_annotations_keeps_original_cells() {
        let mut table = sample();
        let annotations = vec![
            Annotation {
                normalized: "auto".into(),
                duplicate_group: String::new(),
            };
            3
        ];
        table.append_annotations(&annotations);
        assert_eq!(
            table.headers,
            vec!["Keyword", "Volume", NORMALIZED_COLUMN, DUPLICATE_GROUP_COLUMN]
        );
        assert_eq!(table.rows[0][0], Cell::Text("Autos".into()));
        assert_eq!(table.rows[0][1], Cell::Int(90));
        assert_eq!(table.rows[0][2], Cell::Text("auto".into()));
        assert_eq!(table.rows[0][3], Cell::Text(String::new()));
    }
}
