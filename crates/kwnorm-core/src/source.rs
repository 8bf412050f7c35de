//! Data source — decodes a workbook sheet or CSV file into a [`Table`]
//!
//! The first row is the header. Workbooks are read with `calamine`, so every
//! format it understands (xlsx, xlsm, xlsb, xls, ods) is accepted; CSV files
//! go through the `csv` crate.

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::table::{unnamed, Cell, Table};
use crate::{Error, Result};

/// Container format of a data source, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    Workbook,
    Csv,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "xla" | "xlam" | "ods" => Some(SourceFormat::Workbook),
            "csv" => Some(SourceFormat::Csv),
            _ => None,
        }
    }
}

/// Where to read keywords from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    pub path: PathBuf,
    /// Worksheet name; the first sheet when `None`. Ignored for CSV.
    pub sheet: Option<String>,
}

/// A decoded table plus the sheet it came from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTable {
    pub table: Table,
    /// Resolved worksheet name (`None` for CSV)
    pub sheet: Option<String>,
}

impl DataSource {
    pub fn new(path: impl Into<PathBuf>, sheet: Option<String>) -> Self {
        Self {
            path: path.into(),
            sheet,
        }
    }

    pub fn format(&self) -> Result<SourceFormat> {
        SourceFormat::from_path(&self.path)
            .ok_or_else(|| Error::UnsupportedFormat(self.path.clone()))
    }

    /// Decode the source.
    ///
    /// # Errors
    /// - `SourceNotFound` if the path does not exist
    /// - `UnsupportedFormat` for unknown extensions
    /// - `SheetNotFound` if the named sheet is missing (lists the sheets)
    /// - `EmptySource` if there is no header row
    /// - `Read` for decoding failures
    pub fn load(&self) -> Result<LoadedTable> {
        if !self.path.exists() {
            return Err(Error::SourceNotFound(self.path.clone()));
        }
        match self.format()? {
            SourceFormat::Workbook => self.load_workbook(),
            SourceFormat::Csv => {
                if let Some(sheet) = &self.sheet {
                    warn!(sheet = %sheet, "sheet selector ignored for CSV source");
                }
                Ok(LoadedTable {
                    table: read_csv(&self.path)?,
                    sheet: None,
                })
            }
        }
    }

    fn load_workbook(&self) -> Result<LoadedTable> {
        let mut workbook = open_workbook_auto(&self.path).map_err(|e| Error::read(&self.path, e))?;
        let sheets = workbook.sheet_names();
        debug!(path = %self.path.display(), ?sheets, "opened workbook");

        let sheet = match &self.sheet {
            Some(name) if sheets.contains(name) => name.clone(),
            Some(name) => {
                return Err(Error::SheetNotFound {
                    sheet: name.clone(),
                    available: sheets,
                })
            }
            None => sheets
                .first()
                .cloned()
                .ok_or_else(|| Error::EmptySource(self.path.clone()))?,
        };

        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| Error::read(&self.path, e))?;

        let mut rows = range.rows();
        let headers = rows
            .next()
            .map(header_row)
            .ok_or_else(|| Error::EmptySource(self.path.clone()))?;
        let body: Vec<Vec<Cell>> = rows
            .map(|row| row.iter().map(workbook_cell).collect())
            .collect();

        Ok(LoadedTable {
            table: Table::new(headers, body),
            sheet: Some(sheet),
        })
    }
}

// ── Workbook decoding ──────────────────────────────────────

fn header_row(row: &[Data]) -> Vec<String> {
    row.iter()
        .enumerate()
        .map(|(i, cell)| match cell {
            Data::Empty => unnamed(i),
            other => other.to_string(),
        })
        .collect()
}

fn workbook_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        other => Cell::Other(other.to_string()),
    }
}

// ── CSV decoding ───────────────────────────────────────────

/// Read a CSV file with a header row
pub fn read_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::read(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Error::read(path, e))?
        .iter()
        .enumerate()
        .map(|(i, h)| if h.is_empty() { unnamed(i) } else { h.to_string() })
        .collect();
    if headers.is_empty() {
        return Err(Error::EmptySource(path.to_path_buf()));
    }

    let mut records = Vec::new();
    for record in reader.records() {
        records.push(record.map_err(|e| Error::read(path, e))?);
    }

    let numeric = numeric_columns(&records);
    let rows: Vec<Vec<Cell>> = records
        .iter()
        .map(|record| {
            record
                .iter()
                .enumerate()
                .map(|(col, field)| csv_cell(field, numeric.get(col).copied().unwrap_or(false)))
                .collect()
        })
        .collect();
    debug!(path = %path.display(), rows = rows.len(), "read csv");

    Ok(Table::new(headers, rows))
}

/// A column is numeric when every non-empty field in it is a number.
/// One text field anywhere makes the whole column text, so `2024` in a
/// keyword column is still a keyword.
fn numeric_columns(records: &[csv::StringRecord]) -> Vec<bool> {
    let width = records.iter().map(csv::StringRecord::len).max().unwrap_or(0);
    (0..width)
        .map(|col| {
            records
                .iter()
                .filter_map(|record| record.get(col))
                .filter(|field| !field.is_empty())
                .all(is_numeric)
        })
        .collect()
}

/// Classify a raw CSV field. Fields of numeric columns are not keywords but
/// are kept verbatim so they round-trip unchanged.
fn csv_cell(field: &str, numeric_column: bool) -> Cell {
    if field.is_empty() {
        Cell::Empty
    } else if numeric_column {
        Cell::Other(field.to_string())
    } else {
        Cell::Text(field.to_string())
    }
}

fn is_numeric(field: &str) -> bool {
    let trimmed = field.trim();
    trimmed.parse::<f64>().is_ok() && trimmed.chars().any(|c| c.is_ascii_digit())
}
