//! Output sink — writes the annotated table next to its source

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use tracing::debug;

use crate::table::{Cell, Table};
use crate::{Error, Result};

const OUTPUT_SUFFIX: &str = "_normalized";

/// Largest integer magnitude an xlsx number (an `f64`) holds exactly
const MAX_EXACT_INT: u64 = 1 << 53;

/// Derive the output path from the source path.
///
/// `kw.xlsx` and `kw.xls` become `kw_normalized.xlsx`, `kw.csv` becomes
/// `kw_normalized.csv`; any other name gets `_normalized.xlsx` appended.
pub fn default_output_path(source: &Path) -> PathBuf {
    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match ext.as_deref() {
        Some("xlsx") | Some("xls") => format!("{}{}.xlsx", stem, OUTPUT_SUFFIX),
        Some("csv") => format!("{}{}.csv", stem, OUTPUT_SUFFIX),
        _ => {
            let name = source
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!("{}{}.xlsx", name, OUTPUT_SUFFIX)
        }
    };
    source.with_file_name(file_name)
}

/// Write `table` to `path`: CSV for a `.csv` path, otherwise a single-sheet
/// xlsx workbook named `sheet` (default name when `None`).
pub fn write_table(table: &Table, path: &Path, sheet: Option<&str>) -> Result<()> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    if is_csv {
        write_csv(table, path)?;
    } else {
        write_xlsx(table, path, sheet).map_err(|e| Error::write(path, e))?;
    }

    debug!(path = %path.display(), rows = table.len(), "wrote table");
    Ok(())
}

// ── CSV ────────────────────────────────────────────────────

fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::write(path, e))?;

    writer
        .write_record(&table.headers)
        .map_err(|e| Error::write(path, e))?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(|cell| cell.to_string()))
            .map_err(|e| Error::write(path, e))?;
    }
    writer.flush().map_err(|e| Error::write(path, e))
}

// ── xlsx ───────────────────────────────────────────────────

fn write_xlsx(table: &Table, path: &Path, sheet: Option<&str>) -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    if let Some(name) = sheet {
        worksheet.set_name(name)?;
    }

    for (col, header) in table.headers.iter().enumerate() {
        worksheet.write_string(0, column_number(col)?, header)?;
    }
    for (index, row) in table.rows.iter().enumerate() {
        let row_number = u32::try_from(index + 1)
            .map_err(|_| XlsxError::RowColumnLimitError)?;
        for (col, cell) in row.iter().enumerate() {
            write_cell(worksheet, row_number, column_number(col)?, cell)?;
        }
    }

    workbook.save(path)
}

fn column_number(index: usize) -> std::result::Result<u16, XlsxError> {
    u16::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
) -> std::result::Result<(), XlsxError> {
    match cell {
        Cell::Empty => {}
        Cell::Text(s) | Cell::Other(s) => {
            if !s.is_empty() {
                worksheet.write_string(row, col, s)?;
            }
        }
        Cell::Int(i) if i.unsigned_abs() <= MAX_EXACT_INT => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        Cell::Int(i) => {
            worksheet.write_string(row, col, i.to_string())?;
        }
        Cell::Float(f) => {
            worksheet.write_number(row, col, *f)?;
        }
        Cell::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}
