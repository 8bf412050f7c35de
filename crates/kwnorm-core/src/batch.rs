//! Batch runner — load, annotate, report, write
//!
//! One call processes one data source end to end. All inputs arrive through
//! [`BatchConfig`]; nothing is read from the environment or prompted for.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::annotate::{annotate, annotate_parallel, Annotation};
use crate::report::DuplicateReport;
use crate::sink::{default_output_path, write_table};
use crate::source::DataSource;
use crate::table::{Cell, Table};
use crate::Result;

/// Default name of the keyword column
pub const DEFAULT_KEYWORD_COLUMN: &str = "Keyword";

/// Parameters of one batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Workbook or CSV file to read
    pub source: PathBuf,
    /// Worksheet to read; the first sheet when `None`
    pub sheet: Option<String>,
    /// Header of the keyword column
    pub column: String,
    /// Where to write the annotated table; derived from `source` when `None`
    pub output: Option<PathBuf>,
    /// Normalize rows on the rayon pool
    pub parallel: bool,
    /// Write the annotated table at all
    pub write_output: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            sheet: None,
            column: DEFAULT_KEYWORD_COLUMN.to_string(),
            output: None,
            parallel: false,
            write_output: true,
        }
    }
}

impl BatchConfig {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// The output path this run writes to
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.source))
    }
}

/// Everything a batch run produced
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Source table with `Normalized_Keyword` and `Duplicate_Group` appended
    pub table: Table,
    pub annotations: Vec<Annotation>,
    pub report: DuplicateReport,
    /// Index of the keyword column in `table`
    pub keyword_column: usize,
    /// Resolved worksheet (`None` for CSV)
    pub sheet: Option<String>,
    /// Written file, if any
    pub output_path: Option<PathBuf>,
}

impl BatchOutcome {
    /// Original keyword of each row in display form
    pub fn keywords(&self) -> Vec<String> {
        self.table
            .column(self.keyword_column)
            .map(Cell::to_string)
            .collect()
    }
}

/// Run one batch.
///
/// # Errors
/// Source errors from [`DataSource::load`], `ColumnNotFound` when the keyword
/// column is missing (lists the headers), `Write` when the output cannot be
/// saved.
pub fn run(config: &BatchConfig) -> Result<BatchOutcome> {
    let loaded = DataSource::new(&config.source, config.sheet.clone()).load()?;
    let mut table = loaded.table;
    info!(
        source = %config.source.display(),
        sheet = loaded.sheet.as_deref().unwrap_or("-"),
        rows = table.len(),
        "loaded source"
    );

    let keyword_column = table.column_index(&config.column)?;
    debug!(column = %config.column, index = keyword_column, "resolved keyword column");

    let annotations = {
        let keywords = table.keywords(keyword_column);
        if config.parallel {
            annotate_parallel(&keywords)
        } else {
            annotate(keywords)
        }
    };

    let display: Vec<String> = table
        .column(keyword_column)
        .map(Cell::to_string)
        .collect();
    let report = DuplicateReport::from_annotations(&display, &annotations);
    info!(
        duplicate_rows = report.duplicate_rows,
        groups = report.group_count(),
        "annotated keywords"
    );

    table.append_annotations(&annotations);

    let output_path = if config.write_output {
        let path = config.output_path();
        write_table(&table, &path, loaded.sheet.as_deref())?;
        info!(output = %path.display(), "saved annotated table");
        Some(path)
    } else {
        None
    };

    Ok(BatchOutcome {
        table,
        annotations,
        report,
        keyword_column,
        sheet: loaded.sheet,
        output_path,
    })
}
