//! Batch annotator — canonical keys and duplicate-group labels for a batch
//!
//! Keys are computed per row; labels need the whole batch. A row is labelled
//! with its key only when at least one other row in the same batch shares it.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalizer::{normalize_cell, normalize_opt};
use crate::table::Cell;

/// Derived fields attached to one input row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Canonical key of the row's keyword
    pub normalized: String,
    /// The canonical key if shared with another row, else empty
    pub duplicate_group: String,
}

impl Annotation {
    pub fn is_duplicate(&self) -> bool {
        !self.duplicate_group.is_empty()
    }
}

// ── Public API ─────────────────────────────────────────────

/// Annotate a batch of keywords, preserving input order.
///
/// `None` marks an absent or non-text value; it normalizes to the empty key
/// like any other blank keyword.
pub fn annotate<'a, I>(keywords: I) -> Vec<Annotation>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let keys: Vec<String> = keywords.into_iter().map(normalize_opt).collect();
    label_groups(keys)
}

/// Same as [`annotate`] but normalizes rows on the rayon pool.
///
/// Grouping still runs after every key is known, so the result is identical
/// to the sequential version.
pub fn annotate_parallel(keywords: &[Option<&str>]) -> Vec<Annotation> {
    let keys: Vec<String> = keywords.par_iter().map(|k| normalize_opt(*k)).collect();
    label_groups(keys)
}

/// Annotate a column of table cells
pub fn annotate_cells<'a, I>(cells: I) -> Vec<Annotation>
where
    I: IntoIterator<Item = &'a Cell>,
{
    let keys: Vec<String> = cells.into_iter().map(normalize_cell).collect();
    label_groups(keys)
}

/// Count how many rows share each key
pub fn group_sizes(keys: &[String]) -> FxHashMap<&str, usize> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for key in keys {
        *counts.entry(key.as_str()).or_insert(0) += 1;
    }
    counts
}

// ── Grouping ───────────────────────────────────────────────

fn label_groups(keys: Vec<String>) -> Vec<Annotation> {
    let labels: Vec<bool> = {
        let counts = group_sizes(&keys);
        debug!(rows = keys.len(), distinct = counts.len(), "grouped canonical keys");
        keys.iter().map(|key| counts[key.as_str()] > 1).collect()
    };

    keys.into_iter()
        .zip(labels)
        .map(|(normalized, shared)| {
            let duplicate_group = if shared {
                normalized.clone()
            } else {
                String::new()
            };
            Annotation {
                normalized,
                duplicate_group,
            }
        })
        .collect()
}
