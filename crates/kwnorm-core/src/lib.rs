//! kwnorm core — canonical keyword keys and near-duplicate grouping
//!
//! Keyword lists collected for SEO or catalog work are full of variants of
//! the same term: `Auto-Versicherungen`, `auto versicherung`,
//! `Versicherung Auto`. This crate reduces each keyword to a canonical key so
//! such variants can be found by exact key comparison, then labels and
//! exports the rows for manual review.
//!
//! # Architecture
//!
//! ```text
//! DataSource → Table → Normalizer (per row) → Annotator (whole batch)
//!                                                  ↓
//!                           DuplicateReport ← Table + derived columns → Sink
//! ```
//!
//! # Guarantees
//!
//! - **Total**: normalization never fails; non-text values give an empty key
//! - **Deterministic**: same input always produces identical output
//! - **Order preserving**: annotated rows keep their original order and cells

pub mod annotate;
pub mod batch;
pub mod error;
pub mod normalizer;
pub mod report;
pub mod sink;
pub mod source;
pub mod suffix;
pub mod table;

pub use annotate::{annotate, annotate_parallel, Annotation};
pub use batch::{run, BatchConfig, BatchOutcome, DEFAULT_KEYWORD_COLUMN};
pub use error::{Error, Result};
pub use normalizer::normalize_keyword;
pub use report::{DuplicateGroup, DuplicateReport, GroupMember};
pub use source::DataSource;
pub use table::{Cell, Table, DUPLICATE_GROUP_COLUMN, NORMALIZED_COLUMN};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_agree() {
        let keywords = ["Autoversicherung", "autoversicherungen"];
        let annotations = annotate(keywords.iter().map(|k| Some(*k)));
        for (keyword, annotation) in keywords.iter().zip(&annotations) {
            assert_eq!(normalize_keyword(keyword), annotation.normalized);
        }
        assert!(annotations.iter().all(Annotation::is_duplicate));
    }

    #[test]
    fn test_determinism_100_iterations() {
        let keywords = [
            Some("Auto Versicherung"),
            Some("Versicherung Auto"),
            None,
            Some("Hotels in Berlin"),
        ];
        let first = annotate(keywords);
        for i in 0..100 {
            assert_eq!(first, annotate(keywords), "Non-determinism at iteration {}", i);
        }
    }
}
