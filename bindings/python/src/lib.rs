//! Python bindings for kwnorm
//!
//! Thin wrapper around `kwnorm-core` — ZERO logic here.
//! All behavior comes from the Rust implementation.

use pyo3::prelude::*;
use pyo3::types::PyString;

/// Text of a Python value if it is a `str`, else `None`.
///
/// `None`, floats (pandas' NaN), ints and every other type count as
/// "no keyword" and normalize to the empty key.
fn as_keyword(value: &Bound<'_, PyAny>) -> PyResult<Option<String>> {
    match value.downcast::<PyString>() {
        Ok(s) => Ok(Some(s.to_cow()?.into_owned())),
        Err(_) => Ok(None),
    }
}

/// Normalize a keyword to its canonical key.
///
/// Guarantees:
///   - Deterministic: same input → same output
///   - Total: non-str values return ""
///
/// Args:
///     value: the raw keyword (any object)
///
/// Returns:
///     The canonical key
#[pyfunction]
fn normalize_keyword(value: &Bound<'_, PyAny>) -> PyResult<String> {
    let keyword = as_keyword(value)?;
    Ok(kwnorm_core::normalizer::normalize_opt(keyword.as_deref()))
}

/// Annotate a batch of keywords.
///
/// Args:
///     values: sequence of raw keywords (any objects)
///     parallel: normalize on a thread pool
///
/// Returns:
///     list of (normalized, duplicate_group) tuples in input order;
///     duplicate_group is "" for keywords no other row shares
#[pyfunction]
#[pyo3(signature = (values, parallel = false))]
fn annotate<'py>(values: Vec<Bound<'py, PyAny>>, parallel: bool) -> PyResult<Vec<(String, String)>> {
    let keywords = values
        .iter()
        .map(as_keyword)
        .collect::<PyResult<Vec<Option<String>>>>()?;
    let borrowed: Vec<Option<&str>> = keywords.iter().map(|k| k.as_deref()).collect();

    let annotations = if parallel {
        kwnorm_core::annotate_parallel(&borrowed)
    } else {
        kwnorm_core::annotate(borrowed)
    };

    Ok(annotations
        .into_iter()
        .map(|a| (a.normalized, a.duplicate_group))
        .collect())
}

/// kwnorm Python module — keyword canonicalization and near-duplicate grouping
#[pymodule]
fn kwnorm(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(normalize_keyword, m)?)?;
    m.add_function(wrap_pyfunction!(annotate, m)?)?;
    Ok(())
}
