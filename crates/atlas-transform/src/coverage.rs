//! How well two datasets line up on their country-name keys.

use std::collections::BTreeSet;

use polars::prelude::DataFrame;

use crate::error::Result;
use crate::frame::text_values;

/// Distinct names found on both sides and on only one side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    pub matched: Vec<String>,
    pub only_left: Vec<String>,
    pub only_right: Vec<String>,
}

impl CoverageReport {
    /// True when every name on each side has a counterpart.
    pub fn is_complete(&self) -> bool {
        self.only_left.is_empty() && self.only_right.is_empty()
    }
}

/// Compares the distinct non-null values of two key columns.
///
/// Lists are sorted. Comparison is on exact strings, the same way a join
/// on these columns would behave.
pub fn join_coverage(
    left: &DataFrame,
    left_column: &str,
    right: &DataFrame,
    right_column: &str,
) -> Result<CoverageReport> {
    let left_names = distinct(left, left_column)?;
    let right_names = distinct(right, right_column)?;

    let report = CoverageReport {
        matched: left_names.intersection(&right_names).cloned().collect(),
        only_left: left_names.difference(&right_names).cloned().collect(),
        only_right: right_names.difference(&left_names).cloned().collect(),
    };

    tracing::info!(
        matched = report.matched.len(),
        only_left = report.only_left.len(),
        only_right = report.only_right.len(),
        "join coverage"
    );
    for name in &report.only_right {
        tracing::warn!(name = %name, column = right_column, "no counterpart for name");
    }
    if !report.only_left.is_empty() {
        tracing::debug!(names = ?report.only_left, column = left_column, "names without counterpart");
    }
    Ok(report)
}

fn distinct(df: &DataFrame, column: &str) -> Result<BTreeSet<String>> {
    Ok(text_values(df, column)?.into_iter().flatten().collect())
}
