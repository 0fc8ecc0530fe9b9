//! Rewriting a dataset's country names into another dataset's convention.

use polars::prelude::{DataFrame, NamedFrom, Series};

use atlas_model::{AlignmentTable, CONJUNCTION_RULE, SubstringRule, cross_dataset_names};

use crate::error::Result;
use crate::frame::text_values;

/// How a single name was rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRewrite {
    /// The exact table mapped it.
    Exact,
    /// The substring fallback changed it.
    Fallback,
    Unchanged,
}

/// Per-column rewrite counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignStats {
    pub rows: usize,
    pub exact: usize,
    pub fallback: usize,
    pub unchanged: usize,
}

/// Exact-match table followed by an optional substring fallback.
///
/// A name the table rewrites is final. The fallback only sees names the
/// table does not know and that are not already spelled as one of its
/// targets, so aligning an aligned column is a no-op.
#[derive(Debug, Clone)]
pub struct CrossDatasetAligner {
    table: AlignmentTable,
    fallback: Option<SubstringRule>,
}

impl CrossDatasetAligner {
    pub fn new(table: AlignmentTable, fallback: Option<SubstringRule>) -> Self {
        Self { table, fallback }
    }

    /// The compiled-in cross-dataset table with the `" and "` fallback.
    pub fn builtin() -> Self {
        Self::new(cross_dataset_names(), Some(CONJUNCTION_RULE))
    }

    pub fn table(&self) -> &AlignmentTable {
        &self.table
    }

    pub fn align_name(&self, name: &str) -> (String, NameRewrite) {
        if let Some(target) = self.table.get(name) {
            return (target.to_string(), NameRewrite::Exact);
        }
        if self.table.is_target(name) {
            return (name.to_string(), NameRewrite::Unchanged);
        }
        match self.fallback {
            Some(rule) if rule.matches(name) => (rule.apply(name), NameRewrite::Fallback),
            _ => (name.to_string(), NameRewrite::Unchanged),
        }
    }

    /// Rewrites `column` of `df` in place. Null names stay null.
    pub fn align_column(&self, df: &mut DataFrame, column: &str) -> Result<AlignStats> {
        let names = text_values(df, column)?;
        let mut stats = AlignStats {
            rows: names.len(),
            ..AlignStats::default()
        };

        let aligned: Vec<Option<String>> = names
            .into_iter()
            .map(|name| {
                let name = name?;
                let (aligned, rewrite) = self.align_name(&name);
                match rewrite {
                    NameRewrite::Exact => stats.exact += 1,
                    NameRewrite::Fallback => stats.fallback += 1,
                    NameRewrite::Unchanged => stats.unchanged += 1,
                }
                Some(aligned)
            })
            .collect();
        df.with_column(Series::new(column.into(), aligned))?;

        tracing::debug!(
            table = self.table.name(),
            column,
            exact = stats.exact,
            fallback = stats.fallback,
            "aligned country names"
        );
        Ok(stats)
    }
}

impl Default for CrossDatasetAligner {
    fn default() -> Self {
        Self::builtin()
    }
}
