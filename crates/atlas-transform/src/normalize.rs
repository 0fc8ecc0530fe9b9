//! Filtering and normalization of the merged country-year table.

use polars::prelude::{DataFrame, Expr, IntoLazy, NamedFrom, Series, SortMultipleOptions, col, lit};

use atlas_model::AlignmentTable;
use atlas_model::columns::{
    COUNTRY_CODE, COUNTRY_NAME, GDP, GDP_PER_CAPITA, INCOME_GROUP, POPULATION, REGION, YEAR,
};

use crate::error::Result;
use crate::frame::{require_column, text_values};

/// First year kept by default.
pub const DEFAULT_CUTOFF_YEAR: i32 = 2010;

#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Rows with an earlier year are dropped.
    pub cutoff_year: i32,
    /// Indicator columns, in output order. A row is kept only if at least
    /// one of them is non-null.
    pub indicator_columns: Vec<String>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            cutoff_year: DEFAULT_CUTOFF_YEAR,
            indicator_columns: vec![
                GDP.to_string(),
                GDP_PER_CAPITA.to_string(),
                POPULATION.to_string(),
            ],
        }
    }
}

/// Row counts removed or rewritten by each step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub input_rows: usize,
    pub before_cutoff: usize,
    pub without_region: usize,
    pub renamed: usize,
    pub commas_removed: usize,
    pub empty_indicators: usize,
    pub output_rows: usize,
}

/// Removes every comma from a country name.
pub fn strip_commas(name: &str) -> String {
    name.replace(',', "")
}

/// Normalizes the merged table. The steps run in a fixed order:
///
/// 1. keep `Year >= cutoff_year`
/// 2. drop rows with a null `Region` (aggregates such as "World")
/// 3. rewrite `Country Name` through `names`
/// 4. remove commas from `Country Name`
/// 5. select the output columns and sort by (`Country Name`, `Year`)
/// 6. drop rows whose indicators are all null
pub fn normalize_records(
    merged: DataFrame,
    names: &AlignmentTable,
    options: &NormalizeOptions,
) -> Result<(DataFrame, NormalizeStats)> {
    let mut output_columns = vec![
        COUNTRY_NAME.to_string(),
        COUNTRY_CODE.to_string(),
        REGION.to_string(),
        INCOME_GROUP.to_string(),
        YEAR.to_string(),
    ];
    output_columns.extend(options.indicator_columns.iter().cloned());
    for column in &output_columns {
        require_column(&merged, column)?;
    }

    let mut stats = NormalizeStats {
        input_rows: merged.height(),
        ..NormalizeStats::default()
    };

    let recent = merged
        .lazy()
        .filter(col(YEAR).gt_eq(lit(options.cutoff_year)))
        .collect()?;
    stats.before_cutoff = stats.input_rows - recent.height();

    let mut countries = recent
        .lazy()
        .filter(col(REGION).is_not_null())
        .collect()?;
    stats.without_region = stats.input_rows - stats.before_cutoff - countries.height();

    let rewritten: Vec<Option<String>> = text_values(&countries, COUNTRY_NAME)?
        .into_iter()
        .map(|name| {
            name.map(|name| {
                let aligned = names.apply(&name);
                if aligned != name {
                    stats.renamed += 1;
                }
                let stripped = strip_commas(aligned);
                if stripped.len() != aligned.len() {
                    stats.commas_removed += 1;
                }
                stripped
            })
        })
        .collect();
    countries.with_column(Series::new(COUNTRY_NAME.into(), rewritten))?;

    let selection: Vec<Expr> = output_columns
        .iter()
        .map(|column| col(column.as_str()))
        .collect();
    let sorted = countries
        .lazy()
        .select(selection)
        .sort_by_exprs(
            [col(COUNTRY_NAME), col(YEAR)],
            SortMultipleOptions::default()
                .with_maintain_order(true)
                .with_nulls_last(true),
        )
        .collect()?;
    let sorted_rows = sorted.height();

    let frame = match any_indicator_present(&options.indicator_columns) {
        Some(predicate) => sorted.lazy().filter(predicate).collect()?,
        None => sorted,
    };
    stats.empty_indicators = sorted_rows - frame.height();
    stats.output_rows = frame.height();

    tracing::debug!(
        cutoff_year = options.cutoff_year,
        before_cutoff = stats.before_cutoff,
        without_region = stats.without_region,
        renamed = stats.renamed,
        empty_indicators = stats.empty_indicators,
        rows = stats.output_rows,
        "normalized records"
    );
    Ok((frame, stats))
}

fn any_indicator_present(columns: &[String]) -> Option<Expr> {
    columns
        .iter()
        .map(|column| col(column.as_str()).is_not_null())
        .reduce(|acc, present| acc.or(present))
}
