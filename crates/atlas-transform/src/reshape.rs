//! Wide-to-long reshaping of indicator exports.
//!
//! An export carries one row per country and one column per year. The
//! reshaper emits one row per (country, year column) with a single value
//! column, in column-major order: every country for the first year, then
//! every country for the next.

use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use atlas_ingest::is_export_artifact;
use atlas_model::columns::{
    COUNTRY_CODE, COUNTRY_NAME, INDICATOR_CODE, INDICATOR_ID_COLUMNS, INDICATOR_NAME, YEAR,
};

use crate::error::{Result, TransformError};
use crate::frame::{column_names, numeric_values, text_values};

/// How the columns of a wide export were classified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WideLayout {
    /// Year columns in source order, with the parsed year.
    pub years: Vec<(String, i32)>,
    /// Exporter leftovers that were dropped.
    pub artifacts: Vec<String>,
    /// Non-numeric, non-identifying columns left out of the melt.
    pub ignored: Vec<String>,
}

/// Whether a header is a year label: non-empty and purely ASCII digits.
pub fn is_year_label(label: &str) -> bool {
    !label.is_empty() && label.bytes().all(|b| b.is_ascii_digit())
}

/// Sorts the columns of a wide export into year, artifact and ignored sets.
pub fn classify_columns(headers: &[String]) -> Result<WideLayout> {
    let mut layout = WideLayout::default();
    for header in headers {
        if INDICATOR_ID_COLUMNS.contains(&header.as_str()) {
            continue;
        }
        if is_export_artifact(header) {
            layout.artifacts.push(header.clone());
        } else if is_year_label(header) {
            let year = header
                .parse::<i32>()
                .map_err(|_| TransformError::InvalidYear {
                    label: header.clone(),
                })?;
            layout.years.push((header.clone(), year));
        } else {
            layout.ignored.push(header.clone());
        }
    }
    Ok(layout)
}

/// Reshapes a wide indicator export into long format.
///
/// The result has the four identifying columns, `Year` (Int32) and one
/// Float64 column named `value_column`. Its height is
/// `countries × year columns`.
pub fn reshape_indicator(wide: &DataFrame, value_column: &str) -> Result<DataFrame> {
    let layout = classify_columns(&column_names(wide))?;
    if !layout.artifacts.is_empty() {
        tracing::debug!(columns = ?layout.artifacts, "dropped export artifact columns");
    }
    if !layout.ignored.is_empty() {
        tracing::debug!(columns = ?layout.ignored, "left non-year columns out of reshape");
    }

    let names = text_values(wide, COUNTRY_NAME)?;
    let codes = text_values(wide, COUNTRY_CODE)?;
    let indicator_names = text_values(wide, INDICATOR_NAME)?;
    let indicator_codes = text_values(wide, INDICATOR_CODE)?;

    let height = wide.height() * layout.years.len();
    let mut out_names: Vec<Option<String>> = Vec::with_capacity(height);
    let mut out_codes: Vec<Option<String>> = Vec::with_capacity(height);
    let mut out_indicator_names: Vec<Option<String>> = Vec::with_capacity(height);
    let mut out_indicator_codes: Vec<Option<String>> = Vec::with_capacity(height);
    let mut out_years: Vec<i32> = Vec::with_capacity(height);
    let mut out_values: Vec<Option<f64>> = Vec::with_capacity(height);

    for (label, year) in &layout.years {
        let values = numeric_values(wide, label)?;
        for (row, value) in values.into_iter().enumerate() {
            out_names.push(names[row].clone());
            out_codes.push(codes[row].clone());
            out_indicator_names.push(indicator_names[row].clone());
            out_indicator_codes.push(indicator_codes[row].clone());
            out_years.push(*year);
            out_values.push(value);
        }
    }

    let columns: Vec<Column> = vec![
        Series::new(COUNTRY_NAME.into(), out_names).into(),
        Series::new(COUNTRY_CODE.into(), out_codes).into(),
        Series::new(INDICATOR_NAME.into(), out_indicator_names).into(),
        Series::new(INDICATOR_CODE.into(), out_indicator_codes).into(),
        Series::new(YEAR.into(), out_years).into(),
        Series::new(value_column.into(), out_values).into(),
    ];
    let long = DataFrame::new(columns)?;

    tracing::debug!(
        indicator = value_column,
        countries = wide.height(),
        years = layout.years.len(),
        records = long.height(),
        "reshaped indicator"
    );
    Ok(long)
}
