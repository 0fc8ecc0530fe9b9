//! Joining reshaped indicators and attaching country metadata.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use atlas_model::columns::{COUNTRY_CODE, COUNTRY_NAME, INCOME_GROUP, REGION, YEAR};

use crate::error::{Result, TransformError};
use crate::frame::{numeric_values, text_values, year_values};

/// A reshaped indicator table and the name of its value column.
#[derive(Debug, Clone)]
pub struct IndicatorFrame {
    pub column: String,
    pub data: DataFrame,
}

impl IndicatorFrame {
    pub fn new(column: impl Into<String>, data: DataFrame) -> Self {
        Self {
            column: column.into(),
            data,
        }
    }
}

#[derive(Debug, Default)]
struct MergedRow {
    name: Option<String>,
    values: Vec<Option<f64>>,
}

/// Outer-joins indicator tables on (country code, year).
///
/// Every key present in any input is in the output. An indicator that has
/// no row for a key is null there. The country name comes from the first
/// input that carries the key. Output columns are `Country Name`,
/// `Country Code`, `Year` and one column per indicator in input order; rows
/// are ordered by (code, year).
pub fn merge_indicators(frames: &[IndicatorFrame]) -> Result<DataFrame> {
    let width = frames.len();
    let mut merged: BTreeMap<(String, i32), MergedRow> = BTreeMap::new();

    for (idx, frame) in frames.iter().enumerate() {
        let names = text_values(&frame.data, COUNTRY_NAME)?;
        let codes = text_values(&frame.data, COUNTRY_CODE)?;
        let years = year_values(&frame.data, YEAR)?;
        let values = numeric_values(&frame.data, &frame.column)?;

        let mut seen: BTreeSet<(String, i32)> = BTreeSet::new();
        for row in 0..frame.data.height() {
            let Some(code) = codes[row].clone() else {
                return Err(missing_key(&frame.column, COUNTRY_CODE, row));
            };
            let Some(year) = years[row] else {
                return Err(missing_key(&frame.column, YEAR, row));
            };
            let key = (code, year);
            if !seen.insert(key.clone()) {
                return Err(TransformError::DuplicateKey {
                    table: frame.column.clone(),
                    code: key.0,
                    year: key.1,
                });
            }
            let entry = merged.entry(key).or_insert_with(|| MergedRow {
                name: None,
                values: vec![None; width],
            });
            if entry.name.is_none() {
                entry.name = names[row].clone();
            }
            entry.values[idx] = values[row];
        }
    }

    let height = merged.len();
    let mut out_names: Vec<Option<String>> = Vec::with_capacity(height);
    let mut out_codes: Vec<String> = Vec::with_capacity(height);
    let mut out_years: Vec<i32> = Vec::with_capacity(height);
    let mut out_values: Vec<Vec<Option<f64>>> = vec![Vec::with_capacity(height); width];
    for ((code, year), row) in merged {
        out_names.push(row.name);
        out_codes.push(code);
        out_years.push(year);
        for (idx, value) in row.values.into_iter().enumerate() {
            out_values[idx].push(value);
        }
    }

    let mut columns: Vec<Column> = Vec::with_capacity(width + 3);
    columns.push(Series::new(COUNTRY_NAME.into(), out_names).into());
    columns.push(Series::new(COUNTRY_CODE.into(), out_codes).into());
    columns.push(Series::new(YEAR.into(), out_years).into());
    for (frame, values) in frames.iter().zip(out_values) {
        columns.push(Series::new(frame.column.as_str().into(), values).into());
    }
    let df = DataFrame::new(columns)?;

    tracing::debug!(
        indicators = width,
        keys = df.height(),
        "merged indicators"
    );
    Ok(df)
}

/// Left-joins region and income group onto `merged` by country code.
///
/// Metadata has no year dimension; every year of a country gets the same
/// region. Codes without metadata get null region and income group.
pub fn attach_metadata(mut merged: DataFrame, metadata: &DataFrame) -> Result<DataFrame> {
    let meta_codes = text_values(metadata, COUNTRY_CODE)?;
    let meta_regions = text_values(metadata, REGION)?;
    let meta_incomes = text_values(metadata, INCOME_GROUP)?;

    let mut lookup: BTreeMap<String, (Option<String>, Option<String>)> = BTreeMap::new();
    for (row, code) in meta_codes.into_iter().enumerate() {
        let Some(code) = code else {
            continue;
        };
        let attributes = (meta_regions[row].clone(), meta_incomes[row].clone());
        if lookup.insert(code.clone(), attributes).is_some() {
            return Err(TransformError::DuplicateMetadata { code });
        }
    }

    let codes = text_values(&merged, COUNTRY_CODE)?;
    let mut regions: Vec<Option<String>> = Vec::with_capacity(codes.len());
    let mut incomes: Vec<Option<String>> = Vec::with_capacity(codes.len());
    let mut unmatched = 0usize;
    for code in &codes {
        match code.as_ref().and_then(|code| lookup.get(code)) {
            Some((region, income)) => {
                regions.push(region.clone());
                incomes.push(income.clone());
            }
            None => {
                unmatched += 1;
                regions.push(None);
                incomes.push(None);
            }
        }
    }

    merged.with_column(Series::new(REGION.into(), regions))?;
    merged.with_column(Series::new(INCOME_GROUP.into(), incomes))?;

    if unmatched > 0 {
        tracing::debug!(rows = unmatched, "rows without country metadata");
    }
    Ok(merged)
}

fn missing_key(table: &str, column: &str, row: usize) -> TransformError {
    TransformError::MissingKey {
        table: table.to_string(),
        column: column.to_string(),
        row,
    }
}
