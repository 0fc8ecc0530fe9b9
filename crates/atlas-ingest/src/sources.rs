//! Loaders for the three kinds of source export.

use std::collections::BTreeSet;
use std::path::Path;

use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use atlas_model::columns::{COUNTRY_CODE, INCOME_GROUP, INDICATOR_ID_COLUMNS, REGION, pricing};

use crate::csv_table::{RawTable, read_raw_table};
use crate::error::{IngestError, Result};

/// Lines of descriptive text ahead of the header in World-Bank style exports.
pub const INDICATOR_PREAMBLE_LINES: usize = 4;

/// Loads a wide indicator export (years as columns).
///
/// Fails when any of the identifying columns is absent. Year and artifact
/// columns are left for the reshaper to classify.
pub fn load_indicator_export(path: &Path, skip_lines: usize) -> Result<DataFrame> {
    let table = read_raw_table(path, skip_lines)?;
    for column in INDICATOR_ID_COLUMNS {
        table.require_column(column)?;
    }
    tracing::debug!(
        path = %path.display(),
        countries = table.rows.len(),
        "loaded indicator export"
    );
    table.into_frame()
}

/// Loads country metadata, keeping code, region and income group.
///
/// Codes must be unique: metadata has no year dimension and is joined on
/// code alone. Blank region marks an aggregate (e.g. "World") and is kept
/// as null.
pub fn load_country_metadata(path: &Path) -> Result<DataFrame> {
    let table = read_raw_table(path, 0)?;
    let code_idx = table.require_column(COUNTRY_CODE)?;
    let region_idx = table.require_column(REGION)?;
    let income_idx = table.require_column(INCOME_GROUP)?;

    let mut seen = BTreeSet::new();
    let mut codes = Vec::with_capacity(table.rows.len());
    let mut regions = Vec::with_capacity(table.rows.len());
    let mut incomes = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let code = row[code_idx].trim();
        if code.is_empty() {
            continue;
        }
        if !seen.insert(code.to_string()) {
            return Err(IngestError::DuplicateKey {
                column: COUNTRY_CODE.to_string(),
                value: code.to_string(),
                path: table.path.clone(),
            });
        }
        codes.push(code.to_string());
        regions.push(non_blank(&row[region_idx]));
        incomes.push(non_blank(&row[income_idx]));
    }

    let aggregates = regions.iter().filter(|region| region.is_none()).count();
    tracing::debug!(
        path = %path.display(),
        codes = codes.len(),
        aggregates,
        "loaded country metadata"
    );

    let columns: Vec<Column> = vec![
        Series::new(COUNTRY_CODE.into(), codes).into(),
        Series::new(REGION.into(), regions).into(),
        Series::new(INCOME_GROUP.into(), incomes).into(),
    ];
    Ok(DataFrame::new(columns)?)
}

/// Loads the streaming-service pricing export.
///
/// Requires the country column; every other column is optional at this
/// point and checked by the cleaner.
pub fn load_pricing_export(path: &Path) -> Result<RawTable> {
    let table = read_raw_table(path, 0)?;
    table.require_column(pricing::COUNTRY)?;
    tracing::debug!(
        path = %path.display(),
        countries = table.rows.len(),
        columns = table.headers.len(),
        "loaded pricing export"
    );
    Ok(table)
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
