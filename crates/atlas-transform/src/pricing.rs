//! Cleaning of the per-country plan price export.

use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use atlas_ingest::RawTable;
use atlas_model::AlignmentTable;
use atlas_model::columns::pricing::{
    COUNTRY, DROPPED, EXTRA_MEMBER_SLOTS_DETAILS, NOT_AVAILABLE, RENAMES, UPDATED_ON_PREFIX,
    USD_PRICES,
};

use crate::error::{Result, TransformError};
use crate::frame::parse_cell;

/// The cleaned table and what cleaning did to it.
#[derive(Debug, Clone)]
pub struct PricingOutcome {
    pub frame: DataFrame,
    /// Date carried in the `Updated On YYYY-MM-DD` header, when present.
    pub snapshot_date: Option<NaiveDate>,
    pub dropped_columns: Vec<String>,
    /// USD price cells that were empty and became 0.
    pub filled_prices: usize,
    /// Extra-slot cells that were empty and became "Not Available".
    pub filled_details: usize,
    pub renamed_countries: usize,
}

enum ColumnRole {
    Country,
    UsdPrice,
    SlotDetails,
    Other,
}

/// Cleans a raw pricing export.
///
/// Drops unused columns, renames the price columns, fills missing USD
/// prices with 0 and missing extra-slot descriptions with "Not Available",
/// trims country names and applies `names`. Remaining columns keep their
/// source order.
pub fn clean_pricing(raw: &RawTable, names: &AlignmentTable) -> Result<PricingOutcome> {
    let mut dropped_columns = Vec::new();
    let mut snapshot_date = None;
    let mut kept: Vec<(usize, String)> = Vec::new();
    for (idx, header) in raw.headers.iter().enumerate() {
        if DROPPED.contains(&header.as_str()) {
            dropped_columns.push(header.clone());
            continue;
        }
        if let Some(rest) = header.strip_prefix(UPDATED_ON_PREFIX) {
            snapshot_date = parse_snapshot_date(rest);
            if snapshot_date.is_none() {
                tracing::warn!(header = %header, "could not read snapshot date");
            }
            dropped_columns.push(header.clone());
            continue;
        }
        kept.push((idx, renamed(header)));
    }

    for required in std::iter::once(COUNTRY)
        .chain(USD_PRICES)
        .chain(std::iter::once(EXTRA_MEMBER_SLOTS_DETAILS))
    {
        if !kept.iter().any(|(_, name)| name == required) {
            return Err(TransformError::MissingColumn {
                column: required.to_string(),
            });
        }
    }

    let mut filled_prices = 0usize;
    let mut filled_details = 0usize;
    let mut renamed_countries = 0usize;
    let mut columns: Vec<Column> = Vec::with_capacity(kept.len());
    for (idx, name) in &kept {
        let cells = raw.rows.iter().map(|row| row[*idx].as_str());
        let series = match role(name) {
            ColumnRole::UsdPrice => {
                let mut values = Vec::with_capacity(raw.rows.len());
                for (row, cell) in cells.enumerate() {
                    let value = match parse_cell(name, row, Some(cell))? {
                        Some(value) => value,
                        None => {
                            filled_prices += 1;
                            0.0
                        }
                    };
                    values.push(value);
                }
                Series::new(name.as_str().into(), values)
            }
            ColumnRole::SlotDetails => {
                let values: Vec<String> = cells
                    .map(|cell| {
                        if cell.trim().is_empty() {
                            filled_details += 1;
                            NOT_AVAILABLE.to_string()
                        } else {
                            cell.to_string()
                        }
                    })
                    .collect();
                Series::new(name.as_str().into(), values)
            }
            ColumnRole::Country => {
                let values: Vec<Option<String>> = cells
                    .map(|cell| {
                        let trimmed = cell.trim();
                        if trimmed.is_empty() {
                            return None;
                        }
                        let aligned = names.apply(trimmed);
                        if aligned != trimmed {
                            renamed_countries += 1;
                        }
                        Some(aligned.to_string())
                    })
                    .collect();
                Series::new(name.as_str().into(), values)
            }
            ColumnRole::Other => {
                let values: Vec<Option<&str>> = cells
                    .map(|cell| (!cell.trim().is_empty()).then_some(cell))
                    .collect();
                Series::new(name.as_str().into(), values)
            }
        };
        columns.push(series.into());
    }
    let frame = DataFrame::new(columns)?;

    tracing::debug!(
        countries = frame.height(),
        dropped = dropped_columns.len(),
        filled_prices,
        filled_details,
        renamed_countries,
        "cleaned pricing table"
    );
    Ok(PricingOutcome {
        frame,
        snapshot_date,
        dropped_columns,
        filled_prices,
        filled_details,
        renamed_countries,
    })
}

/// Reads `2025-12-02` out of the tail of an `Updated On 2025-12-02` header.
pub fn parse_snapshot_date(header_tail: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(header_tail.trim(), "%Y-%m-%d").ok()
}

fn renamed(header: &str) -> String {
    RENAMES
        .iter()
        .find(|(from, _)| *from == header)
        .map(|(_, to)| (*to).to_string())
        .unwrap_or_else(|| header.to_string())
}

fn role(name: &str) -> ColumnRole {
    if name == COUNTRY {
        ColumnRole::Country
    } else if USD_PRICES.contains(&name) {
        ColumnRole::UsdPrice
    } else if name == EXTRA_MEMBER_SLOTS_DETAILS {
        ColumnRole::SlotDetails
    } else {
        ColumnRole::Other
    }
}
