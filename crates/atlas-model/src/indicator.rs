//! Indicator definitions: which wide export feeds which value column.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::columns::{
    COUNTRY_CODE, COUNTRY_NAME, GDP, GDP_PER_CAPITA, INCOME_GROUP, INDICATOR_CODE, INDICATOR_NAME,
    POPULATION, REGION, YEAR,
};
use crate::error::{ModelError, Result};

/// One wide indicator export and the value column it becomes after reshaping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorSpec {
    /// Source file, relative to the data directory unless absolute.
    pub file: PathBuf,
    /// Name of the value column in the long table (e.g. `GDP`).
    pub column: String,
}

impl IndicatorSpec {
    pub fn new(file: impl Into<PathBuf>, column: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            column: column.into(),
        }
    }
}

/// GDP, GDP per capita and population, in merge order.
pub fn default_indicators() -> Vec<IndicatorSpec> {
    vec![
        IndicatorSpec::new("GDP.csv", GDP),
        IndicatorSpec::new("GDP_per_capita.csv", GDP_PER_CAPITA),
        IndicatorSpec::new("Population.csv", POPULATION),
    ]
}

/// Check that value columns are unique and do not shadow key/metadata columns.
pub fn validate_indicators(specs: &[IndicatorSpec]) -> Result<()> {
    if specs.is_empty() {
        return Err(ModelError::NoIndicators);
    }
    let reserved = [
        COUNTRY_NAME,
        COUNTRY_CODE,
        INDICATOR_NAME,
        INDICATOR_CODE,
        YEAR,
        REGION,
        INCOME_GROUP,
    ];
    let mut seen = BTreeSet::new();
    for spec in specs {
        if reserved.contains(&spec.column.as_str()) {
            return Err(ModelError::ReservedIndicatorColumn {
                column: spec.column.clone(),
            });
        }
        if !seen.insert(spec.column.as_str()) {
            return Err(ModelError::DuplicateIndicator {
                column: spec.column.clone(),
            });
        }
    }
    Ok(())
}

/// Value column names in declaration order.
pub fn indicator_columns(specs: &[IndicatorSpec]) -> Vec<String> {
    specs.iter().map(|spec| spec.column.clone()).collect()
}
