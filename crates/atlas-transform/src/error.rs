//! Error types for frame transformations.

use atlas_model::ModelError;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("required column '{column}' not found")]
    MissingColumn { column: String },

    #[error("column '{column}' row {row}: '{value}' is not a number")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },

    #[error("year column '{label}' is out of range")]
    InvalidYear { label: String },

    #[error("column '{column}' has type {dtype}, expected text or numbers")]
    UnexpectedType { column: String, dtype: String },

    #[error("'{column}' is empty on row {row} of the {table} table")]
    MissingKey {
        table: String,
        column: String,
        row: usize,
    },

    #[error("duplicate key ({code}, {year}) in the {table} table")]
    DuplicateKey {
        table: String,
        code: String,
        year: i32,
    },

    #[error("duplicate country code '{code}' in metadata")]
    DuplicateMetadata { code: String },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
