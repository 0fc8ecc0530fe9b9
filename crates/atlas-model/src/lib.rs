//! Shared vocabulary for the pricing-atlas pipeline.
//!
//! - **columns**: header names of source exports and produced files
//! - **alignment**: exact-match country-name tables and the substring fallback
//! - **indicator**: which wide export feeds which value column

pub mod alignment;
pub mod columns;
pub mod error;
pub mod indicator;

pub use alignment::{
    AlignmentTable, CONJUNCTION_RULE, SubstringRule, builtin_tables, cross_dataset_names,
    economic_names, pricing_names,
};
pub use error::{ModelError, Result};
pub use indicator::{IndicatorSpec, default_indicators, indicator_columns, validate_indicators};
