//! Frame transformations for the pricing-atlas pipeline.
//!
//! - **reshape**: wide indicator exports to long (country, year, value) records
//! - **merge**: outer join of indicators on (code, year), metadata by code
//! - **normalize**: cutoff, aggregate removal, name cleanup and sorting
//! - **align**: exact-then-fallback rewriting of country names
//! - **pricing**: cleaning of the plan price export
//! - **coverage**: name overlap between two datasets

pub mod align;
pub mod coverage;
pub mod error;
pub mod frame;
pub mod merge;
pub mod normalize;
pub mod pricing;
pub mod reshape;

pub use align::{AlignStats, CrossDatasetAligner, NameRewrite};
pub use coverage::{CoverageReport, join_coverage};
pub use error::{Result, TransformError};
pub use merge::{IndicatorFrame, attach_metadata, merge_indicators};
pub use normalize::{
    DEFAULT_CUTOFF_YEAR, NormalizeOptions, NormalizeStats, normalize_records, strip_commas,
};
pub use pricing::{PricingOutcome, clean_pricing, parse_snapshot_date};
pub use reshape::{WideLayout, classify_columns, is_year_label, reshape_indicator};
