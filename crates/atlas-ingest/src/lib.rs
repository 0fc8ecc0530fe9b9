//! Source loading for the pricing-atlas pipeline.
//!
//! # Features
//!
//! - **CSV Loading**: read a CSV with an optional preamble, de-duplicated
//!   headers and padded rows
//! - **Indicator exports**: wide World-Bank style tables (years as columns)
//! - **Country metadata**: code, region and income group, unique per code
//! - **Pricing export**: the per-country plan price table
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use atlas_ingest::{INDICATOR_PREAMBLE_LINES, load_indicator_export};
//!
//! let gdp = load_indicator_export(Path::new("data/GDP.csv"), INDICATOR_PREAMBLE_LINES)?;
//! ```

mod csv_table;
mod error;
mod sources;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv_table::{
    RawTable, dedupe_headers, is_export_artifact, normalize_header, read_csv_frame,
    read_raw_table,
};

// === Source Loaders ===
pub use sources::{
    INDICATOR_PREAMBLE_LINES, load_country_metadata, load_indicator_export, load_pricing_export,
};
