//! CSV reading utilities.

mod header;
mod reader;

pub use header::{dedupe_headers, is_export_artifact, normalize_header};
pub use reader::{RawTable, read_csv_frame, read_raw_table};
