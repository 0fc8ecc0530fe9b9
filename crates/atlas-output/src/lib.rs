//! Output writing for the pricing-atlas pipeline.
//!
//! Every stage persists a frame as a plain CSV: comma separated, one header
//! row, no index column, nulls written as empty fields.

mod common;
mod csv_out;

pub use common::{cell_to_string, ensure_parent_dir, format_float};
pub use csv_out::{frame_to_csv_string, write_csv};
