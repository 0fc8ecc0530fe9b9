//! CSV serialization of frames.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use polars::prelude::{AnyValue, DataFrame};

use crate::common::{cell_to_string, ensure_parent_dir};

/// Write `df` to `path`, creating parent directories as needed.
pub fn write_csv(df: &DataFrame, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_frame(df, BufWriter::new(file)).with_context(|| format!("write {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "wrote csv"
    );
    Ok(())
}

/// Render `df` as CSV text.
pub fn frame_to_csv_string(df: &DataFrame) -> Result<String> {
    let mut buffer = Vec::new();
    write_frame(df, &mut buffer)?;
    String::from_utf8(buffer).context("CSV output is not valid UTF-8")
}

fn write_frame<W: Write>(df: &DataFrame, sink: W) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(sink);

    let header: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    writer.write_record(&header)?;

    let columns = df.get_columns();
    let mut record: Vec<String> = Vec::with_capacity(columns.len());
    for idx in 0..df.height() {
        record.clear();
        for column in columns {
            let value = column.get(idx).unwrap_or(AnyValue::Null);
            record.push(cell_to_string(value));
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
