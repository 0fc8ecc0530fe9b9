//! CSV reading with an optional preamble to skip.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use crate::error::{IngestError, Result};

use super::header::dedupe_headers;

/// A CSV file as read from disk: unique headers plus padded string rows.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Position of a column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Position of a column the caller cannot do without.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| IngestError::MissingColumn {
                column: name.to_string(),
                path: self.path.clone(),
            })
    }

    /// Converts the table into a frame of nullable string columns.
    ///
    /// Empty cells become nulls; everything else is kept verbatim so later
    /// stages decide how to parse or trim.
    pub fn into_frame(self) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.headers.len());
        for (idx, header) in self.headers.iter().enumerate() {
            let values: Vec<Option<String>> = self
                .rows
                .iter()
                .map(|row| {
                    let value = row.get(idx).map(String::as_str).unwrap_or("");
                    if value.trim().is_empty() {
                        None
                    } else {
                        Some(value.to_string())
                    }
                })
                .collect();
            columns.push(Series::new(header.as_str().into(), values).into());
        }
        Ok(DataFrame::new(columns)?)
    }
}

/// Reads a CSV file, skipping `skip_lines` raw lines before the header row.
///
/// World-Bank style exports carry four lines of descriptive text ahead of
/// the header. Blank rows are dropped, short rows are padded with empty
/// cells, and rows longer than the header are rejected.
pub fn read_raw_table(path: &Path, skip_lines: usize) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    let body = skip_leading_lines(text, skip_lines);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());
    let mut records = reader.records();

    let header_record = loop {
        match records.next() {
            Some(record) => {
                let record = record.map_err(|e| csv_error(path, e))?;
                if record.iter().any(|value| !value.trim().is_empty()) {
                    break record;
                }
            }
            None => {
                return Err(IngestError::EmptyCsv {
                    path: path.to_path_buf(),
                });
            }
        }
    };
    let raw_headers: Vec<String> = header_record.iter().map(str::to_string).collect();
    let headers = dedupe_headers(&raw_headers);

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| csv_error(path, e))?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0) + skip_lines as u64;
            return Err(IngestError::RaggedRow {
                path: path.to_path_buf(),
                line,
                expected: headers.len(),
                found: record.len(),
            });
        }
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    tracing::debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        skipped_lines = skip_lines,
        "read csv"
    );

    Ok(RawTable {
        path: path.to_path_buf(),
        headers,
        rows,
    })
}

/// Reads a CSV file straight into a frame of nullable string columns.
pub fn read_csv_frame(path: &Path, skip_lines: usize) -> Result<DataFrame> {
    read_raw_table(path, skip_lines)?.into_frame()
}

fn skip_leading_lines(text: &str, count: usize) -> &str {
    let mut rest = text;
    for _ in 0..count {
        match rest.find('\n') {
            Some(pos) => rest = &rest[pos + 1..],
            None => return "",
        }
    }
    rest
}

fn csv_error(path: &Path, source: csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    }
}
