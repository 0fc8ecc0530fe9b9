//! Header normalization and de-duplication.

use std::collections::BTreeMap;

use atlas_model::columns::UNNAMED_PREFIX;

/// Trims whitespace and a stray byte-order mark from a header value.
pub fn normalize_header(value: &str) -> String {
    value.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Normalizes a header row so every column has a unique, non-empty name.
///
/// Blank headers become `Unnamed: <index>`. A label seen before gets a
/// `.1`, `.2`, ... suffix, so a second `Country` column is `Country.1`.
pub fn dedupe_headers(raw: &[String]) -> Vec<String> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    let mut headers = Vec::with_capacity(raw.len());
    for (idx, value) in raw.iter().enumerate() {
        let mut name = normalize_header(value);
        if name.is_empty() {
            name = format!("{UNNAMED_PREFIX}: {idx}");
        }
        let count = seen.entry(name.clone()).or_insert(0);
        let unique = if *count == 0 {
            name.clone()
        } else {
            format!("{name}.{count}")
        };
        *count += 1;
        headers.push(unique);
    }
    headers
}

/// Whether a column is a formatting leftover of the exporter (headerless
/// trailing column) rather than data.
pub fn is_export_artifact(header: &str) -> bool {
    let trimmed = header.trim();
    trimmed.is_empty() || trimmed.starts_with(UNNAMED_PREFIX)
}
