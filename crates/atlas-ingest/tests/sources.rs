//! Tests for the source loaders.

use std::fs;

use atlas_ingest::{
    INDICATOR_PREAMBLE_LINES, IngestError, load_country_metadata, load_indicator_export,
    load_pricing_export,
};
use tempfile::TempDir;

const PREAMBLE: &str = "\"Data Source\",\"World Development Indicators\",\n\n\"Last Updated Date\",\"2025-01-28\",\n\n";

#[test]
fn indicator_export_keeps_all_columns_as_strings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("GDP.csv");
    fs::write(
        &path,
        format!(
            "{PREAMBLE}\"Country Name\",\"Country Code\",\"Indicator Name\",\"Indicator Code\",\"2020\",\"2021\",\n\
             \"Turkiye\",\"TUR\",\"GDP (current US$)\",\"NY.GDP.MKTP.CD\",\"100\",\"110\",\n"
        ),
    )
    .unwrap();

    let df = load_indicator_export(&path, INDICATOR_PREAMBLE_LINES).unwrap();

    assert_eq!(df.height(), 1);
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "Country Name",
            "Country Code",
            "Indicator Name",
            "Indicator Code",
            "2020",
            "2021",
            "Unnamed: 6"
        ]
    );
}

#[test]
fn indicator_export_requires_identifying_columns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("GDP.csv");
    fs::write(
        &path,
        format!("{PREAMBLE}\"Country Name\",\"Country Code\",\"2020\"\n\"Aruba\",\"ABW\",\"1\"\n"),
    )
    .unwrap();

    let result = load_indicator_export(&path, INDICATOR_PREAMBLE_LINES);
    match result {
        Err(IngestError::MissingColumn { column, .. }) => assert_eq!(column, "Indicator Name"),
        other => panic!("expected missing column, got {other:?}"),
    }
}

#[test]
fn metadata_keeps_null_regions_for_aggregates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Country_Metadata.csv");
    fs::write(
        &path,
        "\"Country Code\",\"Region\",\"IncomeGroup\",\"SpecialNotes\",\"TableName\",\n\
         \"ABW\",\"Latin America & Caribbean\",\"High income\",\"\",\"Aruba\",\n\
         \"WLD\",\"\",\"\",\"World aggregate\",\"World\",\n",
    )
    .unwrap();

    let df = load_country_metadata(&path).unwrap();

    assert_eq!(df.width(), 3);
    assert_eq!(df.height(), 2);
    let region = df.column("Region").unwrap().str().unwrap();
    assert_eq!(region.get(0), Some("Latin America & Caribbean"));
    assert_eq!(region.get(1), None);
}

#[test]
fn metadata_rejects_duplicate_codes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Country_Metadata.csv");
    fs::write(
        &path,
        "Country Code,Region,IncomeGroup\nABW,A,B\nABW,A,B\n",
    )
    .unwrap();

    let result = load_country_metadata(&path);
    assert!(matches!(result, Err(IngestError::DuplicateKey { .. })));
}

#[test]
fn pricing_export_dedupes_repeated_country_column() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pricing.csv");
    fs::write(
        &path,
        "Country,Basic,BasicUSD,Country,Translation\nKenya,KES 300,2.32,Kenya,Kenia\n",
    )
    .unwrap();

    let table = load_pricing_export(&path).unwrap();

    assert_eq!(
        table.headers,
        vec!["Country", "Basic", "BasicUSD", "Country.1", "Translation"]
    );
    assert_eq!(table.rows.len(), 1);
}

#[test]
fn pricing_export_requires_country() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pricing.csv");
    fs::write(&path, "Region,BasicUSD\nEurope,9.99\n").unwrap();

    let result = load_pricing_export(&path);
    assert!(matches!(result, Err(IngestError::MissingColumn { .. })));
}
