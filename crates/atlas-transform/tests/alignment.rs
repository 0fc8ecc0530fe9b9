//! Tests for cross-dataset alignment, pricing cleanup and join coverage.

use std::path::PathBuf;

use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use proptest::prelude::*;

use atlas_ingest::RawTable;
use atlas_model::pricing_names;
use atlas_transform::{
    CrossDatasetAligner, NameRewrite, TransformError, clean_pricing, join_coverage,
    reshape_indicator,
};

fn raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable {
        path: PathBuf::from("pricing.csv"),
        headers: headers.iter().map(|h| (*h).to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect(),
    }
}

const PRICING_HEADERS: &[&str] = &[
    "Country",
    "Standard with ads",
    "Extra member slots",
    "MobileUSD",
    "MobileCNY",
    "With_Ads_USD",
    "BasicUSD",
    "StandardUSD",
    "PremiumUSD",
    "Country",
    "Translation",
    "Updated On 2025-12-02",
];

fn pricing_table() -> RawTable {
    let mut table = raw(
        PRICING_HEADERS,
        &[
            &[
                " Türkiye ", "TRY 149", "", "", "", "3.49", "4.99", "5.99", "7.99", "Türkiye",
                "Turkey", "",
            ],
            &[
                "Kenya", "", "KES 300", "2.32", "16.5", "", "3.10", "5.43", "8.53", "Kenya",
                "Kenya", "",
            ],
        ],
    );
    table.headers = atlas_ingest::dedupe_headers(&table.headers);
    table
}

#[test]
fn pricing_fills_missing_prices_and_slot_details() {
    let outcome = clean_pricing(&pricing_table(), &pricing_names()).unwrap();
    let df = &outcome.frame;

    let mobile: Vec<Option<f64>> = df
        .column("Price_Mobile_USD")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(mobile, vec![Some(0.0), Some(2.32)]);

    let details: Vec<Option<&str>> = df
        .column("Extra_member_slots_Details")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(details, vec![Some("Not Available"), Some("KES 300")]);

    let countries: Vec<Option<&str>> = df
        .column("Country")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(countries, vec![Some("Turkey"), Some("Kenya")]);

    assert_eq!(outcome.filled_prices, 2);
    assert_eq!(outcome.filled_details, 1);
    assert_eq!(outcome.renamed_countries, 1);
    assert_eq!(outcome.snapshot_date, NaiveDate::from_ymd_opt(2025, 12, 2));
}

#[test]
fn pricing_drops_unused_columns_and_keeps_order() {
    let outcome = clean_pricing(&pricing_table(), &pricing_names()).unwrap();

    let names: Vec<String> = outcome
        .frame
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "Country",
            "Standard_with_ads_Local",
            "Extra_member_slots_Details",
            "Price_Mobile_USD",
            "Price_With_Ads_USD",
            "Price_Basic_USD",
            "Price_Standard_USD",
            "Price_Premium_USD",
        ]
    );
    assert_eq!(
        outcome.dropped_columns,
        vec!["MobileCNY", "Country.1", "Translation", "Updated On 2025-12-02"]
    );
}

#[test]
fn pricing_requires_usd_columns() {
    let table = raw(&["Country", "Extra member slots", "MobileUSD"], &[&["Kenya", "", "1"]]);
    let result = clean_pricing(&table, &pricing_names());
    match result {
        Err(TransformError::MissingColumn { column }) => assert_eq!(column, "Price_With_Ads_USD"),
        other => panic!("expected missing column, got {other:?}"),
    }
}

#[test]
fn aligner_rewrites_column_and_counts() {
    let mut df = DataFrame::new(vec![
        Series::new(
            "Country Name".into(),
            vec![
                Some("Cabo Verde"),
                Some("Trinidad and Tobago"),
                Some("Kenya"),
                None,
            ],
        )
        .into(),
    ])
    .unwrap();

    let stats = CrossDatasetAligner::builtin()
        .align_column(&mut df, "Country Name")
        .unwrap();

    let names: Vec<Option<&str>> = df
        .column("Country Name")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(
        names,
        vec![
            Some("Cape Verde"),
            Some("Trinidad & Tobago"),
            Some("Kenya"),
            None
        ]
    );
    assert_eq!((stats.exact, stats.fallback, stats.unchanged), (1, 1, 1));
}

#[test]
fn coverage_lists_names_without_counterpart() {
    let left = DataFrame::new(vec![
        Series::new("Country Name".into(), vec!["Kenya", "Kenya", "Peru", "Chad"]).into(),
    ])
    .unwrap();
    let right = DataFrame::new(vec![
        Series::new("Country".into(), vec!["Kenya", "Peru", "Réunion"]).into(),
    ])
    .unwrap();

    let report = join_coverage(&left, "Country Name", &right, "Country").unwrap();

    assert_eq!(report.matched, vec!["Kenya", "Peru"]);
    assert_eq!(report.only_left, vec!["Chad"]);
    assert_eq!(report.only_right, vec!["Réunion"]);
    assert!(!report.is_complete());
}

fn year_labels() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(1960i32..2030, 0..8)
        .prop_map(|years| years.into_iter().map(|year| year.to_string()).collect())
}

proptest! {
    #[test]
    fn reshape_emits_one_record_per_cell(
        countries in 0usize..6,
        labels in year_labels(),
        notes in any::<bool>(),
    ) {
        let codes: Vec<String> = (0..countries).map(|idx| format!("C{idx:02}")).collect();
        let mut columns: Vec<Column> = vec![
            Series::new("Country Name".into(), codes.clone()).into(),
            Series::new("Country Code".into(), codes.clone()).into(),
            Series::new("Indicator Name".into(), vec!["GDP"; countries]).into(),
            Series::new("Indicator Code".into(), vec!["NY"; countries]).into(),
        ];
        for label in &labels {
            columns.push(Series::new(label.as_str().into(), vec!["1.5"; countries]).into());
        }
        if notes {
            columns.push(Series::new("Notes".into(), vec!["n/a"; countries]).into());
        }
        let wide = DataFrame::new(columns).unwrap();

        let long = reshape_indicator(&wide, "GDP").unwrap();
        prop_assert_eq!(long.height(), countries * labels.len());
    }

    #[test]
    fn aligning_twice_equals_aligning_once(name in "[A-Za-z.']{1,16}( and [A-Za-z]{1,8})?") {
        let aligner = CrossDatasetAligner::builtin();
        let (once, _) = aligner.align_name(&name);
        let (twice, rewrite) = aligner.align_name(&once);
        prop_assert_eq!(&twice, &once);
        prop_assert_eq!(rewrite, NameRewrite::Unchanged);
    }

    #[test]
    fn exact_targets_survive_alignment(idx in 0usize..18) {
        let aligner = CrossDatasetAligner::builtin();
        let (source, target) = aligner.table().entries().nth(idx).unwrap();
        prop_assert_eq!(aligner.align_name(source).0, target.to_string());
        prop_assert_eq!(aligner.align_name(target).0, target.to_string());
    }
}
