//! Tests for alignment tables and indicator definitions.

use atlas_model::{
    AlignmentTable, IndicatorSpec, ModelError, default_indicators, economic_names,
    indicator_columns, pricing_names, validate_indicators,
};
use proptest::prelude::*;

#[test]
fn pricing_table_renders_in_declaration_order() {
    let rendered: Vec<String> = pricing_names()
        .entries()
        .map(|(source, target)| format!("{source} -> {target}"))
        .collect();
    insta::assert_snapshot!(rendered.join("\n"), @r"
    Czechia -> Czech Republic
    Türkiye -> Turkey
    ");
}

#[test]
fn default_indicators_are_valid() {
    let specs = default_indicators();
    validate_indicators(&specs).unwrap();
    assert_eq!(
        indicator_columns(&specs),
        vec!["GDP", "GDP_per_Capita", "Population"]
    );
}

#[test]
fn indicator_validation_rejects_collisions() {
    let specs = vec![
        IndicatorSpec::new("a.csv", "GDP"),
        IndicatorSpec::new("b.csv", "GDP"),
    ];
    assert!(matches!(
        validate_indicators(&specs),
        Err(ModelError::DuplicateIndicator { .. })
    ));

    let specs = vec![IndicatorSpec::new("a.csv", "Year")];
    assert!(matches!(
        validate_indicators(&specs),
        Err(ModelError::ReservedIndicatorColumn { .. })
    ));

    assert!(matches!(
        validate_indicators(&[]),
        Err(ModelError::NoIndicators)
    ));
}

#[test]
fn indicator_spec_deserializes_from_toml() {
    #[derive(serde::Deserialize)]
    struct Wrapper {
        indicators: Vec<IndicatorSpec>,
    }

    let parsed: Wrapper = toml::from_str(
        r#"
        [[indicators]]
        file = "GDP.csv"
        column = "GDP"

        [[indicators]]
        file = "Unemployment.csv"
        column = "Unemployment"
        "#,
    )
    .unwrap();

    assert_eq!(parsed.indicators.len(), 2);
    assert_eq!(parsed.indicators[1].column, "Unemployment");
    assert_eq!(parsed.indicators[1].file.to_str(), Some("Unemployment.csv"));
}

#[test]
fn custom_table_keeps_declaration_order() {
    let table = AlignmentTable::new("custom", [("Zed", "Z"), ("Alpha", "A")]).unwrap();
    let sources: Vec<&str> = table.entries().map(|(source, _)| source).collect();
    assert_eq!(sources, vec!["Zed", "Alpha"]);
    assert_eq!(table.name(), "custom");
}

proptest! {
    #[test]
    fn economic_alignment_is_idempotent(name in "[A-Za-z ,.'()]{0,24}") {
        let table = economic_names();
        let once = table.apply(&name).to_string();
        let twice = table.apply(&once).to_string();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn every_builtin_source_is_idempotent(idx in 0usize..21) {
        let table = economic_names();
        let (source, _) = table.entries().nth(idx).unwrap();
        let once = table.apply(source).to_string();
        prop_assert_eq!(table.apply(&once), once.as_str());
    }
}
