//! Country-name alignment tables.
//!
//! An [`AlignmentTable`] is an exact-string substitution from one naming
//! convention to another. Names the table does not know pass through
//! unchanged. Tables refuse chains (a target that is itself a source), so
//! applying a table twice gives the same result as applying it once.

use std::collections::BTreeMap;

use crate::error::{ModelError, Result};

/// Exact-match substitution between two country-name vocabularies.
#[derive(Debug, Clone)]
pub struct AlignmentTable {
    name: String,
    entries: Vec<(String, String)>,
    lookup: BTreeMap<String, usize>,
}

impl AlignmentTable {
    /// Build a validated table.
    ///
    /// # Errors
    ///
    /// Returns an error when a source name appears twice, when a source or
    /// target is blank, or when a target is also used as a source.
    pub fn new<I, S, T>(name: impl Into<String>, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let name = name.into();
        let mut table = Self {
            name: name.clone(),
            entries: Vec::new(),
            lookup: BTreeMap::new(),
        };
        for (source, target) in entries {
            let source = source.into();
            let target = target.into();
            if source.trim().is_empty() || target.trim().is_empty() {
                return Err(ModelError::BlankAlignmentEntry {
                    table: name,
                    source_name: source,
                });
            }
            if table.lookup.contains_key(&source) {
                return Err(ModelError::DuplicateAlignmentSource {
                    table: name,
                    source_name: source,
                });
            }
            table.lookup.insert(source.clone(), table.entries.len());
            table.entries.push((source, target));
        }
        for (source, target) in &table.entries {
            if table.lookup.contains_key(target) {
                return Err(ModelError::AlignmentChain {
                    table: name,
                    source_name: source.clone(),
                    target: target.clone(),
                });
            }
        }
        Ok(table)
    }

    /// Build a table from compiled-in entries. Validation is covered by tests.
    fn builtin(name: &str, entries: &[(&str, &str)]) -> Self {
        let mut lookup = BTreeMap::new();
        let entries: Vec<(String, String)> = entries
            .iter()
            .enumerate()
            .map(|(idx, (source, target))| {
                lookup.insert((*source).to_string(), idx);
                ((*source).to_string(), (*target).to_string())
            })
            .collect();
        Self {
            name: name.to_string(),
            entries,
            lookup,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Target spelling for `name`, if the table maps it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.lookup
            .get(name)
            .map(|idx| self.entries[*idx].1.as_str())
    }

    /// Substitute `name`, passing unmapped names through.
    pub fn apply<'a>(&'a self, name: &'a str) -> &'a str {
        self.get(name).unwrap_or(name)
    }

    /// Whether `name` is already spelled the way some entry rewrites to.
    pub fn is_target(&self, name: &str) -> bool {
        self.entries.iter().any(|(_, target)| target == name)
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(source, target)| (source.as_str(), target.as_str()))
    }
}

/// Literal substring substitution applied to names a table did not map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubstringRule {
    pub from: &'static str,
    pub to: &'static str,
}

impl SubstringRule {
    pub fn apply(&self, name: &str) -> String {
        name.replace(self.from, self.to)
    }

    pub fn matches(&self, name: &str) -> bool {
        name.contains(self.from)
    }
}

/// `"Trinidad and Tobago"` becomes `"Trinidad & Tobago"`.
pub const CONJUNCTION_RULE: SubstringRule = SubstringRule {
    from: " and ",
    to: " & ",
};

const ECONOMIC_NAMES: &[(&str, &str)] = &[
    ("Bahamas, The", "Bahamas"),
    ("Czechia", "Czech Republic"),
    ("Egypt, Arab Rep.", "Egypt"),
    ("Gambia, The", "Gambia"),
    ("Hong Kong SAR, China", "Hong Kong"),
    ("Iran, Islamic Rep.", "Iran"),
    ("Korea, Rep.", "South Korea"),
    ("Korea, Dem. People's Rep.", "North Korea"),
    ("Kyrgyz Republic", "Kyrgyzstan"),
    ("Lao PDR", "Laos"),
    ("Macao SAR, China", "Macao"),
    ("Russian Federation", "Russia"),
    ("Slovak Republic", "Slovakia"),
    ("Somalia, Fed. Rep.", "Somalia"),
    ("Syrian Arab Republic", "Syria"),
    ("Turkiye", "Turkey"),
    ("Venezuela, RB", "Venezuela"),
    ("Viet Nam", "Vietnam"),
    ("Yemen, Rep.", "Yemen"),
    ("Puerto Rico (US)", "Puerto Rico"),
    ("West Bank and Gaza", "Palestine"),
];

const PRICING_NAMES: &[(&str, &str)] = &[("Czechia", "Czech Republic"), ("Türkiye", "Turkey")];

const CROSS_DATASET_NAMES: &[(&str, &str)] = &[
    ("Antigua and Barbuda", "Antigua & Barbuda"),
    ("Bosnia and Herzegovina", "Bosnia & Herzegovina"),
    ("Brunei Darussalam", "Brunei"),
    ("Cabo Verde", "Cape Verde"),
    ("Congo Dem. Rep.", "Congo - Kinshasa"),
    ("Congo Rep.", "Congo - Brazzaville"),
    ("Cote d'Ivoire", "Côte d’Ivoire"),
    ("Curacao", "Curaçao"),
    ("Macao", "Macau"),
    ("Micronesia Fed. Sts.", "Micronesia"),
    ("Myanmar", "Myanmar (Burma)"),
    ("Sao Tome and Principe", "São Tomé & Príncipe"),
    ("Sint Maarten (Dutch part)", "Sint Maarten"),
    ("St. Kitts and Nevis", "St. Kitts & Nevis"),
    ("St. Martin (French part)", "St. Martin"),
    ("St. Vincent and the Grenadines", "St. Vincent & Grenadines"),
    ("Turks and Caicos Islands", "Turks & Caicos Islands"),
    ("Virgin Islands (U.S.)", "U.S. Virgin Islands"),
];

/// Statistics-source spellings to the names the pricing export uses,
/// applied while normalizing the merged indicator table.
pub fn economic_names() -> AlignmentTable {
    AlignmentTable::builtin("economic", ECONOMIC_NAMES)
}

/// Spellings inside the pricing export that differ from the cleaned
/// indicator table.
pub fn pricing_names() -> AlignmentTable {
    AlignmentTable::builtin("pricing", PRICING_NAMES)
}

/// Normalized indicator names to the pricing export's convention, applied
/// ahead of the [`CONJUNCTION_RULE`] fallback.
pub fn cross_dataset_names() -> AlignmentTable {
    AlignmentTable::builtin("cross-dataset", CROSS_DATASET_NAMES)
}

/// Every compiled-in table, in pipeline order.
pub fn builtin_tables() -> Vec<AlignmentTable> {
    vec![pricing_names(), economic_names(), cross_dataset_names()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revalidate(table: &AlignmentTable) -> Result<AlignmentTable> {
        AlignmentTable::new(table.name(), table.entries())
    }

    #[test]
    fn builtin_tables_pass_validation() {
        for table in builtin_tables() {
            let checked = revalidate(&table).unwrap();
            assert_eq!(checked.len(), table.len(), "table {}", table.name());
        }
    }

    #[test]
    fn builtin_table_sizes() {
        assert_eq!(economic_names().len(), 21);
        assert_eq!(pricing_names().len(), 2);
        assert_eq!(cross_dataset_names().len(), 18);
    }

    #[test]
    fn cross_dataset_targets_never_contain_the_fallback_pattern() {
        for (_, target) in cross_dataset_names().entries() {
            assert!(!CONJUNCTION_RULE.matches(target), "{target}");
        }
    }

    #[test]
    fn unmapped_names_pass_through() {
        let table = economic_names();
        assert_eq!(table.apply("Turkiye"), "Turkey");
        assert_eq!(table.apply("France"), "France");
        assert!(table.get("France").is_none());
    }

    #[test]
    fn rejects_chains() {
        let err = AlignmentTable::new("t", [("A", "B"), ("B", "C")]).unwrap_err();
        assert!(matches!(err, ModelError::AlignmentChain { .. }));

        let err = AlignmentTable::new("t", [("A", "A")]).unwrap_err();
        assert!(matches!(err, ModelError::AlignmentChain { .. }));
    }

    #[test]
    fn rejects_duplicates_and_blanks() {
        let err = AlignmentTable::new("t", [("A", "B"), ("A", "C")]).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateAlignmentSource { .. }));

        let err = AlignmentTable::new("t", [(" ", "B")]).unwrap_err();
        assert!(matches!(err, ModelError::BlankAlignmentEntry { .. }));
    }

    #[test]
    fn conjunction_rule_is_literal() {
        assert_eq!(
            CONJUNCTION_RULE.apply("Trinidad and Tobago"),
            "Trinidad & Tobago"
        );
        // Only the spaced conjunction matches.
        assert_eq!(CONJUNCTION_RULE.apply("Sandland"), "Sandland");
        assert_eq!(CONJUNCTION_RULE.apply("Andorra"), "Andorra");
    }
}
