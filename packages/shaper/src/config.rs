//! Configuration constants, key patterns and street tables.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::{Result, ShaperError};

/// Input file used when none is given on the command line.
pub const DEFAULT_INPUT_PATH: &str = "data/cairo_egypt.osm";

/// Element attributes that describe who created a version of the element.
pub const CREATED_FIELDS: [&str; 5] = ["version", "changeset", "timestamp", "user", "uid"];

/// Keys owned by the structured part of a shaped record.
///
/// Plain fields with one of these names would overwrite structured data.
pub const RESERVED_KEYS: [&str; 6] = ["id", "type", "pos", "created", "address", "node_refs"];

/// Prefix of address tag keys.
pub const ADDRESS_PREFIX: &str = "addr:";

/// Key of the street name tag.
pub const STREET_KEY: &str = "addr:street";

/// Characters that make a tag key unusable as a document field name.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static PROBLEM_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[=+/&<>;'"?%#$@,.\s]"#).expect("valid regex"));

/// Lowercase keys without a colon (e.g. `amenity`).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static LOWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_]*$").expect("valid regex"));

/// Lowercase keys with exactly one colon (e.g. `addr:street`).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static LOWER_COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_]*:[a-z_]*$").expect("valid regex"));

/// Street types considered canonical, for both naming conventions.
pub const DEFAULT_EXPECTED: [&str; 20] = [
    "Street",
    "Avenue",
    "Boulevard",
    "Drive",
    "Court",
    "Place",
    "Square",
    "Lane",
    "Road",
    "Trail",
    "Parkway",
    "Commons",
    "شارع",
    "ميدان",
    "طريق",
    "محور",
    "المحور",
    "كورنيش",
    "مجاورة",
    "امتداد",
];

/// Suffix abbreviations and their expansions, in application order.
pub const DEFAULT_ABBREVIATIONS: [(&str, &str); 5] = [
    ("St", "Street"),
    ("St.", "Street"),
    ("Rd.", "Road"),
    ("Rd", "Road"),
    ("Ave", "Avenue"),
];

/// Street word prepended to prefix-style names that lack a street type.
pub const DEFAULT_STREET_WORD: &str = "شارع";

/// One entry of the suffix abbreviation table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Abbreviation {
    /// Abbreviated form as it appears at the end of a name.
    pub from: String,
    /// Expanded form.
    pub to: String,
}

/// Immutable street naming tables shared by the normalizer and the auditor.
///
/// Built once (from the defaults or a YAML file) and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreetTables {
    expected: Vec<String>,
    expected_set: HashSet<String>,
    abbreviations: Vec<Abbreviation>,
    street_word: String,
}

/// On-disk form of [`StreetTables`]; every field is optional.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StreetTablesFile {
    expected: Option<Vec<String>>,
    abbreviations: Option<Vec<Abbreviation>>,
    street_word: Option<String>,
}

impl Default for StreetTables {
    fn default() -> Self {
        Self::build(
            DEFAULT_EXPECTED.iter().map(|s| s.to_string()).collect(),
            DEFAULT_ABBREVIATIONS
                .iter()
                .map(|(from, to)| Abbreviation {
                    from: from.to_string(),
                    to: to.to_string(),
                })
                .collect(),
            DEFAULT_STREET_WORD.to_string(),
        )
    }
}

impl StreetTables {
    fn build(expected: Vec<String>, abbreviations: Vec<Abbreviation>, street_word: String) -> Self {
        let expected_set = expected.iter().cloned().collect();
        Self {
            expected,
            expected_set,
            abbreviations,
            street_word,
        }
    }

    /// Create validated tables.
    ///
    /// # Errors
    /// Returns `ShaperError::InvalidStreetConfig` if an abbreviation is empty,
    /// the street word is blank, or the street word is not an expected type.
    pub fn new(
        expected: Vec<String>,
        abbreviations: Vec<Abbreviation>,
        street_word: String,
    ) -> Result<Self> {
        if let Some(entry) = abbreviations.iter().find(|a| a.from.is_empty()) {
            return Err(ShaperError::InvalidStreetConfig(format!(
                "empty abbreviation for expansion '{}'",
                entry.to
            )));
        }
        if street_word.trim().is_empty() || street_word.contains(char::is_whitespace) {
            return Err(ShaperError::InvalidStreetConfig(format!(
                "street word must be a single token, got '{street_word}'"
            )));
        }
        if !expected.contains(&street_word) {
            return Err(ShaperError::InvalidStreetConfig(format!(
                "street word '{street_word}' is not in the expected street types"
            )));
        }
        Ok(Self::build(expected, abbreviations, street_word))
    }

    /// Parse tables from YAML; omitted sections fall back to the defaults.
    ///
    /// # Examples
    /// ```
    /// use osmclean_shaper::config::StreetTables;
    ///
    /// let yaml = "abbreviations:\n  - from: Blvd\n    to: Boulevard\n";
    /// let tables = StreetTables::from_yaml_str(yaml).unwrap();
    /// assert_eq!(tables.abbreviations().len(), 1);
    /// assert!(tables.is_expected("Street"));
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: StreetTablesFile = serde_yaml_ng::from_str(yaml)?;
        let defaults = Self::default();
        Self::new(
            file.expected.unwrap_or(defaults.expected),
            file.abbreviations.unwrap_or(defaults.abbreviations),
            file.street_word.unwrap_or(defaults.street_word),
        )
    }

    /// Load tables from a YAML file.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        let tables = Self::from_yaml_str(&yaml)?;
        tracing::debug!(
            path = %path.display(),
            expected = tables.expected.len(),
            abbreviations = tables.abbreviations.len(),
            "loaded street tables"
        );
        Ok(tables)
    }

    /// Load tables from `path` if given, otherwise use the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_yaml_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Whether `street_type` is a canonical street type.
    #[must_use]
    pub fn is_expected(&self, street_type: &str) -> bool {
        self.expected_set.contains(street_type)
    }

    /// Canonical street types, in configuration order.
    #[must_use]
    pub fn expected(&self) -> &[String] {
        &self.expected
    }

    /// Suffix abbreviation table, in application order.
    #[must_use]
    pub fn abbreviations(&self) -> &[Abbreviation] {
        &self.abbreviations
    }

    /// Street word for prefix-style names.
    #[must_use]
    pub fn street_word(&self) -> &str {
        &self.street_word
    }
}

/// Output path used when converting `input` without an explicit output.
///
/// # Examples
/// ```
/// use std::path::{Path, PathBuf};
/// use osmclean_shaper::config::default_output_path;
///
/// assert_eq!(
///     default_output_path(Path::new("data/cairo_egypt.osm")),
///     PathBuf::from("data/cairo_egypt.osm.json")
/// );
/// ```
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".json");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_chars() {
        assert!(PROBLEM_CHARS.is_match("name en"));
        assert!(PROBLEM_CHARS.is_match("a=b"));
        assert!(PROBLEM_CHARS.is_match("fax."));
        assert!(PROBLEM_CHARS.is_match("line\tbreak"));
        assert!(!PROBLEM_CHARS.is_match("addr:street"));
        assert!(!PROBLEM_CHARS.is_match("name_en"));
    }

    #[test]
    fn test_lower_patterns() {
        assert!(LOWER.is_match("amenity"));
        assert!(LOWER.is_match("is_in"));
        assert!(!LOWER.is_match("addr:street"));
        assert!(LOWER_COLON.is_match("addr:street"));
        assert!(!LOWER_COLON.is_match("addr:street:name"));
        assert!(!LOWER_COLON.is_match("name:EN"));
    }

    #[test]
    fn test_default_tables() {
        let tables = StreetTables::default();
        assert_eq!(tables.expected().len(), 20);
        assert!(tables.is_expected("Road"));
        assert!(tables.is_expected("ميدان"));
        assert!(!tables.is_expected("St"));
        assert_eq!(tables.abbreviations()[0].from, "St");
        assert_eq!(tables.street_word(), "شارع");
    }

    #[test]
    fn test_from_yaml_overrides_sections() {
        let yaml = r#"
expected: [Street, Road, Way]
street_word: Street
"#;
        let tables = StreetTables::from_yaml_str(yaml).unwrap();
        assert_eq!(tables.expected(), ["Street", "Road", "Way"]);
        assert_eq!(tables.street_word(), "Street");
        // Abbreviations were not given and keep their defaults
        assert_eq!(tables.abbreviations().len(), 5);
    }

    #[test]
    fn test_from_yaml_rejects_unknown_street_word() {
        let err = StreetTables::from_yaml_str("street_word: Sikka\n").unwrap_err();
        assert!(matches!(err, ShaperError::InvalidStreetConfig(_)));
    }

    #[test]
    fn test_from_yaml_rejects_empty_abbreviation() {
        let yaml = "abbreviations:\n  - from: ''\n    to: Street\n";
        let err = StreetTables::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("empty abbreviation"));
    }

    #[test]
    fn test_from_yaml_rejects_unknown_fields() {
        let err = StreetTables::from_yaml_str("mapping: {}\n").unwrap_err();
        assert!(matches!(err, ShaperError::StreetConfig(_)));
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        assert_eq!(StreetTables::load(None).unwrap(), StreetTables::default());
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("map.osm")),
            PathBuf::from("map.osm.json")
        );
    }
}
