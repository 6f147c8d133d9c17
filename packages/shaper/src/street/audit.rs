//! Street type audit.
//!
//! Collects street names whose type token is not a canonical street type,
//! grouped by that token, so missing abbreviations can be spotted before
//! the abbreviation table is extended.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use roxmltree::{Document, Node};
use serde::Serialize;

use crate::config::{StreetTables, STREET_KEY};
use crate::xml::{find_children, shapeable_elements};

use super::convention::StreetConvention;

/// Trailing token of a suffix-style name, with optional final dot.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUFFIX_STREET_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\S+\.?$").expect("valid regex"));

/// Leading token of a prefix-style name, with optional dot.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PREFIX_STREET_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+\b\.?").expect("valid regex"));

/// Extract the street type token of a name.
///
/// # Examples
/// ```
/// use osmclean_shaper::street::{street_type, StreetConvention};
///
/// assert_eq!(street_type("Main St.", StreetConvention::Suffix), Some("St."));
/// assert_eq!(street_type("ميدان التحرير", StreetConvention::Prefix), Some("ميدان"));
/// ```
pub fn street_type(name: &str, convention: StreetConvention) -> Option<&str> {
    let pattern = match convention {
        StreetConvention::Suffix => &SUFFIX_STREET_TYPE,
        StreetConvention::Prefix => &PREFIX_STREET_TYPE,
    };
    pattern.find(name).map(|m| m.as_str())
}

/// Check if a `tag` element carries a street name.
pub fn is_street_name(tag: Node<'_, '_>) -> bool {
    tag.attribute("k") == Some(STREET_KEY)
}

/// Unexpected street type tokens and the distinct names they occur in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StreetAudit {
    street_types: BTreeMap<String, BTreeSet<String>>,
}

impl StreetAudit {
    /// Create an empty audit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Audit one street name.
    ///
    /// Returns the unexpected token the name was filed under, if any.
    pub fn record(&mut self, name: &str, tables: &StreetTables) -> Option<String> {
        let convention = StreetConvention::classify(name);
        let token = street_type(name, convention)?;
        if tables.is_expected(token) {
            return None;
        }
        self.street_types
            .entry(token.to_string())
            .or_default()
            .insert(name.to_string());
        Some(token.to_string())
    }

    /// Names recorded under an unexpected token.
    #[must_use]
    pub fn names_for(&self, token: &str) -> Option<&BTreeSet<String>> {
        self.street_types.get(token)
    }

    /// All unexpected tokens with their names.
    #[must_use]
    pub fn street_types(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.street_types
    }

    /// Number of distinct unexpected tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.street_types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.street_types.is_empty()
    }
}

/// Audit every street name on the `node` and `way` elements of a document.
pub fn audit_document(doc: &Document<'_>, tables: &StreetTables) -> StreetAudit {
    let mut audit = StreetAudit::new();
    for element in shapeable_elements(doc) {
        for tag in find_children(element, "tag").filter(|tag| is_street_name(*tag)) {
            if let Some(name) = tag.attribute("v") {
                audit.record(name, tables);
            }
        }
    }
    tracing::debug!(street_types = audit.len(), "street audit finished");
    audit
}
