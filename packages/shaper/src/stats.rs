//! Document diagnostics: tag counts and tag key classification.

use std::collections::BTreeMap;
use std::fmt;

use roxmltree::Document;
use serde::Serialize;

use crate::config::{LOWER, LOWER_COLON};
use crate::shaper::has_problem_chars;
use crate::xml::{get_tag_name, has_tag};

/// Count the occurrences of every element tag name in a document.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use osmclean_shaper::stats::count_tags;
///
/// let doc = Document::parse(r#"<osm><node/><node/><way/></osm>"#).unwrap();
/// let tags = count_tags(&doc);
/// assert_eq!(tags["node"], 2);
/// assert_eq!(tags["osm"], 1);
/// ```
pub fn count_tags(doc: &Document<'_>) -> BTreeMap<String, usize> {
    let mut tags = BTreeMap::new();
    for node in doc.descendants().filter(|n| n.is_element()) {
        *tags.entry(get_tag_name(node).to_string()).or_insert(0) += 1;
    }
    tags
}

/// Shape of a `tag` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCategory {
    /// Only lowercase letters and underscores.
    Lower,
    /// Lowercase letters and underscores around a single colon.
    LowerColon,
    /// Contains a character that is not allowed in field names.
    ProblemChars,
    /// Anything else (uppercase, digits, several colons, ...).
    Other,
}

impl KeyCategory {
    /// Classify a key; the first matching category wins.
    #[must_use]
    pub fn classify(key: &str) -> Self {
        if LOWER.is_match(key) {
            Self::Lower
        } else if LOWER_COLON.is_match(key) {
            Self::LowerColon
        } else if has_problem_chars(key) {
            Self::ProblemChars
        } else {
            Self::Other
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lower => "lower",
            Self::LowerColon => "lower_colon",
            Self::ProblemChars => "problemchars",
            Self::Other => "other",
        }
    }
}

/// Number of `tag` keys per [`KeyCategory`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KeyCounts {
    pub lower: usize,
    pub lower_colon: usize,
    #[serde(rename = "problemchars")]
    pub problem_chars: usize,
    pub other: usize,
}

impl KeyCounts {
    /// Count one key.
    pub fn add(&mut self, key: &str) {
        match KeyCategory::classify(key) {
            KeyCategory::Lower => self.lower += 1,
            KeyCategory::LowerColon => self.lower_colon += 1,
            KeyCategory::ProblemChars => self.problem_chars += 1,
            KeyCategory::Other => self.other += 1,
        }
    }

    /// Counts with their category, in reporting order.
    #[must_use]
    pub fn entries(&self) -> [(KeyCategory, usize); 4] {
        [
            (KeyCategory::Lower, self.lower),
            (KeyCategory::LowerColon, self.lower_colon),
            (KeyCategory::ProblemChars, self.problem_chars),
            (KeyCategory::Other, self.other),
        ]
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.lower + self.lower_colon + self.problem_chars + self.other
    }
}

impl fmt::Display for KeyCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries()
            .iter()
            .map(|(category, count)| format!("{}: {count}", category.as_str()))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Classify the `k` attribute of every `tag` element in a document.
pub fn check_keys(doc: &Document<'_>) -> KeyCounts {
    let mut counts = KeyCounts::default();
    for key in doc
        .descendants()
        .filter(|n| has_tag(*n, "tag"))
        .filter_map(|n| n.attribute("k"))
    {
        counts.add(key);
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"<osm>
        <bounds minlat="29.9" minlon="31.1" maxlat="30.1" maxlon="31.4"/>
        <node id="1">
            <tag k="amenity" v="cafe"/>
            <tag k="addr:street" v="Main St"/>
            <tag k="name:EN" v="Cafe"/>
        </node>
        <way id="2">
            <nd ref="1"/>
            <tag k="building levels" v="3"/>
        </way>
    </osm>"#;

    #[test]
    fn test_count_tags() {
        let doc = Document::parse(SAMPLE).unwrap();
        let tags = count_tags(&doc);

        let expected: BTreeMap<String, usize> = [
            ("bounds", 1),
            ("nd", 1),
            ("node", 1),
            ("osm", 1),
            ("tag", 4),
            ("way", 1),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        assert_eq!(tags, expected);
    }

    #[test]
    fn test_classify() {
        assert_eq!(KeyCategory::classify("highway"), KeyCategory::Lower);
        assert_eq!(KeyCategory::classify("addr:street"), KeyCategory::LowerColon);
        assert_eq!(KeyCategory::classify("a b"), KeyCategory::ProblemChars);
        assert_eq!(KeyCategory::classify("name:EN"), KeyCategory::Other);
        assert_eq!(KeyCategory::classify("addr:street:name"), KeyCategory::Other);
    }

    #[test]
    fn test_check_keys() {
        let doc = Document::parse(SAMPLE).unwrap();
        let counts = check_keys(&doc);

        assert_eq!(
            counts,
            KeyCounts {
                lower: 1,
                lower_colon: 1,
                problem_chars: 1,
                other: 1,
            }
        );
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_key_counts_display() {
        let mut counts = KeyCounts::default();
        counts.add("name");
        counts.add("name");
        assert_eq!(
            counts.to_string(),
            "lower: 2, lower_colon: 0, problemchars: 0, other: 0"
        );
    }
}
