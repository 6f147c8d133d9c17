//! Core data types for the shaper.
//!
//! [`ParsedElement`] is what the XML boundary hands to the shaper;
//! [`ShapedRecord`] is what the shaper hands to the JSON writer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An owned markup element: tag name, attributes in document order and
/// child elements in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedElement {
    /// Tag name without namespace prefix.
    pub tag_name: String,

    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,

    /// Child elements in document order.
    pub children: Vec<ParsedElement>,
}

impl ParsedElement {
    /// Create an element without attributes or children.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            ..Self::default()
        }
    }

    /// Add an attribute (builder style).
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Add a child element (builder style).
    #[must_use]
    pub fn with_child(mut self, child: ParsedElement) -> Self {
        self.children.push(child);
        self
    }

    /// Get an attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// The element kinds that produce records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A point (`<node>`).
    Node,
    /// An ordered list of node references (`<way>`).
    Way,
}

impl ElementKind {
    /// Get the tag name / output value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Way => "way",
        }
    }

    /// Classify a tag name; `None` for tags that never produce a record.
    #[must_use]
    pub fn from_tag_name(tag_name: &str) -> Option<Self> {
        match tag_name {
            "node" => Some(Self::Node),
            "way" => Some(Self::Way),
            _ => None,
        }
    }
}

/// Provenance attributes of an element version.
///
/// Only attributes present on the element are serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changeset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

impl Created {
    /// Store a provenance attribute. Returns `false` for other names.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        let slot = match name {
            "version" => &mut self.version,
            "changeset" => &mut self.changeset,
            "timestamp" => &mut self.timestamp,
            "user" => &mut self.user,
            "uid" => &mut self.uid,
            _ => return false,
        };
        *slot = Some(value.into());
        true
    }

    /// Whether no provenance attribute was present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.version.is_none()
            && self.changeset.is_none()
            && self.timestamp.is_none()
            && self.user.is_none()
            && self.uid.is_none()
    }
}

/// A cleaned record, ready to be written as one JSON document.
///
/// `pos`, `address` and `node_refs` are left out of the output when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapedRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type")]
    pub kind: ElementKind,

    /// `[latitude, longitude]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<[f64; 2]>,

    pub created: Created,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub address: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub node_refs: Vec<String>,

    /// Remaining attributes and tags, copied verbatim.
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl ShapedRecord {
    /// Create an empty record of the given kind.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: None,
            kind,
            pos: None,
            created: Created::default(),
            address: BTreeMap::new(),
            node_refs: Vec::new(),
            fields: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parsed_element_attribute_lookup() {
        let element = ParsedElement::new("node")
            .with_attribute("id", "1")
            .with_attribute("lat", "30.0");
        assert_eq!(element.attribute("lat"), Some("30.0"));
        assert_eq!(element.attribute("lon"), None);
    }

    #[test]
    fn test_element_kind_from_tag_name() {
        assert_eq!(ElementKind::from_tag_name("node"), Some(ElementKind::Node));
        assert_eq!(ElementKind::from_tag_name("way"), Some(ElementKind::Way));
        assert_eq!(ElementKind::from_tag_name("relation"), None);
        assert_eq!(ElementKind::from_tag_name("Node"), None);
    }

    #[test]
    fn test_created_set() {
        let mut created = Created::default();
        assert!(created.is_empty());
        assert!(created.set("uid", "7"));
        assert!(!created.set("visible", "true"));
        assert_eq!(created.uid.as_deref(), Some("7"));
        assert!(!created.is_empty());
    }

    #[test]
    fn test_minimal_record_serialization() {
        let record = ShapedRecord::new(ElementKind::Way);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"type": "way", "created": {}})
        );
    }

    #[test]
    fn test_full_record_serialization() {
        let mut record = ShapedRecord::new(ElementKind::Node);
        record.id = Some("5".to_string());
        record.pos = Some([30.05, 31.25]);
        record.created.set("user", "cairo_mapper");
        record
            .address
            .insert("street".to_string(), "شارع فهمي".to_string());
        record
            .fields
            .insert("amenity".to_string(), "cafe".to_string());

        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"id":"5","type":"node","pos":[30.05,31.25],"created":{"user":"cairo_mapper"},"address":{"street":"شارع فهمي"},"amenity":"cafe"}"#
        );
    }
}
