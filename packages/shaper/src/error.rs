//! Error types for the shaper.
//!
//! `ShaperError` covers both the per-element parse failures raised by the
//! shaper (which carry the offending element's identity) and the I/O,
//! XML and serialization failures of the conversion driver.

use thiserror::Error;

/// Format an optional element id for error messages.
fn element_label(id: &Option<String>) -> String {
    id.as_ref()
        .map(|id| format!("element {id}"))
        .unwrap_or_else(|| "element without id".to_string())
}

/// Main error type for the shaper library.
#[derive(Debug, Error)]
pub enum ShaperError {
    /// A `lat` or `lon` attribute is not a number.
    #[error("Invalid {attribute} value '{value}' on {}", element_label(.element_id))]
    InvalidCoordinate {
        attribute: String,
        value: String,
        element_id: Option<String>,
    },

    /// A required attribute is missing on the element or one of its children.
    #[error("Missing attribute '{attribute}' on <{tag_name}> of {}", element_label(.element_id))]
    MissingAttribute {
        attribute: String,
        tag_name: String,
        element_id: Option<String>,
    },

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Street table file could not be deserialized.
    #[error("Invalid street table file: {0}")]
    StreetConfig(#[from] serde_yaml_ng::Error),

    /// Street table content is inconsistent.
    #[error("Invalid street table: {0}")]
    InvalidStreetConfig(String),
}

impl ShaperError {
    /// Whether this error concerns a single element rather than the whole run.
    #[must_use]
    pub fn is_element_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCoordinate { .. } | Self::MissingAttribute { .. }
        )
    }
}

/// Result type alias for shaper operations.
pub type Result<T> = std::result::Result<T, ShaperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_coordinate_display() {
        let err = ShaperError::InvalidCoordinate {
            attribute: "lat".to_string(),
            value: "north".to_string(),
            element_id: Some("42".to_string()),
        };
        assert_eq!(err.to_string(), "Invalid lat value 'north' on element 42");
        assert!(err.is_element_error());
    }

    #[test]
    fn test_missing_attribute_without_id() {
        let err = ShaperError::MissingAttribute {
            attribute: "ref".to_string(),
            tag_name: "nd".to_string(),
            element_id: None,
        };
        assert_eq!(
            err.to_string(),
            "Missing attribute 'ref' on <nd> of element without id"
        );
    }

    #[test]
    fn test_io_error_is_not_element_error() {
        let err = ShaperError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert!(!err.is_element_error());
    }
}
