//! Element shaping: turns one parsed `node` or `way` into a [`ShapedRecord`].
//!
//! Attributes are split into provenance (`created`), position (`pos`) and
//! plain fields. `tag` children become plain fields or, for `addr:*` keys,
//! entries of `address`; `nd` children become `node_refs`. Tag keys that
//! cannot be used as field names are dropped without failing the element.
//!
//! Shaping is a pure per-element function: no state is kept between calls.

use tracing::debug;

use crate::config::{StreetTables, ADDRESS_PREFIX, PROBLEM_CHARS, RESERVED_KEYS, STREET_KEY};
use crate::error::{Result, ShaperError};
use crate::street::normalize_street_name;
use crate::types::{ElementKind, ParsedElement, ShapedRecord};

/// How a `tag` key is routed into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKey<'a> {
    /// Copied to a top-level field.
    Plain,
    /// Stored in `address` under the given sub-key.
    Address(&'a str),
    /// Contains a character that is not allowed in field names.
    Problematic,
    /// An `addr:` key with more than one colon.
    NestedAddress,
}

/// Check whether a key contains whitespace or one of `=+/&<>;'"?%#$@,.`.
///
/// # Examples
/// ```
/// use osmclean_shaper::shaper::has_problem_chars;
///
/// assert!(has_problem_chars("name en"));
/// assert!(!has_problem_chars("addr:street"));
/// ```
pub fn has_problem_chars(key: &str) -> bool {
    PROBLEM_CHARS.is_match(key)
}

/// Decide where a `tag` key goes.
///
/// # Examples
/// ```
/// use osmclean_shaper::shaper::{classify_tag_key, TagKey};
///
/// assert_eq!(classify_tag_key("amenity"), TagKey::Plain);
/// assert_eq!(classify_tag_key("addr:postcode"), TagKey::Address("postcode"));
/// assert_eq!(classify_tag_key("addr:street:name"), TagKey::NestedAddress);
/// assert_eq!(classify_tag_key("fax="), TagKey::Problematic);
/// ```
pub fn classify_tag_key(key: &str) -> TagKey<'_> {
    if has_problem_chars(key) {
        return TagKey::Problematic;
    }
    match key.strip_prefix(ADDRESS_PREFIX) {
        Some(sub_key) if sub_key.contains(':') => TagKey::NestedAddress,
        Some(sub_key) => TagKey::Address(sub_key),
        None => TagKey::Plain,
    }
}

/// Shape one element.
///
/// Returns `Ok(None)` for anything but `node` and `way`.
///
/// # Errors
/// * `ShaperError::InvalidCoordinate` if `lat` or `lon` is not a finite number
/// * `ShaperError::MissingAttribute` if only one of `lat`/`lon` is present,
///   a `tag` child lacks `k` or `v`, or an `nd` child lacks `ref`
///
/// # Examples
/// ```
/// use osmclean_shaper::config::StreetTables;
/// use osmclean_shaper::shaper::shape_element;
/// use osmclean_shaper::types::ParsedElement;
///
/// let node = ParsedElement::new("node")
///     .with_attribute("id", "1")
///     .with_attribute("lat", "30.04")
///     .with_attribute("lon", "31.23");
///
/// let record = shape_element(&node, &StreetTables::default()).unwrap().unwrap();
/// assert_eq!(record.pos, Some([30.04, 31.23]));
///
/// let bounds = ParsedElement::new("bounds");
/// assert!(shape_element(&bounds, &StreetTables::default()).unwrap().is_none());
/// ```
pub fn shape_element(element: &ParsedElement, tables: &StreetTables) -> Result<Option<ShapedRecord>> {
    let Some(kind) = ElementKind::from_tag_name(&element.tag_name) else {
        return Ok(None);
    };

    let mut record = ShapedRecord::new(kind);
    record.id = element.attribute("id").map(String::from);

    let mut lat = None;
    let mut lon = None;
    for (name, value) in &element.attributes {
        if record.created.set(name, value.as_str()) {
            continue;
        }
        match name.as_str() {
            "id" => {}
            "lat" => lat = Some(value.as_str()),
            "lon" => lon = Some(value.as_str()),
            _ => insert_field(&mut record, name, value),
        }
    }
    record.pos = position(element, lat, lon, record.id.as_deref())?;

    for child in &element.children {
        match child.tag_name.as_str() {
            "tag" => shape_tag(&mut record, child, tables)?,
            "nd" => {
                let node_ref = required_attribute(child, "ref", record.id.as_deref())?;
                record.node_refs.push(node_ref.to_string());
            }
            _ => {}
        }
    }

    Ok(Some(record))
}

/// Route one `tag` child into the record.
fn shape_tag(record: &mut ShapedRecord, tag: &ParsedElement, tables: &StreetTables) -> Result<()> {
    let key = required_attribute(tag, "k", record.id.as_deref())?;
    let value = required_attribute(tag, "v", record.id.as_deref())?;

    match classify_tag_key(key) {
        TagKey::Plain => insert_field(record, key, value),
        TagKey::Address(sub_key) => {
            let value = if key == STREET_KEY {
                normalize_street_name(value, tables)
            } else {
                value.to_string()
            };
            record.address.insert(sub_key.to_string(), value);
        }
        TagKey::Problematic => {
            debug!(id = ?record.id, key, "dropping tag with problematic key");
        }
        TagKey::NestedAddress => {
            debug!(id = ?record.id, key, "dropping nested address tag");
        }
    }
    Ok(())
}

fn insert_field(record: &mut ShapedRecord, key: &str, value: &str) {
    if RESERVED_KEYS.contains(&key) {
        debug!(id = ?record.id, key, "dropping field that collides with a record key");
        return;
    }
    record.fields.insert(key.to_string(), value.to_string());
}

fn position(
    element: &ParsedElement,
    lat: Option<&str>,
    lon: Option<&str>,
    element_id: Option<&str>,
) -> Result<Option<[f64; 2]>> {
    match (lat, lon) {
        (None, None) => Ok(None),
        (Some(lat), Some(lon)) => Ok(Some([
            parse_coordinate("lat", lat, element_id)?,
            parse_coordinate("lon", lon, element_id)?,
        ])),
        (Some(_), None) => Err(missing_attribute(element, "lon", element_id)),
        (None, Some(_)) => Err(missing_attribute(element, "lat", element_id)),
    }
}

fn parse_coordinate(attribute: &str, value: &str, element_id: Option<&str>) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ShaperError::InvalidCoordinate {
            attribute: attribute.to_string(),
            value: value.to_string(),
            element_id: element_id.map(String::from),
        })
}

fn required_attribute<'e>(
    element: &'e ParsedElement,
    name: &str,
    element_id: Option<&str>,
) -> Result<&'e str> {
    element
        .attribute(name)
        .ok_or_else(|| missing_attribute(element, name, element_id))
}

fn missing_attribute(element: &ParsedElement, name: &str, element_id: Option<&str>) -> ShaperError {
    ShaperError::MissingAttribute {
        attribute: name.to_string(),
        tag_name: element.tag_name.clone(),
        element_id: element_id.map(String::from),
    }
}
