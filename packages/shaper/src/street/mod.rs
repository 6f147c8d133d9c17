//! Street names: naming-convention classification, normalization and audit.
//!
//! Two conventions are supported. Suffix-style names put the street type
//! last ("Main St"); prefix-style names, written in Arabic script, put it
//! first ("شارع فهمي"). The convention is decided once per name by
//! [`StreetConvention::classify`] and passed explicitly from there on.

mod audit;
mod convention;
mod normalize;

pub use audit::{audit_document, is_street_name, street_type, StreetAudit};
pub use convention::{is_arabic, StreetConvention};
pub use normalize::{normalize_street_name, normalize_with_convention};
