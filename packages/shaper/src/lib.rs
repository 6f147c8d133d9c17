//! osmclean - Clean OpenStreetMap XML exports into document-store records.
//!
//! Every `node` and `way` element of an OSM XML export is shaped into a
//! compact record: provenance attributes are grouped under `created`,
//! coordinates become `pos`, `addr:*` tags become an `address` object with
//! a normalized street name, and `nd` references become `node_refs`.
//!
//! # Example
//!
//! ```
//! use osmclean_shaper::config::StreetTables;
//! use osmclean_shaper::shaper::shape_element;
//! use osmclean_shaper::types::ParsedElement;
//!
//! let tables = StreetTables::default();
//! let node = ParsedElement::new("node")
//!     .with_attribute("id", "1")
//!     .with_child(
//!         ParsedElement::new("tag")
//!             .with_attribute("k", "addr:street")
//!             .with_attribute("v", "Main St"),
//!     );
//!
//! let record = shape_element(&node, &tables).unwrap().unwrap();
//! assert_eq!(record.address["street"], "Main Street");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, key patterns and street tables
//! - [`types`]: Parsed elements and shaped records
//! - [`error`]: Error types and Result alias
//! - [`xml`]: DOM helpers and conversion into parsed elements
//! - [`street`]: Street naming conventions, normalization and audit
//! - [`shaper`]: Per-element record shaping
//! - [`stats`]: Tag counts and key classification
//! - [`convert`]: Document conversion into JSON lines
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod shaper;
pub mod stats;
pub mod street;
pub mod types;
pub mod xml;

// Re-export main functions
pub use convert::process_map;
pub use shaper::shape_element;
pub use street::{normalize_street_name, StreetAudit, StreetConvention};

// Re-export commonly used items
pub use config::StreetTables;
pub use error::{Result, ShaperError};
pub use types::{ElementKind, ParsedElement, ShapedRecord};
