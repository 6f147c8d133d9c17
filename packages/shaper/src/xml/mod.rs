//! XML boundary: DOM helpers and conversion into [`ParsedElement`].
//!
//! [`ParsedElement`]: crate::types::ParsedElement

mod utils;

pub use utils::{
    element_children, find_children, get_tag_name, has_tag, is_shapeable, parsed_element,
    shapeable_elements,
};
