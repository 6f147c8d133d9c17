//! Street name normalization.

use crate::config::StreetTables;

use super::convention::StreetConvention;

/// Normalize a street name into its canonical form.
///
/// Suffix-style names get their trailing abbreviation expanded; prefix-style
/// names that do not start with a known street type get the street word
/// prepended.
///
/// # Examples
/// ```
/// use osmclean_shaper::config::StreetTables;
/// use osmclean_shaper::street::normalize_street_name;
///
/// let tables = StreetTables::default();
/// assert_eq!(normalize_street_name("North Lincoln Ave", &tables), "North Lincoln Avenue");
/// assert_eq!(normalize_street_name("فهمي", &tables), "شارع فهمي");
/// ```
pub fn normalize_street_name(name: &str, tables: &StreetTables) -> String {
    normalize_with_convention(name, StreetConvention::classify(name), tables)
}

/// Normalize a street name whose convention is already known.
pub fn normalize_with_convention(
    name: &str,
    convention: StreetConvention,
    tables: &StreetTables,
) -> String {
    match convention {
        StreetConvention::Suffix => expand_abbreviations(name, tables),
        StreetConvention::Prefix => prepend_street_word(name, tables),
    }
}

/// Expand a trailing abbreviation.
///
/// Once an abbreviation matches at the end of the name, every occurrence of
/// it in the name is replaced, not just the trailing one: "Stanley St"
/// becomes "Streetanley Street". Existing output depends on this.
fn expand_abbreviations(name: &str, tables: &StreetTables) -> String {
    let mut name = name.to_string();
    for abbreviation in tables.abbreviations() {
        if name.ends_with(&abbreviation.from) {
            name = name.replace(&abbreviation.from, &abbreviation.to);
        }
    }
    name
}

fn prepend_street_word(name: &str, tables: &StreetTables) -> String {
    let leading = name.split(char::is_whitespace).next().unwrap_or_default();
    if tables.is_expected(leading) {
        name.to_string()
    } else {
        format!("{} {name}", tables.street_word())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn normalize(name: &str) -> String {
        normalize_street_name(name, &StreetTables::default())
    }

    #[test]
    fn test_expands_each_default_abbreviation() {
        assert_eq!(normalize("Main St"), "Main Street");
        assert_eq!(normalize("Main St."), "Main Street");
        assert_eq!(normalize("Ring Rd"), "Ring Road");
        assert_eq!(normalize("Ring Rd."), "Ring Road");
        assert_eq!(normalize("North Lincoln Ave"), "North Lincoln Avenue");
    }

    #[test]
    fn test_suffix_normalization_is_idempotent() {
        for name in ["Main St", "Main St.", "Ring Rd.", "North Lincoln Ave", "Corniche"] {
            let once = normalize(name);
            assert_eq!(normalize(&once), once, "not idempotent for {name}");
        }
    }

    #[test]
    fn test_abbreviation_mid_string_without_trailing_match_is_kept() {
        assert_eq!(normalize("St Mark Square"), "St Mark Square");
        assert_eq!(normalize("Ave Maria Lane"), "Ave Maria Lane");
    }

    #[test]
    fn test_trailing_match_replaces_every_occurrence() {
        assert_eq!(normalize("Stanley St"), "Streetanley Street");
        assert_eq!(normalize("St Mark St"), "Street Mark Street");
    }

    #[test]
    fn test_suffix_match_is_case_sensitive() {
        assert_eq!(normalize("Main ST"), "Main ST");
        assert_eq!(normalize("Forest"), "Forest");
    }

    #[test]
    fn test_prefix_without_street_type_gets_street_word() {
        assert_eq!(normalize("فهمي"), "شارع فهمي");
        assert_eq!(normalize("محمد فريد"), "شارع محمد فريد");
    }

    #[test]
    fn test_prefix_with_street_type_is_unchanged() {
        for name in ["شارع فهمي", "ميدان التحرير", "كورنيش النيل", "المحور المركزي"] {
            assert_eq!(normalize(name), name);
        }
    }

    #[test]
    fn test_prefix_normalization_is_idempotent() {
        let once = normalize("فهمي");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_prefix_splits_on_any_whitespace() {
        assert_eq!(normalize("شارع\tفهمي"), "شارع\tفهمي");
    }

    #[test]
    fn test_explicit_convention_overrides_classification() {
        let tables = StreetTables::default();
        assert_eq!(
            normalize_with_convention("Tahrir", StreetConvention::Prefix, &tables),
            "شارع Tahrir"
        );
        assert_eq!(
            normalize_with_convention("فهمي", StreetConvention::Suffix, &tables),
            "فهمي"
        );
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(normalize(""), "");
    }
}
