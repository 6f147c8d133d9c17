//! Street naming convention classification.

/// Where a street name carries its type token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreetConvention {
    /// Type token trails the name, e.g. "Main St".
    Suffix,
    /// Type token leads the name, e.g. "شارع فهمي".
    Prefix,
}

impl StreetConvention {
    /// Classify a street name by script.
    ///
    /// Any character from the Arabic blocks makes the name prefix-style;
    /// everything else (including the empty string) is suffix-style.
    ///
    /// # Examples
    /// ```
    /// use osmclean_shaper::street::StreetConvention;
    ///
    /// assert_eq!(StreetConvention::classify("Main St"), StreetConvention::Suffix);
    /// assert_eq!(StreetConvention::classify("شارع فهمي"), StreetConvention::Prefix);
    /// ```
    #[must_use]
    pub fn classify(name: &str) -> Self {
        if name.chars().any(is_arabic) {
            Self::Prefix
        } else {
            Self::Suffix
        }
    }
}

/// Whether `c` belongs to one of the Arabic script blocks.
#[must_use]
pub fn is_arabic(c: char) -> bool {
    matches!(
        c,
        '\u{0600}'..='\u{06FF}'
            | '\u{0750}'..='\u{077F}'
            | '\u{08A0}'..='\u{08FF}'
            | '\u{FB50}'..='\u{FDFF}'
            | '\u{FE70}'..='\u{FEFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_names_are_suffix_style() {
        assert_eq!(StreetConvention::classify("North Lincoln Ave"), StreetConvention::Suffix);
        assert_eq!(StreetConvention::classify("Rue Élysée"), StreetConvention::Suffix);
        assert_eq!(StreetConvention::classify("26th of July Corridor"), StreetConvention::Suffix);
        assert_eq!(StreetConvention::classify(""), StreetConvention::Suffix);
    }

    #[test]
    fn test_arabic_names_are_prefix_style() {
        assert_eq!(StreetConvention::classify("ميدان التحرير"), StreetConvention::Prefix);
        assert_eq!(StreetConvention::classify("فهمي"), StreetConvention::Prefix);
    }

    #[test]
    fn test_mixed_script_is_prefix_style() {
        assert_eq!(StreetConvention::classify("شارع 9"), StreetConvention::Prefix);
        assert_eq!(StreetConvention::classify("Road 9 طريق"), StreetConvention::Prefix);
    }

    #[test]
    fn test_is_arabic_presentation_forms() {
        assert!(is_arabic('\u{FEFB}'));
        assert!(is_arabic('ش'));
        assert!(!is_arabic('S'));
        assert!(!is_arabic('é'));
    }
}
