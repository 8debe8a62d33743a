//! URL-safe slug for country names
//!
//! The detail view is addressed by the percent-encoded common name
//! (e.g., "Côte d'Ivoire" ↔ "C%C3%B4te%20d%27Ivoire").

use thiserror::Error;

/// Error type for slugs that cannot be decoded into a country name
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug cannot be empty")]
    Empty,

    #[error("slug does not decode to valid UTF-8")]
    InvalidUtf8,
}

/// Percent-encode a common name for use as a path segment
pub fn encode_name(common: &str) -> String {
    urlencoding::encode(common).into_owned()
}

/// Decode a path segment back into the common name
pub fn decode_name(slug: &str) -> Result<String, SlugError> {
    if slug.is_empty() {
        return Err(SlugError::Empty);
    }
    urlencoding::decode(slug)
        .map(|name| name.into_owned())
        .map_err(|_| SlugError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_is_unchanged() {
        assert_eq!(encode_name("France"), "France");
        assert_eq!(decode_name("France").unwrap(), "France");
    }

    #[test]
    fn test_spaces_and_punctuation() {
        let slug = encode_name("Bosnia and Herzegovina");
        assert_eq!(slug, "Bosnia%20and%20Herzegovina");
        assert!(!slug.contains(' '));

        let slug = encode_name("Guinea-Bissau");
        assert_eq!(slug, "Guinea-Bissau");
    }

    #[test]
    fn test_roundtrip_non_ascii() {
        for name in ["Côte d'Ivoire", "Åland Islands", "São Tomé and Príncipe", "Curaçao"] {
            let slug = encode_name(name);
            assert!(slug.is_ascii(), "{slug} should be ASCII");
            assert_eq!(decode_name(&slug).unwrap(), name);
        }
    }

    #[test]
    fn test_plus_is_literal() {
        // '+' is not a space in path segments
        assert_eq!(decode_name("a+b").unwrap(), "a+b");
    }

    #[test]
    fn test_invalid_slugs() {
        assert_eq!(decode_name("").unwrap_err(), SlugError::Empty);
        assert_eq!(decode_name("%FF%FE").unwrap_err(), SlugError::InvalidUtf8);
    }
}
