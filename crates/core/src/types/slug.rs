//! Lookup-dimension slug type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// The input string is empty (after trimming).
    #[error("slug cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[a-z0-9._~-]`.
    #[error("slug contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A stable, URL-safe identifier for a lookup value (e.g. `red`, `men`,
/// `running-shoes`), distinct from its display label.
///
/// ## Constraints
///
/// - Length: 1-64 characters
/// - ASCII letters (stored lower-cased), digits and the unreserved URL
///   punctuation `-`, `_`, `.`, `~`
///
/// Parsing trims surrounding whitespace and lower-cases the input, so
/// `Slug::parse(" Red ")` and `Slug::parse("red")` are equal.
///
/// ## Examples
///
/// ```
/// use stride_core::Slug;
///
/// assert_eq!(Slug::parse("Running-Shoes").unwrap().as_str(), "running-shoes");
/// assert!(Slug::parse("10.5").is_ok());
///
/// assert!(Slug::parse("").is_err());
/// assert!(Slug::parse("red; drop table").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Maximum length of a slug.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `Slug` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than
    /// [`Self::MAX_LENGTH`], or contains characters other than ASCII
    /// alphanumerics, `-`, `_`, `.` and `~`.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(SlugError::Empty);
        }

        if trimmed.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~')))
        {
            return Err(SlugError::InvalidCharacter(bad));
        }

        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the slug with its first character upper-cased, for labels
    /// such as filter badges (`men` becomes `Men`).
    #[must_use]
    pub fn capitalized(&self) -> String {
        let mut chars = self.0.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_ascii_uppercase().to_string() + chars.as_str()
        })
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Slug {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Slug {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Slugs are written by the seed/admin tooling; keep them verbatim
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Slug {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_slugs() {
        assert!(Slug::parse("men").is_ok());
        assert!(Slug::parse("running-shoes").is_ok());
        assert!(Slug::parse("summer_25").is_ok());
        assert!(Slug::parse("12").is_ok());
    }

    #[test]
    fn test_parse_unreserved_punctuation() {
        assert_eq!(Slug::parse("10.5").unwrap().as_str(), "10.5");
        assert_eq!(Slug::parse("US~9").unwrap().as_str(), "us~9");
        assert!(Slug::parse("10,5").is_err());
    }

    #[test]
    fn test_parse_lowercases_and_trims() {
        assert_eq!(Slug::parse("  RED ").unwrap().as_str(), "red");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Slug::parse(""), Err(SlugError::Empty));
        assert_eq!(Slug::parse("   "), Err(SlugError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(Slug::MAX_LENGTH + 1);
        assert!(matches!(Slug::parse(&long), Err(SlugError::TooLong { .. })));
        assert!(Slug::parse(&"a".repeat(Slug::MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_parse_invalid_character() {
        assert_eq!(
            Slug::parse("red'"),
            Err(SlugError::InvalidCharacter('\''))
        );
        assert!(Slug::parse("a b").is_err());
        assert!(Slug::parse("%").is_err());
    }

    #[test]
    fn test_capitalized() {
        assert_eq!(Slug::parse("women").unwrap().capitalized(), "Women");
        assert_eq!(Slug::parse("9").unwrap().capitalized(), "9");
    }

    #[test]
    fn test_serde_roundtrip() {
        let slug = Slug::parse("lifestyle").unwrap();
        let json = serde_json::to_string(&slug).unwrap();
        assert_eq!(json, "\"lifestyle\"");

        let parsed: Slug = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, slug);
    }
}
