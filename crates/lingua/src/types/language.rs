use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use icu_locale_core::LanguageIdentifier;
use regex::Regex;
use thiserror::Error;

/// Finds the first tag-like run in free-form input such as an
/// `Accept-Language` header.
static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-z]{2,8}(?:[-_][a-z]{4})?(?:[-_](?:[a-z]{2}|\d{3}))?")
        .expect("language tag pattern should compile")
});

/// An error parsing a [`LanguageId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    /// Nothing in the input looks like a language tag.
    #[error("no language tag found in '{input}'")]
    NotFound { input: String },

    /// The tag is not a valid `language[-region]` identifier.
    #[error("invalid language '{tag}'")]
    Invalid { tag: String },
}

/// A language with an optional region, e.g. `en` or `en-US`.
///
/// # Example
///
/// ```
/// use lingua::LanguageId;
///
/// let id = LanguageId::parse("en-GB,en;q=0.5").unwrap();
/// assert_eq!(id.language(), "en");
/// assert_eq!(id.region(), Some("GB"));
/// assert_eq!(id.to_string(), "en-GB");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LanguageId {
    language: String,
    region: Option<String>,
}

/// How closely two [`LanguageId`]s match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LanguageMatch {
    None,
    /// Same language, different or missing region.
    Language,
    /// Same language and region.
    Exact,
}

impl LanguageId {
    /// Parse the first language tag found in `raw`.
    ///
    /// Underscores are accepted as separators and script subtags are
    /// dropped. The language must be a two or three letter code.
    pub fn parse(raw: &str) -> Result<Self, LanguageError> {
        let tag = TAG_PATTERN
            .find(raw)
            .ok_or_else(|| LanguageError::NotFound {
                input: raw.to_string(),
            })?
            .as_str();

        let normalized = tag.replace('_', "-");
        let invalid = || LanguageError::Invalid {
            tag: tag.to_string(),
        };
        let identifier: LanguageIdentifier = normalized.parse().map_err(|_| invalid())?;

        let language = identifier.language.as_str();
        if !(2..=3).contains(&language.len()) || language == "und" {
            return Err(invalid());
        }

        Ok(Self {
            language: language.to_string(),
            region: identifier.region.map(|r| r.as_str().to_string()),
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn matches(&self, other: &LanguageId) -> LanguageMatch {
        if self.language != other.language {
            LanguageMatch::None
        } else if self.region == other.region {
            LanguageMatch::Exact
        } else {
            LanguageMatch::Language
        }
    }
}

impl FromStr for LanguageId {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => f.write_str(&self.language),
        }
    }
}
