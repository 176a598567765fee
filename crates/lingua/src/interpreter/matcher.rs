//! Selecting translation files in a directory.

use std::path::PathBuf;

use regex::Regex;

use crate::interpreter::error::LoadError;
use crate::types::LanguageId;

/// Matches `en.yaml` and `en-US.yaml`.
pub const DEFAULT_FILE_PATTERN: &str = r"^([a-z]{2}(?:-[A-Z]{2})?)\.yaml$";

/// Decides which files of a directory hold translations, and for which
/// language.
pub trait FileMatcher: Send + Sync {
    fn is_match(&self, name: &str) -> bool;

    /// The language a matching file name holds translations for.
    fn language_id(&self, name: &str) -> Result<LanguageId, LoadError>;
}

/// A [`FileMatcher`] taking the language from the first capture group.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    pattern: Regex,
}

impl RegexMatcher {
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }

    /// Compile `pattern` into a matcher.
    pub fn from_pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::new)
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for RegexMatcher {
    fn default() -> Self {
        Self::from_pattern(DEFAULT_FILE_PATTERN).expect("default file pattern should compile")
    }
}

impl FileMatcher for RegexMatcher {
    fn is_match(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }

    fn language_id(&self, name: &str) -> Result<LanguageId, LoadError> {
        let captured = self
            .pattern
            .captures(name)
            .and_then(|captures| captures.get(1))
            .ok_or_else(|| LoadError::MissingCaptureGroup {
                file: PathBuf::from(name),
            })?;

        LanguageId::parse(captured.as_str()).map_err(|source| LoadError::Language {
            file: PathBuf::from(name),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pattern() {
        let matcher = RegexMatcher::default();
        assert!(matcher.is_match("en.yaml"));
        assert!(matcher.is_match("en-US.yaml"));
        assert!(!matcher.is_match("en.yml"));
        assert!(!matcher.is_match("en-us.yaml"));
        assert!(!matcher.is_match("english.yaml"));
        assert!(!matcher.is_match("backup-en.yaml"));
    }

    #[test]
    fn test_language_from_capture() {
        let matcher = RegexMatcher::default();
        assert_eq!(matcher.language_id("nl-BE.yaml").unwrap().to_string(), "nl-BE");
    }

    #[test]
    fn test_missing_capture_group() {
        let matcher = RegexMatcher::from_pattern(r"^[a-z]{2}\.yaml$").unwrap();
        assert!(matches!(
            matcher.language_id("en.yaml"),
            Err(LoadError::MissingCaptureGroup { .. })
        ));
    }

    #[test]
    fn test_invalid_language_in_capture() {
        let matcher = RegexMatcher::from_pattern(r"^(\w+)\.yml$").unwrap();
        assert!(matches!(
            matcher.language_id("messages.yml"),
            Err(LoadError::Language { .. })
        ));
    }
}
