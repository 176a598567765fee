//! Error types for loading translation files.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseError;
use crate::types::{LanguageError, LanguageId};

/// Errors that occur while loading translations into a container.
///
/// `origin` names where the content came from: a file path, or the
/// language for content added from a string.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a translation directory or file.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The content is not a YAML map of string keys.
    #[error("invalid YAML in '{origin}': {source}")]
    Yaml {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// A value that is neither a scalar nor null.
    #[error("value of '{key}' in '{origin}' must be a string")]
    InvalidValue { origin: String, key: String },

    /// A template that failed to parse.
    #[error("failed to parse '{key}' in '{origin}': {source}")]
    Parse {
        origin: String,
        key: String,
        template: String,
        #[source]
        source: ParseError,
    },

    /// A file name whose captured language is not a valid identifier.
    #[error("invalid language in file name '{}': {source}", file.display())]
    Language {
        file: PathBuf,
        #[source]
        source: LanguageError,
    },

    /// Two files in the directory resolve to the same language.
    #[error("duplicate translation file for '{language}': '{}'", file.display())]
    DuplicateLanguage { language: LanguageId, file: PathBuf },

    /// The file matcher accepted a name but captured no language.
    #[error("file pattern matched '{}' without capturing a language", file.display())]
    MissingCaptureGroup { file: PathBuf },
}
