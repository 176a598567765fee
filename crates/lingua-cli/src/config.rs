//! Settings from `lingua.toml` and command-line overrides.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lingua::interpreter::DEFAULT_FILE_PATTERN;
use lingua::{Container, LanguageError, LanguageId, LoadError, RegexMatcher};
use serde::Deserialize;
use thiserror::Error;
use toml::de::Error as TomlError;

/// Config file read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "lingua.toml";

/// Errors reading or applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config '{}': {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: TomlError,
    },

    #[error("invalid default language '{value}': {source}")]
    Language {
        value: String,
        #[source]
        source: LanguageError,
    },

    #[error("invalid file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Contents of `lingua.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Directory holding the translation files.
    pub dir: Option<PathBuf>,
    /// Language used when a request matches nothing loaded.
    pub default_language: Option<String>,
    /// Regex selecting translation files; the first capture group is the
    /// language.
    pub file_pattern: Option<String>,
}

impl FileConfig {
    /// Read the config at `path`, or `lingua.toml` if present.
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if !required && err.kind() == io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        toml::from_str(&content).map_err(|source| ConfigError::Toml { path, source })
    }
}

/// Values given on the command line, taking precedence over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub dir: Option<PathBuf>,
    pub default_language: Option<String>,
    pub file_pattern: Option<String>,
}

/// Resolved settings shared by every command.
#[derive(Debug)]
pub struct Settings {
    dir: Option<PathBuf>,
    default_language: Option<LanguageId>,
    matcher: RegexMatcher,
}

impl Settings {
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self, ConfigError> {
        let default_language = overrides
            .default_language
            .or(file.default_language)
            .map(|value| {
                LanguageId::parse(&value).map_err(|source| ConfigError::Language { value, source })
            })
            .transpose()?;

        let pattern = overrides
            .file_pattern
            .or(file.file_pattern)
            .unwrap_or_else(|| DEFAULT_FILE_PATTERN.to_string());
        let matcher = RegexMatcher::from_pattern(&pattern)
            .map_err(|source| ConfigError::Pattern { pattern, source })?;

        Ok(Self {
            dir: overrides.dir.or(file.dir),
            default_language,
            matcher,
        })
    }

    /// The configured directory, if any.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// The configured directory, or the working directory.
    pub fn dir_or_current(&self) -> &Path {
        self.dir().unwrap_or_else(|| Path::new("."))
    }

    /// Load the configured directory into a container.
    pub fn container(&self) -> Result<Container, LoadError> {
        let mut container = Container::builder()
            .maybe_default_language(self.default_language.clone())
            .matcher(Arc::new(self.matcher.clone()))
            .build();
        container.load_dir(self.dir_or_current())?;
        Ok(container)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_load_file_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lingua.toml");
        fs::write(
            &path,
            "dir = \"translations\"\ndefault_language = \"en-US\"\n",
        )
        .unwrap();

        let config = FileConfig::load(Some(&path)).unwrap();
        assert_eq!(config.dir, Some(PathBuf::from("translations")));
        assert_eq!(config.default_language.as_deref(), Some("en-US"));
        assert_eq!(config.file_pattern, None);
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = TempDir::new().unwrap();
        let err = FileConfig::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lingua.toml");
        fs::write(&path, "directory = \"x\"\n").unwrap();
        assert!(matches!(
            FileConfig::load(Some(&path)),
            Err(ConfigError::Toml { .. })
        ));
    }

    #[test]
    fn test_overrides_win() {
        let file = FileConfig {
            dir: Some(PathBuf::from("from-file")),
            default_language: Some("nl".to_string()),
            file_pattern: None,
        };
        let overrides = Overrides {
            dir: Some(PathBuf::from("from-flag")),
            default_language: None,
            file_pattern: None,
        };

        let settings = Settings::resolve(file, overrides).unwrap();
        assert_eq!(settings.dir(), Some(Path::new("from-flag")));
        assert_eq!(settings.default_language, Some(LanguageId::parse("nl").unwrap()));
        assert_eq!(settings.matcher.pattern(), DEFAULT_FILE_PATTERN);
    }

    #[test]
    fn test_invalid_settings() {
        let bad_language = Overrides {
            default_language: Some("1234".to_string()),
            ..Overrides::default()
        };
        assert!(matches!(
            Settings::resolve(FileConfig::default(), bad_language),
            Err(ConfigError::Language { .. })
        ));

        let bad_pattern = Overrides {
            file_pattern: Some("(".to_string()),
            ..Overrides::default()
        };
        assert!(matches!(
            Settings::resolve(FileConfig::default(), bad_pattern),
            Err(ConfigError::Pattern { .. })
        ));
    }

    #[test]
    fn test_container_from_settings() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("en.yaml"), "hello: Hello").unwrap();
        let overrides = Overrides {
            dir: Some(dir.path().to_path_buf()),
            default_language: Some("en".to_string()),
            file_pattern: None,
        };

        let container = Settings::resolve(FileConfig::default(), overrides)
            .unwrap()
            .container()
            .unwrap();
        let scope = container.scope(None);
        assert_eq!(scope.message("hello", &lingua::replacements! {}), "Hello");
    }
}
