//! Per-language message storage and lookup.
//!
//! A [`Container`] holds the parsed messages of every loaded language.
//! Lookups resolve a requested language to a loaded scope, falling back to a
//! language-only match and then to the default language, and render the
//! message with that scope available to `replace`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::hash::BuildHasher;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bon::Builder;
use serde_yaml::Value as YamlValue;
use tracing::{debug, trace};

use crate::interpreter::error::LoadError;
use crate::interpreter::matcher::{FileMatcher, RegexMatcher};
use crate::interpreter::render::{MessageLookup, render};
use crate::parser::ast::Message;
use crate::parser::parse_message;
use crate::types::{LanguageId, LanguageMatch, Value, format_replacements};

/// Messages of one language, keyed by message key.
pub type Messages = BTreeMap<String, Message>;

/// How [`Container::merge`] treats keys present on both sides, and keys
/// only present in the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// Keep existing messages, add new ones, then drop messages the source
    /// does not have.
    #[default]
    SkipAndClean,
    /// Keep existing messages and add new ones.
    Skip,
    /// Replace existing messages and add new ones.
    Overwrite,
    /// Replace existing messages, add new ones, then drop messages the
    /// source does not have.
    OverwriteAndClean,
}

impl MergeStrategy {
    fn skips_existing(self) -> bool {
        matches!(self, MergeStrategy::Skip | MergeStrategy::SkipAndClean)
    }

    fn cleans(self) -> bool {
        matches!(
            self,
            MergeStrategy::SkipAndClean | MergeStrategy::OverwriteAndClean
        )
    }
}

/// Translation messages for a set of languages.
///
/// # Example
///
/// ```
/// use lingua::{Container, LanguageId, replacements};
///
/// let en: LanguageId = "en".parse().unwrap();
/// let mut container = Container::builder().default_language(en.clone()).build();
/// container
///     .add_yaml(en, "greeting: \"Hello :name|capitalize\"")
///     .unwrap();
///
/// let nl_be: LanguageId = "nl-BE".parse().unwrap();
/// let text = container.message(Some(&nl_be), "greeting", &replacements! { "name" => "ada" });
/// assert_eq!(text, "Hello Ada");
/// ```
#[derive(Clone, Builder)]
pub struct Container {
    /// Language used when none is requested or nothing loaded matches.
    default_language: Option<LanguageId>,

    /// Selects translation files in [`Container::load_dir`].
    #[builder(default = default_matcher())]
    matcher: Arc<dyn FileMatcher>,

    #[builder(skip)]
    messages: BTreeMap<LanguageId, Messages>,

    /// Files languages were loaded from. Only populated by `load_dir`.
    #[builder(skip)]
    files: BTreeMap<LanguageId, PathBuf>,
}

fn default_matcher() -> Arc<dyn FileMatcher> {
    Arc::new(RegexMatcher::default())
}

impl Default for Container {
    fn default() -> Self {
        Container::builder().build()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("default_language", &self.default_language)
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}

impl Container {
    /// Create a container with the default file matcher and load `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let mut container = Self::default();
        container.load_dir(dir)?;
        Ok(container)
    }

    pub fn default_language(&self) -> Option<&LanguageId> {
        self.default_language.as_ref()
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load every translation file in `dir` accepted by the matcher.
    ///
    /// Subdirectories are not visited. Each file replaces the messages of its
    /// language. Returns the number of messages loaded. On error the
    /// container is left unchanged.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize, LoadError> {
        let dir = dir.as_ref();
        let dir_error = |source: io::Error| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(dir).map_err(dir_error)? {
            let path = entry.map_err(dir_error)?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();

        let mut files: BTreeMap<LanguageId, PathBuf> = BTreeMap::new();
        for name in names.iter().filter(|name| self.matcher.is_match(name)) {
            let language = self.matcher.language_id(name)?;
            if files.contains_key(&language) {
                return Err(LoadError::DuplicateLanguage {
                    language,
                    file: dir.join(name),
                });
            }
            files.insert(language, dir.join(name));
        }

        let mut loaded: BTreeMap<LanguageId, (PathBuf, Messages)> = BTreeMap::new();
        for (language, path) in files {
            let content = fs::read_to_string(&path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
            let messages = parse_yaml(&path.display().to_string(), &content)?;
            debug!(
                path = %path.display(),
                %language,
                messages = messages.len(),
                "loaded translation file"
            );
            loaded.insert(language, (path, messages));
        }

        let mut count = 0;
        for (language, (path, messages)) in loaded {
            count += messages.len();
            self.messages.insert(language.clone(), messages);
            self.files.insert(language, path);
        }
        Ok(count)
    }

    /// Replace the messages of `language` with the YAML map in `content`.
    ///
    /// Returns the number of messages loaded. On error the container is left
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Fails when `content` is not a map of string keys to scalar values, or
    /// when a template does not parse.
    pub fn add_yaml(&mut self, language: LanguageId, content: &str) -> Result<usize, LoadError> {
        let messages = parse_yaml(&language.to_string(), content)?;
        let count = messages.len();
        debug!(%language, messages = count, "loaded translations");
        self.files.remove(&language);
        self.messages.insert(language, messages);
        Ok(count)
    }

    /// Add or replace one message, returning the previous one.
    pub fn insert(
        &mut self,
        language: LanguageId,
        key: impl Into<String>,
        message: Message,
    ) -> Option<Message> {
        self.messages
            .entry(language)
            .or_default()
            .insert(key.into(), message)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Resolve the requested language, or the default one, to a loaded
    /// language.
    ///
    /// An exact match wins, then the first loaded language sharing the
    /// language subtag, then the default language. Returns `None` when
    /// nothing is requested and there is no default.
    pub fn scoped_language(&self, requested: Option<&LanguageId>) -> Option<LanguageId> {
        let wanted = requested.or(self.default_language.as_ref())?;

        let mut language_match = None;
        for loaded in self.messages.keys() {
            match loaded.matches(wanted) {
                LanguageMatch::Exact => return Some(loaded.clone()),
                LanguageMatch::Language => {
                    language_match.get_or_insert(loaded);
                }
                LanguageMatch::None => {}
            }
        }

        if let Some(found) = language_match {
            debug!(requested = %wanted, resolved = %found, "resolved language by subtag");
            return Some(found.clone());
        }

        if let Some(default) = &self.default_language {
            debug!(requested = %wanted, %default, "falling back to default language");
        }
        self.default_language.clone()
    }

    /// Render `key` in the resolved language.
    ///
    /// Returns `key` itself when no language resolves or the language has no
    /// such message.
    pub fn message<S: BuildHasher>(
        &self,
        requested: Option<&LanguageId>,
        key: &str,
        replacements: &HashMap<String, Value, S>,
    ) -> String {
        let scope = self
            .scoped_language(requested)
            .and_then(|language| self.messages.get(&language));
        let Some(scope) = scope else {
            return key.to_string();
        };
        let Some(message) = scope.get(key) else {
            return key.to_string();
        };

        render(message, &format_replacements(replacements), Some(scope))
    }

    /// A handle bound to a requested language.
    pub fn scope(&self, requested: Option<LanguageId>) -> Scope<'_> {
        Scope {
            container: self,
            requested,
        }
    }

    /// Like [`Container::scope`], parsing `raw` as a language. Unparsable
    /// input requests nothing, so lookups use the default language.
    pub fn scope_str(&self, raw: &str) -> Scope<'_> {
        self.scope(LanguageId::parse(raw).ok())
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Every message written back as template source.
    pub fn raw(&self) -> BTreeMap<LanguageId, BTreeMap<String, String>> {
        self.messages
            .iter()
            .map(|(language, messages)| {
                let raw = messages
                    .iter()
                    .map(|(key, message)| (key.clone(), message.to_string()))
                    .collect();
                (language.clone(), raw)
            })
            .collect()
    }

    pub fn messages(&self, language: &LanguageId) -> Option<&Messages> {
        self.messages.get(language)
    }

    /// The file `language` was loaded from, if it came from `load_dir`.
    pub fn file(&self, language: &LanguageId) -> Option<&Path> {
        self.files.get(language).map(PathBuf::as_path)
    }

    /// Loaded languages in sorted order.
    pub fn languages(&self) -> impl Iterator<Item = &LanguageId> {
        self.messages.keys()
    }

    // =========================================================================
    // Merging
    // =========================================================================

    /// Merge the messages of `from` into `to`.
    pub fn merge(from: &Container, to: &mut Container, strategy: MergeStrategy) {
        let mut added = 0;
        for (language, messages) in &from.messages {
            for (key, message) in messages {
                let exists = to
                    .messages
                    .get(language)
                    .is_some_and(|scope| scope.contains_key(key));
                if exists && strategy.skips_existing() {
                    continue;
                }
                to.messages
                    .entry(language.clone())
                    .or_default()
                    .insert(key.clone(), message.clone());
                added += 1;
            }
        }

        let mut removed = 0;
        if strategy.cleans() {
            for (language, scope) in &mut to.messages {
                let before = scope.len();
                match from.messages.get(language) {
                    Some(source) => scope.retain(|key, _| source.contains_key(key)),
                    None => scope.clear(),
                }
                removed += before - scope.len();
            }
        }

        debug!(?strategy, added, removed, "merged containers");
    }
}

/// A [`Container`] bound to a requested language.
///
/// The language is resolved on every lookup, so it follows the container's
/// fallback rules.
#[derive(Debug, Clone)]
pub struct Scope<'c> {
    container: &'c Container,
    requested: Option<LanguageId>,
}

impl Scope<'_> {
    /// The language lookups resolve to.
    pub fn language(&self) -> Option<LanguageId> {
        self.container.scoped_language(self.requested.as_ref())
    }

    pub fn message<S: BuildHasher>(
        &self,
        key: &str,
        replacements: &HashMap<String, Value, S>,
    ) -> String {
        self.container
            .message(self.requested.as_ref(), key, replacements)
    }
}

impl MessageLookup for Scope<'_> {
    fn lookup(&self, key: &str) -> Option<&Message> {
        let language = self.language()?;
        self.container.messages.get(&language)?.get(key)
    }
}

/// Decode a YAML map of templates and parse each one.
fn parse_yaml(origin: &str, content: &str) -> Result<Messages, LoadError> {
    let decoded: Option<BTreeMap<String, YamlValue>> = if content.trim().is_empty() {
        None
    } else {
        serde_yaml::from_str(content).map_err(|source| LoadError::Yaml {
            origin: origin.to_string(),
            source,
        })?
    };

    let mut messages = Messages::new();
    for (key, value) in decoded.unwrap_or_default() {
        let Some(template) = scalar_text(&value) else {
            return Err(LoadError::InvalidValue {
                origin: origin.to_string(),
                key,
            });
        };
        trace!(origin, %key, "parsing message");
        let message = parse_message(&template).map_err(|source| LoadError::Parse {
            origin: origin.to_string(),
            key: key.clone(),
            template: template.clone(),
            source,
        })?;
        messages.insert(key, message);
    }

    Ok(messages)
}

/// The text of a scalar YAML value; null is the empty template.
fn scalar_text(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::Null => Some(String::new()),
        YamlValue::String(text) => Some(text.clone()),
        YamlValue::Bool(flag) => Some(flag.to_string()),
        YamlValue::Number(number) => Some(number.to_string()),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) | YamlValue::Tagged(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> LanguageId {
        LanguageId::parse(raw).unwrap()
    }

    #[test]
    fn test_parse_yaml_null_is_empty_template() {
        let messages = parse_yaml("test", "empty:\nfilled: text").unwrap();
        assert!(messages["empty"].is_empty());
        assert_eq!(messages["filled"], Message::literal("text"));
    }

    #[test]
    fn test_parse_yaml_scalars_become_text() {
        let messages = parse_yaml("test", "count: 3\nflag: true").unwrap();
        assert_eq!(messages["count"], Message::literal("3"));
        assert_eq!(messages["flag"], Message::literal("true"));
    }

    #[test]
    fn test_parse_yaml_rejects_nested_map() {
        let err = parse_yaml("test", "nested:\n  key: value").unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { key, .. } if key == "nested"));
    }

    #[test]
    fn test_parse_yaml_comment_only_is_empty() {
        assert!(parse_yaml("test", "# nothing yet\n").unwrap().is_empty());
        assert!(parse_yaml("test", "").unwrap().is_empty());
    }

    #[test]
    fn test_scoped_language_prefers_first_sorted_subtag_match() {
        let mut container = Container::default();
        container.insert(id("en-US"), "k", Message::literal("us"));
        container.insert(id("en-GB"), "k", Message::literal("gb"));
        assert_eq!(container.scoped_language(Some(&id("en"))), Some(id("en-GB")));
    }

    #[test]
    fn test_merge_strategy_flags() {
        assert!(MergeStrategy::Skip.skips_existing());
        assert!(!MergeStrategy::Skip.cleans());
        assert!(MergeStrategy::OverwriteAndClean.cleans());
        assert!(!MergeStrategy::Overwrite.skips_existing());
        assert_eq!(MergeStrategy::default(), MergeStrategy::SkipAndClean);
    }
}
