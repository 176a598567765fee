//! Sync command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use lingua::interpreter::Messages;
use lingua::{Container, LanguageId, Message, MergeStrategy};
use miette::{miette, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::output::load_error_report;

/// Arguments for the sync command.
#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Language whose keys every other language should have (e.g., en).
    #[arg(long)]
    pub source: String,

    /// Directory with translation files.
    #[arg(env = "LINGUA_DIR")]
    pub dir: Option<PathBuf>,

    /// Also remove keys the source language does not have.
    #[arg(long)]
    pub remove: bool,
}

/// Keys added to and removed from one language.
#[derive(Debug, PartialEq, Eq)]
struct SyncChange {
    language: LanguageId,
    added: Vec<String>,
    removed: Vec<String>,
}

/// Give every language the keys of `source`, with empty templates for new
/// keys. With `remove`, keys the source lacks are dropped.
fn sync_languages(
    container: &mut Container,
    source: &LanguageId,
    remove: bool,
) -> Result<Vec<SyncChange>> {
    let source_messages = container
        .messages(source)
        .ok_or_else(|| miette!("Source language '{source}' is not loaded"))?
        .clone();
    let before = container.raw();

    let mut keys = Container::default();
    for language in before.keys() {
        for (key, message) in &source_messages {
            let message = if language == source {
                message.clone()
            } else {
                Message::default()
            };
            keys.insert(language.clone(), key.clone(), message);
        }
    }

    let strategy = if remove {
        MergeStrategy::SkipAndClean
    } else {
        MergeStrategy::Skip
    };
    Container::merge(&keys, container, strategy);

    let changes = before
        .into_iter()
        .map(|(language, old)| {
            let new = container.messages(&language);
            let added = new
                .into_iter()
                .flat_map(Messages::keys)
                .filter(|key| !old.contains_key(*key))
                .cloned()
                .collect();
            let removed = old
                .keys()
                .filter(|key| new.is_none_or(|messages| !messages.contains_key(*key)))
                .cloned()
                .collect();
            SyncChange {
                language,
                added,
                removed,
            }
        })
        .collect();
    Ok(changes)
}

/// Write messages as a YAML map in key order, templates double-quoted.
fn render_yaml(messages: &Messages) -> Result<String> {
    let mut out = String::new();
    for (key, message) in messages {
        let value = serde_json::to_string(&message.to_string()).into_diagnostic()?;
        out.push_str(&yaml_key(key).into_diagnostic()?);
        out.push_str(": ");
        out.push_str(&value);
        out.push('\n');
    }
    Ok(out)
}

/// A key as YAML writes it, quoted when a plain scalar would read back as
/// something other than the same string.
fn yaml_key(key: &str) -> serde_yaml::Result<String> {
    Ok(serde_yaml::to_string(key)?.trim_end().to_string())
}

fn write_language(path: &Path, messages: &Messages) -> Result<()> {
    let content = render_yaml(messages)?;
    fs::write(path, content)
        .into_diagnostic()
        .map_err(|e| miette!("Failed to write {}: {e}", path.display()))
}

/// Run the sync command.
pub fn run_sync(args: SyncArgs, settings: &Settings) -> Result<i32> {
    let source = LanguageId::parse(&args.source).map_err(|e| miette!("Invalid --source: {e}"))?;
    let mut container = settings.container().map_err(load_error_report)?;
    let changes = sync_languages(&mut container, &source, args.remove)?;

    for change in &changes {
        let Some(path) = container.file(&change.language) else {
            warn!(language = %change.language, "no file recorded, skipping");
            continue;
        };
        let empty = Messages::new();
        let messages = container.messages(&change.language).unwrap_or(&empty);
        write_language(path, messages)?;
        debug!(path = %path.display(), keys = messages.len(), "wrote translation file");

        if change.added.is_empty() && change.removed.is_empty() {
            println!("  {} {}", change.language.bold(), "unchanged".dimmed());
        } else {
            println!(
                "  {} {} {}",
                change.language.bold(),
                format!("+{}", change.added.len()).green(),
                format!("-{}", change.removed.len()).red()
            );
        }
    }

    let added: usize = changes.iter().map(|c| c.added.len()).sum();
    let removed: usize = changes.iter().map(|c| c.removed.len()).sum();
    println!(
        "{} {} keys added, {} removed in {}",
        "✓".green(),
        added,
        removed,
        settings.dir_or_current().display()
    );
    Ok(exitcode::OK)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn container() -> Container {
        let mut container = Container::default();
        container
            .add_yaml("en".parse().unwrap(), "hello: Hello\nbye: Bye :name")
            .unwrap();
        container
            .add_yaml("nl".parse().unwrap(), "hello: Hallo\nold: Oud")
            .unwrap();
        container
    }

    #[test]
    fn test_sync_adds_missing_keys() {
        let mut container = container();
        let en: LanguageId = "en".parse().unwrap();
        let nl: LanguageId = "nl".parse().unwrap();

        let changes = sync_languages(&mut container, &en, false).unwrap();
        assert_eq!(changes.len(), 2);
        assert!(changes[0].added.is_empty());
        assert_eq!(changes[1].added, vec!["bye"]);
        assert!(changes[1].removed.is_empty());

        let nl_messages = container.messages(&nl).unwrap();
        assert!(nl_messages["bye"].is_empty());
        assert_eq!(nl_messages["hello"].to_string(), "Hallo");
        assert!(nl_messages.contains_key("old"));
    }

    #[test]
    fn test_sync_remove_drops_extra_keys() {
        let mut container = container();
        let en: LanguageId = "en".parse().unwrap();
        let nl: LanguageId = "nl".parse().unwrap();

        let changes = sync_languages(&mut container, &en, true).unwrap();
        assert_eq!(changes[1].removed, vec!["old"]);
        assert!(!container.messages(&nl).unwrap().contains_key("old"));
        assert_eq!(container.messages(&en).unwrap().len(), 2);
    }

    #[test]
    fn test_sync_unknown_source() {
        let mut container = container();
        assert!(sync_languages(&mut container, &"fr".parse().unwrap(), false).is_err());
    }

    #[test]
    fn test_yaml_keys() {
        assert_eq!(yaml_key("errors.required").unwrap(), "errors.required");
        for key in ["~", "null", "0o7", "a: b", ""] {
            assert_ne!(yaml_key(key).unwrap(), key, "{key:?} should be quoted");
        }
    }

    #[test]
    fn test_written_file_loads_back() {
        let dir = TempDir::new().unwrap();
        let mut source = Container::default();
        let en: LanguageId = "en".parse().unwrap();
        source
            .add_yaml(
                en.clone(),
                "apples: \":n|plural(=1 {one apple} other {# apples})\"\n\
                 ratio: \"10\\\\:1\"\n\
                 empty: \"\"\n\
                 \"true\": \"Yes\"\n\
                 \"~\": Tilde\n\
                 \"0o7\": Octal\n\
                 \"null\": Nothing\n\
                 \"a: b\": Colon",
            )
            .unwrap();

        let path = dir.path().join("en.yaml");
        write_language(&path, source.messages(&en).unwrap()).unwrap();

        let reloaded = Container::from_dir(dir.path()).unwrap();
        assert_eq!(reloaded.raw(), source.raw());
        assert_eq!(reloaded.file(&en), Some(path.as_path()));
    }
}
