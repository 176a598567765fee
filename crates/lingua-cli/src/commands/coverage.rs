//! Coverage command implementation.

use std::path::PathBuf;

use clap::Args;
use lingua::interpreter::Messages;
use lingua::{Container, LanguageId, Message};
use miette::{miette, IntoDiagnostic, Result};

use crate::config::Settings;
use crate::output::load_error_report;
use crate::output::table::{format_coverage_table, LanguageCoverage};

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Source language every other language is compared against (e.g., en).
    #[arg(long)]
    pub source: String,

    /// Directory with translation files.
    #[arg(env = "LINGUA_DIR")]
    pub dir: Option<PathBuf>,

    /// Exit with non-zero code if any translation is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Compare every loaded language against `source`.
///
/// A key counts as translated when it is present and its template is not
/// empty.
fn compute_coverage(container: &Container, source: &LanguageId) -> Result<Vec<LanguageCoverage>> {
    let source_messages = container
        .messages(source)
        .ok_or_else(|| miette!("Source language '{source}' is not loaded"))?;
    let total = source_messages.len();

    let coverage = container
        .languages()
        .filter(|language| *language != source)
        .map(|language| {
            let empty = Messages::new();
            let messages = container.messages(language).unwrap_or(&empty);
            let missing: Vec<String> = source_messages
                .keys()
                .filter(|key| messages.get(*key).is_none_or(Message::is_empty))
                .cloned()
                .collect();
            let extra: Vec<String> = messages
                .keys()
                .filter(|key| !source_messages.contains_key(*key))
                .cloned()
                .collect();
            LanguageCoverage {
                language: language.to_string(),
                translated: total - missing.len(),
                total,
                missing,
                extra,
            }
        })
        .collect();
    Ok(coverage)
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs, settings: &Settings) -> Result<i32> {
    let source =
        LanguageId::parse(&args.source).map_err(|e| miette!("Invalid --source: {e}"))?;
    let container = settings.container().map_err(load_error_report)?;
    let coverage_data = compute_coverage(&container, &source)?;

    let any_incomplete = coverage_data.iter().any(|c| !c.is_complete());

    if args.json {
        let json_output = serde_json::to_string_pretty(&coverage_data).into_diagnostic()?;
        println!("{json_output}");
    } else {
        println!("{}", format_coverage_table(&coverage_data));

        for lang_coverage in &coverage_data {
            if !lang_coverage.missing.is_empty() {
                println!("\nMissing in {}:", lang_coverage.language);
                for key in &lang_coverage.missing {
                    println!("  - {key}");
                }
            }
            if !lang_coverage.extra.is_empty() {
                println!("\nNot in {} but in {}:", source, lang_coverage.language);
                for key in &lang_coverage.extra {
                    println!("  - {key}");
                }
            }
        }
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> Container {
        let mut container = Container::default();
        container
            .add_yaml(
                "en".parse().unwrap(),
                "hello: Hello\nbye: Bye\nthanks: Thanks",
            )
            .unwrap();
        container
            .add_yaml("nl".parse().unwrap(), "hello: Hallo\nbye: \"\"\nold: Oud")
            .unwrap();
        container
    }

    #[test]
    fn test_coverage_counts() {
        let coverage = compute_coverage(&container(), &"en".parse().unwrap()).unwrap();
        assert_eq!(coverage.len(), 1);

        let nl = &coverage[0];
        assert_eq!(nl.language, "nl");
        assert_eq!(nl.translated, 1);
        assert_eq!(nl.total, 3);
        assert_eq!(nl.missing, vec!["bye", "thanks"]);
        assert_eq!(nl.extra, vec!["old"]);
        assert!(!nl.is_complete());
    }

    #[test]
    fn test_unknown_source_language() {
        assert!(compute_coverage(&container(), &"fr".parse().unwrap()).is_err());
    }
}
