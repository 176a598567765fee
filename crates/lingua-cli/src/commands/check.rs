//! Implementation of the `lingua check` command.

use std::path::PathBuf;

use lingua::interpreter::Messages;
use lingua::{Container, LoadError};
use miette::IntoDiagnostic;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::config::Settings;
use crate::output::load_error_report;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Directory with translation files
    #[arg(env = "LINGUA_DIR")]
    pub dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for check results.
#[derive(Debug, Serialize)]
struct CheckReport {
    ok: bool,
    languages: Vec<LanguageReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
}

#[derive(Debug, Serialize)]
struct LanguageReport {
    language: String,
    messages: usize,
}

#[derive(Debug, Serialize)]
struct ErrorReport {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<usize>,
}

impl From<&LoadError> for ErrorReport {
    fn from(err: &LoadError) -> Self {
        match err {
            LoadError::Parse {
                origin,
                key,
                source,
                ..
            } => ErrorReport {
                message: source.message(),
                origin: Some(origin.clone()),
                key: Some(key.clone()),
                offset: Some(source.offset()),
            },
            other => ErrorReport {
                message: other.to_string(),
                origin: None,
                key: None,
                offset: None,
            },
        }
    }
}

fn language_reports(container: &Container) -> Vec<LanguageReport> {
    container
        .languages()
        .map(|language| LanguageReport {
            language: language.to_string(),
            messages: container.messages(language).map_or(0, Messages::len),
        })
        .collect()
}

/// Run the check command.
pub fn run_check(args: CheckArgs, settings: &Settings) -> miette::Result<i32> {
    let loaded = settings.container();

    if args.json {
        let (report, code) = match &loaded {
            Ok(container) => (
                CheckReport {
                    ok: true,
                    languages: language_reports(container),
                    error: None,
                },
                exitcode::OK,
            ),
            Err(err) => (
                CheckReport {
                    ok: false,
                    languages: Vec::new(),
                    error: Some(ErrorReport::from(err)),
                },
                exitcode::DATAERR,
            ),
        };
        println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
        return Ok(code);
    }

    match loaded {
        Ok(container) => {
            let reports = language_reports(&container);
            let total: usize = reports.iter().map(|r| r.messages).sum();
            for report in &reports {
                println!("  {} {} messages", report.language.bold(), report.messages);
            }
            println!(
                "{} {} languages, {} messages in {}",
                "✓".green(),
                reports.len(),
                total,
                settings.dir_or_current().display()
            );
            Ok(exitcode::OK)
        }
        Err(err) => {
            eprintln!("{:?}", load_error_report(err));
            Ok(exitcode::DATAERR)
        }
    }
}
