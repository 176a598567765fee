//! Implementation of the `lingua eval` command.

use std::collections::HashMap;
use std::path::PathBuf;

use lingua::{format_replacements, parse_message, LanguageId, Value};
use miette::{miette, IntoDiagnostic};
use serde::Serialize;
use tracing::debug;

use crate::config::Settings;
use crate::output::{load_error_report, LinguaDiagnostic};

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Template string to evaluate
    #[arg(long, required = true)]
    pub template: String,

    /// Directory with translation files, used for `replace` lookups
    #[arg(long, env = "LINGUA_DIR")]
    pub dir: Option<PathBuf>,

    /// Language whose messages `replace` looks up (e.g., en, nl-BE)
    #[arg(long)]
    pub lang: Option<String>,

    /// Parameters in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Parse a key=value parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter format '{s}': expected name=value"))?;
    Ok((key.to_string(), value.to_string()))
}

/// Integers become integer values, anything else a string.
fn to_value(raw: String) -> Value {
    match raw.parse::<i64>() {
        Ok(n) => Value::from(n),
        Err(_) => Value::from(raw),
    }
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs, settings: &Settings) -> miette::Result<i32> {
    let message = match parse_message(&args.template) {
        Ok(message) => message,
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.message(),
                    "offset": e.offset(),
                });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                let diagnostic = LinguaDiagnostic::from_parse_error("template", &args.template, &e);
                eprintln!("{:?}", miette::Report::new(diagnostic));
            }
            return Ok(exitcode::DATAERR);
        }
    };

    let params: HashMap<String, Value> = args
        .params
        .into_iter()
        .map(|(k, v)| (k, to_value(v)))
        .collect();
    let replacements = format_replacements(&params);

    let requested = args
        .lang
        .as_deref()
        .map(LanguageId::parse)
        .transpose()
        .map_err(|e| miette!("Invalid --lang: {e}"))?;

    let (result, language) = if settings.dir().is_some() {
        let container = settings.container().map_err(load_error_report)?;
        let scope = container.scope(requested);
        let language = scope.language();
        debug!(language = ?language, "rendering with language scope");
        (message.render_with(&replacements, &scope), language)
    } else {
        (message.render(&replacements), None)
    };

    if args.json {
        let output = EvalResult {
            result,
            language: language.map(|l| l.to_string()),
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        println!("{result}");
    }
    Ok(exitcode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("name=Ada"),
            Ok(("name".to_string(), "Ada".to_string()))
        );
        assert_eq!(
            parse_key_val("expr=a=b"),
            Ok(("expr".to_string(), "a=b".to_string()))
        );
        assert!(parse_key_val("novalue").is_err());
    }

    #[test]
    fn test_to_value() {
        assert_eq!(to_value("42".to_string()), Value::Integer(42));
        assert_eq!(to_value("4.2".to_string()), Value::from("4.2"));
    }
}
