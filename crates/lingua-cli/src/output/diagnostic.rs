//! Miette diagnostic wrapper for template parse errors.

use lingua::{LoadError, ParseError};
use miette::{miette, Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic pointing into a template.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("syntax error: {message}")]
#[diagnostic(code(lingua::syntax))]
pub struct LinguaDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl LinguaDiagnostic {
    /// Create a diagnostic from a ParseError, naming the template `name`.
    pub fn from_parse_error(name: &str, template: &str, err: &ParseError) -> Self {
        // Clamp offset to the template to avoid a miette panic on out-of-bounds
        let offset = err.offset().min(template.len());
        let width = template
            .get(offset..)
            .and_then(|rest| rest.chars().next())
            .map_or(0, char::len_utf8);

        LinguaDiagnostic {
            src: NamedSource::new(name, template.to_string()),
            span: (offset, width).into(),
            message: err.message(),
            help: help_for(err),
        }
    }
}

fn help_for(err: &ParseError) -> Option<String> {
    let help = match err {
        ParseError::MissingOther { .. } => "add an `other {...}` case to the plural",
        ParseError::ExpectedTranslationStart { .. } => "wrap each plural case body in `{...}`",
        ParseError::UnterminatedCase { .. } => "close the plural case body with `}`",
        ParseError::InvalidNumber { .. } => "plural values must fit in a signed 64-bit integer",
        ParseError::InvalidCase { .. } => "plural cases are `=N`, `=N-M` or `other`",
        ParseError::Lex(_)
        | ParseError::UnexpectedToken { .. }
        | ParseError::UnknownTransformer { .. } => return None,
    };
    Some(help.to_string())
}

/// Turn a load failure into a report, with a source snippet for parse errors.
pub fn load_error_report(err: LoadError) -> Report {
    match err {
        LoadError::Parse {
            origin,
            key,
            template,
            source,
        } => {
            let name = format!("{origin} ({key})");
            LinguaDiagnostic::from_parse_error(&name, &template, &source).into()
        }
        other => miette!("{other}"),
    }
}

#[cfg(test)]
mod tests {
    use lingua::parse_message;

    use super::*;

    fn diagnostic(template: &str) -> LinguaDiagnostic {
        let err = parse_message(template).unwrap_err();
        LinguaDiagnostic::from_parse_error("test", template, &err)
    }

    #[test]
    fn test_span_points_at_offending_char() {
        let d = diagnostic(":name|captalize");
        assert_eq!(d.span, SourceSpan::from((6, 1)));
        assert!(d.message.contains("did you mean 'capitalize'"));
        assert_eq!(d.help, None);
    }

    #[test]
    fn test_span_at_end_of_template() {
        let d = diagnostic(":n|plural(other {x");
        assert_eq!(d.span, SourceSpan::from((18, 0)));
    }

    #[test]
    fn test_missing_other_has_help() {
        let d = diagnostic(":n|plural(=1 {x})");
        assert_eq!(d.span, SourceSpan::from((3, 1)));
        assert!(d.help.is_some());
    }
}
