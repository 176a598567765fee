//! Parse error types for message templates.

use thiserror::Error;

use super::lexer::TokenKind;

/// An error that stopped the lexer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at offset {offset}")]
pub struct LexError {
    pub message: String,
    /// Byte offset in the template.
    pub offset: usize,
}

impl LexError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// An error that occurred while parsing a template.
///
/// Every variant carries the byte offset in the template that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The template could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A token that cannot appear at this position.
    #[error("unexpected {kind} token at offset {offset}")]
    UnexpectedToken { kind: TokenKind, offset: usize },

    /// A token sequence inside a plural case that is not `=N`, `=N-M` or `other`.
    #[error("unexpected token in plural case at offset {offset}")]
    InvalidCase { offset: usize },

    /// A transformer name the parser does not know.
    #[error("unknown transformer '{name}' at offset {offset}")]
    UnknownTransformer { name: String, offset: usize },

    /// A plural argument that does not fit in an `i64`.
    #[error("invalid number '{text}' at offset {offset}")]
    InvalidNumber { text: String, offset: usize },

    /// A plural case without its `{` body.
    #[error("expected translation start at offset {offset}")]
    ExpectedTranslationStart { offset: usize },

    /// A plural case body without its closing `}`.
    #[error("unterminated plural case at offset {offset}")]
    UnterminatedCase { offset: usize },

    /// A plural transformer without a non-empty `other` case.
    #[error("missing 'other' case for plural transformer at offset {offset}")]
    MissingOther { offset: usize },
}

impl ParseError {
    /// Byte offset in the template where the error was detected.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Lex(err) => err.offset,
            ParseError::UnexpectedToken { offset, .. }
            | ParseError::InvalidCase { offset }
            | ParseError::UnknownTransformer { offset, .. }
            | ParseError::InvalidNumber { offset, .. }
            | ParseError::ExpectedTranslationStart { offset }
            | ParseError::UnterminatedCase { offset }
            | ParseError::MissingOther { offset } => *offset,
        }
    }

    /// The error message without the offset suffix.
    pub fn message(&self) -> String {
        match self {
            ParseError::Lex(err) => err.message.clone(),
            ParseError::UnexpectedToken { kind, .. } => format!("unexpected {kind} token"),
            ParseError::InvalidCase { .. } => "unexpected token in plural case".to_string(),
            ParseError::UnknownTransformer { name, .. } => format!("unknown transformer '{name}'"),
            ParseError::InvalidNumber { text, .. } => format!("invalid number '{text}'"),
            ParseError::ExpectedTranslationStart { .. } => "expected translation start".to_string(),
            ParseError::UnterminatedCase { .. } => "unterminated plural case".to_string(),
            ParseError::MissingOther { .. } => {
                "missing 'other' case for plural transformer".to_string()
            }
        }
    }
}
