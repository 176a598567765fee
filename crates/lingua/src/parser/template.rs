//! Recursive-descent parser turning a token stream into a [`Message`].

use std::str::FromStr;

use tracing::trace;

use super::ast::{CaseMatch, Message, Operation, Plural, PluralCase, PluralPart, Transformer};
use super::error::ParseError;
use super::iter::TokenIter;
use super::lexer::{CAPITALIZE, PLURAL, REPLACE, Token, TokenKind, lex};

/// Parse a template string into a [`Message`].
///
/// # Errors
///
/// Returns [`ParseError::Lex`] when the template cannot be tokenized, and the
/// other variants for structurally invalid plural cases, most notably
/// [`ParseError::MissingOther`] when a plural has no `other` case.
pub fn parse_message(input: &str) -> Result<Message, ParseError> {
    let tokens = lex(input)?;
    trace!(tokens = tokens.len(), "lexed template");
    parse_tokens(&tokens, input.len())
}

/// Parse an already lexed token stream. `end` is the byte length of the
/// source, used as the offset of errors found after the last token.
pub fn parse_tokens(tokens: &[Token], end: usize) -> Result<Message, ParseError> {
    Parser {
        tokens: TokenIter::new(tokens),
        end,
    }
    .parse()
}

impl FromStr for Message {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_message(s)
    }
}

struct Parser<'t> {
    tokens: TokenIter<'t>,
    end: usize,
}

/// Progress through the leading tokens of a plural case.
#[derive(Clone, Copy)]
enum CaseHead {
    Empty,
    Exact(i64),
    RangeOpen(i64),
    Range(i64, i64),
    Other,
}

enum ParsedCase {
    Case(PluralCase),
    Other(Vec<PluralPart>),
}

impl<'t> Parser<'t> {
    fn parse(mut self) -> Result<Message, ParseError> {
        let mut operations = Vec::new();

        while let Some(token) = self.tokens.next() {
            match token.kind {
                TokenKind::Literal => operations.push(Operation::Literal(token.text.clone())),
                TokenKind::Replacement => {
                    let transformers = self.parse_transformers()?;
                    operations.push(Operation::Replacement {
                        key: token.text.clone(),
                        transformers,
                    });
                }
                kind => {
                    return Err(ParseError::UnexpectedToken {
                        kind,
                        offset: token.offset,
                    });
                }
            }
        }

        Ok(Message::new(operations))
    }

    /// Parse transformers until the first token that is not one.
    fn parse_transformers(&mut self) -> Result<Vec<Transformer>, ParseError> {
        let mut transformers = Vec::new();

        while let Some(token) = self
            .tokens
            .peek()
            .filter(|t| t.kind == TokenKind::Transformer)
        {
            self.tokens.next();
            let transformer = match token.text.as_str() {
                CAPITALIZE => Transformer::Capitalize,
                REPLACE => Transformer::Replace,
                PLURAL => self.parse_plural(token)?,
                name => {
                    return Err(ParseError::UnknownTransformer {
                        name: name.to_string(),
                        offset: token.offset,
                    });
                }
            };
            transformers.push(transformer);
        }

        Ok(transformers)
    }

    fn parse_plural(&mut self, token: &Token) -> Result<Transformer, ParseError> {
        let mut cases = Vec::new();
        let mut other = None;

        while let Some(case) = self.parse_plural_case()? {
            match case {
                ParsedCase::Case(case) => cases.push(case),
                // A repeated `other` replaces the earlier one.
                ParsedCase::Other(body) => other = Some(body),
            }
        }

        match other {
            Some(other) if !other.is_empty() => Ok(Transformer::Plural(Plural { cases, other })),
            _ => Err(ParseError::MissingOther {
                offset: token.offset,
            }),
        }
    }

    /// Parse one case, or return `None` when the next token does not start one.
    fn parse_plural_case(&mut self) -> Result<Option<ParsedCase>, ParseError> {
        let starts_case = self.tokens.peek().is_some_and(|t| {
            matches!(
                t.kind,
                TokenKind::PluralNumeric
                    | TokenKind::PluralRange
                    | TokenKind::PluralOther
                    | TokenKind::PluralTranslationStart
            )
        });
        if !starts_case {
            return Ok(None);
        }

        let matcher = self.parse_case_head()?;

        match self.tokens.next() {
            Some(token) if token.kind == TokenKind::PluralTranslationStart => {}
            token => {
                return Err(ParseError::ExpectedTranslationStart {
                    offset: token.map_or(self.end, |t| t.offset),
                });
            }
        }

        let body = self.parse_case_body()?;

        Ok(Some(match matcher {
            Some(matcher) => ParsedCase::Case(PluralCase { matcher, body }),
            None => ParsedCase::Other(body),
        }))
    }

    /// Consume `=N`, `=N-M` or `other`, stopping before the translation start.
    /// Returns `None` for the `other` case.
    fn parse_case_head(&mut self) -> Result<Option<CaseMatch>, ParseError> {
        let mut head = CaseHead::Empty;

        while let Some(token) = self.tokens.peek() {
            head = match (head, token.kind) {
                (CaseHead::Exact(value), TokenKind::PluralTranslationStart) => {
                    return Ok(Some(CaseMatch::Exact(value)));
                }
                (CaseHead::Range(low, high), TokenKind::PluralTranslationStart) => {
                    return Ok(Some(CaseMatch::Range { low, high }));
                }
                (CaseHead::Other, TokenKind::PluralTranslationStart) => return Ok(None),
                (CaseHead::Empty, TokenKind::PluralNumeric) => CaseHead::Exact(parse_number(token)?),
                (CaseHead::Exact(low), TokenKind::PluralRange) => CaseHead::RangeOpen(low),
                (CaseHead::RangeOpen(low), TokenKind::PluralNumeric) => {
                    CaseHead::Range(low, parse_number(token)?)
                }
                (CaseHead::Empty, TokenKind::PluralOther) => CaseHead::Other,
                _ => {
                    return Err(ParseError::InvalidCase {
                        offset: token.offset,
                    });
                }
            };
            self.tokens.next();
        }

        Err(ParseError::ExpectedTranslationStart { offset: self.end })
    }

    fn parse_case_body(&mut self) -> Result<Vec<PluralPart>, ParseError> {
        let mut body = Vec::new();

        while let Some(token) = self.tokens.next() {
            match token.kind {
                TokenKind::PluralTranslationEnd => return Ok(body),
                TokenKind::Literal => body.push(PluralPart::Literal(token.text.clone())),
                TokenKind::PluralCount => body.push(PluralPart::Count),
                kind => {
                    return Err(ParseError::UnexpectedToken {
                        kind,
                        offset: token.offset,
                    });
                }
            }
        }

        Err(ParseError::UnterminatedCase { offset: self.end })
    }
}

fn parse_number(token: &Token) -> Result<i64, ParseError> {
    token
        .text
        .parse()
        .map_err(|_| ParseError::InvalidNumber {
            text: token.text.clone(),
            offset: token.offset,
        })
}
