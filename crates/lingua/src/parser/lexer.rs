//! State-machine lexer for message templates.
//!
//! The lexer walks the input once, moving between a small set of states:
//!
//! - `Literal`: plain text, `\:` escapes a colon
//! - `Placeholder`: `:name` replacement keys
//! - `Transformer`: `|capitalize`, `|replace`, `|plural(`
//! - `PluralArgs`: `=N`, `=N-M`, `other` and the closing `)`
//! - `PluralNumeric`: the digits of `=N` and `=N-M`
//! - `PluralTranslation`: `{ ... }` case bodies with `#` count markers
//!
//! Lexing stops at the first error, which is recorded as a trailing
//! [`TokenKind::Error`] token and returned as a [`LexError`].

use std::{fmt, mem};

use strsim::levenshtein;

use super::error::LexError;

pub(crate) const CAPITALIZE: &str = "capitalize";
pub(crate) const REPLACE: &str = "replace";
pub(crate) const PLURAL: &str = "plural";
pub(crate) const OTHER: &str = "other";

/// Transformer names the lexer accepts after `|`.
pub const KNOWN_TRANSFORMERS: &[&str] = &[CAPITALIZE, REPLACE, PLURAL];

/// The kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Verbatim text, outside placeholders or inside a plural case body.
    Literal,
    /// A replacement key, without the leading `:`.
    Replacement,
    /// A transformer name, without the leading `|`.
    Transformer,
    /// The digits of an exact value or a range bound.
    PluralNumeric,
    /// The `-` between two range bounds.
    PluralRange,
    /// The `other` keyword.
    PluralOther,
    /// The `{` opening a case body.
    PluralTranslationStart,
    /// The `}` closing a case body.
    PluralTranslationEnd,
    /// A `#` inside a case body.
    PluralCount,
    /// A lex error; the token text is the error message.
    Error,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Literal => "literal",
            TokenKind::Replacement => "replacement",
            TokenKind::Transformer => "transformer",
            TokenKind::PluralNumeric => "plural number",
            TokenKind::PluralRange => "plural range",
            TokenKind::PluralOther => "plural other",
            TokenKind::PluralTranslationStart => "plural translation start",
            TokenKind::PluralTranslationEnd => "plural translation end",
            TokenKind::PluralCount => "plural count",
            TokenKind::Error => "error",
        };
        f.write_str(name)
    }
}

/// A single token with the byte offset where it starts in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
        }
    }
}

/// Lex a template into tokens.
///
/// # Errors
///
/// Returns a [`LexError`] for malformed placeholders, unknown transformers,
/// missing digits in plural arguments and unterminated plural bodies.
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(input);
    let mut state = Some(State::Literal);
    while let Some(current) = state {
        state = lexer.step(current);
    }
    lexer.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Literal,
    Placeholder,
    Transformer,
    PluralArgs,
    PluralNumeric,
    PluralTranslation,
}

struct Lexer<'a> {
    input: &'a str,
    /// Start of the token being scanned.
    start: usize,
    /// Current position in the input.
    pos: usize,
    /// Pending literal text; escapes mean it is not always a slice of the input.
    literal: String,
    literal_offset: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            start: 0,
            pos: 0,
            literal: String::new(),
            literal_offset: 0,
            tokens: Vec::new(),
        }
    }

    fn step(&mut self, state: State) -> Option<State> {
        match state {
            State::Literal => self.lex_literal(),
            State::Placeholder => self.lex_placeholder(),
            State::Transformer => self.lex_transformer(),
            State::PluralArgs => self.lex_plural_args(),
            State::PluralNumeric => self.lex_plural_numeric(),
            State::PluralTranslation => self.lex_plural_translation(),
        }
    }

    fn finish(self) -> Result<Vec<Token>, LexError> {
        if let Some(token) = self.tokens.last().filter(|t| t.kind == TokenKind::Error) {
            return Err(LexError::new(token.text.clone(), token.offset));
        }
        Ok(self.tokens)
    }

    fn lex_literal(&mut self) -> Option<State> {
        loop {
            let offset = self.pos;
            match self.peek() {
                None => {
                    self.flush_literal();
                    return None;
                }
                Some(':') => return Some(State::Placeholder),
                Some('\\') => {
                    self.advance();
                    if self.peek() == Some(':') {
                        self.advance();
                        self.push_literal(':', offset);
                    } else {
                        self.push_literal('\\', offset);
                    }
                }
                Some(c) => {
                    self.advance();
                    self.push_literal(c, offset);
                }
            }
        }
    }

    fn lex_placeholder(&mut self) -> Option<State> {
        let colon = self.pos;
        self.advance();

        if !self.peek().is_some_and(is_lowercase) {
            // Not a placeholder, keep the colon as text.
            self.push_literal(':', colon);
            return Some(State::Literal);
        }

        self.flush_literal();
        self.accept_run(is_lowercase);
        self.emit(TokenKind::Replacement);

        if self.peek() == Some('|') {
            Some(State::Transformer)
        } else {
            Some(State::Literal)
        }
    }

    fn lex_transformer(&mut self) -> Option<State> {
        if self.peek() != Some('|') {
            return Some(State::Literal);
        }
        self.advance();
        self.ignore();

        if !self.accept(is_lowercase) {
            return self.error(self.pos, "expected lowercase transformer name after '|'");
        }
        self.accept_run(is_lowercase);

        let input = self.input;
        let name = &input[self.start..self.pos];
        match name {
            PLURAL => {
                if self.peek() != Some('(') {
                    return self.error(self.pos, "expected '(' after plural transformer");
                }
                self.emit(TokenKind::Transformer);
                self.advance();
                self.ignore();
                Some(State::PluralArgs)
            }
            CAPITALIZE | REPLACE => {
                self.emit(TokenKind::Transformer);
                Some(State::Transformer)
            }
            unknown => self.error(self.start, unknown_transformer_message(unknown)),
        }
    }

    fn lex_plural_args(&mut self) -> Option<State> {
        self.accept_run(is_space);
        self.ignore();

        match self.peek() {
            Some(')') => {
                self.advance();
                self.ignore();
                Some(State::Transformer)
            }
            Some('=') => Some(State::PluralNumeric),
            Some(_) if self.input[self.pos..].starts_with(OTHER) => {
                self.pos += OTHER.len();
                self.emit(TokenKind::PluralOther);
                Some(State::PluralTranslation)
            }
            Some(c) => self.error(
                self.pos,
                format!("unexpected character '{c}' in plural arguments"),
            ),
            None => self.error(self.pos, "unexpected end of input in plural arguments"),
        }
    }

    fn lex_plural_numeric(&mut self) -> Option<State> {
        self.advance();
        self.ignore();

        if !self.accept(is_digit) {
            return self.error(self.pos, "expected number after '='");
        }
        self.accept_run(is_digit);
        self.emit(TokenKind::PluralNumeric);

        if self.peek() == Some('-') {
            self.advance();
            self.emit(TokenKind::PluralRange);

            if !self.accept(is_digit) {
                return self.error(self.pos, "expected number after '-'");
            }
            self.accept_run(is_digit);
            self.emit(TokenKind::PluralNumeric);
        }

        Some(State::PluralTranslation)
    }

    fn lex_plural_translation(&mut self) -> Option<State> {
        self.accept_run(is_space);
        self.ignore();

        if self.peek() != Some('{') {
            return self.error(self.pos, "expected '{' to start plural translation");
        }
        self.advance();
        self.emit(TokenKind::PluralTranslationStart);

        loop {
            match self.peek() {
                Some('}') => {
                    self.emit(TokenKind::Literal);
                    self.advance();
                    self.emit(TokenKind::PluralTranslationEnd);
                    return Some(State::PluralArgs);
                }
                Some('#') => {
                    self.emit(TokenKind::Literal);
                    self.advance();
                    self.emit(TokenKind::PluralCount);
                }
                Some(_) => {
                    self.advance();
                }
                None => {
                    return self.error(self.pos, "unexpected end of input in plural translation");
                }
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn accept(&mut self, valid: fn(char) -> bool) -> bool {
        if self.peek().is_some_and(valid) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn accept_run(&mut self, valid: fn(char) -> bool) {
        while self.accept(valid) {}
    }

    fn ignore(&mut self) {
        self.start = self.pos;
    }

    /// Emit the scanned slice as a token; empty slices emit nothing.
    fn emit(&mut self, kind: TokenKind) {
        if self.start == self.pos {
            return;
        }
        self.tokens.push(Token::new(
            kind,
            &self.input[self.start..self.pos],
            self.start,
        ));
        self.start = self.pos;
    }

    fn push_literal(&mut self, c: char, offset: usize) {
        if self.literal.is_empty() {
            self.literal_offset = offset;
        }
        self.literal.push(c);
    }

    fn flush_literal(&mut self) {
        if !self.literal.is_empty() {
            let text = mem::take(&mut self.literal);
            self.tokens
                .push(Token::new(TokenKind::Literal, text, self.literal_offset));
        }
        self.start = self.pos;
    }

    fn error(&mut self, offset: usize, message: impl Into<String>) -> Option<State> {
        self.tokens
            .push(Token::new(TokenKind::Error, message, offset));
        None
    }
}

fn unknown_transformer_message(name: &str) -> String {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let suggestion = KNOWN_TRANSFORMERS
        .iter()
        .map(|candidate| (levenshtein(name, candidate), candidate))
        .filter(|(dist, _)| *dist <= max_distance)
        .min_by_key(|(dist, _)| *dist);
    match suggestion {
        Some((_, candidate)) => {
            format!("unknown transformer '{name}', did you mean '{candidate}'?")
        }
        None => format!("unknown transformer '{name}'"),
    }
}

fn is_lowercase(c: char) -> bool {
    c.is_ascii_lowercase()
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}
