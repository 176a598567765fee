//! Public AST types for parsed messages.
//!
//! A [`Message`] is built once per template and never mutated afterwards.
//! Its [`Display`](fmt::Display) impl writes the template back as source
//! text that parses to an equivalent tree.

use std::fmt::{self, Write};

use super::lexer::{CAPITALIZE, OTHER, PLURAL, REPLACE};

/// A parsed template: operations in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub operations: Vec<Operation>,
}

/// A single step of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Verbatim text.
    Literal(String),
    /// A `:key` placeholder with the transformers applied to its value.
    Replacement {
        key: String,
        transformers: Vec<Transformer>,
    },
}

/// A post-processing step applied to a replacement value, left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transformer {
    /// Uppercase the first character.
    Capitalize,
    /// Substitute the value with the sibling message it names.
    Replace,
    /// Select a plural case by the value as a count.
    Plural(Plural),
}

/// Plural cases in declared order plus the mandatory `other` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plural {
    pub cases: Vec<PluralCase>,
    pub other: Vec<PluralPart>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralCase {
    pub matcher: CaseMatch,
    pub body: Vec<PluralPart>,
}

/// How a plural case matches a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMatch {
    /// `=N`
    Exact(i64),
    /// `=N-M`, inclusive on both ends.
    Range { low: i64, high: i64 },
}

/// Content of a plural case body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluralPart {
    Literal(String),
    /// `#`, replaced by the count.
    Count,
}

impl Message {
    pub fn new(operations: Vec<Operation>) -> Self {
        Self { operations }
    }

    /// A message consisting of one literal, or no operations for empty text.
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::default();
        }
        Self::new(vec![Operation::Literal(text)])
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Replacement keys in source order, duplicates included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.operations.iter().filter_map(|op| match op {
            Operation::Replacement { key, .. } => Some(key.as_str()),
            Operation::Literal(_) => None,
        })
    }

    /// Text used when another message substitutes this one via `replace`.
    ///
    /// Literals are copied verbatim and placeholders are written in their
    /// source form; nothing is evaluated.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for op in &self.operations {
            match op {
                Operation::Literal(text) => out.push_str(text),
                Operation::Replacement { key, transformers } => {
                    // Writing into a String cannot fail.
                    let _ = write_replacement(&mut out, key, transformers);
                }
            }
        }
        out
    }
}

impl CaseMatch {
    pub fn matches(&self, count: i64) -> bool {
        match *self {
            CaseMatch::Exact(value) => count == value,
            CaseMatch::Range { low, high } => low <= count && count <= high,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.operations {
            match op {
                Operation::Literal(text) => write_escaped(f, text)?,
                Operation::Replacement { key, transformers } => {
                    write_replacement(f, key, transformers)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transformer::Capitalize => f.write_str(CAPITALIZE),
            Transformer::Replace => f.write_str(REPLACE),
            Transformer::Plural(plural) => write!(f, "{PLURAL}({plural})"),
        }
    }
}

/// Writes the argument list of a plural transformer, without parentheses.
impl fmt::Display for Plural {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for case in &self.cases {
            match case.matcher {
                CaseMatch::Exact(value) => write!(f, "={value} ")?,
                CaseMatch::Range { low, high } => write!(f, "={low}-{high} ")?,
            }
            write_body(f, &case.body)?;
            f.write_char(' ')?;
        }
        write!(f, "{OTHER} ")?;
        write_body(f, &self.other)
    }
}

fn write_replacement(
    out: &mut impl Write,
    key: &str,
    transformers: &[Transformer],
) -> fmt::Result {
    write!(out, ":{key}")?;
    for transformer in transformers {
        write!(out, "|{transformer}")?;
    }
    Ok(())
}

fn write_body(out: &mut impl Write, body: &[PluralPart]) -> fmt::Result {
    out.write_char('{')?;
    for part in body {
        match part {
            PluralPart::Literal(text) => out.write_str(text)?,
            PluralPart::Count => out.write_char('#')?,
        }
    }
    out.write_char('}')
}

/// Colons in literal text are escaped so they never start a placeholder.
fn write_escaped(out: &mut impl Write, text: &str) -> fmt::Result {
    for (i, part) in text.split(':').enumerate() {
        if i > 0 {
            out.write_str("\\:")?;
        }
        out.write_str(part)?;
    }
    Ok(())
}
