//! Rendering a parsed [`Message`] against replacement values.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::interpreter::transforms::apply;
use crate::parser::ast::{Message, Operation};

/// Sibling messages a `replace` transformer may substitute.
pub trait MessageLookup {
    fn lookup(&self, key: &str) -> Option<&Message>;
}

impl<S: BuildHasher> MessageLookup for HashMap<String, Message, S> {
    fn lookup(&self, key: &str) -> Option<&Message> {
        self.get(key)
    }
}

impl MessageLookup for BTreeMap<String, Message> {
    fn lookup(&self, key: &str) -> Option<&Message> {
        self.get(key)
    }
}

/// Lookup used when rendering without siblings.
struct NoSiblings;

impl MessageLookup for NoSiblings {
    fn lookup(&self, _key: &str) -> Option<&Message> {
        None
    }
}

/// Render `message`, substituting `replacements` and resolving `replace`
/// transformers against `siblings`.
///
/// Rendering never fails. A placeholder without a replacement is written
/// back as `:key`.
pub fn render<L, S>(
    message: &Message,
    replacements: &HashMap<String, String, S>,
    siblings: Option<&L>,
) -> String
where
    L: MessageLookup + ?Sized,
    S: BuildHasher,
{
    let mut out = String::with_capacity(estimate_len(message, replacements));

    for op in &message.operations {
        match op {
            Operation::Literal(text) => out.push_str(text),
            Operation::Replacement { key, transformers } => {
                let Some(value) = replacements.get(key) else {
                    out.push(':');
                    out.push_str(key);
                    continue;
                };
                let value = transformers
                    .iter()
                    .fold(value.clone(), |value, t| apply(t, value, siblings));
                out.push_str(&value);
            }
        }
    }

    out
}

fn estimate_len<S: BuildHasher>(
    message: &Message,
    replacements: &HashMap<String, String, S>,
) -> usize {
    message
        .operations
        .iter()
        .map(|op| match op {
            Operation::Literal(text) => text.len(),
            Operation::Replacement { key, .. } => {
                replacements.get(key).map_or(key.len() + 1, String::len)
            }
        })
        .sum()
}

impl Message {
    /// Render without sibling messages; `replace` leaves values unchanged.
    ///
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use lingua::parser::parse_message;
    ///
    /// let message = parse_message("Hello :name|capitalize").unwrap();
    /// let mut replacements = HashMap::new();
    /// replacements.insert("name".to_string(), "ada".to_string());
    /// assert_eq!(message.render(&replacements), "Hello Ada");
    /// ```
    pub fn render<S: BuildHasher>(&self, replacements: &HashMap<String, String, S>) -> String {
        render(self, replacements, None::<&NoSiblings>)
    }

    /// Render with `siblings` available to `replace`.
    pub fn render_with<L, S>(
        &self,
        replacements: &HashMap<String, String, S>,
        siblings: &L,
    ) -> String
    where
        L: MessageLookup + ?Sized,
        S: BuildHasher,
    {
        render(self, replacements, Some(siblings))
    }
}
