//! Transformer implementations applied to replacement values.

use icu_casemap::CaseMapper;

use crate::interpreter::plural::{parse_count, plural};
use crate::interpreter::render::MessageLookup;
use crate::parser::ast::Transformer;

/// Apply one transformer to the current value of a replacement.
pub fn apply<L: MessageLookup + ?Sized>(
    transformer: &Transformer,
    value: String,
    siblings: Option<&L>,
) -> String {
    match transformer {
        Transformer::Capitalize => capitalize(&value),
        Transformer::Replace => replace(value, siblings),
        Transformer::Plural(cases) => plural(cases, parse_count(&value)),
    }
}

/// Uppercase the first character with a one-to-one case mapping.
///
/// ```
/// use lingua::interpreter::capitalize;
///
/// assert_eq!(capitalize("élan"), "Élan");
/// assert_eq!(capitalize("ßig"), "ßig");
/// ```
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = String::with_capacity(value.len());
    out.push(CaseMapper::new().simple_uppercase(first));
    out.push_str(chars.as_str());
    out
}

/// Substitute `value` with the text of the sibling message it names.
fn replace<L: MessageLookup + ?Sized>(value: String, siblings: Option<&L>) -> String {
    match siblings.and_then(|s| s.lookup(&value)) {
        Some(message) => message.plain_text(),
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::parser::ast::Message;

    #[test]
    fn test_capitalize_ascii() {
        assert_eq!(capitalize("email"), "Email");
        assert_eq!(capitalize("Email"), "Email");
    }

    #[test]
    fn test_capitalize_only_first_char() {
        assert_eq!(capitalize("hello world"), "Hello world");
        assert_eq!(capitalize("aBC"), "ABC");
    }

    #[test]
    fn test_capitalize_empty() {
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_capitalize_non_letter() {
        assert_eq!(capitalize("1st"), "1st");
    }

    #[test]
    fn test_capitalize_multibyte() {
        assert_eq!(capitalize("ñandú"), "Ñandú");
        assert_eq!(capitalize("ärger"), "Ärger");
    }

    #[test]
    fn test_replace_found() {
        let mut siblings = BTreeMap::new();
        siblings.insert("field".to_string(), Message::literal("email"));
        let result = apply(&Transformer::Replace, "field".to_string(), Some(&siblings));
        assert_eq!(result, "email");
    }

    #[test]
    fn test_replace_missing_keeps_value() {
        let siblings: BTreeMap<String, Message> = BTreeMap::new();
        let result = apply(&Transformer::Replace, "field".to_string(), Some(&siblings));
        assert_eq!(result, "field");
    }

    #[test]
    fn test_replace_without_siblings_keeps_value() {
        let result = apply::<BTreeMap<String, Message>>(
            &Transformer::Replace,
            "field".to_string(),
            None,
        );
        assert_eq!(result, "field");
    }
}
