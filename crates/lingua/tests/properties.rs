//! Property tests for parsing, serialization and rendering.

use std::collections::HashMap;

use lingua::interpreter::capitalize;
use lingua::parser::{Operation, parse_message};
use proptest::prelude::*;

/// Template fragments that combine into valid and invalid templates.
fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(":name".to_string()),
        Just(":count".to_string()),
        Just("|capitalize".to_string()),
        Just("|replace".to_string()),
        Just("\\:".to_string()),
        Just(":".to_string()),
        Just("\\".to_string()),
        Just(":count|plural(=0 {none} =1-3 {a few: #} other {# many})".to_string()),
        "[a-z ]{1,4}",
        "[A-Z0-9{}#()=-]{1,3}",
    ]
}

fn template() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment(), 0..8).prop_map(|parts| parts.concat())
}

fn sample_replacements() -> HashMap<String, String> {
    HashMap::from([
        ("name".to_string(), "name".to_string()),
        ("count".to_string(), "2".to_string()),
    ])
}

proptest! {
    #[test]
    fn text_without_colon_is_one_literal(text in "[^:]{0,32}") {
        let message = parse_message(&text).unwrap();
        if text.is_empty() {
            prop_assert!(message.is_empty());
        } else {
            prop_assert_eq!(message.operations, vec![Operation::Literal(text)]);
        }
    }

    #[test]
    fn escaped_colon_never_starts_placeholder(
        before in "[^:]{0,8}",
        after in "[a-z]{0,8}",
    ) {
        let message = parse_message(&format!("{before}\\:{after}")).unwrap();
        prop_assert_eq!(message.keys().count(), 0);
        prop_assert_eq!(
            message.operations,
            vec![Operation::Literal(format!("{before}:{after}"))]
        );
    }

    #[test]
    fn plural_without_other_never_parses(low in 0i64..100, text in "[a-z ]{0,8}") {
        let source = format!(":n|plural(={low} {{{text}}})");
        prop_assert!(parse_message(&source).is_err());
    }

    #[test]
    fn serialized_message_reparses_equal(source in template()) {
        if let Ok(message) = parse_message(&source) {
            let reparsed = parse_message(&message.to_string());
            prop_assert_eq!(reparsed.as_ref(), Ok(&message));

            let replacements = sample_replacements();
            if let Ok(reparsed) = reparsed {
                prop_assert_eq!(reparsed.render(&replacements), message.render(&replacements));
            }
        }
    }

    #[test]
    fn plural_selects_first_matching_case(count in -5i64..20) {
        let message =
            parse_message(":c|plural(=0 {zero} =0-3 {low} =2-9 {mid} other {#})").unwrap();
        let rendered = message.render(&HashMap::from([("c".to_string(), count.to_string())]));
        let expected = match count {
            0 => "zero".to_string(),
            1..=3 => "low".to_string(),
            4..=9 => "mid".to_string(),
            _ => count.to_string(),
        };
        prop_assert_eq!(rendered, expected);
    }

    #[test]
    fn capitalize_is_idempotent(text in "\\PC{0,16}") {
        let once = capitalize(&text);
        prop_assert_eq!(capitalize(&once), once.clone());
    }
}
