//! Plural case selection.
//!
//! Cases are user-authored: an exact value (`=N`) or an inclusive range
//! (`=N-M`), checked in declared order, with `other` as the fallback.

use crate::parser::ast::{Plural, PluralPart};

/// Parse a replacement value as a plural count.
///
/// Anything that is not a base-10 `i64` counts as zero.
pub fn parse_count(value: &str) -> i64 {
    value.parse().unwrap_or(0)
}

/// The body of the first case matching `count`, or the `other` body.
pub fn select_case(plural: &Plural, count: i64) -> &[PluralPart] {
    plural
        .cases
        .iter()
        .find(|case| case.matcher.matches(count))
        .map_or(plural.other.as_slice(), |case| case.body.as_slice())
}

/// Render a plural for the given count.
///
/// # Examples
///
/// ```
/// use lingua::interpreter::plural;
/// use lingua::parser::{Operation, Transformer, parse_message};
///
/// let message = parse_message(":n|plural(=0 {none} other {# items})").unwrap();
/// let Operation::Replacement { transformers, .. } = &message.operations[0] else {
///     unreachable!()
/// };
/// let Transformer::Plural(cases) = &transformers[0] else { unreachable!() };
///
/// assert_eq!(plural(cases, 0), "none");
/// assert_eq!(plural(cases, 3), "3 items");
/// ```
pub fn plural(plural: &Plural, count: i64) -> String {
    let body = select_case(plural, count);
    let mut out = String::new();
    for part in body {
        match part {
            PluralPart::Literal(text) => out.push_str(text),
            PluralPart::Count => out.push_str(&count.to_string()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::{CaseMatch, PluralCase};

    fn literal(text: &str) -> Vec<PluralPart> {
        vec![PluralPart::Literal(text.to_string())]
    }

    fn sample() -> Plural {
        Plural {
            cases: vec![
                PluralCase {
                    matcher: CaseMatch::Exact(0),
                    body: literal("zero"),
                },
                PluralCase {
                    matcher: CaseMatch::Range { low: 0, high: 5 },
                    body: literal("few"),
                },
                PluralCase {
                    matcher: CaseMatch::Range { low: 3, high: 10 },
                    body: literal("some"),
                },
            ],
            other: vec![PluralPart::Count, PluralPart::Literal(" many".to_string())],
        }
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("12"), 12);
        assert_eq!(parse_count("-3"), -3);
        assert_eq!(parse_count("+4"), 4);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count("1.5"), 0);
        assert_eq!(parse_count(" 7"), 0);
        assert_eq!(parse_count(""), 0);
    }

    #[test]
    fn test_first_match_wins() {
        let plural = sample();
        assert_eq!(select_case(&plural, 0), literal("zero").as_slice());
        assert_eq!(select_case(&plural, 4), literal("few").as_slice());
        assert_eq!(select_case(&plural, 6), literal("some").as_slice());
    }

    #[test]
    fn test_range_is_inclusive() {
        let plural = sample();
        assert_eq!(plural_text(&plural, 5), "few");
        assert_eq!(plural_text(&plural, 10), "some");
        assert_eq!(plural_text(&plural, 11), "11 many");
    }

    #[test]
    fn test_negative_count_falls_to_other() {
        assert_eq!(plural_text(&sample(), -1), "-1 many");
    }

    #[test]
    fn test_inverted_range_never_matches() {
        let plural = Plural {
            cases: vec![PluralCase {
                matcher: CaseMatch::Range { low: 5, high: 1 },
                body: literal("never"),
            }],
            other: literal("other"),
        };
        assert_eq!(plural_text(&plural, 3), "other");
    }

    fn plural_text(p: &Plural, count: i64) -> String {
        plural(p, count)
    }
}
