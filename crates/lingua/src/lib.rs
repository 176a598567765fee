pub mod interpreter;
pub mod parser;
pub mod types;

pub use interpreter::{
    Container, FileMatcher, LoadError, MergeStrategy, MessageLookup, RegexMatcher, Scope, render,
};
pub use parser::{Message, ParseError, parse_message};
pub use types::{LanguageError, LanguageId, LanguageMatch, Value, format_replacements};

/// Creates a `HashMap<String, Value>` of replacements from key-value pairs.
///
/// Values are converted via `Into<Value>`, so integers, floats, strings and
/// vectors can be passed directly.
///
/// # Example
///
/// ```
/// use lingua::{replacements, Value};
///
/// let r = replacements! { "count" => 3, "name" => "Alice" };
/// assert_eq!(r.len(), 2);
/// assert_eq!(r["count"].as_integer(), Some(3));
/// assert_eq!(r["name"].as_string(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! replacements {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
