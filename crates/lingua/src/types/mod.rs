mod language;
mod value;

pub use language::{LanguageError, LanguageId, LanguageMatch};
pub use value::{Value, format_replacements};
