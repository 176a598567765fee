//! Message rendering and per-language message storage.
//!
//! This module turns parsed templates into strings. The renderer applies
//! transformers to replacement values and resolves `replace` against sibling
//! messages; the container loads translation files and resolves languages.

mod container;
mod error;
mod matcher;
mod plural;
mod render;
mod transforms;

pub use container::{Container, MergeStrategy, Messages, Scope};
pub use error::LoadError;
pub use matcher::{DEFAULT_FILE_PATTERN, FileMatcher, RegexMatcher};
pub use plural::{parse_count, plural, select_case};
pub use render::{MessageLookup, render};
pub use transforms::{apply, capitalize};
