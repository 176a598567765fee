//! Template lexer and parser.
//!
//! Templates are lexed by a hand-written state machine and parsed into a
//! [`Message`] tree that the interpreter renders.

pub mod ast;
pub mod error;
mod iter;
mod lexer;
mod template;

pub use ast::*;
pub use error::{LexError, ParseError};
pub use lexer::{KNOWN_TRANSFORMERS, Token, TokenKind, lex};
pub use template::{parse_message, parse_tokens};
