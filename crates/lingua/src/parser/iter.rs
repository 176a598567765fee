//! Restartable cursor over a token slice.

use super::lexer::Token;

/// Cursor with one token of lookahead. Positions outside the slice yield `None`.
#[derive(Debug, Clone)]
pub(crate) struct TokenIter<'t> {
    tokens: &'t [Token],
    /// Number of tokens consumed so far.
    consumed: usize,
}

impl<'t> TokenIter<'t> {
    pub(crate) fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            consumed: 0,
        }
    }

    /// The next token, without advancing.
    pub(crate) fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.consumed)
    }

    #[cfg_attr(not(test), expect(dead_code))]
    pub(crate) fn has_next(&self) -> bool {
        self.consumed < self.tokens.len()
    }

    /// The token most recently returned by `next`.
    #[cfg_attr(not(test), expect(dead_code))]
    pub(crate) fn current(&self) -> Option<&'t Token> {
        self.consumed
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
    }

    #[cfg_attr(not(test), expect(dead_code))]
    pub(crate) fn reset(&mut self) {
        self.consumed = 0;
    }
}

impl<'t> Iterator for TokenIter<'t> {
    type Item = &'t Token;

    fn next(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.consumed)?;
        self.consumed += 1;
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::TokenKind;

    fn tokens() -> Vec<Token> {
        vec![
            Token::new(TokenKind::Literal, "a", 0),
            Token::new(TokenKind::Replacement, "b", 2),
        ]
    }

    #[test]
    fn test_peek_does_not_advance() {
        let tokens = tokens();
        let iter = TokenIter::new(&tokens);
        assert_eq!(iter.peek().map(|t| t.text.as_str()), Some("a"));
        assert_eq!(iter.peek().map(|t| t.text.as_str()), Some("a"));
        assert!(iter.current().is_none());
    }

    #[test]
    fn test_next_and_current() {
        let tokens = tokens();
        let mut iter = TokenIter::new(&tokens);
        assert_eq!(iter.next().map(|t| t.text.as_str()), Some("a"));
        assert_eq!(iter.current().map(|t| t.text.as_str()), Some("a"));
        assert_eq!(iter.peek().map(|t| t.text.as_str()), Some("b"));
        assert!(iter.has_next());
        assert_eq!(iter.next().map(|t| t.text.as_str()), Some("b"));
        assert!(!iter.has_next());
        assert!(iter.next().is_none());
        assert!(iter.peek().is_none());
        assert_eq!(iter.current().map(|t| t.text.as_str()), Some("b"));
    }

    #[test]
    fn test_reset_restarts() {
        let tokens = tokens();
        let mut iter = TokenIter::new(&tokens);
        assert_eq!(iter.by_ref().count(), 2);
        iter.reset();
        assert!(iter.current().is_none());
        assert_eq!(iter.next().map(|t| t.text.as_str()), Some("a"));
    }

    #[test]
    fn test_empty_slice() {
        let mut iter = TokenIter::new(&[]);
        assert!(!iter.has_next());
        assert!(iter.peek().is_none());
        assert!(iter.next().is_none());
        assert!(iter.current().is_none());
    }
}
