//! Input token cursor.
//!
//! A strictly forward-moving view over the raw argument vector. The matching
//! engine peeks before committing to a match and never rewinds once a token
//! is consumed. One cursor lives for exactly one parse call.

/// Sequential, non-rewindable view over the raw argument tokens.
#[derive(Debug, Clone)]
pub struct TokenCursor<'v> {
    tokens: &'v [String],
    pos: usize,
}

impl<'v> TokenCursor<'v> {
    /// Creates a cursor at the start of `tokens`.
    pub fn new(tokens: &'v [String]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Whether unconsumed tokens remain.
    pub fn has_more(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Next unconsumed token without consuming it.
    pub fn peek(&self) -> Option<&'v str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    /// Consumes and returns the next token.
    pub fn next(&mut self) -> Option<&'v str> {
        let token = self.tokens.get(self.pos).map(String::as_str);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// All unconsumed tokens, without consuming them.
    pub fn rest(&self) -> &'v [String] {
        &self.tokens[self.pos.min(self.tokens.len())..]
    }

    /// Number of unconsumed tokens.
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.pos.min(self.tokens.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_peek_does_not_consume() {
        let tokens = argv(&["a", "b"]);
        let mut cursor = TokenCursor::new(&tokens);

        assert_eq!(cursor.peek(), Some("a"));
        assert_eq!(cursor.peek(), Some("a"));
        assert_eq!(cursor.remaining(), 2);
        assert_eq!(cursor.next(), Some("a"));
        assert_eq!(cursor.peek(), Some("b"));
    }

    #[test]
    fn test_cursor_exhaustion() {
        let tokens = argv(&["only"]);
        let mut cursor = TokenCursor::new(&tokens);

        assert_eq!(cursor.next(), Some("only"));
        assert!(!cursor.has_more());
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.peek(), None);
        assert!(cursor.rest().is_empty());
    }

    #[test]
    fn test_rest_returns_unconsumed_suffix() {
        let tokens = argv(&["a", "b", "c"]);
        let mut cursor = TokenCursor::new(&tokens);
        cursor.next();

        assert_eq!(cursor.rest(), &tokens[1..]);
        assert_eq!(cursor.remaining(), 2);
    }
}
