//! Lookahead buffer over the lexer.
//!
//! Tokens are pulled from the [`Lexer`] only when a `peek`/`next` call needs
//! them and are kept until consumed, so `peek(n)` never loses anything.

use std::collections::VecDeque;

use crate::errors::errors::Error;

use super::{lexer::Lexer, tokens::Token};

pub struct TokenBuffer {
    lexer: Lexer,
    buffer: VecDeque<Token>,
}

impl TokenBuffer {
    pub fn new(lexer: Lexer) -> Self {
        TokenBuffer {
            lexer,
            buffer: VecDeque::new(),
        }
    }

    fn fill(&mut self, n: usize) -> Result<(), Error> {
        while self.buffer.len() <= n {
            let token = self.lexer.next_token()?;
            self.buffer.push_back(token);
        }
        Ok(())
    }

    /// Returns the token `n` positions ahead (0-based) without consuming it.
    pub fn peek(&mut self, n: usize) -> Result<&Token, Error> {
        self.fill(n)?;
        Ok(&self.buffer[n])
    }

    /// Consumes and returns the front token.
    pub fn next(&mut self) -> Result<Token, Error> {
        match self.buffer.pop_front() {
            Some(token) => Ok(token),
            None => self.lexer.next_token(),
        }
    }

    pub fn is_eof(&mut self) -> Result<bool, Error> {
        Ok(self.peek(0)?.is_eof())
    }

    /// Number of tokens fetched from the lexer but not yet consumed.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::TokenBuffer;
    use crate::lexer::{lexer::Lexer, tokens::TokenKind};

    fn buffer(source: &str) -> TokenBuffer {
        TokenBuffer::new(Lexer::new(source))
    }

    #[test]
    fn test_peek_is_stable() {
        let mut tokens = buffer("val x = 1;");

        let first = tokens.peek(2).unwrap().clone();
        let second = tokens.peek(2).unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(first.kind, TokenKind::Assignment);
        assert_eq!(tokens.buffered(), 3);
    }

    #[test]
    fn test_next_returns_peeked_token() {
        let mut tokens = buffer("fun main");

        let peeked = tokens.peek(0).unwrap().clone();
        let taken = tokens.next().unwrap();
        assert_eq!(peeked, taken);
        assert_eq!(tokens.next().unwrap().value, "main");
    }

    #[test]
    fn test_order_preserved_across_peeks() {
        let mut tokens = buffer("a b c");

        assert_eq!(tokens.peek(1).unwrap().value, "b");
        assert_eq!(tokens.next().unwrap().value, "a");
        assert_eq!(tokens.peek(1).unwrap().value, "c");
        assert_eq!(tokens.next().unwrap().value, "b");
        assert_eq!(tokens.next().unwrap().value, "c");
        assert!(tokens.is_eof().unwrap());
    }

    #[test]
    fn test_peek_past_eof_keeps_returning_eof() {
        let mut tokens = buffer("x");

        assert_eq!(tokens.peek(5).unwrap().kind, TokenKind::EOF);
        assert_eq!(tokens.next().unwrap().kind, TokenKind::Identifier);
        for _ in 0..5 {
            assert_eq!(tokens.next().unwrap().kind, TokenKind::EOF);
        }
    }

    #[test]
    fn test_string_pieces_flow_through_buffer() {
        let mut tokens = buffer("\"hi $name\"");

        assert_eq!(tokens.peek(3).unwrap().kind, TokenKind::StringEnd);
        assert_eq!(tokens.next().unwrap().kind, TokenKind::StringStart);
        assert_eq!(tokens.next().unwrap().kind, TokenKind::StringText);
        assert_eq!(tokens.next().unwrap().kind, TokenKind::StringInterpId);
    }

    #[test]
    fn test_lexical_error_surfaces_on_peek() {
        let mut tokens = buffer("x #");

        assert!(tokens.peek(0).is_ok());
        assert!(tokens.peek(1).is_err());
    }
}
