//! Parser state and the token-level helpers every grammar rule builds on.
//!
//! The parser pulls tokens on demand through a [`TokenBuffer`] and never
//! aborts on a syntax error. Each error is recorded as a [`Diagnostic`] and
//! followed by panic-mode recovery ([`Parser::synchronize`]), so `parse`
//! always returns a tree. The only `Err` that escapes is a fatal lexical
//! failure raised while the buffer fills.

use tracing::{debug, trace};

use crate::{
    ast::ast::KotlinFile,
    errors::errors::{Diagnostic, Error},
    lexer::{
        lexer::Lexer,
        token_buffer::TokenBuffer,
        tokens::{Token, TokenKind},
    },
};

use super::stmt::parse_file;

/// Tokens that end panic mode.
pub const SYNC_TOKENS: [TokenKind; 3] = [
    TokenKind::Semicolon,
    TokenKind::CloseCurly,
    TokenKind::EOF,
];

/// The tree plus every syntax error met while building it, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub file: KotlinFile,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

pub struct Parser {
    tokens: TokenBuffer,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Parser {
            tokens: TokenBuffer::new(lexer),
            diagnostics: vec![],
        }
    }

    /// Returns the token `n` places ahead without consuming it.
    pub fn peek(&mut self, n: usize) -> Result<&Token, Error> {
        self.tokens.peek(n)
    }

    /// Kind of the token `n` places ahead.
    pub fn peek_kind(&mut self, n: usize) -> Result<TokenKind, Error> {
        Ok(self.tokens.peek(n)?.kind)
    }

    /// Consumes and returns the current token.
    pub fn next(&mut self) -> Result<Token, Error> {
        self.tokens.next()
    }

    pub fn check(&mut self, kind: TokenKind) -> Result<bool, Error> {
        Ok(self.peek_kind(0)? == kind)
    }

    pub fn check_any(&mut self, kinds: &[TokenKind]) -> Result<bool, Error> {
        Ok(self.peek(0)?.is_one_of_many(kinds))
    }

    pub fn at_eof(&mut self) -> Result<bool, Error> {
        self.tokens.is_eof()
    }

    /// Consumes the current token if it has the given kind.
    pub fn accept(&mut self, kind: TokenKind) -> Result<bool, Error> {
        if self.check(kind)? {
            self.next()?;
            return Ok(true);
        }

        Ok(false)
    }

    /// Consumes a token of the given kind. On a mismatch records a
    /// diagnostic, recovers, and returns `None`.
    pub fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Option<Token>, Error> {
        if self.check(kind)? {
            return Ok(Some(self.next()?));
        }

        self.error_here(message)?;
        self.synchronize()?;
        Ok(None)
    }

    /// Like [`Parser::expect`] but accepts any of `kinds`.
    pub fn expect_any(
        &mut self,
        kinds: &[TokenKind],
        message: &str,
    ) -> Result<Option<Token>, Error> {
        if self.check_any(kinds)? {
            return Ok(Some(self.next()?));
        }

        self.error_here(message)?;
        self.synchronize()?;
        Ok(None)
    }

    /// Records a diagnostic against `token`.
    pub fn error_at(&mut self, token: &Token, message: impl Into<String>) {
        let diagnostic = Diagnostic::new(token.position(), message, token.value.clone());
        debug!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Records a diagnostic against the current token.
    pub fn error_here(&mut self, message: impl Into<String>) -> Result<(), Error> {
        let token = self.peek(0)?.clone();
        self.error_at(&token, message);
        Ok(())
    }

    /// Panic mode: drops tokens until one in [`SYNC_TOKENS`]. A `;` is
    /// consumed, `}` and `EOF` are left for the enclosing rule.
    pub fn synchronize(&mut self) -> Result<(), Error> {
        let mut skipped = 0usize;

        loop {
            let token = self.peek(0)?;
            match token.kind {
                TokenKind::Semicolon => {
                    self.next()?;
                    break;
                }
                TokenKind::CloseCurly | TokenKind::EOF => break,
                _ => {
                    trace!("panic mode skips {}", token);
                    self.next()?;
                    skipped += 1;
                }
            }
        }

        debug!("recovered after skipping {} token(s)", skipped);
        Ok(())
    }

    /// Parses the whole input.
    pub fn parse(mut self) -> Result<ParseOutput, Error> {
        let file = parse_file(&mut self)?;

        debug!(
            "parsed {} declaration(s) and {} import(s) with {} diagnostic(s)",
            file.declarations.len(),
            file.imports.len(),
            self.diagnostics.len()
        );

        Ok(ParseOutput {
            file,
            diagnostics: self.diagnostics,
        })
    }
}

/// Lexes and parses `source` in one go.
pub fn parse(source: &str) -> Result<ParseOutput, Error> {
    Parser::new(Lexer::new(source)).parse()
}
