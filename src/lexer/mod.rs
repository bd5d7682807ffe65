//! Lexical analysis module.
//!
//! Converts source text into a stream of tokens for parsing. It handles:
//!
//! - Shebang lines, whitespace, line comments and nested block comments
//! - Classification of words into hard, modifier and soft keywords
//! - Numeric literals (decimal, float, binary, hexadecimal, suffixes)
//! - Char literals, backtick-quoted identifiers
//! - Interpolated strings, surfaced as a sequence of sub-tokens
//! - Operators by maximal munch, single-character symbols
//!
//! [`token_buffer::TokenBuffer`] wraps the lexer with unbounded lookahead.

pub mod lexer;
pub mod token_buffer;
pub mod tokens;

#[cfg(test)]
mod lexer_property_tests;
