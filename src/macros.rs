//! Utility macros for the front-end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//!
//! This reduces boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's source text
/// * `$position` - The position of the token's first character
/// * `$literal` - Optional decoded literal value (defaults to `None`)
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::IntLiteral, "42".to_string(), position);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $position:expr) => {
        Token {
            kind: $kind,
            value: $value,
            line: $position.line,
            column: $position.column,
            literal: None,
        }
    };
    ($kind:expr, $value:expr, $position:expr, $literal:expr) => {
        Token {
            kind: $kind,
            value: $value,
            line: $position.line,
            column: $position.column,
            literal: $literal,
        }
    };
}
