use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A fatal lexical failure. Tokenization stops at the first one.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedBlockComment => "UnterminatedBlockComment",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedInterpolation => "UnterminatedInterpolation",
            ErrorImpl::InvalidInterpolation { .. } => "InvalidInterpolation",
            ErrorImpl::InvalidCharLiteral { .. } => "InvalidCharLiteral",
            ErrorImpl::UnterminatedQuotedIdentifier => "UnterminatedQuotedIdentifier",
            ErrorImpl::UnrecognisedCharacter { .. } => "UnrecognisedCharacter",
            ErrorImpl::MissingDigits { .. } => "MissingDigits",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnterminatedBlockComment => ErrorTip::Suggestion(String::from(
                "every `/*` needs a matching `*/`, including nested ones",
            )),
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("string literal is missing its closing `\"`"))
            }
            ErrorImpl::UnterminatedInterpolation => {
                ErrorTip::Suggestion(String::from("`${` interpolation is missing its closing `}`"))
            }
            ErrorImpl::InvalidInterpolation { found } => ErrorTip::Suggestion(format!(
                "`$` must be followed by a name or `{{`, found {}; escape it as `\\$`",
                found
            )),
            ErrorImpl::InvalidCharLiteral { .. } => ErrorTip::Suggestion(String::from(
                "a char literal holds exactly one character or one escape sequence",
            )),
            ErrorImpl::UnterminatedQuotedIdentifier => {
                ErrorTip::Suggestion(String::from("quoted identifier is missing its closing '`'"))
            }
            ErrorImpl::UnrecognisedCharacter { .. } => ErrorTip::None,
            ErrorImpl::MissingDigits { radix } => {
                ErrorTip::Suggestion(format!("{} literal needs at least one digit", radix))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lexical error at {}: {}", self.position, self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unterminated block comment")]
    UnterminatedBlockComment,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated string interpolation")]
    UnterminatedInterpolation,
    #[error("invalid string interpolation: {found}")]
    InvalidInterpolation { found: String },
    #[error("invalid char literal: {reason}")]
    InvalidCharLiteral { reason: String },
    #[error("unterminated quoted identifier")]
    UnterminatedQuotedIdentifier,
    #[error("unrecognised character {character:?}")]
    UnrecognisedCharacter { character: char },
    #[error("{radix} literal without digits")]
    MissingDigits { radix: &'static str },
}

/// A recoverable syntax error recorded by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub position: Position,
    pub message: String,
    pub lexeme: String,
}

impl Diagnostic {
    pub fn new(position: Position, message: impl Into<String>, lexeme: impl Into<String>) -> Self {
        Diagnostic {
            position,
            message: message.into(),
            lexeme: lexeme.into(),
        }
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Syntax error at {}: {} (token='{}')",
            self.position, self.message, self.lexeme
        )
    }
}
