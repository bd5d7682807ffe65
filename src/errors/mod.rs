//! Error types for the front-end.
//!
//! Two tiers are kept apart:
//!
//! - [`errors::Error`] - fatal lexical failures carrying a position and a tip
//! - [`errors::Diagnostic`] - recoverable syntax errors collected by the parser

pub mod errors;
