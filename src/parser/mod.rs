//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms the lexer's token stream
//! into a [`crate::ast::ast::KotlinFile`]. Declarations and statements are
//! parsed by recursive descent; expressions by precedence climbing over the
//! levels in [`lookups::BindingPower`].
//!
//! - Statement parsing (package, imports, classes, objects, functions,
//!   properties, blocks, control flow)
//! - Expression parsing (binary ops, unary/postfix ops, calls, member access,
//!   string templates, literals)
//! - Panic-mode error recovery with collected diagnostics

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
