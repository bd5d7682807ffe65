use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{ast::expressions::BinaryOp, lexer::tokens::TokenKind};

/// Binary precedence levels, lowest first.
#[derive(PartialEq, PartialOrd, Eq, Ord, Clone, Copy, Debug, Hash)]
pub enum BindingPower {
    Elvis,
    Or,
    And,
    Equality,
    Relational,
    Additive,
    Multiplicative,
}

impl BindingPower {
    pub const LOWEST: BindingPower = BindingPower::Elvis;

    /// The level whose expressions form this level's operands. `None` means
    /// operands are unary expressions.
    pub fn tighter(self) -> Option<BindingPower> {
        match self {
            BindingPower::Elvis => Some(BindingPower::Or),
            BindingPower::Or => Some(BindingPower::And),
            BindingPower::And => Some(BindingPower::Equality),
            BindingPower::Equality => Some(BindingPower::Relational),
            BindingPower::Relational => Some(BindingPower::Additive),
            BindingPower::Additive => Some(BindingPower::Multiplicative),
            BindingPower::Multiplicative => None,
        }
    }
}

lazy_static! {
    /// Single-token binary operators and the level they bind at.
    pub static ref BINARY_LOOKUP: HashMap<TokenKind, (BindingPower, BinaryOp)> = {
        let mut map = HashMap::new();
        map.insert(TokenKind::Elvis, (BindingPower::Elvis, BinaryOp::Elvis));

        // Logical
        map.insert(TokenKind::Or, (BindingPower::Or, BinaryOp::Or));
        map.insert(TokenKind::And, (BindingPower::And, BinaryOp::And));

        // Equality
        map.insert(TokenKind::Equals, (BindingPower::Equality, BinaryOp::Equals));
        map.insert(TokenKind::NotEquals, (BindingPower::Equality, BinaryOp::NotEquals));
        map.insert(TokenKind::EqualsStrict, (BindingPower::Equality, BinaryOp::StrictEquals));
        map.insert(TokenKind::NotEqualsStrict, (BindingPower::Equality, BinaryOp::StrictNotEquals));

        // Relational, ranges and keyword operators
        map.insert(TokenKind::Less, (BindingPower::Relational, BinaryOp::Less));
        map.insert(TokenKind::LessEquals, (BindingPower::Relational, BinaryOp::LessEquals));
        map.insert(TokenKind::Greater, (BindingPower::Relational, BinaryOp::Greater));
        map.insert(TokenKind::GreaterEquals, (BindingPower::Relational, BinaryOp::GreaterEquals));
        map.insert(TokenKind::Range, (BindingPower::Relational, BinaryOp::Range));
        map.insert(TokenKind::RangeUntil, (BindingPower::Relational, BinaryOp::RangeUntil));
        map.insert(TokenKind::In, (BindingPower::Relational, BinaryOp::In));
        map.insert(TokenKind::NotIn, (BindingPower::Relational, BinaryOp::NotIn));
        map.insert(TokenKind::Is, (BindingPower::Relational, BinaryOp::Is));
        map.insert(TokenKind::NotIs, (BindingPower::Relational, BinaryOp::NotIs));
        map.insert(TokenKind::As, (BindingPower::Relational, BinaryOp::As));
        map.insert(TokenKind::AsSafe, (BindingPower::Relational, BinaryOp::AsSafe));

        // Additive and multiplicative
        map.insert(TokenKind::Plus, (BindingPower::Additive, BinaryOp::Add));
        map.insert(TokenKind::Dash, (BindingPower::Additive, BinaryOp::Subtract));
        map.insert(TokenKind::PlusEquals, (BindingPower::Additive, BinaryOp::AddAssign));
        map.insert(TokenKind::MinusEquals, (BindingPower::Additive, BinaryOp::SubtractAssign));
        map.insert(TokenKind::Star, (BindingPower::Multiplicative, BinaryOp::Multiply));
        map.insert(TokenKind::Slash, (BindingPower::Multiplicative, BinaryOp::Divide));
        map.insert(TokenKind::Percent, (BindingPower::Multiplicative, BinaryOp::Modulo));
        map
    };
}

/// Looks up `kind` as a binary operator binding exactly at `level`.
pub fn binary_operator(kind: TokenKind, level: BindingPower) -> Option<BinaryOp> {
    match BINARY_LOOKUP.get(&kind) {
        Some((bp, op)) if *bp == level => Some(*op),
        _ => None,
    }
}

/// Tokens that may start an expression. Used by the tolerant property rule.
pub const EXPRESSION_STARTS: [TokenKind; 6] = [
    TokenKind::IntLiteral,
    TokenKind::FloatLiteral,
    TokenKind::CharLiteral,
    TokenKind::StringStart,
    TokenKind::Identifier,
    TokenKind::OpenParen,
];

/// Tokens usable as a name: plain, backtick-quoted, or a soft keyword.
pub const NAME_TOKENS: [TokenKind; 3] = [
    TokenKind::Identifier,
    TokenKind::QuotedIdentifier,
    TokenKind::SoftKeyword,
];
