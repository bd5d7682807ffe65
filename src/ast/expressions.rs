use std::fmt::Display;

use crate::{lexer::tokens::LiteralValue, Position};

/// Expression nodes.
///
/// `Error` is a recovery placeholder: it keeps the operand slot of a
/// malformed expression filled so the surrounding tree stays well-formed.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Postfix {
        op: PostfixOp,
        operand: Box<Expr>,
    },
    Literal {
        kind: LiteralKind,
        text: String,
        value: Option<LiteralValue>,
    },
    String {
        parts: Vec<StringPart>,
    },
    Identifier {
        name: String,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Member {
        target: Box<Expr>,
        op: MemberOp,
        member: String,
    },
    Error {
        token: String,
        position: Position,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Expr::Identifier { name: name.into() }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Expr::Error { .. })
    }
}

/// One segment of an interpolated string, in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum StringPart {
    /// Literal text with escapes decoded.
    Text(String),
    /// `$name`
    InterpId(String),
    /// `${...}`, raw expression text.
    InterpExpr(String),
    /// A token that has no business inside a string.
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Int,
    Float,
    Char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Elvis,
    Or,
    And,
    Equals,
    NotEquals,
    StrictEquals,
    StrictNotEquals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Range,
    RangeUntil,
    In,
    NotIn,
    Is,
    NotIs,
    As,
    AsSafe,
    Add,
    Subtract,
    AddAssign,
    SubtractAssign,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Elvis => "?:",
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Equals => "==",
            BinaryOp::NotEquals => "!=",
            BinaryOp::StrictEquals => "===",
            BinaryOp::StrictNotEquals => "!==",
            BinaryOp::Less => "<",
            BinaryOp::LessEquals => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEquals => ">=",
            BinaryOp::Range => "..",
            BinaryOp::RangeUntil => "..<",
            BinaryOp::In => "in",
            BinaryOp::NotIn => "!in",
            BinaryOp::Is => "is",
            BinaryOp::NotIs => "!is",
            BinaryOp::As => "as",
            BinaryOp::AsSafe => "as?",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::AddAssign => "+=",
            BinaryOp::SubtractAssign => "-=",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Negate,
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOp::Not => write!(f, "!"),
            UnaryOp::Negate => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostfixOp {
    Increment,
    Decrement,
}

impl Display for PostfixOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostfixOp::Increment => write!(f, "++"),
            PostfixOp::Decrement => write!(f, "--"),
        }
    }
}

/// How a member is reached: `.`, `?.` or `!!`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberOp {
    Dot,
    SafeCall,
    NotNull,
}

impl Display for MemberOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberOp::Dot => write!(f, "."),
            MemberOp::SafeCall => write!(f, "?."),
            MemberOp::NotNull => write!(f, "!!"),
        }
    }
}
