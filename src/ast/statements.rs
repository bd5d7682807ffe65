use super::{
    ast::{DestructuringDecl, PropertyDecl},
    expressions::Expr,
};

/// Statements allowed inside a block.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Property(PropertyDecl),
    Destructuring(DestructuringDecl),
    Block(BlockStmt),
    If(IfStmt),
    For(ForStmt),
    Expression(ExpressionStmt),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
}

impl BlockStmt {
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

/// `for (variable in iterable) body`. Either header part may be missing
/// after a syntax error.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub variable: Option<String>,
    pub iterable: Option<Expr>,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
}
