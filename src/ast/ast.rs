use std::fmt::Display;

use super::{expressions::Expr, statements::BlockStmt};

/// Root of a parsed source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KotlinFile {
    pub package: Option<PackageDecl>,
    pub imports: Vec<ImportDecl>,
    pub declarations: Vec<Decl>,
}

/// `package a.b.c;`
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDecl {
    pub name: String,
}

/// `import a.b.C;` or `import a.b.*;`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub path: String,
}

/// Declarations found at top level and inside class/object bodies.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Class(ClassDecl),
    Object(ObjectDecl),
    Function(FunctionDecl),
    Property(PropertyDecl),
    Destructuring(DestructuringDecl),
}

impl Decl {
    pub fn name(&self) -> Option<&str> {
        match self {
            Decl::Class(class) => Some(&class.name),
            Decl::Object(object) => object.name.as_deref(),
            Decl::Function(function) => Some(&function.name),
            Decl::Property(property) => Some(&property.name),
            Decl::Destructuring(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    pub modifiers: Vec<String>,
    /// `None` for a class declared without a body.
    pub body: Option<Vec<Decl>>,
}

/// `object Name { ... }`, or a nameless `companion object { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDecl {
    pub name: Option<String>,
    pub modifiers: Vec<String>,
    pub members: Vec<Decl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub modifiers: Vec<String>,
    pub params: Vec<Param>,
    pub return_type: Option<TypeRef>,
    /// `None` for a bodiless (abstract/forward) declaration.
    pub body: Option<BlockStmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub type_ref: Option<TypeRef>,
}

/// A bare type name, optionally nullable. No generics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub name: String,
    pub nullable: bool,
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.nullable {
            write!(f, "{}?", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Val,
    Var,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub kind: PropertyKind,
    pub name: String,
    pub modifiers: Vec<String>,
    pub type_ref: Option<TypeRef>,
    pub value: Option<Expr>,
}

/// `val (a, b) = expr;`
#[derive(Debug, Clone, PartialEq)]
pub struct DestructuringDecl {
    pub kind: PropertyKind,
    pub names: Vec<String>,
    pub modifiers: Vec<String>,
    pub value: Option<Expr>,
}
