//! Declaration and statement rules.
//!
//! A rule that fails before it has anything to build on records a
//! diagnostic, recovers, and returns `Ok(None)`. Callers drop the missing
//! node and re-check the current token before looping again.

use crate::{
    ast::{
        ast::{
            ClassDecl, Decl, DestructuringDecl, FunctionDecl, ImportDecl, KotlinFile, ObjectDecl,
            PackageDecl, Param, PropertyDecl, PropertyKind, TypeRef,
        },
        statements::{BlockStmt, ExpressionStmt, ForStmt, IfStmt, Stmt},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    expr::parse_expression,
    lookups::{EXPRESSION_STARTS, NAME_TOKENS},
    parser::Parser,
};

/// `val`/`var` forms, which appear both as declarations and as statements.
enum Binding {
    Property(PropertyDecl),
    Destructuring(DestructuringDecl),
}

impl From<Binding> for Decl {
    fn from(binding: Binding) -> Self {
        match binding {
            Binding::Property(property) => Decl::Property(property),
            Binding::Destructuring(destructuring) => Decl::Destructuring(destructuring),
        }
    }
}

impl From<Binding> for Stmt {
    fn from(binding: Binding) -> Self {
        match binding {
            Binding::Property(property) => Stmt::Property(property),
            Binding::Destructuring(destructuring) => Stmt::Destructuring(destructuring),
        }
    }
}

pub fn parse_file(parser: &mut Parser) -> Result<KotlinFile, Error> {
    let mut file = KotlinFile::default();

    if parser.check(TokenKind::Package)? {
        file.package = Some(parse_package_decl(parser)?);
    }

    while is_import_start(parser)? {
        file.imports.push(parse_import_decl(parser)?);
    }

    while !parser.at_eof()? {
        if let Some(decl) = parse_top_level_decl(parser)? {
            file.declarations.push(decl);
        }
    }

    Ok(file)
}

fn is_import_start(parser: &mut Parser) -> Result<bool, Error> {
    let token = parser.peek(0)?;
    Ok(token.kind == TokenKind::SoftKeyword && token.value == "import")
}

pub fn parse_package_decl(parser: &mut Parser) -> Result<PackageDecl, Error> {
    parser.next()?;
    let name = parse_dotted_name(parser, false)?;
    parser.expect(
        TokenKind::Semicolon,
        "expected ';' after package declaration",
    )?;

    Ok(PackageDecl { name })
}

pub fn parse_import_decl(parser: &mut Parser) -> Result<ImportDecl, Error> {
    parser.next()?;
    let path = parse_dotted_name(parser, true)?;
    parser.expect(TokenKind::Semicolon, "expected ';' after import")?;

    Ok(ImportDecl { path })
}

/// `a.b.c`, optionally ending in `.*`.
fn parse_dotted_name(parser: &mut Parser, allow_star: bool) -> Result<String, Error> {
    let mut parts = vec![];

    if !parser.check_any(&NAME_TOKENS)? {
        return Ok(String::new());
    }
    parts.push(parser.next()?.value);

    while parser.accept(TokenKind::Dot)? {
        if allow_star && parser.accept(TokenKind::Star)? {
            parts.push(String::from("*"));
            break;
        }

        if !parser.check_any(&NAME_TOKENS)? {
            parser.error_here("expected identifier after '.'")?;
            break;
        }
        parts.push(parser.next()?.value);
    }

    Ok(parts.join("."))
}

pub fn parse_top_level_decl(parser: &mut Parser) -> Result<Option<Decl>, Error> {
    let modifiers = collect_modifiers(parser)?;

    match parser.peek_kind(0)? {
        TokenKind::Class => parse_class_decl(parser, modifiers),
        TokenKind::Fun => parse_function_decl(parser, modifiers),
        TokenKind::Val | TokenKind::Var => {
            Ok(parse_property_decl(parser, modifiers)?.map(Decl::from))
        }
        TokenKind::Semicolon => {
            parser.next()?;
            Ok(None)
        }
        kind => {
            parser.error_here("invalid top-level declaration")?;
            // a stray `}` is not a sync point here, nothing encloses it
            if kind == TokenKind::CloseCurly {
                parser.next()?;
            } else {
                parser.synchronize()?;
            }
            Ok(None)
        }
    }
}

fn collect_modifiers(parser: &mut Parser) -> Result<Vec<String>, Error> {
    let mut modifiers = vec![];
    while parser.check(TokenKind::Modifier)? {
        modifiers.push(parser.next()?.value);
    }

    Ok(modifiers)
}

pub fn parse_class_decl(
    parser: &mut Parser,
    modifiers: Vec<String>,
) -> Result<Option<Decl>, Error> {
    parser.next()?;

    let Some(name) = parser.expect_any(&NAME_TOKENS, "expected class name after 'class'")? else {
        return Ok(None);
    };

    let mut body = None;
    if parser.accept(TokenKind::OpenCurly)? {
        let members = parse_members(parser, "class")?;
        parser.expect(TokenKind::CloseCurly, "expected '}' to close class body")?;
        body = Some(members);
    }

    Ok(Some(Decl::Class(ClassDecl {
        name: name.value,
        modifiers,
        body,
    })))
}

/// Members of a class or object body up to (not including) the closing `}`:
/// modifiers, then a property, function or nested object.
fn parse_members(parser: &mut Parser, owner: &str) -> Result<Vec<Decl>, Error> {
    let mut members = vec![];

    while !parser.check_any(&[TokenKind::CloseCurly, TokenKind::EOF])? {
        let member_modifiers = collect_modifiers(parser)?;

        let member = match parser.peek_kind(0)? {
            TokenKind::Val | TokenKind::Var => {
                parse_property_decl(parser, member_modifiers)?.map(Decl::from)
            }
            TokenKind::Fun => parse_function_decl(parser, member_modifiers)?,
            TokenKind::Object => parse_object_decl(parser, member_modifiers)?,
            _ => {
                parser.error_here(format!("unrecognised {} member (skipped)", owner))?;
                parser.synchronize()?;
                None
            }
        };

        if let Some(member) = member {
            members.push(member);
        }
    }

    Ok(members)
}

/// `object Name? { members }`, with the same members a class body takes.
pub fn parse_object_decl(
    parser: &mut Parser,
    modifiers: Vec<String>,
) -> Result<Option<Decl>, Error> {
    parser.next()?;

    let name = if parser.check_any(&NAME_TOKENS)? {
        Some(parser.next()?.value)
    } else {
        None
    };

    let mut members = vec![];
    if parser.accept(TokenKind::OpenCurly)? {
        members = parse_members(parser, "object")?;
        parser.expect(TokenKind::CloseCurly, "expected '}' to close object body")?;
    }

    Ok(Some(Decl::Object(ObjectDecl {
        name,
        modifiers,
        members,
    })))
}

/// `fun name(params) (: Type)? ({ body } | ;?)`
pub fn parse_function_decl(
    parser: &mut Parser,
    modifiers: Vec<String>,
) -> Result<Option<Decl>, Error> {
    parser.next()?;

    let Some(name) = parser.expect_any(&NAME_TOKENS, "expected function name")? else {
        return Ok(None);
    };

    if parser
        .expect(TokenKind::OpenParen, "expected '(' in function declaration")?
        .is_none()
    {
        return Ok(None);
    }

    let params = parse_params(parser)?;
    parser.expect(TokenKind::CloseParen, "expected ')' after parameters")?;

    let mut return_type = None;
    if parser.accept(TokenKind::Colon)? {
        return_type = parse_type_ref(parser)?;
        if return_type.is_none() {
            parser.error_here("expected return type after ':'")?;
        }
    }

    let body = if parser.accept(TokenKind::OpenCurly)? {
        Some(parse_block(parser)?)
    } else {
        parser.accept(TokenKind::Semicolon)?;
        None
    };

    Ok(Some(Decl::Function(FunctionDecl {
        name: name.value,
        modifiers,
        params,
        return_type,
        body,
    })))
}

fn parse_params(parser: &mut Parser) -> Result<Vec<Param>, Error> {
    let mut params = vec![];
    if parser.check(TokenKind::CloseParen)? {
        return Ok(params);
    }

    loop {
        if !parser.check_any(&NAME_TOKENS)? {
            parser.error_here("invalid parameter")?;
            parser.synchronize()?;
            break;
        }

        let name = parser.next()?.value;
        let type_ref = if parser.accept(TokenKind::Colon)? {
            parse_type_ref(parser)?
        } else {
            None
        };
        params.push(Param { name, type_ref });

        if !parser.accept(TokenKind::Comma)? {
            break;
        }
    }

    Ok(params)
}

/// A bare type name with an optional `?`. Consumes nothing when the current
/// token cannot name a type.
fn parse_type_ref(parser: &mut Parser) -> Result<Option<TypeRef>, Error> {
    if !parser.check_any(&NAME_TOKENS)? {
        return Ok(None);
    }

    let name = parser.next()?.value;
    let nullable = parser.accept(TokenKind::Question)?;
    Ok(Some(TypeRef { name, nullable }))
}

fn parse_property_decl(
    parser: &mut Parser,
    modifiers: Vec<String>,
) -> Result<Option<Binding>, Error> {
    let kind = match parser.next()?.kind {
        TokenKind::Var => PropertyKind::Var,
        _ => PropertyKind::Val,
    };

    if parser.check(TokenKind::OpenParen)? {
        return parse_destructuring_decl(parser, kind, modifiers).map(Some);
    }

    let Some(name) = parser.expect_any(&NAME_TOKENS, "expected property name")? else {
        return Ok(None);
    };

    let mut type_ref = None;
    let mut assumed_initializer = false;

    if parser.accept(TokenKind::Colon)? {
        type_ref = parse_type_ref(parser)?;

        if type_ref.is_none() {
            // `var x: 1;` reads as a typo for `var x = 1;`
            if parser.check_any(&EXPRESSION_STARTS)? {
                parser.error_here(
                    "expected type after ':', treating what follows as the initializer",
                )?;
                assumed_initializer = true;
            } else {
                parser.error_here("expected type after ':' in property")?;
            }
        }
    }

    let value = if parser.accept(TokenKind::Assignment)? || assumed_initializer {
        Some(parse_expression(parser)?)
    } else {
        None
    };

    if !parser.accept(TokenKind::Semicolon)? {
        parser.error_here("expected ';' after property declaration")?;
        parser.synchronize()?;
    }

    Ok(Some(Binding::Property(PropertyDecl {
        kind,
        name: name.value,
        modifiers,
        type_ref,
        value,
    })))
}

/// `val (a, b) = expr;`, entered at the `(`.
fn parse_destructuring_decl(
    parser: &mut Parser,
    kind: PropertyKind,
    modifiers: Vec<String>,
) -> Result<Binding, Error> {
    parser.next()?;

    let mut names = vec![];
    while !parser.check_any(&[TokenKind::CloseParen, TokenKind::EOF])? {
        if !parser.check_any(&NAME_TOKENS)? {
            parser.error_here("expected identifier in destructuring declaration")?;
            parser.synchronize()?;
            break;
        }
        names.push(parser.next()?.value);

        if !parser.accept(TokenKind::Comma)? {
            break;
        }
    }
    parser.expect(
        TokenKind::CloseParen,
        "expected ')' to close destructuring declaration",
    )?;

    let mut value = None;
    if parser.accept(TokenKind::Assignment)? {
        value = Some(parse_expression(parser)?);
        parser.expect(TokenKind::Semicolon, "expected ';' after declaration")?;
    } else {
        parser.error_here("expected '=' in destructuring declaration")?;
        parser.synchronize()?;
    }

    Ok(Binding::Destructuring(DestructuringDecl {
        kind,
        names,
        modifiers,
        value,
    }))
}

/// Statements up to the closing `}`. The opening `{` is already consumed.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let mut body = vec![];

    while !parser.check_any(&[TokenKind::CloseCurly, TokenKind::EOF])? {
        if let Some(stmt) = parse_stmt(parser)? {
            body.push(stmt);
        }
    }

    parser.expect(TokenKind::CloseCurly, "expected '}' to close block")?;
    Ok(BlockStmt { body })
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    match parser.peek_kind(0)? {
        TokenKind::Val | TokenKind::Var => {
            Ok(parse_property_decl(parser, vec![])?.map(Stmt::from))
        }
        TokenKind::If => parse_if_stmt(parser),
        TokenKind::For => parse_for_stmt(parser),
        TokenKind::OpenCurly => {
            parser.next()?;
            Ok(Some(Stmt::Block(parse_block(parser)?)))
        }
        _ => {
            let expression = parse_expression(parser)?;

            if !parser.accept(TokenKind::Semicolon)? {
                parser.error_here("expected ';' after statement")?;
                parser.synchronize()?;
            }

            Ok(Some(Stmt::Expression(ExpressionStmt { expression })))
        }
    }
}

/// Body of an `if`, `else` or `for`. A missing body becomes an empty block.
fn parse_branch(parser: &mut Parser, context: &str) -> Result<Box<Stmt>, Error> {
    if parser.check_any(&[TokenKind::CloseCurly, TokenKind::EOF])? {
        parser.error_here(format!("expected statement after {}", context))?;
        return Ok(Box::new(Stmt::Block(BlockStmt::default())));
    }

    let stmt = parse_stmt(parser)?.unwrap_or_else(|| Stmt::Block(BlockStmt::default()));
    Ok(Box::new(stmt))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    parser.next()?;

    if parser
        .expect(TokenKind::OpenParen, "expected '(' after 'if'")?
        .is_none()
    {
        return Ok(None);
    }

    let condition = parse_expression(parser)?;
    parser.expect(TokenKind::CloseParen, "expected ')' after if condition")?;

    let then_branch = parse_branch(parser, "'if'")?;

    let else_branch = if parser.accept(TokenKind::Else)? {
        Some(parse_branch(parser, "'else'")?)
    } else {
        None
    };

    Ok(Some(Stmt::If(IfStmt {
        condition,
        then_branch,
        else_branch,
    })))
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    parser.next()?;

    if parser
        .expect(TokenKind::OpenParen, "expected '(' after 'for'")?
        .is_none()
    {
        return Ok(None);
    }

    let variable = if parser.check_any(&NAME_TOKENS)? {
        Some(parser.next()?.value)
    } else {
        parser.error_here("expected loop variable")?;
        None
    };

    let iterable = if parser.accept(TokenKind::In)? {
        Some(parse_expression(parser)?)
    } else {
        None
    };

    parser.expect(TokenKind::CloseParen, "expected ')' after for header")?;
    let body = parse_branch(parser, "for header")?;

    Ok(Some(Stmt::For(ForStmt {
        variable,
        iterable,
        body,
    })))
}
