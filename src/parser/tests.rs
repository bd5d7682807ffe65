//! Unit tests for the parser module.
//!
//! This module contains tests for parsing:
//! - Package and import headers
//! - Class, object, function and property declarations
//! - Statements and control flow
//! - Expression precedence, access chains and string templates
//! - Diagnostics and panic-mode recovery

use crate::{
    ast::{
        ast::{Decl, FunctionDecl, KotlinFile, PropertyDecl, PropertyKind, TypeRef},
        expressions::{BinaryOp, Expr, LiteralKind, MemberOp, PostfixOp, StringPart, UnaryOp},
        statements::Stmt,
    },
    errors::errors::ErrorImpl,
    lexer::tokens::LiteralValue,
    Position,
};

use super::parser::{parse, ParseOutput};

fn parse_source(source: &str) -> ParseOutput {
    parse(source).unwrap()
}

fn parse_clean(source: &str) -> KotlinFile {
    let output = parse_source(source);
    assert!(
        output.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        output.diagnostics
    );
    output.file
}

fn property(decl: &Decl) -> &PropertyDecl {
    match decl {
        Decl::Property(property) => property,
        other => panic!("expected a property, got {:?}", other),
    }
}

fn function(decl: &Decl) -> &FunctionDecl {
    match decl {
        Decl::Function(function) => function,
        other => panic!("expected a function, got {:?}", other),
    }
}

/// Parses `val v = <source>;` and returns the initializer.
fn expr(source: &str) -> Expr {
    let file = parse_clean(&format!("val v = {};", source));
    property(&file.declarations[0]).value.clone().unwrap()
}

/// Parses `source` as the body of `fun main()` and returns its statements.
fn body(source: &str) -> Vec<Stmt> {
    let file = parse_clean(&format!("fun main() {{ {} }}", source));
    function(&file.declarations[0]).body.clone().unwrap().body
}

fn int(value: u64) -> Expr {
    Expr::Literal {
        kind: LiteralKind::Int,
        text: value.to_string(),
        value: Some(LiteralValue::Integer(value)),
    }
}

fn ident(name: &str) -> Expr {
    Expr::identifier(name)
}

fn member(target: Expr, op: MemberOp, name: &str) -> Expr {
    Expr::Member {
        target: Box::new(target),
        op,
        member: name.to_string(),
    }
}

#[test]
fn test_parse_empty_input() {
    let file = parse_clean("");
    assert_eq!(file, KotlinFile::default());
}

#[test]
fn test_parse_package_and_imports() {
    let file = parse_clean("package teste.lexer;\nimport kotlin.math.*;\nimport a.b.C;\n");

    assert_eq!(file.package.unwrap().name, "teste.lexer");
    let paths: Vec<_> = file.imports.iter().map(|import| import.path.as_str()).collect();
    assert_eq!(paths, vec!["kotlin.math.*", "a.b.C"]);
    assert!(file.declarations.is_empty());
}

#[test]
fn test_package_without_semicolon() {
    let output = parse_source("package a.b\nval x = 1;");

    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.file.package.unwrap().name, "a.b");
    // recovery skips through the next `;`
    assert!(output.file.declarations.is_empty());
}

#[test]
fn test_parse_property_declarations() {
    let file = parse_clean("val a = 1;\nvar b: Int = 2;\nprivate lateinit var c: String?;");

    let a = property(&file.declarations[0]);
    assert_eq!(a.kind, PropertyKind::Val);
    assert_eq!(a.name, "a");
    assert_eq!(a.type_ref, None);
    assert_eq!(a.value, Some(int(1)));

    let b = property(&file.declarations[1]);
    assert_eq!(b.kind, PropertyKind::Var);
    assert_eq!(
        b.type_ref,
        Some(TypeRef {
            name: "Int".to_string(),
            nullable: false
        })
    );

    let c = property(&file.declarations[2]);
    assert_eq!(c.modifiers, vec!["private", "lateinit"]);
    assert_eq!(c.type_ref.as_ref().map(|t| t.to_string()), Some("String?".to_string()));
    assert_eq!(c.value, None);
}

#[test]
fn test_quoted_and_soft_keyword_names() {
    let file = parse_clean("val `class` = 1;\nval value = field;");

    assert_eq!(property(&file.declarations[0]).name, "class");
    let value = property(&file.declarations[1]);
    assert_eq!(value.name, "value");
    assert_eq!(value.value, Some(ident("field")));
}

#[test]
fn test_tolerant_property_initializer() {
    let output = parse_source("var dd: 99;");

    assert_eq!(output.diagnostics.len(), 1);
    let diagnostic = &output.diagnostics[0];
    assert_eq!(diagnostic.position, Position::new(1, 9));
    assert_eq!(diagnostic.lexeme, "99");

    let dd = property(&output.file.declarations[0]);
    assert_eq!(dd.name, "dd");
    assert_eq!(dd.kind, PropertyKind::Var);
    assert_eq!(dd.type_ref, None);
    assert_eq!(dd.value, Some(int(99)));
}

#[test]
fn test_tolerant_rule_applies_to_strings_and_parens() {
    let output = parse_source("val s: \"x\";\nval p: (1);");

    assert_eq!(output.diagnostics.len(), 2);
    assert!(matches!(
        property(&output.file.declarations[0]).value,
        Some(Expr::String { .. })
    ));
    assert_eq!(property(&output.file.declarations[1]).value, Some(int(1)));
}

#[test]
fn test_colon_followed_by_operator_is_not_tolerated() {
    let output = parse_source("val x: = 1;");

    assert_eq!(output.diagnostics.len(), 1);
    let x = property(&output.file.declarations[0]);
    assert_eq!(x.type_ref, None);
    assert_eq!(x.value, Some(int(1)));
}

#[test]
fn test_class_missing_member_terminator() {
    let output = parse_source("class Foo { val x = 1 }");

    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].lexeme, "}");

    let Decl::Class(class) = &output.file.declarations[0] else {
        panic!("expected a class");
    };
    assert_eq!(class.name, "Foo");

    let members = class.body.as_ref().unwrap();
    assert_eq!(members.len(), 1);
    let x = property(&members[0]);
    assert_eq!(x.name, "x");
    assert_eq!(x.value, Some(int(1)));
}

#[test]
fn test_class_with_members() {
    let source = r#"
        public final class Example {
            companion object {
                const val LIMIT = 42;
            }
            private var count: Int = 0;
            fun bump(step: Int) { count += step; }
        }
        class Marker
    "#;
    let file = parse_clean(source);
    assert_eq!(file.declarations.len(), 2);

    let Decl::Class(class) = &file.declarations[0] else {
        panic!("expected a class");
    };
    assert_eq!(class.name, "Example");
    assert_eq!(class.modifiers, vec!["public", "final"]);

    let members = class.body.as_ref().unwrap();
    assert_eq!(members.len(), 3);

    let Decl::Object(companion) = &members[0] else {
        panic!("expected an object");
    };
    assert_eq!(companion.name, None);
    assert_eq!(companion.modifiers, vec!["companion"]);
    assert_eq!(property(&companion.members[0]).modifiers, vec!["const"]);

    assert_eq!(property(&members[1]).modifiers, vec!["private"]);
    assert_eq!(function(&members[2]).params.len(), 1);

    let Decl::Class(marker) = &file.declarations[1] else {
        panic!("expected a class");
    };
    assert_eq!(marker.body, None);
}

#[test]
fn test_named_object_member() {
    let file = parse_clean("class A { object Registry { val size = 0; fun clear() {} } }");

    let Decl::Class(class) = &file.declarations[0] else {
        panic!("expected a class");
    };
    let Decl::Object(object) = &class.body.as_ref().unwrap()[0] else {
        panic!("expected an object");
    };
    assert_eq!(object.name.as_deref(), Some("Registry"));
    assert_eq!(object.members.len(), 2);
}

#[test]
fn test_object_members_take_modifiers() {
    let file = parse_clean(
        "class A { companion object { private fun f() {} val z = 1; } val y = 2; }",
    );

    assert_eq!(file.declarations.len(), 1);
    let Decl::Class(class) = &file.declarations[0] else {
        panic!("expected a class");
    };
    let members = class.body.as_ref().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(property(&members[1]).name, "y");

    let Decl::Object(companion) = &members[0] else {
        panic!("expected a companion object");
    };
    assert_eq!(companion.modifiers, vec!["companion"]);
    assert_eq!(companion.members.len(), 2);
    let Decl::Function(f) = &companion.members[0] else {
        panic!("expected a function");
    };
    assert_eq!(f.modifiers, vec!["private"]);
    assert_eq!(property(&companion.members[1]).name, "z");
}

#[test]
fn test_nested_object_member() {
    let file = parse_clean("class A { object B { internal object C { val d = 1; } } }");

    let Decl::Class(class) = &file.declarations[0] else {
        panic!("expected a class");
    };
    let Decl::Object(outer) = &class.body.as_ref().unwrap()[0] else {
        panic!("expected an object");
    };
    let Decl::Object(inner) = &outer.members[0] else {
        panic!("expected a nested object");
    };
    assert_eq!(inner.name.as_deref(), Some("C"));
    assert_eq!(inner.members.len(), 1);
}

#[test]
fn test_unrecognised_object_member_is_skipped() {
    let output = parse_source("class A { object B { 42; val x = 1; } }");

    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(
        output.diagnostics[0].message,
        "unrecognised object member (skipped)"
    );
}

#[test]
fn test_unrecognised_class_member_is_skipped() {
    let output = parse_source("class A { 42; val x = 1; }");

    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].lexeme, "42");

    let Decl::Class(class) = &output.file.declarations[0] else {
        panic!("expected a class");
    };
    let members = class.body.as_ref().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(property(&members[0]).name, "x");
}

#[test]
fn test_class_missing_closing_brace() {
    let output = parse_source("class A { val x = 1;");

    assert_eq!(output.diagnostics.len(), 1);
    let Decl::Class(class) = &output.file.declarations[0] else {
        panic!("expected a class");
    };
    assert_eq!(class.body.as_ref().map(Vec::len), Some(1));
}

#[test]
fn test_parse_function_declaration() {
    let file = parse_clean("fun add(a: Int, b: Int?): Long? { a + b; }");
    let add = function(&file.declarations[0]);

    assert_eq!(add.name, "add");
    assert_eq!(add.params.len(), 2);
    assert_eq!(add.params[0].name, "a");
    assert_eq!(add.params[1].type_ref.as_ref().unwrap().to_string(), "Int?");
    assert_eq!(add.return_type.as_ref().unwrap().to_string(), "Long?");
    assert_eq!(add.body.as_ref().unwrap().len(), 1);
}

#[test]
fn test_bodiless_function() {
    let file = parse_clean("abstract fun area(): Double;\nfun untyped(x)");

    let area = function(&file.declarations[0]);
    assert_eq!(area.modifiers, vec!["abstract"]);
    assert_eq!(area.body, None);

    let untyped = function(&file.declarations[1]);
    assert_eq!(untyped.params[0].type_ref, None);
    assert_eq!(untyped.body, None);
}

#[test]
fn test_missing_return_type() {
    let output = parse_source("fun f(): { }");

    assert_eq!(output.diagnostics.len(), 1);
    let f = function(&output.file.declarations[0]);
    assert_eq!(f.return_type, None);
    assert!(f.body.is_some());
}

#[test]
fn test_destructuring_declaration() {
    let file = parse_clean("val (first, second) = pair;");

    let Decl::Destructuring(destructuring) = &file.declarations[0] else {
        panic!("expected a destructuring declaration");
    };
    assert_eq!(destructuring.kind, PropertyKind::Val);
    assert_eq!(destructuring.names, vec!["first", "second"]);
    assert_eq!(destructuring.value, Some(ident("pair")));
}

#[test]
fn test_destructuring_without_initializer() {
    let output = parse_source("var (a, b);\nval c = 1;");

    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.file.declarations.len(), 2);
    assert_eq!(property(&output.file.declarations[1]).name, "c");
}

#[test]
fn test_statements_in_block() {
    let stmts = body(
        r#"
        val limit = 10;
        var (a, b) = pair;
        { nested(); }
        if (a < limit) { print(a); } else print(b);
        for (i in 0..limit) print(i);
        a++;
        "#,
    );

    assert_eq!(stmts.len(), 6);
    assert!(matches!(stmts[0], Stmt::Property(_)));
    assert!(matches!(stmts[1], Stmt::Destructuring(_)));
    assert!(matches!(&stmts[2], Stmt::Block(block) if block.len() == 1));

    let Stmt::If(if_stmt) = &stmts[3] else {
        panic!("expected an if statement");
    };
    assert_eq!(
        if_stmt.condition,
        Expr::binary(BinaryOp::Less, ident("a"), ident("limit"))
    );
    assert!(matches!(*if_stmt.then_branch, Stmt::Block(_)));
    assert!(matches!(
        if_stmt.else_branch.as_deref(),
        Some(Stmt::Expression(_))
    ));

    let Stmt::For(for_stmt) = &stmts[4] else {
        panic!("expected a for statement");
    };
    assert_eq!(for_stmt.variable.as_deref(), Some("i"));
    assert_eq!(
        for_stmt.iterable,
        Some(Expr::binary(BinaryOp::Range, int(0), ident("limit")))
    );

    let Stmt::Expression(increment) = &stmts[5] else {
        panic!("expected an expression statement");
    };
    assert_eq!(
        increment.expression,
        Expr::Postfix {
            op: PostfixOp::Increment,
            operand: Box::new(ident("a")),
        }
    );
}

#[test]
fn test_for_without_in() {
    let stmts = body("for (i) step();");

    let Stmt::For(for_stmt) = &stmts[0] else {
        panic!("expected a for statement");
    };
    assert_eq!(for_stmt.variable.as_deref(), Some("i"));
    assert_eq!(for_stmt.iterable, None);
}

#[test]
fn test_for_without_variable() {
    let output = parse_source("fun main() { for (in xs) step(); }");

    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].message, "expected loop variable");
}

#[test]
fn test_if_without_body() {
    let output = parse_source("fun main() { if (ok) }");

    assert_eq!(output.diagnostics.len(), 1);
    let main = function(&output.file.declarations[0]);
    let Stmt::If(if_stmt) = &main.body.as_ref().unwrap().body[0] else {
        panic!("expected an if statement");
    };
    assert!(matches!(&*if_stmt.then_branch, Stmt::Block(block) if block.is_empty()));
}

#[test]
fn test_precedence_multiplication_binds_tighter() {
    assert_eq!(
        expr("1 + 2 * 3"),
        Expr::binary(
            BinaryOp::Add,
            int(1),
            Expr::binary(BinaryOp::Multiply, int(2), int(3))
        )
    );
}

#[test]
fn test_binary_operators_are_left_associative() {
    assert_eq!(
        expr("1 - 2 - 3"),
        Expr::binary(
            BinaryOp::Subtract,
            Expr::binary(BinaryOp::Subtract, int(1), int(2)),
            int(3)
        )
    );
}

#[test]
fn test_precedence_ladder() {
    // ?: < || < && < == < relational < +
    assert_eq!(
        expr("a ?: b || c && d == e < f + g"),
        Expr::binary(
            BinaryOp::Elvis,
            ident("a"),
            Expr::binary(
                BinaryOp::Or,
                ident("b"),
                Expr::binary(
                    BinaryOp::And,
                    ident("c"),
                    Expr::binary(
                        BinaryOp::Equals,
                        ident("d"),
                        Expr::binary(
                            BinaryOp::Less,
                            ident("e"),
                            Expr::binary(BinaryOp::Add, ident("f"), ident("g"))
                        )
                    )
                )
            )
        )
    );
}

#[test]
fn test_strict_equality_and_compound_additive() {
    assert_eq!(
        expr("a === b"),
        Expr::binary(BinaryOp::StrictEquals, ident("a"), ident("b"))
    );
    assert_eq!(
        expr("a += 2 % 3"),
        Expr::binary(
            BinaryOp::AddAssign,
            ident("a"),
            Expr::binary(BinaryOp::Modulo, int(2), int(3))
        )
    );
}

#[test]
fn test_relational_keyword_operators() {
    let cases = [
        ("x in xs", BinaryOp::In),
        ("x !in xs", BinaryOp::NotIn),
        ("x ! in xs", BinaryOp::NotIn),
        ("x is T", BinaryOp::Is),
        ("x !is T", BinaryOp::NotIs),
        ("x ! is T", BinaryOp::NotIs),
        ("x as T", BinaryOp::As),
        ("x as? T", BinaryOp::AsSafe),
        ("x as ? T", BinaryOp::AsSafe),
        ("x..y", BinaryOp::Range),
        ("x..<y", BinaryOp::RangeUntil),
        ("x >= y", BinaryOp::GreaterEquals),
    ];

    for (source, op) in cases {
        let Expr::Binary { op: parsed, .. } = expr(source) else {
            panic!("expected a binary expression for {:?}", source);
        };
        assert_eq!(parsed, op, "operator of {:?}", source);
    }
}

#[test]
fn test_unary_and_postfix() {
    assert_eq!(
        expr("-!x"),
        Expr::Unary {
            op: UnaryOp::Negate,
            operand: Box::new(Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(ident("x")),
            }),
        }
    );
    assert_eq!(
        expr("x-- * 2"),
        Expr::binary(
            BinaryOp::Multiply,
            Expr::Postfix {
                op: PostfixOp::Decrement,
                operand: Box::new(ident("x")),
            },
            int(2)
        )
    );
}

#[test]
fn test_literals_keep_text_and_value() {
    assert_eq!(
        expr("0xFF"),
        Expr::Literal {
            kind: LiteralKind::Int,
            text: "0xFF".to_string(),
            value: Some(LiteralValue::Integer(255)),
        }
    );

    let Expr::Literal { kind, text, .. } = expr("3.14f") else {
        panic!("expected a literal");
    };
    assert_eq!(kind, LiteralKind::Float);
    assert_eq!(text, "3.14f");

    let Expr::Literal { kind, value, .. } = expr("'a'") else {
        panic!("expected a literal");
    };
    assert_eq!(kind, LiteralKind::Char);
    assert_eq!(value, Some(LiteralValue::Char('a')));
}

#[test]
fn test_parenthesised_expression() {
    assert_eq!(
        expr("(1 + 2) * 3"),
        Expr::binary(
            BinaryOp::Multiply,
            Expr::binary(BinaryOp::Add, int(1), int(2)),
            int(3)
        )
    );
    assert_eq!(
        expr("(a).b"),
        member(ident("a"), MemberOp::Dot, "b")
    );
}

#[test]
fn test_call_and_member_chain() {
    let expected = member(
        member(
            Expr::Call {
                callee: Box::new(member(ident("a"), MemberOp::Dot, "b")),
                args: vec![int(1), ident("c")],
            },
            MemberOp::SafeCall,
            "d",
        ),
        MemberOp::NotNull,
        "e",
    );

    assert_eq!(expr("a.b(1, c)?.d!!.e"), expected);
}

#[test]
fn test_not_null_dot_is_one_access() {
    let expected = member(ident("name"), MemberOp::NotNull, "length");

    assert_eq!(expr("name!!.length"), expected);
    assert_eq!(expr("name!! .length"), expected);
}

#[test]
fn test_call_without_arguments() {
    assert_eq!(
        expr("listOf()"),
        Expr::Call {
            callee: Box::new(ident("listOf")),
            args: vec![],
        }
    );
}

#[test]
fn test_string_template_parts() {
    assert_eq!(
        expr(r#""sum=${a+b} end $name\n""#),
        Expr::String {
            parts: vec![
                StringPart::Text("sum=".to_string()),
                StringPart::InterpExpr("a+b".to_string()),
                StringPart::Text(" end ".to_string()),
                StringPart::InterpId("name".to_string()),
                StringPart::Text("\n".to_string()),
            ],
        }
    );
    assert_eq!(expr(r#""""#), Expr::String { parts: vec![] });
}

#[test]
fn test_invalid_primary_becomes_error_node() {
    let output = parse_source("val v = );");

    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].lexeme, ")");

    let v = property(&output.file.declarations[0]);
    assert_eq!(
        v.value,
        Some(Expr::Error {
            token: ")".to_string(),
            position: Position::new(1, 9),
        })
    );
}

#[test]
fn test_error_node_keeps_operand_slot() {
    let output = parse_source("val v = 1 + );");

    assert_eq!(output.diagnostics.len(), 1);
    let Some(Expr::Binary { op, right, .. }) = &property(&output.file.declarations[0]).value
    else {
        panic!("expected a binary expression");
    };
    assert_eq!(*op, BinaryOp::Add);
    assert!(right.is_error());
}

#[test]
fn test_eof_inside_expression_is_not_consumed() {
    let output = parse_source("val v =");

    assert_eq!(output.diagnostics.len(), 2);
    assert!(output.diagnostics.iter().all(|d| d.lexeme.is_empty()));
    assert!(property(&output.file.declarations[0])
        .value
        .as_ref()
        .is_some_and(Expr::is_error));
}

#[test]
fn test_missing_member_name() {
    let output = parse_source("fun main() { a.; b(); }");

    assert_eq!(output.diagnostics.len(), 2);
    assert_eq!(
        output.diagnostics[0].message,
        "expected member name after '.'"
    );
}

#[test]
fn test_recovery_resumes_after_semicolon() {
    let output = parse_source("val a = 1 val b = 2; fun f() {}");

    assert_eq!(output.diagnostics.len(), 1);
    let names: Vec<_> = output
        .file
        .declarations
        .iter()
        .filter_map(Decl::name)
        .collect();
    assert_eq!(names, vec!["a", "f"]);
}

#[test]
fn test_stray_tokens_at_top_level() {
    let output = parse_source("} ;; x = 1; val a = 1;");

    assert_eq!(output.diagnostics.len(), 2);
    assert_eq!(output.file.declarations.len(), 1);
    assert_eq!(property(&output.file.declarations[0]).name, "a");
}

#[test]
fn test_missing_statement_terminator_in_block() {
    let output = parse_source("fun main() { print(1) }");

    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].message, "expected ';' after statement");
    let main = function(&output.file.declarations[0]);
    assert_eq!(main.body.as_ref().map(|block| block.len()), Some(1));
}

#[test]
fn test_diagnostics_are_in_source_order() {
    let output = parse_source("val a: 1;\nval b = );\nval c = 3");

    let lines: Vec<_> = output.diagnostics.iter().map(|d| d.line()).collect();
    assert_eq!(lines, vec![1, 2, 3]);
}

#[test]
fn test_diagnostic_display() {
    let output = parse_source("var dd: 99;");
    assert_eq!(
        output.diagnostics[0].to_string(),
        "Syntax error at line 1, column 9: expected type after ':', treating what follows as the initializer (token='99')"
    );
}

#[test]
fn test_lexical_error_aborts_parse() {
    let error = parse("val s = \"abc").unwrap_err();

    assert_eq!(error.get_impl(), &ErrorImpl::UnterminatedString);
    assert_eq!(*error.get_position(), Position::new(1, 9));
}
