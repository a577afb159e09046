//! Unit tests for the parser module.
//!
//! This module contains tests for parsing:
//! - Classes, methods, attributes and formals
//! - Operator precedence and associativity
//! - Dispatch, let, case and block forms
//! - Error reporting and resynchronization

use crate::{
    ast::{
        ast::{Feature, Program},
        expressions::{ArithOp, Expr, RelationalOp},
    },
    errors::errors::Error,
    lexer::{
        lexer::{tokenize, Lexer},
        source::TokenStream,
    },
    Position,
};

use super::parser::parse;

fn parse_source(source: &str) -> Result<Program, Vec<Error>> {
    parse(Lexer::new(source.to_string()))
}

/// Wraps `expr` as the body of a method; the expression starts at column 23.
fn wrap(expr: &str) -> String {
    format!("class A {{ f() : Int {{ {} }}; }};", expr)
}

fn parse_body(expr: &str) -> Expr {
    let program = parse_source(&wrap(expr)).unwrap();

    match &program.classes[0].features[0] {
        Feature::Method(method) => method.body.clone(),
        Feature::Attribute(_) => panic!("expected a method"),
    }
}

fn body_errors(expr: &str) -> Vec<Error> {
    parse_source(&wrap(expr)).unwrap_err()
}

fn messages(errors: &[Error]) -> Vec<String> {
    errors.iter().map(|error| error.get_impl().to_string()).collect()
}

#[test]
fn test_parse_class_with_features() {
    let source = "
        class Main inherits IO {
            count : Int <- 0;
            name : String;
            add(a : Int, b : Int) : Int { a + b };
        };
    ";
    let program = parse_source(source).unwrap();

    assert_eq!(program.classes.len(), 1);

    let class = &program.classes[0];
    assert_eq!(class.name, "Main");
    assert_eq!(class.parent.as_deref(), Some("IO"));
    assert_eq!(class.position, Position::new(2, 9));

    let names: Vec<_> = class.features.iter().map(|feature| feature.get_name()).collect();
    assert_eq!(names, vec!["count", "name", "add"]);

    let Feature::Attribute(count) = &class.features[0] else {
        panic!("expected an attribute");
    };
    assert_eq!(count.type_name, "Int");
    assert!(count.init.is_some());

    let Feature::Attribute(name) = &class.features[1] else {
        panic!("expected an attribute");
    };
    assert!(name.init.is_none());

    let Feature::Method(add) = &class.features[2] else {
        panic!("expected a method");
    };
    assert_eq!(add.return_type, "Int");
    assert_eq!(add.formals.len(), 2);
    assert_eq!(add.formals[1].name, "b");
    assert_eq!(add.formals[1].type_name, "Int");
}

#[test]
fn test_parse_multiple_classes_in_order() {
    let program = parse_source("class A { }; class B inherits A { }; class C { };").unwrap();
    let names: Vec<_> = program.classes.iter().map(|class| class.name.as_str()).collect();

    assert_eq!(names, vec!["A", "B", "C"]);
    assert_eq!(program.classes[0].parent, None);
}

#[test]
fn test_parse_from_token_stream() {
    let tokens = tokenize(wrap("1"));
    let program = parse(TokenStream::new(tokens)).unwrap();

    assert_eq!(program.classes[0].name, "A");
}

#[test]
fn test_multiplication_binds_tighter() {
    let Expr::Arith(sum) = parse_body("1 + 2 * 3") else {
        panic!("expected an arithmetic expression");
    };

    assert_eq!(sum.operator, ArithOp::Plus);
    assert!(matches!(*sum.left, Expr::Int(ref int) if int.value == "1"));
    assert!(matches!(*sum.right, Expr::Arith(ref product) if product.operator == ArithOp::Times));
}

#[test]
fn test_subtraction_is_left_associative() {
    let Expr::Arith(outer) = parse_body("1 - 2 - 3") else {
        panic!("expected an arithmetic expression");
    };

    assert_eq!(outer.operator, ArithOp::Minus);
    assert!(matches!(*outer.right, Expr::Int(ref int) if int.value == "3"));

    let Expr::Arith(inner) = &*outer.left else {
        panic!("expected the left operand to be a subtraction");
    };
    assert_eq!(inner.operator, ArithOp::Minus);
    assert!(matches!(*inner.left, Expr::Int(ref int) if int.value == "1"));
    assert!(matches!(*inner.right, Expr::Int(ref int) if int.value == "2"));
}

#[test]
fn test_dispatch_binds_before_addition() {
    let Expr::Arith(sum) = parse_body("a.foo() + 1") else {
        panic!("expected an arithmetic expression");
    };

    let Expr::Dispatch(call) = &*sum.left else {
        panic!("expected a dispatch");
    };
    assert_eq!(call.method, "foo");
    assert!(call.arguments.is_empty());
    assert!(matches!(call.receiver.as_deref(), Some(Expr::Identifier(id)) if id.value == "a"));
}

#[test]
fn test_unary_operator_levels() {
    // Dispatch binds tighter than negation.
    let Expr::Negate(negate) = parse_body("~a.b()") else {
        panic!("expected a negation");
    };
    assert!(matches!(*negate.inner, Expr::Dispatch(_)));

    let Expr::Arith(sum) = parse_body("isvoid x + 1") else {
        panic!("expected an arithmetic expression");
    };
    assert!(matches!(*sum.left, Expr::IsVoid(_)));

    let Expr::Not(not) = parse_body("not a < b") else {
        panic!("expected a negation");
    };
    assert!(matches!(*not.inner, Expr::Relational(ref rel) if rel.operator == RelationalOp::Less));

    let Expr::Arith(difference) = parse_body("-1 - 2") else {
        panic!("expected an arithmetic expression");
    };
    assert_eq!(difference.operator, ArithOp::Minus);
    assert!(matches!(*difference.left, Expr::Negate(_)));
}

#[test]
fn test_assignment_is_right_associative() {
    let Expr::Assignment(outer) = parse_body("x <- y <- 1 + 2") else {
        panic!("expected an assignment");
    };

    assert_eq!(outer.name, "x");
    let Expr::Assignment(inner) = &*outer.value else {
        panic!("expected a nested assignment");
    };
    assert_eq!(inner.name, "y");
    assert!(matches!(*inner.value, Expr::Arith(_)));
}

#[test]
fn test_grouping_overrides_precedence() {
    let Expr::Arith(product) = parse_body("(1 + 2) * 3") else {
        panic!("expected an arithmetic expression");
    };

    assert_eq!(product.operator, ArithOp::Times);
    assert!(matches!(
        *product.left,
        Expr::Grouping(ref group) if matches!(*group.inner, Expr::Arith(_))
    ));
}

#[test]
fn test_relational_chain_is_rejected() {
    let errors = body_errors("a < b < c");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "NonAssociative");
    assert_eq!(*errors[0].get_position(), Position::new(1, 29));
    assert_eq!(
        messages(&errors),
        vec!["relational operators are non-associative, found '<'"]
    );
}

#[test]
fn test_relational_operands_are_arithmetic() {
    let Expr::Relational(rel) = parse_body("a + 1 <= b * 2") else {
        panic!("expected a comparison");
    };

    assert_eq!(rel.operator, RelationalOp::LessEquals);
    assert!(matches!(*rel.left, Expr::Arith(_)));
    assert!(matches!(*rel.right, Expr::Arith(_)));
}

#[test]
fn test_static_dispatch() {
    let Expr::Dispatch(call) = parse_body("x@Base.f(1, 2)") else {
        panic!("expected a dispatch");
    };

    assert_eq!(call.static_type.as_deref(), Some("Base"));
    assert_eq!(call.method, "f");
    assert_eq!(call.arguments.len(), 2);
    assert!(!call.is_implicit());
}

#[test]
fn test_implicit_dispatch() {
    let Expr::Dispatch(call) = parse_body("f(1)") else {
        panic!("expected a dispatch");
    };

    assert!(call.is_implicit());
    assert!(call.receiver.is_none());
    assert_eq!(call.method, "f");
    assert_eq!(call.position, Position::new(1, 23));
}

#[test]
fn test_dispatch_chains_to_the_left() {
    let Expr::Dispatch(outer) = parse_body("a.b().c(x)") else {
        panic!("expected a dispatch");
    };

    assert_eq!(outer.method, "c");
    assert!(matches!(
        outer.receiver.as_deref(),
        Some(Expr::Dispatch(inner)) if inner.method == "b"
    ));
}

#[test]
fn test_let_bindings_in_order() {
    let Expr::Let(let_expr) = parse_body("let a : Int <- 1, b : Int in a <- b + 1") else {
        panic!("expected a let");
    };

    assert_eq!(let_expr.bindings.len(), 2);
    assert_eq!(let_expr.bindings[0].name, "a");
    assert!(let_expr.bindings[0].init.is_some());
    assert_eq!(let_expr.bindings[1].name, "b");
    assert!(let_expr.bindings[1].init.is_none());
    assert!(matches!(*let_expr.body, Expr::Assignment(ref assign) if assign.name == "a"));
}

#[test]
fn test_let_with_assignment_body() {
    let Expr::Let(let_expr) = parse_body("let x:Int <- 1, y:Int <- 2 in x <- y") else {
        panic!("expected a let");
    };

    let names: Vec<_> = let_expr.bindings.iter().map(|binding| binding.name.as_str()).collect();
    assert_eq!(names, vec!["x", "y"]);
    assert!(matches!(
        *let_expr.body,
        Expr::Assignment(ref assign)
            if assign.name == "x" && matches!(*assign.value, Expr::Identifier(_))
    ));
}

#[test]
fn test_let_body_extends_right() {
    let Expr::Let(let_expr) = parse_body("let x : Int in x + 1") else {
        panic!("expected a let");
    };

    assert!(matches!(*let_expr.body, Expr::Arith(_)));
}

#[test]
fn test_control_flow_forms() {
    let Expr::If(if_expr) = parse_body("if a < b then new Foo else isvoid c fi") else {
        panic!("expected an if");
    };
    assert!(matches!(*if_expr.condition, Expr::Relational(_)));
    assert!(matches!(*if_expr.then_branch, Expr::New(ref new) if new.type_name == "Foo"));
    assert!(matches!(*if_expr.else_branch, Expr::IsVoid(_)));

    let Expr::While(while_expr) = parse_body("while true loop { x <- x + 1; y; } pool") else {
        panic!("expected a while");
    };
    assert!(matches!(*while_expr.condition, Expr::Bool(ref b) if b.value));
    assert!(matches!(*while_expr.body, Expr::Block(ref block) if block.body.len() == 2));
}

#[test]
fn test_case_branches_in_order() {
    let Expr::Case(case) = parse_body("case x of a : Int => 1; b : String => \"s\"; esac") else {
        panic!("expected a case");
    };

    assert!(matches!(*case.scrutinee, Expr::Identifier(ref id) if id.value == "x"));
    assert_eq!(case.branches.len(), 2);
    assert_eq!(case.branches[0].type_name, "Int");
    assert_eq!(case.branches[1].name, "b");
    assert!(matches!(*case.branches[1].body, Expr::String(ref s) if s.value == "s"));
}

#[test]
fn test_empty_block_is_rejected() {
    let errors = parse_source("class A { f() : Int { {} }; };").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(*errors[0].get_position(), Position::new(1, 24));
    assert_eq!(messages(&errors), vec!["no viable alternative at input '}'"]);
}

#[test]
fn test_empty_case_is_rejected() {
    let errors = body_errors("case x of esac");

    assert_eq!(errors.len(), 1);
    assert_eq!(*errors[0].get_position(), Position::new(1, 33));
    assert_eq!(messages(&errors), vec!["mismatched input 'esac' expecting ID"]);
}

#[test]
fn test_let_without_bindings_is_rejected() {
    let errors = body_errors("let in x");

    assert_eq!(errors.len(), 1);
    assert_eq!(*errors[0].get_position(), Position::new(1, 27));
    assert_eq!(messages(&errors), vec!["mismatched input 'in' expecting ID"]);
}

#[test]
fn test_empty_source_expects_class() {
    let errors = parse_source("").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(*errors[0].get_position(), Position::new(1, 1));
    assert_eq!(messages(&errors), vec!["mismatched input <EOF> expecting 'class'"]);
}

#[test]
fn test_missing_class_semicolon() {
    let errors = parse_source("class A { }").unwrap_err();

    assert_eq!(messages(&errors), vec!["mismatched input <EOF> expecting ';'"]);
}

#[test]
fn test_feature_needs_paren_or_colon() {
    let errors = parse_source("class A { x Int; };").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(messages(&errors), vec!["mismatched input 'Int' expecting {'(', ':'}"]);
}

#[test]
fn test_resynchronizes_after_each_error() {
    let source = "class A {
  x : Int <- ;
  y : Int;
  f() : Int { 1 + };
};
class B { z : ; };";
    let errors = parse_source(source).unwrap_err();

    let positions: Vec<_> = errors.iter().map(|error| *error.get_position()).collect();
    assert_eq!(
        positions,
        vec![Position::new(2, 14), Position::new(4, 19), Position::new(6, 15)]
    );
    assert_eq!(
        messages(&errors),
        vec![
            "no viable alternative at input ';'",
            "no viable alternative at input '}'",
            "mismatched input ';' expecting TYPE",
        ]
    );
}

#[test]
fn test_lexical_errors_are_reported() {
    let errors = parse_source("class A { x : Int <- 1 # ; };").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(errors[0].is_lexical());
    assert_eq!(errors[0].to_string(), "Lexical error: Invalid character: #");
}

#[test]
fn test_errors_are_sorted_by_position() {
    // The bad character is scanned before the syntax error in front of it
    // is reported.
    let errors = parse_source("class A { x : Int <- ; # };").unwrap_err();

    assert_eq!(errors.len(), 2);
    assert_eq!(*errors[0].get_position(), Position::new(1, 22));
    assert!(!errors[0].is_lexical());
    assert_eq!(*errors[1].get_position(), Position::new(1, 24));
    assert!(errors[1].is_lexical());
}

#[test]
fn test_token_after_bad_character_is_not_reported_again() {
    let errors = parse_source("class B { x : Int <- # ; };").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(errors[0].is_lexical());
    assert_eq!(*errors[0].get_position(), Position::new(1, 22));
}

#[test]
fn test_error_at_eof_is_reported_once() {
    let errors = parse_source("class A { x : Int <- ").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(*errors[0].get_position(), Position::new(1, 22));
    assert_eq!(messages(&errors), vec!["no viable alternative at input <EOF>"]);
}

#[test]
fn test_unterminated_string_in_method_body() {
    let errors = parse_source("class A { f() : Int { \"a\nb\" }; };").unwrap_err();

    assert_eq!(
        messages(&errors),
        vec!["Unterminated string constant", "EOF in string constant"]
    );
    assert_eq!(*errors[0].get_position(), Position::new(1, 23));
    assert_eq!(*errors[1].get_position(), Position::new(2, 2));
}

#[test]
fn test_matched_token_ends_recovery() {
    let source = "class A {
  x : Int <- ;
  y : ;
};";
    let errors = parse_source(source).unwrap_err();

    let positions: Vec<_> = errors.iter().map(|error| *error.get_position()).collect();
    assert_eq!(positions, vec![Position::new(2, 14), Position::new(3, 7)]);
}
