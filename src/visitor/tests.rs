use crate::{
    ast::ast::Program,
    lexer::lexer::Lexer,
    parser::parser::parse,
};

use super::{counter::NodeCounter, printer::dump};

fn program(source: &str) -> Program {
    parse(Lexer::new(source.to_string())).unwrap()
}

fn lines(text: &[&str]) -> String {
    text.iter().map(|line| format!("{}\n", line)).collect()
}

#[test]
fn test_dump_features() {
    let tree = dump(&program(
        "class A inherits B { x : Int <- 1 + 2; f(y : Int) : Int { (~y) }; };",
    ))
    .unwrap();

    assert_eq!(
        tree,
        lines(&[
            "program",
            "  class",
            "    A",
            "    B",
            "    attribute",
            "      x",
            "      Int",
            "      +",
            "        1",
            "        2",
            "    method",
            "      f",
            "      formal",
            "        y",
            "        Int",
            "      Int",
            "      ~",
            "        y",
        ])
    );
}

#[test]
fn test_dump_dispatch_let_case() {
    let tree = dump(&program(
        "class A { f() : Object { { self.g(1); g(); a@B.c(); let x : Int in case x of y : Int => isvoid y; esac; } }; };",
    ))
    .unwrap();

    assert_eq!(
        tree,
        lines(&[
            "program",
            "  class",
            "    A",
            "    method",
            "      f",
            "      Object",
            "      block",
            "        .",
            "          self",
            "          g",
            "          1",
            "        implicit dispatch",
            "          g",
            "        .",
            "          a",
            "          B",
            "          c",
            "        let",
            "          local",
            "            x",
            "            Int",
            "          case",
            "            x",
            "            case branch",
            "              y",
            "              Int",
            "              isvoid",
            "                y",
        ])
    );
}

#[test]
fn test_dump_control_flow() {
    let tree = dump(&program(
        "class A { f() : Object { while not x = 1 loop if true then x <- new Foo else \"done\" fi pool }; };",
    ))
    .unwrap();

    assert_eq!(
        tree,
        lines(&[
            "program",
            "  class",
            "    A",
            "    method",
            "      f",
            "      Object",
            "      while",
            "        not",
            "          =",
            "            x",
            "            1",
            "        if",
            "          true",
            "          <-",
            "            x",
            "            new",
            "              Foo",
            "          done",
        ])
    );
}

#[test]
fn test_dump_keeps_strings_on_one_line() {
    let tree = dump(&program("class A { s : String <- \"a\\nb\\tc\"; };")).unwrap();

    assert_eq!(
        tree,
        lines(&[
            "program",
            "  class",
            "    A",
            "    attribute",
            "      s",
            "      String",
            "      a\\nb\\tc",
        ])
    );
}

#[test]
fn test_count_nodes() {
    let counts = NodeCounter::count(&program(
        "class A { x : Int <- 1; f(a : Int, b : Int) : Int { g(a) + b.h() }; }; class B { };",
    ));

    assert_eq!(
        counts,
        NodeCounter {
            classes: 2,
            methods: 1,
            attributes: 1,
            formals: 2,
            expressions: 6,
            dispatches: 2,
        }
    );
}

#[test]
fn test_count_empty_program_parts() {
    let counts = NodeCounter::count(&program("class A { }; "));

    assert_eq!(counts.classes, 1);
    assert_eq!(counts.expressions, 0);
}
