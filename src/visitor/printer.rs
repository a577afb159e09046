//! Indented, one-node-per-line dump of a program.
//!
//! The output is meant for people; nothing reads it back.

use std::io::{self, Write};

use crate::ast::{
    ast::{Attribute, ClassDef, Formal, Method, Program},
    expressions::{
        ArithExpr, AssignmentExpr, BlockExpr, BoolExpr, CaseBranch, CaseExpr, DispatchExpr,
        GroupingExpr, IdentifierExpr, IfExpr, IntExpr, IsVoidExpr, LetExpr, LocalBinding,
        NegateExpr, NewExpr, NotExpr, RelationalExpr, StringExpr, WhileExpr,
    },
};

use super::{Accept, Visitor};

const INDENT: &str = "  ";

pub struct TreePrinter<W: Write> {
    out: W,
    indent: usize,
}

impl<W: Write> TreePrinter<W> {
    pub fn new(out: W) -> Self {
        TreePrinter { out, indent: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, label: &str) -> io::Result<()> {
        writeln!(self.out, "{}{}", INDENT.repeat(self.indent), label)
    }

    /// Runs `body` one level deeper, restoring the level afterwards even
    /// when writing fails.
    fn nested(&mut self, body: impl FnOnce(&mut Self) -> io::Result<()>) -> io::Result<()> {
        self.indent += 1;
        let result = body(self);
        self.indent -= 1;
        result
    }

    /// A label followed by its children one level deeper.
    fn node(
        &mut self,
        label: &str,
        children: impl FnOnce(&mut Self) -> io::Result<()>,
    ) -> io::Result<()> {
        self.line(label)?;
        self.nested(children)
    }
}

/// Writes control characters back as escapes so a string stays on its line.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\u{8}' => escaped.push_str("\\b"),
            '\u{c}' => escaped.push_str("\\f"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Renders `program` into a string.
pub fn dump(program: &Program) -> io::Result<String> {
    let mut printer = TreePrinter::new(Vec::new());
    program.accept(&mut printer)?;

    Ok(String::from_utf8_lossy(&printer.into_inner()).into_owned())
}

impl<W: Write> Visitor for TreePrinter<W> {
    type Output = io::Result<()>;

    fn visit_program(&mut self, program: &Program) -> Self::Output {
        self.node("program", |p| {
            program.classes.iter().try_for_each(|class| class.accept(p))
        })
    }

    fn visit_class(&mut self, class: &ClassDef) -> Self::Output {
        self.node("class", |p| {
            p.line(&class.name)?;
            if let Some(parent) = &class.parent {
                p.line(parent)?;
            }
            class.features.iter().try_for_each(|feature| feature.accept(p))
        })
    }

    fn visit_method(&mut self, method: &Method) -> Self::Output {
        self.node("method", |p| {
            p.line(&method.name)?;
            method.formals.iter().try_for_each(|formal| formal.accept(p))?;
            p.line(&method.return_type)?;
            method.body.accept(p)
        })
    }

    fn visit_attribute(&mut self, attribute: &Attribute) -> Self::Output {
        self.node("attribute", |p| {
            p.line(&attribute.name)?;
            p.line(&attribute.type_name)?;
            match &attribute.init {
                Some(init) => init.accept(p),
                None => Ok(()),
            }
        })
    }

    fn visit_formal(&mut self, formal: &Formal) -> Self::Output {
        self.node("formal", |p| {
            p.line(&formal.name)?;
            p.line(&formal.type_name)
        })
    }

    fn visit_int(&mut self, expr: &IntExpr) -> Self::Output {
        self.line(&expr.value)
    }

    fn visit_bool(&mut self, expr: &BoolExpr) -> Self::Output {
        self.line(if expr.value { "true" } else { "false" })
    }

    fn visit_string(&mut self, expr: &StringExpr) -> Self::Output {
        self.line(&escape(&expr.value))
    }

    fn visit_identifier(&mut self, expr: &IdentifierExpr) -> Self::Output {
        self.line(&expr.value)
    }

    fn visit_arith(&mut self, expr: &ArithExpr) -> Self::Output {
        self.node(expr.operator.symbol(), |p| {
            expr.left.accept(p)?;
            expr.right.accept(p)
        })
    }

    // Parentheses only shape the tree; they get no line of their own.
    fn visit_grouping(&mut self, expr: &GroupingExpr) -> Self::Output {
        expr.inner.accept(self)
    }

    fn visit_negate(&mut self, expr: &NegateExpr) -> Self::Output {
        self.node("~", |p| expr.inner.accept(p))
    }

    fn visit_relational(&mut self, expr: &RelationalExpr) -> Self::Output {
        self.node(expr.operator.symbol(), |p| {
            expr.left.accept(p)?;
            expr.right.accept(p)
        })
    }

    fn visit_not(&mut self, expr: &NotExpr) -> Self::Output {
        self.node("not", |p| expr.inner.accept(p))
    }

    fn visit_assignment(&mut self, expr: &AssignmentExpr) -> Self::Output {
        self.node("<-", |p| {
            p.line(&expr.name)?;
            expr.value.accept(p)
        })
    }

    fn visit_isvoid(&mut self, expr: &IsVoidExpr) -> Self::Output {
        self.node("isvoid", |p| expr.inner.accept(p))
    }

    fn visit_new(&mut self, expr: &NewExpr) -> Self::Output {
        self.node("new", |p| p.line(&expr.type_name))
    }

    fn visit_if(&mut self, expr: &IfExpr) -> Self::Output {
        self.node("if", |p| {
            expr.condition.accept(p)?;
            expr.then_branch.accept(p)?;
            expr.else_branch.accept(p)
        })
    }

    fn visit_while(&mut self, expr: &WhileExpr) -> Self::Output {
        self.node("while", |p| {
            expr.condition.accept(p)?;
            expr.body.accept(p)
        })
    }

    fn visit_block(&mut self, expr: &BlockExpr) -> Self::Output {
        self.node("block", |p| expr.body.iter().try_for_each(|e| e.accept(p)))
    }

    fn visit_dispatch(&mut self, expr: &DispatchExpr) -> Self::Output {
        match &expr.receiver {
            Some(receiver) => self.node(".", |p| {
                receiver.accept(p)?;
                if let Some(static_type) = &expr.static_type {
                    p.line(static_type)?;
                }
                p.line(&expr.method)?;
                expr.arguments.iter().try_for_each(|arg| arg.accept(p))
            }),
            None => self.node("implicit dispatch", |p| {
                p.line(&expr.method)?;
                expr.arguments.iter().try_for_each(|arg| arg.accept(p))
            }),
        }
    }

    fn visit_let(&mut self, expr: &LetExpr) -> Self::Output {
        self.node("let", |p| {
            expr.bindings.iter().try_for_each(|binding| binding.accept(p))?;
            expr.body.accept(p)
        })
    }

    fn visit_local(&mut self, binding: &LocalBinding) -> Self::Output {
        self.node("local", |p| {
            p.line(&binding.name)?;
            p.line(&binding.type_name)?;
            match &binding.init {
                Some(init) => init.accept(p),
                None => Ok(()),
            }
        })
    }

    fn visit_case(&mut self, expr: &CaseExpr) -> Self::Output {
        self.node("case", |p| {
            expr.scrutinee.accept(p)?;
            expr.branches.iter().try_for_each(|branch| branch.accept(p))
        })
    }

    fn visit_case_branch(&mut self, branch: &CaseBranch) -> Self::Output {
        self.node("case branch", |p| {
            p.line(&branch.name)?;
            p.line(&branch.type_name)?;
            branch.body.accept(p)
        })
    }
}
