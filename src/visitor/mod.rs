//! Read-only traversals over the AST.
//!
//! The node set is closed, the set of operations is open: an operation is a
//! [`Visitor`] implementation with one handler per node kind, and every node
//! exposes [`Accept::accept`], which calls the handler for its own kind.
//! Handlers decide themselves whether and in which order to descend into
//! children.

pub mod counter;
pub mod printer;

use crate::ast::{
    ast::{Attribute, ClassDef, Feature, Formal, Method, Program},
    expressions::{
        ArithExpr, AssignmentExpr, BlockExpr, BoolExpr, CaseBranch, CaseExpr, DispatchExpr, Expr,
        GroupingExpr, IdentifierExpr, IfExpr, IntExpr, IsVoidExpr, LetExpr, LocalBinding,
        NegateExpr, NewExpr, NotExpr, RelationalExpr, StringExpr, WhileExpr,
    },
};

pub trait Visitor {
    type Output;

    fn visit_program(&mut self, program: &Program) -> Self::Output;
    fn visit_class(&mut self, class: &ClassDef) -> Self::Output;
    fn visit_method(&mut self, method: &Method) -> Self::Output;
    fn visit_attribute(&mut self, attribute: &Attribute) -> Self::Output;
    fn visit_formal(&mut self, formal: &Formal) -> Self::Output;

    fn visit_int(&mut self, expr: &IntExpr) -> Self::Output;
    fn visit_bool(&mut self, expr: &BoolExpr) -> Self::Output;
    fn visit_string(&mut self, expr: &StringExpr) -> Self::Output;
    fn visit_identifier(&mut self, expr: &IdentifierExpr) -> Self::Output;
    fn visit_arith(&mut self, expr: &ArithExpr) -> Self::Output;
    fn visit_grouping(&mut self, expr: &GroupingExpr) -> Self::Output;
    fn visit_negate(&mut self, expr: &NegateExpr) -> Self::Output;
    fn visit_relational(&mut self, expr: &RelationalExpr) -> Self::Output;
    fn visit_not(&mut self, expr: &NotExpr) -> Self::Output;
    fn visit_assignment(&mut self, expr: &AssignmentExpr) -> Self::Output;
    fn visit_isvoid(&mut self, expr: &IsVoidExpr) -> Self::Output;
    fn visit_new(&mut self, expr: &NewExpr) -> Self::Output;
    fn visit_if(&mut self, expr: &IfExpr) -> Self::Output;
    fn visit_while(&mut self, expr: &WhileExpr) -> Self::Output;
    fn visit_block(&mut self, expr: &BlockExpr) -> Self::Output;
    fn visit_dispatch(&mut self, expr: &DispatchExpr) -> Self::Output;
    fn visit_let(&mut self, expr: &LetExpr) -> Self::Output;
    fn visit_local(&mut self, binding: &LocalBinding) -> Self::Output;
    fn visit_case(&mut self, expr: &CaseExpr) -> Self::Output;
    fn visit_case_branch(&mut self, branch: &CaseBranch) -> Self::Output;
}

/// Double dispatch entry point: hands `self` to the visitor handler for its
/// own node kind.
pub trait Accept {
    fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output;
}

macro_rules! impl_accept {
    ($($node:ty => $handler:ident),* $(,)?) => {
        $(
            impl Accept for $node {
                fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
                    visitor.$handler(self)
                }
            }
        )*
    };
}

impl_accept! {
    Program => visit_program,
    ClassDef => visit_class,
    Method => visit_method,
    Attribute => visit_attribute,
    Formal => visit_formal,
    IntExpr => visit_int,
    BoolExpr => visit_bool,
    StringExpr => visit_string,
    IdentifierExpr => visit_identifier,
    ArithExpr => visit_arith,
    GroupingExpr => visit_grouping,
    NegateExpr => visit_negate,
    RelationalExpr => visit_relational,
    NotExpr => visit_not,
    AssignmentExpr => visit_assignment,
    IsVoidExpr => visit_isvoid,
    NewExpr => visit_new,
    IfExpr => visit_if,
    WhileExpr => visit_while,
    BlockExpr => visit_block,
    DispatchExpr => visit_dispatch,
    LetExpr => visit_let,
    LocalBinding => visit_local,
    CaseExpr => visit_case,
    CaseBranch => visit_case_branch,
}

impl Accept for Feature {
    fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Feature::Method(method) => visitor.visit_method(method),
            Feature::Attribute(attribute) => visitor.visit_attribute(attribute),
        }
    }
}

impl Accept for Expr {
    fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Int(expr) => visitor.visit_int(expr),
            Expr::Bool(expr) => visitor.visit_bool(expr),
            Expr::String(expr) => visitor.visit_string(expr),
            Expr::Identifier(expr) => visitor.visit_identifier(expr),
            Expr::Arith(expr) => visitor.visit_arith(expr),
            Expr::Grouping(expr) => visitor.visit_grouping(expr),
            Expr::Negate(expr) => visitor.visit_negate(expr),
            Expr::Relational(expr) => visitor.visit_relational(expr),
            Expr::Not(expr) => visitor.visit_not(expr),
            Expr::Assignment(expr) => visitor.visit_assignment(expr),
            Expr::IsVoid(expr) => visitor.visit_isvoid(expr),
            Expr::New(expr) => visitor.visit_new(expr),
            Expr::If(expr) => visitor.visit_if(expr),
            Expr::While(expr) => visitor.visit_while(expr),
            Expr::Block(expr) => visitor.visit_block(expr),
            Expr::Dispatch(expr) => visitor.visit_dispatch(expr),
            Expr::Let(expr) => visitor.visit_let(expr),
            Expr::Case(expr) => visitor.visit_case(expr),
        }
    }
}

#[cfg(test)]
mod tests;
