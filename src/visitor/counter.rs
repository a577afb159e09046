use crate::ast::{
    ast::{Attribute, ClassDef, Formal, Method, Program},
    expressions::{
        ArithExpr, AssignmentExpr, BlockExpr, BoolExpr, CaseBranch, CaseExpr, DispatchExpr,
        GroupingExpr, IdentifierExpr, IfExpr, IntExpr, IsVoidExpr, LetExpr, LocalBinding,
        NegateExpr, NewExpr, NotExpr, RelationalExpr, StringExpr, WhileExpr,
    },
};

use super::{Accept, Visitor};

/// Tallies nodes by category.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NodeCounter {
    pub classes: usize,
    pub methods: usize,
    pub attributes: usize,
    pub formals: usize,
    pub expressions: usize,
    pub dispatches: usize,
}

impl NodeCounter {
    pub fn count(program: &Program) -> Self {
        let mut counter = NodeCounter::default();
        program.accept(&mut counter);
        counter
    }
}

impl Visitor for NodeCounter {
    type Output = ();

    fn visit_program(&mut self, program: &Program) {
        program.classes.iter().for_each(|class| class.accept(self));
    }

    fn visit_class(&mut self, class: &ClassDef) {
        self.classes += 1;
        class.features.iter().for_each(|feature| feature.accept(self));
    }

    fn visit_method(&mut self, method: &Method) {
        self.methods += 1;
        method.formals.iter().for_each(|formal| formal.accept(self));
        method.body.accept(self);
    }

    fn visit_attribute(&mut self, attribute: &Attribute) {
        self.attributes += 1;
        if let Some(init) = &attribute.init {
            init.accept(self);
        }
    }

    fn visit_formal(&mut self, _formal: &Formal) {
        self.formals += 1;
    }

    fn visit_int(&mut self, _expr: &IntExpr) {
        self.expressions += 1;
    }

    fn visit_bool(&mut self, _expr: &BoolExpr) {
        self.expressions += 1;
    }

    fn visit_string(&mut self, _expr: &StringExpr) {
        self.expressions += 1;
    }

    fn visit_identifier(&mut self, _expr: &IdentifierExpr) {
        self.expressions += 1;
    }

    fn visit_arith(&mut self, expr: &ArithExpr) {
        self.expressions += 1;
        expr.left.accept(self);
        expr.right.accept(self);
    }

    fn visit_grouping(&mut self, expr: &GroupingExpr) {
        self.expressions += 1;
        expr.inner.accept(self);
    }

    fn visit_negate(&mut self, expr: &NegateExpr) {
        self.expressions += 1;
        expr.inner.accept(self);
    }

    fn visit_relational(&mut self, expr: &RelationalExpr) {
        self.expressions += 1;
        expr.left.accept(self);
        expr.right.accept(self);
    }

    fn visit_not(&mut self, expr: &NotExpr) {
        self.expressions += 1;
        expr.inner.accept(self);
    }

    fn visit_assignment(&mut self, expr: &AssignmentExpr) {
        self.expressions += 1;
        expr.value.accept(self);
    }

    fn visit_isvoid(&mut self, expr: &IsVoidExpr) {
        self.expressions += 1;
        expr.inner.accept(self);
    }

    fn visit_new(&mut self, _expr: &NewExpr) {
        self.expressions += 1;
    }

    fn visit_if(&mut self, expr: &IfExpr) {
        self.expressions += 1;
        expr.condition.accept(self);
        expr.then_branch.accept(self);
        expr.else_branch.accept(self);
    }

    fn visit_while(&mut self, expr: &WhileExpr) {
        self.expressions += 1;
        expr.condition.accept(self);
        expr.body.accept(self);
    }

    fn visit_block(&mut self, expr: &BlockExpr) {
        self.expressions += 1;
        expr.body.iter().for_each(|e| e.accept(self));
    }

    fn visit_dispatch(&mut self, expr: &DispatchExpr) {
        self.expressions += 1;
        self.dispatches += 1;
        if let Some(receiver) = &expr.receiver {
            receiver.accept(self);
        }
        expr.arguments.iter().for_each(|arg| arg.accept(self));
    }

    fn visit_let(&mut self, expr: &LetExpr) {
        self.expressions += 1;
        expr.bindings.iter().for_each(|binding| binding.accept(self));
        expr.body.accept(self);
    }

    fn visit_local(&mut self, binding: &LocalBinding) {
        if let Some(init) = &binding.init {
            init.accept(self);
        }
    }

    fn visit_case(&mut self, expr: &CaseExpr) {
        self.expressions += 1;
        expr.scrutinee.accept(self);
        expr.branches.iter().for_each(|branch| branch.accept(self));
    }

    fn visit_case_branch(&mut self, branch: &CaseBranch) {
        branch.body.accept(self);
    }
}
