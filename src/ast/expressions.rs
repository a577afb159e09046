use crate::Position;

/// Expression Types
///
/// The closed set of expression forms. Every variant owns its children and
/// records the position of the first token it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(IntExpr),
    Bool(BoolExpr),
    String(StringExpr),
    Identifier(IdentifierExpr),
    Arith(ArithExpr),
    Grouping(GroupingExpr),
    Negate(NegateExpr),
    Relational(RelationalExpr),
    Not(NotExpr),
    Assignment(AssignmentExpr),
    IsVoid(IsVoidExpr),
    New(NewExpr),
    If(IfExpr),
    While(WhileExpr),
    Block(BlockExpr),
    Dispatch(DispatchExpr),
    Let(LetExpr),
    Case(CaseExpr),
}

impl Expr {
    pub fn get_position(&self) -> Position {
        match self {
            Expr::Int(expr) => expr.position,
            Expr::Bool(expr) => expr.position,
            Expr::String(expr) => expr.position,
            Expr::Identifier(expr) => expr.position,
            Expr::Arith(expr) => expr.position,
            Expr::Grouping(expr) => expr.position,
            Expr::Negate(expr) => expr.position,
            Expr::Relational(expr) => expr.position,
            Expr::Not(expr) => expr.position,
            Expr::Assignment(expr) => expr.position,
            Expr::IsVoid(expr) => expr.position,
            Expr::New(expr) => expr.position,
            Expr::If(expr) => expr.position,
            Expr::While(expr) => expr.position,
            Expr::Block(expr) => expr.position,
            Expr::Dispatch(expr) => expr.position,
            Expr::Let(expr) => expr.position,
            Expr::Case(expr) => expr.position,
        }
    }
}

// OPERATORS

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Plus,
    Minus,
    Times,
    Divide,
}

impl ArithOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            ArithOp::Plus => "+",
            ArithOp::Minus => "-",
            ArithOp::Times => "*",
            ArithOp::Divide => "/",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationalOp {
    Less,
    LessEquals,
    Equals,
}

impl RelationalOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            RelationalOp::Less => "<",
            RelationalOp::LessEquals => "<=",
            RelationalOp::Equals => "=",
        }
    }
}

// LITERALS

/// Integer literal, kept as written.
#[derive(Debug, Clone, PartialEq)]
pub struct IntExpr {
    pub value: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolExpr {
    pub value: bool,
    pub position: Position,
}

/// String literal with escapes already resolved by the scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr {
    pub value: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierExpr {
    pub value: String,
    pub position: Position,
}

// OPERATOR EXPRESSIONS

#[derive(Debug, Clone, PartialEq)]
pub struct ArithExpr {
    pub operator: ArithOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub position: Position,
}

/// A parenthesised expression.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingExpr {
    pub inner: Box<Expr>,
    pub position: Position,
}

/// Arithmetic negation, `~e`.
#[derive(Debug, Clone, PartialEq)]
pub struct NegateExpr {
    pub inner: Box<Expr>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelationalExpr {
    pub operator: RelationalOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotExpr {
    pub inner: Box<Expr>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub name: String,
    pub value: Box<Expr>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IsVoidExpr {
    pub inner: Box<Expr>,
    pub position: Position,
}

// STRUCTURED FORMS

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpr {
    pub type_name: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfExpr {
    pub condition: Box<Expr>,
    pub then_branch: Box<Expr>,
    pub else_branch: Box<Expr>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileExpr {
    pub condition: Box<Expr>,
    pub body: Box<Expr>,
    pub position: Position,
}

/// `{ e1; e2; ... }`, never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockExpr {
    pub body: Vec<Expr>,
    pub position: Position,
}

/// A method call.
///
/// A missing `receiver` means implicit dispatch on the enclosing object.
/// `static_type` is the `@TYPE` qualifier and only appears together with a
/// receiver.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchExpr {
    pub receiver: Option<Box<Expr>>,
    pub static_type: Option<String>,
    pub method: String,
    pub arguments: Vec<Expr>,
    pub position: Position,
}

impl DispatchExpr {
    pub fn is_implicit(&self) -> bool {
        self.receiver.is_none()
    }
}

/// One `name : TYPE [<- init]` binding of a `let`.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalBinding {
    pub name: String,
    pub type_name: String,
    pub init: Option<Box<Expr>>,
    pub position: Position,
}

/// `let` with its bindings in declaration order; never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct LetExpr {
    pub bindings: Vec<LocalBinding>,
    pub body: Box<Expr>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseBranch {
    pub name: String,
    pub type_name: String,
    pub body: Box<Expr>,
    pub position: Position,
}

/// `case` with its branches in source order; never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpr {
    pub scrutinee: Box<Expr>,
    pub branches: Vec<CaseBranch>,
    pub position: Position,
}
