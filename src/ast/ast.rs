use crate::Position;

use super::expressions::Expr;

/// The root of the tree: every class, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub classes: Vec<ClassDef>,
    pub position: Position,
}

/// A class definition.
///
/// `name` and `parent` are only known to be syntactic type identifiers;
/// whether they refer to real classes is for semantic analysis to decide.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: String,
    pub parent: Option<String>,
    pub features: Vec<Feature>,
    pub position: Position,
}

/// A class member.
#[derive(Debug, Clone, PartialEq)]
pub enum Feature {
    Method(Method),
    Attribute(Attribute),
}

impl Feature {
    pub fn get_name(&self) -> &str {
        match self {
            Feature::Method(method) => &method.name,
            Feature::Attribute(attribute) => &attribute.name,
        }
    }

    pub fn get_position(&self) -> Position {
        match self {
            Feature::Method(method) => method.position,
            Feature::Attribute(attribute) => attribute.position,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    pub formals: Vec<Formal>,
    pub return_type: String,
    pub body: Expr,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub type_name: String,
    pub init: Option<Expr>,
    pub position: Position,
}

/// A method parameter. Duplicate names are not rejected here.
#[derive(Debug, Clone, PartialEq)]
pub struct Formal {
    pub name: String,
    pub type_name: String,
    pub position: Position,
}
