/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program, class and feature nodes
/// - expressions: The expression sum type and its node structs
pub mod ast;
pub mod expressions;
