/// AST (Abstract Syntax Tree) module
/// Contains the arena-backed tree the type checker rewrites in place
///
/// Submodules:
/// - ast: Node arena, handles and the translation unit
/// - expressions: Expressions, declarations and function literals
/// - statements: Statement kinds and block elements
/// - types: Types attached to checked expressions
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
