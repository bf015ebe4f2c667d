//! Utility macros for building trees.
//!
//! This module defines helper macros for allocating nodes in an [`Ast`]
//! arena without spelling out spans:
//!
//! - `MK_EXPR!` - Allocates an expression
//! - `MK_STMT!` - Allocates a statement
//! - `MK_DECL!` - Allocates a declaration
//!
//! When no span is given the node gets `Span::null()`.
//!
//! [`Ast`]: crate::ast::ast::Ast

/// Allocates an expression and returns its `ExprId`.
///
/// # Example
///
/// ```ignore
/// let one = MK_EXPR!(ast, ExprKind::IntegerLiteral(1));
/// ```
#[macro_export]
macro_rules! MK_EXPR {
    ($ast:expr, $kind:expr) => {
        $ast.alloc_expr($kind, $crate::Span::null())
    };
    ($ast:expr, $kind:expr, $span:expr) => {
        $ast.alloc_expr($kind, $span)
    };
}

/// Allocates a statement and returns its `StmtId`.
///
/// # Example
///
/// ```ignore
/// let assign = MK_STMT!(ast, StmtKind::Assign { dest, src });
/// ```
#[macro_export]
macro_rules! MK_STMT {
    ($ast:expr, $kind:expr) => {
        $ast.alloc_stmt($kind, $crate::Span::null())
    };
    ($ast:expr, $kind:expr, $span:expr) => {
        $ast.alloc_stmt($kind, $span)
    };
}

/// Allocates a named declaration and returns its `DeclId`.
///
/// # Example
///
/// ```ignore
/// let x = MK_DECL!(ast, "x", DeclKind::Var { ty: Some(Type::Integer(64)), init: None });
/// ```
#[macro_export]
macro_rules! MK_DECL {
    ($ast:expr, $name:expr, $kind:expr) => {
        $ast.alloc_decl($name, $kind, $crate::Span::null())
    };
    ($ast:expr, $name:expr, $kind:expr, $span:expr) => {
        $ast.alloc_decl($name, $kind, $span)
    };
}
