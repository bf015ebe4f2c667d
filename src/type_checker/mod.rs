//! Type checking and semantic analysis module.
//!
//! This module runs the statement-level type checking pass over a
//! name-bound translation unit. It:
//!
//! - Folds operator sequences and discovers function literals (prepass)
//! - Checks top-level code, then each function body in discovery order
//! - Validates assignments, returns, conditionals and loops
//! - Warns about expression results that are silently discarded
//! - Rewrites checked nodes in place and leaves failed ones untouched
//!
//! Expression, declaration and signature checking sit behind the
//! `ExprChecker` trait; `BasicExprChecker` is the stock implementation.

pub mod context;
pub mod expr;
pub mod ignored;
pub mod operators;
pub mod prepass;
pub mod stmt;
pub mod type_checker;
pub mod verify;
