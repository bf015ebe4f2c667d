//! Post-checking consistency checks.
//!
//! These catch bugs in the checker, not in the program being compiled, so
//! they never produce user diagnostics.

use log::error;
use thiserror::Error;

use crate::ast::{
    ast::{AstStage, DeclId, ExprId, StmtId, TranslationUnit},
    expressions::{DeclKind, ExprKind},
    statements::{BlockElement, StmtKind},
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VerifyError {
    #[error("translation unit is at stage {stage:?}, expected TypeChecked")]
    WrongStage { stage: AstStage },
    #[error("dangling {node} handle {index}")]
    DanglingHandle { node: &'static str, index: usize },
    #[error("function at index {index} was never signature checked")]
    UncheckedSignature { index: usize },
    #[error("operator sequence at index {index} was never folded")]
    UnfoldedSequence { index: usize },
    #[error("function body at index {index} is not a block")]
    NonBlockBody { index: usize },
}

/// Asserts, in debug builds, that `unit` is consistent after checking.
pub fn verify(unit: &TranslationUnit) {
    let violations = find_violations(unit);
    for violation in violations.iter() {
        error!("{}: {}", unit.name, violation);
    }
    debug_assert!(
        violations.is_empty(),
        "{} failed verification",
        unit.name
    );
}

/// Every inconsistency reachable from the unit's top-level block.
pub fn find_violations(unit: &TranslationUnit) -> Vec<VerifyError> {
    let mut verifier = Verifier {
        unit,
        violations: vec![],
    };
    if unit.stage() != AstStage::TypeChecked {
        verifier.violations.push(VerifyError::WrongStage {
            stage: unit.stage(),
        });
    }
    verifier.visit_stmt(unit.body);
    verifier.violations
}

struct Verifier<'a> {
    unit: &'a TranslationUnit,
    violations: Vec<VerifyError>,
}

impl Verifier<'_> {
    fn dangling(&mut self, node: &'static str, index: usize) {
        self.violations
            .push(VerifyError::DanglingHandle { node, index });
    }

    fn visit_stmt(&mut self, id: StmtId) {
        let unit = self.unit;
        let ast = &unit.ast;
        if !ast.has_stmt(id) {
            return self.dangling("statement", id.index());
        }

        match &ast[id].kind {
            StmtKind::Error | StmtKind::NoOp => {}
            StmtKind::Assign { dest, src } => {
                self.visit_expr(*dest);
                self.visit_expr(*src);
            }
            StmtKind::Block(block) => {
                for element in block.elements.iter() {
                    match *element {
                        BlockElement::Expr(expr) => self.visit_expr(expr),
                        BlockElement::Stmt(stmt) => self.visit_stmt(stmt),
                        BlockElement::Decl(decl) => self.visit_decl(decl),
                    }
                }
            }
            StmtKind::Return { result } => {
                if let Some(result) = result {
                    self.visit_expr(*result);
                }
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.visit_expr(*cond);
                self.visit_stmt(*then_branch);
                if let Some(else_branch) = else_branch {
                    self.visit_stmt(*else_branch);
                }
            }
            StmtKind::While { cond, body } => {
                self.visit_expr(*cond);
                self.visit_stmt(*body);
            }
        }
    }

    fn visit_decl(&mut self, id: DeclId) {
        let unit = self.unit;
        let ast = &unit.ast;
        if !ast.has_decl(id) {
            return self.dangling("declaration", id.index());
        }

        match &ast[id].kind {
            DeclKind::Var { init, .. } => {
                if let Some(init) = init {
                    self.visit_expr(*init);
                }
            }
            DeclKind::Func { func } => self.visit_expr(*func),
        }
    }

    fn visit_expr(&mut self, id: ExprId) {
        let unit = self.unit;
        let ast = &unit.ast;
        if !ast.has_expr(id) {
            return self.dangling("expression", id.index());
        }

        match &ast[id].kind {
            ExprKind::Error | ExprKind::IntegerLiteral(_) => {}
            ExprKind::DeclRef(decl) => {
                if !ast.has_decl(*decl) {
                    self.dangling("declaration", decl.index());
                }
            }
            ExprKind::Paren(sub) | ExprKind::Load(sub) => self.visit_expr(*sub),
            ExprKind::Sequence { .. } => {
                self.violations
                    .push(VerifyError::UnfoldedSequence { index: id.index() });
            }
            ExprKind::Binary { lhs, rhs, .. } => {
                self.visit_expr(*lhs);
                self.visit_expr(*rhs);
            }
            ExprKind::Call { callee, args } => {
                self.visit_expr(*callee);
                for arg in args.iter() {
                    self.visit_expr(*arg);
                }
            }
            ExprKind::Func(func) => {
                if !ast.has_func(*func) {
                    return self.dangling("function", func.index());
                }
                let func = &ast[*func];
                if !func.signature_checked {
                    self.violations.push(VerifyError::UncheckedSignature {
                        index: id.index(),
                    });
                }
                for param in func.params.iter() {
                    self.visit_decl(*param);
                }
                if ast.has_stmt(func.body) && ast[func.body].as_block().is_none() {
                    self.violations
                        .push(VerifyError::NonBlockBody { index: id.index() });
                }
                self.visit_stmt(func.body);
            }
        }
    }
}
