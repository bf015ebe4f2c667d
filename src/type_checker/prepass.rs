//! Whole-program walk run before any type checking.
//!
//! One traversal does two jobs: it folds every operator sequence into a
//! binary expression tree (children before parents) and it collects every
//! function literal in the order it is first reached.

use crate::{
    ast::{
        ast::{Ast, DeclId, ExprId, FuncId, StmtId},
        expressions::{DeclKind, ExprKind},
        statements::{BlockElement, StmtKind},
    },
    errors::errors::DiagnosticSink,
};

use super::operators::fold_sequence;

/// Folds sequences under `root` in place and returns the function literals
/// found there, outer functions before the ones nested inside them.
pub fn run_prepass(ast: &mut Ast, diags: &mut dyn DiagnosticSink, root: StmtId) -> Vec<FuncId> {
    let mut walker = PrePassWalker {
        ast,
        diags,
        funcs: vec![],
    };
    walker.walk_stmt(root);
    walker.funcs
}

struct PrePassWalker<'a> {
    ast: &'a mut Ast,
    diags: &'a mut dyn DiagnosticSink,
    funcs: Vec<FuncId>,
}

impl PrePassWalker<'_> {
    fn walk_stmt(&mut self, id: StmtId) {
        match self.ast[id].kind.clone() {
            StmtKind::Error | StmtKind::NoOp => {}
            StmtKind::Assign { dest, src } => {
                let dest = self.walk_expr(dest);
                let src = self.walk_expr(src);
                self.ast[id].kind = StmtKind::Assign { dest, src };
            }
            StmtKind::Block(block) => {
                for (i, element) in block.elements.iter().enumerate() {
                    match *element {
                        BlockElement::Expr(expr) => {
                            let expr = self.walk_expr(expr);
                            if let StmtKind::Block(block) = &mut self.ast[id].kind {
                                block.elements[i] = BlockElement::Expr(expr);
                            }
                        }
                        BlockElement::Stmt(stmt) => self.walk_stmt(stmt),
                        BlockElement::Decl(decl) => self.walk_decl(decl),
                    }
                }
            }
            StmtKind::Return { result } => {
                if let Some(result) = result {
                    let result = self.walk_expr(result);
                    self.ast[id].kind = StmtKind::Return {
                        result: Some(result),
                    };
                }
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond = self.walk_expr(cond);
                if let StmtKind::If { cond: slot, .. } = &mut self.ast[id].kind {
                    *slot = cond;
                }
                self.walk_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.walk_stmt(else_branch);
                }
            }
            StmtKind::While { cond, body } => {
                let cond = self.walk_expr(cond);
                if let StmtKind::While { cond: slot, .. } = &mut self.ast[id].kind {
                    *slot = cond;
                }
                self.walk_stmt(body);
            }
        }
    }

    fn walk_decl(&mut self, id: DeclId) {
        match self.ast[id].kind.clone() {
            DeclKind::Var { init, .. } => {
                if let Some(init) = init {
                    let init = self.walk_expr(init);
                    if let DeclKind::Var { init: slot, .. } = &mut self.ast[id].kind {
                        *slot = Some(init);
                    }
                }
            }
            DeclKind::Func { func } => {
                let func = self.walk_expr(func);
                self.ast[id].kind = DeclKind::Func { func };
            }
        }
    }

    /// Returns the handle the parent should hold for `id` afterwards.
    fn walk_expr(&mut self, id: ExprId) -> ExprId {
        let kind = self.ast[id].kind.clone();
        if let ExprKind::Func(func) = &kind {
            self.funcs.push(*func);
        }

        match kind {
            ExprKind::Error | ExprKind::IntegerLiteral(_) | ExprKind::DeclRef(_) => {}
            ExprKind::Paren(sub) => {
                let sub = self.walk_expr(sub);
                self.ast[id].kind = ExprKind::Paren(sub);
            }
            ExprKind::Load(sub) => {
                let sub = self.walk_expr(sub);
                self.ast[id].kind = ExprKind::Load(sub);
            }
            ExprKind::Sequence {
                operands,
                operators,
            } => {
                let operands = operands.into_iter().map(|e| self.walk_expr(e)).collect();
                self.ast[id].kind = ExprKind::Sequence {
                    operands,
                    operators,
                };
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs = self.walk_expr(lhs);
                let rhs = self.walk_expr(rhs);
                self.ast[id].kind = ExprKind::Binary { op, lhs, rhs };
            }
            ExprKind::Call { callee, args } => {
                let callee = self.walk_expr(callee);
                let args = args.into_iter().map(|e| self.walk_expr(e)).collect();
                self.ast[id].kind = ExprKind::Call { callee, args };
            }
            ExprKind::Func(func) => {
                for param in self.ast[func].params.clone() {
                    self.walk_decl(param);
                }
                let body = self.ast[func].body;
                self.walk_stmt(body);
            }
        }

        fold_sequence(self.ast, self.diags, id)
    }
}
