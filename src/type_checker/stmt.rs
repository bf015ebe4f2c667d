//! Statement checking.
//!
//! [`StmtChecker`] walks one statement tree with an optional enclosing
//! function. Expressions are handed to the [`ExprChecker`] in the context;
//! the checker here only decides what each statement kind requires of its
//! parts and what happens when a part fails.
//!
//! Failure is local. A statement whose required part fails returns `None`
//! and its parent keeps the old handle. Parts that did check are still
//! written back, so a failed `while` can carry a fully checked body.
//! Nothing here emits a diagnostic for a failure that was already reported
//! further down.
//!
//! [`ExprChecker`]: super::context::ExprChecker

use crate::{
    ast::{
        ast::{Ast, ExprId, FuncId, StmtId},
        statements::{BlockElement, StmtKind},
        types::Type,
    },
    errors::errors::{Diagnostic, DiagnosticKind},
};

use super::{context::TypeCheckContext, ignored::type_check_ignored_expr};

pub struct StmtChecker<'c, 'a> {
    ast: &'c mut Ast,
    cx: &'c mut TypeCheckContext<'a>,
    /// Function whose body is being checked; `None` for top-level code.
    the_func: Option<FuncId>,
}

impl<'c, 'a> StmtChecker<'c, 'a> {
    pub fn new(ast: &'c mut Ast, cx: &'c mut TypeCheckContext<'a>, the_func: Option<FuncId>) -> Self {
        StmtChecker { ast, cx, the_func }
    }

    fn type_check_expr(&mut self, expr: ExprId, dest_ty: Option<&Type>) -> Option<ExprId> {
        self.cx
            .checker
            .check_expr(self.ast, self.cx.diags, expr, dest_ty)
    }

    fn bool_type(&self) -> Type {
        self.cx.checker.builtin_integer(1)
    }

    /// Checks `stmt`, returning the handle its parent should now hold, or
    /// `None` if it failed.
    pub fn type_check_stmt(&mut self, stmt: StmtId) -> Option<StmtId> {
        match self.ast[stmt].kind.clone() {
            StmtKind::Error | StmtKind::NoOp => Some(stmt),
            StmtKind::Assign { dest, src } => self.type_check_assign(stmt, dest, src),
            StmtKind::Block(_) => Some(self.type_check_block(stmt)),
            StmtKind::Return { result } => self.type_check_return(stmt, result),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => self.type_check_if(stmt, cond, then_branch, else_branch),
            StmtKind::While { cond, body } => self.type_check_while(stmt, cond, body),
        }
    }

    fn type_check_assign(&mut self, stmt: StmtId, dest: ExprId, src: ExprId) -> Option<StmtId> {
        let dest = self.type_check_expr(dest, None)?;
        self.set_assign(stmt, Some(dest), None);

        let dest_ty = self.ast.type_of(dest).cloned()?;
        let lhs_ty = match dest_ty.lvalue_object() {
            Some(object) => object.clone(),
            None => {
                self.cx.diags.diagnose(Diagnostic::new(
                    DiagnosticKind::AssignmentToNonLValue {
                        type_: dest_ty.to_string(),
                    },
                    self.ast[dest].span.clone(),
                ));
                dest_ty
            }
        };

        let src = self.type_check_expr(src, Some(&lhs_ty))?;
        self.set_assign(stmt, None, Some(src));

        Some(stmt)
    }

    fn set_assign(&mut self, stmt: StmtId, new_dest: Option<ExprId>, new_src: Option<ExprId>) {
        if let StmtKind::Assign { dest, src } = &mut self.ast[stmt].kind {
            if let Some(new_dest) = new_dest {
                *dest = new_dest;
            }
            if let Some(new_src) = new_src {
                *src = new_src;
            }
        }
    }

    /// Blocks never fail: each element is checked on its own and replaced
    /// only if it succeeded.
    fn type_check_block(&mut self, stmt: StmtId) -> StmtId {
        let elements = match &self.ast[stmt].kind {
            StmtKind::Block(block) => block.elements.clone(),
            _ => return stmt,
        };

        for (i, element) in elements.into_iter().enumerate() {
            let checked = match element {
                BlockElement::Expr(expr) => {
                    let Some(expr) = self.type_check_expr(expr, None) else {
                        continue;
                    };
                    if self.cx.options.diagnose_ignored_results {
                        type_check_ignored_expr(self.ast, self.cx.diags, expr);
                    }
                    BlockElement::Expr(expr)
                }
                BlockElement::Stmt(sub) => match self.type_check_stmt(sub) {
                    Some(sub) => BlockElement::Stmt(sub),
                    None => continue,
                },
                BlockElement::Decl(decl) => {
                    self.cx.checker.check_decl(self.ast, self.cx.diags, decl);
                    continue;
                }
            };

            if let StmtKind::Block(block) = &mut self.ast[stmt].kind {
                block.elements[i] = checked;
            }
        }

        stmt
    }

    fn type_check_return(&mut self, stmt: StmtId, result: Option<ExprId>) -> Option<StmtId> {
        let Some(func) = self.the_func else {
            self.cx.diags.diagnose(Diagnostic::new(
                DiagnosticKind::ReturnOutsideFunction,
                self.ast[stmt].span.clone(),
            ));
            return None;
        };
        let result_ty = self.ast[func].result.clone();

        let Some(result) = result else {
            if result_ty.is_unit() {
                return Some(stmt);
            }
            self.cx.diags.diagnose(Diagnostic::new(
                DiagnosticKind::ReturnMissingValue {
                    expected: result_ty.to_string(),
                },
                self.ast[stmt].span.clone(),
            ));
            return None;
        };

        let result = self.type_check_expr(result, Some(&result_ty))?;
        self.ast[stmt].kind = StmtKind::Return {
            result: Some(result),
        };

        Some(stmt)
    }

    fn type_check_if(
        &mut self,
        stmt: StmtId,
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    ) -> Option<StmtId> {
        let bool_ty = self.bool_type();
        let cond = self.type_check_expr(cond, Some(&bool_ty));
        let then_checked = self.type_check_stmt(then_branch);
        let else_checked = else_branch.map(|s| self.type_check_stmt(s));

        if let StmtKind::If {
            cond: cond_slot,
            then_branch: then_slot,
            else_branch: else_slot,
        } = &mut self.ast[stmt].kind
        {
            if let Some(cond) = cond {
                *cond_slot = cond;
            }
            if let Some(then_checked) = then_checked {
                *then_slot = then_checked;
            }
            if let Some(Some(else_checked)) = else_checked {
                *else_slot = Some(else_checked);
            }
        }

        cond?;
        then_checked?;
        if let Some(else_checked) = else_checked {
            else_checked?;
        }
        Some(stmt)
    }

    fn type_check_while(&mut self, stmt: StmtId, cond: ExprId, body: StmtId) -> Option<StmtId> {
        let bool_ty = self.bool_type();
        let cond = self.type_check_expr(cond, Some(&bool_ty));
        let body = self.type_check_stmt(body);

        if let StmtKind::While {
            cond: cond_slot,
            body: body_slot,
        } = &mut self.ast[stmt].kind
        {
            if let Some(cond) = cond {
                *cond_slot = cond;
            }
            if let Some(body) = body {
                *body_slot = body;
            }
        }

        cond?;
        body?;
        Some(stmt)
    }
}
