//! A self-contained expression checker.
//!
//! The statement checker only depends on [`ExprChecker`]. This is the
//! implementation used when the embedding compiler does not bring its own:
//! integer arithmetic, comparisons, variable references, calls and function
//! literals over builtin integer types.

use crate::{
    ast::{
        ast::{Ast, DeclId, ExprId, FuncId},
        expressions::{BinaryOp, DeclKind, ExprKind},
        types::Type,
    },
    errors::errors::{Diagnostic, DiagnosticKind, DiagnosticSink},
    Span,
};

use super::context::ExprChecker;

/// Width literals get when nothing says otherwise.
pub const DEFAULT_INTEGER_BITS: u32 = 64;

#[derive(Debug, Clone, Default)]
pub struct BasicExprChecker;

impl BasicExprChecker {
    pub fn new() -> Self {
        BasicExprChecker
    }

    /// Type of a reference to `decl`.
    fn decl_ref_type(
        &self,
        ast: &Ast,
        diags: &mut dyn DiagnosticSink,
        decl: DeclId,
        span: &Span,
    ) -> Option<Type> {
        match &ast[decl].kind {
            DeclKind::Var { ty: Some(ty), .. } => Some(Type::lvalue(ty.clone())),
            DeclKind::Var { ty: None, .. } => {
                diags.diagnose(Diagnostic::new(
                    DiagnosticKind::UntypedDeclaration {
                        name: ast[decl].name.clone(),
                    },
                    span.clone(),
                ));
                None
            }
            DeclKind::Func { func } => match &ast[*func].kind {
                ExprKind::Func(func) => self.function_type(ast, diags, *func, span),
                _ => None,
            },
        }
    }

    fn function_type(
        &self,
        ast: &Ast,
        diags: &mut dyn DiagnosticSink,
        func: FuncId,
        span: &Span,
    ) -> Option<Type> {
        let mut params = vec![];
        for param in ast[func].params.iter() {
            match &ast[*param].kind {
                DeclKind::Var { ty: Some(ty), .. } => params.push(ty.clone()),
                _ => {
                    diags.diagnose(Diagnostic::new(
                        DiagnosticKind::UntypedDeclaration {
                            name: ast[*param].name.clone(),
                        },
                        span.clone(),
                    ));
                    return None;
                }
            }
        }
        Some(Type::function(params, ast[func].result.clone()))
    }

    /// Checks `expr` bottom-up without coercing the result. `hint` only
    /// steers literal typing.
    fn type_check_expr(
        &mut self,
        ast: &mut Ast,
        diags: &mut dyn DiagnosticSink,
        expr: ExprId,
        hint: Option<&Type>,
    ) -> Option<ExprId> {
        let span = ast[expr].span.clone();

        let ty = match ast[expr].kind.clone() {
            ExprKind::Error => return None,
            ExprKind::Load(_) => {
                // Produced by an earlier check.
                return ast[expr].ty.as_ref().map(|_| expr);
            }
            ExprKind::IntegerLiteral(_) => match hint.map(Type::rvalue) {
                Some(Type::Integer(bits)) => Type::Integer(*bits),
                _ => Type::Integer(DEFAULT_INTEGER_BITS),
            },
            ExprKind::DeclRef(decl) => self.decl_ref_type(ast, diags, decl, &span)?,
            ExprKind::Paren(sub) => {
                let sub = self.type_check_expr(ast, diags, sub, hint)?;
                ast[expr].kind = ExprKind::Paren(sub);
                ast.type_of(sub).cloned()?
            }
            ExprKind::Sequence { .. } => {
                log::error!("operator sequence reached expression checking unfolded");
                return None;
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let (lhs, rhs, ty) = self.type_check_binary(ast, diags, op, lhs, rhs, hint)?;
                ast[expr].kind = ExprKind::Binary { op, lhs, rhs };
                ty
            }
            ExprKind::Call { callee, args } => {
                let callee = self.type_check_expr(ast, diags, callee, None)?;
                let callee = self.load(ast, callee)?;
                let callee_ty = ast.type_of(callee).cloned()?;
                let Some(function) = callee_ty.as_function() else {
                    diags.diagnose(Diagnostic::new(
                        DiagnosticKind::CallOfNonFunction {
                            type_: callee_ty.to_string(),
                        },
                        ast[callee].span.clone(),
                    ));
                    return None;
                };
                if function.params.len() != args.len() {
                    diags.diagnose(Diagnostic::new(
                        DiagnosticKind::ArgumentCountMismatch {
                            expected: function.params.len(),
                            received: args.len(),
                        },
                        span.clone(),
                    ));
                    return None;
                }

                let mut checked_args = vec![];
                for (arg, param) in args.iter().zip(function.params.iter()) {
                    checked_args.push(self.check_expr(ast, diags, *arg, Some(param)));
                }
                let checked_args = checked_args.into_iter().collect::<Option<Vec<_>>>()?;

                ast[expr].kind = ExprKind::Call {
                    callee,
                    args: checked_args,
                };
                (*function.result).clone()
            }
            ExprKind::Func(func) => self.function_type(ast, diags, func, &span)?,
        };

        ast[expr].ty = Some(ty);
        Some(expr)
    }

    fn type_check_binary(
        &mut self,
        ast: &mut Ast,
        diags: &mut dyn DiagnosticSink,
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
        hint: Option<&Type>,
    ) -> Option<(ExprId, ExprId, Type)> {
        let bool_ty = self.builtin_integer(1);
        let operand_hint = if op.is_logical() {
            Some(&bool_ty)
        } else if op.is_comparison() {
            None
        } else {
            hint
        };

        let lhs = self.type_check_expr(ast, diags, lhs, operand_hint)?;
        let lhs = self.load(ast, lhs)?;
        let lhs_ty = ast.type_of(lhs).cloned()?;
        if !lhs_ty.is_integer() || (op.is_logical() && lhs_ty != bool_ty) {
            diags.diagnose(Diagnostic::new(
                DiagnosticKind::InvalidOperands {
                    operator: op.spelling().to_string(),
                    type_: lhs_ty.to_string(),
                },
                ast[lhs].span.clone(),
            ));
            return None;
        }

        let rhs = self.check_expr(ast, diags, rhs, Some(&lhs_ty))?;
        let ty = if op.is_comparison() {
            bool_ty
        } else {
            lhs_ty
        };
        Some((lhs, rhs, ty))
    }

    /// Strips an lvalue wrapper by inserting a load.
    fn load(&mut self, ast: &mut Ast, expr: ExprId) -> Option<ExprId> {
        let ty = ast.type_of(expr)?;
        match ty.lvalue_object() {
            Some(object) => {
                let object = object.clone();
                let span = ast[expr].span.clone();
                let load = ast.alloc_expr(ExprKind::Load(expr), span);
                ast[load].ty = Some(object);
                Some(load)
            }
            None => Some(expr),
        }
    }
}

impl ExprChecker for BasicExprChecker {
    fn check_expr(
        &mut self,
        ast: &mut Ast,
        diags: &mut dyn DiagnosticSink,
        expr: ExprId,
        expected: Option<&Type>,
    ) -> Option<ExprId> {
        let expr = self.type_check_expr(ast, diags, expr, expected)?;
        match expected {
            Some(expected) => self.convert(ast, diags, expr, expected),
            None => Some(expr),
        }
    }

    fn convert(
        &mut self,
        ast: &mut Ast,
        diags: &mut dyn DiagnosticSink,
        expr: ExprId,
        target: &Type,
    ) -> Option<ExprId> {
        let ty = ast.type_of(expr)?.clone();
        if &ty == target {
            return Some(expr);
        }
        if !target.is_lvalue() && ty.lvalue_object() == Some(target) {
            return self.load(ast, expr);
        }

        diags.diagnose(Diagnostic::new(
            DiagnosticKind::TypeMismatch {
                expected: target.to_string(),
                received: ty.to_string(),
            },
            ast[expr].span.clone(),
        ));
        None
    }

    fn check_decl(&mut self, ast: &mut Ast, diags: &mut dyn DiagnosticSink, decl: DeclId) {
        let DeclKind::Var { ty, init: Some(init) } = ast[decl].kind.clone() else {
            return;
        };

        let Some(init) = self.check_expr(ast, diags, init, ty.as_ref()) else {
            return;
        };
        let init = if ty.is_none() {
            match self.load(ast, init) {
                Some(init) => init,
                None => return,
            }
        } else {
            init
        };
        let inferred = ast.type_of(init).cloned();

        if let DeclKind::Var {
            ty: ty_slot,
            init: init_slot,
        } = &mut ast[decl].kind
        {
            *init_slot = Some(init);
            if ty_slot.is_none() {
                *ty_slot = inferred;
            }
        }
    }

    fn check_function_signature(
        &mut self,
        ast: &mut Ast,
        diags: &mut dyn DiagnosticSink,
        func: FuncId,
    ) {
        let span = ast[func].span.clone();
        for param in ast[func].params.clone() {
            if let DeclKind::Var { ty: None, .. } = ast[param].kind {
                diags.diagnose(Diagnostic::new(
                    DiagnosticKind::UntypedDeclaration {
                        name: ast[param].name.clone(),
                    },
                    span.clone(),
                ));
            }
        }
        ast[func].signature_checked = true;
    }

    fn builtin_integer(&self, bits: u32) -> Type {
        Type::Integer(bits)
    }
}
