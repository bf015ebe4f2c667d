use crate::{
    ast::ast::{Ast, ExprId},
    errors::errors::{Diagnostic, DiagnosticKind, DiagnosticSink},
};

/// Checks an expression whose value is thrown away.
///
/// Discarding an ordinary value is fine. Discarding a storage location that
/// is neither read nor written, or a function that is never called, almost
/// always means the user left something out.
pub fn type_check_ignored_expr(ast: &Ast, diags: &mut dyn DiagnosticSink, expr: ExprId) {
    let expr = &ast[expr];
    let Some(ty) = &expr.ty else {
        return;
    };

    if ty.is_lvalue() {
        diags.diagnose(Diagnostic::new(
            DiagnosticKind::UnusedLValueResult,
            expr.span.clone(),
        ));
        return;
    }

    if ty.is_function() {
        diags.diagnose(Diagnostic::new(
            DiagnosticKind::UnusedFunctionValue,
            expr.span.clone(),
        ));
    }
}
