//! The seam between statement checking and the rest of semantic analysis.

use crate::{
    ast::{
        ast::{Ast, DeclId, ExprId, FuncId},
        types::Type,
    },
    errors::errors::DiagnosticSink,
};

/// Expression, declaration and signature checking as seen by the
/// statement checker.
///
/// Every method reports its own problems to `diags`. A `None` result means
/// the expression failed and has already been diagnosed; the caller must
/// leave the original handle in place. A `Some` result is the handle to
/// store in the parent's slot, which may differ from the input when the
/// expression was rewritten.
pub trait ExprChecker {
    /// Type checks `expr`, coercing it to `expected` when one is given.
    fn check_expr(
        &mut self,
        ast: &mut Ast,
        diags: &mut dyn DiagnosticSink,
        expr: ExprId,
        expected: Option<&Type>,
    ) -> Option<ExprId>;

    /// Coerces an already checked expression to `target`.
    fn convert(
        &mut self,
        ast: &mut Ast,
        diags: &mut dyn DiagnosticSink,
        expr: ExprId,
        target: &Type,
    ) -> Option<ExprId>;

    /// Validates a declaration appearing in statement position.
    fn check_decl(&mut self, ast: &mut Ast, diags: &mut dyn DiagnosticSink, decl: DeclId);

    /// Validates a function's declared signature before its body is checked.
    fn check_function_signature(
        &mut self,
        ast: &mut Ast,
        diags: &mut dyn DiagnosticSink,
        func: FuncId,
    );

    /// Builtin integer type of the given width.
    fn builtin_integer(&self, bits: u32) -> Type;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeCheckOptions {
    /// Run the consistency verifier after checking.
    pub verify: bool,
    /// Warn about discarded lvalues and uncalled functions.
    pub diagnose_ignored_results: bool,
}

impl Default for TypeCheckOptions {
    fn default() -> Self {
        TypeCheckOptions {
            verify: cfg!(debug_assertions),
            diagnose_ignored_results: true,
        }
    }
}

/// Everything a checking entry point needs besides the tree itself.
pub struct TypeCheckContext<'a> {
    pub checker: &'a mut dyn ExprChecker,
    pub diags: &'a mut dyn DiagnosticSink,
    pub options: TypeCheckOptions,
}

impl<'a> TypeCheckContext<'a> {
    pub fn new(checker: &'a mut dyn ExprChecker, diags: &'a mut dyn DiagnosticSink) -> Self {
        TypeCheckContext {
            checker,
            diags,
            options: TypeCheckOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TypeCheckOptions) -> Self {
        self.options = options;
        self
    }
}
