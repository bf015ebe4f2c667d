use log::{debug, warn};

use crate::ast::ast::{AstStage, TranslationUnit};

use super::{context::TypeCheckContext, prepass::run_prepass, stmt::StmtChecker, verify::verify};

/// Type checks a name-bound translation unit in place.
///
/// The whole unit is always processed: problems are reported to the
/// context's sink and the offending nodes are left as they were. The unit
/// ends up at `AstStage::TypeChecked` either way; whether to stop compiling
/// is for a later phase to decide from the diagnostics.
pub fn perform_type_checking(unit: &mut TranslationUnit, cx: &mut TypeCheckContext) {
    if unit.stage() < AstStage::NameBound {
        warn!("{}: type checking before name binding", unit.name);
    }

    let funcs = run_prepass(&mut unit.ast, cx.diags, unit.body);
    debug!(
        "{}: prepass done, {} function(s) to check",
        unit.name,
        funcs.len()
    );

    // Top-level code has no enclosing function.
    let top_level = unit.body;
    if let Some(body) = StmtChecker::new(&mut unit.ast, cx, None).type_check_stmt(top_level) {
        unit.body = body;
    }

    for func in funcs {
        cx.checker
            .check_function_signature(&mut unit.ast, cx.diags, func);

        debug!("{}: type checking function {}", unit.name, func.index());
        let body = unit.ast[func].body;
        let checked = StmtChecker::new(&mut unit.ast, cx, Some(func)).type_check_stmt(body);
        if let Some(body) = checked {
            unit.ast[func].body = body;
        }
    }

    unit.advance_stage(AstStage::TypeChecked);

    if cx.options.verify {
        verify(unit);
    }
}
