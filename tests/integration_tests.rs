//! Integration tests for the full type checking pass.
//!
//! These tests build name-bound translation units the way a front end
//! would, run `perform_type_checking` over them and check both the
//! diagnostics and the rewritten tree.

use sema::{
    ast::{
        ast::{Ast, AstStage, DeclId, ExprId, StmtId, TranslationUnit},
        expressions::{BinaryOp, DeclKind, ExprKind, FuncExpr, SequenceOperator},
        statements::{BlockElement, BlockStmt, StmtKind},
        types::Type,
    },
    errors::errors::{Diagnostics, ErrorCategory},
    perform_type_checking,
    type_checker::{
        context::TypeCheckContext, expr::BasicExprChecker, verify::find_violations,
    },
    Span, MK_DECL, MK_EXPR, MK_STMT,
};

fn int_var(ast: &mut Ast, name: &str) -> DeclId {
    MK_DECL!(
        ast,
        name,
        DeclKind::Var {
            ty: Some(Type::Integer(64)),
            init: None,
        }
    )
}

fn op(name: &str) -> SequenceOperator {
    SequenceOperator {
        name: name.to_string(),
        span: Span::null(),
    }
}

fn block(ast: &mut Ast, elements: Vec<BlockElement>) -> StmtId {
    MK_STMT!(ast, StmtKind::Block(BlockStmt::new(elements)))
}

/// A unit-returning function `name` with no parameters and an empty body.
fn empty_func(ast: &mut Ast, name: &str) -> DeclId {
    let body = block(ast, vec![]);
    let func = ast.alloc_func(FuncExpr::new(vec![], Type::unit(), body, Span::null()));
    let literal = MK_EXPR!(ast, ExprKind::Func(func));
    MK_DECL!(ast, name, DeclKind::Func { func: literal })
}

fn check(ast: Ast, root: StmtId) -> (TranslationUnit, Diagnostics) {
    let mut unit = TranslationUnit::new("test.lang", ast, root);
    unit.advance_stage(AstStage::NameBound);

    let mut checker = BasicExprChecker::new();
    let mut diags = Diagnostics::new();
    let mut cx = TypeCheckContext::new(&mut checker, &mut diags);
    perform_type_checking(&mut unit, &mut cx);

    (unit, diags)
}

fn assign_parts(unit: &TranslationUnit, stmt: StmtId) -> (ExprId, ExprId) {
    match unit.ast[stmt].kind {
        StmtKind::Assign { dest, src } => (dest, src),
        ref other => panic!("expected an assignment, found {:?}", other),
    }
}

#[test]
fn test_assignment_of_folded_sum() {
    // var x: Int64; x = 1 + 2
    let mut ast = Ast::new();
    let x = int_var(&mut ast, "x");
    let dest = MK_EXPR!(ast, ExprKind::DeclRef(x));
    let one = MK_EXPR!(ast, ExprKind::IntegerLiteral(1));
    let two = MK_EXPR!(ast, ExprKind::IntegerLiteral(2));
    let src = MK_EXPR!(
        ast,
        ExprKind::Sequence {
            operands: vec![one, two],
            operators: vec![op("+")],
        }
    );
    let stmt = MK_STMT!(ast, StmtKind::Assign { dest, src });
    let root = block(&mut ast, vec![BlockElement::Decl(x), BlockElement::Stmt(stmt)]);

    let (unit, diags) = check(ast, root);

    assert!(diags.is_empty(), "unexpected diagnostics: {:?}", diags);
    assert_eq!(unit.stage(), AstStage::TypeChecked);
    let (dest, src) = assign_parts(&unit, stmt);
    assert_eq!(unit.ast.type_of(dest), Some(&Type::lvalue(Type::Integer(64))));
    assert_eq!(
        unit.ast[src].kind,
        ExprKind::Binary {
            op: BinaryOp::Add,
            lhs: one,
            rhs: two
        }
    );
    assert_eq!(unit.ast.type_of(src), Some(&Type::Integer(64)));
    assert!(find_violations(&unit).is_empty());
}

#[test]
fn test_top_level_return_does_not_stop_checking() {
    // return 0; var x: Int64; x = 3
    let mut ast = Ast::new();
    let zero = MK_EXPR!(ast, ExprKind::IntegerLiteral(0));
    let ret = MK_STMT!(ast, StmtKind::Return { result: Some(zero) });
    let x = int_var(&mut ast, "x");
    let dest = MK_EXPR!(ast, ExprKind::DeclRef(x));
    let three = MK_EXPR!(ast, ExprKind::IntegerLiteral(3));
    let stmt = MK_STMT!(ast, StmtKind::Assign { dest, src: three });
    let root = block(
        &mut ast,
        vec![
            BlockElement::Stmt(ret),
            BlockElement::Decl(x),
            BlockElement::Stmt(stmt),
        ],
    );

    let (unit, diags) = check(ast, root);

    assert_eq!(diags.len(), 1);
    assert_eq!(diags.count_category(ErrorCategory::Context), 1);
    assert!(diags.has_errors());
    assert_eq!(unit.ast.type_of(three), Some(&Type::Integer(64)));
    assert_eq!(
        unit.ast[ret].kind,
        StmtKind::Return { result: Some(zero) }
    );
}

#[test]
fn test_loop_condition_failure_keeps_checked_body() {
    // func g() {}; var x: Int64; while (g) { x = 1 }
    let mut ast = Ast::new();
    let g = empty_func(&mut ast, "g");
    let x = int_var(&mut ast, "x");
    let cond_ref = MK_EXPR!(ast, ExprKind::DeclRef(g));
    let cond = MK_EXPR!(ast, ExprKind::Paren(cond_ref));
    let dest = MK_EXPR!(ast, ExprKind::DeclRef(x));
    let one = MK_EXPR!(ast, ExprKind::IntegerLiteral(1));
    let assign = MK_STMT!(ast, StmtKind::Assign { dest, src: one });
    let body = block(&mut ast, vec![BlockElement::Stmt(assign)]);
    let stmt = MK_STMT!(ast, StmtKind::While { cond, body });
    let root = block(
        &mut ast,
        vec![
            BlockElement::Decl(g),
            BlockElement::Decl(x),
            BlockElement::Stmt(stmt),
        ],
    );

    let (unit, diags) = check(ast, root);

    assert_eq!(diags.len(), 1);
    assert_eq!(diags.count_category(ErrorCategory::TypeMismatch), 1);
    let first = diags.iter().next().map(|d| d.get_diagnostic_name().to_string());
    assert_eq!(first.as_deref(), Some("TypeMismatch"));
    assert_eq!(unit.ast.type_of(one), Some(&Type::Integer(64)));
    assert_eq!(unit.ast[stmt].kind, StmtKind::While { cond, body });
}

#[test]
fn test_failed_statement_in_function_leaves_rest_checked() {
    // func g() {}
    // func f() -> Int64 { var x: Int64; x = g; return x }
    let mut ast = Ast::new();
    let g = empty_func(&mut ast, "g");
    let x = int_var(&mut ast, "x");
    let dest = MK_EXPR!(ast, ExprKind::DeclRef(x));
    let g_ref = MK_EXPR!(ast, ExprKind::DeclRef(g));
    let bad = MK_STMT!(ast, StmtKind::Assign { dest, src: g_ref });
    let x_ref = MK_EXPR!(ast, ExprKind::DeclRef(x));
    let ret = MK_STMT!(ast, StmtKind::Return { result: Some(x_ref) });
    let body = block(
        &mut ast,
        vec![
            BlockElement::Decl(x),
            BlockElement::Stmt(bad),
            BlockElement::Stmt(ret),
        ],
    );
    let func = ast.alloc_func(FuncExpr::new(vec![], Type::Integer(64), body, Span::null()));
    let literal = MK_EXPR!(ast, ExprKind::Func(func));
    let f = MK_DECL!(ast, "f", DeclKind::Func { func: literal });
    let root = block(&mut ast, vec![BlockElement::Decl(g), BlockElement::Decl(f)]);

    let (unit, diags) = check(ast, root);

    assert_eq!(diags.len(), 1);
    assert_eq!(diags.count_category(ErrorCategory::TypeMismatch), 1);
    assert_eq!(assign_parts(&unit, bad), (dest, g_ref));
    match unit.ast[ret].kind {
        StmtKind::Return {
            result: Some(result),
        } => {
            assert_eq!(unit.ast[result].kind, ExprKind::Load(x_ref));
            assert_eq!(unit.ast.type_of(result), Some(&Type::Integer(64)));
        }
        ref other => panic!("expected a return, found {:?}", other),
    }
    assert!(unit.ast[func].signature_checked);
    assert!(find_violations(&unit).is_empty());
}

#[test]
fn test_unknown_operator_is_reported_once() {
    // var x: Int64; x = 1 <> 2
    let mut ast = Ast::new();
    let x = int_var(&mut ast, "x");
    let dest = MK_EXPR!(ast, ExprKind::DeclRef(x));
    let one = MK_EXPR!(ast, ExprKind::IntegerLiteral(1));
    let two = MK_EXPR!(ast, ExprKind::IntegerLiteral(2));
    let src = MK_EXPR!(
        ast,
        ExprKind::Sequence {
            operands: vec![one, two],
            operators: vec![op("<>")],
        }
    );
    let stmt = MK_STMT!(ast, StmtKind::Assign { dest, src });
    let root = block(&mut ast, vec![BlockElement::Decl(x), BlockElement::Stmt(stmt)]);

    let (unit, diags) = check(ast, root);

    assert_eq!(diags.len(), 1);
    assert_eq!(diags.count_category(ErrorCategory::Structural), 1);
    let (_, src) = assign_parts(&unit, stmt);
    assert_eq!(unit.ast[src].kind, ExprKind::Error);
}

#[test]
fn test_calls_and_discarded_results() {
    // func g() {}; var x: Int64; g(); x; g
    let mut ast = Ast::new();
    let g = empty_func(&mut ast, "g");
    let x = int_var(&mut ast, "x");
    let callee = MK_EXPR!(ast, ExprKind::DeclRef(g));
    let call = MK_EXPR!(ast, ExprKind::Call { callee, args: vec![] });
    let x_ref = MK_EXPR!(ast, ExprKind::DeclRef(x));
    let g_ref = MK_EXPR!(ast, ExprKind::DeclRef(g));
    let root = block(
        &mut ast,
        vec![
            BlockElement::Decl(g),
            BlockElement::Decl(x),
            BlockElement::Expr(call),
            BlockElement::Expr(x_ref),
            BlockElement::Expr(g_ref),
        ],
    );

    let (unit, diags) = check(ast, root);

    let names = diags
        .iter()
        .map(|d| d.get_diagnostic_name().to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["UnusedLValueResult", "UnusedFunctionValue"]);
    assert_eq!(diags.warning_count(), 2);
    assert!(!diags.has_errors());
    assert_eq!(unit.ast.type_of(call), Some(&Type::unit()));
}
