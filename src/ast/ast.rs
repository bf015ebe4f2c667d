use std::{
    ops::{Index, IndexMut},
    rc::Rc,
};

use crate::Span;

use super::{
    expressions::{Decl, DeclKind, Expr, ExprKind, FuncExpr},
    statements::{Stmt, StmtKind},
    types::Type,
};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_id!(
    /// Handle to an expression stored in an [`Ast`].
    ExprId
);
define_id!(
    /// Handle to a statement stored in an [`Ast`].
    StmtId
);
define_id!(
    /// Handle to a declaration stored in an [`Ast`].
    DeclId
);
define_id!(
    /// Handle to a function literal stored in an [`Ast`].
    FuncId
);

/// Arena owning every node of a translation unit.
///
/// Nodes are never removed. Replacing a child means allocating the new node
/// and overwriting the handle held in the parent's slot; the old node stays
/// in the arena, unreachable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ast {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    decls: Vec<Decl>,
    funcs: Vec<FuncExpr>,
}

impl Ast {
    pub fn new() -> Self {
        Ast::default()
    }

    pub fn alloc_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.exprs.push(Expr {
            kind,
            ty: None,
            span,
        });
        ExprId(self.exprs.len() as u32 - 1)
    }

    pub fn alloc_stmt(&mut self, kind: StmtKind, span: Span) -> StmtId {
        self.stmts.push(Stmt { kind, span });
        StmtId(self.stmts.len() as u32 - 1)
    }

    pub fn alloc_decl(&mut self, name: &str, kind: DeclKind, span: Span) -> DeclId {
        self.decls.push(Decl {
            name: String::from(name),
            kind,
            span,
        });
        DeclId(self.decls.len() as u32 - 1)
    }

    pub fn alloc_func(&mut self, func: FuncExpr) -> FuncId {
        self.funcs.push(func);
        FuncId(self.funcs.len() as u32 - 1)
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    pub fn func_count(&self) -> usize {
        self.funcs.len()
    }

    pub fn has_expr(&self, id: ExprId) -> bool {
        id.index() < self.exprs.len()
    }

    pub fn has_stmt(&self, id: StmtId) -> bool {
        id.index() < self.stmts.len()
    }

    pub fn has_decl(&self, id: DeclId) -> bool {
        id.index() < self.decls.len()
    }

    pub fn has_func(&self, id: FuncId) -> bool {
        id.index() < self.funcs.len()
    }

    /// Type assigned to an expression by checking, if any.
    pub fn type_of(&self, id: ExprId) -> Option<&Type> {
        self.exprs[id.index()].ty.as_ref()
    }
}

impl Index<ExprId> for Ast {
    type Output = Expr;

    fn index(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }
}

impl IndexMut<ExprId> for Ast {
    fn index_mut(&mut self, id: ExprId) -> &mut Expr {
        &mut self.exprs[id.index()]
    }
}

impl Index<StmtId> for Ast {
    type Output = Stmt;

    fn index(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }
}

impl IndexMut<StmtId> for Ast {
    fn index_mut(&mut self, id: StmtId) -> &mut Stmt {
        &mut self.stmts[id.index()]
    }
}

impl Index<DeclId> for Ast {
    type Output = Decl;

    fn index(&self, id: DeclId) -> &Decl {
        &self.decls[id.index()]
    }
}

impl IndexMut<DeclId> for Ast {
    fn index_mut(&mut self, id: DeclId) -> &mut Decl {
        &mut self.decls[id.index()]
    }
}

impl Index<FuncId> for Ast {
    type Output = FuncExpr;

    fn index(&self, id: FuncId) -> &FuncExpr {
        &self.funcs[id.index()]
    }
}

impl IndexMut<FuncId> for Ast {
    fn index_mut(&mut self, id: FuncId) -> &mut FuncExpr {
        &mut self.funcs[id.index()]
    }
}

/// Compiler phase a translation unit has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AstStage {
    Parsed,
    NameBound,
    TypeChecked,
}

/// A parsed source file: its arena, its top-level block and its stage.
#[derive(Debug, Clone)]
pub struct TranslationUnit {
    pub name: Rc<String>,
    pub ast: Ast,
    /// Top-level block.
    pub body: StmtId,
    stage: AstStage,
}

impl TranslationUnit {
    pub fn new(name: &str, ast: Ast, body: StmtId) -> Self {
        TranslationUnit {
            name: Rc::new(String::from(name)),
            ast,
            body,
            stage: AstStage::Parsed,
        }
    }

    pub fn stage(&self) -> AstStage {
        self.stage
    }

    /// Moves the unit forward to `stage`. Returns false, leaving the stage
    /// untouched, when that would move it backwards.
    pub fn advance_stage(&mut self, stage: AstStage) -> bool {
        if stage < self.stage {
            return false;
        }
        self.stage = stage;
        true
    }
}
