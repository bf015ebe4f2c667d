use crate::Span;

use super::ast::{DeclId, ExprId, StmtId};

/// One entry of a brace block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockElement {
    Expr(ExprId),
    Stmt(StmtId),
    Decl(DeclId),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockStmt {
    pub elements: Vec<BlockElement>,
}

impl BlockStmt {
    pub fn new(elements: Vec<BlockElement>) -> Self {
        BlockStmt { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// Already diagnosed by an earlier phase.
    Error,
    /// A lone `;`.
    NoOp,
    Assign {
        dest: ExprId,
        src: ExprId,
    },
    Block(BlockStmt),
    Return {
        result: Option<ExprId>,
    },
    If {
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    },
    While {
        cond: ExprId,
        body: StmtId,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn as_block(&self) -> Option<&BlockStmt> {
        match &self.kind {
            StmtKind::Block(block) => Some(block),
            _ => None,
        }
    }
}
