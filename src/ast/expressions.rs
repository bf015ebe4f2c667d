use crate::Span;

use super::{
    ast::{DeclId, ExprId, FuncId, StmtId},
    types::Type,
};

/// Resolved infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Equals,
    NotEquals,
    And,
    Or,
}

impl BinaryOp {
    pub fn spelling(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Less => "<",
            BinaryOp::LessEquals => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEquals => ">=",
            BinaryOp::Equals => "==",
            BinaryOp::NotEquals => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Less
                | BinaryOp::LessEquals
                | BinaryOp::Greater
                | BinaryOp::GreaterEquals
                | BinaryOp::Equals
                | BinaryOp::NotEquals
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }
}

/// An operator as written between two operands of an unfolded sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceOperator {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Already diagnosed; checking it fails silently.
    Error,
    IntegerLiteral(i64),
    DeclRef(DeclId),
    Paren(ExprId),
    /// `a op b op c ...` as parsed, before precedence is applied.
    /// Holds one more operand than operators.
    Sequence {
        operands: Vec<ExprId>,
        operators: Vec<SequenceOperator>,
    },
    Binary {
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    Call {
        callee: ExprId,
        args: Vec<ExprId>,
    },
    Func(FuncId),
    /// Reads the value out of an lvalue.
    Load(ExprId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    /// Set once the expression has been checked.
    pub ty: Option<Type>,
    pub span: Span,
}

/// A function literal.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncExpr {
    pub params: Vec<DeclId>,
    pub result: Type,
    /// Always a block statement.
    pub body: StmtId,
    pub signature_checked: bool,
    pub span: Span,
}

impl FuncExpr {
    pub fn new(params: Vec<DeclId>, result: Type, body: StmtId, span: Span) -> Self {
        FuncExpr {
            params,
            result,
            body,
            signature_checked: false,
            span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclKind {
    Var {
        ty: Option<Type>,
        init: Option<ExprId>,
    },
    /// A named function; `func` is a function literal expression.
    Func { func: ExprId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decl {
    pub name: String,
    pub kind: DeclKind,
    pub span: Span,
}
