//! Infix operator table and operator-sequence folding.

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::{
    ast::{
        ast::{Ast, ExprId},
        expressions::{BinaryOp, ExprKind, SequenceOperator},
    },
    errors::errors::{Diagnostic, DiagnosticKind, DiagnosticSink},
};

lazy_static! {
    pub static ref OPERATOR_LOOKUP: HashMap<&'static str, BinaryOp> = {
        let mut map = HashMap::new();
        map.insert("+", BinaryOp::Add);
        map.insert("-", BinaryOp::Sub);
        map.insert("*", BinaryOp::Mul);
        map.insert("/", BinaryOp::Div);
        map.insert("%", BinaryOp::Rem);
        map.insert("<", BinaryOp::Less);
        map.insert("<=", BinaryOp::LessEquals);
        map.insert(">", BinaryOp::Greater);
        map.insert(">=", BinaryOp::GreaterEquals);
        map.insert("==", BinaryOp::Equals);
        map.insert("!=", BinaryOp::NotEquals);
        map.insert("&&", BinaryOp::And);
        map.insert("||", BinaryOp::Or);
        map
    };
}

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Logical,
    Relational,
    Additive,
    Multiplicative,
}

impl BinaryOp {
    pub fn binding_power(&self) -> BindingPower {
        match self {
            BinaryOp::And | BinaryOp::Or => BindingPower::Logical,
            BinaryOp::Less
            | BinaryOp::LessEquals
            | BinaryOp::Greater
            | BinaryOp::GreaterEquals
            | BinaryOp::Equals
            | BinaryOp::NotEquals => BindingPower::Relational,
            BinaryOp::Add | BinaryOp::Sub => BindingPower::Additive,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => BindingPower::Multiplicative,
        }
    }
}

pub fn lookup_operator(name: &str) -> Option<BinaryOp> {
    OPERATOR_LOOKUP.get(name).copied()
}

/// Folds the sequence expression `sequence` into a tree of binary
/// expressions and returns the root. Operands must already be folded.
///
/// Any other expression is returned as is. A sequence that cannot be folded
/// is diagnosed and replaced by an error expression.
pub fn fold_sequence(ast: &mut Ast, diags: &mut dyn DiagnosticSink, sequence: ExprId) -> ExprId {
    let (operands, operators) = match &ast[sequence].kind {
        ExprKind::Sequence {
            operands,
            operators,
        } => (operands.clone(), operators.clone()),
        _ => return sequence,
    };
    let span = ast[sequence].span.clone();

    if operands.is_empty() || operands.len() != operators.len() + 1 {
        diags.diagnose(Diagnostic::new(
            DiagnosticKind::MalformedSequence {
                operands: operands.len(),
                operators: operators.len(),
            },
            span.clone(),
        ));
        return ast.alloc_expr(ExprKind::Error, span);
    }

    let mut resolved = vec![];
    let mut unknown = false;
    for SequenceOperator {
        name,
        span: op_span,
    } in operators.iter()
    {
        match lookup_operator(name) {
            Some(op) => resolved.push(op),
            None => {
                diags.diagnose(Diagnostic::new(
                    DiagnosticKind::UnknownOperator {
                        operator: name.clone(),
                    },
                    op_span.clone(),
                ));
                unknown = true;
            }
        }
    }
    if unknown {
        return ast.alloc_expr(ExprKind::Error, span);
    }

    let mut folder = Folder {
        ast,
        operands: &operands,
        operators: &resolved,
        next: 0,
    };
    folder.fold(operands[0], BindingPower::Default)
}

/// Precedence climbing over a flat operand/operator list. Operator `i` sits
/// between operands `i` and `i + 1`.
struct Folder<'a> {
    ast: &'a mut Ast,
    operands: &'a [ExprId],
    operators: &'a [BinaryOp],
    next: usize,
}

impl Folder<'_> {
    fn fold(&mut self, mut lhs: ExprId, min_bp: BindingPower) -> ExprId {
        while self.next < self.operators.len() {
            let op = self.operators[self.next];
            let bp = op.binding_power();
            if bp < min_bp {
                break;
            }
            self.next += 1;

            let mut rhs = self.operands[self.next];
            while self.next < self.operators.len()
                && self.operators[self.next].binding_power() > bp
            {
                let tighter = self.operators[self.next].binding_power();
                rhs = self.fold(rhs, tighter);
            }

            let span = self.ast[lhs].span.to(&self.ast[rhs].span);
            lhs = self.ast.alloc_expr(ExprKind::Binary { op, lhs, rhs }, span);
        }

        lhs
    }
}
