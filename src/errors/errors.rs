use std::fmt::Display;

use log::trace;
use thiserror::Error;

use crate::{Position, Span};

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    span: Span,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span) -> Self {
        Diagnostic { kind, span }
    }

    pub fn get_kind(&self) -> &DiagnosticKind {
        &self.kind
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    pub fn get_position(&self) -> &Position {
        &self.span.start
    }

    pub fn get_diagnostic_name(&self) -> &str {
        match &self.kind {
            DiagnosticKind::AssignmentToNonLValue { .. } => "AssignmentToNonLValue",
            DiagnosticKind::ReturnOutsideFunction => "ReturnOutsideFunction",
            DiagnosticKind::ReturnMissingValue { .. } => "ReturnMissingValue",
            DiagnosticKind::TypeMismatch { .. } => "TypeMismatch",
            DiagnosticKind::InvalidOperands { .. } => "InvalidOperands",
            DiagnosticKind::CallOfNonFunction { .. } => "CallOfNonFunction",
            DiagnosticKind::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            DiagnosticKind::UntypedDeclaration { .. } => "UntypedDeclaration",
            DiagnosticKind::UnknownOperator { .. } => "UnknownOperator",
            DiagnosticKind::MalformedSequence { .. } => "MalformedSequence",
            DiagnosticKind::UnusedLValueResult => "UnusedLValueResult",
            DiagnosticKind::UnusedFunctionValue => "UnusedFunctionValue",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.kind {
            DiagnosticKind::AssignmentToNonLValue { type_ } => ErrorTip::Suggestion(format!(
                "Cannot assign to a value of type `{}`",
                type_
            )),
            DiagnosticKind::ReturnOutsideFunction => ErrorTip::Suggestion(String::from(
                "`return` is only allowed inside a function body",
            )),
            DiagnosticKind::ReturnMissingValue { expected } => ErrorTip::Suggestion(format!(
                "Expected a return value of type `{}`",
                expected
            )),
            DiagnosticKind::TypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            DiagnosticKind::InvalidOperands { operator, type_ } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot be applied to `{}`",
                operator, type_
            )),
            DiagnosticKind::CallOfNonFunction { type_ } => {
                ErrorTip::Suggestion(format!("Value of type `{}` is not callable", type_))
            }
            DiagnosticKind::ArgumentCountMismatch { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected {} arguments, received {}",
                    expected, received
                ))
            }
            DiagnosticKind::UntypedDeclaration { name } => {
                ErrorTip::Suggestion(format!("`{}` has no known type here", name))
            }
            DiagnosticKind::UnknownOperator { operator } => {
                ErrorTip::Suggestion(format!("Unknown infix operator `{}`", operator))
            }
            DiagnosticKind::MalformedSequence { .. } => ErrorTip::None,
            DiagnosticKind::UnusedLValueResult => ErrorTip::Suggestion(String::from(
                "Expression resolves to a storage location that is never read or written",
            )),
            DiagnosticKind::UnusedFunctionValue => ErrorTip::Suggestion(String::from(
                "Function value is never called, did you forget the `()`?",
            )),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity(), self.kind)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// Broad class of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The node was malformed before this pass saw it.
    Structural,
    TypeMismatch,
    /// A construct used where its context does not allow it.
    Context,
    UnusedResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    #[error("cannot assign to a non-lvalue of type {type_}")]
    AssignmentToNonLValue { type_: String },
    #[error("return statement outside of a function")]
    ReturnOutsideFunction,
    #[error("missing return value of type {expected}")]
    ReturnMissingValue { expected: String },
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMismatch { expected: String, received: String },
    #[error("invalid operands to {operator:?}: {type_}")]
    InvalidOperands { operator: String, type_: String },
    #[error("cannot call a value of type {type_}")]
    CallOfNonFunction { type_: String },
    #[error("wrong number of arguments: expected {expected}, received {received}")]
    ArgumentCountMismatch { expected: usize, received: usize },
    #[error("declaration {name:?} has no type")]
    UntypedDeclaration { name: String },
    #[error("unknown operator {operator:?}")]
    UnknownOperator { operator: String },
    #[error("operator sequence has {operands} operands and {operators} operators")]
    MalformedSequence { operands: usize, operators: usize },
    #[error("expression resolves to an unused lvalue")]
    UnusedLValueResult,
    #[error("expression resolves to an unused function")]
    UnusedFunctionValue,
}

impl DiagnosticKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DiagnosticKind::UntypedDeclaration { .. }
            | DiagnosticKind::UnknownOperator { .. }
            | DiagnosticKind::MalformedSequence { .. } => ErrorCategory::Structural,
            DiagnosticKind::AssignmentToNonLValue { .. }
            | DiagnosticKind::ReturnMissingValue { .. }
            | DiagnosticKind::TypeMismatch { .. }
            | DiagnosticKind::InvalidOperands { .. }
            | DiagnosticKind::CallOfNonFunction { .. }
            | DiagnosticKind::ArgumentCountMismatch { .. } => ErrorCategory::TypeMismatch,
            DiagnosticKind::ReturnOutsideFunction => ErrorCategory::Context,
            DiagnosticKind::UnusedLValueResult | DiagnosticKind::UnusedFunctionValue => {
                ErrorCategory::UnusedResult
            }
        }
    }

    pub fn severity(&self) -> Severity {
        match self.category() {
            ErrorCategory::UnusedResult => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// Receiver for everything the checker reports. Emitting never fails.
pub trait DiagnosticSink {
    fn diagnose(&mut self, diagnostic: Diagnostic);
}

/// In-memory sink that keeps diagnostics in emission order.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.count_severity(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count_severity(Severity::Warning)
    }

    /// Whether a later phase should refuse to continue.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn count_category(&self, category: ErrorCategory) -> usize {
        self.iter().filter(|d| d.category() == category).count()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn count_severity(&self, severity: Severity) -> usize {
        self.iter().filter(|d| d.severity() == severity).count()
    }
}

impl DiagnosticSink for Diagnostics {
    fn diagnose(&mut self, diagnostic: Diagnostic) {
        trace!("{} at {}", diagnostic, diagnostic.get_position().0);
        self.diagnostics.push(diagnostic);
    }
}
