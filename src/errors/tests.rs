//! Unit tests for diagnostics.
//!
//! This module contains tests for diagnostic kinds, their classification
//! and the in-memory sink.

use crate::errors::errors::{
    Diagnostic, DiagnosticKind, DiagnosticSink, Diagnostics, ErrorCategory, ErrorTip, Severity,
};
use crate::{Position, Span};
use std::rc::Rc;

fn span_at(offset: u32) -> Span {
    let file = Rc::new("test.lang".to_string());
    Span {
        start: Position(offset, Rc::clone(&file)),
        end: Position(offset + 1, file),
    }
}

#[test]
fn test_diagnostic_creation() {
    let diagnostic = Diagnostic::new(DiagnosticKind::ReturnOutsideFunction, span_at(10));

    assert_eq!(diagnostic.get_diagnostic_name(), "ReturnOutsideFunction");
    assert_eq!(diagnostic.get_position().0, 10);
}

#[test]
fn test_return_outside_function_is_context_error() {
    let diagnostic = Diagnostic::new(DiagnosticKind::ReturnOutsideFunction, span_at(0));

    assert_eq!(diagnostic.category(), ErrorCategory::Context);
    assert_eq!(diagnostic.severity(), Severity::Error);
}

#[test]
fn test_type_mismatch_error() {
    let diagnostic = Diagnostic::new(
        DiagnosticKind::TypeMismatch {
            expected: "Int1".to_string(),
            received: "() -> Int64".to_string(),
        },
        span_at(0),
    );

    assert_eq!(diagnostic.get_diagnostic_name(), "TypeMismatch");
    assert_eq!(diagnostic.category(), ErrorCategory::TypeMismatch);
    assert_eq!(
        diagnostic.get_tip().to_string(),
        "Expected type `Int1`, received `() -> Int64`"
    );
}

#[test]
fn test_unused_results_are_warnings() {
    for kind in [
        DiagnosticKind::UnusedLValueResult,
        DiagnosticKind::UnusedFunctionValue,
    ] {
        let diagnostic = Diagnostic::new(kind, span_at(0));
        assert_eq!(diagnostic.category(), ErrorCategory::UnusedResult);
        assert_eq!(diagnostic.severity(), Severity::Warning);
    }
}

#[test]
fn test_sequence_problems_are_structural() {
    let unknown = Diagnostic::new(
        DiagnosticKind::UnknownOperator {
            operator: "<>".to_string(),
        },
        span_at(0),
    );
    let malformed = Diagnostic::new(
        DiagnosticKind::MalformedSequence {
            operands: 2,
            operators: 2,
        },
        span_at(0),
    );

    assert_eq!(unknown.category(), ErrorCategory::Structural);
    assert_eq!(malformed.category(), ErrorCategory::Structural);
    assert!(matches!(malformed.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_diagnostic_display() {
    let diagnostic = Diagnostic::new(DiagnosticKind::UnusedFunctionValue, span_at(0));
    assert_eq!(
        diagnostic.to_string(),
        "warning: expression resolves to an unused function"
    );
}

#[test]
fn test_sink_counts_by_severity() {
    let mut diagnostics = Diagnostics::new();
    assert!(diagnostics.is_empty());
    assert!(!diagnostics.has_errors());

    diagnostics.diagnose(Diagnostic::new(DiagnosticKind::UnusedLValueResult, span_at(1)));
    assert!(!diagnostics.has_errors());

    diagnostics.diagnose(Diagnostic::new(DiagnosticKind::ReturnOutsideFunction, span_at(2)));
    diagnostics.diagnose(Diagnostic::new(
        DiagnosticKind::ArgumentCountMismatch {
            expected: 2,
            received: 3,
        },
        span_at(3),
    ));

    assert_eq!(diagnostics.len(), 3);
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(diagnostics.error_count(), 2);
    assert_eq!(diagnostics.count_category(ErrorCategory::Context), 1);
    assert!(diagnostics.has_errors());
}

#[test]
fn test_sink_keeps_emission_order() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.diagnose(Diagnostic::new(DiagnosticKind::UnusedLValueResult, span_at(9)));
    diagnostics.diagnose(Diagnostic::new(DiagnosticKind::ReturnOutsideFunction, span_at(4)));

    let offsets: Vec<u32> = diagnostics.iter().map(|d| d.get_position().0).collect();
    assert_eq!(offsets, vec![9, 4]);
}
