//! Diagnostics produced during semantic analysis.
//!
//! This module defines what the type checker reports and where it goes:
//!
//! - Diagnostic structures with source span information
//! - Specific diagnostic kinds, their category and severity
//! - A sink trait plus an in-memory implementation
//! - Helpful messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
