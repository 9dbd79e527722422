//! Diagnostic assertion helpers.

use fluentgen::{Diagnostic, ProcessingOutput, Severity};

/// Error diagnostics reported against `origin`.
pub fn errors_for<'a>(output: &'a ProcessingOutput, origin: &str) -> Vec<&'a Diagnostic> {
    output
        .diagnostics
        .diagnostics_for(origin)
        .into_iter()
        .filter(|d| d.severity == Severity::Error)
        .collect()
}

/// Assert a batch produced no errors.
pub fn assert_no_errors(output: &ProcessingOutput) {
    let errors: Vec<_> = output
        .diagnostics
        .diagnostics()
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .collect();
    assert!(
        errors.is_empty(),
        "Expected no errors, got {} error(s):\n{}",
        errors.len(),
        errors
            .iter()
            .map(|e| format!("  {e}"))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
