//! Diagnostics: problems reported against declarations.
//!
//! Model building never panics or aborts a batch. Every problem becomes a
//! [`Diagnostic`] attached to the declaration it came from and is gathered
//! by a [`DiagnosticCollector`] for the front-end to print.

use std::fmt;
use std::sync::Arc;

use crate::model::ConfigurationError;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        }
    }
}

/// A diagnostic message attached to a declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Qualified name of the declaration the problem belongs to.
    pub origin: Arc<str>,
    /// Member (field or method) within the declaration, when known.
    pub member: Option<Arc<str>>,
    /// Severity level.
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: Option<Arc<str>>,
    /// The diagnostic message.
    pub message: Arc<str>,
    /// Optional related information.
    pub related: Vec<RelatedInfo>,
}

/// Related information for a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelatedInfo {
    /// The declaration this info points at.
    pub origin: Arc<str>,
    /// The message.
    pub message: Arc<str>,
}

impl Diagnostic {
    fn new(severity: Severity, origin: impl Into<Arc<str>>, message: impl Into<Arc<str>>) -> Self {
        Self {
            origin: origin.into(),
            member: None,
            severity,
            code: None,
            message: message.into(),
            related: Vec::new(),
        }
    }

    /// Create a new error diagnostic.
    pub fn error(origin: impl Into<Arc<str>>, message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Error, origin, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(origin: impl Into<Arc<str>>, message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Warning, origin, message)
    }

    /// Narrow the diagnostic to a member of the declaration.
    pub fn with_member(mut self, member: impl Into<Arc<str>>) -> Self {
        self.member = Some(member.into());
        self
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Add related information.
    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    /// An error diagnostic for a configuration problem in `origin`.
    pub fn from_configuration_error(origin: impl Into<Arc<str>>, error: &ConfigurationError) -> Self {
        let diagnostic = Self::error(origin, error.to_string()).with_code(code_for(error));
        match error {
            ConfigurationError::DefaultWithoutCode { attribute, .. } => {
                diagnostic.with_member(attribute.clone())
            }
            ConfigurationError::UnsupportedAttribute { attribute, .. } => {
                diagnostic.with_member(attribute.as_str())
            }
            _ => diagnostic,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity.as_str())?;
        if let Some(code) = &self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.origin)?;
        if let Some(member) = &self.member {
            write!(f, "#{member}")?;
        }
        write!(f, ": {}", self.message)
    }
}

fn code_for(error: &ConfigurationError) -> &'static str {
    match error {
        ConfigurationError::EmptyGroup { .. } => codes::EMPTY_GROUP,
        ConfigurationError::ConflictingGroupDefaults { .. } => codes::CONFLICTING_GROUP_DEFAULTS,
        ConfigurationError::DefaultWithoutCode { .. } => codes::DEFAULT_WITHOUT_CODE,
        ConfigurationError::UnknownGroupMember { .. } => codes::UNKNOWN_GROUP_MEMBER,
        ConfigurationError::UnsupportedAttribute { .. } => codes::UNSUPPORTED_ATTRIBUTE,
        ConfigurationError::FinalDeclaration { .. } => codes::FINAL_DECLARATION,
        ConfigurationError::UnknownDeclaration { .. } => codes::UNKNOWN_DECLARATION,
        ConfigurationError::InvalidType { .. } => codes::INVALID_TYPE,
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Diagnostic codes.
///
/// ## Code Ranges
///
/// - **E0001-E0099**: Configuration errors (the declaration is not generated)
/// - **W0001-W0099**: Warnings (the declaration is still generated)
pub mod codes {
    // ========================================================================
    // CONFIGURATION ERRORS (E0001-E0099)
    // ========================================================================

    /// Group declared without members.
    pub const EMPTY_GROUP: &str = "E0001";
    /// More than one explicit default in a group.
    pub const CONFLICTING_GROUP_DEFAULTS: &str = "E0002";
    /// Group default has nothing to assign.
    pub const DEFAULT_WITHOUT_CODE: &str = "E0003";
    /// Group member is not a registered attribute.
    pub const UNKNOWN_GROUP_MEMBER: &str = "E0004";
    /// Attribute shape cannot be generated.
    pub const UNSUPPORTED_ATTRIBUTE: &str = "E0005";
    /// Final classes cannot be extended.
    pub const FINAL_DECLARATION: &str = "E0006";
    /// Declaration could not be found.
    pub const UNKNOWN_DECLARATION: &str = "E0007";
    /// Malformed type reference.
    pub const INVALID_TYPE: &str = "E0008";

    // ========================================================================
    // WARNINGS (W0001-W0099)
    // ========================================================================

    /// Fully hashed attribute type does not implement equals/hashCode.
    pub const MISSING_HASH_CODE: &str = "W0001";
    /// Model annotation argument could not be understood and was ignored.
    pub const INVALID_MODEL_ARGUMENT: &str = "W0002";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during a processing batch.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add every diagnostic from `other`.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Add a configuration error for `origin`.
    pub fn configuration_error(&mut self, origin: &str, error: &ConfigurationError) {
        self.add(Diagnostic::from_configuration_error(origin, error));
    }

    /// Add a missing equals/hashCode warning.
    pub fn missing_hash_code(&mut self, origin: &str, attribute: &str, ty: &str) {
        self.add(
            Diagnostic::warning(
                origin,
                format!(
                    "attribute type '{ty}' does not implement equals and hashCode; \
                     instances may compare unequal"
                ),
            )
            .with_member(attribute)
            .with_code(codes::MISSING_HASH_CODE)
            .with_related(RelatedInfo {
                origin: Arc::from(ty),
                message: Arc::from("declared here"),
            }),
        );
    }

    /// Add an ignored model-argument warning.
    pub fn invalid_model_argument(&mut self, origin: &str, argument: &str, value: &str) {
        self.add(
            Diagnostic::warning(
                origin,
                format!("ignoring model argument '{argument}': cannot use '{value}'"),
            )
            .with_code(codes::INVALID_MODEL_ARGUMENT),
        );
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get diagnostics for a specific declaration.
    pub fn diagnostics_for(&self, origin: &str) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.origin.as_ref() == origin)
            .collect()
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
