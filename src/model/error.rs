//! Errors raised while building a model.

use std::sync::Arc;

use thiserror::Error;

use crate::base::TypeParseError;

/// A fatal problem with one declaration.
///
/// Aborts generation for that declaration only; the batch continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A group was declared with no members.
    #[error("Attributes cannot be empty (group `{group}`)")]
    EmptyGroup { group: Arc<str> },

    /// Two members of one group declare explicit defaults.
    #[error("Only one default value can exist for a group of attributes: {members}")]
    ConflictingGroupDefaults { group: Arc<str>, members: String },

    /// The resolved default member has nothing to assign.
    #[error("Default attribute has no default code (group `{group}`, attribute `{attribute}`)")]
    DefaultWithoutCode { group: Arc<str>, attribute: Arc<str> },

    /// A group refers to an attribute that was never registered.
    #[error("Group `{group}` refers to unknown attribute `{attribute}`")]
    UnknownGroupMember { group: Arc<str>, attribute: String },

    /// The attribute cannot be expressed as a generated property.
    #[error("Unsupported attribute `{attribute}`: {reason}")]
    UnsupportedAttribute { attribute: String, reason: String },

    /// The declaration cannot be extended by a generated class.
    #[error("Class `{declaration}` cannot be final")]
    FinalDeclaration { declaration: Arc<str> },

    /// A target or referenced declaration could not be found.
    #[error("Unknown declaration `{declaration}`")]
    UnknownDeclaration { declaration: String },

    /// A type reference in annotation data could not be parsed.
    #[error("Invalid type `{text}`: {source}")]
    InvalidType {
        text: String,
        #[source]
        source: TypeParseError,
    },
}

impl ConfigurationError {
    pub fn unsupported(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedAttribute {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_type(text: impl Into<String>, source: TypeParseError) -> Self {
        Self::InvalidType {
            text: text.into(),
            source,
        }
    }
}
