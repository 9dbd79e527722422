//! # fluentgen-base
//!
//! Core library for generating fluent model and builder classes: collects
//! attributes, constructors and chainable methods from annotated
//! declarations, groups mutually exclusive attributes and resolves their
//! defaults.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! processor → Batch driver (rayon), inheritance merge, hash-code checks
//!   ↓
//! contract  → Planned class/builder surface, runtime contract evaluation
//!   ↓
//! model     → Collector, attribute registry, groups, model aggregate
//!   ↓
//! decl      → Declaration capability, in-memory declaration set
//!   ↓
//! base      → Primitives (TypeName, Modifiers, Annotation, constants)
//! ```
//!
//! `config` and `diagnostics` are used by every layer above `decl`.

// ============================================================================
// MODULES (dependency order: base → decl → model → contract → processor)
// ============================================================================

/// Foundation types: TypeName, Modifiers, Annotation, naming constants
pub mod base;

/// Declaration capability: Declaration, DeclarationSource, DeclarationSet
pub mod decl;

/// Generator configuration and processor options
pub mod config;

/// Diagnostics reported against declarations
pub mod diagnostics;

/// Model building: attributes, groups, chainable methods, GeneratedModel
pub mod model;

/// Emission contract: ModelSurface, ModelInstance
pub mod contract;

/// Batch processing: ModelProcessor
pub mod processor;

/// Model interchange: JSON snapshots, configuration files
#[cfg(feature = "interchange")]
pub mod interchange;

// Re-export commonly needed items
pub use base::{Annotation, Modifier, Modifiers, TypeArg, TypeName, TypeParseError};
pub use config::{ConfigError, GeneratorConfig};
pub use decl::{Declaration, DeclarationData, DeclarationSet, DeclarationSource, Member, ParamSpec};
pub use diagnostics::{Diagnostic, DiagnosticCollector, Severity};
pub use model::{
    AttributeGroup, AttributeInfo, AttributeKey, ConfigurationError, GeneratedModel,
    GeneratedModelInfo, HashPolicy,
};
pub use processor::{ModelProcessor, ProcessingOutput};
