//! The model-building and defaulting engine.
//!
//! A model describes one generated class: its attributes, the inherited
//! methods it overrides for chaining, mirrored constructors and groups of
//! mutually exclusive attributes with their resolved defaults.
//!
//! ## Key Types
//!
//! - [`GeneratedModelInfo`] - The aggregate while it is being populated
//! - [`GeneratedModel`] - The frozen, read-only result
//! - [`AttributeInfo`] / [`AttributeKey`] - One generated property and its identity
//! - [`AttributeGroup`] - Mutually exclusive attributes with one default
//! - [`MethodInfo`] / [`ConstructorInfo`] - Inherited members to override or mirror
//! - [`ConfigurationError`] - Fatal problems with one declaration
//!
//! ## Population order
//!
//! ```text
//! collect constructors + chainable methods  (collector)
//!   ↓
//! register attributes, pruning shadowed methods  (registry)
//!   ↓
//! build groups, resolve defaults  (group)
//!   ↓
//! freeze
//! ```

mod attribute;
mod collector;
mod error;
mod extract;
mod group;
mod hierarchy;
mod info;
mod method;
mod registry;

pub use attribute::{AttributeInfo, AttributeKey, DefaultValue, HashPolicy};
pub use collector::{MethodCache, collect_chainable_methods, collect_constructors};
pub use error::ConfigurationError;
pub use extract::{FieldAttribute, declared_attributes, infer_hash_policy};
pub use group::AttributeGroup;
pub use hierarchy::{bound_object_type, is_super_also_generated};
pub use info::{AutoLayout, GeneratedModel, GeneratedModelInfo, StyleLinkage};
pub use method::{ConstructorInfo, MethodInfo};
pub use registry::AttributeRegistry;
