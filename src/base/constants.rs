//! Names and literals shared by every layer.

/// Name of the generated reset operation. A zero-argument method with this
/// name is never collected as chainable.
pub const RESET_METHOD: &str = "reset";

/// Suffix appended to the extended declaration's simple name.
pub const GENERATED_CLASS_SUFFIX: &str = "_";

/// Suffix of the companion builder capability.
pub const BUILDER_SUFFIX: &str = "Builder";

/// Marker capability implemented by every generated model.
pub const GENERATED_MODEL_CAPABILITY: &str = "GeneratedModel";

/// Per-step multiplier used when folding attribute hashes.
pub const HASH_MULTIPLIER: i32 = 31;

/// Literal for an absent reference value.
pub const NULL_LITERAL: &str = "null";

/// Bound type used when none can be found in the hierarchy.
pub const DEFAULT_BOUND_TYPE: &str = "java.lang.Object";

/// Primitive (non-nullable) value types.
pub const PRIMITIVE_TYPES: &[&str] = &[
    "boolean", "byte", "short", "int", "long", "char", "float", "double",
];

/// Field name of the attribute registered for a style linkage.
pub const STYLE_ATTRIBUTE: &str = "style";

/// The type of a method that returns nothing.
pub const VOID_TYPE: &str = "void";

// ============================================================================
// ANNOTATIONS
// ============================================================================

/// Annotation marking a field (or inherited setter) as a generated attribute.
pub const ATTRIBUTE_ANNOTATION: &str = "ModelAttribute";

/// Annotation marking a declaration that gets a generated model.
pub const MODEL_ANNOTATION: &str = "ModelClass";

/// Annotation marking a reference-typed attribute as nullable.
pub const NULLABLE_ANNOTATION: &str = "Nullable";

/// Attribute annotation arguments.
pub mod args {
    /// Explicit default value expression.
    pub const DEFAULT: &str = "defaultValue";
    /// `"true"` when the attribute must always be set.
    pub const REQUIRED: &str = "required";
    /// Hashing policy: `full`, `presence` or `excluded`.
    pub const HASH: &str = "hash";
    /// Name of the mutually-exclusive group this attribute belongs to.
    pub const GROUP: &str = "group";
    /// `"true"` when the declaring language supplies its own default.
    pub const LANGUAGE_DEFAULT: &str = "languageDefault";
    /// Model annotation: auto layout parameters.
    pub const AUTO_LAYOUT: &str = "autoLayout";
    /// Model annotation: style builder declaration.
    pub const STYLE: &str = "style";
}
