//! Generated attributes.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use super::error::ConfigurationError;
use crate::base::TypeName;
use crate::base::constants::NULL_LITERAL;

/// How an attribute's default value is obtained.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DefaultValue {
    /// No default; the attribute starts unset.
    None,
    /// The value a field of this type holds anyway (`0`, `false`, `null`).
    Implicit(Arc<str>),
    /// A default expression declared by the author.
    Explicit(Arc<str>),
    /// The declaring language supplies the default itself (a parameter
    /// default). Counts as explicit; emission calls the no-argument form.
    LanguageNative,
}

impl DefaultValue {
    pub fn is_none(&self) -> bool {
        matches!(self, DefaultValue::None)
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, DefaultValue::Explicit(_) | DefaultValue::LanguageNative)
    }

    /// The expression to assign, if there is one.
    pub fn code(&self) -> Option<&str> {
        match self {
            DefaultValue::Implicit(code) | DefaultValue::Explicit(code) => Some(code),
            DefaultValue::None | DefaultValue::LanguageNative => None,
        }
    }

    /// Whether emission has something to assign for this default.
    pub fn is_usable(&self) -> bool {
        match self {
            DefaultValue::None => false,
            DefaultValue::LanguageNative => true,
            DefaultValue::Implicit(code) | DefaultValue::Explicit(code) => !code.trim().is_empty(),
        }
    }
}

/// How an attribute takes part in `equals` and `hashCode`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HashPolicy {
    /// Compare and hash the value.
    #[default]
    Full,
    /// Compare and hash only whether a value is present.
    PresenceOnly,
    /// Skip entirely.
    Excluded,
}

impl HashPolicy {
    /// Parse the attribute annotation's `hash` argument.
    pub fn from_arg(value: &str) -> Option<Self> {
        match value.trim() {
            "full" => Some(HashPolicy::Full),
            "presence" | "presence_only" => Some(HashPolicy::PresenceOnly),
            "excluded" | "do_not_hash" => Some(HashPolicy::Excluded),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HashPolicy::Full => "full",
            HashPolicy::PresenceOnly => "presence",
            HashPolicy::Excluded => "excluded",
        }
    }
}

/// Deduplication identity of an attribute: field name plus declared type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeKey {
    pub name: Arc<str>,
    pub ty: TypeName,
}

impl AttributeKey {
    pub fn new(name: impl Into<Arc<str>>, ty: TypeName) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

/// One generated property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeInfo {
    key: AttributeKey,
    nullable: bool,
    required: bool,
    default: DefaultValue,
    hash_policy: HashPolicy,
    group: Option<Arc<str>>,
    package_private: bool,
    declaring_package: Arc<str>,
    origin: Option<Arc<str>>,
}

impl AttributeInfo {
    /// A non-null, optional attribute. Primitives start with their zero
    /// value as implicit default; reference types start with none.
    pub fn new(field_name: impl Into<Arc<str>>, ty: TypeName) -> Self {
        let default = if ty.is_primitive() {
            DefaultValue::Implicit(ty.zero_value().into())
        } else {
            DefaultValue::None
        };
        Self {
            key: AttributeKey::new(field_name, ty),
            nullable: false,
            required: false,
            default,
            hash_policy: HashPolicy::Full,
            group: None,
            package_private: false,
            declaring_package: Arc::from(""),
            origin: None,
        }
    }

    /// Allow absence. A nullable attribute without a default defaults to
    /// absence (`null`).
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        if self.default.is_none() {
            self.default = DefaultValue::Implicit(NULL_LITERAL.into());
        }
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, code: impl Into<Arc<str>>) -> Self {
        self.default = DefaultValue::Explicit(code.into());
        self
    }

    pub fn with_implicit_default(mut self, code: impl Into<Arc<str>>) -> Self {
        self.default = DefaultValue::Implicit(code.into());
        self
    }

    pub fn with_language_default(mut self) -> Self {
        self.default = DefaultValue::LanguageNative;
        self
    }

    pub fn without_default(mut self) -> Self {
        self.default = DefaultValue::None;
        self
    }

    pub fn with_hash_policy(mut self, policy: HashPolicy) -> Self {
        self.hash_policy = policy;
        self
    }

    pub fn package_private(mut self) -> Self {
        self.package_private = true;
        self
    }

    pub fn declared_in(mut self, package: impl Into<Arc<str>>) -> Self {
        self.declaring_package = package.into();
        self
    }

    pub fn with_origin(mut self, declaration: impl Into<Arc<str>>) -> Self {
        self.origin = Some(declaration.into());
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn key(&self) -> &AttributeKey {
        &self.key
    }

    pub fn field_name(&self) -> &str {
        &self.key.name
    }

    pub fn ty(&self) -> &TypeName {
        &self.key.ty
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> &DefaultValue {
        &self.default
    }

    pub fn hash_policy(&self) -> HashPolicy {
        self.hash_policy
    }

    /// Name of the group this attribute belongs to, once groups are built.
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn is_package_private(&self) -> bool {
        self.package_private
    }

    pub fn declaring_package(&self) -> &str {
        &self.declaring_package
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    // ------------------------------------------------------------------
    // Derived facts
    // ------------------------------------------------------------------

    pub fn has_default(&self) -> bool {
        !self.default.is_none()
    }

    pub fn has_explicit_default(&self) -> bool {
        self.default.is_explicit()
    }

    /// Nullable with an implicit `null` default: activating a sibling can
    /// clear this attribute by defaulting it to absence.
    pub fn defaults_to_absence(&self) -> bool {
        self.nullable
            && matches!(&self.default, DefaultValue::Implicit(code) if code.trim() == NULL_LITERAL)
    }

    /// Expression `reset()` assigns to this attribute.
    pub fn reset_code(&self) -> Cow<'_, str> {
        match self.default.code() {
            Some(code) if !code.trim().is_empty() => Cow::Borrowed(code),
            _ => Cow::Borrowed(self.key.ty.zero_value()),
        }
    }

    /// Reject shapes the generated class cannot express.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let name = self.field_name();
        if !is_identifier(name) {
            return Err(ConfigurationError::unsupported(
                name,
                "field name is not a valid identifier",
            ));
        }
        if self.ty().is_void() {
            return Err(ConfigurationError::unsupported(name, "attributes cannot be void"));
        }
        if self.nullable && self.ty().is_primitive() {
            return Err(ConfigurationError::unsupported(
                name,
                format!("primitive type `{}` cannot be nullable", self.ty()),
            ));
        }
        Ok(())
    }

    pub(crate) fn set_group(&mut self, group: Option<Arc<str>>) {
        self.group = group;
    }
}

impl fmt::Display for AttributeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if unicode_ident::is_xid_start(c) || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| unicode_ident::is_xid_continue(c) || c == '$')
}
