//! Inherited chainable methods and mirrored constructors.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::attribute::AttributeInfo;
use crate::base::Modifiers;
use crate::decl::{Member, ParamSpec};

/// An inherited method that the generated class overrides so it returns the
/// generated type.
///
/// Equality and hashing cover `(name, modifiers, params, varargs)` only;
/// the attribute flag and origin are bookkeeping.
#[derive(Clone, Debug)]
pub struct MethodInfo {
    name: Arc<str>,
    modifiers: Modifiers,
    params: Vec<ParamSpec>,
    varargs: bool,
    is_attribute: bool,
    origin: Arc<str>,
}

impl MethodInfo {
    pub fn new(
        name: impl Into<Arc<str>>,
        modifiers: Modifiers,
        params: Vec<ParamSpec>,
        varargs: bool,
    ) -> Self {
        Self {
            name: name.into(),
            modifiers,
            params,
            varargs,
            is_attribute: false,
            origin: Arc::from(""),
        }
    }

    pub(crate) fn from_member(member: &Member, origin: &str, is_attribute: bool) -> Self {
        Self {
            name: member.name.clone(),
            modifiers: member.modifiers.clone(),
            params: member.params.clone(),
            varargs: member.varargs,
            is_attribute,
            origin: Arc::from(origin),
        }
    }

    pub fn with_attribute_flag(mut self, is_attribute: bool) -> Self {
        self.is_attribute = is_attribute;
        self
    }

    pub fn with_origin(mut self, origin: impl Into<Arc<str>>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn is_varargs(&self) -> bool {
        self.varargs
    }

    /// Whether the inherited method is itself an annotated attribute setter.
    pub fn is_attribute(&self) -> bool {
        self.is_attribute
    }

    /// Qualified name of the declaration that declares this method.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// True when the attribute's setter has exactly this signature.
    pub fn is_shadowed_by(&self, attribute: &AttributeInfo) -> bool {
        self.name.as_ref() == attribute.field_name()
            && self.params.len() == 1
            && self.params[0].ty == *attribute.ty()
    }
}

impl PartialEq for MethodInfo {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.modifiers == other.modifiers
            && self.params == other.params
            && self.varargs == other.varargs
    }
}

impl Eq for MethodInfo {}

impl Hash for MethodInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.modifiers.hash(state);
        self.params.hash(state);
        self.varargs.hash(state);
    }
}

impl fmt::Display for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        write_params(f, &self.params, self.varargs)?;
        f.write_str(")")
    }
}

/// A constructor of the extended declaration, mirrored 1:1.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConstructorInfo {
    pub modifiers: Modifiers,
    pub params: Vec<ParamSpec>,
    pub varargs: bool,
}

impl ConstructorInfo {
    pub fn new(modifiers: Modifiers, params: Vec<ParamSpec>, varargs: bool) -> Self {
        Self {
            modifiers,
            params,
            varargs,
        }
    }

    pub(crate) fn from_member(member: &Member) -> Self {
        Self::new(member.modifiers.clone(), member.params.clone(), member.varargs)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl fmt::Display for ConstructorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<init>(")?;
        write_params(f, &self.params, self.varargs)?;
        f.write_str(")")
    }
}

fn write_params(f: &mut fmt::Formatter<'_>, params: &[ParamSpec], varargs: bool) -> fmt::Result {
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        match param.ty.component_type() {
            Some(component) if varargs && i + 1 == params.len() => write!(f, "{component}...")?,
            _ => write!(f, "{}", param.ty)?,
        }
    }
    Ok(())
}
