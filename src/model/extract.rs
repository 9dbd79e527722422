//! Attributes declared by annotated fields.

use std::sync::Arc;

use tracing::trace;

use super::attribute::{AttributeInfo, HashPolicy};
use super::error::ConfigurationError;
use crate::base::constants::args;
use crate::base::{Modifier, TypeName};
use crate::config::GeneratorConfig;
use crate::decl::{DeclKind, Declaration, DeclarationSource, Member};

/// An attribute read from a field, with the explicit group it names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldAttribute {
    pub info: AttributeInfo,
    pub group: Option<Arc<str>>,
}

/// Attributes declared directly on `decl`, in field order.
///
/// Fields must be reachable from a generated subclass: private, static and
/// final fields are rejected.
pub fn declared_attributes<S>(
    source: &S,
    decl: &dyn Declaration,
    config: &GeneratorConfig,
) -> Result<Vec<FieldAttribute>, ConfigurationError>
where
    S: DeclarationSource + ?Sized,
{
    decl.members()
        .iter()
        .filter(|m| m.is_field() && m.has_annotation(&config.attribute_annotation))
        .map(|field| field_attribute(source, decl, field, config))
        .collect()
}

fn field_attribute<S>(
    source: &S,
    decl: &dyn Declaration,
    field: &Member,
    config: &GeneratorConfig,
) -> Result<FieldAttribute, ConfigurationError>
where
    S: DeclarationSource + ?Sized,
{
    let name = field.name.as_ref();
    let modifiers = &field.modifiers;
    if modifiers.is_private() || modifiers.is_static() || modifiers.is_final() {
        return Err(ConfigurationError::unsupported(
            format!("{}.{name}", decl.qualified_name()),
            "fields cannot be private, static or final",
        ));
    }
    let Some(ty) = field.field_type() else {
        return Err(ConfigurationError::unsupported(name, "not a field"));
    };
    let annotation = field.annotation(&config.attribute_annotation);

    let mut info = AttributeInfo::new(name, ty.clone());
    if let Some(code) = annotation.and_then(|a| a.arg(args::DEFAULT)) {
        info = info.with_default(code.trim());
    }
    if annotation.is_some_and(|a| a.flag(args::LANGUAGE_DEFAULT)) {
        info = info.with_language_default();
    }
    if field.has_annotation(&config.nullable_annotation) {
        info = info.nullable();
    }
    if annotation.is_some_and(|a| a.flag(args::REQUIRED)) {
        info = info.required();
    }

    let policy = match annotation.and_then(|a| a.arg(args::HASH)) {
        Some(raw) => HashPolicy::from_arg(raw).ok_or_else(|| {
            ConfigurationError::unsupported(name, format!("unknown hash policy `{raw}`"))
        })?,
        None => infer_hash_policy(source, ty, config),
    };
    info = info.with_hash_policy(policy);

    if modifiers.is_package_private() {
        info = info.package_private();
    }
    info = info
        .declared_in(decl.package())
        .with_origin(decl.qualified_name());

    let group = annotation
        .and_then(|a| a.arg(args::GROUP))
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(Arc::from);

    trace!(
        declaration = decl.qualified_name(),
        attribute = %info,
        policy = policy.as_str(),
        "attribute extracted"
    );
    Ok(FieldAttribute { info, group })
}

/// Callback-shaped types compare by presence: configured listener types and
/// interfaces with a single abstract method.
pub fn infer_hash_policy<S>(source: &S, ty: &TypeName, config: &GeneratorConfig) -> HashPolicy
where
    S: DeclarationSource + ?Sized,
{
    if ty.is_array() || ty.is_primitive() {
        return HashPolicy::Full;
    }
    if config.is_presence_only_type(ty.name()) || is_functional_interface(source, ty) {
        HashPolicy::PresenceOnly
    } else {
        HashPolicy::Full
    }
}

fn is_functional_interface<S>(source: &S, ty: &TypeName) -> bool
where
    S: DeclarationSource + ?Sized,
{
    let Some(decl) = source.resolve(ty) else {
        return false;
    };
    if decl.kind() != DeclKind::Interface {
        return false;
    }
    decl.members()
        .iter()
        .filter(|m| {
            m.is_method() && !m.modifiers.is_static() && !m.modifiers.contains(Modifier::Default)
        })
        .count()
        == 1
}
