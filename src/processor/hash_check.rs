//! Checks that fully hashed attribute types implement equals and hashCode.
//!
//! A type that inherits identity equality makes two otherwise equal models
//! compare unequal. Findings are warnings; the model is still emitted.

use tracing::warn;

use crate::base::TypeName;
use crate::decl::{DeclKind, DeclarationSource};
use crate::diagnostics::DiagnosticCollector;
use crate::model::{GeneratedModel, HashPolicy};

const MAX_CHAIN_DEPTH: usize = 64;
const ROOT_TYPE: &str = "java.lang.Object";

pub(super) fn validate<S>(source: &S, model: &GeneratedModel, diagnostics: &mut DiagnosticCollector)
where
    S: DeclarationSource + ?Sized,
{
    if !model.should_generate() {
        return;
    }
    for attribute in model.attributes() {
        if attribute.hash_policy() != HashPolicy::Full {
            continue;
        }
        if !implements_hash_code(source, attribute.ty()) {
            warn!(
                declaration = model.origin(),
                attribute = %attribute,
                "attribute type does not implement hashCode"
            );
            diagnostics.missing_hash_code(
                model.origin(),
                attribute.field_name(),
                attribute.ty().name(),
            );
        }
    }
}

/// True unless `ty` is a known class that inherits `equals(Object)` and
/// `hashCode()` from the root type.
///
/// Primitives, arrays, interfaces and types the source cannot resolve are
/// given the benefit of the doubt.
pub fn implements_hash_code<S>(source: &S, ty: &TypeName) -> bool
where
    S: DeclarationSource + ?Sized,
{
    if ty.is_primitive() || ty.is_array() {
        return true;
    }
    let Some(mut decl) = source.resolve(ty) else {
        return true;
    };
    if decl.kind() == DeclKind::Interface {
        return true;
    }

    let (mut has_equals, mut has_hash_code) = (false, false);
    for _ in 0..MAX_CHAIN_DEPTH {
        if decl.qualified_name() == ROOT_TYPE {
            break;
        }
        for member in decl.members().iter().filter(|m| m.is_method()) {
            match (member.name.as_ref(), member.params.len()) {
                ("equals", 1) => has_equals = true,
                ("hashCode", 0) => has_hash_code = true,
                _ => {}
            }
        }
        if has_equals && has_hash_code {
            return true;
        }
        match source.super_declaration(decl) {
            Some(next) => decl = next,
            None => break,
        }
    }
    false
}
