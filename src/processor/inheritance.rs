//! Attributes inherited from annotated super classes.

use rustc_hash::FxHashSet;
use tracing::trace;

use indexmap::IndexMap;
use std::sync::Arc;

use crate::config::GeneratorConfig;
use crate::decl::{Declaration, DeclarationSource};
use crate::model::{ConfigurationError, FieldAttribute, declared_attributes};

const MAX_CHAIN_DEPTH: usize = 64;

/// Attributes declared by every super class of `decl`, nearest first.
///
/// Super classes processed in the same batch contribute their own-attribute
/// snapshot; others are read from their fields. Package-private attributes
/// are not visible from another package and are skipped.
pub(super) fn inherited_attributes<S>(
    source: &S,
    decl: &dyn Declaration,
    config: &GeneratorConfig,
    snapshots: &IndexMap<Arc<str>, Vec<FieldAttribute>>,
) -> Result<Vec<FieldAttribute>, ConfigurationError>
where
    S: DeclarationSource + ?Sized,
{
    let package = decl.package();
    let mut inherited = Vec::new();
    let mut visited = FxHashSet::default();
    let mut current = decl;

    while let Some(super_decl) = source.super_declaration(current) {
        if visited.len() >= MAX_CHAIN_DEPTH || !visited.insert(super_decl.qualified_name()) {
            break;
        }
        let attributes = match snapshots.get(super_decl.qualified_name()) {
            Some(snapshot) => snapshot.clone(),
            None => declared_attributes(source, super_decl, config)?,
        };
        for attribute in attributes {
            if attribute.info.is_package_private() && attribute.info.declaring_package() != package {
                trace!(
                    declaration = decl.qualified_name(),
                    attribute = %attribute.info,
                    "package-private attribute not inherited across packages"
                );
                continue;
            }
            inherited.push(attribute);
        }
        current = super_decl;
    }
    Ok(inherited)
}
