//! Constructor and chainable-method collection.
//!
//! A chainable method is one the generated class overrides so callers keep
//! the generated type while chaining: it returns the type of the level that
//! declares it (or a super type of that level) and the generated class is
//! allowed to override it.

use std::sync::Arc;

use indexmap::IndexSet;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::method::{ConstructorInfo, MethodInfo};
use crate::config::GeneratorConfig;
use crate::decl::{Declaration, DeclarationSource, Member};

/// Stop walking hierarchies deeper than this (cyclic input).
const MAX_CHAIN_DEPTH: usize = 64;

/// Every non-private constructor of `decl`, in declaration order.
pub fn collect_constructors(decl: &dyn Declaration) -> Vec<ConstructorInfo> {
    decl.members()
        .iter()
        .filter(|m| m.is_constructor() && !m.modifiers.is_private())
        .map(ConstructorInfo::from_member)
        .collect()
}

/// Chainable methods of `decl` and its super classes, nearest level first.
pub fn collect_chainable_methods<S>(
    source: &S,
    decl: &dyn Declaration,
    config: &GeneratorConfig,
) -> Vec<MethodInfo>
where
    S: DeclarationSource + ?Sized,
{
    MethodCache::new()
        .chainable_methods(source, decl, config)
        .to_vec()
}

/// Per-declaration memo of chainable methods, shared across a batch.
///
/// Many models usually extend the same few base classes; each base is
/// walked once. The lock is only held for lookups and inserts, never while
/// walking a hierarchy, so parallel callers do not serialize on it.
#[derive(Debug, Default)]
pub struct MethodCache {
    entries: Mutex<FxHashMap<Arc<str>, Arc<[MethodInfo]>>>,
}

impl MethodCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chainable_methods<S>(
        &self,
        source: &S,
        decl: &dyn Declaration,
        config: &GeneratorConfig,
    ) -> Arc<[MethodInfo]>
    where
        S: DeclarationSource + ?Sized,
    {
        self.walk(source, decl, config, 0)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    fn walk<S>(
        &self,
        source: &S,
        decl: &dyn Declaration,
        config: &GeneratorConfig,
        depth: usize,
    ) -> Arc<[MethodInfo]>
    where
        S: DeclarationSource + ?Sized,
    {
        if let Some(hit) = self.entries.lock().get(decl.qualified_name()) {
            return hit.clone();
        }

        let mut methods = IndexSet::new();
        // The hierarchy root contributes nothing.
        if let Some(super_type) = decl.super_type() {
            let level = decl.as_type();
            methods.extend(
                decl.members()
                    .iter()
                    .filter(|m| is_chainable(source, &level, m, config))
                    .map(|m| {
                        MethodInfo::from_member(
                            m,
                            decl.qualified_name(),
                            m.has_annotation(&config.attribute_annotation),
                        )
                    }),
            );

            if depth < MAX_CHAIN_DEPTH {
                if let Some(super_decl) = source.resolve(super_type) {
                    methods.extend(
                        self.walk(source, super_decl, config, depth + 1)
                            .iter()
                            .cloned(),
                    );
                }
            } else {
                tracing::warn!(
                    declaration = decl.qualified_name(),
                    "hierarchy too deep while collecting chainable methods"
                );
            }
        }

        let methods: Arc<[MethodInfo]> = methods.into_iter().collect();
        self.entries
            .lock()
            .insert(Arc::from(decl.qualified_name()), methods.clone());
        methods
    }
}

fn is_chainable<S>(
    source: &S,
    level: &crate::base::TypeName,
    member: &Member,
    config: &GeneratorConfig,
) -> bool
where
    S: DeclarationSource + ?Sized,
{
    let Some(return_type) = member.return_type() else {
        return false;
    };
    let modifiers = &member.modifiers;
    if modifiers.is_private() || modifiers.is_final() || modifiers.is_static() {
        return false;
    }
    if member.params.is_empty() && member.name.as_ref() == config.reset_method {
        return false;
    }
    source.is_subtype(level, return_type)
}
