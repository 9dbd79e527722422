//! The declaration capability the core depends on.
//!
//! A front-end (compiler plugin, metadata reader, test fixture) implements
//! [`Declaration`] for its elements and [`DeclarationSource`] for lookup.
//! Everything above this layer is written against these two traits only.

use rustc_hash::FxHashSet;

use super::member::Member;
use crate::base::{Annotation, Modifiers, TypeArg, TypeName, names_match, simple_name_of};

/// Guard against malformed (cyclic) hierarchies.
const MAX_HIERARCHY_DEPTH: usize = 64;

/// Class or interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Class,
    Interface,
}

/// A type declaration as seen by the generator.
pub trait Declaration: Send + Sync {
    fn qualified_name(&self) -> &str;

    fn kind(&self) -> DeclKind;

    fn modifiers(&self) -> &Modifiers;

    fn annotations(&self) -> &[Annotation];

    /// Names of declared type parameters, in order.
    fn type_params(&self) -> &[std::sync::Arc<str>];

    /// The super class, `None` only for the hierarchy root.
    fn super_type(&self) -> Option<&TypeName>;

    fn interfaces(&self) -> &[TypeName];

    fn members(&self) -> &[Member];

    fn simple_name(&self) -> &str {
        simple_name_of(self.qualified_name())
    }

    fn package(&self) -> &str {
        let name = self.qualified_name();
        match name.rfind('.') {
            Some(idx) => &name[..idx],
            None => "",
        }
    }

    /// This declaration as a type, parameterized by its own type variables.
    fn as_type(&self) -> TypeName {
        TypeName::new(self.qualified_name()).with_args(
            self.type_params()
                .iter()
                .map(|p| TypeArg::Type(TypeName::new(p.clone())))
                .collect(),
        )
    }

    fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations().iter().find(|a| a.is(name))
    }

    fn has_annotation(&self, name: &str) -> bool {
        self.annotation(name).is_some()
    }

    /// Whether `ty` names one of this declaration's type variables.
    fn is_type_variable(&self, ty: &TypeName) -> bool {
        ty.args().is_empty()
            && !ty.is_array()
            && self.type_params().iter().any(|p| p.as_ref() == ty.name())
    }
}

/// Lookup of declarations by type.
pub trait DeclarationSource: Sync {
    /// Find a declaration by its qualified name.
    fn lookup(&self, qualified_name: &str) -> Option<&dyn Declaration>;

    fn resolve(&self, ty: &TypeName) -> Option<&dyn Declaration> {
        if ty.is_array() {
            return None;
        }
        self.lookup(ty.name())
    }

    fn super_declaration(&self, decl: &dyn Declaration) -> Option<&dyn Declaration> {
        decl.super_type().and_then(|ty| self.resolve(ty))
    }

    /// True iff `sub` is `sup` or a subtype of it, comparing erased types
    /// through super classes and interfaces.
    fn is_subtype(&self, sub: &TypeName, sup: &TypeName) -> bool {
        let target = sup.erasure();
        let mut visited = FxHashSet::default();
        let mut pending = vec![sub.erasure()];

        while let Some(current) = pending.pop() {
            if current == target {
                return true;
            }
            if visited.len() >= MAX_HIERARCHY_DEPTH || !visited.insert(current.clone()) {
                continue;
            }
            if let Some(decl) = self.resolve(&current) {
                pending.extend(decl.super_type().map(TypeName::erasure));
                pending.extend(decl.interfaces().iter().map(TypeName::erasure));
            }
        }
        false
    }

    /// True iff `ty` or any of its supertypes is named `capability`, for any
    /// type arguments. `capability` may be a simple or a qualified name.
    fn implements_capability(&self, ty: &TypeName, capability: &str) -> bool {
        let mut visited = FxHashSet::default();
        let mut pending = vec![ty.erasure()];

        while let Some(current) = pending.pop() {
            if names_match(current.name(), capability) && !current.is_array() {
                return true;
            }
            if visited.len() >= MAX_HIERARCHY_DEPTH || !visited.insert(current.clone()) {
                continue;
            }
            if let Some(decl) = self.resolve(&current) {
                pending.extend(decl.super_type().map(TypeName::erasure));
                pending.extend(decl.interfaces().iter().map(TypeName::erasure));
            }
        }
        false
    }
}
