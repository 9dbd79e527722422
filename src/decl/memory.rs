//! In-memory declarations.
//!
//! [`DeclarationSet`] is a ready-made [`DeclarationSource`] for front-ends
//! that already hold their declarations as plain data, and for tests that
//! need synthetic hierarchies without a compiler.

use std::sync::Arc;

use indexmap::IndexMap;

use super::member::Member;
use super::source::{DeclKind, Declaration, DeclarationSource};
use crate::base::{Annotation, Modifier, Modifiers, TypeName};

/// A declaration held as plain data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclarationData {
    qualified_name: Arc<str>,
    kind: DeclKind,
    modifiers: Modifiers,
    annotations: Vec<Annotation>,
    type_params: Vec<Arc<str>>,
    super_type: Option<TypeName>,
    interfaces: Vec<TypeName>,
    members: Vec<Member>,
}

impl DeclarationData {
    fn new(qualified_name: impl Into<Arc<str>>, kind: DeclKind) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            kind,
            modifiers: Modifiers::new(),
            annotations: Vec::new(),
            type_params: Vec::new(),
            super_type: None,
            interfaces: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn class(qualified_name: impl Into<Arc<str>>) -> Self {
        Self::new(qualified_name, DeclKind::Class)
    }

    pub fn interface(qualified_name: impl Into<Arc<str>>) -> Self {
        Self::new(qualified_name, DeclKind::Interface).with_modifier(Modifier::Abstract)
    }

    pub fn extends(mut self, super_type: TypeName) -> Self {
        self.super_type = Some(super_type);
        self
    }

    pub fn implements(mut self, interface: TypeName) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_type_param(mut self, name: impl Into<Arc<str>>) -> Self {
        self.type_params.push(name.into());
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }
}

impl Declaration for DeclarationData {
    fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    fn kind(&self) -> DeclKind {
        self.kind
    }

    fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn type_params(&self) -> &[Arc<str>] {
        &self.type_params
    }

    fn super_type(&self) -> Option<&TypeName> {
        self.super_type.as_ref()
    }

    fn interfaces(&self) -> &[TypeName] {
        &self.interfaces
    }

    fn members(&self) -> &[Member] {
        &self.members
    }
}

/// A set of declarations indexed by qualified name (insertion ordered).
#[derive(Clone, Debug, Default)]
pub struct DeclarationSet {
    decls: IndexMap<Arc<str>, DeclarationData>,
}

impl DeclarationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration, returning the one it replaced.
    pub fn insert(&mut self, decl: DeclarationData) -> Option<DeclarationData> {
        self.decls.insert(decl.qualified_name.clone(), decl)
    }

    pub fn with(mut self, decl: DeclarationData) -> Self {
        self.insert(decl);
        self
    }

    pub fn get(&self, qualified_name: &str) -> Option<&DeclarationData> {
        self.decls.get(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeclarationData> {
        self.decls.values()
    }

    /// Types of every declaration carrying `annotation`, in insertion order.
    pub fn annotated_with(&self, annotation: &str) -> Vec<TypeName> {
        self.decls
            .values()
            .filter(|d| d.has_annotation(annotation))
            .map(|d| TypeName::new(d.qualified_name.clone()))
            .collect()
    }
}

impl DeclarationSource for DeclarationSet {
    fn lookup(&self, qualified_name: &str) -> Option<&dyn Declaration> {
        self.decls
            .get(qualified_name)
            .map(|d| d as &dyn Declaration)
    }
}
