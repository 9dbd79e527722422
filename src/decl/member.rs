//! Members of a declaration: constructors, methods and fields.

use std::fmt;
use std::sync::Arc;

use crate::base::{Annotation, Modifier, Modifiers, TypeName};

/// A parameter of a constructor or method.
///
/// Type, name and annotations are preserved verbatim so mirrored
/// constructors and overrides can reproduce them exactly.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParamSpec {
    pub ty: TypeName,
    pub name: Arc<str>,
    pub annotations: Vec<Annotation>,
}

impl ParamSpec {
    pub fn new(ty: TypeName, name: impl Into<Arc<str>>) -> Self {
        Self {
            ty,
            name: name.into(),
            annotations: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

impl fmt::Display for ParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for annotation in &self.annotations {
            write!(f, "{annotation} ")?;
        }
        write!(f, "{} {}", self.ty, self.name)
    }
}

/// What kind of member this is, with its kind-specific type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberKind {
    Constructor,
    Method { return_type: TypeName },
    Field { ty: TypeName },
}

/// A member element as reported by the declaration front-end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub name: Arc<str>,
    pub kind: MemberKind,
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub params: Vec<ParamSpec>,
    pub varargs: bool,
}

impl Member {
    fn new(name: impl Into<Arc<str>>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            modifiers: Modifiers::new(),
            annotations: Vec::new(),
            params: Vec::new(),
            varargs: false,
        }
    }

    pub fn constructor() -> Self {
        Self::new("<init>", MemberKind::Constructor)
    }

    pub fn method(name: impl Into<Arc<str>>, return_type: TypeName) -> Self {
        Self::new(name, MemberKind::Method { return_type })
    }

    pub fn field(name: impl Into<Arc<str>>, ty: TypeName) -> Self {
        Self::new(name, MemberKind::Field { ty })
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Mark the last parameter as variadic.
    pub fn varargs(mut self) -> Self {
        self.varargs = true;
        self
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self.kind, MemberKind::Constructor)
    }

    pub fn is_method(&self) -> bool {
        matches!(self.kind, MemberKind::Method { .. })
    }

    pub fn is_field(&self) -> bool {
        matches!(self.kind, MemberKind::Field { .. })
    }

    pub fn return_type(&self) -> Option<&TypeName> {
        match &self.kind {
            MemberKind::Method { return_type } => Some(return_type),
            _ => None,
        }
    }

    pub fn field_type(&self) -> Option<&TypeName> {
        match &self.kind {
            MemberKind::Field { ty } => Some(ty),
            _ => None,
        }
    }

    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.is(name))
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotation(name).is_some()
    }
}
