//! Declarations: the abstract input of the generator.
//!
//! The core never reads source text. It asks a [`DeclarationSource`] for
//! [`Declaration`]s and walks their members and super types.
//!
//! ## Key Types
//!
//! - [`Declaration`] - one class or interface (modifiers, annotations, members)
//! - [`DeclarationSource`] - lookup by type, subtype checks
//! - [`Member`] / [`ParamSpec`] - constructors, methods and fields
//! - [`DeclarationSet`] - in-memory source built from [`DeclarationData`]

mod member;
mod memory;
mod source;

pub use member::{Member, MemberKind, ParamSpec};
pub use memory::{DeclarationData, DeclarationSet};
pub use source::{DeclKind, Declaration, DeclarationSource};
