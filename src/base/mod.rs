//! Foundation types for fluentgen.
//!
//! This module provides the vocabulary every other layer speaks:
//! - [`TypeName`] - Parsed type references (logos lexer)
//! - [`Modifier`], [`Modifiers`] - Declaration and member modifiers
//! - [`Annotation`] - Annotation data, preserved verbatim
//! - Naming constants (suffixes, reserved method names)
//!
//! This module has NO dependencies on other fluentgen modules.

mod annotation;
pub mod constants;
mod modifiers;
mod type_name;

pub use annotation::{Annotation, names_match, simple_name_of};
pub use modifiers::{Modifier, Modifiers};
pub use type_name::{TypeArg, TypeName, TypeParseError};
