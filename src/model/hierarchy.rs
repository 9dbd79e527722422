//! Facts derived from a declaration's super-type chain.

use crate::base::{TypeArg, TypeName};
use crate::config::GeneratorConfig;
use crate::decl::{Declaration, DeclarationSource};

const MAX_CHAIN_DEPTH: usize = 64;

/// The type the generated model binds to, e.g. `TextView` for
/// `class Card extends BaseModel<TextView>`.
///
/// The argument given highest in the hierarchy wins, unless it is only a
/// type variable. A super type with one argument binds to it; with several,
/// the first argument extending a configured marker type is used.
pub fn bound_object_type<S>(
    source: &S,
    decl: &dyn Declaration,
    config: &GeneratorConfig,
) -> Option<TypeName>
where
    S: DeclarationSource + ?Sized,
{
    find_bound(source, decl, config, 0)
}

fn find_bound<S>(
    source: &S,
    decl: &dyn Declaration,
    config: &GeneratorConfig,
    depth: usize,
) -> Option<TypeName>
where
    S: DeclarationSource + ?Sized,
{
    let super_type = decl.super_type()?;

    if depth < MAX_CHAIN_DEPTH {
        if let Some(super_decl) = source.resolve(super_type) {
            let inherited = find_bound(source, super_decl, config, depth + 1);
            if let Some(found) = inherited.filter(|t| !super_decl.is_type_variable(t)) {
                return Some(found);
            }
        }
    }

    let args: Vec<&TypeName> = super_type.args().iter().filter_map(argument_type).collect();
    if super_type.args().len() == 1 {
        return args.first().map(|t| (*t).clone());
    }
    args.into_iter()
        .find(|arg| {
            config
                .bound_type_markers
                .iter()
                .any(|marker| source.is_subtype(arg, &TypeName::new(marker.as_str())))
        })
        .cloned()
}

fn argument_type(arg: &TypeArg) -> Option<&TypeName> {
    match arg {
        TypeArg::Type(t) | TypeArg::Extends(t) => Some(t),
        TypeArg::Wildcard | TypeArg::Super(_) => None,
    }
}

/// Whether the generated class's immediate super type, the annotated
/// declaration itself, already implements the generated-model capability.
pub fn is_super_also_generated<S>(source: &S, decl: &dyn Declaration, config: &GeneratorConfig) -> bool
where
    S: DeclarationSource + ?Sized,
{
    source.implements_capability(&decl.as_type(), &config.capability)
}
