//! Declaration fixtures.
//!
//! A small Android-like world: `Object`, a view hierarchy, a generic
//! `BaseModel<T>` with a few chainable methods, and the generated-model
//! marker interface.

use fluentgen::{Annotation, DeclarationData, DeclarationSet, Member, Modifier, ParamSpec, TypeName};

pub fn ty(s: &str) -> TypeName {
    TypeName::parse(s).unwrap()
}

/// `@ModelAttribute`
pub fn attr() -> Annotation {
    Annotation::new("com.airbnb.ModelAttribute")
}

/// An annotated, package-private field.
pub fn field(name: &str, t: &str) -> Member {
    Member::field(name, ty(t)).with_annotation(attr())
}

pub fn public_field(name: &str, t: &str) -> Member {
    field(name, t).with_modifier(Modifier::Public)
}

pub fn nullable(member: Member) -> Member {
    member.with_annotation(Annotation::new("androidx.annotation.Nullable"))
}

/// A public chainable setter returning `returns`.
pub fn chainable(name: &str, param: &str, returns: &str) -> Member {
    Member::method(name, ty(returns))
        .with_modifier(Modifier::Public)
        .with_param(ParamSpec::new(ty(param), name))
}

pub fn world() -> DeclarationSet {
    DeclarationSet::new()
        .with(DeclarationData::class("java.lang.Object"))
        .with(DeclarationData::class("android.view.View").extends(ty("java.lang.Object")))
        .with(
            DeclarationData::class("android.widget.TextView").extends(ty("android.view.View")),
        )
        .with(
            DeclarationData::interface("com.airbnb.GeneratedModel").with_type_param("T"),
        )
        .with(
            DeclarationData::interface("android.view.View.OnClickListener").with_member(
                Member::method("onClick", ty("void"))
                    .with_param(ParamSpec::new(ty("android.view.View"), "view")),
            ),
        )
        .with(
            DeclarationData::class("com.airbnb.BaseModel")
                .with_type_param("T")
                .with_modifier(Modifier::Public)
                .with_modifier(Modifier::Abstract)
                .extends(ty("java.lang.Object"))
                .with_member(Member::constructor().with_modifier(Modifier::Public))
                .with_member(chainable("id", "long", "com.airbnb.BaseModel<T>"))
                .with_member(chainable("layout", "int", "com.airbnb.BaseModel<T>"))
                .with_member(chainable("show", "boolean", "com.airbnb.BaseModel<T>"))
                .with_member(
                    Member::method("reset", ty("com.airbnb.BaseModel<T>"))
                        .with_modifier(Modifier::Public),
                ),
        )
}

/// `@ModelClass class <name> extends <super>`
pub fn model_class(name: &str, super_type: &str) -> DeclarationData {
    DeclarationData::class(name)
        .with_annotation(Annotation::new("com.airbnb.ModelClass"))
        .extends(ty(super_type))
}
