//! Model properties checked end to end: declarations in, frozen model and
//! runtime contract out.

use fluentgen::contract::{ModelInstance, ModelSurface, Value};
use fluentgen::{
    AttributeInfo, AttributeKey, ConfigurationError, DeclarationSet, DeclarationSource,
    GeneratedModel, GeneratedModelInfo, GeneratorConfig, Modifier, ModelProcessor,
};
use rstest::rstest;

use crate::helpers::diagnostic_helpers::assert_no_errors;
use crate::helpers::fixtures::{attr, chainable, field, model_class, nullable, ty, world};

fn process_one(set: &DeclarationSet, name: &str) -> GeneratedModel {
    let processor = ModelProcessor::new(set, GeneratorConfig::default());
    let output = processor.process(&[ty(name)]);
    assert_no_errors(&output);
    output.model(name).cloned().unwrap()
}

fn key(name: &str, t: &str) -> AttributeKey {
    AttributeKey::new(name, ty(t))
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_reregistration_keeps_position_and_latest_data() {
    let set = world().with(model_class("app.Card", "com.airbnb.BaseModel<android.widget.TextView>"));
    let decl = set.lookup("app.Card").unwrap();
    let info = GeneratedModelInfo::new(&set, decl, &GeneratorConfig::default()).unwrap();

    info.add_attribute(AttributeInfo::new("title", ty("String"))).unwrap();
    info.add_attribute(AttributeInfo::new("count", ty("int"))).unwrap();
    info.add_attribute(AttributeInfo::new("title", ty("String")).required())
        .unwrap();

    let model = info.freeze();
    let names: Vec<_> = model.attributes().map(|a| a.field_name()).collect();
    assert_eq!(names, ["title", "count"]);
    assert!(model.attribute(&key("title", "String")).unwrap().is_required());
}

#[test]
fn test_attribute_setter_replaces_inherited_chainable_method() {
    let set = world().with(
        model_class("app.Card", "com.airbnb.BaseModel<android.widget.TextView>")
            .with_member(field("show", "boolean")),
    );
    let model = process_one(&set, "app.Card");

    let chainable: Vec<String> = model.chainable_methods().map(|m| m.to_string()).collect();
    assert!(!chainable.iter().any(|m| m.starts_with("show(")));
    assert!(chainable.iter().any(|m| m.starts_with("id(")));
    assert!(chainable.iter().any(|m| m.starts_with("layout(")));
    assert!(model.attribute(&key("show", "boolean")).is_some());
}

#[test]
fn test_reset_method_is_never_chainable() {
    let set = world().with(model_class("app.Card", "com.airbnb.BaseModel<android.widget.TextView>"));
    let model = process_one(&set, "app.Card");
    assert!(model.chainable_methods().all(|m| m.name() != "reset"));
    assert_eq!(model.chainable_methods().count(), 3);
}

#[test]
fn test_generated_names_and_bound_type() {
    let set = world().with(model_class("app.Card", "com.airbnb.BaseModel<android.widget.TextView>"));
    let model = process_one(&set, "app.Card");
    assert_eq!(model.generated_type(), &ty("app.Card_"));
    assert_eq!(model.bound_object_type(), &ty("android.widget.TextView"));
    assert!(model.has_empty_constructor());

    let surface = ModelSurface::plan(&model, &GeneratorConfig::default());
    assert_eq!(surface.builder_type, ty("app.CardBuilder"));
    assert_eq!(surface.implements, ty("GeneratedModel<android.widget.TextView>"));
    assert!(surface.overrides.iter().all(|o| o.returns == ty("app.Card_")));
}

// ============================================================================
// Group defaults
// ============================================================================

fn grouped(members: Vec<AttributeInfo>) -> Result<GeneratedModel, ConfigurationError> {
    let set = world().with(model_class("app.Card", "com.airbnb.BaseModel<android.widget.TextView>"));
    let decl = set.lookup("app.Card").unwrap();
    let info = GeneratedModelInfo::new(&set, decl, &GeneratorConfig::default())?;
    let keys: Vec<AttributeKey> = members.iter().map(|m| m.key().clone()).collect();
    info.add_attributes(members)?;
    info.add_attribute_group("slot", &keys)?;
    Ok(info.freeze())
}

#[test]
fn test_two_explicit_defaults_conflict() {
    let err = grouped(vec![
        AttributeInfo::new("a", ty("int")).with_default("5"),
        AttributeInfo::new("b", ty("long")).with_default("6"),
    ])
    .unwrap_err();
    assert!(matches!(err, ConfigurationError::ConflictingGroupDefaults { .. }));
}

#[test]
fn test_null_default_beats_primitive_default() {
    let model = grouped(vec![
        AttributeInfo::new("a", ty("int")),
        AttributeInfo::new("b", ty("String")).nullable(),
    ])
    .unwrap();
    let group = model.group("slot").unwrap();
    assert_eq!(group.default_attribute(), Some(&key("b", "String")));
    assert!(!group.is_required());
}

#[test]
fn test_all_required_members_leave_group_required() {
    let model = grouped(vec![
        AttributeInfo::new("a", ty("String")).required(),
        AttributeInfo::new("b", ty("CharSequence")).required(),
    ])
    .unwrap();
    let group = model.group("slot").unwrap();
    assert_eq!(group.default_attribute(), None);
    assert!(group.is_required());
}

#[rstest]
#[case::explicit_wins_over_null(
    vec![
        AttributeInfo::new("a", ty("String")).nullable(),
        AttributeInfo::new("b", ty("int")).with_default("7"),
    ],
    "b"
)]
#[case::first_null_default_wins(
    vec![
        AttributeInfo::new("a", ty("String")).nullable(),
        AttributeInfo::new("b", ty("CharSequence")).nullable(),
    ],
    "a"
)]
#[case::first_primitive_default_wins(
    vec![
        AttributeInfo::new("a", ty("int")),
        AttributeInfo::new("b", ty("long")),
    ],
    "a"
)]
#[case::required_member_skipped(
    vec![
        AttributeInfo::new("a", ty("int")).with_default("1").required(),
        AttributeInfo::new("b", ty("long")),
    ],
    "b"
)]
fn test_group_default_ranking(#[case] members: Vec<AttributeInfo>, #[case] expected: &str) {
    let model = grouped(members).unwrap();
    let default = model.group("slot").unwrap().default_attribute().unwrap();
    assert_eq!(default.name.as_ref(), expected);
}

// ============================================================================
// Runtime contract
// ============================================================================

#[test]
fn test_count_and_label_scenario() {
    let set = world().with(
        model_class("app.Card", "com.airbnb.BaseModel<android.widget.TextView>")
            .with_member(field("count", "int"))
            .with_member(
                fluentgen::Member::field("label", ty("String"))
                    .with_annotation(attr().with_arg("required", "true")),
            ),
    );
    let model = process_one(&set, "app.Card");
    let config = GeneratorConfig::default();

    let mut x = ModelInstance::new(&model, &config);
    assert_eq!(x.get_named("count"), Some(&Value::Int(0)));
    assert_eq!(x.get_named("label"), Some(&Value::Null));

    x.set_named("label", Value::str("x")).unwrap();
    let mut y = ModelInstance::new(&model, &config);
    y.set_named("label", Value::str("y")).unwrap();
    assert_ne!(x, y);

    let mut z = ModelInstance::new(&model, &config);
    z.set_named("label", Value::str("x")).unwrap();
    assert_eq!(x, z);
    assert_eq!(x.hash_code(), z.hash_code());

    z.set_named("count", Value::Int(2)).unwrap();
    assert_ne!(x, z);
}

#[test]
fn test_presence_only_listener_equality() {
    let set = world().with(
        model_class("app.Card", "com.airbnb.BaseModel<android.widget.TextView>")
            .with_member(nullable(field("onClick", "android.view.View.OnClickListener")))
            .with_member(nullable(field("title", "String"))),
    );
    let model = process_one(&set, "app.Card");
    let config = GeneratorConfig::default();

    let mut a = ModelInstance::new(&model, &config);
    let mut b = ModelInstance::new(&model, &config);
    a.set_named("onClick", Value::Callback(1)).unwrap();
    b.set_named("onClick", Value::Callback(2)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.hash_code(), b.hash_code());

    b.set_named("onClick", Value::Null).unwrap();
    assert_ne!(a, b);

    let mut c = ModelInstance::new(&model, &config);
    let mut d = ModelInstance::new(&model, &config);
    c.set_named("title", Value::str("a")).unwrap();
    d.set_named("title", Value::str("b")).unwrap();
    assert_ne!(c, d);
}

#[test]
fn test_click_group_clears_sibling() {
    let grouped_field = |name: &str| {
        nullable(
            fluentgen::Member::field(name, ty("android.view.View.OnClickListener"))
                .with_annotation(attr().with_arg("group", "click")),
        )
    };
    let set = world().with(
        model_class("app.Card", "com.airbnb.BaseModel<android.widget.TextView>")
            .with_member(grouped_field("clickA"))
            .with_member(grouped_field("clickB")),
    );
    let model = process_one(&set, "app.Card");
    let group = model.group("click").unwrap();
    assert!(!group.is_required());
    assert_eq!(group.default_attribute().unwrap().name.as_ref(), "clickA");

    let config = GeneratorConfig::default();
    let mut instance = ModelInstance::new(&model, &config);
    instance.set_named("clickA", Value::Callback(1)).unwrap();
    assert_eq!(instance.get_named("clickB"), Some(&Value::Null));

    instance.set_named("clickB", Value::Callback(2)).unwrap();
    assert_eq!(instance.get_named("clickA"), Some(&Value::Null));
    assert_eq!(instance.get_named("clickB"), Some(&Value::Callback(2)));

    instance.reset();
    assert_eq!(instance.get_named("clickA"), Some(&Value::Null));
    assert_eq!(instance.get_named("clickB"), Some(&Value::Null));
}

#[test]
fn test_non_null_setter_rejects_null() {
    let set = world().with(
        model_class("app.Card", "com.airbnb.BaseModel<android.widget.TextView>")
            .with_member(field("title", "String")),
    );
    let model = process_one(&set, "app.Card");
    let config = GeneratorConfig::default();
    let mut instance = ModelInstance::new(&model, &config);
    assert!(instance.set_named("title", Value::Null).is_err());
}

#[test]
fn test_chainable_override_on_public_subclass_of_generated_model() {
    let set = world()
        .with(
            fluentgen::DeclarationData::class("app.Card_")
                .extends(ty("com.airbnb.BaseModel<android.widget.TextView>"))
                .implements(ty("com.airbnb.GeneratedModel<android.widget.TextView>"))
                .with_member(chainable("title", "String", "app.Card_")),
        )
        .with(
            model_class("app.WideCard", "app.Card_").with_modifier(Modifier::Public),
        );
    let model = process_one(&set, "app.WideCard");
    assert!(model.is_super_class_also_generated());
    assert!(model.chainable_methods().any(|m| m.name() == "title"));
    assert_eq!(model.bound_object_type(), &ty("android.widget.TextView"));
}
