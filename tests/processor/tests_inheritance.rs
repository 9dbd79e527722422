//! Attributes inherited from annotated super classes.

use fluentgen::contract::{ModelInstance, Value};
use fluentgen::{AttributeKey, DeclarationData, GeneratorConfig, Member, Modifier, ModelProcessor};

use crate::helpers::diagnostic_helpers::assert_no_errors;
use crate::helpers::fixtures::{attr, field, model_class, public_field, ty, world};

const BASE: &str = "com.airbnb.BaseModel<android.widget.TextView>";

#[test]
fn test_subclass_inherits_batch_super_attributes() {
    let set = world()
        .with(
            model_class("app.BaseCard", BASE)
                .with_modifier(Modifier::Abstract)
                .with_member(field("title", "String"))
                .with_member(field("count", "int")),
        )
        .with(model_class("app.Card", "app.BaseCard").with_member(field("subtitle", "String")));
    let processor = ModelProcessor::new(&set, GeneratorConfig::default());
    // Subclass listed first: inheritance must not depend on batch order.
    let output = processor.process(&[ty("app.Card"), ty("app.BaseCard")]);

    assert_no_errors(&output);
    let card = output.model("app.Card").unwrap();
    let names: Vec<_> = card.attributes().map(|a| a.field_name()).collect();
    assert_eq!(names, ["subtitle", "title", "count"]);
    assert_eq!(
        card.attribute(&AttributeKey::new("title", ty("String")))
            .and_then(|a| a.origin()),
        Some("app.BaseCard")
    );

    let base = output.model("app.BaseCard").unwrap();
    assert_eq!(base.attribute_count(), 2);
}

#[test]
fn test_subclass_declaration_wins() {
    let set = world()
        .with(model_class("app.BaseCard", BASE).with_member(field("title", "String")))
        .with(
            model_class("app.Card", "app.BaseCard").with_member(
                Member::field("title", ty("String"))
                    .with_annotation(attr().with_arg("required", "true")),
            ),
        );
    let processor = ModelProcessor::new(&set, GeneratorConfig::default());
    let output = processor.process(&[ty("app.BaseCard"), ty("app.Card")]);

    assert_no_errors(&output);
    let card = output.model("app.Card").unwrap();
    assert_eq!(card.attribute_count(), 1);
    let title = card.attribute(&AttributeKey::new("title", ty("String"))).unwrap();
    assert!(title.is_required());
    assert_eq!(title.origin(), Some("app.Card"));
}

#[test]
fn test_package_private_attributes_stay_in_their_package() {
    let set = world()
        .with(
            DeclarationData::class("lib.BaseCard")
                .extends(ty(BASE))
                .with_member(field("hidden", "String"))
                .with_member(public_field("shown", "String")),
        )
        .with(model_class("lib.SameCard", "lib.BaseCard"))
        .with(model_class("app.OtherCard", "lib.BaseCard"));
    let processor = ModelProcessor::new(&set, GeneratorConfig::default());
    let output = processor.process(&[ty("lib.SameCard"), ty("app.OtherCard")]);

    assert_no_errors(&output);
    let names = |origin: &str| -> Vec<String> {
        output
            .model(origin)
            .unwrap()
            .attributes()
            .map(|a| a.field_name().to_string())
            .collect()
    };
    assert_eq!(names("lib.SameCard"), ["hidden", "shown"]);
    assert_eq!(names("app.OtherCard"), ["shown"]);
}

#[test]
fn test_attributes_inherited_through_several_levels() {
    let set = world()
        .with(
            DeclarationData::class("app.Root")
                .extends(ty(BASE))
                .with_member(field("a", "String")),
        )
        .with(
            DeclarationData::class("app.Middle")
                .extends(ty("app.Root"))
                .with_member(field("b", "String")),
        )
        .with(model_class("app.Leaf", "app.Middle").with_member(field("c", "String")));
    let processor = ModelProcessor::new(&set, GeneratorConfig::default());
    let output = processor.process(&[ty("app.Leaf")]);

    assert_no_errors(&output);
    let names: Vec<_> = output
        .model("app.Leaf")
        .unwrap()
        .attributes()
        .map(|a| a.field_name().to_string())
        .collect();
    assert_eq!(names, ["c", "b", "a"]);
}

#[test]
fn test_explicit_group_spans_hierarchy() {
    let grouped = |name: &str| {
        Member::field(name, ty("String"))
            .with_annotation(attr().with_arg("group", "text"))
            .with_annotation(fluentgen::Annotation::new("Nullable"))
    };
    let set = world()
        .with(model_class("app.BaseCard", BASE).with_member(grouped("text")))
        .with(model_class("app.Card", "app.BaseCard").with_member(grouped("textRes")));
    let processor = ModelProcessor::new(&set, GeneratorConfig::default());
    let output = processor.process(&[ty("app.BaseCard"), ty("app.Card")]);

    assert_no_errors(&output);
    let card = output.model("app.Card").unwrap();
    let group = card.group("text").unwrap();
    let members: Vec<_> = group.members().iter().map(|k| k.name.as_ref()).collect();
    assert_eq!(members, ["textRes", "text"]);

    let config = GeneratorConfig::default();
    let mut instance = ModelInstance::new(card, &config);
    instance.set_named("text", Value::str("hello")).unwrap();
    instance.set_named("textRes", Value::str("res")).unwrap();
    assert_eq!(instance.get_named("text"), Some(&Value::Null));
}
