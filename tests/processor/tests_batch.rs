//! Batch processing: error isolation, model arguments, overload groups and
//! hash-code validation.

use fluentgen::contract::{ModelInstance, Value};
use fluentgen::diagnostics::codes;
use fluentgen::model::{AutoLayout, HashPolicy};
use fluentgen::{
    Annotation, AttributeKey, DeclarationData, GeneratorConfig, Member, Modifier, ModelProcessor,
    ParamSpec, Severity,
};
use rstest::rstest;

use crate::helpers::diagnostic_helpers::{assert_no_errors, errors_for};
use crate::helpers::fixtures::{attr, field, model_class, nullable, ty, world};

const BASE: &str = "com.airbnb.BaseModel<android.widget.TextView>";

fn model_with_args(args: &[(&str, &str)]) -> DeclarationData {
    let mut annotation = Annotation::new("com.airbnb.ModelClass");
    for (key, value) in args {
        annotation = annotation.with_arg(*key, *value);
    }
    DeclarationData::class("app.Row")
        .with_annotation(annotation)
        .extends(ty(BASE))
}

// ============================================================================
// Error isolation
// ============================================================================

#[test]
fn test_errors_drop_only_their_model() {
    let set = world()
        .with(model_class("app.Card", BASE).with_member(field("title", "String")))
        .with(
            model_class("app.Broken", BASE)
                .with_member(field("secret", "String").with_modifier(Modifier::Private)),
        );
    let processor = ModelProcessor::new(&set, GeneratorConfig::default());
    let output = processor.process(&[ty("app.Missing"), ty("app.Card"), ty("app.Broken")]);

    assert_eq!(output.models.len(), 1);
    assert!(output.model("app.Card").is_some());
    assert_eq!(output.diagnostics.error_count(), 2);

    let missing = errors_for(&output, "app.Missing");
    assert_eq!(missing[0].code.as_deref(), Some(codes::UNKNOWN_DECLARATION));
    let broken = errors_for(&output, "app.Broken");
    assert_eq!(broken[0].code.as_deref(), Some(codes::UNSUPPORTED_ATTRIBUTE));
    assert!(broken[0].member.is_some());
}

#[test]
fn test_final_declaration_is_rejected() {
    let set = world().with(model_class("app.Sealed", BASE).with_modifier(Modifier::Final));
    let processor = ModelProcessor::new(&set, GeneratorConfig::default());
    let output = processor.process(&[ty("app.Sealed")]);

    assert!(output.models.is_empty());
    let errors = errors_for(&output, "app.Sealed");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code.as_deref(), Some(codes::FINAL_DECLARATION));
}

#[test]
fn test_abstract_declaration_builds_but_is_not_emitted() {
    let set = world()
        .with(
            model_class("app.BaseCard", BASE)
                .with_modifier(Modifier::Abstract)
                .with_member(field("title", "String")),
        )
        .with(model_class("app.Card", "app.BaseCard"));
    let processor = ModelProcessor::new(&set, GeneratorConfig::default());
    let output = processor.process(&[ty("app.BaseCard"), ty("app.Card")]);

    assert_no_errors(&output);
    assert_eq!(output.models.len(), 2);
    let emitted: Vec<_> = output.models_to_emit().map(|m| m.origin()).collect();
    assert_eq!(emitted, ["app.Card"]);
}

#[test]
fn test_conflicting_explicit_group_is_reported() {
    let grouped = |name: &str, default: &str| {
        Member::field(name, ty("int")).with_annotation(
            attr()
                .with_arg("group", "size")
                .with_arg("defaultValue", default),
        )
    };
    let set = world().with(
        model_class("app.Card", BASE)
            .with_member(grouped("small", "1"))
            .with_member(grouped("large", "2")),
    );
    let processor = ModelProcessor::new(&set, GeneratorConfig::default());
    let output = processor.process(&[ty("app.Card")]);

    assert!(output.model("app.Card").is_none());
    let errors = errors_for(&output, "app.Card");
    assert_eq!(errors[0].code.as_deref(), Some(codes::CONFLICTING_GROUP_DEFAULTS));
}

#[test]
fn test_unknown_hash_policy_is_reported() {
    let set = world().with(
        model_class("app.Card", BASE).with_member(
            Member::field("title", ty("String")).with_annotation(attr().with_arg("hash", "sometimes")),
        ),
    );
    let processor = ModelProcessor::new(&set, GeneratorConfig::default());
    let output = processor.process(&[ty("app.Card")]);
    assert!(output.diagnostics.has_errors());
}

// ============================================================================
// Model arguments
// ============================================================================

#[rstest]
#[case("MATCH_WIDTH_WRAP_HEIGHT", AutoLayout::MatchWidthWrapHeight)]
#[case("Size.WRAP_WIDTH_WRAP_HEIGHT", AutoLayout::WrapWidthWrapHeight)]
#[case("NONE", AutoLayout::None)]
fn test_auto_layout_argument(#[case] raw: &str, #[case] expected: AutoLayout) {
    let set = world().with(model_with_args(&[("autoLayout", raw)]));
    let processor = ModelProcessor::new(&set, GeneratorConfig::default());
    let output = processor.process(&[ty("app.Row")]);

    assert!(output.diagnostics.is_empty());
    let model = output.model("app.Row").unwrap();
    assert_eq!(model.auto_layout(), expected);
    assert_eq!(model.is_programmatic_view(), expected != AutoLayout::None);
}

#[test]
fn test_unknown_auto_layout_is_a_warning() {
    let set = world().with(model_with_args(&[("autoLayout", "STRETCH")]));
    let processor = ModelProcessor::new(&set, GeneratorConfig::default());
    let output = processor.process(&[ty("app.Row")]);

    assert_no_errors(&output);
    assert_eq!(output.diagnostics.warning_count(), 1);
    let warning = &output.diagnostics.diagnostics()[0];
    assert_eq!(warning.code.as_deref(), Some(codes::INVALID_MODEL_ARGUMENT));
    assert_eq!(output.model("app.Row").unwrap().auto_layout(), AutoLayout::None);
}

#[test]
fn test_style_argument_links_style_builder() {
    let set = world().with(model_with_args(&[("style", "app.RowStyleBuilder")]));
    let processor = ModelProcessor::new(&set, GeneratorConfig::default());
    let output = processor.process(&[ty("app.Row")]);

    assert_no_errors(&output);
    let model = output.model("app.Row").unwrap();
    assert!(model.is_programmatic_view());
    assert_eq!(model.originating_elements(), vec![&ty("app.RowStyleBuilder")]);

    let style = model
        .attribute(&AttributeKey::new("style", ty("app.RowStyleBuilder")))
        .unwrap();
    assert!(style.is_nullable());
    assert_eq!(style.hash_policy(), HashPolicy::Full);

    let config = GeneratorConfig::default();
    let mut dark = ModelInstance::new(model, &config);
    dark.set_named("style", Value::Opaque("dark".into())).unwrap();
    let mut light = ModelInstance::new(model, &config);
    light.set_named("style", Value::Opaque("light".into())).unwrap();
    assert_ne!(dark, light);
    assert_ne!(dark.hash_code(), light.hash_code());
    assert_eq!(light.get_named("style"), Some(&Value::Opaque("light".into())));
}

#[test]
fn test_malformed_style_argument_is_an_error() {
    let set = world().with(model_with_args(&[("style", "app.Style<")]));
    let processor = ModelProcessor::new(&set, GeneratorConfig::default());
    let output = processor.process(&[ty("app.Row")]);

    assert!(output.models.is_empty());
    let errors = errors_for(&output, "app.Row");
    assert_eq!(errors[0].code.as_deref(), Some(codes::INVALID_TYPE));
}

// ============================================================================
// Overload groups
// ============================================================================

fn overloaded() -> fluentgen::DeclarationSet {
    world()
        .with(
            DeclarationData::class("app.TextCard")
                .extends(ty(BASE))
                .with_member(nullable(field("title", "String"))),
        )
        .with(
            model_class("app.Card", "app.TextCard")
                .with_member(field("title", "java.lang.CharSequence")),
        )
}

#[test]
fn test_same_named_attributes_form_overload_group() {
    let set = overloaded();
    let processor = ModelProcessor::new(&set, GeneratorConfig::default());
    let output = processor.process(&[ty("app.Card")]);

    assert_no_errors(&output);
    let model = output.model("app.Card").unwrap();
    assert_eq!(model.attribute_count(), 2);
    let group = model.group("title").unwrap();
    assert_eq!(group.members().len(), 2);
    assert_eq!(
        group.default_attribute(),
        Some(&AttributeKey::new("title", ty("String")))
    );
}

#[test]
fn test_overload_grouping_can_be_disabled() {
    let set = overloaded();
    let processor = ModelProcessor::new(
        &set,
        GeneratorConfig::default().with_group_overloads(false),
    );
    let output = processor.process(&[ty("app.Card")]);

    let model = output.model("app.Card").unwrap();
    assert_eq!(model.groups().count(), 0);
}

// ============================================================================
// Hash-code validation
// ============================================================================

fn hashing_world() -> fluentgen::DeclarationSet {
    let equals = Member::method("equals", ty("boolean"))
        .with_modifier(Modifier::Public)
        .with_param(ParamSpec::new(ty("java.lang.Object"), "other"));
    let hash_code = Member::method("hashCode", ty("int")).with_modifier(Modifier::Public);

    world()
        .with(DeclarationData::class("app.Plain").extends(ty("java.lang.Object")))
        .with(
            DeclarationData::class("app.Money")
                .extends(ty("java.lang.Object"))
                .with_member(equals)
                .with_member(hash_code),
        )
        .with(
            model_class("app.Card", BASE)
                .with_member(field("plain", "app.Plain"))
                .with_member(field("price", "app.Money"))
                .with_member(nullable(field("onClick", "android.view.View.OnClickListener")))
                .with_member(
                    Member::field("ignored", ty("app.Plain"))
                        .with_annotation(attr().with_arg("hash", "excluded")),
                ),
        )
}

#[test]
fn test_missing_hash_code_warns_when_required() {
    let set = hashing_world();
    let processor = ModelProcessor::new(&set, GeneratorConfig::default().with_require_hash_code(true));
    let output = processor.process(&[ty("app.Card")]);

    assert!(output.model("app.Card").is_some());
    let warnings: Vec<_> = output
        .diagnostics
        .diagnostics()
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].member.as_deref(), Some("plain"));
    assert_eq!(warnings[0].code.as_deref(), Some(codes::MISSING_HASH_CODE));
}

#[test]
fn test_hash_code_not_checked_by_default() {
    let set = hashing_world();
    let processor = ModelProcessor::new(&set, GeneratorConfig::default());
    let output = processor.process(&[ty("app.Card")]);
    assert!(output.diagnostics.is_empty());
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_batch_results_follow_target_order() {
    let mut set = world();
    let mut targets = Vec::new();
    for i in 0..24 {
        let name = format!("app.Card{i}");
        set.insert(
            model_class(name.as_str(), BASE)
                .with_member(field("title", "String"))
                .with_member(field("count", "int")),
        );
        targets.push(ty(&name));
    }
    let processor = ModelProcessor::new(&set, GeneratorConfig::default());

    let first = processor.process(&targets);
    let second = processor.process(&targets);
    let origins = |o: &fluentgen::ProcessingOutput| -> Vec<String> {
        o.models.iter().map(|m| m.origin().to_string()).collect()
    };
    assert_eq!(origins(&first), origins(&second));
    assert_eq!(first.models[5].origin(), "app.Card5");
    for model in &first.models {
        let names: Vec<_> = model.attributes().map(|a| a.field_name()).collect();
        assert_eq!(names, ["title", "count"]);
    }
}
