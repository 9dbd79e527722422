//! The planned surface of a generated class and its builder.
//!
//! A renderer walks a [`ModelSurface`] and prints it; every decision about
//! what exists, what it returns and what it clears is made here.

use std::sync::Arc;

use crate::base::{Annotation, Modifier, Modifiers, TypeArg, TypeName};
use crate::config::GeneratorConfig;
use crate::decl::ParamSpec;
use crate::model::{AttributeKey, ConstructorInfo, DefaultValue, GeneratedModel, HashPolicy, MethodInfo};

/// One fluent setter for an attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetterPlan {
    pub attribute: AttributeKey,
    pub param: ParamSpec,
    /// Group siblings the setter resets to absence.
    pub clears: Vec<AttributeKey>,
    /// Reject `null` at runtime.
    pub null_check: bool,
    pub returns: TypeName,
}

/// An inherited chainable method overridden to return the generated type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverridePlan {
    pub method: MethodInfo,
    pub returns: TypeName,
}

/// A constructor of the generated class. Each forwards its parameters to
/// the matching super constructor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructorPlan {
    pub constructor: ConstructorInfo,
    /// No constructor was declared; this is the implicit public one.
    pub synthesized: bool,
}

/// What `reset()` assigns to an attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResetValue {
    Code(Arc<str>),
    /// Call the setter without an argument and let the language fill it in.
    LanguageDefault,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResetStep {
    pub attribute: AttributeKey,
    pub value: ResetValue,
}

/// Attributes compared in `equals` and hashed in `hashCode`, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EqualityStep {
    pub attribute: AttributeKey,
    pub policy: HashPolicy,
}

/// What a builder method sets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuilderTarget {
    Attribute(AttributeKey),
    Id,
    Layout,
    SpanSizeOverride,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuilderMethod {
    pub name: Arc<str>,
    pub params: Vec<ParamSpec>,
    pub varargs: bool,
    pub target: BuilderTarget,
}

/// Everything the emitter needs to render one model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelSurface {
    pub generated_type: TypeName,
    pub super_type: TypeName,
    /// `GeneratedModel<Bound>`
    pub implements: TypeName,
    pub builder_type: TypeName,
    pub setters: Vec<SetterPlan>,
    pub overrides: Vec<OverridePlan>,
    pub constructors: Vec<ConstructorPlan>,
    pub reset: Vec<ResetStep>,
    pub equality: Vec<EqualityStep>,
    /// Attributes printed by `toString`, in order.
    pub to_string: Vec<AttributeKey>,
    pub builder_methods: Vec<BuilderMethod>,
}

impl ModelSurface {
    pub fn plan(model: &GeneratedModel, config: &GeneratorConfig) -> Self {
        let generated_type = model.generated_type().clone();
        let builder_type = sibling_type(&generated_type, &config.builder_name(model.generated_name()));
        let implements = TypeName::new(config.capability.as_str())
            .with_args(vec![TypeArg::Type(model.bound_object_type().clone())]);

        let setters = model
            .attributes()
            .map(|attribute| {
                let clears = model
                    .group_of(attribute.key())
                    .map(|g| g.siblings_of(attribute.key()).cloned().collect())
                    .unwrap_or_default();
                let mut param = ParamSpec::new(attribute.ty().clone(), attribute.field_name());
                if attribute.is_nullable() {
                    param = param.with_annotation(Annotation::new(config.nullable_annotation.as_str()));
                }
                SetterPlan {
                    attribute: attribute.key().clone(),
                    param,
                    clears,
                    null_check: !attribute.is_nullable() && !attribute.ty().is_primitive(),
                    returns: generated_type.clone(),
                }
            })
            .collect();

        let overrides = model
            .chainable_methods()
            .map(|method| OverridePlan {
                method: method.clone(),
                returns: generated_type.clone(),
            })
            .collect();

        let constructors = if model.constructors().is_empty() {
            vec![ConstructorPlan {
                constructor: ConstructorInfo::new(Modifiers::of(&[Modifier::Public]), Vec::new(), false),
                synthesized: true,
            }]
        } else {
            model
                .constructors()
                .iter()
                .map(|c| ConstructorPlan {
                    constructor: c.clone(),
                    synthesized: false,
                })
                .collect()
        };

        let reset = model
            .attributes()
            .map(|attribute| {
                let key = attribute.key();
                let is_group_default = model
                    .group_of(key)
                    .map(|g| g.default_attribute() == Some(key));
                let value = match (is_group_default, attribute.default_value()) {
                    // A non-default group member starts absent.
                    (Some(false), _) => ResetValue::Code(attribute.ty().zero_value().into()),
                    (_, DefaultValue::LanguageNative) => ResetValue::LanguageDefault,
                    _ => ResetValue::Code(attribute.reset_code().into()),
                };
                ResetStep {
                    attribute: key.clone(),
                    value,
                }
            })
            .collect();

        let equality = model
            .attributes()
            .filter(|a| a.hash_policy() != HashPolicy::Excluded)
            .map(|a| EqualityStep {
                attribute: a.key().clone(),
                policy: a.hash_policy(),
            })
            .collect();

        let to_string = model.attributes().map(|a| a.key().clone()).collect();

        let mut builder_methods: Vec<BuilderMethod> = model
            .attributes()
            .map(|attribute| BuilderMethod {
                name: Arc::from(attribute.field_name()),
                params: vec![ParamSpec::new(attribute.ty().clone(), attribute.field_name())],
                varargs: false,
                target: BuilderTarget::Attribute(attribute.key().clone()),
            })
            .collect();
        builder_methods.extend(identity_methods());

        Self {
            generated_type,
            super_type: model.super_type().clone(),
            implements,
            builder_type,
            setters,
            overrides,
            constructors,
            reset,
            equality,
            to_string,
            builder_methods,
        }
    }

    pub fn setter(&self, key: &AttributeKey) -> Option<&SetterPlan> {
        self.setters.iter().find(|s| &s.attribute == key)
    }
}

/// `name` in the package of `ty`.
fn sibling_type(ty: &TypeName, name: &str) -> TypeName {
    match ty.package() {
        "" => TypeName::new(name),
        package => TypeName::new(format!("{package}.{name}")),
    }
}

fn param(ty: &str, name: &str) -> ParamSpec {
    ParamSpec::new(TypeName::new(ty), name)
}

fn varargs_param(ty: &str, name: &str) -> ParamSpec {
    ParamSpec::new(TypeName::new(ty).array_of(), name)
}

fn identity_methods() -> Vec<BuilderMethod> {
    let id = |params: Vec<ParamSpec>, varargs: bool| BuilderMethod {
        name: Arc::from("id"),
        params,
        varargs,
        target: BuilderTarget::Id,
    };
    vec![
        id(vec![param("long", "id")], false),
        id(vec![varargs_param("java.lang.Number", "ids")], true),
        id(vec![param("long", "id1"), param("long", "id2")], false),
        id(vec![param("java.lang.CharSequence", "key")], false),
        id(
            vec![
                param("java.lang.CharSequence", "key"),
                varargs_param("java.lang.CharSequence", "otherKeys"),
            ],
            true,
        ),
        id(
            vec![param("java.lang.CharSequence", "key"), param("long", "id")],
            false,
        ),
        BuilderMethod {
            name: Arc::from("layout"),
            params: vec![param("int", "layoutRes").with_annotation(Annotation::new("LayoutRes"))],
            varargs: false,
            target: BuilderTarget::Layout,
        },
        BuilderMethod {
            name: Arc::from("spanSizeOverride"),
            params: vec![
                param("SpanSizeOverrideCallback", "spanSizeCallback")
                    .with_annotation(Annotation::new(crate::base::constants::NULLABLE_ANNOTATION)),
            ],
            varargs: false,
            target: BuilderTarget::SpanSizeOverride,
        },
    ]
}
