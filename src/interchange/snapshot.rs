//! JSON snapshots of finished models.
//!
//! A snapshot carries everything an out-of-process emitter needs: names,
//! attributes with their defaults and policies, groups, overridden methods
//! and constructors. Types are written in their source form (`Map<K, V>`).

use serde::{Deserialize, Serialize};

use super::error::InterchangeError;
use crate::model::{DefaultValue, GeneratedModel};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotFile {
    pub version: u32,
    pub models: Vec<ModelSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSnapshot {
    pub origin: String,
    pub generated_type: String,
    pub super_type: String,
    pub bound_object_type: String,
    pub should_generate: bool,
    pub super_also_generated: bool,
    pub attributes: Vec<AttributeSnapshot>,
    pub groups: Vec<GroupSnapshot>,
    pub chainable_methods: Vec<String>,
    pub constructors: Vec<String>,
    pub auto_layout: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_builder: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSnapshot {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub nullable: bool,
    pub required: bool,
    pub default: DefaultSnapshot,
    pub hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "code", rename_all = "camelCase")]
pub enum DefaultSnapshot {
    None,
    Implicit(String),
    Explicit(String),
    LanguageNative,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSnapshot {
    pub name: String,
    pub members: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_attribute: Option<String>,
    pub required: bool,
}

impl From<&DefaultValue> for DefaultSnapshot {
    fn from(value: &DefaultValue) -> Self {
        match value {
            DefaultValue::None => DefaultSnapshot::None,
            DefaultValue::Implicit(code) => DefaultSnapshot::Implicit(code.to_string()),
            DefaultValue::Explicit(code) => DefaultSnapshot::Explicit(code.to_string()),
            DefaultValue::LanguageNative => DefaultSnapshot::LanguageNative,
        }
    }
}

impl ModelSnapshot {
    pub fn from_model(model: &GeneratedModel) -> Self {
        Self {
            origin: model.origin().to_string(),
            generated_type: model.generated_type().to_string(),
            super_type: model.super_type().to_string(),
            bound_object_type: model.bound_object_type().to_string(),
            should_generate: model.should_generate(),
            super_also_generated: model.is_super_class_also_generated(),
            attributes: model
                .attributes()
                .map(|a| AttributeSnapshot {
                    name: a.field_name().to_string(),
                    ty: a.ty().to_string(),
                    nullable: a.is_nullable(),
                    required: a.is_required(),
                    default: a.default_value().into(),
                    hash: a.hash_policy().as_str().to_string(),
                    group: a.group().map(str::to_string),
                })
                .collect(),
            groups: model
                .groups()
                .map(|g| GroupSnapshot {
                    name: g.name().to_string(),
                    members: g.members().iter().map(|k| k.to_string()).collect(),
                    default_attribute: g.default_attribute().map(|k| k.to_string()),
                    required: g.is_required(),
                })
                .collect(),
            chainable_methods: model.chainable_methods().map(|m| m.to_string()).collect(),
            constructors: model.constructors().iter().map(|c| c.to_string()).collect(),
            auto_layout: model.auto_layout().as_str().to_string(),
            style_builder: model.style_linkage().map(|s| s.style_builder.to_string()),
        }
    }
}

/// Serialize models as a pretty-printed snapshot file.
pub fn to_json<'a>(models: impl IntoIterator<Item = &'a GeneratedModel>) -> Result<String, InterchangeError> {
    let file = SnapshotFile {
        version: SNAPSHOT_VERSION,
        models: models.into_iter().map(ModelSnapshot::from_model).collect(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Read a snapshot file, rejecting other format versions.
pub fn from_json(input: &str) -> Result<SnapshotFile, InterchangeError> {
    let file: SnapshotFile = serde_json::from_str(input)?;
    if file.version != SNAPSHOT_VERSION {
        return Err(InterchangeError::UnsupportedVersion(file.version));
    }
    Ok(file)
}
