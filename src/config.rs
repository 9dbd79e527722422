//! Generator configuration.
//!
//! [`GeneratorConfig`] carries every naming convention and policy knob the
//! model layer consults. Front-ends usually build it from processor options
//! with [`GeneratorConfig::from_options`].

use std::collections::HashMap;

use thiserror::Error;

use crate::base::constants::{
    ATTRIBUTE_ANNOTATION, BUILDER_SUFFIX, DEFAULT_BOUND_TYPE, GENERATED_CLASS_SUFFIX,
    GENERATED_MODEL_CAPABILITY, HASH_MULTIPLIER, MODEL_ANNOTATION, NULLABLE_ANNOTATION,
    RESET_METHOD,
};

/// Processor option keys understood by [`GeneratorConfig::from_options`].
pub mod options {
    pub const REQUIRE_HASH_CODE: &str = "requireHashCode";
    pub const GENERATED_SUFFIX: &str = "generatedSuffix";
    pub const BUILDER_SUFFIX: &str = "builderSuffix";
    pub const HASH_MULTIPLIER: &str = "hashMultiplier";
    pub const GROUP_OVERLOADS: &str = "groupOverloads";
    pub const PRESENCE_ONLY_TYPES: &str = "presenceOnlyTypes";
}

/// Callback types compared by presence only unless configured otherwise.
const DEFAULT_PRESENCE_ONLY_TYPES: &[&str] = &[
    "android.view.View.OnClickListener",
    "android.view.View.OnLongClickListener",
    "android.widget.CompoundButton.OnCheckedChangeListener",
];

/// Invalid processor option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("option `{key}` expects true or false, got `{value}`")]
    InvalidFlag { key: String, value: String },

    #[error("option `{key}` expects an integer, got `{value}`")]
    InvalidNumber { key: String, value: String },

    #[error("option `{key}` cannot be empty")]
    Empty { key: String },
}

impl ConfigError {
    fn flag(key: &str, value: &str) -> Self {
        Self::InvalidFlag {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    fn number(key: &str, value: &str) -> Self {
        Self::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Naming conventions and policies for model generation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "interchange", serde(default, rename_all = "camelCase"))]
pub struct GeneratorConfig {
    /// Appended to the declaration's simple name to form the generated class.
    pub generated_suffix: String,
    /// Replaces the generated suffix to form the companion builder name.
    pub builder_suffix: String,
    /// Zero-argument method that restores defaults; never chainable.
    pub reset_method: String,
    /// Marker interface implemented by generated classes.
    pub capability: String,
    pub attribute_annotation: String,
    pub model_annotation: String,
    pub nullable_annotation: String,
    pub hash_multiplier: i32,
    /// Attribute types hashed by presence only.
    pub presence_only_types: Vec<String>,
    /// Types a bound-object candidate must extend when a super type has
    /// several type arguments.
    pub bound_type_markers: Vec<String>,
    /// Bound type when the hierarchy names none.
    pub default_bound_type: String,
    /// Warn when a fully hashed attribute type lacks equals/hashCode.
    pub require_hash_code: bool,
    /// Group attributes that share a field name but differ in type.
    pub group_overloads: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generated_suffix: GENERATED_CLASS_SUFFIX.to_string(),
            builder_suffix: BUILDER_SUFFIX.to_string(),
            reset_method: RESET_METHOD.to_string(),
            capability: GENERATED_MODEL_CAPABILITY.to_string(),
            attribute_annotation: ATTRIBUTE_ANNOTATION.to_string(),
            model_annotation: MODEL_ANNOTATION.to_string(),
            nullable_annotation: NULLABLE_ANNOTATION.to_string(),
            hash_multiplier: HASH_MULTIPLIER,
            presence_only_types: DEFAULT_PRESENCE_ONLY_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            bound_type_markers: vec!["android.view.View".to_string()],
            default_bound_type: DEFAULT_BOUND_TYPE.to_string(),
            require_hash_code: false,
            group_overloads: true,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from processor options. Unknown keys are ignored.
    pub fn from_options(raw: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for (key, value) in raw {
            let value = value.trim();
            match key.as_str() {
                options::REQUIRE_HASH_CODE => config.require_hash_code = parse_flag(key, value)?,
                options::GROUP_OVERLOADS => config.group_overloads = parse_flag(key, value)?,
                options::GENERATED_SUFFIX => {
                    config.generated_suffix = non_empty(key, value)?.to_string()
                }
                options::BUILDER_SUFFIX => config.builder_suffix = non_empty(key, value)?.to_string(),
                options::HASH_MULTIPLIER => {
                    config.hash_multiplier =
                        value.parse().map_err(|_| ConfigError::number(key, value))?
                }
                options::PRESENCE_ONLY_TYPES => {
                    config.presence_only_types.extend(
                        value
                            .split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(str::to_string),
                    );
                }
                _ => {}
            }
        }
        Ok(config)
    }

    pub fn with_generated_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.generated_suffix = suffix.into();
        self
    }

    pub fn with_builder_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.builder_suffix = suffix.into();
        self
    }

    pub fn with_require_hash_code(mut self, require: bool) -> Self {
        self.require_hash_code = require;
        self
    }

    pub fn with_presence_only_type(mut self, ty: impl Into<String>) -> Self {
        self.presence_only_types.push(ty.into());
        self
    }

    pub fn with_bound_type_marker(mut self, ty: impl Into<String>) -> Self {
        self.bound_type_markers.push(ty.into());
        self
    }

    pub fn with_group_overloads(mut self, enabled: bool) -> Self {
        self.group_overloads = enabled;
        self
    }

    /// `CardModel` becomes `CardModel_`.
    pub fn generated_name(&self, simple_name: &str) -> String {
        format!("{simple_name}{}", self.generated_suffix)
    }

    /// `CardModel_` becomes `CardModelBuilder`.
    pub fn builder_name(&self, generated_name: &str) -> String {
        let base = generated_name
            .strip_suffix(self.generated_suffix.as_str())
            .unwrap_or(generated_name);
        format!("{base}{}", self.builder_suffix)
    }

    pub fn is_presence_only_type(&self, qualified_name: &str) -> bool {
        self.presence_only_types
            .iter()
            .any(|t| crate::base::names_match(qualified_name, t))
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::flag(key, value)),
    }
}

fn non_empty<'a>(key: &str, value: &'a str) -> Result<&'a str, ConfigError> {
    if value.is_empty() {
        Err(ConfigError::Empty {
            key: key.to_string(),
        })
    } else {
        Ok(value)
    }
}
