//! Evaluation of the generated class's runtime contract.
//!
//! [`ModelInstance`] behaves the way an instance of the emitted class does:
//! setters clear group siblings, `reset()` restores defaults, and equality,
//! `hashCode()` and `toString()` follow each attribute's hash policy.

use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;

use super::surface::{ModelSurface, ResetValue};
use super::value::Value;
use crate::config::GeneratorConfig;
use crate::model::{AttributeKey, GeneratedModel, HashPolicy};

/// A value rejected by a generated setter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error("unknown attribute `{attribute}`")]
    UnknownAttribute { attribute: String },

    #[error("{attribute} cannot be null")]
    NullNotAllowed { attribute: String },

    #[error("attribute `{attribute}` of type `{expected}` cannot hold a {found} value")]
    TypeMismatch {
        attribute: String,
        expected: String,
        found: &'static str,
    },
}

/// What the super class contributes to `equals`, `hashCode` and `toString`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SuperState {
    pub hash: i32,
    pub text: String,
    /// Super-class fields that take part in `equals`.
    pub fields: Vec<Value>,
}

/// A live instance of a generated model.
#[derive(Clone, Debug)]
pub struct ModelInstance<'m> {
    model: &'m GeneratedModel,
    surface: ModelSurface,
    multiplier: i32,
    values: IndexMap<AttributeKey, Value>,
    super_state: SuperState,
}

impl<'m> ModelInstance<'m> {
    /// A new instance, already reset to its defaults.
    pub fn new(model: &'m GeneratedModel, config: &GeneratorConfig) -> Self {
        let mut instance = Self {
            model,
            surface: ModelSurface::plan(model, config),
            multiplier: config.hash_multiplier,
            values: IndexMap::new(),
            super_state: SuperState::default(),
        };
        instance.reset();
        instance
    }

    pub fn with_super_state(mut self, state: SuperState) -> Self {
        self.super_state = state;
        self
    }

    pub fn model(&self) -> &GeneratedModel {
        self.model
    }

    /// Call the setter for `key`. Group siblings are reset to absence.
    pub fn set(&mut self, key: &AttributeKey, value: Value) -> Result<&mut Self, ContractError> {
        let setter = self
            .surface
            .setter(key)
            .ok_or_else(|| ContractError::UnknownAttribute {
                attribute: key.to_string(),
            })?;
        if value.is_null() && setter.null_check {
            return Err(ContractError::NullNotAllowed {
                attribute: key.name.to_string(),
            });
        }
        if !value.fits(&key.ty) {
            return Err(ContractError::TypeMismatch {
                attribute: key.name.to_string(),
                expected: key.ty.to_string(),
                found: value.kind(),
            });
        }

        let clears = setter.clears.clone();
        for sibling in &clears {
            self.values
                .insert(sibling.clone(), Value::from_literal(sibling.ty.zero_value()));
        }
        self.values.insert(key.clone(), value);
        Ok(self)
    }

    /// Set by field name; the attribute must not be overloaded.
    pub fn set_named(&mut self, name: &str, value: Value) -> Result<&mut Self, ContractError> {
        let key = self.unique_key(name)?;
        self.set(&key, value)
    }

    pub fn get(&self, key: &AttributeKey) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_named(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(k, _)| k.name.as_ref() == name)
            .map(|(_, v)| v)
    }

    /// Restore every attribute to its default.
    pub fn reset(&mut self) -> &mut Self {
        for step in &self.surface.reset {
            let value = match &step.value {
                ResetValue::Code(code) => Value::from_literal(code),
                ResetValue::LanguageDefault => Value::Opaque("<language default>".into()),
            };
            self.values.insert(step.attribute.clone(), value);
        }
        self
    }

    /// The generated `hashCode()`.
    pub fn hash_code(&self) -> i32 {
        self.surface
            .equality
            .iter()
            .fold(self.super_state.hash, |h, step| {
                let value = self.values.get(&step.attribute).unwrap_or(&Value::Null);
                let contribution = match step.policy {
                    HashPolicy::Full => value.hash_code(&step.attribute.ty),
                    HashPolicy::PresenceOnly => i32::from(!value.is_null()),
                    HashPolicy::Excluded => 0,
                };
                h.wrapping_mul(self.multiplier).wrapping_add(contribution)
            })
    }

    fn unique_key(&self, name: &str) -> Result<AttributeKey, ContractError> {
        let mut matches = self.values.keys().filter(|k| k.name.as_ref() == name);
        match (matches.next(), matches.next()) {
            (Some(key), None) => Ok(key.clone()),
            _ => Err(ContractError::UnknownAttribute {
                attribute: name.to_string(),
            }),
        }
    }
}

/// The generated `equals()`: same generated class, equal super state, and
/// every compared attribute equal under its policy.
impl PartialEq for ModelInstance<'_> {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.model.generated_type() != other.model.generated_type()
            || self.super_state.fields != other.super_state.fields
        {
            return false;
        }
        self.surface.equality.iter().all(|step| {
            let a = self.values.get(&step.attribute).unwrap_or(&Value::Null);
            let b = other.values.get(&step.attribute).unwrap_or(&Value::Null);
            match step.policy {
                HashPolicy::Full => a == b,
                HashPolicy::PresenceOnly => a.is_null() == b.is_null(),
                HashPolicy::Excluded => true,
            }
        })
    }
}

/// The generated `toString()`: `Name_{a=1, b=x}` followed by the super
/// class's string.
impl fmt::Display for ModelInstance<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", self.model.generated_name())?;
        for (i, key) in self.surface.to_string.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let value = self.values.get(key).unwrap_or(&Value::Null);
            write!(f, "{}={}", key.name, value)?;
        }
        write!(f, "}}{}", self.super_state.text)
    }
}
