//! Ordered attribute storage with setter-shadowing.

use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use super::attribute::{AttributeInfo, AttributeKey};
use super::error::ConfigurationError;
use super::method::MethodInfo;

/// Attributes keyed by `(name, type)` in registration order, together with
/// the chainable methods they may shadow.
///
/// Every insertion path prunes methods shadowed by the incoming attribute,
/// so an attribute setter and an inherited override with the same signature
/// can never coexist.
#[derive(Clone, Debug, Default)]
pub struct AttributeRegistry {
    attributes: IndexMap<AttributeKey, AttributeInfo>,
    methods: IndexSet<MethodInfo>,
}

impl AttributeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_methods(methods: impl IntoIterator<Item = MethodInfo>) -> Self {
        Self {
            attributes: IndexMap::new(),
            methods: methods.into_iter().collect(),
        }
    }

    pub fn add_attribute(&mut self, attribute: AttributeInfo) -> Result<(), ConfigurationError> {
        self.add_attributes([attribute])
    }

    /// Register a batch. Re-adding an existing key replaces it in place.
    ///
    /// The whole batch is validated first; on error nothing is changed.
    pub fn add_attributes<I>(&mut self, attributes: I) -> Result<(), ConfigurationError>
    where
        I: IntoIterator<Item = AttributeInfo>,
    {
        let batch: Vec<AttributeInfo> = attributes.into_iter().collect();
        for attribute in &batch {
            attribute.validate()?;
        }
        for attribute in batch {
            self.insert(attribute);
        }
        Ok(())
    }

    /// Register unless the key is already present. Returns whether it was added.
    pub fn add_attribute_if_not_exists(
        &mut self,
        attribute: AttributeInfo,
    ) -> Result<bool, ConfigurationError> {
        if self.attributes.contains_key(attribute.key()) {
            return Ok(false);
        }
        attribute.validate()?;
        self.insert(attribute);
        Ok(true)
    }

    fn insert(&mut self, mut attribute: AttributeInfo) {
        if let Some(existing) = self.attributes.get(attribute.key()) {
            attribute.set_group(existing.group().map(Into::into));
        }
        self.methods.retain(|method| {
            let shadowed = method.is_shadowed_by(&attribute);
            if shadowed {
                trace!(method = %method, attribute = %attribute, "chainable method shadowed by attribute setter");
            }
            !shadowed
        });
        // `IndexMap::insert` keeps the original position of an existing key.
        self.attributes.insert(attribute.key().clone(), attribute);
    }

    pub fn get(&self, key: &AttributeKey) -> Option<&AttributeInfo> {
        self.attributes.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &AttributeKey) -> Option<&mut AttributeInfo> {
        self.attributes.get_mut(key)
    }

    pub fn contains(&self, key: &AttributeKey) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn attributes(&self) -> impl Iterator<Item = &AttributeInfo> {
        self.attributes.values()
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodInfo> {
        self.methods.iter()
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }
}
