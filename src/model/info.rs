//! The model aggregate: populated under a lock, then frozen.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::debug;

use super::attribute::{AttributeInfo, AttributeKey, HashPolicy};
use super::collector::{MethodCache, collect_constructors};
use super::error::ConfigurationError;
use super::group::AttributeGroup;
use super::hierarchy::{bound_object_type, is_super_also_generated};
use super::method::{ConstructorInfo, MethodInfo};
use super::registry::AttributeRegistry;
use crate::base::constants::STYLE_ATTRIBUTE;
use crate::base::{TypeName, simple_name_of};
use crate::config::GeneratorConfig;
use crate::decl::{Declaration, DeclarationSource};

/// Layout parameters a programmatic view applies to itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AutoLayout {
    #[default]
    None,
    WrapWidthWrapHeight,
    WrapWidthMatchHeight,
    MatchWidthWrapHeight,
    MatchWidthMatchHeight,
}

impl AutoLayout {
    /// Parse `MATCH_WIDTH_WRAP_HEIGHT`, optionally qualified
    /// (`Size.MATCH_WIDTH_WRAP_HEIGHT`).
    pub fn parse(value: &str) -> Option<Self> {
        match simple_name_of(value.trim()) {
            "NONE" => Some(AutoLayout::None),
            "WRAP_WIDTH_WRAP_HEIGHT" => Some(AutoLayout::WrapWidthWrapHeight),
            "WRAP_WIDTH_MATCH_HEIGHT" => Some(AutoLayout::WrapWidthMatchHeight),
            "MATCH_WIDTH_WRAP_HEIGHT" => Some(AutoLayout::MatchWidthWrapHeight),
            "MATCH_WIDTH_MATCH_HEIGHT" => Some(AutoLayout::MatchWidthMatchHeight),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AutoLayout::None => "NONE",
            AutoLayout::WrapWidthWrapHeight => "WRAP_WIDTH_WRAP_HEIGHT",
            AutoLayout::WrapWidthMatchHeight => "WRAP_WIDTH_MATCH_HEIGHT",
            AutoLayout::MatchWidthWrapHeight => "MATCH_WIDTH_WRAP_HEIGHT",
            AutoLayout::MatchWidthMatchHeight => "MATCH_WIDTH_MATCH_HEIGHT",
        }
    }
}

/// Link to a generated style builder; its declaration becomes an
/// originating element of the generated class, and the style itself a
/// nullable attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleLinkage {
    pub style_builder: TypeName,
}

impl StyleLinkage {
    pub fn new(style_builder: TypeName) -> Self {
        Self { style_builder }
    }

    /// The attribute holding the applied style.
    pub fn attribute(&self) -> AttributeInfo {
        AttributeInfo::new(STYLE_ATTRIBUTE, self.style_builder.clone())
            .nullable()
            .with_hash_policy(HashPolicy::Full)
    }
}

/// Facts fixed when the model is created.
#[derive(Clone, Debug, PartialEq, Eq)]
struct ModelHeader {
    origin: Arc<str>,
    super_type: TypeName,
    generated_type: TypeName,
    bound_object_type: TypeName,
    should_generate: bool,
    super_also_generated: bool,
    constructors: Vec<ConstructorInfo>,
}

#[derive(Debug, Default)]
struct ModelState {
    registry: AttributeRegistry,
    groups: IndexMap<Arc<str>, AttributeGroup>,
    style: Option<StyleLinkage>,
    auto_layout: AutoLayout,
}

/// A model under construction.
///
/// All mutation goes through `&self` methods that take the internal lock,
/// so the aggregate can be shared while attributes are contributed.
/// [`GeneratedModelInfo::freeze`] consumes it and yields the read-only
/// [`GeneratedModel`].
#[derive(Debug)]
pub struct GeneratedModelInfo {
    header: ModelHeader,
    state: Mutex<ModelState>,
}

impl GeneratedModelInfo {
    pub fn new<S>(
        source: &S,
        decl: &dyn Declaration,
        config: &GeneratorConfig,
    ) -> Result<Self, ConfigurationError>
    where
        S: DeclarationSource + ?Sized,
    {
        Self::with_cache(source, decl, config, &MethodCache::new())
    }

    /// Like [`GeneratedModelInfo::new`], reusing chainable methods already
    /// collected for shared super classes.
    pub fn with_cache<S>(
        source: &S,
        decl: &dyn Declaration,
        config: &GeneratorConfig,
        cache: &MethodCache,
    ) -> Result<Self, ConfigurationError>
    where
        S: DeclarationSource + ?Sized,
    {
        if decl.modifiers().is_final() {
            return Err(ConfigurationError::FinalDeclaration {
                declaration: Arc::from(decl.qualified_name()),
            });
        }

        let generated_simple = config.generated_name(decl.simple_name());
        let generated_type = match decl.package() {
            "" => TypeName::new(generated_simple),
            package => TypeName::new(format!("{package}.{generated_simple}")),
        };
        let bound = bound_object_type(source, decl, config)
            .unwrap_or_else(|| TypeName::new(config.default_bound_type.as_str()));

        let header = ModelHeader {
            origin: Arc::from(decl.qualified_name()),
            super_type: decl.as_type(),
            generated_type,
            bound_object_type: bound,
            should_generate: !decl.modifiers().is_abstract(),
            super_also_generated: is_super_also_generated(source, decl, config),
            constructors: collect_constructors(decl),
        };

        let methods = cache.chainable_methods(source, decl, config);
        debug!(
            declaration = %header.origin,
            generated = %header.generated_type,
            bound = %header.bound_object_type,
            methods = methods.len(),
            constructors = header.constructors.len(),
            "model created"
        );

        Ok(Self {
            header,
            state: Mutex::new(ModelState {
                registry: AttributeRegistry::with_methods(methods.iter().cloned()),
                ..ModelState::default()
            }),
        })
    }

    pub fn origin(&self) -> &str {
        &self.header.origin
    }

    pub fn generated_type(&self) -> &TypeName {
        &self.header.generated_type
    }

    pub fn should_generate(&self) -> bool {
        self.header.should_generate
    }

    pub fn add_attribute(&self, attribute: AttributeInfo) -> Result<(), ConfigurationError> {
        self.state.lock().registry.add_attribute(attribute)
    }

    pub fn add_attributes<I>(&self, attributes: I) -> Result<(), ConfigurationError>
    where
        I: IntoIterator<Item = AttributeInfo>,
    {
        self.state.lock().registry.add_attributes(attributes)
    }

    pub fn add_attribute_if_not_exists(
        &self,
        attribute: AttributeInfo,
    ) -> Result<bool, ConfigurationError> {
        self.state.lock().registry.add_attribute_if_not_exists(attribute)
    }

    /// Group registered attributes under `name`, resolving the group's
    /// default. A group with the same name is replaced.
    pub fn add_attribute_group(
        &self,
        name: &str,
        members: &[AttributeKey],
    ) -> Result<(), ConfigurationError> {
        let name: Arc<str> = Arc::from(name);
        let mut state = self.state.lock();

        let mut infos = Vec::with_capacity(members.len());
        for key in members {
            let info = state.registry.get(key).ok_or_else(|| {
                ConfigurationError::UnknownGroupMember {
                    group: name.clone(),
                    attribute: key.to_string(),
                }
            })?;
            if let Some(other) = info.group().filter(|g| *g != name.as_ref()) {
                return Err(ConfigurationError::unsupported(
                    key.to_string(),
                    format!("already belongs to group `{other}`"),
                ));
            }
            infos.push(info);
        }
        let group = AttributeGroup::resolve(name.clone(), infos)?;

        if let Some(previous) = state.groups.get(&name).cloned() {
            for key in previous.members() {
                if let Some(info) = state.registry.get_mut(key) {
                    info.set_group(None);
                }
            }
        }
        for key in group.members() {
            if let Some(info) = state.registry.get_mut(key) {
                info.set_group(Some(name.clone()));
            }
        }
        debug!(
            declaration = %self.header.origin,
            group = %name,
            members = group.members().len(),
            required = group.is_required(),
            "attribute group resolved"
        );
        state.groups.insert(name, group);
        Ok(())
    }

    /// Link a style builder and register its style attribute.
    pub fn set_style_linkage(&self, style: StyleLinkage) -> Result<(), ConfigurationError> {
        let attribute = style
            .attribute()
            .declared_in(self.header.generated_type.package())
            .with_origin(Arc::clone(&self.header.origin));
        let mut state = self.state.lock();
        state.registry.add_attribute(attribute)?;
        state.style = Some(style);
        Ok(())
    }

    pub fn set_auto_layout(&self, layout: AutoLayout) {
        self.state.lock().auto_layout = layout;
    }

    /// Copy of the attributes registered so far, in order.
    pub fn attributes_snapshot(&self) -> Vec<AttributeInfo> {
        self.state.lock().registry.attributes().cloned().collect()
    }

    pub fn freeze(self) -> GeneratedModel {
        let state = self.state.into_inner();
        GeneratedModel {
            header: self.header,
            registry: state.registry,
            groups: state.groups,
            style: state.style,
            auto_layout: state.auto_layout,
        }
    }
}

/// A finished model. Read-only.
#[derive(Clone, Debug)]
pub struct GeneratedModel {
    header: ModelHeader,
    registry: AttributeRegistry,
    groups: IndexMap<Arc<str>, AttributeGroup>,
    style: Option<StyleLinkage>,
    auto_layout: AutoLayout,
}

impl GeneratedModel {
    /// Qualified name of the declaration the model was built from.
    pub fn origin(&self) -> &str {
        &self.header.origin
    }

    /// The declaration the generated class extends.
    pub fn super_type(&self) -> &TypeName {
        &self.header.super_type
    }

    pub fn generated_type(&self) -> &TypeName {
        &self.header.generated_type
    }

    pub fn generated_name(&self) -> &str {
        self.header.generated_type.simple_name()
    }

    pub fn bound_object_type(&self) -> &TypeName {
        &self.header.bound_object_type
    }

    /// False for abstract declarations: the model is built so subclasses can
    /// inherit its attributes, but no class is emitted.
    pub fn should_generate(&self) -> bool {
        self.header.should_generate
    }

    pub fn is_super_class_also_generated(&self) -> bool {
        self.header.super_also_generated
    }

    pub fn attributes(&self) -> impl Iterator<Item = &AttributeInfo> {
        self.registry.attributes()
    }

    pub fn attribute(&self, key: &AttributeKey) -> Option<&AttributeInfo> {
        self.registry.get(key)
    }

    pub fn attribute_count(&self) -> usize {
        self.registry.len()
    }

    /// Inherited methods the generated class overrides to return itself.
    pub fn chainable_methods(&self) -> impl Iterator<Item = &MethodInfo> {
        self.registry.methods()
    }

    pub fn constructors(&self) -> &[ConstructorInfo] {
        &self.header.constructors
    }

    pub fn groups(&self) -> impl Iterator<Item = &AttributeGroup> {
        self.groups.values()
    }

    pub fn group(&self, name: &str) -> Option<&AttributeGroup> {
        self.groups.get(name)
    }

    pub fn group_of(&self, key: &AttributeKey) -> Option<&AttributeGroup> {
        self.attribute(key)
            .and_then(|a| a.group())
            .and_then(|name| self.groups.get(name))
    }

    pub fn group_members(&self, name: &str) -> Vec<&AttributeInfo> {
        self.group(name)
            .map(|g| g.members().iter().filter_map(|k| self.registry.get(k)).collect())
            .unwrap_or_default()
    }

    pub fn style_linkage(&self) -> Option<&StyleLinkage> {
        self.style.as_ref()
    }

    pub fn auto_layout(&self) -> AutoLayout {
        self.auto_layout
    }

    pub fn has_empty_constructor(&self) -> bool {
        let constructors = self.constructors();
        constructors.is_empty() || constructors.iter().any(ConstructorInfo::is_empty)
    }

    /// Views built in code rather than inflated from a layout resource.
    pub fn is_programmatic_view(&self) -> bool {
        self.style.is_some() || self.auto_layout != AutoLayout::None
    }

    /// Declarations besides the origin whose changes require regeneration.
    pub fn originating_elements(&self) -> Vec<&TypeName> {
        self.style.iter().map(|s| &s.style_builder).collect()
    }
}
