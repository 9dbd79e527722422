//! Batch processing of model declarations.
//!
//! [`ModelProcessor`] turns a list of target declarations into finished
//! models. Declarations are independent, so every phase runs in parallel
//! with rayon:
//!
//! ```text
//! create models + own attributes   (per target)
//!   ↓  snapshot own attributes
//! merge inherited attributes        (per target, reads snapshots only)
//!   ↓
//! explicit + overload groups, freeze
//!   ↓
//! hash-code validation              (optional, warnings only)
//! ```
//!
//! A [`ConfigurationError`] drops only the model it belongs to; it is
//! reported as a diagnostic and the rest of the batch continues.

mod hash_check;
mod inheritance;

use std::sync::Arc;

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::base::TypeName;
use crate::base::constants::args;
use crate::config::GeneratorConfig;
use crate::diagnostics::{Diagnostic, DiagnosticCollector};
use crate::model::{
    AttributeKey, AutoLayout, ConfigurationError, FieldAttribute, GeneratedModel,
    GeneratedModelInfo, MethodCache, StyleLinkage, declared_attributes,
};
use crate::decl::{Declaration, DeclarationSource};

pub use hash_check::implements_hash_code;

/// Models and diagnostics produced by one batch.
#[derive(Debug, Default)]
pub struct ProcessingOutput {
    /// Successfully built models, in target order.
    pub models: Vec<GeneratedModel>,
    pub diagnostics: DiagnosticCollector,
}

impl ProcessingOutput {
    /// Models a class is emitted for (abstract declarations are skipped).
    pub fn models_to_emit(&self) -> impl Iterator<Item = &GeneratedModel> {
        self.models.iter().filter(|m| m.should_generate())
    }

    /// The model built for the declaration named `origin`.
    pub fn model(&self, origin: &str) -> Option<&GeneratedModel> {
        self.models.iter().find(|m| m.origin() == origin)
    }
}

/// A model after the first phase, with the attributes its own fields declare.
struct Stage {
    info: GeneratedModelInfo,
    own: Vec<FieldAttribute>,
    warnings: Vec<Diagnostic>,
}

type StageResult = Result<Stage, (Arc<str>, ConfigurationError)>;

/// Builds models for a batch of declarations.
pub struct ModelProcessor<'s, S: DeclarationSource + ?Sized> {
    source: &'s S,
    config: GeneratorConfig,
    cache: MethodCache,
}

impl<'s, S: DeclarationSource + ?Sized> ModelProcessor<'s, S> {
    pub fn new(source: &'s S, config: GeneratorConfig) -> Self {
        Self {
            source,
            config,
            cache: MethodCache::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Build one model per target.
    pub fn process(&self, targets: &[TypeName]) -> ProcessingOutput {
        let mut diagnostics = DiagnosticCollector::new();

        let staged: Vec<StageResult> = targets.par_iter().map(|t| self.stage(t)).collect();

        let mut stages = Vec::with_capacity(staged.len());
        for result in staged {
            match result {
                Ok(stage) => stages.push(stage),
                Err((origin, error)) => {
                    debug!(declaration = %origin, %error, "model dropped");
                    diagnostics.configuration_error(&origin, &error);
                }
            }
        }

        // Later phases read other models' own attributes through this map only.
        let snapshots: IndexMap<Arc<str>, Vec<FieldAttribute>> = stages
            .iter()
            .map(|s| (Arc::from(s.info.origin()), s.own.clone()))
            .collect();

        let finished: Vec<Result<(GeneratedModel, Vec<Diagnostic>), (Arc<str>, ConfigurationError)>> =
            stages
                .into_par_iter()
                .map(|stage| self.finish(stage, &snapshots))
                .collect();

        let mut models = Vec::with_capacity(finished.len());
        for result in finished {
            match result {
                Ok((model, warnings)) => {
                    diagnostics.extend(warnings);
                    models.push(model);
                }
                Err((origin, error)) => {
                    debug!(declaration = %origin, %error, "model dropped");
                    diagnostics.configuration_error(&origin, &error);
                }
            }
        }

        if self.config.require_hash_code {
            for model in &models {
                hash_check::validate(self.source, model, &mut diagnostics);
            }
        }

        info!(
            targets = targets.len(),
            models = models.len(),
            errors = diagnostics.error_count(),
            warnings = diagnostics.warning_count(),
            "model batch processed"
        );
        ProcessingOutput {
            models,
            diagnostics,
        }
    }

    fn stage(&self, target: &TypeName) -> StageResult {
        let origin: Arc<str> = Arc::from(target.name());
        let decl = self.source.resolve(target).ok_or_else(|| {
            (
                origin.clone(),
                ConfigurationError::UnknownDeclaration {
                    declaration: target.to_string(),
                },
            )
        })?;
        self.stage_declaration(decl)
            .map_err(|error| (origin, error))
    }

    fn stage_declaration(&self, decl: &dyn Declaration) -> Result<Stage, ConfigurationError> {
        let info = GeneratedModelInfo::with_cache(self.source, decl, &self.config, &self.cache)?;
        let mut warnings = Vec::new();

        if let Some(annotation) = decl.annotation(&self.config.model_annotation) {
            if let Some(raw) = annotation.arg(args::AUTO_LAYOUT) {
                match AutoLayout::parse(raw) {
                    Some(layout) => info.set_auto_layout(layout),
                    None => {
                        let mut collector = DiagnosticCollector::new();
                        collector.invalid_model_argument(
                            decl.qualified_name(),
                            args::AUTO_LAYOUT,
                            raw,
                        );
                        warnings.extend(collector.take());
                    }
                }
            }
            if let Some(raw) = annotation.arg(args::STYLE) {
                let style = TypeName::parse(raw.trim())
                    .map_err(|e| ConfigurationError::invalid_type(raw, e))?;
                info.set_style_linkage(StyleLinkage::new(style))?;
            }
        }

        let own = declared_attributes(self.source, decl, &self.config)?;
        info.add_attributes(own.iter().map(|a| a.info.clone()))?;

        Ok(Stage {
            info,
            own,
            warnings,
        })
    }

    fn finish(
        &self,
        stage: Stage,
        snapshots: &IndexMap<Arc<str>, Vec<FieldAttribute>>,
    ) -> Result<(GeneratedModel, Vec<Diagnostic>), (Arc<str>, ConfigurationError)> {
        let Stage {
            info,
            own,
            warnings,
        } = stage;
        let origin: Arc<str> = Arc::from(info.origin());
        let fail = |error| (origin.clone(), error);

        let decl = self.source.lookup(&origin).ok_or_else(|| {
            fail(ConfigurationError::UnknownDeclaration {
                declaration: origin.to_string(),
            })
        })?;

        let inherited =
            inheritance::inherited_attributes(self.source, decl, &self.config, snapshots)
                .map_err(fail)?;
        for attribute in &inherited {
            info.add_attribute_if_not_exists(attribute.info.clone())
                .map_err(fail)?;
        }

        let mut explicit: IndexMap<Arc<str>, Vec<AttributeKey>> = IndexMap::new();
        for attribute in own.iter().chain(inherited.iter()) {
            if let Some(group) = &attribute.group {
                let keys = explicit.entry(group.clone()).or_default();
                if !keys.contains(attribute.info.key()) {
                    keys.push(attribute.info.key().clone());
                }
            }
        }
        for (name, keys) in &explicit {
            info.add_attribute_group(name, keys).map_err(fail)?;
        }

        if self.config.group_overloads {
            for (name, keys) in overload_groups(&info, &explicit) {
                info.add_attribute_group(&name, &keys).map_err(fail)?;
            }
        }

        let model = info.freeze();
        debug!(
            declaration = %origin,
            attributes = model.attribute_count(),
            groups = model.groups().count(),
            "model finished"
        );
        Ok((model, warnings))
    }
}

/// Attributes sharing a field name, outside any explicit group.
fn overload_groups(
    info: &GeneratedModelInfo,
    explicit: &IndexMap<Arc<str>, Vec<AttributeKey>>,
) -> Vec<(Arc<str>, Vec<AttributeKey>)> {
    let mut by_name: IndexMap<Arc<str>, Vec<AttributeKey>> = IndexMap::new();
    for attribute in info.attributes_snapshot() {
        if attribute.group().is_some() {
            continue;
        }
        by_name
            .entry(attribute.key().name.clone())
            .or_default()
            .push(attribute.key().clone());
    }
    by_name
        .into_iter()
        .filter(|(name, keys)| keys.len() > 1 && !explicit.contains_key(name))
        .collect()
}
