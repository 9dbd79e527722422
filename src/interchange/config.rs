//! Loading [`GeneratorConfig`] from JSON.

use std::path::Path;

use super::error::InterchangeError;
use crate::config::GeneratorConfig;

/// Parse a configuration. Missing keys keep their defaults.
pub fn config_from_json(input: &str) -> Result<GeneratorConfig, InterchangeError> {
    let config: GeneratorConfig = serde_json::from_str(input)?;
    if config.generated_suffix.is_empty() {
        return Err(InterchangeError::invalid_config("generatedSuffix cannot be empty"));
    }
    if config.builder_suffix.is_empty() {
        return Err(InterchangeError::invalid_config("builderSuffix cannot be empty"));
    }
    Ok(config)
}

pub fn load_config(path: impl AsRef<Path>) -> Result<GeneratorConfig, InterchangeError> {
    let text = std::fs::read_to_string(path)?;
    config_from_json(&text)
}
