//! Model interchange.
//!
//! Out-of-process emitters consume finished models as JSON snapshots, and
//! build setups keep generator configuration in JSON files.
//!
//! ```text
//! GeneratedModel ──► ModelSnapshot ──► snapshot JSON ──► emitter
//!
//! config JSON ──► GeneratorConfig ──► ModelProcessor
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use fluentgen::interchange::{load_config, to_json};
//!
//! let config = load_config("fluentgen.json")?;
//! let output = ModelProcessor::new(&declarations, config).process(&targets);
//! std::fs::write("models.json", to_json(output.models_to_emit())?)?;
//! ```

mod config;
mod error;
mod snapshot;

pub use config::{config_from_json, load_config};
pub use error::InterchangeError;
pub use snapshot::{
    AttributeSnapshot, DefaultSnapshot, GroupSnapshot, ModelSnapshot, SNAPSHOT_VERSION,
    SnapshotFile, from_json, to_json,
};
