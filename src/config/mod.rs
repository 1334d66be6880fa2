//! Configuration registry for the `manview` pager.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── kind/          # Value kinds, coercion and typed values
//! ├── schema/        # Compiled schema and the built-in option table
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostic(s)
//! │   ├── field      # OptionPath
//! │   └── handle     # Global store handle
//! ├── parse          # Raw config file parser
//! ├── validate       # Validation, merging and key resolution
//! ├── store          # ConfigStore
//! ├── materialize    # Starter file and dump rendering
//! ├── util           # Config file discovery
//! └── mod.rs         # Loading pipeline (this file)
//! ```
//!
//! # Pipeline
//!
//! `schema::builtin()` → [`parse::parse`] → [`validate::validate`] →
//! [`ConfigStore`]. User mistakes never abort the pipeline: they are
//! collected as [`ConfigDiagnostics`] and the affected options keep their
//! defaults.

pub mod kind;
pub mod materialize;
pub mod parse;
pub mod schema;
pub mod store;
pub mod types;
mod util;
pub mod validate;


use std::fs;
use std::path::Path;
use std::sync::Arc;

pub use kind::{Colour, ConfigValue, Kind, KeyCode, PaletteColour, Trit, ValueError};
pub use materialize::{render_defaults, render_store};
pub use schema::{OptionId, OptionSpec, Schema, SchemaBuilder, SchemaError};
pub use store::ConfigStore;
pub use types::{
    ConfigDiagnostic, ConfigDiagnostics, ConfigError, OptionPath, init_store, store,
    update_internal,
};
pub use util::{default_locations, find_config_file};

use crate::log;

/// Result of loading a config file: always a complete store.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub store: ConfigStore,
    pub diagnostics: ConfigDiagnostics,
}

impl Loaded {
    /// The store, or every diagnostic as an error.
    pub fn into_strict(self) -> Result<ConfigStore, ConfigError> {
        match self.diagnostics.into_result() {
            Ok(()) => Ok(self.store),
            Err(diagnostics) => Err(ConfigError::Diagnostics(diagnostics)),
        }
    }
}

/// Parse and validate config text against `schema`.
pub fn load_bytes(schema: &Arc<Schema>, input: &[u8]) -> Loaded {
    let raw = parse::parse(input);
    let mut diagnostics = raw.diagnostics;
    let store = validate::validate(schema, &raw.records, &mut diagnostics);
    Loaded { store, diagnostics }
}

/// Read the config file at `path`.
pub fn read_config(path: &Path) -> Result<Vec<u8>, ConfigError> {
    fs::read(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))
}

/// Load the config file at `path`, or only defaults when there is none.
///
/// An unreadable file is reported as a diagnostic without a line number and
/// the store holds defaults.
pub fn load(schema: &Arc<Schema>, path: Option<&Path>) -> Loaded {
    let Some(path) = path else {
        return load_bytes(schema, b"");
    };
    match read_config(path) {
        Ok(bytes) => load_bytes(schema, &bytes),
        Err(err) => {
            log!("warning"; "{}, using defaults", io_message(&err));
            let mut diagnostics = ConfigDiagnostics::new();
            diagnostics.push(ConfigDiagnostic::new(None, io_message(&err)));
            Loaded {
                store: ConfigStore::defaults(Arc::clone(schema)),
                diagnostics,
            }
        }
    }
}

fn io_message(err: &ConfigError) -> String {
    match err {
        ConfigError::Io(path, source) => format!("cannot read `{}`: {source}", path.display()),
        other => other.to_string(),
    }
}
