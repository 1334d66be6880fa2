//! Common utilities shared across CLI commands.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use manview_config::config::{
    self, ConfigStore, ConfigValue, Kind, Loaded, find_config_file, init_store, schema, store,
    update_internal,
};
use manview_config::{debug, debug_do};

use super::Cli;

/// Resolve and load the config file named on the command line (or found in
/// a default location).
pub fn load_config(cli: &Cli) -> (Option<PathBuf>, Loaded) {
    let path = find_config_file(cli.config.as_deref());
    match &path {
        Some(path) => debug!("config"; "loading {}", path.display()),
        None => debug!("config"; "no config file found, using defaults"),
    }
    let loaded = config::load(&schema::builtin(), path.as_deref());
    (path, loaded)
}

/// Load the config, report problems as warnings and install the result as
/// the global store.
pub fn init_global(cli: &Cli) -> Result<Arc<ConfigStore>> {
    let (path, loaded) = load_config(cli);
    loaded.diagnostics.print_warnings();

    debug_do! {
        let changed = loaded
            .store
            .iter()
            .filter(|(entry, value)| *value != &entry.default)
            .count();
        debug!("config"; "{} options differ from their defaults", changed);
    }

    init_store(loaded.store);

    if let Some(path) = path.filter(|path| path.is_file()) {
        let bytes = path.as_os_str().as_encoded_bytes().to_vec();
        update_internal(&[("misc", "config_path", ConfigValue::Str(Some(bytes)))])
            .context("Failed to record the config file path")?;
    }
    Ok(store())
}

/// Write the terminal size into `layout.width` and `layout.height`.
///
/// Without a terminal the defaults stay in place.
pub fn probe_terminal() -> Result<Arc<ConfigStore>> {
    let Ok((cols, rows)) = crossterm::terminal::size() else {
        debug!("config"; "terminal size unavailable, keeping defaults");
        return Ok(store());
    };

    let current = store();
    let width = clamp_to(&current, "layout", "width", cols);
    let height = clamp_to(&current, "layout", "height", rows);
    update_internal(&[
        ("layout", "width", ConfigValue::Int(width)),
        ("layout", "height", ConfigValue::Int(height)),
    ])
    .context("Failed to record the terminal size")
}

/// Clamp a probed dimension into the option's allowed range.
fn clamp_to(store: &ConfigStore, section: &str, option: &str, value: u16) -> i64 {
    let value = i64::from(value);
    match store.schema().lookup(section, option).map(|entry| entry.spec.kind) {
        Some(Kind::Int { min, max }) => value.clamp(min, max),
        _ => value,
    }
}
