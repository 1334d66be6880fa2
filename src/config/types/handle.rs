//! Global config with atomic replacement.
//!
//! Uses `arc-swap` for lock-free reads. Readers hold an `Arc` snapshot and
//! never observe a half-applied update.

use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

use crate::config::kind::ConfigValue;
use crate::config::schema;
use crate::config::store::ConfigStore;
use crate::config::types::ConfigError;
use crate::debug;

/// Global config storage. Holds the built-in defaults until initialized.
pub static STORE: LazyLock<ArcSwap<ConfigStore>> =
    LazyLock::new(|| ArcSwap::from_pointee(ConfigStore::defaults(schema::builtin())));

#[inline]
pub fn store() -> Arc<ConfigStore> {
    STORE.load_full()
}

#[inline]
pub fn init_store(store: ConfigStore) -> Arc<ConfigStore> {
    let arc = Arc::new(store);
    STORE.store(Arc::clone(&arc));
    arc
}

/// Apply internal-only updates to the global store.
///
/// All updates are validated before anything changes; on error the global
/// store is left as it was. Returns the new snapshot.
pub fn update_internal(updates: &[(&str, &str, ConfigValue)]) -> Result<Arc<ConfigStore>, ConfigError> {
    let resolved = STORE.load().resolve_internal(updates)?;
    STORE.rcu(|current| current.with_resolved(&resolved));
    for (section, option, value) in updates {
        debug!("config"; "{section}.{option} = {}", value.render());
    }
    Ok(store())
}
