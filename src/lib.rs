//! Typed configuration registry and validation engine for the `manview`
//! terminal pager.
//!
//! ```ignore
//! use manview_config::config::{self, schema};
//!
//! let loaded = config::load(&schema::builtin(), Some(path));
//! loaded.diagnostics.print_warnings();
//! let store = config::init_store(loaded.store);
//! let margin = store.int("layout", "lmargin");
//! ```

pub mod config;
pub mod logger;
