//! Config file generation.
//!
//! Renders a schema (or a live store) back into the text format accepted by
//! the parser, with each option's documentation as a comment above it.

use std::io::Write;

use crate::config::kind::ConfigValue;
use crate::config::schema::{OptionEntry, Schema};
use crate::config::store::ConfigStore;

/// Generate a config file holding every user-configurable default.
///
/// Internal options are omitted, and so are sections that have nothing a
/// user could set.
pub fn render_defaults(schema: &Schema) -> String {
    let mut out = header();
    render(&mut out, schema, false, |entry| &entry.default);
    // Defaults are declared as `&'static str`, so this is lossless.
    String::from_utf8_lossy(&out).into_owned()
}

/// Render the current values of a store.
///
/// With `include_internal`, internal options are listed as comments so the
/// output still parses cleanly. `string` values are written byte for byte,
/// so the result is not necessarily UTF-8.
pub fn render_store(store: &ConfigStore, include_internal: bool) -> Vec<u8> {
    let schema = store.schema();
    let mut out = header();
    render(&mut out, schema, include_internal, |entry| {
        let id = schema.id(entry.path.section, entry.path.option);
        id.map_or(&entry.default, |id| store.value(id))
    });
    out
}

fn header() -> Vec<u8> {
    let mut out = Vec::new();
    writeln!(out, "# manview configuration file (v{})", env!("CARGO_PKG_VERSION")).ok();
    writeln!(out, "# Lines starting with '#' or ';' are comments.").ok();
    out
}

fn render<'a>(
    out: &mut Vec<u8>,
    schema: &'a Schema,
    include_internal: bool,
    value_of: impl Fn(&'a OptionEntry) -> &'a ConfigValue,
) {
    for section in schema.sections() {
        let shown: Vec<&OptionEntry> = section
            .options()
            .iter()
            .filter(|entry| include_internal || entry.spec.user_configurable)
            .collect();
        if shown.is_empty() {
            continue;
        }

        writeln!(out, "\n[{}]", section.name).ok();
        for entry in shown {
            if let Some(doc) = entry.spec.doc {
                writeln!(out, "# {doc}").ok();
            }
            let marker = if entry.spec.user_configurable { "" } else { "# (internal) " };
            let value = value_of(entry).render_bytes();
            if value.is_empty() {
                writeln!(out, "{marker}{} =", entry.path.option).ok();
            } else {
                write!(out, "{marker}{} = ", entry.path.option).ok();
                out.extend_from_slice(&value);
                out.push(b'\n');
            }
        }
    }
}

// ============================================================================
// tests
// ============================================================================
