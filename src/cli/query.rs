//! `get` and `dump` commands.

use anyhow::{Context, Result, bail};
use manview_config::config::{OptionPath, render_store};
use std::io::{Write, stdout};

use super::{Cli, common};

/// Print one option's effective value in config syntax.
pub fn get_option(cli: &Cli, option: &str) -> Result<()> {
    let (section, name) = OptionPath::split(option)
        .with_context(|| format!("expected `section.option`, found `{option}`"))?;
    let store = common::init_global(cli)?;
    if store.schema().lookup(section, name).is_none() {
        bail!("no config option `{option}`");
    }
    let mut value = store.get(section, name).render_bytes();
    value.push(b'\n');
    write_stdout(&value)
}

/// Print the effective configuration as a config file.
pub fn dump_config(cli: &Cli, all: bool) -> Result<()> {
    common::init_global(cli)?;
    let store = common::probe_terminal()?;
    write_stdout(&render_store(&store, all))
}

/// Write raw bytes to stdout.
fn write_stdout(bytes: &[u8]) -> Result<()> {
    let mut out = stdout().lock();
    out.write_all(bytes)
        .and_then(|()| out.flush())
        .context("Failed to write to stdout")
}
