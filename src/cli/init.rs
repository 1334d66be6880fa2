//! `init` command: starter config file generation.

use anyhow::{Context, Result, bail};
use manview_config::config::{default_locations, find_config_file, render_defaults, schema};
use manview_config::log;
use std::{fs, path::Path};

/// Write the starter config to `path` (or the per-user default location).
///
/// If `dry_run` is true, only prints the file to stdout.
pub fn init_config(path: Option<&Path>, dry_run: bool, force: bool) -> Result<()> {
    let content = render_defaults(&schema::builtin());
    if dry_run {
        print!("{content}");
        return Ok(());
    }

    let target = match path {
        Some(path) => find_config_file(Some(path)),
        None => default_locations().into_iter().next(),
    }
    .context("No location to write the config file to")?;

    write_config(&target, &content, force)?;
    log!("init"; "wrote {}", target.display());
    Ok(())
}

/// Write `content` to `path`, creating parent directories.
fn write_config(path: &Path, content: &str, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("'{}' already exists (use --force to overwrite)", path.display());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/manview.conf");
        init_config(Some(path.as_path()), false, false).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[layout]"));
        assert!(content.contains("[keys]"));
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("manview.conf");
        fs::write(&path, "layout.lmargin = 3\n").unwrap();

        assert!(write_config(&path, "new", false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "layout.lmargin = 3\n");

        write_config(&path, "new", true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }
}
