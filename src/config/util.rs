//! Config file discovery.

use std::path::{Path, PathBuf};

/// Per-user location, tried first.
const USER_CONFIG: &str = "~/.config/manview.conf";

/// System-wide location.
const SYSTEM_CONFIG: &str = "/etc/xdg/manview.conf";

/// Candidate config file locations in lookup order, with `~` expanded.
pub fn default_locations() -> Vec<PathBuf> {
    [USER_CONFIG, SYSTEM_CONFIG]
        .into_iter()
        .map(expand)
        .collect()
}

/// Resolve the config file to load.
///
/// An explicit path is returned as-is (after tilde expansion) even when it
/// does not exist, so that the loader can report it. Otherwise the first
/// existing default location wins; `None` means there is no config file.
pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(expand(&path.to_string_lossy()));
    }
    default_locations().into_iter().find(|path| path.is_file())
}

/// Expand a leading `~` to the home directory.
pub(crate) fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_locations_order() {
        let locations = default_locations();
        assert_eq!(locations.len(), 2);
        assert!(locations[0].ends_with(".config/manview.conf"));
        assert_eq!(locations[1], Path::new(SYSTEM_CONFIG));
    }

    #[test]
    fn test_explicit_path_kept_even_if_missing() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.conf");
        assert_eq!(find_config_file(Some(missing.as_path())), Some(missing));
    }

    #[test]
    fn test_expand_plain_path_unchanged() {
        assert_eq!(expand("/tmp/x.conf"), PathBuf::from("/tmp/x.conf"));
    }
}
