//! Type-safe option path.

use owo_colors::OwoColorize;
use std::fmt;

/// Address of a schema option: `section.option`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionPath {
    pub section: &'static str,
    pub option: &'static str,
}

impl OptionPath {
    #[inline]
    pub const fn new(section: &'static str, option: &'static str) -> Self {
        Self { section, option }
    }

    /// Split `section.option` into its parts.
    pub fn split(path: &str) -> Option<(&str, &str)> {
        path.split_once('.')
            .filter(|(section, option)| !section.is_empty() && !option.is_empty())
    }
}

impl fmt::Display for OptionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = format!("`{}.{}`", self.section, self.option);
        write!(f, "{}", path.bright_blue())
    }
}
