//! Configuration error types.

use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::kind::ValueError;

// ============================================================================
// ConfigError
// ============================================================================

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("no option `{0}` exists")]
    UnknownOption(String),

    #[error("option `{0}` is user-configurable and cannot be updated at runtime")]
    NotInternal(String),

    #[error("invalid value for `{path}`: {source}")]
    Invalid {
        path: String,
        #[source]
        source: ValueError,
    },

    // NOTE: No #[from] here - we don't want source() which causes duplicate output
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

// ============================================================================
// ConfigDiagnostic
// ============================================================================

/// A single problem found in the user's config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDiagnostic {
    /// 1-based line number, `None` for whole-file problems.
    pub line: Option<usize>,
    pub section: Option<String>,
    pub option: Option<String>,
    pub message: String,
    /// Fix hint (optional)
    pub hint: Option<String>,
}

impl ConfigDiagnostic {
    pub fn new(line: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            line,
            section: None,
            option: None,
            message: message.into(),
            hint: None,
        }
    }

    pub fn at(mut self, section: impl Into<String>, option: Option<&str>) -> Self {
        self.section = Some(section.into());
        self.option = option.map(str::to_string);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// `section.option`, `section` or nothing, depending on what is known.
    pub fn path(&self) -> Option<String> {
        match (&self.section, &self.option) {
            (Some(section), Some(option)) => Some(format!("{section}.{option}")),
            (Some(section), None) => Some(section.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Location in dimmed brackets, path in cyan
        let line = match self.line {
            Some(line) => format!("line {line}"),
            None => "file".to_string(),
        };
        write!(f, "{}{}{}", "[".dimmed(), line.dimmed(), "]".dimmed())?;
        if let Some(path) = self.path() {
            write!(f, " {}", path.cyan())?;
        }
        writeln!(f)?;
        write!(f, "{} {}", "→".red(), self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  {} {}", "hint:".yellow(), hint)?;
        }
        Ok(())
    }
}

// ============================================================================
// ConfigDiagnostics
// ============================================================================

/// Diagnostics collected while parsing and validating one config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDiagnostics {
    errors: Vec<ConfigDiagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: ConfigDiagnostic) {
        self.errors.push(diagnostic);
    }

    /// Record a problem tied to a line (and, when known, an option).
    pub fn error(
        &mut self,
        line: usize,
        section: &str,
        option: Option<&str>,
        message: impl Into<String>,
    ) {
        self.push(ConfigDiagnostic::new(Some(line), message).at(section, option));
    }

    /// Add an error with a hint.
    pub fn error_with_hint(
        &mut self,
        line: usize,
        section: &str,
        option: Option<&str>,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.push(
            ConfigDiagnostic::new(Some(line), message)
                .at(section, option)
                .with_hint(hint),
        );
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ConfigDiagnostic] {
        &self.errors
    }

    /// Print every diagnostic as a startup warning.
    pub fn print_warnings(&self) {
        for diagnostic in &self.errors {
            let location = match (diagnostic.line, diagnostic.path()) {
                (Some(line), Some(path)) => format!("line {line} ({path})"),
                (Some(line), None) => format!("line {line}"),
                (None, Some(path)) => path,
                (None, None) => "config".to_string(),
            };
            crate::log!("warning"; "{}: {}", location, diagnostic.message);
        }
    }

    /// Convert to Result (returns Err if there are errors).
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", "config validation failed:".red().bold())?;
        for (i, err) in self.errors.iter().enumerate() {
            write!(f, "{err}")?;
            if i + 1 < self.errors.len() {
                writeln!(f, "\n")?;
            }
        }
        if self.errors.len() > 1 {
            write!(
                f,
                "\n\n{} {} {}",
                "found".dimmed(),
                self.errors.len().to_string().red().bold(),
                "errors".dimmed()
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("manview.conf"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = format!("{io_err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("manview.conf"));

        let invalid = ConfigError::Invalid {
            path: "layout.width".into(),
            source: ValueError::OutOfRange { value: 900, min: 0, max: 400 },
        };
        assert!(invalid.to_string().contains("allowed range: 0 to 400"));
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = ConfigDiagnostic::new(Some(3), "500 is out of range")
            .at("layout", Some("lmargin"))
            .with_hint("expected an integer between 0 and 200");
        let text = diag.to_string();
        assert!(text.contains("line 3"));
        assert!(text.contains("layout.lmargin"));
        assert!(text.contains("500 is out of range"));
        assert!(text.contains("expected an integer between 0 and 200"));
    }

    #[test]
    fn test_diagnostics_collect() {
        let mut diags = ConfigDiagnostics::new();
        assert!(diags.clone().into_result().is_ok());
        diags.error(1, "bogus", None, "unknown section `bogus`");
        diags.error_with_hint(2, "layout", Some("lmarg"), "unknown option", "did you mean `lmargin`?");
        assert_eq!(diags.len(), 2);
        assert_eq!(diags.errors()[0].path().as_deref(), Some("bogus"));
        assert_eq!(diags.errors()[1].path().as_deref(), Some("layout.lmarg"));
        assert!(diags.into_result().is_err());
    }
}
