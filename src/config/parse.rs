//! Raw config file parser.
//!
//! Turns the config file's bytes into `(section, option, value)` records.
//! The parser knows nothing about kinds; values are kept as raw bytes.
//!
//! ```text
//! # comment            ; also a comment
//! [layout]
//! lmargin = 4
//! colours.text = white, black, false
//! chars.trans_prompt_help = " "
//! ```

use regex::bytes::Regex;
use std::sync::LazyLock;

use crate::config::types::{ConfigDiagnostic, ConfigDiagnostics};

static RE_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[[ \t]*([A-Za-z][A-Za-z0-9_]*)[ \t]*\]$").unwrap());

static RE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9_]*)(?:\.([A-Za-z][A-Za-z0-9_]*))?$").unwrap()
});

const BOM: &[u8] = b"\xef\xbb\xbf";

/// One `option = value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line number.
    pub line: usize,
    pub section: String,
    pub option: String,
    /// The value with surrounding whitespace and quotes removed.
    pub value: Vec<u8>,
}

/// Parser output: records in file order plus syntax diagnostics.
#[derive(Debug, Clone, Default)]
pub struct RawConfig {
    pub records: Vec<RawRecord>,
    pub diagnostics: ConfigDiagnostics,
}

/// Parse a config file. Malformed lines are reported and skipped.
pub fn parse(input: &[u8]) -> RawConfig {
    let input = input.strip_prefix(BOM).unwrap_or(input);
    let mut out = RawConfig::default();
    let mut current: Option<String> = None;

    for (idx, line) in input.split(|&b| b == b'\n').enumerate() {
        let line_no = idx + 1;
        let line = line.strip_suffix(b"\r").unwrap_or(line).trim_ascii();

        match line.first() {
            None | Some(b'#' | b';') => continue,
            Some(b'[') => {
                current = RE_SECTION.captures(line).map(|caps| lossy(&caps[1]));
                if current.is_none() {
                    out.diagnostics.push(ConfigDiagnostic::new(
                        Some(line_no),
                        format!("malformed section header `{}`", lossy(line)),
                    ));
                }
                continue;
            }
            Some(_) => {}
        }

        match parse_assignment(line, current.as_deref()) {
            Ok((section, option, value)) => out.records.push(RawRecord {
                line: line_no,
                section,
                option,
                value,
            }),
            Err(message) => {
                let mut diagnostic = ConfigDiagnostic::new(Some(line_no), message);
                if let Some(section) = &current {
                    diagnostic = diagnostic.at(section.as_str(), None);
                }
                out.diagnostics.push(diagnostic);
            }
        }
    }

    out
}

/// Split `name = value` into its section, option and unquoted value.
fn parse_assignment(
    line: &[u8],
    current: Option<&str>,
) -> Result<(String, String, Vec<u8>), String> {
    let Some(eq) = line.iter().position(|&b| b == b'=') else {
        return Err(format!(
            "expected `option = value` or `[section]`, found `{}`",
            lossy(line)
        ));
    };

    let name = line[..eq].trim_ascii();
    let caps = RE_NAME
        .captures(name)
        .ok_or_else(|| format!("malformed option name `{}`", lossy(name)))?;
    let (section, option) = match (caps.get(1), caps.get(2), current) {
        (Some(section), Some(option), _) => (lossy(section.as_bytes()), lossy(option.as_bytes())),
        (Some(option), None, Some(current)) => (current.to_string(), lossy(option.as_bytes())),
        _ => {
            return Err(format!(
                "option `{}` is not inside a section (use `[section]` or `section.option`)",
                lossy(name)
            ));
        }
    };

    let value = unquote(line[eq + 1..].trim_ascii())?;
    Ok((section, option, value.to_vec()))
}

/// Strip one pair of surrounding double quotes.
fn unquote(value: &[u8]) -> Result<&[u8], String> {
    if value.first() != Some(&b'"') {
        return Ok(value);
    }
    if value.len() < 2 || !value.ends_with(b"\"") || value.ends_with(b"\\\"") {
        return Err("non-terminated quote".to_string());
    }
    Ok(&value[1..value.len() - 1])
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

// ============================================================================
// tests
// ============================================================================
