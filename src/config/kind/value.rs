//! Typed configuration values and per-kind coercion.

use super::{Colour, KeyCode, Kind, MAX_KEYS};
use std::fmt;
use std::num::IntErrorKind;
use thiserror::Error;

// ============================================================================
// ValueError
// ============================================================================

/// Why a raw value could not be coerced into its option's kind.
///
/// The display text is used verbatim as the diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("expected `true` or `false`, found `{0}`")]
    Bool(String),

    #[error("expected `true`, `false` or `auto`, found `{0}`")]
    Trit(String),

    #[error("`{found}` is not an integer (allowed range: {min} to {max})")]
    NotInteger { found: String, min: i64, max: i64 },

    #[error("{value} is out of range (allowed range: {min} to {max})")]
    OutOfRange { value: i64, min: i64, max: i64 },

    #[error("`{found}` is out of range (allowed range: {min} to {max})")]
    Overflow { found: String, min: i64, max: i64 },

    #[error("value must not be empty")]
    Empty,

    #[error("value is not valid UTF-8")]
    Encoding,

    #[error("expected 3 colour fields (foreground, background, bold), found {0}")]
    ColourArity(usize),

    #[error("unknown colour `{0}`")]
    UnknownColour(String),

    #[error("unknown key `{0}`")]
    UnknownKey(String),

    #[error("key `{0}` is listed more than once")]
    RepeatedKey(KeyCode),

    #[error("too many keys ({0}), at most {MAX_KEYS} are allowed")]
    TooManyKeys(usize),

    #[error("a `{found}` value cannot be stored in a `{expected}` option")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

// ============================================================================
// Trit
// ============================================================================

/// A three-valued toggle.
///
/// `Auto` is never resolved here: whoever probes the terminal supplies the
/// effective value through [`Trit::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trit {
    True,
    False,
    Auto,
}

impl Trit {
    /// Effective value, asking `probe` only when the setting is `Auto`.
    pub fn resolve(self, probe: impl FnOnce() -> bool) -> bool {
        match self {
            Self::True => true,
            Self::False => false,
            Self::Auto => probe(),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::True => "true",
            Self::False => "false",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for Trit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ConfigValue
// ============================================================================

/// A validated option value. The variant always matches the option's [`Kind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Bool(bool),
    Trit(Trit),
    Int(i64),
    /// Raw bytes, passed through untouched.
    Str(Option<Vec<u8>>),
    /// Unicode text (glyphs, labels).
    WStr(Option<String>),
    Colour(Colour),
    /// Alternate keys for one action; the first is the canonical display form.
    Key(Vec<KeyCode>),
}

impl ConfigValue {
    /// Name of the kind this value belongs to.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Trit(_) => "trit",
            Self::Int(_) => "int",
            Self::Str(_) => "string",
            Self::WStr(_) => "wstring",
            Self::Colour(_) => "colour",
            Self::Key(_) => "key",
        }
    }

    /// Check that this value could have been produced by coercing into `kind`.
    pub fn check(&self, kind: &Kind) -> Result<(), ValueError> {
        let mismatch = || ValueError::KindMismatch {
            expected: kind.name(),
            found: self.kind_name(),
        };
        match (kind, self) {
            (Kind::Bool, Self::Bool(_))
            | (Kind::Trit, Self::Trit(_))
            | (Kind::Colour, Self::Colour(_)) => Ok(()),
            (Kind::Int { min, max }, Self::Int(value)) => check_range(*value, *min, *max),
            (Kind::Str { nullable }, Self::Str(value)) => {
                check_present(value.as_deref().map(<[u8]>::is_empty), *nullable)
            }
            (Kind::WStr { nullable }, Self::WStr(value)) => {
                check_present(value.as_deref().map(str::is_empty), *nullable)
            }
            (Kind::Key, Self::Key(codes)) => check_keys(codes),
            _ => Err(mismatch()),
        }
    }

    /// Render in the form the config parser accepts, byte for byte.
    ///
    /// `string` values are not necessarily UTF-8, so the result is raw bytes.
    pub fn render_bytes(&self) -> Vec<u8> {
        match self {
            Self::Str(None) | Self::WStr(None) => Vec::new(),
            Self::Str(Some(bytes)) => quote_if_needed(bytes),
            Self::WStr(Some(text)) => quote_if_needed(text.as_bytes()),
            Self::Key(codes) => codes
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
                .into_bytes(),
            Self::Bool(b) => b.to_string().into_bytes(),
            Self::Trit(t) => t.to_string().into_bytes(),
            Self::Int(n) => n.to_string().into_bytes(),
            Self::Colour(colour) => colour.to_string().into_bytes(),
        }
    }

    /// [`render_bytes`](Self::render_bytes) as text, for display. Bytes of a
    /// `string` value that are not UTF-8 are replaced.
    pub fn render(&self) -> String {
        String::from_utf8_lossy(&self.render_bytes()).into_owned()
    }
}

// ============================================================================
// coercion
// ============================================================================

impl Kind {
    /// Coerce an unquoted raw value into a typed value, enforcing constraints.
    pub fn coerce(&self, raw: &[u8]) -> Result<ConfigValue, ValueError> {
        match self {
            Self::Bool => parse_bool(text(raw)?.trim()).map(ConfigValue::Bool),
            Self::Trit => parse_trit(text(raw)?.trim()).map(ConfigValue::Trit),
            Self::Int { min, max } => parse_int(text(raw)?.trim(), *min, *max).map(ConfigValue::Int),
            Self::Str { nullable } => {
                if raw.is_empty() {
                    return absent(*nullable).map(|()| ConfigValue::Str(None));
                }
                Ok(ConfigValue::Str(Some(raw.to_vec())))
            }
            Self::WStr { nullable } => {
                let value = text(raw)?;
                if value.is_empty() {
                    return absent(*nullable).map(|()| ConfigValue::WStr(None));
                }
                Ok(ConfigValue::WStr(Some(value.to_string())))
            }
            Self::Colour => Colour::from_tokens(&tokenize(text(raw)?)).map(ConfigValue::Colour),
            Self::Key => parse_keys(&tokenize(text(raw)?)).map(ConfigValue::Key),
        }
    }
}

fn text(raw: &[u8]) -> Result<&str, ValueError> {
    std::str::from_utf8(raw).map_err(|_| ValueError::Encoding)
}

fn absent(nullable: bool) -> Result<(), ValueError> {
    if nullable { Ok(()) } else { Err(ValueError::Empty) }
}

/// Split a composite value into tokens separated by commas and/or whitespace.
pub fn tokenize(value: &str) -> Vec<&str> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect()
}

pub(super) fn parse_bool(token: &str) -> Result<bool, ValueError> {
    if token.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if token.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ValueError::Bool(token.to_string()))
    }
}

fn parse_trit(token: &str) -> Result<Trit, ValueError> {
    [Trit::True, Trit::False, Trit::Auto]
        .into_iter()
        .find(|t| t.as_str().eq_ignore_ascii_case(token))
        .ok_or_else(|| ValueError::Trit(token.to_string()))
}

fn parse_int(token: &str, min: i64, max: i64) -> Result<i64, ValueError> {
    let value = token.parse::<i64>().map_err(|e| {
        let found = token.to_string();
        match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                ValueError::Overflow { found, min, max }
            }
            _ => ValueError::NotInteger { found, min, max },
        }
    })?;
    check_range(value, min, max)?;
    Ok(value)
}

fn parse_keys(tokens: &[&str]) -> Result<Vec<KeyCode>, ValueError> {
    let codes = tokens
        .iter()
        .map(|token| KeyCode::parse(token))
        .collect::<Result<Vec<_>, _>>()?;
    check_keys(&codes)?;
    Ok(codes)
}

fn check_range(value: i64, min: i64, max: i64) -> Result<(), ValueError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValueError::OutOfRange { value, min, max })
    }
}

/// `empty` is `None` when the value is absent, `Some(is_empty)` otherwise.
fn check_present(empty: Option<bool>, nullable: bool) -> Result<(), ValueError> {
    match empty {
        None => absent(nullable),
        Some(true) => Err(ValueError::Empty),
        Some(false) => Ok(()),
    }
}

fn check_keys(codes: &[KeyCode]) -> Result<(), ValueError> {
    if codes.is_empty() {
        return Err(ValueError::Empty);
    }
    if codes.len() > MAX_KEYS {
        return Err(ValueError::TooManyKeys(codes.len()));
    }
    for (i, code) in codes.iter().enumerate() {
        if codes[..i].contains(code) {
            return Err(ValueError::RepeatedKey(*code));
        }
    }
    Ok(())
}

/// Quote a string value when the parser would otherwise alter it.
fn quote_if_needed(value: &[u8]) -> Vec<u8> {
    let needs_quotes = value.first() == Some(&b'"')
        || value.first().is_some_and(u8::is_ascii_whitespace)
        || value.last().is_some_and(u8::is_ascii_whitespace);
    if !needs_quotes {
        return value.to_vec();
    }
    let mut quoted = Vec::with_capacity(value.len() + 2);
    quoted.push(b'"');
    quoted.extend_from_slice(value);
    quoted.push(b'"');
    quoted
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::kind::PaletteColour;

    const MARGIN: Kind = Kind::Int { min: 0, max: 200 };

    #[test]
    fn test_bool() {
        assert_eq!(Kind::Bool.coerce(b"true"), Ok(ConfigValue::Bool(true)));
        assert_eq!(Kind::Bool.coerce(b"FALSE"), Ok(ConfigValue::Bool(false)));
        assert_eq!(Kind::Bool.coerce(b"yes"), Err(ValueError::Bool("yes".into())));
        assert_eq!(Kind::Bool.coerce(b"1"), Err(ValueError::Bool("1".into())));
    }

    #[test]
    fn test_trit() {
        assert_eq!(Kind::Trit.coerce(b"auto"), Ok(ConfigValue::Trit(Trit::Auto)));
        assert_eq!(Kind::Trit.coerce(b"True"), Ok(ConfigValue::Trit(Trit::True)));
        assert!(matches!(Kind::Trit.coerce(b"maybe"), Err(ValueError::Trit(_))));
    }

    #[test]
    fn test_trit_resolve_only_probes_auto() {
        assert!(Trit::True.resolve(|| unreachable!()));
        assert!(!Trit::False.resolve(|| unreachable!()));
        assert!(Trit::Auto.resolve(|| true));
        assert!(!Trit::Auto.resolve(|| false));
    }

    #[test]
    fn test_int_bounds() {
        assert_eq!(MARGIN.coerce(b"0"), Ok(ConfigValue::Int(0)));
        assert_eq!(MARGIN.coerce(b"200"), Ok(ConfigValue::Int(200)));
        assert_eq!(
            MARGIN.coerce(b"201"),
            Err(ValueError::OutOfRange { value: 201, min: 0, max: 200 })
        );
        assert_eq!(
            MARGIN.coerce(b"-1"),
            Err(ValueError::OutOfRange { value: -1, min: 0, max: 200 })
        );
    }

    #[test]
    fn test_int_malformed_names_range() {
        let err = MARGIN.coerce(b"two").unwrap_err();
        assert_eq!(err.to_string(), "`two` is not an integer (allowed range: 0 to 200)");
        assert!(MARGIN.coerce(b"2.5").is_err());
        assert!(MARGIN.coerce(b"").is_err());
    }

    #[test]
    fn test_string_passes_bytes_through() {
        let kind = Kind::Str { nullable: false };
        assert_eq!(
            kind.coerce(b"/usr/bin/man"),
            Ok(ConfigValue::Str(Some(b"/usr/bin/man".to_vec())))
        );
        assert_eq!(
            kind.coerce(b"\xff\xfe"),
            Ok(ConfigValue::Str(Some(vec![0xff, 0xfe])))
        );
        assert_eq!(kind.coerce(b""), Err(ValueError::Empty));
        assert_eq!(
            Kind::Str { nullable: true }.coerce(b""),
            Ok(ConfigValue::Str(None))
        );
    }

    #[test]
    fn test_wstring_must_decode() {
        let kind = Kind::WStr { nullable: false };
        assert_eq!(
            kind.coerce("┬".as_bytes()),
            Ok(ConfigValue::WStr(Some("┬".into())))
        );
        assert_eq!(kind.coerce(b"\xe2\x94"), Err(ValueError::Encoding));
        assert_eq!(kind.coerce(b""), Err(ValueError::Empty));
    }

    #[test]
    fn test_colour() {
        assert_eq!(
            Kind::Colour.coerce(b"white, black, false"),
            Ok(ConfigValue::Colour(Colour::new(
                PaletteColour::White,
                PaletteColour::Black,
                false
            )))
        );
        assert_eq!(
            Kind::Colour.coerce(b"white black true"),
            Kind::Colour.coerce(b"white,black,true")
        );
        assert!(matches!(
            Kind::Colour.coerce(b"white, navy, false"),
            Err(ValueError::UnknownColour(name)) if name == "navy"
        ));
    }

    #[test]
    fn test_keys() {
        assert_eq!(
            Kind::Key.coerce(b"KEY_UP, y, k"),
            Ok(ConfigValue::Key(vec![
                KeyCode::Up,
                KeyCode::Char('y'),
                KeyCode::Char('k')
            ]))
        );
        assert_eq!(Kind::Key.coerce(b""), Err(ValueError::Empty));
        assert_eq!(
            Kind::Key.coerce(b"k, k"),
            Err(ValueError::RepeatedKey(KeyCode::Char('k')))
        );
        assert_eq!(
            Kind::Key.coerce(b"a b c d e f g h i"),
            Err(ValueError::TooManyKeys(9))
        );
    }

    #[test]
    fn test_check_rejects_kind_mismatch() {
        assert_eq!(
            ConfigValue::Bool(true).check(&MARGIN),
            Err(ValueError::KindMismatch { expected: "int", found: "bool" })
        );
        assert!(ConfigValue::Int(500).check(&MARGIN).is_err());
        assert!(ConfigValue::Int(50).check(&MARGIN).is_ok());
        assert!(ConfigValue::WStr(None).check(&Kind::WStr { nullable: false }).is_err());
        assert!(ConfigValue::Key(vec![]).check(&Kind::Key).is_err());
    }

    #[test]
    fn test_render_parses_back() {
        let cases = [
            (Kind::Bool, "true"),
            (Kind::Trit, "auto"),
            (MARGIN, "42"),
            (Kind::Str { nullable: true }, ""),
            (Kind::WStr { nullable: false }, " "),
            (Kind::WStr { nullable: false }, "│"),
            (Kind::Colour, "yellow red true"),
            (Kind::Key, "KEY_ENTER LF o"),
        ];
        for (kind, raw) in cases {
            let value = kind.coerce(raw.as_bytes()).unwrap();
            let rendered = value.render();
            let unquoted = rendered
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or(&rendered);
            assert_eq!(kind.coerce(unquoted.as_bytes()), Ok(value), "{rendered:?}");
        }
    }

    #[test]
    fn test_render_quotes_whitespace() {
        assert_eq!(ConfigValue::WStr(Some(" ".into())).render(), "\" \"");
        assert_eq!(ConfigValue::WStr(Some("qman".into())).render(), "qman");
        assert_eq!(ConfigValue::Str(None).render(), "");
    }

    #[test]
    fn test_render_keeps_raw_bytes() {
        let value = ConfigValue::Str(Some(b"/opt/\xff/man".to_vec()));
        assert_eq!(value.render_bytes(), b"/opt/\xff/man");
        let padded = ConfigValue::Str(Some(b" \xfe".to_vec()));
        assert_eq!(padded.render_bytes(), b"\" \xfe\"");
    }

    #[test]
    fn test_quote_key_renders_by_name() {
        let value = Kind::Key.coerce(b"\", q").unwrap();
        assert_eq!(value, ConfigValue::Key(vec![KeyCode::Char('"'), KeyCode::Char('q')]));
        assert_eq!(value.render(), "QUOTE, q");
    }

    #[test]
    fn test_int_overflow_names_range() {
        let err = MARGIN.coerce(b"99999999999999999999").unwrap_err();
        assert_eq!(
            err.to_string(),
            "`99999999999999999999` is out of range (allowed range: 0 to 200)"
        );
        assert!(matches!(
            MARGIN.coerce(b"-99999999999999999999"),
            Err(ValueError::Overflow { .. })
        ));
        assert!(matches!(MARGIN.coerce(b"12a"), Err(ValueError::NotInteger { .. })));
    }
}
