//! Schema registry.
//!
//! The schema is declared with [`SchemaBuilder`] and compiled once. Compiling
//! treats the declaration like any other input: every default is coerced
//! through its own kind, and structural rules are checked. A failure is a
//! programmer error ([`SchemaError`]), never a user-facing diagnostic.

mod builtin;

use rustc_hash::FxHashMap;
use std::borrow::Cow;
use std::sync::{Arc, LazyLock};
use thiserror::Error;

use crate::config::kind::{ConfigValue, KeyCode, Kind, ValueError};
use crate::config::types::OptionPath;

/// The one section holding action key bindings.
pub const KEYS_SECTION: &str = "keys";

/// The compiled built-in schema.
static BUILTIN: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Arc::new(
        builtin::schema()
            .build()
            .unwrap_or_else(|e| panic!("built-in config schema is invalid: {e}")),
    )
});

/// The compiled built-in schema, shared by every store built from it.
pub fn builtin() -> Arc<Schema> {
    Arc::clone(&BUILTIN)
}

// ============================================================================
// SchemaError
// ============================================================================

/// Errors in a schema declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("section `{0}` is declared twice")]
    DuplicateSection(&'static str),

    #[error("option `{0}.{1}` is declared twice")]
    DuplicateOption(&'static str, &'static str),

    #[error("option `{0}.{1}` has an empty range {2}..={3}")]
    EmptyRange(&'static str, &'static str, i64, i64),

    #[error("option `{0}.{1}` is of kind `key` but is not in section `{KEYS_SECTION}`")]
    KeyOutsideKeys(&'static str, &'static str),

    #[error("option `{0}.{1}` is in section `{KEYS_SECTION}` but is of kind `{2}`")]
    NonKeyInKeys(&'static str, &'static str, &'static str),

    #[error("default of `{0}.{1}` is invalid: {2}")]
    InvalidDefault(&'static str, &'static str, #[source] ValueError),

    #[error("key `{key}` is bound by default to both `{first}` and `{second}`")]
    ConflictingDefaultKeys {
        key: KeyCode,
        first: &'static str,
        second: &'static str,
    },
}

// ============================================================================
// OptionSpec
// ============================================================================

/// Raw default of an option, exactly as it would appear in a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    /// No value (nullable string kinds only).
    Absent,
    /// A scalar value.
    Text(&'static str),
    /// The tokens of a composite value.
    Tokens(&'static [&'static str]),
}

impl DefaultValue {
    fn raw(&self) -> Cow<'static, str> {
        match self {
            Self::Absent => Cow::Borrowed(""),
            Self::Text(text) => Cow::Borrowed(text),
            Self::Tokens(tokens) => Cow::Owned(tokens.join(", ")),
        }
    }
}

/// Declaration of one option. One constructor per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub kind: Kind,
    pub default: DefaultValue,
    /// Whether the option may be set from the config file.
    pub user_configurable: bool,
    pub doc: Option<&'static str>,
}

impl OptionSpec {
    const fn new(kind: Kind, default: DefaultValue) -> Self {
        Self {
            kind,
            default,
            user_configurable: true,
            doc: None,
        }
    }

    pub const fn bool(default: &'static str) -> Self {
        Self::new(Kind::Bool, DefaultValue::Text(default))
    }

    pub const fn trit(default: &'static str) -> Self {
        Self::new(Kind::Trit, DefaultValue::Text(default))
    }

    pub const fn int(min: i64, max: i64, default: &'static str) -> Self {
        Self::new(Kind::Int { min, max }, DefaultValue::Text(default))
    }

    pub const fn string(default: &'static str) -> Self {
        Self::new(Kind::Str { nullable: false }, DefaultValue::Text(default))
    }

    /// A byte string that starts out absent.
    pub const fn absent_string() -> Self {
        Self::new(Kind::Str { nullable: true }, DefaultValue::Absent)
    }

    pub const fn wstring(default: &'static str) -> Self {
        Self::new(Kind::WStr { nullable: false }, DefaultValue::Text(default))
    }

    pub const fn colour(default: &'static [&'static str]) -> Self {
        Self::new(Kind::Colour, DefaultValue::Tokens(default))
    }

    pub const fn key(default: &'static [&'static str]) -> Self {
        Self::new(Kind::Key, DefaultValue::Tokens(default))
    }

    /// Allow the value to be absent.
    pub const fn nullable(mut self) -> Self {
        self.kind = match self.kind {
            Kind::Str { .. } => Kind::Str { nullable: true },
            Kind::WStr { .. } => Kind::WStr { nullable: true },
            other => other,
        };
        self
    }

    /// Mark as computed at runtime; not settable from the config file.
    pub const fn internal(mut self) -> Self {
        self.user_configurable = false;
        self
    }

    pub const fn doc(mut self, doc: &'static str) -> Self {
        self.doc = Some(doc);
        self
    }
}

// ============================================================================
// SchemaBuilder
// ============================================================================

/// Collects section and option declarations before compilation.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    sections: Vec<(&'static str, Vec<(&'static str, OptionSpec)>)>,
}

/// Appends options to one section of a [`SchemaBuilder`].
pub struct SectionBuilder<'a> {
    options: &'a mut Vec<(&'static str, OptionSpec)>,
}

impl SectionBuilder<'_> {
    pub fn option(self, name: &'static str, spec: OptionSpec) -> Self {
        self.options.push((name, spec));
        self
    }
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new section; options are kept in declaration order.
    pub fn section(&mut self, name: &'static str) -> SectionBuilder<'_> {
        self.sections.push((name, Vec::new()));
        let (_, options) = self
            .sections
            .last_mut()
            .unwrap_or_else(|| unreachable!("section was just pushed"));
        SectionBuilder { options }
    }

    /// Compile the declarations, checking every schema invariant.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut schema = Schema {
            sections: Vec::with_capacity(self.sections.len()),
            index: FxHashMap::default(),
        };

        for (section_name, options) in self.sections {
            if schema.index.contains_key(section_name) {
                return Err(SchemaError::DuplicateSection(section_name));
            }
            let mut section = Section {
                name: section_name,
                options: Vec::with_capacity(options.len()),
                index: FxHashMap::default(),
            };
            for (option_name, spec) in options {
                let entry = compile_option(section_name, option_name, spec)?;
                if section
                    .index
                    .insert(option_name, section.options.len())
                    .is_some()
                {
                    return Err(SchemaError::DuplicateOption(section_name, option_name));
                }
                section.options.push(entry);
            }
            check_default_keys(&section)?;
            schema.index.insert(section_name, schema.sections.len());
            schema.sections.push(section);
        }

        Ok(schema)
    }
}

fn compile_option(
    section: &'static str,
    option: &'static str,
    spec: OptionSpec,
) -> Result<OptionEntry, SchemaError> {
    if let Kind::Int { min, max } = spec.kind
        && min > max
    {
        return Err(SchemaError::EmptyRange(section, option, min, max));
    }
    match (section == KEYS_SECTION, spec.kind) {
        (false, Kind::Key) => return Err(SchemaError::KeyOutsideKeys(section, option)),
        (true, kind) if kind != Kind::Key => {
            return Err(SchemaError::NonKeyInKeys(section, option, kind.name()));
        }
        _ => {}
    }

    let default = spec
        .kind
        .coerce(spec.default.raw().as_bytes())
        .map_err(|e| SchemaError::InvalidDefault(section, option, e))?;

    Ok(OptionEntry {
        path: OptionPath::new(section, option),
        spec,
        default,
    })
}

/// No two actions of a section may share a key by default.
fn check_default_keys(section: &Section) -> Result<(), SchemaError> {
    let mut owners: FxHashMap<KeyCode, &'static str> = FxHashMap::default();
    for entry in &section.options {
        let ConfigValue::Key(codes) = &entry.default else {
            continue;
        };
        for code in codes {
            if let Some(first) = owners.insert(*code, entry.path.option) {
                return Err(SchemaError::ConflictingDefaultKeys {
                    key: *code,
                    first,
                    second: entry.path.option,
                });
            }
        }
    }
    Ok(())
}

// ============================================================================
// compiled schema
// ============================================================================

/// Index of an option within a compiled [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionId {
    pub section: usize,
    pub option: usize,
}

/// A compiled option: its declaration plus the coerced default.
#[derive(Debug, Clone)]
pub struct OptionEntry {
    pub path: OptionPath,
    pub spec: OptionSpec,
    pub default: ConfigValue,
}

/// A named, ordered group of options.
#[derive(Debug, Clone)]
pub struct Section {
    pub name: &'static str,
    options: Vec<OptionEntry>,
    index: FxHashMap<&'static str, usize>,
}

impl Section {
    pub fn options(&self) -> &[OptionEntry] {
        &self.options
    }

    pub fn position(&self, option: &str) -> Option<usize> {
        self.index.get(option).copied()
    }
}

/// The compiled, immutable schema.
#[derive(Debug, Clone)]
pub struct Schema {
    sections: Vec<Section>,
    index: FxHashMap<&'static str, usize>,
}

impl Schema {
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.section_index(name).map(|i| &self.sections[i])
    }

    pub fn section_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Resolve `(section, option)` to an id.
    pub fn id(&self, section: &str, option: &str) -> Option<OptionId> {
        let section_idx = self.section_index(section)?;
        let option_idx = self.sections[section_idx].position(option)?;
        Some(OptionId {
            section: section_idx,
            option: option_idx,
        })
    }

    /// # Panics
    ///
    /// Panics if `id` does not come from this schema.
    pub fn entry(&self, id: OptionId) -> &OptionEntry {
        &self.sections[id.section].options[id.option]
    }

    pub fn lookup(&self, section: &str, option: &str) -> Option<&OptionEntry> {
        self.id(section, option).map(|id| self.entry(id))
    }

    /// Every option id in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = OptionId> + '_ {
        self.sections.iter().enumerate().flat_map(|(s, section)| {
            (0..section.options.len()).map(move |o| OptionId {
                section: s,
                option: o,
            })
        })
    }

    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.options.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// tests
// ============================================================================
