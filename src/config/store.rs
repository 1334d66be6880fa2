//! The merged, validated configuration snapshot.

use std::sync::Arc;

use crate::config::kind::{Colour, ConfigValue, KeyCode, Trit};
use crate::config::schema::{OptionEntry, OptionId, Schema};
use crate::config::types::ConfigError;

/// Value of every schema option: the user's validated value or the default.
///
/// A store is immutable once built. Internal-only options change by building
/// a new store with [`ConfigStore::with_internal`].
#[derive(Debug, Clone)]
pub struct ConfigStore {
    schema: Arc<Schema>,
    /// Indexed by section, then option, in schema order.
    values: Vec<Vec<ConfigValue>>,
}

impl PartialEq for ConfigStore {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for ConfigStore {}

impl ConfigStore {
    /// A store holding every option's default.
    pub fn defaults(schema: Arc<Schema>) -> Self {
        let values = schema
            .sections()
            .iter()
            .map(|section| {
                section
                    .options()
                    .iter()
                    .map(|entry| entry.default.clone())
                    .collect()
            })
            .collect();
        Self { schema, values }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Replace one value. Callers have already checked it against its kind.
    pub(crate) fn set(&mut self, id: OptionId, value: ConfigValue) {
        self.values[id.section][id.option] = value;
    }

    pub fn value(&self, id: OptionId) -> &ConfigValue {
        &self.values[id.section][id.option]
    }

    /// # Panics
    ///
    /// Panics if `section.option` is not part of the schema.
    pub fn get(&self, section: &str, option: &str) -> &ConfigValue {
        let id = self
            .schema
            .id(section, option)
            .unwrap_or_else(|| panic!("no config option `{section}.{option}` in the schema"));
        self.value(id)
    }

    /// Every option with its current value, in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&OptionEntry, &ConfigValue)> + '_ {
        self.schema
            .ids()
            .map(|id| (self.schema.entry(id), self.value(id)))
    }

    /// Build a new store with internal-only options replaced.
    ///
    /// Every update must name an existing internal option and carry a value
    /// that satisfies its kind; otherwise nothing is applied.
    pub fn with_internal(&self, updates: &[(&str, &str, ConfigValue)]) -> Result<Self, ConfigError> {
        let resolved = self.resolve_internal(updates)?;
        Ok(self.with_resolved(&resolved))
    }

    pub(crate) fn resolve_internal(
        &self,
        updates: &[(&str, &str, ConfigValue)],
    ) -> Result<Vec<(OptionId, ConfigValue)>, ConfigError> {
        updates
            .iter()
            .map(|(section, option, value)| {
                let path = format!("{section}.{option}");
                let id = self
                    .schema
                    .id(section, option)
                    .ok_or_else(|| ConfigError::UnknownOption(path.clone()))?;
                let spec = &self.schema.entry(id).spec;
                if spec.user_configurable {
                    return Err(ConfigError::NotInternal(path));
                }
                value
                    .check(&spec.kind)
                    .map_err(|source| ConfigError::Invalid { path, source })?;
                Ok((id, value.clone()))
            })
            .collect()
    }

    pub(crate) fn with_resolved(&self, resolved: &[(OptionId, ConfigValue)]) -> Self {
        let mut next = self.clone();
        for (id, value) in resolved {
            next.set(*id, value.clone());
        }
        next
    }
}

// ============================================================================
// typed accessors
// ============================================================================

macro_rules! typed_accessor {
    ($(#[$meta:meta])* $name:ident, $variant:ident($binding:pat) => $ret:ty, $out:expr) => {
        $(#[$meta])*
        ///
        /// # Panics
        ///
        /// Panics if the option does not exist or is of another kind.
        pub fn $name(&self, section: &str, option: &str) -> $ret {
            match self.get(section, option) {
                ConfigValue::$variant($binding) => $out,
                other => panic!(
                    "config option `{section}.{option}` holds a `{}` value, not `{}`",
                    other.kind_name(),
                    stringify!($name)
                ),
            }
        }
    };
}

impl ConfigStore {
    typed_accessor!(bool, Bool(value) => bool, *value);
    typed_accessor!(trit, Trit(value) => Trit, *value);
    typed_accessor!(int, Int(value) => i64, *value);
    typed_accessor!(
        /// Raw bytes of a `string` option, `None` when absent.
        str, Str(value) => Option<&[u8]>, value.as_deref()
    );
    typed_accessor!(wstr, WStr(value) => Option<&str>, value.as_deref());
    typed_accessor!(colour, Colour(value) => Colour, *value);
    typed_accessor!(
        /// Keys bound to an action; the first is the canonical display form.
        keys, Key(value) => &[KeyCode], value.as_slice()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::kind::PaletteColour;
    use crate::config::schema;

    fn defaults() -> ConfigStore {
        ConfigStore::defaults(schema::builtin())
    }

    #[test]
    fn test_defaults_cover_every_option() {
        let store = defaults();
        assert_eq!(store.iter().count(), store.schema().len());
        for (entry, value) in store.iter() {
            assert_eq!(value, &entry.default);
        }
    }

    #[test]
    fn test_typed_accessors() {
        let store = defaults();
        assert!(store.bool("layout", "sbar"));
        assert_eq!(store.trit("tcap", "unicode"), Trit::Auto);
        assert_eq!(store.int("layout", "lmargin"), 2);
        assert_eq!(store.str("misc", "man_path"), Some(&b"/usr/bin/man"[..]));
        assert_eq!(store.str("misc", "config_path"), None);
        assert_eq!(store.wstr("chars", "box_tl"), Some("┌"));
        assert_eq!(
            store.colour("colours", "text"),
            Colour::new(PaletteColour::White, PaletteColour::Black, false)
        );
        assert_eq!(
            store.keys("keys", "open"),
            &[KeyCode::Enter, KeyCode::Char('\n'), KeyCode::Char('o')]
        );
    }

    #[test]
    #[should_panic(expected = "no config option `layout.nope`")]
    fn test_get_unknown_option_panics() {
        defaults().get("layout", "nope");
    }

    #[test]
    #[should_panic(expected = "holds a `int` value, not `bool`")]
    fn test_typed_accessor_kind_mismatch_panics() {
        defaults().bool("layout", "lmargin");
    }

    #[test]
    fn test_with_internal() {
        let store = defaults();
        let next = store
            .with_internal(&[
                ("layout", "width", ConfigValue::Int(132)),
                ("misc", "config_path", ConfigValue::Str(Some(b"/tmp/x.conf".to_vec()))),
            ])
            .unwrap();
        assert_eq!(next.int("layout", "width"), 132);
        assert_eq!(next.str("misc", "config_path"), Some(&b"/tmp/x.conf"[..]));
        // the earlier snapshot is untouched
        assert_eq!(store.int("layout", "width"), 80);
    }

    #[test]
    fn test_with_internal_rejects_user_options() {
        let err = defaults()
            .with_internal(&[("layout", "lmargin", ConfigValue::Int(4))])
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotInternal(path) if path == "layout.lmargin"));
    }

    #[test]
    fn test_with_internal_is_all_or_nothing() {
        let store = defaults();
        let err = store
            .with_internal(&[
                ("layout", "width", ConfigValue::Int(100)),
                ("layout", "height", ConfigValue::Int(1000)),
            ])
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let err = store
            .with_internal(&[("layout", "height", ConfigValue::Bool(true))])
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let err = store
            .with_internal(&[("layout", "depth", ConfigValue::Int(1))])
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOption(_)));
    }
}
