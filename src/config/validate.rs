//! Validation and merging.
//!
//! Each raw record is resolved against the schema and coerced into its
//! option's kind. Problems become diagnostics and the offending line is
//! skipped. Later lines override earlier ones. Key bindings are then
//! resolved per section so that no key triggers two actions.

use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::kind::{ConfigValue, KeyCode};
use crate::config::parse::RawRecord;
use crate::config::schema::{OptionId, Schema};
use crate::config::store::ConfigStore;
use crate::config::types::ConfigDiagnostics;
use crate::debug;

/// Maximum edit distance for "did you mean" hints.
const SUGGEST_DISTANCE: usize = 3;

/// Validate `records` and merge them over the schema defaults.
pub fn validate(
    schema: &Arc<Schema>,
    records: &[RawRecord],
    diagnostics: &mut ConfigDiagnostics,
) -> ConfigStore {
    let mut store = ConfigStore::defaults(Arc::clone(schema));
    let mut bindings: FxHashMap<OptionId, Binding> = FxHashMap::default();

    for record in records {
        let Some(id) = resolve(schema, record, diagnostics) else {
            continue;
        };
        let kind = schema.entry(id).spec.kind;
        match kind.coerce(&record.value) {
            Ok(ConfigValue::Key(codes)) => {
                // a key restated by a later line keeps its earlier claim
                let previous = bindings.get(&id);
                let claimed = codes
                    .iter()
                    .map(|code| {
                        previous
                            .and_then(|p| p.claimed_at(*code))
                            .unwrap_or(record.line)
                    })
                    .collect();
                bindings.insert(
                    id,
                    Binding {
                        line: record.line,
                        id,
                        codes,
                        claimed,
                    },
                );
            }
            Ok(value) => store.set(id, value),
            Err(e) => diagnostics.error_with_hint(
                record.line,
                &record.section,
                Some(record.option.as_str()),
                e.to_string(),
                kind.syntax(),
            ),
        }
    }

    for (id, codes) in resolve_bindings(schema, bindings.into_values().collect(), diagnostics) {
        store.set(id, ConfigValue::Key(codes));
    }

    store
}

/// Find the option a record refers to, reporting why when there is none.
fn resolve(
    schema: &Schema,
    record: &RawRecord,
    diagnostics: &mut ConfigDiagnostics,
) -> Option<OptionId> {
    let (line, section_name, option_name) =
        (record.line, record.section.as_str(), record.option.as_str());

    let Some(section) = schema.section(section_name) else {
        let message = format!("unknown section `{section_name}`");
        let names = schema.sections().iter().map(|s| s.name);
        match suggest(section_name, names) {
            Some(name) => diagnostics.error_with_hint(
                line,
                section_name,
                Some(option_name),
                message,
                format!("did you mean `{name}`?"),
            ),
            None => diagnostics.error(line, section_name, Some(option_name), message),
        }
        return None;
    };

    let Some(id) = schema.id(section_name, option_name) else {
        let message = format!("no option `{option_name}` in section `{section_name}`");
        let names = section
            .options()
            .iter()
            .filter(|entry| entry.spec.user_configurable)
            .map(|entry| entry.path.option);
        match suggest(option_name, names) {
            Some(name) => diagnostics.error_with_hint(
                line,
                section_name,
                Some(option_name),
                message,
                format!("did you mean `{section_name}.{name}`?"),
            ),
            None => diagnostics.error(line, section_name, Some(option_name), message),
        }
        return None;
    };

    if !schema.entry(id).spec.user_configurable {
        diagnostics.error(
            line,
            section_name,
            Some(option_name),
            format!("`{section_name}.{option_name}` is not settable in the config file"),
        );
        return None;
    }

    Some(id)
}

/// Closest candidate within [`SUGGEST_DISTANCE`] edits.
fn suggest<'a>(name: &str, candidates: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    candidates
        .map(|candidate| (strsim::levenshtein(name, candidate), candidate))
        .filter(|(distance, _)| *distance <= SUGGEST_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate)
}

// ============================================================================
// key bindings
// ============================================================================

/// A syntactically valid user key binding awaiting conflict resolution.
#[derive(Debug, Clone)]
struct Binding {
    /// Line of the record that set the final value.
    line: usize,
    id: OptionId,
    codes: Vec<KeyCode>,
    /// For each of `codes`, the line from which this action has held it
    /// without interruption.
    claimed: Vec<usize>,
}

impl Binding {
    fn claimed_at(&self, code: KeyCode) -> Option<usize> {
        self.codes
            .iter()
            .position(|c| *c == code)
            .map(|i| self.claimed[i])
    }

    /// Line of the earliest claim still held.
    fn first_claim(&self) -> usize {
        self.claimed.iter().copied().min().unwrap_or(self.line)
    }
}

/// Resolve user bindings against each other and against default bindings.
///
/// Returns the final keys of every key option that differs from its default.
fn resolve_bindings(
    schema: &Schema,
    bindings: Vec<Binding>,
    diagnostics: &mut ConfigDiagnostics,
) -> Vec<(OptionId, Vec<KeyCode>)> {
    let mut by_section: BTreeMap<usize, Vec<Binding>> = BTreeMap::new();
    for binding in bindings {
        by_section.entry(binding.id.section).or_default().push(binding);
    }

    let mut resolved = Vec::new();
    for (section, mut bindings) in by_section {
        bindings.sort_by_key(|b| (b.first_claim(), b.line));
        let mut keys = SectionKeys::default();
        keys.claim(schema, bindings, diagnostics);
        keys.protect_defaults(schema, section, diagnostics);
        keys.finish(schema, section, &mut resolved);
    }
    resolved
}

/// Accepted bindings of one section and which action owns each key.
#[derive(Default)]
struct SectionKeys {
    accepted: Vec<Binding>,
    owner: FxHashMap<KeyCode, OptionId>,
}

impl SectionKeys {
    /// Accept bindings in the order their keys were first claimed; a key
    /// already owned by an earlier binding rejects the later one.
    fn claim(&mut self, schema: &Schema, bindings: Vec<Binding>, diagnostics: &mut ConfigDiagnostics) {
        for binding in bindings {
            let conflict = binding
                .codes
                .iter()
                .find_map(|code| self.owner.get(code).map(|owner| (*code, *owner)));
            if let Some((code, owner)) = conflict {
                let path = schema.entry(binding.id).path;
                let other = schema.entry(owner).path;
                let other_line = self
                    .accepted
                    .iter()
                    .find(|b| b.id == owner)
                    .and_then(|b| b.claimed_at(code))
                    .unwrap_or(0);
                diagnostics.error_with_hint(
                    binding.line,
                    path.section,
                    Some(path.option),
                    format!(
                        "key `{code}` is already bound to `{}.{}` (line {other_line})",
                        other.section, other.option
                    ),
                    "the first binding is kept; choose another key",
                );
                continue;
            }
            for code in &binding.codes {
                self.owner.insert(*code, binding.id);
            }
            self.accepted.push(binding);
        }
    }

    /// Reject bindings that would leave a defaulted action without any key.
    fn protect_defaults(&mut self, schema: &Schema, section: usize, diagnostics: &mut ConfigDiagnostics) {
        while let Some(starved) = self.starved_action(schema, section) {
            let ConfigValue::Key(defaults) = &schema.entry(starved).default else {
                break;
            };
            let claimers: FxHashSet<OptionId> = defaults
                .iter()
                .filter_map(|code| self.owner.get(code).copied())
                .collect();
            let starved_path = schema.entry(starved).path;

            self.accepted.retain(|binding| {
                if !claimers.contains(&binding.id) {
                    return true;
                }
                let path = schema.entry(binding.id).path;
                diagnostics.error_with_hint(
                    binding.line,
                    path.section,
                    Some(path.option),
                    format!(
                        "binding would leave `{}.{}` without any key",
                        starved_path.section, starved_path.option
                    ),
                    format!(
                        "also bind `{}.{}` to another key",
                        starved_path.section, starved_path.option
                    ),
                );
                false
            });
            self.owner.retain(|_, owner| !claimers.contains(owner));
        }
    }

    /// A key option without an accepted binding whose defaults are all taken.
    fn starved_action(&self, schema: &Schema, section: usize) -> Option<OptionId> {
        self.defaulted(schema, section).find(|&id| {
            matches!(
                &schema.entry(id).default,
                ConfigValue::Key(defaults) if defaults.iter().all(|c| self.owner.contains_key(c))
            )
        })
    }

    /// Key options of `section` that keep their default binding.
    fn defaulted<'a>(&'a self, schema: &'a Schema, section: usize) -> impl Iterator<Item = OptionId> + 'a {
        let options = schema.sections()[section].options();
        (0..options.len())
            .map(move |option| OptionId { section, option })
            .filter(move |id| {
                matches!(schema.entry(*id).default, ConfigValue::Key(_))
                    && !self.accepted.iter().any(|b| b.id == *id)
            })
    }

    /// Emit accepted bindings and defaults that lost keys to other actions.
    fn finish(self, schema: &Schema, section: usize, resolved: &mut Vec<(OptionId, Vec<KeyCode>)>) {
        for id in self.defaulted(schema, section) {
            let entry = schema.entry(id);
            let ConfigValue::Key(defaults) = &entry.default else {
                continue;
            };
            let (kept, taken): (Vec<KeyCode>, Vec<KeyCode>) = defaults
                .iter()
                .copied()
                .partition(|code| !self.owner.contains_key(code));
            if !taken.is_empty() {
                let taken: Vec<String> = taken.iter().map(ToString::to_string).collect();
                debug!("config"; "{}.{}: default keys {} taken by other actions",
                    entry.path.section, entry.path.option, taken.join(", "));
                resolved.push((id, kept));
            }
        }
        resolved.extend(self.accepted.into_iter().map(|b| (b.id, b.codes)));
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse::parse;
    use crate::config::schema;

    fn run(input: &str) -> (ConfigStore, ConfigDiagnostics) {
        let raw = parse(input.as_bytes());
        let mut diagnostics = raw.diagnostics;
        let store = validate(&schema::builtin(), &raw.records, &mut diagnostics);
        (store, diagnostics)
    }

    fn chars(s: &str) -> Vec<KeyCode> {
        s.chars().map(KeyCode::Char).collect()
    }

    #[test]
    fn test_unknown_section_suggests() {
        let (_, diags) = run("layuot.lmargin = 3");
        let diag = &diags.errors()[0];
        assert_eq!(diag.message, "unknown section `layuot`");
        assert_eq!(diag.hint.as_deref(), Some("did you mean `layout`?"));
    }

    #[test]
    fn test_unknown_option_suggests_configurable_only() {
        let (_, diags) = run("layout.lmargn = 3\nlayout.widht = 3");
        assert_eq!(diags.len(), 2);
        assert_eq!(
            diags.errors()[0].hint.as_deref(),
            Some("did you mean `layout.lmargin`?")
        );
        // `width` is internal, so it is never suggested
        assert_ne!(
            diags.errors()[1].hint.as_deref(),
            Some("did you mean `layout.width`?")
        );
    }

    #[test]
    fn test_internal_option_rejected() {
        let (store, diags) = run("layout.width = 120");
        assert_eq!(store.int("layout", "width"), 80);
        assert_eq!(diags.len(), 1);
        assert!(diags.errors()[0].message.contains("not settable in the config file"));
    }

    #[test]
    fn test_last_valid_value_wins() {
        let (store, diags) = run("layout.lmargin = 4\nlayout.lmargin = 6");
        assert!(diags.is_empty());
        assert_eq!(store.int("layout", "lmargin"), 6);

        let (store, diags) = run("layout.lmargin = 4\nlayout.lmargin = 900");
        assert_eq!(diags.len(), 1);
        assert_eq!(store.int("layout", "lmargin"), 4);
    }

    #[test]
    fn test_invalid_value_has_syntax_hint() {
        let (store, diags) = run("colours.text = white, navy, false");
        assert_eq!(store.get("colours", "text"), &store.schema().lookup("colours", "text").unwrap().default);
        let diag = &diags.errors()[0];
        assert_eq!(diag.line, Some(1));
        assert_eq!(diag.message, "unknown colour `navy`");
        assert!(diag.hint.as_deref().unwrap().contains("<foreground>"));
    }

    #[test]
    fn test_later_key_conflict_rejected() {
        let (store, diags) = run("keys.up = x\nkeys.down = x");
        assert_eq!(store.keys("keys", "up"), chars("x"));
        assert_eq!(
            store.keys("keys", "down"),
            &[KeyCode::Down, KeyCode::Char('e'), KeyCode::Char('j')]
        );
        assert_eq!(diags.len(), 1);
        let diag = &diags.errors()[0];
        assert_eq!(diag.line, Some(2));
        assert_eq!(diag.path().as_deref(), Some("keys.down"));
        assert!(diag.message.contains("keys.up"));
    }

    #[test]
    fn test_user_binding_takes_default_alias() {
        let (store, diags) = run("keys.up = j");
        assert!(diags.is_empty());
        assert_eq!(store.keys("keys", "up"), chars("j"));
        assert_eq!(store.keys("keys", "down"), &[KeyCode::Down, KeyCode::Char('e')]);
    }

    #[test]
    fn test_swapping_keys() {
        let (store, diags) = run("[keys]\nopen_apropos = w\nopen_whatis = a");
        assert!(diags.is_empty());
        assert_eq!(store.keys("keys", "open_apropos"), chars("w"));
        assert_eq!(store.keys("keys", "open_whatis"), chars("a"));
    }

    #[test]
    fn test_binding_that_starves_an_action_is_rejected() {
        let (store, diags) = run("keys.open_whatis = a");
        assert_eq!(diags.len(), 1);
        assert!(diags.errors()[0].message.contains("keys.open_apropos"));
        assert_eq!(store.keys("keys", "open_apropos"), chars("a"));
        assert_eq!(store.keys("keys", "open_whatis"), chars("w"));
    }

    #[test]
    fn test_rejected_binding_falls_back_to_remaining_defaults() {
        let (store, diags) = run("keys.up = e\nkeys.down = e");
        assert_eq!(diags.len(), 1);
        assert_eq!(store.keys("keys", "up"), chars("e"));
        assert_eq!(store.keys("keys", "down"), &[KeyCode::Down, KeyCode::Char('j')]);
    }

    #[test]
    fn test_restated_key_keeps_its_claim() {
        let (store, diags) = run("keys.up = x\nkeys.down = x\nkeys.up = x, z");
        assert_eq!(store.keys("keys", "up"), chars("xz"));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags.errors()[0].path().as_deref(), Some("keys.down"));
        assert!(diags.errors()[0].message.contains("`keys.up` (line 1)"));
    }

    #[test]
    fn test_newly_claimed_key_loses_to_earlier_rival() {
        let (store, diags) = run("keys.up = z\nkeys.down = x\nkeys.up = x");
        assert_eq!(store.keys("keys", "down"), chars("x"));
        assert_eq!(store.keys("keys", "up"), &[KeyCode::Up, KeyCode::Char('y'), KeyCode::Char('k')]);
        assert_eq!(diags.len(), 1);
        let diag = &diags.errors()[0];
        assert_eq!(diag.line, Some(3));
        assert!(diag.message.contains("`keys.down` (line 2)"), "{}", diag.message);
    }

    #[test]
    fn test_rebinding_same_action_is_last_wins() {
        let (store, diags) = run("keys.quit = x\nkeys.quit = z");
        assert!(diags.is_empty());
        assert_eq!(store.keys("keys", "quit"), chars("z"));
    }

    #[test]
    fn test_no_key_shared_after_validation() {
        let (store, _) = run("keys.up = j, n\nkeys.search = n\nkeys.help = q\nkeys.toc = KEY_UP");
        let mut seen = FxHashMap::default();
        for (entry, value) in store.iter() {
            if let ConfigValue::Key(codes) = value {
                for code in codes {
                    assert!(seen.insert(*code, entry.path).is_none(), "{code} bound twice");
                }
            }
        }
    }
}
