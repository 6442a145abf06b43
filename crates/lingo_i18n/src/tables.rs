//! Per-locale string tables for one target language.

use std::collections::HashMap;

use tracing::debug;

use crate::locale::{locale_fallback_chain, normalize_locale, DEFAULT_LOCALE};
use crate::strings::StringTable;
use crate::I18nError;

/// String tables keyed by locale, resolved for a single target language.
///
/// The built-in English table is always registered under [`DEFAULT_LOCALE`],
/// so the flattened result covers every well-known key.
#[derive(Clone, Debug)]
pub struct LocaleTables {
    language: String,
    tables: HashMap<String, StringTable>,
}

impl LocaleTables {
    /// Empty languages fall back to [`DEFAULT_LOCALE`].
    pub fn new(language: impl Into<String>) -> Self {
        let lang = normalize_locale(&language.into());
        let mut tables = HashMap::new();
        tables.insert(DEFAULT_LOCALE.to_string(), StringTable::builtin_en().clone());
        Self {
            language: if lang.is_empty() {
                DEFAULT_LOCALE.to_string()
            } else {
                lang
            },
            tables,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Parse and register the table for `locale`, replacing any previous one.
    pub fn load_str(&mut self, locale: &str, src: &str) -> Result<(), I18nError> {
        let table = StringTable::parse(src)?;
        let loc = normalize_locale(locale);
        debug!(locale = %loc, keys = table.len(), "string table registered");
        self.tables.insert(loc, table);
        Ok(())
    }

    /// Flatten the fallback chain into one table, most specific locale first.
    pub fn snapshot(&self) -> StringTable {
        let mut out = StringTable::new();
        for l in locale_fallback_chain(&self.language) {
            if let Some(t) = self.tables.get(&l) {
                out.merge_missing(t);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strings::keys;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_language_defaults() {
        assert_eq!(LocaleTables::new("  ").language(), "en-US");
        assert_eq!(LocaleTables::new("es_MX").language(), "es-MX");
    }

    #[test]
    fn snapshot_walks_fallback_chain() {
        let mut tables = LocaleTables::new("es-MX");
        tables.load_str("es", "2: Guardar\n").unwrap();
        tables.load_str("es_MX", "1: Idioma\n").unwrap();

        let snap = tables.snapshot();
        assert_eq!(snap.get(keys::DIALOG_TITLE), Some("Idioma"));
        assert_eq!(snap.get(keys::SAVE), Some("Guardar"));
        // Not translated into Spanish: English fallback.
        assert_eq!(snap.get(keys::CANCEL), Some("Cancel"));
    }

    #[test]
    fn tables_outside_the_chain_are_ignored() {
        let mut tables = LocaleTables::new("es");
        tables.load_str("fr", "2: Enregistrer\n").unwrap();
        assert_eq!(tables.snapshot().get(keys::SAVE), Some("Save"));
    }

    #[test]
    fn malformed_table_is_an_error() {
        let mut tables = LocaleTables::new("es");
        assert!(tables.load_str("es", "- not\n- a map\n").is_err());
    }
}
