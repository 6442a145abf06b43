//! Locale catalog: the languages an app offers and their display names.
//!
//! YAML source format, one entry per code:
//!
//! ```yaml
//! en: ["en_US", "English", "English"]
//! es: ["es_ES", "Spanish", "Español"]
//! ```
//!
//! The three strings are the raw platform id, the English name and the
//! native name.

use indexmap::IndexMap;
use thiserror::Error;

use crate::locale::{compare_codes, normalize_locale};

const MAX_CATALOG_ENTRIES: usize = 10_000;

/// A language as shown in a picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageEntry {
    pub code: String,
    pub english_name: String,
    pub native_name: String,
}

impl LanguageEntry {
    pub fn new(
        code: impl Into<String>,
        english_name: impl Into<String>,
        native_name: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            english_name: english_name.into(),
            native_name: native_name.into(),
        }
    }
}

/// Catalog payload for one code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogRecord {
    pub raw_id: String,
    pub english_name: String,
    pub native_name: String,
}

#[derive(Debug, Error)]
pub enum CatalogParseError {
    #[error("yaml catalog error: {0}")]
    Yaml(String),

    #[error("catalog entry `{code}`: {msg}")]
    Entry { code: String, msg: String },
}

/// Read-only mapping from language code to display names, in source order.
#[derive(Clone, Debug, Default)]
pub struct LocaleCatalog {
    records: IndexMap<String, CatalogRecord>,
}

impl LocaleCatalog {
    /// A catalog with no languages.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from `(code, record)` pairs. Later duplicates replace earlier ones.
    pub fn from_records<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = (S, CatalogRecord)>,
        S: AsRef<str>,
    {
        let records = records
            .into_iter()
            .map(|(code, rec)| (normalize_locale(code.as_ref()), rec))
            .collect();
        Self { records }
    }

    /// Parse the YAML catalog format.
    pub fn parse_yaml(src: &str) -> Result<Self, CatalogParseError> {
        let blank = src.lines().all(|l| {
            let l = l.trim();
            l.is_empty() || l.starts_with('#')
        });
        if blank {
            return Ok(Self::empty());
        }

        let value: serde_yaml::Value = serde_yaml::from_str(src)
            .map_err(|e| CatalogParseError::Yaml(format!("yaml parse error: {e}")))?;

        let raw = match value {
            serde_yaml::Value::Mapping(m) => m,
            serde_yaml::Value::Null => return Ok(Self::empty()),
            _ => {
                return Err(CatalogParseError::Yaml(
                    "top level must be a mapping of code -> [raw_id, english, native]".to_string(),
                ))
            }
        };

        if raw.len() > MAX_CATALOG_ENTRIES {
            return Err(CatalogParseError::Yaml(format!(
                "too many entries (max {MAX_CATALOG_ENTRIES})"
            )));
        }

        let mut records = IndexMap::with_capacity(raw.len());
        for (k, v) in raw {
            let Some(code) = k.as_str() else {
                return Err(CatalogParseError::Yaml(
                    "yaml keys must be strings".to_string(),
                ));
            };
            let code = normalize_locale(code);
            if code.is_empty() {
                return Err(CatalogParseError::Yaml("empty language code".to_string()));
            }

            let Some(fields) = v.as_sequence() else {
                return Err(CatalogParseError::Entry {
                    code,
                    msg: "expected [raw_id, english_name, native_name]".to_string(),
                });
            };
            if fields.len() != 3 {
                return Err(CatalogParseError::Entry {
                    code,
                    msg: format!("expected 3 fields, found {}", fields.len()),
                });
            }

            let mut strs = Vec::with_capacity(3);
            for (idx, f) in fields.iter().enumerate() {
                match f {
                    serde_yaml::Value::String(s) => strs.push(s.clone()),
                    // An absent native name is tolerated here and dropped by the picker.
                    serde_yaml::Value::Null => strs.push(String::new()),
                    _ => {
                        return Err(CatalogParseError::Entry {
                            code,
                            msg: format!("field {idx} must be a string"),
                        })
                    }
                }
            }
            let native_name = strs.pop().unwrap_or_default();
            let english_name = strs.pop().unwrap_or_default();
            let raw_id = strs.pop().unwrap_or_default();

            records.insert(
                code,
                CatalogRecord {
                    raw_id,
                    english_name,
                    native_name,
                },
            );
        }

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&CatalogRecord> {
        self.records.get(&normalize_locale(code))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Entries in source order.
    pub fn entries(&self) -> impl Iterator<Item = LanguageEntry> + '_ {
        self.records.iter().map(|(code, rec)| LanguageEntry {
            code: code.clone(),
            english_name: rec.english_name.clone(),
            native_name: rec.native_name.clone(),
        })
    }

    /// Entries ordered by [`compare_codes`].
    pub fn sorted_entries(&self) -> Vec<LanguageEntry> {
        let mut out: Vec<LanguageEntry> = self.entries().collect();
        out.sort_by(|a, b| compare_codes(&a.code, &b.code));
        out
    }
}
