//! Preference file persistence
//!
//! The chosen language lives in a small TOML file (`language = "es"`).
//! Other keys in that file are preserved on save.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lingo_sheet::{PersistenceError, PersistenceService};
use thiserror::Error;
use tracing::debug;

const LANGUAGE_KEY: &str = "language";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Stores the language preference in a TOML file.
#[derive(Clone, Debug)]
pub struct TomlPreferenceStore {
    path: PathBuf,
}

impl TomlPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved language, if any.
    pub async fn load_language(&self) -> Result<Option<String>, StoreError> {
        let table = self.read_table().await?;
        Ok(table
            .get(LANGUAGE_KEY)
            .and_then(|v| v.as_str())
            .map(str::to_owned)
            .filter(|s| !s.trim().is_empty()))
    }

    /// Write `code` as the saved language.
    pub async fn save_language(&self, code: &str) -> Result<(), StoreError> {
        let mut table = self.read_table().await?;
        table.insert(
            LANGUAGE_KEY.to_string(),
            toml::Value::String(code.to_string()),
        );
        let content = toml::to_string_pretty(&table)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(source))?;
        }

        // Write-then-rename so a crash never leaves a half-written file.
        let tmp = self.path.with_extension("toml.tmp");
        tokio::fs::write(&tmp, content)
            .await
            .map_err(|source| StoreError::Io {
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| self.io_error(source))?;

        debug!(path = %self.path.display(), language = %code, "preferences written");
        Ok(())
    }

    async fn read_table(&self) -> Result<toml::Table, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(toml::Table::new()),
            Err(source) => return Err(self.io_error(source)),
        };
        content
            .parse::<toml::Table>()
            .map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl PersistenceService for TomlPreferenceStore {
    async fn apply_language(&self, code: &str) -> Result<(), PersistenceError> {
        self.save_language(code)
            .await
            .map_err(|e| PersistenceError::with_source(e.to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn missing_file_has_no_language() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlPreferenceStore::new(dir.path().join("prefs.toml"));
        assert_eq!(store.load_language().await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlPreferenceStore::new(dir.path().join("nested/prefs.toml"));

        store.apply_language("es").await.unwrap();
        assert_eq!(store.load_language().await.unwrap().as_deref(), Some("es"));

        store.apply_language("ja").await.unwrap();
        assert_eq!(store.load_language().await.unwrap().as_deref(), Some("ja"));
    }

    #[tokio::test]
    async fn other_keys_survive_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "theme = \"dark\"\nlanguage = \"en\"\n").unwrap();

        let store = TomlPreferenceStore::new(&path);
        store.save_language("fr").await.unwrap();

        let table: toml::Table = std::fs::read_to_string(&path).unwrap().parse().unwrap();
        assert_eq!(table["theme"].as_str(), Some("dark"));
        assert_eq!(table["language"].as_str(), Some("fr"));
    }

    #[tokio::test]
    async fn corrupt_file_is_a_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "language = \n").unwrap();

        let store = TomlPreferenceStore::new(&path);
        let err = store.apply_language("es").await.unwrap_err();
        assert!(err.message().starts_with("failed to parse"));
    }
}
