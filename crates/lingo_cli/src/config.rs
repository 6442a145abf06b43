//! Lingo configuration file handling

use anyhow::{Context, Result};
use lingo_i18n::{locale_fallback_chain, LocaleCatalog, LocaleTables, StringTable, DEFAULT_LOCALE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Catalog used when `[catalog] path` is not set.
const BUILTIN_CATALOG: &str = r#"
de: ["de_DE", "German", "Deutsch"]
en: ["en_US", "English", "English"]
es: ["es_ES", "Spanish", "Español"]
fr: ["fr_FR", "French", "Français"]
it: ["it_IT", "Italian", "Italiano"]
ja: ["ja_JP", "Japanese", "日本語"]
ko: ["ko_KR", "Korean", "한국어"]
pt-BR: ["pt_BR", "Portuguese (Brazil)", "Português (Brasil)"]
ru: ["ru_RU", "Russian", "Русский"]
zh-CN: ["zh_CN", "Chinese (Simplified)", "简体中文"]
"#;

/// Top-level Lingo configuration (lingo.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LingoConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub strings: StringsConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,

    /// Directory relative paths are resolved against
    #[serde(skip)]
    base_dir: PathBuf,
}

/// Where the language list comes from
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// YAML catalog file; the built-in list is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// UI string tables
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StringsConfig {
    /// Directory holding `<locale>.yaml` string tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Saved language preference
#[derive(Debug, Deserialize, Serialize)]
pub struct PreferencesConfig {
    #[serde(default = "default_preferences_path")]
    pub path: PathBuf,
    #[serde(default = "default_language")]
    pub default_language: String,
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from("preferences.toml")
}

fn default_language() -> String {
    DEFAULT_LOCALE.to_string()
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            path: default_preferences_path(),
            default_language: default_language(),
        }
    }
}

impl LingoConfig {
    /// Load configuration from a file, falling back to defaults when it doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self {
                base_dir,
                ..Self::default()
            });
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let mut config: LingoConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.base_dir = base_dir;

        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    fn resolve(&self, p: &Path) -> PathBuf {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.base_dir.join(p)
        }
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.resolve(&self.preferences.path)
    }

    pub fn load_catalog(&self) -> Result<LocaleCatalog> {
        let Some(ref path) = self.catalog.path else {
            return LocaleCatalog::parse_yaml(BUILTIN_CATALOG)
                .context("Failed to parse built-in catalog");
        };

        let path = self.resolve(path);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        LocaleCatalog::parse_yaml(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// String table for `language`, walking its fallback chain over the
    /// files in `[strings] dir`. Missing files are skipped.
    pub fn load_strings(&self, language: &str) -> Result<StringTable> {
        let mut tables = LocaleTables::new(language);
        let Some(ref dir) = self.strings.dir else {
            return Ok(tables.snapshot());
        };

        let dir = self.resolve(dir);
        for locale in locale_fallback_chain(language) {
            let path = dir.join(format!("{locale}.yaml"));
            if !path.exists() {
                continue;
            }
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            tables
                .load_str(&locale, &content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            debug!(locale = %locale, path = %path.display(), "loaded string table");
        }

        Ok(tables.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_i18n::keys;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = LingoConfig::load(&dir.path().join("lingo.toml")).unwrap();

        assert_eq!(config.preferences.default_language, "en-US");
        assert_eq!(
            config.preferences_path(),
            dir.path().join("preferences.toml")
        );
        assert_eq!(config.load_catalog().unwrap().len(), 10);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lingo.toml");
        fs::write(&path, "[preferences]\ndefault_language = \"es\"\n").unwrap();

        let config = LingoConfig::load(&path).unwrap();
        assert_eq!(config.preferences.default_language, "es");
        assert_eq!(config.preferences.path, PathBuf::from("preferences.toml"));
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lingo.toml");
        fs::write(&path, "[preferences\n").unwrap();
        assert!(LingoConfig::load(&path).is_err());
    }

    #[test]
    fn catalog_path_is_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("langs.yaml"),
            "en: [\"en_US\", \"English\", \"English\"]\n",
        )
        .unwrap();
        let path = dir.path().join("lingo.toml");
        fs::write(&path, "[catalog]\npath = \"langs.yaml\"\n").unwrap();

        let catalog = LingoConfig::load(&path).unwrap().load_catalog().unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn strings_follow_fallback_chain() {
        let dir = tempfile::tempdir().unwrap();
        let strings = dir.path().join("strings");
        fs::create_dir_all(&strings).unwrap();
        fs::write(strings.join("es.yaml"), "2: Guardar\n").unwrap();
        let path = dir.path().join("lingo.toml");
        fs::write(&path, "[strings]\ndir = \"strings\"\n").unwrap();

        let table = LingoConfig::load(&path).unwrap().load_strings("es-MX").unwrap();
        assert_eq!(table.get(keys::SAVE), Some("Guardar"));
        assert_eq!(table.get(keys::CANCEL), Some("Cancel"));
    }

    #[test]
    fn default_config_round_trips() {
        let text = LingoConfig::default().to_toml().unwrap();
        let parsed: LingoConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.preferences.default_language, "en-US");
    }
}
