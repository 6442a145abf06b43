use std::collections::HashMap;
use std::sync::OnceLock;

use serde_yaml::Value;
use thiserror::Error;

use crate::label::{ArgValue, Label, Message, StringKey};

const MAX_TABLE_ENTRIES: usize = 10_000;
const MAX_VALUE_BYTES: usize = 16 * 1024;
const MAX_EXPANDED_BYTES: usize = 64 * 1024;

/// Keys the language dialog looks up.
pub mod keys {
    use crate::label::StringKey;

    pub const DIALOG_TITLE: StringKey = StringKey(1);
    pub const SAVE: StringKey = StringKey(2);
    pub const CANCEL: StringKey = StringKey(3);
    pub const SAVE_FAILED: StringKey = StringKey(4);
    /// Takes an `{error}` argument.
    pub const SAVE_FAILED_DETAIL: StringKey = StringKey(5);
}

const BUILTIN_EN: &str = r#"
1: "Language"
2: "Save"
3: "Cancel"
4: "Language not saved"
5: "Your language preference could not be saved: {error}"
"#;

#[derive(Debug, Error)]
pub enum StringTableParseError {
    #[error("yaml string table error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("string table must be a mapping of numeric keys to strings")]
    NotAMapping,

    #[error("invalid key `{0}` (expected an unsigned 32-bit integer)")]
    InvalidKey(String),

    #[error("value for key {key} {msg}")]
    InvalidValue { key: StringKey, msg: String },

    #[error("too many entries (max {})", MAX_TABLE_ENTRIES)]
    TooManyEntries,
}

fn yaml_key(k: &Value) -> Result<u32, StringTableParseError> {
    let key = match k {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => {
            let s = s.trim();
            if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                s.parse().ok()
            } else {
                None
            }
        }
        _ => None,
    };
    key.ok_or_else(|| {
        let shown = match k {
            Value::String(s) => s.clone(),
            other => format!("{other:?}"),
        };
        StringTableParseError::InvalidKey(shown)
    })
}

/// UI strings addressed by numeric key.
///
/// Tables are YAML mappings (`2: "Save"`). Values may carry `{name}`
/// placeholders filled from message arguments.
#[derive(Clone, Debug, Default)]
pub struct StringTable {
    entries: HashMap<u32, String>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// English strings for every key in [`keys`].
    pub fn builtin_en() -> &'static StringTable {
        static EN: OnceLock<StringTable> = OnceLock::new();
        EN.get_or_init(|| StringTable::parse(BUILTIN_EN).unwrap_or_default())
    }

    pub fn insert(&mut self, key: impl Into<StringKey>, value: impl Into<String>) {
        self.entries.insert(key.into().0, value.into());
    }

    pub fn get(&self, key: StringKey) -> Option<&str> {
        self.entries.get(&key.0).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fill gaps in `self` from `other`; existing keys win.
    pub fn merge_missing(&mut self, other: &StringTable) {
        for (k, v) in &other.entries {
            self.entries.entry(*k).or_insert_with(|| v.clone());
        }
    }

    /// Parse a YAML mapping of numeric keys to strings. Blank input is an empty table.
    pub fn parse(src: &str) -> Result<Self, StringTableParseError> {
        let blank = src.lines().all(|l| {
            let l = l.trim();
            l.is_empty() || l.starts_with('#')
        });
        if blank {
            return Ok(Self::new());
        }

        let map = match serde_yaml::from_str::<Value>(src)? {
            Value::Null => return Ok(Self::new()),
            Value::Mapping(map) => map,
            _ => return Err(StringTableParseError::NotAMapping),
        };
        if map.len() > MAX_TABLE_ENTRIES {
            return Err(StringTableParseError::TooManyEntries);
        }

        let mut entries = HashMap::with_capacity(map.len());
        for (k, v) in map {
            let key = yaml_key(&k)?;
            let value = match v {
                Value::String(s) => s,
                _ => {
                    return Err(StringTableParseError::InvalidValue {
                        key: StringKey(key),
                        msg: "must be a string".to_string(),
                    })
                }
            };
            if value.len() > MAX_VALUE_BYTES {
                return Err(StringTableParseError::InvalidValue {
                    key: StringKey(key),
                    msg: format!("is too long (max {MAX_VALUE_BYTES} bytes)"),
                });
            }
            entries.insert(key, value);
        }
        Ok(Self { entries })
    }

    pub fn format_message(&self, msg: &Message) -> Option<String> {
        let tmpl = self.get(msg.key)?;
        Some(expand(tmpl, |name| {
            msg.args
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v)
        }))
    }

    /// Resolve a label against this table alone. Missing keys render as `#<key>`.
    pub fn resolve(&self, label: &Label) -> String {
        match label {
            Label::Raw(s) => s.clone(),
            Label::Msg(m) => self
                .format_message(m)
                .unwrap_or_else(|| m.key.to_string()),
        }
    }
}

/// Append `s` to `out` without growing past `MAX_EXPANDED_BYTES`.
/// Returns false once the limit is hit.
fn append_capped(out: &mut String, s: &str) -> bool {
    let room = MAX_EXPANDED_BYTES.saturating_sub(out.len());
    if s.len() <= room {
        out.push_str(s);
        return true;
    }
    let cut = (0..=room).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0);
    out.push_str(&s[..cut]);
    false
}

/// Fill `{name}` placeholders. `{{` and `}}` are literal braces; unknown
/// names and an unclosed `{` are kept as written.
fn expand<'a>(tmpl: &str, lookup: impl Fn(&str) -> Option<&'a ArgValue>) -> String {
    if !tmpl.contains(['{', '}']) {
        return tmpl.to_string();
    }

    let mut out = String::with_capacity(tmpl.len().min(MAX_EXPANDED_BYTES));
    let mut rest = tmpl;
    while let Some(pos) = rest.find(['{', '}']) {
        if !append_capped(&mut out, &rest[..pos]) {
            return out;
        }
        let tail = &rest[pos..];

        let (piece, consumed): (std::borrow::Cow<'_, str>, usize) =
            if tail.starts_with("{{") || tail.starts_with("}}") {
                (tail[..1].into(), 2)
            } else if tail.starts_with('}') {
                ("}".into(), 1)
            } else if let Some(close) = tail.find('}') {
                let name = tail[1..close].trim();
                let piece = match lookup(name) {
                    Some(ArgValue::Str(s)) => s.as_str().into(),
                    Some(ArgValue::Int(i)) => i.to_string().into(),
                    None if name.is_empty() => "{}".into(),
                    None => format!("{{{name}}}").into(),
                };
                (piece, close + 1)
            } else {
                (tail.into(), tail.len())
            };

        if !append_capped(&mut out, &piece) {
            return out;
        }
        rest = &tail[consumed..];
    }
    append_capped(&mut out, rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fill(tmpl: &str, error: Option<&str>) -> String {
        let mut table = StringTable::new();
        table.insert(9u32, tmpl);
        let mut msg = Message::new(9u32);
        if let Some(e) = error {
            msg = msg.arg("error", e);
        }
        table.format_message(&msg).unwrap()
    }

    #[test]
    fn parse_yaml_and_lookup() {
        let src = r#"
1: "Idioma"
5: "No se pudo guardar: {error}"
"#;

        let table = StringTable::parse(src).unwrap();
        assert_eq!(table.get(StringKey(1)), Some("Idioma"));

        let s = table
            .format_message(&Message::new(keys::SAVE_FAILED_DETAIL).arg("error", "disk full"))
            .unwrap();
        assert_eq!(s, "No se pudo guardar: disk full");
    }

    #[test]
    fn parse_yaml_with_quoted_numeric_keys() {
        let table = StringTable::parse("\"2\": Guardar\n").unwrap();
        assert_eq!(table.get(keys::SAVE), Some("Guardar"));
    }

    #[test]
    fn blank_source_is_an_empty_table() {
        assert!(StringTable::parse("").unwrap().is_empty());
        assert!(StringTable::parse("# nothing yet\n").unwrap().is_empty());
    }

    #[test]
    fn malformed_sources_are_rejected() {
        assert!(matches!(
            StringTable::parse("save: \"Save\"\n"),
            Err(StringTableParseError::InvalidKey(ref k)) if k == "save"
        ));
        assert!(matches!(
            StringTable::parse("1: 123\n"),
            Err(StringTableParseError::InvalidValue { key: StringKey(1), .. })
        ));
        assert!(matches!(
            StringTable::parse("- a\n- b\n"),
            Err(StringTableParseError::NotAMapping)
        ));
        assert!(matches!(
            StringTable::parse("2 = Speichern\n"),
            Err(StringTableParseError::NotAMapping)
        ));
        assert!(matches!(
            StringTable::parse("1: [unclosed\n"),
            Err(StringTableParseError::Yaml(_))
        ));
    }

    #[test]
    fn escaped_braces() {
        assert_eq!(fill("{{error}}", Some("x")), "{error}");
        assert_eq!(fill("{{{error}}}", Some("x")), "{x}");
        assert_eq!(fill("}}", None), "}");
        assert_eq!(fill("{{", None), "{");
    }

    #[test]
    fn unknown_and_unclosed_placeholders_are_literal() {
        assert_eq!(fill("a {missing} b", None), "a {missing} b");
        assert_eq!(fill("Oops {error", Some("x")), "Oops {error");
        assert_eq!(fill("empty {} braces", None), "empty {} braces");
    }

    #[test]
    fn integer_arguments_render() {
        let mut table = StringTable::new();
        table.insert(9u32, "{n} languages");
        let msg = Message::new(9u32).arg("n", 12usize);
        assert_eq!(table.format_message(&msg).unwrap(), "12 languages");
    }

    #[test]
    fn placeholder_output_is_limited() {
        let big = "é".repeat(MAX_EXPANDED_BYTES);
        let s = fill("{error}{error}", Some(&big));
        assert!(s.len() <= MAX_EXPANDED_BYTES);
        assert!(s.chars().all(|c| c == 'é'));
    }

    #[test]
    fn builtin_table_covers_dialog_keys() {
        let en = StringTable::builtin_en();
        for key in [
            keys::DIALOG_TITLE,
            keys::SAVE,
            keys::CANCEL,
            keys::SAVE_FAILED,
            keys::SAVE_FAILED_DETAIL,
        ] {
            assert!(en.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn missing_key_resolves_to_marker() {
        let table = StringTable::new();
        assert_eq!(table.resolve(&Label::from(StringKey(42))), "#42");
        assert_eq!(table.resolve(&Label::raw("plain")), "plain");
    }
}
