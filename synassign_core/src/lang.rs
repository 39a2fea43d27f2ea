/*============================================================
  Synavera Project: Syn-Assign
  Module: synassign_core::lang
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Translation lookup used by submission handlers to resolve
    plugin display names, plus an in-memory string table that
    can be loaded from TOML or JSON language packs.

  Security / Safety Notes:
    Language packs are read from operator-controlled paths and
    never executed; values are treated as plain text.

  Dependencies:
    toml and serde_json for language pack parsing.

  Operational Scope:
    Shared by every handler through an Arc<dyn Translator>.

  Revision History:
    2026-09-21 COD  Authored translation collaborator.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Explicit miss convention, documented at the seam
    - Structured parsing with clear failure modes
============================================================*/

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Result, SynassignError};

/// Key prefix for submission plugin language strings.
const PLUGIN_KEY_PREFIX: &str = "addon.mod_assign_submission_";

/// String lookup service.
///
/// `instant` returns the key itself when no translation is registered.
/// Callers detect a miss by comparing the result against the key.
pub trait Translator: Send + Sync {
    fn instant(&self, key: &str) -> String;
}

/// Translate `key`, returning `None` when the lookup echoes the key back.
///
/// A string registered as its own translation is indistinguishable from
/// a miss and is reported as `None`.
pub fn translate_if_known(translator: &dyn Translator, key: &str) -> Option<String> {
    let translated = translator.instant(key);
    if translated == key {
        None
    } else {
        Some(translated)
    }
}

/// Language key holding the display name of a submission plugin type.
pub fn plugin_name_key(plugin_type: &str) -> String {
    format!("{PLUGIN_KEY_PREFIX}{plugin_type}.pluginname")
}

/// In-memory string table.
#[derive(Debug, Clone, Default)]
pub struct LangStrings {
    strings: HashMap<String, String>,
}

impl LangStrings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.strings.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Load a language pack. `.json` files are parsed as JSON, anything
    /// else as TOML. Nested tables are flattened into dotted keys.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            SynassignError::Filesystem(format!(
                "Failed to read language pack {}: {err}",
                path.display()
            ))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json_str(&raw).map_err(|err| with_path(err, path))
        } else {
            Self::from_toml_str(&raw).map_err(|err| with_path(err, path))
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let table: toml::Table = raw.parse().map_err(|err| {
            SynassignError::Serialization(format!("Invalid TOML language pack: {err}"))
        })?;
        let mut strings = HashMap::new();
        for (key, value) in table {
            flatten_toml(&key, &value, &mut strings);
        }
        Ok(Self { strings })
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw).map_err(|err| {
            SynassignError::Serialization(format!("Invalid JSON language pack: {err}"))
        })?;
        let serde_json::Value::Object(object) = value else {
            return Err(SynassignError::Serialization(
                "JSON language pack must be an object".into(),
            ));
        };
        let mut strings = HashMap::new();
        for (key, value) in object {
            flatten_json(&key, &value, &mut strings);
        }
        Ok(Self { strings })
    }
}

impl Translator for LangStrings {
    fn instant(&self, key: &str) -> String {
        self.strings
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

fn with_path(err: SynassignError, path: &Path) -> SynassignError {
    match err {
        SynassignError::Serialization(message) => {
            SynassignError::Serialization(format!("{message} ({})", path.display()))
        }
        other => other,
    }
}

fn flatten_toml(prefix: &str, value: &toml::Value, out: &mut HashMap<String, String>) {
    match value {
        toml::Value::String(text) => {
            out.insert(prefix.to_string(), text.clone());
        }
        toml::Value::Table(table) => {
            for (key, nested) in table {
                flatten_toml(&format!("{prefix}.{key}"), nested, out);
            }
        }
        // Non-string scalars are not valid language strings.
        _ => {}
    }
}

fn flatten_json(prefix: &str, value: &serde_json::Value, out: &mut HashMap<String, String>) {
    match value {
        serde_json::Value::String(text) => {
            out.insert(prefix.to_string(), text.clone());
        }
        serde_json::Value::Object(object) => {
            for (key, nested) in object {
                flatten_json(&format!("{prefix}.{key}"), nested, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn plugin_name_key_format() {
        assert_eq!(
            plugin_name_key("file"),
            "addon.mod_assign_submission_file.pluginname"
        );
    }

    #[test]
    fn miss_echoes_key() {
        let strings = LangStrings::new();
        assert_eq!(strings.instant("some.key"), "some.key");
        assert_eq!(translate_if_known(&strings, "some.key"), None);
    }

    #[test]
    fn self_translation_reads_as_miss() {
        let mut strings = LangStrings::new();
        strings.insert("echo", "echo");
        assert_eq!(translate_if_known(&strings, "echo"), None);
    }

    #[test]
    fn toml_quoted_and_dotted_keys_flatten_alike() {
        let strings = LangStrings::from_toml_str(
            r#"
"addon.mod_assign_submission_file.pluginname" = "File submissions"

[addon.mod_assign_submission_onlinetext]
pluginname = "Online text"
wordlimit = 5
"#,
        )
        .unwrap();
        assert_eq!(strings.len(), 2);
        assert_eq!(
            strings.instant("addon.mod_assign_submission_file.pluginname"),
            "File submissions"
        );
        assert_eq!(
            strings.instant("addon.mod_assign_submission_onlinetext.pluginname"),
            "Online text"
        );
    }

    #[test]
    fn json_pack_requires_object() {
        assert!(matches!(
            LangStrings::from_json_str("[1, 2]"),
            Err(SynassignError::Serialization(_))
        ));
    }

    #[test]
    fn load_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"addon": {{"mod_assign_submission_comments": {{"pluginname": "Submission comments"}}}}}}"#
        )
        .unwrap();
        drop(file);

        let strings = LangStrings::load(&path).unwrap();
        assert_eq!(
            translate_if_known(&strings, &plugin_name_key("comments")).as_deref(),
            Some("Submission comments")
        );
    }

    #[test]
    fn load_missing_file_is_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LangStrings::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, SynassignError::Filesystem(_)));
    }
}
