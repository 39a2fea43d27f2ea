/*============================================================
  Synavera Project: Syn-Assign
  Module: synassign_core::model
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Shared records describing assignments, submissions, plugin
    descriptors, learner input and offline submission data,
    plus the caller-owned plugin data accumulator.

  Security / Safety Notes:
    Pure data containers; no I/O performed in this module.

  Dependencies:
    serde and serde_json for site payload compatibility.

  Operational Scope:
    Passed through submission handlers untouched, except for
    the accumulator which hooks may append network fields to.

  Revision History:
    2026-09-21 COD  Introduced shared submission records.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Clear data contracts between modules
    - Serializable structures for report output
============================================================*/

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A gradable assignment instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Assignment {
    pub id: u64,
    #[serde(default)]
    pub cmid: Option<u64>,
    #[serde(default)]
    pub course: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One learner's submission for an assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Submission {
    pub id: u64,
    #[serde(default)]
    pub userid: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub attemptnumber: Option<i64>,
    #[serde(default)]
    pub timemodified: Option<i64>,
    #[serde(default)]
    pub plugins: Vec<PluginDescriptor>,
}

/// Metadata about a configured submission type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginDescriptor {
    #[serde(rename = "type")]
    pub plugin_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fileareas: Vec<FileArea>,
    #[serde(default)]
    pub editorfields: Vec<EditorField>,
    #[serde(default)]
    pub configs: BTreeMap<String, String>,
}

impl PluginDescriptor {
    pub fn new<S: Into<String>>(plugin_type: S) -> Self {
        Self {
            plugin_type: plugin_type.into(),
            ..Self::default()
        }
    }

    /// Every file of every file area, in declaration order.
    pub fn attachments(&self) -> Vec<PluginFile> {
        self.fileareas
            .iter()
            .flat_map(|area| area.files.iter().cloned())
            .collect()
    }

    /// Saved text of the named editor field, if present.
    pub fn editor_text(&self, field: &str) -> Option<&str> {
        self.editorfields
            .iter()
            .find(|editor| editor.name == field)
            .map(|editor| editor.text.as_str())
    }

    pub fn config(&self, key: &str) -> Option<&str> {
        self.configs.get(key).map(String::as_str)
    }
}

/// A named group of files attached through a plugin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileArea {
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub files: Vec<PluginFile>,
}

/// A remote file referenced by a plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginFile {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub filepath: Option<String>,
    #[serde(default)]
    pub fileurl: String,
    #[serde(default)]
    pub filesize: u64,
    #[serde(default)]
    pub timemodified: Option<i64>,
    #[serde(default)]
    pub mimetype: Option<String>,
}

/// Rich text stored by an editor-based plugin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorField {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub format: Option<i64>,
}

/// Locally persisted submission data awaiting synchronisation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfflineSubmission {
    pub assignid: u64,
    #[serde(default)]
    pub userid: Option<u64>,
    #[serde(default)]
    pub courseid: Option<u64>,
    #[serde(default)]
    pub plugindata: Map<String, Value>,
    #[serde(default)]
    pub timemodified: Option<i64>,
    #[serde(default)]
    pub submitted: bool,
}

/// Transient form data entered by the learner, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputData(Map<String, Value>);

impl InputData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<K: Into<String>>(mut self, key: K, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value of a field; non-string values read as absent.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// Caller-owned bag that hooks append network-bound fields into.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginData(Map<String, Value>);

impl PluginData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>>(&mut self, key: K, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn descriptor_deserializes_site_shape() {
        let plugin: PluginDescriptor = serde_json::from_value(json!({
            "type": "onlinetext",
            "name": "Online text",
            "fileareas": [
                {"area": "submissions_onlinetext", "files": [
                    {"filename": "a.png", "fileurl": "https://site/a.png", "filesize": 10},
                    {"filename": "b.png", "fileurl": "https://site/b.png", "filesize": 20}
                ]}
            ],
            "editorfields": [
                {"name": "onlinetext", "text": "<p>Hello</p>", "format": 1}
            ]
        }))
        .unwrap();

        assert_eq!(plugin.plugin_type, "onlinetext");
        assert_eq!(plugin.name.as_deref(), Some("Online text"));
        let files = plugin.attachments();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].filename, "a.png");
        assert_eq!(files[1].filesize, 20);
        assert_eq!(plugin.editor_text("onlinetext"), Some("<p>Hello</p>"));
        assert_eq!(plugin.editor_text("missing"), None);
    }

    #[test]
    fn input_text_ignores_non_strings() {
        let input = InputData::new()
            .with("onlinetext_editor_text", json!("draft"))
            .with("count", json!(3));
        assert_eq!(input.text("onlinetext_editor_text"), Some("draft"));
        assert_eq!(input.text("count"), None);
        assert_eq!(input.get("count"), Some(&json!(3)));
    }

    #[test]
    fn plugin_data_serializes_as_plain_object() {
        let mut data = PluginData::new();
        assert!(data.is_empty());
        data.insert("onlinetext_editor", json!({"text": "x"}));
        assert_eq!(data.len(), 1);
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({"onlinetext_editor": {"text": "x"}})
        );
    }
}
