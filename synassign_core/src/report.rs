/*============================================================
  Synavera Project: Syn-Assign
  Module: synassign_core::report
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Evaluate the handler of every plugin in a submission and
    assemble a capability report: names, flags, files, sizes
    and the payload each handler would send.

  Security / Safety Notes:
    Reports are written to operator-controlled paths; payloads
    contain learner text and should be treated accordingly.

  Dependencies:
    serde for JSON serialization, chrono for timestamps.

  Operational Scope:
    Driven by the binary entry point; usable as a library call.

  Revision History:
    2026-09-24 COD  Authored capability report builder.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Deterministic ordering for reproducible reports
    - Prepare failures recorded per plugin, not fatal
    - Rich metadata for audit and observability
============================================================*/

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SynassignError};
use crate::handler::{ComponentContext, PluginComponent, SubmissionHandler};
use crate::lang::Translator;
use crate::logger::Logger;
use crate::model::{
    Assignment, InputData, OfflineSubmission, PluginData, PluginDescriptor, PluginFile,
    Submission,
};
use crate::plugins::builtin_handler;

/// Input document: a submission plus optional learner input and offline data.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionDocument {
    pub assignment: Assignment,
    pub submission: Submission,
    #[serde(default)]
    pub input: InputData,
    #[serde(default)]
    pub offline: Option<OfflineSubmission>,
}

impl SubmissionDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            SynassignError::Filesystem(format!(
                "Failed to read submission document {}: {err}",
                path.display()
            ))
        })?;
        serde_json::from_str(&raw).map_err(|err| {
            SynassignError::Serialization(format!(
                "Failed to decode submission document {}: {err}",
                path.display()
            ))
        })
    }
}

/// Wrapper representing the full report document.
#[derive(Debug, Serialize)]
pub struct ReportDocument {
    pub metadata: ReportMetadata,
    pub plugins: BTreeMap<String, PluginReport>,
}

#[derive(Debug, Serialize)]
pub struct ReportMetadata {
    pub generated_at: String,
    pub generated_by: String,
    pub assignment_id: u64,
    pub submission_id: u64,
    pub total_plugins: usize,
    pub empty_plugins: usize,
    pub changed_plugins: usize,
    pub size_for_edit_total: u64,
}

/// Where the prepared payload came from.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PayloadSource {
    Input,
    Offline,
}

/// Per-plugin report entry.
#[derive(Debug, Serialize)]
pub struct PluginReport {
    pub handler: String,
    pub display_name: Option<String>,
    pub enabled: bool,
    pub enabled_for_edit: bool,
    pub empty: bool,
    pub can_edit_offline: bool,
    pub has_data_changed: bool,
    pub component: Option<PluginComponent>,
    pub files: Vec<PluginFile>,
    pub size_for_copy: u64,
    pub size_for_edit: u64,
    pub payload_source: PayloadSource,
    pub payload: Map<String, Value>,
    pub notes: Option<String>,
}

/// Build a report for every plugin of the document's submission.
pub async fn build_report(
    document: &SubmissionDocument,
    translator: Arc<dyn Translator>,
    logger: &Logger,
) -> Result<ReportDocument> {
    let mut entries: BTreeMap<String, PluginReport> = BTreeMap::new();

    for plugin in &document.submission.plugins {
        let handler = builtin_handler(&plugin.plugin_type, translator.clone());
        let entry = evaluate_plugin(handler.as_ref(), document, plugin, logger).await?;

        logger.debug(
            "PLUGIN",
            format!(
                "{} handled by {} (files={}, payload fields={})",
                plugin.plugin_type,
                entry.handler,
                entry.files.len(),
                entry.payload.len()
            ),
        );
        if entries.insert(plugin.plugin_type.clone(), entry).is_some() {
            logger.warn(
                "DUPLICATE",
                format!(
                    "Plugin type {} listed more than once; keeping the last entry",
                    plugin.plugin_type
                ),
            );
        }
    }

    // Totals cover kept entries only.
    let empty_plugins = entries.values().filter(|entry| entry.empty).count();
    let changed_plugins = entries
        .values()
        .filter(|entry| entry.has_data_changed)
        .count();
    let size_for_edit_total = entries
        .values()
        .fold(0u64, |total, entry| total.saturating_add(entry.size_for_edit));

    let metadata = ReportMetadata {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        generated_by: "synassign_core".to_string(),
        assignment_id: document.assignment.id,
        submission_id: document.submission.id,
        total_plugins: entries.len(),
        empty_plugins,
        changed_plugins,
        size_for_edit_total,
    };

    Ok(ReportDocument {
        metadata,
        plugins: entries,
    })
}

async fn evaluate_plugin(
    handler: &dyn SubmissionHandler,
    document: &SubmissionDocument,
    plugin: &PluginDescriptor,
    logger: &Logger,
) -> Result<PluginReport> {
    let assign = &document.assignment;
    let submission = &document.submission;
    let input = &document.input;
    let context = ComponentContext::new().with("assignid", assign.id.to_string());

    let enabled = handler.is_enabled().await?;
    let enabled_for_edit = handler.is_enabled_for_edit().await?;

    handler.prefetch(assign, submission, plugin, None).await?;
    let files = handler
        .get_plugin_files(assign, submission, plugin, None)
        .await?;

    let mut payload = PluginData::new();
    let (payload_source, prepared) = match &document.offline {
        Some(offline) => (
            PayloadSource::Offline,
            handler
                .prepare_sync_data(assign, submission, plugin, offline, &mut payload, None)
                .await,
        ),
        None => (
            PayloadSource::Input,
            handler
                .prepare_submission_data(
                    assign,
                    submission,
                    plugin,
                    input,
                    &mut payload,
                    false,
                    submission.userid,
                    None,
                )
                .await,
        ),
    };
    let notes = match prepared {
        Ok(()) => None,
        Err(err) => {
            logger.warn(
                "PREPARE",
                format!("{} could not prepare its payload: {err}", plugin.plugin_type),
            );
            Some(err.to_string())
        }
    };

    Ok(PluginReport {
        handler: handler.name().to_string(),
        display_name: handler.get_plugin_name(plugin),
        enabled,
        enabled_for_edit,
        empty: handler.is_empty(assign, plugin),
        can_edit_offline: handler.can_edit_offline(assign, submission, plugin),
        has_data_changed: handler
            .has_data_changed(assign, submission, plugin, input)
            .await?,
        component: handler
            .get_component(&context, plugin, enabled_for_edit)
            .await?,
        files,
        size_for_copy: handler.get_size_for_copy(assign, plugin).await?,
        size_for_edit: handler
            .get_size_for_edit(assign, submission, plugin, input)
            .await?,
        payload_source,
        payload: payload.into_inner(),
        notes,
    })
}

/// Persist the report to the given path.
pub fn write_report(document: &ReportDocument, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| {
            SynassignError::Filesystem(format!(
                "Failed to create report directory {}: {err}",
                parent.display()
            ))
        })?;
    }
    let file = File::create(path).map_err(|err| {
        SynassignError::Filesystem(format!(
            "Failed to create report file {}: {err}",
            path.display()
        ))
    })?;
    serde_json::to_writer_pretty(file, document).map_err(|err| {
        SynassignError::Filesystem(format!("Failed to write report {}: {err}", path.display()))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::lang::LangStrings;

    fn document(offline: Option<Value>) -> SubmissionDocument {
        let mut raw = json!({
            "assignment": {"id": 5, "cmid": 50, "name": "Essay"},
            "submission": {
                "id": 9,
                "userid": 3,
                "status": "draft",
                "plugins": [
                    {"type": "onlinetext", "name": "Online text",
                     "editorfields": [{"name": "onlinetext", "text": "<p>draft one</p>", "format": 1}],
                     "fileareas": [{"area": "submissions_onlinetext", "files": [
                        {"filename": "fig.png", "fileurl": "https://school.example/fig.png", "filesize": 100}
                     ]}],
                     "configs": {"wordlimitenabled": "1", "wordlimit": "10"}},
                    {"type": "file", "name": "File submissions"},
                    {"type": "comments"}
                ]
            },
            "input": {"onlinetext_editor_text": "<p>draft two</p>"}
        });
        if let Some(offline) = offline {
            raw["offline"] = offline;
        }
        serde_json::from_value(raw).unwrap()
    }

    fn translator() -> Arc<dyn Translator> {
        let mut strings = LangStrings::new();
        strings.insert(
            "addon.mod_assign_submission_comments.pluginname",
            "Submission comments",
        );
        Arc::new(strings)
    }

    #[tokio::test]
    async fn report_covers_every_plugin_in_type_order() {
        let report = build_report(&document(None), translator(), &Logger::quiet())
            .await
            .unwrap();

        let types: Vec<&str> = report.plugins.keys().map(String::as_str).collect();
        assert_eq!(types, vec!["comments", "file", "onlinetext"]);
        assert_eq!(report.metadata.total_plugins, 3);
        assert_eq!(report.metadata.assignment_id, 5);
        assert_eq!(report.metadata.submission_id, 9);
        assert_eq!(report.metadata.changed_plugins, 1);
        assert_eq!(report.metadata.empty_plugins, 2);

        let text = &report.plugins["onlinetext"];
        assert_eq!(text.display_name.as_deref(), Some("Online text"));
        assert!(text.has_data_changed);
        assert!(!text.empty);
        assert_eq!(text.files.len(), 1);
        assert_eq!(text.size_for_edit, "<p>draft two</p>".len() as u64);
        assert_eq!(report.metadata.size_for_edit_total, text.size_for_edit);
        assert_eq!(text.payload_source, PayloadSource::Input);
        assert_eq!(
            text.payload.get("onlinetext_editor").and_then(|v| v.get("text")),
            Some(&json!("<p>draft two</p>"))
        );
        assert!(text.notes.is_none());

        let file = &report.plugins["file"];
        assert_eq!(file.handler, "AddonModAssignBaseSubmissionHandler");
        assert_eq!(file.display_name.as_deref(), Some("File submissions"));
        assert!(file.enabled);
        assert!(!file.enabled_for_edit);
        assert!(file.files.is_empty());
        assert!(file.payload.is_empty());
        assert!(file.component.is_none());

        let comments = &report.plugins["comments"];
        assert_eq!(comments.display_name.as_deref(), Some("Submission comments"));
        assert!(comments.can_edit_offline);
        assert!(comments.component.is_some());
    }

    #[tokio::test]
    async fn offline_data_drives_payload() {
        let offline = json!({
            "assignid": 5,
            "plugindata": {"onlinetext_editor": {"text": "stored", "format": 1, "itemid": 0}}
        });
        let report = build_report(&document(Some(offline)), translator(), &Logger::quiet())
            .await
            .unwrap();
        let text = &report.plugins["onlinetext"];
        assert_eq!(text.payload_source, PayloadSource::Offline);
        assert_eq!(
            text.payload.get("onlinetext_editor").and_then(|v| v.get("text")),
            Some(&json!("stored"))
        );
    }

    #[tokio::test]
    async fn prepare_failure_becomes_note() {
        let mut doc = document(None);
        doc.input = InputData::new().with(
            "onlinetext_editor_text",
            json!("one two three four five six seven eight nine ten eleven"),
        );
        let report = build_report(&doc, translator(), &Logger::quiet())
            .await
            .unwrap();
        let text = &report.plugins["onlinetext"];
        assert!(text.payload.is_empty());
        assert!(text
            .notes
            .as_deref()
            .unwrap_or_default()
            .contains("Word limit exceeded"));
    }

    #[tokio::test]
    async fn duplicate_types_keep_last_entry_and_totals_agree() {
        let mut doc = document(None);
        let text = doc.submission.plugins[0].clone();
        doc.submission.plugins = vec![text.clone(), text];
        doc.input = InputData::new().with("onlinetext_editor_text", json!("changed text"));

        let report = build_report(&doc, translator(), &Logger::quiet())
            .await
            .unwrap();

        assert_eq!(report.metadata.total_plugins, 1);
        assert_eq!(report.plugins.len(), 1);
        assert_eq!(report.metadata.changed_plugins, 1);
        assert!(report.metadata.changed_plugins <= report.metadata.total_plugins);
        assert!(report.metadata.empty_plugins <= report.metadata.total_plugins);
        let entry_sum: u64 = report.plugins.values().map(|entry| entry.size_for_edit).sum();
        assert_eq!(report.metadata.size_for_edit_total, entry_sum);
        assert_eq!(entry_sum, "changed text".len() as u64);
    }

    #[tokio::test]
    async fn report_round_trips_to_disk() {
        let report = build_report(&document(None), translator(), &Logger::quiet())
            .await
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.json");
        write_report(&report, &path).unwrap();

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["metadata"]["generated_by"], json!("synassign_core"));
        assert_eq!(written["plugins"]["file"]["display_name"], json!("File submissions"));
        assert_eq!(written["plugins"]["onlinetext"]["component"]["mode"], json!("edit"));
    }

    #[test]
    fn load_rejects_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submission.json");
        std::fs::write(&path, "{\"assignment\": {}}").unwrap();
        assert!(matches!(
            SubmissionDocument::load(&path),
            Err(SynassignError::Serialization(_))
        ));
    }
}
