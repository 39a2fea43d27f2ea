/*============================================================
  Synavera Project: Syn-Assign
  Module: synassign_core::plugins::onlinetext
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Handler for online text submissions: rich text typed by
    the learner plus files embedded in that text.

  Security / Safety Notes:
    Submission text is copied into the payload verbatim and
    never logged or echoed into error messages.

  Dependencies:
    async-trait for the handler implementation, serde_json for
    payload construction.

  Operational Scope:
    Selected by builtin_handler for the `onlinetext` type.

  Revision History:
    2026-09-22 COD  Added online text handler.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Override only what differs from the defaults
    - Word limits enforced before the accumulator is touched
============================================================*/

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{Result, SynassignError};
use crate::handler::{
    ComponentContext, ComponentMode, DefaultSubmissionHandler, PluginComponent,
    SubmissionHandler,
};
use crate::lang::Translator;
use crate::model::{
    Assignment, InputData, OfflineSubmission, PluginData, PluginDescriptor, PluginFile,
    Submission,
};

const EDITOR_FIELD: &str = "onlinetext";
const INPUT_TEXT_FIELD: &str = "onlinetext_editor_text";
const PAYLOAD_FIELD: &str = "onlinetext_editor";
const FORMAT_HTML: i64 = 1;

#[derive(Clone)]
pub struct OnlineTextHandler {
    defaults: DefaultSubmissionHandler,
}

impl OnlineTextHandler {
    pub const NAME: &'static str = "AddonModAssignSubmissionOnlineTextHandler";
    pub const TYPE: &'static str = "onlinetext";

    pub fn new(defaults: DefaultSubmissionHandler) -> Self {
        Self { defaults }
    }

    fn saved_text(plugin: &PluginDescriptor) -> &str {
        plugin.editor_text(EDITOR_FIELD).unwrap_or_default()
    }

    /// Input text when the learner has touched the field, otherwise the saved text.
    fn text_to_submit<'a>(plugin: &'a PluginDescriptor, input: &'a InputData) -> &'a str {
        input
            .text(INPUT_TEXT_FIELD)
            .unwrap_or_else(|| Self::saved_text(plugin))
    }

    fn check_word_limit(plugin: &PluginDescriptor, text: &str) -> Result<()> {
        if plugin.config("wordlimitenabled") != Some("1") {
            return Ok(());
        }
        let limit = plugin
            .config("wordlimit")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if limit == 0 {
            return Ok(());
        }
        let words = count_words(text);
        if words > limit {
            return Err(SynassignError::WordLimitExceeded { words, limit });
        }
        Ok(())
    }
}

fn editor_payload(text: &str) -> Value {
    json!({
        "text": text,
        "format": FORMAT_HTML,
        "itemid": 0,
    })
}

/// Remove markup and decode the standard HTML entities, leaving the
/// visible text.
fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => {
                in_tag = true;
                // Tags separate words.
                out.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    decode_entities(&out)
}

// `&amp;` goes last so `&amp;lt;` decodes to the literal `&lt;`.
const ENTITIES: [(&str, &str); 7] = [
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&amp;", "&"),
];

fn decode_entities(text: &str) -> String {
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, &(entity, plain)| acc.replace(entity, plain))
}

/// Words are whitespace-separated runs holding at least one letter or digit.
fn count_words(html: &str) -> usize {
    strip_html(html)
        .split_whitespace()
        .filter(|word| word.chars().any(char::is_alphanumeric))
        .count()
}

#[async_trait]
impl SubmissionHandler for OnlineTextHandler {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn plugin_type(&self) -> &str {
        Self::TYPE
    }

    fn translator(&self) -> &dyn Translator {
        self.defaults.translator()
    }

    fn is_empty(&self, _assign: &Assignment, plugin: &PluginDescriptor) -> bool {
        strip_html(Self::saved_text(plugin)).trim().is_empty() && plugin.attachments().is_empty()
    }

    async fn copy_submission_data(
        &self,
        _assign: &Assignment,
        plugin: &PluginDescriptor,
        plugin_data: &mut PluginData,
        _user_id: Option<u64>,
        _site_id: Option<&str>,
    ) -> Result<()> {
        plugin_data.insert(PAYLOAD_FIELD, editor_payload(Self::saved_text(plugin)));
        Ok(())
    }

    async fn get_component(
        &self,
        _context: &ComponentContext,
        _plugin: &PluginDescriptor,
        edit: bool,
    ) -> Result<Option<PluginComponent>> {
        Ok(Some(PluginComponent::new(
            Self::TYPE,
            ComponentMode::from_edit(edit),
        )))
    }

    async fn get_plugin_files(
        &self,
        _assign: &Assignment,
        _submission: &Submission,
        plugin: &PluginDescriptor,
        _site_id: Option<&str>,
    ) -> Result<Vec<PluginFile>> {
        Ok(plugin.attachments())
    }

    async fn get_size_for_copy(
        &self,
        _assign: &Assignment,
        plugin: &PluginDescriptor,
    ) -> Result<u64> {
        let files: u64 = plugin
            .attachments()
            .iter()
            .fold(0u64, |total, file| total.saturating_add(file.filesize));
        Ok((Self::saved_text(plugin).len() as u64).saturating_add(files))
    }

    async fn get_size_for_edit(
        &self,
        _assign: &Assignment,
        _submission: &Submission,
        _plugin: &PluginDescriptor,
        input: &InputData,
    ) -> Result<u64> {
        Ok(input.text(INPUT_TEXT_FIELD).map(str::len).unwrap_or(0) as u64)
    }

    async fn has_data_changed(
        &self,
        _assign: &Assignment,
        _submission: &Submission,
        plugin: &PluginDescriptor,
        input: &InputData,
    ) -> Result<bool> {
        Ok(match input.text(INPUT_TEXT_FIELD) {
            Some(text) => text != Self::saved_text(plugin),
            None => false,
        })
    }

    async fn is_enabled_for_edit(&self) -> Result<bool> {
        Ok(true)
    }

    async fn prepare_submission_data(
        &self,
        _assign: &Assignment,
        _submission: &Submission,
        plugin: &PluginDescriptor,
        input: &InputData,
        plugin_data: &mut PluginData,
        _offline: bool,
        _user_id: Option<u64>,
        _site_id: Option<&str>,
    ) -> Result<()> {
        let text = Self::text_to_submit(plugin, input);
        Self::check_word_limit(plugin, text)?;
        plugin_data.insert(PAYLOAD_FIELD, editor_payload(text));
        Ok(())
    }

    async fn prepare_sync_data(
        &self,
        _assign: &Assignment,
        _submission: &Submission,
        _plugin: &PluginDescriptor,
        offline: &OfflineSubmission,
        plugin_data: &mut PluginData,
        _site_id: Option<&str>,
    ) -> Result<()> {
        if let Some(stored) = offline.plugindata.get(PAYLOAD_FIELD) {
            plugin_data.insert(PAYLOAD_FIELD, stored.clone());
        }
        Ok(())
    }
}
