/*============================================================
  Synavera Project: Syn-Assign
  Module: synassign_core::handler
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Define the submission handler capability trait and the
    default provider whose hooks are all inert: empty lists,
    false, zero, or an immediately completed future.

  Security / Safety Notes:
    Default hooks perform no I/O and never mutate the plugin
    data accumulator; only concrete handlers may do so.

  Dependencies:
    async-trait for object-safe async hooks.

  Operational Scope:
    Every submission plugin handler implements this trait and
    composes DefaultSubmissionHandler for the hooks it leaves
    untouched.

  Revision History:
    2026-09-21 COD  Authored capability trait and defaults.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Total hooks: every default succeeds
    - Stateless provider, safe to share across tasks
    - Uniform async contract for I/O-capable hooks
============================================================*/

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::lang::{plugin_name_key, translate_if_known, Translator};
use crate::model::{
    Assignment, InputData, OfflineSubmission, PluginData, PluginDescriptor, PluginFile,
    Submission,
};

/// Whether a UI unit renders submission data or edits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentMode {
    View,
    Edit,
}

impl ComponentMode {
    pub fn from_edit(edit: bool) -> Self {
        if edit {
            ComponentMode::Edit
        } else {
            ComponentMode::View
        }
    }
}

/// A display or edit unit offered by a handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginComponent {
    pub name: String,
    pub mode: ComponentMode,
}

impl PluginComponent {
    pub fn new<S: Into<String>>(name: S, mode: ComponentMode) -> Self {
        Self {
            name: name.into(),
            mode,
        }
    }
}

/// Opaque values supplied by the host when resolving components.
#[derive(Debug, Clone, Default)]
pub struct ComponentContext {
    values: BTreeMap<String, String>,
}

impl ComponentContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Capability interface for submission plugin handlers.
///
/// Every hook has an inert default. Implementors override only the
/// hooks whose behaviour differs; defaults never fail.
#[async_trait]
pub trait SubmissionHandler: Send + Sync {
    /// Handler identifier.
    fn name(&self) -> &str;

    /// Submission plugin type served by this handler.
    fn plugin_type(&self) -> &str;

    /// Translation lookup used for display names.
    fn translator(&self) -> &dyn Translator;

    /// Whether an existing submission may be edited offline.
    ///
    /// Denied by default: server-filtered content cannot be safely
    /// re-edited without the server.
    fn can_edit_offline(
        &self,
        _assign: &Assignment,
        _submission: &Submission,
        _plugin: &PluginDescriptor,
    ) -> bool {
        false
    }

    /// Whether the plugin holds no displayable data.
    fn is_empty(&self, _assign: &Assignment, _plugin: &PluginDescriptor) -> bool {
        true
    }

    /// Discard transient edit state when the learner cancels.
    fn clear_tmp_data(
        &self,
        _assign: &Assignment,
        _submission: &Submission,
        _plugin: &PluginDescriptor,
        _input: &InputData,
    ) {
    }

    /// Copy data from the previous attempt into `plugin_data`.
    async fn copy_submission_data(
        &self,
        _assign: &Assignment,
        _plugin: &PluginDescriptor,
        _plugin_data: &mut PluginData,
        _user_id: Option<u64>,
        _site_id: Option<&str>,
    ) -> Result<()> {
        Ok(())
    }

    /// Remove locally stored plugin data for a submission.
    async fn delete_offline_data(
        &self,
        _assign: &Assignment,
        _submission: &Submission,
        _plugin: &PluginDescriptor,
        _offline: &OfflineSubmission,
        _site_id: Option<&str>,
    ) -> Result<()> {
        Ok(())
    }

    /// Resolve the UI unit that renders or edits this plugin.
    async fn get_component(
        &self,
        _context: &ComponentContext,
        _plugin: &PluginDescriptor,
        _edit: bool,
    ) -> Result<Option<PluginComponent>> {
        Ok(None)
    }

    /// Remote files that should be prefetched for this plugin.
    async fn get_plugin_files(
        &self,
        _assign: &Assignment,
        _submission: &Submission,
        _plugin: &PluginDescriptor,
        _site_id: Option<&str>,
    ) -> Result<Vec<PluginFile>> {
        Ok(Vec::new())
    }

    /// Display name for the plugin.
    ///
    /// Uses the translated `pluginname` string when one is registered,
    /// then the descriptor's own name. `None` when neither exists.
    fn get_plugin_name(&self, plugin: &PluginDescriptor) -> Option<String> {
        let key = plugin_name_key(&plugin.plugin_type);
        translate_if_known(self.translator(), &key).or_else(|| {
            plugin
                .name
                .as_ref()
                .filter(|name| !name.is_empty())
                .cloned()
        })
    }

    /// Bytes sent when copying the previous attempt.
    async fn get_size_for_copy(
        &self,
        _assign: &Assignment,
        _plugin: &PluginDescriptor,
    ) -> Result<u64> {
        Ok(0)
    }

    /// Bytes sent when saving the current edit.
    async fn get_size_for_edit(
        &self,
        _assign: &Assignment,
        _submission: &Submission,
        _plugin: &PluginDescriptor,
        _input: &InputData,
    ) -> Result<u64> {
        Ok(0)
    }

    /// Whether the in-progress edit differs from the saved state.
    async fn has_data_changed(
        &self,
        _assign: &Assignment,
        _submission: &Submission,
        _plugin: &PluginDescriptor,
        _input: &InputData,
    ) -> Result<bool> {
        Ok(false)
    }

    async fn is_enabled(&self) -> Result<bool> {
        Ok(true)
    }

    async fn is_enabled_for_edit(&self) -> Result<bool> {
        Ok(false)
    }

    /// Fetch non-file data needed to display the plugin offline.
    async fn prefetch(
        &self,
        _assign: &Assignment,
        _submission: &Submission,
        _plugin: &PluginDescriptor,
        _site_id: Option<&str>,
    ) -> Result<()> {
        Ok(())
    }

    /// Turn learner input into the network payload, appended to `plugin_data`.
    #[allow(clippy::too_many_arguments)]
    async fn prepare_submission_data(
        &self,
        _assign: &Assignment,
        _submission: &Submission,
        _plugin: &PluginDescriptor,
        _input: &InputData,
        _plugin_data: &mut PluginData,
        _offline: bool,
        _user_id: Option<u64>,
        _site_id: Option<&str>,
    ) -> Result<()> {
        Ok(())
    }

    /// Turn stored offline data into the network payload during a sync pass.
    async fn prepare_sync_data(
        &self,
        _assign: &Assignment,
        _submission: &Submission,
        _plugin: &PluginDescriptor,
        _offline: &OfflineSubmission,
        _plugin_data: &mut PluginData,
        _site_id: Option<&str>,
    ) -> Result<()> {
        Ok(())
    }
}

/// Handler that keeps every default.
///
/// Holds nothing but the translation handle; cheap to clone and safe to
/// share for the lifetime of the process.
#[derive(Clone)]
pub struct DefaultSubmissionHandler {
    translator: Arc<dyn Translator>,
}

impl DefaultSubmissionHandler {
    pub const NAME: &'static str = "AddonModAssignBaseSubmissionHandler";
    pub const TYPE: &'static str = "base";

    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }
}

impl SubmissionHandler for DefaultSubmissionHandler {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn plugin_type(&self) -> &str {
        Self::TYPE
    }

    fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }
}
