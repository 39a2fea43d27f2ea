/*============================================================
  Synavera Project: Syn-Assign
  Module: synassign_core::plugins::comments
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Handler for submission comments. Comments are read-only
    from the submission's point of view.

  Security / Safety Notes:
    No data is written; comments are never part of a payload.

  Dependencies:
    async-trait for the handler implementation.

  Operational Scope:
    Selected by builtin_handler for the `comments` type.

  Revision History:
    2026-09-22 COD  Added comments handler.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Override only what differs from the defaults
============================================================*/

use async_trait::async_trait;

use crate::error::Result;
use crate::handler::{
    ComponentContext, ComponentMode, DefaultSubmissionHandler, PluginComponent,
    SubmissionHandler,
};
use crate::lang::Translator;
use crate::model::{Assignment, PluginDescriptor, Submission};

#[derive(Clone)]
pub struct CommentsHandler {
    defaults: DefaultSubmissionHandler,
}

impl CommentsHandler {
    pub const NAME: &'static str = "AddonModAssignSubmissionCommentsHandler";
    pub const TYPE: &'static str = "comments";

    pub fn new(defaults: DefaultSubmissionHandler) -> Self {
        Self { defaults }
    }
}

#[async_trait]
impl SubmissionHandler for CommentsHandler {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn plugin_type(&self) -> &str {
        Self::TYPE
    }

    fn translator(&self) -> &dyn Translator {
        self.defaults.translator()
    }

    // Comments hold no submission data, so they never block offline edits.
    fn can_edit_offline(
        &self,
        _assign: &Assignment,
        _submission: &Submission,
        _plugin: &PluginDescriptor,
    ) -> bool {
        true
    }

    async fn get_component(
        &self,
        _context: &ComponentContext,
        _plugin: &PluginDescriptor,
        edit: bool,
    ) -> Result<Option<PluginComponent>> {
        if edit {
            return Ok(None);
        }
        Ok(Some(PluginComponent::new(Self::TYPE, ComponentMode::View)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::lang::LangStrings;
    use crate::model::{InputData, PluginData};

    fn handler() -> CommentsHandler {
        CommentsHandler::new(DefaultSubmissionHandler::new(Arc::new(LangStrings::new())))
    }

    #[tokio::test]
    async fn view_only_component() {
        let handler = handler();
        let plugin = PluginDescriptor::new("comments");
        let context = ComponentContext::new();

        let view = handler.get_component(&context, &plugin, false).await.unwrap();
        assert_eq!(view, Some(PluginComponent::new("comments", ComponentMode::View)));
        assert_eq!(handler.get_component(&context, &plugin, true).await.unwrap(), None);
    }

    #[tokio::test]
    async fn allows_offline_edit_and_inherits_the_rest() {
        let handler = handler();
        let assign = Assignment::default();
        let submission = Submission::default();
        let plugin = PluginDescriptor::new("comments");

        assert!(handler.can_edit_offline(&assign, &submission, &plugin));
        assert!(handler.is_empty(&assign, &plugin));
        assert!(!handler.is_enabled_for_edit().await.unwrap());

        let mut data = PluginData::new();
        handler
            .prepare_submission_data(
                &assign,
                &submission,
                &plugin,
                &InputData::new(),
                &mut data,
                false,
                None,
                None,
            )
            .await
            .unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn name_uses_shared_translator() {
        let mut strings = LangStrings::new();
        strings.insert(
            "addon.mod_assign_submission_comments.pluginname",
            "Submission comments",
        );
        let handler =
            CommentsHandler::new(DefaultSubmissionHandler::new(Arc::new(strings)));
        assert_eq!(
            handler
                .get_plugin_name(&PluginDescriptor::new("comments"))
                .as_deref(),
            Some("Submission comments")
        );
    }
}
