/*============================================================
  Synavera Project: Syn-Assign
  Module: synassign_core::plugins
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Built-in submission plugin handlers and the static lookup
    that maps a plugin type to its handler.

  Security / Safety Notes:
    Handlers only read submission records and write into the
    caller-owned accumulator.

  Dependencies:
    None beyond crate modules.

  Operational Scope:
    Used by the report builder to evaluate every plugin of a
    submission.

  Revision History:
    2026-09-22 COD  Added built-in handlers.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Composition over the default provider
    - Unknown types degrade to inert defaults
============================================================*/

mod comments;
mod onlinetext;

use std::sync::Arc;

pub use comments::CommentsHandler;
pub use onlinetext::OnlineTextHandler;

use crate::handler::{DefaultSubmissionHandler, SubmissionHandler};
use crate::lang::Translator;

/// Handler for `plugin_type`; types without a built-in handler get the
/// default provider.
pub fn builtin_handler(
    plugin_type: &str,
    translator: Arc<dyn Translator>,
) -> Box<dyn SubmissionHandler> {
    let defaults = DefaultSubmissionHandler::new(translator);
    match plugin_type {
        OnlineTextHandler::TYPE => Box::new(OnlineTextHandler::new(defaults)),
        CommentsHandler::TYPE => Box::new(CommentsHandler::new(defaults)),
        _ => Box::new(defaults),
    }
}
