/*============================================================
  Synavera Project: Syn-Assign
  Module: synassign_core
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Submission plugin capability layer for the Syn-Assign
    learning client: the handler trait with inert defaults,
    built-in handlers, and the capability report.

  Security / Safety Notes:
    No network access; handlers operate on records supplied
    by the caller.

  Dependencies:
    async-trait, serde, thiserror, chrono, sha2, toml, dirs.

  Operational Scope:
    Linked by the synassign-core binary and by host crates that
    implement their own submission plugin handlers.

  Revision History:
    2026-09-21 COD  Split library from binary entry point.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Small public surface, explicit re-exports
============================================================*/

pub mod config;
pub mod error;
pub mod handler;
pub mod lang;
pub mod logger;
pub mod model;
pub mod plugins;
pub mod report;

pub use error::{Result, SynassignError};
pub use handler::{
    ComponentContext, ComponentMode, DefaultSubmissionHandler, PluginComponent,
    SubmissionHandler,
};
pub use lang::{LangStrings, Translator};
