/*============================================================
  Synavera Project: Syn-Assign
  Module: synassign_core::error
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Centralise Syn-Assign-Core error types. Default submission
    hooks never fail; these variants cover concrete handlers,
    configuration loading and report output.

  Security / Safety Notes:
    Error contexts carry paths and counts only; submission text
    is never echoed into diagnostics.

  Dependencies:
    thiserror for ergonomic error definitions.

  Operational Scope:
    Used across modules to propagate recoverable failures and
    consolidate exit codes for the binary entry point.

  Revision History:
    2026-09-21 COD  Established shared error definitions.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Explicit error taxonomy with actionable context
    - No silent failure paths
    - Stable exit codes for operational tooling
============================================================*/

use std::process::ExitCode;

use thiserror::Error;

/// Result alias for Syn-Assign-Core operations.
pub type Result<T> = std::result::Result<T, SynassignError>;

/// Enumerates high-level error domains surfaced by Syn-Assign-Core.
#[derive(Debug, Error)]
pub enum SynassignError {
    #[error("Configuration: {0}")]
    Config(String),
    #[error("Serialization: {0}")]
    Serialization(String),
    #[error("Filesystem: {0}")]
    Filesystem(String),
    #[error("Word limit exceeded: {words} words submitted, limit is {limit}")]
    WordLimitExceeded { words: usize, limit: usize },
}

impl SynassignError {
    /// Map error category to a deterministic exit code.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    /// Raw process status behind `exit_code`.
    pub fn exit_status(&self) -> u8 {
        match self {
            SynassignError::Config(_) => 20,
            SynassignError::Serialization(_) => 31,
            SynassignError::Filesystem(_) => 40,
            SynassignError::WordLimitExceeded { .. } => 60,
        }
    }
}
