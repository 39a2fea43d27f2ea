/*============================================================
  Synavera Project: Syn-Assign
  Module: synassign_core::config
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Load Syn-Assign-Core configuration from TOML, applying
    XDG-aware defaults for report and log locations.

  Security / Safety Notes:
    Configuration is read from user-owned paths only; a missing
    default file is not an error.

  Dependencies:
    toml for parsing, dirs for platform directories.

  Operational Scope:
    Consumed by the binary entry point before any handler runs.

  Revision History:
    2026-09-23 COD  Authored configuration loader.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Explicit defaults, no hidden state
    - Structured parsing with clear failure modes
============================================================*/

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SynassignError};

const APP_DIR: &str = "syn-assign";

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SynassignConfig {
    /// Language pack used to translate plugin names.
    pub lang_strings: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl SynassignConfig {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load_from_optional_path(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(explicit) => Self::load(explicit),
            None => match default_config_path() {
                Some(candidate) if candidate.exists() => Self::load(&candidate),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            SynassignError::Config(format!(
                "Failed to read configuration {}: {err}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&raw).map_err(|err| match err {
            SynassignError::Config(message) => {
                SynassignError::Config(format!("{message} ({})", path.display()))
            }
            other => other,
        })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw)
            .map_err(|err| SynassignError::Config(format!("Invalid configuration: {err}")))
    }

    pub fn report_path(&self) -> PathBuf {
        self.report_path
            .clone()
            .unwrap_or_else(|| data_dir().join("report.json"))
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| data_dir().join("logs"))
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_fields() {
        let config = SynassignConfig::from_toml_str(
            r#"
lang_strings = "/etc/syn-assign/en.toml"
report_path = "/tmp/report.json"
log_dir = "/tmp/logs"
"#,
        )
        .unwrap();
        assert_eq!(
            config.lang_strings.as_deref(),
            Some(Path::new("/etc/syn-assign/en.toml"))
        );
        assert_eq!(config.report_path(), PathBuf::from("/tmp/report.json"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/logs"));
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = SynassignConfig::from_toml_str("").unwrap();
        assert!(config.lang_strings.is_none());
        assert!(config.report_path().ends_with("syn-assign/report.json"));
        assert!(config.log_dir().ends_with("syn-assign/logs"));
    }

    #[test]
    fn unknown_types_are_config_errors() {
        let err = SynassignConfig::from_toml_str("log_dir = 5").unwrap_err();
        assert!(matches!(err, SynassignError::Config(_)));
    }

    #[test]
    fn explicit_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(SynassignConfig::load_from_optional_path(Some(&missing)).is_err());
    }
}
